use crate::models::package::{Package, PackageStatus};

/// Filtro por estado (chips del dashboard)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(PackageStatus),
}

impl StatusFilter {
    pub const CHIPS: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Only(PackageStatus::ReceivedAtDesk),
        StatusFilter::Only(PackageStatus::AvailableForPickup),
        StatusFilter::Only(PackageStatus::Delivered),
    ];

    pub fn matches(self, status: PackageStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }

    /// Clave usada en ids del DOM y en i18n ("filter-todos", ...)
    pub fn key(self) -> &'static str {
        match self {
            StatusFilter::All => "todos",
            StatusFilter::Only(PackageStatus::ReceivedAtDesk) => "portaria",
            StatusFilter::Only(PackageStatus::AvailableForPickup) => "disponivel",
            StatusFilter::Only(PackageStatus::Delivered) => "entregue",
        }
    }
}

/// Consulta sobre la colección: búsqueda libre + filtro de estado (AND)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PackageQuery {
    needle: String,
    pub status_filter: StatusFilter,
}

impl PackageQuery {
    pub fn new(search: &str, status_filter: StatusFilter) -> Self {
        Self {
            needle: search.to_lowercase(),
            status_filter,
        }
    }

    /// Coincidencia sin distinguir mayúsculas en destinatario o local
    pub fn matches(&self, pkg: &Package) -> bool {
        let text_match = self.needle.is_empty()
            || pkg.recipient.to_lowercase().contains(&self.needle)
            || pkg.location.to_lowercase().contains(&self.needle);

        text_match && self.status_filter.matches(pkg.status)
    }
}

/// Totales por estado
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub received: usize,
    pub available: usize,
    pub delivered: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.received + self.available + self.delivered
    }

    pub fn for_filter(&self, filter: StatusFilter) -> usize {
        match filter {
            StatusFilter::All => self.total(),
            StatusFilter::Only(PackageStatus::ReceivedAtDesk) => self.received,
            StatusFilter::Only(PackageStatus::AvailableForPickup) => self.available,
            StatusFilter::Only(PackageStatus::Delivered) => self.delivered,
        }
    }

    pub(crate) fn add(&mut self, status: PackageStatus) {
        match status {
            PackageStatus::ReceivedAtDesk => self.received += 1,
            PackageStatus::AvailableForPickup => self.available += 1,
            PackageStatus::Delivered => self.delivered += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_keys_match_dom_ids() {
        let keys: Vec<_> = StatusFilter::CHIPS.iter().map(|f| f.key()).collect();
        assert_eq!(keys, vec!["todos", "portaria", "disponivel", "entregue"]);
    }

    #[test]
    fn counts_per_filter() {
        let mut counts = StatusCounts::default();
        counts.add(PackageStatus::ReceivedAtDesk);
        counts.add(PackageStatus::ReceivedAtDesk);
        counts.add(PackageStatus::Delivered);
        assert_eq!(counts.for_filter(StatusFilter::All), 3);
        assert_eq!(counts.for_filter(StatusFilter::Only(PackageStatus::ReceivedAtDesk)), 2);
        assert_eq!(counts.for_filter(StatusFilter::Only(PackageStatus::AvailableForPickup)), 0);
    }
}
