use chrono::{DateTime, TimeZone, Utc};

/// Fecha y hora de una tarjeta: "29/05/2024 16:26"
pub fn format_card_timestamp<Tz: TimeZone>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp
        .with_timezone(tz)
        .format("%d/%m/%Y %H:%M")
        .to_string()
}

/// Texto de un toast de cambio de estado: "Status atualizado: Entregue"
pub fn status_toast(prefix: &str, status_label: &str) -> String {
    format!("{}: {}", prefix, status_label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn card_timestamp_uses_the_given_zone() {
        let ts = DateTime::parse_from_rfc3339("2024-05-29T16:26:40Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_card_timestamp(&ts, &Utc), "29/05/2024 16:26");

        let brt = FixedOffset::west_opt(3 * 3600).unwrap();
        assert_eq!(format_card_timestamp(&ts, &brt), "29/05/2024 13:26");
    }
}
