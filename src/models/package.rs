use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::error::{RegistryError, RegistryResult};

// ============================================================================
// ESTADOS - Máquina de estados lineal de una encomenda
// ============================================================================

/// Estado de una encomenda.
///
/// Se serializa con las etiquetas en portugués para que los datos ya
/// guardados en localStorage sigan siendo legibles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PackageStatus {
    #[serde(rename = "Na Portaria")]
    ReceivedAtDesk,
    #[serde(rename = "Disponível para Retirada")]
    AvailableForPickup,
    #[serde(rename = "Entregue")]
    Delivered,
}

impl PackageStatus {
    pub const ALL: [PackageStatus; 3] = [
        PackageStatus::ReceivedAtDesk,
        PackageStatus::AvailableForPickup,
        PackageStatus::Delivered,
    ];

    /// Siguiente estado permitido (None si es terminal)
    pub fn next(self) -> Option<PackageStatus> {
        match self {
            PackageStatus::ReceivedAtDesk => Some(PackageStatus::AvailableForPickup),
            PackageStatus::AvailableForPickup => Some(PackageStatus::Delivered),
            PackageStatus::Delivered => None,
        }
    }

    /// Etiqueta canónica (la misma que se persiste)
    pub fn label(self) -> &'static str {
        match self {
            PackageStatus::ReceivedAtDesk => "Na Portaria",
            PackageStatus::AvailableForPickup => "Disponível para Retirada",
            PackageStatus::Delivered => "Entregue",
        }
    }

    /// Clave i18n de la etiqueta
    pub fn i18n_key(self) -> &'static str {
        match self {
            PackageStatus::ReceivedAtDesk => "status_portaria",
            PackageStatus::AvailableForPickup => "status_disponivel",
            PackageStatus::Delivered => "status_entregue",
        }
    }

    /// Clase CSS del badge de estado
    pub fn badge_class(self) -> &'static str {
        match self {
            PackageStatus::ReceivedAtDesk => "status-portaria",
            PackageStatus::AvailableForPickup => "status-disponivel",
            PackageStatus::Delivered => "status-entregue",
        }
    }

    /// Clases del icono (Phosphor) mostrado cuando no hay foto
    pub fn icon_class(self) -> &'static str {
        match self {
            PackageStatus::ReceivedAtDesk => "ph ph-package",
            PackageStatus::AvailableForPickup => "ph ph-check",
            PackageStatus::Delivered => "ph ph-signature",
        }
    }
}

impl fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// MODELO PRINCIPAL
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub status: PackageStatus,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: String,
    #[serde(default)]
    pub tracking: Option<String>,
    pub recipient: String,
    pub location: String,
    /// Tipo de encomenda (Caixa, Envelope, ...)
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub photo: Option<String>,
    pub status: PackageStatus,
    pub created_at: DateTime<Utc>,
    pub history: Vec<HistoryEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl Package {
    /// Crear una encomenda recién registrada (estado inicial Na Portaria)
    pub(crate) fn received(id: String, fields: NewPackage, now: DateTime<Utc>) -> Self {
        Self {
            id,
            tracking: normalize_tracking(fields.tracking.as_deref()),
            recipient: fields.recipient.trim().to_string(),
            location: fields.location.trim().to_string(),
            kind: fields.kind.trim().to_string(),
            photo: fields.photo,
            status: PackageStatus::ReceivedAtDesk,
            created_at: now,
            history: vec![HistoryEntry {
                status: PackageStatus::ReceivedAtDesk,
                timestamp: now,
            }],
            signature: None,
        }
    }

    /// Aplicar una transición. Solo se acepta el siguiente estado de la máquina.
    pub(crate) fn apply_transition(
        &mut self,
        new_status: PackageStatus,
        signature: Option<String>,
        now: DateTime<Utc>,
    ) -> RegistryResult<()> {
        if self.status.next() != Some(new_status) {
            return Err(RegistryError::InvalidTransition {
                from: self.status,
                to: new_status,
            });
        }

        self.status = new_status;
        self.history.push(HistoryEntry {
            status: new_status,
            timestamp: now,
        });

        match (new_status, signature) {
            (PackageStatus::Delivered, Some(sig)) => self.signature = Some(sig),
            (_, Some(_)) => {
                log::warn!("⚠️ [PACKAGE] Firma ignorada para {}: solo se guarda al entregar", self.id);
            }
            (_, None) => {}
        }
        Ok(())
    }

    /// Reparar un registro leído de storage para que cumpla las invariantes.
    /// Devuelve true si hubo que modificarlo.
    pub(crate) fn repair(&mut self) -> bool {
        let mut repaired = false;

        let tracking = normalize_tracking(self.tracking.as_deref());
        if tracking != self.tracking {
            self.tracking = tracking;
            repaired = true;
        }

        if self.history.is_empty() {
            log::warn!("⚠️ [PACKAGE] {} sin historial, se reconstruye desde la recepción", self.id);
            self.history.push(HistoryEntry {
                status: PackageStatus::ReceivedAtDesk,
                timestamp: self.created_at,
            });
            repaired = true;
        }

        if self.history.last().map(|h| h.status) != Some(self.status) {
            log::warn!("⚠️ [PACKAGE] Historial inconsistente en {}, agregando entrada", self.id);
            let timestamp = self
                .history
                .last()
                .map(|h| h.timestamp)
                .unwrap_or(self.created_at);
            self.history.push(HistoryEntry {
                status: self.status,
                timestamp,
            });
            repaired = true;
        }

        if self.signature.is_some() && self.status != PackageStatus::Delivered {
            log::warn!("⚠️ [PACKAGE] Firma en encomenda no entregada {}, descartada", self.id);
            self.signature = None;
            repaired = true;
        }

        repaired
    }
}

// ============================================================================
// REGISTRO - Campos del formulario
// ============================================================================

/// Campos de registro de una nueva encomenda
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewPackage {
    pub tracking: Option<String>,
    pub recipient: String,
    pub location: String,
    pub kind: String,
    /// Foto capturada antes de enviar (data URL, se guarda tal cual)
    pub photo: Option<String>,
}

impl NewPackage {
    /// Validar campos obligatorios (no vacíos)
    pub fn validate(&self) -> RegistryResult<()> {
        let required = [
            ("recipient", &self.recipient),
            ("location", &self.location),
            ("type", &self.kind),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(RegistryError::Validation(field));
            }
        }
        Ok(())
    }
}

/// Normalizar código de rastreio: recortado y en mayúsculas; vacío = ausente
pub fn normalize_tracking(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fields() -> NewPackage {
        NewPackage {
            tracking: Some(" br123 ".to_string()),
            recipient: "Ana".to_string(),
            location: "Bloco B".to_string(),
            kind: "Caixa".to_string(),
            photo: None,
        }
    }

    #[test]
    fn status_machine_is_linear() {
        assert_eq!(PackageStatus::ReceivedAtDesk.next(), Some(PackageStatus::AvailableForPickup));
        assert_eq!(PackageStatus::AvailableForPickup.next(), Some(PackageStatus::Delivered));
        assert_eq!(PackageStatus::Delivered.next(), None);
    }

    #[test]
    fn icon_classes_carry_the_phosphor_base_class() {
        for status in [
            PackageStatus::ReceivedAtDesk,
            PackageStatus::AvailableForPickup,
            PackageStatus::Delivered,
        ] {
            let classes: Vec<_> = status.icon_class().split(' ').collect();
            assert_eq!(classes.len(), 2);
            assert_eq!(classes[0], "ph");
            assert!(classes[1].starts_with("ph-"));
        }
        assert_eq!(PackageStatus::Delivered.icon_class(), "ph ph-signature");
    }

    #[test]
    fn status_serializes_with_portuguese_labels() {
        let json = serde_json::to_string(&PackageStatus::AvailableForPickup).unwrap();
        assert_eq!(json, "\"Disponível para Retirada\"");
        let back: PackageStatus = serde_json::from_str("\"Entregue\"").unwrap();
        assert_eq!(back, PackageStatus::Delivered);
    }

    #[test]
    fn received_package_starts_with_one_history_entry() {
        let now = Utc::now();
        let pkg = Package::received("p1".into(), fields(), now);
        assert_eq!(pkg.status, PackageStatus::ReceivedAtDesk);
        assert_eq!(pkg.tracking.as_deref(), Some("BR123"));
        assert_eq!(pkg.history, vec![HistoryEntry { status: PackageStatus::ReceivedAtDesk, timestamp: now }]);
    }

    #[test]
    fn skipping_a_stage_is_rejected() {
        let now = Utc::now();
        let mut pkg = Package::received("p1".into(), fields(), now);
        let err = pkg
            .apply_transition(PackageStatus::Delivered, Some("data:sig".into()), now)
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::InvalidTransition { from: PackageStatus::ReceivedAtDesk, to: PackageStatus::Delivered }
        ));
        assert_eq!(pkg.history.len(), 1);
        assert_eq!(pkg.signature, None);
    }

    #[test]
    fn signature_before_delivery_is_ignored() {
        let now = Utc::now();
        let mut pkg = Package::received("p1".into(), fields(), now);
        pkg.apply_transition(PackageStatus::AvailableForPickup, Some("data:sig".into()), now)
            .unwrap();
        assert_eq!(pkg.signature, None);
    }

    #[test]
    fn validation_names_the_empty_field() {
        let mut f = fields();
        f.location = "   ".into();
        assert!(matches!(f.validate(), Err(RegistryError::Validation("location"))));
    }

    #[test]
    fn legacy_record_is_parsed_and_repaired() {
        let json = r#"{
            "id": "1717000000000",
            "tracking": "",
            "recipient": "Bruno",
            "location": "Sala 12",
            "type": "Envelope",
            "photo": null,
            "status": "Disponível para Retirada",
            "createdAt": "2024-05-29T16:26:40.000Z",
            "history": [{"status": "Na Portaria", "timestamp": "2024-05-29T16:26:40.000Z"}]
        }"#;
        let mut pkg: Package = serde_json::from_str(json).unwrap();
        assert!(pkg.repair());
        assert_eq!(pkg.tracking, None);
        assert_eq!(pkg.history.len(), 2);
        assert_eq!(pkg.history.last().unwrap().status, pkg.status);
        assert!(!pkg.repair());
    }

    #[test]
    fn empty_history_is_rebuilt_from_the_desk() {
        let json = r#"{
            "id": "1717000000001",
            "recipient": "Carla",
            "location": "Torre A",
            "type": "Caixa",
            "status": "Entregue",
            "createdAt": "2024-05-29T16:26:40.000Z",
            "history": [],
            "signature": "data:image/png;base64,SIG"
        }"#;
        let mut pkg: Package = serde_json::from_str(json).unwrap();
        assert!(pkg.repair());

        let statuses: Vec<_> = pkg.history.iter().map(|h| h.status).collect();
        assert_eq!(statuses, vec![PackageStatus::ReceivedAtDesk, PackageStatus::Delivered]);
        assert!(pkg.history.iter().all(|h| h.timestamp == pkg.created_at));
        assert_eq!(pkg.signature.as_deref(), Some("data:image/png;base64,SIG"));
        assert!(!pkg.repair());
    }
}
