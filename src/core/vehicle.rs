//! Vehicle records as served by the fleet API

use chrono::{DateTime, NaiveDateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Operational status of a vehicle
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    ValueEnum,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Active,
    Maintenance,
    Inactive,
}

impl VehicleStatus {
    /// All statuses, in the order they are offered to the user
    pub const ALL: [VehicleStatus; 3] = [
        VehicleStatus::Active,
        VehicleStatus::Maintenance,
        VehicleStatus::Inactive,
    ];

    /// Wire value used in query strings and JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Active => "active",
            VehicleStatus::Maintenance => "maintenance",
            VehicleStatus::Inactive => "inactive",
        }
    }

    /// Human-readable label shown on cards and in dialogs
    pub fn label(&self) -> &'static str {
        match self {
            VehicleStatus::Active => "Ready for service",
            VehicleStatus::Maintenance => "Under maintenance",
            VehicleStatus::Inactive => "Inactive",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            VehicleStatus::Active => "🚗",
            VehicleStatus::Maintenance => "🔧",
            VehicleStatus::Inactive => "⏸️",
        }
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for VehicleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(VehicleStatus::Active),
            "maintenance" => Ok(VehicleStatus::Maintenance),
            "inactive" => Ok(VehicleStatus::Inactive),
            _ => Err(format!("Unknown status: {}", s)),
        }
    }
}

/// Label for an optional status (records may carry values outside the known set)
pub fn status_label(status: Option<VehicleStatus>) -> &'static str {
    status.map(|s| s.label()).unwrap_or("Unknown")
}

/// A single fleet vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: i64,

    #[serde(default)]
    pub license_plate: Option<String>,

    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub year: Option<i32>,

    #[serde(default)]
    pub fuel_type: Option<String>,

    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<VehicleStatus>,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Vehicle {
    /// Create a vehicle with only an id and status; remaining fields empty
    pub fn new(id: i64, status: VehicleStatus) -> Self {
        Self {
            id,
            license_plate: None,
            model: None,
            year: None,
            fuel_type: None,
            status: Some(status),
            created_at: None,
        }
    }

    pub fn with_plate(mut self, plate: impl Into<String>) -> Self {
        self.license_plate = Some(plate.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_fuel(mut self, fuel: impl Into<String>) -> Self {
        self.fuel_type = Some(fuel.into());
        self
    }

    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created_at = Some(created);
        self
    }

    pub fn model_str(&self) -> &str {
        self.model.as_deref().unwrap_or("")
    }

    pub fn plate_str(&self) -> &str {
        self.license_plate.as_deref().unwrap_or("")
    }

    /// Name used in confirmations and messages, e.g. "Volvo FH (E789KM79)"
    pub fn display_name(&self) -> String {
        match (self.model.as_deref(), self.license_plate.as_deref()) {
            (Some(model), Some(plate)) => format!("{} ({})", model, plate),
            (Some(model), None) => model.to_string(),
            (None, Some(plate)) => plate.to_string(),
            (None, None) => format!("vehicle #{}", self.id),
        }
    }
}

/// Unknown or missing status values decode as `None` instead of failing the whole list
fn lenient_status<'de, D>(deserializer: D) -> Result<Option<VehicleStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

/// Accepts RFC 3339 as well as naive ISO-8601 timestamps (taken as UTC)
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Payload for `POST /vehicles`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewVehicle {
    pub license_plate: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
}

/// Raw input collected by the create dialog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleForm {
    pub license_plate: String,
    pub model: String,
    pub year: String,
    pub fuel_type: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Fill in the required fields: license plate and model")]
    MissingRequired,

    #[error("Year must be a whole number, got '{0}'")]
    InvalidYear(String),
}

impl VehicleForm {
    /// Validate the raw input into a create payload
    pub fn validate(&self) -> Result<NewVehicle, FormError> {
        let license_plate = self.license_plate.trim();
        let model = self.model.trim();
        if license_plate.is_empty() || model.is_empty() {
            return Err(FormError::MissingRequired);
        }

        let year = match self.year.trim() {
            "" => None,
            y => Some(
                y.parse::<i32>()
                    .map_err(|_| FormError::InvalidYear(y.to_string()))?,
            ),
        };

        let fuel_type = match self.fuel_type.trim() {
            "" => None,
            f => Some(f.to_string()),
        };

        Ok(NewVehicle {
            license_plate: license_plate.to_string(),
            model: model.to_string(),
            year,
            fuel_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_status_roundtrip_str() {
        for status in VehicleStatus::ALL {
            assert_eq!(status.as_str().parse::<VehicleStatus>().unwrap(), status);
        }
        assert!("retired".parse::<VehicleStatus>().is_err());
        assert_eq!(" Active ".parse::<VehicleStatus>().unwrap(), VehicleStatus::Active);
    }

    #[test]
    fn test_decode_full_record() {
        let json = r#"{
            "id": 7,
            "license_plate": "A123BC77",
            "model": "GAZelle NEXT",
            "year": 2021,
            "fuel_type": "diesel",
            "status": "maintenance",
            "created_at": "2024-03-05T10:15:30.123456"
        }"#;
        let v: Vehicle = serde_json::from_str(json).unwrap();
        assert_eq!(v.id, 7);
        assert_eq!(v.status, Some(VehicleStatus::Maintenance));
        let created = v.created_at.unwrap();
        assert_eq!(created.year(), 2024);
        assert_eq!(created.hour(), 10);
    }

    #[test]
    fn test_decode_sparse_record() {
        let json = r#"{"id": 1, "license_plate": "B456", "model": "Kamaz", "status": "active"}"#;
        let v: Vehicle = serde_json::from_str(json).unwrap();
        assert_eq!(v.year, None);
        assert_eq!(v.fuel_type, None);
        assert_eq!(v.created_at, None);
    }

    #[test]
    fn test_decode_unknown_status_and_bad_timestamp() {
        let json = r#"{"id": 2, "status": "retired", "created_at": "yesterday"}"#;
        let v: Vehicle = serde_json::from_str(json).unwrap();
        assert_eq!(v.status, None);
        assert_eq!(v.created_at, None);
        assert_eq!(status_label(v.status), "Unknown");
    }

    #[test]
    fn test_parse_timestamp_rfc3339() {
        let dt = parse_timestamp("2024-01-02T03:04:05+03:00").unwrap();
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_display_name() {
        let v = Vehicle::new(3, VehicleStatus::Active)
            .with_model("Volvo FH")
            .with_plate("E789");
        assert_eq!(v.display_name(), "Volvo FH (E789)");
        assert_eq!(Vehicle::new(4, VehicleStatus::Active).display_name(), "vehicle #4");
    }

    #[test]
    fn test_form_requires_plate_and_model() {
        let form = VehicleForm {
            license_plate: "  ".into(),
            model: "Volvo".into(),
            ..Default::default()
        };
        assert_eq!(form.validate(), Err(FormError::MissingRequired));
    }

    #[test]
    fn test_form_validates_year() {
        let form = VehicleForm {
            license_plate: "A1".into(),
            model: "Volvo".into(),
            year: "twenty".into(),
            fuel_type: String::new(),
        };
        assert_eq!(form.validate(), Err(FormError::InvalidYear("twenty".into())));
    }

    #[test]
    fn test_form_to_payload_omits_empty_optionals() {
        let form = VehicleForm {
            license_plate: " A1 ".into(),
            model: "Volvo".into(),
            year: String::new(),
            fuel_type: " ".into(),
        };
        let payload = form.validate().unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, serde_json::json!({"license_plate": "A1", "model": "Volvo"}));
    }
}
