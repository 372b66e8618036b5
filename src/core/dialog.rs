//! Dialog state for the create and status-change flows
//!
//! These hold no terminal code. The prompt layer drives them and reads
//! back `is_open()` and `error()` to decide what to show next.

use miette::Diagnostic;
use thiserror::Error;

use crate::core::client::{Created, FleetApi};
use crate::core::dashboard::Dashboard;
use crate::core::vehicle::{Vehicle, VehicleForm, VehicleStatus};

#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum DialogError {
    #[error("Vehicle not found: {0}")]
    #[diagnostic(
        code(fleetdash::dialog::not_found),
        help("Run 'fleetdash list' to see the current vehicle ids")
    )]
    VehicleNotFound(i64),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Hidden,
    Open,
}

/// The "add vehicle" dialog
#[derive(Debug, Default)]
pub struct CreateDialog {
    visibility: Visibility,
    pub form: VehicleForm,
    error: Option<String>,
}

impl CreateDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.visibility = Visibility::Open;
    }

    /// Hide the dialog and reset its form
    pub fn close(&mut self) {
        self.visibility = Visibility::Hidden;
        self.form = VehicleForm::default();
        self.error = None;
    }

    pub fn is_open(&self) -> bool {
        self.visibility == Visibility::Open
    }

    /// Error text from the last failed submit
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validate and send the form
    ///
    /// Returns `None` when validation or the request failed; the dialog then
    /// stays open with the form intact and `error()` set.
    pub fn submit<A: FleetApi + ?Sized>(&mut self, api: &A) -> Option<Created> {
        let payload = match self.form.validate() {
            Ok(p) => p,
            Err(e) => {
                self.error = Some(e.to_string());
                return None;
            }
        };

        match api.create_vehicle(&payload) {
            Ok(created) => {
                self.close();
                Some(created)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }
}

/// One choice in the status dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusOption {
    pub status: VehicleStatus,
    pub label: &'static str,
    pub icon: &'static str,
    pub current: bool,
}

/// The "change status" dialog for one vehicle
#[derive(Debug)]
pub struct StatusDialog {
    vehicle: Vehicle,
    visibility: Visibility,
    error: Option<String>,
}

impl StatusDialog {
    /// Open the dialog for a vehicle in the cache
    pub fn open(dashboard: &Dashboard, id: i64) -> Result<Self, DialogError> {
        let vehicle = dashboard
            .find(id)
            .cloned()
            .ok_or(DialogError::VehicleNotFound(id))?;
        Ok(Self {
            vehicle,
            visibility: Visibility::Open,
            error: None,
        })
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn is_open(&self) -> bool {
        self.visibility == Visibility::Open
    }

    pub fn close(&mut self) {
        self.visibility = Visibility::Hidden;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn options(&self) -> Vec<StatusOption> {
        VehicleStatus::ALL
            .iter()
            .map(|&status| StatusOption {
                status,
                label: status.label(),
                icon: status.icon(),
                current: self.vehicle.status == Some(status),
            })
            .collect()
    }

    /// Index of the current status in `options()`, if known
    pub fn current_index(&self) -> Option<usize> {
        self.options().iter().position(|o| o.current)
    }

    /// Send the status change; closes on success
    pub fn choose<A: FleetApi + ?Sized>(&mut self, api: &A, status: VehicleStatus) -> bool {
        match api.set_status(self.vehicle.id, status) {
            Ok(updated) => {
                self.vehicle = updated.unwrap_or_else(|| Vehicle {
                    status: Some(status),
                    ..self.vehicle.clone()
                });
                self.error = None;
                self.close();
                true
            }
            Err(e) => {
                self.error = Some(e.to_string());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::FakeApi;

    fn filled_form() -> VehicleForm {
        VehicleForm {
            license_plate: "A123BV77".into(),
            model: "GAZelle NEXT".into(),
            year: "2020".into(),
            fuel_type: "diesel".into(),
        }
    }

    #[test]
    fn test_create_success_closes_and_resets() {
        let api = FakeApi::default();
        let mut dialog = CreateDialog::new();
        dialog.open();
        dialog.form = filled_form();

        let created = dialog.submit(&api).expect("create should succeed");
        assert_eq!(created.id, Some(1));
        assert!(!dialog.is_open());
        assert_eq!(dialog.form, VehicleForm::default());
        assert!(dialog.error().is_none());
    }

    #[test]
    fn test_failed_create_keeps_dialog_open_with_server_text() {
        let api = FakeApi {
            fail_with: Some((400, r#"{"detail": "A vehicle with this plate already exists"}"#)),
            ..Default::default()
        };
        let mut dialog = CreateDialog::new();
        dialog.open();
        dialog.form = filled_form();

        assert!(dialog.submit(&api).is_none());
        assert!(dialog.is_open());
        assert_eq!(dialog.error(), Some("A vehicle with this plate already exists"));
        assert_eq!(dialog.form, filled_form());
    }

    #[test]
    fn test_invalid_form_never_reaches_api() {
        let api = FakeApi::default();
        let mut dialog = CreateDialog::new();
        dialog.open();
        dialog.form.model = "Volvo".into();

        assert!(dialog.submit(&api).is_none());
        assert!(dialog.is_open());
        assert!(dialog.error().unwrap().contains("license plate and model"));
        assert!(api.calls.borrow().is_empty());
    }

    #[test]
    fn test_status_dialog_marks_current() {
        let mut dashboard = Dashboard::default();
        dashboard.replace(vec![Vehicle::new(3, VehicleStatus::Maintenance)]);
        let dialog = StatusDialog::open(&dashboard, 3).unwrap();

        let options = dialog.options();
        assert_eq!(options.len(), 3);
        assert_eq!(dialog.current_index(), Some(1));
        assert!(options[1].current);
        assert_eq!(options[1].label, "Under maintenance");
    }

    #[test]
    fn test_status_dialog_unknown_vehicle() {
        let dashboard = Dashboard::default();
        let err = StatusDialog::open(&dashboard, 99).unwrap_err();
        assert_eq!(err, DialogError::VehicleNotFound(99));
        assert_eq!(err.to_string(), "Vehicle not found: 99");
    }

    #[test]
    fn test_status_choose_success_and_failure() {
        let mut dashboard = Dashboard::default();
        dashboard.replace(vec![Vehicle::new(3, VehicleStatus::Active)]);

        let api = FakeApi::default();
        let mut dialog = StatusDialog::open(&dashboard, 3).unwrap();
        assert!(dialog.choose(&api, VehicleStatus::Inactive));
        assert!(!dialog.is_open());
        assert_eq!(dialog.vehicle().status, Some(VehicleStatus::Inactive));
        assert_eq!(api.calls.borrow().as_slice(), ["status 3 inactive"]);

        let failing = FakeApi {
            fail_with: Some((404, "")),
            ..Default::default()
        };
        let mut dialog = StatusDialog::open(&dashboard, 3).unwrap();
        assert!(!dialog.choose(&failing, VehicleStatus::Maintenance));
        assert!(dialog.is_open());
        assert!(dialog.error().unwrap().contains("API endpoint not found"));
    }
}
