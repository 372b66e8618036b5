//! Test doubles shared by the core unit tests

use serde_json::Value;
use std::cell::RefCell;

use crate::core::client::{ApiError, Created, FleetApi};
use crate::core::vehicle::{NewVehicle, Vehicle, VehicleStatus};

/// In-memory API double that records calls and can be told to fail
#[derive(Default)]
pub(crate) struct FakeApi {
    pub vehicles: RefCell<Vec<Vehicle>>,
    pub fail_with: Option<(u16, &'static str)>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeApi {
    fn check(&self) -> Result<(), ApiError> {
        match self.fail_with {
            Some((status, body)) => Err(ApiError::from_response(status, body, "Request failed")),
            None => Ok(()),
        }
    }
}

impl FleetApi for FakeApi {
    fn list_vehicles(&self) -> Result<Vec<Vehicle>, ApiError> {
        self.calls.borrow_mut().push("list".into());
        self.check()?;
        Ok(self.vehicles.borrow().clone())
    }

    fn create_vehicle(&self, vehicle: &NewVehicle) -> Result<Created, ApiError> {
        self.calls.borrow_mut().push(format!("create {}", vehicle.license_plate));
        self.check()?;
        let id = self.vehicles.borrow().len() as i64 + 1;
        self.vehicles.borrow_mut().push(
            Vehicle::new(id, VehicleStatus::Active)
                .with_plate(&vehicle.license_plate)
                .with_model(&vehicle.model),
        );
        Ok(Created {
            id: Some(id),
            message: Some("Vehicle created".into()),
        })
    }

    fn set_status(&self, id: i64, status: VehicleStatus) -> Result<Option<Vehicle>, ApiError> {
        self.calls.borrow_mut().push(format!("status {} {}", id, status));
        self.check()?;
        Ok(None)
    }

    fn delete_vehicle(&self, id: i64) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(format!("delete {}", id));
        self.check()
    }

    fn health(&self) -> Result<Value, ApiError> {
        self.check()?;
        Ok(serde_json::json!({"status": "ok"}))
    }
}
