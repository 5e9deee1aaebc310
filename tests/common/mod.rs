//! Shared test fixtures: a recording fake unit service and helpers.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Semaphore;

use unitdash::error::{DashboardError, Result};
use unitdash::filter::FilterSet;
use unitdash::remote::UnitService;
use unitdash::types::{Unit, UnitStatus, UnitType};

pub fn mock_unit(id: u64, name: &str, unit_type: UnitType, status: UnitStatus) -> Unit {
    Unit {
        id,
        name: name.to_string(),
        unit_type,
        status,
        last_updated: "2025-01-01T00:00:00Z".to_string(),
    }
}

/// Whether a unit matches a filter set, mirroring the server's filtering.
pub fn matches(filter: &FilterSet, unit: &Unit) -> bool {
    if let Some(name) = &filter.name
        && !unit.name.to_lowercase().contains(&name.to_lowercase())
    {
        return false;
    }
    if let Some(unit_type) = filter.unit_type
        && unit.unit_type != unit_type
    {
        return false;
    }
    if let Some(status) = filter.status
        && unit.status != status
    {
        return false;
    }
    true
}

/// In-memory unit service that records calls and can be made to fail or to
/// hold responses until released (for in-flight behavior tests).
pub struct FakeUnitService {
    pub units: Mutex<Vec<Unit>>,
    pub list_calls: Mutex<Vec<FilterSet>>,
    pub status_calls: Mutex<Vec<(u64, UnitStatus)>>,
    pub list_error: Mutex<Option<String>>,
    pub status_error: Mutex<Option<String>>,
    next_id: AtomicU64,
    hold: AtomicBool,
    gate: Semaphore,
}

impl FakeUnitService {
    pub fn new(units: Vec<Unit>) -> Arc<Self> {
        let next_id = units.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        Arc::new(Self {
            units: Mutex::new(units),
            list_calls: Mutex::new(Vec::new()),
            status_calls: Mutex::new(Vec::new()),
            list_error: Mutex::new(None),
            status_error: Mutex::new(None),
            next_id: AtomicU64::new(next_id),
            hold: AtomicBool::new(false),
            gate: Semaphore::new(0),
        })
    }

    pub fn list_call_count(&self) -> usize {
        self.list_calls.lock().len()
    }

    pub fn set_list_error(&self, message: &str) {
        *self.list_error.lock() = Some(message.to_string());
    }

    pub fn clear_list_error(&self) {
        *self.list_error.lock() = None;
    }

    pub fn set_status_error(&self, message: &str) {
        *self.status_error.lock() = Some(message.to_string());
    }

    /// Make list responses block until `release_one` is called.
    pub fn hold_responses(&self) {
        self.hold.store(true, Ordering::SeqCst);
    }

    pub fn release_one(&self) {
        self.gate.add_permits(1);
    }

    async fn wait_if_held(&self) {
        if self.hold.load(Ordering::SeqCst) {
            let permit = self.gate.acquire().await.expect("gate closed");
            permit.forget();
        }
    }
}

#[async_trait]
impl UnitService for FakeUnitService {
    async fn list_units(&self, filter: &FilterSet) -> Result<Vec<Unit>> {
        self.list_calls.lock().push(filter.clone());
        self.wait_if_held().await;

        if let Some(message) = self.list_error.lock().clone() {
            return Err(DashboardError::Api(message));
        }
        Ok(self
            .units
            .lock()
            .iter()
            .filter(|unit| matches(filter, unit))
            .cloned()
            .collect())
    }

    async fn get_unit(&self, id: u64) -> Result<Unit> {
        self.units
            .lock()
            .iter()
            .find(|unit| unit.id == id)
            .cloned()
            .ok_or(DashboardError::UnitNotFound(id))
    }

    async fn create_unit(&self, name: &str, unit_type: UnitType) -> Result<Unit> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let unit = mock_unit(id, name, unit_type, UnitStatus::Available);
        self.units.lock().push(unit.clone());
        Ok(unit)
    }

    async fn set_status(&self, id: u64, status: UnitStatus) -> Result<Unit> {
        self.status_calls.lock().push((id, status));
        if let Some(message) = self.status_error.lock().clone() {
            return Err(DashboardError::Api(message));
        }

        let mut units = self.units.lock();
        let unit = units
            .iter_mut()
            .find(|unit| unit.id == id)
            .ok_or(DashboardError::UnitNotFound(id))?;
        unit.status = status;
        Ok(unit.clone())
    }
}
