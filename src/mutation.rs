//! Status mutation controller.
//!
//! Mutations are confirmation-first: nothing is applied locally until the
//! server acknowledges the change. On success the unit cache is invalidated
//! wholesale, since a status change can move a unit into or out of any
//! status-filtered view. Concurrent changes to the same unit race at the
//! network layer; the last request to complete determines the final status
//! (known limitation, not engineered around).

use std::sync::Arc;

use crate::cache::UnitCache;
use crate::clock::Clock;
use crate::error::{DashboardError, Result};
use crate::remote::UnitService;
use crate::types::{Unit, UnitStatus, UnitType};

pub struct StatusMutator {
    service: Arc<dyn UnitService>,
    cache: UnitCache,
    clock: Arc<dyn Clock>,
}

impl StatusMutator {
    pub fn new(service: Arc<dyn UnitService>, cache: UnitCache, clock: Arc<dyn Clock>) -> Self {
        Self {
            service,
            cache,
            clock,
        }
    }

    /// Request a status transition for a unit.
    ///
    /// Any value of the closed status enumeration is forwarded; transition
    /// legality is the server's concern. On failure the caller's displayed
    /// state is untouched and the error carries the server's message.
    pub async fn change_status(&self, id: u64, status: UnitStatus) -> Result<Unit> {
        tracing::debug!("requesting status change: unit {id} -> {status}");
        let mut unit = match self.service.set_status(id, status).await {
            Ok(unit) => unit,
            Err(err) => {
                tracing::warn!("status change for unit {id} failed: {err}");
                return Err(err);
            }
        };

        self.cache.invalidate_all();
        unit.last_updated = self.clock.timestamp().to_string();
        Ok(unit)
    }

    /// Create a new unit. Blank names are rejected client-side before any
    /// network call.
    pub async fn create_unit(&self, name: &str, unit_type: UnitType) -> Result<Unit> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DashboardError::Validation(
                "unit name is required".to_string(),
            ));
        }

        tracing::debug!("creating unit '{name}' ({unit_type})");
        let unit = self.service.create_unit(name, unit_type).await?;
        self.cache.invalidate_all();
        Ok(unit)
    }
}
