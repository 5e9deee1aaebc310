//! Remote unit service client.
//!
//! The unit service is an external collaborator; this module provides the
//! capability interface the controllers depend on and the HTTP
//! implementation of it. Tests inject fakes through [`UnitService`].

pub mod config;
pub mod http;

use async_trait::async_trait;

use crate::error::Result;
use crate::filter::FilterSet;
use crate::types::{Unit, UnitStatus, UnitType};

pub use config::Config;
pub use http::HttpUnitService;

/// Capability interface for the remote unit service.
#[async_trait]
pub trait UnitService: Send + Sync {
    /// Fetch the unit list, optionally filtered by name/type/status.
    async fn list_units(&self, filter: &FilterSet) -> Result<Vec<Unit>>;

    /// Fetch a single unit by id.
    async fn get_unit(&self, id: u64) -> Result<Unit>;

    /// Create a new unit with the given name and type.
    async fn create_unit(&self, name: &str, unit_type: UnitType) -> Result<Unit>;

    /// Request a status transition. Legality of the transition is the
    /// server's responsibility; any status value is forwarded as-is.
    async fn set_status(&self, id: u64, status: UnitStatus) -> Result<Unit>;
}
