pub mod cache;
pub mod clock;
pub mod commands;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod mutation;
pub mod remote;
pub mod types;
pub mod utils;

pub use cache::{FRESH_TTL, UnitCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use dashboard::{
    Dashboard, DashboardAction, DashboardState, DashboardViewModel, Effect, OverlayId,
    OverlayRegistry, SEARCH_DEBOUNCE,
};
pub use error::{DashboardError, Result};
pub use filter::FilterSet;
pub use mutation::StatusMutator;
pub use remote::{Config, HttpUnitService, UnitService};
pub use types::{Unit, UnitStatus, UnitType, VALID_STATUSES, VALID_TYPES};
