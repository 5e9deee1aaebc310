//! Dashboard model types for testable state management.
//!
//! This module separates state ([`DashboardState`]) from rendering:
//! a reducer applies [`DashboardAction`]s and returns the [`Effect`]s the
//! runtime must perform, and [`compute_view_model`] derives the view-state
//! the presentation layer consumes. All timing flows through the `now`
//! argument, so debounce and supersession behavior are fully deterministic
//! under test.

use std::time::{Duration, Instant};

use crate::filter::FilterSet;
use crate::types::{Unit, UnitStatus, UnitType};
use crate::utils::capitalize;

use super::overlay::{OverlayId, OverlayRegistry};

/// Quiescence window for free-text search before a commit fires.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Warning,
}

/// Transient notification surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn info(message: impl Into<String>) -> Self {
        Toast {
            kind: ToastKind::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Toast {
            kind: ToastKind::Warning,
            message: message.into(),
        }
    }
}

/// State of the unit details drawer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DetailState {
    #[default]
    Closed,
    Loading {
        id: u64,
    },
    Loaded {
        unit: Unit,
    },
    /// Detail fetch failed; the error renders inline within the drawer only.
    Failed {
        id: u64,
        message: String,
    },
}

/// Raw state that changes during user interaction.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// Search text as typed, echoed immediately in the input box.
    pub raw_search: String,
    /// Search text last committed after the debounce window elapsed.
    pub committed_search: String,
    pub selected_type: Option<UnitType>,
    pub selected_status: Option<UnitStatus>,
    /// Deadline at which the pending search commit fires. Re-armed on every
    /// keystroke; earlier pending commits never fire.
    pub pending_commit: Option<Instant>,

    /// Units currently displayed.
    pub units: Vec<Unit>,
    pub is_loading: bool,
    /// List fetch error, rendered inline in place of the list.
    pub list_error: Option<String>,
    /// Sequence number of the newest issued fetch. A completed fetch is
    /// applied only if its sequence matches (last-committed-wins).
    pub fetch_seq: u64,

    pub detail: DetailState,
    pub toast: Option<Toast>,
    pub overlays: OverlayRegistry,

    /// Validation or server error shown inside the create dialog.
    pub create_error: Option<String>,
    pub creating: bool,
}

impl DashboardState {
    /// The committed filter set, built from committed search text and the
    /// immediate type/status selections.
    pub fn committed_filter(&self) -> FilterSet {
        FilterSet::from_raw(
            &self.committed_search,
            self.selected_type,
            self.selected_status,
        )
    }

    /// Deadline the runtime should wake at to fire a pending commit.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending_commit
    }
}

/// All possible actions on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardAction {
    /// A keystroke in the search field.
    SearchInput(String),
    /// A type selection from the filter dropdown (None clears the filter).
    SelectType(Option<UnitType>),
    /// A status selection from the filter dropdown (None clears the filter).
    SelectStatus(Option<UnitStatus>),
    /// The debounce deadline may have elapsed; commit if quiescent.
    CommitElapsed,
    /// Explicit reload of the current view.
    Refresh,
    /// A list fetch finished.
    FetchCompleted {
        seq: u64,
        result: Result<Vec<Unit>, String>,
    },

    /// Open the details drawer for a unit.
    OpenUnit(u64),
    CloseDetail,
    /// A detail fetch finished.
    DetailLoaded {
        id: u64,
        result: Result<Unit, String>,
    },

    /// The user picked a new status from a unit's status menu.
    RequestStatusChange { id: u64, status: UnitStatus },
    /// A status mutation finished.
    StatusChangeCompleted {
        id: u64,
        result: Result<Unit, String>,
    },

    /// The create dialog was submitted.
    SubmitCreate { name: String, unit_type: UnitType },
    /// A create request finished.
    CreateCompleted { result: Result<Unit, String> },

    OpenOverlay(OverlayId),
    ToggleOverlay(OverlayId),
    /// Click outside any overlay, or escape: dismiss whatever is active.
    OutsideClick,
    DismissToast,
}

/// Work the runtime must perform in response to an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch { seq: u64, filter: FilterSet },
    LoadUnit { id: u64 },
    ChangeStatus { id: u64, status: UnitStatus },
    CreateUnit { name: String, unit_type: UnitType },
}

/// Apply an action to the state, returning the effects to run.
pub fn apply(state: &mut DashboardState, action: DashboardAction, now: Instant) -> Vec<Effect> {
    match action {
        DashboardAction::SearchInput(text) => {
            state.raw_search = text;
            state.pending_commit = Some(now + SEARCH_DEBOUNCE);
            vec![]
        }

        DashboardAction::CommitElapsed => {
            let Some(deadline) = state.pending_commit else {
                return vec![];
            };
            if now < deadline {
                return vec![];
            }
            state.pending_commit = None;
            let before = state.committed_filter();
            state.committed_search = state.raw_search.clone();
            refetch_if_changed(state, before)
        }

        DashboardAction::SelectType(unit_type) => {
            state.overlays.close(OverlayId::TypeFilter);
            let before = state.committed_filter();
            state.selected_type = unit_type;
            refetch_if_changed(state, before)
        }

        DashboardAction::SelectStatus(status) => {
            state.overlays.close(OverlayId::StatusFilter);
            let before = state.committed_filter();
            state.selected_status = status;
            refetch_if_changed(state, before)
        }

        DashboardAction::Refresh => issue_fetch(state),

        DashboardAction::FetchCompleted { seq, result } => {
            if seq != state.fetch_seq {
                // Superseded by a newer committed filter; never regress the
                // displayed list to a stale filter's results.
                tracing::debug!("discarding stale fetch result (seq {seq})");
                return vec![];
            }
            state.is_loading = false;
            match result {
                Ok(units) => {
                    state.units = units;
                    state.list_error = None;
                }
                Err(message) => {
                    state.list_error = Some(message);
                }
            }
            vec![]
        }

        DashboardAction::OpenUnit(id) => {
            state.overlays.open(OverlayId::DetailDrawer);
            state.detail = DetailState::Loading { id };
            vec![Effect::LoadUnit { id }]
        }

        DashboardAction::CloseDetail => {
            state.overlays.close(OverlayId::DetailDrawer);
            state.detail = DetailState::Closed;
            vec![]
        }

        DashboardAction::DetailLoaded { id, result } => {
            // Ignore if the drawer was closed or moved to another unit.
            let loading_id = match &state.detail {
                DetailState::Loading { id } => Some(*id),
                _ => None,
            };
            if loading_id != Some(id) {
                return vec![];
            }
            state.detail = match result {
                Ok(unit) => DetailState::Loaded { unit },
                Err(message) => DetailState::Failed { id, message },
            };
            vec![]
        }

        DashboardAction::RequestStatusChange { id, status } => {
            state.overlays.close(OverlayId::StatusMenu(id));
            vec![Effect::ChangeStatus { id, status }]
        }

        DashboardAction::StatusChangeCompleted { id, result } => {
            match result {
                Ok(unit) => {
                    if let Some(existing) = state.units.iter_mut().find(|u| u.id == id) {
                        *existing = unit.clone();
                    }
                    if let DetailState::Loaded { unit: shown } = &mut state.detail
                        && shown.id == id
                    {
                        *shown = unit;
                    }
                }
                Err(message) => {
                    // Confirmation-first: the displayed status was never
                    // changed, so there is nothing to roll back.
                    state.toast = Some(Toast::warning(message));
                }
            }
            vec![]
        }

        DashboardAction::SubmitCreate { name, unit_type } => {
            let name = name.trim().to_string();
            if name.is_empty() {
                state.create_error = Some("Name is required".to_string());
                return vec![];
            }
            state.create_error = None;
            state.creating = true;
            vec![Effect::CreateUnit { name, unit_type }]
        }

        DashboardAction::CreateCompleted { result } => {
            state.creating = false;
            match result {
                Ok(unit) => {
                    state.overlays.close(OverlayId::CreateDialog);
                    state.toast = Some(Toast::info(format!("Created unit '{}'", unit.name)));
                    // The cache was invalidated by the mutation; reload the
                    // current view so the new unit appears.
                    issue_fetch(state)
                }
                Err(message) => {
                    state.create_error = Some(message);
                    vec![]
                }
            }
        }

        DashboardAction::OpenOverlay(id) => {
            state.overlays.open(id);
            vec![]
        }

        DashboardAction::ToggleOverlay(id) => {
            state.overlays.toggle(id);
            vec![]
        }

        DashboardAction::OutsideClick => {
            if state.overlays.dismiss_active() == Some(OverlayId::DetailDrawer) {
                state.detail = DetailState::Closed;
            }
            vec![]
        }

        DashboardAction::DismissToast => {
            state.toast = None;
            vec![]
        }
    }
}

fn refetch_if_changed(state: &mut DashboardState, before: FilterSet) -> Vec<Effect> {
    if state.committed_filter() == before {
        return vec![];
    }
    issue_fetch(state)
}

fn issue_fetch(state: &mut DashboardState) -> Vec<Effect> {
    state.fetch_seq += 1;
    state.is_loading = true;
    vec![Effect::Fetch {
        seq: state.fetch_seq,
        filter: state.committed_filter(),
    }]
}

/// View model for the unit list: exactly the `{ units, isLoading, error }`
/// contract the presentation layer consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListViewModel {
    pub units: Vec<Unit>,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiltersViewModel {
    /// Raw search text, echoed immediately regardless of debounce state.
    pub search_text: String,
    pub type_label: String,
    pub status_label: String,
    pub type_open: bool,
    pub status_open: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateViewModel {
    pub open: bool,
    pub submitting: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardViewModel {
    pub list: ListViewModel,
    pub filters: FiltersViewModel,
    pub detail: DetailState,
    pub create: CreateViewModel,
    pub toast: Option<Toast>,
}

/// Compute the full view model for rendering.
pub fn compute_view_model(state: &DashboardState) -> DashboardViewModel {
    DashboardViewModel {
        list: ListViewModel {
            units: state.units.clone(),
            is_loading: state.is_loading,
            error: state.list_error.clone(),
        },
        filters: FiltersViewModel {
            search_text: state.raw_search.clone(),
            type_label: state
                .selected_type
                .map(|t| capitalize(&t.to_string()))
                .unwrap_or_else(|| "Type".to_string()),
            status_label: state
                .selected_status
                .map(|s| s.to_string())
                .unwrap_or_else(|| "Status".to_string()),
            type_open: state.overlays.is_open(OverlayId::TypeFilter),
            status_open: state.overlays.is_open(OverlayId::StatusFilter),
        },
        detail: state.detail.clone(),
        create: CreateViewModel {
            open: state.overlays.is_open(OverlayId::CreateDialog),
            submitting: state.creating,
            error: state.create_error.clone(),
        },
        toast: state.toast.clone(),
    }
}
