//! Dashboard runtime: wires the reducer model to the cache, the mutation
//! controller, and the clock, and executes effects to completion.

pub mod model;
pub mod overlay;

pub use model::{
    DashboardAction, DashboardState, DashboardViewModel, DetailState, Effect, SEARCH_DEBOUNCE,
    Toast, ToastKind, apply, compute_view_model,
};
pub use overlay::{OverlayId, OverlayRegistry};

use std::sync::Arc;
use std::time::Instant;

use crate::cache::UnitCache;
use crate::clock::Clock;
use crate::mutation::StatusMutator;
use crate::remote::UnitService;

pub struct Dashboard {
    state: DashboardState,
    service: Arc<dyn UnitService>,
    cache: UnitCache,
    mutator: StatusMutator,
    clock: Arc<dyn Clock>,
}

impl Dashboard {
    pub fn new(service: Arc<dyn UnitService>, clock: Arc<dyn Clock>) -> Self {
        let cache = UnitCache::new(Arc::clone(&service), Arc::clone(&clock));
        let mutator = StatusMutator::new(Arc::clone(&service), cache.clone(), Arc::clone(&clock));
        Self {
            state: DashboardState::default(),
            service,
            cache,
            mutator,
            clock,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn cache(&self) -> &UnitCache {
        &self.cache
    }

    pub fn view_model(&self) -> DashboardViewModel {
        compute_view_model(&self.state)
    }

    /// Deadline the caller should sleep until before the next `tick`.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.state.next_deadline()
    }

    /// Apply an action and run every effect it produces to completion,
    /// feeding completion actions back into the reducer.
    pub async fn dispatch(&mut self, action: DashboardAction) {
        let mut queue = vec![action];
        while let Some(action) = queue.pop() {
            let effects = apply(&mut self.state, action, self.clock.now());
            for effect in effects {
                queue.push(self.run_effect(effect).await);
            }
        }
    }

    /// Fire a pending debounce commit if its deadline has elapsed.
    pub async fn tick(&mut self) {
        self.dispatch(DashboardAction::CommitElapsed).await;
    }

    async fn run_effect(&mut self, effect: Effect) -> DashboardAction {
        match effect {
            Effect::Fetch { seq, filter } => {
                let result = self
                    .cache
                    .fetch(&filter)
                    .await
                    .map_err(|err| err.display_message());
                DashboardAction::FetchCompleted { seq, result }
            }
            Effect::LoadUnit { id } => {
                let result = self
                    .service
                    .get_unit(id)
                    .await
                    .map_err(|err| err.display_message());
                DashboardAction::DetailLoaded { id, result }
            }
            Effect::ChangeStatus { id, status } => {
                let result = self
                    .mutator
                    .change_status(id, status)
                    .await
                    .map_err(|err| err.display_message());
                DashboardAction::StatusChangeCompleted { id, result }
            }
            Effect::CreateUnit { name, unit_type } => {
                let result = self
                    .mutator
                    .create_unit(&name, unit_type)
                    .await
                    .map_err(|err| err.display_message());
                DashboardAction::CreateCompleted { result }
            }
        }
    }
}
