//! Unit collection cache keyed by filter set.
//!
//! The cache sits between the dashboard controllers and the unit service:
//! it serves repeated requests for the same [`FilterSet`] from memory while
//! fresh, collapses concurrent identical requests onto one in-flight
//! network call, and is invalidated wholesale whenever a mutation could
//! have moved a unit into or out of any filtered view.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use parking_lot::Mutex;

use crate::clock::Clock;
use crate::error::{DashboardError, Result};
use crate::filter::FilterSet;
use crate::remote::UnitService;
use crate::types::Unit;

/// How long a fetched list is served without a network call.
pub const FRESH_TTL: Duration = Duration::from_secs(30);

/// Cloneable failure carried through shared in-flight futures. Converted
/// back to a `DashboardError` at the cache boundary.
#[derive(Debug, Clone)]
struct FetchFailure {
    message: String,
}

type SharedFetch = Shared<BoxFuture<'static, std::result::Result<Vec<Unit>, FetchFailure>>>;

#[derive(Clone)]
struct FreshEntry {
    units: Vec<Unit>,
    fetched_at: Instant,
}

/// An outstanding network request, stamped with the generation it started
/// in. Fetches issued after a later invalidation must not join it.
struct InFlightFetch {
    generation: u64,
    future: SharedFetch,
}

#[derive(Default)]
struct CacheSlot {
    fresh: Option<FreshEntry>,
    in_flight: Option<InFlightFetch>,
}

impl CacheSlot {
    fn is_fresh_at(&self, now: Instant) -> bool {
        self.fresh
            .as_ref()
            .is_some_and(|fresh| now.duration_since(fresh.fetched_at) < FRESH_TTL)
    }
}

struct CacheInner {
    service: Arc<dyn UnitService>,
    clock: Arc<dyn Clock>,
    slots: Mutex<HashMap<FilterSet, CacheSlot>>,
    /// Bumped on every invalidation. In-flight fetches that started before
    /// the bump still deliver to their awaiters but are not stored as
    /// fresh, and later fetches never join them.
    generation: AtomicU64,
}

#[derive(Clone)]
pub struct UnitCache {
    inner: Arc<CacheInner>,
}

impl UnitCache {
    pub fn new(service: Arc<dyn UnitService>, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                service,
                clock,
                slots: Mutex::new(HashMap::new()),
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Fetch the unit list for a filter set.
    ///
    /// Serves from the cache within the freshness window; otherwise attaches
    /// to an in-flight request of the current generation if one exists, or
    /// issues a new network call. Errors are not cached and not retried.
    pub async fn fetch(&self, filter: &FilterSet) -> Result<Vec<Unit>> {
        let shared = {
            let mut slots = self.inner.slots.lock();
            let now = self.inner.clock.now();

            if let Some(slot) = slots.get(filter)
                && let Some(fresh) = &slot.fresh
                && now.duration_since(fresh.fetched_at) < FRESH_TTL
            {
                tracing::debug!("cache hit ({filter})");
                return Ok(fresh.units.clone());
            }

            // Miss: sweep slots holding neither a live request nor a fresh
            // entry so distinct one-off filters do not accumulate.
            slots.retain(|_, slot| slot.in_flight.is_some() || slot.is_fresh_at(now));

            let generation = self.inner.generation.load(Ordering::SeqCst);
            let slot = slots.entry(filter.clone()).or_default();
            match &slot.in_flight {
                Some(in_flight) if in_flight.generation == generation => {
                    tracing::debug!("joining in-flight fetch ({filter})");
                    in_flight.future.clone()
                }
                // No outstanding request, or only one from before the last
                // invalidation. A fetch issued after a mutation must hit
                // the network; the older request keeps running for its own
                // awaiters.
                _ => {
                    let future = self.start_fetch(filter.clone(), generation);
                    slot.in_flight = Some(InFlightFetch {
                        generation,
                        future: future.clone(),
                    });
                    future
                }
            }
        };

        shared
            .await
            .map_err(|failure| DashboardError::Api(failure.message))
    }

    /// Drop every fresh entry and detach outstanding requests, forcing the
    /// next fetch for any filter set to go to the network. Slots with no
    /// outstanding request are removed entirely.
    pub fn invalidate_all(&self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        let mut slots = self.inner.slots.lock();
        slots.retain(|_, slot| {
            slot.fresh = None;
            slot.in_flight.is_some()
        });
        tracing::debug!("unit cache invalidated");
    }

    fn start_fetch(&self, filter: FilterSet, generation: u64) -> SharedFetch {
        let inner = Arc::clone(&self.inner);

        let future: BoxFuture<'static, std::result::Result<Vec<Unit>, FetchFailure>> =
            Box::pin(async move {
                let outcome = inner.service.list_units(&filter).await;

                let mut slots = inner.slots.lock();
                if let Some(slot) = slots.get_mut(&filter) {
                    // A newer request may have replaced this one after an
                    // invalidation; only detach if the slot still holds us.
                    if slot
                        .in_flight
                        .as_ref()
                        .is_some_and(|in_flight| in_flight.generation == generation)
                    {
                        slot.in_flight = None;
                    }

                    // A mutation may have landed while this request was in
                    // flight; deliver the result but do not cache it.
                    if let Ok(units) = &outcome
                        && inner.generation.load(Ordering::SeqCst) == generation
                    {
                        slot.fresh = Some(FreshEntry {
                            units: units.clone(),
                            fetched_at: inner.clock.now(),
                        });
                    }

                    if slot.fresh.is_none() && slot.in_flight.is_none() {
                        slots.remove(&filter);
                    }
                }
                drop(slots);

                outcome.map_err(|err| FetchFailure {
                    message: err.display_message(),
                })
            });

        future.shared()
    }
}
