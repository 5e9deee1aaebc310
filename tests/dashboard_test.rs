mod common;

use std::sync::Arc;
use std::time::Duration;

use unitdash::clock::{Clock, ManualClock};
use unitdash::dashboard::{Dashboard, DashboardAction, DetailState, SEARCH_DEBOUNCE, ToastKind};
use unitdash::filter::FilterSet;
use unitdash::types::{UnitStatus, UnitType};

use common::{FakeUnitService, mock_unit};

fn setup() -> (Dashboard, Arc<FakeUnitService>, Arc<ManualClock>) {
    let service = FakeUnitService::new(vec![
        mock_unit(1, "Room 1", UnitType::Room, UnitStatus::Available),
        mock_unit(2, "Room 2", UnitType::Room, UnitStatus::Occupied),
        mock_unit(3, "Capsule A", UnitType::Capsule, UnitStatus::Available),
    ]);
    let clock = Arc::new(ManualClock::new());
    let dashboard = Dashboard::new(
        service.clone() as Arc<dyn unitdash::remote::UnitService>,
        clock.clone() as Arc<dyn Clock>,
    );
    (dashboard, service, clock)
}

#[tokio::test]
async fn rapid_typing_commits_only_the_final_query() {
    let (mut dashboard, service, clock) = setup();

    dashboard
        .dispatch(DashboardAction::SearchInput("Room".to_string()))
        .await;
    clock.advance(Duration::from_millis(100));
    dashboard
        .dispatch(DashboardAction::SearchInput("Room 1".to_string()))
        .await;

    // The second keystroke re-armed the timer; nothing fires yet.
    dashboard.tick().await;
    assert_eq!(service.list_call_count(), 0);

    clock.advance(SEARCH_DEBOUNCE);
    dashboard.tick().await;

    let calls = service.list_calls.lock().clone();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0],
        FilterSet {
            name: Some("Room 1".to_string()),
            ..FilterSet::default()
        }
    );
    assert_eq!(dashboard.state().units.len(), 1);
    assert_eq!(dashboard.state().units[0].name, "Room 1");
}

#[tokio::test]
async fn status_filter_change_refetches_with_only_that_parameter() {
    let (mut dashboard, service, _clock) = setup();

    dashboard.dispatch(DashboardAction::Refresh).await;
    assert_eq!(dashboard.state().units.len(), 3);

    dashboard
        .dispatch(DashboardAction::SelectStatus(Some(UnitStatus::Occupied)))
        .await;

    let calls = service.list_calls.lock().clone();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[1],
        FilterSet {
            status: Some(UnitStatus::Occupied),
            ..FilterSet::default()
        }
    );
    assert_eq!(dashboard.state().units.len(), 1);
    assert_eq!(dashboard.state().units[0].id, 2);
}

#[tokio::test]
async fn reselecting_the_same_filter_does_not_refetch() {
    let (mut dashboard, service, _clock) = setup();

    dashboard
        .dispatch(DashboardAction::SelectType(Some(UnitType::Room)))
        .await;
    dashboard
        .dispatch(DashboardAction::SelectType(Some(UnitType::Room)))
        .await;

    assert_eq!(service.list_call_count(), 1);
}

#[tokio::test]
async fn refresh_within_ttl_is_served_from_cache() {
    let (mut dashboard, service, _clock) = setup();

    dashboard.dispatch(DashboardAction::Refresh).await;
    dashboard.dispatch(DashboardAction::Refresh).await;

    assert_eq!(service.list_call_count(), 1);
    assert_eq!(dashboard.state().units.len(), 3);
}

#[tokio::test]
async fn failed_status_change_leaves_the_list_untouched_and_toasts() {
    let (mut dashboard, service, _clock) = setup();

    dashboard.dispatch(DashboardAction::Refresh).await;
    service.set_status_error("invalid transition");

    dashboard
        .dispatch(DashboardAction::RequestStatusChange {
            id: 1,
            status: UnitStatus::CleaningInProgress,
        })
        .await;

    let unit = dashboard
        .state()
        .units
        .iter()
        .find(|u| u.id == 1)
        .cloned()
        .unwrap();
    assert_eq!(unit.status, UnitStatus::Available);

    let toast = dashboard.state().toast.clone().unwrap();
    assert_eq!(toast.kind, ToastKind::Warning);
    assert!(toast.message.contains("invalid transition"));
}

#[tokio::test]
async fn successful_status_change_updates_row_and_invalidates_cache() {
    let (mut dashboard, service, clock) = setup();

    dashboard.dispatch(DashboardAction::Refresh).await;
    dashboard
        .dispatch(DashboardAction::RequestStatusChange {
            id: 1,
            status: UnitStatus::Occupied,
        })
        .await;

    let unit = dashboard
        .state()
        .units
        .iter()
        .find(|u| u.id == 1)
        .cloned()
        .unwrap();
    assert_eq!(unit.status, UnitStatus::Occupied);
    assert_eq!(unit.last_updated, clock.timestamp().to_string());
    assert_eq!(service.status_calls.lock().clone(), vec![(
        1,
        UnitStatus::Occupied
    )]);

    // The mutation invalidated the cache, so a refresh hits the network.
    dashboard.dispatch(DashboardAction::Refresh).await;
    assert_eq!(service.list_call_count(), 2);
}

#[tokio::test]
async fn blank_create_is_rejected_before_any_network_call() {
    let (mut dashboard, service, _clock) = setup();

    dashboard
        .dispatch(DashboardAction::SubmitCreate {
            name: "   ".to_string(),
            unit_type: UnitType::Capsule,
        })
        .await;

    assert_eq!(dashboard.state().create_error.as_deref(), Some("Name is required"));
    assert!(!dashboard.state().creating);
    assert_eq!(service.units.lock().len(), 3);
    assert_eq!(service.list_call_count(), 0);
}

#[tokio::test]
async fn successful_create_reloads_the_list_and_toasts() {
    let (mut dashboard, service, _clock) = setup();

    dashboard.dispatch(DashboardAction::Refresh).await;
    dashboard
        .dispatch(DashboardAction::SubmitCreate {
            name: "Tent 9".to_string(),
            unit_type: UnitType::Tent,
        })
        .await;

    // One initial fetch, one reload after the invalidating mutation.
    assert_eq!(service.list_call_count(), 2);
    assert_eq!(dashboard.state().units.len(), 4);

    let toast = dashboard.state().toast.clone().unwrap();
    assert_eq!(toast.kind, ToastKind::Info);
    assert!(toast.message.contains("Tent 9"));
    assert!(dashboard.state().create_error.is_none());
}

#[tokio::test]
async fn opening_a_unit_loads_its_details() {
    let (mut dashboard, _service, _clock) = setup();

    dashboard.dispatch(DashboardAction::OpenUnit(2)).await;
    match &dashboard.state().detail {
        DetailState::Loaded { unit } => assert_eq!(unit.name, "Room 2"),
        other => panic!("expected loaded detail, got {other:?}"),
    }
}

#[tokio::test]
async fn opening_a_missing_unit_reports_the_failure() {
    let (mut dashboard, _service, _clock) = setup();

    dashboard.dispatch(DashboardAction::OpenUnit(99)).await;
    match &dashboard.state().detail {
        DetailState::Failed { id, message } => {
            assert_eq!(*id, 99);
            assert!(message.contains("99"));
        }
        other => panic!("expected failed detail, got {other:?}"),
    }
}
