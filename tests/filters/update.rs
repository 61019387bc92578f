use std::collections::BTreeSet;

use sourced_filters::{
    Filter, FilterConfig, FilterService, ModelError, UpdateError, UpdateFilterRequest,
    ValidationError,
};

use crate::support::{item_list, sample_filter, seeded_service, CountingStore, RecordingNotifier};

#[tokio::test]
async fn add_and_remove_writes_with_read_version() {
    let (service, store, notifier) = seeded_service().await;

    let filter = service
        .update(UpdateFilterRequest::new("f1").add(["c"]).remove(["a"]))
        .await
        .unwrap();

    assert_eq!(filter.id(), "f1");
    assert_eq!(filter.description(), Some("d"));
    assert_eq!(item_list(&filter), vec!["b", "c"]);

    assert_eq!(store.expected_versions(), vec![3]);
    assert_eq!(store.stored("f1").await.unwrap().version, 4);

    let changes = notifier.changes();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].filter, filter);
    assert_eq!(changes[0].version, 4);
    assert_eq!(changes[0].added, BTreeSet::from(["c".to_string()]));
    assert_eq!(changes[0].removed, BTreeSet::from(["a".to_string()]));
}

#[tokio::test]
async fn removing_absent_item_never_writes() {
    let (service, store, notifier) = seeded_service().await;

    let err = service
        .update(UpdateFilterRequest::new("f1").remove(["z"]))
        .await
        .unwrap_err();

    match err {
        UpdateError::Validation(ValidationError::ItemNotPresent { item, filter_id }) => {
            assert_eq!(item, "z");
            assert_eq!(filter_id, "f1");
        }
        other => panic!("expected ItemNotPresent, got {:?}", other),
    }
    assert_eq!(store.update_calls(), 0);
    assert_eq!(notifier.calls(), 0);
}

#[tokio::test]
async fn partially_valid_removal_persists_nothing() {
    let (service, store, _notifier) = seeded_service().await;

    let err = service
        .update(UpdateFilterRequest::new("f1").add(["c"]).remove(["a", "zz"]))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);

    let stored = store.stored("f1").await.unwrap();
    assert_eq!(stored.version, 3);
    assert_eq!(stored.data, sample_filter());
}

#[tokio::test]
async fn empty_request_is_a_noop() {
    let (service, store, notifier) = seeded_service().await;

    let filter = service.update(UpdateFilterRequest::new("f1")).await.unwrap();

    assert_eq!(filter, sample_filter());
    assert_eq!(store.update_calls(), 0);
    assert_eq!(notifier.calls(), 0);
    assert_eq!(store.stored("f1").await.unwrap().version, 3);
}

#[tokio::test]
async fn conflict_is_reported_distinctly_and_not_notified() {
    let (service, store, notifier) = seeded_service().await;
    store.fail_next_update(ModelError::ConcurrencyConflict {
        collection: "filters".into(),
        id: "f1".into(),
        expected: 3,
        actual: 4,
    });

    let err = service
        .update(UpdateFilterRequest::new("f1").add(["c"]))
        .await
        .unwrap_err();

    assert!(matches!(err, UpdateError::Conflict { ref filter_id, .. } if filter_id == "f1"));
    assert_eq!(err.status_code(), 409);
    assert_eq!(store.update_calls(), 1);
    assert_eq!(notifier.calls(), 0);
}

#[tokio::test]
async fn storage_failure_is_internal() {
    let (service, store, notifier) = seeded_service().await;
    store.fail_next_update(ModelError::Storage("connection reset".into()));

    let err = service
        .update(UpdateFilterRequest::new("f1").description("x"))
        .await
        .unwrap_err();

    assert!(matches!(err, UpdateError::Internal { .. }));
    assert_eq!(err.to_string(), "Error updating filter with id [f1]");
    assert_eq!(notifier.calls(), 0);
}

#[tokio::test]
async fn adding_existing_and_duplicate_items_is_a_union() {
    let (service, _store, notifier) = seeded_service().await;

    let filter = service
        .update(UpdateFilterRequest::new("f1").add(["b", "c", "c", "a"]))
        .await
        .unwrap();

    assert_eq!(item_list(&filter), vec!["a", "b", "c"]);
    assert_eq!(notifier.calls(), 1);
}

#[tokio::test]
async fn description_only_update_keeps_items() {
    let (service, _store, _notifier) = seeded_service().await;

    let filter = service
        .update(UpdateFilterRequest::new("f1").description("updated"))
        .await
        .unwrap();

    assert_eq!(filter.description(), Some("updated"));
    assert_eq!(item_list(&filter), vec!["a", "b"]);
}

#[tokio::test]
async fn empty_description_clears_text_and_writes() {
    let (service, store, notifier) = seeded_service().await;

    let filter = service
        .update(UpdateFilterRequest::new("f1").description(""))
        .await
        .unwrap();

    assert_eq!(filter.description(), Some(""));
    assert_eq!(item_list(&filter), vec!["a", "b"]);
    assert_eq!(store.update_calls(), 1);
    assert_eq!(notifier.calls(), 1);

    let stored = store.stored("f1").await.unwrap();
    assert_eq!(stored.version, 4);
    assert_eq!(stored.data.description(), Some(""));
}

#[tokio::test]
async fn overlapping_add_and_remove_is_rejected_before_reading() {
    let (service, store, _notifier) = seeded_service().await;

    let err = service
        .update(UpdateFilterRequest::new("f1").add(["q"]).remove(["q"]))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        UpdateError::Validation(ValidationError::OverlappingItems { .. })
    ));
    assert_eq!(store.update_calls(), 0);
}

#[tokio::test]
async fn missing_filter_is_not_found() {
    let (service, store, _notifier) = seeded_service().await;

    let err = service
        .update(UpdateFilterRequest::new("nope").add(["a"]))
        .await
        .unwrap_err();

    assert!(matches!(err, UpdateError::NotFound { .. }));
    assert_eq!(err.to_string(), "No filter with id [nope] exists");
    assert_eq!(store.update_calls(), 0);
}

#[tokio::test]
async fn filter_deleted_before_write_is_not_found() {
    let (service, store, notifier) = seeded_service().await;
    store.fail_next_update(ModelError::NotFound {
        collection: "filters".into(),
        id: "f1".into(),
    });

    let err = service
        .update(UpdateFilterRequest::new("f1").add(["c"]))
        .await
        .unwrap_err();

    assert!(matches!(err, UpdateError::NotFound { .. }));
    assert_eq!(notifier.calls(), 0);
}

#[tokio::test]
async fn item_limit_applies_to_updates() {
    let store = CountingStore::new();
    store.seed(&sample_filter(), 1).await;
    let service = FilterService::new(store.clone(), RecordingNotifier::new()).with_config(
        FilterConfig {
            max_items: 2,
            ..FilterConfig::default()
        },
    );

    let err = service
        .update(UpdateFilterRequest::new("f1").add(["c"]))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        UpdateError::Validation(ValidationError::TooManyItems { count: 3, max: 2, .. })
    ));
    assert_eq!(store.update_calls(), 0);
}

#[tokio::test]
async fn sequential_updates_advance_the_version() {
    let store = CountingStore::new();
    let service = FilterService::new(store.clone(), RecordingNotifier::new());
    service
        .create(Filter::new("seq", None, Vec::<String>::new()).unwrap())
        .await
        .unwrap();

    for item in ["a", "b", "c"] {
        service
            .update(UpdateFilterRequest::new("seq").add([item]))
            .await
            .unwrap();
    }

    assert_eq!(store.expected_versions(), vec![1, 2, 3]);
    let stored = service.get("seq").await.unwrap();
    assert_eq!(stored.version, 4);
    assert_eq!(item_list(&stored.data), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn failed_notification_fails_request_but_keeps_write() {
    let store = CountingStore::new();
    store.seed(&sample_filter(), 3).await;
    let notifier = RecordingNotifier::failing();
    let service = FilterService::new(store.clone(), notifier.clone());

    let err = service
        .update(UpdateFilterRequest::new("f1").add(["c"]))
        .await
        .unwrap_err();

    assert!(matches!(err, UpdateError::Notify(_)));
    assert_eq!(err.status_code(), 500);
    assert_eq!(notifier.calls(), 1);

    let stored = store.stored("f1").await.unwrap();
    assert_eq!(stored.version, 4);
    assert!(stored.data.contains("c"));
}
