use angocontacts_core::NotificationKind;
use angocontacts_store::MemoryStore;

use super::*;
use crate::error::SearchError;

enum FakeProvider {
    Answer(String),
    Down,
}

impl SearchProvider for FakeProvider {
    async fn search(&self, _query: &SearchQuery) -> Result<String, SearchError> {
        match self {
            FakeProvider::Answer(text) => Ok(text.clone()),
            FakeProvider::Down => Err(SearchError::UnexpectedStatus {
                status: 503,
                url: "http://search.test/".to_string(),
            }),
        }
    }
}

fn answer(json: serde_json::Value) -> FakeProvider {
    FakeProvider::Answer(json.to_string())
}

fn empty_store() -> CollectionStore<MemoryStore> {
    CollectionStore::load(MemoryStore::new())
}

#[tokio::test]
async fn new_results_land_in_history_with_success_notification() {
    let provider = answer(serde_json::json!([
        {"name": "Unitel", "emails": ["info@unitel.ao"]},
        {"name": "Movicel", "emails": ["info@movicel.co.ao"]}
    ]));
    let mut store = empty_store();

    let outcome = run_search(&provider, &mut store, &SearchQuery::new("telecom")).await;

    assert_eq!(outcome.results.len(), 2);
    assert_eq!(outcome.added, 2);
    assert_eq!(outcome.removed, 0);
    assert_eq!(store.history().len(), 2);

    let notifications = store.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Success);
    assert_eq!(notifications[0].message, "Found 2 new companies for \"telecom\".");
}

#[tokio::test]
async fn duplicates_in_results_and_history_are_counted_together() {
    let mut store = empty_store();
    let first = answer(serde_json::json!([
        {"name": "Unitel", "emails": ["geral@telecom.ao"]}
    ]));
    run_search(&first, &mut store, &SearchQuery::new("telecom")).await;

    // One duplicate inside the batch, one against the existing history.
    let second = answer(serde_json::json!([
        {"name": "Movicel", "emails": ["geral@telecom.ao", "vendas@movicel.ao", "VENDAS@movicel.ao"]}
    ]));
    let outcome = run_search(&second, &mut store, &SearchQuery::new("telecom")).await;

    assert_eq!(outcome.added, 1);
    assert_eq!(outcome.removed, 2);
    assert_eq!(outcome.results[0].emails, ["geral@telecom.ao", "vendas@movicel.ao"]);
    assert_eq!(store.history()[1].emails, ["vendas@movicel.ao"]);

    let latest = &store.notifications()[0];
    assert_eq!(latest.kind, NotificationKind::Info);
    assert!(latest.message.contains("Removed 2 duplicate contacts"));
}

#[tokio::test]
async fn repeated_search_adds_nothing_and_stays_quiet() {
    let provider = answer(serde_json::json!([{"name": "Unitel"}]));
    let mut store = empty_store();
    run_search(&provider, &mut store, &SearchQuery::new("telecom")).await;

    let outcome = run_search(&provider, &mut store, &SearchQuery::new("telecom")).await;
    assert_eq!(outcome.added, 0);
    assert_eq!(outcome.removed, 0);
    assert_eq!(store.notifications().len(), 1);
}

#[tokio::test]
async fn label_falls_back_to_sector_when_query_is_blank() {
    let provider = answer(serde_json::json!([{"name": "Hospital Josina Machel"}]));
    let mut store = empty_store();
    let mut query = SearchQuery::new("");
    query.sector = Some("Saúde".into());

    run_search(&provider, &mut store, &query).await;
    assert!(store.notifications()[0].message.ends_with("for \"Saúde\"."));
}

#[tokio::test]
async fn failed_search_leaves_store_untouched() {
    let mut store = empty_store();
    let outcome = run_search(&FakeProvider::Down, &mut store, &SearchQuery::new("x")).await;

    assert_eq!(outcome, SearchOutcome::default());
    assert!(store.history().is_empty());
    assert!(store.notifications().is_empty());
    assert_eq!(store.backend().write_count(), 0);
}

#[tokio::test]
async fn unparseable_answer_is_an_empty_outcome() {
    let provider = FakeProvider::Answer("not json at all".to_string());
    let mut store = empty_store();
    let outcome = run_search(&provider, &mut store, &SearchQuery::new("x")).await;

    assert!(outcome.results.is_empty());
    assert_eq!(store.backend().write_count(), 0);
}

#[tokio::test]
async fn names_differing_only_in_case_collapse_to_first() {
    let provider = answer(serde_json::json!([
        {"name": "Foo", "emails": ["x@y.com"]},
        {"name": "foo", "emails": ["x@y.com"]}
    ]));
    let mut store = empty_store();

    let outcome = run_search(&provider, &mut store, &SearchQuery::new("foo")).await;

    assert_eq!(outcome.results.len(), 1);
    assert_eq!(outcome.results[0].name, "Foo");
    assert_eq!(outcome.results[0].emails, ["x@y.com"]);
    assert_eq!(outcome.added, 1);
    assert_eq!(outcome.removed, 0);
    assert_eq!(store.history().len(), 1);

    let notifications = store.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Success);
}
