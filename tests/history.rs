//! Fetching the four categories of a day through a mocked feed

use chrono::NaiveDate;
use serde_json::json;

use today_in_history::history::GLOBAL_FETCH_ERROR;
use today_in_history::mock_behaviour::MockBehaviour;
use today_in_history::mock_feed::MockFeed;
use today_in_history::record::{NO_DESCRIPTION, UNKNOWN_YEAR};
use today_in_history::{Category, FetchState, HistoryClient, RawRecord, Year};

fn march_3() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 3).unwrap()
}

fn numbered(prefix: &str, count: i64) -> Vec<RawRecord> {
    (0..count).map(|i| RawRecord::new(Some(1800 + i), format!("{} {}", prefix, i))).collect()
}

fn populated_feed() -> MockFeed {
    MockFeed::new()
        .with_records(Category::Events, numbered("event", 20))
        .with_records(Category::Births, numbered("birth", 3))
        .with_records(Category::Deaths, numbered("death", 2))
        .with_records(Category::Holidays, vec![
            serde_json::from_value(json!({"text": "", "extract": "Hinamatsuri"})).unwrap(),
            serde_json::from_value(json!({"description": "Ear Day"})).unwrap(),
            serde_json::from_value(json!({"pages": []})).unwrap(),
        ])
}

#[tokio::test]
async fn four_zero_padded_requests() {
    let _ = env_logger::builder().is_test(true).try_init();

    let client = HistoryClient::new(MockFeed::new());
    client.fetch_all(march_3()).await;

    let mut requests = client.source().requests();
    requests.sort();
    assert_eq!(requests, vec!["births/03/03", "deaths/03/03", "events/03/03", "holidays/03/03"]);
}

#[tokio::test]
async fn records_are_normalized_and_truncated() {
    let _ = env_logger::builder().is_test(true).try_init();

    let client = HistoryClient::new(populated_feed());
    let history = match client.fetch_all(march_3()).await {
        FetchState::Ready(history) => history,
        other => panic!("unexpected state {:?}", other),
    };

    assert_eq!(history.events.len(), 15);
    for (i, event) in history.events.iter().enumerate() {
        assert_eq!(event.text(), format!("event {}", i));
        assert_eq!(event.year(), &Year::Known(json!(1800 + i as i64)));
    }
    assert_eq!(history.births.len(), 3);
    assert_eq!(history.deaths.len(), 2);

    let holidays: Vec<&str> = history.holidays.iter().map(|h| h.text()).collect();
    assert_eq!(holidays, vec!["Hinamatsuri", "Ear Day", NO_DESCRIPTION]);
    assert!(history.holidays.iter().all(|h| h.year().to_string() == UNKNOWN_YEAR));
}

#[tokio::test]
async fn a_failing_category_is_left_empty() {
    let _ = env_logger::builder().is_test(true).try_init();

    let feed = populated_feed().with_behaviour(MockBehaviour::fail_category(Category::Holidays, 1));
    let client = HistoryClient::new(feed);

    let history = match client.fetch_all(march_3()).await {
        FetchState::Ready(history) => history,
        other => panic!("a single category failure must not be global: {:?}", other),
    };
    assert!(history.holidays.is_empty());
    assert_eq!(history.events.len(), 15);
    assert_eq!(history.births.len(), 3);
    assert_eq!(history.deaths.len(), 2);
}

#[tokio::test]
async fn every_category_failing_is_still_ready() {
    let _ = env_logger::builder().is_test(true).try_init();

    let client = HistoryClient::new(populated_feed().with_behaviour(MockBehaviour::fail_now(1)));
    match client.fetch_all(march_3()).await {
        FetchState::Ready(history) => assert!(history.is_empty()),
        other => panic!("unexpected state {:?}", other),
    }

    // Failures were used up: the next attempt sees the data again
    let state = client.fetch_all(march_3()).await;
    assert_eq!(state.history().map(|h| h.events.len()), Some(15));
}

#[tokio::test]
async fn a_broken_join_is_a_global_error() {
    let _ = env_logger::builder().is_test(true).try_init();

    let client = HistoryClient::new(populated_feed().with_panic(Category::Deaths));
    assert_eq!(client.fetch_all(march_3()).await, FetchState::Error(GLOBAL_FETCH_ERROR.to_string()));
}

#[tokio::test]
async fn same_date_same_result() {
    let _ = env_logger::builder().is_test(true).try_init();

    let client = HistoryClient::new(populated_feed());
    let first = client.fetch_all(march_3()).await;
    let second = client.fetch_all(march_3()).await;
    assert!(first.history().is_some());
    assert_eq!(first, second);
}

#[tokio::test]
async fn only_month_and_day_matter() {
    let _ = env_logger::builder().is_test(true).try_init();

    let feed = MockFeed::new()
        .with_day_records(march_3(), Category::Events, numbered("march", 1));
    let client = HistoryClient::new(feed);

    let other_year = NaiveDate::from_ymd_opt(1999, 3, 3).unwrap();
    let state = client.fetch_all(other_year).await;
    assert_eq!(state.history().map(|h| h.events[0].text().to_string()), Some("march 0".to_string()));
}
