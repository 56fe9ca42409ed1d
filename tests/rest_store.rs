#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use httpmock::prelude::*;
    use serde_json::json;
    use timecard::api::rest::RestStore;
    use timecard::api::RestConfig;
    use timecard::libs::clock::ReferenceClock;
    use timecard::libs::error::{StoreError, TrackerError};
    use timecard::libs::rest_span::RestSpan;
    use timecard::libs::session::{NewSession, SessionPatch};
    use timecard::libs::store::SessionStore;
    use timecard::libs::tracker::{ClockOut, NoBreak, Tracker};

    const TABLE_PATH: &str = "/rest/v1/work_sessions";
    const API_KEY: &str = "test-api-key";

    fn store(server: &MockServer) -> RestStore {
        let config = RestConfig {
            api_url: server.base_url(),
            table: "work_sessions".to_string(),
        };
        RestStore::new(&config, API_KEY)
    }

    #[tokio::test]
    async fn test_insert_posts_row_and_returns_id() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(TABLE_PATH)
                    .header("apikey", API_KEY)
                    .header("authorization", format!("Bearer {}", API_KEY))
                    .header("prefer", "return=representation")
                    .json_body(json!([{
                        "user_id": "cat001",
                        "start": "2025-06-01T00:00:00Z",
                        "break_minutes": 0
                    }]));
                then.status(201).json_body(json!([{
                    "id": 7,
                    "user_id": "cat001",
                    "start": "2025-06-01T00:00:00+00:00",
                    "end": null,
                    "break_minutes": 0,
                    "paid": false
                }]));
            })
            .await;

        let start = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let id = store(&server).insert(&NewSession::open("cat001", start)).await.unwrap();

        mock.assert_async().await;
        assert_eq!(id, 7);
    }

    #[tokio::test]
    async fn test_insert_without_representation_is_missing_id() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(TABLE_PATH);
                then.status(201).json_body(json!([]));
            })
            .await;

        let start = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let result = store(&server).insert(&NewSession::open("cat001", start)).await;

        assert!(matches!(result, Err(StoreError::MissingId)));
    }

    #[tokio::test]
    async fn test_range_query_sends_postgrest_filters() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(TABLE_PATH)
                    .query_param("user_id", "eq.cat001")
                    .query_param("start", "gte.2025-05-31T15:00:00.000000Z")
                    .query_param("order", "start.asc");
                then.status(200).json_body(json!([{
                    "id": 1,
                    "user_id": "cat001",
                    "start": "2025-06-01T00:00:00+00:00",
                    "end": "2025-06-01T09:00:00+00:00",
                    "break_minutes": 60,
                    "paid": false
                }]));
            })
            .await;

        let clock = ReferenceClock::default();
        let (from, to) = clock.month_bounds(2025, 6).unwrap();
        let sessions = store(&server).query_by_user_and_range("cat001", from, to).await.unwrap();

        mock.assert_async().await;
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].worked_minutes(), 480);
    }

    #[tokio::test]
    async fn test_open_session_query_filters_on_null_end() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(TABLE_PATH)
                    .query_param("user_id", "eq.cat001")
                    .query_param("end", "is.null")
                    .query_param("order", "start.desc")
                    .query_param("limit", "1");
                then.status(200).json_body(json!([{
                    "id": 3,
                    "user_id": "cat001",
                    "start": "2025-06-02T00:00:00+00:00",
                    "end": null
                }]));
            })
            .await;

        let open = store(&server).query_open_session("cat001").await.unwrap().unwrap();

        mock.assert_async().await;
        assert_eq!(open.id, 3);
        assert!(open.is_open());
        assert_eq!(open.break_minutes, 0);
    }

    #[tokio::test]
    async fn test_batch_update_patches_id_list() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(PATCH)
                    .path(TABLE_PATH)
                    .query_param("id", "in.(1,2,5)")
                    .json_body(json!({ "paid": true }));
                then.status(204);
            })
            .await;

        store(&server).update_batch(&[1, 2, 5], &SessionPatch::settle()).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_empty_batch_sends_nothing() {
        // No mock is registered, so any request would come back as an error
        let server = MockServer::start_async().await;

        let result = store(&server).update_batch(&[], &SessionPatch::settle()).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_rejected_request_surfaces_status_and_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(PATCH).path(TABLE_PATH);
                then.status(401).body("invalid api key");
            })
            .await;

        let result = store(&server).update(4, &SessionPatch::settle()).await;

        match result {
            Err(StoreError::Status { status, body }) => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid api key");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_tracker_reports_nothing_open_over_remote_store() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(TABLE_PATH).query_param("end", "is.null");
                then.status(200).json_body(json!([]));
            })
            .await;

        let mut tracker = Tracker::new(store(&server), ReferenceClock::default(), RestSpan::defaults(), "cat001");
        let outcome = tracker.clock_out(Utc::now(), &mut NoBreak).await.unwrap();

        assert_eq!(outcome, ClockOut::NothingOpen);
    }

    #[tokio::test]
    async fn test_store_failure_aborts_clock_in() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(TABLE_PATH);
                then.status(503).body("unavailable");
            })
            .await;

        let mut tracker = Tracker::new(store(&server), ReferenceClock::default(), RestSpan::defaults(), "cat001");
        let result = tracker.clock_in(Utc::now()).await;

        assert!(matches!(result, Err(TrackerError::Store(StoreError::Status { status: 503, .. }))));
    }
}
