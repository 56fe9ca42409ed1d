#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use tempfile::TempDir;
    use test_context::{test_context, AsyncTestContext};
    use timecard::db::sessions::Sessions;
    use timecard::libs::session::{NewSession, SessionPatch, SessionState};
    use timecard::libs::store::SessionStore;

    struct SessionsTestContext {
        _temp_dir: TempDir,
        store: Sessions,
    }

    impl AsyncTestContext for SessionsTestContext {
        async fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let store = Sessions::open(temp_dir.path().join("timecard.db")).unwrap();
            SessionsTestContext {
                _temp_dir: temp_dir,
                store,
            }
        }
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, day, hour, 0, 0).unwrap()
    }

    #[test_context(SessionsTestContext)]
    #[tokio::test]
    async fn test_insert_assigns_increasing_ids(ctx: &mut SessionsTestContext) {
        let first = ctx.store.insert(&NewSession::open("cat001", at(1, 0))).await.unwrap();
        let second = ctx.store.insert(&NewSession::open("cat001", at(2, 0))).await.unwrap();

        assert!(second > first);
        let stored = ctx.store.fetch(first).unwrap().unwrap();
        assert_eq!(stored.user_id, "cat001");
        assert_eq!(stored.start, at(1, 0));
        assert_eq!(stored.state(), SessionState::Open);
    }

    #[test_context(SessionsTestContext)]
    #[tokio::test]
    async fn test_range_query_is_inclusive_ordered_and_per_user(ctx: &mut SessionsTestContext) {
        let store = &mut ctx.store;
        store.insert(&NewSession::closed("cat001", at(3, 0), at(3, 8), 0)).await.unwrap();
        store.insert(&NewSession::closed("cat001", at(1, 0), at(1, 8), 0)).await.unwrap();
        store.insert(&NewSession::closed("cat001", at(5, 0), at(5, 8), 0)).await.unwrap();
        store.insert(&NewSession::closed("user27", at(2, 0), at(2, 8), 0)).await.unwrap();

        let sessions = store.query_by_user_and_range("cat001", at(1, 0), at(3, 0)).await.unwrap();

        let starts: Vec<_> = sessions.iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![at(1, 0), at(3, 0)]);
        assert!(sessions.iter().all(|s| s.user_id == "cat001"));
    }

    #[test_context(SessionsTestContext)]
    #[tokio::test]
    async fn test_open_session_is_most_recent_without_end(ctx: &mut SessionsTestContext) {
        let store = &mut ctx.store;
        assert!(store.query_open_session("cat001").await.unwrap().is_none());

        store.insert(&NewSession::open("cat001", at(1, 0))).await.unwrap();
        let latest = store.insert(&NewSession::open("cat001", at(2, 0))).await.unwrap();
        store.insert(&NewSession::closed("cat001", at(3, 0), at(3, 1), 0)).await.unwrap();
        store.insert(&NewSession::open("user27", at(4, 0))).await.unwrap();

        let open = store.query_open_session("cat001").await.unwrap().unwrap();
        assert_eq!(open.id, latest);
    }

    #[test_context(SessionsTestContext)]
    #[tokio::test]
    async fn test_update_writes_only_patched_fields(ctx: &mut SessionsTestContext) {
        let store = &mut ctx.store;
        let id = store.insert(&NewSession::open("cat001", at(1, 0))).await.unwrap();

        store.update(id, &SessionPatch::close(at(1, 9), 60)).await.unwrap();

        let stored = store.fetch(id).unwrap().unwrap();
        assert_eq!(stored.end, Some(at(1, 9)));
        assert_eq!(stored.break_minutes, 60);
        assert!(!stored.paid);
        assert_eq!(stored.worked_minutes(), 480);
    }

    #[test_context(SessionsTestContext)]
    #[tokio::test]
    async fn test_batch_settle_twice_is_idempotent(ctx: &mut SessionsTestContext) {
        let store = &mut ctx.store;
        let a = store.insert(&NewSession::closed("cat001", at(1, 0), at(1, 8), 0)).await.unwrap();
        let b = store.insert(&NewSession::closed("cat001", at(2, 0), at(2, 8), 0)).await.unwrap();
        let untouched = store.insert(&NewSession::closed("cat001", at(3, 0), at(3, 8), 0)).await.unwrap();

        store.update_batch(&[a, b], &SessionPatch::settle()).await.unwrap();
        store.update_batch(&[a, b], &SessionPatch::settle()).await.unwrap();

        assert!(store.fetch(a).unwrap().unwrap().paid);
        assert!(store.fetch(b).unwrap().unwrap().paid);
        assert!(!store.fetch(untouched).unwrap().unwrap().paid);
    }

    #[test_context(SessionsTestContext)]
    #[tokio::test]
    async fn test_empty_batch_is_a_no_op(ctx: &mut SessionsTestContext) {
        let store = &mut ctx.store;
        let id = store.insert(&NewSession::closed("cat001", at(1, 0), at(1, 8), 0)).await.unwrap();

        store.update_batch(&[], &SessionPatch::settle()).await.unwrap();
        store.update(id, &SessionPatch::default()).await.unwrap();

        assert!(!store.fetch(id).unwrap().unwrap().paid);
    }

    #[test_context(SessionsTestContext)]
    #[tokio::test]
    async fn test_sub_second_instants_survive_the_round_trip(ctx: &mut SessionsTestContext) {
        let start = at(1, 0) + Duration::milliseconds(250);
        let id = ctx.store.insert(&NewSession::open("cat001", start)).await.unwrap();

        assert_eq!(ctx.store.fetch(id).unwrap().unwrap().start, start);
    }
}
