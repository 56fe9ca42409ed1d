#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use timecard::api::RestConfig;
    use chrono::{Duration, TimeZone, Utc};
    use timecard::libs::calculator::aggregate_monthly;
    use timecard::libs::clock::ReferenceClock;
    use timecard::libs::config::{Config, StoreConfig, DEFAULT_BREAK_MINUTES, DEFAULT_HOURLY_RATE};
    use timecard::libs::error::TrackerError;
    use timecard::libs::rest_span::RestSpan;
    use timecard::libs::session::WorkSession;

    struct ConfigTestContext {
        temp_dir: TempDir,
    }

    impl ConfigTestContext {
        fn config_path(&self) -> PathBuf {
            self.temp_dir.path().join("config.json")
        }
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            ConfigTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_file_yields_defaults(ctx: &mut ConfigTestContext) {
        let config = Config::read_from(&ctx.config_path()).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.store, StoreConfig::Local);
        assert_eq!(config.clock(), ReferenceClock::default());
        assert_eq!(config.rest_spans, RestSpan::defaults());
        assert_eq!(config.default_break_minutes, DEFAULT_BREAK_MINUTES);
        assert_eq!(config.hourly_rate, DEFAULT_HOURLY_RATE);
        assert_eq!(config.active_identity, "cat001");
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_partial_file_keeps_other_defaults(ctx: &mut ConfigTestContext) {
        fs::write(
            ctx.config_path(),
            r#"{
                "store": { "backend": "remote", "api_url": "https://example.supabase.co" },
                "hourly_rate": 52.5
            }"#,
        )
        .unwrap();

        let config = Config::read_from(&ctx.config_path()).unwrap();

        assert_eq!(
            config.store,
            StoreConfig::Remote(RestConfig {
                api_url: "https://example.supabase.co".to_string(),
                table: "work_sessions".to_string(),
            })
        );
        assert_eq!(config.hourly_rate, 52.5);
        assert_eq!(config.identities.len(), 3);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_malformed_file_is_an_error(ctx: &mut ConfigTestContext) {
        fs::write(ctx.config_path(), "{ not json").unwrap();

        assert!(Config::read_from(&ctx.config_path()).is_err());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_back(ctx: &mut ConfigTestContext) {
        let mut config = Config::default();
        config.active_identity = "user27".to_string();
        config.rest_spans = vec![RestSpan::new(12, 0, 13, 0)];
        config.save_to(&ctx.config_path()).unwrap();

        let loaded = Config::read_from(&ctx.config_path()).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_environment_switches_to_remote_store() {
        let config = Config::default().with_overrides(env(&[
            ("TIMECARD_STORE_URL", "https://example.supabase.co"),
            ("TIMECARD_STORE_TABLE", "shifts"),
        ]));

        assert_eq!(
            config.store,
            StoreConfig::Remote(RestConfig {
                api_url: "https://example.supabase.co".to_string(),
                table: "shifts".to_string(),
            })
        );
    }

    #[test]
    fn test_blank_overrides_are_ignored() {
        let config = Config::default().with_overrides(env(&[("TIMECARD_STORE_URL", "  "), ("TIMECARD_STORE_TABLE", "")]));

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_table_override_alone_keeps_local_store() {
        let config = Config::default().with_overrides(env(&[("TIMECARD_STORE_TABLE", "shifts")]));

        assert_eq!(config.store, StoreConfig::Local);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_reference_clock_ignores_file_and_environment(ctx: &mut ConfigTestContext) {
        fs::write(ctx.config_path(), r#"{ "timezone": "America/New_York" }"#).unwrap();

        let config = Config::read_from(&ctx.config_path())
            .unwrap()
            .with_overrides(env(&[("TIMECARD_TIMEZONE", "America/New_York")]));
        let clock = config.clock();

        // 2025-06-01 00:30 in Tokyo, still May 31 in New York
        let start = Utc.with_ymd_and_hms(2025, 5, 31, 15, 30, 0).unwrap();
        let session = WorkSession {
            id: 1,
            user_id: "cat001".to_string(),
            start,
            end: Some(start + Duration::hours(1)),
            break_minutes: 0,
            paid: false,
        };
        let june = aggregate_monthly(&clock, &[session.clone()], 2025, 6);
        let may = aggregate_monthly(&clock, &[session], 2025, 5);

        assert_eq!(clock, ReferenceClock::default());
        assert_eq!((june.hours, june.minutes), (1, 0));
        assert_eq!((may.hours, may.minutes), (0, 0));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_saved_file_has_no_timezone(ctx: &mut ConfigTestContext) {
        Config::default().save_to(&ctx.config_path()).unwrap();

        let on_disk = fs::read_to_string(ctx.config_path()).unwrap();
        assert!(!on_disk.contains("timezone"));
    }

    #[test]
    fn test_identity_resolution() {
        let config = Config::default();

        assert_eq!(config.identity(None).unwrap().token, "cat001");
        assert_eq!(config.identity(Some("guest")).unwrap().label, "Guest");
        assert!(matches!(config.identity(Some("nobody")), Err(TrackerError::UnknownIdentity(_))));
    }
}
