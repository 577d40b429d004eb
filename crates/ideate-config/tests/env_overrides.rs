use figment::Jail;
use ideate_config::{ConfigError, IdeateConfig};

#[test]
fn env_vars_fill_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("IDEATE_ASSISTANT__API_KEY", "gsk_from_env");
        jail.set_env("IDEATE_WORKFLOW__WEBHOOK_URL", "https://hooks.example.com/x");
        jail.set_env("IDEATE_DATABASE__PATH", ":memory:");

        let config = IdeateConfig::load().expect("config loads");
        assert_eq!(config.assistant.api_key, "gsk_from_env");
        assert!(config.require_assistant().is_ok());
        assert!(config.require_workflow().is_ok());
        assert!(config.database.is_in_memory());
        Ok(())
    });
}

#[test]
fn invalid_env_value_fails_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("IDEATE_POLLER__INTERVAL_SECS", "0");

        let err = IdeateConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        Ok(())
    });
}

#[test]
fn malformed_env_value_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.set_env("IDEATE_POLLER__BUDGET_SECS", "three minutes");

        let err = IdeateConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}
