//! TOML layering, sandboxed with `figment::Jail`.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use ideate_config::IdeateConfig;
use pretty_assertions::assert_eq;

#[test]
fn loads_all_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "/var/lib/ideate/ideas.db"

[server]
bind = "0.0.0.0:8080"

[workflow]
webhook_url = "https://hooks.example.com/webhook/ideas"
timeout_secs = 10

[assistant]
api_key = "gsk_test"
model = "llama-3.1-8b-instant"

[poller]
grace_secs = 2
budget_secs = 60
"#,
        )?;

        let config: IdeateConfig = Figment::from(Serialized::defaults(IdeateConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.database.path, "/var/lib/ideate/ideas.db");
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.workflow.webhook_url, "https://hooks.example.com/webhook/ideas");
        assert_eq!(config.workflow.timeout_secs, 10);
        assert_eq!(config.workflow.user_agent, "InspirAI Custom Form");
        assert_eq!(config.assistant.model, "llama-3.1-8b-instant");
        assert!(config.assistant.is_configured());
        assert_eq!(config.poller.grace_secs, 2);
        assert_eq!(config.poller.interval_secs, 5);
        assert_eq!(config.poller.budget_secs, 60);
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".ideate")?;
        jail.create_file(
            ".ideate/config.toml",
            r#"
[workflow]
webhook_url = "https://local.example.com/hook"
"#,
        )?;

        let config = IdeateConfig::load().expect("config loads");
        assert_eq!(config.workflow.webhook_url, "https://local.example.com/hook");
        Ok(())
    });
}

#[test]
fn env_beats_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[poller]
budget_secs = 60
"#,
        )?;
        jail.set_env("IDEATE_POLLER__BUDGET_SECS", "90");

        let config: IdeateConfig = Figment::from(Serialized::defaults(IdeateConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("IDEATE_").split("__"))
            .extract()?;

        assert_eq!(config.poller.budget_secs, 90);
        Ok(())
    });
}
