//! Integration tests for config

#[cfg(test)]
mod tests {
    use dine_config::*;
    use dine_types::{ColorChoice, OutputFormat};
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Mutex to ensure env var tests don't run concurrently
    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    const ENV_VARS: [&str; 6] = [
        "DINE_OUTPUT",
        "DINE_COLOR",
        "DINE_AGENTS",
        "DINE_SERVINGS",
        "DINE_THINK_MS",
        "DINE_WORKERS",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }

    #[tokio::test]
    async fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[general]
default_output = "plain"
color = "never"

[table]
agent_count = 5
serving_count = 40
think_ms = 0
bowl_capacity = 8

[runtime]
worker_threads = 2
        "#
        )
        .unwrap();

        let config = Config::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.general.default_output, OutputFormat::Plain);
        assert_eq!(config.general.color, ColorChoice::Never);
        assert_eq!(config.table.agent_count, 5);
        assert_eq!(config.table.serving_count, 40);
        assert_eq!(config.table.think_ms, 0);
        assert_eq!(config.table.bowl_capacity, Some(8));
        assert_eq!(config.worker_threads(), 2);
    }

    #[tokio::test]
    async fn test_partial_file_keeps_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[table]\nserving_count = 7").unwrap();

        let config = Config::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.table.serving_count, 7);
        assert_eq!(
            config.table.agent_count,
            constants::DEFAULT_AGENT_COUNT
        );
        assert_eq!(config.table.think_ms, constants::DEFAULT_THINK_MS);
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let result = Config::load_or_default(&Some(missing)).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let result = Config::from_toml_str("[table\nagent_count = 3");
        assert!(matches!(
            result,
            Err(dine_errors::Error::Config(
                dine_errors::ConfigError::ParseError { .. }
            ))
        ));
    }

    #[test]
    fn test_toml_round_trip_of_defaults() {
        let rendered = Config::default().to_toml_string().unwrap();
        assert!(rendered.contains("agent_count = 15"));
        let parsed = Config::from_toml_str(&rendered).unwrap();
        assert_eq!(parsed.table, TableConfig::default());
    }

    #[test]
    fn test_merge_env() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        clear_env();

        std::env::set_var("DINE_OUTPUT", "json");
        std::env::set_var("DINE_COLOR", "always");
        std::env::set_var("DINE_AGENTS", "7");
        std::env::set_var("DINE_SERVINGS", "3");
        std::env::set_var("DINE_THINK_MS", "0");

        let mut config = Config::default();
        config.merge_env().unwrap();

        assert_eq!(config.general.default_output, OutputFormat::Json);
        assert_eq!(config.general.color, ColorChoice::Always);
        assert_eq!(config.table.agent_count, 7);
        assert_eq!(config.table.serving_count, 3);
        assert_eq!(config.table.think_ms, 0);

        clear_env();
    }

    #[test]
    fn test_invalid_env_value() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        clear_env();

        std::env::set_var("DINE_AGENTS", "many");

        let mut config = Config::default();
        let result = config.merge_env();
        assert!(result.is_err());

        clear_env();
    }

    #[test]
    fn test_auto_worker_threads_is_positive() {
        assert!(calculate_worker_threads(0) >= 1);
        assert_eq!(calculate_worker_threads(3), 3);
    }
}
