//! Configuration loading tests

#[cfg(test)]
mod tests {
    use persona_gateway::config::{Config, ENV_IP_LIMIT, ENV_PORT};
    use persona_gateway::core::providers::{ProviderKind, ProviderRegistry};
    use std::collections::HashMap;
    use std::io::Write;

    #[tokio::test]
    async fn test_load_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
server:
  port: 9100
rate_limit:
  ip_max_requests: 10
router:
  max_retries: 1
  streaming: false
providers:
  deepseek:
    api_key: sk-file
    base_url: http://localhost:8080/v1
storage:
  data_dir: /tmp/persona
"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.rate_limit.ip_max_requests, 10);
        assert_eq!(config.rate_limit.session_max_requests, 30);
        assert_eq!(config.router.max_retries, 1);
        assert!(!config.router.streaming);
        assert_eq!(config.storage.data_dir.to_str(), Some("/tmp/persona"));

        let registry = ProviderRegistry::from_config(&config.providers);
        assert_eq!(
            registry.get_default_provider().map(|p| p.id),
            Some(ProviderKind::DeepSeek)
        );
        assert_eq!(
            registry
                .endpoint(ProviderKind::DeepSeek)
                .unwrap()
                .chat_completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_config_error() {
        let err = Config::from_file("/definitely/not/here.yaml").await.unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_env_overlays_file_values() {
        let mut config = Config::from_yaml_str("server:\n  port: 9100\n").unwrap();
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_PORT, "9200"),
            (ENV_IP_LIMIT, "7"),
            ("OPENAI_API_KEY", "sk-env"),
        ]);
        config
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.server.port, 9200);
        assert_eq!(config.rate_limit.ip_max_requests, 7);
        let registry = ProviderRegistry::from_config(&config.providers);
        assert_eq!(
            registry.get_default_provider().map(|p| p.id),
            Some(ProviderKind::OpenAi)
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        let config = Config::from_yaml_str("server:\n  port: 0\n").unwrap();
        assert!(config.validate().is_err());

        let config = Config::from_yaml_str("router:\n  cooldown_secs: 0\n").unwrap();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        let err = config
            .apply_env(|key| (key == ENV_PORT).then(|| "not-a-port".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_PORT));
    }
}
