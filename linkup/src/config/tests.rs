#[cfg(test)]
mod tests {
    use crate::config::{
        AcceptMode, ConfigBuilder, ConfigLoader, LinkupConfig, LogFormat, LogLevel, validation,
    };
    use crate::storage::config::{StorageBackend, SurrealDBEngine};
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn test_default_config() {
        let config = LinkupConfig::default();
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.relationships.accept_mode, AcceptMode::Sequential);
        assert!(!config.relationships.repair_on_read);
        assert_eq!(config.relationships.suggestion_limit, 10);
        assert_eq!(config.storage.surrealdb.engine, SurrealDBEngine::Memory);
    }

    #[test]
    fn test_config_builder_relationships() {
        let config = ConfigBuilder::new()
            .with_data_dir("/tmp/test_data")
            .with_accept_mode(AcceptMode::Transactional)
            .with_repair_on_read(true)
            .with_suggestion_limit(3)
            .with_log_level(LogLevel::Debug)
            .build()
            .unwrap();

        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/test_data"));
        assert_eq!(config.relationships.accept_mode, AcceptMode::Transactional);
        assert!(config.relationships.repair_on_read);
        assert_eq!(config.relationships.suggestion_limit, 3);
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn test_validation() {
        let valid = ConfigBuilder::new().build();
        assert!(valid.is_ok());

        let config = LinkupConfig::default();
        assert!(validation::validate_config(&config).is_ok());

        let zero_limit = ConfigBuilder::new().with_suggestion_limit(0).build();
        assert!(zero_limit.is_err());

        let no_namespace = ConfigBuilder::new()
            .with_surrealdb_memory()
            .with_namespace("", "network")
            .build();
        assert!(no_namespace.is_err());
    }

    #[test]
    fn test_predefined_configs() {
        let dev = ConfigBuilder::development().build().unwrap();
        let test = ConfigBuilder::testing().build().unwrap();
        let prod = ConfigBuilder::production().build().unwrap();

        assert_eq!(dev.storage.backend, StorageBackend::SurrealDB);
        assert_eq!(dev.logging.level, LogLevel::Debug);

        assert_eq!(test.storage.backend, StorageBackend::Memory);
        assert_eq!(test.storage.data_dir, PathBuf::from("./test_data"));

        assert_eq!(prod.storage.surrealdb.engine, SurrealDBEngine::RocksDB);
        assert!(prod.storage.surrealdb.connection.ends_with("network"));
        assert_eq!(prod.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_loader_reads_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[storage]
backend = "memory"

[relationships]
accept_mode = "transactional"
suggestion_limit = 5
"#
        )
        .unwrap();

        let config = ConfigLoader::new()
            .load_file(file.path())
            .unwrap()
            .extract()
            .unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.relationships.accept_mode, AcceptMode::Transactional);
        assert_eq!(config.relationships.suggestion_limit, 5);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_loader_rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        assert!(ConfigLoader::new().load_file(file.path()).is_err());
    }

    #[test]
    fn test_loader_rejects_invalid_values() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"relationships": {{"suggestion_limit": 0}}}}"#).unwrap();

        let result = ConfigLoader::new().load_file(file.path()).unwrap().extract();
        assert!(result.is_err());
    }

    #[test]
    fn test_loader_starts_from_built_config() {
        let built = ConfigBuilder::new()
            .with_data_dir("/tmp/linkup_loader")
            .with_accept_mode(AcceptMode::Transactional)
            .build()
            .unwrap();

        let config = ConfigLoader::from_config(&built).extract().unwrap();
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/linkup_loader"));
        assert_eq!(config.relationships.accept_mode, AcceptMode::Transactional);
    }

    #[test]
    fn test_config_serialization() {
        let config = ConfigBuilder::new()
            .with_data_dir("/tmp/test_data")
            .with_accept_mode(AcceptMode::Transactional)
            .build()
            .unwrap();

        let json = serde_json::to_string(&config).unwrap();
        let deserialized: LinkupConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config.storage.data_dir, deserialized.storage.data_dir);
        assert_eq!(config.relationships, deserialized.relationships);
    }
}
