//! JSON config ingestion through the public API, the way a host UI
//! would hand a batch run its settings.

use rezip::types::config::{BatchConfig, DEFAULT_PASSWORD, DEFAULT_SUFFIX};
use std::path::PathBuf;

#[test]
fn host_ui_payload_lands_as_strict_types() {
    let json = r#"{
        "password": "secret",
        "suffix": "_site",
        "copyFilePath": "/ads/readme.txt",
        "copyFileEnabled": "TRUE",
        "deleteOriginal": 0,
        "extractNested": "false",
        "inputPath": "/data/in",
        "outputPath": ""
    }"#;

    let config = BatchConfig::from_json(json).unwrap();

    assert_eq!(config.password, "secret");
    assert_eq!(config.suffix, "_site");
    assert!(config.copy_file_enabled);
    assert!(!config.delete_original);
    assert!(!config.extract_nested);
    assert_eq!(config.input_path, PathBuf::from("/data/in"));
    assert_eq!(config.output_path, PathBuf::from("/data/in"));
}

#[test]
fn minimal_payload_gets_product_defaults() {
    let config = BatchConfig::from_json(r#"{"inputPath": "/data/in"}"#).unwrap();

    assert_eq!(config.password, DEFAULT_PASSWORD);
    assert_eq!(config.suffix, DEFAULT_SUFFIX);
    assert!(config.extract_nested);
    assert!(!config.delete_original);
    assert!(!config.copy_file_enabled);
    assert_eq!(config.output_path, config.input_path);
}
