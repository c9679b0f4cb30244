use super::*;

#[test]
fn accepts_boolean_encodings() {
    for raw in ["true", "\"true\"", "\"TRUE\"", "1"] {
        let json = format!(r#"{{"inputPath": "/in", "deleteOriginal": {raw}}}"#);
        let config = BatchConfig::from_json(&json).unwrap();
        assert!(config.delete_original, "{raw} should read as true");
    }

    for raw in ["false", "\"false\"", "\"FALSE\"", "0"] {
        let json = format!(r#"{{"inputPath": "/in", "deleteOriginal": {raw}}}"#);
        let config = BatchConfig::from_json(&json).unwrap();
        assert!(!config.delete_original, "{raw} should read as false");
    }
}

#[test]
fn omitted_flags_take_defaults() {
    let config = BatchConfig::from_json(r#"{"inputPath": "/in"}"#).unwrap();

    assert!(config.extract_nested);
    assert!(!config.delete_original);
    assert!(!config.copy_file_enabled);
    assert_eq!(config.password, DEFAULT_PASSWORD);
    assert_eq!(config.suffix, DEFAULT_SUFFIX);
}

#[test]
fn output_path_falls_back_to_input() {
    let config = BatchConfig::from_json(r#"{"inputPath": "/data/in"}"#).unwrap();
    assert_eq!(config.output_path, PathBuf::from("/data/in"));

    let config =
        BatchConfig::from_json(r#"{"inputPath": "/data/in", "outputPath": ""}"#).unwrap();
    assert_eq!(config.output_path, PathBuf::from("/data/in"));

    let config =
        BatchConfig::from_json(r#"{"inputPath": "/data/in", "outputPath": "/data/out"}"#).unwrap();
    assert_eq!(config.output_path, PathBuf::from("/data/out"));
}

#[test]
fn empty_password_means_none() {
    let mut config = BatchConfig::default();

    config.password = String::new();
    assert_eq!(config.password(), None);

    config.password = "secret".into();
    assert_eq!(config.password(), Some("secret"));
}

#[test]
fn copy_file_requires_flag_and_path() {
    let mut config = BatchConfig::default();

    config.copy_file_path = "/tmp/readme.txt".into();
    assert!(config.copy_file().is_none());

    config.copy_file_enabled = true;
    assert_eq!(config.copy_file(), Some(Path::new("/tmp/readme.txt")));

    config.copy_file_path.clear();
    assert!(config.copy_file().is_none());
}

#[test]
fn rejects_malformed_json() {
    assert!(BatchConfig::from_json("{not json").is_err());
}
