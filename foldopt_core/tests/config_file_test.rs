// Test loading foldopt configuration from disk
use foldopt_core::{FoldingFactors, FoldoptConfig, FoldoptError, MissingParameterPolicy};
use std::io::Write;

fn write_config(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_toml_file() {
    let file = write_config(
        ".toml",
        r#"
        [adapter]
        missing_parameter = "error"

        [nodes.MatrixVectorActivation_0]
        channel_in_folding = 16
        channel_out_folding = 4
        "#,
    );

    let config = FoldoptConfig::from_file(file.path()).unwrap();
    assert_eq!(config.adapter.missing_parameter, MissingParameterPolicy::Error);
    assert_eq!(
        config.node("MatrixVectorActivation_0").unwrap().folding(),
        FoldingFactors::new(16, 4)
    );
}

#[test]
fn test_load_yaml_file() {
    let file = write_config(
        ".yml",
        "nodes:\n  Thresholding_0:\n    channel_out_folding: 2\n",
    );

    let config = FoldoptConfig::from_file(file.path()).unwrap();
    assert_eq!(config.adapter.missing_parameter, MissingParameterPolicy::Skip);
    assert_eq!(
        config.node("Thresholding_0").unwrap().folding(),
        FoldingFactors::new(1, 2)
    );
}

#[test]
fn test_unknown_extension_falls_back_to_yaml() {
    let file = write_config(".conf", "adapter:\n  missing_parameter: warn\n");

    let config = FoldoptConfig::from_file(file.path()).unwrap();
    assert_eq!(config.adapter.missing_parameter, MissingParameterPolicy::Warn);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = FoldoptConfig::from_file(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(FoldoptError::Config(_))));
}

#[test]
fn test_load_first_takes_first_existing_path() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = dir.path().join("foldopt.yaml");
    let yml = dir.path().join("foldopt.yml");
    std::fs::write(&yaml, "adapter:\n  missing_parameter: warn\n").unwrap();
    std::fs::write(&yml, "adapter:\n  missing_parameter: error\n").unwrap();

    let paths = vec![dir.path().join("foldopt.toml"), yaml, yml];
    let config = FoldoptConfig::load_first(&paths).unwrap();
    assert_eq!(config.adapter.missing_parameter, MissingParameterPolicy::Warn);
}

#[test]
fn test_load_first_without_any_file() {
    let dir = tempfile::tempdir().unwrap();
    let paths = vec![dir.path().join("foldopt.toml"), dir.path().join("foldopt.yaml")];

    let err = FoldoptConfig::load_first(&paths).unwrap_err();
    assert!(err.to_string().contains("No config file found"));
}

#[test]
fn test_search_paths_cover_every_format() {
    let paths = FoldoptConfig::get_search_paths();
    for name in ["foldopt.toml", "foldopt.yaml", "foldopt.yml"] {
        assert!(paths.contains(&std::path::PathBuf::from(name)));
    }
    assert!(paths.contains(&std::path::PathBuf::from("/etc/foldopt/config.toml")));
    assert!(paths.contains(&std::path::PathBuf::from("/etc/foldopt/config.yaml")));
}
