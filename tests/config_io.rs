use fcnet::{FcnetError, Network, NetworkConfig, Precision};
use tempfile::tempdir;

#[test]
fn config_round_trips_through_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("net.json");
    let path = path.to_str().unwrap();

    let config = NetworkConfig::new(vec![64, 32], 20, 5)
        .with_dropout(0.25)
        .with_reg(1e-3)
        .with_precision(Precision::F64)
        .with_seed(42);
    config.save_json(path).unwrap();

    let loaded = NetworkConfig::load_json(path).unwrap();
    assert_eq!(loaded, config);

    let a = Network::new(config).unwrap();
    let b = Network::new(loaded).unwrap();
    assert_eq!(a.params(), b.params());
}

#[test]
fn invalid_config_file_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, r#"{"hidden_dims": [10], "dropout": 1.5}"#).unwrap();
    let err = NetworkConfig::load_json(path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, FcnetError::Config(_)));
}

#[test]
fn missing_or_malformed_files_surface_their_cause() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    assert!(matches!(
        NetworkConfig::load_json(missing.to_str().unwrap()).unwrap_err(),
        FcnetError::Io(_)
    ));

    let garbled = dir.path().join("garbled.json");
    std::fs::write(&garbled, "{ not json").unwrap();
    assert!(matches!(
        NetworkConfig::load_json(garbled.to_str().unwrap()).unwrap_err(),
        FcnetError::Json(_)
    ));
}
