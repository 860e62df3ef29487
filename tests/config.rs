use competitor_metrics::config::AnalyzerConfig;
use competitor_metrics::report::ReportFormat;
use competitor_metrics::AnalysisError;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let (config, path) =
        AnalyzerConfig::load(Some(dir.path().join("absent.toml"))).expect("defaults");
    assert!(path.is_some());
    assert!((config.competitiveness.follower_weight - 0.3).abs() < 1e-6);
    assert!((config.competitiveness.follower_saturation - 10_000.0).abs() < 1e-6);
    assert!(config.themes.price.iter().any(|word| word == "discount"));
}

#[test]
fn partial_file_keeps_remaining_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("analyzer.toml");
    std::fs::write(
        &path,
        "[competitiveness]\nadvertising_weight = 0.5\n\n[themes]\nservice = [\"Warranty\"]\n\n[reports]\nformats = [\"csv\"]\n",
    )
    .expect("write config");

    let (config, _) = AnalyzerConfig::load(Some(path)).expect("parses");
    assert!((config.competitiveness.advertising_weight - 0.5).abs() < 1e-6);
    assert!((config.competitiveness.content_weight - 0.3).abs() < 1e-6);
    assert_eq!(config.themes.service, vec!["Warranty".to_string()]);
    assert_eq!(config.themes.quality.len(), 5);
    assert_eq!(config.reports.formats, vec![ReportFormat::Csv]);
}

#[test]
fn written_defaults_load_back() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("nested").join("analyzer.toml");
    AnalyzerConfig::default().write(&path).expect("written");

    let (config, _) = AnalyzerConfig::load(Some(path)).expect("parses");
    assert!((config.competitiveness.maturity_weight - 0.2).abs() < 1e-6);
    assert_eq!(config.reports.file_prefix, "competitor_analysis");
}

#[test]
fn invalid_toml_is_a_config_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[competitiveness\nfollower_weight = ").expect("write config");

    let err = AnalyzerConfig::load(Some(path)).unwrap_err();
    assert!(matches!(err, AnalysisError::Config(_)));
}
