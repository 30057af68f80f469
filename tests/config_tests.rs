use std::io::Write;

use candle_scope::config::AnalysisConfig;

fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("candle-scope-{name}-{}.toml", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn loads_a_partial_file_with_defaults_for_the_rest() {
    let path = write_temp(
        "partial",
        r#"
window_cap = 250
rsi_period = 7

[filters]
"Doji" = false
"#,
    );
    let config = AnalysisConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.window_cap, 250);
    assert_eq!(config.rsi_period, 7);
    assert_eq!(config.marker_cap, 50);
    assert_eq!(config.sma_long, 20);
    assert!(!config.filter_enabled("Doji"));
    assert!(config.filter_enabled("Hammer"));
}

#[test]
fn rejects_a_config_with_inverted_ma_periods() {
    let path = write_temp(
        "inverted",
        r#"
trend_fast = 99
trend_slow = 25
"#,
    );
    let result = AnalysisConfig::load(&path);
    std::fs::remove_file(&path).ok();
    assert!(result.is_err());
}

#[test]
fn missing_file_reports_the_path() {
    let err = AnalysisConfig::load(std::path::Path::new("/nonexistent/candle-scope.toml"))
        .unwrap_err();
    assert!(format!("{err:#}").contains("/nonexistent/candle-scope.toml"));
}
