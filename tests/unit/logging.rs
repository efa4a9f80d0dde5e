//! Unit tests for log format selection

use equitypath::logging::LogFormat;

#[test]
fn test_production_environments_log_json() {
    assert_eq!(LogFormat::for_environment("production"), LogFormat::Json);
    assert_eq!(LogFormat::for_environment("prod"), LogFormat::Json);
}

#[test]
fn test_other_environments_log_pretty() {
    assert_eq!(LogFormat::for_environment("sandbox"), LogFormat::Pretty);
    assert_eq!(LogFormat::for_environment(""), LogFormat::Pretty);
}
