use base::{Level, log_warn};
use chaser::*;
use std::fs;

#[test]
fn test_defaults() {
    let config = ChaserConfig::default();
    assert_eq!(config.image_topic, DEFAULT_IMAGE_TOPIC);
    assert_eq!(config.drive_service, DEFAULT_DRIVE_SERVICE);
    assert_eq!(config.wheel_topic, DEFAULT_WHEEL_TOPIC);
    assert_eq!(config.queue_size, 10);
    assert_eq!(config.connect_retry, std::time::Duration::from_secs(1));
    assert_eq!(config.zones.left_edge, 0.35);
    assert_eq!(config.zones.right_edge, 0.65);
    assert_eq!(config.speeds.linear, 0.35);
    assert_eq!(config.speeds.angular, 0.35);
    assert_eq!(config.log_dir, None);
    assert_eq!(config.log_level, Level::Info);
}

#[test]
fn test_init_logging_to_directory() {
    let dir = std::env::temp_dir().join(format!("chaser-config-test-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);

    let config = ChaserConfig {
        log_dir: Some(dir.clone()),
        log_level: Level::Warn,
        ..Default::default()
    };
    init_logging(&config).expect("init_logging failed");
    assert_eq!(base::level(), Level::Warn);

    base::log_info!("filtered out");
    log_warn!("frame skipped");

    let path = dir.join(format!("{}.log", base::format_today()));
    let contents = fs::read_to_string(&path).expect("log file missing");
    assert!(!contents.contains("filtered out"));
    assert!(contents.contains("frame skipped"));

    fs::remove_dir_all(&dir).ok();
}
