use {
    crate::{Speeds, Zones},
    base::Level,
    std::{path::PathBuf, time::Duration},
};

pub const DEFAULT_IMAGE_TOPIC: &str = "127.0.0.1:5090";
pub const DEFAULT_DRIVE_SERVICE: &str = "127.0.0.1:5091";
pub const DEFAULT_WHEEL_TOPIC: &str = "127.0.0.1:5092";

// frames kept by the image subscription before the oldest is dropped
pub const DEFAULT_QUEUE_SIZE: usize = 10;

pub const DEFAULT_CONNECT_RETRY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq)]
pub struct ChaserConfig {
    pub image_topic: String,
    pub drive_service: String,
    pub wheel_topic: String,
    pub queue_size: usize,
    /// Wait between attempts to reach a topic that is not up yet.
    pub connect_retry: Duration,
    pub zones: Zones,
    pub speeds: Speeds,
    /// Log to daily files in this directory instead of stdout.
    pub log_dir: Option<PathBuf>,
    pub log_level: Level,
}

impl Default for ChaserConfig {
    fn default() -> Self {
        Self {
            image_topic: DEFAULT_IMAGE_TOPIC.to_string(),
            drive_service: DEFAULT_DRIVE_SERVICE.to_string(),
            wheel_topic: DEFAULT_WHEEL_TOPIC.to_string(),
            queue_size: DEFAULT_QUEUE_SIZE,
            connect_retry: DEFAULT_CONNECT_RETRY,
            zones: Zones::default(),
            speeds: Speeds::default(),
            log_dir: None,
            log_level: Level::Info,
        }
    }
}

/// Install the process logger described by `config`.
pub fn init_logging(config: &ChaserConfig) -> Result<(), Box<dyn std::error::Error>> {
    base::set_level(config.log_level);
    match &config.log_dir {
        Some(dir) => base::init_file_logger(dir)?,
        None => base::init_stdout_logger(),
    }
    Ok(())
}
