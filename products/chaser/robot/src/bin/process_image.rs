use {
    base::*,
    chaser::*,
    com::Subscriber,
    image::ImageFrame,
};

// keep trying until the image topic is up
async fn subscribe(config: &ChaserConfig) -> Subscriber<ImageFrame> {
    loop {
        match Subscriber::<ImageFrame>::connect(&config.image_topic, config.queue_size).await {
            Ok(images) => return images,
            Err(e) => {
                log_warn!("image topic {} not reachable: {}", config.image_topic, e);
                tokio::time::sleep(config.connect_retry).await;
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ChaserConfig::default();
    init_logging(&config)?;

    log_info!("drive service at {}", config.drive_service);
    let drive = DriveClient::new(&config.drive_service);
    let mut chaser = BallChaser::new(&config, drive);

    loop {
        log_info!("subscribing to image topic at {}", config.image_topic);
        let mut images = subscribe(&config).await;
        chaser.spin(&mut images).await?;
        log_warn!(
            "image topic closed after {} frames ({} dropped), resubscribing",
            chaser.frames_handled(),
            images.dropped()
        );
    }
}
