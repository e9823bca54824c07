use {
    base::*,
    chaser::*,
    com::Publisher,
    std::sync::Arc,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ChaserConfig::default();
    init_logging(&config)?;

    log_info!("publishing wheel commands at {}", config.wheel_topic);
    let wheels = match Publisher::<Twist>::bind(&config.wheel_topic).await {
        Ok(wheels) => Arc::new(wheels),
        Err(e) => log_fatal!("cannot bind wheel topic {}: {}", config.wheel_topic, e),
    };

    log_info!("serving drive requests at {}", config.drive_service);
    let _server = match serve_drive(&config.drive_service, Arc::clone(&wheels)).await {
        Ok(server) => server,
        Err(e) => log_fatal!("cannot bind drive service {}: {}", config.drive_service, e),
    };

    log_info!("ready to send wheel commands");
    tokio::signal::ctrl_c().await?;

    log_info!("stopping wheels");
    wheels
        .publish(&Twist {
            linear_x: 0.0,
            angular_z: 0.0,
        })
        .await?;
    Ok(())
}
