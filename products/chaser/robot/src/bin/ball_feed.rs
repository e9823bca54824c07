use {
    base::*,
    chaser::*,
    com::Publisher,
    image::{ImageFrame, decode_frame},
    std::time::Duration,
};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;
const BALL_RADIUS: u32 = 40;
const PIXELS_PER_FRAME: u32 = 8;
const FRAME_INTERVAL_MS: u64 = 100;

// Publishes camera frames for the chaser: a ball sweeping left to right, or
// the image file given as the only argument, over and over.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ChaserConfig::default();
    init_logging(&config)?;

    let still = match std::env::args().nth(1) {
        Some(path) => {
            log_info!("loading {}", path);
            let frame = decode_frame(&tokio::fs::read(&path).await?).await?;
            log_info!("{}x{} {}", frame.width, frame.height, frame.encoding.name());
            Some(frame)
        }
        None => None,
    };

    log_info!("publishing images at {}", config.image_topic);
    let publisher = Publisher::<ImageFrame>::bind(&config.image_topic).await?;

    let mut interval = tokio::time::interval(Duration::from_millis(FRAME_INTERVAL_MS));
    let mut tick = 0u64;
    loop {
        interval.tick().await;
        let frame = match &still {
            Some(frame) => frame.clone(),
            None => ball_frame(
                WIDTH,
                HEIGHT,
                sweep_x(tick, WIDTH, BALL_RADIUS, PIXELS_PER_FRAME),
                (HEIGHT / 2) as i64,
                BALL_RADIUS,
            ),
        };
        publisher.publish(&frame).await?;
        tick += 1;
    }
}
