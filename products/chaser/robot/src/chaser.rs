use {
    crate::{ChaserConfig, ChaserError, CommandSink, MotionCommand, Speeds, Zones, locate},
    base::*,
    com::{ComError, Subscriber},
    image::ImageFrame,
};

/// Turns each camera frame into one drive command.
pub struct BallChaser<S> {
    zones: Zones,
    speeds: Speeds,
    sink: S,
    frames_handled: u64,
}

impl<S: CommandSink> BallChaser<S> {
    pub fn new(config: &ChaserConfig, sink: S) -> Self {
        Self {
            zones: config.zones,
            speeds: config.speeds,
            sink,
            frames_handled: 0,
        }
    }

    /// Locate the ball in `frame` and send the resulting command.
    ///
    /// A malformed frame is rejected before anything is sent. Otherwise
    /// exactly one command goes to the sink, and is returned.
    pub async fn handle_frame(&mut self, frame: &ImageFrame) -> Result<MotionCommand, ChaserError> {
        frame.validate()?;
        let location = locate(frame, &self.zones, &self.speeds);
        log_debug!(
            "counts l/m/r {}/{}/{} -> {:?} ({:.2}, {:.2})",
            location.counts.left,
            location.counts.middle,
            location.counts.right,
            location.steer,
            location.command.linear_x,
            location.command.angular_z
        );
        self.frames_handled += 1;
        self.sink.drive(location.command).await?;
        Ok(location.command)
    }

    /// Handle frames from `images` one at a time until the topic closes.
    ///
    /// The next frame is not taken from the subscription before the previous
    /// command has been sent. Failures for a single frame are logged and the
    /// loop moves on.
    pub async fn spin(&mut self, images: &mut Subscriber<ImageFrame>) -> Result<(), ChaserError> {
        loop {
            let frame = match images.recv().await {
                Ok(frame) => frame,
                Err(ComError::ConnectionClosed) => return Ok(()),
                Err(e) => return Err(e.into()),
            };
            if let Err(e) = self.handle_frame(&frame).await {
                log_warn!("frame skipped: {}", e);
            }
        }
    }

    /// Frames that passed validation, whether or not their command got through.
    pub fn frames_handled(&self) -> u64 {
        self.frames_handled
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
