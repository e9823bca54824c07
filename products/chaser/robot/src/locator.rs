use image::ImageFrame;

// every channel at full intensity
const BRIGHT_SAMPLE: [u8; 3] = [255, 255, 255];

/// Horizontal band of the image, by byte offset within a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Left,
    Middle,
    Right,
}

/// Zone boundaries as fractions of the row width in bytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zones {
    pub left_edge: f64,
    pub right_edge: f64,
}

impl Default for Zones {
    fn default() -> Self {
        Self {
            left_edge: 0.35,
            right_edge: 0.65,
        }
    }
}

impl Zones {
    /// Left below `left_edge * step`, middle from there up to (not
    /// including) `right_edge * step`, right for the rest.
    pub fn classify(&self, offset: usize, step: usize) -> Zone {
        let offset = offset as f64;
        let step = step as f64;
        if offset < self.left_edge * step {
            Zone::Left
        } else if offset < self.right_edge * step {
            Zone::Middle
        } else {
            Zone::Right
        }
    }
}

/// Forward speed and turn rate used for every non-stop command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Speeds {
    pub linear: f64,
    pub angular: f64,
}

impl Default for Speeds {
    fn default() -> Self {
        Self {
            linear: 0.35,
            angular: 0.35,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionCommand {
    pub linear_x: f64,
    pub angular_z: f64,
}

impl MotionCommand {
    pub const STOP: MotionCommand = MotionCommand::new(0.0, 0.0);

    pub const fn new(linear_x: f64, angular_z: f64) -> Self {
        Self {
            linear_x,
            angular_z,
        }
    }
}

/// Bright samples seen in each zone of one frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ZoneCounts {
    pub left: usize,
    pub middle: usize,
    pub right: usize,
}

impl ZoneCounts {
    pub fn add(&mut self, zone: Zone) {
        match zone {
            Zone::Left => self.left += 1,
            Zone::Middle => self.middle += 1,
            Zone::Right => self.right += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.left + self.middle + self.right
    }
}

/// Outcome of the steering decision for one frame.
///
/// `Right` and `Tie` produce the same command. They are kept apart so a
/// reader of the logs can tell a ball on the right from a frame where no
/// zone strictly dominates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    Stop,
    Left,
    Straight,
    Right,
    Tie,
}

impl Steer {
    pub fn command(&self, speeds: &Speeds) -> MotionCommand {
        match self {
            Steer::Stop => MotionCommand::STOP,
            Steer::Left => MotionCommand::new(speeds.linear, speeds.angular),
            Steer::Straight => MotionCommand::new(speeds.linear, 0.0),
            Steer::Right | Steer::Tie => MotionCommand::new(speeds.linear, -speeds.angular),
        }
    }
}

/// Count bright samples per zone over every row of `frame`.
///
/// Each row is read as consecutive 3-byte samples whatever the channel
/// order. A trailing partial sample in a row is not looked at.
pub fn count_zones(frame: &ImageFrame, zones: &Zones) -> ZoneCounts {
    let step = frame.step as usize;
    let mut counts = ZoneCounts::default();
    for row in frame.rows() {
        for (index, sample) in row.chunks_exact(3).enumerate() {
            if sample == BRIGHT_SAMPLE {
                counts.add(zones.classify(index * 3, step));
            }
        }
    }
    counts
}

pub fn decide(counts: &ZoneCounts) -> Steer {
    let ZoneCounts {
        left,
        middle,
        right,
    } = *counts;
    if counts.total() == 0 {
        Steer::Stop
    } else if left > middle && left > right {
        Steer::Left
    } else if middle > left && middle > right {
        Steer::Straight
    } else if right > left && right > middle {
        Steer::Right
    } else {
        Steer::Tie
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub counts: ZoneCounts,
    pub steer: Steer,
    pub command: MotionCommand,
}

/// Scan one frame and pick the command for it. No state is kept between calls.
pub fn locate(frame: &ImageFrame, zones: &Zones, speeds: &Speeds) -> Location {
    let counts = count_zones(frame, zones);
    let steer = decide(&counts);
    Location {
        counts,
        steer,
        command: steer.command(speeds),
    }
}
