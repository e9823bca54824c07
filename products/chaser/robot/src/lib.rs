mod chaser;
pub use chaser::*;

mod config;
pub use config::*;

mod drive;
pub use drive::*;

mod error;
pub use error::*;

mod feed;
pub use feed::*;

mod locator;
pub use locator::*;
