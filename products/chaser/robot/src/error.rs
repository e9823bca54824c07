use std::fmt;

#[derive(Debug)]
pub enum ChaserError {
    Com(com::ComError),
    Image(image::ImageError),
}

impl fmt::Display for ChaserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChaserError::Com(err) => write!(f, "transport error: {err}"),
            ChaserError::Image(err) => write!(f, "image error: {err}"),
        }
    }
}

impl std::error::Error for ChaserError {}

impl From<com::ComError> for ChaserError {
    fn from(err: com::ComError) -> Self {
        ChaserError::Com(err)
    }
}

impl From<image::ImageError> for ChaserError {
    fn from(err: image::ImageError) -> Self {
        ChaserError::Image(err)
    }
}
