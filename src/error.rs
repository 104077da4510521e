extern crate image as image_rs;

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /** Calibration document is structurally wrong or carries unusable values */
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("calibration file {} could not be parsed: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error
    },

    /** Raster or matrix content violates a precondition of the operation */
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error
    },

    #[error("image error on {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image_rs::ImageError
    }
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Error {
        Error::Io { path: path.into(), source }
    }

    pub fn image(path: impl Into<PathBuf>, source: image_rs::ImageError) -> Error {
        Error::Image { path: path.into(), source }
    }

    pub fn is_configuration(&self) -> bool {
        match self {
            Error::Configuration(_) | Error::Yaml{..} => true,
            _ => false
        }
    }
}
