use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("coordinate out of range: lon={lon}, lat={lat}")]
    CoordinateOutOfRange { lon: f64, lat: f64 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
