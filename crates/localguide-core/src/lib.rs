//! Shared value types and configuration for the local recommendation assistant.

pub mod app_config;
pub mod config;
pub mod error;
pub mod geo;
pub mod place;
pub mod region;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, CoreError};
pub use geo::Coordinate;
pub use place::{Place, RankedResultSet};
pub use region::{prefer_matching, RegionPolicy, MAX_KEYWORD_CHARS};
