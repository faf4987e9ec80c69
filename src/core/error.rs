use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FleetError {
    #[error("Fleet size must be a positive integer, got {0}")]
    InvalidFleetSize(usize),

    #[error("Tick period must be positive, got {0:?}")]
    InvalidTickPeriod(Duration),

    #[error("Speed multiplier must be a positive finite number, got {0}")]
    InvalidSpeedMultiplier(f64),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FleetError>;
