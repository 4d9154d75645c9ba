use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("map dimensions [{width}x{height}] must both be at least {min}")]
    MapTooSmall { width: u32, height: u32, min: u32 },
    #[error("invalid leaf sizes: min {min}, max {max}")]
    InvalidLeafSizes { min: u32, max: u32 },
    #[error("invalid room sizes: min {min}, max {max} (leaves are at least {leaf_min} wide)")]
    InvalidRoomSizes { min: u32, max: u32, leaf_min: u32 },
    #[error("probability `{name}` must be within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
}
