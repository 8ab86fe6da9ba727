use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    #[error("malformed colour {0:?}, expected #rrggbb")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("particle count must be at least 1")]
    NoParticles,

    #[error("invalid engine parameter {name} = {value}")]
    InvalidParameter { name: &'static str, value: f32 },

    #[error("{positions} positions but {targets} targets")]
    LengthMismatch { positions: usize, targets: usize },

    #[error("particle {index} has a non-finite {field}")]
    NonFinite { index: usize, field: &'static str },

    #[error(transparent)]
    Color(#[from] ColorError),
}
