use thiserror::Error;

/// Represents possible errors reported by the matching engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// A revise was submitted with an unknown order side.
    #[error("Order side invalid")]
    InvalidSide,
}

/// Represents possible errors when constructing a divergence monitor.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MonitorError {
    /// The divergence threshold must be strictly positive.
    #[error("threshold <= 0")]
    InvalidArgument,
}
