use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoamError {
    /// No elevation calibration is known for this many lasers.
    #[error("no ring calibration is available for a {0}-ring sensor")]
    UnsupportedScanCount(usize),
    #[error("ring model has {model} rings but the configuration expects {configured}")]
    ScanCountMismatch { configured: usize, model: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
