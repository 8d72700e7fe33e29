use thiserror::Error;

#[derive(Debug, Error)]
pub enum StopwatchError {
    #[error("no high-resolution counter available: {reason}")]
    PlatformUnsupported { reason: &'static str },
}
