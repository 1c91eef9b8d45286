/// Host-environment failures of the terminal renderer
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("terminal is {width}x{height}, need at least {min_width}x{min_height}")]
    ViewportTooSmall {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },
}

pub type Result<T> = std::result::Result<T, TerminalError>;
