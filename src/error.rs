use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The host chart rejected a bridge call (price line create/update/remove).
    #[error("host chart bridge failure: {0}")]
    HostBridge(String),

    #[error("overlay surface failure: {0}")]
    Surface(String),
}
