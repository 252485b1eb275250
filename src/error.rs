use thiserror::Error;

pub type GanttResult<T> = Result<T, GanttError>;

#[derive(Debug, Error)]
pub enum GanttError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid interval for step #{index} `{name}`: end precedes start")]
    InvalidInterval { index: usize, name: String },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
