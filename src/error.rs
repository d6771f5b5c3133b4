use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("could not read config file: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("could not parse config file: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("traffic controller must be created inside a tokio runtime")]
    NoRuntime,

    #[error("unknown direction '{0}'")]
    UnknownDirection(String),

    #[error("unknown movement type '{0}'")]
    UnknownMovement(String),
}

pub type SimResult<T> = Result<T, SimError>;
