use derive_more::Display;

/// Transport-level failures. Reported, never retried.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum ConnectionError {
    #[display(fmt = "failed to open connection: {}", _0)]
    OpenFailed(String),
    #[display(fmt = "connection dropped: {}", _0)]
    Dropped(String),
    #[display(fmt = "connection already active")]
    AlreadyActive,
    #[display(fmt = "browser context unavailable: {}", _0)]
    NoBrowserContext(String),
}

impl std::error::Error for ConnectionError {}

/// An inbound frame that could not be turned into a batch.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum DecodeError {
    #[display(fmt = "malformed frame: {}", _0)]
    Malformed(String),
    #[display(fmt = "frame has no `points` field")]
    MissingPoints,
    #[display(fmt = "frame carries an empty batch")]
    EmptyBatch,
    #[display(fmt = "binary frame is not valid UTF-8")]
    NotUtf8,
}

impl std::error::Error for DecodeError {}

#[derive(Debug, Clone, PartialEq, Display)]
#[display(fmt = "invalid configuration: {}", _0)]
pub struct ConfigError(pub String);

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Display)]
#[display(fmt = "rendering error: {}", _0)]
pub struct RenderError(pub String);

impl std::error::Error for RenderError {}

/// Top-level error for the wasm boundary
#[derive(Debug, Clone, PartialEq, Display)]
pub enum AppError {
    #[display(fmt = "Connection Error: {}", _0)]
    Connection(ConnectionError),
    #[display(fmt = "Decode Error: {}", _0)]
    Decode(DecodeError),
    #[display(fmt = "Config Error: {}", _0)]
    Config(ConfigError),
    #[display(fmt = "Rendering Error: {}", _0)]
    Rendering(RenderError),
}

impl std::error::Error for AppError {}

impl From<ConnectionError> for AppError {
    fn from(err: ConnectionError) -> Self {
        AppError::Connection(err)
    }
}

impl From<DecodeError> for AppError {
    fn from(err: DecodeError) -> Self {
        AppError::Decode(err)
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err)
    }
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        AppError::Rendering(err)
    }
}

impl From<AppError> for wasm_bindgen::JsValue {
    fn from(err: AppError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

pub type ConnectionResult<T> = Result<T, ConnectionError>;
pub type DecodeResult<T> = Result<T, DecodeError>;
pub type AppResult<T> = Result<T, AppError>;
