pub type FxResult<T> = Result<T, FxError>;

#[derive(thiserror::Error, Debug)]
pub enum FxError {
    #[error("surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("invalid viewport: {0}")]
    InvalidViewport(String),

    #[error("unknown scene: {0}")]
    UnknownScene(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FxError {
    pub fn surface_unavailable(msg: impl Into<String>) -> Self {
        Self::SurfaceUnavailable(msg.into())
    }

    pub fn invalid_viewport(msg: impl Into<String>) -> Self {
        Self::InvalidViewport(msg.into())
    }

    pub fn unknown_scene(msg: impl Into<String>) -> Self {
        Self::UnknownScene(msg.into())
    }
}
