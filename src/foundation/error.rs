pub type PinResult<T> = Result<T, PinError>;

#[derive(thiserror::Error, Debug)]
pub enum PinError {
    /// The service cannot run at all (e.g. missing upstream credential).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A request was rejected before any rendering work started.
    #[error("validation error: {0}")]
    Validation(String),

    /// The base-image collaborator failed (auth, non-success, poll timeout).
    #[error("upstream error: {0}")]
    Upstream(String),

    /// A failure inside the layout/compositing core.
    #[error("render error: {0}")]
    Render(String),

    /// The output sink could not persist the final raster.
    #[error("storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PinError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            PinError::configuration("x")
                .to_string()
                .contains("configuration error:")
        );
        assert!(
            PinError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            PinError::upstream("x")
                .to_string()
                .contains("upstream error:")
        );
        assert!(PinError::render("x").to_string().contains("render error:"));
        assert!(
            PinError::storage("x")
                .to_string()
                .contains("storage error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = PinError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
