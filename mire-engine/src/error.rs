// error.rs - Error types
//
// Scene failures never reach the page; edit failures collapse to one
// message in the panel. Both keep their cause for logging.

pub type MireResult<T> = Result<T, MireError>;

#[derive(thiserror::Error, Debug)]
pub enum MireError {
    #[error("surface error: {0}")]
    Surface(String),

    #[error("config error: {0}")]
    Config(String),
}

impl MireError {
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Failures of the image-edit collaborator.
#[derive(thiserror::Error, Debug)]
pub enum EditError {
    #[error("API key is missing, set API_KEY")]
    MissingCredential,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("api returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("no image generated in response")]
    NoImage,
}

impl From<serde_json::Error> for EditError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(MireError::surface("x").to_string().contains("surface error:"));
        assert!(MireError::config("x").to_string().contains("config error:"));
        assert!(
            EditError::Transport("x".into())
                .to_string()
                .contains("transport error:")
        );
    }

    #[test]
    fn json_errors_become_decode_errors() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        assert!(matches!(EditError::from(err), EditError::Decode(_)));
    }
}
