pub type UishotResult<T> = Result<T, UishotError>;

#[derive(thiserror::Error, Debug)]
pub enum UishotError {
    #[error("config error: {0}")]
    Config(String),

    #[error("unknown value type: {0}")]
    UnknownType(String),

    #[error("malformed {kind} literal: '{literal}'")]
    MalformedValue { kind: &'static str, literal: String },

    #[error("unresolved widget type: {0}")]
    UnresolvedType(String),

    #[error("no constructor on '{type_name}' matches ({signature})")]
    NoMatchingConstructor {
        type_name: String,
        signature: String,
    },

    #[error("failed to construct '{type_name}': {cause}")]
    Construction { type_name: String, cause: String },

    #[error("output directory error: {0}")]
    OutputDirectory(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error("write error: {0}")]
    Write(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl UishotError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn output_directory(msg: impl Into<String>) -> Self {
        Self::OutputDirectory(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }
}
