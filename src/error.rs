use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InertiaError {
    SerializationError(String),
    HeaderError(String),
    SsrError(String),
    TemplateError(String),
    /// Misconfiguration. Never retried, never recovered from.
    ConfigError(String),
}

impl InertiaError {
    pub fn get_cause(&self) -> String {
        match self {
            Self::SerializationError(cause) => cause.clone(),
            Self::HeaderError(cause) => cause.clone(),
            Self::SsrError(cause) => cause.clone(),
            Self::TemplateError(cause) => cause.clone(),
            Self::ConfigError(cause) => cause.clone(),
        }
    }
}

impl fmt::Display for InertiaError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind = match self {
            Self::SerializationError(_) => "serialization error",
            Self::HeaderError(_) => "header error",
            Self::SsrError(_) => "ssr error",
            Self::TemplateError(_) => "template error",
            Self::ConfigError(_) => "configuration error",
        };

        write!(f, "{}: {}", kind, self.get_cause())
    }
}

impl Error for InertiaError {}
