use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("cadastralNumber parameter is required")]
    MissingParameter,

    #[error("Method not allowed: {method}")]
    MethodNotAllowed { method: String },

    #[error("Plot not found: {error}")]
    NotFound { error: String, message: String },

    #[error("{service} API responded with status {code}")]
    UpstreamHttp { service: String, code: u16 },

    #[error("{service} API is unreachable: {reason}")]
    UpstreamUnavailable { service: String, reason: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        LookupError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for LookupError {
    fn from(err: std::io::Error) -> Self {
        LookupError::ConfigError {
            message: err.to_string(),
        }
    }
}

/// JSON body returned to the caller for every failed lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl LookupError {
    pub fn status_code(&self) -> u16 {
        match self {
            LookupError::MissingParameter => 400,
            LookupError::MethodNotAllowed { .. } => 405,
            LookupError::NotFound { .. } => 404,
            // passthrough, but only codes the gateway can actually emit
            LookupError::UpstreamHttp { code, .. } if (100..=599).contains(code) => *code,
            LookupError::UpstreamHttp { .. } => 502,
            LookupError::UpstreamUnavailable { .. } => 503,
            LookupError::Internal { .. }
            | LookupError::ConfigError { .. }
            | LookupError::InvalidConfigValueError { .. } => 500,
        }
    }

    pub fn error_body(&self) -> ErrorBody {
        let (error, message) = match self {
            LookupError::MissingParameter => (
                "Не указан кадастровый номер".to_string(),
                "Параметр cadastralNumber обязателен".to_string(),
            ),
            LookupError::MethodNotAllowed { method } => (
                "Метод не поддерживается".to_string(),
                format!("Метод {} не поддерживается, используйте GET", method),
            ),
            LookupError::NotFound { error, message } => (error.clone(), message.clone()),
            LookupError::UpstreamHttp { service, code } => (
                format!("Ошибка API {}", service),
                format!("Код ошибки: {}", code),
            ),
            LookupError::UpstreamUnavailable { service, .. } => (
                "Сервис временно недоступен".to_string(),
                format!("Не удалось подключиться к API {}", service),
            ),
            LookupError::Internal { message } => {
                ("Внутренняя ошибка сервера".to_string(), message.clone())
            }
            LookupError::ConfigError { .. } | LookupError::InvalidConfigValueError { .. } => {
                ("Внутренняя ошибка сервера".to_string(), self.to_string())
            }
        };
        ErrorBody { error, message }
    }

    /// Client-side failures are expected traffic; the rest deserve attention.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            LookupError::MissingParameter
                | LookupError::MethodNotAllowed { .. }
                | LookupError::NotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
