use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Invalid {kind}: '{value}'")]
    InvalidEnum { kind: &'static str, value: String },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn user_not_found(id: impl Into<String>) -> Self {
        DomainError::NotFound {
            entity: "user",
            field: "id",
            value: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound { .. })
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_id() {
        let err = DomainError::user_not_found("USR-404");
        assert_eq!(err.to_string(), "Not found: user with id=USR-404");
        assert!(err.is_not_found());
    }

    #[test]
    fn invalid_enum_message() {
        let err = DomainError::InvalidEnum {
            kind: "role",
            value: "root".into(),
        };
        assert_eq!(err.to_string(), "Invalid role: 'root'");
        assert!(!err.is_not_found());
    }

    #[test]
    fn app_error_wraps_domain_transparently() {
        let err: AppError = DomainError::Validation("name is required".into()).into();
        assert_eq!(err.to_string(), "Validation: name is required");
    }
}
