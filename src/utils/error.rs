use thiserror::Error;

/// Remote control-plane error, reduced to what the lifecycle adapter needs to branch on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("ResourceNotFoundException: {message}")]
    NotFound { message: String },

    #[error("{code}: {message}")]
    Service { code: String, message: String },

    #[error("transport error: {message}")]
    Transport { message: String },
}

impl ApiError {
    pub const NOT_FOUND_CODE: &'static str = "ResourceNotFoundException";

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound {
            message: message.into(),
        }
    }

    pub fn service(code: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Service {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        ApiError::Transport {
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::NotFound { .. } => Some(Self::NOT_FOUND_CODE),
            ApiError::Service { code, .. } => Some(code),
            ApiError::Transport { .. } => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum AssociationError {
    #[error("Error associating package ({package_id}) with domain ({domain_name}): {source}")]
    AssociateError {
        package_id: String,
        domain_name: String,
        #[source]
        source: ApiError,
    },

    #[error("Error describing package ({package_id}): {source}")]
    DescribeError {
        package_id: String,
        #[source]
        source: ApiError,
    },

    #[error("Error reading package: {source}")]
    ReadError {
        #[source]
        source: ApiError,
    },

    #[error("Error deleting package ({package_id}): {source}")]
    DeleteError {
        package_id: String,
        #[source]
        source: ApiError,
    },

    #[error("Error dissociating package ({package_id}) from domain ({domain_name}): {source}")]
    DissociateError {
        package_id: String,
        domain_name: String,
        #[source]
        source: ApiError,
    },

    #[error("unexpected number of packages returned: {count}")]
    UnexpectedPackageCount { count: usize },

    #[error("Associate response for package ({package_id}) carried no association details")]
    MissingAssociationDetails { package_id: String },

    #[error("Resource has no identity; create it first")]
    MissingIdentity,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration parse error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    RemoteApi,
    State,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AssociationError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AssociationError::ConfigError { .. }
            | AssociationError::MissingConfigError { .. }
            | AssociationError::InvalidConfigValueError { .. }
            | AssociationError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            AssociationError::AssociateError { .. }
            | AssociationError::DescribeError { .. }
            | AssociationError::ReadError { .. }
            | AssociationError::DeleteError { .. }
            | AssociationError::DissociateError { .. }
            | AssociationError::UnexpectedPackageCount { .. }
            | AssociationError::MissingAssociationDetails { .. } => ErrorCategory::RemoteApi,
            AssociationError::MissingIdentity | AssociationError::SerializationError(_) => {
                ErrorCategory::State
            }
            AssociationError::IoError(_) => ErrorCategory::System,
        }
    }

    /// 根據錯誤類型決定嚴重程度 (CLI 退出碼依此決定)
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AssociationError::MissingIdentity => ErrorSeverity::Low,
            AssociationError::AssociateError { source, .. }
            | AssociationError::DescribeError { source, .. }
            | AssociationError::ReadError { source }
            | AssociationError::DeleteError { source, .. }
            | AssociationError::DissociateError { source, .. } => match source {
                ApiError::Transport { .. } => ErrorSeverity::Medium,
                _ => ErrorSeverity::High,
            },
            AssociationError::UnexpectedPackageCount { .. }
            | AssociationError::MissingAssociationDetails { .. } => ErrorSeverity::High,
            AssociationError::ConfigError { .. }
            | AssociationError::MissingConfigError { .. }
            | AssociationError::InvalidConfigValueError { .. }
            | AssociationError::ConfigValidationError { .. } => ErrorSeverity::High,
            AssociationError::IoError(_) | AssociationError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AssociationError::AssociateError { .. } => {
                "Check that both the domain and the package exist in the same region and the package is available"
            }
            AssociationError::DescribeError { .. } | AssociationError::ReadError { .. } => {
                "Verify credentials and region, then re-run read"
            }
            AssociationError::DeleteError { .. } | AssociationError::DissociateError { .. } => {
                "The package may already be gone or still associated with a domain; inspect it in the console"
            }
            AssociationError::UnexpectedPackageCount { .. } => {
                "The package filter matched more than one package; inspect the package catalog"
            }
            AssociationError::MissingAssociationDetails { .. } => {
                "Re-run read to refresh state from the package catalog"
            }
            AssociationError::MissingIdentity => "Run create before read or delete",
            AssociationError::ConfigError { .. }
            | AssociationError::MissingConfigError { .. }
            | AssociationError::InvalidConfigValueError { .. }
            | AssociationError::ConfigValidationError { .. } => {
                "Fix the configuration file or command line arguments"
            }
            AssociationError::IoError(_) => "Check permissions on the state file path",
            AssociationError::SerializationError(_) => {
                "The state file is corrupt; remove it and import the resource again"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::RemoteApi => format!("Search service API call failed: {}", self),
            ErrorCategory::State => format!("Resource state problem: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    /// The underlying remote error, when this error wraps one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            AssociationError::AssociateError { source, .. }
            | AssociationError::DescribeError { source, .. }
            | AssociationError::ReadError { source }
            | AssociationError::DeleteError { source, .. }
            | AssociationError::DissociateError { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AssociationError>;
