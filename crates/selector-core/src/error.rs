//! Error types for the selector core library
//!
//! Every transform, preset and the pipeline runner report failures through
//! [`Error`]. Lookup failures keep the offending instance type id, preset
//! failures keep the service name, and pipeline failures keep the name of the
//! transform that stopped the run.

use thiserror::Error;

/// Main error type for selector operations
#[derive(Error, Debug)]
pub enum Error {
    /// The catalog returned zero matches for a reference instance type
    #[error("Instance type lookup failed: {instance_type} is not a valid instance type")]
    InstanceTypeNotFound { instance_type: String },

    /// The catalog collaborator failed while describing an instance type
    #[error("Instance type lookup failed for {instance_type}: {source}")]
    Lookup {
        instance_type: String,
        #[source]
        source: anyhow::Error,
    },

    /// A service filter named a preset that was never registered
    #[error("Service {name} is not registered")]
    UnknownService { name: String },

    /// Preset filters could not be merged into the working filters
    #[error("Merge error: {message}")]
    Merge { message: String },

    /// An allow/deny pattern failed to compile
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A service preset failed to produce its filters
    #[error("Service preset {service} failed: {source}")]
    Preset {
        service: String,
        #[source]
        source: anyhow::Error,
    },

    /// A pipeline stage failed
    #[error("Transform '{transform}' failed: {source}")]
    Transform {
        transform: String,
        #[source]
        source: Box<Error>,
    },

    /// A preset version string could not be parsed
    #[error("Invalid version '{version}': {message}")]
    InvalidVersion { version: String, message: String },

    /// A memory quantity string could not be parsed
    #[error("Invalid byte quantity '{value}': {message}")]
    InvalidByteQuantity { value: String, message: String },

    /// A sort specification token could not be parsed
    #[error("Invalid sort specification '{token}': {message}")]
    InvalidSortSpec { token: String, message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// TOML parsing errors
    #[error("TOML error: {message}")]
    Toml {
        message: String,
        #[source]
        source: toml::de::Error,
    },

    /// YAML parsing errors
    #[error("YAML error: {message}")]
    Yaml {
        message: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the error came from the instance catalog (unknown id or transport failure)
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self.root_cause(),
            Error::InstanceTypeNotFound { .. } | Error::Lookup { .. }
        )
    }

    /// Whether the error points at a bug in a built-in preset rather than user input
    pub fn is_defect(&self) -> bool {
        matches!(self.root_cause(), Error::InvalidPattern { .. })
    }

    /// Unwrap pipeline wrappers down to the error that actually stopped the run
    pub fn root_cause(&self) -> &Error {
        let mut current = self;
        while let Error::Transform { source, .. } = current {
            current = source.as_ref();
        }
        current
    }

    /// Name of the pipeline stage that failed, if this error came from a pipeline
    pub fn failed_transform(&self) -> Option<&str> {
        match self {
            Error::Transform { transform, .. } => Some(transform),
            _ => None,
        }
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Toml {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Yaml {
            message: err.to_string(),
            source: err,
        }
    }
}
