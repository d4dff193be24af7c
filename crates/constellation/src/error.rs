#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A field holds a value the pipeline cannot work with.
    InvalidValue { field: &'static str, reason: String },
    /// The projection plane sits too close to the sphere; points near the
    /// camera would blow up or flip sign under perspective division.
    ProjectionTooClose { distance: f64, max_extent: f64 },
    Parse(String),
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid config value for `{field}`: {reason}")
            }
            ConfigError::ProjectionTooClose {
                distance,
                max_extent,
            } => write!(
                f,
                "projection distance {distance} is too close to the scene (max extent {max_extent})"
            ),
            ConfigError::Parse(msg) => write!(f, "config parse error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
