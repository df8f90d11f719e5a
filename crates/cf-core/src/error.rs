/// Unified error type for the engine's fallible edges.
///
/// Business-logic shortfalls (insufficient history, tied confluences) are
/// *not* errors — they resolve into a `None` signal. Only data access and
/// configuration loading can fail.
#[derive(Debug)]
pub enum EngineError {
    /// Upstream market-data source unreachable or rejected the request.
    Fetch(String),
    /// Upstream returned data the engine cannot interpret.
    Malformed(String),
    /// Configuration file could not be read or parsed.
    Config(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetch(msg) => write!(f, "fetch_error: {msg}"),
            Self::Malformed(msg) => write!(f, "malformed_data: {msg}"),
            Self::Config(msg) => write!(f, "config_error: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<reqwest::Error> for EngineError {
    fn from(e: reqwest::Error) -> Self {
        Self::Fetch(e.to_string())
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        Self::Malformed(e.to_string())
    }
}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<serde_yaml::Error> for EngineError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Config(format!("invalid YAML: {e}"))
    }
}
