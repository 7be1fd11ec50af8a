//! Centralized server configuration.
//!
//! Loaded via the `config` crate from environment variables, using `__` to
//! separate nesting levels (`BACKEND__ENDPOINT`, `GRAPH__URL`, ...).

use serde::Deserialize;
use spec_atlas_answer::HttpBackendConfig;

/// Server configuration composed from library configs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfig {
    /// Answering backend connection.
    #[serde(default)]
    pub backend: HttpBackendConfig,

    /// Graph surface location.
    #[serde(default)]
    pub graph: GraphConfig,
}

/// Where the graph document lives.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    /// URL the browser loads into the graph frame.
    #[serde(default = "default_graph_url")]
    pub url: String,

    /// Directory served under `/data`.
    #[serde(default = "default_graph_directory")]
    pub directory: String,
}

fn default_graph_url() -> String {
    "/data/graph.html".to_string()
}

fn default_graph_directory() -> String {
    "data".to_string()
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            url: default_graph_url(),
            directory: default_graph_directory(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_builder(config::Config::builder().add_source(
            config::Environment::default()
                .separator("__")
                .try_parsing(true),
        ))
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, config::ConfigError> {
        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_local_setup() {
        let config = ServerConfig::from_builder(config::Config::builder()).expect("config");
        assert_eq!(config.backend.endpoint, "http://localhost:5000/api/query");
        assert_eq!(config.backend.timeout_seconds, 60);
        assert_eq!(config.graph.url, "/data/graph.html");
        assert_eq!(config.graph.directory, "data");
    }

    #[test]
    fn nested_values_override_defaults() {
        let builder = config::Config::builder()
            .set_override("backend.endpoint", "http://answers:8080/api/query")
            .expect("override")
            .set_override("backend.timeout_seconds", 5_i64)
            .expect("override")
            .set_override("graph.url", "/data/rel18.html")
            .expect("override");

        let config = ServerConfig::from_builder(builder).expect("config");
        assert_eq!(config.backend.endpoint, "http://answers:8080/api/query");
        assert_eq!(config.backend.timeout_seconds, 5);
        assert_eq!(config.graph.url, "/data/rel18.html");
        assert_eq!(config.graph.directory, "data");
    }
}
