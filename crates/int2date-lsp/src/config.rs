//! Server configuration read from LSP `initializationOptions`.

use serde::Deserialize;

/// Root configuration object.
///
/// ```json
/// { "hover": { "defaultLanguages": ["xml"], "markdown": false } }
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    pub hover: HoverConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct HoverConfig {
    /// Language ids with hover preview enabled at startup.
    pub default_languages: Vec<String>,
    /// Render hover contents as Markdown instead of plain text.
    pub markdown: bool,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            default_languages: vec!["xml".into()],
            markdown: false,
        }
    }
}

impl ServerConfig {
    /// Parses initialization options, falling back to defaults on bad input.
    pub fn from_init_options(options: Option<serde_json::Value>) -> Self {
        let Some(options) = options else {
            return Self::default();
        };

        match serde_json::from_value::<Self>(options) {
            Ok(config) => {
                tracing::debug!("loaded configuration: {:?}", config);
                config
            }
            Err(e) => {
                tracing::warn!("invalid initialization options, using defaults: {}", e);
                Self::default()
            }
        }
    }
}
