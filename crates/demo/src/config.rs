//! Demo configuration, read from the environment.

pub const OUTPUT_VAR: &str = "SHELFKEEP_OUTPUT";

/// How query results are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable console lines.
    #[default]
    Text,
    /// One JSON document per query result.
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemoConfig {
    pub output: OutputMode,
}

impl DemoConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let output = match lookup(OUTPUT_VAR) {
            None => OutputMode::default(),
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "text" => OutputMode::Text,
                "json" => OutputMode::Json,
                _ => {
                    tracing::warn!(value = %raw, "{OUTPUT_VAR} not recognised; using text");
                    OutputMode::Text
                }
            },
        };
        Self { output }
    }
}
