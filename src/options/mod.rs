mod http;

use async_trait::async_trait;
use std::collections::BTreeMap;

pub use http::{HttpOptionsProvider, GAME_OPTIONS_URL};

/// Result type for options loading
pub type OptionsResult<T> = Result<T, OptionsError>;

/// Errors that can occur while fetching the options list
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Failed to fetch game options: {0}")]
    Status(String),

    #[error("Response parsing failed: {0}")]
    Parse(String),

    #[error("Fetched game options are not in the expected format")]
    Format,
}

/// Candidate secret items grouped by category.
///
/// Category keys are stored lowercased so lookups are case-insensitive.
/// Ordered map so the pooled fallback is stable for a given input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameOptions {
    categories: BTreeMap<String, Vec<String>>,
}

impl GameOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, Vec<String>)>,
    {
        let mut categories: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (key, items) in entries {
            categories
                .entry(key.as_ref().trim().to_lowercase())
                .or_default()
                .extend(items);
        }
        Self { categories }
    }

    /// Build from a decoded JSON body. The body must be an object; entries
    /// whose value is not an array of strings are skipped.
    pub fn from_json(value: serde_json::Value) -> OptionsResult<Self> {
        let serde_json::Value::Object(map) = value else {
            return Err(OptionsError::Format);
        };

        let mut entries = Vec::with_capacity(map.len());
        for (key, value) in map {
            match serde_json::from_value::<Vec<String>>(value) {
                Ok(items) => entries.push((key, items)),
                Err(e) => {
                    tracing::warn!("Skipping options category '{}': {}", key, e);
                }
            }
        }

        Ok(Self::from_entries(entries))
    }

    /// Items for one category, or an empty slice if it is unknown
    pub fn category(&self, category: &str) -> &[String] {
        self.categories
            .get(&category.trim().to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every item across every category, in category order
    pub fn all_items(&self) -> impl Iterator<Item = &String> {
        self.categories.values().flatten()
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Resolved result of the one-time options fetch.
///
/// A failed fetch is recorded as an empty mapping plus the failure reason.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionsSnapshot {
    pub options: GameOptions,
    pub fetch_error: Option<String>,
}

impl OptionsSnapshot {
    pub fn loaded(options: GameOptions) -> Self {
        Self {
            options,
            fetch_error: None,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            options: GameOptions::new(),
            fetch_error: Some(reason.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OptionsState {
    #[default]
    Loading,
    Ready(OptionsSnapshot),
}

impl OptionsState {
    pub fn snapshot(&self) -> Option<&OptionsSnapshot> {
        match self {
            OptionsState::Loading => None,
            OptionsState::Ready(snapshot) => Some(snapshot),
        }
    }
}

/// Source of the category → items mapping
#[async_trait]
pub trait OptionsProvider: Send + Sync {
    async fn fetch(&self) -> OptionsResult<GameOptions>;

    /// Name used in log lines
    fn name(&self) -> &str;
}

/// Provider that always returns the same mapping
pub struct StaticOptionsProvider {
    options: GameOptions,
}

impl StaticOptionsProvider {
    pub fn new(options: GameOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl OptionsProvider for StaticOptionsProvider {
    async fn fetch(&self) -> OptionsResult<GameOptions> {
        Ok(self.options.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// Fetch options once, degrading any failure to an empty mapping
pub async fn load_options(provider: &dyn OptionsProvider) -> OptionsSnapshot {
    match provider.fetch().await {
        Ok(options) => {
            tracing::info!(
                "Loaded {} option categories from {}",
                options.categories.len(),
                provider.name()
            );
            OptionsSnapshot::loaded(options)
        }
        Err(e) => {
            tracing::warn!("Error fetching game options from {}: {}", provider.name(), e);
            OptionsSnapshot::failed(e.to_string())
        }
    }
}
