use super::*;
use std::time::Duration;

/// Published list of categories and candidate secret items
pub const GAME_OPTIONS_URL: &str = "https://gist.githubusercontent.com/prateekchaplot/8bf4ed2f7206c56d66ec73b776c1113a/raw/1efbf16242e65d3d782ceb4a948d7eccbf3fbdf8/imposter-detective.json";

/// Fetches the options mapping with a single GET
pub struct HttpOptionsProvider {
    url: String,
    client: reqwest::Client,
}

impl HttpOptionsProvider {
    pub fn new(url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });

        Self {
            url: url.into(),
            client,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for HttpOptionsProvider {
    fn default() -> Self {
        Self::new(GAME_OPTIONS_URL)
    }
}

#[async_trait]
impl OptionsProvider for HttpOptionsProvider {
    async fn fetch(&self) -> OptionsResult<GameOptions> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| OptionsError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OptionsError::Status(status.to_string()));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| OptionsError::Parse(e.to_string()))?;

        GameOptions::from_json(body)
    }

    fn name(&self) -> &str {
        "http"
    }
}
