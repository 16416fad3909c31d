use std::sync::Arc;

use async_trait::async_trait;
use google_cloud_auth::project::Config;
use google_cloud_auth::token::DefaultTokenSourceProvider;
use google_cloud_token::{TokenSource, TokenSourceProvider};

use crate::services::itinerary_generation_service::PipelineError;

const GENERATIVE_LANGUAGE_SCOPE: &str = "https://www.googleapis.com/auth/generative-language";

/// "Get current bearer token" capability for the generation API. Injected
/// into the generative client so request handling never touches ambient
/// credential state.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, PipelineError>;
}

/// Service-account token source resolved through the standard Google
/// credential discovery (GOOGLE_APPLICATION_CREDENTIALS and friends).
/// Refresh cadence for the short-lived tokens is handled by the source.
pub struct GoogleTokenProvider {
    source: Arc<dyn TokenSource>,
}

impl GoogleTokenProvider {
    pub async fn new() -> Result<Self, PipelineError> {
        let scopes = [GENERATIVE_LANGUAGE_SCOPE];
        let config = Config {
            scopes: Some(&scopes),
            ..Default::default()
        };

        let provider = DefaultTokenSourceProvider::new(config).await.map_err(|e| {
            PipelineError::Auth(format!("Failed to load service account credentials: {}", e))
        })?;

        Ok(Self {
            source: provider.token_source(),
        })
    }
}

#[async_trait]
impl AccessTokenProvider for GoogleTokenProvider {
    async fn access_token(&self) -> Result<String, PipelineError> {
        let header = self
            .source
            .token()
            .await
            .map_err(|e| PipelineError::Auth(format!("Failed to acquire access token: {}", e)))?;

        // The source yields a ready-to-use Authorization header value.
        Ok(header
            .strip_prefix("Bearer ")
            .unwrap_or(header.as_str())
            .to_string())
    }
}
