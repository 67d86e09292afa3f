use crate::auth::TokenService;
use crate::classifier::{Classifier, OpenAiClassifier};
use crate::config::ServerConfig;
use crate::recommend::recommendation_limit;
use anyhow::Result;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<ServerConfig>,
    pub tokens: Arc<TokenService>,
    pub classifier: Arc<dyn Classifier>,
}

impl AppState {
    /// Create a new app state backed by the configured classifier service
    pub fn new(pool: PgPool, config: ServerConfig) -> Result<Self> {
        let classifier = OpenAiClassifier::new(&config.classifier)?;
        let tokens = TokenService::new(&config.auth.jwt_secret, &config.auth.refresh_secret);
        Ok(Self {
            pool,
            config: Arc::new(config),
            tokens: Arc::new(tokens),
            classifier: Arc::new(classifier),
        })
    }

    /// Swap the review classifier (used to stub the external service)
    pub fn with_classifier(mut self, classifier: Arc<dyn Classifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn recommendation_limit(&self) -> i64 {
        recommendation_limit(self.config.recommended_movie_limit.as_deref())
    }
}
