// src/app.rs

use anyhow::Result;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::handlers::health::health;
use crate::handlers::person::create_person;
use crate::i18n::{AcceptHeaderLocaleResolver, BundleMessageSource, MessageSource};
use crate::responder::ErrorResponder;

/// État partagé par les routes
#[derive(Clone)]
pub struct AppState {
    pub responder: ErrorResponder,
    pub locales: Arc<AcceptHeaderLocaleResolver>,
}

impl AppState {
    pub fn new(messages: Arc<dyn MessageSource>, locales: AcceptHeaderLocaleResolver) -> Self {
        Self {
            responder: ErrorResponder::new(messages),
            locales: Arc::new(locales),
        }
    }

    /// Charge les bundles de messages et prépare la résolution de locale
    pub fn from_config(config: &Config) -> Result<Self> {
        let messages = match &config.messages_dir {
            Some(dir) => BundleMessageSource::from_dir(dir, &config.messages_basename)?,
            None => BundleMessageSource::embedded()?,
        };

        let supported = messages.locales();
        tracing::info!(
            default_locale = %config.default_locale,
            supported = ?supported.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "Locales configured"
        );

        let locales = AcceptHeaderLocaleResolver::new(config.default_locale.clone(), supported);
        Ok(Self::new(Arc::new(messages), locales))
    }
}

/// Configure les routes des personnes
pub fn person_routes() -> Router<AppState> {
    Router::new().route("/people", post(create_person))
}

/// Construit l'application complète
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(person_routes())
        // Middleware global de tracing
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
