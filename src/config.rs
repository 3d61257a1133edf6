use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use crate::i18n::Locale;

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Détecte automatiquement l'environnement
    pub fn detect() -> Self {
        Self::from_vars(
            env::var("AWS_LAMBDA_FUNCTION_NAME").ok().as_deref(),
            env::var("APP_ENV").ok().as_deref(),
        )
    }

    fn from_vars(lambda_function: Option<&str>, app_env: Option<&str>) -> Self {
        // Méthode 1: on tourne dans AWS Lambda
        if lambda_function.is_some() {
            return Self::Production;
        }

        // Méthode 2: variable APP_ENV
        match app_env {
            Some("production" | "prod") => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub server_host: String,
    pub server_port: u16,
    pub default_locale: Locale,
    /// Directory of `.properties` bundles; embedded bundles when unset
    pub messages_dir: Option<PathBuf>,
    pub messages_basename: String,
}

impl Config {
    /// Charge la configuration depuis les variables d'environnement
    /// avec détection automatique de l'environnement
    pub fn from_env() -> Result<Self> {
        let environment = Environment::detect();

        tracing::info!(
            "🌍 Environment detected: {}",
            environment.as_str().to_uppercase()
        );

        Self::load_env_file(&environment);

        let config = Self::from_lookup(environment, |key| env::var(key).ok())?;

        tracing::info!("✅ Configuration loaded successfully");
        tracing::debug!("   Server: {}:{}", config.server_host, config.server_port);
        tracing::debug!("   Default locale: {}", config.default_locale);
        match &config.messages_dir {
            Some(dir) => tracing::debug!("   Messages: {}/{}*", dir.display(), config.messages_basename),
            None => tracing::debug!("   Messages: embedded bundles"),
        }

        Ok(config)
    }

    /// Construit la configuration à partir d'une source de variables
    fn from_lookup(
        environment: Environment,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let server_host = lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let server_port = match lookup("SERVER_PORT") {
            Some(port) => port
                .parse()
                .with_context(|| format!("SERVER_PORT must be a port number, got {port:?}"))?,
            None => 3000,
        };
        let default_locale = match lookup("DEFAULT_LOCALE") {
            Some(tag) => tag.parse().context("DEFAULT_LOCALE is not a valid locale")?,
            None => Locale::new("en", None),
        };
        let messages_dir = lookup("MESSAGES_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);
        let messages_basename =
            lookup("MESSAGES_BASENAME").unwrap_or_else(|| "messages".to_string());

        if environment.is_production() && messages_dir.as_ref().is_some_and(|dir| !dir.is_dir()) {
            anyhow::bail!("MESSAGES_DIR must point to an existing directory in production");
        }

        Ok(Self {
            environment,
            server_host,
            server_port,
            default_locale,
            messages_dir,
            messages_basename,
        })
    }

    /// Charge le fichier .env en développement
    fn load_env_file(environment: &Environment) {
        // En production (Lambda), les variables sont déjà injectées
        if environment.is_production() {
            tracing::info!("📦 Production mode: using injected environment variables");
            return;
        }

        match dotenvy::dotenv() {
            Ok(path) => tracing::info!("📦 Development mode: loaded {}", path.display()),
            Err(_) => tracing::warn!("   .env file not found, using environment variables"),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
