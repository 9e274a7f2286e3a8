//! Client settings and configuration structures.

use std::collections::BTreeSet;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::application::MessengerConfig;
use crate::domain::{ws_address, Colour, GameId, Roster};

/// Root configuration structure containing all client settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Matchmaker / judge endpoint to connect to at startup
    pub judge: EndpointSettings,

    /// Automated player channel
    pub ai: AiSettings,

    /// Session behaviour
    pub session: SessionSettings,

    /// Logging configuration
    pub log: LogSettings,

    /// Current environment (development, tournament, ...)
    pub environment: String,
}

/// A WebSocket endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointSettings {
    pub host: String,
    pub port: u16,
}

impl EndpointSettings {
    /// `ws://host:port`
    pub fn url(&self) -> String {
        ws_address(&self.host, self.port)
    }
}

/// Automated player configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AiSettings {
    /// Connect to the automated player at startup
    pub enabled: bool,

    pub host: String,

    pub port: u16,

    /// Colours the automated player controls
    pub colours: Vec<Colour>,
}

impl AiSettings {
    pub fn url(&self) -> String {
        ws_address(&self.host, self.port)
    }

    pub fn roster(&self) -> Roster {
        Roster::new(self.colours.iter().copied())
    }
}

/// Session behaviour.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    /// How long a reconnect may take to open, in milliseconds
    pub connect_timeout_ms: u64,

    /// Colour whose moves feed the ticket-history view
    pub visible_colour: Colour,

    /// Send JOIN as soon as a REGISTERED message arrives. When off, joining
    /// is left to code embedding the library through `GameMessenger::send_join`
    pub auto_join: bool,

    /// Game to spectate when the judge sends a CONNECTION message
    #[serde(default)]
    pub spectate_game: Option<GameId>,
}

impl SessionSettings {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// Default `EnvFilter` directive; `RUST_LOG` overrides it
    pub filter: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. config/default.toml (base configuration)
    /// 2. config/{RUN_ENV}.toml (environment-specific overrides)
    /// 3. Environment variables (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed,
    /// or if it fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        Self::builder(&environment)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // APP__JUDGE__PORT=8123 -> judge.port = 8123
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("ai.colours")
                    .try_parsing(true),
            )
            .set_override_option("judge.host", std::env::var("JUDGE_HOST").ok())?
            .set_override_option("judge.port", std::env::var("JUDGE_PORT").ok())?
            .set_override_option("ai.host", std::env::var("AI_HOST").ok())?
            .set_override_option("ai.port", std::env::var("AI_PORT").ok())?
            .build()?
            .try_deserialize()
            .and_then(Self::validated)
    }

    /// Built-in defaults only. Useful for tests and as the base layer of
    /// [`Settings::load`].
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder("development")?
            .build()?
            .try_deserialize()
            .and_then(Self::validated)
    }

    fn builder(
        environment: &str,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("environment", environment)?
            .set_default("judge.host", "localhost")?
            .set_default("judge.port", 8123)?
            .set_default("ai.enabled", false)?
            .set_default("ai.host", "localhost")?
            .set_default("ai.port", 8125)?
            .set_default("ai.colours", Vec::<String>::new())?
            .set_default("session.connect_timeout_ms", 10_000_i64)?
            .set_default("session.visible_colour", "Black")?
            .set_default("session.auto_join", true)?
            .set_default("log.filter", "info,yard_client=debug")?
            .set_default("log.json", false)
    }

    fn validated(settings: Self) -> Result<Self, ConfigError> {
        if settings.session.connect_timeout_ms == 0 {
            return Err(ConfigError::Message(
                "session.connect_timeout_ms must be greater than zero".into(),
            ));
        }

        let unique: BTreeSet<_> = settings.ai.colours.iter().collect();
        if unique.len() != settings.ai.colours.len() {
            return Err(ConfigError::Message(format!(
                "ai.colours lists a colour more than once: {:?}",
                settings.ai.colours
            )));
        }

        Ok(settings)
    }

    /// Messenger configuration derived from these settings. The roster is
    /// empty unless the automated player is enabled.
    pub fn messenger_config(&self) -> MessengerConfig {
        MessengerConfig {
            roster: if self.ai.enabled {
                self.ai.roster()
            } else {
                Roster::empty()
            },
            visible_colour: self.session.visible_colour,
            connect_timeout: self.session.connect_timeout(),
        }
    }
}
