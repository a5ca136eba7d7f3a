use common::config::{MediaConfig, StorageConfig};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

/// Basic-auth credentials guarding the admin API. Both must be set.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AdminConfig {
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl AdminConfig {
    /// `(user, password)` when both are configured and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let user = self.user.as_deref().filter(|s| !s.is_empty())?;
        let password = self.password.as_deref().filter(|s| !s.is_empty())?;
        Some((user, password))
    }
}

/// Contact form relay through the Resend email API.
#[derive(Debug, Deserialize, Clone)]
pub struct MailConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    /// Destination address for contact messages.
    #[serde(default)]
    pub contact_to: Option<String>,
    #[serde(default = "default_contact_from")]
    pub contact_from: String,
    #[serde(default = "default_mail_api_base")]
    pub api_base: String,
}

fn default_contact_from() -> String {
    "Portfolio <noreply@example.com>".into()
}
fn default_mail_api_base() -> String {
    "https://api.resend.com".into()
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            contact_to: None,
            contact_from: default_contact_from(),
            api_base: default_mail_api_base(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    /// Largest accepted image upload, in bytes.
    pub max_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub media: MediaConfig,
    #[serde(default)]
    pub mail: MailConfig,
    pub upload: UploadConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("upload.max_bytes", 25_000_000)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., KREO__ADMIN__PASSWORD)
            .add_source(
                Environment::with_prefix("KREO")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors.allow_origins")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }
}
