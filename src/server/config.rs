use crate::server::error::config::ConfigError;

static DEFAULT_ESI_URL: &str = "https://esi.evetech.net/latest";
static DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

pub struct Config {
    pub contact_email: String,
    /// SSO application settings, only needed once a login flow is mounted.
    pub esi_client_id: Option<String>,
    pub esi_client_secret: Option<String>,
    pub esi_callback_url: Option<String>,
    pub database_url: String,
    pub esi_url: String,
    pub listen_addr: String,
    pub user_agent: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let contact_email = required("CONTACT_EMAIL")?;
        let user_agent = format!(
            "{}/{} ({})",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            contact_email
        );

        Ok(Self {
            esi_client_id: unset_if_missing("ESI_CLIENT_ID")?,
            esi_client_secret: unset_if_missing("ESI_CLIENT_SECRET")?,
            esi_callback_url: unset_if_missing("ESI_CALLBACK_URL")?,
            database_url: required("DATABASE_URL")?,
            esi_url: optional("ESI_URL", DEFAULT_ESI_URL)?
                .trim_end_matches('/')
                .to_string(),
            listen_addr: optional("LISTEN_ADDR", DEFAULT_LISTEN_ADDR)?,
            contact_email,
            user_agent,
        })
    }
}

fn required(var: &str) -> Result<String, ConfigError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        Ok(_) | Err(std::env::VarError::NotPresent) => {
            Err(ConfigError::MissingEnvVar(var.to_string()))
        }
        Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: "value is not valid unicode".to_string(),
        }),
    }
}

fn optional(var: &str, default: &str) -> Result<String, ConfigError> {
    match required(var) {
        Err(ConfigError::MissingEnvVar(_)) => Ok(default.to_string()),
        result => result,
    }
}

fn unset_if_missing(var: &str) -> Result<Option<String>, ConfigError> {
    match required(var) {
        Ok(value) => Ok(Some(value)),
        Err(ConfigError::MissingEnvVar(_)) => Ok(None),
        Err(e) => Err(e),
    }
}
