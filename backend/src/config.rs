use std::net::SocketAddr;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Eco-routing backend with token-based sessions")]
pub struct Config {
    /// Address the HTTP server listens on
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:5000")]
    pub bind: SocketAddr,

    /// SQLite connection string for the user store (created if missing)
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://users.db")]
    pub database_url: String,

    /// HMAC secret used to sign session tokens. A random one is generated
    /// at startup when unset, which invalidates tokens on restart.
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// Lifetime of issued session tokens, in days
    #[arg(long, env = "TOKEN_TTL_DAYS", default_value_t = 7)]
    pub token_ttl_days: i64,
}

impl Config {
    pub fn signing_secret(&self) -> String {
        match &self.jwt_secret {
            Some(secret) => secret.clone(),
            None => {
                tracing::warn!("JWT_SECRET not set, generating an ephemeral signing secret");
                random_secret()
            }
        }
    }
}

/// 32 random bytes, URL-safe base64.
pub fn random_secret() -> String {
    let bytes: [u8; 32] = rand::random();
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // Read from the command definition so BIND_ADDR and friends in the
    // environment cannot leak in.
    fn default_of(id: &str) -> String {
        Config::command()
            .get_arguments()
            .find(|arg| arg.get_id() == id)
            .and_then(|arg| arg.get_default_values().first())
            .map(|value| value.to_string_lossy().into_owned())
            .unwrap_or_else(|| panic!("no default for {id}"))
    }

    #[test]
    fn declared_defaults() {
        assert_eq!(default_of("bind"), "0.0.0.0:5000");
        assert_eq!(default_of("database_url"), "sqlite://users.db");
        assert_eq!(default_of("token_ttl_days"), "7");
    }

    #[test]
    fn secret_has_no_default() {
        let command = Config::command();
        let secret = command
            .get_arguments()
            .find(|arg| arg.get_id() == "jwt_secret")
            .unwrap();
        assert!(secret.get_default_values().is_empty());
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "backend",
            "--bind",
            "127.0.0.1:9000",
            "--jwt-secret",
            "s3cret",
            "--token-ttl-days",
            "1",
        ])
        .unwrap();
        assert_eq!(config.bind.to_string(), "127.0.0.1:9000");
        assert_eq!(config.signing_secret(), "s3cret");
        assert_eq!(config.token_ttl_days, 1);
    }

    #[test]
    fn random_secrets_differ() {
        let a = random_secret();
        assert_eq!(a.len(), 43);
        assert_ne!(a, random_secret());
    }
}
