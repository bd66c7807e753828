//! Global configuration.
//!
//! Read once from `direct-chat.toml` in the working directory. If the file doesn't exist,
//! defaults are used and a random secret key is generated, which means sessions issued
//! by another process can't be decrypted.
//!
//! The Upstash credentials can also be passed with the `UPSTASH_REDIS_REST_URL` and
//! `UPSTASH_REDIS_REST_TOKEN` environment variables, which take precedence over the file.
use aes::Aes128;
use aes_gcm_siv::{AesGcmSiv, Key};
use once_cell::sync::OnceCell;
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use std::env::var;
use std::fs::read_to_string;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::Duration;
use tracing::info;

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Name of the configuration file.
pub const CONFIG_FILE: &str = "direct-chat.toml";

#[derive(Error, Debug)]
pub enum Error {
    #[error("config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("config file not readable: {0}")]
    Io(#[from] std::io::Error),

    #[error("secret key is not valid base64")]
    Base64(#[from] base64::DecodeError),

    #[error("secret key must be 128 bits")]
    SecretKey,

    #[error("config is already loaded")]
    ConfigLoaded,
}

/// Global configuration.
pub struct Config {
    path: Option<PathBuf>,
    /// AES-128 key used to encrypt session cookies.
    pub aes_key: Key<AesGcmSiv<Aes128>>,
    pub general: General,
    pub store: Store,
}

pub struct General {
    pub host: String,
    pub port: u16,
    /// Stderr is a terminal, so logs can be colored.
    pub tty: bool,
    /// Longest accepted request line or header, in bytes.
    pub header_max_size: usize,
    pub session_duration: Duration,
}

/// Upstash Redis REST endpoint.
#[derive(Clone)]
pub struct Store {
    pub url: Option<String>,
    pub token: Option<String>,
    pub timeout: std::time::Duration,
}

impl Default for General {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
            tty: std::io::stderr().is_terminal(),
            header_max_size: 16 * 1024,
            session_duration: Duration::days(4),
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self {
            url: None,
            token: None,
            timeout: std::time::Duration::from_secs(5),
        }
    }
}

impl Store {
    fn from_env(&mut self) {
        if let Ok(url) = var("UPSTASH_REDIS_REST_URL") {
            self.url = Some(url);
        }

        if let Ok(token) = var("UPSTASH_REDIS_REST_TOKEN") {
            self.token = Some(token);
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut secret_key = [0u8; 128 / 8];
        OsRng.fill_bytes(&mut secret_key);

        let mut store = Store::default();
        store.from_env();

        Self {
            path: None,
            aes_key: Key::<AesGcmSiv<Aes128>>::clone_from_slice(&secret_key),
            general: General::default(),
            store,
        }
    }
}

impl Config {
    /// Load configuration from `direct-chat.toml`, if it exists.
    pub fn load() -> Result<Config, Error> {
        let path = PathBuf::from(CONFIG_FILE);

        if path.exists() {
            Self::load_file(&path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load configuration from a specific file.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Config, Error> {
        let file = ConfigFile::load(path.as_ref())?;
        let mut config = Config::default();

        if let Some(secret_key) = file.general.secret_key()? {
            config.aes_key = Key::<AesGcmSiv<Aes128>>::clone_from_slice(&secret_key);
        }

        config.path = Some(path.as_ref().to_path_buf());
        config.general.host = file.general.host;
        config.general.port = file.general.port;
        config.general.header_max_size = file.general.header_max_size;
        config.general.session_duration = Duration::seconds(file.general.session_duration);

        config.store.url = file.store.url;
        config.store.token = file.store.token;
        config.store.timeout = std::time::Duration::from_secs(file.store.timeout);
        config.store.from_env();

        Ok(config)
    }

    /// Install this configuration globally. Fails if the configuration
    /// has already been read by someone.
    pub fn set(self) -> Result<(), Error> {
        CONFIG.set(self).map_err(|_| Error::ConfigLoaded)
    }

    /// File the configuration was loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn log_info(&self) {
        match self.path {
            Some(ref path) => info!("Configuration loaded from \"{}\"", path.display()),
            None => info!("Configuration file missing, using defaults"),
        }
    }
}

/// Get the global configuration, loading it on first access.
pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(|| Config::load().unwrap_or_default())
}

#[derive(Serialize, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    general: GeneralFile,
    #[serde(default)]
    store: StoreFile,
}

impl ConfigFile {
    fn load(path: &Path) -> Result<ConfigFile, Error> {
        let file = read_to_string(path)?;
        let config: Self = toml::from_str(&file)?;

        Ok(config)
    }
}

#[derive(Serialize, Deserialize)]
struct GeneralFile {
    #[serde(default = "GeneralFile::default_host")]
    host: String,
    #[serde(default = "GeneralFile::default_port")]
    port: u16,
    secret_key: Option<String>,
    #[serde(default = "GeneralFile::default_header_max_size")]
    header_max_size: usize,
    #[serde(default = "GeneralFile::default_session_duration")]
    session_duration: i64,
}

impl Default for GeneralFile {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            secret_key: None,
            header_max_size: Self::default_header_max_size(),
            session_duration: Self::default_session_duration(),
        }
    }
}

impl GeneralFile {
    fn secret_key(&self) -> Result<Option<Vec<u8>>, Error> {
        use base64::{engine::general_purpose, Engine as _};

        let Some(ref secret_key) = self.secret_key else {
            return Ok(None);
        };

        let bytes = general_purpose::STANDARD.decode(secret_key)?;

        if bytes.len() == 128 / 8 {
            Ok(Some(bytes))
        } else {
            Err(Error::SecretKey)
        }
    }

    fn default_host() -> String {
        "0.0.0.0".into()
    }

    fn default_port() -> u16 {
        8000
    }

    fn default_header_max_size() -> usize {
        16 * 1024
    }

    fn default_session_duration() -> i64 {
        Duration::days(4).whole_seconds()
    }
}

#[derive(Serialize, Deserialize)]
struct StoreFile {
    url: Option<String>,
    token: Option<String>,
    #[serde(default = "StoreFile::default_timeout")]
    timeout: u64,
}

impl Default for StoreFile {
    fn default() -> Self {
        Self {
            url: None,
            token: None,
            timeout: Self::default_timeout(),
        }
    }
}

impl StoreFile {
    fn default_timeout() -> u64 {
        5
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs::write;
    use tempdir::TempDir;

    #[test]
    fn test_load_file() {
        let dir = TempDir::new("direct-chat").expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        write(
            &path,
            r#"
            [general]
            port = 9090
            secret_key = "AAECAwQFBgcICQoLDA0ODw=="

            [store]
            url = "https://example.upstash.io"
            timeout = 2
            "#,
        )
        .expect("write config");

        let config = Config::load_file(&path).expect("load");
        assert_eq!(config.general.port, 9090);
        assert_eq!(config.general.host, "0.0.0.0");
        assert_eq!(config.aes_key.as_slice(), &(0u8..16).collect::<Vec<_>>()[..]);
        assert_eq!(config.store.timeout, std::time::Duration::from_secs(2));
        assert_eq!(config.general.session_duration, Duration::days(4));
    }

    #[test]
    fn test_bad_secret_key() {
        let dir = TempDir::new("direct-chat").expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        write(&path, "[general]\nsecret_key = \"c2hvcnQ=\"\n").expect("write config");

        assert!(matches!(Config::load_file(&path), Err(Error::SecretKey)));
    }
}
