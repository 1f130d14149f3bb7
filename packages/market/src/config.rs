use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use secrecy::{ExposeSecret, SecretBox};
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use supabase_client::SupabaseClient;

pub const URL_VAR: &str = "SUPABASE_URL";
pub const ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";
/// Prefix the web build uses for the same variables.
pub const WEB_PREFIX: &str = "VITE_";

/// Values shipped in `.env.example` that must be replaced.
const PLACEHOLDERS: &[&str] = &["votre_url", "votre-projet-id", "votre_cle"];

fn is_placeholder(value: &str) -> bool {
    PLACEHOLDERS.iter().any(|p| value.contains(p))
}

/// Backend connection settings loaded from environment variables
pub struct Config {
    pub supabase_url: String,
    supabase_anon_key: SecretBox<str>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source. `SUPABASE_*` wins over `VITE_SUPABASE_*`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |name: &str| {
            lookup(name)
                .or_else(|| lookup(&format!("{WEB_PREFIX}{name}")))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let url = read(URL_VAR).context("SUPABASE_URL must be set")?;
        let key = read(ANON_KEY_VAR).context("SUPABASE_ANON_KEY must be set")?;

        if is_placeholder(&url) {
            bail!("SUPABASE_URL still holds the example placeholder");
        }
        if is_placeholder(&key) {
            bail!("SUPABASE_ANON_KEY still holds the example placeholder");
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            bail!("SUPABASE_URL must be an http(s) URL, got {url}");
        }

        Ok(Self {
            supabase_url: url,
            supabase_anon_key: SecretBox::new(Box::from(key.as_str())),
        })
    }

    pub fn anon_key(&self) -> &str {
        self.supabase_anon_key.expose_secret()
    }

    pub fn client(&self) -> SupabaseClient {
        SupabaseClient::new(self.supabase_url.clone(), self.anon_key())
    }
}

impl Clone for Config {
    fn clone(&self) -> Self {
        Self {
            supabase_url: self.supabase_url.clone(),
            supabase_anon_key: SecretBox::new(Box::from(self.anon_key())),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("supabase_url", &self.supabase_url)
            .field("supabase_anon_key", &"[REDACTED]")
            .finish()
    }
}

// =============================================================================
// Developer setup check
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStatus {
    Missing,
    Placeholder,
    Set,
}

/// What `.env` in a project directory provides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigReport {
    pub env_path: PathBuf,
    pub env_present: bool,
    pub url: KeyStatus,
    pub anon_key: KeyStatus,
}

impl ConfigReport {
    /// Read `dir/.env` without touching the process environment.
    pub fn inspect(dir: &Path) -> Result<Self> {
        let env_path = dir.join(".env");
        if !env_path.exists() {
            return Ok(Self {
                env_path,
                env_present: false,
                url: KeyStatus::Missing,
                anon_key: KeyStatus::Missing,
            });
        }

        let vars = dotenvy::from_path_iter(&env_path)
            .with_context(|| format!("Failed to open {}", env_path.display()))?
            .collect::<Result<HashMap<String, String>, _>>()
            .with_context(|| format!("Failed to parse {}", env_path.display()))?;

        let status = |name: &str| {
            let value = vars
                .get(name)
                .or_else(|| vars.get(&format!("{WEB_PREFIX}{name}")))
                .map(|v| v.trim())
                .filter(|v| !v.is_empty());
            match value {
                None => KeyStatus::Missing,
                Some(v) if is_placeholder(v) => KeyStatus::Placeholder,
                Some(_) => KeyStatus::Set,
            }
        };

        Ok(Self {
            url: status(URL_VAR),
            anon_key: status(ANON_KEY_VAR),
            env_path,
            env_present: true,
        })
    }

    pub fn is_ready(&self) -> bool {
        self.env_present && self.url == KeyStatus::Set && self.anon_key == KeyStatus::Set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn reads_plain_names() {
        let config = Config::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://abc.supabase.co"),
            ("SUPABASE_ANON_KEY", "eyJhbGciOi"),
        ]))
        .unwrap();
        assert_eq!(config.supabase_url, "https://abc.supabase.co");
        assert_eq!(config.anon_key(), "eyJhbGciOi");
    }

    #[test]
    fn accepts_web_prefixed_names() {
        let config = Config::from_lookup(lookup(&[
            ("VITE_SUPABASE_URL", "https://abc.supabase.co"),
            ("VITE_SUPABASE_ANON_KEY", "eyJhbGciOi"),
        ]))
        .unwrap();
        assert_eq!(config.supabase_url, "https://abc.supabase.co");
    }

    #[test]
    fn rejects_missing_and_placeholder_values() {
        assert!(Config::from_lookup(lookup(&[("SUPABASE_URL", "https://abc.supabase.co")])).is_err());

        let err = Config::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://votre-projet-id.supabase.co"),
            ("SUPABASE_ANON_KEY", "eyJhbGciOi"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("placeholder"));
    }

    #[test]
    fn debug_redacts_key() {
        let config = Config::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://abc.supabase.co"),
            ("SUPABASE_ANON_KEY", "super-secret"),
        ]))
        .unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("REDACTED"));
    }

    #[test]
    fn report_without_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let report = ConfigReport::inspect(dir.path()).unwrap();
        assert!(!report.env_present);
        assert_eq!(report.url, KeyStatus::Missing);
        assert!(!report.is_ready());
    }

    #[test]
    fn report_flags_placeholders() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(".env"),
            "VITE_SUPABASE_URL=https://votre-projet-id.supabase.co\nVITE_SUPABASE_ANON_KEY=votre_cle_anonyme_supabase\n",
        )
        .unwrap();

        let report = ConfigReport::inspect(dir.path()).unwrap();
        assert!(report.env_present);
        assert_eq!(report.url, KeyStatus::Placeholder);
        assert_eq!(report.anon_key, KeyStatus::Placeholder);
    }

    #[test]
    fn report_ready_when_both_keys_set() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(".env"),
            "SUPABASE_URL=https://abc.supabase.co\nSUPABASE_ANON_KEY=eyJhbGciOi\n",
        )
        .unwrap();

        let report = ConfigReport::inspect(dir.path()).unwrap();
        assert!(report.is_ready());
    }
}
