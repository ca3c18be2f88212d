// ============================================================================
// Configuration
// ============================================================================
// Paramètres lus depuis les variables d'environnement, avec des valeurs
// par défaut raisonnables pour un usage local. Un fichier .env est lu
// au démarrage s'il existe (dotenvy).
//
// Variables reconnues :
// - LAZYCART_API_URL       : URL du backend (défaut http://localhost:8080)
// - LAZYCART_DATA_DIR      : dossier du profil local
// - LAZYCART_LOG_DIR       : dossier des logs
// - LAZYCART_TIMEOUT_SECS  : timeout HTTP en secondes (défaut 10)
// - LAZYCART_SYNC_POLICY   : keep-local | roll-back
// ============================================================================

use std::env::{self, VarError};
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, bail, Result};
use tracing::info;

/// URL du backend par défaut
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Timeout HTTP par défaut
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Que faire des totaux locaux quand l'envoi d'une économie au backend échoue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPolicy {
    /// Garder la mise à jour optimiste (le backend sera en retard)
    #[default]
    KeepLocal,
    /// Annuler le crédit local pour rester aligné avec le backend
    RollBack,
}

impl FromStr for SyncPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "keep-local" | "keep_local" | "keep" => Ok(SyncPolicy::KeepLocal),
            "roll-back" | "rollback" | "roll_back" => Ok(SyncPolicy::RollBack),
            other => Err(anyhow!("unknown sync policy '{other}'")),
        }
    }
}

/// Configuration de l'application
#[derive(Debug, Clone)]
pub struct Config {
    /// URL de base du backend (sans slash final)
    pub api_base_url: String,

    /// Dossier contenant le blob du profil
    pub data_dir: PathBuf,

    /// Dossier des fichiers de logs
    pub log_dir: PathBuf,

    /// Timeout des requêtes HTTP
    pub timeout_secs: u64,

    /// Politique de réconciliation des économies
    pub sync_policy: SyncPolicy,
}

impl Config {
    /// Charge la configuration depuis l'environnement
    ///
    /// Un fichier `.env` du dossier courant est lu d'abord s'il existe
    /// (les variables déjà exportées restent prioritaires).
    ///
    /// # Erreurs
    /// Une variable présente mais invalide est une erreur (pas de repli
    /// silencieux sur la valeur par défaut).
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key))
    }

    /// Construit la configuration à partir d'une fonction de lecture
    ///
    /// Séparé de `load()` pour tester avec une HashMap, sans toucher à
    /// l'environnement du processus. Ne logue rien : le logging n'est pas
    /// encore initialisé à ce stade, voir `log_resolved()`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        // Une variable vide compte comme absente
        let var = |key: &str| lookup(key).ok().filter(|v| !v.trim().is_empty());

        let base_dir = default_base_dir();

        let api_base_url = var("LAZYCART_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let data_dir = var("LAZYCART_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| base_dir.join("data"));

        let log_dir = var("LAZYCART_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| base_dir.join("logs"));

        let timeout_secs = parse_or_default(
            "LAZYCART_TIMEOUT_SECS",
            var("LAZYCART_TIMEOUT_SECS"),
            DEFAULT_TIMEOUT_SECS,
        )?;
        if timeout_secs == 0 {
            bail!("invalid value for LAZYCART_TIMEOUT_SECS: must be at least 1");
        }
        let sync_policy = parse_or_default(
            "LAZYCART_SYNC_POLICY",
            var("LAZYCART_SYNC_POLICY"),
            SyncPolicy::default(),
        )?;

        Ok(Self {
            api_base_url,
            data_dir,
            log_dir,
            timeout_secs,
            sync_policy,
        })
    }

    /// Logue la configuration retenue (à appeler après init_logging)
    pub fn log_resolved(&self) {
        info!(
            api = %self.api_base_url,
            data_dir = %self.data_dir.display(),
            log_dir = %self.log_dir.display(),
            timeout_secs = self.timeout_secs,
            sync_policy = %self.sync_policy,
            "Configuration loaded"
        );
    }

    /// Configuration pointant vers un backend donné (tests, outils)
    pub fn with_api_url(api_base_url: impl Into<String>, data_dir: PathBuf) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            log_dir: data_dir.join("logs"),
            data_dir,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            sync_policy: SyncPolicy::default(),
        }
    }
}

/// ~/.local/share/lazycart sur Linux, ./lazycart si introuvable
fn default_base_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lazycart")
}

fn parse_or_default<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match raw {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("invalid value for {key} ('{raw}'): {e}")),
        None => Ok(default),
    }
}

impl Display for SyncPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncPolicy::KeepLocal => write!(f, "keep-local"),
            SyncPolicy::RollBack => write!(f, "roll-back"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_sync_policy_from_str() {
        assert_eq!("keep-local".parse::<SyncPolicy>().unwrap(), SyncPolicy::KeepLocal);
        assert_eq!("ROLLBACK".parse::<SyncPolicy>().unwrap(), SyncPolicy::RollBack);
        assert!("sometimes".parse::<SyncPolicy>().is_err());
    }

    #[test]
    fn test_sync_policy_display_roundtrip() {
        for policy in [SyncPolicy::KeepLocal, SyncPolicy::RollBack] {
            assert_eq!(policy.to_string().parse::<SyncPolicy>().unwrap(), policy);
        }
    }

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn test_from_lookup_defaults() {
        let map = HashMap::new();
        let config = Config::from_lookup(lookup_from_map(&map)).unwrap();

        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.sync_policy, SyncPolicy::KeepLocal);
        assert!(config.data_dir.ends_with("lazycart/data"));
        assert!(config.log_dir.ends_with("lazycart/logs"));
    }

    #[test]
    fn test_from_lookup_reads_values() {
        let map = HashMap::from([
            ("LAZYCART_API_URL", "http://192.168.1.20:8080/"),
            ("LAZYCART_DATA_DIR", "/tmp/lc/data"),
            ("LAZYCART_LOG_DIR", "/tmp/lc/logs"),
            ("LAZYCART_TIMEOUT_SECS", " 30 "),
            ("LAZYCART_SYNC_POLICY", "roll-back"),
        ]);
        let config = Config::from_lookup(lookup_from_map(&map)).unwrap();

        assert_eq!(config.api_base_url, "http://192.168.1.20:8080");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/lc/data"));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/lc/logs"));
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.sync_policy, SyncPolicy::RollBack);
    }

    #[test]
    fn test_from_lookup_blank_values_use_defaults() {
        let map = HashMap::from([("LAZYCART_API_URL", "   "), ("LAZYCART_TIMEOUT_SECS", "")]);
        let config = Config::from_lookup(lookup_from_map(&map)).unwrap();

        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_from_lookup_rejects_bad_timeout() {
        let map = HashMap::from([("LAZYCART_TIMEOUT_SECS", "ten")]);
        let err = Config::from_lookup(lookup_from_map(&map)).unwrap_err();
        assert!(err.to_string().contains("LAZYCART_TIMEOUT_SECS"), "{err}");

        let map = HashMap::from([("LAZYCART_TIMEOUT_SECS", "0")]);
        assert!(Config::from_lookup(lookup_from_map(&map)).is_err());
    }

    #[test]
    fn test_from_lookup_rejects_bad_sync_policy() {
        let map = HashMap::from([("LAZYCART_SYNC_POLICY", "sometimes")]);
        let err = Config::from_lookup(lookup_from_map(&map)).unwrap_err();
        assert!(err.to_string().contains("LAZYCART_SYNC_POLICY"), "{err}");
    }

    #[test]
    fn test_dotenv_file_feeds_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(
            &path,
            "# backend local\nLAZYCART_API_URL=http://127.0.0.1:9090\nLAZYCART_SYNC_POLICY=rollback\n",
        )
        .unwrap();

        let vars: HashMap<String, String> = dotenvy::from_path_iter(&path)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        let config = Config::from_lookup(|key| vars.get(key).cloned().ok_or(VarError::NotPresent)).unwrap();

        assert_eq!(config.api_base_url, "http://127.0.0.1:9090");
        assert_eq!(config.sync_policy, SyncPolicy::RollBack);
    }

    #[test]
    fn test_with_api_url_trims_trailing_slash() {
        let config = Config::with_api_url("http://10.0.0.2:8080/", PathBuf::from("/tmp/lc"));
        assert_eq!(config.api_base_url, "http://10.0.0.2:8080");
        assert_eq!(config.log_dir, PathBuf::from("/tmp/lc/logs"));
        assert_eq!(config.sync_policy, SyncPolicy::KeepLocal);
    }
}
