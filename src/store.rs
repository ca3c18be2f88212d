// ============================================================================
// ProfileStore : stockage local du profil
// ============================================================================
// Un seul blob JSON sous une clé fixe, lu et écrit en entier à chaque
// modification. Absence du blob = utilisateur déconnecté.
//
// CONCEPTS RUST :
// 1. Option<T> pour "pas de profil" (pas une erreur)
// 2. Écriture atomique : fichier temporaire puis rename
// 3. anyhow::Context sur chaque opération disque
// ============================================================================

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::models::UserProfile;

/// Clé fixe du profil (nom du fichier, sans extension)
pub const PROFILE_KEY: &str = "kullanici";

/// Stockage clé-valeur du profil connecté
#[derive(Debug, Clone)]
pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    /// Crée un store dans le dossier donné (créé au premier `save`)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Chemin du blob JSON
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{PROFILE_KEY}.json"))
    }

    /// Lit le profil stocké
    ///
    /// Retourne Ok(None) si aucun profil n'est stocké. Un blob illisible
    /// est aussi traité comme "déconnecté" (avec un warning) pour ne pas
    /// bloquer l'application.
    pub fn load(&self) -> Result<Option<UserProfile>> {
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No stored profile");
                return Ok(None);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Échec de lecture de {}", path.display()));
            }
        };

        match serde_json::from_str::<UserProfile>(&content) {
            Ok(profile) => {
                debug!(user_id = profile.id, "Loaded stored profile");
                Ok(Some(profile))
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Stored profile is corrupt, treating as logged out");
                Ok(None)
            }
        }
    }

    /// Écrit le profil (remplace le blob entier)
    pub fn save(&self, profile: &UserProfile) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Échec de création du dossier {}", self.dir.display()))?;

        let json = serde_json::to_string_pretty(profile).context("Échec de sérialisation du profil")?;

        let path = self.path();
        let tmp = path.with_extension("json.tmp");
        write_then_rename(&tmp, &path, &json)?;

        debug!(user_id = profile.id, path = %path.display(), "Profile saved");
        Ok(())
    }

    /// Supprime le profil (déconnexion)
    pub fn clear(&self) -> Result<()> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(path = %path.display(), "Stored profile removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Échec de suppression de {}", path.display())),
        }
    }
}

fn write_then_rename(tmp: &Path, path: &Path, content: &str) -> Result<()> {
    fs::write(tmp, content).with_context(|| format!("Échec d'écriture de {}", tmp.display()))?;
    fs::rename(tmp, path).with_context(|| format!("Échec du renommage vers {}", path.display()))?;
    Ok(())
}
