// ============================================================================
// Structures : profil santé et commentaires IA
// ============================================================================
// Maladies, allergènes et sélection de l'utilisateur
//
// CONCEPTS RUST :
// 1. Newtype de sélection avec BTreeSet : toggle en O(log n)
// 2. Structures "wire" séparées : le backend renvoie des objets, on
//    ne garde que les identifiants
// ============================================================================

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Une maladie ou un allergène proposé par le backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthOption {
    pub id: i64,

    #[serde(rename = "adi", default)]
    pub name: String,
}

/// Sélection santé de l'utilisateur (identifiants uniquement)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthSelection {
    #[serde(rename = "hastaliklar")]
    pub conditions: BTreeSet<i64>,

    #[serde(rename = "alerjenler")]
    pub allergens: BTreeSet<i64>,
}

impl HealthSelection {
    /// Ajoute ou retire une maladie
    pub fn toggle_condition(&mut self, id: i64) {
        toggle(&mut self.conditions, id);
    }

    /// Ajoute ou retire un allergène
    pub fn toggle_allergen(&mut self, id: i64) {
        toggle(&mut self.allergens, id);
    }
}

fn toggle(set: &mut BTreeSet<i64>, id: i64) {
    if !set.remove(&id) {
        set.insert(id);
    }
}

/// Catalogue complet + sélection courante (écran santé)
#[derive(Debug, Clone, Default)]
pub struct HealthCatalog {
    pub conditions: Vec<HealthOption>,
    pub allergens: Vec<HealthOption>,
    pub selection: HealthSelection,
}

/// Commentaire IA pour un produit, selon le profil santé
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AiCommentary {
    #[serde(rename = "urun")]
    pub product: String,

    #[serde(rename = "yorumlar", default)]
    pub comments: Vec<String>,
}

/// Tonalité d'un commentaire, pour la couleur dans l'UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentTone {
    Warning,
    Positive,
    Neutral,
}

impl CommentTone {
    /// Devine la tonalité à partir des marqueurs utilisés par le backend
    pub fn of(comment: &str) -> Self {
        if comment.contains('⚠') || comment.contains('❌') {
            CommentTone::Warning
        } else if comment.contains('✅') || comment.contains('✔') {
            CommentTone::Positive
        } else {
            CommentTone::Neutral
        }
    }
}
