// ============================================================================
// Structure : UserProfile
// ============================================================================
// Miroir local de l'enregistrement utilisateur du backend
//
// CONCEPTS RUST :
// 1. #[serde(rename = "...")] : les champs JSON du backend sont en turc
// 2. #[serde(default)] : tolère les champs absents (ex: après inscription)
// 3. BTreeSet : ensemble trié d'identifiants (sérialisation stable)
// ============================================================================

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Profil de l'utilisateur connecté
///
/// Stocké tel quel (un seul blob JSON) par le `ProfileStore`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Identifiant backend (`kullanici_id`, parfois `id`)
    #[serde(rename = "kullanici_id", alias = "id")]
    pub id: i64,

    #[serde(rename = "isim", default)]
    pub name: String,

    #[serde(rename = "soyisim", default)]
    pub surname: String,

    #[serde(default)]
    pub email: String,

    /// Économies cumulées depuis l'inscription
    #[serde(rename = "toplamTasarruf", default)]
    pub total_savings: Decimal,

    /// Économies du mois en cours
    #[serde(rename = "aylikTasarruf", default)]
    pub monthly_savings: Decimal,

    /// Maladies sélectionnées (identifiants)
    #[serde(rename = "hastaliklar", default)]
    pub health_conditions: BTreeSet<i64>,

    /// Allergènes sélectionnés (identifiants)
    #[serde(rename = "alerjenler", default)]
    pub allergens: BTreeSet<i64>,
}

impl UserProfile {
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            surname: String::new(),
            email: email.into(),
            total_savings: Decimal::ZERO,
            monthly_savings: Decimal::ZERO,
            health_conditions: BTreeSet::new(),
            allergens: BTreeSet::new(),
        }
    }

    /// Nom complet pour l'affichage
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name, self.surname).trim().to_string()
    }

    /// Initiale affichée dans l'avatar ("?" si pas de nom)
    pub fn initial(&self) -> char {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().next().unwrap_or(c))
            .unwrap_or('?')
    }

    /// Ajoute une économie aux deux totaux
    ///
    /// Retourne false (et ne modifie rien) si le montant n'est pas strictement
    /// positif : les totaux ne décroissent jamais sous un achat confirmé.
    pub fn credit_savings(&mut self, delta: &SavingsDelta) -> bool {
        if delta.amount <= Decimal::ZERO {
            return false;
        }
        self.total_savings += delta.amount;
        self.monthly_savings += delta.amount;
        true
    }

    /// Annule un crédit précédent (réconciliation après échec de synchro)
    pub fn revert_savings(&mut self, delta: &SavingsDelta) {
        self.total_savings = (self.total_savings - delta.amount).max(Decimal::ZERO);
        self.monthly_savings = (self.monthly_savings - delta.amount).max(Decimal::ZERO);
    }
}

/// Économie calculée au moment de la confirmation d'achat
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsDelta {
    pub amount: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl SavingsDelta {
    pub fn new(amount: Decimal) -> Self {
        Self {
            amount,
            timestamp: Utc::now(),
        }
    }
}
