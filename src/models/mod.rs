// ============================================================================
// Module : models
// ============================================================================
// Structures de données de l'application (offres, profil, santé, etc.)
// ============================================================================

pub mod health;         // Maladies, allergènes, commentaires IA
pub mod offer;          // Offres et résultat de comparaison
pub mod product;        // Recherche et fiche nutritionnelle
pub mod profile;        // Profil utilisateur et économies
pub mod registration;   // Formulaire d'inscription
pub mod savings_chart;  // Graphique des économies (semaine / mois)
pub mod shopping_list;  // Liste de courses

// Re-export des structures principales pour simplifier les imports
pub use health::{AiCommentary, CommentTone, HealthCatalog, HealthOption, HealthSelection};
pub use offer::{ComparisonResult, Offer};
pub use product::{ProductDetail, ProductSummary};
pub use profile::{SavingsDelta, UserProfile};
pub use registration::{Registration, RegistrationError};
pub use savings_chart::{ChartPeriod, SavingsChart, Series};
pub use shopping_list::ShoppingList;
