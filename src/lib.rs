// ============================================================================
// LazyCart - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests d'intégration
// ============================================================================

pub mod api;      // Client REST du backend
pub mod app;      // État de l'application
pub mod compare;  // Classement des offres et confirmation d'achat
pub mod config;   // Configuration (variables d'environnement)
pub mod models;   // Structures de données
pub mod scan;     // Extraction et anti-rebond des codes-barres
pub mod session;  // Profil connecté et accumulateur d'économies
pub mod store;    // Stockage local du profil
pub mod ui;       // Interface utilisateur
