// ============================================================================
// Module : ui
// ============================================================================
// Gère toute l'interface utilisateur (Terminal User Interface)
// ============================================================================

pub mod events;    // Gestion des événements clavier
pub mod dashboard; // Routage des écrans, header et footer
pub mod forms;     // Connexion et inscription
pub mod compare;   // Scan et offres classées
pub mod chart;     // Profil et graphique des économies
pub mod health;    // Profil santé et assistant IA
pub mod products;  // Liste de courses, recherche, fiche produit

// Re-exports pour simplifier les imports
pub use events::{Event, EventHandler};
pub use dashboard::render;
