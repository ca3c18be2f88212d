// ============================================================================
// Module : api
// ============================================================================
// Client REST du backend de comparaison de prix
// ============================================================================

pub mod client; // Toutes les opérations HTTP
pub mod error;  // Classification des statuts HTTP

pub use client::BackendClient;
pub use error::ApiError;
