// ============================================================================
// Module : compare
// ============================================================================
// Classement des offres et confirmation d'achat
// ============================================================================

pub mod confirmation; // Machine à états Idle → AwaitingConfirmation → Confirmed
pub mod ranker;       // Tri des offres et écarts en pourcentage

pub use confirmation::{savings_delta, ConfirmOutcome, PurchaseFlow, PurchaseState};
pub use ranker::{rank_offers, PriceDelta, RankError, RankedComparison, RankedOffer};
