// ============================================================================
// Purchase Confirmation : machine à états
// ============================================================================
// Idle → AwaitingConfirmation → { Confirmed, Rejected → Idle }
//
// CONCEPTS RUST :
// 1. Enum pour state machine : un seul état à la fois
// 2. Transitions explicites : chaque méthode vérifie l'état de départ
//    et retourne false/None si la transition est invalide
// ============================================================================

use rust_decimal::Decimal;
use tracing::debug;

use crate::compare::ranker::RankedComparison;
use crate::models::SavingsDelta;

/// État de la confirmation d'achat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PurchaseState {
    /// Aucune sélection en cours
    #[default]
    Idle,
    /// L'utilisateur a choisi l'offre la moins chère, on attend son accord
    AwaitingConfirmation,
    /// Achat confirmé (état final jusqu'au prochain scan)
    Confirmed,
    /// Achat refusé (transitoire, retour immédiat à Idle)
    Rejected,
}

/// Résultat d'une confirmation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmOutcome {
    /// Économie positive à créditer
    Saved(SavingsDelta),
    /// Une seule offre ou prix égaux : rien à créditer
    NothingToSave,
}

/// Machine à états de la confirmation d'achat
#[derive(Debug, Clone, Default)]
pub struct PurchaseFlow {
    state: PurchaseState,
}

impl PurchaseFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PurchaseState {
        self.state
    }

    pub fn is_awaiting_confirmation(&self) -> bool {
        self.state == PurchaseState::AwaitingConfirmation
    }

    /// L'utilisateur sélectionne une offre
    ///
    /// Seule l'offre la moins chère (index 0) déclenche la confirmation,
    /// et seulement depuis Idle.
    pub fn select_offer(&mut self, index: usize) -> bool {
        if self.state != PurchaseState::Idle || index != 0 {
            debug!(state = ?self.state, index, "Offer selection ignored");
            return false;
        }
        self.state = PurchaseState::AwaitingConfirmation;
        true
    }

    /// L'utilisateur confirme l'achat au prix le plus bas
    ///
    /// Retourne None si aucune confirmation n'était attendue.
    pub fn confirm(&mut self, comparison: &RankedComparison) -> Option<ConfirmOutcome> {
        if self.state != PurchaseState::AwaitingConfirmation {
            return None;
        }
        self.state = PurchaseState::Confirmed;

        Some(match savings_delta(comparison) {
            Some(delta) => ConfirmOutcome::Saved(delta),
            None => ConfirmOutcome::NothingToSave,
        })
    }

    /// L'utilisateur annule : Rejected puis retour à Idle
    ///
    /// Retourne l'état de transition (Rejected) si l'annulation était valide.
    pub fn reject(&mut self) -> Option<PurchaseState> {
        if self.state != PurchaseState::AwaitingConfirmation {
            return None;
        }
        self.state = PurchaseState::Idle;
        Some(PurchaseState::Rejected)
    }

    /// Nouveau scan : on repart de zéro
    pub fn reset(&mut self) {
        self.state = PurchaseState::Idle;
    }
}

/// Économie = prix le plus cher - prix le plus bas
///
/// None avec moins de deux offres ou si l'écart n'est pas strictement positif.
pub fn savings_delta(comparison: &RankedComparison) -> Option<SavingsDelta> {
    let amount = comparison.potential_savings()?;
    if amount <= Decimal::ZERO {
        return None;
    }
    Some(SavingsDelta::new(amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ComparisonResult, Offer};

    fn comparison(prices_cents: &[i64]) -> RankedComparison {
        let offers = prices_cents
            .iter()
            .enumerate()
            .map(|(i, &c)| Offer::new(format!("market-{i}"), Decimal::new(c, 2)))
            .collect();
        let result = ComparisonResult::new("86900000".into(), "Test".into(), None, None, offers);
        RankedComparison::from_result(result).unwrap()
    }

    #[test]
    fn test_confirm_cheapest_yields_delta() {
        let comparison = comparison(&[1400, 1000, 1200]);
        let mut flow = PurchaseFlow::new();

        assert!(flow.select_offer(0));
        assert!(flow.is_awaiting_confirmation());

        let outcome = flow.confirm(&comparison).unwrap();
        match outcome {
            ConfirmOutcome::Saved(delta) => assert_eq!(delta.amount, Decimal::new(400, 2)),
            other => panic!("expected savings, got {other:?}"),
        }
        assert_eq!(flow.state(), PurchaseState::Confirmed);
    }

    #[test]
    fn test_only_cheapest_can_be_selected() {
        let mut flow = PurchaseFlow::new();
        assert!(!flow.select_offer(1));
        assert_eq!(flow.state(), PurchaseState::Idle);
    }

    #[test]
    fn test_single_offer_nothing_to_save() {
        let comparison = comparison(&[999]);
        let mut flow = PurchaseFlow::new();

        flow.select_offer(0);
        assert_eq!(flow.confirm(&comparison), Some(ConfirmOutcome::NothingToSave));
    }

    #[test]
    fn test_equal_prices_nothing_to_save() {
        let comparison = comparison(&[500, 500]);
        assert_eq!(savings_delta(&comparison), None);
    }

    #[test]
    fn test_reject_returns_to_idle() {
        let comparison = comparison(&[1000, 1400]);
        let mut flow = PurchaseFlow::new();

        flow.select_offer(0);
        assert_eq!(flow.reject(), Some(PurchaseState::Rejected));
        assert_eq!(flow.state(), PurchaseState::Idle);

        // Plus rien à confirmer
        assert_eq!(flow.confirm(&comparison), None);
        assert_eq!(flow.reject(), None);
    }

    #[test]
    fn test_confirm_twice_is_ignored() {
        let comparison = comparison(&[1000, 1400]);
        let mut flow = PurchaseFlow::new();

        flow.select_offer(0);
        assert!(flow.confirm(&comparison).is_some());
        assert!(flow.confirm(&comparison).is_none());
        assert!(!flow.select_offer(0));

        flow.reset();
        assert!(flow.select_offer(0));
    }
}
