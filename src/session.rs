// ============================================================================
// Session : profil connecté + accumulateur d'économies
// ============================================================================
// Remplace l'état global partagé : un objet Session possède le profil,
// le sauvegarde après chaque modification et suit les économies pas
// encore confirmées par le backend.
//
// Cycle d'une économie (commit en deux phases) :
//   1. apply_savings() : crédit local + sauvegarde → PendingSavings
//   2a. commit()       : le backend a accepté
//   2b. reconcile()    : le backend a échoué → SyncPolicy décide
// ============================================================================

use anyhow::Result;
use rust_decimal::Decimal;
use tracing::{error, info, warn};

use crate::config::SyncPolicy;
use crate::models::{HealthSelection, SavingsDelta, UserProfile};
use crate::store::ProfileStore;

/// Économie créditée localement, en attente de confirmation backend
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSavings {
    pub id: u64,
    pub user_id: i64,
    pub delta: SavingsDelta,
}

/// Ce que la réconciliation a fait des totaux locaux
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    KeptLocal,
    RolledBack,
    /// Entrée inconnue (déjà réconciliée, ou utilisateur déconnecté)
    Unknown,
}

/// Session utilisateur côté client
#[derive(Debug)]
pub struct Session {
    store: ProfileStore,
    profile: Option<UserProfile>,
    policy: SyncPolicy,
    pending: Vec<PendingSavings>,
    next_pending_id: u64,
}

impl Session {
    /// Ouvre la session à partir du profil stocké (s'il existe)
    pub fn open(store: ProfileStore, policy: SyncPolicy) -> Result<Self> {
        let profile = store.load()?;
        match &profile {
            Some(p) => info!(user_id = p.id, "Session restored"),
            None => info!("No stored profile, user is logged out"),
        }
        Ok(Self {
            store,
            profile,
            policy,
            pending: Vec::new(),
            next_pending_id: 0,
        })
    }

    pub fn is_logged_in(&self) -> bool {
        self.profile.is_some()
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn user_id(&self) -> Option<i64> {
        self.profile.as_ref().map(|p| p.id)
    }

    /// Économies en attente de synchronisation
    pub fn pending(&self) -> &[PendingSavings] {
        &self.pending
    }

    /// Connexion : le profil renvoyé par le backend remplace tout
    pub fn sign_in(&mut self, profile: UserProfile) -> Result<()> {
        info!(user_id = profile.id, "User signed in");
        self.store.save(&profile)?;
        self.profile = Some(profile);
        self.pending.clear();
        Ok(())
    }

    /// Déconnexion : supprime le blob local
    pub fn sign_out(&mut self) -> Result<()> {
        if let Some(p) = self.profile.take() {
            info!(user_id = p.id, "User signed out");
        }
        self.pending.clear();
        self.store.clear()
    }

    /// Rafraîchit le profil avec l'enregistrement serveur
    ///
    /// Le total mensuel vient d'un endpoint séparé ; s'il manque on garde
    /// celui du serveur. Ignoré si l'utilisateur s'est déconnecté entre-temps
    /// ou si le profil reçu est celui d'un autre utilisateur.
    pub fn refresh(&mut self, mut server: UserProfile, monthly: Option<Decimal>) -> Result<()> {
        let current = match self.profile.as_ref() {
            Some(p) if p.id == server.id => p,
            _ => {
                warn!(user_id = server.id, "Ignoring profile refresh for inactive user");
                return Ok(());
            }
        };

        if let Some(monthly) = monthly {
            server.monthly_savings = monthly;
        }
        // Le backend ne renvoie pas toujours la sélection santé
        if server.health_conditions.is_empty() && server.allergens.is_empty() {
            server.health_conditions = current.health_conditions.clone();
            server.allergens = current.allergens.clone();
        }

        self.store.save(&server)?;
        self.profile = Some(server);
        Ok(())
    }

    /// Reflète la sélection santé dans le profil local
    pub fn update_health(&mut self, selection: &HealthSelection) -> Result<()> {
        let Some(mut updated) = self.profile.clone() else {
            return Ok(());
        };
        updated.health_conditions = selection.conditions.clone();
        updated.allergens = selection.allergens.clone();
        self.replace_profile(updated)
    }

    /// Sélection santé courante (pour les commentaires IA)
    pub fn health_selection(&self) -> HealthSelection {
        self.profile
            .as_ref()
            .map(|p| HealthSelection {
                conditions: p.health_conditions.clone(),
                allergens: p.allergens.clone(),
            })
            .unwrap_or_default()
    }

    /// Phase 1 : crédite l'économie localement et sauvegarde
    ///
    /// Retourne None (sans rien modifier) si le montant n'est pas positif
    /// ou si personne n'est connecté. Si la sauvegarde échoue, les totaux
    /// en mémoire restent inchangés.
    pub fn apply_savings(&mut self, delta: SavingsDelta) -> Result<Option<PendingSavings>> {
        let Some(mut credited) = self.profile.clone() else {
            warn!("Savings confirmed while logged out, ignoring");
            return Ok(None);
        };

        if !credited.credit_savings(&delta) {
            return Ok(None);
        }
        let user_id = credited.id;
        let total = credited.total_savings;
        self.replace_profile(credited)?;

        self.next_pending_id += 1;
        let pending = PendingSavings {
            id: self.next_pending_id,
            user_id,
            delta,
        };
        info!(
            pending_id = pending.id,
            amount = %pending.delta.amount,
            total = %total,
            "Savings applied locally"
        );
        self.pending.push(pending.clone());
        Ok(Some(pending))
    }

    /// Phase 2a : le backend a enregistré l'économie
    pub fn commit(&mut self, pending_id: u64) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != pending_id);
        let found = self.pending.len() != before;
        if found {
            info!(pending_id, "Savings synced with backend");
        }
        found
    }

    /// Phase 2b : l'envoi au backend a échoué
    pub fn reconcile(&mut self, pending_id: u64) -> Result<Reconciliation> {
        let Some(index) = self.pending.iter().position(|p| p.id == pending_id) else {
            return Ok(Reconciliation::Unknown);
        };
        let pending = self.pending.remove(index);

        match self.policy {
            SyncPolicy::KeepLocal => {
                error!(
                    pending_id,
                    amount = %pending.delta.amount,
                    "Backend rejected savings, keeping local totals"
                );
                Ok(Reconciliation::KeptLocal)
            }
            SyncPolicy::RollBack => {
                let Some(mut reverted) = self.profile.clone().filter(|p| p.id == pending.user_id) else {
                    return Ok(Reconciliation::Unknown);
                };
                reverted.revert_savings(&pending.delta);
                self.replace_profile(reverted)?;
                error!(
                    pending_id,
                    amount = %pending.delta.amount,
                    "Backend rejected savings, local totals rolled back"
                );
                Ok(Reconciliation::RolledBack)
            }
        }
    }

    /// Sauvegarde puis remplace le profil en mémoire (jamais l'inverse)
    fn replace_profile(&mut self, profile: UserProfile) -> Result<()> {
        self.store.save(&profile)?;
        self.profile = Some(profile);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(policy: SyncPolicy) -> (tempfile::TempDir, Session) {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::open(ProfileStore::new(dir.path()), policy).unwrap();
        session
            .sign_in(UserProfile::new(1, "Ali", "ali@example.com"))
            .unwrap();
        (dir, session)
    }

    fn dec(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    #[test]
    fn test_open_without_profile_is_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::open(ProfileStore::new(dir.path()), SyncPolicy::KeepLocal).unwrap();
        assert!(!session.is_logged_in());
    }

    #[test]
    fn test_apply_savings_updates_and_persists() {
        let (dir, mut session) = session(SyncPolicy::KeepLocal);

        let pending = session.apply_savings(SavingsDelta::new(dec(400))).unwrap().unwrap();
        assert_eq!(pending.user_id, 1);

        let profile = session.profile().unwrap();
        assert_eq!(profile.total_savings, dec(400));
        assert_eq!(profile.monthly_savings, dec(400));

        // Sauvegardé sur disque
        let stored = ProfileStore::new(dir.path()).load().unwrap().unwrap();
        assert_eq!(stored.total_savings, dec(400));
    }

    #[test]
    fn test_failed_save_leaves_totals_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        let mut session = Session::open(ProfileStore::new(&data), SyncPolicy::KeepLocal).unwrap();
        session
            .sign_in(UserProfile::new(1, "Ali", "ali@example.com"))
            .unwrap();

        // Le dossier de données devient un fichier : toute sauvegarde échoue
        std::fs::remove_dir_all(&data).unwrap();
        std::fs::write(&data, "").unwrap();

        assert!(session.apply_savings(SavingsDelta::new(dec(400))).is_err());
        assert_eq!(session.profile().unwrap().total_savings, Decimal::ZERO);
        assert_eq!(session.profile().unwrap().monthly_savings, Decimal::ZERO);
        assert!(session.pending().is_empty());

        let mut selection = HealthSelection::default();
        selection.toggle_condition(2);
        assert!(session.update_health(&selection).is_err());
        assert!(session.profile().unwrap().health_conditions.is_empty());
    }

    #[test]
    fn test_non_positive_savings_ignored() {
        let (_dir, mut session) = session(SyncPolicy::KeepLocal);

        assert!(session.apply_savings(SavingsDelta::new(Decimal::ZERO)).unwrap().is_none());
        assert!(session.pending().is_empty());
        assert_eq!(session.profile().unwrap().total_savings, Decimal::ZERO);
    }

    #[test]
    fn test_commit_clears_pending() {
        let (_dir, mut session) = session(SyncPolicy::KeepLocal);
        let pending = session.apply_savings(SavingsDelta::new(dec(100))).unwrap().unwrap();

        assert!(session.commit(pending.id));
        assert!(!session.commit(pending.id));
        assert!(session.pending().is_empty());
    }

    #[test]
    fn test_reconcile_keep_local() {
        let (_dir, mut session) = session(SyncPolicy::KeepLocal);
        let pending = session.apply_savings(SavingsDelta::new(dec(400))).unwrap().unwrap();

        assert_eq!(session.reconcile(pending.id).unwrap(), Reconciliation::KeptLocal);
        assert_eq!(session.profile().unwrap().total_savings, dec(400));
        assert_eq!(session.reconcile(pending.id).unwrap(), Reconciliation::Unknown);
    }

    #[test]
    fn test_reconcile_roll_back() {
        let (dir, mut session) = session(SyncPolicy::RollBack);
        session.apply_savings(SavingsDelta::new(dec(100))).unwrap();
        let pending = session.apply_savings(SavingsDelta::new(dec(400))).unwrap().unwrap();

        assert_eq!(session.reconcile(pending.id).unwrap(), Reconciliation::RolledBack);
        assert_eq!(session.profile().unwrap().total_savings, dec(100));

        let stored = ProfileStore::new(dir.path()).load().unwrap().unwrap();
        assert_eq!(stored.monthly_savings, dec(100));
    }

    #[test]
    fn test_refresh_merges_monthly_and_keeps_health() {
        let (_dir, mut session) = session(SyncPolicy::KeepLocal);
        let mut selection = HealthSelection::default();
        selection.toggle_allergen(3);
        session.update_health(&selection).unwrap();

        let mut server = UserProfile::new(1, "Ali", "ali@example.com");
        server.total_savings = dec(5000);
        session.refresh(server, Some(dec(1200))).unwrap();

        let profile = session.profile().unwrap();
        assert_eq!(profile.total_savings, dec(5000));
        assert_eq!(profile.monthly_savings, dec(1200));
        assert!(profile.allergens.contains(&3));
        assert_eq!(session.health_selection(), selection);
    }

    #[test]
    fn test_refresh_for_other_user_ignored() {
        let (_dir, mut session) = session(SyncPolicy::KeepLocal);
        session
            .refresh(UserProfile::new(99, "Other", "o@example.com"), None)
            .unwrap();
        assert_eq!(session.user_id(), Some(1));
    }

    #[test]
    fn test_sign_out_clears_store() {
        let (dir, mut session) = session(SyncPolicy::KeepLocal);
        session.sign_out().unwrap();

        assert!(!session.is_logged_in());
        assert!(ProfileStore::new(dir.path()).load().unwrap().is_none());
    }
}
