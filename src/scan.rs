// ============================================================================
// Barcode Capture : extraction et anti-rebond des scans
// ============================================================================
// Un lecteur de codes-barres USB se comporte comme un clavier : chaque scan
// arrive comme une ligne de texte. Une session de scan ne transmet que le
// premier code valide ; les scans suivants sont ignorés jusqu'à ce qu'une
// nouvelle session démarre.
//
// CONCEPTS RUST :
// 1. Newtype SessionToken : impossible de confondre avec un autre u64
// 2. Jeton de session au lieu d'un booléen : une réponse réseau tardive
//    d'une ancienne session est reconnue et jetée
// 3. Regex compilée une fois (OnceLock)
// ============================================================================

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, info};

/// Longueur minimale d'un code-barres (EAN-8)
pub const MIN_BARCODE_DIGITS: usize = 8;

/// Longueur maximale d'un code-barres (ITF-14)
pub const MAX_BARCODE_DIGITS: usize = 14;

fn digit_run_regex() -> &'static Regex {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    DIGITS.get_or_init(|| Regex::new(r"[0-9]+").expect("valid digit regex"))
}

/// Extrait le premier code-barres d'un contenu scanné
///
/// Le code est la première suite de chiffres consécutifs (maximale) dont
/// la longueur est comprise entre 8 et 14. Une suite plus longue n'est pas
/// tronquée : elle est ignorée.
///
/// # Exemple
/// `extract_barcode("0123456789123 extra")` → `Some("0123456789123")`
pub fn extract_barcode(payload: &str) -> Option<String> {
    digit_run_regex()
        .find_iter(payload)
        .map(|m| m.as_str())
        .find(|run| (MIN_BARCODE_DIGITS..=MAX_BARCODE_DIGITS).contains(&run.len()))
        .map(str::to_string)
}

/// Identifiant d'une session de scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken(u64);

impl SessionToken {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Résultat du traitement d'un scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Premier code valide de la session : à envoyer au backend
    Forward { token: SessionToken, barcode: String },
    /// Pas de code 8-14 chiffres : ignoré, le scan suivant peut réessayer
    Invalid,
    /// Un code a déjà été transmis pour cette session
    Suppressed,
    /// Le scan appartient à une session terminée ou remplacée
    Stale,
}

/// Gestion des sessions de scan
#[derive(Debug, Default)]
pub struct Scanner {
    /// Session active (None si le scanner est fermé)
    current: Option<SessionToken>,

    /// Compteur pour générer les jetons
    next_id: u64,

    /// Vrai quand un code a été transmis pour la session active
    latched: bool,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Démarre une nouvelle session (invalide la précédente)
    pub fn start_session(&mut self) -> SessionToken {
        self.next_id += 1;
        let token = SessionToken(self.next_id);
        self.current = Some(token);
        self.latched = false;
        info!(session = token.id(), "Scan session started");
        token
    }

    /// Ferme le scanner sans démarrer de nouvelle session
    pub fn close(&mut self) {
        if let Some(token) = self.current.take() {
            debug!(session = token.id(), "Scan session closed");
        }
    }

    /// Session active, si le scanner est ouvert
    pub fn current(&self) -> Option<SessionToken> {
        self.current
    }

    /// Vrai si le jeton correspond à la dernière session démarrée
    ///
    /// Utilisé à la réception d'une comparaison : une réponse pour une
    /// session remplacée ne doit pas écraser l'écran.
    pub fn is_current(&self, token: SessionToken) -> bool {
        token.id() == self.next_id
    }

    /// Vrai si un code a déjà été transmis dans la session active
    pub fn is_latched(&self) -> bool {
        self.latched
    }

    /// Traite un contenu scanné pour la session `token`
    pub fn on_scan(&mut self, token: SessionToken, payload: &str) -> ScanOutcome {
        if self.current != Some(token) {
            debug!(session = token.id(), "Scan from stale session dropped");
            return ScanOutcome::Stale;
        }

        if self.latched {
            debug!(session = token.id(), "Scan suppressed (already forwarded)");
            return ScanOutcome::Suppressed;
        }

        match extract_barcode(payload) {
            Some(barcode) => {
                self.latched = true;
                info!(session = token.id(), barcode = %barcode, "Barcode accepted");
                ScanOutcome::Forward { token, barcode }
            }
            None => {
                debug!(session = token.id(), payload_len = payload.len(), "Scan without barcode ignored");
                ScanOutcome::Invalid
            }
        }
    }
}
