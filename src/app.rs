// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global de l'application TUI
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état dans une seule structure
// 2. Mutabilité contrôlée : &mut self pour modifier l'état
// 3. Les résultats du worker sont appliqués par des méthodes on_*()
//    testables sans terminal ni réseau
//
// PATTERN : "Application State"
// - Tous les composants de l'UI lisent depuis App
// - Toutes les modifications passent par les méthodes de App
// ============================================================================

mod form;

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

use crate::compare::{ConfirmOutcome, PurchaseFlow, RankedComparison};
use crate::models::{
    AiCommentary, ChartPeriod, ComparisonResult, HealthCatalog, HealthSelection, ProductDetail,
    ProductSummary, Registration, SavingsChart, ShoppingList, UserProfile,
};
use crate::scan::{ScanOutcome, Scanner, SessionToken};
use crate::session::{PendingSavings, Reconciliation, Session};

pub use form::{Form, FormField};

// ============================================================================
// Enums : Screen, InputTarget, Alert
// ============================================================================

/// Écrans de l'application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Formulaire de connexion (écran de départ si déconnecté)
    Login,
    /// Formulaire d'inscription
    Register,
    /// Menu principal
    Home,
    /// Session de scan + comparaison des prix
    Compare,
    ShoppingList,
    /// Profil et graphique des économies
    Profile,
    /// Sélection des maladies / allergènes
    Health,
    /// Commentaires IA sur un produit
    Chatbot,
    /// Résultats de recherche produit
    Search,
    /// Fiche nutritionnelle
    ProductDetail,
    /// Saisie d'une ligne de texte (prompt en bas d'écran)
    InputMode,
}

/// Destination du texte saisi en mode Input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    ShoppingItem,
    SearchQuery,
    AiProductId,
}

/// Colonne active de l'écran santé
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HealthColumn {
    #[default]
    Conditions,
    Allergens,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Info,
    Error,
}

/// Message affiché une fois dans le footer, effacé par la touche suivante
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

// ============================================================================
// App
// ============================================================================

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Écran actuellement affiché
    pub current_screen: Screen,

    /// Profil connecté + économies en attente
    pub session: Session,

    pub login_form: Form,
    pub register_form: Form,

    /// Sessions de scan (jeton + verrou)
    pub scanner: Scanner,

    /// Ligne en cours de réception du lecteur de codes-barres
    pub scan_buffer: String,

    /// Dernière comparaison classée (None = rien à afficher)
    pub comparison: Option<RankedComparison>,

    /// Confirmation d'achat pour la comparaison affichée
    pub purchase: PurchaseFlow,

    /// Offre surlignée dans la comparaison
    pub selected_offer: usize,

    pub shopping_list: ShoppingList,
    pub list_selected: usize,

    /// Séries du graphique + période affichée
    pub chart: SavingsChart,
    pub chart_period: ChartPeriod,

    pub health: HealthCatalog,
    pub health_column: HealthColumn,
    pub health_selected: usize,

    pub search_results: Vec<ProductSummary>,
    pub search_selected: usize,
    pub product: Option<ProductDetail>,

    pub commentary: Option<AiCommentary>,

    /// Two-step quit : première pression arme, deuxième quitte
    pub confirm_quit: bool,

    /// Two-step delete (liste de courses)
    pub confirm_delete: bool,

    /// Two-step logout
    pub confirm_logout: bool,

    /// Requête en cours côté worker
    pub is_loading: bool,
    pub loading_message: Option<String>,

    /// Buffer et prompt du mode Input
    pub input_buffer: String,
    pub input_prompt: String,
    input_target: Option<InputTarget>,
    input_return: Screen,

    pub alert: Option<Alert>,
}

impl App {
    /// Crée l'application : écran d'accueil si un profil est stocké,
    /// sinon écran de connexion
    pub fn new(session: Session) -> Self {
        let current_screen = if session.is_logged_in() {
            Screen::Home
        } else {
            Screen::Login
        };

        Self {
            running: true,
            current_screen,
            session,
            login_form: Form::login(),
            register_form: Form::registration(),
            scanner: Scanner::new(),
            scan_buffer: String::new(),
            comparison: None,
            purchase: PurchaseFlow::new(),
            selected_offer: 0,
            shopping_list: ShoppingList::new(),
            list_selected: 0,
            chart: SavingsChart::default(),
            chart_period: ChartPeriod::default(),
            health: HealthCatalog::default(),
            health_column: HealthColumn::default(),
            health_selected: 0,
            search_results: Vec::new(),
            search_selected: 0,
            product: None,
            commentary: None,
            confirm_quit: false,
            confirm_delete: false,
            confirm_logout: false,
            is_loading: false,
            loading_message: None,
            input_buffer: String::new(),
            input_prompt: String::new(),
            input_target: None,
            input_return: Screen::Home,
            alert: None,
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn show(&mut self, screen: Screen) {
        debug!(from = ?self.current_screen, to = ?screen, "Screen change");
        self.current_screen = screen;
    }

    pub fn is_on(&self, screen: Screen) -> bool {
        self.current_screen == screen
    }

    /// Écrans où les touches lettres sont du texte (pas des raccourcis)
    pub fn is_typing(&self) -> bool {
        matches!(
            self.current_screen,
            Screen::Login | Screen::Register | Screen::InputMode | Screen::Compare
        )
    }

    // ------------------------------------------------------------------------
    // Confirmations, chargement, alertes
    // ------------------------------------------------------------------------

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    /// Annule toutes les confirmations en attente
    pub fn cancel_confirmations(&mut self) {
        self.confirm_quit = false;
        self.confirm_delete = false;
        self.confirm_logout = false;
    }

    pub fn start_loading(&mut self, message: Option<String>) {
        self.is_loading = true;
        self.loading_message = message;
    }

    pub fn stop_loading(&mut self) {
        self.is_loading = false;
        self.loading_message = None;
    }

    pub fn is_loading_data(&self) -> bool {
        self.is_loading
    }

    pub fn show_info(&mut self, message: impl Into<String>) {
        self.alert = Some(Alert {
            kind: AlertKind::Info,
            message: message.into(),
        });
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.alert = Some(Alert {
            kind: AlertKind::Error,
            message: message.into(),
        });
    }

    /// Efface l'alerte ; retourne true s'il y en avait une
    pub fn dismiss_alert(&mut self) -> bool {
        self.alert.take().is_some()
    }

    /// Affiche l'erreur d'une écriture locale (profil) sans l'interrompre
    fn report_store_error(&mut self, result: Result<()>) {
        if let Err(e) = result {
            error!(error = ?e, "Failed to persist profile");
            self.show_error(format!("Could not save profile: {e}"));
        }
    }

    // ------------------------------------------------------------------------
    // Comptes
    // ------------------------------------------------------------------------

    /// Identifiants saisis, None (avec alerte) si un champ est vide
    pub fn login_credentials(&mut self) -> Option<(String, String)> {
        let email = self.login_form.value(0).trim().to_string();
        let password = self.login_form.value(1).to_string();

        if email.is_empty() || password.is_empty() {
            self.show_error("Please enter your email and password");
            return None;
        }
        Some((email, password))
    }

    /// Formulaire d'inscription validé, None (avec alerte) sinon
    pub fn registration(&mut self) -> Option<Registration> {
        let form = &self.register_form;
        let optional = |s: &str| Some(s.trim().to_string());
        let registration = Registration {
            name: form.value(0).trim().to_string(),
            surname: form.value(1).trim().to_string(),
            email: form.value(2).trim().to_string(),
            password: form.value(3).to_string(),
            phone: form.value(4).trim().to_string(),
            national_id: optional(form.value(5)),
            address: optional(form.value(6)),
        }
        .normalized();

        match registration.validate() {
            Ok(()) => Some(registration),
            Err(e) => {
                info!(reason = %e, "Registration form rejected");
                self.show_error(e.to_string());
                None
            }
        }
    }

    pub fn on_logged_in(&mut self, profile: UserProfile) {
        let name = profile.display_name();
        let result = self.session.sign_in(profile);
        self.report_store_error(result);

        self.login_form.clear();
        self.show(Screen::Home);
        self.show_info(format!("Welcome, {name}"));
    }

    /// Compte créé : retour au login avec l'email pré-rempli
    pub fn on_registered(&mut self) {
        let email = self.register_form.value(2).trim().to_string();
        self.register_form.clear();
        self.login_form.clear();
        self.login_form.set_value(0, email);
        self.login_form.next_field();
        self.show(Screen::Login);
        self.show_info("Account created, you can sign in");
    }

    pub fn request_logout(&mut self) {
        self.confirm_logout = true;
    }

    pub fn is_awaiting_logout_confirmation(&self) -> bool {
        self.confirm_logout
    }

    /// Déconnexion : efface le profil et tout l'état de l'utilisateur
    pub fn logout(&mut self) {
        let result = self.session.sign_out();
        self.report_store_error(result);

        self.scanner.close();
        self.comparison = None;
        self.purchase.reset();
        self.chart = SavingsChart::default();
        self.health = HealthCatalog::default();
        self.commentary = None;
        self.confirm_logout = false;
        self.show(Screen::Login);
    }

    /// Profil serveur + total mensuel + données du graphique
    pub fn on_profile_refreshed(
        &mut self,
        profile: UserProfile,
        monthly: Option<Decimal>,
        daily: &BTreeMap<String, Decimal>,
        today: NaiveDate,
    ) {
        let result = self.session.refresh(profile, monthly);
        self.report_store_error(result);
        self.chart = SavingsChart::from_daily(daily, today);
    }

    pub fn toggle_chart_period(&mut self) {
        self.chart_period = self.chart_period.toggle();
    }

    // ------------------------------------------------------------------------
    // Scan et comparaison
    // ------------------------------------------------------------------------

    /// Ouvre (ou rouvre) le scanner : nouvelle session, écran vidé
    pub fn open_scanner(&mut self) -> SessionToken {
        self.comparison = None;
        self.purchase.reset();
        self.selected_offer = 0;
        self.scan_buffer.clear();
        self.show(Screen::Compare);
        self.scanner.start_session()
    }

    /// Quitte l'écran de comparaison
    pub fn close_scanner(&mut self) {
        self.scanner.close();
        self.scan_buffer.clear();
        self.show(Screen::Home);
    }

    /// Envoie la ligne scannée au filtre ; retourne le code à comparer
    pub fn submit_scan(&mut self) -> Option<(SessionToken, String)> {
        let payload = std::mem::take(&mut self.scan_buffer);
        let token = self.scanner.current()?;

        match self.scanner.on_scan(token, &payload) {
            ScanOutcome::Forward { token, barcode } => {
                self.start_loading(Some(format!("Comparing prices for {barcode}...")));
                Some((token, barcode))
            }
            ScanOutcome::Invalid => {
                self.show_error("No barcode found in scan");
                None
            }
            ScanOutcome::Suppressed => {
                self.show_info("Already compared, press [Tab] to scan again");
                None
            }
            ScanOutcome::Stale => None,
        }
    }

    /// Applique une comparaison reçue ; retourne false si elle est périmée
    pub fn apply_comparison(&mut self, token: SessionToken, result: ComparisonResult) -> bool {
        if !self.scanner.is_current(token) {
            warn!(session = token.id(), "Dropping comparison for stale scan session");
            return false;
        }
        self.stop_loading();

        match RankedComparison::from_result(result) {
            Ok(ranked) => {
                info!(
                    barcode = %ranked.barcode,
                    offers = ranked.len(),
                    "Comparison ready"
                );
                self.comparison = Some(ranked);
            }
            Err(e) => {
                warn!(error = %e, "Comparison cannot be ranked");
                self.comparison = None;
                self.show_error(format!("No comparison available: {e}"));
            }
        }
        self.purchase.reset();
        self.selected_offer = 0;
        true
    }

    /// Échec réseau de la comparaison ; ignoré si la session est périmée
    pub fn comparison_failed(&mut self, token: SessionToken, message: &str) -> bool {
        if !self.scanner.is_current(token) {
            return false;
        }
        self.stop_loading();
        self.comparison = None;
        self.show_error(format!("Comparison failed: {message}"));
        true
    }

    pub fn offer_up(&mut self) {
        self.selected_offer = self.selected_offer.saturating_sub(1);
    }

    pub fn offer_down(&mut self) {
        let len = self.comparison.as_ref().map_or(0, RankedComparison::len);
        self.selected_offer = step_down(self.selected_offer, len);
    }

    /// Sélectionne l'offre surlignée (seule la moins chère est achetable)
    pub fn select_offer(&mut self) -> bool {
        if self.comparison.is_none() {
            return false;
        }
        let accepted = self.purchase.select_offer(self.selected_offer);
        if !accepted && self.selected_offer != 0 {
            self.show_info("Only the cheapest offer can be confirmed");
        }
        accepted
    }

    /// Confirme l'achat ; retourne l'économie à envoyer au backend
    ///
    /// La comparaison est retirée de l'écran : il faut un nouveau scan.
    pub fn confirm_purchase(&mut self) -> Option<PendingSavings> {
        let comparison = self.comparison.as_ref()?;
        let market = comparison.cheapest().market_name.clone();
        let outcome = self.purchase.confirm(comparison)?;

        self.comparison = None;
        self.selected_offer = 0;

        match outcome {
            ConfirmOutcome::Saved(delta) => {
                let amount = delta.amount;
                match self.session.apply_savings(delta) {
                    Ok(Some(pending)) => {
                        self.show_info(format!("Bought at {market}, you saved {amount:.2}"));
                        Some(pending)
                    }
                    Ok(None) => {
                        self.show_info(format!("Bought at {market}"));
                        None
                    }
                    Err(e) => {
                        self.report_store_error(Err(e));
                        None
                    }
                }
            }
            ConfirmOutcome::NothingToSave => {
                self.show_info(format!("Bought at {market}, no price difference to save"));
                None
            }
        }
    }

    pub fn reject_purchase(&mut self) {
        if self.purchase.reject().is_some() {
            debug!("Purchase rejected");
        }
    }

    pub fn on_savings_synced(&mut self, pending_id: u64) {
        self.session.commit(pending_id);
    }

    /// L'envoi d'une économie a échoué : réconciliation selon la politique
    pub fn on_savings_failed(&mut self, pending_id: u64, message: &str) {
        match self.session.reconcile(pending_id) {
            Ok(Reconciliation::KeptLocal) => {
                self.show_error(format!("Savings not synced ({message}), kept locally"))
            }
            Ok(Reconciliation::RolledBack) => {
                self.show_error(format!("Savings not synced ({message}), local total reverted"))
            }
            Ok(Reconciliation::Unknown) => {}
            Err(e) => self.report_store_error(Err(e)),
        }
    }

    // ------------------------------------------------------------------------
    // Liste de courses
    // ------------------------------------------------------------------------

    pub fn list_up(&mut self) {
        self.list_selected = self.list_selected.saturating_sub(1);
    }

    pub fn list_down(&mut self) {
        self.list_selected = step_down(self.list_selected, self.shopping_list.len());
    }

    pub fn add_list_item(&mut self, text: &str) {
        if !self.shopping_list.add(text) {
            debug!("Shopping list item ignored (empty or duplicate)");
        }
    }

    pub fn request_delete(&mut self) {
        self.confirm_delete = true;
    }

    pub fn cancel_delete(&mut self) {
        self.confirm_delete = false;
    }

    pub fn is_awaiting_delete_confirmation(&self) -> bool {
        self.confirm_delete
    }

    pub fn delete_selected(&mut self) {
        if let Some(item) = self.shopping_list.remove_at(self.list_selected) {
            info!(item = %item, "Shopping list item removed");
        }
        if self.list_selected >= self.shopping_list.len() && self.list_selected > 0 {
            self.list_selected -= 1;
        }
        self.confirm_delete = false;
    }

    // ------------------------------------------------------------------------
    // Santé
    // ------------------------------------------------------------------------

    pub fn on_health_loaded(&mut self, catalog: HealthCatalog) {
        self.health = catalog;
        self.health_selected = 0;
    }

    pub fn switch_health_column(&mut self) {
        self.health_column = match self.health_column {
            HealthColumn::Conditions => HealthColumn::Allergens,
            HealthColumn::Allergens => HealthColumn::Conditions,
        };
        self.health_selected = 0;
    }

    pub fn health_up(&mut self) {
        self.health_selected = self.health_selected.saturating_sub(1);
    }

    pub fn health_down(&mut self) {
        let len = match self.health_column {
            HealthColumn::Conditions => self.health.conditions.len(),
            HealthColumn::Allergens => self.health.allergens.len(),
        };
        self.health_selected = step_down(self.health_selected, len);
    }

    /// Coche / décoche l'élément surligné
    pub fn toggle_health_item(&mut self) {
        let selection = &mut self.health.selection;
        match self.health_column {
            HealthColumn::Conditions => {
                if let Some(option) = self.health.conditions.get(self.health_selected) {
                    selection.toggle_condition(option.id);
                }
            }
            HealthColumn::Allergens => {
                if let Some(option) = self.health.allergens.get(self.health_selected) {
                    selection.toggle_allergen(option.id);
                }
            }
        }
    }

    /// Sélection enregistrée par le backend : reflétée dans le profil local
    pub fn on_health_saved(&mut self, selection: &HealthSelection) {
        let result = self.session.update_health(selection);
        self.report_store_error(result);
        self.show_info("Health profile saved");
    }

    // ------------------------------------------------------------------------
    // Recherche, fiche produit, IA
    // ------------------------------------------------------------------------

    pub fn on_search_results(&mut self, results: Vec<ProductSummary>) {
        if results.is_empty() {
            self.show_info("No product found");
        }
        self.search_results = results;
        self.search_selected = 0;
        self.show(Screen::Search);
    }

    pub fn search_up(&mut self) {
        self.search_selected = self.search_selected.saturating_sub(1);
    }

    pub fn search_down(&mut self) {
        self.search_selected = step_down(self.search_selected, self.search_results.len());
    }

    pub fn selected_search_result(&self) -> Option<&ProductSummary> {
        self.search_results.get(self.search_selected)
    }

    pub fn on_product_loaded(&mut self, product: ProductDetail) {
        self.product = Some(product);
        self.show(Screen::ProductDetail);
    }

    pub fn on_ai_commentary(&mut self, commentary: AiCommentary) {
        if commentary.comments.is_empty() {
            self.show_info("No comment for this product");
        }
        self.commentary = Some(commentary);
    }

    // ------------------------------------------------------------------------
    // Mode Input
    // ------------------------------------------------------------------------

    /// Passe en mode saisie ; l'écran courant est restauré à la sortie
    pub fn start_input(&mut self, prompt: impl Into<String>, target: InputTarget) {
        if self.current_screen != Screen::InputMode {
            self.input_return = self.current_screen;
        }
        self.current_screen = Screen::InputMode;
        self.input_buffer.clear();
        self.input_prompt = prompt.into();
        self.input_target = Some(target);
    }

    pub fn cancel_input(&mut self) {
        self.current_screen = self.input_return;
        self.input_buffer.clear();
        self.input_prompt.clear();
        self.input_target = None;
    }

    /// Valide la saisie : retourne la cible et le texte (trimé, non vide)
    pub fn submit_input(&mut self) -> Option<(InputTarget, String)> {
        let value = self.input_buffer.trim().to_string();
        let target = self.input_target.take();
        self.current_screen = self.input_return;
        self.input_buffer.clear();
        self.input_prompt.clear();

        match target {
            Some(target) if !value.is_empty() => Some((target, value)),
            _ => None,
        }
    }

    pub fn append_char(&mut self, c: char) {
        self.input_buffer.push(c);
    }

    pub fn backspace(&mut self) {
        self.input_buffer.pop();
    }

    pub fn is_in_input_mode(&self) -> bool {
        self.current_screen == Screen::InputMode
    }

    /// Écran affiché sous le prompt (l'écran courant hors mode Input)
    pub fn content_screen(&self) -> Screen {
        if self.is_in_input_mode() {
            self.input_return
        } else {
            self.current_screen
        }
    }
}

/// Index suivant dans une liste de `len` éléments, sans dépasser la fin
fn step_down(index: usize, len: usize) -> usize {
    (index + 1).min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SyncPolicy;
    use crate::models::{HealthOption, Offer};
    use crate::store::ProfileStore;

    fn app(policy: SyncPolicy, logged_in: bool) -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::open(ProfileStore::new(dir.path()), policy).unwrap();
        if logged_in {
            session
                .sign_in(UserProfile::new(1, "Ali", "ali@example.com"))
                .unwrap();
        }
        (dir, App::new(session))
    }

    fn result(barcode: &str, prices_cents: &[i64]) -> ComparisonResult {
        let offers = prices_cents
            .iter()
            .enumerate()
            .map(|(i, &c)| Offer::new(format!("market-{i}"), Decimal::new(c, 2)))
            .collect();
        ComparisonResult::new(barcode.into(), "Süt".into(), None, Some("Türkiye".into()), offers)
    }

    fn scan(app: &mut App, payload: &str) -> Option<(SessionToken, String)> {
        app.scan_buffer = payload.to_string();
        app.submit_scan()
    }

    #[test]
    fn test_start_screen_depends_on_session() {
        let (_dir, app) = app(SyncPolicy::KeepLocal, false);
        assert!(app.is_on(Screen::Login));

        let (_dir, app) = app_logged_in();
        assert!(app.is_on(Screen::Home));
    }

    fn app_logged_in() -> (tempfile::TempDir, App) {
        app(SyncPolicy::KeepLocal, true)
    }

    #[test]
    fn test_scan_compare_confirm_credits_savings() {
        let (_dir, mut app) = app_logged_in();
        app.open_scanner();

        let (token, barcode) = scan(&mut app, "8690504012345 extra").unwrap();
        assert_eq!(barcode, "8690504012345");
        assert!(app.is_loading_data());

        // Re-scan pendant la requête : pas de second envoi
        assert!(scan(&mut app, "8690504012345").is_none());

        assert!(app.apply_comparison(token, result(&barcode, &[1400, 1000, 1200])));
        let comparison = app.comparison.as_ref().unwrap();
        assert_eq!(comparison.cheapest().price, Decimal::new(1000, 2));
        assert_eq!(comparison.country_flag_emoji, "🇹🇷");

        assert!(app.select_offer());
        let pending = app.confirm_purchase().unwrap();
        assert_eq!(pending.delta.amount, Decimal::new(400, 2));

        assert!(app.comparison.is_none());

        let profile = app.session.profile().unwrap();
        assert_eq!(profile.total_savings, Decimal::new(400, 2));
        assert_eq!(profile.monthly_savings, Decimal::new(400, 2));

        app.on_savings_synced(pending.id);
        assert!(app.session.pending().is_empty());
    }

    #[test]
    fn test_invalid_scan_shows_alert_and_keeps_session_open() {
        let (_dir, mut app) = app_logged_in();
        app.open_scanner();

        assert!(scan(&mut app, "hello").is_none());
        assert_eq!(app.alert.as_ref().unwrap().kind, AlertKind::Error);
        assert!(scan(&mut app, "12345678").is_some());
    }

    #[test]
    fn test_stale_comparison_is_dropped() {
        let (_dir, mut app) = app_logged_in();
        app.open_scanner();
        let (old, _) = scan(&mut app, "12345678").unwrap();

        app.open_scanner();
        assert!(!app.apply_comparison(old, result("12345678", &[100, 200])));
        assert!(app.comparison.is_none());
        assert!(!app.comparison_failed(old, "timeout"));
    }

    #[test]
    fn test_empty_comparison_clears_view() {
        let (_dir, mut app) = app_logged_in();
        let token = app.open_scanner();
        scan(&mut app, "12345678");

        assert!(app.apply_comparison(token, result("12345678", &[])));
        assert!(app.comparison.is_none());
        assert!(app.alert.is_some());
        assert!(!app.is_loading_data());
    }

    #[test]
    fn test_only_cheapest_offer_selectable() {
        let (_dir, mut app) = app_logged_in();
        let token = app.open_scanner();
        scan(&mut app, "12345678");
        app.apply_comparison(token, result("12345678", &[300, 100]));

        app.offer_down();
        assert!(!app.select_offer());
        app.offer_up();
        assert!(app.select_offer());

        app.reject_purchase();
        assert!(app.confirm_purchase().is_none());
        assert_eq!(app.session.profile().unwrap().total_savings, Decimal::ZERO);
    }

    #[test]
    fn test_single_offer_confirms_without_savings() {
        let (_dir, mut app) = app_logged_in();
        let token = app.open_scanner();
        scan(&mut app, "12345678");
        app.apply_comparison(token, result("12345678", &[999]));

        app.select_offer();
        assert!(app.confirm_purchase().is_none());
        assert_eq!(app.session.profile().unwrap().total_savings, Decimal::ZERO);
    }

    #[test]
    fn test_failed_sync_rolls_back_with_policy() {
        let (_dir, mut app) = app(SyncPolicy::RollBack, true);
        let token = app.open_scanner();
        scan(&mut app, "12345678");
        app.apply_comparison(token, result("12345678", &[1000, 1400]));
        app.select_offer();
        let pending = app.confirm_purchase().unwrap();

        app.on_savings_failed(pending.id, "HTTP 500");
        assert_eq!(app.session.profile().unwrap().total_savings, Decimal::ZERO);
        assert_eq!(app.alert.as_ref().unwrap().kind, AlertKind::Error);
    }

    #[test]
    fn test_registration_validation_alerts() {
        let (_dir, mut app) = app(SyncPolicy::KeepLocal, false);
        app.register_form.set_value(0, "Ayşe");
        app.register_form.set_value(1, "Yılmaz");
        app.register_form.set_value(2, "ayse@example.com");
        app.register_form.set_value(3, "123");
        app.register_form.set_value(4, "05321234567");

        assert!(app.registration().is_none());
        assert!(app.alert.as_ref().unwrap().message.contains("at least 6"));

        app.register_form.set_value(3, "secret1");
        let registration = app.registration().unwrap();
        assert_eq!(registration.national_id, None);

        app.on_registered();
        assert!(app.is_on(Screen::Login));
        assert_eq!(app.login_form.value(0), "ayse@example.com");
    }

    #[test]
    fn test_login_and_logout() {
        let (_dir, mut app) = app(SyncPolicy::KeepLocal, false);
        assert!(app.login_credentials().is_none());

        app.on_logged_in(UserProfile::new(5, "Ece", "ece@example.com"));
        assert!(app.is_on(Screen::Home));
        assert_eq!(app.session.user_id(), Some(5));

        app.logout();
        assert!(app.is_on(Screen::Login));
        assert!(!app.session.is_logged_in());
    }

    #[test]
    fn test_shopping_list_two_step_delete() {
        let (_dir, mut app) = app_logged_in();
        app.add_list_item("Milk");
        app.add_list_item("Bread");
        app.list_down();

        app.request_delete();
        assert!(app.is_awaiting_delete_confirmation());
        app.delete_selected();

        assert_eq!(app.shopping_list.items(), &["Milk".to_string()]);
        assert_eq!(app.list_selected, 0);
        assert!(!app.is_awaiting_delete_confirmation());
    }

    #[test]
    fn test_input_mode_returns_to_previous_screen() {
        let (_dir, mut app) = app_logged_in();
        app.show(Screen::ShoppingList);
        app.start_input("Add item: ", InputTarget::ShoppingItem);
        assert!(app.is_in_input_mode());

        for c in "  Eggs ".chars() {
            app.append_char(c);
        }
        let submitted = app.submit_input();
        assert_eq!(submitted, Some((InputTarget::ShoppingItem, "Eggs".to_string())));
        assert!(app.is_on(Screen::ShoppingList));

        app.start_input("Add item: ", InputTarget::ShoppingItem);
        assert_eq!(app.submit_input(), None);
    }

    #[test]
    fn test_health_toggle_and_save() {
        let (_dir, mut app) = app_logged_in();
        app.on_health_loaded(HealthCatalog {
            conditions: vec![HealthOption { id: 1, name: "Diabetes".into() }],
            allergens: vec![
                HealthOption { id: 7, name: "Gluten".into() },
                HealthOption { id: 8, name: "Lactose".into() },
            ],
            selection: HealthSelection::default(),
        });

        app.toggle_health_item();
        app.switch_health_column();
        app.health_down();
        app.toggle_health_item();

        let selection = app.health.selection.clone();
        assert!(selection.conditions.contains(&1));
        assert!(selection.allergens.contains(&8));

        app.on_health_saved(&selection);
        assert_eq!(app.session.health_selection(), selection);
    }

    #[test]
    fn test_profile_refresh_builds_chart() {
        let (_dir, mut app) = app_logged_in();
        let mut daily = BTreeMap::new();
        daily.insert("2024-05-13".to_string(), Decimal::new(250, 2));

        let today = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        app.on_profile_refreshed(
            UserProfile::new(1, "Ali", "ali@example.com"),
            Some(Decimal::new(250, 2)),
            &daily,
            today,
        );

        assert_eq!(app.chart.weekly.values[1], Decimal::new(250, 2));
        assert_eq!(app.session.profile().unwrap().monthly_savings, Decimal::new(250, 2));

        app.toggle_chart_period();
        assert_eq!(app.chart_period, ChartPeriod::Monthly);
    }
}
