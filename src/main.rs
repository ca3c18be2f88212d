// ============================================================================
// LazyCart - Comparateur de prix de supermarché dans le terminal
// ============================================================================
// Point d'entrée de l'application
//
// ARCHITECTURE :
// - Thread principal : boucle d'événements + rendu (ratatui)
// - Thread worker : runtime tokio dédié, exécute les appels au backend
// - Communication par channels mpsc (AppCommand → worker, AppResult ← worker)
// - État partagé : Arc<Mutex<App>>
//
// CONCEPTS RUST :
// 1. Channels : le thread UI ne bloque jamais sur le réseau
// 2. Arc<Mutex<T>> : état partagé entre threads
// 3. Chaque comparaison porte le jeton de sa session de scan ; une
//    réponse tardive d'une session remplacée est jetée par App
// ============================================================================

use std::collections::BTreeMap;
use std::io;
use std::path::Path;
use std::sync::{mpsc, Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

use lazycart::api::BackendClient;
use lazycart::app::{App, InputTarget, Screen};
use lazycart::config::Config;
use lazycart::models::{
    AiCommentary, ComparisonResult, HealthCatalog, HealthSelection, ProductDetail, ProductSummary,
    Registration, UserProfile,
};
use lazycart::scan::SessionToken;
use lazycart::session::{PendingSavings, Session};
use lazycart::store::ProfileStore;
use lazycart::ui::{events::EventHandler, render, Event};

// ============================================================================
// Messages entre le thread UI et le worker
// ============================================================================

/// Commandes envoyées au worker
#[derive(Debug, Clone)]
enum AppCommand {
    Login { email: String, password: String },
    Register(Registration),
    RefreshProfile { user_id: i64 },
    Compare { token: SessionToken, barcode: String },
    SyncSavings(PendingSavings),
    Search { query: String },
    LoadProduct { product_id: String },
    LoadHealth { user_id: i64 },
    SaveHealth { user_id: i64, selection: HealthSelection },
    AskAssistant { product_id: String, selection: HealthSelection },
}

/// Résultats renvoyés par le worker
#[derive(Debug)]
enum AppResult {
    LoggedIn(UserProfile),
    Registered,
    ProfileRefreshed {
        profile: UserProfile,
        monthly: Option<Decimal>,
        daily: BTreeMap<String, Decimal>,
    },
    ComparisonLoaded { token: SessionToken, result: ComparisonResult },
    ComparisonFailed { token: SessionToken, error: String },
    SavingsSynced { pending_id: u64 },
    SavingsFailed { pending_id: u64, error: String },
    SearchResults(Vec<ProductSummary>),
    ProductLoaded(ProductDetail),
    HealthLoaded(HealthCatalog),
    HealthSaved(HealthSelection),
    Commentary(AiCommentary),
    /// Échec d'une opération sans traitement particulier
    Failed { what: &'static str, error: String },
}

// ============================================================================
// Logging
// ============================================================================

/// Logs dans un fichier à rotation quotidienne (la TUI occupe stdout)
///
/// Niveau configurable via RUST_LOG, par défaut "lazycart=debug,info".
fn init_logging(log_dir: &Path) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    std::fs::create_dir_all(log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "lazycart.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lazycart=debug,info".into()),
        )
        .init();

    info!(log_dir = %log_dir.display(), "Logging initialisé");
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    let config = Config::load()?;

    init_logging(&config.log_dir).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    info!("LazyCart starting up");
    config.log_resolved();

    let client = BackendClient::new(&config)?;
    let session = Session::open(ProfileStore::new(&config.data_dir), config.sync_policy)?;
    let logged_user = session.user_id();

    let app = Arc::new(Mutex::new(App::new(session)));

    let (command_tx, command_rx) = mpsc::channel::<AppCommand>();
    let (result_tx, result_rx) = mpsc::channel::<AppResult>();

    info!("Spawning background worker thread");
    spawn_background_worker(client, command_rx, result_tx, app.clone());

    // Profil stocké : on rafraîchit les totaux dès le démarrage
    if let Some(user_id) = logged_user {
        send(&command_tx, AppCommand::RefreshProfile { user_id });
    }

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let events = EventHandler::new();

    info!("Starting event loop");
    let result = run(&mut terminal, app, &events, command_tx, result_rx);

    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

/// Verrouille l'état ; un mutex empoisonné reste utilisable (état UI seul)
fn lock(app: &Mutex<App>) -> MutexGuard<'_, App> {
    app.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Worker
// ============================================================================

/// Lance le thread worker avec son propre runtime tokio
///
/// Les commandes sont traitées une par une, dans l'ordre d'arrivée.
fn spawn_background_worker(
    client: BackendClient,
    command_rx: mpsc::Receiver<AppCommand>,
    result_tx: mpsc::Sender<AppResult>,
    app: Arc<Mutex<App>>,
) {
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => {
                error!(error = ?e, "Failed to create tokio runtime, worker disabled");
                return;
            }
        };

        while let Ok(command) = command_rx.recv() {
            info!(command = command_name(&command), "Worker received command");

            lock(&app).start_loading(Some(loading_message(&command)));
            let result = runtime.block_on(execute(&client, command));
            lock(&app).stop_loading();

            if result_tx.send(result).is_err() {
                break;
            }
        }

        info!("Worker thread exiting (channel closed)");
    });
}

/// Nom de la commande pour les logs (sans mot de passe)
fn command_name(command: &AppCommand) -> &'static str {
    match command {
        AppCommand::Login { .. } => "login",
        AppCommand::Register(_) => "register",
        AppCommand::RefreshProfile { .. } => "refresh_profile",
        AppCommand::Compare { .. } => "compare",
        AppCommand::SyncSavings(_) => "sync_savings",
        AppCommand::Search { .. } => "search",
        AppCommand::LoadProduct { .. } => "load_product",
        AppCommand::LoadHealth { .. } => "load_health",
        AppCommand::SaveHealth { .. } => "save_health",
        AppCommand::AskAssistant { .. } => "ask_assistant",
    }
}

fn loading_message(command: &AppCommand) -> String {
    match command {
        AppCommand::Login { .. } => "Signing in...".to_string(),
        AppCommand::Register(_) => "Creating account...".to_string(),
        AppCommand::RefreshProfile { .. } => "Refreshing profile...".to_string(),
        AppCommand::Compare { barcode, .. } => format!("Comparing prices for {barcode}..."),
        AppCommand::SyncSavings(_) => "Saving your savings...".to_string(),
        AppCommand::Search { query } => format!("Searching {query}..."),
        AppCommand::LoadProduct { .. } => "Loading product...".to_string(),
        AppCommand::LoadHealth { .. } => "Loading health profile...".to_string(),
        AppCommand::SaveHealth { .. } => "Saving health profile...".to_string(),
        AppCommand::AskAssistant { .. } => "Asking the assistant...".to_string(),
    }
}

/// Exécute une commande ; toute erreur devient un AppResult
async fn execute(client: &BackendClient, command: AppCommand) -> AppResult {
    match command {
        AppCommand::Login { email, password } => match client.login(&email, &password).await {
            Ok(profile) => AppResult::LoggedIn(profile),
            Err(e) => failed("login", e),
        },

        AppCommand::Register(registration) => match client.register(&registration).await {
            Ok(()) => AppResult::Registered,
            Err(e) => failed("registration", e),
        },

        AppCommand::RefreshProfile { user_id } => {
            let (profile, monthly, daily) = tokio::join!(
                client.fetch_user(user_id),
                client.monthly_savings(user_id),
                client.chart_data(user_id),
            );
            let profile = match profile {
                Ok(profile) => profile,
                Err(e) => return failed("profile refresh", e),
            };
            // Total mensuel et graphique sont optionnels : on garde le profil
            let monthly = monthly.unwrap_or_else(|e| {
                warn!(error = ?e, "Monthly savings unavailable");
                None
            });
            let daily = daily.unwrap_or_else(|e| {
                warn!(error = ?e, "Chart data unavailable");
                BTreeMap::new()
            });
            AppResult::ProfileRefreshed { profile, monthly, daily }
        }

        AppCommand::Compare { token, barcode } => match client.compare(&barcode).await {
            Ok(result) => AppResult::ComparisonLoaded { token, result },
            Err(e) => {
                error!(barcode = %barcode, error = ?e, "Comparison failed");
                AppResult::ComparisonFailed {
                    token,
                    error: e.to_string(),
                }
            }
        },

        AppCommand::SyncSavings(pending) => {
            match client.add_savings(pending.user_id, pending.delta.amount).await {
                Ok(()) => AppResult::SavingsSynced {
                    pending_id: pending.id,
                },
                Err(e) => {
                    error!(pending_id = pending.id, error = ?e, "Savings sync failed");
                    AppResult::SavingsFailed {
                        pending_id: pending.id,
                        error: e.to_string(),
                    }
                }
            }
        }

        AppCommand::Search { query } => match client.search(&query).await {
            Ok(results) => AppResult::SearchResults(results),
            Err(e) => failed("search", e),
        },

        AppCommand::LoadProduct { product_id } => match client.product_detail(&product_id).await {
            Ok(product) => AppResult::ProductLoaded(product),
            Err(e) => failed("product detail", e),
        },

        AppCommand::LoadHealth { user_id } => {
            let (conditions, allergens, selection) = tokio::join!(
                client.health_conditions(),
                client.allergens(),
                client.health_selection(user_id),
            );
            match (conditions, allergens, selection) {
                (Ok(conditions), Ok(allergens), Ok(selection)) => AppResult::HealthLoaded(HealthCatalog {
                    conditions,
                    allergens,
                    selection,
                }),
                (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => failed("health profile", e),
            }
        }

        AppCommand::SaveHealth { user_id, selection } => {
            match client.save_health_selection(user_id, &selection).await {
                Ok(()) => AppResult::HealthSaved(selection),
                Err(e) => failed("health profile save", e),
            }
        }

        AppCommand::AskAssistant { product_id, selection } => {
            match client.ai_commentary(&product_id, &selection).await {
                Ok(commentary) => AppResult::Commentary(commentary),
                Err(e) => failed("assistant", e),
            }
        }
    }
}

fn failed(what: &'static str, e: anyhow::Error) -> AppResult {
    error!(what, error = ?e, "Backend operation failed");
    AppResult::Failed {
        what,
        error: e.to_string(),
    }
}

// ============================================================================
// Boucle principale
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: Arc<Mutex<App>>,
    events: &EventHandler,
    command_tx: mpsc::Sender<AppCommand>,
    result_rx: mpsc::Receiver<AppResult>,
) -> Result<()> {
    loop {
        if !lock(&app).is_running() {
            break;
        }

        // Applique tous les résultats disponibles sans bloquer
        loop {
            match result_rx.try_recv() {
                Ok(result) => apply_result(&mut lock(&app), result),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    error!("Worker thread disconnected!");
                    break;
                }
            }
        }

        terminal.draw(|frame| render(frame, &lock(&app)))?;

        match events.next() {
            Ok(Event::Tick) => {}
            Ok(event) => handle_event(&mut lock(&app), event, &command_tx),
            Err(e) => warn!(error = ?e, "Failed to read terminal event"),
        }
    }

    Ok(())
}

fn apply_result(app: &mut App, result: AppResult) {
    match result {
        AppResult::LoggedIn(profile) => {
            let user_id = profile.id;
            app.on_logged_in(profile);
            debug!(user_id, "Logged in");
        }
        AppResult::Registered => app.on_registered(),
        AppResult::ProfileRefreshed { profile, monthly, daily } => {
            let today = chrono::Local::now().date_naive();
            app.on_profile_refreshed(profile, monthly, &daily, today);
        }
        AppResult::ComparisonLoaded { token, result } => {
            app.apply_comparison(token, result);
        }
        AppResult::ComparisonFailed { token, error } => {
            app.comparison_failed(token, &error);
        }
        AppResult::SavingsSynced { pending_id } => app.on_savings_synced(pending_id),
        AppResult::SavingsFailed { pending_id, error } => app.on_savings_failed(pending_id, &error),
        AppResult::SearchResults(results) => app.on_search_results(results),
        AppResult::ProductLoaded(product) => app.on_product_loaded(product),
        AppResult::HealthLoaded(catalog) => app.on_health_loaded(catalog),
        AppResult::HealthSaved(selection) => app.on_health_saved(&selection),
        AppResult::Commentary(commentary) => app.on_ai_commentary(commentary),
        AppResult::Failed { what, error } => app.show_error(format!("{what} failed: {error}")),
    }
}

// ============================================================================
// Gestion des touches
// ============================================================================

/// Envoie une commande au worker ; false (et un log) si le worker est arrêté
fn send(command_tx: &mpsc::Sender<AppCommand>, command: AppCommand) -> bool {
    let name = command_name(&command);
    if command_tx.send(command).is_err() {
        error!(command = name, "Worker channel closed, command dropped");
        return false;
    }
    true
}

fn handle_event(app: &mut App, event: Event, command_tx: &mpsc::Sender<AppCommand>) {
    use lazycart::ui::events::{is_force_quit_event, is_quit_event};

    if is_force_quit_event(&event) {
        info!("User forced quit");
        app.quit();
        return;
    }

    // Une alerte est effacée par la touche suivante, qui reste traitée
    app.dismiss_alert();

    // Two-step quit hors saisie de texte
    if !app.is_typing() && is_quit_event(&event) {
        if app.is_awaiting_quit_confirmation() {
            info!("User confirmed quit");
            app.quit();
        } else {
            info!("User requested quit (awaiting confirmation)");
            app.cancel_confirmations();
            app.request_quit();
        }
        return;
    }
    app.cancel_quit();

    match app.current_screen {
        Screen::Login => handle_login(app, &event, command_tx),
        Screen::Register => handle_register(app, &event, command_tx),
        Screen::Home => handle_home(app, &event, command_tx),
        Screen::Compare => handle_compare(app, &event, command_tx),
        Screen::ShoppingList => handle_shopping_list(app, &event),
        Screen::Profile => handle_profile(app, &event, command_tx),
        Screen::Health => handle_health(app, &event, command_tx),
        Screen::Chatbot => handle_chatbot(app, &event),
        Screen::Search => handle_search(app, &event, command_tx),
        Screen::ProductDetail => handle_product_detail(app, &event),
        Screen::InputMode => handle_input(app, &event, command_tx),
    }
}

fn handle_login(app: &mut App, event: &Event, command_tx: &mpsc::Sender<AppCommand>) {
    use lazycart::ui::events::{
        get_char_from_event, is_back_tab_event, is_backspace_event, is_down_event, is_enter_event,
        is_register_event, is_tab_event, is_up_event,
    };

    if is_enter_event(event) {
        if let Some((email, password)) = app.login_credentials() {
            info!(email = %email, "User submitted login");
            send(command_tx, AppCommand::Login { email, password });
        }
    } else if is_register_event(event) {
        app.show(Screen::Register);
    } else if is_tab_event(event) || is_down_event(event) {
        app.login_form.next_field();
    } else if is_back_tab_event(event) || is_up_event(event) {
        app.login_form.previous_field();
    } else if is_backspace_event(event) {
        app.login_form.backspace();
    } else if let Some(c) = get_char_from_event(event) {
        app.login_form.push_char(c);
    }
}

fn handle_register(app: &mut App, event: &Event, command_tx: &mpsc::Sender<AppCommand>) {
    use lazycart::ui::events::{
        get_char_from_event, is_back_tab_event, is_backspace_event, is_enter_event, is_escape_event,
        is_tab_event,
    };

    if is_escape_event(event) {
        app.show(Screen::Login);
    } else if is_enter_event(event) {
        if let Some(registration) = app.registration() {
            info!(email = %registration.email, "User submitted registration");
            send(command_tx, AppCommand::Register(registration));
        }
    } else if is_tab_event(event) {
        app.register_form.next_field();
    } else if is_back_tab_event(event) {
        app.register_form.previous_field();
    } else if is_backspace_event(event) {
        app.register_form.backspace();
    } else if let Some(c) = get_char_from_event(event) {
        app.register_form.push_char(c);
    }
}

fn handle_home(app: &mut App, event: &Event, command_tx: &mpsc::Sender<AppCommand>) {
    use lazycart::ui::events::menu_choice;

    let Some(choice) = menu_choice(event) else {
        app.cancel_confirmations();
        return;
    };

    if choice != 'o' {
        app.cancel_confirmations();
    }

    match choice {
        's' => {
            let token = app.open_scanner();
            debug!(session = token.id(), "Scanner opened");
        }
        'f' => app.start_input("Search product: ", InputTarget::SearchQuery),
        'l' => app.show(Screen::ShoppingList),
        'p' => {
            app.show(Screen::Profile);
            if let Some(user_id) = app.session.user_id() {
                send(command_tx, AppCommand::RefreshProfile { user_id });
            }
        }
        'h' => {
            app.show(Screen::Health);
            if let Some(user_id) = app.session.user_id() {
                send(command_tx, AppCommand::LoadHealth { user_id });
            }
        }
        'c' => app.show(Screen::Chatbot),
        'o' => {
            if app.is_awaiting_logout_confirmation() {
                info!("User confirmed logout");
                app.logout();
            } else {
                app.request_logout();
            }
        }
        _ => {}
    }
}

fn handle_compare(app: &mut App, event: &Event, command_tx: &mpsc::Sender<AppCommand>) {
    use lazycart::ui::events::{
        get_char_from_event, is_backspace_event, is_down_event, is_enter_event, is_escape_event,
        is_no_event, is_tab_event, is_up_event, is_yes_event,
    };

    // Confirmation d'achat en attente : seules y / n / Esc comptent
    if app.purchase.is_awaiting_confirmation() {
        if is_yes_event(event) || is_enter_event(event) {
            if let Some(pending) = app.confirm_purchase() {
                send(command_tx, AppCommand::SyncSavings(pending));
            }
        } else if is_no_event(event) || is_escape_event(event) {
            app.reject_purchase();
        }
        return;
    }

    if is_escape_event(event) {
        app.close_scanner();
    } else if is_tab_event(event) {
        let token = app.open_scanner();
        debug!(session = token.id(), "Scanner reopened");
    } else if is_enter_event(event) {
        if app.scan_buffer.is_empty() {
            app.select_offer();
        } else if let Some((token, barcode)) = app.submit_scan() {
            send(command_tx, AppCommand::Compare { token, barcode });
        }
    } else if is_backspace_event(event) {
        app.scan_buffer.pop();
    } else if is_up_event(event) {
        app.offer_up();
    } else if is_down_event(event) {
        app.offer_down();
    } else if let Some(c) = get_char_from_event(event) {
        app.scan_buffer.push(c);
    }
}

fn handle_shopping_list(app: &mut App, event: &Event) {
    use lazycart::ui::events::{is_add_event, is_delete_event, is_down_event, is_escape_event, is_up_event};

    if is_delete_event(event) && !app.shopping_list.is_empty() {
        if app.is_awaiting_delete_confirmation() {
            info!("User confirmed delete");
            app.delete_selected();
        } else {
            app.request_delete();
        }
        return;
    }
    app.cancel_delete();

    if is_escape_event(event) {
        app.show(Screen::Home);
    } else if is_add_event(event) {
        app.start_input("Add item: ", InputTarget::ShoppingItem);
    } else if is_up_event(event) {
        app.list_up();
    } else if is_down_event(event) {
        app.list_down();
    }
}

fn handle_profile(app: &mut App, event: &Event, command_tx: &mpsc::Sender<AppCommand>) {
    use lazycart::ui::events::{is_escape_event, is_left_event, is_refresh_event, is_right_event};

    if is_escape_event(event) {
        app.show(Screen::Home);
    } else if is_left_event(event) || is_right_event(event) {
        app.toggle_chart_period();
    } else if is_refresh_event(event) {
        if let Some(user_id) = app.session.user_id() {
            send(command_tx, AppCommand::RefreshProfile { user_id });
        }
    }
}

fn handle_health(app: &mut App, event: &Event, command_tx: &mpsc::Sender<AppCommand>) {
    use lazycart::ui::events::{
        is_down_event, is_escape_event, is_left_event, is_right_event, is_save_event, is_space_event,
        is_up_event,
    };

    if is_escape_event(event) {
        app.show(Screen::Home);
    } else if is_left_event(event) || is_right_event(event) {
        app.switch_health_column();
    } else if is_up_event(event) {
        app.health_up();
    } else if is_down_event(event) {
        app.health_down();
    } else if is_space_event(event) {
        app.toggle_health_item();
    } else if is_save_event(event) {
        if let Some(user_id) = app.session.user_id() {
            let selection = app.health.selection.clone();
            send(command_tx, AppCommand::SaveHealth { user_id, selection });
        }
    }
}

fn handle_chatbot(app: &mut App, event: &Event) {
    use lazycart::ui::events::{is_add_event, is_escape_event};

    if is_escape_event(event) {
        app.show(Screen::Home);
    } else if is_add_event(event) {
        app.start_input("Product id: ", InputTarget::AiProductId);
    }
}

fn handle_search(app: &mut App, event: &Event, command_tx: &mpsc::Sender<AppCommand>) {
    use lazycart::ui::events::{is_add_event, is_down_event, is_enter_event, is_escape_event, is_up_event};

    if is_escape_event(event) {
        app.show(Screen::Home);
    } else if is_add_event(event) {
        app.start_input("Search product: ", InputTarget::SearchQuery);
    } else if is_up_event(event) {
        app.search_up();
    } else if is_down_event(event) {
        app.search_down();
    } else if is_enter_event(event) {
        if let Some(product) = app.selected_search_result() {
            let product_id = product.id.clone();
            send(command_tx, AppCommand::LoadProduct { product_id });
        }
    }
}

fn handle_product_detail(app: &mut App, event: &Event) {
    use lazycart::ui::events::{is_escape_event, is_space_event};

    if is_escape_event(event) || is_space_event(event) {
        app.show(Screen::Search);
    }
}

fn handle_input(app: &mut App, event: &Event, command_tx: &mpsc::Sender<AppCommand>) {
    use lazycart::ui::events::{get_char_from_event, is_backspace_event, is_enter_event, is_escape_event};

    if is_escape_event(event) {
        info!("User cancelled input");
        app.cancel_input();
    } else if is_enter_event(event) {
        let Some((target, value)) = app.submit_input() else {
            debug!("Empty input, ignoring");
            return;
        };
        match target {
            InputTarget::ShoppingItem => app.add_list_item(&value),
            InputTarget::SearchQuery => {
                send(command_tx, AppCommand::Search { query: value });
            }
            InputTarget::AiProductId => {
                let selection = app.session.health_selection();
                send(
                    command_tx,
                    AppCommand::AskAssistant {
                        product_id: value,
                        selection,
                    },
                );
            }
        }
    } else if is_backspace_event(event) {
        app.backspace();
    } else if let Some(c) = get_char_from_event(event) {
        app.append_char(c);
    }
}

// ============================================================================
// Terminal
// ============================================================================

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);

    Terminal::new(backend).map_err(|e| e.into())
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    terminal.show_cursor()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_delivers_startup_refresh() {
        let (command_tx, command_rx) = mpsc::channel();

        assert!(send(&command_tx, AppCommand::RefreshProfile { user_id: 42 }));
        assert!(matches!(
            command_rx.try_recv(),
            Ok(AppCommand::RefreshProfile { user_id: 42 })
        ));
    }

    #[test]
    fn test_send_reports_stopped_worker() {
        let (command_tx, command_rx) = mpsc::channel();
        drop(command_rx);

        assert!(!send(&command_tx, AppCommand::RefreshProfile { user_id: 42 }));
    }
}
