// ============================================================================
// Gestion des événements
// ============================================================================
// Capture et traite les événements clavier
//
// CONCEPTS RUST :
// 1. Enums pour représenter différents types d'événements
// 2. Pattern matching pour traiter chaque type d'événement
// 3. Fonctions is_*_event : une touche = une intention, testable seule
//
// Le lecteur de codes-barres est un "clavier" : ses caractères arrivent
// comme des touches normales, terminées par Enter.
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Événements de l'application
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Aucun événement pendant l'intervalle de polling
    Tick,
}

/// Gestionnaire d'événements (polling crossterm)
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            tick_rate: Duration::from_millis(100),
        }
    }

    /// Attend le prochain événement (ou Tick après `tick_rate`)
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                // Windows envoie Press + Release : on ne garde que Press
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn key_code(event: &Event) -> Option<KeyCode> {
    match event {
        Event::Key(key) => Some(key.code),
        Event::Tick => None,
    }
}

fn is_char(event: &Event, chars: &[char]) -> bool {
    match event {
        Event::Key(key) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            matches!(key.code, KeyCode::Char(c) if chars.contains(&c))
        }
        _ => false,
    }
}

/// Ctrl-C : sortie immédiate, même pendant une saisie
pub fn is_force_quit_event(event: &Event) -> bool {
    matches!(event, Event::Key(key)
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
}

pub fn is_quit_event(event: &Event) -> bool {
    is_char(event, &['q', 'Q'])
}

pub fn is_escape_event(event: &Event) -> bool {
    key_code(event) == Some(KeyCode::Esc)
}

pub fn is_space_event(event: &Event) -> bool {
    is_char(event, &[' '])
}

pub fn is_enter_event(event: &Event) -> bool {
    key_code(event) == Some(KeyCode::Enter)
}

pub fn is_tab_event(event: &Event) -> bool {
    key_code(event) == Some(KeyCode::Tab)
}

pub fn is_back_tab_event(event: &Event) -> bool {
    key_code(event) == Some(KeyCode::BackTab)
}

pub fn is_backspace_event(event: &Event) -> bool {
    key_code(event) == Some(KeyCode::Backspace)
}

pub fn is_up_event(event: &Event) -> bool {
    key_code(event) == Some(KeyCode::Up) || is_char(event, &['k', 'K'])
}

pub fn is_down_event(event: &Event) -> bool {
    key_code(event) == Some(KeyCode::Down) || is_char(event, &['j', 'J'])
}

/// ← / → (ou h / l) : change de colonne ou de période
pub fn is_left_event(event: &Event) -> bool {
    key_code(event) == Some(KeyCode::Left) || is_char(event, &['h'])
}

pub fn is_right_event(event: &Event) -> bool {
    key_code(event) == Some(KeyCode::Right) || is_char(event, &['l'])
}

/// F2 : ouvre le formulaire d'inscription depuis le login
pub fn is_register_event(event: &Event) -> bool {
    key_code(event) == Some(KeyCode::F(2))
}

pub fn is_add_event(event: &Event) -> bool {
    is_char(event, &['a', 'A'])
}

pub fn is_delete_event(event: &Event) -> bool {
    is_char(event, &['d', 'D'])
}

pub fn is_refresh_event(event: &Event) -> bool {
    is_char(event, &['r', 'R'])
}

pub fn is_save_event(event: &Event) -> bool {
    is_char(event, &['s', 'S'])
}

pub fn is_yes_event(event: &Event) -> bool {
    is_char(event, &['y', 'Y'])
}

pub fn is_no_event(event: &Event) -> bool {
    is_char(event, &['n', 'N'])
}

/// Raccourcis du menu principal
pub fn menu_choice(event: &Event) -> Option<char> {
    if let Event::Key(key) = event {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }
        if let KeyCode::Char(c) = key.code {
            return Some(c.to_ascii_lowercase());
        }
    }
    None
}

/// Caractère imprimable (saisie de texte), sans Ctrl
pub fn get_char_from_event(event: &Event) -> Option<char> {
    match event {
        Event::Key(key) if !key.modifiers.contains(KeyModifiers::CONTROL) => match key.code {
            KeyCode::Char(c) if !c.is_control() => Some(c),
            _ => None,
        },
        _ => None,
    }
}
