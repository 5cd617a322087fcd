//! Keyboard → logical input signals
//!
//! The game only knows two signals: quit, and one action button that jumps
//! or restarts. The action is edge-triggered: a held key should produce one
//! press. Browsers flag auto-repeat on the event itself. Terminals only do
//! so with the keyboard enhancement protocol, so natively [`KeyEdgeFilter`]
//! also suppresses repeated presses of a key that has not been released.

use crate::Millis;

/// Logical input signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSignal {
    Quit,
    /// Jump while playing, restart after game over
    Action,
}

/// Signals collected during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFrame {
    pub quit: bool,
    pub action: bool,
}

impl InputFrame {
    pub fn push(&mut self, signal: InputSignal) {
        match signal {
            InputSignal::Quit => self.quit = true,
            InputSignal::Action => self.action = true,
        }
    }

    /// Return the collected signals and start a new frame
    pub fn take(&mut self) -> InputFrame {
        std::mem::take(self)
    }
}

/// Map a DOM `KeyboardEvent.key` value. Auto-repeat must be filtered by the
/// caller via `KeyboardEvent.repeat`.
pub fn signal_for_dom_key(key: &str) -> Option<InputSignal> {
    match key {
        " " | "Spacebar" | "ArrowUp" | "Enter" => Some(InputSignal::Action),
        "Escape" | "q" | "Q" => Some(InputSignal::Quit),
        _ => None,
    }
}

/// Map a terminal key event; only presses count
#[cfg(not(target_arch = "wasm32"))]
pub fn signal_for_key_event(event: &crossterm::event::KeyEvent) -> Option<InputSignal> {
    use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};

    if event.kind != KeyEventKind::Press {
        return None;
    }

    match event.code {
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => Some(InputSignal::Action),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(InputSignal::Quit),
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputSignal::Quit)
        }
        _ => None,
    }
}

/// Quiet time after which a key counts as released when the terminal does
/// not report releases. Longer than the usual auto-repeat start delay.
#[cfg(not(target_arch = "wasm32"))]
pub const RELEASE_GAP_MS: Millis = 700;

/// Turns terminal key events into edge-triggered signals.
///
/// The last action key stays "held" until its release arrives or until no
/// event for it has been seen for `release_gap_ms`. Presses of a held key
/// are auto-repeat and are dropped.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct KeyEdgeFilter {
    held: Option<crossterm::event::KeyCode>,
    last_seen_ms: Millis,
    release_gap_ms: Millis,
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyEdgeFilter {
    pub fn new(release_gap_ms: Millis) -> Self {
        Self {
            held: None,
            last_seen_ms: 0,
            release_gap_ms,
        }
    }

    pub fn signal(
        &mut self,
        event: &crossterm::event::KeyEvent,
        now_ms: Millis,
    ) -> Option<InputSignal> {
        use crossterm::event::KeyEventKind;

        let held = self.held == Some(event.code)
            && now_ms.saturating_sub(self.last_seen_ms) <= self.release_gap_ms;

        match event.kind {
            KeyEventKind::Release => {
                if self.held == Some(event.code) {
                    self.held = None;
                }
                None
            }
            KeyEventKind::Repeat => {
                if held {
                    self.last_seen_ms = now_ms;
                }
                None
            }
            KeyEventKind::Press => match signal_for_key_event(event)? {
                InputSignal::Action if held => {
                    self.last_seen_ms = now_ms;
                    None
                }
                InputSignal::Action => {
                    self.held = Some(event.code);
                    self.last_seen_ms = now_ms;
                    Some(InputSignal::Action)
                }
                InputSignal::Quit => Some(InputSignal::Quit),
            },
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for KeyEdgeFilter {
    fn default() -> Self {
        Self::new(RELEASE_GAP_MS)
    }
}
