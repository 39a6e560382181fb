use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::VecDeque;
use std::time::Duration;

use crate::entities::Steering;

/// Everything the game needs from the player for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held movement keys
    pub steering: Steering,
    /// Shoot was pressed since the last tick
    pub shoot: bool,
    /// Quit was requested since the last tick
    pub quit: bool,
}

/// Source of per-tick input
pub trait InputSource {
    fn poll(&mut self) -> color_eyre::Result<TickInput>;
}

/// Ticks a key stays "held" after a press when the terminal can't report releases.
/// Auto-repeat presses keep refreshing it.
const HOLD_TICKS_WITHOUT_RELEASE: u8 = 8;

/// Tracks the state of keys that can be held down for continuous input
#[derive(Debug, Default)]
struct KeyState {
    left: u8,
    right: u8,
}

/// Reads crossterm key events and turns them into [`TickInput`]s
pub struct KeyboardInput {
    key_state: KeyState,
    /// Whether the terminal sends key release events
    reports_release: bool,
    shoot: bool,
    quit: bool,
}

impl KeyboardInput {
    pub fn new(reports_release: bool) -> Self {
        Self {
            key_state: KeyState::default(),
            reports_release,
            shoot: false,
            quit: false,
        }
    }

    /// Processes a key event and updates held keys and one-shot requests
    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        match key_event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.handle_key_press(key_event),
            KeyEventKind::Release => self.handle_key_release(key_event.code),
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent) {
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.quit = true;
            return;
        }

        let held = if self.reports_release {
            u8::MAX
        } else {
            HOLD_TICKS_WITHOUT_RELEASE
        };

        match key_event.code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = held;
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = held;
            }
            KeyCode::Char(' ') => {
                // repeats from a held space bar don't count as new shots
                if key_event.kind == KeyEventKind::Press {
                    self.shoot = true;
                }
            }
            _ => {}
        }
    }

    fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = 0;
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = 0;
            }
            _ => {}
        }
    }

    /// Snapshot for this tick. Clears one-shot requests and ages held keys.
    pub fn take_tick_input(&mut self) -> TickInput {
        let input = TickInput {
            steering: Steering {
                left: self.key_state.left > 0,
                right: self.key_state.right > 0,
            },
            shoot: std::mem::take(&mut self.shoot),
            quit: std::mem::take(&mut self.quit),
        };

        if !self.reports_release {
            self.key_state.left = self.key_state.left.saturating_sub(1);
            self.key_state.right = self.key_state.right.saturating_sub(1);
        }

        input
    }
}

impl InputSource for KeyboardInput {
    fn poll(&mut self) -> color_eyre::Result<TickInput> {
        // Drain every pending event without blocking
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = event::read()? {
                self.handle_key_event(key_event);
            }
        }
        Ok(self.take_tick_input())
    }
}

/// Replays a fixed list of inputs, then asks to quit
#[derive(Debug, Default)]
pub struct ScriptedInput {
    ticks: VecDeque<TickInput>,
}

impl ScriptedInput {
    pub fn new(ticks: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            ticks: ticks.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> color_eyre::Result<TickInput> {
        Ok(self.ticks.pop_front().unwrap_or(TickInput {
            quit: true,
            ..TickInput::default()
        }))
    }
}
