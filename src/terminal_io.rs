use std::collections::HashMap;
use std::io;
use std::time::Duration;

use crossterm::{
    cursor::{Hide, Show},
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement},
};
use log::{error, info};

use crate::constants::KEY_HOLD_FRAMES;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputFrame {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
    pub fire_presses: u32,
    pub close: bool,
    pub any_key: bool, // A key went down that was not already held
    pub resize: Option<(u16, u16)>,
}

/// Held-key tracking. Terminals that never report releases fall back to
/// treating a key as held for a few frames after its last press or repeat.
#[derive(Debug, Default)]
pub struct KeyState {
    last_seen: HashMap<KeyCode, u64>,
    reports_release: bool,
}

impl KeyState {
    pub fn new(reports_release: bool) -> Self {
        KeyState { last_seen: HashMap::new(), reports_release }
    }

    pub fn press(&mut self, code: KeyCode, frame: u64) {
        self.last_seen.insert(code, frame);
    }

    pub fn release(&mut self, code: KeyCode) {
        self.reports_release = true;
        self.last_seen.remove(&code);
    }

    pub fn is_held(&self, code: KeyCode, frame: u64) -> bool {
        match self.last_seen.get(&code) {
            Some(_) if self.reports_release => true,
            Some(&seen) => frame.saturating_sub(seen) < KEY_HOLD_FRAMES,
            None => false,
        }
    }
}

// --- SimulatedInput for debugging ---
pub struct SimulatedInput {
    events: HashMap<u64, Vec<Event>>,
}

impl SimulatedInput {
    pub fn new(events: HashMap<u64, Vec<Event>>) -> Self {
        SimulatedInput { events }
    }

    pub fn demo_script() -> Self {
        let mut events: HashMap<u64, Vec<Event>> = HashMap::new();
        let key = |code: KeyCode| Event::Key(code.into());
        events.insert(1, vec![key(KeyCode::Up)]);
        events.insert(5, vec![key(KeyCode::Right), key(KeyCode::Char(' '))]);
        events.insert(20, vec![key(KeyCode::Char(' '))]);
        events.insert(40, vec![key(KeyCode::Left), key(KeyCode::Up)]);
        events.insert(60, vec![key(KeyCode::Char(' '))]);
        events.insert(300, vec![key(KeyCode::Char('q'))]);
        SimulatedInput::new(events)
    }

    pub fn take(&mut self, frame: u64) -> Vec<Event> {
        self.events.remove(&frame).unwrap_or_default()
    }
}

pub enum InputSource {
    Terminal,
    Simulated(SimulatedInput),
}

pub struct InputCollector {
    source: InputSource,
    keys: KeyState,
}

impl InputCollector {
    pub fn new(source: InputSource, reports_release: bool) -> Self {
        InputCollector { source, keys: KeyState::new(reports_release) }
    }

    pub fn collect(&mut self, frame: u64) -> io::Result<InputFrame> {
        let events = match &mut self.source {
            InputSource::Terminal => {
                let mut pending = Vec::new();
                while event::poll(Duration::ZERO).map_err(|e| { error!("Failed to poll event: {}", e); e })? {
                    pending.push(event::read().map_err(|e| { error!("Failed to read event: {}", e); e })?);
                }
                pending
            }
            InputSource::Simulated(sim) => sim.take(frame),
        };

        let mut input = InputFrame::default();
        for event in events {
            self.apply(event, frame, &mut input);
        }
        input.turn_left = self.keys.is_held(KeyCode::Left, frame);
        input.turn_right = self.keys.is_held(KeyCode::Right, frame);
        input.thrust = self.keys.is_held(KeyCode::Up, frame);
        Ok(input)
    }

    fn apply(&mut self, event: Event, frame: u64, input: &mut InputFrame) {
        match event {
            Event::Key(KeyEvent { code, modifiers, kind, .. }) => {
                if kind == KeyEventKind::Release {
                    self.keys.release(code);
                    return;
                }
                // Auto-repeat of a held key is not a new key press.
                if kind == KeyEventKind::Press && !self.keys.is_held(code, frame) {
                    input.any_key = true;
                }
                self.keys.press(code, frame);
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => input.close = true,
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => input.close = true,
                    KeyCode::Char(' ') => input.fire_presses += 1,
                    _ => {}
                }
            }
            Event::Resize(width, height) => input.resize = Some((width, height)),
            _ => {}
        }
    }
}

pub struct TerminalGuard {
    enhanced_keys: bool,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        info!("Attempting to enable raw mode.");
        enable_raw_mode().map_err(|e| { error!("Failed to enable raw mode: {}", e); e })?;
        // From here on, an early return drops the guard and restores the terminal.
        let mut guard = TerminalGuard { enhanced_keys: false };
        let mut stdout = io::stdout();
        execute!(stdout, Hide).map_err(|e| { error!("Failed to hide cursor: {}", e); e })?;

        if matches!(supports_keyboard_enhancement(), Ok(true)) {
            execute!(stdout, PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))
                .map_err(|e| { error!("Failed to request key release events: {}", e); e })?;
            guard.enhanced_keys = true;
            info!("Terminal reports key releases.");
        }
        Ok(guard)
    }

    pub fn reports_release(&self) -> bool {
        self.enhanced_keys || cfg!(windows)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.enhanced_keys {
            if let Err(e) = execute!(stdout, PopKeyboardEnhancementFlags) {
                error!("Failed to restore keyboard flags on exit: {}", e);
            }
        }
        if let Err(e) = execute!(stdout, Show) {
            error!("Failed to show cursor on exit: {}", e);
        }
        if let Err(e) = disable_raw_mode() {
            error!("Failed to disable raw mode on exit: {}", e);
        }
    }
}
