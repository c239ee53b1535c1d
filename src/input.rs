use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

use crate::entities::Heading;

/// How long a key counts as held after its last press or repeat when the
/// terminal cannot report key releases
const HOLD_GRACE: Duration = Duration::from_millis(200);

/// Everything the game needs to know about input for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
    pub pause: bool,
    pub resume: bool,
    pub retry: bool,
    pub quit: bool,
    /// Ctrl+C, the terminal's stand-in for closing the window
    pub closed: bool,
}

impl FrameInput {
    pub fn heading(&self) -> Heading {
        Heading {
            left: self.left,
            right: self.right,
            up: self.up,
            down: self.down,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    fn from_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Direction::Right),
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(Direction::Down),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Tracks the state of keys that can be held down for continuous input
#[derive(Debug, Default)]
struct KeyState {
    /// Last press or repeat per direction; `None` once released
    held: [Option<Instant>; 4],
}

impl KeyState {
    fn press(&mut self, dir: Direction, now: Instant) {
        self.held[dir.index()] = Some(now);
    }

    fn release(&mut self, dir: Direction) {
        self.held[dir.index()] = None;
    }

    fn is_held(&self, dir: Direction, now: Instant, releases_reported: bool) -> bool {
        match self.held[dir.index()] {
            Some(_) if releases_reported => true,
            Some(at) => now.saturating_duration_since(at) < HOLD_GRACE,
            None => false,
        }
    }
}

/// Polls crossterm and folds raw key events into a [`FrameInput`]
pub struct InputManager {
    key_state: KeyState,
    oneshot: FrameInput,
    /// True when the terminal sends release events (keyboard enhancement)
    releases_reported: bool,
}

impl InputManager {
    pub fn new(releases_reported: bool) -> Self {
        Self {
            key_state: KeyState::default(),
            oneshot: FrameInput::default(),
            releases_reported,
        }
    }

    /// Drains every pending event without blocking and returns this frame's
    /// input. One-shot actions last exactly one frame.
    pub fn poll(&mut self) -> color_eyre::Result<FrameInput> {
        let now = Instant::now();
        self.oneshot = FrameInput::default();

        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = event::read()? {
                self.handle_key_event(key_event, now);
            }
        }

        Ok(self.frame_input(now))
    }

    /// Processes a key event and updates key state and one-shot actions
    pub fn handle_key_event(&mut self, key_event: KeyEvent, now: Instant) {
        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event, now),
            KeyEventKind::Repeat => {
                if let Some(dir) = Direction::from_code(key_event.code) {
                    self.key_state.press(dir, now);
                }
            }
            KeyEventKind::Release => {
                if let Some(dir) = Direction::from_code(key_event.code) {
                    self.key_state.release(dir);
                }
            }
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, now: Instant) {
        if let Some(dir) = Direction::from_code(key_event.code) {
            self.key_state.press(dir, now);
            return;
        }

        match (key_event.modifiers, key_event.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => {
                self.oneshot.closed = true;
            }
            (_, KeyCode::Char(' ')) => self.oneshot.fire = true,
            (_, KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P')) => {
                self.oneshot.pause = true;
            }
            (_, KeyCode::Char('c') | KeyCode::Char('C')) => self.oneshot.resume = true,
            (_, KeyCode::Char('r') | KeyCode::Char('R')) => self.oneshot.retry = true,
            (_, KeyCode::Char('q') | KeyCode::Char('Q')) => self.oneshot.quit = true,
            _ => {}
        }
    }

    /// Combines held directions with this frame's one-shot actions
    pub fn frame_input(&self, now: Instant) -> FrameInput {
        let held = |dir| self.key_state.is_held(dir, now, self.releases_reported);
        FrameInput {
            left: held(Direction::Left),
            right: held(Direction::Right),
            up: held(Direction::Up),
            down: held(Direction::Down),
            ..self.oneshot
        }
    }

    /// Forgets held keys, e.g. after a pause so nothing sticks on resume
    pub fn clear_held(&mut self) {
        self.key_state = KeyState::default();
    }
}
