//! Screen state machine: which screen is up, and what a frame's input
//! does to it.

use crate::input::FrameInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Paused,
    GameOver,
}

/// What the app loop must do for this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Run one simulation step
    Simulate,
    /// Enter pause: stop the clock, zero enemy velocities
    Freeze,
    /// Leave pause: restore velocities, restart the clock from now
    Thaw,
    /// Throw the session away and start a fresh one
    Restart,
    /// Keep showing the overlay
    Hold,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: GameState,
    pub effect: Effect,
}

impl Transition {
    fn to(next: GameState, effect: Effect) -> Self {
        Self { next, effect }
    }
}

/// Pure transition function. Dying is reported by the simulation step,
/// not by input, so Playing -> GameOver is not decided here.
pub fn transition(state: GameState, input: &FrameInput) -> Transition {
    if input.closed {
        return Transition::to(state, Effect::Quit);
    }

    match state {
        GameState::Playing if input.pause => Transition::to(GameState::Paused, Effect::Freeze),
        GameState::Playing => Transition::to(GameState::Playing, Effect::Simulate),

        GameState::Paused if input.quit => Transition::to(GameState::Paused, Effect::Quit),
        GameState::Paused if input.resume || input.pause => {
            Transition::to(GameState::Playing, Effect::Thaw)
        }
        GameState::Paused => Transition::to(GameState::Paused, Effect::Hold),

        GameState::GameOver if input.quit => Transition::to(GameState::GameOver, Effect::Quit),
        GameState::GameOver if input.retry => Transition::to(GameState::Playing, Effect::Restart),
        GameState::GameOver => Transition::to(GameState::GameOver, Effect::Hold),
    }
}
