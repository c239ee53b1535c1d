use color_eyre::Result;
use crossterm::{execute, terminal::SetTitle};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io::Stdout;
use std::time::{Duration, Instant};

use crate::assets::Sprites;
use crate::clock::SessionClock;
use crate::config::GameConfig;
use crate::input::{FrameInput, InputManager};
use crate::renderer::{GameRenderer, RenderView, window_title};
use crate::session::{Session, StepOutcome};
use crate::state::{self, Effect, GameState};

/// The main application which holds the state and logic of the application.
pub struct App {
    running: bool,
    game_state: GameState,
    config: GameConfig,
    session: Session,
    clock: SessionClock,
    /// Last title pushed to the terminal, to avoid resending it every frame
    title: String,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
}

impl App {
    /// Construct a new instance of [`App`] with a fresh session starting now.
    pub fn new(config: GameConfig, sprites: Sprites, releases_reported: bool) -> Self {
        let session = Session::new(&config);
        let renderer = GameRenderer::new(config.clone(), sprites);
        log::info!("session started");

        Self {
            running: true,
            game_state: GameState::Playing,
            config,
            session,
            clock: SessionClock::start(Instant::now()),
            title: String::new(),
            input_manager: InputManager::new(releases_reported),
            renderer,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let frame_budget = self.config.frame_budget();

        while self.running {
            let frame_start = Instant::now();

            let input = self.input_manager.poll()?;
            self.apply(&input, frame_start);
            if !self.running {
                break;
            }

            let size = terminal.size()?;
            self.renderer
                .prepare(Rect::new(0, 0, size.width, size.height))?;

            let elapsed = self.survival_time(frame_start);
            let title = window_title(elapsed);
            if title != self.title {
                execute!(terminal.backend_mut(), SetTitle(&title))?;
                self.title = title;
            }

            let view = RenderView {
                game_state: self.game_state,
                session: &self.session,
                elapsed,
            };
            terminal.draw(|frame| self.renderer.render(frame, &view))?;

            // Stand-in for vsync: hold each frame to the configured rate
            std::thread::sleep(frame_budget.saturating_sub(frame_start.elapsed()));
        }

        log::info!("quit");
        Ok(())
    }

    /// Applies one frame of input at time `now`: state transition first,
    /// then whatever that transition asks for.
    pub fn apply(&mut self, input: &FrameInput, now: Instant) {
        let transition = state::transition(self.game_state, input);
        self.game_state = transition.next;

        match transition.effect {
            Effect::Simulate => {
                let dt = self.clock.tick(now);
                let elapsed = self.clock.elapsed(now).as_secs_f32();
                let outcome =
                    self.session
                        .step(&self.config, input, dt, elapsed, &mut rand::rng());

                if outcome == StepOutcome::PlayerDied {
                    self.clock.stop(now);
                    self.game_state = GameState::GameOver;
                    log::info!(
                        "game over: {} kills, survived {:.1}s",
                        self.session.kills,
                        self.clock.elapsed(now).as_secs_f32()
                    );
                }
            }
            Effect::Freeze => {
                self.clock.stop(now);
                self.session.freeze_enemies();
                log::info!("paused");
            }
            Effect::Thaw => {
                self.session.thaw_enemies();
                self.clock.resume(now);
                self.input_manager.clear_held();
                log::info!("resumed");
            }
            Effect::Restart => {
                self.session = Session::new(&self.config);
                self.clock = SessionClock::start(now);
                self.input_manager.clear_held();
                log::info!("session restarted");
            }
            Effect::Hold => {}
            Effect::Quit => {
                self.running = false;
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn game_state(&self) -> GameState {
        self.game_state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Survival time so far, not counting paused stretches
    pub fn survival_time(&self, now: Instant) -> Duration {
        self.clock.elapsed(now)
    }
}
