// Library exports for testing
pub use app::App;
pub use assets::{SpriteSheet, Sprites};
pub use clock::SessionClock;
pub use config::GameConfig;
pub use entities::{Animation, Bullet, Enemy, Heading, Heart, Player};
pub use input::{FrameInput, InputManager};
pub use session::{Session, StepOutcome};
pub use state::{Effect, GameState, Transition};

pub mod app;
pub mod assets;
pub mod clock;
pub mod config;
pub mod entities;
pub mod input;
pub mod renderer;
pub mod session;
pub mod spawner;
pub mod state;
