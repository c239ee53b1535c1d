mod animation;
mod bullet;
mod enemy;
mod heart;
mod player;

// Re-export all public types
pub use animation::Animation;
pub use bullet::Bullet;
pub use enemy::Enemy;
pub use heart::Heart;
pub use player::{Heading, Player};
