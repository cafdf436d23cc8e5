pub mod health;
pub mod visit;
