pub mod file_actions;
pub mod health;
pub mod lifecycle;
