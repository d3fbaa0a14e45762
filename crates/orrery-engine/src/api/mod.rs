pub mod error;
pub mod game;
pub mod selection;
pub mod types;
