pub mod collision;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod runtime;
pub mod snake;
pub mod terminal_runtime;
