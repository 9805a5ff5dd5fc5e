// Puzzle core plus the input and configuration layer used by the binary
pub mod app;
pub mod boggle;
pub mod config;
pub mod errors;
pub mod input;
pub mod log;
pub mod utils;
