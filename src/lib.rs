// The binary in main.rs owns the terminal; everything it drives lives here so
// integration tests and benchmarks can reach it.
pub mod config;
pub mod engine;
pub mod session;
pub mod ui;
