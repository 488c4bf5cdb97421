// Game core shared by the terminal binary, the integration tests and the
// criterion benchmarks. Terminal concerns (app, event, ui) live in the binary.

pub mod config;
pub mod engine;
pub mod generator;
pub mod session;
pub mod store;
