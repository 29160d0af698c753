// Exult Rust library
// Arbitrary ratio scalers and the software audio mixer

pub mod app;
pub mod cli;
pub mod config;
pub mod graphics;
pub mod logging;
pub mod sound;

pub use cli::Cli;
pub use config::Options;
pub use logging::LogLevel;
