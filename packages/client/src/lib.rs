// Library root — exposes the client modules to the binary in `src/main.rs`
// and to the integration tests in `tests/`.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod message;
pub mod transport;
