mod common;
pub mod config;
mod logging;
pub mod tui;

pub use common::{PROJECT_NAME, PROJECT_VERSION, PROJECT_VERSION_HASH, print_header};
pub use config::{Config, ConfigureArgs, configure, show_configuration};
pub use logging::{LOG_FILE_NAME, Logging};
