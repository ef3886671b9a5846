pub mod board;
pub mod config;
pub mod progress;
pub mod task;

pub use board::*;
pub use config::*;
pub use progress::*;
pub use task::*;
