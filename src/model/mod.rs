pub mod board;
pub mod config;
pub mod palette;

pub use board::*;
pub use config::*;
pub use palette::*;
