pub use cell::*;
pub use config::*;
pub use error::*;
pub use field::*;
pub use generator::*;
pub use options::*;
pub use snapshot::*;
pub use stopwatch::*;
pub use types::*;

mod cell;
mod config;
mod error;
mod field;
mod generator;
mod options;
mod snapshot;
mod stopwatch;
mod types;
