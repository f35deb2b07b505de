//! Subcommand implementations.

mod export;
mod simulate;
mod validate;

pub use export::Export;
pub use simulate::Simulate;
pub use validate::Validate;
