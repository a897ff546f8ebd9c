//! CLI commands

mod init;
mod resolve;
mod signing;
mod validate;

pub use init::InitCommand;
pub use resolve::ResolveCommand;
pub use signing::SigningCommand;
pub use validate::{ValidateCommand, ValidationFailed};
