pub mod openapi;
pub mod schema;
pub mod validate;

use crate::cli::{Commands, GlobalFlags};

/// Route a parsed command to its handler.
pub fn dispatch(command: &Commands, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Openapi(args) => openapi::handle(args, flags),
        Commands::Schema(args) => schema::handle(args, flags),
        Commands::Validate(args) => validate::handle(args, flags),
    }
}
