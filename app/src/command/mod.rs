//! Static strategy pattern for CLI commands.
//!
//! Each subcommand is its own zero-sized strategy type, dispatched
//! statically from `main`.

mod info;
mod init;
mod serve;
mod version;

pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use serve::{ServeInput, ServeStrategy};
pub use version::VersionStrategy;

/// Contract shared by all command strategies.
///
/// Each strategy names its own input type, so arguments are passed without
/// boxing or runtime casting.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}
