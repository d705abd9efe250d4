//! Azure CLI boundary for swa-sync
//!
//! Wraps `az staticwebapp` invocations as subprocesses and exposes them
//! behind the [`UserStore`] trait so the orchestrator never talks to the CLI
//! directly. The trait covers the four operations the sync needs:
//!
//! - list registered users (provider-filtered to GitHub)
//! - invite a user with a role
//! - overwrite a user's roles (an empty role string clears them)
//! - resolve the app's default hostname
//!
//! No retries happen here; a failed `az` call surfaces as
//! [`AzureError::CommandFailed`] with the captured stderr preserved.

pub mod cli;
pub mod error;
pub mod store;

pub use cli::AzCli;
pub use error::{AzureError, Result};
pub use store::{AzCliUserStore, SwaTarget, UserStore};
