//! Role reconciliation core for swa-sync
//!
//! This crate computes the difference between two user snapshots:
//!
//! - the **desired state**, derived from a GitHub repository's collaborator
//!   permissions, and
//! - the **current state**, the users registered with an Azure Static Web
//!   App.
//!
//! The output is a [`SyncPlan`] listing the invitations, role updates, and
//! role removals needed to make the current state match the desired state.
//! Everything here is pure: no I/O, no mutation of inputs, deterministic
//! output order for a given input order.

pub mod normalize;
pub mod plan;
pub mod role;
pub mod types;

pub use normalize::{DEFAULT_ROLE_PREFIX, normalize_login, normalize_role_set, resolve_identity};
pub use plan::compute_sync_plan;
pub use role::{PermissionLevel, RoleMapping};
pub use types::{DesiredUser, PlanAdd, PlanRemove, PlanUpdate, SwaUser, SyncPlan};
