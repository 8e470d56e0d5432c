//! Error types for presenter tree operations.
//!
//! Dispatch itself never fails: operational failures inside effect bodies
//! are turned into domain actions by the reducer author. These errors only
//! cover misuse of the tree-building API.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresenterError {
    /// A child exists under the identity but was built for another state
    /// type.
    #[error("Child presenter under '{identity}' has a different state type")]
    ChildTypeMismatch { identity: String },

    /// The presenter was pruned from its navigation tree or dismissed.
    #[error("Presenter '{label}' has been released")]
    Released { label: String },
}
