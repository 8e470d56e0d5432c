//! Navigation state shared by a presenter tree.
//!
//! A tree owns exactly one navigation state, held by its root presenter.
//! Descendants never touch it directly: they forward navigation actions up
//! the parent chain until the root's nav reducer applies them.
//!
//! Three shapes are provided:
//! - [`StackNav`]: an ordered stack of identity-tagged destinations
//! - [`SingleNav`]: at most one identity-tagged destination
//! - [`NoNav`]: uninhabited marker for presenters without navigation

mod destination;
mod never;
mod single;
mod stack;

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use crate::mvi::Action;

pub use destination::{Destination, EntryId};
pub use never::NoNav;
pub use single::SingleNav;
pub use stack::{NavAction, StackNav};

/// Navigation state of a presenter tree.
pub trait NavState: Clone + PartialEq + 'static {
    /// Navigation actions understood by this state's reducer.
    type Action: Action + Clone;

    /// Key under which child presenters are registered.
    type Identity: Eq + Hash + Clone + Debug + 'static;

    /// Identities that are currently reachable through the path.
    ///
    /// Child presenters registered under any other identity are released
    /// when the navigation state changes.
    fn live_identities(&self) -> HashSet<Self::Identity>;
}
