//! Stack navigation.

use std::collections::HashSet;
use std::fmt::Debug;

use super::destination::{Destination, EntryId};
use super::NavState;

/// Canonical navigation actions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NavAction<D> {
    /// Push `Some(destination)`, or pop when `None`.
    Navigate(Option<D>),
    /// Remove the last entry.
    Pop,
    /// Clear the path.
    PopToRoot,
}

/// Ordered navigation path of identity-tagged destinations.
#[derive(Debug, Clone, PartialEq)]
pub struct StackNav<D> {
    path: Vec<Destination<D>>,
}

impl<D> Default for StackNav<D> {
    fn default() -> Self {
        Self { path: Vec::new() }
    }
}

impl<D> StackNav<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(&self) -> &[Destination<D>] {
        &self.path
    }

    pub fn destinations(&self) -> impl Iterator<Item = &D> {
        self.path.iter().map(Destination::value)
    }

    pub fn ids(&self) -> Vec<EntryId> {
        self.path.iter().map(Destination::id).collect()
    }

    pub fn top(&self) -> Option<&Destination<D>> {
        self.path.last()
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Append a fresh entry for `destination`, or pop when `None`.
    pub fn navigate(&mut self, destination: Option<D>) {
        match destination {
            Some(destination) => {
                self.push(destination);
            }
            None => self.pop(),
        }
    }

    pub fn push(&mut self, destination: D) -> EntryId {
        let entry = Destination::new(destination);
        let id = entry.id();
        self.path.push(entry);
        id
    }

    /// Remove the last entry.
    ///
    /// Popping an empty path is a caller bug: the back action must not be
    /// reachable at the root.
    pub fn pop(&mut self) {
        debug_assert!(!self.path.is_empty(), "pop on an empty navigation path");
        self.path.pop();
    }

    pub fn pop_to_root(&mut self) {
        self.path.clear();
    }

    /// Default nav reducer for stack navigation.
    pub fn reduce(&mut self, action: NavAction<D>) {
        match action {
            NavAction::Navigate(destination) => self.navigate(destination),
            NavAction::Pop => self.pop(),
            NavAction::PopToRoot => self.pop_to_root(),
        }
    }
}

impl<D> NavState for StackNav<D>
where
    D: Debug + Clone + PartialEq + Send + 'static,
{
    type Action = NavAction<D>;
    type Identity = EntryId;

    /// Every entry id. An entry's id also names the prefix of the path
    /// that ends with it, so this covers the full path and each prefix.
    fn live_identities(&self) -> HashSet<EntryId> {
        self.path.iter().map(Destination::id).collect()
    }
}
