//! Single-destination navigation, e.g. a split view's detail column.

use std::collections::HashSet;
use std::fmt::Debug;

use super::destination::{Destination, EntryId};
use super::stack::NavAction;
use super::NavState;

/// At most one identity-tagged destination.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleNav<D> {
    path: Option<Destination<D>>,
}

impl<D> Default for SingleNav<D> {
    fn default() -> Self {
        Self { path: None }
    }
}

impl<D> SingleNav<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Destination<D>> {
        self.path.as_ref()
    }

    pub fn destination(&self) -> Option<&D> {
        self.path.as_ref().map(Destination::value)
    }

    /// Replace the destination, or clear it when `None`.
    pub fn navigate(&mut self, destination: Option<D>) -> Option<EntryId> {
        self.path = destination.map(Destination::new);
        self.path.as_ref().map(Destination::id)
    }

    pub fn pop(&mut self) {
        self.path = None;
    }

    /// Default nav reducer for single-destination navigation.
    pub fn reduce(&mut self, action: NavAction<D>) {
        match action {
            NavAction::Navigate(destination) => {
                self.navigate(destination);
            }
            NavAction::Pop | NavAction::PopToRoot => self.pop(),
        }
    }
}

impl<D> NavState for SingleNav<D>
where
    D: Debug + Clone + PartialEq + Send + 'static,
{
    type Action = NavAction<D>;
    type Identity = EntryId;

    fn live_identities(&self) -> HashSet<EntryId> {
        self.path.iter().map(Destination::id).collect()
    }
}
