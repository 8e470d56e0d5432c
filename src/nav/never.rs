use std::collections::HashSet;
use std::convert::Infallible;

use super::NavState;

/// Navigation state of presenters that do not navigate.
///
/// It has no values, so a tree typed with `NoNav` can never hold a
/// navigation state nor receive a navigation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoNav {}

impl NavState for NoNav {
    type Action = Infallible;
    type Identity = Infallible;

    fn live_identities(&self) -> HashSet<Infallible> {
        match *self {}
    }
}
