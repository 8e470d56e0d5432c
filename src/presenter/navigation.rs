//! Navigation plumbing: forwarding to the root and pruning stale children.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::{Rc, Weak};

use super::node::{Node, NodeInit, TreeNode};
use super::{Presenter, PresenterId};
use crate::error::PresenterError;
use crate::mvi::{NavReducer, PresenterState, Reducer};
use crate::nav::NavState;

/// Navigation state and reducer, held by the root of a tree.
pub(crate) struct NavRoot<N: NavState> {
    state: RefCell<N>,
    reducer: Box<dyn NavReducer<N>>,
}

impl<N: NavState> NavRoot<N> {
    pub(crate) fn new(state: N, reducer: impl NavReducer<N> + 'static) -> Self {
        Self {
            state: RefCell::new(state),
            reducer: Box::new(reducer),
        }
    }
}

/// Upward link from a child to its parent in a navigation tree.
pub(crate) trait NavigationSink<N: NavState> {
    fn forward_navigation(&self, action: N::Action);

    fn nav_snapshot(&self) -> Option<N>;
}

/// Downward link from a parent to a child it owns.
pub(crate) trait NavChild<N: NavState>: TreeNode {
    fn prune(&self, live: &HashSet<N::Identity>);
}

impl<S: PresenterState, N: NavState> NavigationSink<N> for Node<S, N> {
    fn forward_navigation(&self, action: N::Action) {
        self.send_navigation(action);
    }

    fn nav_snapshot(&self) -> Option<N> {
        self.nav_state()
    }
}

impl<S: PresenterState, N: NavState> NavChild<N> for Node<S, N> {
    fn prune(&self, live: &HashSet<N::Identity>) {
        self.release_stale_children(live);
    }
}

impl<S: PresenterState, N: NavState> Node<S, N> {
    /// Route a navigation action to the root and apply it there.
    ///
    /// Children are pruned only when the set of live identities changed.
    /// Observers of the root are then notified, after every navigation
    /// reducer run.
    pub(crate) fn send_navigation(&self, action: N::Action) {
        if self.is_released() {
            tracing::trace!(presenter = %self.label, ?action, "Dropping navigation action for released presenter");
            return;
        }

        if let Some(parent) = &self.parent {
            match parent.upgrade() {
                Some(parent) => parent.forward_navigation(action),
                None => tracing::trace!(presenter = %self.label, ?action, "Dropping navigation action, parent released"),
            }
            return;
        }

        let Some(nav) = &self.nav else {
            tracing::debug!(presenter = %self.label, ?action, "Ignoring navigation action on presenter without navigation");
            return;
        };

        tracing::debug!(presenter = %self.label, ?action, "Navigating");
        let (before, after) = {
            let mut state = nav.state.borrow_mut();
            let before = state.live_identities();
            nav.reducer.reduce(&mut *state, action);
            (before, state.live_identities())
        };

        if before != after {
            self.release_stale_children(&after);
        }
        self.observers.notify();
    }

    /// Snapshot of the tree's navigation state, read from the root.
    pub(crate) fn nav_state(&self) -> Option<N> {
        match (&self.nav, &self.parent) {
            (Some(nav), _) => Some(nav.state.borrow().clone()),
            (None, Some(parent)) => parent.upgrade().and_then(|parent| parent.nav_snapshot()),
            (None, None) => None,
        }
    }

    /// Drop and release every child whose identity is no longer live, then
    /// recurse into the survivors.
    fn release_stale_children(&self, live: &HashSet<N::Identity>) {
        let removed: Vec<Rc<dyn NavChild<N>>> = {
            let mut children = self.children.borrow_mut();
            let stale: Vec<N::Identity> = children
                .keys()
                .filter(|identity| !live.contains(*identity))
                .cloned()
                .collect();
            stale
                .iter()
                .filter_map(|identity| children.remove(identity))
                .collect()
        };

        if !removed.is_empty() {
            tracing::debug!(presenter = %self.label, count = removed.len(), "Releasing children for removed destinations");
        }
        for child in &removed {
            child.retire();
        }

        let remaining: Vec<Rc<dyn NavChild<N>>> = self.children.borrow().values().cloned().collect();
        for child in remaining {
            child.prune(live);
        }
    }
}

impl<S: PresenterState, N: NavState> Presenter<S, N> {
    /// Route a navigation action to the root of this presenter's tree.
    pub fn send_navigation(&self, action: N::Action) {
        self.node.send_navigation(action);
    }

    /// Current navigation state of the tree, or `None` if the tree has no
    /// navigation or its root is gone.
    pub fn nav_state(&self) -> Option<N> {
        self.node.nav_state()
    }

    /// Get or create the child presenter for a navigation destination.
    ///
    /// The first call for an `identity` creates the child with `state` and
    /// `reducer`; later calls return the same child and ignore both
    /// arguments. The child lives until its identity leaves the navigation
    /// state or this presenter is released.
    pub fn get_child<C: PresenterState>(
        &self,
        state: C,
        reducer: impl Reducer<C, N::Action> + 'static,
        identity: N::Identity,
    ) -> Result<Presenter<C, N>, PresenterError> {
        let node = &self.node;
        if node.is_released() {
            return Err(PresenterError::Released {
                label: node.label.clone(),
            });
        }

        let existing = node.children.borrow().get(&identity).cloned();
        if let Some(existing) = existing {
            return existing
                .into_any()
                .downcast::<Node<C, N>>()
                .map(Presenter::from_node)
                .map_err(|_| PresenterError::ChildTypeMismatch {
                    identity: format!("{:?}", identity),
                });
        }

        let parent: Weak<dyn NavigationSink<N>> = node.this.clone();
        let child = Node::new(NodeInit {
            id: PresenterId::next(),
            state,
            reducer: Box::new(reducer),
            nav: None,
            parent: Some(parent),
            sheet_parent: node.sheet_parent.borrow().clone(),
            config: node.config.inherited(),
        });
        tracing::debug!(presenter = %node.label, child = %child.label, ?identity, "Registering child presenter");

        let entry: Rc<dyn NavChild<N>> = child.clone();
        node.children.borrow_mut().insert(identity, entry);
        Ok(Presenter::from_node(child))
    }

    pub fn has_child(&self, identity: &N::Identity) -> bool {
        self.node.children.borrow().contains_key(identity)
    }

    pub fn child_count(&self) -> usize {
        self.node.children.borrow().len()
    }
}
