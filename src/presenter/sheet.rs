//! Modal presentation: hosting a presented child and dismissing it.

use std::rc::{Rc, Weak};

use super::node::{Node, TreeNode};
use super::{Presenter, PresenterBuilder, PresenterId};
use crate::error::PresenterError;
use crate::mvi::{NavReducer, PresenterState, Reducer, SheetPresenterState};
use crate::nav::{NavState, NoNav};

/// Link from a presented presenter back to the one hosting it.
pub(crate) trait SheetHost {
    /// Whether the presented slot currently holds the node with `id`.
    fn is_presenting(&self, id: PresenterId) -> bool;

    /// Release the hosted child and clear the host's presented slot.
    fn release_presented(&self);

    /// Continue a dismiss-all from a presented child up to this host.
    fn dismiss_chain(&self);
}

/// Back-link shared by a presented child and the navigation children it
/// owns. `presented` names the node the host was asked to show.
#[derive(Clone)]
pub(crate) struct SheetLink {
    pub host: Weak<dyn SheetHost>,
    pub presented: PresenterId,
}

impl<S: SheetPresenterState, N: NavState> SheetHost for Node<S, N> {
    fn is_presenting(&self, id: PresenterId) -> bool {
        self.presented
            .borrow()
            .as_ref()
            .is_some_and(|child| child.id() == id)
    }

    fn release_presented(&self) {
        let child = self.presented.borrow_mut().take();
        if let Some(child) = &child {
            tracing::debug!(presenter = %self.label, "Releasing presented child");
            child.retire();
        }
        drop(child);
        self.update_state(|state| *state.presented_mut() = None);
    }

    fn dismiss_chain(&self) {
        self.dismiss_from_host(true);
    }
}

impl<S: PresenterState, N: NavState> Node<S, N> {
    /// Close the modal presentation this presenter belongs to.
    ///
    /// `all` keeps walking up the chain of hosts. A presenter with no host
    /// runs its state's own `dismiss` hook instead.
    pub(crate) fn dismiss(&self, all: bool) {
        if self.is_released() {
            tracing::trace!(presenter = %self.label, all, "Ignoring dismiss of released presenter");
            return;
        }
        if !self.dismiss_from_host(all) {
            self.update_state(|state| state.dismiss());
        }
    }

    /// Returns `false` when there is no live host.
    fn dismiss_from_host(&self, all: bool) -> bool {
        let Some(link) = self.sheet_parent.borrow().clone() else {
            return false;
        };
        let Some(host) = link.host.upgrade() else {
            return false;
        };
        if !host.is_presenting(link.presented) {
            tracing::debug!(presenter = %self.label, "Ignoring dismiss, host presents another child");
            return true;
        }
        tracing::debug!(presenter = %self.label, all, "Dismissing presentation");
        host.release_presented();
        if all {
            host.dismiss_chain();
        }
        true
    }
}

impl<S: PresenterState, N: NavState> Presenter<S, N> {
    /// Same as a reducer returning [`Effect::dismiss`](crate::mvi::Effect::dismiss)
    /// or [`Effect::dismiss_all`](crate::mvi::Effect::dismiss_all).
    pub fn dismiss(&self, all: bool) {
        self.node.dismiss(all);
    }

    pub fn has_presented_child(&self) -> bool {
        self.node.presented.borrow().is_some()
    }
}

impl<S: SheetPresenterState, N: NavState> Presenter<S, N> {
    /// Create the presenter for the content this presenter shows modally.
    ///
    /// Replaces and releases any previously presented child.
    pub fn get_presented_child<C: PresenterState>(
        &self,
        state: C,
        reducer: impl Reducer<C> + 'static,
    ) -> Result<Presenter<C, NoNav>, PresenterError> {
        self.attach_presented(Presenter::<C, NoNav>::builder(state, reducer))
    }

    /// Like [`get_presented_child`](Self::get_presented_child), but the
    /// presented child roots its own navigation tree.
    pub fn get_presented_nav_child<C: PresenterState, CN: NavState>(
        &self,
        state: C,
        reducer: impl Reducer<C, CN::Action> + 'static,
        nav_state: CN,
        nav_reducer: impl NavReducer<CN> + 'static,
    ) -> Result<Presenter<C, CN>, PresenterError> {
        self.attach_presented(
            Presenter::<C, CN>::builder(state, reducer).navigation(nav_state, nav_reducer),
        )
    }

    /// The currently presented child, if it has the requested types.
    pub fn presented_child<C: PresenterState, CN: NavState>(&self) -> Option<Presenter<C, CN>> {
        let presented = self.node.presented.borrow().clone()?;
        presented
            .into_any()
            .downcast::<Node<C, CN>>()
            .ok()
            .map(Presenter::from_node)
    }

    fn attach_presented<C: PresenterState, CN: NavState>(
        &self,
        builder: PresenterBuilder<C, CN>,
    ) -> Result<Presenter<C, CN>, PresenterError> {
        let node = &self.node;
        if node.is_released() {
            return Err(PresenterError::Released {
                label: node.label.clone(),
            });
        }

        let host: Weak<dyn SheetHost> = node.this.clone();
        let child = builder
            .config(node.config.inherited())
            .sheet_host(host)
            .build();
        tracing::debug!(presenter = %node.label, child = %child.label(), "Presenting child");

        let entry: Rc<dyn TreeNode> = child.node.clone();
        let previous = node.presented.borrow_mut().replace(entry);
        if let Some(previous) = previous {
            previous.retire();
        }
        Ok(child)
    }
}
