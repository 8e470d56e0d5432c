//! Presenter node: owns one state and drives its reducer and effects.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::navigation::{NavChild, NavRoot, NavigationSink};
use super::observers::Observers;
use super::sheet::SheetLink;
use super::PresenterId;
use crate::cancellation::{CancelHandle, CancellationRegistry};
use crate::config::PresenterConfig;
use crate::mvi::{
    Dispatcher, Effect, EffectBody, EffectContext, EffectOutcome, PresenterState, Reducer,
};
use crate::nav::NavState;

/// Structural operations every node in a presenter tree supports,
/// regardless of its state type.
pub(crate) trait TreeNode {
    /// Mark the node released: it drops further actions and, when
    /// configured, cancels its in-flight effects. Recurses into the
    /// subtree it owns.
    fn retire(&self);

    fn id(&self) -> PresenterId;

    fn into_any(self: Rc<Self>) -> Rc<dyn Any>;
}

pub(crate) struct NodeInit<S: PresenterState, N: NavState> {
    pub id: PresenterId,
    pub state: S,
    pub reducer: Box<dyn Reducer<S, N::Action>>,
    pub nav: Option<NavRoot<N>>,
    pub parent: Option<Weak<dyn NavigationSink<N>>>,
    pub sheet_parent: Option<SheetLink>,
    pub config: PresenterConfig,
}

pub(crate) struct Node<S: PresenterState, N: NavState> {
    pub(crate) id: PresenterId,
    pub(crate) label: String,
    pub(crate) config: PresenterConfig,
    pub(crate) state: RefCell<S>,
    reducer: Box<dyn Reducer<S, N::Action>>,
    /// Present only on the root of a navigation tree.
    pub(crate) nav: Option<NavRoot<N>>,
    /// Non-owning link used to forward navigation actions to the root.
    pub(crate) parent: Option<Weak<dyn NavigationSink<N>>>,
    /// Non-owning link to the presenter hosting this one as a sheet.
    pub(crate) sheet_parent: RefCell<Option<SheetLink>>,
    /// Owned push-navigation children, keyed by path identity.
    pub(crate) children: RefCell<HashMap<N::Identity, Rc<dyn NavChild<N>>>>,
    /// Owned modal child.
    pub(crate) presented: RefCell<Option<Rc<dyn TreeNode>>>,
    pub(crate) registry: CancellationRegistry,
    lifetime: CancellationToken,
    released: Cell<bool>,
    pub(crate) observers: Observers,
    pub(crate) this: Weak<Self>,
}

impl<S: PresenterState, N: NavState> Node<S, N> {
    pub(crate) fn new(init: NodeInit<S, N>) -> Rc<Self> {
        let label = init.config.resolve_label::<S>();
        Rc::new_cyclic(|this| Node {
            id: init.id,
            label,
            config: init.config,
            state: RefCell::new(init.state),
            reducer: init.reducer,
            nav: init.nav,
            parent: init.parent,
            sheet_parent: RefCell::new(init.sheet_parent),
            children: RefCell::new(HashMap::new()),
            presented: RefCell::new(None),
            registry: CancellationRegistry::new(),
            lifetime: CancellationToken::new(),
            released: Cell::new(false),
            observers: Observers::new(),
            this: this.clone(),
        })
    }

    pub(crate) fn is_released(&self) -> bool {
        self.released.get()
    }

    /// Run the reducer and notify observers if the state changed.
    ///
    /// Returns `None` when the node has been released.
    pub(crate) fn reduce(&self, action: S::Action) -> Option<Effect<S::Action, N::Action>> {
        if self.is_released() {
            tracing::trace!(presenter = %self.label, id = %self.id, ?action, "Dropping action for released presenter");
            return None;
        }
        if self.config.trace_actions {
            tracing::trace!(presenter = %self.label, id = %self.id, ?action, "Dispatching action");
        }

        let (effect, changed) = {
            let mut state = self.state.borrow_mut();
            let before = state.clone();
            let effect = self.reducer.reduce(&mut *state, action);
            let changed = *state != before;
            (effect, changed)
        };

        if changed {
            self.observers.notify();
        }
        Some(effect)
    }

    pub(crate) fn dispatch(&self, action: S::Action) {
        if let Some(effect) = self.reduce(action) {
            self.interpret(effect);
        }
    }

    pub(crate) fn interpret(&self, effect: Effect<S::Action, N::Action>) {
        match effect {
            Effect::None => {}
            Effect::Run { body, cancel_id } => {
                let _ = self.launch(body, cancel_id);
            }
            Effect::Cancel(cancel_id) => self.registry.cancel(Some(&cancel_id)),
            Effect::Dismiss { all } => self.dismiss(all),
        }
    }

    /// Spawn an effect body on the local task set.
    ///
    /// An existing effect under the same cancel id is canceled first. The
    /// registration is removed when the body finishes or is canceled.
    pub(crate) fn launch(
        &self,
        body: EffectBody<S::Action, N::Action>,
        cancel_id: Option<String>,
    ) -> (CancellationToken, JoinHandle<EffectOutcome>) {
        if let Some(key) = cancel_id.as_deref() {
            if self.registry.contains_key(key) {
                tracing::debug!(presenter = %self.label, cancel_id = %key, "Superseding running effect");
            }
            self.registry.cancel(Some(key));
        }

        let token = self.lifetime.child_token();
        let handle = CancelHandle::new(token.clone());
        self.registry.insert(handle.clone(), cancel_id.as_deref());

        let ctx = EffectContext::new(
            self.action_dispatcher(token.clone()),
            self.navigation_dispatcher(token.clone()),
            token.clone(),
        );
        let future = body(ctx);

        let registry = self.registry.clone();
        let task_token = token.clone();
        let label = self.label.clone();
        let join = tokio::task::spawn_local(async move {
            let outcome = tokio::select! {
                biased;
                _ = task_token.cancelled() => EffectOutcome::Cancelled,
                _ = future => EffectOutcome::Completed,
            };
            registry.remove(&handle, cancel_id.as_deref());
            tracing::trace!(presenter = %label, ?outcome, "Effect finished");
            outcome
        });

        (token, join)
    }

    /// Mutate state outside a reducer (presentation bookkeeping), with the
    /// same equality gate as dispatch.
    pub(crate) fn update_state(&self, mutate: impl FnOnce(&mut S)) {
        let changed = {
            let mut state = self.state.borrow_mut();
            let before = state.clone();
            mutate(&mut *state);
            *state != before
        };
        if changed {
            self.observers.notify();
        }
    }

    fn action_dispatcher(&self, token: CancellationToken) -> Dispatcher<S::Action> {
        let node = self.this.clone();
        Dispatcher::new(token, move |action| match node.upgrade() {
            Some(node) => node.dispatch(action),
            None => tracing::trace!(?action, "Dropping action for released presenter"),
        })
    }

    fn navigation_dispatcher(&self, token: CancellationToken) -> Dispatcher<N::Action> {
        let node = self.this.clone();
        Dispatcher::new(token, move |action| match node.upgrade() {
            Some(node) => node.send_navigation(action),
            None => tracing::trace!(?action, "Dropping navigation action for released presenter"),
        })
    }
}

impl<S: PresenterState, N: NavState> TreeNode for Node<S, N> {
    fn retire(&self) {
        if self.released.replace(true) {
            return;
        }
        tracing::debug!(presenter = %self.label, id = %self.id, "Releasing presenter");

        if self.config.cancel_effects_on_release {
            self.lifetime.cancel();
            self.registry.cancel_all();
        }

        let children: Vec<_> = self
            .children
            .borrow_mut()
            .drain()
            .map(|(_, child)| child)
            .collect();
        for child in &children {
            child.retire();
        }

        let presented = self.presented.borrow_mut().take();
        if let Some(presented) = &presented {
            presented.retire();
        }

        self.sheet_parent.borrow_mut().take();
    }

    fn id(&self) -> PresenterId {
        self.id
    }

    fn into_any(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }
}

/// Dropping a node releases the subtree it owns, even when views still
/// hold handles to its children.
impl<S: PresenterState, N: NavState> Drop for Node<S, N> {
    fn drop(&mut self) {
        self.retire();
    }
}
