//! Presenters: state holders that run reducers, launch effects and form
//! navigation and presentation trees.
//!
//! # Ownership
//!
//! ```text
//! root ──owns──→ child (per live navigation identity)
//!   │               │
//!   └─owns─→ presented child ──owns──→ its own children
//!
//! child ──weak──→ parent        (navigation forwarding)
//! presented ──weak──→ host      (dismiss)
//! ```
//!
//! Presenters are `!Send`. They live on the thread that drives the UI and
//! spawn effect bodies with [`tokio::task::spawn_local`], so every presenter
//! operation must run inside a [`tokio::task::LocalSet`].

mod navigation;
mod node;
mod observers;
mod sheet;

use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use uuid::Uuid;

use crate::config::PresenterConfig;
use crate::mvi::{
    Effect, EffectOutcome, NavReducer, PresenterState, Reducable, Reducer, StateReducer,
};
use crate::nav::{NavState, NoNav};

use navigation::NavRoot;
use node::{Node, NodeInit};
use sheet::{SheetHost, SheetLink};

pub use observers::ObserverId;

static NEXT_PRESENTER_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique presenter id, used in log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PresenterId(u64);

impl PresenterId {
    fn next() -> Self {
        Self(NEXT_PRESENTER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for PresenterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle to a presenter node.
///
/// Cloning yields another handle to the same node. Dropping the last handle
/// of a root releases the whole tree it owns.
pub struct Presenter<S: PresenterState, N: NavState = NoNav> {
    node: Rc<Node<S, N>>,
}

impl<S: PresenterState, N: NavState> Clone for Presenter<S, N> {
    fn clone(&self) -> Self {
        Self {
            node: Rc::clone(&self.node),
        }
    }
}

impl<S: PresenterState, N: NavState> fmt::Debug for Presenter<S, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Presenter")
            .field("id", &self.node.id)
            .field("label", &self.node.label)
            .field("released", &self.node.is_released())
            .finish()
    }
}

impl<S: PresenterState> Presenter<S, NoNav> {
    /// Presenter without navigation.
    pub fn new(initial_state: S, reducer: impl Reducer<S> + 'static) -> Self {
        Self::builder(initial_state, reducer).build()
    }
}

impl<S: Reducable> Presenter<S, NoNav> {
    /// Presenter whose state carries its own reducer.
    pub fn from_reducable(initial_state: S) -> Self {
        Self::new(initial_state, StateReducer)
    }
}

impl<S: PresenterState, N: NavState> Presenter<S, N> {
    pub fn builder(
        initial_state: S,
        reducer: impl Reducer<S, N::Action> + 'static,
    ) -> PresenterBuilder<S, N> {
        PresenterBuilder {
            state: initial_state,
            reducer: Box::new(reducer),
            nav: None,
            sheet_host: None,
            initial_actions: Vec::new(),
            config: PresenterConfig::default(),
        }
    }

    /// Root presenter that owns the navigation state of its tree.
    pub fn with_navigation(
        initial_state: S,
        reducer: impl Reducer<S, N::Action> + 'static,
        nav_state: N,
        nav_reducer: impl NavReducer<N> + 'static,
    ) -> Self {
        Self::builder(initial_state, reducer)
            .navigation(nav_state, nav_reducer)
            .build()
    }

    fn from_node(node: Rc<Node<S, N>>) -> Self {
        Self { node }
    }

    pub fn id(&self) -> PresenterId {
        self.node.id
    }

    pub fn label(&self) -> &str {
        &self.node.label
    }

    /// Dispatch an action: run the reducer, notify observers if the state
    /// changed, then interpret the returned effect.
    pub fn send(&self, action: S::Action) {
        self.node.dispatch(action);
    }

    /// Dispatch an action and wait until the effect it produced finishes.
    ///
    /// Dropping the returned future cancels that effect. A `Run` effect
    /// without a cancel id gets a fresh one so it can be canceled this way.
    /// Any other effect is interpreted as usual and reported as
    /// [`EffectOutcome::NoEffect`].
    pub async fn send_async(&self, action: S::Action) -> EffectOutcome {
        let Some(effect) = self.node.reduce(action) else {
            return EffectOutcome::NoEffect;
        };

        match effect {
            Effect::Run { body, cancel_id } => {
                let cancel_id = cancel_id.unwrap_or_else(|| format!("send-async-{}", Uuid::new_v4()));
                let (token, join) = self.node.launch(body, Some(cancel_id));
                let guard = token.drop_guard();
                let outcome = match join.await {
                    Ok(outcome) => outcome,
                    Err(err) => {
                        tracing::warn!(presenter = %self.node.label, error = %err, "Effect task failed");
                        EffectOutcome::Cancelled
                    }
                };
                let _ = guard.disarm();
                outcome
            }
            other => {
                self.node.interpret(other);
                EffectOutcome::NoEffect
            }
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> S {
        self.node.state.borrow().clone()
    }

    /// Borrow the current state without cloning it.
    ///
    /// Dispatching into this presenter from `read` panics.
    pub fn with_state<R>(&self, read: impl FnOnce(&S) -> R) -> R {
        read(&self.node.state.borrow())
    }

    pub fn ui_state(&self) -> S::UiState
    where
        S::UiState: Clone,
    {
        self.node.state.borrow().ui_state().clone()
    }

    /// Whether an effect is running under `cancel_id`.
    pub fn is_running(&self, cancel_id: &str) -> bool {
        self.node.registry.contains_key(cancel_id)
    }

    /// Whether the presenter was pruned, dismissed or replaced. A released
    /// presenter ignores further actions.
    pub fn is_released(&self) -> bool {
        self.node.is_released()
    }

    /// Call `callback` after every state change and every navigation
    /// reducer run.
    pub fn on_change(&self, callback: impl Fn() + 'static) -> ObserverId {
        self.node.observers.subscribe(callback)
    }

    pub fn remove_observer(&self, id: ObserverId) -> bool {
        self.node.observers.unsubscribe(id)
    }

    /// Number of change notifications emitted so far.
    pub fn revision(&self) -> u64 {
        self.node.observers.revision()
    }

    /// Receiver that sees the revision counter move on every change.
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.node.observers.changes()
    }

    pub fn downgrade(&self) -> WeakPresenter<S, N> {
        WeakPresenter {
            node: Rc::downgrade(&self.node),
        }
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }
}

/// Non-owning presenter handle.
pub struct WeakPresenter<S: PresenterState, N: NavState = NoNav> {
    node: Weak<Node<S, N>>,
}

impl<S: PresenterState, N: NavState> WeakPresenter<S, N> {
    pub fn upgrade(&self) -> Option<Presenter<S, N>> {
        self.node.upgrade().map(Presenter::from_node)
    }
}

impl<S: PresenterState, N: NavState> Clone for WeakPresenter<S, N> {
    fn clone(&self) -> Self {
        Self {
            node: Weak::clone(&self.node),
        }
    }
}

/// Configures and builds a [`Presenter`].
pub struct PresenterBuilder<S: PresenterState, N: NavState> {
    state: S,
    reducer: Box<dyn Reducer<S, N::Action>>,
    nav: Option<NavRoot<N>>,
    sheet_host: Option<Weak<dyn SheetHost>>,
    initial_actions: Vec<S::Action>,
    config: PresenterConfig,
}

impl<S: PresenterState, N: NavState> PresenterBuilder<S, N> {
    /// Make the presenter the root of a navigation tree.
    pub fn navigation(mut self, nav_state: N, nav_reducer: impl NavReducer<N> + 'static) -> Self {
        self.nav = Some(NavRoot::new(nav_state, nav_reducer));
        self
    }

    /// Actions dispatched, in order, as soon as the presenter is built.
    pub fn initial_actions(mut self, actions: impl IntoIterator<Item = S::Action>) -> Self {
        self.initial_actions.extend(actions);
        self
    }

    pub fn config(mut self, config: PresenterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.config.label = Some(label.into());
        self
    }

    fn sheet_host(mut self, host: Weak<dyn SheetHost>) -> Self {
        self.sheet_host = Some(host);
        self
    }

    /// Build the presenter and dispatch the initial actions.
    ///
    /// Must run inside a [`tokio::task::LocalSet`] if any initial action
    /// launches an effect.
    pub fn build(self) -> Presenter<S, N> {
        let id = PresenterId::next();
        let node = Node::new(NodeInit {
            id,
            state: self.state,
            reducer: self.reducer,
            nav: self.nav,
            parent: None,
            sheet_parent: self.sheet_host.map(|host| SheetLink { host, presented: id }),
            config: self.config,
        });
        tracing::debug!(presenter = %node.label, id = %node.id, "Presenter created");

        for action in self.initial_actions {
            node.dispatch(action);
        }
        Presenter::from_node(node)
    }
}
