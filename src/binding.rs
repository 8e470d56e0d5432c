//! Two-way bindings between view controls and presenter actions, plus the
//! awaitable lifecycle hooks views call on appear and refresh.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::rc::Rc;

use crate::mvi::{EffectOutcome, PresenterState};
use crate::nav::{NavAction, NavState, StackNav};
use crate::presenter::{Presenter, WeakPresenter};

/// A value read from state, written back by dispatching an action.
pub struct Binding<T> {
    value: T,
    setter: Rc<dyn Fn(T)>,
}

impl<T: Clone> Binding<T> {
    pub fn get(&self) -> T {
        self.value.clone()
    }

    /// Dispatch the action built from `value`. Does nothing once the
    /// presenter is gone.
    pub fn set(&self, value: T) {
        (self.setter)(value);
    }
}

/// Navigation path exposed as a list of destinations.
///
/// Writing a longer list navigates to each appended destination; writing a
/// shorter one pops once per removed entry. A list of the same length is
/// ignored.
pub struct PathBinding<D> {
    read: Rc<dyn Fn() -> Vec<D>>,
    write: Rc<dyn Fn(Vec<D>)>,
}

impl<D> PathBinding<D> {
    pub fn get(&self) -> Vec<D> {
        (self.read)()
    }

    pub fn set(&self, path: Vec<D>) {
        (self.write)(path);
    }
}

impl<S: PresenterState, N: NavState> Presenter<S, N> {
    /// Bind `value` to this presenter: setting it dispatches
    /// `to_action(new_value)`.
    pub fn binding<T: 'static>(
        &self,
        value: T,
        to_action: impl Fn(T) -> S::Action + 'static,
    ) -> Binding<T> {
        let presenter = self.downgrade();
        Binding {
            value,
            setter: Rc::new(move |new_value| {
                if let Some(presenter) = presenter.upgrade() {
                    presenter.send(to_action(new_value));
                }
            }),
        }
    }

    /// Awaitable dispatch for a view's appear hook.
    pub async fn appear(&self, action: S::Action) -> EffectOutcome {
        self.send_async(action).await
    }

    /// Awaitable dispatch for pull-to-refresh style hooks.
    pub async fn refresh(&self, action: S::Action) -> EffectOutcome {
        self.send_async(action).await
    }
}

impl<S, D> Presenter<S, StackNav<D>>
where
    S: PresenterState,
    D: Debug + Clone + PartialEq + Send + 'static,
{
    /// Bind the navigation path of this presenter's tree.
    ///
    /// `to_action` maps a pushed destination, or `None` for a pop, to the
    /// tree's navigation action.
    pub fn bind_path(
        &self,
        to_action: impl Fn(Option<D>) -> NavAction<D> + 'static,
    ) -> PathBinding<D> {
        let reader = self.downgrade();
        let writer = self.downgrade();
        PathBinding {
            read: Rc::new(move || current_path(&reader)),
            write: Rc::new(move |path: Vec<D>| {
                let Some(presenter) = writer.upgrade() else {
                    return;
                };
                let current = presenter.nav_state().map_or(0, |nav| nav.len());
                match path.len().cmp(&current) {
                    Ordering::Greater => {
                        for destination in path.into_iter().skip(current) {
                            presenter.send_navigation(to_action(Some(destination)));
                        }
                    }
                    Ordering::Less => {
                        for _ in path.len()..current {
                            presenter.send_navigation(to_action(None));
                        }
                    }
                    Ordering::Equal => {}
                }
            }),
        }
    }
}

fn current_path<S, D>(presenter: &WeakPresenter<S, StackNav<D>>) -> Vec<D>
where
    S: PresenterState,
    D: Debug + Clone + PartialEq + Send + 'static,
{
    presenter
        .upgrade()
        .and_then(|presenter| presenter.nav_state())
        .map(|nav| nav.destinations().cloned().collect())
        .unwrap_or_default()
}
