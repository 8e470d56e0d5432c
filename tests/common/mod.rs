//! Shared test utilities and state fixtures.

#![allow(dead_code, unused_imports)]

pub mod fixtures;

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use tokio::task::LocalSet;

/// Run `future` inside a fresh `LocalSet`, the context presenters spawn
/// effects on.
pub async fn run_local<F: Future>(future: F) -> F::Output {
    presenter::logging::init_tracing();
    LocalSet::new().run_until(future).await
}

/// Yield enough times for spawned effects to reach their next suspension
/// point.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

/// Flag set when the guard is dropped, for observing effect teardown.
#[derive(Clone, Default)]
pub struct DropFlag(Rc<Cell<bool>>);

impl DropFlag {
    pub fn guard(&self) -> DropGuard {
        DropGuard(Rc::clone(&self.0))
    }

    pub fn is_set(&self) -> bool {
        self.0.get()
    }
}

pub struct DropGuard(Rc<Cell<bool>>);

impl Drop for DropGuard {
    fn drop(&mut self) {
        self.0.set(true);
    }
}

/// Count change notifications of a presenter.
pub fn count_notifications<S, N>(presenter: &presenter::Presenter<S, N>) -> Rc<Cell<usize>>
where
    S: presenter::PresenterState,
    N: presenter::NavState,
{
    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);
    presenter.on_change(move || seen.set(seen.get() + 1));
    calls
}
