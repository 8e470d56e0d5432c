//! Reducer traits.

use std::convert::Infallible;

use super::effect::Effect;
use super::state::PresenterState;
use crate::nav::NavState;

/// Reducer transforms state in response to actions.
///
/// The reducer is the only place where state transitions happen. It must be
/// deterministic and free of I/O: given the same state and action it always
/// produces the same state and an effect of the same shape. Anything
/// asynchronous goes into an [`Effect::Run`] body.
///
/// `NA` is the navigation action type of the tree the presenter lives in.
/// Any `Fn(&mut S, S::Action) -> Effect<S::Action, NA>` is a reducer.
pub trait Reducer<S: PresenterState, NA = Infallible> {
    fn reduce(&self, state: &mut S, action: S::Action) -> Effect<S::Action, NA>;
}

impl<S, NA, F> Reducer<S, NA> for F
where
    S: PresenterState,
    F: Fn(&mut S, S::Action) -> Effect<S::Action, NA>,
{
    fn reduce(&self, state: &mut S, action: S::Action) -> Effect<S::Action, NA> {
        self(state, action)
    }
}

/// Mutates the navigation state shared by a presenter tree.
///
/// Only the root presenter of a tree runs its nav reducer; descendants
/// forward navigation actions up to it.
pub trait NavReducer<N: NavState> {
    fn reduce(&self, nav: &mut N, action: N::Action);
}

impl<N, F> NavReducer<N> for F
where
    N: NavState,
    F: Fn(&mut N, N::Action),
{
    fn reduce(&self, nav: &mut N, action: N::Action) {
        self(nav, action)
    }
}

/// State that carries its own reducer.
///
/// Used for simple screens without navigation, see
/// [`Presenter::from_reducable`](crate::presenter::Presenter::from_reducable).
pub trait Reducable: PresenterState {
    fn reduce(&mut self, action: Self::Action) -> Effect<Self::Action>;
}

/// Adapter running a [`Reducable`] state's own reducer.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateReducer;

impl<S: Reducable> Reducer<S> for StateReducer {
    fn reduce(&self, state: &mut S, action: S::Action) -> Effect<S::Action> {
        state.reduce(action)
    }
}
