//! Presenter trees for unidirectional UI state management.
//!
//! A [`Presenter`] owns one state value. Actions go through a pure reducer,
//! which mutates the state and returns an [`Effect`] describing follow-up
//! work. Presenters form trees: push-navigation children keyed by the
//! identities in the root's navigation state, and modally presented
//! children that can dismiss themselves.
//!
//! ```no_run
//! use presenter::{Effect, Presenter, PresenterState};
//!
//! #[derive(Debug, Clone, Default, PartialEq)]
//! struct Counter {
//!     count: i32,
//! }
//!
//! #[derive(Debug)]
//! enum CounterAction {
//!     Increment,
//! }
//!
//! impl PresenterState for Counter {
//!     type Action = CounterAction;
//!     type UiState = i32;
//!
//!     fn ui_state(&self) -> &i32 {
//!         &self.count
//!     }
//! }
//!
//! fn reduce(state: &mut Counter, action: CounterAction) -> Effect<CounterAction> {
//!     match action {
//!         CounterAction::Increment => state.count += 1,
//!     }
//!     Effect::none()
//! }
//!
//! let presenter = Presenter::new(Counter::default(), reduce);
//! presenter.send(CounterAction::Increment);
//! assert_eq!(presenter.state().count, 1);
//! ```

pub mod binding;
pub mod cancellation;
pub mod config;
pub mod error;
pub mod logging;
pub mod mvi;
pub mod nav;
pub mod presenter;

pub use binding::{Binding, PathBinding};
pub use cancellation::{CancelHandle, CancellationRegistry};
pub use config::{ConfigError, PresenterConfig};
pub use error::PresenterError;
pub use mvi::{
    Action, Dispatcher, Effect, EffectContext, EffectKind, EffectOutcome, NavReducer, Reducable,
    Reducer, PresenterState, SheetPresenterState, StateReducer,
};
pub use nav::{Destination, EntryId, NavAction, NavState, NoNav, SingleNav, StackNav};
pub use presenter::{ObserverId, Presenter, PresenterBuilder, PresenterId, WeakPresenter};
