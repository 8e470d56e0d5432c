//! Model-View-Intent primitives: state, actions, reducers and effects.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Reducer ──→ State ──→ View
//!    ↑          │                   │
//!    │          └──→ Effect ──┐     │
//!    └────────────────────────┴─────┘
//! ```
//!
//! - **State**: value owned by one presenter, compared before notifying
//! - **Action**: user input, lifecycle events or results of async work
//! - **Reducer**: pure function mutating state and returning an effect
//! - **Effect**: follow-up work the presenter executes on the reducer's behalf

mod action;
mod effect;
mod reducer;
mod state;

pub use action::Action;
pub use effect::{
    Dispatcher, Effect, EffectBody, EffectContext, EffectFuture, EffectKind, EffectOutcome,
};
pub use reducer::{NavReducer, Reducable, Reducer, StateReducer};
pub use state::{PresenterState, SheetPresenterState};
