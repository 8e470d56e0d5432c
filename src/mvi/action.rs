//! Base trait for actions dispatched into a presenter.

use std::fmt::Debug;

/// Marker trait for action values.
///
/// Actions represent:
/// - User input (button taps, text edits)
/// - Lifecycle events (appear, refresh)
/// - Results of asynchronous work (fetched data, failures)
///
/// Actions are transient: they are handed to a reducer and never stored.
/// They must be `Send` so effect bodies can produce them from work running
/// on other threads before handing them back to the presenter.
pub trait Action: Debug + Send + 'static {}

impl<T> Action for T where T: Debug + Send + 'static {}
