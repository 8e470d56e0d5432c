//! Base traits for presenter state.

use super::action::Action;

/// State owned by a single presenter.
///
/// States should be:
/// - Value types (`Clone` to snapshot before a reducer runs)
/// - Comparable (`PartialEq` gates change notification)
/// - Self-contained (everything the view needs lives in `ui_state`)
pub trait PresenterState: Clone + PartialEq + 'static {
    /// Actions this state reacts to.
    type Action: Action;

    /// Projection the view renders.
    type UiState;

    fn ui_state(&self) -> &Self::UiState;

    /// Clear whatever this state is currently presenting.
    ///
    /// Called when a presenter without a sheet parent handles a dismiss
    /// effect. States that host sheets should reset their presentation
    /// field here; the default does nothing.
    fn dismiss(&mut self) {}
}

/// State that can host a modally presented child.
///
/// `presented` holds the currently shown sheet, if any. The presenter
/// clears it when the presented child dismisses itself.
pub trait SheetPresenterState: PresenterState {
    type Sheet: Clone + PartialEq + 'static;

    fn presented(&self) -> Option<&Self::Sheet>;

    fn presented_mut(&mut self) -> &mut Option<Self::Sheet>;

    fn present(&mut self, sheet: Self::Sheet) {
        *self.presented_mut() = Some(sheet);
    }

    fn is_presenting(&self) -> bool {
        self.presented().is_some()
    }
}
