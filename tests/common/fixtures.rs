//! State types shared by the integration tests.

use presenter::{Effect, PresenterState, Reducable, SheetPresenterState};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CounterState {
    pub count: i32,
}

#[derive(Debug)]
pub enum CounterAction {
    Increment,
    Decrement,
    Set(i32),
    Add(i32),
}

impl PresenterState for CounterState {
    type Action = CounterAction;
    type UiState = i32;

    fn ui_state(&self) -> &i32 {
        &self.count
    }
}

impl Reducable for CounterState {
    fn reduce(&mut self, action: CounterAction) -> Effect<CounterAction> {
        match action {
            CounterAction::Increment => self.count += 1,
            CounterAction::Decrement => self.count -= 1,
            CounterAction::Set(value) => self.count = value,
            CounterAction::Add(value) => self.count += value,
        }
        Effect::none()
    }
}

/// Screen that can show one sheet at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostState {
    pub sheet: Option<u32>,
    pub closed: bool,
}

#[derive(Debug)]
pub enum HostAction {
    Present(u32),
    Close,
    CloseAll,
}

impl PresenterState for HostState {
    type Action = HostAction;
    type UiState = Option<u32>;

    fn ui_state(&self) -> &Option<u32> {
        &self.sheet
    }

    fn dismiss(&mut self) {
        self.closed = true;
    }
}

impl SheetPresenterState for HostState {
    type Sheet = u32;

    fn presented(&self) -> Option<&u32> {
        self.sheet.as_ref()
    }

    fn presented_mut(&mut self) -> &mut Option<u32> {
        &mut self.sheet
    }
}

pub fn host_reducer<NA: 'static>(state: &mut HostState, action: HostAction) -> Effect<HostAction, NA> {
    match action {
        HostAction::Present(sheet) => {
            state.present(sheet);
            Effect::none()
        }
        HostAction::Close => Effect::dismiss(),
        HostAction::CloseAll => Effect::dismiss_all(),
    }
}

/// Screen pushed onto a navigation stack.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailState {
    pub title: String,
}

#[derive(Debug)]
pub enum DetailAction {
    Rename(String),
}

impl PresenterState for DetailState {
    type Action = DetailAction;
    type UiState = String;

    fn ui_state(&self) -> &String {
        &self.title
    }
}

pub fn detail_reducer<NA: 'static>(
    state: &mut DetailState,
    action: DetailAction,
) -> Effect<DetailAction, NA> {
    match action {
        DetailAction::Rename(title) => state.title = title,
    }
    Effect::none()
}

pub fn detail(title: &str) -> DetailState {
    DetailState {
        title: title.to_string(),
    }
}
