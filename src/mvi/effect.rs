//! Effects describe the follow-up work a reducer asks the presenter to do.
//!
//! A reducer never performs I/O itself. It mutates state and returns one
//! [`Effect`]; the presenter interprets it right away:
//!
//! ```text
//! send(action) ──→ reducer ──→ Effect::None      → done
//!                             Effect::Run       → spawn body (maybe keyed)
//!                             Effect::Cancel    → cancel bodies under key
//!                             Effect::Dismiss   → close modal presentation
//! ```

use std::convert::Infallible;
use std::fmt;
use std::future::{poll_fn, Future};
use std::pin::Pin;
use std::rc::Rc;

use futures_core::Stream;
use tokio_util::sync::CancellationToken;

/// Future produced by an effect body.
pub type EffectFuture = Pin<Box<dyn Future<Output = ()> + 'static>>;

/// Boxed effect body: receives its context and returns the work to run.
pub type EffectBody<A, NA> = Box<dyn FnOnce(EffectContext<A, NA>) -> EffectFuture>;

/// Outcome of a reducer call, consumed immediately by the presenter.
///
/// `A` is the presenter's action type, `NA` the navigation action type of
/// the tree it belongs to (`Infallible` for presenters without navigation).
pub enum Effect<A, NA = Infallible> {
    /// Nothing to do.
    None,
    /// Run an asynchronous body.
    ///
    /// With a `cancel_id`, any body already running under that id is
    /// canceled before this one starts.
    Run {
        body: EffectBody<A, NA>,
        cancel_id: Option<String>,
    },
    /// Cancel every body running under the id. State is untouched.
    Cancel(String),
    /// Close the modal presentation this presenter belongs to.
    Dismiss { all: bool },
}

impl<A: 'static, NA: 'static> Effect<A, NA> {
    pub fn none() -> Self {
        Effect::None
    }

    /// Run `body` as an independent unit of work on the UI context.
    pub fn run<F, Fut>(body: F) -> Self
    where
        F: FnOnce(EffectContext<A, NA>) -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        Effect::Run {
            body: Box::new(move |ctx| Box::pin(body(ctx))),
            cancel_id: None,
        }
    }

    /// Forward every item of `stream` as an action until the stream ends
    /// or the effect is canceled.
    pub fn stream<St, F>(stream: St, to_action: F) -> Self
    where
        St: Stream + 'static,
        F: Fn(St::Item) -> A + 'static,
    {
        Self::run(move |ctx| async move {
            let mut stream = Box::pin(stream);
            while let Some(item) = poll_fn(|cx| stream.as_mut().poll_next(cx)).await {
                ctx.send(to_action(item));
            }
        })
    }

    pub fn cancel(cancel_id: impl Into<String>) -> Self {
        Effect::Cancel(cancel_id.into())
    }

    pub fn dismiss() -> Self {
        Effect::Dismiss { all: false }
    }

    pub fn dismiss_all() -> Self {
        Effect::Dismiss { all: true }
    }

    /// Attach a cancel id to a `Run` effect. Other variants are returned
    /// unchanged.
    pub fn cancellable(self, cancel_id: impl Into<String>) -> Self {
        match self {
            Effect::Run { body, .. } => Effect::Run {
                body,
                cancel_id: Some(cancel_id.into()),
            },
            other => other,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Effect::None)
    }

    /// Comparable description of this effect, without the body.
    pub fn kind(&self) -> EffectKind {
        match self {
            Effect::None => EffectKind::None,
            Effect::Run { cancel_id, .. } => EffectKind::Run {
                cancel_id: cancel_id.clone(),
            },
            Effect::Cancel(id) => EffectKind::Cancel(id.clone()),
            Effect::Dismiss { all } => EffectKind::Dismiss { all: *all },
        }
    }
}

impl<A, NA> fmt::Debug for Effect<A, NA> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::None => f.write_str("None"),
            Effect::Run { cancel_id, .. } => f
                .debug_struct("Run")
                .field("cancel_id", cancel_id)
                .finish_non_exhaustive(),
            Effect::Cancel(id) => f.debug_tuple("Cancel").field(id).finish(),
            Effect::Dismiss { all } => f.debug_struct("Dismiss").field("all", all).finish(),
        }
    }
}

/// Shape of an [`Effect`], used to compare reducer outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectKind {
    None,
    Run { cancel_id: Option<String> },
    Cancel(String),
    Dismiss { all: bool },
}

/// How an awaited dispatch finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectOutcome {
    /// The reducer returned something other than `Run`.
    NoEffect,
    /// The body ran to completion.
    Completed,
    /// The body was canceled before it finished.
    Cancelled,
}

/// Callback handed to effect bodies for dispatching values back into the
/// presenter tree.
///
/// Holds only a non-owning reference to its presenter: calls made after the
/// presenter is released, or after the owning effect was canceled, are
/// dropped silently.
pub struct Dispatcher<T> {
    sink: Rc<dyn Fn(T)>,
    token: CancellationToken,
}

impl<T> Dispatcher<T> {
    pub(crate) fn new(token: CancellationToken, sink: impl Fn(T) + 'static) -> Self {
        Self {
            sink: Rc::new(sink),
            token,
        }
    }

    pub fn call(&self, value: T) {
        if self.token.is_cancelled() {
            tracing::trace!("dropping dispatch from canceled effect");
            return;
        }
        (self.sink)(value);
    }
}

impl<T> Clone for Dispatcher<T> {
    fn clone(&self) -> Self {
        Self {
            sink: Rc::clone(&self.sink),
            token: self.token.clone(),
        }
    }
}

/// Everything an effect body may touch: the two callbacks and its
/// cancellation token.
pub struct EffectContext<A, NA> {
    send: Dispatcher<A>,
    send_navigation: Dispatcher<NA>,
    token: CancellationToken,
}

impl<A, NA> EffectContext<A, NA> {
    pub(crate) fn new(
        send: Dispatcher<A>,
        send_navigation: Dispatcher<NA>,
        token: CancellationToken,
    ) -> Self {
        Self {
            send,
            send_navigation,
            token,
        }
    }

    /// Dispatch a follow-up action into the presenter that ran this effect.
    pub fn send(&self, action: A) {
        self.send.call(action);
    }

    /// Forward a navigation action to the root of the presenter tree.
    pub fn send_navigation(&self, action: NA) {
        self.send_navigation.call(action);
    }

    pub fn sender(&self) -> Dispatcher<A> {
        self.send.clone()
    }

    pub fn navigator(&self) -> Dispatcher<NA> {
        self.send_navigation.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once this effect has been canceled.
    pub async fn cancelled(&self) {
        self.token.cancelled().await;
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Act {
        Ping,
    }

    #[test]
    fn cancellable_sets_id_on_run_only() {
        let run: Effect<Act> = Effect::run(|_ctx| async {}).cancellable("search");
        assert_eq!(
            run.kind(),
            EffectKind::Run {
                cancel_id: Some("search".to_string())
            }
        );

        let none: Effect<Act> = Effect::none().cancellable("search");
        assert_eq!(none.kind(), EffectKind::None);
    }

    #[test]
    fn dismiss_constructors() {
        assert_eq!(
            Effect::<Act>::dismiss().kind(),
            EffectKind::Dismiss { all: false }
        );
        assert_eq!(
            Effect::<Act>::dismiss_all().kind(),
            EffectKind::Dismiss { all: true }
        );
    }

    #[test]
    fn debug_hides_body() {
        let run: Effect<Act> = Effect::run(|_ctx| async {}).cancellable("x");
        let rendered = format!("{:?}", run);
        assert!(rendered.starts_with("Run"));
        assert!(rendered.contains("\"x\""));
    }

    #[test]
    fn dispatcher_drops_after_cancel() {
        let seen = Rc::new(std::cell::RefCell::new(Vec::new()));
        let token = CancellationToken::new();
        let sink = Rc::clone(&seen);
        let dispatcher = Dispatcher::new(token.clone(), move |a: Act| sink.borrow_mut().push(a));

        dispatcher.call(Act::Ping);
        token.cancel();
        dispatcher.call(Act::Ping);

        assert_eq!(seen.borrow().as_slice(), &[Act::Ping]);
    }
}
