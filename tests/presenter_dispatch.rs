mod common;

use common::fixtures::{CounterAction, CounterState};
use common::{count_notifications, run_local};
use presenter::{Effect, EffectKind, Presenter, Reducable};

#[test]
fn increment_twice_decrement_once() {
    let presenter = Presenter::from_reducable(CounterState::default());
    let notifications = count_notifications(&presenter);

    presenter.send(CounterAction::Increment);
    presenter.send(CounterAction::Increment);
    presenter.send(CounterAction::Decrement);

    assert_eq!(presenter.ui_state(), 1);
    assert_eq!(notifications.get(), 3);
}

#[test]
fn unchanged_state_does_not_notify() {
    let presenter = Presenter::from_reducable(CounterState::default());
    let notifications = count_notifications(&presenter);

    presenter.send(CounterAction::Set(0));
    presenter.send(CounterAction::Add(0));
    assert_eq!(notifications.get(), 0);

    presenter.send(CounterAction::Set(7));
    assert_eq!(notifications.get(), 1);

    presenter.send(CounterAction::Set(7));
    assert_eq!(notifications.get(), 1);
}

#[test]
fn reducer_is_deterministic() {
    let start = CounterState { count: 3 };
    let actions = || {
        vec![
            CounterAction::Increment,
            CounterAction::Decrement,
            CounterAction::Set(-4),
            CounterAction::Add(10),
        ]
    };

    for (first, second) in actions().into_iter().zip(actions()) {
        let mut a = start.clone();
        let mut b = start.clone();
        let effect_a = a.reduce(first);
        let effect_b = b.reduce(second);
        assert_eq!(a, b);
        assert_eq!(effect_a.kind(), effect_b.kind());
    }
}

#[test]
fn initial_actions_are_dispatched_on_build() {
    let reducer = |state: &mut CounterState, action: CounterAction| state.reduce(action);
    let presenter = Presenter::<CounterState>::builder(CounterState::default(), reducer)
        .initial_actions([CounterAction::Set(2), CounterAction::Add(3)])
        .build();

    assert_eq!(presenter.state().count, 5);
    assert_eq!(presenter.revision(), 2);
}

#[test]
fn observers_can_be_removed() {
    let presenter = Presenter::from_reducable(CounterState::default());
    let notifications = count_notifications(&presenter);
    let extra = count_notifications(&presenter);

    presenter.send(CounterAction::Increment);
    assert_eq!(extra.get(), 1);

    let id = presenter.on_change(|| {});
    assert!(presenter.remove_observer(id));
    presenter.send(CounterAction::Increment);
    assert_eq!(notifications.get(), 2);
}

#[test]
fn observer_may_dispatch_reentrantly() {
    let presenter = Presenter::from_reducable(CounterState::default());
    let weak = presenter.downgrade();
    presenter.on_change(move || {
        let Some(presenter) = weak.upgrade() else {
            return;
        };
        if presenter.state().count == 1 {
            presenter.send(CounterAction::Set(10));
        }
    });

    presenter.send(CounterAction::Increment);
    assert_eq!(presenter.state().count, 10);
}

#[test]
fn cancel_effect_leaves_state_untouched() {
    let presenter = Presenter::new(
        CounterState { count: 4 },
        |_: &mut CounterState, _: CounterAction| -> Effect<CounterAction> { Effect::cancel("missing") },
    );
    let notifications = count_notifications(&presenter);

    presenter.send(CounterAction::Increment);

    assert_eq!(presenter.state().count, 4);
    assert_eq!(notifications.get(), 0);
    assert!(!presenter.is_running("missing"));
}

#[test]
fn effect_kind_reports_cancel_id() {
    let effect: Effect<CounterAction> = Effect::run(|_ctx| async {}).cancellable("load");
    assert_eq!(
        effect.kind(),
        EffectKind::Run {
            cancel_id: Some("load".to_string())
        }
    );
}

#[tokio::test]
async fn watch_receiver_observes_changes() {
    run_local(async {
        let presenter = Presenter::from_reducable(CounterState::default());
        let mut changes = presenter.changes();

        presenter.send(CounterAction::Increment);

        changes.changed().await.unwrap();
        assert_eq!(*changes.borrow_and_update(), 1);
        assert_eq!(presenter.revision(), 1);
    })
    .await;
}
