//! Integration tests for state machines + subscriber channels + tweens
//!
//! These tests verify that:
//! - FSM entry actions can start tweens
//! - Tween values flow to subscribers through a channel
//! - Closing a channel mid-animation silences subscribers

use std::cell::RefCell;
use std::rc::Rc;

use pano_animation::{Easing, Tween};
use pano_core::events::event_types;
use pano_core::{Channel, EventType, StateMachine, StateTransitions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Panel {
    Closed,
    Opening,
    Open,
}

impl StateTransitions for Panel {
    fn on_event(&self, event: EventType) -> Option<Self> {
        match (self, event) {
            (Panel::Closed, event_types::SCROLL_TO) => Some(Panel::Opening),
            (Panel::Opening, event_types::SETTLED) => Some(Panel::Open),
            _ => None,
        }
    }
}

/// Entering a state starts a tween whose values reach a subscriber
#[test]
fn test_entry_action_starts_tween() {
    let tween: Rc<RefCell<Option<Tween>>> = Rc::new(RefCell::new(None));
    let mut panel = StateMachine::new(Panel::Closed);

    let slot = Rc::clone(&tween);
    panel.on_enter(Panel::Opening, move |_| {
        *slot.borrow_mut() = Some(Tween::new(0.0, 300.0, 0.25, Easing::EaseOutCubic));
    });

    let channel: Channel<f32> = Channel::new();
    let values = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&values);
    let _sub = channel.subscribe(move |v| sink.borrow_mut().push(*v));

    panel.send(event_types::SCROLL_TO);
    assert!(panel.is_in(Panel::Opening));

    loop {
        let (value, done) = {
            let mut slot = tween.borrow_mut();
            let Some(t) = slot.as_mut() else {
                panic!("entry action did not start a tween");
            };
            (t.advance(1.0 / 60.0), t.is_done())
        };
        channel.emit(&value);
        if done {
            panel.send(event_types::SETTLED);
            break;
        }
    }

    assert!(panel.is_in(Panel::Open));
    let values = values.borrow();
    assert_eq!(values.last().copied(), Some(300.0));
    assert!(values.windows(2).all(|w| w[1] >= w[0]));
    assert_eq!(panel.history().count(), 2);
}

/// A subscriber that closes the channel stops every later delivery
#[test]
fn test_close_mid_animation() {
    let channel: Rc<Channel<f32>> = Rc::new(Channel::new());
    let received = Rc::new(RefCell::new(0usize));

    let closer = Rc::clone(&channel);
    let _stopper = channel.subscribe(move |v| {
        if *v > 105.0 {
            closer.close();
        }
    });
    let count = Rc::clone(&received);
    let _counter = channel.subscribe(move |_| *count.borrow_mut() += 1);

    let mut tween = Tween::new(0.0, 200.0, 1.0, Easing::Linear);
    for _ in 0..60 {
        let value = tween.advance(1.0 / 60.0);
        channel.emit(&value);
    }

    assert!(channel.is_closed());
    assert!(channel.is_empty());
    // Frame 32 (~106.7) closes before the counter runs
    assert_eq!(*received.borrow(), 31);
}
