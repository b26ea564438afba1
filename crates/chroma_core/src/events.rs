//! In-process event bus for lifecycle notifications.
//!
//! # Invariants
//! - Delivery is synchronous, on the publishing thread.
//! - Subscribers run in subscription order.
//! - Subscriber panics are not caught by the bus.

use log::debug;
use std::collections::BTreeMap;

/// Named notification channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventChannel {
    /// The host returned to the main menu from a gameplay session.
    MainMenuEntered,
    /// The host entered a gameplay session.
    GameplaySessionEntered,
    /// The debug snapshot trigger fired with debug mode on.
    DebugRequested,
}

impl EventChannel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MainMenuEntered => "main_menu_entered",
            Self::GameplaySessionEntered => "gameplay_session_entered",
            Self::DebugRequested => "debug_requested",
        }
    }
}

type Subscriber = Box<dyn FnMut()>;

#[derive(Default)]
pub struct EventBus {
    channels: BTreeMap<EventChannel, Vec<Subscriber>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `callback` to the subscriber list of `channel`.
    pub fn subscribe(&mut self, channel: EventChannel, callback: impl FnMut() + 'static) {
        self.channels
            .entry(channel)
            .or_default()
            .push(Box::new(callback));
    }

    /// Invokes every subscriber of `channel` and returns how many ran.
    ///
    /// Publishing to a channel without subscribers is a no-op.
    pub fn publish(&mut self, channel: EventChannel) -> usize {
        let Some(subscribers) = self.channels.get_mut(&channel) else {
            debug!(
                "event=publish module=events channel={} subscribers=0",
                channel.as_str()
            );
            return 0;
        };

        for subscriber in subscribers.iter_mut() {
            subscriber();
        }
        debug!(
            "event=publish module=events channel={} subscribers={}",
            channel.as_str(),
            subscribers.len()
        );
        subscribers.len()
    }

    pub fn subscriber_count(&self, channel: EventChannel) -> usize {
        self.channels.get(&channel).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::{EventBus, EventChannel};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn delivers_in_subscription_order() {
        let mut bus = EventBus::new();
        let calls = Rc::new(RefCell::new(Vec::new()));
        for label in ["first", "second", "third"] {
            let calls = Rc::clone(&calls);
            bus.subscribe(EventChannel::MainMenuEntered, move || {
                calls.borrow_mut().push(label)
            });
        }

        assert_eq!(bus.publish(EventChannel::MainMenuEntered), 3);
        assert_eq!(*calls.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn publishing_without_subscribers_is_a_noop() {
        let mut bus = EventBus::new();
        assert_eq!(bus.publish(EventChannel::DebugRequested), 0);
        assert_eq!(bus.subscriber_count(EventChannel::DebugRequested), 0);
    }

    #[test]
    fn channels_are_independent() {
        let mut bus = EventBus::new();
        let hits = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&hits);
        bus.subscribe(EventChannel::GameplaySessionEntered, move || {
            *counter.borrow_mut() += 1
        });

        assert_eq!(bus.publish(EventChannel::MainMenuEntered), 0);
        assert_eq!(*hits.borrow(), 0);
        assert_eq!(bus.publish(EventChannel::GameplaySessionEntered), 1);
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn subscribers_keep_state_across_publishes() {
        let mut bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut count = 0;
        bus.subscribe(EventChannel::DebugRequested, move || {
            count += 1;
            sink.borrow_mut().push(count);
        });

        bus.publish(EventChannel::DebugRequested);
        bus.publish(EventChannel::DebugRequested);
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }
}
