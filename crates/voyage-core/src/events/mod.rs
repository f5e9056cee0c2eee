//! Outbound notifications
//!
//! The core never calls into listeners. It appends events to a queue and
//! consumers drain it when they are ready.

pub mod logger;

pub use logger::EventLogger;

use voyage_events::{generate_event_id, Event, EventKind, Phase};

/// Pending events awaiting a consumer, numbered in emission order.
#[derive(Debug)]
pub struct EventQueue {
    events: Vec<Event>,
    next_sequence: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            next_sequence: 1,
        }
    }

    /// Stamps the event with the next id and queues it.
    pub fn push(&mut self, day: u32, phase: Phase, kind: EventKind) -> &Event {
        let id = generate_event_id(self.next_sequence);
        self.next_sequence += 1;
        self.events.push(Event::new(id, day, phase, kind));
        &self.events[self.events.len() - 1]
    }

    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn pending(&self) -> &[Event] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Number of events ever emitted, drained or not.
    pub fn emitted(&self) -> u64 {
        self.next_sequence - 1
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}
