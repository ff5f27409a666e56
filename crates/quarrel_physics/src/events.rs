//! Contact events (begin/end touch between fixtures)

use crate::fixture::FixtureInfo;
use crossbeam_channel::{Receiver, Sender};
use quarrel_core::Entity;

/// Edge of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPhase {
    /// Fixtures started touching
    Begin,
    /// Fixtures stopped touching
    End,
}

/// A contact edge between two fixtures on different entities
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    /// Begin or end
    pub phase: ContactPhase,
    /// First fixture
    pub a: FixtureInfo,
    /// Second fixture
    pub b: FixtureInfo,
}

/// One entity's view of a contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactSide {
    /// The fixture belonging to the viewing entity
    pub own: FixtureInfo,
    /// The fixture on the other entity
    pub other: FixtureInfo,
}

impl ContactSide {
    /// The other entity
    pub fn other_entity(&self) -> Entity {
        self.other.entity
    }
}

impl ContactEvent {
    /// Create a begin event
    pub fn begin(a: FixtureInfo, b: FixtureInfo) -> Self {
        Self {
            phase: ContactPhase::Begin,
            a,
            b,
        }
    }

    /// Create an end event
    pub fn end(a: FixtureInfo, b: FixtureInfo) -> Self {
        Self {
            phase: ContactPhase::End,
            a,
            b,
        }
    }

    /// Check if this is a begin event
    pub fn is_begin(&self) -> bool {
        self.phase == ContactPhase::Begin
    }

    /// Both perspectives, `a`'s first
    pub fn sides(&self) -> [ContactSide; 2] {
        [
            ContactSide {
                own: self.a,
                other: self.b,
            },
            ContactSide {
                own: self.b,
                other: self.a,
            },
        ]
    }
}

/// Unbounded queue the physics step publishes contact edges into.
///
/// The host drains it between integration and behavior steps.
#[derive(Debug, Clone)]
pub struct ContactQueue {
    sender: Sender<ContactEvent>,
    receiver: Receiver<ContactEvent>,
}

impl ContactQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self { sender, receiver }
    }

    /// Publish an event
    pub fn push(&self, event: ContactEvent) {
        if self.sender.send(event).is_err() {
            log::warn!("ContactQueue::push: receiver dropped, contact lost");
        }
    }

    /// Take every pending event in publish order
    pub fn drain(&self) -> Vec<ContactEvent> {
        self.receiver.try_iter().collect()
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Whether nothing is pending
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl Default for ContactQueue {
    fn default() -> Self {
        Self::new()
    }
}
