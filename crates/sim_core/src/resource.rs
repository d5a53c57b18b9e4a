//! Capacity-bounded pool of identical servers (doctors, beds) with a priority queue.
//!
//! Waiting requests are served by `(priority, enqueue_sequence)`: lower priority
//! numbers first, FIFO within a priority. There is no aging, so a steady stream
//! of urgent requests keeps less urgent ones waiting indefinitely.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bevy_ecs::prelude::{Entity, Resource};

/// A request that could not be granted immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRequest {
    pub priority: u8,
    pub enqueue_sequence: u64,
    pub waiter: Entity,
}

impl Ord for PendingRequest {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap a min-heap by (priority, enqueue_sequence).
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.enqueue_sequence.cmp(&self.enqueue_sequence))
    }
}

impl PartialOrd for PendingRequest {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Outcome of [PriorityResource::acquire].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquisition {
    /// A unit was free and is now held by the caller.
    Granted,
    /// The caller was queued with this enqueue sequence.
    Queued { enqueue_sequence: u64 },
}

#[derive(Debug, Resource)]
pub struct PriorityResource {
    capacity: usize,
    in_use: usize,
    waiting: BinaryHeap<PendingRequest>,
    next_enqueue_sequence: u64,
}

impl PriorityResource {
    /// Capacity is validated by the scenario before a resource is built.
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "resource capacity must be positive");
        Self {
            capacity,
            in_use: 0,
            waiting: BinaryHeap::new(),
            next_enqueue_sequence: 0,
        }
    }

    pub fn acquire(&mut self, priority: u8, waiter: Entity) -> Acquisition {
        if self.in_use < self.capacity {
            self.in_use += 1;
            return Acquisition::Granted;
        }

        let enqueue_sequence = self.next_enqueue_sequence;
        self.next_enqueue_sequence += 1;
        self.waiting.push(PendingRequest {
            priority,
            enqueue_sequence,
            waiter,
        });
        Acquisition::Queued { enqueue_sequence }
    }

    /// Returns one unit. If anyone is waiting, the most urgent request takes the
    /// unit over at once and is returned so its lifecycle can be resumed.
    pub fn release(&mut self) -> Option<PendingRequest> {
        debug_assert!(self.in_use > 0, "release without a matching acquire");
        self.in_use = self.in_use.saturating_sub(1);

        let granted = self.waiting.pop()?;
        self.in_use += 1;
        Some(granted)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn in_use(&self) -> usize {
        self.in_use
    }

    pub fn queue_len(&self) -> usize {
        self.waiting.len()
    }

    pub fn utilization(&self) -> f64 {
        self.in_use as f64 / self.capacity as f64
    }
}
