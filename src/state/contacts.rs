//! Per-tick contact frames. Raw pointer samples (touch events or emulated
//! mouse input) arrive between ticks; `ContactTracker` folds them into an
//! ordered list of `Contact` records with per-frame deltas, consumed once
//! per engine tick.

use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactPhase {
    Began,
    Moved,
    Ended,
    Canceled,
}

/// One active pointer for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    pub id: u32,
    pub position: Vec2,
    /// Screen-space movement since the previous tick's sample.
    pub delta: Vec2,
    pub phase: ContactPhase,
}

#[derive(Clone, Copy, Debug)]
struct TrackedContact {
    id: u32,
    position: Vec2,
    last_position: Vec2,
    fresh: bool,
    finished: Option<ContactPhase>,
}

/// Accumulates pointer samples between ticks. Contacts keep their begin
/// order; a contact that ends is reported once with its terminal phase and
/// then dropped.
#[derive(Default, Debug, Clone)]
pub struct ContactTracker {
    contacts: Vec<TrackedContact>,
}

impl ContactTracker {
    pub fn begin(&mut self, id: u32, position: Vec2) {
        if self.contacts.iter().any(|c| c.id == id) {
            return;
        }
        self.contacts.push(TrackedContact {
            id,
            position,
            last_position: position,
            fresh: true,
            finished: None,
        });
    }

    pub fn update(&mut self, id: u32, position: Vec2) {
        if let Some(c) = self.contacts.iter_mut().find(|c| c.id == id) {
            c.position = position;
        }
    }

    pub fn end(&mut self, id: u32) {
        self.finish(id, ContactPhase::Ended);
    }

    pub fn cancel(&mut self, id: u32) {
        self.finish(id, ContactPhase::Canceled);
    }

    fn finish(&mut self, id: u32, phase: ContactPhase) {
        if let Some(c) = self.contacts.iter_mut().find(|c| c.id == id) {
            if c.finished.is_none() {
                c.finished = Some(phase);
            }
        }
    }

    pub fn clear(&mut self) {
        self.contacts.clear();
    }

    /// Produce this tick's contact frame and advance the per-contact
    /// baselines.
    pub fn frame(&mut self) -> Vec<Contact> {
        let mut out = Vec::with_capacity(self.contacts.len());
        for c in &mut self.contacts {
            let phase = if let Some(terminal) = c.finished {
                terminal
            } else if c.fresh {
                ContactPhase::Began
            } else {
                ContactPhase::Moved
            };
            out.push(Contact {
                id: c.id,
                position: c.position,
                delta: c.position - c.last_position,
                phase,
            });
            c.last_position = c.position;
            c.fresh = false;
        }
        self.contacts.retain(|c| c.finished.is_none());
        out
    }
}
