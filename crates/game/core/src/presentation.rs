//! Request-only boundary to rendering and audio.
//!
//! The core never waits on presentation. Every cosmetic side effect is a
//! fire-and-forget [`PresentationEvent`] handed to the world's
//! [`Presentation`] collaborator.

use crate::character::{EntityId, Gibs};
use crate::geometry::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
pub enum Sound {
    Hit,
    Shield,
    PerfectParry,
    Dash,
    Death,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PresentationEvent {
    /// Floating text owned by `entity`; replaces its previous label.
    Label { entity: EntityId, text: String },
    Hit { entity: EntityId, at: Point, damage: f32 },
    ShieldBlock { entity: EntityId, at: Point },
    PerfectParry { entity: EntityId, at: Point },
    /// Animate `entity` toward `to` over `duration`.
    Knockback {
        entity: EntityId,
        to: Point,
        duration: f32,
    },
    Dash { entity: EntityId, angle: f32 },
    Death {
        entity: EntityId,
        at: Point,
        gibs: Gibs,
    },
    Sound { sound: Sound, at: Point },
}

pub trait Presentation {
    fn request(&mut self, event: PresentationEvent);
}

/// Discards every request.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresentation;

impl Presentation for NullPresentation {
    fn request(&mut self, _event: PresentationEvent) {}
}

/// Keeps every request in order; used by tests and the headless arena.
#[derive(Clone, Debug, Default)]
pub struct RecordingPresentation {
    pub events: Vec<PresentationEvent>,
}

impl RecordingPresentation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deaths(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.events.iter().filter_map(|event| match event {
            PresentationEvent::Death { entity, .. } => Some(*entity),
            _ => None,
        })
    }

    pub fn labels_for(&self, id: EntityId) -> impl Iterator<Item = &str> + '_ {
        self.events.iter().filter_map(move |event| match event {
            PresentationEvent::Label { entity, text } if *entity == id => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Presentation for RecordingPresentation {
    fn request(&mut self, event: PresentationEvent) {
        self.events.push(event);
    }
}
