//! Audio backend that records what it was asked to play

use glam::Vec2;
use quarrel_behavior::AudioBackend;
use quarrel_core::Entity;
use std::collections::HashSet;

/// A clip started on an emitter
#[derive(Debug, Clone, PartialEq)]
pub struct PlayedClip {
    pub entity: Entity,
    pub clip: String,
}

/// Silent audio: emitters, played clips and the listener are only recorded
#[derive(Debug, Default)]
pub struct RecordingAudio {
    emitters: HashSet<Entity>,
    played: Vec<PlayedClip>,
    listener: Option<(Vec2, f32)>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_emitter(&self, entity: Entity) -> bool {
        self.emitters.contains(&entity)
    }

    /// Every clip played so far, oldest first
    pub fn played(&self) -> &[PlayedClip] {
        &self.played
    }

    /// Last listener position and rotation
    pub fn listener(&self) -> Option<(Vec2, f32)> {
        self.listener
    }

    /// Drop the emitter of a destroyed entity
    pub fn remove_emitter(&mut self, entity: Entity) {
        self.emitters.remove(&entity);
    }
}

impl AudioBackend for RecordingAudio {
    fn ensure_emitter(&mut self, entity: Entity) {
        if self.emitters.insert(entity) {
            log::trace!("RecordingAudio::ensure_emitter: Added emitter to {}", entity);
        }
    }

    fn set_clip(&mut self, entity: Entity, clip: &str) -> bool {
        if !self.emitters.contains(&entity) {
            return false;
        }
        self.played.push(PlayedClip {
            entity,
            clip: clip.to_string(),
        });
        true
    }

    fn update_listener(&mut self, position: Vec2, rotation: f32) {
        self.listener = Some((position, rotation));
    }
}
