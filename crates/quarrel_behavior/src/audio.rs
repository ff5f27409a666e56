//! The audio collaborator interface

use glam::Vec2;
use quarrel_core::Entity;

/// What behaviors may ask of the host audio system
pub trait AudioBackend {
    /// Attach an emitter to `entity` unless it already has one
    fn ensure_emitter(&mut self, entity: Entity);

    /// Play `clip` from `entity`'s emitter. Returns false without an emitter.
    fn set_clip(&mut self, entity: Entity, clip: &str) -> bool;

    /// Move the listener
    fn update_listener(&mut self, position: Vec2, rotation: f32);
}

/// Play `clip` from `entity`, attaching an emitter first if needed
pub fn play_clip(audio: &mut dyn AudioBackend, entity: Entity, clip: &str) {
    audio.ensure_emitter(entity);
    if !audio.set_clip(entity, clip) {
        log::warn!("play_clip: Couldn't play '{}' on {}", clip, entity);
    }
}
