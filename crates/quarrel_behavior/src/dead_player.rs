//! What is left of the player once it dies: a camera sinking to the floor

use crate::behavior::{Behavior, BehaviorCommand};
use crate::camera::CameraLease;
use crate::context::BehaviorContext;
use crate::kind::BehaviorKind;
use quarrel_core::TimeLerper;
use std::any::Any;

pub struct DeadPlayer {
    camera: CameraLease,
    height: TimeLerper<f32>,
}

impl DeadPlayer {
    /// Take over the player's camera, lowering it to the ground over
    /// `drop_seconds`
    pub fn new(player_camera: &CameraLease, drop_seconds: f32) -> Self {
        let camera = player_camera.hand_over();
        let start = camera.get().height;
        Self {
            camera,
            height: TimeLerper::new(start, 0.0, drop_seconds),
        }
    }

    pub fn camera(&self) -> &CameraLease {
        &self.camera
    }
}

impl Behavior for DeadPlayer {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::DeadPlayer
    }

    fn on_step(&mut self, ctx: &mut BehaviorContext<'_>, dt: f32) -> BehaviorCommand {
        if !self.height.is_finished() {
            self.camera.set_height(self.height.update(dt));
        }

        if let Some(body) = ctx.body() {
            self.camera.follow(body.position, body.angle);
            ctx.audio.update_listener(body.position, body.angle);
        }

        BehaviorCommand::Continue
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
