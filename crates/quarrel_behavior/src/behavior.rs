//! The behavior contract every per-entity logic object implements

use crate::context::BehaviorContext;
use crate::input::InputState;
use crate::kind::BehaviorKind;
use quarrel_anim::AnimationLibrary;
use quarrel_combat::BoltPayload;
use quarrel_core::Entity;
use quarrel_physics::{FixtureHandle, FixtureInfo};
use std::any::Any;
use std::fmt;

/// What the host does with a behavior once a call returns
pub enum BehaviorCommand {
    /// Keep this behavior
    Continue,
    /// Detach this behavior; the entity stays
    RemoveSelf,
    /// Detach this behavior and attach another to the same entity
    ReplaceWith(Box<dyn Behavior>),
    /// Destroy the whole entity
    DestroyEntity,
}

impl BehaviorCommand {
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }
}

impl fmt::Debug for BehaviorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Continue => write!(f, "Continue"),
            Self::RemoveSelf => write!(f, "RemoveSelf"),
            Self::ReplaceWith(next) => write!(f, "ReplaceWith({})", next.kind()),
            Self::DestroyEntity => write!(f, "DestroyEntity"),
        }
    }
}

/// One behavior's view of a contact edge
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Fixture of the entity receiving the call
    pub own: FixtureInfo,
    /// Fixture on the other entity
    pub other: FixtureInfo,
    /// Kind of the other entity's behavior, if it has one
    pub other_kind: Option<BehaviorKind>,
    /// What the other entity does to us if it is a bolt
    pub other_bolt: Option<BoltPayload>,
}

impl Contact {
    pub fn other_entity(&self) -> Entity {
        self.other.entity
    }

    /// Whether the contact involves our fixture `fixture`
    pub fn is_own(&self, fixture: Option<FixtureHandle>) -> bool {
        fixture == Some(self.own.handle)
    }

    pub fn other_is_player_projectile(&self) -> bool {
        self.other_kind.is_some_and(BehaviorKind::is_player_projectile)
    }

    pub fn other_is_enemy_projectile(&self) -> bool {
        self.other_kind.is_some_and(BehaviorKind::is_enemy_projectile)
    }
}

/// Per-entity logic driven by the host.
///
/// Each tick the host delivers contact edges first, then `handle_input`,
/// then `on_step`. Every call returns to the host before anything it asks
/// for (replacement, removal, spawns) takes effect.
pub trait Behavior: Any {
    fn kind(&self) -> BehaviorKind;

    /// Called once per tick before `on_step`
    fn handle_input(&mut self, _input: &InputState, _ctx: &mut BehaviorContext<'_>, _dt: f32) {}

    /// Called once per fixed tick
    fn on_step(&mut self, ctx: &mut BehaviorContext<'_>, dt: f32) -> BehaviorCommand;

    fn on_begin_contact(
        &mut self,
        _contact: &Contact,
        _ctx: &mut BehaviorContext<'_>,
    ) -> BehaviorCommand {
        BehaviorCommand::Continue
    }

    fn on_end_contact(
        &mut self,
        _contact: &Contact,
        _ctx: &mut BehaviorContext<'_>,
    ) -> BehaviorCommand {
        BehaviorCommand::Continue
    }

    /// Payload applied to whatever this behavior's entity hits
    fn bolt_payload(&self) -> Option<BoltPayload> {
        None
    }

    /// Tunable fields as a JSON object
    fn save(&self, _animations: &AnimationLibrary) -> serde_json::Value {
        serde_json::Value::Object(Default::default())
    }

    /// Read tunable fields back. Missing fields keep their defaults.
    fn load(&mut self, _data: &serde_json::Value, _animations: &AnimationLibrary) {}

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn Behavior {
    /// Downcast to a concrete behavior
    pub fn downcast_ref<T: Behavior>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Behavior>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}
