//! The scene: entity arena, behavior slots and the fixed-step loop

use crate::audio::RecordingAudio;
use crate::config::{AnimationAsset, SceneConfig};
use crate::error::{Result, SceneError};
use crate::physics::SimplePhysics;
use glam::Vec2;
use quarrel_anim::{AnimationId, AnimationLibrary, AnimationSourceInfo, Animator, QueuedAnimator, RepeatPolicy};
use quarrel_behavior::{
    load_document, save_document, AudioBackend, Behavior, BehaviorCommand, BehaviorContext,
    BehaviorKind, CameraRegistry, Contact, Enemy, EnemyAnimations, EnemyMelee, InputState,
    KindRegistry, Player, ProjectileDesc, RenderBinding,
};
use quarrel_combat::Colour;
use quarrel_core::{Entity, EntityAllocator};
use quarrel_physics::{BodyState, ContactPhase, ContactSide, FixtureCategories, FixtureDesc, PhysicsBackend};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// A behavior bound to its entity
struct Slot {
    entity: Entity,
    /// `None` while the behavior is being called, or once it removed itself
    behavior: Option<Box<dyn Behavior>>,
}

/// In-memory host for behaviors.
///
/// Each [`tick`](Self::tick) runs, in order: physics integration, contact
/// delivery (both sides of every edge), deferred entity destruction, input,
/// one step per behavior in attachment order, spawn requests, animators.
pub struct Scene {
    config: SceneConfig,
    entities: EntityAllocator,
    physics: SimplePhysics,
    animations: Arc<AnimationLibrary>,
    enemy_animations: EnemyAnimations,
    animators: HashMap<Entity, QueuedAnimator>,
    renders: HashMap<Entity, RenderBinding>,
    audio: RecordingAudio,
    cameras: CameraRegistry,
    kinds: KindRegistry,
    slots: Vec<Slot>,
    spawns: Vec<ProjectileDesc>,
    /// Entities destroyed once the current phase ends
    doomed: Vec<Entity>,
    time: f32,
}

fn register(library: &mut AnimationLibrary, asset: &AnimationAsset) -> AnimationId {
    library.register(AnimationSourceInfo::new(asset.name.as_str(), asset.file.as_str()), asset.duration)
}

impl Scene {
    pub fn new(config: SceneConfig) -> Self {
        let mut library = AnimationLibrary::new();
        let sprites = &config.enemy_sprites;
        let enemy_animations = EnemyAnimations {
            run: register(&mut library, &sprites.run),
            shoot: register(&mut library, &sprites.shoot),
            stand: register(&mut library, &sprites.stand),
            die: register(&mut library, &sprites.die),
            awake: register(&mut library, &sprites.awake),
        };
        log::info!("Scene::new: Registered {} animations", library.len());

        Self {
            config,
            entities: EntityAllocator::new(),
            physics: SimplePhysics::new(),
            animations: Arc::new(library),
            enemy_animations,
            animators: HashMap::new(),
            renders: HashMap::new(),
            audio: RecordingAudio::new(),
            cameras: CameraRegistry::new(),
            kinds: KindRegistry::new(),
            slots: Vec::new(),
            spawns: Vec::new(),
            doomed: Vec::new(),
            time: 0.0,
        }
    }

    // ----- Spawning -----

    /// Spawn a player at `position`
    pub fn spawn_player(&mut self, position: Vec2) -> Entity {
        let entity = self.spawn_body(
            BodyState::dynamic(position),
            FixtureDesc::circle(self.config.physics.default_body_radius),
            RenderBinding::default(),
        );
        let config = self.config.behavior.clone();
        if let Some(player) = self.call(entity, |ctx| Player::new(ctx, &config)) {
            self.attach(entity, Box::new(player));
        }
        entity
    }

    /// Spawn a ranged enemy standing at `position`
    pub fn spawn_enemy(&mut self, position: Vec2) -> Entity {
        let entity = self.spawn_body(
            BodyState::dynamic(position),
            FixtureDesc::circle(self.config.physics.default_body_radius),
            RenderBinding::default(),
        );
        let config = self.config.behavior.enemy.clone();
        let animations = self.enemy_animations;
        if let Some(enemy) = self.call(entity, |ctx| {
            if let Err(err) = ctx.animator.set_animation(animations.stand, RepeatPolicy::Forever) {
                log::warn!("Scene::spawn_enemy: {}", err);
            }
            Enemy::new(ctx, &config).with_animations(animations)
        }) {
            self.attach(entity, Box::new(enemy));
        }
        entity
    }

    /// Spawn a melee enemy at `position`
    pub fn spawn_enemy_melee(&mut self, position: Vec2) -> Entity {
        let entity = self.spawn_body(
            BodyState::dynamic(position),
            FixtureDesc::circle(self.config.physics.default_body_radius),
            RenderBinding::default(),
        );
        let config = self.config.behavior.clone();
        if let Some(melee) = self.call(entity, |ctx| EnemyMelee::new(ctx, &config)) {
            self.attach(entity, Box::new(melee));
        }
        entity
    }

    /// Static solid geometry; blocks line of sight
    pub fn spawn_wall(&mut self, position: Vec2, radius: f32) -> Entity {
        self.spawn_body(
            BodyState::fixed(position),
            FixtureDesc::circle(radius),
            RenderBinding::default(),
        )
    }

    /// Burning patch of ground
    pub fn spawn_fire(&mut self, position: Vec2, radius: f32) -> Entity {
        self.spawn_body(
            BodyState::fixed(position),
            FixtureDesc::sensor(radius).with_categories(FixtureCategories::FIRE),
            RenderBinding {
                colour: Colour::ORANGE,
                ..Default::default()
            },
        )
    }

    /// Create a projectile with its behavior
    pub fn spawn_projectile(&mut self, desc: ProjectileDesc) -> Entity {
        let entity = self.spawn_body(desc.body(), desc.fixture(), desc.render());
        self.attach(entity, desc.behavior());
        entity
    }

    /// Spawn a body driven by a caller-supplied behavior
    pub fn spawn_behavior(&mut self, body: BodyState, fixture: FixtureDesc, behavior: Box<dyn Behavior>) -> Entity {
        let entity = self.spawn_body(body, fixture, RenderBinding::default());
        self.attach(entity, behavior);
        entity
    }

    /// Destroy an entity with its body, fixtures, behavior and bindings.
    ///
    /// Returns false if it was already gone.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        if !self.entities.deallocate(entity) {
            return false;
        }
        log::debug!("Scene::destroy_entity: {}", entity);
        self.physics.remove_body(entity);
        self.animators.remove(&entity);
        self.renders.remove(&entity);
        self.audio.remove_emitter(entity);
        self.slots.retain(|slot| slot.entity != entity);
        true
    }

    fn spawn_body(&mut self, body: BodyState, fixture: FixtureDesc, render: RenderBinding) -> Entity {
        let entity = self.entities.allocate();
        self.physics.create_body(entity, body, fixture);
        self.animators
            .insert(entity, QueuedAnimator::new(Arc::clone(&self.animations)));
        self.renders.insert(entity, render);
        entity
    }

    fn attach(&mut self, entity: Entity, behavior: Box<dyn Behavior>) {
        log::debug!("Scene::attach: {} on {}", behavior.kind(), entity);
        match self.slots.iter_mut().find(|slot| slot.entity == entity) {
            Some(slot) => slot.behavior = Some(behavior),
            None => self.slots.push(Slot {
                entity,
                behavior: Some(behavior),
            }),
        }
    }

    // ----- Stepping -----

    /// Advance the scene by one fixed step
    pub fn tick(&mut self, input: &InputState, dt: f32) {
        self.physics.step(dt);
        self.deliver_contacts();
        self.destroy_doomed();

        self.handle_input(input, dt);
        self.step_behaviors(dt);
        self.destroy_doomed();
        self.slots.retain(|slot| slot.behavior.is_some());

        for desc in std::mem::take(&mut self.spawns) {
            self.spawn_projectile(desc);
        }

        for animator in self.animators.values_mut() {
            animator.advance(dt);
        }
        self.time += dt;
    }

    /// Run `f` with a context lent from this scene's collaborators
    fn call<R>(&mut self, entity: Entity, f: impl FnOnce(&mut BehaviorContext<'_>) -> R) -> Option<R> {
        let (Some(animator), Some(render)) = (self.animators.get_mut(&entity), self.renders.get_mut(&entity)) else {
            log::warn!("Scene::call: {} has no animator or render binding", entity);
            return None;
        };

        let mut ctx = BehaviorContext {
            entity,
            time: self.time,
            gravity: self.config.physics.gravity,
            physics: &mut self.physics,
            animator,
            render,
            audio: &mut self.audio,
            entities: &self.entities,
            cameras: &self.cameras,
            spawns: &mut self.spawns,
        };
        Some(f(&mut ctx))
    }

    /// Put a called behavior back according to its command
    fn settle(&mut self, index: usize, behavior: Box<dyn Behavior>, command: BehaviorCommand) {
        let entity = self.slots[index].entity;
        match command {
            BehaviorCommand::Continue => self.slots[index].behavior = Some(behavior),
            BehaviorCommand::RemoveSelf => {
                log::debug!("Scene::settle: {} removed from {}", behavior.kind(), entity);
            }
            BehaviorCommand::ReplaceWith(next) => {
                log::debug!("Scene::settle: {} replaced by {} on {}", behavior.kind(), next.kind(), entity);
                drop(behavior);
                self.slots[index].behavior = Some(next);
            }
            BehaviorCommand::DestroyEntity => {
                // Kept until the phase ends so peers can still see its kind
                self.slots[index].behavior = Some(behavior);
                if !self.doomed.contains(&entity) {
                    self.doomed.push(entity);
                }
            }
        }
    }

    fn deliver_contacts(&mut self) {
        for event in self.physics.contacts().drain() {
            for side in event.sides() {
                self.deliver_contact(event.phase, side);
            }
        }
    }

    fn deliver_contact(&mut self, phase: ContactPhase, side: ContactSide) {
        let entity = side.own.entity;
        if !self.entities.is_alive(entity) {
            return;
        }
        let Some(index) = self.slot_index(entity) else {
            return;
        };

        let other = self.behavior(side.other.entity);
        let contact = Contact {
            own: side.own,
            other: side.other,
            other_kind: other.map(|b| b.kind()),
            other_bolt: other.and_then(|b| b.bolt_payload()),
        };

        let Some(mut behavior) = self.slots[index].behavior.take() else {
            return;
        };
        let command = self
            .call(entity, |ctx| match phase {
                ContactPhase::Begin => behavior.on_begin_contact(&contact, ctx),
                ContactPhase::End => behavior.on_end_contact(&contact, ctx),
            })
            .unwrap_or(BehaviorCommand::Continue);
        self.settle(index, behavior, command);
    }

    fn handle_input(&mut self, input: &InputState, dt: f32) {
        for index in 0..self.slots.len() {
            let entity = self.slots[index].entity;
            let Some(mut behavior) = self.slots[index].behavior.take() else {
                continue;
            };
            self.call(entity, |ctx| behavior.handle_input(input, ctx, dt));
            self.slots[index].behavior = Some(behavior);
        }
    }

    fn step_behaviors(&mut self, dt: f32) {
        for index in 0..self.slots.len() {
            let entity = self.slots[index].entity;
            if self.doomed.contains(&entity) {
                continue;
            }
            let Some(mut behavior) = self.slots[index].behavior.take() else {
                continue;
            };
            let command = self
                .call(entity, |ctx| behavior.on_step(ctx, dt))
                .unwrap_or(BehaviorCommand::Continue);
            self.settle(index, behavior, command);
        }
    }

    fn destroy_doomed(&mut self) {
        for entity in std::mem::take(&mut self.doomed) {
            self.destroy_entity(entity);
        }
    }

    fn slot_index(&self, entity: Entity) -> Option<usize> {
        self.slots.iter().position(|slot| slot.entity == entity)
    }

    // ----- Queries -----

    /// Scene time in seconds
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.alive_count()
    }

    /// Entities of a given behavior kind, in attachment order
    pub fn entities_of(&self, kind: BehaviorKind) -> Vec<Entity> {
        self.slots
            .iter()
            .filter(|slot| slot.behavior.as_ref().is_some_and(|b| b.kind() == kind))
            .map(|slot| slot.entity)
            .collect()
    }

    pub fn behavior(&self, entity: Entity) -> Option<&(dyn Behavior + 'static)> {
        self.slots
            .iter()
            .find(|slot| slot.entity == entity)
            .and_then(|slot| slot.behavior.as_deref())
    }

    pub fn behavior_mut(&mut self, entity: Entity) -> Option<&mut (dyn Behavior + 'static)> {
        self.slots
            .iter_mut()
            .find(|slot| slot.entity == entity)
            .and_then(|slot| slot.behavior.as_deref_mut())
    }

    /// Concrete behavior of `entity`, if it is a `T`
    pub fn behavior_as<T: Behavior>(&self, entity: Entity) -> Option<&T> {
        self.behavior(entity)?.downcast_ref::<T>()
    }

    pub fn behavior_as_mut<T: Behavior>(&mut self, entity: Entity) -> Option<&mut T> {
        self.behavior_mut(entity)?.downcast_mut::<T>()
    }

    pub fn behavior_kind(&self, entity: Entity) -> Option<BehaviorKind> {
        self.behavior(entity).map(|b| b.kind())
    }

    pub fn body(&self, entity: Entity) -> Option<BodyState> {
        self.physics.body(entity)
    }

    /// Number of fixtures on an entity's body
    pub fn fixture_count(&self, entity: Entity) -> usize {
        self.physics.fixtures_of(entity).count()
    }

    pub fn animator(&self, entity: Entity) -> Option<&QueuedAnimator> {
        self.animators.get(&entity)
    }

    pub fn render(&self, entity: Entity) -> Option<&RenderBinding> {
        self.renders.get(&entity)
    }

    pub fn cameras(&self) -> &CameraRegistry {
        &self.cameras
    }

    pub fn audio(&self) -> &RecordingAudio {
        &self.audio
    }

    pub fn physics(&self) -> &SimplePhysics {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut SimplePhysics {
        &mut self.physics
    }

    pub fn animations(&self) -> &AnimationLibrary {
        &self.animations
    }

    pub fn enemy_animations(&self) -> EnemyAnimations {
        self.enemy_animations
    }

    pub fn kinds(&self) -> &KindRegistry {
        &self.kinds
    }

    pub fn kinds_mut(&mut self) -> &mut KindRegistry {
        &mut self.kinds
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Move the audio listener, e.g. for a scripted camera
    pub fn set_listener(&mut self, position: Vec2, rotation: f32) {
        self.audio.update_listener(position, rotation);
    }

    // ----- Persistence -----

    /// Versioned document of an entity's behavior
    pub fn save_behavior(&self, entity: Entity) -> Result<Value> {
        if !self.is_alive(entity) {
            return Err(SceneError::EntityNotFound(entity));
        }
        let behavior = self.behavior(entity).ok_or(SceneError::NoBehavior(entity))?;
        Ok(save_document(behavior, &self.kinds, &self.animations)?)
    }

    /// Load a document into an entity's behavior
    pub fn load_behavior(&mut self, entity: Entity, doc: &Value) -> Result<()> {
        if !self.entities.is_alive(entity) {
            return Err(SceneError::EntityNotFound(entity));
        }
        let behavior = self
            .slots
            .iter_mut()
            .find(|slot| slot.entity == entity)
            .and_then(|slot| slot.behavior.as_deref_mut())
            .ok_or(SceneError::NoBehavior(entity))?;
        load_document(behavior, doc, &self.kinds, &self.animations)?;
        Ok(())
    }
}
