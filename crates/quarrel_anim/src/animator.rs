//! The animator collaborator interface and a queued reference animator

use crate::error::{AnimationError, Result};
use crate::library::{AnimationId, AnimationLibrary};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;

/// How many times an animation plays before yielding to the next one
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatPolicy {
    /// Play once
    #[default]
    Never,
    /// Play once, then repeat this many more times
    Times(u32),
    /// Loop until replaced
    Forever,
}

/// Per-entity animation playback, as exposed by the host renderer
pub trait Animator {
    /// Replace current playback (and anything queued)
    fn set_animation(&mut self, animation: AnimationId, repeat: RepeatPolicy) -> Result<()>;

    /// Play `animation` once everything before it has finished
    fn queue_animation(&mut self, animation: AnimationId, repeat: RepeatPolicy) -> Result<()>;

    /// Animation currently showing, if any
    fn current_animation(&self) -> Option<AnimationId>;
}

#[derive(Debug, Clone, Copy)]
struct Playing {
    animation: AnimationId,
    repeat: RepeatPolicy,
    repeats_done: u32,
    time: f32,
    finished: bool,
}

impl Playing {
    fn new(animation: AnimationId, repeat: RepeatPolicy) -> Self {
        Self {
            animation,
            repeat,
            repeats_done: 0,
            time: 0.0,
            finished: false,
        }
    }

    /// Whether another loop follows the one that just completed
    fn loops_again(&self) -> bool {
        match self.repeat {
            RepeatPolicy::Never => false,
            RepeatPolicy::Times(n) => self.repeats_done < n,
            RepeatPolicy::Forever => true,
        }
    }
}

/// Animator with a bounded follow-on queue, driven by [`advance`](Self::advance).
///
/// A finished, non-repeating animation with nothing queued keeps showing
/// its last frame, so [`current_animation`](Animator::current_animation)
/// still reports it.
#[derive(Debug, Clone)]
pub struct QueuedAnimator {
    library: Arc<AnimationLibrary>,
    current: Option<Playing>,
    queue: VecDeque<(AnimationId, RepeatPolicy)>,
    capacity: usize,
}

impl QueuedAnimator {
    /// Default number of queued follow-ons
    pub const DEFAULT_CAPACITY: usize = 4;

    /// Create an idle animator over `library`
    pub fn new(library: Arc<AnimationLibrary>) -> Self {
        Self::with_capacity(library, Self::DEFAULT_CAPACITY)
    }

    /// Create with a custom queue capacity
    pub fn with_capacity(library: Arc<AnimationLibrary>, capacity: usize) -> Self {
        Self {
            library,
            current: None,
            queue: VecDeque::new(),
            capacity,
        }
    }

    fn validate(&self, animation: AnimationId) -> Result<()> {
        if !animation.is_valid() {
            return Err(AnimationError::InvalidId);
        }
        if !self.library.contains(animation) {
            return Err(AnimationError::Unknown(animation));
        }
        Ok(())
    }

    /// Repeat policy of the current animation
    pub fn current_repeat(&self) -> Option<RepeatPolicy> {
        self.current.map(|p| p.repeat)
    }

    /// Whether the current animation has stopped on its last frame
    pub fn is_finished(&self) -> bool {
        self.current.map(|p| p.finished).unwrap_or(true)
    }

    /// Number of queued follow-ons
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Advance playback by `dt` seconds, starting queued animations as
    /// their predecessors finish
    pub fn advance(&mut self, dt: f32) {
        let Some(mut playing) = self.current else {
            return;
        };
        if playing.finished {
            return;
        }

        playing.time += dt;
        loop {
            let duration = self.library.duration(playing.animation).unwrap_or(0.0);
            if playing.time < duration {
                break;
            }

            if playing.loops_again() {
                if duration <= 0.0 {
                    break;
                }
                playing.time -= duration;
                playing.repeats_done += 1;
                continue;
            }

            match self.queue.pop_front() {
                Some((next, repeat)) => {
                    log::trace!("QueuedAnimator::advance: {} -> {}", playing.animation, next);
                    let leftover = playing.time - duration;
                    playing = Playing::new(next, repeat);
                    playing.time = leftover;
                }
                None => {
                    playing.time = duration;
                    playing.finished = true;
                    break;
                }
            }
        }
        self.current = Some(playing);
    }
}

impl Animator for QueuedAnimator {
    fn set_animation(&mut self, animation: AnimationId, repeat: RepeatPolicy) -> Result<()> {
        self.validate(animation)?;
        self.queue.clear();
        self.current = Some(Playing::new(animation, repeat));
        Ok(())
    }

    fn queue_animation(&mut self, animation: AnimationId, repeat: RepeatPolicy) -> Result<()> {
        self.validate(animation)?;
        if self.queue.len() >= self.capacity {
            return Err(AnimationError::QueueFull(self.capacity));
        }
        self.queue.push_back((animation, repeat));
        Ok(())
    }

    fn current_animation(&self) -> Option<AnimationId> {
        self.current.map(|p| p.animation)
    }
}
