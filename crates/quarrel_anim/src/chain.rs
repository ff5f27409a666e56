//! Animation chains: one primary animation plus queued follow-ons

use crate::animator::{Animator, RepeatPolicy};
use crate::library::AnimationId;
use serde::{Deserialize, Serialize};

/// One step of a chain
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationStep {
    /// Animation to play
    pub animation: AnimationId,
    /// How it repeats before the next step starts
    pub repeat: RepeatPolicy,
}

/// Outcome of [`AnimationChain::apply`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChainReport {
    /// Whether the first step replaced current playback
    pub started: bool,
    /// Follow-on steps successfully queued
    pub queued: usize,
    /// Steps that failed and were skipped
    pub skipped: usize,
}

/// Ordered, non-empty sequence of animation steps
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationChain {
    steps: Vec<AnimationStep>,
}

impl AnimationChain {
    /// Chain starting with `animation`
    pub fn new(animation: AnimationId, repeat: RepeatPolicy) -> Self {
        Self {
            steps: vec![AnimationStep { animation, repeat }],
        }
    }

    /// Append a follow-on step
    pub fn then(mut self, animation: AnimationId, repeat: RepeatPolicy) -> Self {
        self.steps.push(AnimationStep { animation, repeat });
        self
    }

    /// The step applied immediately
    pub fn first(&self) -> AnimationStep {
        self.steps[0]
    }

    /// All steps in order
    pub fn steps(&self) -> &[AnimationStep] {
        &self.steps
    }

    /// Play the first step now and queue the rest.
    ///
    /// An invalid first animation is skipped without a warning (it means "no
    /// binding configured"). Every other failure is logged and skipped; the
    /// remaining steps are still attempted.
    pub fn apply(&self, animator: &mut dyn Animator) -> ChainReport {
        let mut report = ChainReport::default();
        let first = self.first();

        if first.animation.is_valid() {
            match animator.set_animation(first.animation, first.repeat) {
                Ok(()) => report.started = true,
                Err(err) => {
                    log::warn!(
                        "AnimationChain::apply: Couldn't set animation {}: {}",
                        first.animation,
                        err
                    );
                    report.skipped += 1;
                }
            }
        }

        let rest = &self.steps[1..];
        if !rest.is_empty() {
            log::debug!("AnimationChain::apply: Queuing {} animations...", rest.len());
        }

        for step in rest {
            match animator.queue_animation(step.animation, step.repeat) {
                Ok(()) => {
                    log::debug!("AnimationChain::apply: Queued animation {}", step.animation);
                    report.queued += 1;
                }
                Err(err) => {
                    log::warn!(
                        "AnimationChain::apply: Couldn't queue animation {}: {}",
                        step.animation,
                        err
                    );
                    report.skipped += 1;
                }
            }
        }

        report
    }
}
