//! Playhead over a shared [`TimelineAnimation`].
//!
//! Time math (all in seconds, relative to the animation's frame range which is
//! the work area when one is set):
//! - one-shot clamps at the boundary it runs into and reports finished;
//! - loop wraps into `[start, end)`; a reversed loop starts at `end` and
//!   leaves it on its first non-zero step without counting a wrap;
//! - ping-pong reflects at both ends, any number of times per step.

use std::sync::Arc;

use crate::data::LoopMode;
use crate::scene::Scene;
use crate::timeline::TimelineAnimation;

/// Floored modulo: result has the sign of `b`.
fn fmod(a: f32, b: f32) -> f32 {
    if b == 0.0 {
        return 0.0;
    }
    let m = a % b;
    if (m < 0.0 && b > 0.0) || (m > 0.0 && b < 0.0) {
        m + b
    } else {
        m
    }
}

/// Reflect `t` into `[0, span]`; one full period is `2 * span`.
fn ping_pong(t: f32, span: f32) -> f32 {
    if span <= 0.0 {
        return 0.0;
    }
    let period = 2.0 * span;
    let m = fmod(t, period);
    if m <= span {
        m
    } else {
        period - m
    }
}

#[derive(Clone, Debug)]
pub struct AnimationInstance {
    animation: Arc<TimelineAnimation>,
    time: f32,
    /// +1 or -1; flipped by ping-pong reflections.
    direction: f32,
    did_loop: bool,
    finished: bool,
    elapsed: f32,
    total_time: f32,
}

impl AnimationInstance {
    pub fn new(animation: Arc<TimelineAnimation>) -> Self {
        let time = Self::initial_time(&animation);
        Self {
            animation,
            time,
            direction: 1.0,
            did_loop: false,
            finished: false,
            elapsed: 0.0,
            total_time: 0.0,
        }
    }

    fn initial_time(animation: &TimelineAnimation) -> f32 {
        if animation.speed() < 0.0 {
            animation.end_seconds()
        } else {
            animation.start_seconds()
        }
    }

    pub fn animation(&self) -> &Arc<TimelineAnimation> {
        &self.animation
    }

    /// Playhead in seconds.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Move the playhead, clamped into the playable range. Direction is kept.
    pub fn set_time(&mut self, seconds: f32) {
        let (start, end) = self.range();
        self.time = seconds.clamp(start, end);
        self.finished = false;
    }

    /// Back to the initial playhead with all counters cleared.
    pub fn reset(&mut self) {
        self.time = Self::initial_time(&self.animation);
        self.direction = 1.0;
        self.did_loop = false;
        self.finished = false;
        self.elapsed = 0.0;
        self.total_time = 0.0;
    }

    /// True only when the most recent `advance` wrapped or reversed.
    pub fn did_loop(&self) -> bool {
        self.did_loop
    }

    /// One-shot instances finish once they hit a boundary.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Current playback direction (+1 forward, -1 backward), excluding speed.
    pub fn direction(&self) -> f32 {
        self.direction
    }

    /// Accumulated playhead travel, `Σ |dt · speed|`.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Accumulated unscaled seconds passed to `advance`.
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    fn range(&self) -> (f32, f32) {
        (self.animation.start_seconds(), self.animation.end_seconds())
    }

    /// Advance by `dt` seconds. Returns whether the instance keeps playing.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.did_loop = false;
        let speed = self.animation.speed();
        self.total_time += dt.abs();
        self.elapsed += (dt * speed).abs();

        let delta = dt * speed * self.direction;
        let (start, end) = self.range();
        let span = end - start;
        let mut time = self.time + delta;

        match self.animation.loop_mode() {
            LoopMode::OneShot => {
                if delta > 0.0 && time >= end {
                    time = end;
                    self.finished = true;
                } else if delta < 0.0 && time <= start {
                    time = start;
                    self.finished = true;
                }
            }
            LoopMode::Loop => {
                let phase = time - start;
                if span <= 0.0 {
                    time = start;
                } else if delta != 0.0 && !(0.0..span).contains(&phase) {
                    time = start + fmod(phase, span);
                    // A tiny step below start can round up to `end`.
                    if time >= end {
                        time = start;
                    }
                    self.did_loop = true;
                }
            }
            LoopMode::PingPong => {
                let phase = time - start;
                if span <= 0.0 {
                    time = start;
                } else if !(0.0..=span).contains(&phase) || (phase == span && delta > 0.0) {
                    let reflections = (phase / span).floor().abs() as u64;
                    if reflections % 2 == 1 {
                        self.direction = -self.direction;
                    }
                    time = start + ping_pong(phase, span);
                    self.did_loop = true;
                }
            }
        }
        self.time = time;
        !self.finished
    }

    pub fn apply(&self, scene: &mut dyn Scene) {
        self.apply_with_mix(scene, 1.0);
    }

    pub fn apply_with_mix(&self, scene: &mut dyn Scene, mix: f32) {
        self.animation.apply(self.time, scene, mix);
    }
}
