//! Bound, immutable timeline animation.
//!
//! A [`TimelineAnimation`] is built once from [`TimelineAnimationData`] by
//! resolving every keyed target against a scene. Frames are converted to
//! seconds at bind time; playheads ([`crate::AnimationInstance`]) share the
//! animation through an `Arc`.

use log::debug;

use crate::binding::{PropertyPath, TargetResolver};
use crate::data::{Interpolation, LoopMode, TimelineAnimationData, WorkArea};
use crate::error::AnimationError;
use crate::ids::PropertyId;
use crate::interp::functions::lerp_f32;
use crate::sampling::sample_keyframes;
use crate::scene::Scene;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct KeyFrame {
    pub seconds: f32,
    pub value: f32,
    pub interpolation: Interpolation,
}

#[derive(Clone, Debug, PartialEq)]
pub struct KeyedProperty {
    pub target: PropertyId,
    pub keyframes: Vec<KeyFrame>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimelineAnimation {
    name: String,
    fps: u32,
    duration: u32,
    speed: f32,
    loop_mode: LoopMode,
    work_area: Option<WorkArea>,
    keyed: Vec<KeyedProperty>,
}

impl TimelineAnimation {
    /// Validate `data` and resolve its targets through `resolver`.
    pub fn bind(
        data: &TimelineAnimationData,
        resolver: &dyn TargetResolver,
    ) -> Result<Self, AnimationError> {
        data.validate_basic()?;
        let fps = data.fps as f32;
        let mut keyed = Vec::with_capacity(data.keyed.len());
        for kp in &data.keyed {
            let path = PropertyPath::parse(&kp.target)?;
            let target =
                resolver
                    .resolve(&path)
                    .ok_or_else(|| AnimationError::UnresolvedTarget {
                        animation: data.name.clone(),
                        path: kp.target.clone(),
                    })?;
            let keyframes = kp
                .keyframes
                .iter()
                .map(|k| KeyFrame {
                    seconds: k.frame as f32 / fps,
                    value: k.value,
                    interpolation: k.interpolation,
                })
                .collect();
            keyed.push(KeyedProperty { target, keyframes });
        }
        debug!(
            "bound animation '{}' ({} keyed properties)",
            data.name,
            keyed.len()
        );
        Ok(Self {
            name: data.name.clone(),
            fps: data.fps,
            duration: data.duration,
            speed: data.speed,
            loop_mode: data.loop_mode,
            work_area: data.work_area,
            keyed,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Length in frames.
    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    pub fn work_area(&self) -> Option<WorkArea> {
        self.work_area
    }

    pub fn keyed(&self) -> &[KeyedProperty] {
        &self.keyed
    }

    pub fn start_frame(&self) -> u32 {
        self.work_area.map_or(0, |w| w.start)
    }

    pub fn end_frame(&self) -> u32 {
        self.work_area.map_or(self.duration, |w| w.end)
    }

    pub fn start_seconds(&self) -> f32 {
        self.start_frame() as f32 / self.fps as f32
    }

    pub fn end_seconds(&self) -> f32 {
        self.end_frame() as f32 / self.fps as f32
    }

    /// Playable span in seconds (work-area aware).
    pub fn duration_seconds(&self) -> f32 {
        self.end_seconds() - self.start_seconds()
    }

    /// Sample one keyed property at `seconds` without touching a scene.
    pub fn sample(&self, target: PropertyId, seconds: f32) -> Option<f32> {
        self.keyed
            .iter()
            .find(|k| k.target == target)
            .and_then(|k| sample_keyframes(&k.keyframes, seconds))
    }

    /// Write every keyed property at `time` into `scene`, blended by `mix`.
    /// `mix >= 1` overwrites; `mix <= 0` leaves the scene untouched.
    pub fn apply(&self, time: f32, scene: &mut dyn Scene, mix: f32) {
        if mix <= 0.0 {
            return;
        }
        let time = time.clamp(self.start_seconds(), self.end_seconds());
        for kp in &self.keyed {
            let Some(sampled) = sample_keyframes(&kp.keyframes, time) else {
                continue;
            };
            let value = if mix >= 1.0 {
                sampled
            } else {
                match scene.property(kp.target) {
                    Some(current) => lerp_f32(current, sampled, mix),
                    None => sampled,
                }
            };
            scene.set_property(kp.target, value);
        }
    }
}
