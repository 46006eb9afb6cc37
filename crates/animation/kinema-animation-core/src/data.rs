//! Serializable timeline animation data.
//!
//! This is the definition format handed over by a loader. Targets are still
//! string paths here; [`crate::TimelineAnimation::bind`] resolves them against
//! a scene and produces the immutable runtime animation.

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::AnimationError;

fn default_fps() -> u32 {
    60
}

fn default_speed() -> f32 {
    1.0
}

/// Playback policy once the playhead reaches a boundary.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum LoopMode {
    /// Play once and hold the last frame.
    #[default]
    OneShot,
    /// Wrap back to the start.
    Loop,
    /// Reverse direction at each end.
    PingPong,
}

impl LoopMode {
    /// Integer code used by the engine's file format (0 one-shot, 1 loop, 2 ping-pong).
    pub fn code(self) -> u32 {
        match self {
            LoopMode::OneShot => 0,
            LoopMode::Loop => 1,
            LoopMode::PingPong => 2,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(LoopMode::OneShot),
            1 => Some(LoopMode::Loop),
            2 => Some(LoopMode::PingPong),
            _ => None,
        }
    }
}

/// `"loop"` accepts a name (`"pingPong"`) or an engine code (`2`).
#[derive(Deserialize)]
#[serde(untagged)]
enum LoopRepr {
    Code(u32),
    Mode(LoopMode),
}

fn loop_mode_or_code<'de, D>(deserializer: D) -> Result<LoopMode, D::Error>
where
    D: Deserializer<'de>,
{
    match LoopRepr::deserialize(deserializer)? {
        LoopRepr::Mode(mode) => Ok(mode),
        LoopRepr::Code(code) => LoopMode::from_code(code)
            .ok_or_else(|| de::Error::custom(format!("unknown loop code {code}"))),
    }
}

/// Restricted frame range used instead of `[0, duration]` when present.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkArea {
    pub start: u32,
    pub end: u32,
}

/// How a keyframe interpolates towards the next one.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Interpolation {
    /// Keep this keyframe's value until the next key (step).
    Hold,
    #[default]
    Linear,
    /// Cubic-bezier timing with control points in the normalized 0..1 domain.
    Cubic { x1: f32, y1: f32, x2: f32, y2: f32 },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct KeyFrameData {
    pub frame: u32,
    pub value: f32,
    #[serde(default)]
    pub interpolation: Interpolation,
}

/// Keyframes for one scene property, addressed by path (`"arm.rotation"`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct KeyedPropertyData {
    pub target: String,
    pub keyframes: Vec<KeyFrameData>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimelineAnimationData {
    pub name: String,
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Length in frames.
    pub duration: u32,
    #[serde(default = "default_speed")]
    pub speed: f32,
    #[serde(default, rename = "loop", deserialize_with = "loop_mode_or_code")]
    pub loop_mode: LoopMode,
    #[serde(default)]
    pub work_area: Option<WorkArea>,
    #[serde(default)]
    pub keyed: Vec<KeyedPropertyData>,
}

impl TimelineAnimationData {
    /// Validate basic invariants (fps, speed, work area, keyframe ordering and range).
    pub fn validate_basic(&self) -> Result<(), AnimationError> {
        if self.fps == 0 {
            return Err(AnimationError::ZeroFps {
                name: self.name.clone(),
            });
        }
        if !self.speed.is_finite() {
            return Err(AnimationError::InvalidSpeed {
                name: self.name.clone(),
                speed: self.speed,
            });
        }
        if let Some(area) = self.work_area {
            if area.start >= area.end || area.end > self.duration {
                return Err(AnimationError::InvalidWorkArea {
                    name: self.name.clone(),
                    start: area.start,
                    end: area.end,
                    duration: self.duration,
                });
            }
        }
        for keyed in &self.keyed {
            let mut last = 0u32;
            for key in &keyed.keyframes {
                if key.frame > self.duration {
                    return Err(AnimationError::KeyframeOutOfRange {
                        name: self.name.clone(),
                        target: keyed.target.clone(),
                        frame: key.frame,
                        duration: self.duration,
                    });
                }
                if key.frame < last {
                    return Err(AnimationError::KeyframeOutOfOrder {
                        name: self.name.clone(),
                        target: keyed.target.clone(),
                        frame: key.frame,
                    });
                }
                if !key.value.is_finite() {
                    return Err(AnimationError::NonFiniteValue {
                        name: self.name.clone(),
                        target: keyed.target.clone(),
                    });
                }
                last = key.frame;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anim() -> TimelineAnimationData {
        TimelineAnimationData {
            name: "idle".into(),
            fps: 30,
            duration: 60,
            speed: 1.0,
            loop_mode: LoopMode::Loop,
            work_area: None,
            keyed: vec![KeyedPropertyData {
                target: "root.x".into(),
                keyframes: vec![
                    KeyFrameData {
                        frame: 0,
                        value: 0.0,
                        interpolation: Interpolation::Linear,
                    },
                    KeyFrameData {
                        frame: 60,
                        value: 10.0,
                        interpolation: Interpolation::Linear,
                    },
                ],
            }],
        }
    }

    #[test]
    fn loop_codes_match_engine_values() {
        for mode in [LoopMode::OneShot, LoopMode::Loop, LoopMode::PingPong] {
            assert_eq!(LoopMode::from_code(mode.code()), Some(mode));
        }
        assert_eq!(LoopMode::from_code(7), None);
    }

    #[test]
    fn validate_rejects_bad_work_area_and_key_order() {
        assert!(anim().validate_basic().is_ok());

        let mut a = anim();
        a.work_area = Some(WorkArea { start: 40, end: 20 });
        assert!(matches!(
            a.validate_basic(),
            Err(AnimationError::InvalidWorkArea { .. })
        ));

        let mut a = anim();
        a.keyed[0].keyframes.swap(0, 1);
        assert!(matches!(
            a.validate_basic(),
            Err(AnimationError::KeyframeOutOfOrder { frame: 0, .. })
        ));

        let mut a = anim();
        a.fps = 0;
        assert!(matches!(a.validate_basic(), Err(AnimationError::ZeroFps { .. })));
    }

    #[test]
    fn serde_defaults_fill_optional_fields() {
        let a: TimelineAnimationData =
            serde_json::from_str(r#"{ "name": "blink", "duration": 12 }"#).unwrap();
        assert_eq!(a.fps, 60);
        assert_eq!(a.speed, 1.0);
        assert_eq!(a.loop_mode, LoopMode::OneShot);
        assert!(a.keyed.is_empty());

        let k: KeyFrameData = serde_json::from_str(
            r#"{ "frame": 3, "value": 1.5, "interpolation": { "type": "cubic", "x1": 0.4, "y1": 0.0, "x2": 0.6, "y2": 1.0 } }"#,
        )
        .unwrap();
        assert!(matches!(k.interpolation, Interpolation::Cubic { .. }));
    }

    #[test]
    fn loop_accepts_codes_and_names() {
        let parse = |lp: &str| {
            serde_json::from_str::<TimelineAnimationData>(&format!(
                r#"{{ "name": "a", "duration": 10, "loop": {lp} }}"#
            ))
            .map(|a| a.loop_mode)
        };
        assert_eq!(parse("1").unwrap(), LoopMode::Loop);
        assert_eq!(parse(r#""pingPong""#).unwrap(), LoopMode::PingPong);
        assert!(parse("3").unwrap_err().to_string().contains("unknown loop code 3"));
        assert!(parse(r#""bounce""#).is_err());
    }
}
