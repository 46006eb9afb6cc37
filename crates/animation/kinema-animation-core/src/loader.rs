//! JSON entry points for timeline animation data.
//!
//! The document shape is [`TimelineAnimationData`] in camelCase:
//! `{ "name", "fps"?, "duration", "speed"?, "loop"?, "workArea"?, "keyed": [...] }`.
//! The integer loop codes used by the engine (0/1/2) are accepted in place of
//! the loop-mode names.

use crate::binding::TargetResolver;
use crate::data::TimelineAnimationData;
use crate::error::AnimationError;
use crate::timeline::TimelineAnimation;

/// Parse and validate one animation document.
pub fn parse_timeline_json(s: &str) -> Result<TimelineAnimationData, AnimationError> {
    let data: TimelineAnimationData = serde_json::from_str(s)?;
    data.validate_basic()?;
    Ok(data)
}

/// Parse, validate and bind in one step.
pub fn load_timeline_json(
    s: &str,
    resolver: &dyn TargetResolver,
) -> Result<TimelineAnimation, AnimationError> {
    let data = parse_timeline_json(s)?;
    TimelineAnimation::bind(&data, resolver)
}
