//! Position tracks from keyframed location channels.

use crate::scene::{AnimationData, SceneObject, LOCATION_PATH};
use crate::util::DEFAULT_FRAME_RATE;

use super::trajectory::{Trajectory, TrajectorySample};

/// Distinct keyframe times (in frames), sorted ascending.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyframeSet {
    frames: Vec<f64>,
}

impl KeyframeSet {
    /// Collect key times from every channel of `data_path`.
    ///
    /// Axes are keyed independently, so the union over all channels is taken.
    pub fn from_channels(animation: &AnimationData, data_path: &str) -> Self {
        Self::from_frames(animation.channels(data_path).flat_map(|c| c.key_frames()))
    }

    /// Deduplicate and sort arbitrary frame times.
    pub fn from_frames(frames: impl IntoIterator<Item = f64>) -> Self {
        let mut frames: Vec<f64> = frames.into_iter().filter(|f| f.is_finite()).collect();
        frames.sort_by(f64::total_cmp);
        frames.dedup();
        Self { frames }
    }

    pub fn frames(&self) -> &[f64] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Turns sparse location keys into a position track.
#[derive(Clone, Copy, Debug)]
pub struct KeyframeTimelineExtractor {
    frame_rate: f64,
}

impl KeyframeTimelineExtractor {
    pub fn new(frame_rate: f64) -> Self {
        Self { frame_rate }
    }

    /// Sample the object's evaluated world position at every location key.
    ///
    /// Sample times are key frames divided by the frame rate. Objects without
    /// location keys get their static world position as a single sample at
    /// time 0.
    pub fn extract(&self, object: &dyn SceneObject) -> Trajectory {
        let keys = object
            .animation()
            .map(|anim| KeyframeSet::from_channels(anim, LOCATION_PATH))
            .unwrap_or_default();

        if keys.is_empty() {
            tracing::trace!(object = object.name(), "no location keys, static position");
            return Trajectory::stationary(object.world_location());
        }

        let mut trajectory = Trajectory::with_capacity(keys.len());
        for &frame in keys.frames() {
            let position = object.evaluate_position(frame);
            trajectory.push(TrajectorySample::new(frame / self.frame_rate, position));
        }
        tracing::trace!(object = object.name(), samples = trajectory.len(), "keyframe track");
        trajectory
    }
}

impl Default for KeyframeTimelineExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_RATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{FCurve, Keyframe, ObjectKind, ObjectNode};
    use crate::util::DVec3;

    fn keyed(frames_per_axis: [&[f64]; 3]) -> AnimationData {
        let curves = frames_per_axis
            .iter()
            .enumerate()
            .map(|(axis, frames)| {
                FCurve::new(
                    LOCATION_PATH,
                    axis,
                    frames.iter().map(|&f| Keyframe::new(f, f)).collect(),
                )
            })
            .collect();
        AnimationData::new(curves)
    }

    #[test]
    fn test_keyframe_set_union() {
        let anim = keyed([&[5.0, 2.0], &[5.0], &[8.0]]);
        let set = KeyframeSet::from_channels(&anim, LOCATION_PATH);
        assert_eq!(set.frames(), &[2.0, 5.0, 8.0]);
    }

    #[test]
    fn test_other_channels_ignored() {
        let mut anim = keyed([&[1.0], &[], &[]]);
        anim.fcurves.push(FCurve::new("rotation_euler", 2, vec![Keyframe::new(40.0, 1.0)]));
        assert_eq!(KeyframeSet::from_channels(&anim, LOCATION_PATH).frames(), &[1.0]);
    }

    #[test]
    fn test_timeline_seconds() {
        let mut node = ObjectNode::new("Bird", ObjectKind::Mesh);
        node.animation = Some(keyed([&[5.0, 2.0], &[5.0], &[8.0]]));
        let t = KeyframeTimelineExtractor::default().extract(&node);
        let times: Vec<f64> = t.iter().map(|s| s.time).collect();
        assert_eq!(times, vec![2.0 / 25.0, 5.0 / 25.0, 8.0 / 25.0]);
        // x is keyed with value == frame; y and z hold their nearest key
        assert_eq!(t.samples()[0].position, DVec3::new(2.0, 5.0, 8.0));
        assert_eq!(t.samples()[2].position, DVec3::new(5.0, 5.0, 8.0));
    }

    #[test]
    fn test_static_fallback() {
        let node = ObjectNode::new("Radio", ObjectKind::Mesh).with_location(DVec3::new(1.0, -2.0, 0.5));
        let t = KeyframeTimelineExtractor::default().extract(&node);
        assert_eq!(t, Trajectory::stationary(DVec3::new(1.0, -2.0, 0.5)));
    }

    #[test]
    fn test_custom_frame_rate() {
        let mut node = ObjectNode::new("Bird", ObjectKind::Mesh);
        node.animation = Some(keyed([&[0.0, 12.0], &[], &[]]));
        let t = KeyframeTimelineExtractor::new(24.0).extract(&node);
        assert_eq!(t.samples()[1].time, 0.5);
    }
}
