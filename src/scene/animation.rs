//! Animation curves (keyframed channels) of scene objects.

use serde::Deserialize;

/// Data path of the location channels.
pub const LOCATION_PATH: &str = "location";

/// How a channel moves between two keyframes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// Straight line between neighbouring keys
    #[default]
    Linear,
    /// Hold the previous key's value until the next key
    Constant,
}

/// A single key: a value at a frame.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Keyframe {
    pub frame: f64,
    pub value: f64,
}

impl Keyframe {
    pub fn new(frame: f64, value: f64) -> Self {
        Self { frame, value }
    }
}

/// One animated scalar channel, e.g. `location[1]`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FCurve {
    /// Animated property, e.g. `"location"`.
    pub data_path: String,
    /// Component of the property (0 = x, 1 = y, 2 = z).
    #[serde(default, alias = "array_index")]
    pub index: usize,
    #[serde(default)]
    pub interpolation: Interpolation,
    #[serde(default)]
    pub keyframes: Vec<Keyframe>,
}

impl FCurve {
    /// Create a linear channel. Keys are sorted by frame.
    pub fn new(data_path: impl Into<String>, index: usize, keyframes: Vec<Keyframe>) -> Self {
        let mut curve = Self {
            data_path: data_path.into(),
            index,
            interpolation: Interpolation::Linear,
            keyframes,
        };
        curve.sort_keys();
        curve
    }

    /// Sort keys by frame. Evaluation assumes sorted keys.
    pub fn sort_keys(&mut self) {
        self.keyframes.sort_by(|a, b| a.frame.total_cmp(&b.frame));
    }

    /// Frames of all keys, in stored order.
    pub fn key_frames(&self) -> impl Iterator<Item = f64> + '_ {
        self.keyframes.iter().map(|k| k.frame)
    }

    /// Evaluate the channel at `frame`. `None` for a channel without keys.
    ///
    /// Values are held constant before the first and after the last key.
    pub fn evaluate(&self, frame: f64) -> Option<f64> {
        let keys = &self.keyframes;
        let first = keys.first()?;
        let last = keys.last()?;
        if frame <= first.frame {
            return Some(first.value);
        }
        if frame >= last.frame {
            return Some(last.value);
        }

        // first.frame < frame < last.frame, so 1 <= idx < len
        let idx = keys.partition_point(|k| k.frame <= frame);
        let (a, b) = (keys[idx - 1], keys[idx]);
        let value = match self.interpolation {
            Interpolation::Constant => a.value,
            Interpolation::Linear => {
                let span = b.frame - a.frame;
                if span > 0.0 {
                    a.value + (b.value - a.value) * (frame - a.frame) / span
                } else {
                    b.value
                }
            }
        };
        Some(value)
    }
}

/// All animation channels of one object.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AnimationData {
    #[serde(default)]
    pub fcurves: Vec<FCurve>,
}

impl AnimationData {
    pub fn new(fcurves: Vec<FCurve>) -> Self {
        Self { fcurves }
    }

    /// Channels animating `data_path`.
    pub fn channels<'a>(&'a self, data_path: &'a str) -> impl Iterator<Item = &'a FCurve> + 'a {
        self.fcurves.iter().filter(move |c| c.data_path == data_path)
    }

    pub fn is_empty(&self) -> bool {
        self.fcurves.iter().all(|c| c.keyframes.is_empty())
    }

    pub(crate) fn sort_keys(&mut self) {
        for curve in &mut self.fcurves {
            curve.sort_keys();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> FCurve {
        FCurve::new(
            LOCATION_PATH,
            0,
            vec![Keyframe::new(10.0, 1.0), Keyframe::new(0.0, 0.0), Keyframe::new(20.0, 1.0)],
        )
    }

    #[test]
    fn test_keys_sorted() {
        let c = ramp();
        assert_eq!(c.key_frames().collect::<Vec<_>>(), vec![0.0, 10.0, 20.0]);
    }

    #[test]
    fn test_linear() {
        let c = ramp();
        assert_eq!(c.evaluate(5.0), Some(0.5));
        assert_eq!(c.evaluate(10.0), Some(1.0));
        assert_eq!(c.evaluate(15.0), Some(1.0));
    }

    #[test]
    fn test_hold_outside_range() {
        let c = ramp();
        assert_eq!(c.evaluate(-3.0), Some(0.0));
        assert_eq!(c.evaluate(99.0), Some(1.0));
    }

    #[test]
    fn test_constant() {
        let mut c = ramp();
        c.interpolation = Interpolation::Constant;
        assert_eq!(c.evaluate(9.9), Some(0.0));
        assert_eq!(c.evaluate(10.0), Some(1.0));
    }

    #[test]
    fn test_empty_channel() {
        let c = FCurve::new(LOCATION_PATH, 2, Vec::new());
        assert_eq!(c.evaluate(1.0), None);
        assert!(AnimationData::new(vec![c]).is_empty());
    }

    #[test]
    fn test_channel_lookup() {
        let anim: AnimationData = serde_json::from_str(
            r#"{"fcurves": [
                {"data_path": "location", "index": 1, "keyframes": [{"frame": 1, "value": 2}]},
                {"data_path": "rotation_euler", "array_index": 2, "interpolation": "constant", "keyframes": []}
            ]}"#,
        )
        .unwrap();
        let location: Vec<_> = anim.channels(LOCATION_PATH).collect();
        assert_eq!(location.len(), 1);
        assert_eq!(location[0].index, 1);
        let rotation: Vec<_> = anim.channels("rotation_euler").collect();
        assert_eq!(rotation[0].index, 2);
        assert_eq!(rotation[0].interpolation, Interpolation::Constant);
    }
}
