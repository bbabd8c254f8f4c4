//! Constant-speed trajectories along curve control points.

use crate::scene::{number_attribute, SceneObject};
use crate::util::{to_world, Error, Result, Vertex, DEFAULT_SPEED};

use super::trajectory::{Trajectory, TrajectorySample};

/// Assigns times to control points by cumulative straight-line distance.
///
/// The parameterization is piecewise linear: curvature between control
/// points does not affect timing.
#[derive(Clone, Copy, Debug)]
pub struct TrajectorySampler {
    speed: f64,
}

impl TrajectorySampler {
    /// Create a sampler moving at `speed` units per second.
    ///
    /// `speed` must be positive and finite.
    pub fn new(speed: f64) -> Self {
        debug_assert!(speed > 0.0 && speed.is_finite());
        Self { speed }
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Sample world-space control points in order.
    ///
    /// The first sample is at time 0; every point appears exactly once. No
    /// points give an empty trajectory.
    pub fn sample(&self, points: &[Vertex]) -> Trajectory {
        let mut trajectory = Trajectory::with_capacity(points.len());
        let Some(&first) = points.first() else {
            return trajectory;
        };

        let mut time = 0.0;
        let mut previous = first;
        for &point in points {
            time += previous.distance(point) / self.speed;
            trajectory.push(TrajectorySample::new(time, point));
            previous = point;
        }
        trajectory
    }

    /// Sampler for a curve object: its `speed` attribute, else `default_speed`.
    pub fn for_object(object: &dyn SceneObject, default_speed: f64) -> Result<Self> {
        let speed = number_attribute(object, "speed")?.unwrap_or(default_speed);
        if !(speed > 0.0 && speed.is_finite()) {
            return Err(Error::InvalidAttribute {
                object: object.name().to_string(),
                key: "speed".to_string(),
                reason: format!("must be positive, got {speed}"),
            });
        }
        Ok(Self::new(speed))
    }

    /// Sample the first spline of a curve object in world space.
    pub fn sample_object(&self, object: &dyn SceneObject) -> Trajectory {
        let matrix = object.matrix_world();
        let points: Vec<Vertex> = object
            .spline_points()
            .iter()
            .map(|p| to_world(&matrix, p.0))
            .collect();
        self.sample(&points)
    }
}

impl Default for TrajectorySampler {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{ControlPoint, CurveData, ObjectKind, ObjectNode, Spline};
    use crate::util::DVec3;

    fn times(t: &Trajectory) -> Vec<f64> {
        t.iter().map(|s| s.time).collect()
    }

    #[test]
    fn test_arc_length() {
        let pts = [DVec3::ZERO, DVec3::new(3.0, 0.0, 0.0), DVec3::new(3.0, 4.0, 0.0)];
        let t = TrajectorySampler::default().sample(&pts);
        assert_eq!(times(&t), vec![0.0, 3.0, 7.0]);
        assert_eq!(t.samples()[2].position, pts[2]);
    }

    #[test]
    fn test_speed_scales_time() {
        let pts = [DVec3::ZERO, DVec3::new(3.0, 0.0, 0.0), DVec3::new(3.0, 4.0, 0.0)];
        let t = TrajectorySampler::new(2.0).sample(&pts);
        assert_eq!(times(&t), vec![0.0, 1.5, 3.5]);
    }

    #[test]
    fn test_empty_and_single() {
        assert!(TrajectorySampler::default().sample(&[]).is_empty());
        let t = TrajectorySampler::default().sample(&[DVec3::ONE]);
        assert_eq!(times(&t), vec![0.0]);
    }

    #[test]
    fn test_monotonic_with_repeats() {
        let pts = [DVec3::ZERO, DVec3::ZERO, DVec3::new(-1.0, 2.0, 0.5), DVec3::new(-1.0, 2.0, 0.5), DVec3::X];
        let t = TrajectorySampler::new(0.7).sample(&pts);
        assert_eq!(t.len(), pts.len());
        assert_eq!(t.samples()[0].time, 0.0);
        assert!(t.is_monotonic());
    }

    fn curve(points: &[[f64; 3]]) -> ObjectNode {
        let mut node = ObjectNode::new("Path", ObjectKind::Curve);
        node.curve = Some(CurveData {
            splines: vec![Spline {
                points: points.iter().map(|p| ControlPoint(DVec3::from_array(*p))).collect(),
            }],
        });
        node
    }

    #[test]
    fn test_object_world_space() {
        let node = curve(&[[0.0, 0.0, 0.0], [0.0, 2.0, 0.0]])
            .with_location(DVec3::new(0.0, 0.0, 5.0))
            .with_attribute("speed", 2.0);
        let sampler = TrajectorySampler::for_object(&node, 1.0).unwrap();
        assert_eq!(sampler.speed(), 2.0);
        let t = sampler.sample_object(&node);
        assert_eq!(times(&t), vec![0.0, 1.0]);
        assert_eq!(t.samples()[1].position, DVec3::new(0.0, 2.0, 5.0));
    }

    #[test]
    fn test_bad_speed() {
        let node = curve(&[]).with_attribute("speed", 0.0);
        assert!(matches!(
            TrajectorySampler::for_object(&node, 1.0),
            Err(Error::InvalidAttribute { .. })
        ));
        let node = curve(&[]).with_attribute("speed", "fast");
        assert!(TrajectorySampler::for_object(&node, 1.0).is_err());
    }
}
