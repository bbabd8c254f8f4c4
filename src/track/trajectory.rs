//! Time-stamped position tracks.

use crate::util::Vertex;

/// A world-space position at a time in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrajectorySample {
    pub time: f64,
    pub position: Vertex,
}

impl TrajectorySample {
    pub fn new(time: f64, position: Vertex) -> Self {
        Self { time, position }
    }
}

/// Samples ordered by non-decreasing time, starting at time 0.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trajectory {
    samples: Vec<TrajectorySample>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    /// One sample at time 0.
    pub fn stationary(position: Vertex) -> Self {
        Self {
            samples: vec![TrajectorySample::new(0.0, position)],
        }
    }

    pub fn push(&mut self, sample: TrajectorySample) {
        debug_assert!(
            self.samples.last().map_or(true, |last| last.time <= sample.time),
            "trajectory samples must not go back in time"
        );
        self.samples.push(sample);
    }

    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrajectorySample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Time of the last sample, or 0 for an empty track.
    pub fn duration(&self) -> f64 {
        self.samples.last().map_or(0.0, |s| s.time)
    }

    /// Check the ordering invariant.
    pub fn is_monotonic(&self) -> bool {
        self.samples.windows(2).all(|w| w[0].time <= w[1].time)
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a TrajectorySample;
    type IntoIter = std::slice::Iter<'a, TrajectorySample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::DVec3;

    #[test]
    fn test_stationary() {
        let t = Trajectory::stationary(DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.len(), 1);
        assert_eq!(t.samples()[0].time, 0.0);
        assert_eq!(t.duration(), 0.0);
        assert!(t.is_monotonic());
    }

    #[test]
    fn test_push_and_iterate() {
        let mut t = Trajectory::with_capacity(2);
        assert!(t.is_empty());
        t.push(TrajectorySample::new(0.0, DVec3::ZERO));
        t.push(TrajectorySample::new(2.5, DVec3::X));
        assert_eq!(t.duration(), 2.5);
        let times: Vec<f64> = t.iter().map(|s| s.time).collect();
        assert_eq!(times, vec![0.0, 2.5]);
        assert_eq!((&t).into_iter().count(), 2);
    }
}
