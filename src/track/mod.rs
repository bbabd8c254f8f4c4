//! Motion tracks for curves and animated objects.
//!
//! - [`Trajectory`] - time-ordered world positions
//! - [`TrajectorySampler`] - constant-speed timing along curve control points
//! - [`KeyframeTimelineExtractor`] - positions at every location keyframe

pub mod keyframes;
pub mod sampler;
pub mod trajectory;

pub use keyframes::{KeyframeSet, KeyframeTimelineExtractor};
pub use sampler::TrajectorySampler;
pub use trajectory::{Trajectory, TrajectorySample};
