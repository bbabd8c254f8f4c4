//! Output file names derived from the scene's base name.

use std::borrow::Cow;

/// Pose snippets always go to this file.
pub const POSE_FILE: &str = "objpos.txt";

/// Scene and object names may contain path separators; they become `_`.
fn component(name: &str) -> Cow<'_, str> {
    if name.contains(['/', '\\']) {
        Cow::Owned(name.replace(['/', '\\'], "_"))
    } else {
        Cow::Borrowed(name)
    }
}

/// `<base>_export.tsc`
pub fn scene_file(base: &str) -> String {
    format!("{}_export.tsc", component(base))
}

/// `<base>_<object>.raw`
pub fn object_raw_file(base: &str, object: &str) -> String {
    format!("{}_{}.raw", component(base), component(object))
}

/// `<base>_<object>.csv`
pub fn object_csv_file(base: &str, object: &str) -> String {
    format!("{}_{}.csv", component(base), component(object))
}

/// `<base>.raw`
pub fn selection_raw_file(base: &str) -> String {
    format!("{}.raw", component(base))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(scene_file("hall"), "hall_export.tsc");
        assert_eq!(object_raw_file("hall", "Wall"), "hall_Wall.raw");
        assert_eq!(object_csv_file("hall", "Path"), "hall_Path.csv");
        assert_eq!(selection_raw_file("hall"), "hall.raw");
    }

    #[test]
    fn test_separators_replaced() {
        assert_eq!(object_raw_file("hall", "Doors/Left"), "hall_Doors_Left.raw");
        assert_eq!(object_csv_file("hall", "a\\b"), "hall_a_b.csv");
        assert_eq!(scene_file("set/01"), "set_01_export.tsc");
    }
}
