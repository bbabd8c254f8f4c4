//! Position/orientation snippet of a single object, for pasting into a
//! hand-written scene.

use crate::scene::SceneObject;
use crate::util::{euler_zyx_degrees, format::fixed};

/// Three lines: a static `<position>`, a static `<orientation>` (Z, Y, X in
/// degrees) and the location as `x`/`y`/`z` attributes.
pub fn pose_snippet(object: &dyn SceneObject) -> String {
    let p = object.world_location();
    let r = euler_zyx_degrees(object.rotation_euler());
    format!(
        "<position>0 {} {} {}</position>\n<orientation>0 {} {} {}</orientation>\nx=\"{}\" y=\"{}\" z=\"{}\"\n",
        fixed(p.x, 3),
        fixed(p.y, 3),
        fixed(p.z, 3),
        fixed(r.x, 1),
        fixed(r.y, 1),
        fixed(r.z, 1),
        fixed(p.x, 3),
        fixed(p.y, 3),
        fixed(p.z, 3),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{ObjectKind, ObjectNode};
    use crate::util::DVec3;

    #[test]
    fn test_snippet() {
        let mut node = ObjectNode::new("Listener", ObjectKind::Other).with_location(DVec3::new(1.0, 2.5, -0.25));
        node.rotation_euler = DVec3::new(0.0, 0.0, std::f64::consts::FRAC_PI_2);
        assert_eq!(
            pose_snippet(&node),
            "<position>0 1.000 2.500 -0.250</position>\n\
             <orientation>0 90.0 0.0 0.0</orientation>\n\
             x=\"1.000\" y=\"2.500\" z=\"-0.250\"\n"
        );
    }
}
