use crate::skeleton::{JointType, Skeleton};
use crate::vecmath::{Vec3, Vec4};

/// Plane equation `(a, b, c, d)` of the floor as reported by the tracker.
/// The tracker reports the zero vector while no floor is in view.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct FloorClipPlane(pub Vec4<f32>);

impl FloorClipPlane {
    pub fn new(a: f32, b: f32, c: f32, d: f32) -> FloorClipPlane {
        FloorClipPlane(Vec4([a, b, c, d]))
    }

    /// A plane that signals that the floor was not detected
    pub fn invisible() -> FloorClipPlane {
        FloorClipPlane::default()
    }

    /// Returns false if every component is zero.
    pub fn is_visible(&self) -> bool {
        self.0.iter().any(|&v| v != 0.0)
    }

    /// Signed distance `a*x + b*y + c*z + d` of `point` to the floor
    /// (positive above the floor).
    /// Returns None if the floor is not visible.
    pub fn distance(&self, point: Vec3<f32>) -> Option<f64> {
        if !self.is_visible() {
            trace!("Floor not visible, no distance available");
            return None;
        }
        let plane = self.0.to_f64();
        let point = point.to_f64();
        Some(plane.xyz().dot(&point) + plane.w())
    }

    /// Distance of the given joint of the skeleton to the floor.
    pub fn joint_distance(&self, skeleton: &Skeleton, joint: JointType) -> Option<f64> {
        self.distance(skeleton.joint(joint))
    }
}
