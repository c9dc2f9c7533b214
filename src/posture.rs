//! Single frame classifiers over the joints of one skeleton.
//!
//! Every predicate returns false for a skeleton that is not fully tracked.
//! Predicates measuring heights above the floor also return false if the
//! floor is not visible.

use std::fmt;

use crate::config::PostureConfig;
use crate::floor::FloorClipPlane;
use crate::skeleton::{JointType, Side, Skeleton};
use crate::vecmath::{Vec2, Vec3};

/// The postures known by `PostureDetector`
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Posture {
    RightHandUp,
    LeftHandUp,
    BothHandsUp,
    RightHandDown,
    LeftHandDown,
    OpenRightArm,
    OpenLeftArm,
    OpenArms,
    Slash,
    Cross,
    Minus,
    Plus,
    Greater,
    Lesser,
    RightFootUp,
    LeftFootUp,
    Crouching,
    Standing,
    BendOver,
    LeanRight,
    LeanLeft,
}

impl Posture {
    pub const ALL: [Posture; 21] = [Posture::RightHandUp,
                                    Posture::LeftHandUp,
                                    Posture::BothHandsUp,
                                    Posture::RightHandDown,
                                    Posture::LeftHandDown,
                                    Posture::OpenRightArm,
                                    Posture::OpenLeftArm,
                                    Posture::OpenArms,
                                    Posture::Slash,
                                    Posture::Cross,
                                    Posture::Minus,
                                    Posture::Plus,
                                    Posture::Greater,
                                    Posture::Lesser,
                                    Posture::RightFootUp,
                                    Posture::LeftFootUp,
                                    Posture::Crouching,
                                    Posture::Standing,
                                    Posture::BendOver,
                                    Posture::LeanRight,
                                    Posture::LeanLeft];

    pub fn name(self) -> &'static str {
        match self {
            Posture::RightHandUp => "right_hand_up",
            Posture::LeftHandUp => "left_hand_up",
            Posture::BothHandsUp => "both_hands_up",
            Posture::RightHandDown => "right_hand_down",
            Posture::LeftHandDown => "left_hand_down",
            Posture::OpenRightArm => "open_right_arm",
            Posture::OpenLeftArm => "open_left_arm",
            Posture::OpenArms => "open_arms",
            Posture::Slash => "slash",
            Posture::Cross => "cross",
            Posture::Minus => "minus",
            Posture::Plus => "plus",
            Posture::Greater => "greater",
            Posture::Lesser => "lesser",
            Posture::RightFootUp => "right_foot_up",
            Posture::LeftFootUp => "left_foot_up",
            Posture::Crouching => "crouching",
            Posture::Standing => "standing",
            Posture::BendOver => "bend_over",
            Posture::LeanRight => "lean_right",
            Posture::LeanLeft => "lean_left",
        }
    }
}

impl fmt::Display for Posture {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Direction of the arm in degrees, seen from its shoulder
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    /// Angle against the horizontal (XZ) plane, negative below the shoulder
    pub elevation: f64,
    /// Angle against the vertical (YZ) plane, negative for x < shoulder x
    pub azimuth: f64,
}

/// Evaluates the postures with the thresholds of a `PostureConfig`
#[derive(Debug, Clone, Default)]
pub struct PostureDetector {
    config: PostureConfig,
}

/// Joint shortcut
fn j(skeleton: &Skeleton, joint: JointType) -> Vec3<f32> {
    skeleton.joint(joint)
}

/// `a` is at the inner side of `b` for an arm of `side`.
/// Right limbs have larger x values than the body center.
fn inward_of(side: Side, a: f32, b: f32) -> bool {
    match side {
        Side::Right => a <= b,
        Side::Left => a >= b,
    }
}

impl PostureDetector {
    pub fn new(config: PostureConfig) -> PostureDetector {
        PostureDetector { config: config }
    }

    pub fn config(&self) -> &PostureConfig {
        &self.config
    }

    /// Evaluates a single posture
    pub fn detect(&self, posture: Posture, skeleton: &Skeleton, floor: &FloorClipPlane) -> bool {
        match posture {
            Posture::RightHandUp => self.hand_up(skeleton, Side::Right),
            Posture::LeftHandUp => self.hand_up(skeleton, Side::Left),
            Posture::BothHandsUp => self.both_hands_up(skeleton),
            Posture::RightHandDown => self.hand_down(skeleton, Side::Right),
            Posture::LeftHandDown => self.hand_down(skeleton, Side::Left),
            Posture::OpenRightArm => self.open_arm(skeleton, Side::Right),
            Posture::OpenLeftArm => self.open_arm(skeleton, Side::Left),
            Posture::OpenArms => self.open_arms(skeleton),
            Posture::Slash => self.slash(skeleton),
            Posture::Cross => self.cross(skeleton),
            Posture::Minus => self.minus(skeleton),
            Posture::Plus => self.plus(skeleton),
            Posture::Greater => self.greater(skeleton),
            Posture::Lesser => self.lesser(skeleton),
            Posture::RightFootUp => self.foot_up(skeleton, floor, Side::Right),
            Posture::LeftFootUp => self.foot_up(skeleton, floor, Side::Left),
            Posture::Crouching => self.crouching(skeleton, floor),
            Posture::Standing => self.standing(skeleton, floor),
            Posture::BendOver => self.bend_over(skeleton),
            Posture::LeanRight => self.lean(skeleton, Side::Right),
            Posture::LeanLeft => self.lean(skeleton, Side::Left),
        }
    }

    /// Every posture the skeleton currently shows
    pub fn active_postures(&self, skeleton: &Skeleton, floor: &FloorClipPlane) -> Vec<Posture> {
        let active: Vec<_> = Posture::ALL
            .iter()
            .cloned()
            .filter(|&p| self.detect(p, skeleton, floor))
            .collect();
        trace!("Skeleton {}: {:?}", skeleton.tracking_id, active);
        active
    }

    /// The hand is at least at head height and not below its elbow
    pub fn hand_up(&self, skeleton: &Skeleton, side: Side) -> bool {
        if !skeleton.is_tracked() {
            return false;
        }
        let hand = j(skeleton, side.hand());
        let elbow = j(skeleton, side.elbow());
        elbow.y() <= hand.y() && hand.y() >= j(skeleton, JointType::Head).y()
    }

    pub fn both_hands_up(&self, skeleton: &Skeleton) -> bool {
        self.hand_up(skeleton, Side::Right) && self.hand_up(skeleton, Side::Left)
    }

    /// The hand hangs below the hip center and not above its elbow
    pub fn hand_down(&self, skeleton: &Skeleton, side: Side) -> bool {
        if !skeleton.is_tracked() {
            return false;
        }
        let hand = j(skeleton, side.hand());
        let elbow = j(skeleton, side.elbow());
        elbow.y() >= hand.y() && hand.y() < j(skeleton, JointType::HipCenter).y()
    }

    /// Shoulder, elbow and hand are roughly at the same height.
    /// The left arm is allowed a larger deviation.
    pub fn open_arm(&self, skeleton: &Skeleton, side: Side) -> bool {
        if !skeleton.is_tracked() {
            return false;
        }
        let tol = match side {
            Side::Right => self.config.open_right_arm_tolerance,
            Side::Left => self.config.open_left_arm_tolerance,
        };
        let shoulder = j(skeleton, side.shoulder());
        let elbow = j(skeleton, side.elbow());
        let hand = j(skeleton, side.hand());
        (shoulder.y() - elbow.y()).abs() <= tol && (hand.y() - elbow.y()).abs() <= tol
    }

    pub fn open_arms(&self, skeleton: &Skeleton) -> bool {
        self.open_arm(skeleton, Side::Left) && self.open_arm(skeleton, Side::Right)
    }

    /// The forearm points up and towards the body, the hand being
    /// `slash_min_rise` to `slash_max_rise` above the elbow.
    pub fn slash_arm(&self, skeleton: &Skeleton, side: Side) -> bool {
        if !skeleton.is_tracked() {
            return false;
        }
        let hand = j(skeleton, side.hand());
        let elbow = j(skeleton, side.elbow());
        if !inward_of(side, hand.x(), elbow.x()) || hand.y() < elbow.y() {
            return false;
        }
        let rise = hand.y() - elbow.y();
        rise >= self.config.slash_min_rise && rise <= self.config.slash_max_rise
    }

    /// One arm slashed while the other hand is at or below the hip center.
    /// The right arm is checked first.
    pub fn slash(&self, skeleton: &Skeleton) -> bool {
        let hip_y = j(skeleton, JointType::HipCenter).y();
        for &side in &[Side::Right, Side::Left] {
            if self.slash_arm(skeleton, side) {
                return j(skeleton, side.opposite().hand()).y() <= hip_y;
            }
        }
        false
    }

    /// Both arms slashed
    pub fn cross(&self, skeleton: &Skeleton) -> bool {
        self.slash_arm(skeleton, Side::Right) && self.slash_arm(skeleton, Side::Left)
    }

    /// The forearm is horizontal and points towards the body while the
    /// other hand hangs at or below the hip center.
    pub fn minus_arm(&self, skeleton: &Skeleton, side: Side) -> bool {
        if !skeleton.is_tracked() {
            return false;
        }
        let hip_y = j(skeleton, JointType::HipCenter).y();
        let hand = j(skeleton, side.hand());
        let elbow = j(skeleton, side.elbow());
        j(skeleton, side.opposite().hand()).y() <= hip_y
            && hand.y() >= hip_y
            && (hand.y() - elbow.y()).abs() <= self.config.minus_tolerance
            && inward_of(side, hand.x(), elbow.x())
    }

    pub fn minus(&self, skeleton: &Skeleton) -> bool {
        self.minus_arm(skeleton, Side::Left) || self.minus_arm(skeleton, Side::Right)
    }

    /// The forearms cross: one vertical, one horizontal.
    pub fn plus(&self, skeleton: &Skeleton) -> bool {
        if !skeleton.is_tracked() {
            return false;
        }
        let tol = self.config.plus_tolerance;
        let hip_y = j(skeleton, JointType::HipCenter).y();
        let (rh, re) = (j(skeleton, JointType::HandRight), j(skeleton, JointType::ElbowRight));
        let (lh, le) = (j(skeleton, JointType::HandLeft), j(skeleton, JointType::ElbowLeft));

        if lh.y() < le.y() || rh.y() < re.y() {
            return false;
        }
        if rh.y() < hip_y || lh.y() < hip_y {
            return false;
        }
        if rh.x() > lh.x() || le.x() > re.x() {
            return false;
        }
        // the arm of the higher hand is the vertical bar
        if rh.y() > lh.y() && (rh.x() - re.x()).abs() > tol && (lh.y() - le.y()).abs() > tol {
            return false;
        }
        if rh.y() < lh.y() && (lh.x() - le.x()).abs() > tol && (rh.y() - re.y()).abs() > tol {
            return false;
        }
        true
    }

    /// Left hand raised outwards, right hand crossing over to the left hip
    pub fn greater(&self, skeleton: &Skeleton) -> bool {
        if !skeleton.is_tracked() {
            return false;
        }
        let lh = j(skeleton, JointType::HandLeft);
        let ls = j(skeleton, JointType::ShoulderLeft);
        let rh = j(skeleton, JointType::HandRight);
        let lhip = j(skeleton, JointType::HipLeft);
        if lh.x() > ls.x() || lh.y() - ls.y() < self.config.sign_min_rise {
            return false;
        }
        (rh.y() - lhip.y()).abs() <= self.config.greater_hip_tolerance && rh.x() <= lhip.x()
    }

    /// Right hand stretched out sideways, left hand raised over the right shoulder
    pub fn lesser(&self, skeleton: &Skeleton) -> bool {
        if !skeleton.is_tracked() {
            return false;
        }
        let rh = j(skeleton, JointType::HandRight);
        let rhip = j(skeleton, JointType::HipRight);
        let lh = j(skeleton, JointType::HandLeft);
        let rs = j(skeleton, JointType::ShoulderRight);
        if rh.x() - rhip.x() < self.config.lesser_min_offset {
            return false;
        }
        lh.x() >= rs.x() && lh.y() - rs.y() >= self.config.sign_min_rise
    }

    /// The foot is lifted higher than a fraction of the knee height
    pub fn foot_up(&self, skeleton: &Skeleton, floor: &FloorClipPlane, side: Side) -> bool {
        if !skeleton.is_tracked() {
            return false;
        }
        match (floor.joint_distance(skeleton, side.foot()),
               floor.joint_distance(skeleton, side.knee())) {
            (Some(foot), Some(knee)) => foot > knee / self.config.foot_up_knee_ratio,
            _ => false,
        }
    }

    /// The right hip or the left knee is close to the floor
    pub fn crouching(&self, skeleton: &Skeleton, floor: &FloorClipPlane) -> bool {
        if !skeleton.is_tracked() {
            return false;
        }
        let max = self.config.crouch_max_height;
        match (floor.joint_distance(skeleton, JointType::HipRight),
               floor.joint_distance(skeleton, JointType::KneeLeft)) {
            (Some(hip), Some(knee)) => hip <= max || knee <= max,
            _ => false,
        }
    }

    /// Both feet on the floor with an upright body
    pub fn standing(&self, skeleton: &Skeleton, floor: &FloorClipPlane) -> bool {
        if !skeleton.is_tracked() {
            return false;
        }
        let max = self.config.standing_max_foot_height;
        let on_floor = |foot: JointType| {
            floor.joint_distance(skeleton, foot).map_or(false, |d| d <= max)
        };
        if !on_floor(JointType::FootLeft) || !on_floor(JointType::FootRight) {
            return false;
        }
        let knees_over_feet = [Side::Left, Side::Right]
            .iter()
            .all(|&side| j(skeleton, side.knee()).y() >= j(skeleton, side.foot()).y());
        if !knees_over_feet {
            return false;
        }
        let head = j(skeleton, JointType::Head);
        let hip = j(skeleton, JointType::HipCenter);
        head.y() >= hip.y() && hip.z() <= head.z()
    }

    /// The head is moved towards the sensor by more than half of the
    /// torso length.
    pub fn bend_over(&self, skeleton: &Skeleton) -> bool {
        if !skeleton.is_tracked() {
            return false;
        }
        let torso = j(skeleton, JointType::ShoulderCenter).y() - j(skeleton, JointType::HipCenter).y();
        if torso < 0.0 {
            return false;
        }
        skeleton.position.z() - j(skeleton, JointType::Head).z() > torso / 2.0
    }

    /// The head is moved sideways over the hip center
    pub fn lean(&self, skeleton: &Skeleton, side: Side) -> bool {
        if !skeleton.is_tracked() {
            return false;
        }
        let head_x = j(skeleton, JointType::Head).x();
        let hip_x = j(skeleton, JointType::HipCenter).x();
        let offset = match side {
            Side::Right => head_x - hip_x,
            Side::Left => hip_x - head_x,
        };
        offset > 0.0 && offset >= self.config.lean_min_offset
    }
}

/// Elevation and azimuth of the arm with the shoulder as origin.
/// Returns None if the hand is at the shoulder.
pub fn hand_angles(skeleton: &Skeleton, side: Side) -> Option<HandAngles> {
    let v = (j(skeleton, side.hand()) - j(skeleton, side.shoulder())).to_f64();
    if v.length_square() == 0.0 {
        return None;
    }
    let (x, y, z) = (v.x(), v.y(), v.z());
    // a vertical arm has no projection on the XZ plane
    let elevation = v.angle_between(&Vec3([x, 0.0, z])).unwrap_or(90.0);
    let azimuth = v.angle_between(&Vec3([0.0, y, z])).unwrap_or(90.0);
    Some(HandAngles {
        elevation: if y < 0.0 { -elevation } else { elevation },
        azimuth: if x < 0.0 { -azimuth } else { azimuth },
    })
}

/// Position of the hand around the shoulder in the XY plane in degrees
/// within [0, 360): 0 with the hanging arm, 90 for the arm pointing
/// to -x, 180 for the raised arm and 270 towards +x.
/// Returns None if the hand is at the shoulder.
pub fn hand_clock_angle(skeleton: &Skeleton, side: Side) -> Option<f32> {
    let hand = j(skeleton, side.hand()).to_f64();
    let shoulder = j(skeleton, side.shoulder()).to_f64();
    let v = Vec2([hand.x() - shoulder.x(), hand.y() - shoulder.y()]);
    if v.length_square() == 0.0 {
        return None;
    }
    let a = v.angle_between(&Vec2([v.x(), 0.0])).unwrap_or(90.0);
    let (up, outside) = (hand.y() >= shoulder.y(), hand.x() >= shoulder.x());
    let (down, inside) = (hand.y() <= shoulder.y(), hand.x() <= shoulder.x());
    let angle = if up && outside {
        270.0 - a
    } else if down && outside {
        270.0 + a
    } else if down && inside {
        90.0 - a
    } else {
        90.0 + a
    };
    Some((angle % 360.0) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton::TrackingState;

    /// Upright person with hanging arms, 2m in front of the sensor.
    /// The floor is at y = 0.
    fn person() -> Skeleton {
        Skeleton::new(1)
            .with_position([0.0, 1.0, 2.0])
            .with_joint(JointType::Head, [0.0, 1.7, 2.0])
            .with_joint(JointType::ShoulderCenter, [0.0, 1.5, 2.0])
            .with_joint(JointType::Spine, [0.0, 1.2, 2.0])
            .with_joint(JointType::HipCenter, [0.0, 1.0, 2.0])
            .with_joint(JointType::ShoulderLeft, [-0.2, 1.45, 2.0])
            .with_joint(JointType::ShoulderRight, [0.2, 1.45, 2.0])
            .with_joint(JointType::ElbowLeft, [-0.22, 1.2, 2.0])
            .with_joint(JointType::ElbowRight, [0.22, 1.2, 2.0])
            .with_joint(JointType::WristLeft, [-0.22, 1.0, 2.0])
            .with_joint(JointType::WristRight, [0.22, 1.0, 2.0])
            .with_joint(JointType::HandLeft, [-0.22, 0.95, 2.0])
            .with_joint(JointType::HandRight, [0.22, 0.95, 2.0])
            .with_joint(JointType::HipLeft, [-0.1, 1.0, 2.0])
            .with_joint(JointType::HipRight, [0.1, 1.0, 2.0])
            .with_joint(JointType::KneeLeft, [-0.1, 0.5, 2.0])
            .with_joint(JointType::KneeRight, [0.1, 0.5, 2.0])
            .with_joint(JointType::AnkleLeft, [-0.1, 0.08, 2.0])
            .with_joint(JointType::AnkleRight, [0.1, 0.08, 2.0])
            .with_joint(JointType::FootLeft, [-0.1, 0.02, 2.0])
            .with_joint(JointType::FootRight, [0.1, 0.02, 2.0])
    }

    fn floor() -> FloorClipPlane {
        FloorClipPlane::new(0.0, 1.0, 0.0, 0.0)
    }

    #[test]
    fn test_neutral() {
        let d = PostureDetector::default();
        let p = person();
        let active = d.active_postures(&p, &floor());
        assert_eq!(active, vec![Posture::RightHandDown, Posture::LeftHandDown, Posture::Standing]);
    }

    #[test]
    fn test_untracked() {
        let d = PostureDetector::default();
        let p = person()
            .with_joint(JointType::HandRight, [0.25, 1.9, 2.0])
            .with_tracking_state(TrackingState::PositionOnly);
        assert!(d.active_postures(&p, &floor()).is_empty());
    }

    #[test]
    fn test_hands_up() {
        let d = PostureDetector::default();
        let p = person()
            .with_joint(JointType::ElbowRight, [0.25, 1.65, 2.0])
            .with_joint(JointType::HandRight, [0.25, 1.9, 2.0]);
        assert!(d.hand_up(&p, Side::Right));
        assert!(!d.hand_up(&p, Side::Left));
        assert!(!d.both_hands_up(&p));
        assert!(!d.hand_down(&p, Side::Right));

        let p = p.with_joint(JointType::ElbowLeft, [-0.25, 1.65, 2.0])
            .with_joint(JointType::HandLeft, [-0.25, 1.75, 2.0]);
        assert!(d.both_hands_up(&p));

        // elbow above the hand
        let p = p.with_joint(JointType::ElbowLeft, [-0.25, 1.8, 2.0]);
        assert!(!d.hand_up(&p, Side::Left));
    }

    #[test]
    fn test_open_arms() {
        let d = PostureDetector::default();
        let p = person()
            .with_joint(JointType::ElbowRight, [0.5, 1.45, 2.0])
            .with_joint(JointType::HandRight, [0.75, 1.47, 2.0])
            .with_joint(JointType::ElbowLeft, [-0.5, 1.4, 2.0])
            .with_joint(JointType::HandLeft, [-0.75, 1.5, 2.0]);
        assert!(d.open_arm(&p, Side::Right));
        assert!(d.open_arm(&p, Side::Left));
        assert!(d.open_arms(&p));

        // 0.12 exceeds the tolerance of the right arm only
        let p = p.with_joint(JointType::HandRight, [0.75, 1.57, 2.0])
            .with_joint(JointType::HandLeft, [-0.75, 1.52, 2.0]);
        assert!(!d.open_arm(&p, Side::Right));
        assert!(d.open_arm(&p, Side::Left));
        assert!(!d.open_arms(&p));
    }

    #[test]
    fn test_slash_and_cross() {
        let d = PostureDetector::default();
        let p = person()
            .with_joint(JointType::ElbowRight, [0.35, 1.3, 2.0])
            .with_joint(JointType::HandRight, [0.25, 1.6, 2.0]);
        assert!(d.slash_arm(&p, Side::Right));
        assert!(d.slash(&p));
        assert!(!d.cross(&p));

        let p = p.with_joint(JointType::ElbowLeft, [-0.35, 1.3, 2.0])
            .with_joint(JointType::HandLeft, [-0.25, 1.6, 2.0]);
        assert!(d.slash_arm(&p, Side::Left));
        assert!(d.cross(&p));
        assert!(!d.slash(&p));

        // raised too high
        let p = person()
            .with_joint(JointType::ElbowRight, [0.35, 1.3, 2.0])
            .with_joint(JointType::HandRight, [0.25, 1.8, 2.0]);
        assert!(!d.slash_arm(&p, Side::Right));
        // pointing outwards
        let p = p.with_joint(JointType::HandRight, [0.45, 1.6, 2.0]);
        assert!(!d.slash_arm(&p, Side::Right));
    }

    #[test]
    fn test_minus() {
        let d = PostureDetector::default();
        let p = person()
            .with_joint(JointType::ElbowRight, [0.3, 1.32, 2.0])
            .with_joint(JointType::HandRight, [0.1, 1.3, 2.0]);
        assert!(d.minus_arm(&p, Side::Right));
        assert!(!d.minus_arm(&p, Side::Left));
        assert!(d.minus(&p));

        let p = p.with_joint(JointType::HandRight, [0.4, 1.3, 2.0]);
        assert!(!d.minus(&p));
    }

    #[test]
    fn test_plus() {
        let d = PostureDetector::default();
        let p = person()
            .with_joint(JointType::ElbowRight, [0.05, 1.2, 2.0])
            .with_joint(JointType::HandRight, [0.05, 1.6, 2.0])
            .with_joint(JointType::ElbowLeft, [-0.2, 1.4, 2.0])
            .with_joint(JointType::HandLeft, [0.2, 1.4, 2.0]);
        assert!(d.plus(&p));

        // tilted vertical bar is tolerated while the other arm is horizontal
        let p = p.with_joint(JointType::HandRight, [0.18, 1.6, 2.0]);
        assert!(d.plus(&p));

        // neither bar straight
        let p = p.with_joint(JointType::HandLeft, [0.2, 1.55, 2.0]);
        assert!(!d.plus(&p));

        // hands not crossed
        let p = person()
            .with_joint(JointType::ElbowRight, [0.05, 1.2, 2.0])
            .with_joint(JointType::HandRight, [0.3, 1.6, 2.0])
            .with_joint(JointType::ElbowLeft, [-0.2, 1.4, 2.0])
            .with_joint(JointType::HandLeft, [0.2, 1.4, 2.0]);
        assert!(!d.plus(&p));
    }

    #[test]
    fn test_greater_lesser() {
        let d = PostureDetector::default();
        let p = person()
            .with_joint(JointType::HandLeft, [-0.4, 1.7, 2.0])
            .with_joint(JointType::HandRight, [-0.15, 1.02, 2.0]);
        assert!(d.greater(&p));
        assert!(!d.lesser(&p));
        let p = p.with_joint(JointType::HandRight, [0.0, 1.02, 2.0]);
        assert!(!d.greater(&p));

        let p = person()
            .with_joint(JointType::HandRight, [0.35, 1.0, 2.0])
            .with_joint(JointType::HandLeft, [0.25, 1.7, 2.0]);
        assert!(d.lesser(&p));
        assert!(!d.greater(&p));
        let p = p.with_joint(JointType::HandLeft, [0.25, 1.5, 2.0]);
        assert!(!d.lesser(&p));
    }

    #[test]
    fn test_floor_postures() {
        let d = PostureDetector::default();
        let p = person().with_joint(JointType::FootRight, [0.1, 0.3, 2.0]);
        assert!(d.foot_up(&p, &floor(), Side::Right));
        assert!(!d.foot_up(&p, &floor(), Side::Left));
        assert!(!d.standing(&p, &floor()));
        assert!(!d.foot_up(&p, &FloorClipPlane::invisible(), Side::Right));

        let p = person().with_joint(JointType::HipRight, [0.1, 0.25, 2.0]);
        assert!(d.crouching(&p, &floor()));
        assert!(!d.crouching(&p, &FloorClipPlane::invisible()));
        assert!(!d.crouching(&person(), &floor()));

        assert!(d.standing(&person(), &floor()));
        assert!(!d.standing(&person(), &FloorClipPlane::invisible()));
        let p = person().with_joint(JointType::Head, [0.0, 1.7, 1.9]);
        assert!(!d.standing(&p, &floor()));
        // feet on the floor, but a knee below its foot
        let p = person().with_joint(JointType::KneeLeft, [-0.1, 0.01, 2.0]);
        assert!(!d.standing(&p, &floor()));
        let p = person().with_joint(JointType::KneeRight, [0.1, 0.01, 2.0]);
        assert!(!d.standing(&p, &floor()));
        // head below the hip
        let p = person().with_joint(JointType::Head, [0.0, 0.9, 2.0]);
        assert!(!d.standing(&p, &floor()));
    }

    #[test]
    fn test_bend_over() {
        let d = PostureDetector::default();
        assert!(!d.bend_over(&person()));
        let p = person().with_joint(JointType::Head, [0.0, 1.4, 1.6]);
        assert!(d.bend_over(&p));
        let p = p.with_joint(JointType::ShoulderCenter, [0.0, 0.9, 1.7]);
        assert!(!d.bend_over(&p));
    }

    #[test]
    fn test_lean() {
        let d = PostureDetector::default();
        let p = person().with_joint(JointType::Head, [0.15, 1.65, 2.0]);
        assert!(d.lean(&p, Side::Right));
        assert!(!d.lean(&p, Side::Left));
        let p = person().with_joint(JointType::Head, [-0.15, 1.65, 2.0]);
        assert!(d.lean(&p, Side::Left));
        let p = person().with_joint(JointType::Head, [0.05, 1.65, 2.0]);
        assert!(!d.lean(&p, Side::Right));
        assert!(!d.lean(&p, Side::Left));
    }

    #[test]
    fn test_config_thresholds() {
        let mut config = PostureConfig::default();
        config.lean_min_offset = 0.03;
        let d = PostureDetector::new(config);
        let p = person().with_joint(JointType::Head, [0.05, 1.65, 2.0]);
        assert!(d.lean(&p, Side::Right));
        assert_feq!(d.config().lean_min_offset, 0.03, 0.0001);
    }

    #[test]
    fn test_hand_angles() {
        let p = person().with_joint(JointType::HandRight, [0.7, 1.95, 2.0]);
        let a = hand_angles(&p, Side::Right).unwrap();
        assert_feq!(a.elevation, 45.0, 0.01);
        assert_feq!(a.azimuth, 45.0, 0.01);

        // hanging straight down
        let p = person().with_joint(JointType::HandLeft, [-0.2, 0.95, 2.0]);
        let a = hand_angles(&p, Side::Left).unwrap();
        assert_feq!(a.elevation, -90.0, 0.01);
        assert_feq!(a.azimuth, 0.0, 0.01);

        // towards -x and the sensor
        let p = person().with_joint(JointType::HandLeft, [-0.7, 1.45, 1.5]);
        let a = hand_angles(&p, Side::Left).unwrap();
        assert_feq!(a.elevation, 0.0, 0.01);
        assert_feq!(a.azimuth, -45.0, 0.01);

        let p = person().with_joint(JointType::HandLeft, [-0.2, 1.45, 2.0]);
        assert!(hand_angles(&p, Side::Left).is_none());
    }

    #[test]
    fn test_hand_clock_angle() {
        let at = |x: f32, y: f32| {
            let p = person().with_joint(JointType::HandRight, [0.2 + x, 1.45 + y, 2.0]);
            hand_clock_angle(&p, Side::Right).unwrap()
        };
        assert_feq!(at(0.0, -0.5), 0.0, 0.01);
        assert_feq!(at(-0.5, 0.0), 90.0, 0.01);
        assert_feq!(at(0.0, 0.5), 180.0, 0.01);
        assert_feq!(at(0.5, 0.0), 270.0, 0.01);
        assert_feq!(at(-0.5, -0.5), 45.0, 0.01);
        assert_feq!(at(-0.5, 0.5), 135.0, 0.01);
        assert_feq!(at(0.5, 0.5), 225.0, 0.01);
        assert_feq!(at(0.5, -0.5), 315.0, 0.01);

        let p = person().with_joint(JointType::HandRight, [0.2, 1.45, 2.0]);
        assert!(hand_clock_angle(&p, Side::Right).is_none());
    }
}
