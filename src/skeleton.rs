//! Data delivered by the skeletal tracker of the sensor driver.
//! Positions are in meters within the skeleton space of the sensor
//! (y pointing up, z pointing away from the sensor).

use std::fmt;
use std::str::FromStr;

use crate::errors::*;
use crate::floor::FloorClipPlane;
use crate::vecmath::Vec3;

/// Number of joints the tracker reports per skeleton
pub const JOINT_COUNT: usize = 20;

/// The body landmarks of a skeleton.
/// The discriminant is the index within `Skeleton::joints`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointType {
    HipCenter = 0,
    Spine,
    ShoulderCenter,
    Head,
    ShoulderLeft,
    ElbowLeft,
    WristLeft,
    HandLeft,
    ShoulderRight,
    ElbowRight,
    WristRight,
    HandRight,
    HipLeft,
    KneeLeft,
    AnkleLeft,
    FootLeft,
    HipRight,
    KneeRight,
    AnkleRight,
    FootRight,
}

impl JointType {
    pub const ALL: [JointType; JOINT_COUNT] = [JointType::HipCenter,
                                               JointType::Spine,
                                               JointType::ShoulderCenter,
                                               JointType::Head,
                                               JointType::ShoulderLeft,
                                               JointType::ElbowLeft,
                                               JointType::WristLeft,
                                               JointType::HandLeft,
                                               JointType::ShoulderRight,
                                               JointType::ElbowRight,
                                               JointType::WristRight,
                                               JointType::HandRight,
                                               JointType::HipLeft,
                                               JointType::KneeLeft,
                                               JointType::AnkleLeft,
                                               JointType::FootLeft,
                                               JointType::HipRight,
                                               JointType::KneeRight,
                                               JointType::AnkleRight,
                                               JointType::FootRight];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            JointType::HipCenter => "hip_center",
            JointType::Spine => "spine",
            JointType::ShoulderCenter => "shoulder_center",
            JointType::Head => "head",
            JointType::ShoulderLeft => "shoulder_left",
            JointType::ElbowLeft => "elbow_left",
            JointType::WristLeft => "wrist_left",
            JointType::HandLeft => "hand_left",
            JointType::ShoulderRight => "shoulder_right",
            JointType::ElbowRight => "elbow_right",
            JointType::WristRight => "wrist_right",
            JointType::HandRight => "hand_right",
            JointType::HipLeft => "hip_left",
            JointType::KneeLeft => "knee_left",
            JointType::AnkleLeft => "ankle_left",
            JointType::FootLeft => "foot_left",
            JointType::HipRight => "hip_right",
            JointType::KneeRight => "knee_right",
            JointType::AnkleRight => "ankle_right",
            JointType::FootRight => "foot_right",
        }
    }
}

impl fmt::Display for JointType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for JointType {
    type Err = Error;
    fn from_str(s: &str) -> Result<JointType> {
        JointType::ALL
            .iter()
            .cloned()
            .find(|j| j.name() == s)
            .ok_or_else(|| ErrorKind::InvalidJoint(s.to_string()).into())
    }
}

/// Body side of a limb
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn hand(self) -> JointType {
        match self {
            Side::Left => JointType::HandLeft,
            Side::Right => JointType::HandRight,
        }
    }
    pub fn elbow(self) -> JointType {
        match self {
            Side::Left => JointType::ElbowLeft,
            Side::Right => JointType::ElbowRight,
        }
    }
    pub fn shoulder(self) -> JointType {
        match self {
            Side::Left => JointType::ShoulderLeft,
            Side::Right => JointType::ShoulderRight,
        }
    }
    pub fn hip(self) -> JointType {
        match self {
            Side::Left => JointType::HipLeft,
            Side::Right => JointType::HipRight,
        }
    }
    pub fn knee(self) -> JointType {
        match self {
            Side::Left => JointType::KneeLeft,
            Side::Right => JointType::KneeRight,
        }
    }
    pub fn foot(self) -> JointType {
        match self {
            Side::Left => JointType::FootLeft,
            Side::Right => JointType::FootRight,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingState {
    NotTracked,
    /// Only `Skeleton::position` is valid
    PositionOnly,
    Tracked,
}

/// One skeleton of a frame
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Skeleton {
    /// Id assigned by the tracker, stable while the user stays in view
    pub tracking_id: u32,
    pub tracking_state: TrackingState,
    /// Center of mass of the user
    pub position: Vec3<f32>,
    /// Joint positions indexed by `JointType::index`
    pub joints: [Vec3<f32>; JOINT_COUNT],
}

impl Skeleton {
    /// Creates a tracked skeleton with every joint at the origin
    pub fn new(tracking_id: u32) -> Skeleton {
        Skeleton {
            tracking_id: tracking_id,
            tracking_state: TrackingState::Tracked,
            position: Vec3::default(),
            joints: [Vec3::default(); JOINT_COUNT],
        }
    }

    pub fn joint(&self, joint: JointType) -> Vec3<f32> {
        self.joints[joint.index()]
    }

    pub fn set_joint(&mut self, joint: JointType, pos: Vec3<f32>) {
        self.joints[joint.index()] = pos;
    }

    /// Clone of the skeleton with the joint moved to `pos`
    pub fn with_joint(mut self, joint: JointType, pos: [f32; 3]) -> Skeleton {
        self.set_joint(joint, Vec3(pos));
        self
    }

    /// Clone of the skeleton with the center position set to `pos`
    pub fn with_position(mut self, pos: [f32; 3]) -> Skeleton {
        self.position = Vec3(pos);
        self
    }

    /// Clone of the skeleton with another tracking state
    pub fn with_tracking_state(mut self, state: TrackingState) -> Skeleton {
        self.tracking_state = state;
        self
    }

    pub fn is_tracked(&self) -> bool {
        self.tracking_state == TrackingState::Tracked
    }
}

/// Everything the tracker reports at one point in time
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SkeletonFrame {
    /// Time of the frame in milliseconds (arbitrary epoch)
    pub timestamp_ms: u64,
    #[serde(default)]
    pub floor_clip_plane: FloorClipPlane,
    pub skeletons: Vec<Skeleton>,
}

impl SkeletonFrame {
    /// Returns the fully tracked skeletons in frame order,
    /// or None if nobody is tracked.
    pub fn tracked_skeletons(&self) -> Option<Vec<&Skeleton>> {
        let tracked: Vec<_> = self.skeletons.iter().filter(|s| s.is_tracked()).collect();
        if tracked.is_empty() {
            return None;
        }
        Some(tracked)
    }

    /// Looks for the skeleton with the given tracking id
    pub fn skeleton(&self, tracking_id: u32) -> Option<&Skeleton> {
        self.skeletons.iter().find(|s| s.tracking_id == tracking_id)
    }
}
