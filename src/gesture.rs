//! Gestures spanning several frames.
//!
//! The detectors keep their state per tracking id and have to be fed
//! the consecutive frames of the tracker. Time is taken from the frame
//! timestamps, so recorded sessions replay the same way.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use crate::config::GestureConfig;
use crate::floor::FloorClipPlane;
use crate::skeleton::{JointType, Side, Skeleton, SkeletonFrame};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// The right hand swiped from the right shoulder to the body center
    SwipeLeft,
    /// The left hand swiped from the left shoulder to the body center
    SwipeRight,
    Jump,
}

/// A gesture finished by the user with the given tracking id
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureEvent {
    pub tracking_id: u32,
    pub gesture: Gesture,
}

#[derive(Debug, Clone, Copy, Default)]
struct SwipeState {
    /// The hand passed the outside of its shoulder
    armed: bool,
    /// Time of the first frame after arming
    started: Option<Duration>,
}

/// Detects horizontal swipes of one hand towards the body center.
#[derive(Debug, Clone)]
pub struct SwipeDetector {
    min_duration: Duration,
    max_duration: Duration,
    states: HashMap<(u32, Side), SwipeState>,
}

impl SwipeDetector {
    pub fn new(config: &GestureConfig) -> SwipeDetector {
        SwipeDetector {
            min_duration: Duration::from_millis(config.swipe_min_duration_ms),
            max_duration: Duration::from_millis(config.swipe_max_duration_ms),
            states: HashMap::new(),
        }
    }

    /// Swipe of the right hand
    pub fn swipe_left(&mut self, skeleton: &Skeleton, now: Duration) -> bool {
        self.swipe(skeleton, Side::Right, now)
    }

    /// Swipe of the left hand
    pub fn swipe_right(&mut self, skeleton: &Skeleton, now: Duration) -> bool {
        self.swipe(skeleton, Side::Left, now)
    }

    /// Advances the swipe state of the given hand.
    /// Returns true in the frame the swipe is completed.
    pub fn swipe(&mut self, skeleton: &Skeleton, hand_side: Side, now: Duration) -> bool {
        if !skeleton.is_tracked() {
            return false;
        }
        let hand = skeleton.joint(hand_side.hand());
        let elbow = skeleton.joint(hand_side.elbow());
        let shoulder = skeleton.joint(hand_side.shoulder());
        let center = skeleton.joint(JointType::ShoulderCenter);
        // x grows towards the outside of the arm
        let sign = match hand_side {
            Side::Right => 1.0,
            Side::Left => -1.0,
        };

        let key = (skeleton.tracking_id, hand_side);
        let state = self.states.entry(key).or_insert_with(SwipeState::default);

        if hand.y() < elbow.y() || hand.y() > skeleton.joint(JointType::Head).y()
            || hand.y() < skeleton.joint(JointType::HipCenter).y() {
            *state = SwipeState::default();
            return false;
        }

        let outside = sign * (hand.x() - shoulder.x());
        if outside >= 0.0 {
            if outside > sign * (shoulder.x() - center.x()) {
                // too far out
                *state = SwipeState::default();
                return false;
            }
            state.armed = true;
        }
        if !state.armed {
            return false;
        }

        let started = *state.started.get_or_insert(now);
        let elapsed = now.saturating_sub(started);
        if sign * (hand.x() - center.x()) <= 0.0 && elapsed > self.min_duration
            && elapsed < self.max_duration {
            debug!("Skeleton {}: swipe of {:?} hand in {:?}", key.0, hand_side, elapsed);
            *state = SwipeState::default();
            return true;
        }
        if elapsed >= self.max_duration {
            trace!("Skeleton {}: swipe of {:?} hand timed out", key.0, hand_side);
            *state = SwipeState::default();
        }
        false
    }

    /// Drops the state of a user that left the scene
    pub fn forget(&mut self, tracking_id: u32) {
        self.states.retain(|&(id, _), _| id != tracking_id);
    }
}

/// Detects jumps: both feet leave the floor, then land again.
#[derive(Debug, Clone)]
pub struct JumpDetector {
    lift_height: f64,
    land_height: f64,
    /// Users currently in the air
    airborne: HashMap<u32, bool>,
}

impl JumpDetector {
    pub fn new(config: &GestureConfig) -> JumpDetector {
        JumpDetector {
            lift_height: config.jump_lift_height,
            land_height: config.jump_land_height,
            airborne: HashMap::new(),
        }
    }

    /// Returns true once per jump, in the frame both feet left the floor.
    pub fn jump(&mut self, skeleton: &Skeleton, floor: &FloorClipPlane) -> bool {
        if !skeleton.is_tracked() {
            return false;
        }
        let (left, right) = match (floor.joint_distance(skeleton, JointType::FootLeft),
                                   floor.joint_distance(skeleton, JointType::FootRight)) {
            (Some(l), Some(r)) => (l, r),
            _ => return false,
        };
        let airborne = self.airborne.entry(skeleton.tracking_id).or_insert(false);
        if *airborne {
            if left < self.land_height && right < self.land_height {
                trace!("Skeleton {} landed", skeleton.tracking_id);
                *airborne = false;
            }
            return false;
        }
        if left > self.lift_height && right > self.lift_height {
            debug!("Skeleton {} jumped", skeleton.tracking_id);
            *airborne = true;
            return true;
        }
        false
    }

    pub fn forget(&mut self, tracking_id: u32) {
        self.airborne.remove(&tracking_id);
    }
}

/// Runs every gesture detector over whole frames and forgets the users
/// that are no longer tracked.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    swipe: SwipeDetector,
    jump: JumpDetector,
    users: HashSet<u32>,
}

impl GestureTracker {
    pub fn new(config: &GestureConfig) -> GestureTracker {
        GestureTracker {
            swipe: SwipeDetector::new(config),
            jump: JumpDetector::new(config),
            users: HashSet::new(),
        }
    }

    pub fn update(&mut self, frame: &SkeletonFrame) -> Vec<GestureEvent> {
        let now = Duration::from_millis(frame.timestamp_ms);
        let mut events = Vec::new();
        let mut users = HashSet::new();
        for skeleton in frame.tracked_skeletons().unwrap_or_default() {
            let id = skeleton.tracking_id;
            users.insert(id);
            if self.swipe.swipe_left(skeleton, now) {
                events.push(GestureEvent { tracking_id: id, gesture: Gesture::SwipeLeft });
            }
            if self.swipe.swipe_right(skeleton, now) {
                events.push(GestureEvent { tracking_id: id, gesture: Gesture::SwipeRight });
            }
            if self.jump.jump(skeleton, &frame.floor_clip_plane) {
                events.push(GestureEvent { tracking_id: id, gesture: Gesture::Jump });
            }
        }
        for &gone in self.users.difference(&users) {
            debug!("Skeleton {} lost, dropping gesture state", gone);
            self.swipe.forget(gone);
            self.jump.forget(gone);
        }
        self.users = users;
        events
    }
}
