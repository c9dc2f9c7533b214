//! Typed state of the interaction stream of the sensor driver
//! (hand pointers with grip and press detection).

use std::collections::HashMap;

use crate::vecmath::Vec2;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandType {
    None,
    Left,
    Right,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandEventType {
    None,
    Grip,
    GripRelease,
}

impl Default for HandEventType {
    fn default() -> Self {
        HandEventType::None
    }
}

/// One hand of a user as reported by the interaction stream
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct HandPointer {
    pub hand_type: HandType,
    /// Event of this frame, most frames carry `HandEventType::None`
    pub event: HandEventType,
    pub is_tracked: bool,
    /// The hand the user interacts with
    pub is_primary: bool,
    pub is_pressed: bool,
    /// Position within the interaction region
    pub x: f32,
    pub y: f32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserInfo {
    /// Tracking id of the skeleton, zero for an empty slot
    pub tracking_id: u32,
    pub hand_pointers: Vec<HandPointer>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct InteractionFrame {
    pub users: Vec<UserInfo>,
}

#[derive(Debug, Clone, Default)]
struct UserHands {
    /// Last event different from `HandEventType::None` per hand
    last_event: HashMap<HandType, HandEventType>,
    /// Pressed state of the latest frame
    pressed: HashMap<HandType, bool>,
    /// Position of the primary hand in the latest frame
    primary: Option<Vec2<f32>>,
}

/// Accumulates the interaction frames per user.
/// Grip events are only reported once by the driver, so the last one
/// of each hand is remembered until the user is forgotten.
#[derive(Debug, Clone, Default)]
pub struct InteractionTracker {
    users: HashMap<u32, UserHands>,
}

impl InteractionTracker {
    pub fn new() -> InteractionTracker {
        InteractionTracker::default()
    }

    pub fn update(&mut self, frame: &InteractionFrame) {
        // press and primary hand only describe the latest frame
        for hands in self.users.values_mut() {
            hands.pressed.clear();
            hands.primary = None;
        }
        for user in &frame.users {
            if user.tracking_id == 0 {
                continue;
            }
            if user.hand_pointers.iter().all(|h| h.hand_type == HandType::None) {
                trace!("User {} without hands", user.tracking_id);
                continue;
            }
            let hands = self.users.entry(user.tracking_id).or_insert_with(UserHands::default);
            for pointer in &user.hand_pointers {
                if pointer.hand_type == HandType::None {
                    continue;
                }
                if pointer.event != HandEventType::None {
                    debug!("User {}: {:?} on {:?} hand",
                           user.tracking_id,
                           pointer.event,
                           pointer.hand_type);
                    hands.last_event.insert(pointer.hand_type, pointer.event);
                }
                hands.pressed.insert(pointer.hand_type, pointer.is_pressed);
                if pointer.is_primary && pointer.is_tracked {
                    hands.primary = Some(Vec2([pointer.x, pointer.y]));
                }
            }
        }
    }

    /// The last grip event of the hand, `HandEventType::None` if there was none
    pub fn grip_event(&self, tracking_id: u32, hand: HandType) -> HandEventType {
        self.users
            .get(&tracking_id)
            .and_then(|u| u.last_event.get(&hand))
            .cloned()
            .unwrap_or_default()
    }

    /// The hand was gripped and not released since
    pub fn is_gripping(&self, tracking_id: u32, hand: HandType) -> bool {
        self.grip_event(tracking_id, hand) == HandEventType::Grip
    }

    /// Any hand of the user was pressed in the latest frame
    pub fn is_pressed(&self, tracking_id: u32) -> bool {
        self.users
            .get(&tracking_id)
            .map_or(false, |u| u.pressed.values().any(|&p| p))
    }

    pub fn is_pressed_hand(&self, tracking_id: u32, hand: HandType) -> bool {
        self.users
            .get(&tracking_id)
            .and_then(|u| u.pressed.get(&hand))
            .cloned()
            .unwrap_or(false)
    }

    /// Position of the primary hand of the user in the latest frame
    pub fn hand_position(&self, tracking_id: u32) -> Option<Vec2<f32>> {
        self.users.get(&tracking_id).and_then(|u| u.primary)
    }

    /// Ids of the users seen so far
    pub fn users(&self) -> Vec<u32> {
        let mut ids: Vec<_> = self.users.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn forget(&mut self, tracking_id: u32) {
        self.users.remove(&tracking_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pointer(hand_type: HandType, event: HandEventType) -> HandPointer {
        HandPointer {
            hand_type: hand_type,
            event: event,
            is_tracked: true,
            is_primary: false,
            is_pressed: false,
            x: 0.0,
            y: 0.0,
        }
    }

    fn frame(id: u32, pointers: Vec<HandPointer>) -> InteractionFrame {
        InteractionFrame {
            users: vec![UserInfo {
                            tracking_id: id,
                            hand_pointers: pointers,
                        }],
        }
    }

    #[test]
    fn test_grip_is_remembered() {
        let mut t = InteractionTracker::new();
        t.update(&frame(3,
                        vec![pointer(HandType::Left, HandEventType::Grip),
                             pointer(HandType::Right, HandEventType::None)]));
        assert!(t.is_gripping(3, HandType::Left));
        assert!(!t.is_gripping(3, HandType::Right));
        assert_eq!(t.grip_event(3, HandType::Right), HandEventType::None);

        // no event in this frame, the grip is still active
        t.update(&frame(3,
                        vec![pointer(HandType::Left, HandEventType::None),
                             pointer(HandType::Right, HandEventType::None)]));
        assert!(t.is_gripping(3, HandType::Left));

        t.update(&frame(3, vec![pointer(HandType::Left, HandEventType::GripRelease)]));
        assert!(!t.is_gripping(3, HandType::Left));
        assert_eq!(t.grip_event(3, HandType::Left), HandEventType::GripRelease);

        t.forget(3);
        assert_eq!(t.grip_event(3, HandType::Left), HandEventType::None);
    }

    #[test]
    fn test_skipped_users() {
        let mut t = InteractionTracker::new();
        t.update(&frame(0, vec![pointer(HandType::Left, HandEventType::Grip)]));
        t.update(&frame(5, vec![]));
        t.update(&frame(6,
                        vec![pointer(HandType::None, HandEventType::Grip),
                             pointer(HandType::None, HandEventType::None)]));
        assert!(t.users().is_empty());
        assert!(!t.is_gripping(0, HandType::Left));
    }

    #[test]
    fn test_press_and_position() {
        let mut t = InteractionTracker::new();
        let mut right = pointer(HandType::Right, HandEventType::None);
        right.is_pressed = true;
        right.is_primary = true;
        right.x = 0.4;
        right.y = 0.7;
        let left = pointer(HandType::Left, HandEventType::None);
        t.update(&frame(8, vec![left, right]));
        assert!(t.is_pressed(8));
        assert!(t.is_pressed_hand(8, HandType::Right));
        assert!(!t.is_pressed_hand(8, HandType::Left));
        assert_eq!(t.hand_position(8), Some(Vec2([0.4, 0.7])));

        // press and primary state only last for one frame
        t.update(&frame(8, vec![left]));
        assert!(!t.is_pressed(8));
        assert_eq!(t.hand_position(8), None);

        assert!(!t.is_pressed(9));
        assert_eq!(t.users(), vec![8]);
    }

    #[test]
    fn test_press_ends_without_user() {
        let mut t = InteractionTracker::new();
        let mut right = pointer(HandType::Right, HandEventType::Grip);
        right.is_pressed = true;
        right.is_primary = true;
        t.update(&frame(8, vec![right]));
        assert!(t.is_pressed(8));

        // user missing from the frame
        t.update(&InteractionFrame::default());
        assert!(!t.is_pressed(8));
        assert!(!t.is_pressed_hand(8, HandType::Right));
        assert_eq!(t.hand_position(8), None);
        assert!(t.is_gripping(8, HandType::Right));

        // user without hands
        right.event = HandEventType::None;
        t.update(&frame(8, vec![right]));
        assert!(t.is_pressed(8));
        t.update(&frame(8,
                        vec![pointer(HandType::None, HandEventType::None),
                             pointer(HandType::None, HandEventType::None)]));
        assert!(!t.is_pressed(8));
        assert_eq!(t.hand_position(8), None);
        assert!(t.is_gripping(8, HandType::Right));
    }

    #[test]
    fn test_untracked_primary() {
        let mut t = InteractionTracker::new();
        let mut right = pointer(HandType::Right, HandEventType::None);
        right.is_primary = true;
        right.is_tracked = false;
        t.update(&frame(2, vec![right]));
        assert_eq!(t.hand_position(2), None);
    }
}
