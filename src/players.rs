//! Bookkeeping for games with up to two players.

use crate::skeleton::{JointType, Skeleton, SkeletonFrame};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// The right-most player, or the only one
    One,
    Two,
}

/// Players that disappeared with the latest frame
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneExit {
    None,
    PlayerOne,
    PlayerTwo,
    Both,
}

/// Assigns the tracked skeletons of every frame to the two player slots.
#[derive(Debug, Clone)]
pub struct PlayerTracker {
    one: Option<Skeleton>,
    two: Option<Skeleton>,
    left_scene: SceneExit,
}

impl Default for PlayerTracker {
    fn default() -> Self {
        PlayerTracker {
            one: None,
            two: None,
            left_scene: SceneExit::None,
        }
    }
}

impl PlayerTracker {
    pub fn new() -> PlayerTracker {
        PlayerTracker::default()
    }

    pub fn update(&mut self, frame: &SkeletonFrame) {
        let mut tracked = frame.tracked_skeletons().unwrap_or_default();
        if tracked.len() > 2 {
            warn!("{} skeletons tracked, only the first two are players", tracked.len());
            tracked.truncate(2);
        }
        let is_gone = |slot: &Option<Skeleton>| {
            slot.as_ref()
                .map_or(false, |old| tracked.iter().all(|s| s.tracking_id != old.tracking_id))
        };
        self.left_scene = match (is_gone(&self.one), is_gone(&self.two)) {
            (true, true) => SceneExit::Both,
            (true, false) => SceneExit::PlayerOne,
            (false, true) => SceneExit::PlayerTwo,
            (false, false) => SceneExit::None,
        };
        if self.left_scene != SceneExit::None {
            info!("Left the scene: {:?}", self.left_scene);
        }

        if tracked.len() == 2 {
            let hip_x = |s: &Skeleton| s.joint(JointType::HipCenter).x();
            // on a tie the later skeleton is player one
            if hip_x(tracked[1]) >= hip_x(tracked[0]) {
                tracked.swap(0, 1);
            }
        }
        let mut tracked = tracked.into_iter().cloned();
        self.one = tracked.next();
        self.two = tracked.next();
    }

    /// Which players disappeared with the latest update
    pub fn left_scene(&self) -> SceneExit {
        self.left_scene
    }

    pub fn player(&self, player: Player) -> Option<&Skeleton> {
        match player {
            Player::One => self.one.as_ref(),
            Player::Two => self.two.as_ref(),
        }
    }

    pub fn tracking_id(&self, player: Player) -> Option<u32> {
        self.player(player).map(|s| s.tracking_id)
    }

    /// The slot of the user with the given tracking id
    pub fn player_of(&self, tracking_id: u32) -> Option<Player> {
        [Player::One, Player::Two]
            .iter()
            .cloned()
            .find(|&p| self.tracking_id(p) == Some(tracking_id))
    }
}
