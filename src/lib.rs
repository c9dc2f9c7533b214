#![recursion_limit = "1024"]

#[macro_use]
extern crate serde_derive;
extern crate serde;
extern crate serde_json;
#[cfg(feature = "parallel_convert")]
extern crate rayon;

extern crate byteorder;
extern crate image;

#[macro_use]
extern crate log;

#[macro_use]
extern crate error_chain;

/// Assert with tolerance
#[cfg(test)]
macro_rules! assert_feq {
    ($a: expr, $b: expr, $tol: expr) => {{
        let (a, b) = ($a, $b);
        assert!((a - b).abs() < $tol, "{} differs from {} by more than {}", a, b, $tol);
    }};
}

pub mod errors;
pub mod vecmath;
pub mod types;

pub mod skeleton;
pub mod floor;
pub mod config;

pub mod posture;
pub mod gesture;
pub mod interaction;
pub mod players;

pub mod frame;

pub use config::{Config, GestureConfig, PostureConfig};
pub use floor::FloorClipPlane;
pub use gesture::{Gesture, GestureEvent, GestureTracker};
pub use posture::{Posture, PostureDetector};
pub use skeleton::{JointType, Side, Skeleton, SkeletonFrame, TrackingState};
