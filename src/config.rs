//! Thresholds of the classifiers.
//! The defaults are the hand-tuned values; a JSON file may override
//! single entries, missing entries keep their default.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::errors::*;

/// Thresholds of the single frame postures (meters if not stated otherwise)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PostureConfig {
    /// Allowed height difference within the right arm for an open arm
    pub open_right_arm_tolerance: f32,
    /// Allowed height difference within the left arm for an open arm
    pub open_left_arm_tolerance: f32,
    /// Minimal height of the hand over the elbow for a slash
    pub slash_min_rise: f32,
    /// Maximal height of the hand over the elbow for a slash
    pub slash_max_rise: f32,
    /// Allowed height difference of hand and elbow for a minus
    pub minus_tolerance: f32,
    /// Allowed deviation of the arms for a plus
    pub plus_tolerance: f32,
    /// Minimal height of the raised hand over the shoulder for greater/lesser
    pub sign_min_rise: f32,
    /// Allowed height difference of right hand and left hip for greater
    pub greater_hip_tolerance: f32,
    /// Minimal sideways distance of the right hand to the right hip for lesser
    pub lesser_min_offset: f32,
    /// A foot is up if it is higher than knee height divided by this value
    pub foot_up_knee_ratio: f64,
    /// Maximal height of the right hip or left knee while crouching
    pub crouch_max_height: f64,
    /// Maximal height of the feet while standing
    pub standing_max_foot_height: f64,
    /// Minimal sideways offset of the head to the hip center for leaning
    pub lean_min_offset: f32,
}

impl Default for PostureConfig {
    fn default() -> Self {
        PostureConfig {
            open_right_arm_tolerance: 0.1,
            open_left_arm_tolerance: 0.15,
            slash_min_rise: 0.15,
            slash_max_rise: 0.45,
            minus_tolerance: 0.1,
            plus_tolerance: 0.1,
            sign_min_rise: 0.2,
            greater_hip_tolerance: 0.1,
            lesser_min_offset: 0.2,
            foot_up_knee_ratio: 2.4,
            crouch_max_height: 0.3,
            standing_max_foot_height: 0.03,
            lean_min_offset: 0.1,
        }
    }
}

/// Thresholds of the gestures spanning several frames
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GestureConfig {
    /// A swipe must take longer than this (milliseconds)
    pub swipe_min_duration_ms: u64,
    /// A swipe must take less than this (milliseconds)
    pub swipe_max_duration_ms: u64,
    /// Both feet must be higher than this to start a jump
    pub jump_lift_height: f64,
    /// Both feet must be lower than this to finish a jump
    pub jump_land_height: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        GestureConfig {
            swipe_min_duration_ms: 100,
            swipe_max_duration_ms: 1000,
            jump_lift_height: 0.06,
            jump_land_height: 0.02,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub posture: PostureConfig,
    pub gesture: GestureConfig,
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Config> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads the configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        let mut json = String::new();
        File::open(path)
            .and_then(|mut f| f.read_to_string(&mut json))
            .chain_err(|| format!("Cannot read config {}", path.display()))?;
        let config = Config::from_json_str(&json)?;
        info!("Loaded config from {}", path.display());
        debug!("{:?}", config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json() {
        let c = Config::from_json_str(r#"{"gesture": {"swipe_max_duration_ms": 800}}"#).unwrap();
        assert_eq!(c.gesture.swipe_max_duration_ms, 800);
        assert_eq!(c.gesture.swipe_min_duration_ms, 100);
        assert_eq!(c.posture, PostureConfig::default());

        let c = Config::from_json_str("{}").unwrap();
        assert_eq!(c, Config::default());
    }

    #[test]
    fn test_invalid_json() {
        assert!(Config::from_json_str(r#"{"posture": 3}"#).is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(Config::load("/this/config/does/not/exist.json").is_err());
    }

    #[test]
    fn test_load() {
        let path = ::std::env::temp_dir().join("depthgesture_config_test.json");
        let json = serde_json::to_string(&Config::default()).unwrap();
        ::std::fs::write(&path, json).unwrap();
        assert_eq!(Config::load(&path).unwrap(), Config::default());
        let _ = ::std::fs::remove_file(&path);
    }
}
