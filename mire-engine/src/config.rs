// config.rs - Tuned scene constants
//
// Every number here was picked by eye. Defaults reproduce the shipped look;
// a page can override any subset with a JSON object.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{MireError, MireResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    pub alert: AlertConfig,
    pub light: LightConfig,
    pub mist: DriftConfig,
    #[serde(deserialize_with = "cloud_layer")]
    pub clouds: DriftConfig,
    pub flock: FlockConfig,
    pub creature: CreatureConfig,
    pub audio: AudioConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            alert: AlertConfig::default(),
            light: LightConfig::default(),
            mist: DriftConfig::default(),
            clouds: DriftConfig::clouds(),
            flock: FlockConfig::default(),
            creature: CreatureConfig::default(),
            audio: AudioConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Parse a (possibly partial) JSON override.
    pub fn from_json(json: &str) -> MireResult<Self> {
        serde_json::from_str(json).map_err(|e| MireError::config(e.to_string()))
    }
}

/// Fields missing from a `clouds` override come from the cloud preset, not
/// from the mist defaults `DriftConfig` falls back to on its own.
fn cloud_layer<'de, D: Deserializer<'de>>(d: D) -> Result<DriftConfig, D::Error> {
    let serde_json::Value::Object(fields) = serde_json::Value::deserialize(d)? else {
        return Err(D::Error::custom("clouds: expected an object"));
    };
    let mut layer = serde_json::to_value(DriftConfig::clouds()).map_err(D::Error::custom)?;
    if let serde_json::Value::Object(preset) = &mut layer {
        preset.extend(fields);
    }
    serde_json::from_value(layer).map_err(D::Error::custom)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub start_z: f32,
    /// Depth covered over the whole scroll range.
    pub travel: f32,
    pub drift_x_amp: f32,
    pub drift_x_freq: f32,
    pub drift_y_amp: f32,
    pub drift_y_freq: f32,
    pub look_ahead: f32,
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_z: 5.0,
            travel: 95.0,
            drift_x_amp: 2.0,
            drift_x_freq: 10.0,
            drift_y_amp: 1.5,
            drift_y_freq: 15.0,
            look_ahead: 20.0,
            fov_deg: 75.0,
            near: 0.1,
            far: 150.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Per-frame scroll delta below which the visitor counts as idle.
    pub idle_delta: f32,
    pub rise: f32,
    pub fall: f32,
    /// Alert level above which heads start tracking the camera.
    pub engage: f32,
    /// Fraction of the gap closed by the head tracking weight each frame.
    pub head_blend: f32,
    pub idle_lean: f32,
    pub alert_lean: f32,
    /// Depth gained toward the camera at full alert.
    pub creep: f32,
    /// Closest a creeping creature gets to the camera's depth.
    pub standoff: f32,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            idle_delta: 0.0005,
            rise: 0.005,
            fall: 0.05,
            engage: 0.01,
            head_blend: 0.1,
            idle_lean: 0.0,
            alert_lean: 0.35,
            creep: 6.0,
            standoff: 3.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub heartbeat_rate: f32,
    pub heartbeat_gain: f32,
    pub flicker_chance: f32,
    pub flicker_max: f32,
    pub wobble: f32,
    pub thunder_chance: f32,
    pub thunder_min_frames: u32,
    pub thunder_max_frames: u32,
    pub thunder_intensity: f32,
    /// Pulse light intensity forced on the frame a growl starts.
    pub growl_spike: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            heartbeat_rate: 3.0,
            heartbeat_gain: 0.8,
            flicker_chance: 0.1,
            flicker_max: 2.0,
            wobble: 5.0,
            thunder_chance: 0.002,
            thunder_min_frames: 4,
            thunder_max_frames: 10,
            thunder_intensity: 12.0,
            growl_spike: 8.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    pub count: usize,
    pub spread_x: f32,
    pub spread_y: f32,
    pub center_y: f32,
    pub spread_z: f32,
    pub center_z: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    pub sway: f32,
    /// Maximum spin in radians per frame; zero disables spinning.
    pub spin: f32,
    /// Distance past the camera at which a sprite is recycled.
    pub margin: f32,
    /// Distance ahead of the camera where recycled sprites reappear.
    pub respawn_depth: f32,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            count: 50,
            spread_x: 60.0,
            spread_y: 20.0,
            center_y: -5.0,
            spread_z: 120.0,
            center_z: -30.0,
            min_speed: 0.02,
            max_speed: 0.07,
            min_scale: 15.0,
            max_scale: 40.0,
            sway: 0.02,
            spin: 0.0,
            margin: 10.0,
            respawn_depth: 105.0,
        }
    }
}

impl DriftConfig {
    /// High, slow, spinning cloud layer.
    pub fn clouds() -> Self {
        Self {
            count: 80,
            spread_x: 90.0,
            spread_y: 10.0,
            center_y: 14.0,
            min_speed: 0.01,
            max_speed: 0.03,
            min_scale: 20.0,
            max_scale: 45.0,
            sway: 0.01,
            spin: 0.002,
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockConfig {
    pub count: usize,
    pub flap_rate: f32,
    pub flap_amp: f32,
    pub flap_bias: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub trail: f32,
    pub spacing: f32,
    /// Orbit parameter step used to aim each bat along its path.
    pub lead: f32,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            count: 12,
            flap_rate: 15.0,
            flap_amp: 0.6,
            flap_bias: 0.3,
            min_speed: 1.0,
            max_speed: 3.0,
            min_radius: 4.0,
            max_radius: 12.0,
            trail: 15.0,
            spacing: 3.0,
            lead: 0.1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatureConfig {
    pub open_rate: f32,
    pub breath_rate: f32,
    pub breath_amp: f32,
    pub reach_rate: f32,
    pub reach_amp: f32,
    pub hunt_rate: f32,
    pub hunt_amp: f32,
    pub twitch_rate: f32,
    pub twitch_amp: f32,
}

impl Default for CreatureConfig {
    fn default() -> Self {
        Self {
            open_rate: 1.5,
            breath_rate: 2.5,
            breath_amp: 0.04,
            reach_rate: 0.5,
            reach_amp: 0.2,
            hunt_rate: 0.7,
            hunt_amp: 0.15,
            twitch_rate: 20.0,
            twitch_amp: 0.03,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub growl_chance: f32,
    pub growl_voices: usize,
    pub min_rate: f32,
    pub max_rate: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            growl_chance: 0.003,
            growl_voices: 2,
            min_rate: 0.8,
            max_rate: 1.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_other_defaults() {
        let cfg = SceneConfig::from_json(r#"{"alert": {"rise": 0.01}}"#).unwrap();
        assert_eq!(cfg.alert.rise, 0.01);
        assert_eq!(cfg.alert.fall, AlertConfig::default().fall);
        assert_eq!(cfg.camera, CameraConfig::default());
    }

    #[test]
    fn bad_json_is_a_config_error() {
        let err = SceneConfig::from_json("{").unwrap_err();
        assert!(matches!(err, MireError::Config(_)));
    }

    #[test]
    fn default_sprite_pools_total_130() {
        let cfg = SceneConfig::default();
        assert_eq!(cfg.mist.count, 50);
        assert_eq!(cfg.clouds.count, 80);
        assert!(cfg.clouds.spin > 0.0);
        assert_eq!(cfg.mist.spin, 0.0);
    }

    #[test]
    fn partial_clouds_override_keeps_cloud_defaults() {
        let cfg = SceneConfig::from_json(r#"{"clouds": {"count": 40}}"#).unwrap();
        let preset = DriftConfig::clouds();
        assert_eq!(cfg.clouds.count, 40);
        assert_eq!(cfg.clouds.spin, 0.002);
        assert_eq!(cfg.clouds.center_y, preset.center_y);
        assert_eq!(cfg.clouds.spread_x, preset.spread_x);
        assert_eq!(cfg.clouds.max_speed, preset.max_speed);
        assert_eq!(cfg.mist, DriftConfig::default());
    }

    #[test]
    fn clouds_override_must_be_an_object() {
        let err = SceneConfig::from_json(r#"{"clouds": 3}"#).unwrap_err();
        assert!(matches!(err, MireError::Config(_)));
    }
}
