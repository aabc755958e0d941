use directories::UserDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

pub const BUILTIN_PROFILES: [&str; 2] = ["strict", "relaxed"];
pub const DEFAULT_PROFILE: &str = "strict";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Geometry thresholds for the gesture classifier, in normalized image units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierThresholds {
    /// Tip must pass its MCP by this much to count as folded (or open).
    pub fold_margin: f32,
    pub min_folded: usize,
    pub min_open: usize,
    /// Index/middle tip must sit this far above its PIP to count as extended.
    pub extend_margin: f32,
    /// Minimum 2D tip-to-MCP length for an extended index/middle finger.
    pub min_finger_length: f32,
    /// Maximum 3D distance between index and middle tips.
    pub closeness: f32,
    /// Ring/pinky tip must sit this far below its PIP to count as curled.
    pub curl_margin: f32,
    /// Refine the tracking pose into a pointing direction.
    pub directional: bool,
    pub direction_min_length: f32,
    pub depth_axis: f32,
    pub vertical_axis: f32,
    pub horizontal_axis: f32,
}

impl ClassifierThresholds {
    pub fn strict() -> Self {
        Self {
            fold_margin: 0.0,
            min_folded: 4,
            min_open: 4,
            extend_margin: 0.02,
            min_finger_length: 0.08,
            closeness: 0.06,
            curl_margin: 0.01,
            directional: true,
            direction_min_length: 0.03,
            depth_axis: 0.4,
            vertical_axis: 0.5,
            horizontal_axis: 0.5,
        }
    }

    pub fn relaxed() -> Self {
        Self {
            min_finger_length: 0.05,
            closeness: 0.12,
            curl_margin: 0.0,
            ..Self::strict()
        }
    }
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self::strict()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Number of hand-center samples compared oldest vs newest.
    pub window: usize,
    /// Displacement in scene units above which the hand counts as moving.
    pub threshold: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            window: 10,
            threshold: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    pub max_points: usize,
    pub max_age_ms: u64,
    pub min_spacing: f32,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            max_points: 30,
            max_age_ms: 3000,
            min_spacing: 0.02,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    pub count: usize,
    pub contracted_radius: f32,
    pub scatter_radius: f32,
    /// Angular speed (rad/s) of the contracted sphere.
    pub rotation_speed: f32,
    pub transition_secs: f32,
    pub release_follow_delay_secs: f32,
    /// Trail length needed before particles start following it.
    pub min_follow_points: usize,
    pub settle_factor: f32,
    /// Multiplier on each particle's follow speed when advancing trail progress.
    pub follow_rate: f32,
    pub jitter_floor: f32,
    pub jitter_range: f32,
    pub float_amplitude: f32,
    /// How far the contracted orientation leans toward the anchor.
    pub contracted_lean: f32,
    pub seed: Option<u64>,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            count: 200,
            contracted_radius: 1.6,
            scatter_radius: 18.0,
            rotation_speed: 4.0,
            transition_secs: 1.2,
            release_follow_delay_secs: 3.0,
            min_follow_points: 4,
            settle_factor: 0.15,
            follow_rate: 3.0,
            jitter_floor: 0.2,
            jitter_range: 0.8,
            float_amplitude: 0.05,
            contracted_lean: 0.4,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub scale_x: f32,
    pub scale_y: f32,
    pub scale_z: f32,
    /// Lerp factor for the palm anchor and hand roll.
    pub anchor_smoothing: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            scale_x: 15.0,
            scale_y: 10.0,
            scale_z: 5.0,
            anchor_smoothing: 0.15,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub meta: Meta,
    pub classifier: ClassifierThresholds,
    pub motion: MotionConfig,
    pub trail: TrailConfig,
    pub swarm: SwarmConfig,
    pub scene: SceneConfig,
}

impl Profile {
    pub fn strict() -> Self {
        Self {
            meta: Meta {
                name: Some("strict".into()),
                description: Some("tight tracking pose, fewer false positives".into()),
            },
            ..Self::default()
        }
    }

    pub fn relaxed() -> Self {
        Self {
            meta: Meta {
                name: Some("relaxed".into()),
                description: Some("looser tracking pose for small or distant hands".into()),
            },
            classifier: ClassifierThresholds::relaxed(),
            ..Self::default()
        }
    }

    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "strict" => Some(Self::strict()),
            "relaxed" => Some(Self::relaxed()),
            _ => None,
        }
    }

    pub fn from_toml(txt: &str, origin: &Path) -> Result<Self> {
        let profile: Profile = toml::from_str(txt).map_err(|source| Error::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        validate_profile(&profile)?;
        Ok(profile)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::InvalidProfile(e.to_string()))
    }
}

fn builtin_profile_text(name: &str) -> Option<&'static str> {
    match name {
        "strict" => Some(include_str!("../profiles/strict.toml")),
        "relaxed" => Some(include_str!("../profiles/relaxed.toml")),
        _ => None,
    }
}

/// Profiles directory plus the `active` pointer file.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    pub active_name: String,
    pub profile: Profile,
    pub root: PathBuf,
    pub profiles_dir: PathBuf,
    pub active_ptr: PathBuf,
}

pub fn default_root() -> Result<PathBuf> {
    let dirs = UserDirs::new().ok_or(Error::NoHomeDir)?;
    Ok(dirs.home_dir().join(".config").join("handswarm"))
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl ProfileStore {
    pub fn load_or_install_default() -> Result<Self> {
        Self::open(default_root()?)
    }

    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let profiles_dir = root.join("profiles");
        fs::create_dir_all(&profiles_dir).map_err(|source| Error::Io {
            path: profiles_dir.clone(),
            source,
        })?;

        for name in BUILTIN_PROFILES {
            let path = profiles_dir.join(format!("{name}.toml"));
            if !path.exists() {
                if let Some(txt) = builtin_profile_text(name) {
                    write_file(&path, txt.as_bytes())?;
                    info!("installed {name} profile at {}", path.display());
                }
            }
        }

        let active_ptr = root.join("active");
        if !active_ptr.exists() {
            write_file(&active_ptr, DEFAULT_PROFILE.as_bytes())?;
        }

        let active_name = fs::read_to_string(&active_ptr)
            .map_err(|source| Error::Io {
                path: active_ptr.clone(),
                source,
            })?
            .trim()
            .to_string();
        let profile = load_profile(&profiles_dir, &active_name)?;

        Ok(Self {
            active_name,
            profile,
            root,
            profiles_dir,
            active_ptr,
        })
    }

    pub fn reload(&mut self) -> Result<()> {
        self.profile = load_profile(&self.profiles_dir, &self.active_name)?;
        Ok(())
    }

    pub fn set_active(&mut self, name: &str) -> Result<()> {
        let p = self.profiles_dir.join(format!("{name}.toml"));
        if !p.exists() {
            return Err(Error::ProfileNotFound(p));
        }
        write_file(&self.active_ptr, name.as_bytes())?;
        self.active_name = name.to_string();
        self.reload()?;
        Ok(())
    }

    pub fn load(&self, name: &str) -> Result<Profile> {
        load_profile(&self.profiles_dir, name)
    }

    pub fn list_profiles(&self) -> Vec<String> {
        let mut v = Vec::new();
        if let Ok(rd) = fs::read_dir(&self.profiles_dir) {
            for e in rd.flatten() {
                let path = e.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        v.push(stem.to_string());
                    }
                }
            }
        }
        v.sort();
        v
    }
}

fn load_profile(dir: &Path, name: &str) -> Result<Profile> {
    let path = dir.join(format!("{name}.toml"));
    if !path.exists() {
        return Err(Error::ProfileNotFound(path));
    }
    let txt = fs::read_to_string(&path).map_err(|source| Error::Io {
        path: path.clone(),
        source,
    })?;
    let profile = Profile::from_toml(&txt, &path)?;
    debug!("loaded profile {}", path.display());
    Ok(profile)
}

pub fn validate_profile(p: &Profile) -> Result<()> {
    let invalid = |msg: String| Err(Error::InvalidProfile(msg));

    let c = &p.classifier;
    if c.min_folded == 0 || c.min_folded > 5 || c.min_open == 0 || c.min_open > 5 {
        return invalid("classifier.min_folded/min_open must be in 1..=5".into());
    }
    let positive = [
        ("classifier.min_finger_length", c.min_finger_length),
        ("classifier.closeness", c.closeness),
        ("classifier.direction_min_length", c.direction_min_length),
        ("motion.threshold", p.motion.threshold),
        ("trail.min_spacing", p.trail.min_spacing),
        ("swarm.contracted_radius", p.swarm.contracted_radius),
        ("swarm.scatter_radius", p.swarm.scatter_radius),
        ("swarm.transition_secs", p.swarm.transition_secs),
        ("scene.scale_x", p.scene.scale_x),
        ("scene.scale_y", p.scene.scale_y),
    ];
    for (key, v) in positive {
        if !v.is_finite() || v <= 0.0 {
            return invalid(format!("{key} must be a positive number, got {v}"));
        }
    }
    let non_negative = [
        ("classifier.fold_margin", c.fold_margin),
        ("classifier.extend_margin", c.extend_margin),
        ("classifier.curl_margin", c.curl_margin),
        ("swarm.release_follow_delay_secs", p.swarm.release_follow_delay_secs),
        ("swarm.rotation_speed", p.swarm.rotation_speed),
        ("swarm.jitter_floor", p.swarm.jitter_floor),
        ("swarm.jitter_range", p.swarm.jitter_range),
        ("swarm.float_amplitude", p.swarm.float_amplitude),
        ("swarm.follow_rate", p.swarm.follow_rate),
        ("scene.scale_z", p.scene.scale_z),
    ];
    for (key, v) in non_negative {
        if !v.is_finite() || v < 0.0 {
            return invalid(format!("{key} must be >= 0, got {v}"));
        }
    }
    let unit = [
        ("classifier.depth_axis", c.depth_axis),
        ("classifier.vertical_axis", c.vertical_axis),
        ("classifier.horizontal_axis", c.horizontal_axis),
        ("swarm.settle_factor", p.swarm.settle_factor),
        ("swarm.contracted_lean", p.swarm.contracted_lean),
        ("scene.anchor_smoothing", p.scene.anchor_smoothing),
    ];
    for (key, v) in unit {
        if !(0.0..=1.0).contains(&v) {
            return invalid(format!("{key} must be in [0, 1], got {v}"));
        }
    }

    if p.motion.window < 2 {
        return invalid("motion.window must be at least 2 samples".into());
    }
    if p.trail.max_points < 2 || p.trail.max_age_ms == 0 {
        return invalid("trail.max_points must be >= 2 and trail.max_age_ms positive".into());
    }
    if p.swarm.count == 0 {
        return invalid("swarm.count must be positive".into());
    }
    if p.swarm.min_follow_points < 2 {
        return invalid("swarm.min_follow_points must be at least 2".into());
    }
    Ok(())
}
