//! Simulation configuration resource.
//!
//! Settings for the headless pool demo, loaded from an INI file. Missing
//! keys keep their defaults, so an empty or partial file is valid.
//!
//! # Configuration File Format
//!
//! ```ini
//! [simulation]
//! frames = 3600
//! delta = 0.016666
//! time_scale = 1.0
//! seed = 42
//!
//! [pool]
//! capacity = 32
//! spawn_interval = 0.25
//! launch_speed = 4.0
//! templates = ./assets/templates.json
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_FRAMES: u64 = 3600;
const DEFAULT_DELTA: f32 = 1.0 / 60.0;
const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_SEED: u64 = 42;
const DEFAULT_CAPACITY: usize = 32;
const DEFAULT_SPAWN_INTERVAL: f32 = 0.25;
const DEFAULT_LAUNCH_SPEED: f32 = 4.0;
const DEFAULT_TEMPLATES_PATH: &str = "./assets/templates.json";
const DEFAULT_CONFIG_PATH: &str = "./assets/config.ini";

/// Simulation configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Number of frames to simulate.
    pub frames: u64,
    /// Fixed frame delta in seconds, before time scaling.
    pub delta: f32,
    pub time_scale: f32,
    pub seed: u64,
    /// Maximum number of pooled entities.
    pub capacity: usize,
    /// Seconds between two spawns.
    pub spawn_interval: f32,
    /// Upper bound of the random launch speed.
    pub launch_speed: f32,
    pub templates_path: PathBuf,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SimConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            frames: DEFAULT_FRAMES,
            delta: DEFAULT_DELTA,
            time_scale: DEFAULT_TIME_SCALE,
            seed: DEFAULT_SEED,
            capacity: DEFAULT_CAPACITY,
            spawn_interval: DEFAULT_SPAWN_INTERVAL,
            launch_speed: DEFAULT_LAUNCH_SPEED,
            templates_path: PathBuf::from(DEFAULT_TEMPLATES_PATH),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config)
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config)
    }

    fn apply(&mut self, config: &Ini) -> Result<(), String> {
        // [simulation] section
        if let Some(frames) = config.getuint("simulation", "frames")? {
            self.frames = frames;
        }
        if let Some(delta) = config.getfloat("simulation", "delta")? {
            self.delta = delta as f32;
        }
        if let Some(scale) = config.getfloat("simulation", "time_scale")? {
            self.time_scale = scale as f32;
        }
        if let Some(seed) = config.getuint("simulation", "seed")? {
            self.seed = seed;
        }

        // [pool] section
        if let Some(capacity) = config.getuint("pool", "capacity")? {
            self.capacity = capacity as usize;
        }
        if let Some(interval) = config.getfloat("pool", "spawn_interval")? {
            self.spawn_interval = interval as f32;
        }
        if let Some(speed) = config.getfloat("pool", "launch_speed")? {
            self.launch_speed = speed as f32;
        }
        if let Some(path) = config.get("pool", "templates") {
            self.templates_path = PathBuf::from(path);
        }

        if self.delta <= 0.0 {
            return Err(format!("simulation.delta must be positive, got {}", self.delta));
        }

        info!(
            "Loaded config: {} frames at {:.4}s (x{}), seed={}, pool={} every {}s",
            self.frames,
            self.delta,
            self.time_scale,
            self.seed,
            self.capacity,
            self.spawn_interval
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [simulation] section
        config.set("simulation", "frames", Some(self.frames.to_string()));
        config.set("simulation", "delta", Some(self.delta.to_string()));
        config.set("simulation", "time_scale", Some(self.time_scale.to_string()));
        config.set("simulation", "seed", Some(self.seed.to_string()));

        // [pool] section
        config.set("pool", "capacity", Some(self.capacity.to_string()));
        config.set("pool", "spawn_interval", Some(self.spawn_interval.to_string()));
        config.set("pool", "launch_speed", Some(self.launch_speed.to_string()));
        config.set(
            "pool",
            "templates",
            Some(self.templates_path.to_string_lossy().into_owned()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}
