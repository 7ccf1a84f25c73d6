//! Engine configuration.
//!
//! Loop, match and output settings plus the full balance tables. Loaded from
//! `rkena.toml` (or a path on the command line); every field has a default so
//! partial files work.

use rkena_common::{ConfigError, RkenaError, RkenaResult};
use rkena_gameplay::tuning::{AiTuning, CombatTuning};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Configuration file name.
pub const CONFIG_FILE: &str = "rkena.toml";

/// Where the human fighter's input comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// A second AI controller drives the human fighter.
    #[default]
    Autopilot,
    /// The human fighter never presses anything.
    Idle,
}

/// Engine configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Loop Settings ===
    /// Rendered frames per second
    pub target_fps: u32,
    /// Sleep to hold `target_fps`; otherwise run flat out on a synthetic clock
    pub realtime: bool,
    /// Hard cap on frames per match
    pub max_frames: u64,

    // === Match Settings ===
    /// Number of back-to-back matches
    pub matches: u32,
    /// Match seed (None = random)
    pub seed: Option<u64>,
    /// Human fighter input source
    pub input: InputMode,

    // === Output Settings ===
    /// Log a HUD line every N frames (0 = never)
    pub hud_interval_frames: u32,
    /// Print the run summary as JSON on exit
    pub print_summary: bool,

    // === Balance ===
    /// Fighter and round tuning
    pub combat: CombatTuning,
    /// Opponent behavior tuning
    pub ai: AiTuning,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            // Loop
            target_fps: 60,
            realtime: false,
            max_frames: 20_000,

            // Match
            matches: 1,
            seed: None,
            input: InputMode::Autopilot,

            // Output
            hud_interval_frames: 600,
            print_summary: true,

            // Balance
            combat: CombatTuning::default(),
            ai: AiTuning::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file {} not found, using defaults", path.display());
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded config from {}", path.display());
                    config
                },
                Err(e) => {
                    warn!("Failed to parse config file: {e}");
                    Self::default()
                },
            },
            Err(e) => {
                warn!("Failed to read config file: {e}");
                Self::default()
            },
        }
    }

    /// Parse configuration text, surfacing errors instead of falling back.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed TOML.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> RkenaResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents =
            toml::to_string_pretty(self).map_err(|e| RkenaError::Serialization(e.to_string()))?;
        fs::write(path, contents)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Clamp loop and output settings to sensible ranges, then check the
    /// balance tables.
    ///
    /// # Errors
    /// Returns the first balance value that breaks a structural rule.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        // Loop
        self.target_fps = self.target_fps.clamp(30, 240);
        self.max_frames = self.max_frames.max(1);

        // Match
        self.matches = self.matches.clamp(1, 1000);

        self.combat.validate()?;
        self.ai.validate(&self.combat)?;
        Ok(())
    }

    /// Seed for match one, drawing a random one when none is configured.
    #[must_use]
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| fastrand::u64(..))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.target_fps, 60);
        assert_eq!(config.matches, 1);
        assert_eq!(config.input, InputMode::Autopilot);
        assert_eq!(config.combat.round_seconds, 180);
    }

    #[test]
    fn test_config_validation_clamps() {
        let mut config = EngineConfig {
            target_fps: 5,
            matches: 0,
            max_frames: 0,
            ..EngineConfig::default()
        };
        config.validate().expect("balance is fine");
        assert_eq!(config.target_fps, 30);
        assert_eq!(config.matches, 1);
        assert_eq!(config.max_frames, 1);
    }

    #[test]
    fn test_config_validation_rejects_balance() {
        let mut config = EngineConfig::default();
        config.combat.kick.damage = 20.0;
        assert!(matches!(config.validate(), Err(ConfigError::Ordering(_))));
    }

    #[test]
    fn test_config_validation_rejects_nan() {
        let mut config = EngineConfig::from_toml_str(
            r#"
            [combat]
            fighter_width = nan
            "#,
        )
        .expect("toml accepts nan");
        assert!(config.combat.fighter_width.is_nan());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "fighter_width",
                ..
            })
        ));
    }

    #[test]
    fn test_config_save_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("rkena.toml");

        let mut config = EngineConfig::default();
        config.seed = Some(12345);
        config.input = InputMode::Idle;
        config.combat.round_seconds = 90;
        config.ai.decision_chance = 0.3;

        config.save_to(&config_path).expect("Failed to save config");

        let loaded = EngineConfig::load_from(&config_path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_load_missing_file() {
        let config = EngineConfig::load_from("/nonexistent/path/rkena.toml");
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_config_load_garbage_falls_back() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("rkena.toml");
        fs::write(&config_path, "target_fps = [not toml").expect("write");
        assert_eq!(EngineConfig::load_from(&config_path), EngineConfig::default());
    }

    #[test]
    fn test_partial_tables() {
        let config = EngineConfig::from_toml_str(
            r#"
            seed = 7
            input = "idle"

            [combat]
            round_seconds = 60

            [ai]
            sprawl_chance = 0.25
            "#,
        )
        .expect("parse");
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.input, InputMode::Idle);
        assert_eq!(config.combat.round_seconds, 60);
        assert_eq!(config.combat.max_health, 100.0);
        assert_eq!(config.ai.sprawl_chance, 0.25);
        assert_eq!(config.ai.decision_chance, 0.15);
    }

    #[test]
    fn test_parse_error_surfaces() {
        assert!(matches!(
            EngineConfig::from_toml_str("matches = \"many\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_fixed_seed_is_used() {
        let config = EngineConfig {
            seed: Some(99),
            ..EngineConfig::default()
        };
        assert_eq!(config.resolve_seed(), 99);
    }
}
