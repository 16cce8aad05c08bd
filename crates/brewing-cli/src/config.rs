//! Brewer configuration.
//!
//! Holds the brewer's scoring mode, proficiency, equipment, dice seed, and
//! where the pantry data lives. Loaded from and saved to a TOML file.

use brewing_engine::{Character, Equipment, ResolutionMode, DEFAULT_NULLIFIER_ID};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuration file name.
pub const CONFIG_FILE: &str = "brew.toml";

/// Equipment id used for the configured ad-hoc bonus.
const CONFIGURED_KIT_ID: &str = "configured-kit";

/// Brewer configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrewConfig {
    // === Brewer ===
    /// Character name shown in brew logs
    pub character_name: String,
    /// Scoring mode for brew attempts
    pub mode: ResolutionMode,
    /// Proficient with alchemy tools
    pub proficient: bool,
    /// Proficiency bonus applied when proficient
    pub proficiency_bonus: i32,

    // === Equipment ===
    /// Equipment id from the pantry's equipment list (None = use `equipment_bonus`)
    pub equipment: Option<String>,
    /// Flat equipment bonus when no equipment id is set
    pub equipment_bonus: i32,

    // === Dice ===
    /// Dice seed (None = random)
    pub seed: Option<u64>,

    // === Pantry ===
    /// Ingredient id that nullifies impurities
    pub nullifier: String,
    /// Directory holding the pantry JSON files
    pub data_dir: PathBuf,
}

impl Default for BrewConfig {
    fn default() -> Self {
        Self {
            character_name: "Brewer".to_string(),
            mode: ResolutionMode::Percentage,
            proficient: false,
            proficiency_bonus: 2,

            equipment: None,
            equipment_bonus: 0,

            seed: None,

            nullifier: DEFAULT_NULLIFIER_ID.to_string(),
            data_dir: PathBuf::from("pantry"),
        }
    }
}

impl BrewConfig {
    /// Load configuration from the default file location.
    /// Returns default config if file doesn't exist.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(CONFIG_FILE)
    }

    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        match fs::File::open(path) {
            Ok(mut file) => {
                let mut contents = String::new();
                if let Err(e) = file.read_to_string(&mut contents) {
                    warn!("Failed to read config file: {e}");
                    return Self::default();
                }

                match toml::from_str::<Self>(&contents) {
                    Ok(mut config) => {
                        config.validate();
                        info!("Loaded config from {}", path.display());
                        config
                    },
                    Err(e) => {
                        warn!("Failed to parse config file: {e}");
                        Self::default()
                    },
                }
            },
            Err(e) => {
                warn!("Failed to open config file: {e}");
                Self::default()
            },
        }
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut file = fs::File::create(path)?;
        file.write_all(contents.as_bytes())?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        self.proficiency_bonus = self.proficiency_bonus.clamp(0, 10);
        self.equipment_bonus = self.equipment_bonus.clamp(-10, 10);

        if self.nullifier.trim().is_empty() {
            self.nullifier = DEFAULT_NULLIFIER_ID.to_string();
        }
    }

    /// Builds the brewing character, resolving equipment against the pantry list.
    ///
    /// An equipment id missing from the list falls back to the flat bonus.
    #[must_use]
    pub fn character(&self, equipment: &[Equipment]) -> Character {
        let kit = match &self.equipment {
            Some(id) => {
                let found = equipment.iter().find(|e| e.id.as_str() == id).cloned();
                if found.is_none() {
                    warn!("Equipment {id} not in pantry, using flat bonus");
                }
                found
            },
            None => None,
        }
        .unwrap_or_else(|| Equipment::new(CONFIGURED_KIT_ID, "Brewing Kit", self.equipment_bonus));

        let mut character = Character::new(&self.character_name)
            .with_equipment(kit)
            .with_mode(self.mode);
        if self.proficient {
            character = character.with_proficiency(self.proficiency_bonus);
        }
        character
    }
}
