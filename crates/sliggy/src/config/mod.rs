//! Configuration system
//!
//! `Config` gives any serde type file loading in TOML or RON, chosen by the
//! file extension. `UIConfig` is the context configuration used by
//! [`UIContext::init`](crate::ui::UIContext::init).

pub use serde::{Serialize, Deserialize};

use crate::registry::GrowthPolicy;
use crate::ui::InitFlags;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        Self::from_str_with_format(&contents, path)
    }

    /// Parse configuration text, picking the format from `path`'s extension
    fn from_str_with_format(contents: &str, path: &str) -> Result<Self, ConfigError> {
        if path.ends_with(".toml") {
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Initial slot count of every registry
pub const DEFAULT_REGISTRY_CAPACITY: usize = 32;

/// Text objects accepted per element
pub const DEFAULT_MAX_TEXT_OBJECTS: usize = 16;

/// # UI Context Configuration
///
/// Screen size used to resolve relative placements, the memory management
/// mode, and registry sizing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UIConfig {
    /// Screen width in pixels
    pub screen_width: u32,
    /// Screen height in pixels
    pub screen_height: u32,
    /// Store created elements in the context registry
    pub manage_memory: bool,
    /// Initial slot count of the element registry
    pub registry_capacity: usize,
    /// Initial slot count of each element's text object registry
    pub text_registry_capacity: usize,
    /// Maximum number of text objects on one element
    pub max_text_objects: usize,
    /// What registries do with existing records when they grow
    pub growth_policy: GrowthPolicy,
}

impl UIConfig {
    /// Create a configuration for the given screen size
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        Self {
            screen_width,
            screen_height,
            ..Self::default()
        }
    }

    /// Set the memory management mode
    pub fn with_manage_memory(mut self, manage: bool) -> Self {
        self.manage_memory = manage;
        self
    }

    /// Set the initial registry capacities
    pub fn with_registry_capacity(mut self, elements: usize, text_objects: usize) -> Self {
        self.registry_capacity = elements;
        self.text_registry_capacity = text_objects;
        self
    }

    /// Set the per-element text object limit
    pub fn with_max_text_objects(mut self, max: usize) -> Self {
        self.max_text_objects = max;
        self
    }

    /// Set the registry growth policy
    pub fn with_growth_policy(mut self, policy: GrowthPolicy) -> Self {
        self.growth_policy = policy;
        self
    }

    /// Init flags equivalent to this configuration
    pub fn flags(&self) -> InitFlags {
        if self.manage_memory {
            InitFlags::MANAGE_MEMORY
        } else {
            InitFlags::empty()
        }
    }
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            screen_width: 720,
            screen_height: 480,
            manage_memory: true,
            registry_capacity: DEFAULT_REGISTRY_CAPACITY,
            text_registry_capacity: DEFAULT_REGISTRY_CAPACITY,
            max_text_objects: DEFAULT_MAX_TEXT_OBJECTS,
            growth_policy: GrowthPolicy::Legacy,
        }
    }
}

impl Config for UIConfig {}
