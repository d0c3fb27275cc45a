//! Access-control configuration.
//!
//! Selects the permission parsing mode and where the static menu comes from.
//! Configuration is loaded from environment variables with defaults suited to
//! local development.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use recruit_rbac::{AccessError, ParseMode, Role};

use crate::evaluator::AccessEvaluator;
use crate::menu::{default_menus_for, menu_from_json, validate_menu, MenuNode, MenuShape};
use crate::session::SessionContext;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },

    /// Menu file could not be read.
    #[error("Failed to read menu file {}: {}", .path.display(), .source)]
    Io {
        /// Path of the menu file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Menu file is not a valid menu tree.
    #[error("Failed to parse menu file {}: {}", .path.display(), .source)]
    Json {
        /// Path of the menu file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Menu validation or evaluator wiring failed.
    #[error(transparent)]
    Access(#[from] AccessError),
}

/// Access-control configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessConfig {
    /// How permission strings are parsed at check time.
    pub mode: ParseMode,

    /// JSON menu file; the stock admin navigation is used when unset.
    pub menu_path: Option<PathBuf>,

    /// Field names used by the menu file.
    pub shape: MenuShape,
}

impl Default for AccessConfig {
    /// Returns lenient parsing with the built-in menu.
    fn default() -> Self {
        Self {
            mode: ParseMode::Lenient,
            menu_path: None,
            shape: MenuShape::default(),
        }
    }
}

impl AccessConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `RECRUIT_ACL_STRICT`: Fail closed on malformed permissions (default: false)
    /// - `RECRUIT_MENU_PATH`: JSON menu file (default: built-in menu)
    /// - `RECRUIT_MENU_PATH_KEY`: Route field name in the menu file (default: href)
    /// - `RECRUIT_MENU_PERMISSION_KEY`: Permission field name (default: permission)
    /// - `RECRUIT_MENU_CHILDREN_KEY`: Children field name (default: children)
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            mode: std::env::var("RECRUIT_ACL_STRICT")
                .map(|s| {
                    if s == "true" || s == "1" {
                        ParseMode::Strict
                    } else {
                        ParseMode::Lenient
                    }
                })
                .unwrap_or(default.mode),
            menu_path: std::env::var("RECRUIT_MENU_PATH").ok().map(PathBuf::from),
            shape: MenuShape {
                path: std::env::var("RECRUIT_MENU_PATH_KEY").unwrap_or(default.shape.path),
                permission: std::env::var("RECRUIT_MENU_PERMISSION_KEY")
                    .unwrap_or(default.shape.permission),
                children: std::env::var("RECRUIT_MENU_CHILDREN_KEY")
                    .unwrap_or(default.shape.children),
            },
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let keys = [
            ("RECRUIT_MENU_PATH_KEY", &self.shape.path),
            ("RECRUIT_MENU_PERMISSION_KEY", &self.shape.permission),
            ("RECRUIT_MENU_CHILDREN_KEY", &self.shape.children),
        ];
        for (key, value) in keys {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "field name must not be empty".to_string(),
                });
            }
        }

        if self.shape.path == self.shape.permission
            || self.shape.path == self.shape.children
            || self.shape.permission == self.shape.children
        {
            return Err(ConfigError::InvalidValue {
                key: "menu shape".to_string(),
                message: "field names must be distinct".to_string(),
            });
        }
        Ok(())
    }

    /// Load the static menu.
    ///
    /// In strict mode every permission string is validated here, so bad menu
    /// configuration fails at startup instead of at check time.
    pub fn load_menu(&self) -> Result<Vec<MenuNode>, ConfigError> {
        let menu = match &self.menu_path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.clone(),
                    source,
                })?;
                let value: serde_json::Value =
                    serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
                        path: path.clone(),
                        source,
                    })?;
                menu_from_json(value, &self.shape).map_err(|source| ConfigError::Json {
                    path: path.clone(),
                    source,
                })?
            }
            None => default_menus_for(Role::Admin),
        };

        if self.mode == ParseMode::Strict {
            validate_menu(&menu)?;
        }

        info!(
            source = ?self.menu_path,
            entries = menu.len(),
            mode = ?self.mode,
            "Loaded static menu"
        );
        Ok(menu)
    }

    /// Build an evaluator for a session using this configuration's menu and mode.
    pub fn evaluator(
        &self,
        session: Option<&SessionContext>,
        static_menu: &Arc<[MenuNode]>,
    ) -> Result<AccessEvaluator, ConfigError> {
        let access = AccessEvaluator::from_session(session, Arc::clone(static_menu))?;
        Ok(access.with_mode(self.mode))
    }
}
