//! Conversation flow configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::conversation::SEE_MORE;

use super::error::ValidationError;

/// Largest page that keeps item numbers clear of the paging options.
pub const MAX_PAGE_SIZE: u32 = (SEE_MORE - 1) as u32;

const MAX_MENU_DELAY_MS: u64 = 60_000;

/// Where the main menu entries come from.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MenuSource {
    #[default]
    Builtin,
    Database,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConversationConfig {
    /// Items per category page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Pause between the welcome and the main menu
    #[serde(default = "default_main_menu_delay")]
    pub main_menu_delay_ms: u64,

    /// Start over after this much silence; unset keeps sessions forever
    #[serde(default)]
    pub idle_timeout_secs: Option<u64>,

    /// Directory of collector JSON files for the in-memory item repository
    #[serde(default)]
    pub items_dir: Option<PathBuf>,

    #[serde(default)]
    pub menu_source: MenuSource,
}

impl ConversationConfig {
    pub fn main_menu_delay(&self) -> Duration {
        Duration::from_millis(self.main_menu_delay_ms)
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout_secs.map(Duration::from_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ValidationError::InvalidPageSize {
                max: MAX_PAGE_SIZE,
                actual: self.page_size,
            });
        }
        if self.main_menu_delay_ms > MAX_MENU_DELAY_MS {
            return Err(ValidationError::InvalidMenuDelay {
                max_ms: MAX_MENU_DELAY_MS,
            });
        }
        if self.idle_timeout_secs == Some(0) {
            return Err(ValidationError::InvalidIdleTimeout);
        }
        Ok(())
    }
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            main_menu_delay_ms: default_main_menu_delay(),
            idle_timeout_secs: None,
            items_dir: None,
            menu_source: MenuSource::default(),
        }
    }
}

fn default_page_size() -> u32 {
    5
}

fn default_main_menu_delay() -> u64 {
    1500
}
