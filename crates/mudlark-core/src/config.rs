//! Options controlling how a record batch is loaded and resolved.
//!
//! ```
//! use mudlark_core::config::LoadOptions;
//!
//! let options: LoadOptions = serde_json::from_str(r#"{ "require_mutual_exits": true }"#).unwrap();
//! assert!(options.require_mutual_exits);
//! assert_eq!(options.room_limit(), 255);
//! ```

use crate::room::NO_EXIT;
use serde::{Deserialize, Serialize};

/// Highest number of rooms a batch can address: ids are `u8` and
/// [`NO_EXIT`] is reserved.
pub const MAX_ROOMS: usize = NO_EXIT as usize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Reject batches with more rooms than this (never above [`MAX_ROOMS`]).
    pub max_rooms: usize,
    /// Allow the same mob or item to be placed in several rooms.
    pub allow_shared_occupants: bool,
    /// Treat an exit without a matching way back as a resolution error
    /// instead of a warning.
    pub require_mutual_exits: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            max_rooms: MAX_ROOMS,
            allow_shared_occupants: false,
            require_mutual_exits: false,
        }
    }
}

impl LoadOptions {
    pub fn strict() -> Self {
        Self {
            require_mutual_exits: true,
            ..Default::default()
        }
    }

    /// `max_rooms`, clamped to what the id encoding can address.
    pub fn room_limit(&self) -> usize {
        self.max_rooms.min(MAX_ROOMS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let options: LoadOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, LoadOptions::default());
    }

    #[test]
    fn test_room_limit_is_clamped() {
        let options = LoadOptions {
            max_rooms: 10_000,
            ..Default::default()
        };
        assert_eq!(options.room_limit(), MAX_ROOMS);

        let options = LoadOptions {
            max_rooms: 8,
            ..Default::default()
        };
        assert_eq!(options.room_limit(), 8);
    }
}
