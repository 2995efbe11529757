//! Per-player input intent

use serde::{Deserialize, Serialize};

use crate::foundation::logging::debug;

/// Buttons a client reports as held
///
/// Missing fields read as "not held", so an empty `()` payload is valid and
/// means no input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputIntent {
    /// Move left
    pub left: bool,
    /// Move right
    pub right: bool,
    /// Jump button (the `up` key in the browser client)
    #[serde(alias = "up")]
    pub jump: bool,
}

impl InputIntent {
    /// Parse a RON payload, treating anything malformed as no input
    pub fn parse_lenient(payload: &str) -> Self {
        match ron::from_str(payload) {
            Ok(intent) => intent,
            Err(err) => {
                debug!("Ignoring malformed input payload: {err}");
                Self::default()
            }
        }
    }

    /// Horizontal direction: -1, 0 or 1; left wins when both are held
    pub fn direction(&self) -> f64 {
        if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        }
    }
}
