//! Decoder configuration types
//!
//! The decoder has almost nothing to configure: entry payloads are opaque and
//! every structural inconsistency is fatal. The one policy knob is whether the
//! header's declared total length is checked against what was decoded.

use serde::{Deserialize, Serialize};

/// How the header's `total_length` field is treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TotalLengthCheck {
    /// Parse the field and otherwise ignore it
    #[default]
    Ignore,
    /// Reject containers whose consumed length differs from the declared one
    Enforce,
}

/// Configuration for the decoder library
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Total-length policy (default: ignore, matching files seen in the wild)
    #[serde(default)]
    pub total_length_check: TotalLengthCheck,
}

impl DecoderConfig {
    /// Create a new decoder configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the total-length policy
    pub fn with_total_length_check(mut self, check: TotalLengthCheck) -> Self {
        self.total_length_check = check;
        self
    }

    /// Builder method: enforce or ignore the header's total length
    pub fn with_strict_length(self, strict: bool) -> Self {
        self.with_total_length_check(if strict {
            TotalLengthCheck::Enforce
        } else {
            TotalLengthCheck::Ignore
        })
    }

    /// True if a total-length mismatch is an error
    pub fn enforces_total_length(&self) -> bool {
        self.total_length_check == TotalLengthCheck::Enforce
    }
}
