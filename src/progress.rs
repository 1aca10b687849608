use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// The only thing that survives between runs: whether the hunt was started
/// and which clue the player is on.
/// Stored under the progress key as `{"started":true,"index":2}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedProgress {
    pub started: bool,
    #[serde(deserialize_with = "saturating_index")]
    pub index: usize,
}

/// Any non-negative integer is a valid index. Values past `usize` (which
/// serde_json hands over as floats) saturate, and the resume clamp brings
/// them back in range.
fn saturating_index<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    let n = serde_json::Number::deserialize(deserializer)?;
    if let Some(v) = n.as_u64() {
        return Ok(usize::try_from(v).unwrap_or(usize::MAX));
    }
    match n.as_f64() {
        Some(v) if v >= u64::MAX as f64 => Ok(usize::MAX),
        _ => Err(de::Error::custom(format!(
            "index must be a non-negative integer, got {n}"
        ))),
    }
}

impl SavedProgress {
    /// Parse a stored record. Anything that isn't an object with a boolean
    /// `started` and a non-negative integer `index` yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    pub fn to_json(self) -> serde_json::Result<String> {
        serde_json::to_string(&self)
    }
}
