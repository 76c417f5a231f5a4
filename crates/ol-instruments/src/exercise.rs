//! Option exercise styles.
//!
//! An `ExerciseStyle` defines *when* an option can be exercised.

use std::fmt;

/// Type of exercise right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ExerciseStyle {
    /// Can only be exercised at expiry.
    #[default]
    European,
    /// Can be exercised at any time up to expiry.
    American,
}

impl ExerciseStyle {
    /// Name used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            ExerciseStyle::European => "European",
            ExerciseStyle::American => "American",
        }
    }
}

impl fmt::Display for ExerciseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
