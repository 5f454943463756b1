use serde::{Deserialize, Serialize};

/// One grid line: pixel position, label text and the data value it marks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub position: f64,
    pub text: String,
    pub value: f64,
}

impl GridPoint {
    #[must_use]
    pub fn new(position: f64, text: impl Into<String>, value: f64) -> Self {
        Self {
            position,
            text: text.into(),
            value,
        }
    }

    /// Unlabelled point used for subdivisions.
    #[must_use]
    pub fn unlabelled(position: f64) -> Self {
        Self::new(position, String::new(), 0.0)
    }
}
