//! Category Encoding
//!
//! Maps disaster-type and location labels to the integer codes the models were
//! trained with. Unknown labels degrade to [`FALLBACK_CODE`] instead of failing
//! the request.

use thiserror::Error;

/// Code substituted for labels that were not seen during training
pub const FALLBACK_CODE: u32 = 0;

// ============================================================================
// CODEC
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("unknown category: {0:?}")]
    UnknownCategory(String),
}

/// Bidirectional label <-> code mapping fitted during training
pub trait CategoryCodec: Send + Sync {
    fn encode(&self, label: &str) -> Result<u32, EncodeError>;
    fn classes(&self) -> &[String];
}

/// Sorted-vocabulary codec: the code of a label is its index in sorted order.
#[derive(Debug, Clone, Default)]
pub struct LabelCodec {
    classes: Vec<String>,
}

impl LabelCodec {
    pub fn new(classes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut classes: Vec<String> = classes.into_iter().map(Into::into).collect();
        classes.sort();
        classes.dedup();
        Self { classes }
    }

}

impl CategoryCodec for LabelCodec {
    fn encode(&self, label: &str) -> Result<u32, EncodeError> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(label))
            .map(|i| i as u32)
            .map_err(|_| EncodeError::UnknownCategory(label.to_string()))
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }
}

// ============================================================================
// ENCODER
// ============================================================================

/// Encoded categorical columns of one scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryCodes {
    pub disaster: u32,
    pub location: u32,
}

/// Encodes both categorical columns, absorbing unknown labels
pub struct CategoryEncoder {
    disaster: Box<dyn CategoryCodec>,
    location: Box<dyn CategoryCodec>,
}

impl CategoryEncoder {
    pub fn new(disaster: Box<dyn CategoryCodec>, location: Box<dyn CategoryCodec>) -> Self {
        Self { disaster, location }
    }

    pub fn encode(&self, disaster_type: &str, location: &str) -> CategoryCodes {
        CategoryCodes {
            disaster: encode_or_fallback(self.disaster.as_ref(), "disaster_type", disaster_type),
            location: encode_or_fallback(self.location.as_ref(), "location", location),
        }
    }

    pub fn disaster_types(&self) -> &[String] {
        self.disaster.classes()
    }

    pub fn locations(&self) -> &[String] {
        self.location.classes()
    }
}

fn encode_or_fallback(codec: &dyn CategoryCodec, column: &str, label: &str) -> u32 {
    match codec.encode(label) {
        Ok(code) => code,
        Err(e) => {
            tracing::warn!("{} {}, using fallback code {}", column, e, FALLBACK_CODE);
            FALLBACK_CODE
        }
    }
}
