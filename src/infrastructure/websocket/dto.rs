use serde::{Deserialize, Serialize};

use crate::domain::{
    errors::{DecodeError, DecodeResult},
    stream::{Batch, Point},
};

/// Wire shape of one inbound frame: `{"points": [{"x": 1.0, "y": 2.0}, ...]}`.
/// Unknown fields are ignored; a missing `y` reads as `null`.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PointFrame {
    pub points: Vec<Point>,
}

impl PointFrame {
    /// Convert the DTO into a domain batch
    pub fn into_batch(self) -> DecodeResult<Batch> {
        Batch::new(self.points)
    }

    pub fn to_json(&self) -> DecodeResult<String> {
        serde_json::to_string(self).map_err(|e| DecodeError::Malformed(e.to_string()))
    }
}

impl From<&Batch> for PointFrame {
    fn from(batch: &Batch) -> Self {
        Self { points: batch.points().to_vec() }
    }
}

/// Parse a UTF-8 text frame into a batch.
///
/// A frame that is not JSON, or whose points have the wrong shape, is
/// `Malformed`; a JSON object without `points` is `MissingPoints`.
pub fn decode_frame(raw: &str) -> DecodeResult<Batch> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| DecodeError::Malformed(e.to_string()))?;

    if value.get("points").is_none() {
        return Err(DecodeError::MissingPoints);
    }

    let frame: PointFrame =
        serde_json::from_value(value).map_err(|e| DecodeError::Malformed(e.to_string()))?;
    frame.into_batch()
}

/// Binary frames are accepted when they carry UTF-8 JSON
pub fn decode_binary_frame(bytes: &[u8]) -> DecodeResult<Batch> {
    let raw = std::str::from_utf8(bytes).map_err(|_| DecodeError::NotUtf8)?;
    decode_frame(raw)
}
