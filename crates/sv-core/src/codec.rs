//! Binary element-list codec (MessagePack).
//!
//! The minimal persistence format for a compiled path: just the element
//! list, encoded losslessly.

use crate::error::PathError;
use crate::model::PathElement;

pub fn encode_elements(elements: &[PathElement]) -> Result<Vec<u8>, PathError> {
    rmp_serde::to_vec(elements).map_err(|e| PathError::Codec(e.to_string()))
}

pub fn decode_elements(bytes: &[u8]) -> Result<Vec<PathElement>, PathError> {
    rmp_serde::from_slice(bytes).map_err(|e| PathError::Codec(e.to_string()))
}
