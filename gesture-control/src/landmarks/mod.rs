//! Frame intake
//!
//! Landmark types, frame payload unwrapping and the provider boundary to the
//! hand-landmark model.

pub mod types;
pub mod payload;
pub mod provider;

pub use types::*;
pub use payload::{decode_payload, encode_data_url, split_data_url};
pub use provider::{JsonLandmarkProvider, LandmarkProvider};
