//! Symbology tags and decode results
//!
//! `DecoderType` is the fixed enumeration every symbology-specific command is
//! addressed by. The numeric tags are the engine's ordinals and travel over the
//! wire unchanged.

use std::fmt::Display;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::image_data::ImageData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DecoderType {
    Aztec = 0,
    AztecCompact = 1,
    Qr = 2,
    QrMicro = 3,
    Code128 = 4,
    Code93 = 5,
    Code39 = 6,
    Codabar = 7,
    Code11 = 8,
    Msi = 9,
    UpcA = 10,
    UpcE = 11,
    UpcE1 = 12,
    Ean13 = 13,
    Ean8 = 14,
    Pdf417 = 15,
    Pdf417Micro = 16,
    Datamatrix = 17,
    Code25 = 18,
    Interleaved25 = 19,
    Itf14 = 20,
    Iata25 = 21,
    Matrix25 = 22,
    Datalogic25 = 23,
    Coop25 = 24,
    Code32 = 25,
    Telepen = 26,
    Dotcode = 27,
    IdDocument = 28,
    Databar14 = 29,
    DatabarLimited = 30,
    DatabarExpanded = 31,
    PostalImb = 32,
    Postnet = 33,
    Planet = 34,
    AustralianPost = 35,
    RoyalMail = 36,
    Kix = 37,
    JapanesePost = 38,
    MaxiCode = 39,
}

impl DecoderType {
    pub const ALL: [Self; 40] = [
        Self::Aztec,
        Self::AztecCompact,
        Self::Qr,
        Self::QrMicro,
        Self::Code128,
        Self::Code93,
        Self::Code39,
        Self::Codabar,
        Self::Code11,
        Self::Msi,
        Self::UpcA,
        Self::UpcE,
        Self::UpcE1,
        Self::Ean13,
        Self::Ean8,
        Self::Pdf417,
        Self::Pdf417Micro,
        Self::Datamatrix,
        Self::Code25,
        Self::Interleaved25,
        Self::Itf14,
        Self::Iata25,
        Self::Matrix25,
        Self::Datalogic25,
        Self::Coop25,
        Self::Code32,
        Self::Telepen,
        Self::Dotcode,
        Self::IdDocument,
        Self::Databar14,
        Self::DatabarLimited,
        Self::DatabarExpanded,
        Self::PostalImb,
        Self::Postnet,
        Self::Planet,
        Self::AustralianPost,
        Self::RoyalMail,
        Self::Kix,
        Self::JapanesePost,
        Self::MaxiCode,
    ];

    /// Wire tag
    pub fn tag(self) -> i64 {
        self as i64
    }
}

impl TryFrom<i64> for DecoderType {
    type Error = i64;

    fn try_from(tag: i64) -> Result<Self, Self::Error> {
        usize::try_from(tag)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or(tag)
    }
}

impl From<DecoderType> for i64 {
    fn from(value: DecoderType) -> Self {
        value.tag()
    }
}

impl Serialize for DecoderType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.tag())
    }
}

impl Display for DecoderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(crate::config::symbologies::descriptor(*self).name)
    }
}

/// Corner point in image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Symbology-specific crop attached to a result (document, signature, ...)
#[derive(Debug, Clone)]
pub struct NamedImage {
    pub name: String,
    pub image: ImageData,
}

/// One symbol match reported by the engine
#[derive(Debug, Clone)]
pub struct DecodeResult {
    pub barcode_type: DecoderType,
    pub barcode_type_name: String,
    pub binary_data: Vec<u8>,
    pub textual_data: String,
    pub character_set: String,

    /// Opaque, symbology-dependent metadata
    pub extra: Map<String, Value>,

    /// Four corners, when the engine computed them
    pub location: Option<[Point; 4]>,

    pub images: Vec<NamedImage>,
}

impl DecodeResult {
    /// Result with the mandatory fields set and everything optional empty
    pub fn new(barcode_type: DecoderType, binary_data: impl Into<Vec<u8>>) -> Self {
        let binary_data = binary_data.into();
        Self {
            barcode_type,
            barcode_type_name: barcode_type.to_string(),
            textual_data: String::from_utf8_lossy(&binary_data).into_owned(),
            binary_data,
            character_set: String::new(),
            extra: Map::new(),
            location: None,
            images: Vec::new(),
        }
    }
}

/// Everything one completed decode cycle produced
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub results: Vec<DecodeResult>,

    /// Per-result thumbnails, position-aligned with `results`
    pub thumbnails: Option<Vec<ImageData>>,

    pub frame_image: Option<ImageData>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_match_positions() {
        for (index, ty) in DecoderType::ALL.iter().enumerate() {
            assert_eq!(ty.tag(), index as i64);
            assert_eq!(DecoderType::try_from(index as i64), Ok(*ty));
        }
    }

    #[test]
    fn test_unknown_tags() {
        assert_eq!(DecoderType::try_from(40), Err(40));
        assert_eq!(DecoderType::try_from(-1), Err(-1));
    }

    #[test]
    fn test_new_result_defaults() {
        let result = DecodeResult::new(DecoderType::Code128, b"ABC-123".to_vec());
        assert_eq!(result.barcode_type_name, "Code 128");
        assert_eq!(result.textual_data, "ABC-123");
        assert!(result.extra.is_empty());
        assert!(result.location.is_none());
    }
}
