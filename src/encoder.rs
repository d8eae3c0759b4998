//! Scan outcome encoding
//!
//! Turns a [`ScanOutcome`] into the JSON text pushed on the scan results
//! stream. The multi-result message is the canonical form:
//!
//! ```json
//! {
//!   "decoderResults": [
//!     {
//!       "barcodeType": 4,
//!       "barcodeTypeName": "Code 128",
//!       "binaryDataAsBase64": "QUJD",
//!       "textualData": "ABC",
//!       "characterSet": "",
//!       "extra": "{\"checksum\":\"ok\"}",
//!       "locationPoints": [{"x": 1.0, "y": 2.0}, ...],
//!       "images": [{"name": "document", "base64": "iVBORw0..."}]
//!     }
//!   ],
//!   "resultThumbnailsAsBase64": ["iVBORw0..."],
//!   "resultImageAsBase64": "iVBORw0..."
//! }
//! ```
//!
//! The legacy message reports only the first result, flattened to the top
//! level, with a single `resultThumbnailAsBase64`.
//!
//! Optional parts are best-effort: an image that fails to encode is logged
//! and left out, except a thumbnail, which becomes `null` so the list stays
//! aligned with `decoderResults`. Only a failure to build the message as a
//! whole is an error.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::warn;
use serde::Serialize;
use thiserror::Error;

use crate::image_data::ImageData;
use crate::symbol::{DecodeResult, DecoderType, Point, ScanOutcome};

/// Sub-image names that are forwarded; anything else is dropped
pub const SUB_IMAGE_NAMES: [&str; 4] = ["main", "document", "signature", "picture"];

/// Shape of the messages pushed on the scan results stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WireFormat {
    #[default]
    MultiResult,
    /// First result only, for consumers of the single-result message
    Legacy,
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("scan outcome has no results")]
    NoResults,

    #[error("serializing scan outcome: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResultEntry<'a> {
    barcode_type: DecoderType,
    barcode_type_name: &'a str,
    binary_data_as_base64: String,
    textual_data: &'a str,
    character_set: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    extra: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    location_points: Option<&'a [Point; 4]>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    images: Vec<EncodedImage<'a>>,
}

#[derive(Serialize)]
struct EncodedImage<'a> {
    name: &'a str,
    base64: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MultiResultMessage<'a> {
    decoder_results: Vec<ResultEntry<'a>>,
    result_thumbnails_as_base64: Vec<Option<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    result_image_as_base64: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LegacyMessage<'a> {
    #[serde(flatten)]
    result: ResultEntry<'a>,

    #[serde(skip_serializing_if = "Option::is_none")]
    result_image_as_base64: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    result_thumbnail_as_base64: Option<String>,
}

/// PNG-encode then base64-encode, or log and skip
fn png_base64(image: &ImageData, what: &str) -> Option<String> {
    match image.to_png() {
        Ok(png) => Some(STANDARD.encode(png)),
        Err(e) => {
            warn!("Dropping {what}: {e}");
            None
        }
    }
}

impl<'a> ResultEntry<'a> {
    /// Fields every message form carries
    fn core(result: &'a DecodeResult) -> Self {
        let extra = if result.extra.is_empty() {
            None
        } else {
            serde_json::to_string(&result.extra)
                .map_err(|e| warn!("Dropping extra metadata: {e}"))
                .ok()
        };

        Self {
            barcode_type: result.barcode_type,
            barcode_type_name: &result.barcode_type_name,
            binary_data_as_base64: STANDARD.encode(&result.binary_data),
            textual_data: &result.textual_data,
            character_set: &result.character_set,
            extra,
            location_points: None,
            images: Vec::new(),
        }
    }

    fn full(result: &'a DecodeResult) -> Self {
        let images = result
            .images
            .iter()
            .filter(|named| SUB_IMAGE_NAMES.contains(&named.name.as_str()))
            .filter_map(|named| {
                png_base64(&named.image, &format!("{} image", named.name)).map(|base64| {
                    EncodedImage {
                        name: &named.name,
                        base64,
                    }
                })
            })
            .collect();

        Self {
            location_points: result.location.as_ref(),
            images,
            ..Self::core(result)
        }
    }
}

/// Encode the canonical multi-result message
pub fn encode(outcome: &ScanOutcome) -> Result<String, EncodeError> {
    // Failed slots stay as null so thumbnails keep lining up with results
    let thumbnails = outcome
        .thumbnails
        .iter()
        .flatten()
        .enumerate()
        .map(|(i, thumbnail)| png_base64(thumbnail, &format!("thumbnail {i}")))
        .collect();

    let message = MultiResultMessage {
        decoder_results: outcome.results.iter().map(ResultEntry::full).collect(),
        result_thumbnails_as_base64: thumbnails,
        result_image_as_base64: outcome
            .frame_image
            .as_ref()
            .and_then(|image| png_base64(image, "frame image")),
    };

    Ok(serde_json::to_string(&message)?)
}

/// Encode the legacy single-result message
///
/// Fails with [`EncodeError::NoResults`] on an empty outcome, since the
/// legacy form has no way to express it.
pub fn encode_legacy(outcome: &ScanOutcome) -> Result<String, EncodeError> {
    let first = outcome.results.first().ok_or(EncodeError::NoResults)?;

    let message = LegacyMessage {
        result: ResultEntry::core(first),
        result_image_as_base64: outcome
            .frame_image
            .as_ref()
            .and_then(|image| png_base64(image, "frame image")),
        result_thumbnail_as_base64: outcome
            .thumbnails
            .as_ref()
            .and_then(|thumbnails| thumbnails.first())
            .and_then(|thumbnail| png_base64(thumbnail, "thumbnail")),
    };

    Ok(serde_json::to_string(&message)?)
}

pub fn encode_as(outcome: &ScanOutcome, format: WireFormat) -> Result<String, EncodeError> {
    match format {
        WireFormat::MultiResult => encode(outcome),
        WireFormat::Legacy => encode_legacy(outcome),
    }
}
