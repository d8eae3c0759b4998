//! Bulk configuration document
//!
//! `configureBarkoder` hands over a whole configuration as JSON. Color
//! values arrive as hex text and are rewritten to packed ARGB numbers before
//! the document is deserialized, at the top level and inside `arConfig`.
//!
//! Absorbing is all-or-nothing: the document is applied to a copy of the
//! live config through the same validating setters the single-field
//! commands use, and the copy replaces the live config only if every field
//! was accepted.
//!
//! ```
//! use barkoder_bridge::config::ScannerConfig;
//!
//! let mut config = ScannerConfig::new("key");
//! config
//!     .absorb_json(r##"{"roiLineColor": "#00FF00", "decoder": {"QR": {"enabled": false}}}"##)
//!     .unwrap();
//!
//! let before = config.clone();
//! assert!(config.absorb_json(r#"{"roiLineWidth": 2.0, "locationLineColor": "nope"}"#).is_err());
//! assert_eq!(config, before);
//! ```

use std::collections::BTreeMap;

use log::info;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::ar::{ArHeaderShowMode, ArLocationType, ArMode, ArOverlayRefresh};
use super::{symbologies, DecodingSpeed, Formatting, Region, Resolution, ScannerConfig};
use crate::color::{self, Color};
use crate::error::{Error, Result};

/// Keys whose values are colors, wherever they appear
pub const COLOR_KEYS: [&str; 8] = [
    "locationLineColor",
    "roiLineColor",
    "roiOverlayBackgroundColor",
    "scanningIndicatorColor",
    "selectedLocationColor",
    "nonSelectedLocationColor",
    "headerTextColorSelected",
    "headerTextColorNonSelected",
];

const AR_SECTION: &str = "arConfig";

/// Rewrite hex color text to packed ARGB numbers, in place
///
/// Numbers are accepted as already-packed colors, including the negative
/// form a signed 32-bit ARGB value takes.
pub fn normalize_colors(document: &mut Map<String, Value>) -> Result<()> {
    normalize_section(document)?;
    if let Some(Value::Object(ar)) = document.get_mut(AR_SECTION) {
        normalize_section(ar)?;
    }
    Ok(())
}

fn normalize_section(section: &mut Map<String, Value>) -> Result<()> {
    for key in COLOR_KEYS {
        let Some(value) = section.get_mut(key) else {
            continue;
        };

        let color = match value {
            Value::String(text) => {
                color::parse(text).map_err(|e| Error::ConfigNotValid(format!("{key}: {e}")))?
            }
            Value::Number(number) => number
                .as_i64()
                .and_then(packed_argb)
                .map(Color::from_argb)
                .ok_or_else(|| {
                    Error::ConfigNotValid(format!("{key}: {number} is not a 32-bit ARGB color"))
                })?,
            other => {
                return Err(Error::ConfigNotValid(format!(
                    "{key}: expected hex color text, got {other}"
                )))
            }
        };

        *value = Value::from(color.to_argb());
    }
    Ok(())
}

fn packed_argb(value: i64) -> Option<u32> {
    u32::try_from(value)
        .ok()
        .or_else(|| i32::try_from(value).ok().map(|v| v as u32))
}

impl ScannerConfig {
    /// Replace every field the document names, atomically
    pub fn absorb_json(&mut self, json: &str) -> Result<()> {
        let mut document: Map<String, Value> =
            serde_json::from_str(json).map_err(|e| Error::ConfigNotValid(e.to_string()))?;
        normalize_colors(&mut document)?;

        let document: ConfigDocument = serde_json::from_value(Value::Object(document))
            .map_err(|e| Error::ConfigNotValid(e.to_string()))?;

        let mut staged = self.clone();
        document.apply(&mut staged).map_err(|e| match e {
            Error::ConfigNotValid(_) => e,
            other => Error::ConfigNotValid(other.to_string()),
        })?;
        *self = staged;

        info!("Absorbed config document");
        Ok(())
    }
}

// ============================================================================
// Document model
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigDocument {
    location_line_color: Option<u32>,
    location_line_width: Option<f32>,
    roi_line_color: Option<u32>,
    roi_line_width: Option<f32>,
    roi_overlay_background_color: Option<u32>,
    region_of_interest: Option<Region>,
    region_of_interest_visible: Option<bool>,

    close_session_on_result_enabled: Option<bool>,
    image_result_enabled: Option<bool>,
    location_in_image_result_enabled: Option<bool>,
    location_in_preview_enabled: Option<bool>,
    pinch_to_zoom_enabled: Option<bool>,
    beep_on_success_enabled: Option<bool>,
    vibrate_on_success_enabled: Option<bool>,
    barcode_thumbnail_on_result: Option<bool>,
    show_duplicates_locations: Option<bool>,
    barkoder_resolution: Option<i64>,

    multicode_caching_enabled: Option<bool>,
    multicode_caching_duration: Option<i64>,
    threshold_between_duplicates_scans: Option<i64>,
    threads_limit: Option<i64>,

    scanning_indicator_color: Option<u32>,
    scanning_indicator_width: Option<f32>,
    scanning_indicator_animation: Option<i64>,
    scanning_indicator_always_visible: Option<bool>,

    // AR colors are also accepted at the top level
    selected_location_color: Option<u32>,
    non_selected_location_color: Option<u32>,
    header_text_color_selected: Option<u32>,
    header_text_color_non_selected: Option<u32>,

    decoder: Option<DecoderDocument>,
    ar_config: Option<ArDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DecoderDocument {
    encoding_character_set: Option<String>,
    decoding_speed: Option<i64>,
    formatting: Option<i64>,
    maximum_results_count: Option<i64>,
    upc_ean_deblur: Option<bool>,
    #[serde(rename = "enableMisshaped1D")]
    enable_misshaped_1d: Option<bool>,
    #[serde(rename = "enableVINRestrictions")]
    enable_vin_restrictions: Option<bool>,
    enable_composite: Option<i64>,
    custom_options: Option<BTreeMap<String, i64>>,

    /// Remaining keys are symbology names, resolved before their row is read
    #[serde(flatten)]
    symbologies: BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct SymbologyDocument {
    enabled: Option<bool>,
    minimum_length: Option<i64>,
    maximum_length: Option<i64>,
    checksum: Option<i64>,
    dpm_mode: Option<bool>,
    #[serde(rename = "expandToUPCA")]
    expand_to_upca: Option<bool>,
    master_checksum: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArDocument {
    ar_mode: Option<i64>,
    result_disappearance_delay_ms: Option<i64>,
    location_transition_speed: Option<f32>,
    overlay_refresh: Option<i64>,
    location_type: Option<i64>,
    selected_location_color: Option<u32>,
    non_selected_location_color: Option<u32>,
    selected_location_line_width: Option<f32>,
    non_selected_location_line_width: Option<f32>,
    double_tap_to_freeze_enabled: Option<bool>,
    image_result_enabled: Option<bool>,
    barcode_thumbnail_on_result_enabled: Option<bool>,
    result_limit: Option<i64>,
    continue_scanning_on_limit: Option<bool>,
    emit_results_at_session_end_only: Option<bool>,
    header_height: Option<f32>,
    header_show_mode: Option<i64>,
    header_max_text_height: Option<f32>,
    header_min_text_height: Option<f32>,
    header_text_color_selected: Option<u32>,
    header_text_color_non_selected: Option<u32>,
    header_horizontal_text_margin: Option<f32>,
    header_vertical_text_margin: Option<f32>,
    header_text_format: Option<String>,
}

// ============================================================================
// Application
// ============================================================================

/// Copy every present field of `$src` onto the same-named field of `$dst`
macro_rules! copy_present {
    (colors $src:ident => $dst:expr; $($field:ident),+ $(,)?) => {
        $(if let Some(argb) = $src.$field {
            $dst.$field = Color::from_argb(argb);
        })+
    };
    ($src:ident => $dst:expr; $($field:ident),+ $(,)?) => {
        $(if let Some(value) = $src.$field {
            $dst.$field = value;
        })+
    };
}

fn select<T: TryFrom<i64, Error = i64>>(kind: &'static str, value: i64) -> Result<T> {
    T::try_from(value).map_err(|value| Error::OptionNotFound {
        kind,
        value: value.to_string(),
    })
}

impl ConfigDocument {
    fn apply(self, config: &mut ScannerConfig) -> Result<()> {
        let doc = self;

        copy_present!(doc => config;
            location_line_width,
            roi_line_width,
            region_of_interest_visible,
            close_session_on_result_enabled,
            image_result_enabled,
            location_in_image_result_enabled,
            location_in_preview_enabled,
            pinch_to_zoom_enabled,
            beep_on_success_enabled,
            vibrate_on_success_enabled,
            barcode_thumbnail_on_result,
            show_duplicates_locations,
            multicode_caching_enabled,
            multicode_caching_duration,
            threshold_between_duplicates_scans,
            scanning_indicator_width,
            scanning_indicator_animation,
            scanning_indicator_always_visible,
        );
        copy_present!(colors doc => config;
            location_line_color,
            roi_line_color,
            roi_overlay_background_color,
            scanning_indicator_color,
        );
        copy_present!(colors doc => config.ar;
            selected_location_color,
            non_selected_location_color,
            header_text_color_selected,
            header_text_color_non_selected,
        );

        if let Some(region) = doc.region_of_interest {
            config
                .set_region_of_interest(region)
                .map_err(Error::RegionNotApplied)?;
        }
        if let Some(limit) = doc.threads_limit {
            config
                .set_threads_limit(limit)
                .map_err(Error::ThreadLimitNotApplied)?;
        }
        if let Some(index) = doc.barkoder_resolution {
            config.resolution =
                Resolution::try_from(index).map_err(Error::InvalidResolution)?;
        }

        if let Some(decoder) = doc.decoder {
            decoder.apply(config)?;
        }
        if let Some(ar) = doc.ar_config {
            ar.apply(config)?;
        }
        Ok(())
    }
}

impl DecoderDocument {
    fn apply(self, config: &mut ScannerConfig) -> Result<()> {
        let doc = self;
        let decoder = &mut config.decoder;

        copy_present!(doc => decoder;
            encoding_character_set,
            maximum_results_count,
            upc_ean_deblur,
            enable_misshaped_1d,
            enable_vin_restrictions,
            enable_composite,
        );
        if let Some(speed) = doc.decoding_speed {
            decoder.decoding_speed = select::<DecodingSpeed>("decoding speed", speed)?;
        }
        if let Some(formatting) = doc.formatting {
            decoder.formatting = select::<Formatting>("formatting type", formatting)?;
        }
        if let Some(options) = doc.custom_options {
            decoder.custom_options.extend(options);
        }

        for (name, row) in doc.symbologies {
            let ty = symbologies::by_name(&name)
                .ok_or_else(|| {
                    Error::ConfigNotValid(format!("unknown decoder key or symbology `{name}`"))
                })?
                .ty;
            let settings: SymbologyDocument = serde_json::from_value(row)
                .map_err(|e| Error::ConfigNotValid(format!("{name}: {e}")))?;

            if let Some(enabled) = settings.enabled {
                decoder.set_enabled(ty, enabled);
            }
            if settings.minimum_length.is_some() || settings.maximum_length.is_some() {
                let current = decoder.length_range(ty)?;
                decoder.set_length_range(
                    ty,
                    settings.minimum_length.unwrap_or(current.min),
                    settings.maximum_length.unwrap_or(current.max),
                )?;
            }
            if let Some(mode) = settings.checksum {
                decoder.set_checksum(ty, mode)?;
            }
            if let Some(enabled) = settings.dpm_mode {
                decoder.set_dpm_mode(ty, enabled)?;
            }
            if let Some(enabled) = settings.expand_to_upca {
                decoder.set_expand_to_upca(ty, enabled)?;
            }
            if let Some(enabled) = settings.master_checksum {
                decoder.set_master_checksum(ty, enabled)?;
            }
        }
        Ok(())
    }
}

impl ArDocument {
    fn apply(self, config: &mut ScannerConfig) -> Result<()> {
        let doc = self;
        let ar = &mut config.ar;

        copy_present!(doc => ar;
            result_disappearance_delay_ms,
            location_transition_speed,
            selected_location_line_width,
            non_selected_location_line_width,
            double_tap_to_freeze_enabled,
            image_result_enabled,
            barcode_thumbnail_on_result_enabled,
            result_limit,
            continue_scanning_on_limit,
            emit_results_at_session_end_only,
            header_height,
            header_max_text_height,
            header_min_text_height,
            header_horizontal_text_margin,
            header_vertical_text_margin,
            header_text_format,
        );
        copy_present!(colors doc => ar;
            selected_location_color,
            non_selected_location_color,
            header_text_color_selected,
            header_text_color_non_selected,
        );

        if let Some(mode) = doc.ar_mode {
            ar.mode = select::<ArMode>("AR mode", mode)?;
        }
        if let Some(refresh) = doc.overlay_refresh {
            ar.overlay_refresh = select::<ArOverlayRefresh>("AR overlay refresh", refresh)?;
        }
        if let Some(location_type) = doc.location_type {
            ar.location_type = select::<ArLocationType>("AR location type", location_type)?;
        }
        if let Some(show_mode) = doc.header_show_mode {
            ar.header_show_mode = select::<ArHeaderShowMode>("AR header show mode", show_mode)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::DecoderType;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_normalize_rewrites_both_sections() {
        let mut doc = object(json!({
            "roiLineColor": "#F00",
            "roiLineWidth": 2.5,
            "arConfig": { "selectedLocationColor": "80112233" }
        }));
        normalize_colors(&mut doc).unwrap();
        assert_eq!(doc["roiLineColor"], json!(0xFFFF0000u32));
        assert_eq!(doc["roiLineWidth"], json!(2.5));
        assert_eq!(doc["arConfig"]["selectedLocationColor"], json!(0x80112233u32));
    }

    #[test]
    fn test_normalize_accepts_signed_argb() {
        let mut doc = object(json!({ "locationLineColor": -16711936 }));
        normalize_colors(&mut doc).unwrap();
        assert_eq!(doc["locationLineColor"], json!(0xFF00FF00u32));
    }

    #[test]
    fn test_normalize_rejects_bad_color() {
        let mut doc = object(json!({ "scanningIndicatorColor": "#12" }));
        assert!(matches!(
            normalize_colors(&mut doc),
            Err(Error::ConfigNotValid(_))
        ));

        let mut doc = object(json!({ "scanningIndicatorColor": true }));
        assert!(normalize_colors(&mut doc).is_err());
    }

    #[test]
    fn test_absorb_applies_every_section() {
        let mut config = ScannerConfig::new("key");
        config
            .absorb_json(
                r##"{
                    "locationLineColor": "#0000FF",
                    "threadsLimit": 4,
                    "regionOfInterest": {"left": 0.1, "top": 0.2, "width": 0.5, "height": 0.5},
                    "barkoderResolution": 1,
                    "decoder": {
                        "decodingSpeed": 2,
                        "Code 128": {"enabled": true, "minimumLength": 3, "maximumLength": 30},
                        "MSI": {"checksum": 3},
                        "Datamatrix": {"dpmMode": true}
                    },
                    "arConfig": {"arMode": 2, "headerTextFormat": "[barcode_type]"}
                }"##,
            )
            .unwrap();

        assert_eq!(config.location_line_color, Color::opaque(0, 0, 0xFF));
        assert_eq!(config.threads_limit(), 4);
        assert_eq!(config.region_of_interest(), Region::new(0.1, 0.2, 0.5, 0.5));
        assert_eq!(config.resolution, Resolution::High);
        assert_eq!(config.decoder.decoding_speed, DecodingSpeed::Slow);
        let range = config.decoder.length_range(DecoderType::Code128).unwrap();
        assert_eq!((range.min, range.max), (3, 30));
        assert_eq!(config.decoder.checksum(DecoderType::Msi).unwrap(), 3);
        assert!(config.decoder.dpm_mode(DecoderType::Datamatrix).unwrap());
        assert_eq!(config.ar.mode, ArMode::InteractiveEnabled);
        assert_eq!(config.ar.header_text_format, "[barcode_type]");
    }

    #[test]
    fn test_absorb_is_all_or_nothing() {
        let mut config = ScannerConfig::new("key");
        let before = config.clone();

        for bad in [
            "{not json",
            r#"[1, 2, 3]"#,
            r##"{"roiLineWidth": 9.0, "roiLineColor": "#XYZ"}"##,
            r#"{"roiLineWidth": 9.0, "threadsLimit": 0}"#,
            r#"{"roiLineWidth": 9.0, "decoder": {"Nope": {"enabled": true}}}"#,
            r#"{"roiLineWidth": 9.0, "decoder": {"QR": {"minimumLength": 2}}}"#,
            r#"{"roiLineWidth": 9.0, "arConfig": {"arMode": 12}}"#,
        ] {
            let err = config.absorb_json(bad).unwrap_err();
            assert_eq!(err.code(), "ConfigNotValid", "{bad}");
            assert_eq!(config, before, "{bad}");
        }
    }

    #[test]
    fn test_misspelled_decoder_key_is_named() {
        let mut config = ScannerConfig::new("key");
        let err = config
            .absorb_json(r#"{"decoder": {"formattingType": 2}}"#)
            .unwrap_err();
        assert_eq!(
            err,
            Error::ConfigNotValid("unknown decoder key or symbology `formattingType`".into())
        );

        let err = config
            .absorb_json(r#"{"decoder": {"QR": {"enabeld": true}}}"#)
            .unwrap_err();
        match err {
            Error::ConfigNotValid(details) => {
                assert!(details.starts_with("QR: unknown field `enabeld`"), "{details}")
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
