//! Command table
//!
//! Maps every command name to a typed action. Actions read their argument
//! through [`Args`] and either mutate the session's [`ScannerConfig`] or
//! forward to the [`ScannerView`]. The table is built once, on first use.

use std::collections::HashMap;
use std::sync::OnceLock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use super::args::Args;
use super::ResponseValue;
use crate::color::{self, Color};
use crate::config::ar::{ArHeaderShowMode, ArLocationType, ArMode, ArOverlayRefresh};
use crate::config::{
    symbologies, CameraPosition, DecodingSpeed, Formatting, Region, Resolution, ScannerConfig,
};
use crate::error::{Error, Result};
use crate::image_data::ImageData;
use crate::symbol::DecoderType;
use crate::view::ScannerView;

pub type ConfigAction = fn(&mut ScannerConfig, Args<'_>) -> Result<ResponseValue>;
pub type ViewAction = fn(&mut dyn ScannerView, &ScannerConfig, Args<'_>) -> Result<ResponseValue>;

#[derive(Clone, Copy)]
pub enum Action {
    Config(ConfigAction),
    View(ViewAction),
}

fn table() -> &'static HashMap<&'static str, Action> {
    static TABLE: OnceLock<HashMap<&'static str, Action>> = OnceLock::new();
    TABLE.get_or_init(build)
}

pub fn lookup(name: &str) -> Option<(&'static str, Action)> {
    table()
        .get_key_value(name)
        .map(|(name, action)| (*name, *action))
}

/// Every command name, sorted
pub fn names() -> Vec<&'static str> {
    let mut names: Vec<_> = table().keys().copied().collect();
    names.sort_unstable();
    names
}

struct Table(HashMap<&'static str, Action>);

impl Table {
    fn insert(&mut self, name: &'static str, action: Action) {
        let previous = self.0.insert(name, action);
        debug_assert!(previous.is_none(), "duplicate command {name}");
    }

    fn config(&mut self, name: &'static str, action: ConfigAction) {
        self.insert(name, Action::Config(action));
    }

    fn view(&mut self, name: &'static str, action: ViewAction) {
        self.insert(name, Action::View(action));
    }
}

// ============================================================================
// Shapes
// ============================================================================

const DONE: Result<ResponseValue> = Ok(ResponseValue::None);

macro_rules! set_bool {
    ($t:ident, $name:literal, $($field:ident).+) => {
        $t.config($name, |c, a| {
            c.$($field).+ = a.bool()?;
            DONE
        })
    };
}

macro_rules! get_bool {
    ($t:ident, $name:literal, $($field:ident).+) => {
        $t.config($name, |c, a| {
            a.none()?;
            Ok(ResponseValue::Bool(c.$($field).+))
        })
    };
}

macro_rules! set_int {
    ($t:ident, $name:literal, $($field:ident).+) => {
        $t.config($name, |c, a| {
            c.$($field).+ = a.int()?;
            DONE
        })
    };
}

macro_rules! get_int {
    ($t:ident, $name:literal, $($field:ident).+) => {
        $t.config($name, |c, a| {
            a.none()?;
            Ok(ResponseValue::Int(c.$($field).+))
        })
    };
}

macro_rules! set_float {
    ($t:ident, $name:literal, $($field:ident).+) => {
        $t.config($name, |c, a| {
            c.$($field).+ = a.float()? as f32;
            DONE
        })
    };
}

macro_rules! get_float {
    ($t:ident, $name:literal, $($field:ident).+) => {
        $t.config($name, |c, a| {
            a.none()?;
            Ok(ResponseValue::Float(f64::from(c.$($field).+)))
        })
    };
}

macro_rules! set_color {
    ($t:ident, $name:literal, $($field:ident).+) => {
        $t.config($name, |c, a| {
            c.$($field).+ = parse_color(a)?;
            DONE
        })
    };
}

macro_rules! get_color {
    ($t:ident, $name:literal, $($field:ident).+) => {
        $t.config($name, |c, a| {
            a.none()?;
            Ok(ResponseValue::Text(color::format(c.$($field).+)))
        })
    };
}

/// Enumerated selector: ordinal in, ordinal out
macro_rules! set_enum {
    ($t:ident, $name:literal, $ty:ty, $err:expr, $($field:ident).+) => {
        $t.config($name, |c, a| {
            c.$($field).+ = <$ty>::try_from(a.int()?).map_err($err)?;
            DONE
        })
    };
}

macro_rules! get_enum {
    ($t:ident, $name:literal, $($field:ident).+) => {
        $t.config($name, |c, a| {
            a.none()?;
            Ok(ResponseValue::Int(c.$($field).+.index()))
        })
    };
}

macro_rules! symbology_flag {
    ($t:ident, $set:literal, $get:literal, $ty:expr, $setter:ident, $getter:ident) => {
        $t.config($set, |c, a| {
            c.decoder.$setter($ty, a.bool()?)?;
            DONE
        });
        $t.config($get, |c, a| {
            a.none()?;
            Ok(ResponseValue::Bool(c.decoder.$getter($ty)?))
        });
    };
}

macro_rules! checksum {
    ($t:ident, $set:literal, $get:literal, $ty:expr) => {
        $t.config($set, |c, a| {
            c.decoder.set_checksum($ty, a.int()?)?;
            DONE
        });
        $t.config($get, |c, a| {
            a.none()?;
            Ok(ResponseValue::Int(c.decoder.checksum($ty)?))
        });
    };
}

/// Plain view call without argument or result
macro_rules! view_call {
    ($t:ident, $name:literal, $method:ident) => {
        $t.view($name, |v, _, a| {
            a.none()?;
            v.$method();
            DONE
        })
    };
}

fn parse_color(args: Args<'_>) -> Result<Color> {
    color::parse(args.text()?).map_err(Error::ColorNotSet)
}

fn option_not_found(kind: &'static str) -> impl Fn(i64) -> Error {
    move |value| Error::OptionNotFound {
        kind,
        value: value.to_string(),
    }
}

fn barcode_type(args: Args<'_>) -> Result<DecoderType> {
    symbologies::resolve(args.int()?).map(|descriptor| descriptor.ty)
}

// ============================================================================
// Table
// ============================================================================

fn build() -> HashMap<&'static str, Action> {
    let mut t = Table(HashMap::new());
    display(&mut t);
    decoder(&mut t);
    symbology(&mut t);
    ar(&mut t);
    view(&mut t);
    t.0
}

fn display(t: &mut Table) {
    get_color!(t, "getLocationLineColorHex", location_line_color);
    set_color!(t, "setLocationLineColor", location_line_color);
    get_float!(t, "getLocationLineWidth", location_line_width);
    set_float!(t, "setLocationLineWidth", location_line_width);
    get_color!(t, "getRoiLineColorHex", roi_line_color);
    set_color!(t, "setRoiLineColor", roi_line_color);
    get_float!(t, "getRoiLineWidth", roi_line_width);
    set_float!(t, "setRoiLineWidth", roi_line_width);
    get_color!(t, "getRoiOverlayBackgroundColorHex", roi_overlay_background_color);
    set_color!(t, "setRoiOverlayBackgroundColor", roi_overlay_background_color);

    get_bool!(t, "isCloseSessionOnResultEnabled", close_session_on_result_enabled);
    set_bool!(t, "setCloseSessionOnResultEnabled", close_session_on_result_enabled);
    get_bool!(t, "isImageResultEnabled", image_result_enabled);
    set_bool!(t, "setImageResultEnabled", image_result_enabled);
    get_bool!(t, "isLocationInImageResultEnabled", location_in_image_result_enabled);
    set_bool!(t, "setLocationInImageResultEnabled", location_in_image_result_enabled);
    get_bool!(t, "isLocationInPreviewEnabled", location_in_preview_enabled);
    set_bool!(t, "setLocationInPreviewEnabled", location_in_preview_enabled);
    get_bool!(t, "isPinchToZoomEnabled", pinch_to_zoom_enabled);
    set_bool!(t, "setPinchToZoomEnabled", pinch_to_zoom_enabled);
    get_bool!(t, "isRegionOfInterestVisible", region_of_interest_visible);
    set_bool!(t, "setRegionOfInterestVisible", region_of_interest_visible);
    get_bool!(t, "isBeepOnSuccessEnabled", beep_on_success_enabled);
    set_bool!(t, "setBeepOnSuccessEnabled", beep_on_success_enabled);
    get_bool!(t, "isVibrateOnSuccessEnabled", vibrate_on_success_enabled);
    set_bool!(t, "setVibrateOnSuccessEnabled", vibrate_on_success_enabled);
    get_bool!(t, "isBarcodeThumbnailOnResultEnabled", barcode_thumbnail_on_result);
    set_bool!(t, "setBarcodeThumbnailOnResultEnabled", barcode_thumbnail_on_result);
    get_bool!(t, "getShowDuplicatesLocations", show_duplicates_locations);
    set_bool!(t, "setShowDuplicatesLocations", show_duplicates_locations);

    get_bool!(t, "getMulticodeCachingEnabled", multicode_caching_enabled);
    set_bool!(t, "setMulticodeCachingEnabled", multicode_caching_enabled);
    get_int!(t, "getMulticodeCachingDuration", multicode_caching_duration);
    set_int!(t, "setMulticodeCachingDuration", multicode_caching_duration);
    get_int!(t, "getThresholdBetweenDuplicatesScans", threshold_between_duplicates_scans);
    set_int!(t, "setThresholdBetweenDuplicatesScans", threshold_between_duplicates_scans);

    get_color!(t, "getScanningIndicatorColorHex", scanning_indicator_color);
    set_color!(t, "setScanningIndicatorColor", scanning_indicator_color);
    get_float!(t, "getScanningIndicatorWidth", scanning_indicator_width);
    set_float!(t, "setScanningIndicatorWidth", scanning_indicator_width);
    get_int!(t, "getScanningIndicatorAnimation", scanning_indicator_animation);
    set_int!(t, "setScanningIndicatorAnimation", scanning_indicator_animation);
    get_bool!(t, "isScanningIndicatorAlwaysVisible", scanning_indicator_always_visible);
    set_bool!(t, "setScanningIndicatorAlwaysVisible", scanning_indicator_always_visible);

    get_enum!(t, "getBarkoderResolution", resolution);
    set_enum!(t, "setBarkoderResolution", Resolution, Error::InvalidResolution, resolution);

    t.config("getRegionOfInterest", |c, a| {
        a.none()?;
        let roi = c.region_of_interest();
        Ok(ResponseValue::FloatList(vec![
            roi.left, roi.top, roi.width, roi.height,
        ]))
    });
    t.config("setRegionOfInterest", |c, a| {
        let region = Region::new(
            a.field("left")?.float()?,
            a.field("top")?.float()?,
            a.field("width")?.float()?,
            a.field("height")?.float()?,
        );
        c.set_region_of_interest(region)
            .map_err(Error::RegionNotApplied)?;
        DONE
    });

    t.config("getThreadsLimit", |c, a| {
        a.none()?;
        Ok(ResponseValue::Int(c.threads_limit()))
    });
    t.config("setThreadsLimit", |c, a| {
        c.set_threads_limit(a.int()?)
            .map_err(Error::ThreadLimitNotApplied)?;
        DONE
    });

    t.config("configureBarkoder", |c, a| {
        c.absorb_json(a.text()?)?;
        DONE
    });
}

fn decoder(t: &mut Table) {
    t.config("getEncodingCharacterSet", |c, a| {
        a.none()?;
        Ok(ResponseValue::Text(c.decoder.encoding_character_set.clone()))
    });
    t.config("setEncodingCharacterSet", |c, a| {
        c.decoder.encoding_character_set = a.text()?.to_string();
        DONE
    });

    get_enum!(t, "getDecodingSpeed", decoder.decoding_speed);
    set_enum!(t, "setDecodingSpeed", DecodingSpeed, option_not_found("decoding speed"), decoder.decoding_speed);
    get_enum!(t, "getFormattingType", decoder.formatting);
    set_enum!(t, "setFormattingType", Formatting, option_not_found("formatting type"), decoder.formatting);

    get_int!(t, "getMaximumResultsCount", decoder.maximum_results_count);
    set_int!(t, "setMaximumResultsCount", decoder.maximum_results_count);
    get_int!(t, "getEnableComposite", decoder.enable_composite);
    set_int!(t, "setEnableComposite", decoder.enable_composite);

    get_bool!(t, "isUpcEanDeblurEnabled", decoder.upc_ean_deblur);
    set_bool!(t, "setUpcEanDeblurEnabled", decoder.upc_ean_deblur);
    get_bool!(t, "isMisshaped1DEnabled", decoder.enable_misshaped_1d);
    set_bool!(t, "setMisshaped1DEnabled", decoder.enable_misshaped_1d);
    set_bool!(t, "setEnableMisshaped1DEnabled", decoder.enable_misshaped_1d);
    get_bool!(t, "isVINRestrictionsEnabled", decoder.enable_vin_restrictions);
    set_bool!(t, "setEnableVINRestrictions", decoder.enable_vin_restrictions);

    t.config("setCustomOption", |c, a| {
        let option = a.field("option")?.text()?;
        let value = a.field("value")?.int()?;
        c.decoder.set_custom_option(option, value);
        DONE
    });
    t.config("getCustomOption", |c, a| {
        Ok(ResponseValue::Int(c.decoder.custom_option(a.text()?)?))
    });
}

fn symbology(t: &mut Table) {
    t.config("isBarcodeTypeEnabled", |c, a| {
        let ty = barcode_type(a)?;
        Ok(ResponseValue::Bool(c.decoder.is_enabled(ty)))
    });
    t.config("setBarcodeTypeEnabled", |c, a| {
        let enabled = a.field("enabled")?.bool()?;
        let ty = barcode_type(a.field("type")?)?;
        c.decoder.set_enabled(ty, enabled);
        DONE
    });

    t.config("getBarcodeTypeLengthRange", |c, a| {
        let range = c.decoder.length_range(barcode_type(a)?)?;
        Ok(ResponseValue::IntList(vec![range.min, range.max]))
    });
    t.config("setBarcodeTypeLengthRange", |c, a| {
        let min = a.field("min")?.int()?;
        let max = a.field("max")?.int()?;
        let ty = barcode_type(a.field("type")?)?;
        c.decoder.set_length_range(ty, min, max)?;
        DONE
    });

    checksum!(t, "setMsiChecksumType", "getMsiChecksumType", DecoderType::Msi);
    checksum!(t, "setCode39ChecksumType", "getCode39ChecksumType", DecoderType::Code39);
    checksum!(t, "setCode11ChecksumType", "getCode11ChecksumType", DecoderType::Code11);

    symbology_flag!(t, "setDatamatrixDpmModeEnabled", "isDatamatrixDpmModeEnabled",
        DecoderType::Datamatrix, set_dpm_mode, dpm_mode);
    symbology_flag!(t, "setQrDpmModeEnabled", "isQrDpmModeEnabled",
        DecoderType::Qr, set_dpm_mode, dpm_mode);
    symbology_flag!(t, "setQrMicroDpmModeEnabled", "isQrMicroDpmModeEnabled",
        DecoderType::QrMicro, set_dpm_mode, dpm_mode);
    symbology_flag!(t, "setUPCEexpandToUPCA", "isUPCEexpandToUPCA",
        DecoderType::UpcE, set_expand_to_upca, expand_to_upca);
    symbology_flag!(t, "setUPCE1expandToUPCA", "isUPCE1expandToUPCA",
        DecoderType::UpcE1, set_expand_to_upca, expand_to_upca);
    symbology_flag!(t, "setIdDocumentMasterChecksumEnabled", "isIdDocumentMasterChecksumEnabled",
        DecoderType::IdDocument, set_master_checksum, master_checksum);
}

fn ar(t: &mut Table) {
    get_enum!(t, "getARMode", ar.mode);
    set_enum!(t, "setARMode", ArMode, option_not_found("AR mode"), ar.mode);
    get_enum!(t, "getAROverlayRefresh", ar.overlay_refresh);
    set_enum!(t, "setAROverlayRefresh", ArOverlayRefresh, option_not_found("AR overlay refresh"), ar.overlay_refresh);
    get_enum!(t, "getARLocationType", ar.location_type);
    set_enum!(t, "setARLocationType", ArLocationType, option_not_found("AR location type"), ar.location_type);
    get_enum!(t, "getARHeaderShowMode", ar.header_show_mode);
    set_enum!(t, "setARHeaderShowMode", ArHeaderShowMode, option_not_found("AR header show mode"), ar.header_show_mode);

    get_int!(t, "getARResultDisappearanceDelayMs", ar.result_disappearance_delay_ms);
    set_int!(t, "setARResultDisappearanceDelayMs", ar.result_disappearance_delay_ms);
    get_float!(t, "getARLocationTransitionSpeed", ar.location_transition_speed);
    set_float!(t, "setARLocationTransitionSpeed", ar.location_transition_speed);

    get_color!(t, "getARSelectedLocationColor", ar.selected_location_color);
    set_color!(t, "setARSelectedLocationColor", ar.selected_location_color);
    get_color!(t, "getARNonSelectedLocationColor", ar.non_selected_location_color);
    set_color!(t, "setARNonSelectedLocationColor", ar.non_selected_location_color);
    get_float!(t, "getARSelectedLocationLineWidth", ar.selected_location_line_width);
    set_float!(t, "setARSelectedLocationLineWidth", ar.selected_location_line_width);
    get_float!(t, "getARNonSelectedLocationLineWidth", ar.non_selected_location_line_width);
    set_float!(t, "setARNonSelectedLocationLineWidth", ar.non_selected_location_line_width);

    get_bool!(t, "isARDoubleTapToFreezeEnabled", ar.double_tap_to_freeze_enabled);
    set_bool!(t, "setARDoubleTapToFreezeEnabled", ar.double_tap_to_freeze_enabled);
    get_bool!(t, "isARImageResultEnabled", ar.image_result_enabled);
    set_bool!(t, "setARImageResultEnabled", ar.image_result_enabled);
    get_bool!(t, "isARBarcodeThumbnailOnResultEnabled", ar.barcode_thumbnail_on_result_enabled);
    set_bool!(t, "setARBarcodeThumbnailOnResultEnabled", ar.barcode_thumbnail_on_result_enabled);
    get_int!(t, "getARResultLimit", ar.result_limit);
    set_int!(t, "setARResultLimit", ar.result_limit);
    get_bool!(t, "getARContinueScanningOnLimit", ar.continue_scanning_on_limit);
    set_bool!(t, "setARContinueScanningOnLimit", ar.continue_scanning_on_limit);
    get_bool!(t, "getAREmitResultsAtSessionEndOnly", ar.emit_results_at_session_end_only);
    set_bool!(t, "setAREmitResultsAtSessionEndOnly", ar.emit_results_at_session_end_only);

    get_float!(t, "getARHeaderHeight", ar.header_height);
    set_float!(t, "setARHeaderHeight", ar.header_height);
    get_float!(t, "getARHeaderMaxTextHeight", ar.header_max_text_height);
    set_float!(t, "setARHeaderMaxTextHeight", ar.header_max_text_height);
    get_float!(t, "getARHeaderMinTextHeight", ar.header_min_text_height);
    set_float!(t, "setARHeaderMinTextHeight", ar.header_min_text_height);
    get_color!(t, "getARHeaderTextColorSelected", ar.header_text_color_selected);
    set_color!(t, "setARHeaderTextColorSelected", ar.header_text_color_selected);
    get_color!(t, "getARHeaderTextColorNonSelected", ar.header_text_color_non_selected);
    set_color!(t, "setARHeaderTextColorNonSelected", ar.header_text_color_non_selected);
    get_float!(t, "getARHeaderHorizontalTextMargin", ar.header_horizontal_text_margin);
    set_float!(t, "setARHeaderHorizontalTextMargin", ar.header_horizontal_text_margin);
    get_float!(t, "getARHeaderVerticalTextMargin", ar.header_vertical_text_margin);
    set_float!(t, "setARHeaderVerticalTextMargin", ar.header_vertical_text_margin);

    t.config("getARHeaderTextFormat", |c, a| {
        a.none()?;
        Ok(ResponseValue::Text(c.ar.header_text_format.clone()))
    });
    t.config("setARHeaderTextFormat", |c, a| {
        c.ar.header_text_format = a.text()?.to_string();
        DONE
    });
}

fn view(t: &mut Table) {
    t.view("getMaxZoomFactor", |v, _, a| {
        a.none()?;
        Ok(ResponseValue::Float(f64::from(v.max_zoom_factor())))
    });
    t.view("getCurrentZoomFactor", |v, _, a| {
        a.none()?;
        Ok(ResponseValue::Float(f64::from(v.current_zoom_factor())))
    });
    t.view("setZoomFactor", |v, _, a| {
        v.set_zoom_factor(a.float()? as f32);
        DONE
    });
    t.view("isFlashAvailable", |v, _, a| {
        a.none()?;
        Ok(ResponseValue::Bool(v.is_flash_available()))
    });
    t.view("setFlashEnabled", |v, _, a| {
        v.set_flash_enabled(a.bool()?);
        DONE
    });

    view_call!(t, "startCamera", start_camera);
    view_call!(t, "stopScanning", stop_scanning);
    view_call!(t, "pauseScanning", pause_scanning);
    view_call!(t, "freezeScanning", freeze_scanning);
    view_call!(t, "unfreezeScanning", unfreeze_scanning);
    view_call!(t, "captureImage", capture_image);

    t.view("startScanning", |v, c, a| {
        a.none()?;
        v.start_scanning(c);
        DONE
    });
    t.view("scanImage", |v, c, a| {
        let bytes = STANDARD
            .decode(a.text()?)
            .map_err(|e| a.bad(format!("image is not base64: {e}")))?;
        let image = ImageData::decode(&bytes).map_err(|e| a.bad(e.to_string()))?;
        v.scan_image(image, c);
        DONE
    });

    t.view("setCamera", |v, _, a| {
        let position = CameraPosition::try_from(a.int()?).map_err(Error::InvalidCameraPosition)?;
        v.set_camera(position);
        DONE
    });
    t.view("setDynamicExposure", |v, _, a| {
        v.set_dynamic_exposure(a.int()?);
        DONE
    });
    t.view("setCentricFocusAndExposure", |v, _, a| {
        v.set_centric_focus_and_exposure(a.bool()?);
        DONE
    });
    t.view("setVideoStabilization", |v, _, a| {
        v.set_video_stabilization(a.bool()?);
        DONE
    });

    t.view("getVersion", |v, _, a| {
        a.none()?;
        Ok(ResponseValue::Text(v.version()))
    });
    t.view("getLibVersion", |v, _, a| {
        a.none()?;
        Ok(ResponseValue::Text(v.lib_version()))
    });
    t.view("showLogMessages", |v, _, a| {
        v.show_log_messages(a.bool()?);
        DONE
    });
}
