//! Augmented-reality overlay configuration

use super::wire_enum;
use crate::color::Color;

wire_enum! {
    ArMode { Off = 0, InteractiveDisabled = 1, InteractiveEnabled = 2, NonInteractive = 3 }
}

wire_enum! {
    ArOverlayRefresh { Smooth = 0, Normal = 1 }
}

wire_enum! {
    /// Shape drawn around a tracked symbol
    ArLocationType { None = 0, Tight = 1, BoundingBox = 2 }
}

wire_enum! {
    ArHeaderShowMode { Never = 0, Always = 1, OnSelected = 2 }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArConfig {
    pub mode: ArMode,
    pub result_disappearance_delay_ms: i64,
    pub location_transition_speed: f32,
    pub overlay_refresh: ArOverlayRefresh,
    pub location_type: ArLocationType,

    pub selected_location_color: Color,
    pub non_selected_location_color: Color,
    pub selected_location_line_width: f32,
    pub non_selected_location_line_width: f32,

    pub double_tap_to_freeze_enabled: bool,
    pub image_result_enabled: bool,
    pub barcode_thumbnail_on_result_enabled: bool,
    pub result_limit: i64,
    pub continue_scanning_on_limit: bool,
    pub emit_results_at_session_end_only: bool,

    pub header_height: f32,
    pub header_show_mode: ArHeaderShowMode,
    pub header_max_text_height: f32,
    pub header_min_text_height: f32,
    pub header_text_color_selected: Color,
    pub header_text_color_non_selected: Color,
    pub header_horizontal_text_margin: f32,
    pub header_vertical_text_margin: f32,

    /// Template such as `"[barcode_text]"`
    pub header_text_format: String,
}

impl Default for ArConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ArConfig {
    pub fn new() -> Self {
        Self {
            mode: ArMode::Off,
            result_disappearance_delay_ms: 300,
            location_transition_speed: 0.3,
            overlay_refresh: ArOverlayRefresh::Normal,
            location_type: ArLocationType::BoundingBox,
            selected_location_color: Color::opaque(0x00, 0xFF, 0x00),
            non_selected_location_color: Color::opaque(0xFF, 0x00, 0x00),
            selected_location_line_width: 6.0,
            non_selected_location_line_width: 3.0,
            double_tap_to_freeze_enabled: true,
            image_result_enabled: false,
            barcode_thumbnail_on_result_enabled: false,
            result_limit: 0,
            continue_scanning_on_limit: false,
            emit_results_at_session_end_only: false,
            header_height: 19.0,
            header_show_mode: ArHeaderShowMode::OnSelected,
            header_max_text_height: 18.0,
            header_min_text_height: 6.0,
            header_text_color_selected: Color::BLACK,
            header_text_color_non_selected: Color::opaque(0xFF, 0xFF, 0xFF),
            header_horizontal_text_margin: 3.0,
            header_vertical_text_margin: 3.0,
            header_text_format: "[barcode_text]".to_string(),
        }
    }
}
