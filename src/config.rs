//! Scanner configuration
//!
//! `ScannerConfig` is the live, mutable aggregate of one scanning session.
//! It is created when the session starts and mutated in place by the bridge;
//! only a bulk import replaces most of it at once (see [`document`]).
//!
//! Fields without constraints are public. Fields the engine validates
//! (region of interest, threads limit) sit behind setters returning
//! [`ConfigError`].
//!
//! # Example
//!
//! ```
//! use barkoder_bridge::config::{Region, ScannerConfig};
//! use barkoder_bridge::DecoderType;
//!
//! let mut config = ScannerConfig::new("LICENSE-KEY");
//! config.decoder.set_enabled(DecoderType::Qr, true);
//! config.decoder.set_length_range(DecoderType::Code128, 4, 10).unwrap();
//! config.set_region_of_interest(Region::new(0.1, 0.1, 0.8, 0.8)).unwrap();
//!
//! // QR codes have no length range
//! assert!(config.decoder.set_length_range(DecoderType::Qr, 1, 20).is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::ConfigError;

pub mod ar;
pub mod decoder;
pub mod document;
pub mod symbologies;

pub use ar::ArConfig;
pub use decoder::{DecoderConfig, LengthRange, SymbologyConfig};
pub use symbologies::{descriptor, Capability, ChecksumKind, SymbologyDescriptor};

/// Upper bound accepted by [`ScannerConfig::set_threads_limit`]
pub const MAX_THREADS_LIMIT: i64 = 16;

/// Upper bound of a symbology length range
pub const MAX_SYMBOL_LENGTH: i64 = 256;

/// Enumerations that travel over the wire as their ordinal
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $value:expr),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant = $value),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub fn index(self) -> i64 {
                self as i64
            }
        }

        impl TryFrom<i64> for $name {
            type Error = i64;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.index() == value)
                    .ok_or(value)
            }
        }
    };
}

pub(crate) use wire_enum;

wire_enum! {
    /// Camera capture resolution
    Resolution { Normal = 0, High = 1 }
}

wire_enum! {
    DecodingSpeed { Fast = 0, Normal = 1, Slow = 2, Rigorous = 3 }
}

wire_enum! {
    /// Post-processing applied to decoded text
    Formatting { Disabled = 0, Automatic = 1, Gs1 = 2, Aamva = 3, Sadl = 4 }
}

wire_enum! {
    CameraPosition { Back = 0, Front = 1 }
}

/// Normalized rectangle restricting where decoding is attempted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    pub const FULL_FRAME: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    fn validate(self) -> Result<Self, ConfigError> {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        let valid = in_unit(self.left)
            && in_unit(self.top)
            && self.width > 0.0
            && self.height > 0.0
            && self.left + self.width <= 1.0
            && self.top + self.height <= 1.0;

        if valid {
            Ok(self)
        } else {
            Err(ConfigError::InvalidRegion {
                left: self.left,
                top: self.top,
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Live configuration of one scanning session
#[derive(Debug, Clone, PartialEq)]
pub struct ScannerConfig {
    license_key: String,

    pub location_line_color: Color,
    pub location_line_width: f32,
    pub roi_line_color: Color,
    pub roi_line_width: f32,
    pub roi_overlay_background_color: Color,
    region_of_interest: Region,
    pub region_of_interest_visible: bool,

    pub close_session_on_result_enabled: bool,
    pub image_result_enabled: bool,
    pub location_in_image_result_enabled: bool,
    pub location_in_preview_enabled: bool,
    pub pinch_to_zoom_enabled: bool,
    pub beep_on_success_enabled: bool,
    pub vibrate_on_success_enabled: bool,
    pub barcode_thumbnail_on_result: bool,
    pub show_duplicates_locations: bool,
    pub resolution: Resolution,

    pub multicode_caching_enabled: bool,
    pub multicode_caching_duration: i64,
    pub threshold_between_duplicates_scans: i64,
    threads_limit: i64,

    pub scanning_indicator_color: Color,
    pub scanning_indicator_width: f32,
    pub scanning_indicator_animation: i64,
    pub scanning_indicator_always_visible: bool,

    pub decoder: DecoderConfig,
    pub ar: ArConfig,
}

impl ScannerConfig {
    /// Fresh configuration for a session licensed with `license_key`
    pub fn new(license_key: impl Into<String>) -> Self {
        Self {
            license_key: license_key.into(),
            location_line_color: Color::opaque(0x00, 0xFF, 0x00),
            location_line_width: 4.0,
            roi_line_color: Color::opaque(0xFF, 0x00, 0x00),
            roi_line_width: 3.0,
            roi_overlay_background_color: Color {
                a: 0x40,
                ..Color::BLACK
            },
            region_of_interest: Region::FULL_FRAME,
            region_of_interest_visible: true,
            close_session_on_result_enabled: true,
            image_result_enabled: false,
            location_in_image_result_enabled: false,
            location_in_preview_enabled: true,
            pinch_to_zoom_enabled: true,
            beep_on_success_enabled: true,
            vibrate_on_success_enabled: true,
            barcode_thumbnail_on_result: false,
            show_duplicates_locations: false,
            resolution: Resolution::Normal,
            multicode_caching_enabled: false,
            multicode_caching_duration: 1000,
            threshold_between_duplicates_scans: 5,
            threads_limit: 2,
            scanning_indicator_color: Color::opaque(0xFF, 0x00, 0x00),
            scanning_indicator_width: 2.0,
            scanning_indicator_animation: 0,
            scanning_indicator_always_visible: false,
            decoder: DecoderConfig::new(),
            ar: ArConfig::new(),
        }
    }

    pub fn license_key(&self) -> &str {
        &self.license_key
    }

    pub fn region_of_interest(&self) -> Region {
        self.region_of_interest
    }

    pub fn set_region_of_interest(&mut self, region: Region) -> Result<(), ConfigError> {
        self.region_of_interest = region.validate()?;
        Ok(())
    }

    pub fn threads_limit(&self) -> i64 {
        self.threads_limit
    }

    pub fn set_threads_limit(&mut self, limit: i64) -> Result<(), ConfigError> {
        if !(1..=MAX_THREADS_LIMIT).contains(&limit) {
            return Err(ConfigError::InvalidThreadsLimit(limit));
        }
        self.threads_limit = limit;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DecoderType;

    #[test]
    fn test_default_config() {
        let config = ScannerConfig::new("key");
        assert_eq!(config.license_key(), "key");
        assert_eq!(config.region_of_interest(), Region::FULL_FRAME);
        assert_eq!(config.threads_limit(), 2);
        assert!(config.decoder.is_enabled(DecoderType::Qr));
    }

    #[test]
    fn test_region_validation() {
        let mut config = ScannerConfig::new("key");
        let good = Region::new(0.25, 0.25, 0.5, 0.5);
        config.set_region_of_interest(good).unwrap();
        assert_eq!(config.region_of_interest(), good);

        for bad in [
            Region::new(-0.1, 0.0, 0.5, 0.5),
            Region::new(0.0, 0.0, 0.0, 0.5),
            Region::new(0.0, 0.0, 0.5, -1.0),
            Region::new(0.6, 0.0, 0.5, 0.5),
            Region::new(0.0, 0.9, 0.5, 0.2),
        ] {
            assert!(config.set_region_of_interest(bad).is_err(), "{bad:?}");
        }
        assert_eq!(config.region_of_interest(), good);
    }

    #[test]
    fn test_threads_limit_validation() {
        let mut config = ScannerConfig::new("key");
        config.set_threads_limit(MAX_THREADS_LIMIT).unwrap();
        assert_eq!(
            config.set_threads_limit(0),
            Err(ConfigError::InvalidThreadsLimit(0))
        );
        assert_eq!(config.threads_limit(), MAX_THREADS_LIMIT);
    }

    #[test]
    fn test_wire_enum_conversion() {
        assert_eq!(DecodingSpeed::try_from(3), Ok(DecodingSpeed::Rigorous));
        assert_eq!(Formatting::try_from(5), Err(5));
        assert_eq!(CameraPosition::Front.index(), 1);
        assert_eq!(Resolution::ALL.len(), 2);
    }
}
