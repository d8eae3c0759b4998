//! Decoder configuration
//!
//! Per-symbology settings plus the global decode tuning knobs. Symbology
//! operations are gated by the capability flags of
//! [`symbologies`](super::symbologies); a setting that has no meaning for a
//! symbology is rejected rather than stored.

use std::collections::BTreeMap;

use super::symbologies::{self, Capability, SymbologyDescriptor};
use super::{DecodingSpeed, Formatting, MAX_SYMBOL_LENGTH};
use crate::error::{ConfigError, Error, Result};
use crate::symbol::DecoderType;

/// Accepted symbol length, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthRange {
    pub min: i64,
    pub max: i64,
}

impl LengthRange {
    pub fn new(min: i64, max: i64) -> Result<Self, ConfigError> {
        if min < 0 || min > max || max > MAX_SYMBOL_LENGTH {
            return Err(ConfigError::InvalidLengthRange { min, max });
        }
        Ok(Self { min, max })
    }
}

/// Configuration for a single symbology
#[derive(Debug, Clone, PartialEq)]
pub struct SymbologyConfig {
    pub enabled: bool,

    /// None if the symbology has no length range
    length_range: Option<LengthRange>,

    /// Checksum mode ordinal, None if the symbology has no checksum selector
    checksum: Option<i64>,

    dpm_mode: bool,
    expand_to_upca: bool,
    master_checksum: bool,
}

impl SymbologyConfig {
    fn initial(descriptor: &SymbologyDescriptor) -> Self {
        Self {
            enabled: descriptor.enabled_by_default,
            length_range: descriptor.length_range.then_some(LengthRange {
                min: 1,
                max: MAX_SYMBOL_LENGTH,
            }),
            checksum: descriptor.checksum.map(|_| 0),
            dpm_mode: false,
            expand_to_upca: false,
            master_checksum: false,
        }
    }
}

/// Per-symbology settings and global decode knobs
#[derive(Debug, Clone, PartialEq)]
pub struct DecoderConfig {
    /// Indexed by tag
    symbologies: Vec<SymbologyConfig>,

    pub encoding_character_set: String,
    pub decoding_speed: DecodingSpeed,
    pub formatting: Formatting,
    pub maximum_results_count: i64,
    pub upc_ean_deblur: bool,
    pub enable_misshaped_1d: bool,
    pub enable_vin_restrictions: bool,
    pub enable_composite: i64,

    /// Engine options without a dedicated setter
    pub custom_options: BTreeMap<String, i64>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DecoderConfig {
    pub fn new() -> Self {
        Self {
            symbologies: symbologies::all().map(SymbologyConfig::initial).collect(),
            encoding_character_set: String::new(),
            decoding_speed: DecodingSpeed::Normal,
            formatting: Formatting::Disabled,
            maximum_results_count: 1,
            upc_ean_deblur: false,
            enable_misshaped_1d: false,
            enable_vin_restrictions: false,
            enable_composite: 0,
            custom_options: BTreeMap::new(),
        }
    }

    fn entry(&self, ty: DecoderType) -> &SymbologyConfig {
        &self.symbologies[ty as usize]
    }

    fn entry_mut(&mut self, ty: DecoderType) -> &mut SymbologyConfig {
        &mut self.symbologies[ty as usize]
    }

    pub fn symbology(&self, ty: DecoderType) -> &SymbologyConfig {
        self.entry(ty)
    }

    pub fn is_enabled(&self, ty: DecoderType) -> bool {
        self.entry(ty).enabled
    }

    pub fn set_enabled(&mut self, ty: DecoderType, enabled: bool) {
        self.entry_mut(ty).enabled = enabled;
    }

    pub fn enabled_symbologies(&self) -> impl Iterator<Item = DecoderType> + '_ {
        DecoderType::ALL
            .into_iter()
            .filter(|ty| self.is_enabled(*ty))
    }

    pub fn length_range(&self, ty: DecoderType) -> Result<LengthRange> {
        symbologies::descriptor(ty).require(Capability::LengthRange)?;
        Ok(self.entry(ty).length_range.unwrap_or(LengthRange {
            min: 1,
            max: MAX_SYMBOL_LENGTH,
        }))
    }

    pub fn set_length_range(&mut self, ty: DecoderType, min: i64, max: i64) -> Result<()> {
        symbologies::descriptor(ty).require(Capability::LengthRange)?;
        let range = LengthRange::new(min, max).map_err(Error::LengthRangeNotValid)?;
        self.entry_mut(ty).length_range = Some(range);
        Ok(())
    }

    pub fn checksum(&self, ty: DecoderType) -> Result<i64> {
        symbologies::descriptor(ty).require(Capability::Checksum)?;
        Ok(self.entry(ty).checksum.unwrap_or_default())
    }

    /// Select a checksum mode by ordinal; `OptionNotFound` if out of range
    pub fn set_checksum(&mut self, ty: DecoderType, mode: i64) -> Result<()> {
        let descriptor = symbologies::descriptor(ty).require(Capability::Checksum)?;
        if let Some(kind) = descriptor.checksum {
            if !(0..kind.mode_count()).contains(&mode) {
                return Err(Error::OptionNotFound {
                    kind: kind.name(),
                    value: mode.to_string(),
                });
            }
        }
        self.entry_mut(ty).checksum = Some(mode);
        Ok(())
    }

    pub fn dpm_mode(&self, ty: DecoderType) -> Result<bool> {
        symbologies::descriptor(ty).require(Capability::DpmMode)?;
        Ok(self.entry(ty).dpm_mode)
    }

    pub fn set_dpm_mode(&mut self, ty: DecoderType, enabled: bool) -> Result<()> {
        symbologies::descriptor(ty).require(Capability::DpmMode)?;
        self.entry_mut(ty).dpm_mode = enabled;
        Ok(())
    }

    pub fn expand_to_upca(&self, ty: DecoderType) -> Result<bool> {
        symbologies::descriptor(ty).require(Capability::ExpandToUpcA)?;
        Ok(self.entry(ty).expand_to_upca)
    }

    pub fn set_expand_to_upca(&mut self, ty: DecoderType, enabled: bool) -> Result<()> {
        symbologies::descriptor(ty).require(Capability::ExpandToUpcA)?;
        self.entry_mut(ty).expand_to_upca = enabled;
        Ok(())
    }

    pub fn master_checksum(&self, ty: DecoderType) -> Result<bool> {
        symbologies::descriptor(ty).require(Capability::MasterChecksum)?;
        Ok(self.entry(ty).master_checksum)
    }

    pub fn set_master_checksum(&mut self, ty: DecoderType, enabled: bool) -> Result<()> {
        symbologies::descriptor(ty).require(Capability::MasterChecksum)?;
        self.entry_mut(ty).master_checksum = enabled;
        Ok(())
    }

    pub fn set_custom_option(&mut self, option: impl Into<String>, value: i64) {
        self.custom_options.insert(option.into(), value);
    }

    /// Value last set for `option`; `OptionNotFound` if it never was
    pub fn custom_option(&self, option: &str) -> Result<i64> {
        self.custom_options
            .get(option)
            .copied()
            .ok_or_else(|| Error::OptionNotFound {
                kind: "custom option",
                value: option.to_string(),
            })
    }
}
