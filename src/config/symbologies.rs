//! Per-symbology descriptor table
//!
//! One row per [`DecoderType`], indexed by tag. Every symbology-specific
//! command consults the row's capability flags before touching the decoder
//! config, so adding a symbology means adding one row here.

use crate::error::{Error, Result};
use crate::symbol::DecoderType;

// ============================================================================
// Capabilities
// ============================================================================

/// Checksum families and the number of selectable modes each one has
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumKind {
    /// disabled, mod10, mod11, mod1010, mod1110, mod11IBM, mod1110IBM
    Msi,
    /// disabled, enabled
    Code39,
    /// disabled, single, double
    Code11,
}

impl ChecksumKind {
    pub fn mode_count(self) -> i64 {
        match self {
            Self::Msi => 7,
            Self::Code39 => 2,
            Self::Code11 => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Msi => "MSI checksum type",
            Self::Code39 => "Code 39 checksum type",
            Self::Code11 => "Code 11 checksum type",
        }
    }
}

/// Operation classes that only some symbologies accept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    LengthRange,
    Checksum,
    DpmMode,
    ExpandToUpcA,
    MasterChecksum,
}

impl Capability {
    pub fn operation(self) -> &'static str {
        match self {
            Self::LengthRange => "length range",
            Self::Checksum => "checksum type",
            Self::DpmMode => "DPM mode",
            Self::ExpandToUpcA => "expand to UPC-A",
            Self::MasterChecksum => "master checksum",
        }
    }
}

#[derive(Debug)]
pub struct SymbologyDescriptor {
    pub ty: DecoderType,

    /// Display name, also the key of the symbology in a config document
    pub name: &'static str,

    pub length_range: bool,
    pub checksum: Option<ChecksumKind>,
    pub dpm_mode: bool,
    pub expand_to_upca: bool,
    pub master_checksum: bool,

    /// Enabled in a freshly created session
    pub enabled_by_default: bool,
}

impl SymbologyDescriptor {
    pub fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::LengthRange => self.length_range,
            Capability::Checksum => self.checksum.is_some(),
            Capability::DpmMode => self.dpm_mode,
            Capability::ExpandToUpcA => self.expand_to_upca,
            Capability::MasterChecksum => self.master_checksum,
        }
    }

    /// `Ok(self)` if the capability is on the allow-list, `UnsupportedForType` otherwise
    pub fn require(&'static self, capability: Capability) -> Result<&'static Self> {
        if self.supports(capability) {
            Ok(self)
        } else {
            Err(Error::UnsupportedForType {
                symbology: self.name,
                operation: capability.operation(),
            })
        }
    }
}

// ============================================================================
// Table
// ============================================================================

const fn plain(ty: DecoderType, name: &'static str, enabled_by_default: bool) -> SymbologyDescriptor {
    SymbologyDescriptor {
        ty,
        name,
        length_range: false,
        checksum: None,
        dpm_mode: false,
        expand_to_upca: false,
        master_checksum: false,
        enabled_by_default,
    }
}

const fn ranged(
    ty: DecoderType,
    name: &'static str,
    checksum: Option<ChecksumKind>,
    enabled_by_default: bool,
) -> SymbologyDescriptor {
    SymbologyDescriptor {
        length_range: true,
        checksum,
        ..plain(ty, name, enabled_by_default)
    }
}

const fn dpm(ty: DecoderType, name: &'static str, enabled_by_default: bool) -> SymbologyDescriptor {
    SymbologyDescriptor {
        dpm_mode: true,
        ..plain(ty, name, enabled_by_default)
    }
}

const fn upce(ty: DecoderType, name: &'static str, enabled_by_default: bool) -> SymbologyDescriptor {
    SymbologyDescriptor {
        expand_to_upca: true,
        ..plain(ty, name, enabled_by_default)
    }
}

use DecoderType as T;

static DESCRIPTORS: [SymbologyDescriptor; 40] = [
    plain(T::Aztec, "Aztec", true),
    plain(T::AztecCompact, "Aztec Compact", false),
    dpm(T::Qr, "QR", true),
    dpm(T::QrMicro, "QR Micro", false),
    ranged(T::Code128, "Code 128", None, true),
    ranged(T::Code93, "Code 93", None, true),
    ranged(T::Code39, "Code 39", Some(ChecksumKind::Code39), true),
    ranged(T::Codabar, "Codabar", None, true),
    ranged(T::Code11, "Code 11", Some(ChecksumKind::Code11), false),
    ranged(T::Msi, "MSI", Some(ChecksumKind::Msi), false),
    plain(T::UpcA, "Upc-A", true),
    upce(T::UpcE, "Upc-E", true),
    upce(T::UpcE1, "Upc-E1", false),
    plain(T::Ean13, "Ean-13", true),
    plain(T::Ean8, "Ean-8", true),
    plain(T::Pdf417, "PDF 417", true),
    plain(T::Pdf417Micro, "PDF 417 Micro", false),
    dpm(T::Datamatrix, "Datamatrix", true),
    plain(T::Code25, "Code 25", false),
    plain(T::Interleaved25, "Interleaved 2 of 5", true),
    plain(T::Itf14, "ITF 14", false),
    plain(T::Iata25, "IATA 25", false),
    plain(T::Matrix25, "Matrix 25", false),
    plain(T::Datalogic25, "Datalogic 25", false),
    plain(T::Coop25, "COOP 25", false),
    plain(T::Code32, "Code 32", false),
    plain(T::Telepen, "Telepen", false),
    plain(T::Dotcode, "Dotcode", false),
    SymbologyDescriptor {
        master_checksum: true,
        ..plain(T::IdDocument, "ID Document", false)
    },
    plain(T::Databar14, "Databar 14", false),
    plain(T::DatabarLimited, "Databar Limited", false),
    plain(T::DatabarExpanded, "Databar Expanded", false),
    plain(T::PostalImb, "Postal IMB", false),
    plain(T::Postnet, "Postnet", false),
    plain(T::Planet, "Planet", false),
    plain(T::AustralianPost, "Australian Post", false),
    plain(T::RoyalMail, "Royal Mail", false),
    plain(T::Kix, "KIX", false),
    plain(T::JapanesePost, "Japanese Post", false),
    plain(T::MaxiCode, "MaxiCode", false),
];

pub fn descriptor(ty: DecoderType) -> &'static SymbologyDescriptor {
    &DESCRIPTORS[ty as usize]
}

/// Resolve a wire tag, `UnknownBarcodeType` if it is outside the enumeration
pub fn resolve(tag: i64) -> Result<&'static SymbologyDescriptor> {
    DecoderType::try_from(tag)
        .map(descriptor)
        .map_err(Error::UnknownBarcodeType)
}

/// Look a symbology up by its config document key
pub fn by_name(name: &str) -> Option<&'static SymbologyDescriptor> {
    DESCRIPTORS.iter().find(|d| d.name == name)
}

pub fn all() -> impl Iterator<Item = &'static SymbologyDescriptor> {
    DESCRIPTORS.iter()
}
