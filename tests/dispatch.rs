//! Integration tests for command dispatch

use barkoder_bridge::bridge::ResponseValue;
use barkoder_bridge::config::CameraPosition;
use barkoder_bridge::view::{HeadlessView, ScanState};
use barkoder_bridge::{ConfigBridge, DecoderType, Error, ImageData};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{json, Value};

fn session() -> ConfigBridge<HeadlessView> {
    let mut bridge = ConfigBridge::new(HeadlessView::default());
    bridge.start_session("test-license");
    bridge
}

/// Dispatch and return only the error code
fn code(bridge: &mut ConfigBridge<HeadlessView>, name: &str, argument: Value) -> &'static str {
    match bridge.dispatch(name, &argument) {
        Ok(value) => panic!("{name} unexpectedly returned {value:?}"),
        Err(e) => e.code(),
    }
}

#[test]
fn test_enable_every_symbology() {
    let mut bridge = session();
    for ty in DecoderType::ALL {
        bridge
            .dispatch("setBarcodeTypeEnabled", &json!({"type": ty.tag(), "enabled": true}))
            .unwrap();
        assert_eq!(
            bridge.dispatch("isBarcodeTypeEnabled", &json!(ty.tag())).unwrap(),
            ResponseValue::Bool(true),
            "{ty}"
        );
    }
}

#[test]
fn test_unknown_barcode_type() {
    let mut bridge = session();
    for tag in [40, 99, -1] {
        assert_eq!(
            code(&mut bridge, "setBarcodeTypeEnabled", json!({"type": tag, "enabled": true})),
            "UnknownBarcodeType"
        );
        assert_eq!(
            code(&mut bridge, "isBarcodeTypeEnabled", json!(tag)),
            "UnknownBarcodeType"
        );
    }
}

#[test]
fn test_length_range_round_trip() {
    let mut bridge = session();
    bridge
        .dispatch("setBarcodeTypeLengthRange", &json!({"type": 4, "min": 4, "max": 10}))
        .unwrap();
    assert_eq!(
        bridge.dispatch("getBarcodeTypeLengthRange", &json!(4)).unwrap(),
        ResponseValue::IntList(vec![4, 10])
    );
}

#[test]
fn test_length_range_on_2d_symbology() {
    let mut bridge = session();
    let qr = DecoderType::Qr.tag();
    assert_eq!(
        bridge.dispatch("setBarcodeTypeLengthRange", &json!({"type": qr, "min": 4, "max": 10})),
        Err(Error::UnsupportedForType {
            symbology: "QR",
            operation: "length range"
        })
    );
    assert_eq!(
        code(&mut bridge, "getBarcodeTypeLengthRange", json!(qr)),
        "UnsupportedForType"
    );
}

#[test]
fn test_length_range_rejected_values() {
    let mut bridge = session();
    assert_eq!(
        code(&mut bridge, "setBarcodeTypeLengthRange", json!({"type": 4, "min": 10, "max": 4})),
        "LengthRangeNotValid"
    );
    assert_eq!(
        bridge.dispatch("getBarcodeTypeLengthRange", &json!(4)).unwrap(),
        ResponseValue::IntList(vec![1, 256])
    );
}

#[test]
fn test_malformed_calls_are_bad_arguments() {
    let mut bridge = session();
    let cases = [
        ("setBarcodeTypeLengthRange", json!({"type": 4, "min": 4})),
        ("setBarcodeTypeEnabled", json!({"type": "4", "enabled": true})),
        ("setThreadsLimit", json!(2.5)),
        ("setRoiLineWidth", json!("wide")),
        ("setRoiLineColor", json!(0xFF0000)),
        ("setRegionOfInterest", json!([0.1, 0.1, 0.5, 0.5])),
        ("getThreadsLimit", json!(1)),
    ];
    for (name, argument) in cases {
        assert_eq!(code(&mut bridge, name, argument), "BadArgument", "{name}");
    }
}

#[test]
fn test_region_of_interest() {
    let mut bridge = session();
    bridge
        .dispatch(
            "setRegionOfInterest",
            &json!({"left": 0.25, "top": 0.25, "width": 0.5, "height": 0.5}),
        )
        .unwrap();
    assert_eq!(
        bridge.dispatch("getRegionOfInterest", &Value::Null).unwrap(),
        ResponseValue::FloatList(vec![0.25, 0.25, 0.5, 0.5])
    );

    assert_eq!(
        code(
            &mut bridge,
            "setRegionOfInterest",
            json!({"left": 0.8, "top": 0.0, "width": 0.5, "height": 0.5})
        ),
        "RegionNotApplied"
    );
    assert_eq!(
        bridge.config().unwrap().region_of_interest().left,
        0.25
    );
}

#[test]
fn test_region_of_interest_reads_back_unchanged() {
    let mut bridge = session();
    bridge
        .dispatch(
            "setRegionOfInterest",
            &json!({"left": 0.1, "top": 0.1, "width": 0.3, "height": 0.3}),
        )
        .unwrap();
    assert_eq!(
        bridge.dispatch("getRegionOfInterest", &Value::Null).unwrap(),
        ResponseValue::FloatList(vec![0.1, 0.1, 0.3, 0.3])
    );
}

#[test]
fn test_threads_limit() {
    let mut bridge = session();
    bridge.dispatch("setThreadsLimit", &json!(4)).unwrap();
    assert_eq!(
        bridge.dispatch("getThreadsLimit", &Value::Null).unwrap(),
        ResponseValue::Int(4)
    );
    assert_eq!(code(&mut bridge, "setThreadsLimit", json!(0)), "ThreadLimitNotApplied");
    assert_eq!(code(&mut bridge, "setThreadsLimit", json!(17)), "ThreadLimitNotApplied");
}

#[test]
fn test_colors() {
    let mut bridge = session();
    bridge.dispatch("setLocationLineColor", &json!("#80ff8800")).unwrap();
    assert_eq!(
        bridge.dispatch("getLocationLineColorHex", &Value::Null).unwrap(),
        ResponseValue::Text("FF8800".into())
    );
    assert_eq!(bridge.config().unwrap().location_line_color.a, 0x80);

    bridge.dispatch("setARHeaderTextColorSelected", &json!("0x0F0")).unwrap();
    assert_eq!(
        bridge.dispatch("getARHeaderTextColorSelected", &Value::Null).unwrap(),
        ResponseValue::Text("00FF00".into())
    );

    let before = bridge.config().unwrap().roi_line_color;
    assert_eq!(code(&mut bridge, "setRoiLineColor", json!("#12345")), "ColorNotSet");
    assert_eq!(bridge.config().unwrap().roi_line_color, before);
}

#[test]
fn test_checksum_types() {
    let mut bridge = session();
    bridge.dispatch("setMsiChecksumType", &json!(6)).unwrap();
    assert_eq!(
        bridge.dispatch("getMsiChecksumType", &Value::Null).unwrap(),
        ResponseValue::Int(6)
    );
    assert_eq!(code(&mut bridge, "setCode39ChecksumType", json!(2)), "OptionNotFound");
    assert_eq!(code(&mut bridge, "setCode11ChecksumType", json!(-1)), "OptionNotFound");
}

#[test]
fn test_enumerated_selectors() {
    let mut bridge = session();
    bridge.dispatch("setBarkoderResolution", &json!(1)).unwrap();
    assert_eq!(
        bridge.dispatch("getBarkoderResolution", &Value::Null).unwrap(),
        ResponseValue::Int(1)
    );
    assert_eq!(code(&mut bridge, "setBarkoderResolution", json!(2)), "InvalidResolution");
    assert_eq!(code(&mut bridge, "setDecodingSpeed", json!(9)), "OptionNotFound");
    assert_eq!(code(&mut bridge, "setARMode", json!(4)), "OptionNotFound");

    bridge.dispatch("setARLocationType", &json!(0)).unwrap();
    assert_eq!(
        bridge.dispatch("getARLocationType", &Value::Null).unwrap(),
        ResponseValue::Int(0)
    );
}

#[test]
fn test_symbology_specific_flags() {
    let mut bridge = session();
    bridge.dispatch("setQrMicroDpmModeEnabled", &json!(true)).unwrap();
    assert_eq!(
        bridge.dispatch("isQrMicroDpmModeEnabled", &Value::Null).unwrap(),
        ResponseValue::Bool(true)
    );
    bridge.dispatch("setUPCE1expandToUPCA", &json!(true)).unwrap();
    bridge.dispatch("setIdDocumentMasterChecksumEnabled", &json!(true)).unwrap();

    let decoder = &bridge.config().unwrap().decoder;
    assert!(decoder.expand_to_upca(DecoderType::UpcE1).unwrap());
    assert!(!decoder.expand_to_upca(DecoderType::UpcE).unwrap());
    assert!(decoder.master_checksum(DecoderType::IdDocument).unwrap());
}

#[test]
fn test_custom_option_and_text_fields() {
    let mut bridge = session();
    bridge
        .dispatch("setCustomOption", &json!({"option": "decode.twoPass", "value": 1}))
        .unwrap();
    bridge.dispatch("setEncodingCharacterSet", &json!("ISO-8859-5")).unwrap();
    bridge.dispatch("setARHeaderTextFormat", &json!("[barcode_type]")).unwrap();

    let config = bridge.config().unwrap();
    assert_eq!(config.decoder.custom_options["decode.twoPass"], 1);
    assert_eq!(
        bridge.dispatch("getCustomOption", &json!("decode.twoPass")).unwrap(),
        ResponseValue::Int(1)
    );
    assert_eq!(
        code(&mut bridge, "getCustomOption", json!("decode.never")),
        "OptionNotFound"
    );
    assert_eq!(code(&mut bridge, "getCustomOption", Value::Null), "BadArgument");
    assert_eq!(
        bridge.dispatch("getEncodingCharacterSet", &Value::Null).unwrap(),
        ResponseValue::Text("ISO-8859-5".into())
    );
}

#[test]
fn test_float_fields_accept_integers() {
    let mut bridge = session();
    bridge.dispatch("setRoiLineWidth", &json!(5)).unwrap();
    assert_eq!(
        bridge.dispatch("getRoiLineWidth", &Value::Null).unwrap(),
        ResponseValue::Float(5.0)
    );
}

#[test]
fn test_view_commands() {
    let mut bridge = session();
    bridge.dispatch("setZoomFactor", &json!(2.5)).unwrap();
    assert_eq!(
        bridge.dispatch("getCurrentZoomFactor", &Value::Null).unwrap(),
        ResponseValue::Float(2.5)
    );

    bridge.dispatch("setCamera", &json!(1)).unwrap();
    assert_eq!(bridge.view().camera, CameraPosition::Front);
    assert_eq!(code(&mut bridge, "setCamera", json!(2)), "InvalidCameraPosition");

    bridge.dispatch("startScanning", &Value::Null).unwrap();
    bridge.dispatch("freezeScanning", &Value::Null).unwrap();
    assert_eq!(bridge.view().state, ScanState::Frozen);
    bridge.dispatch("stopScanning", &Value::Null).unwrap();
    assert_eq!(bridge.view().state, ScanState::Idle);
}

#[test]
fn test_scan_image() {
    let mut bridge = session();
    let png = ImageData::from_gray(3, 2, &[0; 6]).to_png().unwrap();
    bridge
        .dispatch("scanImage", &json!(STANDARD.encode(png)))
        .unwrap();
    assert_eq!(bridge.view().scanned_images, [(3, 2)]);

    assert_eq!(code(&mut bridge, "scanImage", json!("%%%")), "BadArgument");
    assert_eq!(
        code(&mut bridge, "scanImage", json!(STANDARD.encode(b"not a png"))),
        "BadArgument"
    );
}

#[test]
fn test_calls_before_session() {
    let mut bridge = ConfigBridge::new(HeadlessView::default());
    for name in ["getRoiLineWidth", "setBarcodeTypeEnabled", "startScanning", "configureBarkoder"] {
        assert_eq!(code(&mut bridge, name, Value::Null), "NoActiveConfig", "{name}");
    }
}
