use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;

use barkoder_bridge::encoder::{encode, encode_legacy};
use barkoder_bridge::symbol::{NamedImage, Point};
use barkoder_bridge::view::HeadlessView;
use barkoder_bridge::{ConfigBridge, DecodeResult, DecoderType, ImageData, ScanOutcome};

// Outcome shapes, from a bare 1-D hit to a document scan with crops
struct Scenario {
    name: &'static str,
    results: usize,
    thumbnail_side: u32,
    frame_side: Option<u32>,
    sub_images: bool,
}

const SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "single_no_images",
        results: 1,
        thumbnail_side: 0,
        frame_side: None,
        sub_images: false,
    },
    Scenario {
        name: "multicode_thumbnails",
        results: 8,
        thumbnail_side: 64,
        frame_side: None,
        sub_images: false,
    },
    Scenario {
        name: "id_document_with_frame",
        results: 1,
        thumbnail_side: 96,
        frame_side: Some(640),
        sub_images: true,
    },
];

fn gradient(side: u32) -> ImageData {
    let gray: Vec<u8> = (0..side * side).map(|i| (i % 251) as u8).collect();
    ImageData::from_gray(side, side, &gray)
}

fn outcome(scenario: &Scenario) -> ScanOutcome {
    let results = (0..scenario.results)
        .map(|i| {
            let mut result = DecodeResult::new(DecoderType::Code128, format!("ITEM-{i:06}"));
            result.location = Some([
                Point { x: 10.0, y: 10.0 },
                Point { x: 90.0, y: 10.0 },
                Point { x: 90.0, y: 40.0 },
                Point { x: 10.0, y: 40.0 },
            ]);
            if scenario.sub_images {
                result.barcode_type = DecoderType::IdDocument;
                result.extra.insert("documentType".into(), json!("passport"));
                for name in ["main", "document", "signature", "picture"] {
                    result.images.push(NamedImage {
                        name: name.into(),
                        image: gradient(128),
                    });
                }
            }
            result
        })
        .collect();

    let thumbnails = (scenario.thumbnail_side > 0)
        .then(|| vec![gradient(scenario.thumbnail_side); scenario.results]);

    ScanOutcome {
        results,
        thumbnails,
        frame_image: scenario.frame_side.map(gradient),
    }
}

fn benchmark_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for scenario in SCENARIOS {
        let outcome = outcome(scenario);

        group.bench_with_input(
            BenchmarkId::new("multi_result", scenario.name),
            &outcome,
            |b, outcome| b.iter(|| encode(black_box(outcome)).map(|m| m.len())),
        );
        group.bench_with_input(
            BenchmarkId::new("legacy", scenario.name),
            &outcome,
            |b, outcome| b.iter(|| encode_legacy(black_box(outcome)).map(|m| m.len())),
        );
    }

    group.finish();
}

fn benchmark_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    let mut bridge = ConfigBridge::new(HeadlessView::default());
    bridge.start_session("bench");

    let calls = [
        ("setRoiLineColor", json!("#80FF8800")),
        ("setBarcodeTypeLengthRange", json!({"type": 4, "min": 4, "max": 10})),
        ("isBarcodeTypeEnabled", json!(17)),
        ("getRegionOfInterest", json!(null)),
    ];

    for (name, argument) in &calls {
        group.bench_with_input(BenchmarkId::from_parameter(name), argument, |b, argument| {
            b.iter(|| bridge.dispatch(black_box(name), black_box(argument)))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_encode, benchmark_dispatch);
criterion_main!(benches);
