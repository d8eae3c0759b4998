//! Barkoder Bridge
//!
//! Glue between a cross-platform app shell and the Barkoder scanning engine.
//! The shell sends named commands with untyped JSON arguments; the bridge
//! coerces them, applies them to the session's [`ScannerConfig`] and answers
//! with a typed value or a `{code, message, details}` error. Completed decode
//! cycles travel the other way, encoded as JSON by the [`encoder`] and pushed
//! to an [`EventSink`].
//!
//! # Example
//!
//! ```
//! use barkoder_bridge::{ConfigBridge, DecodeResult, DecoderType, ScanOutcome};
//! use barkoder_bridge::view::HeadlessView;
//! use serde_json::json;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let mut bridge = ConfigBridge::new(HeadlessView::default());
//! bridge.start_session("LICENSE-KEY");
//! bridge.dispatch("setBarcodeTypeEnabled", &json!({"type": 2, "enabled": true})).unwrap();
//! bridge.dispatch("setRoiLineColor", &json!("#FF8800")).unwrap();
//!
//! let messages = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&messages);
//! bridge.listen(move |message: String| sink.borrow_mut().push(message));
//!
//! let outcome = ScanOutcome {
//!     results: vec![DecodeResult::new(DecoderType::Qr, b"https://barkoder.com".to_vec())],
//!     ..Default::default()
//! };
//! bridge.deliver(&outcome).unwrap();
//! assert!(messages.borrow()[0].starts_with(r#"{"decoderResults":"#));
//! ```

pub mod bridge;
pub mod color;
pub mod config;
pub mod encoder;
pub mod error;
pub mod events;
pub mod image_data;
pub mod symbol;
pub mod view;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export main types
pub use bridge::{ConfigBridge, Reply, ResponseValue};
pub use color::Color;
pub use config::ScannerConfig;
pub use encoder::WireFormat;
pub use error::{Error, Result};
pub use events::EventSink;
pub use image_data::ImageData;
pub use symbol::{DecodeResult, DecoderType, ScanOutcome};
