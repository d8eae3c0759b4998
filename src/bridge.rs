//! Command dispatch bridge
//!
//! [`ConfigBridge`] receives `(name, argument)` calls from the host shell,
//! validates the argument against the shape the command declares and applies
//! it to the live [`ScannerConfig`] or forwards it to the [`ScannerView`].
//!
//! Calls must be serialized onto the thread that owns the bridge; nothing
//! here locks.
//!
//! # Example
//!
//! ```
//! use barkoder_bridge::bridge::{ConfigBridge, ResponseValue};
//! use barkoder_bridge::view::HeadlessView;
//! use serde_json::json;
//!
//! let mut bridge = ConfigBridge::new(HeadlessView::default());
//! assert!(bridge.dispatch("getThreadsLimit", &json!(null)).is_err());
//!
//! bridge.start_session("LICENSE-KEY");
//! bridge
//!     .dispatch("setBarcodeTypeLengthRange", &json!({"type": 4, "min": 4, "max": 10}))
//!     .unwrap();
//! assert_eq!(
//!     bridge.dispatch("getBarcodeTypeLengthRange", &json!(4)).unwrap(),
//!     ResponseValue::IntList(vec![4, 10])
//! );
//! ```

use log::{debug, info, warn};
use serde::Serialize;
use serde_json::Value;

use crate::config::ScannerConfig;
use crate::encoder::{EncodeError, WireFormat};
use crate::error::{Error, ErrorReply, Result};
use crate::events::{EventSink, ScanResultsChannel};
use crate::symbol::ScanOutcome;
use crate::view::ScannerView;

pub mod args;
pub mod commands;

use args::Args;
use commands::Action;

/// Successful answer to a call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseValue {
    /// Pure mutation, serialized as `null`
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    IntList(Vec<i64>),
    FloatList(Vec<f64>),
}

/// Wire form of a call's outcome; every call gets exactly one
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Reply {
    Result(ResponseValue),
    Error(ErrorReply),
}

impl From<Result<ResponseValue>> for Reply {
    fn from(result: Result<ResponseValue>) -> Self {
        match result {
            Ok(value) => Self::Result(value),
            Err(e) => Self::Error(e.to_reply()),
        }
    }
}

#[derive(Debug, Default)]
pub enum Session {
    #[default]
    NoSession,
    Active(ScannerConfig),
}

pub struct ConfigBridge<V> {
    session: Session,
    view: V,
    results: ScanResultsChannel,
}

impl<V: ScannerView> ConfigBridge<V> {
    pub fn new(view: V) -> Self {
        Self::with_format(view, WireFormat::default())
    }

    pub fn with_format(view: V, format: WireFormat) -> Self {
        Self {
            session: Session::NoSession,
            view,
            results: ScanResultsChannel::new(format),
        }
    }

    /// Create the session's config; any previous session is replaced
    ///
    /// Licensing is checked by the engine in the background and does not
    /// gate configuration calls.
    pub fn start_session(&mut self, license_key: &str) {
        if matches!(self.session, Session::Active(_)) {
            warn!("Session already active, replacing its config");
        }
        self.session = Session::Active(ScannerConfig::new(license_key));
        info!("Session started");
    }

    /// Stop scanning, drop the config and the results listener
    pub fn end_session(&mut self) {
        if let Session::Active(_) = std::mem::take(&mut self.session) {
            self.view.stop_scanning();
            info!("Session ended");
        }
        self.results.close();
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> Result<&ScannerConfig> {
        match &self.session {
            Session::Active(config) => Ok(config),
            Session::NoSession => Err(Error::NoActiveConfig),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Run one command
    pub fn dispatch(&mut self, name: &str, argument: &Value) -> Result<ResponseValue> {
        debug!("dispatch {name} {argument}");

        let result = self.run(name, argument);
        if let Err(e) = &result {
            warn!("{name} failed: {e}");
        }
        result
    }

    /// Run one command and wrap the outcome for the wire
    pub fn answer(&mut self, name: &str, argument: &Value) -> Reply {
        self.dispatch(name, argument).into()
    }

    fn run(&mut self, name: &str, argument: &Value) -> Result<ResponseValue> {
        let (name, action) =
            commands::lookup(name).ok_or_else(|| Error::UnknownCommand(name.to_string()))?;
        let Session::Active(config) = &mut self.session else {
            return Err(Error::NoActiveConfig);
        };

        let args = Args::new(name, argument);
        match action {
            Action::Config(run) => run(config, args),
            Action::View(run) => run(&mut self.view, config, args),
        }
    }

    /// Subscribe to scan outcomes
    pub fn listen(&mut self, sink: impl EventSink + 'static) {
        self.results.listen(sink);
    }

    /// Unsubscribe request; acknowledged without effect
    pub fn cancel(&mut self) {
        self.results.cancel();
    }

    /// Engine callback for a completed decode cycle
    pub fn deliver(&mut self, outcome: &ScanOutcome) -> Result<bool, EncodeError> {
        self.results.publish(outcome)
    }
}
