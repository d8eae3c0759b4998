//! Scan results stream
//!
//! The host subscribes an [`EventSink`] once; every completed decode cycle
//! is encoded and pushed to it synchronously, so two outcomes never
//! interleave. An outcome that fails to encode sends nothing at all.

use log::{debug, error};

use crate::encoder::{self, EncodeError, WireFormat};
use crate::symbol::ScanOutcome;

/// Receiver of encoded scan outcome messages
pub trait EventSink {
    fn success(&mut self, message: String);
}

impl<F: FnMut(String)> EventSink for F {
    fn success(&mut self, message: String) {
        self(message)
    }
}

pub struct ScanResultsChannel {
    sink: Option<Box<dyn EventSink>>,
    format: WireFormat,
}

impl Default for ScanResultsChannel {
    fn default() -> Self {
        Self::new(WireFormat::default())
    }
}

impl ScanResultsChannel {
    pub fn new(format: WireFormat) -> Self {
        Self { sink: None, format }
    }

    pub fn format(&self) -> WireFormat {
        self.format
    }

    /// Subscribe; replaces any previous sink
    pub fn listen(&mut self, sink: impl EventSink + 'static) {
        self.sink = Some(Box::new(sink));
    }

    /// Unsubscribe request from the host, acknowledged without effect
    pub fn cancel(&mut self) {}

    /// Drop the sink when the session is torn down
    pub fn close(&mut self) {
        self.sink = None;
    }

    pub fn is_listening(&self) -> bool {
        self.sink.is_some()
    }

    /// Encode `outcome` and push it; returns whether a message was delivered
    pub fn publish(&mut self, outcome: &ScanOutcome) -> Result<bool, EncodeError> {
        let message = encoder::encode_as(outcome, self.format).map_err(|e| {
            error!("Scan outcome not sent: {e}");
            e
        })?;

        match self.sink.as_mut() {
            Some(sink) => {
                sink.success(message);
                Ok(true)
            }
            None => {
                debug!("No listener, dropping scan outcome");
                Ok(false)
            }
        }
    }
}
