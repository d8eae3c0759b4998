//! Camera and preview collaborator
//!
//! The bridge forwards camera, preview and scanning-state commands to a
//! [`ScannerView`]. Platform shells implement it over the real engine view;
//! [`HeadlessView`] has no camera and only records what it was asked to do.

use log::{debug, info};

use crate::config::{CameraPosition, ScannerConfig};
use crate::image_data::ImageData;

pub trait ScannerView {
    fn max_zoom_factor(&self) -> f32;
    fn current_zoom_factor(&self) -> f32;
    fn set_zoom_factor(&mut self, factor: f32);

    fn is_flash_available(&self) -> bool;
    fn set_flash_enabled(&mut self, enabled: bool);

    fn start_camera(&mut self);
    fn start_scanning(&mut self, config: &ScannerConfig);
    fn stop_scanning(&mut self);
    fn pause_scanning(&mut self);
    fn freeze_scanning(&mut self);
    fn unfreeze_scanning(&mut self);
    fn capture_image(&mut self);

    /// Run one decode pass over a still image
    fn scan_image(&mut self, image: ImageData, config: &ScannerConfig);

    fn set_camera(&mut self, position: CameraPosition);
    fn set_dynamic_exposure(&mut self, level: i64);
    fn set_centric_focus_and_exposure(&mut self, enabled: bool);
    fn set_video_stabilization(&mut self, enabled: bool);

    fn version(&self) -> String;
    fn lib_version(&self) -> String;
    fn show_log_messages(&mut self, enabled: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Scanning,
    Paused,
    Frozen,
}

/// View without a camera
#[derive(Debug, Clone)]
pub struct HeadlessView {
    pub zoom: f32,
    pub max_zoom: f32,
    pub flash: bool,
    pub camera_started: bool,
    pub state: ScanState,
    pub camera: CameraPosition,
    pub dynamic_exposure: i64,
    pub centric_focus: bool,
    pub video_stabilization: bool,
    pub log_messages: bool,
    pub captured_images: usize,

    /// Dimensions of every image handed to `scan_image`
    pub scanned_images: Vec<(u32, u32)>,
}

impl Default for HeadlessView {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            max_zoom: 8.0,
            flash: false,
            camera_started: false,
            state: ScanState::Idle,
            camera: CameraPosition::Back,
            dynamic_exposure: 0,
            centric_focus: false,
            video_stabilization: false,
            log_messages: false,
            captured_images: 0,
            scanned_images: Vec::new(),
        }
    }
}

impl ScannerView for HeadlessView {
    fn max_zoom_factor(&self) -> f32 {
        self.max_zoom
    }

    fn current_zoom_factor(&self) -> f32 {
        self.zoom
    }

    fn set_zoom_factor(&mut self, factor: f32) {
        self.zoom = factor.clamp(1.0, self.max_zoom);
    }

    fn is_flash_available(&self) -> bool {
        false
    }

    fn set_flash_enabled(&mut self, enabled: bool) {
        self.flash = enabled;
    }

    fn start_camera(&mut self) {
        self.camera_started = true;
    }

    fn start_scanning(&mut self, config: &ScannerConfig) {
        self.camera_started = true;
        self.state = ScanState::Scanning;
        info!(
            "Scanning started with {} symbologies enabled",
            config.decoder.enabled_symbologies().count()
        );
    }

    fn stop_scanning(&mut self) {
        self.camera_started = false;
        self.state = ScanState::Idle;
    }

    fn pause_scanning(&mut self) {
        self.state = ScanState::Paused;
    }

    fn freeze_scanning(&mut self) {
        self.state = ScanState::Frozen;
    }

    fn unfreeze_scanning(&mut self) {
        if self.state == ScanState::Frozen {
            self.state = ScanState::Scanning;
        }
    }

    fn capture_image(&mut self) {
        self.captured_images += 1;
    }

    fn scan_image(&mut self, image: ImageData, _config: &ScannerConfig) {
        debug!("Scanning {}x{} image", image.width, image.height);
        self.scanned_images.push((image.width, image.height));
    }

    fn set_camera(&mut self, position: CameraPosition) {
        self.camera = position;
    }

    fn set_dynamic_exposure(&mut self, level: i64) {
        self.dynamic_exposure = level;
    }

    fn set_centric_focus_and_exposure(&mut self, enabled: bool) {
        self.centric_focus = enabled;
    }

    fn set_video_stabilization(&mut self, enabled: bool) {
        self.video_stabilization = enabled;
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    fn lib_version(&self) -> String {
        "headless".to_string()
    }

    fn show_log_messages(&mut self, enabled: bool) {
        self.log_messages = enabled;
    }
}
