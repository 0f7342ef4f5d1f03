use std::path::Path;

use eframe::egui::Color32;
use microcar_compare::{BatchRequest, ResultSet, run_batch};

use crate::color::generate_palette;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Results of the last successful batch (None until one has run).
    pub results: Option<ResultSet>,

    /// One colour per car, same order as `results`.
    pub car_colors: Vec<Color32>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a finished batch and assign car colours.
    pub fn set_results(&mut self, results: ResultSet) {
        self.car_colors = generate_palette(results.len());
        self.results = Some(results);
        self.status_message = None;
    }

    /// Run `request` and keep either its results or its error message.
    ///
    /// A failed batch leaves the previous results on screen.
    pub fn run(&mut self, request: &BatchRequest) {
        match run_batch(request) {
            Ok(results) => {
                log::info!("Compared {} cars", results.len());
                self.set_results(results);
            }
            Err(e) => {
                log::error!("Batch aborted: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Load a manifest and run it.
    pub fn open_manifest(&mut self, path: &Path) {
        match BatchRequest::from_manifest(path) {
            Ok(request) => self.run(&request),
            Err(e) => {
                log::error!("Failed to load manifest: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Number of cars currently shown.
    pub fn car_count(&self) -> usize {
        self.results.as_ref().map_or(0, ResultSet::len)
    }

    /// Colour of car `index`.
    pub fn car_color(&self, index: usize) -> Color32 {
        self.car_colors
            .get(index)
            .copied()
            .unwrap_or(Color32::GRAY)
    }
}
