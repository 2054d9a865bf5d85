//! Reactive view state shared by the page components.

use leptos::*;

use crate::types::{ConversionResult, PdfFileInfo, ProgressUpdate};
use crate::widget::WidgetView;

/// Every signal the widget writes, created once per page.
///
/// Components read the ones they render; a component left off the page
/// just leaves its signals unobserved.
#[derive(Clone, Copy)]
pub struct WidgetSignals {
    pub drag_active: RwSignal<bool>,
    pub progress_visible: RwSignal<bool>,
    pub status_message: RwSignal<String>,
    pub progress: RwSignal<ProgressUpdate>,
    pub error: RwSignal<Option<String>>,
    pub result: RwSignal<Option<ConversionResult>>,
    pub pdf_files: RwSignal<Vec<PdfFileInfo>>,
}

impl WidgetSignals {
    pub fn new() -> Self {
        Self {
            drag_active: create_rw_signal(false),
            progress_visible: create_rw_signal(false),
            status_message: create_rw_signal(String::new()),
            progress: create_rw_signal(ProgressUpdate::default()),
            error: create_rw_signal(None),
            result: create_rw_signal(None),
            pdf_files: create_rw_signal(Vec::new()),
        }
    }
}

impl Default for WidgetSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetView for WidgetSignals {
    fn set_drag_active(&self, active: bool) {
        self.drag_active.set(active);
    }

    fn show_progress(&self, message: &str) {
        self.progress_visible.set(true);
        self.status_message.set(message.to_string());
    }

    fn update_progress(&self, progress: &ProgressUpdate) {
        self.progress.set(progress.clone());
        self.status_message.set(progress.status.clone());
    }

    fn show_result(&self, result: &ConversionResult) {
        self.progress_visible.set(false);
        self.result.set(Some(result.clone()));
    }

    fn show_pdf_list(&self, files: &[PdfFileInfo]) {
        self.pdf_files.set(files.to_vec());
    }

    fn show_error(&self, message: &str) {
        self.progress_visible.set(false);
        self.error.set(Some(message.to_string()));
    }

    fn reset(&self, step_label: &str) {
        self.progress_visible.set(false);
        self.error.set(None);
        self.result.set(None);
        self.pdf_files.set(Vec::new());
        self.status_message.set(String::new());
        self.progress.set(ProgressUpdate {
            step: step_label.to_string(),
            ..ProgressUpdate::default()
        });
    }

    fn notify(&self, message: &str) {
        if let Err(e) = gloo_utils::window().alert_with_message(message) {
            log::error!("Failed to show alert: {:?}", e);
        }
    }
}
