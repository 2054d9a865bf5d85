//! What the widget needs from the page.

use crate::types::{ConversionResult, PdfFileInfo, ProgressUpdate};

/// Rendering side of [`super::UploadWidget`].
///
/// Implementations collect their element handles once; a part of the page
/// that is absent simply ignores the call.
pub trait WidgetView: 'static {
    /// Toggle the drop target highlight.
    fn set_drag_active(&self, active: bool);

    /// Reveal the progress view with a status message.
    fn show_progress(&self, message: &str);

    /// Bar width, percentage text, step and status message.
    fn update_progress(&self, progress: &ProgressUpdate);

    /// Hide progress, reveal the result view.
    fn show_result(&self, result: &ConversionResult);

    /// Per-file links below the result.
    fn show_pdf_list(&self, files: &[PdfFileInfo]);

    /// Hide progress, reveal the error view.
    fn show_error(&self, message: &str);

    /// Back to the pristine page: all views hidden, bar at 0%.
    fn reset(&self, step_label: &str);

    /// Blocking notification (`window.alert` in the browser).
    fn notify(&self, message: &str);
}
