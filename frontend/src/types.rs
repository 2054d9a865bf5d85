//! Common types used across the frontend application.
//!
//! This module centralizes type definitions to avoid duplication
//! and ensure consistency across components.
//!
//! # Categories
//!
//! - **Widget Types** - phase, task and selected file
//! - **Display Types** - what the view renders
//! - **API Types** - backend response structures
//! - **Error Types** - frontend error handling

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::COMPLETE_STATUS;
use crate::utils::format_file_size;

// =============================================================================
// Widget Types
// =============================================================================

/// Lifecycle phase of an [`crate::UploadWidget`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Nothing in progress.
    Idle,
    /// File validated, upload request in flight.
    Submitting,
    /// Server accepted the file, status timer running.
    Polling,
    /// Conversion finished successfully.
    Complete,
    /// Validation, upload or conversion failed.
    Failed,
}

/// One in-flight conversion, as last reported by the server.
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    /// Opaque identifier issued by `/upload`
    pub task_id: String,
    /// Free-text phase label
    pub status: String,
    /// 0..=100
    pub progress_percent: f64,
    /// Human readable description of the running step
    pub current_step: String,
    /// Present once the conversion is complete
    pub download_url: Option<String>,
    /// Number of produced PDFs, at least 1 once complete
    pub result_count: u32,
    /// Client clock when the upload was acknowledged
    pub started_at_ms: f64,
}

impl Task {
    pub fn new(task_id: impl Into<String>, started_at_ms: f64) -> Self {
        Self {
            task_id: task_id.into(),
            status: String::new(),
            progress_percent: 0.0,
            current_step: String::new(),
            download_url: None,
            result_count: 1,
            started_at_ms,
        }
    }

    /// Fold a status reply into the task.
    pub fn apply(&mut self, reply: &StatusResponse) {
        if let Some(status) = &reply.status {
            self.status = status.clone();
        }
        if let Some(progress) = reply.progress {
            self.progress_percent = clamp_percent(progress);
        }
        if let Some(step) = &reply.current_step {
            self.current_step = step.clone();
        }
        if reply.download_url.is_some() {
            self.download_url = reply.download_url.clone();
        }
        self.result_count = reply.result_count();
    }

    pub fn progress(&self) -> ProgressUpdate {
        ProgressUpdate {
            percent: self.progress_percent,
            step: self.current_step.clone(),
            status: self.status.clone(),
        }
    }
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// A file chosen by the user, together with whatever the HTTP client needs
/// to upload it (a `web_sys::File` in the browser).
#[derive(Clone, Debug)]
pub struct SelectedFile<H> {
    pub name: String,
    /// Size in bytes
    pub size: u64,
    pub handle: H,
}

impl<H> SelectedFile<H> {
    pub fn new(name: impl Into<String>, size: u64, handle: H) -> Self {
        Self {
            name: name.into(),
            size,
            handle,
        }
    }
}

impl SelectedFile<web_sys::File> {
    /// Wrap a browser file handle.
    pub fn from_web(file: web_sys::File) -> Self {
        let size = file.size().max(0.0) as u64;
        Self::new(file.name(), size, file)
    }
}

// =============================================================================
// Display Types
// =============================================================================

/// Progress bar contents.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ProgressUpdate {
    pub percent: f64,
    pub step: String,
    pub status: String,
}

impl ProgressUpdate {
    /// CSS width and label, e.g. `40%`.
    pub fn percent_text(&self) -> String {
        format!("{}%", self.percent)
    }
}

/// Result view contents.
#[derive(Clone, Debug, PartialEq)]
pub struct ConversionResult {
    pub download_url: Option<String>,
    pub pdf_count: u32,
    pub elapsed_secs: u64,
}

impl ConversionResult {
    /// Success line shown above the download button.
    pub fn summary(&self) -> String {
        format!("成功生成 {} 个PDF文件", self.pdf_count)
    }
}

// =============================================================================
// API Response Types
// =============================================================================

/// Reply of `POST /upload`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Reply of `GET /status/{task_id}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub current_step: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub pdf_count: Option<u32>,
    #[serde(default)]
    pub pdf_list_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl StatusResponse {
    /// Whether the server reports the conversion as finished.
    pub fn is_complete(&self) -> bool {
        self.status.as_deref() == Some(COMPLETE_STATUS)
    }

    /// Produced PDF count; a missing or zero count reads as one.
    pub fn result_count(&self) -> u32 {
        self.pdf_count.filter(|count| *count > 0).unwrap_or(1)
    }
}

/// Reply of `POST /cleanup`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CleanupResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Reply of `GET /download/list/{task_id}`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PdfListResponse {
    #[serde(default)]
    pub pdf_files: Vec<PdfFileInfo>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One converted PDF available for download.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PdfFileInfo {
    pub index: u32,
    pub filename: String,
    /// Size in bytes
    pub size: u64,
    pub download_url: String,
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend widget errors.
///
/// `Display` is the text shown to the user.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum WidgetError {
    /// File name does not end with an accepted archive extension.
    #[error("不支持的文件格式。请上传ZIP、TAR、RAR或7Z格式的文件。")]
    UnsupportedFormat,

    /// File is larger than the upload limit.
    #[error("文件大小超过{}限制。", limit_label(.limit))]
    FileTooLarge { size: u64, limit: u64 },

    /// Request never produced a usable reply.
    #[error("{0}")]
    Transport(String),

    /// Server answered with an explicit `error` field.
    #[error("{0}")]
    Server(String),
}

/// `1073741824` reads as `1GB`.
fn limit_label(limit: &u64) -> String {
    format_file_size(*limit).replace(' ', "")
}

/// Result type alias for widget operations.
pub type WidgetResult<T> = Result<T, WidgetError>;
