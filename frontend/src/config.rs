//! Application configuration.
//!
//! Centralized configuration for the archive upload widget. The
//! constants are compiled in; [`WidgetConfig`] carries the subset the
//! widget needs at runtime so tests and embedding pages can override it.

/// Backend API base URL.
///
/// Empty means same origin: the converter serves both the page and the API.
pub const BACKEND_URL: &str = "";

/// Period of the status polling timer (in milliseconds).
pub const POLL_INTERVAL_MS: u32 = 1000;

/// Maximum file size for upload (in bytes).
///
/// 1 GiB limit.
pub const MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Archive extensions accepted by the converter.
///
/// Compound entries are matched against the last two dot-separated
/// segments of the file name.
pub const ALLOWED_EXTENSIONS: &[&str] = &["zip", "tar", "gz", "bz2", "rar", "7z", "tar.gz", "tar.bz2"];

/// Status label the server reports once the conversion has finished.
pub const COMPLETE_STATUS: &str = "完成";

/// Step label shown while nothing is running.
pub const DEFAULT_STEP_LABEL: &str = "等待开始";

/// Debounce window for the cleanup button (in milliseconds).
pub const CLEANUP_DEBOUNCE_MS: u32 = 300;

// =============================================================================
// User-facing messages
// =============================================================================

pub const MSG_UPLOADING: &str = "正在上传文件...";
pub const MSG_UPLOADED: &str = "文件上传成功，开始处理...";
pub const MSG_CLEANUP_DONE: &str = "临时文件清理完成";

/// Runtime settings injected into [`crate::UploadWidget`].
#[derive(Clone, Debug, PartialEq)]
pub struct WidgetConfig {
    /// Prefix for every endpoint path.
    pub backend_url: String,
    /// Poll timer period.
    pub poll_interval_ms: u32,
    /// Upper bound on accepted file size, inclusive.
    pub max_file_size: u64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            backend_url: BACKEND_URL.to_string(),
            poll_interval_ms: POLL_INTERVAL_MS,
            max_file_size: MAX_FILE_SIZE,
        }
    }
}

impl WidgetConfig {
    /// Join an endpoint path onto the backend URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.backend_url.trim_end_matches('/'), path)
    }
}
