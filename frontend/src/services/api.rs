//! The converter endpoints as seen by the widget.
//!
//! Replies are JSON objects that either carry the payload or an `error`
//! string; [`decode_reply`] turns the latter into [`WidgetError::Server`]
//! whatever HTTP status the server used.

use serde::de::DeserializeOwned;

use crate::types::{
    CleanupResponse, PdfFileInfo, PdfListResponse, SelectedFile, StatusResponse, SubmitResponse, WidgetError,
    WidgetResult,
};

/// Remote conversion service.
#[allow(async_fn_in_trait)]
pub trait ConversionApi: 'static {
    /// What a [`SelectedFile`] carries for the upload body.
    type Upload: 'static;

    /// `POST /upload`; returns the new task id.
    async fn submit(&self, file: &SelectedFile<Self::Upload>) -> WidgetResult<String>;

    /// `GET /status/{task_id}`
    async fn poll_status(&self, task_id: &str) -> WidgetResult<StatusResponse>;

    /// `POST /cleanup`
    async fn cleanup(&self) -> WidgetResult<()>;

    /// Follow the `pdf_list_url` of a finished task.
    async fn list_pdfs(&self, list_url: &str) -> WidgetResult<Vec<PdfFileInfo>>;

    /// Download click notification. Nothing depends on it succeeding.
    fn track_download(&self, download_url: &str, pdf_count: u32) {
        log::info!("⬇️  Download of {} PDF file(s) from {}", pdf_count, download_url);
    }
}

/// Replies that may carry a server-side `error` field.
pub trait ServerReply {
    fn server_error(&self) -> Option<&str>;
}

macro_rules! server_reply {
    ($($ty:ty),*) => {
        $(impl ServerReply for $ty {
            fn server_error(&self) -> Option<&str> {
                self.error.as_deref().filter(|e| !e.is_empty())
            }
        })*
    };
}

server_reply!(SubmitResponse, StatusResponse, CleanupResponse, PdfListResponse);

/// Parse a reply body, surfacing an `error` field as [`WidgetError::Server`].
pub fn decode_reply<T>(body: &str) -> WidgetResult<T>
where
    T: DeserializeOwned + ServerReply,
{
    let reply: T =
        serde_json::from_str(body).map_err(|e| WidgetError::Transport(format!("Failed to parse response: {}", e)))?;

    if let Some(error) = reply.server_error() {
        return Err(WidgetError::Server(error.to_string()));
    }
    Ok(reply)
}

/// Extract the task id from an accepted upload.
pub fn submitted_task_id(reply: SubmitResponse) -> WidgetResult<String> {
    match reply.task_id {
        Some(task_id) if !task_id.is_empty() => Ok(task_id),
        _ => Err(WidgetError::Server("服务器未返回任务ID".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_reply_with_task_id() {
        let body = r#"{"task_id": "abc", "message": "文件上传成功，开始处理"}"#;
        let reply: SubmitResponse = decode_reply(body).unwrap();
        assert_eq!(submitted_task_id(reply).unwrap(), "abc");
    }

    #[test]
    fn test_submit_reply_with_error() {
        let body = r#"{"error": "不支持的文件格式"}"#;
        let result = decode_reply::<SubmitResponse>(body);
        assert_eq!(result.unwrap_err(), WidgetError::Server("不支持的文件格式".to_string()));
    }

    #[test]
    fn test_submit_reply_without_task_id() {
        let reply: SubmitResponse = decode_reply("{}").unwrap();
        assert!(matches!(submitted_task_id(reply), Err(WidgetError::Server(_))));
    }

    #[test]
    fn test_null_or_empty_error_is_not_an_error() {
        assert!(decode_reply::<StatusResponse>(r#"{"status": "处理中", "error": null}"#).is_ok());
        assert!(decode_reply::<CleanupResponse>(r#"{"error": ""}"#).is_ok());
    }

    #[test]
    fn test_garbage_body_is_transport_failure() {
        let result = decode_reply::<StatusResponse>("<html>502 Bad Gateway</html>");
        assert!(matches!(result, Err(WidgetError::Transport(_))));
    }

    #[test]
    fn test_pdf_list_deserialization() {
        let body = r#"{
            "pdf_files": [
                {"index": 0, "filename": "chapter1.pdf", "size": 2048, "download_url": "/download/pdf/abc/0"},
                {"index": 1, "filename": "chapter2.pdf", "size": 4096, "download_url": "/download/pdf/abc/1"}
            ]
        }"#;

        let reply: PdfListResponse = decode_reply(body).unwrap();
        assert_eq!(reply.pdf_files.len(), 2);
        assert_eq!(reply.pdf_files[1].filename, "chapter2.pdf");
    }
}
