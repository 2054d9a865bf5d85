//! HTTP client for the converter backend.

use gloo_net::http::{Request, Response};
use web_sys::{File, FormData};

use super::api::{decode_reply, submitted_task_id, ConversionApi};
use crate::config::WidgetConfig;
use crate::types::{
    CleanupResponse, PdfFileInfo, PdfListResponse, SelectedFile, StatusResponse, SubmitResponse, WidgetError,
    WidgetResult,
};

/// [`ConversionApi`] over `fetch`.
#[derive(Clone, Debug)]
pub struct HttpApi {
    config: WidgetConfig,
}

impl HttpApi {
    pub fn new(config: WidgetConfig) -> Self {
        Self { config }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            self.config.endpoint(path)
        }
    }
}

/// Read the body whatever the status: the backend puts `{"error": ...}`
/// in its 4xx/5xx replies.
async fn read_body(response: Response) -> WidgetResult<String> {
    if !response.ok() {
        log::debug!("Server replied {} {}", response.status(), response.status_text());
    }
    response
        .text()
        .await
        .map_err(|e| WidgetError::Transport(format!("Failed to read response: {}", e)))
}

fn transport(e: impl std::fmt::Display) -> WidgetError {
    WidgetError::Transport(e.to_string())
}

impl ConversionApi for HttpApi {
    type Upload = File;

    async fn submit(&self, file: &SelectedFile<File>) -> WidgetResult<String> {
        let form_data = FormData::new().map_err(|e| transport(format!("Failed to create FormData: {:?}", e)))?;
        form_data
            .append_with_blob("file", &file.handle)
            .map_err(|e| transport(format!("Failed to append file: {:?}", e)))?;

        let response = Request::post(&self.url("/upload"))
            .body(form_data)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;

        let reply: SubmitResponse = decode_reply(&read_body(response).await?)?;
        submitted_task_id(reply)
    }

    async fn poll_status(&self, task_id: &str) -> WidgetResult<StatusResponse> {
        let path = format!("/status/{}", String::from(js_sys::encode_uri_component(task_id)));
        let response = Request::get(&self.url(&path)).send().await.map_err(transport)?;
        decode_reply(&read_body(response).await?)
    }

    async fn cleanup(&self) -> WidgetResult<()> {
        let response = Request::post(&self.url("/cleanup")).send().await.map_err(transport)?;
        let reply: CleanupResponse = decode_reply(&read_body(response).await?)?;
        if let Some(message) = reply.message {
            log::info!("🧹 {}", message);
        }
        Ok(())
    }

    async fn list_pdfs(&self, list_url: &str) -> WidgetResult<Vec<PdfFileInfo>> {
        let response = Request::get(&self.url(list_url)).send().await.map_err(transport)?;
        let reply: PdfListResponse = decode_reply(&read_body(response).await?)?;
        Ok(reply.pdf_files)
    }
}
