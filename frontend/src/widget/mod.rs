//! Upload and progress state machine.
//!
//! ```text
//!   Idle ──select_file──▶ Submitting ──task_id──▶ Polling ──"完成"──▶ Complete
//!     ▲                        │                     │
//!     │                        └──error──▶ Failed ◀──┘ error
//!     └──────────────── reset ─────────────────────────┘
//! ```
//!
//! [`UploadWidget`] owns at most one [`PollHandle`]. Every reply is checked
//! against the state it was issued for before it touches the view, so a
//! late answer for a superseded upload or task is dropped.

mod poller;
mod view;


pub use poller::PollHandle;
pub use view::WidgetView;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::config::{WidgetConfig, DEFAULT_STEP_LABEL, MSG_CLEANUP_DONE, MSG_UPLOADED, MSG_UPLOADING};
use crate::runtime::{Cancel, Runtime};
use crate::services::ConversionApi;
use crate::types::{ConversionResult, Phase, SelectedFile, StatusResponse, Task, WidgetError, WidgetResult};
use crate::utils::{format_duration, format_file_size};
use crate::validation::validate_file;

struct WidgetState<T: Cancel> {
    phase: Phase,
    task: Option<Task>,
    result: Option<ConversionResult>,
    poller: Option<PollHandle<T>>,
    /// Bumped by every submission, reset and dispose.
    generation: u64,
    mounted: bool,
}

struct Inner<A, V, R: Runtime> {
    api: A,
    view: V,
    runtime: R,
    config: WidgetConfig,
    state: RefCell<WidgetState<R::Timer>>,
}

/// Archive upload widget bound to one page.
///
/// Cloning is cheap and yields another handle to the same widget.
pub struct UploadWidget<A, V, R: Runtime> {
    inner: Rc<Inner<A, V, R>>,
}

impl<A, V, R: Runtime> Clone for UploadWidget<A, V, R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<A, V, R> UploadWidget<A, V, R>
where
    A: ConversionApi,
    V: WidgetView,
    R: Runtime,
{
    pub fn new(api: A, view: V, runtime: R, config: WidgetConfig) -> Self {
        Self {
            inner: Rc::new(Inner {
                api,
                view,
                runtime,
                config,
                state: RefCell::new(WidgetState {
                    phase: Phase::Idle,
                    task: None,
                    result: None,
                    poller: None,
                    generation: 0,
                    mounted: false,
                }),
            }),
        }
    }

    fn from_weak(weak: &Weak<Inner<A, V, R>>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Start accepting files.
    pub fn mount(&self) {
        self.inner.state.borrow_mut().mounted = true;
        self.inner.view.reset(DEFAULT_STEP_LABEL);
        log::info!("📄 Upload widget mounted");
    }

    /// Stop polling and ignore anything still in flight.
    pub fn dispose(&self) {
        self.stop_polling();
        {
            let mut state = self.inner.state.borrow_mut();
            state.generation += 1;
            state.mounted = false;
            state.phase = Phase::Idle;
            state.task = None;
            state.result = None;
        }
        log::info!("Upload widget disposed");
    }

    pub fn phase(&self) -> Phase {
        self.inner.state.borrow().phase
    }

    /// Snapshot of the active task, if any.
    pub fn task(&self) -> Option<Task> {
        self.inner.state.borrow().task.clone()
    }

    pub fn is_polling(&self) -> bool {
        self.inner.state.borrow().poller.is_some()
    }

    fn is_mounted(&self) -> bool {
        self.inner.state.borrow().mounted
    }

    fn is_generation(&self, generation: u64) -> bool {
        self.inner.state.borrow().generation == generation
    }

    /// Whether `task_id` is the task the running timer belongs to.
    fn is_active_task(&self, task_id: &str) -> bool {
        let state = self.inner.state.borrow();
        state.phase == Phase::Polling
            && state
                .poller
                .as_ref()
                .is_some_and(|poller| poller.task_id() == task_id)
    }

    // =========================================================================
    // File intake
    // =========================================================================

    /// Highlight the drop target while a drag hovers it.
    pub fn drag_hover(&self, active: bool) {
        self.inner.view.set_drag_active(active);
    }

    /// Drop handler; only the first file is used.
    pub fn drop_files(&self, files: Vec<SelectedFile<A::Upload>>) {
        self.inner.view.set_drag_active(false);

        let count = files.len();
        if let Some(first) = files.into_iter().next() {
            if count > 1 {
                log::debug!("Ignoring {} extra dropped file(s)", count - 1);
            }
            self.select_file(first);
        }
    }

    /// Validate `file` and upload it, replacing whatever ran before.
    pub fn select_file(&self, file: SelectedFile<A::Upload>) {
        if !self.is_mounted() {
            log::warn!("Upload widget is not mounted, ignoring {}", file.name);
            return;
        }
        if self.phase() != Phase::Idle {
            self.reset();
        }

        log::info!("📦 Selected {} ({})", file.name, format_file_size(file.size));

        if let Err(e) = validate_file(&file.name, file.size, self.inner.config.max_file_size) {
            log::warn!("Rejected {}: {}", file.name, e);
            self.fail(&e.to_string());
            return;
        }

        let generation = {
            let mut state = self.inner.state.borrow_mut();
            state.generation += 1;
            state.phase = Phase::Submitting;
            state.generation
        };
        self.inner.view.show_progress(MSG_UPLOADING);

        let widget = self.clone();
        self.inner.runtime.spawn(async move {
            let result = widget.inner.api.submit(&file).await;
            widget.on_submitted(generation, result);
        });
    }

    fn on_submitted(&self, generation: u64, result: WidgetResult<String>) {
        if !self.is_generation(generation) {
            log::debug!("Discarding upload reply for a superseded submission");
            return;
        }

        match result {
            Ok(task_id) => {
                log::info!("✅ Upload accepted, task {}", task_id);
                self.inner.state.borrow_mut().task = Some(Task::new(task_id.clone(), self.inner.runtime.now_ms()));
                self.inner.view.show_progress(MSG_UPLOADED);
                self.start_polling(task_id);
            }
            Err(WidgetError::Transport(detail)) => {
                log::error!("❌ Upload failed: {}", detail);
                self.fail(&format!("上传失败: {}", detail));
            }
            Err(e) => {
                log::error!("❌ Upload rejected: {}", e);
                self.fail(&e.to_string());
            }
        }
    }

    // =========================================================================
    // Polling
    // =========================================================================

    /// Replace any running timer with one polling `task_id`.
    fn start_polling(&self, task_id: String) {
        self.stop_polling();

        let weak = Rc::downgrade(&self.inner);
        let tick_task = task_id.clone();
        let timer = self.inner.runtime.interval(self.inner.config.poll_interval_ms, move || {
            if let Some(widget) = Self::from_weak(&weak) {
                widget.tick(&tick_task);
            }
        });

        let mut state = self.inner.state.borrow_mut();
        state.poller = Some(PollHandle::new(task_id, timer));
        state.phase = Phase::Polling;
    }

    fn stop_polling(&self) {
        let poller = self.inner.state.borrow_mut().poller.take();
        if let Some(poller) = poller {
            log::debug!("Stopped polling task {}", poller.task_id());
            poller.cancel();
        }
    }

    fn tick(&self, task_id: &str) {
        if !self.is_active_task(task_id) {
            return;
        }

        let widget = self.clone();
        let task_id = task_id.to_string();
        self.inner.runtime.spawn(async move {
            let result = widget.inner.api.poll_status(&task_id).await;
            widget.on_status(&task_id, result);
        });
    }

    fn on_status(&self, task_id: &str, result: WidgetResult<StatusResponse>) {
        if !self.is_active_task(task_id) {
            log::debug!("Ignoring status for inactive task {}", task_id);
            return;
        }

        let reply = match result {
            Ok(reply) => reply,
            Err(WidgetError::Transport(detail)) => {
                log::warn!("Status check for {} failed, retrying: {}", task_id, detail);
                return;
            }
            Err(e) => {
                log::error!("❌ Task {} failed: {}", task_id, e);
                self.fail(&e.to_string());
                return;
            }
        };

        let progress = {
            let mut state = self.inner.state.borrow_mut();
            state.task.as_mut().map(|task| {
                task.apply(&reply);
                task.progress()
            })
        };
        if let Some(progress) = progress {
            self.inner.view.update_progress(&progress);
        }

        if reply.is_complete() {
            self.complete(&reply);
        }
    }

    // =========================================================================
    // Terminal states
    // =========================================================================

    fn complete(&self, reply: &StatusResponse) {
        self.stop_polling();

        let now = self.inner.runtime.now_ms();
        let (result, generation) = {
            let mut state = self.inner.state.borrow_mut();
            let task = state.task.take();
            let started_at = task.as_ref().map_or(now, |t| t.started_at_ms);
            let result = ConversionResult {
                download_url: task.as_ref().and_then(|t| t.download_url.clone()),
                pdf_count: reply.result_count(),
                elapsed_secs: ((now - started_at).max(0.0) / 1000.0) as u64,
            };
            state.phase = Phase::Complete;
            state.result = Some(result.clone());
            (result, state.generation)
        };

        log::info!(
            "🎉 {} in {}",
            result.summary(),
            format_duration(result.elapsed_secs)
        );
        self.inner.view.show_result(&result);

        if let Some(list_url) = reply.pdf_list_url.clone() {
            self.fetch_pdf_list(generation, list_url);
        }
    }

    fn fetch_pdf_list(&self, generation: u64, list_url: String) {
        let widget = self.clone();
        self.inner.runtime.spawn(async move {
            match widget.inner.api.list_pdfs(&list_url).await {
                Ok(files) => {
                    if widget.is_generation(generation) && widget.phase() == Phase::Complete {
                        widget.inner.view.show_pdf_list(&files);
                    }
                }
                Err(e) => log::warn!("Could not list converted PDFs: {}", e),
            }
        });
    }

    fn fail(&self, message: &str) {
        self.stop_polling();
        {
            let mut state = self.inner.state.borrow_mut();
            state.phase = Phase::Failed;
            state.task = None;
        }
        self.inner.view.show_error(message);
    }

    /// Hide every view, zero the bar and forget the current task.
    pub fn reset(&self) {
        self.stop_polling();
        {
            let mut state = self.inner.state.borrow_mut();
            state.generation += 1;
            state.phase = Phase::Idle;
            state.task = None;
            state.result = None;
        }
        self.inner.view.reset(DEFAULT_STEP_LABEL);
    }

    // =========================================================================
    // Side actions
    // =========================================================================

    /// Record a click on the download button.
    pub fn download_clicked(&self) {
        let Some(result) = self.inner.state.borrow().result.clone() else {
            return;
        };
        let Some(url) = result.download_url else {
            log::warn!("Download clicked without a download URL");
            return;
        };
        self.inner.api.track_download(&url, result.pdf_count);
    }

    /// Ask the server to purge its temporary files.
    pub fn cleanup(&self) {
        let widget = self.clone();
        self.inner.runtime.spawn(async move {
            let message = match widget.inner.api.cleanup().await {
                Ok(()) => MSG_CLEANUP_DONE.to_string(),
                Err(WidgetError::Transport(detail)) => format!("清理请求失败: {}", detail),
                Err(e) => format!("清理失败: {}", e),
            };
            widget.inner.view.notify(&message);
        });
    }
}
