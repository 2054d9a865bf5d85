//! Archive → PDF - Frontend Rust/Leptos Application
//!
//! A WebAssembly page for uploading an image archive to the conversion
//! server and following the job until its PDFs can be downloaded.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (cleanup button)                                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ConverterPage                                               │
//! │  ├── Hero (title, description)                              │
//! │  ├── UploadArea (drag & drop, file picker)                  │
//! │  ├── ProgressPanel / ErrorMessage / ResultPanel             │
//! │  └── UploadWidget (state machine, one per page)             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`config`] - Endpoints, limits and messages
//! - [`types`] - Task, wire types and errors
//! - [`validation`] - File name and size checks
//! - [`widget`] - Upload / polling state machine
//! - [`services`] - Backend communication
//! - [`runtime`] - Spawning and timers
//! - [`components`] - UI components
//! - [`utils`] - Formatting and debounce helpers

use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;
use wasm_bindgen::prelude::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod validation;
pub mod utils;
pub mod runtime;
pub mod services;
pub mod widget;
pub mod components;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Widget
    Phase, SelectedFile, Task,
    // Display
    ConversionResult, ProgressUpdate,
    // API
    CleanupResponse, PdfFileInfo, PdfListResponse, StatusResponse, SubmitResponse,
    // Errors
    WidgetError, WidgetResult,
};

// Widget
pub use widget::{PollHandle, UploadWidget, WidgetView};

// Runtime
pub use runtime::{BrowserRuntime, Cancel, Runtime};

// Components
pub use components::*;

// Services
pub use services::*;

/// The widget as wired in the browser.
pub type BrowserWidget = UploadWidget<HttpApi, WidgetSignals, BrowserRuntime>;

// =============================================================================
// Application Entry Point
// =============================================================================

/// Install the panic hook and logger, then mount the app on `<body>`.
#[wasm_bindgen]
pub fn run() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 Archive → PDF - Starting Leptos App");

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="压缩包转PDF"/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=ConverterPage/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn ConverterPage() -> impl IntoView {
    let config = WidgetConfig::default();
    let signals = WidgetSignals::new();
    let widget: BrowserWidget = UploadWidget::new(HttpApi::new(config.clone()), signals, BrowserRuntime, config);
    widget.mount();

    let drag_guards = suppress_page_drag();
    let unload_guard = {
        let widget = widget.clone();
        window_event_listener(ev::beforeunload, move |_| widget.dispose())
    };

    on_cleanup({
        let widget = widget.clone();
        move || {
            for guard in drag_guards {
                guard.remove();
            }
            unload_guard.remove();
            widget.dispose();
        }
    });

    view! {
        <Header widget=widget.clone()/>

        <div class="container">
            <Hero/>
            <UploadArea widget=widget.clone() signals=signals/>
            <ProgressPanel signals=signals/>
            <ErrorMessage signals=signals/>
            <ResultPanel widget=widget signals=signals/>
        </div>

        <Footer/>
    }
}
