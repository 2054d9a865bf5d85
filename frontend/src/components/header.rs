use leptos::*;

use crate::config::CLEANUP_DEBOUNCE_MS;
use crate::runtime::BrowserRuntime;
use crate::utils::Debounced;
use crate::BrowserWidget;

#[component]
pub fn Header(widget: BrowserWidget) -> impl IntoView {
    // A burst of clicks sends a single cleanup request
    let cleanup = Debounced::new(BrowserRuntime, CLEANUP_DEBOUNCE_MS, move || {
        log::info!("🧹 Requesting server cleanup");
        widget.cleanup();
    });

    view! {
        <header>
            <div class="header-left">
                <a href="/" class="logo">"ARCHIVE → PDF"</a>
                <span class="badge">"≤ 1GB"</span>
            </div>
            <div class="header-right">
                <button
                    class="cleanup-button"
                    id="cleanupBtn"
                    on:click=move |_| cleanup.call()
                >
                    "清理临时文件"
                </button>
            </div>
        </header>
    }
}
