use leptos::*;

use super::WidgetSignals;
use crate::types::ProgressUpdate;

#[component]
pub fn ProgressPanel(signals: WidgetSignals) -> impl IntoView {
    view! {
        <div
            class="progress-container"
            id="progressContainer"
            style:display=move || if signals.progress_visible.get() { "block" } else { "none" }
        >
            <div class="status-message" id="statusMessage">
                {move || signals.status_message.get()}
            </div>
            <div class="progress-bar">
                <div
                    class="progress-fill"
                    id="progressFill"
                    style:width=move || signals.progress.with(ProgressUpdate::percent_text)
                ></div>
            </div>
            <div class="progress-text" id="progressText">
                {move || signals.progress.with(ProgressUpdate::percent_text)}
            </div>
            <div class="status-text" id="statusText">
                {move || signals.progress.with(|p| p.step.clone())}
            </div>
        </div>
    }
}
