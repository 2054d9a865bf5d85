//! Archive drop zone with file picker fallback.
//!
//! Forwards drag highlighting, dropped files and picked files to the
//! widget; everything else happens there.

use leptos::leptos_dom::helpers::WindowListenerHandle;
use leptos::*;
use web_sys::{DragEvent, Event, File, HtmlInputElement};

use super::WidgetSignals;
use crate::types::SelectedFile;
use crate::BrowserWidget;

/// Stop the browser from opening files dropped outside the drop zone.
///
/// The returned handles must be removed when the page goes away.
pub fn suppress_page_drag() -> Vec<WindowListenerHandle> {
    vec![
        window_event_listener(ev::dragenter, prevent_drag_default),
        window_event_listener(ev::dragover, prevent_drag_default),
        window_event_listener(ev::dragleave, prevent_drag_default),
        window_event_listener(ev::drop, prevent_drag_default),
    ]
}

fn prevent_drag_default(ev: DragEvent) {
    ev.prevent_default();
}

fn stop_drag(ev: &DragEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn dropped_files(ev: &DragEvent) -> Vec<SelectedFile<File>> {
    let Some(files) = ev.data_transfer().and_then(|transfer| transfer.files()) else {
        return Vec::new();
    };
    (0..files.length())
        .filter_map(|i| files.get(i))
        .map(SelectedFile::from_web)
        .collect()
}

#[component]
pub fn UploadArea(widget: BrowserWidget, signals: WidgetSignals) -> impl IntoView {
    let file_input = create_node_ref::<html::Input>();

    let on_drag_enter = {
        let widget = widget.clone();
        move |ev: DragEvent| {
            stop_drag(&ev);
            widget.drag_hover(true);
        }
    };
    let on_drag_over = {
        let widget = widget.clone();
        move |ev: DragEvent| {
            stop_drag(&ev);
            widget.drag_hover(true);
        }
    };
    let on_drag_leave = {
        let widget = widget.clone();
        move |ev: DragEvent| {
            stop_drag(&ev);
            widget.drag_hover(false);
        }
    };
    let on_drop = {
        let widget = widget.clone();
        move |ev: DragEvent| {
            stop_drag(&ev);
            widget.drop_files(dropped_files(&ev));
        }
    };

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            widget.select_file(SelectedFile::from_web(file));
        }
        // Picking the same file twice must fire `change` again
        input.set_value("");
    };

    let open_picker = move |_| {
        if let Some(input) = file_input.get() {
            input.click();
        }
    };

    view! {
        <div
            class="upload-area"
            id="uploadArea"
            class:dragover=move || signals.drag_active.get()
            on:dragenter=on_drag_enter
            on:dragover=on_drag_over
            on:dragleave=on_drag_leave
            on:drop=on_drop
            on:click=open_picker
        >
            <div class="upload-icon">"📦"</div>
            <div class="upload-text">"拖拽压缩包到这里"</div>
            <div class="upload-hint">"或点击选择文件"</div>
            <div class="upload-hint mt-20">
                "支持格式：ZIP、TAR、TAR.GZ、TAR.BZ2、RAR、7Z"
                <br/>
                "最大 1GB"
            </div>
            <input
                type="file"
                id="fileInput"
                accept=".zip,.tar,.gz,.bz2,.rar,.7z"
                style="display:none"
                node_ref=file_input
                on:click=|ev| ev.stop_propagation()
                on:change=on_file_change
            />
        </div>
    }
}
