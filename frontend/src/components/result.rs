//! Terminal views: conversion result and error message.

use leptos::*;

use super::WidgetSignals;
use crate::types::{ConversionResult, PdfFileInfo};
use crate::utils::{format_duration, format_file_size};
use crate::BrowserWidget;

fn display(visible: bool) -> &'static str {
    if visible {
        "block"
    } else {
        "none"
    }
}

#[component]
pub fn ResultPanel(widget: BrowserWidget, signals: WidgetSignals) -> impl IntoView {
    let summary = move || signals.result.with(|r| r.as_ref().map(ConversionResult::summary).unwrap_or_default());
    let elapsed = move || {
        signals
            .result
            .with(|r| r.as_ref().map(|r| format!("耗时 {}", format_duration(r.elapsed_secs))))
            .unwrap_or_default()
    };
    let download_url = move || signals.result.with(|r| r.as_ref().and_then(|r| r.download_url.clone()));

    view! {
        <div
            class="result-container"
            id="resultContainer"
            style:display=move || display(signals.result.with(Option::is_some))
        >
            <div class="success-message">{summary}</div>
            <div class="elapsed">{elapsed}</div>
            <a
                class="download-button"
                id="downloadBtn"
                href=move || download_url().unwrap_or_default()
                style:display=move || display(download_url().is_some())
                on:click=move |_| widget.download_clicked()
            >
                "下载PDF文件"
            </a>
            <ul class="pdf-list">
                <For
                    each=move || signals.pdf_files.get()
                    key=|file| file.index
                    children=move |file: PdfFileInfo| {
                        view! {
                            <li class="pdf-item">
                                <a href=file.download_url.clone()>{file.filename.clone()}</a>
                                <span class="pdf-size">" (" {format_file_size(file.size)} ")"</span>
                            </li>
                        }
                    }
                />
            </ul>
        </div>
    }
}

#[component]
pub fn ErrorMessage(signals: WidgetSignals) -> impl IntoView {
    view! {
        <div
            class="error-message"
            id="errorMessage"
            style:display=move || display(signals.error.with(Option::is_some))
        >
            {move || signals.error.get().unwrap_or_default()}
        </div>
    }
}
