//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"压缩包转PDF"</h1>
            <p class="subtitle">
                "上传包含图片的压缩包，服务器会把每个文件夹转换为一个PDF文件。 "
                "转换完成后可以打包下载，也可以单独下载每个PDF。"
            </p>
        </div>
    }
}
