//! 選択画像のプレビュー

use leptos::prelude::*;

#[component]
pub fn ImagePreview(
    file_name: Signal<Option<String>>,
    src: Signal<Option<String>>,
) -> impl IntoView {
    move || {
        file_name.get().map(|name| {
            view! {
                <div class="image-preview">
                    <p>"Selected image: " {name}</p>
                    {move || src.get().map(|src| view! { <img src=src alt="selected image" /> })}
                </div>
            }
        })
    }
}
