//! デコード中表示

use leptos::prelude::*;

#[component]
pub fn DecodingIndicator() -> impl IntoView {
    view! {
        <div class="decoding-indicator">
            <div class="spinner" />
            <p class="text-muted">"Decoding..."</p>
        </div>
    }
}
