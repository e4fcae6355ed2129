//! エラーパネル

use leptos::prelude::*;

#[component]
pub fn ErrorPanel(message: Signal<Option<&'static str>>) -> impl IntoView {
    move || {
        message.get().map(|message| {
            view! {
                <div class="error-panel" role="alert">
                    <p>{message}</p>
                </div>
            }
        })
    }
}
