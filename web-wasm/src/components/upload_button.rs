//! 画像選択ボタン
//!
//! 表示されるのは「＋」ボタンのみ。押すと非表示の file input をクリックし、
//! ブラウザのファイル選択ダイアログを開く。

use leptos::html::Input;
use leptos::prelude::*;
use web_sys::{Event, File, HtmlInputElement};

#[component]
pub fn UploadButton<FO, FC, FS>(
    on_open: FO,
    on_cancel: FC,
    on_file_selected: FS,
) -> impl IntoView
where
    FO: Fn() + 'static + Clone,
    FC: Fn() + 'static + Clone,
    FS: Fn(File) + 'static + Clone,
{
    let file_input: NodeRef<Input> = NodeRef::new();

    let on_click = move |_| {
        if let Some(input) = file_input.get() {
            on_open();
            input.click();
        }
    };

    let on_change = {
        let on_cancel = on_cancel.clone();
        move |ev: Event| {
            let input: HtmlInputElement = event_target(&ev);
            let file = input.files().and_then(|files| files.get(0));
            // 同じファイルを選び直しても change が発火するように空にする
            input.set_value("");

            match file {
                Some(file) => on_file_selected(file),
                None => on_cancel(),
            }
        }
    };

    let on_dialog_cancel = move |_: Event| on_cancel();

    view! {
        <input
            type="file"
            accept="image/*"
            class="hidden"
            style="display: none"
            node_ref=file_input
            on:change=on_change
            on:cancel=on_dialog_cancel
        />
        <button
            class="btn btn-primary add-button"
            title="Select image"
            on:click=on_click
        >
            <svg xmlns="http://www.w3.org/2000/svg" class="icon" fill="none" viewBox="0 0 24 24" stroke="currentColor">
                <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M12 4v16m8-8H4" />
            </svg>
        </button>
    }
}
