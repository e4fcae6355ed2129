//! メインアプリケーションコンポーネント

use std::sync::Arc;

use barcode_scan_common::{
    Action, DecodeFailure, DecoderOptions, RxingDecoder, ScanState, SelectionId, Transition,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::File;

use crate::components::{
    barcode_list::BarcodeList,
    decoding_indicator::DecodingIndicator,
    error_panel::ErrorPanel,
    header::Header,
    image_preview::ImagePreview,
    upload_button::UploadButton,
};
use crate::file_io;
use crate::object_url::ObjectUrl;

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // 画面状態はすべて ScanState が持つ
    let (state, set_state) = signal(ScanState::new());
    // プレビュー用URL。差し替え・破棄時に revoke される
    let (preview, set_preview) = signal(None::<Arc<ObjectUrl>>);

    let options = DecoderOptions::default();
    let decoder = Arc::new(RxingDecoder::new(options));

    let on_open = move || {
        set_state.update(|s| {
            s.apply(Action::OpenPicker);
        });
    };

    let on_cancel = move || {
        set_state.update(|s| {
            s.apply(Action::PickerCancelled);
        });
    };

    let on_file_selected = move |file: File| {
        match ObjectUrl::new(&file) {
            Ok(url) => set_preview.set(Some(Arc::new(url))),
            Err(e) => {
                gloo::console::error!("createObjectURL failed", e);
                set_preview.set(None);
            }
        }

        let image = file_io::describe(&file);
        if !image.looks_like_image() {
            // accept="image/*" はダイアログ上の絞り込みのみ
            gloo::console::warn!("selected file is not an image type", image.file_name.clone());
        }

        let selection = set_state.try_update(|s| s.apply(Action::FileSelected(image)));
        let Some(Transition::StartDecode(selection)) = selection else {
            return;
        };

        let decoder = Arc::clone(&decoder);
        spawn_local(async move {
            let outcome = file_io::decode_file(decoder.as_ref(), &file, &options).await;
            finish_decode(set_state, selection, outcome);
        });
    };

    let file_name = Signal::derive(move || state.with(|s| s.selected_file_name().map(str::to_string)));
    let preview_src = Signal::derive(move || preview.with(|p| p.as_ref().map(|u| u.as_str().to_string())));
    let barcodes = Signal::derive(move || state.with(|s| s.barcodes().as_slice().to_vec()));
    let error_message = Signal::derive(move || state.with(|s| s.error_message()));
    let is_decoding = Signal::derive(move || state.with(|s| s.is_decoding()));
    let phase = move || state.with(|s| s.phase().as_str());

    view! {
        <main class="container" data-phase=phase>
            <Header />

            <UploadButton
                on_open=on_open
                on_cancel=on_cancel
                on_file_selected=on_file_selected
            />

            <ImagePreview file_name=file_name src=preview_src />

            <Show when=move || is_decoding.get()>
                <DecodingIndicator />
            </Show>

            <ErrorPanel message=error_message />

            <BarcodeList barcodes=barcodes />
        </main>
    }
}

/// デコード結果を状態に反映し、失敗はコンソールに出す
fn finish_decode(
    set_state: WriteSignal<ScanState>,
    selection: SelectionId,
    outcome: Result<Vec<String>, DecodeFailure>,
) {
    let transition = set_state.try_update(|s| s.apply(Action::DecodeFinished { selection, outcome }));

    match transition {
        Some(Transition::Failed(DecodeFailure::NotFound)) => {
            gloo::console::warn!("no barcode found", selection.to_string());
        }
        Some(Transition::Failed(DecodeFailure::Other(message))) => {
            gloo::console::error!("decode failed", selection.to_string(), message);
        }
        Some(Transition::Stale(id)) => {
            gloo::console::debug!("stale decode result ignored", id.to_string());
        }
        _ => {}
    }
}
