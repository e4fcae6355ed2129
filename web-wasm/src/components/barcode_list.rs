//! 読み取り済みバーコード一覧

use leptos::prelude::*;

#[component]
pub fn BarcodeList(barcodes: Signal<Vec<String>>) -> impl IntoView {
    view! {
        <Show when=move || !barcodes.get().is_empty()>
            <div class="barcode-list">
                <h2>"Scanned Barcodes:"</h2>
                <ul>
                    // 重複しないので値そのものをキーにできる
                    <For
                        each=move || barcodes.get()
                        key=|barcode| barcode.clone()
                        children=|barcode| view! { <li class="barcode-item">{barcode}</li> }
                    />
                </ul>
            </div>
        </Show>
    }
}
