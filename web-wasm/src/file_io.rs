//! ファイル読み込みとデコード

use barcode_scan_common::{
    run_decode, BarcodeDecoder, DecodeFailure, DecodeOutcome, DecoderOptions, SelectedImage,
};
use gloo::timers::future::TimeoutFuture;
use js_sys::Uint8Array;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::File;

/// File の中身を読み込んで SelectedImage にする
pub async fn read_image(file: &File) -> Result<SelectedImage, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    let bytes = Uint8Array::new(&buffer).to_vec();
    Ok(SelectedImage::new(file.name(), bytes).with_mime_type(file.type_()))
}

/// 中身を読む前の選択情報（ファイル名とMIMEのみ）
pub fn describe(file: &File) -> SelectedImage {
    SelectedImage::new(file.name(), Vec::new()).with_mime_type(file.type_())
}

/// デコード前に待つ時間。インジケータを1フレーム描画させる
pub const PAINT_DELAY_MS: u32 = 16;

/// 描画を1回挟んでから読み込み・デコードする
///
/// rxing の解析自体はメインスレッドで同期的に走る。
pub async fn decode_file<D>(decoder: &D, file: &File, options: &DecoderOptions) -> DecodeOutcome
where
    D: BarcodeDecoder + ?Sized,
{
    TimeoutFuture::new(PAINT_DELAY_MS).await;
    match read_image(file).await {
        Ok(image) => run_decode(decoder, &image, options),
        Err(e) => {
            gloo::console::error!("failed to read file", e);
            Err(DecodeFailure::Other("file read failed".into()))
        }
    }
}
