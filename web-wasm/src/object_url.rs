//! Object URL の生存期間管理
//!
//! 選択時に作成し、値が破棄された時点で revoke する。
//! プレビューを差し替えると古い URL は自動的に解放される。

use wasm_bindgen::JsValue;
use web_sys::{Blob, Url};

#[derive(Debug)]
pub struct ObjectUrl {
    url: String,
}

impl ObjectUrl {
    pub fn new(blob: &Blob) -> Result<Self, JsValue> {
        let url = Url::create_object_url_with_blob(blob)?;
        Ok(Self { url })
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        if let Err(e) = Url::revoke_object_url(&self.url) {
            web_sys::console::warn_2(&"revokeObjectURL failed".into(), &e);
        }
    }
}
