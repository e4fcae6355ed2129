//! 読み取り済みバーコード一覧
//!
//! 挿入順・重複なし・追記のみ。消去はプロセス再起動（ページ再読み込み）のみ。

use serde::{Deserialize, Serialize};

/// 読み取り済みバーコード（重複なし、初出順）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScannedBarcodes(Vec<String>);

impl ScannedBarcodes {
    pub fn new() -> Self {
        Self::default()
    }

    /// 未登録なら末尾に追加。追加した場合 true
    pub fn record(&mut self, text: &str) -> bool {
        if self.contains(text) {
            return false;
        }
        self.0.push(text.to_string());
        true
    }

    pub fn contains(&self, text: &str) -> bool {
        self.0.iter().any(|b| b == text)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a ScannedBarcodes {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ScannedBarcodes {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut barcodes = ScannedBarcodes::new();
        for text in iter {
            barcodes.record(text.as_ref());
        }
        barcodes
    }
}
