//! エラー型定義
//!
//! デコード失敗はユーザー向けに2分類のみ:
//! - NotFound: 画像内にバーコードが無い
//! - Other: それ以外の失敗（画像形式エラー、デコーダ例外など）

use thiserror::Error;

/// 画像にバーコードが無い場合のメッセージ
pub const NOT_FOUND_MESSAGE: &str = "No barcode found in the selected image.";

/// その他のデコード失敗メッセージ
pub const DECODE_FAILURE_MESSAGE: &str = "Failed to decode the barcode. Please try another image.";

/// デコード失敗
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeFailure {
    #[error("barcode not found")]
    NotFound,

    #[error("decode error: {0}")]
    Other(String),
}

impl DecodeFailure {
    /// 画面に表示するメッセージ
    pub fn user_message(&self) -> &'static str {
        match self {
            DecodeFailure::NotFound => NOT_FOUND_MESSAGE,
            DecodeFailure::Other(_) => DECODE_FAILURE_MESSAGE,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DecodeFailure::NotFound)
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, DecodeFailure>;
