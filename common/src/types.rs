//! スキャン状態の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - SelectedImage: 選択中の画像（ファイル名 + バイト列）
//! - SelectionId: 選択ごとの連番
//! - ScanPhase: 1回の選択サイクルの状態

use serde::{Deserialize, Serialize};

/// 選択された画像
///
/// 新しい選択のたびに丸ごと置き換える。履歴は持たない。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedImage {
    pub file_name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl SelectedImage {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: None,
            bytes,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        let mime_type = mime_type.into();
        self.mime_type = if mime_type.is_empty() { None } else { Some(mime_type) };
        self
    }

    /// `image/*` 以外と分かっている場合のみ false（ブラウザのフィルタは参考程度）
    pub fn looks_like_image(&self) -> bool {
        self.mime_type
            .as_deref()
            .map(|m| m.starts_with("image/"))
            .unwrap_or(true)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// 選択ごとに割り当てる連番
///
/// デコード結果はどの選択から発行されたかをこのIDで持ち回る。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SelectionId(pub u64);

impl SelectionId {
    pub fn next(self) -> Self {
        SelectionId(self.0 + 1)
    }
}

impl std::fmt::Display for SelectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 選択サイクルの状態
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScanPhase {
    #[default]
    Idle,
    Selecting,
    Decoding,
    Succeeded,
    Failed,
}

impl ScanPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanPhase::Idle => "idle",
            ScanPhase::Selecting => "selecting",
            ScanPhase::Decoding => "decoding",
            ScanPhase::Succeeded => "succeeded",
            ScanPhase::Failed => "failed",
        }
    }

    /// 結果待ちでない状態（次の選択を受け付けた直後を除く）
    pub fn is_settled(&self) -> bool {
        matches!(self, ScanPhase::Idle | ScanPhase::Succeeded | ScanPhase::Failed)
    }
}
