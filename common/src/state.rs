//! 画面状態とその遷移
//!
//! 状態はすべて `ScanState` が持ち、`apply(Action)` でのみ更新する。
//! 遷移はI/Oを伴わない。デコードの開始はフロントエンド側の責務で、
//! `Transition::StartDecode` を受けて行う。
//!
//! 状態遷移（選択1回ごと）:
//! `Idle -> Selecting -> Decoding -> {Succeeded, Failed}`
//! 新しい `FileSelected` はどの状態からでもサイクルをやり直す。

use crate::barcodes::ScannedBarcodes;
use crate::error::DecodeFailure;
use crate::types::{ScanPhase, SelectedImage, SelectionId};
use tracing::{debug, warn};

/// デコード1回分の結果
pub type DecodeOutcome = Result<Vec<String>, DecodeFailure>;

/// 画面からのイベント
#[derive(Debug, Clone)]
pub enum Action {
    /// ファイル選択ダイアログを開いた
    OpenPicker,
    /// ダイアログを閉じた（未選択）
    PickerCancelled,
    /// ファイルが選択された
    FileSelected(SelectedImage),
    /// デコードが終わった
    DecodeFinished {
        selection: SelectionId,
        outcome: DecodeOutcome,
    },
}

/// `apply` の結果、呼び出し側が行うべきこと
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// 何もしない
    None,
    /// このIDでデコードを開始する
    StartDecode(SelectionId),
    /// デコード成功。新規に追加された件数
    Recorded { added: usize },
    /// デコード失敗（エラー表示済み）
    Failed(DecodeFailure),
    /// 古い選択の結果なので破棄した
    Stale(SelectionId),
}

/// 画面状態
#[derive(Debug, Clone, Default)]
pub struct ScanState {
    selected: Option<SelectedImage>,
    barcodes: ScannedBarcodes,
    error: Option<DecodeFailure>,
    phase: ScanPhase,
    current: Option<SelectionId>,
    last_issued: SelectionId,
}

impl ScanState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, action: Action) -> Transition {
        match action {
            Action::OpenPicker => {
                // デコード中に開いても結果待ちは続ける
                if self.phase.is_settled() {
                    self.phase = ScanPhase::Selecting;
                }
                Transition::None
            }
            Action::PickerCancelled => {
                if self.phase == ScanPhase::Selecting {
                    self.phase = ScanPhase::Idle;
                }
                Transition::None
            }
            Action::FileSelected(image) => {
                let id = self.last_issued.next();
                self.last_issued = id;
                self.current = Some(id);
                self.error = None;
                self.phase = ScanPhase::Decoding;
                debug!(selection = %id, file = %image.file_name, bytes = image.len(), "画像を選択");
                self.selected = Some(image);
                Transition::StartDecode(id)
            }
            Action::DecodeFinished { selection, outcome } => {
                if self.current != Some(selection) {
                    debug!(selection = %selection, current = ?self.current, "古いデコード結果を破棄");
                    return Transition::Stale(selection);
                }
                self.finish(outcome)
            }
        }
    }

    fn finish(&mut self, outcome: DecodeOutcome) -> Transition {
        match outcome {
            Ok(texts) => {
                let added = texts.iter().filter(|t| self.record_barcode(t)).count();
                self.phase = ScanPhase::Succeeded;
                Transition::Recorded { added }
            }
            Err(failure) => {
                let file = self.selected_file_name().unwrap_or_default().to_string();
                warn!(file = %file, error = %failure, "デコード失敗");
                self.error = Some(failure.clone());
                self.phase = ScanPhase::Failed;
                Transition::Failed(failure)
            }
        }
    }

    /// 未登録のときのみ一覧に追加
    pub fn record_barcode(&mut self, text: &str) -> bool {
        self.barcodes.record(text)
    }

    pub fn selected_file_name(&self) -> Option<&str> {
        self.selected.as_ref().map(|s| s.file_name.as_str())
    }

    pub fn barcodes(&self) -> &ScannedBarcodes {
        &self.barcodes
    }

    pub fn error(&self) -> Option<&DecodeFailure> {
        self.error.as_ref()
    }

    /// エラーパネルに出すメッセージ
    pub fn error_message(&self) -> Option<&'static str> {
        self.error.as_ref().map(DecodeFailure::user_message)
    }

    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    pub fn is_decoding(&self) -> bool {
        self.phase == ScanPhase::Decoding
    }
}
