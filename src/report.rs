//! 結果の表示・出力
//!
//! Web版の画面（選択中の画像・バーコード一覧・エラーパネル）と同じ内容を
//! テキストまたはJSONで出力する。

use crate::error::Result;
use crate::session::SelectionResult;
use barcode_scan_common::{ScanState, ScannedBarcodes};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// ファイルごとの結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub file_name: String,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FileStatus {
    Decoded,
    NotFound,
    Error,
}

/// 一括デコードの結果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub barcodes: ScannedBarcodes,
    pub files: Vec<FileReport>,
}

impl From<&SelectionResult> for FileReport {
    fn from(result: &SelectionResult) -> Self {
        let (status, values, error) = match &result.outcome {
            Ok(values) => (FileStatus::Decoded, values.clone(), None),
            Err(failure) => {
                let status = if failure.is_not_found() {
                    FileStatus::NotFound
                } else {
                    FileStatus::Error
                };
                (status, Vec::new(), Some(failure.user_message().to_string()))
            }
        };
        FileReport {
            file_name: result.file_name.clone(),
            status,
            values,
            error,
        }
    }
}

impl ScanReport {
    pub fn new(state: &ScanState, results: &[SelectionResult]) -> Self {
        Self {
            barcodes: state.barcodes().clone(),
            files: results.iter().map(FileReport::from).collect(),
        }
    }

    pub fn failed_count(&self) -> usize {
        self.files.iter().filter(|f| f.status != FileStatus::Decoded).count()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn render<W: Write>(&self, out: &mut W) -> Result<()> {
        for file in &self.files {
            match (&file.status, &file.error) {
                (FileStatus::Decoded, _) => {
                    writeln!(out, "✔ {} → {}", file.file_name, file.values.join(", "))?
                }
                (_, Some(error)) => writeln!(out, "✖ {}: {}", file.file_name, error)?,
                (_, None) => writeln!(out, "✖ {}", file.file_name)?,
            }
        }
        writeln!(out)?;
        render_barcodes(self.barcodes.as_slice(), out)
    }
}

fn render_barcodes<W: Write>(barcodes: &[String], out: &mut W) -> Result<()> {
    if barcodes.is_empty() {
        writeln!(out, "読み取り済みバーコード: なし")?;
        return Ok(());
    }
    writeln!(out, "読み取り済みバーコード:")?;
    for barcode in barcodes {
        writeln!(out, "  - {}", barcode)?;
    }
    Ok(())
}

/// 現在の画面状態を表示（対話モード用）
pub fn render_state<W: Write>(state: &ScanState, out: &mut W) -> Result<()> {
    if let Some(file_name) = state.selected_file_name() {
        writeln!(out, "選択中の画像: {}", file_name)?;
    }
    if let Some(message) = state.error_message() {
        writeln!(out, "エラー: {}", message)?;
    }
    render_barcodes(state.barcodes().as_slice(), out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use barcode_scan_common::{
        Action, DecodeFailure, SelectedImage, SelectionId, Transition, NOT_FOUND_MESSAGE,
    };

    fn result(name: &str, outcome: barcode_scan_common::DecodeOutcome) -> SelectionResult {
        SelectionResult {
            selection: SelectionId(1),
            file_name: name.into(),
            outcome,
            transition: Transition::None,
        }
    }

    #[test]
    fn test_file_report_status() {
        let ok = FileReport::from(&result("a.png", Ok(vec!["1".into()])));
        assert_eq!(ok.status, FileStatus::Decoded);
        assert_eq!(ok.error, None);

        let nf = FileReport::from(&result("b.png", Err(DecodeFailure::NotFound)));
        assert_eq!(nf.status, FileStatus::NotFound);
        assert_eq!(nf.error.as_deref(), Some(NOT_FOUND_MESSAGE));

        let other = FileReport::from(&result("c.png", Err(DecodeFailure::Other("x".into()))));
        assert_eq!(other.status, FileStatus::Error);
        assert_ne!(other.error, nf.error);
    }

    #[test]
    fn test_report_json() {
        let mut state = ScanState::new();
        state.apply(Action::FileSelected(SelectedImage::new("a.png", vec![1])));
        state.apply(Action::DecodeFinished {
            selection: SelectionId(1),
            outcome: Ok(vec!["12345".into()]),
        });

        let report = ScanReport::new(
            &state,
            &[
                result("a.png", Ok(vec!["12345".into()])),
                result("b.png", Err(DecodeFailure::NotFound)),
            ],
        );
        assert_eq!(report.failed_count(), 1);

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["barcodes"], serde_json::json!(["12345"]));
        assert_eq!(json["files"][0]["status"], "decoded");
        assert_eq!(json["files"][1]["status"], "notFound");
        assert!(json["files"][0].get("error").is_none());
    }

    #[test]
    fn test_render_state() {
        let mut state = ScanState::new();
        state.apply(Action::FileSelected(SelectedImage::new("blank.png", vec![1])));
        state.apply(Action::DecodeFinished {
            selection: SelectionId(1),
            outcome: Err(DecodeFailure::NotFound),
        });

        let mut out = Vec::new();
        render_state(&state, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("選択中の画像: blank.png"));
        assert!(text.contains(NOT_FOUND_MESSAGE));
        assert!(text.contains("なし"));
    }
}
