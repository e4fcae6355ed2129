//! 対話式の画像選択
//!
//! Web版の「＋」ボタン→ファイル選択ダイアログに相当する。
//! パスを入力するたびに1回分の選択サイクルを回し、画面状態を表示する。

use crate::error::{ScanError, Result};
use crate::report::render_state;
use crate::session::Session;
use barcode_scan_common::BarcodeDecoder;
use dialoguer::Input;
use std::io::Write;
use std::path::PathBuf;
use tracing::warn;

/// ダイアログ操作の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    /// ファイルが選ばれた
    Selected(PathBuf),
    /// 何も選ばずに閉じた
    Cancelled,
    /// 終了
    Quit,
}

/// ファイル選択ダイアログ
pub trait FilePicker {
    fn pick(&mut self) -> Result<PickerEvent>;
}

/// 端末でパスを入力させるピッカー
#[derive(Debug, Default)]
pub struct PromptPicker;

impl FilePicker for PromptPicker {
    fn pick(&mut self) -> Result<PickerEvent> {
        let input: String = Input::new()
            .with_prompt("画像ファイル (Enter:キャンセル q:終了)")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| ScanError::Prompt(e.to_string()))?;

        Ok(parse_picker_input(&input))
    }
}

/// 入力文字列を解釈（ドラッグ&ドロップで付く引用符は外す）
pub fn parse_picker_input(input: &str) -> PickerEvent {
    let trimmed = input.trim();
    match trimmed {
        "" => PickerEvent::Cancelled,
        "q" | "Q" => PickerEvent::Quit,
        _ => {
            let unquoted = trimmed
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .or_else(|| trimmed.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
                .unwrap_or(trimmed);
            PickerEvent::Selected(PathBuf::from(unquoted))
        }
    }
}

/// 終了が選ばれるまで選択→デコード→表示を繰り返す
pub async fn run_interactive<D, P, W>(session: &mut Session<D>, picker: &mut P, out: &mut W) -> Result<()>
where
    D: BarcodeDecoder + Send + Sync + 'static,
    P: FilePicker,
    W: Write,
{
    loop {
        session.open_picker();

        match picker.pick()? {
            PickerEvent::Quit => break,
            PickerEvent::Cancelled => {
                session.cancel_picker();
                continue;
            }
            PickerEvent::Selected(path) => match session.select_file(&path).await {
                Ok(_) => {}
                Err(ScanError::FileNotFound(p)) => {
                    // 選択できなかった扱い。状態は変えない
                    warn!(path = %p, "ファイルが見つかりません");
                    session.cancel_picker();
                    writeln!(out, "ファイルが見つかりません: {}", p)?;
                    continue;
                }
                Err(e) => return Err(e),
            },
        }

        writeln!(out, "---")?;
        render_state(session.state(), out)?;
        writeln!(out)?;
    }

    Ok(())
}
