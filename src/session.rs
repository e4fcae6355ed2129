//! スキャンセッション
//!
//! `ScanState` を保持し、選択された画像のデコードを
//! ブロッキングスレッドで実行して結果を状態に反映する。

use crate::error::{ScanError, Result};
use barcode_scan_common::{
    run_decode, Action, BarcodeDecoder, DecodeFailure, DecodeOutcome, DecoderOptions, ScanState,
    SelectedImage, SelectionId, Transition,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 1回の選択の結果
#[derive(Debug, Clone)]
pub struct SelectionResult {
    pub selection: SelectionId,
    pub file_name: String,
    pub outcome: DecodeOutcome,
    pub transition: Transition,
}

pub struct Session<D> {
    state: ScanState,
    decoder: Arc<D>,
    options: DecoderOptions,
}

impl<D> Session<D>
where
    D: BarcodeDecoder + Send + Sync + 'static,
{
    pub fn new(decoder: D, options: DecoderOptions) -> Self {
        Self {
            state: ScanState::new(),
            decoder: Arc::new(decoder),
            options,
        }
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    /// ファイル選択ダイアログを開いた
    pub fn open_picker(&mut self) {
        self.state.apply(Action::OpenPicker);
    }

    /// ダイアログが閉じられた
    pub fn cancel_picker(&mut self) {
        self.state.apply(Action::PickerCancelled);
    }

    /// パスから画像を読み込んで選択
    ///
    /// 読み込みに失敗した場合もデコード失敗として状態に反映する。
    pub async fn select_file(&mut self, path: &Path) -> Result<SelectionResult> {
        if !path.is_file() {
            return Err(ScanError::FileNotFound(path.display().to_string()));
        }
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(self.select_image(SelectedImage::new(file_name, bytes)).await),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ファイル読み込み失敗");
                let selection = self.begin(SelectedImage::new(file_name.clone(), Vec::new()));
                let failure = DecodeFailure::Other(format!("{}: {}", file_name, e));
                Ok(self.finish(selection, file_name, Err(failure)))
            }
        }
    }

    /// 画像を選択してデコードし、結果を状態に反映
    pub async fn select_image(&mut self, image: SelectedImage) -> SelectionResult {
        let file_name = image.file_name.clone();
        let selection = self.begin(image.clone());
        let outcome = self.decode(image).await;
        self.finish(selection, file_name, outcome)
    }

    fn begin(&mut self, image: SelectedImage) -> SelectionId {
        match self.state.apply(Action::FileSelected(image)) {
            Transition::StartDecode(id) => id,
            other => unreachable!("FileSelected always starts a decode: {:?}", other),
        }
    }

    fn finish(&mut self, selection: SelectionId, file_name: String, outcome: DecodeOutcome) -> SelectionResult {
        let transition = self.state.apply(Action::DecodeFinished {
            selection,
            outcome: outcome.clone(),
        });

        SelectionResult {
            selection,
            file_name,
            outcome,
            transition,
        }
    }

    async fn decode(&self, image: SelectedImage) -> DecodeOutcome {
        let decoder = Arc::clone(&self.decoder);
        let options = self.options;

        tokio::task::spawn_blocking(move || run_decode(decoder.as_ref(), &image, &options))
            .await
            .unwrap_or_else(|e| Err(DecodeFailure::Other(format!("decoder task failed: {}", e))))
    }

    /// 複数ファイルを順に選択してデコード
    ///
    /// 存在しないファイルがあればデコード前にエラーを返す。
    pub async fn run_batch(&mut self, paths: &[PathBuf], show_progress: bool) -> Result<Vec<SelectionResult>> {
        if let Some(missing) = paths.iter().find(|p| !p.is_file()) {
            return Err(ScanError::FileNotFound(missing.display().to_string()));
        }

        let progress = if show_progress && paths.len() > 1 {
            let pb = ProgressBar::new(paths.len() as u64);
            pb.set_style(
                ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            Some(pb)
        } else {
            None
        };

        let mut results = Vec::with_capacity(paths.len());
        for path in paths {
            if let Some(pb) = &progress {
                pb.set_message(path.display().to_string());
            }
            let result = self.select_file(path).await?;
            debug!(
                file = %result.file_name,
                phase = self.state.phase().as_str(),
                transition = ?result.transition,
                "デコード完了"
            );
            results.push(result);
            if let Some(pb) = &progress {
                pb.inc(1);
            }
        }

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        info!(
            files = results.len(),
            barcodes = self.state.barcodes().len(),
            "一括デコード完了"
        );
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barcode_scan_common::{ScanPhase, NOT_FOUND_MESSAGE};

    /// ファイル内容をそのままバーコード値として返す
    struct EchoDecoder;

    impl BarcodeDecoder for EchoDecoder {
        fn decode(&self, image: &SelectedImage) -> barcode_scan_common::Result<String> {
            match std::str::from_utf8(&image.bytes) {
                Ok("none") => Err(DecodeFailure::NotFound),
                Ok(text) => Ok(text.to_string()),
                Err(e) => Err(DecodeFailure::Other(e.to_string())),
            }
        }
    }

    fn image(name: &str, content: &str) -> SelectedImage {
        SelectedImage::new(name, content.as_bytes().to_vec())
    }

    #[tokio::test]
    async fn test_select_image_records_barcode() {
        let mut session = Session::new(EchoDecoder, DecoderOptions::default());
        let result = session.select_image(image("a.png", "12345")).await;

        assert_eq!(result.outcome, Ok(vec!["12345".to_string()]));
        assert_eq!(result.transition, Transition::Recorded { added: 1 });
        assert_eq!(session.state().barcodes().as_slice(), &["12345"]);
        assert_eq!(session.state().phase(), ScanPhase::Succeeded);
    }

    #[tokio::test]
    async fn test_select_image_not_found() {
        let mut session = Session::new(EchoDecoder, DecoderOptions::default());
        session.select_image(image("blank.png", "none")).await;

        assert_eq!(session.state().error_message(), Some(NOT_FOUND_MESSAGE));
        assert!(session.state().barcodes().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_bytes_is_generic_failure() {
        let mut session = Session::new(EchoDecoder, DecoderOptions::default());
        let bad = SelectedImage::new("bad.png", vec![0xff, 0xfe]);
        let result = session.select_image(bad).await;
        assert!(matches!(result.outcome, Err(DecodeFailure::Other(_))));
        assert_ne!(session.state().error_message(), Some(NOT_FOUND_MESSAGE));
    }

    #[tokio::test]
    async fn test_select_missing_file() {
        let mut session = Session::new(EchoDecoder, DecoderOptions::default());
        let err = session.select_file(Path::new("/nonexistent/a.png")).await.unwrap_err();
        assert!(matches!(err, ScanError::FileNotFound(_)));
    }

    /// is_file() は真だが読み込みに失敗するファイル
    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_unreadable_file_is_decode_failure() {
        let mut session = Session::new(EchoDecoder, DecoderOptions::default());
        let result = session.select_file(Path::new("/proc/self/mem")).await.unwrap();

        assert!(matches!(result.outcome, Err(DecodeFailure::Other(_))));
        assert_eq!(result.file_name, "mem");
        assert_eq!(session.state().phase(), ScanPhase::Failed);
        assert_eq!(
            session.state().error_message(),
            Some(barcode_scan_common::DECODE_FAILURE_MESSAGE)
        );

        // 続けて選択できる
        session.select_image(image("a.png", "12345")).await;
        assert!(session.state().error().is_none());
        assert_eq!(session.state().barcodes().as_slice(), &["12345"]);
    }

    #[test]
    fn test_picker_open_and_cancel() {
        let mut session = Session::new(EchoDecoder, DecoderOptions::default());
        session.open_picker();
        assert_eq!(session.state().phase(), ScanPhase::Selecting);
        session.cancel_picker();
        assert_eq!(session.state().phase(), ScanPhase::Idle);
    }
}
