use crate::error::{ScanError, Result};
use barcode_scan_common::DecoderOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 1枚から複数のバーコードを読む
    pub decode_multiple: bool,
    /// 解析前に縮小する長辺ピクセル数（0で縮小しない）
    pub max_image_size: u32,
    /// ログレベル（RUST_LOG が優先）
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        let options = DecoderOptions::default();
        Self {
            decode_multiple: options.multiple,
            max_image_size: options.max_image_size,
            log_level: "warn".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// 読み込めない場合は既定値を使う（`config` サブコマンドで壊れた設定を上書きするため）
    pub fn load_or_default() -> Self {
        match Self::config_path() {
            Ok(path) => Self::load_or_default_from(&path),
            Err(e) => {
                warn!(error = %e, "設定ファイルの場所が不明なため既定値を使用");
                Self::default()
            }
        }
    }

    pub fn load_or_default_from(config_path: &Path) -> Self {
        Self::load_from(config_path).unwrap_or_else(|e| {
            warn!(path = %config_path.display(), error = %e, "設定ファイルを読み込めないため既定値を使用");
            Self::default()
        })
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ScanError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("barcode-scan").join("config.json"))
    }

    pub fn decoder_options(&self) -> DecoderOptions {
        DecoderOptions {
            multiple: self.decode_multiple,
            max_image_size: self.max_image_size,
        }
    }

    pub fn set_log_level(&mut self, level: String) -> Result<()> {
        if level.parse::<tracing::Level>().is_err() {
            return Err(ScanError::Config(format!(
                "不明なログレベル: {} (error/warn/info/debug/trace)",
                level
            )));
        }
        self.log_level = level;
        Ok(())
    }
}
