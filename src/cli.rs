use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "barcode-scan")]
#[command(about = "画像からバーコードを読み取るツール", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像ファイルを順に読み取る
    Decode {
        /// 画像ファイル
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        #[command(flatten)]
        opts: OutputArgs,
    },

    /// フォルダ内の画像をすべて読み取る
    Scan {
        /// 画像フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,

        #[command(flatten)]
        opts: OutputArgs,
    },

    /// 対話的に画像を選んで読み取る
    Interactive {
        /// 1枚から複数のバーコードを読む
        #[arg(short, long)]
        multiple: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 複数読み取りを既定にする (true/false)
        #[arg(long)]
        set_multiple: Option<bool>,

        /// 解析前に縮小する長辺ピクセル数（0で縮小しない）
        #[arg(long)]
        set_max_image_size: Option<u32>,

        /// ログレベル (error/warn/info/debug/trace)
        #[arg(long)]
        set_log_level: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// 1枚から複数のバーコードを読む
    #[arg(short, long)]
    pub multiple: bool,

    /// 結果をJSONで標準出力に出す
    #[arg(long)]
    pub json: bool,

    /// 結果JSONの保存先
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
