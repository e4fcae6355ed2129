use tracing_subscriber::EnvFilter;

/// ログ出力を初期化（標準エラー出力）
///
/// `RUST_LOG` があればそれを優先し、`--verbose` 指定時は debug に上げる。
pub fn init(level: &str, verbose: bool) {
    let default_level = if verbose { "debug" } else { level };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
