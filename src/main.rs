use barcode_scan::{cli, config, error, logging, picker, report, scanner, session};
use barcode_scan_common::RxingDecoder;
use clap::Parser;
use cli::{Cli, Commands, OutputArgs};
use config::Config;
use error::Result;
use report::ScanReport;
use session::Session;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match cli.command {
        // 壊れた設定も `config` で上書きできるようにする
        Commands::Config { .. } => {
            logging::init(&Config::default().log_level, cli.verbose);
            Config::load_or_default()
        }
        _ => {
            let config = Config::load()?;
            logging::init(&config.log_level, cli.verbose);
            config
        }
    };

    match cli.command {
        Commands::Decode { paths, opts } => {
            run_batch(&config, &paths, &opts).await?;
        }

        Commands::Scan { folder, recursive, opts } => {
            let images = scanner::scan_folder(&folder, recursive)?;
            if images.is_empty() {
                return Err(error::ScanError::NoImagesFound(folder.display().to_string()));
            }
            if !opts.json {
                println!("✔ {}枚の画像を検出\n", images.len());
            }
            run_batch(&config, &images, &opts).await?;
        }

        Commands::Interactive { multiple } => {
            let mut options = config.decoder_options();
            options.multiple |= multiple;
            let mut session = Session::new(RxingDecoder::new(options), options);

            println!("📷 barcode-scan - 対話モード\n");
            let mut picker = picker::PromptPicker;
            let mut stdout = std::io::stdout();
            picker::run_interactive(&mut session, &mut picker, &mut stdout).await?;
        }

        Commands::Config { set_multiple, set_max_image_size, set_log_level, show } => {
            let mut config = config;
            let changed = set_multiple.is_some() || set_max_image_size.is_some() || set_log_level.is_some();

            if let Some(multiple) = set_multiple {
                config.decode_multiple = multiple;
            }
            if let Some(size) = set_max_image_size {
                config.max_image_size = size;
            }
            if let Some(level) = set_log_level {
                config.set_log_level(level)?;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  パス: {}", Config::config_path()?.display());
                println!("  複数読み取り: {}", if config.decode_multiple { "有効" } else { "無効" });
                println!("  最大画像サイズ: {}px", config.max_image_size);
                println!("  ログレベル: {}", config.log_level);
            }
        }
    }

    Ok(())
}

async fn run_batch(config: &Config, paths: &[PathBuf], opts: &OutputArgs) -> Result<()> {
    let mut options = config.decoder_options();
    options.multiple |= opts.multiple;

    let mut session = Session::new(RxingDecoder::new(options), options);
    let results = session.run_batch(paths, !opts.json).await?;
    let report = ScanReport::new(session.state(), &results);

    if opts.json {
        println!("{}", report.to_json()?);
    } else {
        report.render(&mut std::io::stdout())?;
    }

    if let Some(output) = &opts.output {
        report.write_json(output)?;
        if !opts.json {
            println!("\n✔ 結果を保存: {}", output.display());
        }
    }

    Ok(())
}
