//! ハイライトテクスチャ生成ツール
//!
//! 引数なしで実行すると色相グラデーションを `highlight-texture.png` に書き出します。

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use log::{debug, info};
use std::path::{Path, PathBuf};
use texture::validator::background_color;
use texture::{connected_regions, Pattern, TextureConfig};

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(author, version, about = "ハイライトトーラス用テクスチャ生成ツール")]
struct CliArgs {
    #[clap(subcommand)]
    command: Option<Command>,

    /// 出力ファイル
    #[clap(short, long, value_name = "FILE", global = true)]
    output: Option<PathBuf>,

    /// 生成パラメータ (RON)
    #[clap(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// 詳細ログ出力
    #[clap(short, long, action = ArgAction::SetTrue, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// 四分割パターン (256x256) を生成
    Quadrants,
    /// 色相グラデーション (180x180) を生成
    Hues,
    /// 画像ファイルのサイズと色領域を表示
    Inspect {
        /// 検査する画像
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = CliArgs::parse();

    // ログ設定
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp_millis()
    .init();

    match args.command.clone().unwrap_or(Command::Hues) {
        Command::Quadrants => generate(Pattern::Quadrants, &args),
        Command::Hues => generate(Pattern::Hues, &args),
        Command::Inspect { file } => inspect(&file),
    }
}

/// 設定を組み立ててテクスチャを書き出す
fn generate(pattern: Pattern, args: &CliArgs) -> Result<()> {
    let config = load_config(args)?;
    debug!("生成設定: {:?}", config);

    pattern.generate(&config)?;
    Ok(())
}

/// 設定ファイルとコマンドライン引数から設定を組み立てる
///
/// 検証は上書きを反映した後に1回だけ行う。
fn load_config(args: &CliArgs) -> Result<TextureConfig> {
    let mut config = match &args.config {
        Some(path) => TextureConfig::read_file(path)?,
        None => TextureConfig::default(),
    };
    if let Some(output) = &args.output {
        config.output = output.clone();
    }
    config.validate()?;
    Ok(config)
}

/// 画像のサイズと背景以外の色領域を表示
fn inspect(path: &Path) -> Result<()> {
    let image = image::open(path)
        .with_context(|| format!("画像を読み込めません: {}", path.display()))?
        .to_rgba8();
    let (width, height) = image.dimensions();
    println!("{}: {}x{}", path.display(), width, height);

    let Some(background) = background_color(&image) else {
        return Ok(());
    };
    println!("背景色: {:?}", background.to_array());

    let regions = connected_regions(&image, background);
    info!("{}個の領域が見つかりました", regions.len());
    for region in &regions {
        println!(
            "  {:?} ({}, {})-({}, {}) {}ピクセル",
            region.color.to_array(),
            region.bounds.min.x,
            region.bounds.min.y,
            region.bounds.max.x,
            region.bounds.max.y,
            region.pixel_count
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let args = CliArgs::try_parse_from(["highlight"]).unwrap();
        assert!(args.command.is_none());
        assert!(args.output.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn test_subcommands() {
        let args = CliArgs::try_parse_from(["highlight", "quadrants", "-o", "out.png"]).unwrap();
        assert!(matches!(args.command, Some(Command::Quadrants)));
        assert_eq!(args.output, Some(PathBuf::from("out.png")));

        let args = CliArgs::try_parse_from(["highlight", "-v", "hues"]).unwrap();
        assert!(matches!(args.command, Some(Command::Hues)));
        assert!(args.verbose);

        let args = CliArgs::try_parse_from(["highlight", "inspect", "a.png"]).unwrap();
        match args.command {
            Some(Command::Inspect { file }) => assert_eq!(file, PathBuf::from("a.png")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_subcommand() {
        assert!(CliArgs::try_parse_from(["highlight", "wheel"]).is_err());
    }

    #[test]
    fn test_load_config_applies_output_override() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("texture.ron");
        std::fs::write(&config_path, "(output: \"from-file.png\", hues: (size: 60))").unwrap();
        let config_arg = config_path.display().to_string();

        let args = CliArgs::try_parse_from(["highlight", "-c", &config_arg]).unwrap();
        let config = load_config(&args).unwrap();
        assert_eq!(config.output, PathBuf::from("from-file.png"));
        assert_eq!(config.hues.size, 60);

        let args =
            CliArgs::try_parse_from(["highlight", "-c", &config_arg, "-o", "cli.png"]).unwrap();
        let config = load_config(&args).unwrap();
        assert_eq!(config.output, PathBuf::from("cli.png"));
        assert_eq!(config.hues.size, 60);

        let args = CliArgs::try_parse_from(["highlight"]).unwrap();
        assert_eq!(load_config(&args).unwrap(), TextureConfig::default());
    }

    #[test]
    fn test_load_config_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("texture.ron");
        std::fs::write(&config_path, "(quadrants: (size: 0))").unwrap();
        let config_arg = config_path.display().to_string();

        // 出力先を上書きしても検証は行われる
        let args =
            CliArgs::try_parse_from(["highlight", "-c", &config_arg, "-o", "cli.png"]).unwrap();
        assert!(load_config(&args).is_err());

        let args = CliArgs::try_parse_from(["highlight", "-c", "missing.ron"]).unwrap();
        assert!(load_config(&args).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }
}
