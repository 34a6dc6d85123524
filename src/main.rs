use std::path::PathBuf;

use anyhow::Context;
use clap::{CommandFactory, Parser};

use quizsheet::config::{find_default_config, init_default_config, load_config, AppConfig};
use quizsheet::pipeline::{ConvertOptions, ConvertPipeline};
use quizsheet::progress::ConsoleProgress;

#[derive(Parser, Debug)]
#[command(name = "quizsheet")]
#[command(about = "DOCX quiz bank -> XLSX converter (Kazakh/Russian test documents)", long_about = None)]
struct Args {
    /// Generate a default config file, then exit
    #[arg(long)]
    init_config: bool,

    /// Directory to write the config file (default: current directory)
    #[arg(long, value_name = "DIR")]
    init_config_dir: Option<PathBuf>,

    /// Overwrite an existing config when used with --init-config
    #[arg(long)]
    force: bool,

    /// Input .docx files (drag-and-drop supported)
    #[arg(value_name = "DOCX")]
    inputs: Vec<PathBuf>,

    /// Output directory for .xlsx files (default: next to each input)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Level specification, e.g. A=35,B=50,C=35
    #[arg(long, value_name = "SPEC")]
    levels: Option<String>,

    /// Worksheet name (default: Тест)
    #[arg(long, value_name = "NAME")]
    sheet_name: Option<String>,

    /// Config file path (default: search for quizsheet.toml upwards)
    #[arg(long, value_name = "TOML")]
    config: Option<PathBuf>,

    /// Also write extracted questions as <stem>.questions.json into DIR
    #[arg(long, value_name = "DIR")]
    dump_json: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let progress = ConsoleProgress::new(!args.quiet);

    if args.init_config {
        let dir = args
            .init_config_dir
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
        let cfg_path = init_default_config(&dir, args.force).context("init default config")?;
        eprintln!("Wrote config: {}", cfg_path.display());
        return Ok(());
    }

    if args.inputs.is_empty() {
        let mut cmd = Args::command();
        cmd.print_help().context("print help")?;
        eprintln!(
            "\n\nUSAGE:\n  quizsheet <tests.docx> [more.docx ...]\n\nTIPS:\n  - You can drag .docx files onto quizsheet to convert them.\n  - Default config search: quizsheet.toml (upwards from the current directory).\n"
        );
        return Ok(());
    }

    let file_cfg = match args.config.clone().or_else(find_default_config) {
        Some(p) => load_config(&p)?,
        None => AppConfig::default(),
    };

    let opts = ConvertOptions {
        levels: args.levels.clone().or(file_cfg.convert.levels),
        sheet_name: args
            .sheet_name
            .clone()
            .or(file_cfg.convert.sheet_name)
            .unwrap_or_else(|| "Тест".to_string()),
        output_dir: args.output_dir.clone().or(file_cfg.convert.output_dir),
        dump_json_dir: args.dump_json.clone(),
    };

    let pipeline = ConvertPipeline::new(opts, progress);
    pipeline.convert_all(&args.inputs)
}
