use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use relatorio_pessoas::{AssetPaths, ReportConfig, generate_report};

/// Render a paginated PDF report of the people in a JSON file.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// JSON array of person records
    #[arg(default_value = "pessoas.json")]
    input: PathBuf,

    /// Directory the PDF is written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Maximum number of records in the report
    #[arg(short, long, default_value_t = 100)]
    limit: usize,

    /// Directory holding github.png, emoji_feliz.png and emoji_triste.png
    #[arg(short, long, default_value = "img")]
    assets: PathBuf,

    /// Write uncompressed content streams
    #[arg(long)]
    no_compress: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = ReportConfig {
        input: cli.input,
        output_dir: cli.output_dir,
        limit: cli.limit,
        assets: AssetPaths::in_dir(cli.assets),
        compress: !cli.no_compress,
        ..ReportConfig::default()
    };

    match generate_report(&config) {
        Ok(Some(path)) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Ok(None) => {
            eprintln!("No records found in {}; no report written", config.input.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
