mod aggregate;
mod cli;
mod error;
mod fetch;
mod parser;
mod report;
mod settings;

use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::cli::framed;
use crate::fetch::HttpFetcher;
use crate::parser::Layout;
use crate::settings::Settings;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .try_init();
}

fn main() -> Result<ExitCode> {
    init_tracing();

    let cli = match cli::parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => {
            println!("{}", framed(&e.to_string()));
            return Ok(ExitCode::FAILURE);
        }
    };

    let settings = Settings::load()?;
    debug!(?settings, "Settings loaded");

    if let Err(e) = cli.validate(&settings.base_url) {
        println!("{}", framed(&e.to_string()));
        return Ok(ExitCode::FAILURE);
    }

    println!(
        "{}",
        framed(&format!("Stahuji data z: {}\nUkládám do: {}", cli.url, cli.output))
    );

    let t0 = Instant::now();
    let layout = Layout::new(&settings)?;
    let fetcher = HttpFetcher::new(settings.timeout())?;

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} obcí ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );

    let report = aggregate::run(&fetcher, &layout, &cli.url, &pb)?;
    report::write_report_to_path(Path::new(&cli.output), &report)?;
    info!(
        "Scraped {} municipalities in {:.1}s",
        report.rows.len(),
        t0.elapsed().as_secs_f64()
    );

    println!(
        "{}",
        framed(&format!("Hotovo! Výsledky uloženy do {}", cli.output))
    );
    Ok(ExitCode::SUCCESS)
}
