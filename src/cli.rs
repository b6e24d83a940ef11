use clap::error::ErrorKind;
use clap::Parser;
use thiserror::Error;

const FRAME_WIDTH: usize = 50;

#[derive(Parser, Debug)]
#[command(
    name = "volby_scraper",
    version,
    about = "Stáhne výsledky voleb za obce z volby.cz do CSV"
)]
pub struct Cli {
    /// Listing page with municipalities (ps32?...)
    pub url: String,
    /// Output file, must end in .csv
    pub output: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgError {
    #[error("Chybné množství argumentů. Zadejte:\nvolby_scraper <URL> <vystup.csv>")]
    Count,
    #[error("URL musí začínat {base}")]
    UrlPrefix { base: String },
    #[error("Výstupní soubor musí mít příponu .csv")]
    Extension,
}

/// Wrap a message between two separator lines.
pub fn framed(message: &str) -> String {
    let line = "-".repeat(FRAME_WIDTH);
    format!("{line}\n{message}\n{line}")
}

/// Parse `<URL> <OUTPUT.csv>`. Needs no settings, so a bad environment
/// never hides an argument-count error.
///
/// `--help` and `--version` exit through clap; every other parse failure is
/// reported as a wrong argument count.
pub fn parse_args<I, T>(args: I) -> Result<Cli, ArgError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(cli),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(_) => Err(ArgError::Count),
    }
}

impl Cli {
    pub fn validate(&self, base_url: &str) -> Result<(), ArgError> {
        if !self.url.starts_with(base_url) {
            return Err(ArgError::UrlPrefix {
                base: base_url.to_string(),
            });
        }
        if !self.output.ends_with(".csv") {
            return Err(ArgError::Extension);
        }
        Ok(())
    }
}
