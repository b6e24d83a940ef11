use thiserror::Error;

/// Failures while reading numbers and table structure out of a results page.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("cannot parse {text:?} as a number")]
    InvalidNumber { text: String },

    #[error("party number {text:?} is not a whole number")]
    PartyNumber { text: String },

    #[error("summary table #{table} has no cell at position {index}")]
    MissingSummaryCell { table: String, index: usize },

    #[error("table row has {found} cells, expected at least {expected}")]
    ShortRow { expected: usize, found: usize },

    #[error("invalid selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },

    #[error("cannot resolve link {href:?}")]
    Link {
        href: String,
        #[source]
        source: url::ParseError,
    },
}
