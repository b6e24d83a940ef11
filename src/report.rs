use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::aggregate::Report;

/// Write the report as UTF-8 CSV: header line, then one line per municipality.
pub fn write_report<W: Write>(out: W, report: &Report) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(report.header())?;
    for record in report.records() {
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_report_to_path(path: &Path, report: &Report) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    write_report(file, report).with_context(|| format!("Failed to write {:?}", path))?;
    info!(rows = report.rows.len(), "Wrote {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::aggregate::ResultRow;
    use crate::parser::number::NumericValue;
    use crate::parser::votes::VoteSummary;
    use pretty_assertions::assert_eq;

    fn row(code: &str, name: &str, votes: &[(&str, NumericValue)]) -> ResultRow {
        ResultRow {
            code: code.to_string(),
            name: name.to_string(),
            summary: VoteSummary {
                voters: NumericValue::Count(350),
                envelopes_issued: NumericValue::Count(300),
                valid_votes: NumericValue::Absent,
            },
            votes: votes
                .iter()
                .map(|(p, v)| (p.to_string(), *v))
                .collect::<HashMap<_, _>>(),
        }
    }

    fn sample() -> Report {
        Report {
            parties: vec!["Strana A".to_string(), "Moravané, z.s.".to_string()],
            rows: vec![
                row("500011", "Žďár", &[("Strana A", NumericValue::Count(150))]),
                row("500020", "Čáslav", &[("Moravané, z.s.", NumericValue::Percent(1.5))]),
            ],
        }
    }

    #[test]
    fn csv_layout_and_gaps() {
        let mut buf = Vec::new();
        write_report(&mut buf, &sample()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "kód obce,název obce,voliči v seznamu,vydané obálky,platné hlasy,Strana A,\"Moravané, z.s.\"\n\
             500011,Žďár,350,300,,150,\n\
             500020,Čáslav,350,300,,,1.5\n"
        );
    }

    #[test]
    fn writes_utf8_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vysledky.csv");
        write_report_to_path(&path, &sample()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("kód obce,název obce"));
        assert!(text.contains("Žďár"));
        assert_eq!(text.lines().count(), 3);
    }
}
