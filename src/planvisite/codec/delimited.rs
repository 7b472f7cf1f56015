use crate::error::{PlanError, Result};
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, Trim, WriterBuilder};

/// Parses delimiter-separated text into rows of trimmed fields.
///
/// The first line is always a header and is dropped. Every other line is a
/// row of its own: quotes are honoured within a line but never span lines,
/// so one malformed line cannot swallow the ones after it. Rows may have any
/// number of fields; blank lines produce no row. A line the reader cannot
/// decode comes back empty so the caller counts it as malformed.
pub fn parse_rows(text: &str, delimiter: u8) -> Vec<Vec<String>> {
    text.lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| parse_line(line, delimiter))
        .collect()
}

fn parse_line(line: &str, delimiter: u8) -> Vec<String> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(line.as_bytes());

    let mut record = StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) => record.iter().map(str::to_string).collect(),
        Ok(false) => Vec::new(),
        Err(e) => {
            tracing::debug!(error = %e, "undecodable row");
            Vec::new()
        }
    }
}

/// Formats a header plus rows. Every field is quoted, embedded quotes are
/// doubled and every row ends with `\n`.
pub fn format_rows<I, R>(header: &[&str], rows: I, delimiter: u8) -> Result<String>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
{
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| PlanError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| PlanError::Format(e.to_string()))
}
