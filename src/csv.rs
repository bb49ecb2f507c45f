// src/csv.rs
use std::io::{self, Write};
use std::mem::take;
use std::path::Path;

/// Field separator, picked from the file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delim {
    Csv,
    Tsv,
}

impl Delim {
    /// `.tsv` → tab, anything else → comma.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => Delim::Tsv,
            _ => Delim::Csv,
        }
    }

    pub fn sep(self) -> char {
        match self { Delim::Csv => ',', Delim::Tsv => '\t' }
    }
}

/* ---------------- Parsing ---------------- */

/// Minimal CSV/TSV parser (quotes + CRLF tolerant).
/// Blank lines are dropped; a quoted field may span lines.
pub fn parse_rows(text: &str, delim: Delim) -> Vec<Vec<String>> {
    let sep = delim.sep();
    let mut rows = Vec::new();
    let mut field = s!();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // double-quote escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == sep && !in_quotes => {
                // move the field without cloning
                row.push(take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                row.push(take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Flush any trailing field/row even if quotes were unterminated.
    row.push(field);
    if !(row.len() == 1 && row[0].is_empty()) {
        rows.push(row);
    }

    rows
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S], delim: Delim) -> io::Result<()> {
    let sep = delim.sep();
    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Header + rows as one string.
pub fn rows_to_string<S: AsRef<str>>(headers: &[S], rows: &[Vec<String>], delim: Delim) -> String {
    let mut buf: Vec<u8> = Vec::new();

    let _ = write_row(&mut buf, headers, delim);
    for r in rows {
        let _ = write_row(&mut buf, r, delim);
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quotes_crlf_and_blank_lines() {
        let text = "post_title,post_city\r\n\"Bow, Arrow & Co\",Ottawa\r\n\r\n\"Say \"\"hi\"\"\",\n";
        let rows = parse_rows(text, Delim::Csv);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec!["Bow, Arrow & Co", "Ottawa"]);
        assert_eq!(rows[2], vec!["Say \"hi\"", ""]);
    }

    #[test]
    fn quoted_field_spans_lines() {
        let rows = parse_rows("a,b\n\"line1\nline2\",x", Delim::Csv);
        assert_eq!(rows[1], vec!["line1\nline2", "x"]);
    }

    #[test]
    fn tsv_uses_tabs() {
        let rows = parse_rows("a\tb\n1,2\t3", Delim::Tsv);
        assert_eq!(rows[1], vec!["1,2", "3"]);
        assert_eq!(Delim::for_path(Path::new("x.TSV")), Delim::Tsv);
        assert_eq!(Delim::for_path(Path::new("x.csv")), Delim::Csv);
        assert_eq!(Delim::for_path(Path::new("noext")), Delim::Csv);
    }

    #[test]
    fn writer_quotes_only_when_needed() {
        let mut buf = Vec::new();
        write_row(&mut buf, &["Plain", "a,b", "say \"x\""], Delim::Csv).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Plain,\"a,b\",\"say \"\"x\"\"\"\n");
    }
}
