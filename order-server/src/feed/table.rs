//! Comma-separated table parsing for GTFS text files.
//!
//! GTFS stop and route names routinely contain commas and quotes, so fields
//! follow the usual quoting rules: a `"` toggles quoting, `""` inside a
//! quoted field is a literal quote, and commas only separate fields outside
//! quotes.

use std::collections::HashMap;

/// A parsed table: header names plus rows normalised to the header width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    columns: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
}

/// A borrowed view of one row, addressed by column name.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    fields: &'a [String],
}

impl<'a> Row<'a> {
    /// The value in `column`, or `""` when the table has no such column.
    pub fn get(&self, column: &str) -> &'a str {
        self.table
            .columns
            .get(column)
            .and_then(|&i| self.fields.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// The value in `column`, or `None` when absent or empty.
    pub fn non_empty(&self, column: &str) -> Option<&'a str> {
        Some(self.get(column)).filter(|s| !s.is_empty())
    }
}

impl Table {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |fields| Row {
            table: self,
            fields,
        })
    }
}

/// Parse table text. The first non-blank line is the header.
///
/// Rows shorter than the header are padded with empty strings; extra
/// fields are dropped. Blank lines are skipped.
///
/// # Examples
///
/// ```
/// use order_server::feed::parse_table;
///
/// let table = parse_table("stop_id,stop_name\nMTR-TAP-1,\"Tai Po, Market\"\n");
/// let row = table.rows().next().unwrap();
/// assert_eq!(row.get("stop_name"), "Tai Po, Market");
/// ```
pub fn parse_table(text: &str) -> Table {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .filter(|l| !l.is_empty());

    let Some(header_line) = lines.next() else {
        return Table::default();
    };

    let headers = split_line(header_line);
    let width = headers.len();
    let columns = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.clone(), i))
        .collect();

    let rows = lines
        .map(|line| {
            let mut fields = split_line(line);
            fields.resize(width, String::new());
            fields
        })
        .collect();

    Table {
        headers,
        columns,
        rows,
    }
}

/// Split one line into fields.
pub fn split_line(line: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match (in_quotes, ch) {
            (true, '"') => {
                if chars.peek() == Some(&'"') {
                    cur.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            (false, '"') => in_quotes = true,
            (false, ',') => out.push(std::mem::take(&mut cur)),
            (_, c) => cur.push(c),
        }
    }
    out.push(cur);
    out
}
