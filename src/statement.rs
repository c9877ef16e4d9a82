//! Statement extraction from SQL dump files.
//!
//! Groups input lines into logical `INSERT` statements, checks which table
//! a statement targets and pulls out the body of its `VALUES (...)` clause.

use crate::constants::STATEMENT_TERMINATOR;
use regex::Regex;
use std::borrow::Cow;
use std::io::{self, BufRead};
use std::sync::OnceLock;

fn values_clause_re() -> &'static Regex {
    static VALUES_CLAUSE_RE: OnceLock<Regex> = OnceLock::new();
    VALUES_CLAUSE_RE
        .get_or_init(|| Regex::new(r"(?is)values\s*\((.*)\)\s*;").expect("valid VALUES regex"))
}

fn bare_height_re() -> &'static Regex {
    static BARE_HEIGHT_RE: OnceLock<Regex> = OnceLock::new();
    BARE_HEIGHT_RE
        .get_or_init(|| Regex::new(r#"'(\d)'(\d{1,2})""#).expect("valid bare height regex"))
}

/// One logical statement and the line it starts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub text: String,
    pub line: usize,
}

/// Iterator over the statements of a line-oriented SQL dump
///
/// In multi-line mode a statement ends on a line whose trimmed text ends
/// with `);`, or just before the next line that starts with `INSERT`.
/// Blank lines between statements are skipped. A line that is not part of
/// an open statement and does not start with `INSERT` is yielded alone so
/// the caller can reject it without swallowing the statement that follows.
///
/// In single-line mode every non-blank line is its own statement.
pub struct StatementReader<R> {
    lines: io::Lines<R>,
    line_number: usize,
    pending: Option<(usize, String)>,
    single_line: bool,
}

impl<R: BufRead> StatementReader<R> {
    /// Reader that joins statements spanning several lines
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
            pending: None,
            single_line: false,
        }
    }

    /// Reader that treats every line as one statement
    pub fn single_line(reader: R) -> Self {
        Self {
            single_line: true,
            ..Self::new(reader)
        }
    }

    fn next_line(&mut self) -> Option<io::Result<(usize, String)>> {
        if let Some(pending) = self.pending.take() {
            return Some(Ok(pending));
        }
        match self.lines.next()? {
            Ok(line) => {
                self.line_number += 1;
                Some(Ok((self.line_number, line)))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

impl<R: BufRead> Iterator for StatementReader<R> {
    type Item = io::Result<Statement>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut parts: Vec<String> = Vec::new();
        let mut start_line = 0;

        loop {
            let (line_number, line) = match self.next_line() {
                Some(Ok(numbered)) => numbered,
                Some(Err(e)) => return Some(Err(e)),
                None => break,
            };

            let trimmed = line.trim();
            if parts.is_empty() {
                if trimmed.is_empty() {
                    continue;
                }
                start_line = line_number;
                if self.single_line || !starts_with_ignore_case(trimmed, "insert") {
                    return Some(Ok(Statement {
                        text: line.trim_end().to_string(),
                        line: start_line,
                    }));
                }
            } else if starts_with_ignore_case(trimmed, "insert") {
                // unterminated statement, the new INSERT starts the next one
                self.pending = Some((line_number, line));
                break;
            }

            parts.push(line.trim_end().to_string());
            if trimmed.ends_with(STATEMENT_TERMINATOR) {
                break;
            }
        }

        if parts.is_empty() {
            None
        } else {
            Some(Ok(Statement {
                text: parts.join(" "),
                line: start_line,
            }))
        }
    }
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len()
        && text.is_char_boundary(prefix.len())
        && text[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// Check that a statement is `INSERT INTO <table>` for exactly this table
pub fn targets_table(statement: &str, table: &str) -> bool {
    let prefix = format!("insert into {}", table);
    let trimmed = statement.trim();

    if !starts_with_ignore_case(trimmed, &prefix) {
        return false;
    }

    // players_archive is not players
    trimmed[prefix.len()..]
        .chars()
        .next()
        .is_none_or(|c| !(c.is_alphanumeric() || c == '_'))
}

/// Escape the bare feet mark in quoted heights such as `'5'10"'`
///
/// Scraped dumps write these without doubling the inner quote, which would
/// otherwise end the string early.
pub fn escape_bare_heights(statement: &str) -> Cow<'_, str> {
    bare_height_re().replace_all(statement, r#"'$1''$2""#)
}

/// Body of the `VALUES (...);` clause, without the outer parentheses
pub fn extract_values(statement: &str) -> Option<&str> {
    values_clause_re()
        .captures(statement.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read_all(input: &str) -> Vec<Statement> {
        StatementReader::new(Cursor::new(input))
            .collect::<io::Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_single_line_statements() {
        let statements = read_all(
            "INSERT INTO players VALUES ('a', 1);\n\nINSERT INTO players VALUES ('b', 2);\n",
        );

        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0].line, 1);
        assert_eq!(statements[1].line, 3);
        assert_eq!(statements[1].text, "INSERT INTO players VALUES ('b', 2);");
    }

    #[test]
    fn test_multi_line_statement() {
        let statements = read_all(
            "INSERT INTO player_stats (\n    Name, Age\n) VALUES (\n    'a', 1\n);\nINSERT INTO player_stats (Name) VALUES ('b');",
        );

        assert_eq!(statements.len(), 2);
        assert_eq!(
            statements[0].text,
            "INSERT INTO player_stats (     Name, Age ) VALUES (     'a', 1 );"
        );
        assert_eq!(statements[0].line, 1);
        assert_eq!(statements[1].line, 6);
    }

    #[test]
    fn test_stray_lines_are_yielded_alone() {
        let statements =
            read_all("-- dump header\nINSERT INTO players VALUES (1);\nSET NAMES utf8;\n");

        assert_eq!(statements.len(), 3);
        assert_eq!(statements[0].text, "-- dump header");
        assert_eq!(statements[1].line, 2);
        assert_eq!(statements[2].text, "SET NAMES utf8;");
    }

    #[test]
    fn test_unterminated_statement_at_eof() {
        let statements = read_all("INSERT INTO players VALUES (1,\n2");
        assert_eq!(statements.len(), 1);
        assert_eq!(statements[0].text, "INSERT INTO players VALUES (1, 2");
    }

    #[test]
    fn test_unterminated_statement_does_not_swallow_next_insert() {
        let statements = read_all(
            "INSERT INTO players VALUES ('A', 'B', 1)\nINSERT INTO players VALUES ('C', 2);\n",
        );

        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0].text, "INSERT INTO players VALUES ('A', 'B', 1)");
        assert_eq!(statements[1].text, "INSERT INTO players VALUES ('C', 2);");
        assert_eq!(statements[1].line, 2);
    }

    #[test]
    fn test_single_line_mode() {
        let statements: Vec<Statement> = StatementReader::single_line(Cursor::new(
            "INSERT INTO players VALUES (1); -- note\n\n(2);\nINSERT INTO players VALUES (3);",
        ))
        .collect::<io::Result<Vec<_>>>()
        .unwrap();

        assert_eq!(statements.len(), 3);
        assert_eq!(statements[0].text, "INSERT INTO players VALUES (1); -- note");
        assert_eq!(statements[1].text, "(2);");
        assert_eq!(statements[1].line, 3);
        assert_eq!(statements[2].line, 4);
    }

    #[test]
    fn test_targets_table() {
        assert!(targets_table("  insert into PLAYERS VALUES (1);", "players"));
        assert!(targets_table("INSERT INTO players(name) VALUES (1);", "players"));
        assert!(!targets_table("INSERT INTO players_archive VALUES (1);", "players"));
        assert!(!targets_table("INSERT INTO teams VALUES (1);", "players"));
        assert!(!targets_table("", "players"));
    }

    #[test]
    fn test_escape_bare_heights() {
        let line = r#"VALUES ('Pedri', '5'9"', 'Right');"#;
        assert_eq!(
            escape_bare_heights(line),
            r#"VALUES ('Pedri', '5''9"', 'Right');"#
        );

        let already_escaped = r#"VALUES ('Pedri', '5''9"');"#;
        assert_eq!(escape_bare_heights(already_escaped), already_escaped);
    }

    #[test]
    fn test_extract_values() {
        assert_eq!(
            extract_values("INSERT INTO players VALUES ('a', (1), 2) ;"),
            Some("'a', (1), 2")
        );
        assert_eq!(
            extract_values("insert into t (x) values\n(1);"),
            Some("1")
        );
        assert_eq!(extract_values("INSERT INTO players SELECT 1;"), None);
    }
}
