//! Quote-aware splitting of a SQL value list.
//!
//! Splits the text between the outer parentheses of a `VALUES (...)`
//! clause on commas, treating anything inside single quotes as one value.
//! A doubled quote (`''`) inside a string is an escaped literal quote.

/// Split a SQL value list into trimmed raw tokens
///
/// Quote characters that open or close a string are dropped from the
/// token text. Unbalanced quotes are not an error: the rest of the input
/// ends up in the last token and the caller's field count check decides.
pub fn split_sql_values(value_list: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut inside_quotes = false;
    let mut chars = value_list.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\'' => {
                if inside_quotes && chars.peek() == Some(&'\'') {
                    current.push('\'');
                    chars.next();
                } else {
                    inside_quotes = !inside_quotes;
                }
            }
            ',' if !inside_quotes => {
                tokens.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        tokens.push(current.trim().to_string());
    }

    tokens
}
