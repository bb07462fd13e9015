//! Literal formatting for the generated SQL

/// Quote a string literal by doubling single quotes.
///
/// Nothing else is escaped: backslashes and control characters pass through.
pub fn sql_string(text: &str) -> String {
    format!("'{}'", escape_sql(text))
}

pub fn escape_sql(text: &str) -> String {
    text.replace('\'', "''")
}

/// Shortest decimal form that reads back as the same value, never in
/// exponent notation (`15`, `0.5`, `-3.25`)
pub fn sql_number(value: f64) -> String {
    format!("{}", value)
}

/// Make text safe for a `--` line comment
pub fn comment_text(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

/// Section banner
pub fn banner(title: &str) -> String {
    format!(
        "-- ####################\n-- # {}\n-- ####################\n\n",
        title
    )
}
