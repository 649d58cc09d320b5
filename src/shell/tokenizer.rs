use snafu::{Snafu, ensure};

const QUOTE: char = '"';

/// Splits a command line into arguments.
///
/// Whitespace separates arguments except inside double quotes. Each quote
/// character opens or closes a quoted region and is dropped; there is no
/// escaping. Empty arguments are never produced.
pub fn tokenize(line: &str) -> Result<Vec<String>, TokenizeError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        if c == QUOTE {
            in_quotes = !in_quotes;
        } else if c.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
        } else {
            current.push(c);
        }
    }

    ensure!(!in_quotes, UnterminatedQuoteSnafu);

    if !current.is_empty() {
        tokens.push(current);
    }
    Ok(tokens)
}

#[derive(Debug, Snafu)]
pub enum TokenizeError {
    #[snafu(display("Unclosed quotes"))]
    UnterminatedQuoteError,
}
