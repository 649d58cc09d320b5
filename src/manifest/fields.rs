const FIELD_DELIMITER: char = ';';
const QUOTE: char = '"';

/// Splits one manifest line into fields.
///
/// Delimiters inside a quoted region belong to the field. A doubled quote
/// inside a quoted region yields one literal quote; every other quote toggles
/// the quoted state and is dropped. Unbalanced quotes are not an error: the
/// field boundaries are whatever the toggle state produced.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            QUOTE if in_quotes && chars.peek() == Some(&QUOTE) => {
                current.push(QUOTE);
                chars.next();
            }
            QUOTE => in_quotes = !in_quotes,
            FIELD_DELIMITER if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }

    fields.push(current);
    fields
}
