use crate::core::model::{self, Export};

/// Flattens an export into plain text.
///
/// Words of a line are joined with a single space, lines with `\n`, and every page
/// except the last is followed by an empty line. A page without any text still
/// emits its separator, so sparse documents can show several blank lines in a row.
pub fn flatten(export: &Export) -> String {
    let pages = export.pages();
    let mut output_lines: Vec<String> = Vec::new();

    for (page_idx, page) in pages.iter().enumerate() {
        for block in model::blocks(page) {
            for line in model::lines(block) {
                let words: Vec<&str> = model::words(line)
                    .iter()
                    .filter_map(model::word_value)
                    .collect();
                if !words.is_empty() {
                    output_lines.push(words.join(" "));
                }
            }
        }

        if page_idx + 1 != pages.len() {
            output_lines.push(String::new());
        }
    }

    output_lines
        .join("\n")
        .trim_matches(is_strippable)
        .to_string()
}

/// Unicode whitespace plus the C0 information separators `\x1c`..=`\x1f`.
fn is_strippable(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}
