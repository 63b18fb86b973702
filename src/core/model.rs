use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw export produced by the OCR predictor.
///
/// The tree is kept as untyped JSON so that everything the predictor emits
/// (geometry, dimensions, language hints, ...) is written back untouched. Text is
/// read through the accessor functions below, which treat a missing or malformed
/// level as empty instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Export(Value);

impl Export {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn pages(&self) -> &[Value] {
        pages(&self.0)
    }

    pub fn word_count(&self) -> usize {
        self.pages()
            .iter()
            .flat_map(blocks)
            .flat_map(lines)
            .map(|line| words(line).len())
            .sum()
    }
}

pub fn pages(export: &Value) -> &[Value] {
    children(export, "pages")
}

pub fn blocks(page: &Value) -> &[Value] {
    children(page, "blocks")
}

pub fn lines(block: &Value) -> &[Value] {
    children(block, "lines")
}

pub fn words(line: &Value) -> &[Value] {
    children(line, "words")
}

/// Recognized text of a word, `None` when absent, not a string or empty.
pub fn word_value(word: &Value) -> Option<&str> {
    word.get("value")
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

fn children<'a>(node: &'a Value, key: &str) -> &'a [Value] {
    node.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
