//! Line-oriented parsing of decrypted config text.
//!
//! Each line is either a `#` comment, a `KEY = <literal>` assignment, or noise
//! that is silently ignored. Assignments are evaluated with the sandboxed
//! literal evaluator and stored under the upper-cased key.

use std::collections::BTreeMap;

use super::error::ConfigError;
use crate::literal::{self, Value};

/// Merged configuration: upper-cased key to evaluated value.
pub type ConfigMap = BTreeMap<String, Value>;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Splits `<identifier> = <expression>` anchored at the start of the line.
///
/// Whitespace around `=` is optional. Returns `None` for anything else.
pub(crate) fn split_assignment(line: &str) -> Option<(&str, &str)> {
    let key_len = line
        .char_indices()
        .find(|(_, c)| !is_word_char(*c))
        .map_or(line.len(), |(i, _)| i);
    if key_len == 0 {
        return None;
    }
    let (key, rest) = line.split_at(key_len);
    let expr = rest.trim_start().strip_prefix('=')?;
    Some((key, expr.trim_start()))
}

/// Parses `text` and merges its assignments into `config`.
///
/// Later lines overwrite earlier ones, and values already in `config` from
/// earlier files are overwritten too. The first invalid expression aborts the
/// parse; the caller is expected to discard `config` in that case.
pub fn parse_content(confname: &str, text: &str, config: &mut ConfigMap) -> Result<(), ConfigError> {
    for (index, line) in text.split('\n').enumerate() {
        if line.starts_with('#') {
            continue;
        }
        let Some((key, expr)) = split_assignment(line) else {
            continue;
        };
        let value = literal::evaluate(expr).map_err(|source| ConfigError::Expression {
            confname: confname.to_string(),
            line: index + 1,
            key: key.to_string(),
            source,
        })?;
        config.insert(key.to_uppercase(), value);
    }
    Ok(())
}
