//! Logfmt line parser
//!
//! Reads lines produced by the formatter back into a [`Record`]. Parsing is
//! best effort: malformed input never fails, it yields whatever tokens could
//! be recovered.
//!
//! Value typing on the way back:
//! - a bare key (`flag`) becomes `true`
//! - `true` / `false` become booleans
//! - an empty, never-quoted value (`k=`) becomes null
//! - `k=""` stays an empty string
//! - everything else is a string
//!
//! A field written as null (bare key) therefore reads back as `true`.
//!
//! Only a quoted `=` is kept as text. An unquoted `=` inside a value is
//! consumed as a separator, so `k=a=b` reads back as `k=ab`.

use crate::core::{FieldSet, FieldValue};

/// Parsed line
pub type Record = FieldSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    BetweenTokens,
    InKey,
    InValue,
}

struct Scanner {
    state: State,
    key: String,
    value: String,
    in_quote: bool,
    had_quote: bool,
    record: Record,
}

impl Scanner {
    fn new() -> Self {
        Self {
            state: State::BetweenTokens,
            key: String::new(),
            value: String::new(),
            in_quote: false,
            had_quote: false,
            record: Record::new(),
        }
    }

    fn push(&mut self, c: char) {
        match self.state {
            State::BetweenTokens => {
                if c != ' ' {
                    self.state = State::InKey;
                    self.key.push(c);
                }
            }
            State::InKey => self.key.push(c),
            State::InValue => self.value.push(c),
        }
    }

    /// An unquoted `=` opens the value; once open, further ones are dropped
    fn separator(&mut self) {
        self.state = State::InValue;
    }

    fn toggle_quote(&mut self) {
        self.had_quote = true;
        self.in_quote = !self.in_quote;
    }

    fn close_token(&mut self) {
        let key = std::mem::take(&mut self.key);
        let value = std::mem::take(&mut self.value);

        if !key.is_empty() {
            match self.state {
                State::InKey => {
                    self.record.insert(key, true);
                }
                State::InValue => {
                    self.record.insert(key, typed_value(value, self.had_quote));
                }
                State::BetweenTokens => {}
            }
        }

        self.state = State::BetweenTokens;
        self.in_quote = false;
        self.had_quote = false;
    }
}

fn typed_value(value: String, had_quote: bool) -> FieldValue {
    match value.as_str() {
        "true" => FieldValue::Bool(true),
        "false" => FieldValue::Bool(false),
        "" if !had_quote => FieldValue::Null,
        _ => FieldValue::String(value),
    }
}

/// Parse one logfmt line
///
/// A single trailing newline is ignored.
///
/// ```
/// use logfmtr::{parse, FieldValue};
///
/// let record = parse("level=info a=b c=d evt=started\n");
/// let keys: Vec<&str> = record.keys().collect();
/// assert_eq!(keys, vec!["level", "a", "c", "evt"]);
/// assert_eq!(record.get_str("evt"), Some("started"));
/// ```
pub fn parse(line: &str) -> Record {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let mut scanner = Scanner::new();
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            ' ' if !scanner.in_quote => scanner.close_token(),
            '=' if !scanner.in_quote => scanner.separator(),
            '\\' => match chars.next() {
                Some(escaped) => scanner.push(escaped),
                // a trailing backslash ends the input
                None => break,
            },
            '"' => scanner.toggle_quote(),
            other => scanner.push(other),
        }
    }

    scanner.close_token();
    scanner.record
}

/// Parse every non-blank line of `text`
pub fn parse_lines(text: &str) -> Vec<Record> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> FieldValue {
        FieldValue::String(v.to_string())
    }

    #[test]
    fn test_simple_line() {
        let record = parse("level=info a=b c=d evt=started\n");
        let expected = FieldSet::new()
            .with_field("level", "info")
            .with_field("a", "b")
            .with_field("c", "d")
            .with_field("evt", "started");
        assert_eq!(record, expected);
    }

    #[test]
    fn test_bare_key_reads_as_true() {
        let record = parse("level=info a evt=evt1\n");
        assert_eq!(record.get("a"), Some(&FieldValue::Bool(true)));
        assert_eq!(record.get_str("evt"), Some("evt1"));
    }

    #[test]
    fn test_boolean_and_null_typing() {
        let record = parse("t=true f=false n= q=\"\" word=trueish");
        assert_eq!(record.get("t"), Some(&FieldValue::Bool(true)));
        assert_eq!(record.get("f"), Some(&FieldValue::Bool(false)));
        assert_eq!(record.get("n"), Some(&FieldValue::Null));
        assert_eq!(record.get("q"), Some(&s("")));
        assert_eq!(record.get("word"), Some(&s("trueish")));
    }

    #[test]
    fn test_quoted_value_with_spaces() {
        let record = parse("level=info msg=\"Hello, World!\" evt=ok");
        assert_eq!(record.get("msg"), Some(&s("Hello, World!")));
        assert_eq!(record.get_str("evt"), Some("ok"));
    }

    #[test]
    fn test_escaped_quotes() {
        let record = parse("level=info msg=\\\"Quote\\\"! evt=ok");
        assert_eq!(record.get("msg"), Some(&s("\"Quote\"!")));

        let record = parse("msg=\"say \\\"hi\\\" now\"");
        assert_eq!(record.get("msg"), Some(&s("say \"hi\" now")));
    }

    #[test]
    fn test_escaped_backslash() {
        let record = parse("path=C:\\\\dir");
        assert_eq!(record.get("path"), Some(&s("C:\\dir")));
    }

    #[test]
    fn test_escape_takes_next_char_verbatim() {
        // `\n` on the wire is a backslash and an `n`, read back as `n`
        let record = parse("msg=a\\nb");
        assert_eq!(record.get("msg"), Some(&s("anb")));
    }

    #[test]
    fn test_escape_in_key_extends_key() {
        let record = parse("a\\b=1");
        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, vec!["ab"]);
        assert_eq!(record.get("ab"), Some(&s("1")));

        let record = parse("x=1 \\k=v");
        assert_eq!(record.get("x"), Some(&s("1")));
        assert_eq!(record.get("k"), Some(&s("v")));
    }

    #[test]
    fn test_trailing_backslash_ends_input() {
        let record = parse("a=1 b=x\\");
        assert_eq!(record.get("a"), Some(&s("1")));
        assert_eq!(record.get("b"), Some(&s("x")));
    }

    #[test]
    fn test_quoted_equals_is_kept() {
        let record = parse("q=\"a=b c\" k=\"x=y\"");
        assert_eq!(record.get("q"), Some(&s("a=b c")));
        assert_eq!(record.get("k"), Some(&s("x=y")));
    }

    #[test]
    fn test_unquoted_equals_in_value_is_dropped() {
        assert_eq!(parse("k=a=b").get("k"), Some(&s("ab")));

        let record = parse("url=/a?b=c evt=x");
        assert_eq!(record.get("url"), Some(&s("/a?bc")));
        assert_eq!(record.get_str("evt"), Some("x"));

        assert_eq!(parse("k==").get("k"), Some(&FieldValue::Null));
    }

    #[test]
    fn test_consecutive_spaces_produce_no_keys() {
        let record = parse("  a=1    b=2  ");
        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_whitespace_only_line() {
        assert!(parse("   ").is_empty());
        assert!(parse("").is_empty());
        assert!(parse("\n").is_empty());
    }

    #[test]
    fn test_empty_key_is_dropped() {
        let record = parse("=orphan a=1");
        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, vec!["a"]);
    }

    #[test]
    fn test_json_value_stays_in_one_token() {
        let record = parse("level=info obj={\"a b\":1} evt=got-obj");
        assert_eq!(record.get("obj"), Some(&s("{a b:1}")));
        assert_eq!(record.get_str("evt"), Some("got-obj"));
    }

    #[test]
    fn test_multibyte_passthrough() {
        let record = parse("name=héllo→世界 city=\"São Paulo\"");
        assert_eq!(record.get("name"), Some(&s("héllo→世界")));
        assert_eq!(record.get("city"), Some(&s("São Paulo")));
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let record = parse("a=1 b=2 a=3");
        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(record.get("a"), Some(&s("3")));
    }

    #[test]
    fn test_unterminated_quote_is_best_effort() {
        let record = parse("a=1 msg=\"never closed evt=x");
        assert_eq!(record.get("a"), Some(&s("1")));
        assert_eq!(record.get("msg"), Some(&s("never closed evt=x")));
    }

    #[test]
    fn test_parse_lines_skips_blank() {
        let records = parse_lines("level=info evt=a\n\n   \nlevel=warn evt=b\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get_str("level"), Some("warn"));
    }
}
