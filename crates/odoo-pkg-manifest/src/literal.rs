//! Strict Python literal parser
//!
//! The manifest source is parsed into a Python syntax tree with ast-grep and
//! then walked node by node. Only literal node kinds are accepted: strings,
//! numbers, booleans, `None`, lists, tuples, sets, dicts, unary signs on
//! numbers, parentheses and comments. Names, calls, operators, comprehensions,
//! f-strings, statements and syntax errors are rejected, so nothing in a
//! manifest is ever evaluated.

use ast_grep_core::source::StrDoc;
use ast_grep_core::{AstGrep, Node};
use ast_grep_language::Python;
use std::iter::Peekable;
use std::str::Chars;
use thiserror::Error;

use crate::value::Value;

type PyNode<'r> = Node<'r, StrDoc<Python>>;

/// A literal that could not be parsed, with the 1-based line it starts on
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct LiteralError {
    pub line: usize,
    pub message: String,
}

/// Parse a source string holding exactly one Python literal
pub fn parse_literal(source: &str) -> Result<Value, LiteralError> {
    let sg = AstGrep::new(source, Python);
    let root = sg.root();
    let walker = Walker { source };

    let statements = walker.operands(&root, &[])?;
    let statement = match statements.as_slice() {
        [single] => single,
        [] => {
            return Err(LiteralError {
                line: 1,
                message: "expected a literal, found nothing".to_string(),
            })
        }
        [_, extra, ..] => return Err(walker.error(extra, "unexpected content after the literal")),
    };
    if statement.kind() != "expression_statement" {
        return Err(walker.unsupported(statement));
    }

    // A trailing comma turns the statement into a tuple expression
    let expressions = walker.operands(statement, &[])?;
    match expressions.as_slice() {
        [expression] => walker.convert(expression),
        _ => Err(walker.error(statement, "expected a single literal expression")),
    }
}

struct Walker<'s> {
    source: &'s str,
}

impl Walker<'_> {
    fn line_of(&self, node: &PyNode<'_>) -> usize {
        let offset = node.range().start.min(self.source.len());
        self.source.as_bytes()[..offset]
            .iter()
            .filter(|b| **b == b'\n')
            .count()
            + 1
    }

    fn error(&self, node: &PyNode<'_>, message: impl Into<String>) -> LiteralError {
        LiteralError {
            line: self.line_of(node),
            message: message.into(),
        }
    }

    fn unsupported(&self, node: &PyNode<'_>) -> LiteralError {
        let kind = node.kind();
        if kind == "ERROR" {
            return self.error(node, format!("syntax error near `{}`", excerpt(&node.text())));
        }
        self.error(
            node,
            format!("`{}` is not a literal ({})", excerpt(&node.text()), kind),
        )
    }

    /// Children of `node` without comments and without the given punctuation.
    /// Punctuation inserted by error recovery has no text and is reported.
    fn operands<'r>(
        &self,
        node: &PyNode<'r>,
        punctuation: &[&str],
    ) -> Result<Vec<PyNode<'r>>, LiteralError> {
        let mut operands = Vec::new();
        for child in node.children() {
            let kind = child.kind();
            if kind == "comment" {
                continue;
            }
            if punctuation.iter().any(|p| kind == *p) {
                if child.text().is_empty() {
                    return Err(self.error(&child, format!("missing `{}`", kind)));
                }
                continue;
            }
            operands.push(child);
        }
        Ok(operands)
    }

    fn convert_all(&self, nodes: &[PyNode<'_>]) -> Result<Vec<Value>, LiteralError> {
        nodes.iter().map(|n| self.convert(n)).collect()
    }

    fn convert(&self, node: &PyNode<'_>) -> Result<Value, LiteralError> {
        let kind = node.kind();
        match &*kind {
            "dictionary" => {
                let mut entries = Vec::new();
                for pair in self.operands(node, &["{", "}", ","])? {
                    if pair.kind() != "pair" {
                        return Err(self.unsupported(&pair));
                    }
                    match self.operands(&pair, &[":"])?.as_slice() {
                        [key, value] => entries.push((self.convert(key)?, self.convert(value)?)),
                        _ => return Err(self.error(&pair, "malformed dictionary entry")),
                    }
                }
                Ok(Value::Dict(entries))
            }
            "list" => Ok(Value::List(
                self.convert_all(&self.operands(node, &["[", "]", ","])?)?,
            )),
            "tuple" => Ok(Value::Tuple(
                self.convert_all(&self.operands(node, &["(", ")", ","])?)?,
            )),
            "set" => Ok(Value::Set(
                self.convert_all(&self.operands(node, &["{", "}", ","])?)?,
            )),
            "parenthesized_expression" => match self.operands(node, &["(", ")"])?.as_slice() {
                [inner] => self.convert(inner),
                _ => Err(self.unsupported(node)),
            },
            "string" => decode_string(&node.text())
                .map(Value::Str)
                .map_err(|message| self.error(node, message)),
            "concatenated_string" => {
                let mut joined = String::new();
                for part in self.operands(node, &[])? {
                    if part.kind() != "string" {
                        return Err(self.unsupported(&part));
                    }
                    let decoded =
                        decode_string(&part.text()).map_err(|message| self.error(&part, message))?;
                    joined.push_str(&decoded);
                }
                Ok(Value::Str(joined))
            }
            "integer" => parse_int(&node.text())
                .map(Value::Int)
                .map_err(|message| self.error(node, message)),
            "float" => parse_float(&node.text())
                .map(Value::Float)
                .map_err(|message| self.error(node, message)),
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            "none" => Ok(Value::None),
            "unary_operator" => self.convert_signed(node),
            _ => Err(self.unsupported(node)),
        }
    }

    /// `-1`, `+2.5`: a sign applied directly to a number
    fn convert_signed(&self, node: &PyNode<'_>) -> Result<Value, LiteralError> {
        let parts = self.operands(node, &[])?;
        let [sign, operand] = parts.as_slice() else {
            return Err(self.unsupported(node));
        };
        let negate = match &*sign.text() {
            "-" => true,
            "+" => false,
            _ => return Err(self.unsupported(node)),
        };
        match self.convert(operand)? {
            Value::Int(i) if negate => i
                .checked_neg()
                .map(Value::Int)
                .ok_or_else(|| self.error(node, "integer out of range")),
            Value::Float(x) if negate => Ok(Value::Float(-x)),
            number @ (Value::Int(_) | Value::Float(_)) => Ok(number),
            _ => Err(self.unsupported(node)),
        }
    }
}

fn excerpt(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or_default();
    if first_line.chars().count() > 40 {
        format!("{}...", first_line.chars().take(40).collect::<String>())
    } else {
        first_line.to_string()
    }
}

fn parse_int(text: &str) -> Result<i64, String> {
    let cleaned = text.replace('_', "").to_ascii_lowercase();
    if cleaned.ends_with('j') {
        return Err(format!("complex number `{}` is not supported", text));
    }
    // Python 2 long suffix
    let digits = cleaned.strip_suffix('l').unwrap_or(&cleaned);

    let (radix, body) = if let Some(hex) = digits.strip_prefix("0x") {
        (16, hex)
    } else if let Some(oct) = digits.strip_prefix("0o") {
        (8, oct)
    } else if let Some(bin) = digits.strip_prefix("0b") {
        (2, bin)
    } else if digits.len() > 1 && digits.starts_with('0') && digits.bytes().any(|b| b != b'0') {
        return Err(format!("leading zeros in integer `{}`", text));
    } else {
        (10, digits)
    };

    i64::from_str_radix(body, radix).map_err(|e| format!("invalid integer `{}`: {}", text, e))
}

fn parse_float(text: &str) -> Result<f64, String> {
    let cleaned = text.replace('_', "");
    if cleaned.ends_with(['j', 'J']) {
        return Err(format!("complex number `{}` is not supported", text));
    }
    cleaned
        .parse::<f64>()
        .map_err(|e| format!("invalid float `{}`: {}", text, e))
}

/// Decode the full source text of one string literal, prefix and quotes included
fn decode_string(text: &str) -> Result<String, String> {
    let quote_start = text
        .find(['\'', '"'])
        .ok_or_else(|| format!("malformed string `{}`", excerpt(text)))?;
    let prefix = text[..quote_start].to_ascii_lowercase();
    if prefix.contains('f') {
        return Err(format!("f-string `{}` is not a literal", excerpt(text)));
    }
    if !matches!(prefix.as_str(), "" | "r" | "u" | "b" | "br" | "rb") {
        return Err(format!("unknown string prefix `{}`", prefix));
    }
    let raw = prefix.contains('r');

    let body = &text[quote_start..];
    let quote = if body.starts_with("'''") || body.starts_with("\"\"\"") {
        &body[..3]
    } else {
        &body[..1]
    };
    if body.len() < 2 * quote.len() || !body.ends_with(quote) {
        return Err(format!("unterminated string `{}`", excerpt(text)));
    }
    let inner = &body[quote.len()..body.len() - quote.len()];

    if raw {
        Ok(inner.to_string())
    } else {
        unescape(inner)
    }
}

fn unescape(inner: &str) -> Result<String, String> {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let Some(escaped) = chars.next() else {
            return Err("string ends with a backslash".to_string());
        };
        match escaped {
            // line continuation
            '\n' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            '\\' | '\'' | '"' => out.push(escaped),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0c}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{0b}'),
            '0'..='7' => {
                let mut code = escaped.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(digit) => {
                            code = code * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.push(code_point(code)?);
            }
            'x' => out.push(code_point(hex_digits(&mut chars, 2)?)?),
            'u' => out.push(code_point(hex_digits(&mut chars, 4)?)?),
            'U' => out.push(code_point(hex_digits(&mut chars, 8)?)?),
            'N' => return Err("named unicode escapes are not supported".to_string()),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }
    Ok(out)
}

fn hex_digits(chars: &mut Peekable<Chars<'_>>, count: usize) -> Result<u32, String> {
    let digits: String = chars.by_ref().take(count).collect();
    if digits.len() != count {
        return Err(format!("truncated escape, expected {} hex digits", count));
    }
    u32::from_str_radix(&digits, 16).map_err(|_| format!("invalid hex escape `{}`", digits))
}

fn code_point(code: u32) -> Result<char, String> {
    char::from_u32(code).ok_or_else(|| format!("invalid code point {:#x}", code))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Value {
        Value::Str(v.to_string())
    }

    #[test]
    fn test_parse_typical_manifest() -> Result<(), LiteralError> {
        let source = r#"# -*- coding: utf-8 -*-
# Copyright 2015 ACSONE SA/NV
{
    'name': 'Sale Order Lot',
    'version': '8.0.1.0.0',
    'depends': ['base', 'sale'],  # keep sorted
    'external_dependencies': {
        'python': ['PIL'],
    },
    'installable': True,
    'auto_install': False,
    'sequence': 10,
}
"#;
        let value = parse_literal(source)?;
        assert_eq!(value.get("name"), Some(&s("Sale Order Lot")));
        assert_eq!(value.get("version"), Some(&s("8.0.1.0.0")));
        assert_eq!(
            value.get("depends"),
            Some(&Value::List(vec![s("base"), s("sale")]))
        );
        assert_eq!(
            value.get("external_dependencies").and_then(|e| e.get("python")),
            Some(&Value::List(vec![s("PIL")]))
        );
        assert_eq!(value.get("installable"), Some(&Value::Bool(true)));
        assert_eq!(value.get("sequence"), Some(&Value::Int(10)));
        Ok(())
    }

    #[test]
    fn test_parse_strings() -> Result<(), LiteralError> {
        let source = r#"{
    'summary': ("Adjacent "
                'strings join'),
    'description': """
Line one
  Line two
""",
    'escapes': 'tab\there\x41\u00e9\101',
    'raw': r'C:\new',
    'legacy': u'unicode',
}"#;
        let value = parse_literal(source)?;
        assert_eq!(value.get("summary"), Some(&s("Adjacent strings join")));
        assert_eq!(value.get("description"), Some(&s("\nLine one\n  Line two\n")));
        assert_eq!(value.get("escapes"), Some(&s("tab\thereAéA")));
        assert_eq!(value.get("raw"), Some(&s("C:\\new")));
        assert_eq!(value.get("legacy"), Some(&s("unicode")));
        Ok(())
    }

    #[test]
    fn test_parse_numbers_and_containers() -> Result<(), LiteralError> {
        let value = parse_literal("{'a': -1, 'b': +2.5, 'c': 0x1F, 'd': (1,), 'e': {1, 2}, 'f': None}")?;
        assert_eq!(value.get("a"), Some(&Value::Int(-1)));
        assert_eq!(value.get("b"), Some(&Value::Float(2.5)));
        assert_eq!(value.get("c"), Some(&Value::Int(31)));
        assert_eq!(value.get("d"), Some(&Value::Tuple(vec![Value::Int(1)])));
        assert_eq!(
            value.get("e"),
            Some(&Value::Set(vec![Value::Int(1), Value::Int(2)]))
        );
        assert_eq!(value.get("f"), Some(&Value::None));
        Ok(())
    }

    #[test]
    fn test_reject_function_call() {
        let result = parse_literal("{'name': __import__('os').system('true')}");
        assert!(result.is_err_and(|e| e.message.contains("is not a literal")));
    }

    #[test]
    fn test_reject_names_and_operators() {
        assert!(parse_literal("{'installable': installable}").is_err());
        assert!(parse_literal("{'version': '8.0' + '.1.0.0'}").is_err());
        assert!(parse_literal("{'depends': [d for d in ('base',)]}").is_err());
    }

    #[test]
    fn test_reject_statements() {
        assert!(parse_literal("import os\n{'name': 'x'}").is_err());
        assert!(parse_literal("manifest = {'name': 'x'}").is_err());
        assert!(parse_literal("{'name': 'x'}\n{'name': 'y'}").is_err());
    }

    #[test]
    fn test_reject_fstring() {
        let result = parse_literal("{'name': f'{x}'}");
        assert!(result.is_err());
    }

    #[test]
    fn test_reject_syntax_error() {
        assert!(parse_literal("{'name': 'x',").is_err());
        assert!(parse_literal("{'name' 'x'").is_err());
        assert!(parse_literal("").is_err());
    }

    #[test]
    fn test_error_reports_line() {
        let result = parse_literal("{\n    'name': 'x',\n    'version': VERSION,\n}");
        assert!(result.is_err_and(|e| e.line == 3));
    }

    #[test]
    fn test_decode_string_prefixes() {
        assert_eq!(decode_string("b'bytes'"), Ok("bytes".to_string()));
        assert_eq!(decode_string("R'\\d'"), Ok("\\d".to_string()));
        assert!(decode_string("F'x'").is_err());
        assert_eq!(decode_string("''"), Ok(String::new()));
        assert_eq!(decode_string("''''''"), Ok(String::new()));
    }

    #[test]
    fn test_parse_int_edge_cases() {
        assert_eq!(parse_int("1_000"), Ok(1000));
        assert_eq!(parse_int("0"), Ok(0));
        assert_eq!(parse_int("0o17"), Ok(15));
        assert!(parse_int("0755").is_err());
        assert!(parse_int("3j").is_err());
    }
}
