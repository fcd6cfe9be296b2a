//! Constant literal values read out of the syntax tree.
//!
//! Python folds a handful of expression forms into constants: numbers,
//! strings and bytes (after escape processing and adjacent-literal
//! concatenation), `True`/`False`, `None` and `...`. Everything else, f-strings
//! and negated numbers included, is an expression rather than a constant.

use serde::Serialize;
use tree_sitter::Node;

use crate::syntax::{node_text, significant_children};

/// A constant literal value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Literal {
    /// The `None` literal.
    None,
    /// `True` or `False`.
    Bool(bool),
    /// An integer literal that fits in an `i128`.
    Int(i128),
    /// A floating-point literal.
    Float(f64),
    /// An imaginary literal such as `2j`, holding its imaginary part.
    Complex(f64),
    /// A decoded string literal.
    Str(String),
    /// A decoded bytes literal.
    Bytes(Vec<u8>),
    /// The `...` literal.
    Ellipsis,
}

impl Literal {
    /// Reads the constant value of `node`, if it is a constant literal.
    #[must_use]
    pub(crate) fn from_node(node: Node<'_>, source: &str) -> Option<Self> {
        match node.kind() {
            "none" => Some(Self::None),
            "true" => Some(Self::Bool(true)),
            "false" => Some(Self::Bool(false)),
            "ellipsis" => Some(Self::Ellipsis),
            "integer" => parse_integer(node_text(node, source)),
            "float" => parse_float(node_text(node, source)),
            "string" => decode_string(node, source).map(StringValue::into_literal),
            "concatenated_string" => decode_concatenation(node, source),
            _ => None,
        }
    }

    /// Returns true for node kinds whose value is compared by
    /// [`Literal::from_node`] rather than by source text.
    pub(crate) fn is_literal_kind(kind: &str) -> bool {
        matches!(kind, "integer" | "float" | "string" | "concatenated_string")
    }
}

fn without_underscores(text: &str) -> String {
    text.chars().filter(|c| *c != '_').collect()
}

fn imaginary_part(text: &str) -> Option<&str> {
    text.strip_suffix(['j', 'J'])
}

fn parse_integer(text: &str) -> Option<Literal> {
    let digits = without_underscores(text);
    if let Some(imaginary) = imaginary_part(&digits) {
        return imaginary.parse().ok().map(Literal::Complex);
    }

    let lowered = digits.to_ascii_lowercase();
    let (radix, body) = if let Some(hex) = lowered.strip_prefix("0x") {
        (16, hex)
    } else if let Some(octal) = lowered.strip_prefix("0o") {
        (8, octal)
    } else if let Some(binary) = lowered.strip_prefix("0b") {
        (2, binary)
    } else {
        (10, lowered.as_str())
    };

    i128::from_str_radix(body, radix).ok().map(Literal::Int)
}

fn parse_float(text: &str) -> Option<Literal> {
    let digits = without_underscores(text);
    if let Some(imaginary) = imaginary_part(&digits) {
        return imaginary.parse().ok().map(Literal::Complex);
    }
    digits.parse().ok().map(Literal::Float)
}

/// A decoded piece of a string or bytes literal.
enum StringValue {
    Text(String),
    Binary(Vec<u8>),
}

impl StringValue {
    fn into_literal(self) -> Literal {
        match self {
            Self::Text(text) => Literal::Str(text),
            Self::Binary(bytes) => Literal::Bytes(bytes),
        }
    }
}

/// Python forbids mixing string and bytes pieces in one concatenation.
fn decode_concatenation(node: Node<'_>, source: &str) -> Option<Literal> {
    let mut pieces = significant_children(node)
        .into_iter()
        .map(|piece| decode_string(piece, source));

    match pieces.next()?? {
        StringValue::Text(mut text) => {
            for piece in pieces {
                let StringValue::Text(more) = piece? else {
                    return None;
                };
                text.push_str(&more);
            }
            Some(Literal::Str(text))
        }
        StringValue::Binary(mut bytes) => {
            for piece in pieces {
                let StringValue::Binary(more) = piece? else {
                    return None;
                };
                bytes.extend(more);
            }
            Some(Literal::Bytes(bytes))
        }
    }
}

fn decode_string(node: Node<'_>, source: &str) -> Option<StringValue> {
    if node.kind() != "string" {
        return None;
    }
    let children = significant_children(node);
    if children.iter().any(|child| child.kind() == "interpolation") {
        return None;
    }
    let start = children.first().filter(|c| c.kind() == "string_start")?;
    let end = children.last().filter(|c| c.kind() == "string_end")?;

    let delimiter = node_text(*start, source);
    let prefix: String = delimiter
        .chars()
        .take_while(|c| *c != '"' && *c != '\'')
        .map(|c| c.to_ascii_lowercase())
        .collect();
    // f-strings and t-strings are expressions even without placeholders.
    if prefix.contains('f') || prefix.contains('t') {
        return None;
    }

    let body = source.get(start.end_byte()..end.start_byte())?;
    let raw = prefix.contains('r');
    if prefix.contains('b') {
        unescape_bytes(body, raw).map(StringValue::Binary)
    } else {
        unescape_text(body, raw).map(StringValue::Text)
    }
}

/// One decoded unit of a literal body.
enum Unit {
    Char(char),
    Byte(u8),
    /// An unrecognised escape, kept with its backslash.
    Verbatim(char),
    Nothing,
}

fn unescape_text(body: &str, raw: bool) -> Option<String> {
    if raw {
        return Some(body.to_owned());
    }
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match next_escape(&mut chars, false)? {
            Unit::Char(decoded) => out.push(decoded),
            Unit::Byte(byte) => out.push(char::from(byte)),
            Unit::Verbatim(kept) => {
                out.push('\\');
                out.push(kept);
            }
            Unit::Nothing => {}
        }
    }
    Some(out)
}

fn unescape_bytes(body: &str, raw: bool) -> Option<Vec<u8>> {
    if raw {
        return Some(body.as_bytes().to_vec());
    }
    let mut out = Vec::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    let mut buffer = [0_u8; 4];
    while let Some(c) = chars.next() {
        let unit = if c == '\\' {
            next_escape(&mut chars, true)?
        } else {
            Unit::Char(c)
        };
        match unit {
            Unit::Char(decoded) => {
                out.extend_from_slice(decoded.encode_utf8(&mut buffer).as_bytes());
            }
            Unit::Byte(byte) => out.push(byte),
            Unit::Verbatim(kept) => {
                out.push(b'\\');
                out.extend_from_slice(kept.encode_utf8(&mut buffer).as_bytes());
            }
            Unit::Nothing => {}
        }
    }
    Some(out)
}

type Chars<'a> = std::iter::Peekable<std::str::Chars<'a>>;

/// Decodes the escape sequence following a backslash.
///
/// Returns `None` for escapes whose value cannot be determined here, such as
/// `\N{...}` named characters.
fn next_escape(chars: &mut Chars<'_>, bytes: bool) -> Option<Unit> {
    let Some(c) = chars.next() else {
        return Some(Unit::Char('\\'));
    };
    let unit = match c {
        '\n' => Unit::Nothing,
        '\\' | '\'' | '"' => Unit::Char(c),
        'a' => Unit::Char('\u{07}'),
        'b' => Unit::Char('\u{08}'),
        'f' => Unit::Char('\u{0c}'),
        'n' => Unit::Char('\n'),
        'r' => Unit::Char('\r'),
        't' => Unit::Char('\t'),
        'v' => Unit::Char('\u{0b}'),
        '0'..='7' => code_unit(octal_value(c, chars)?, bytes)?,
        'x' => code_unit(hex_value(chars, 2)?, bytes)?,
        'u' if !bytes => Unit::Char(char::from_u32(hex_value(chars, 4)?)?),
        'U' if !bytes => Unit::Char(char::from_u32(hex_value(chars, 8)?)?),
        'N' if !bytes => return None,
        other => Unit::Verbatim(other),
    };
    Some(unit)
}

/// Reads up to three octal digits, the first of which is `first`.
fn octal_value(first: char, chars: &mut Chars<'_>) -> Option<u32> {
    let mut value = first.to_digit(8)?;
    for _ in 0..2 {
        let Some(digit) = chars.peek().and_then(|next| next.to_digit(8)) else {
            break;
        };
        value = value * 8 + digit;
        chars.next();
    }
    Some(value)
}

/// Reads exactly `count` hexadecimal digits.
fn hex_value(chars: &mut Chars<'_>, count: usize) -> Option<u32> {
    let mut value = 0_u32;
    for _ in 0..count {
        let digit = chars.next()?.to_digit(16)?;
        value = value.checked_mul(16)?.checked_add(digit)?;
    }
    Some(value)
}

fn code_unit(value: u32, bytes: bool) -> Option<Unit> {
    if bytes {
        u8::try_from(value).ok().map(Unit::Byte)
    } else {
        char::from_u32(value).map(Unit::Char)
    }
}
