//! Relaxed JSON-like grammar for hand-written config files.
//!
//! Accepts everything strict JSON accepts, plus `//` and `/* */` comments,
//! unquoted identifier keys, single-quoted strings, trailing commas, a
//! leading `+` or `.` on numbers, and an optional `module.exports =` or
//! `export default` wrapper with a trailing `;`.
//!
//! Nesting is capped at `MAX_DEPTH` levels, the same limit serde_json uses.

use serde_json::{Map, Number, Value};
use winnow::ascii::multispace0;
use winnow::combinator::{alt, fail, opt, preceded};
use winnow::prelude::*;
use winnow::token::{any, one_of, take_till, take_until, take_while};

const MAX_DEPTH: usize = 128;

/// Parse a whole document. Returns the parser's error message on failure.
pub(crate) fn parse(source: &str) -> Result<Value, String> {
    document.parse(source).map_err(|e| e.to_string())
}

fn document(input: &mut &str) -> ModalResult<Value> {
    trivia(input)?;
    opt(export_wrapper).parse_next(input)?;
    let value = json_value(input, 0)?;
    trivia(input)?;
    opt(';').parse_next(input)?;
    trivia(input)?;
    Ok(value)
}

fn export_wrapper(input: &mut &str) -> ModalResult<()> {
    alt((
        ("module.exports", trivia, '=').void(),
        ("export", trivia, "default").void(),
    ))
    .parse_next(input)
}

/// Whitespace and comments.
fn trivia(input: &mut &str) -> ModalResult<()> {
    loop {
        multispace0.parse_next(input)?;
        if input.starts_with("//") {
            take_till(0.., '\n').void().parse_next(input)?;
        } else if input.starts_with("/*") {
            ("/*", take_until(0.., "*/"), "*/").void().parse_next(input)?;
        } else {
            return Ok(());
        }
    }
}

fn json_value(input: &mut &str, depth: usize) -> ModalResult<Value> {
    trivia(input)?;
    match input.chars().next() {
        Some('{' | '[') if depth >= MAX_DEPTH => fail(input),
        Some('{') => object(input, depth + 1),
        Some('[') => array(input, depth + 1),
        Some('"' | '\'') => quoted_string.map(Value::String).parse_next(input),
        Some(c) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => number(input),
        _ => keyword(input),
    }
}

fn object(input: &mut &str, depth: usize) -> ModalResult<Value> {
    '{'.parse_next(input)?;
    let mut members = Map::new();
    loop {
        trivia(input)?;
        if opt('}').parse_next(input)?.is_some() {
            return Ok(Value::Object(members));
        }
        let key = object_key(input)?;
        trivia(input)?;
        ':'.parse_next(input)?;
        let value = json_value(input, depth)?;
        members.insert(key, value);
        trivia(input)?;
        if opt(',').parse_next(input)?.is_none() {
            '}'.parse_next(input)?;
            return Ok(Value::Object(members));
        }
    }
}

fn array(input: &mut &str, depth: usize) -> ModalResult<Value> {
    '['.parse_next(input)?;
    let mut items = Vec::new();
    loop {
        trivia(input)?;
        if opt(']').parse_next(input)?.is_some() {
            return Ok(Value::Array(items));
        }
        items.push(json_value(input, depth)?);
        trivia(input)?;
        if opt(',').parse_next(input)?.is_none() {
            ']'.parse_next(input)?;
            return Ok(Value::Array(items));
        }
    }
}

fn object_key(input: &mut &str) -> ModalResult<String> {
    alt((quoted_string, identifier.map(String::from))).parse_next(input)
}

fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        one_of(|c: char| c.is_alphabetic() || c == '_' || c == '$'),
        take_while(0.., |c: char| c.is_alphanumeric() || c == '_' || c == '$'),
    )
        .take()
        .parse_next(input)
}

fn keyword(input: &mut &str) -> ModalResult<Value> {
    identifier
        .verify_map(|word| match word {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            "null" => Some(Value::Null),
            _ => None,
        })
        .parse_next(input)
}

fn number(input: &mut &str) -> ModalResult<Value> {
    take_while(1.., |c: char| {
        c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')
    })
    .verify_map(number_value)
    .parse_next(input)
}

fn number_value(raw: &str) -> Option<Value> {
    let digits = raw.strip_prefix('+').unwrap_or(raw);
    if let Ok(int) = digits.parse::<i64>() {
        return Some(Value::from(int));
    }
    if let Ok(uint) = digits.parse::<u64>() {
        return Some(Value::from(uint));
    }
    digits
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

fn quoted_string(input: &mut &str) -> ModalResult<String> {
    let quote = one_of(['"', '\'']).parse_next(input)?;
    let mut out = String::new();
    loop {
        match any.parse_next(input)? {
            c if c == quote => return Ok(out),
            '\\' => out.push(escape(input)?),
            c => out.push(c),
        }
    }
}

fn escape(input: &mut &str) -> ModalResult<char> {
    let unescaped = match any.parse_next(input)? {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        'b' => '\u{8}',
        'f' => '\u{c}',
        '0' => '\0',
        'u' => return unicode_escape(input),
        other => other,
    };
    Ok(unescaped)
}

/// `\uXXXX`, combining a UTF-16 surrogate pair into one char.
fn unicode_escape(input: &mut &str) -> ModalResult<char> {
    let unit = code_unit(input)?;
    let code = if (0xD800..0xDC00).contains(&unit) {
        let low = preceded("\\u", code_unit.verify(|low: &u32| (0xDC00..0xE000).contains(low)))
            .parse_next(input)?;
        0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00)
    } else {
        unit
    };
    match char::from_u32(code) {
        Some(c) => Ok(c),
        None => fail(input),
    }
}

fn code_unit(input: &mut &str) -> ModalResult<u32> {
    take_while(4usize, |c: char| c.is_ascii_hexdigit())
        .try_map(|hex: &str| u32::from_str_radix(hex, 16))
        .parse_next(input)
}
