use crate::error::UnescapeError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::iter::Peekable;
use std::str::CharIndices;
use tracing::{debug, warn};

// A JSON string body: escaped characters are skipped, so `\"` does not end it
const PLAIN_BODY: &str = r#"((?:\\.|[^"\\])+)"#;

// The same body one escaping level deeper (JSON inside a JSON string), closed by `\"`.
// Inner quotes arrive as `\\\"`, inner escapes as `\\n`.
const ESCAPED_BODY: &str = r#"((?:\\\\\\"|\\\\|\\[^"\\]|[^"\\])+)"#;

// {"ideas":"long text here"}
static IDEAS_STRING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r#"(?s)"ideas"\s*:\s*"{PLAIN_BODY}""#))
        .expect("valid ideas string regex")
});

// "{\"ideas\":\"long text here\"}"
static ESCAPED_IDEAS_STRING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r#"(?s)\\"ideas\\"\s*:\s*\\"{ESCAPED_BODY}\\""#))
        .expect("valid escaped ideas string regex")
});

// {"ideas":["text"]}
static IDEAS_ARRAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r#"(?s)"ideas"\s*:\s*\[\s*"{PLAIN_BODY}"\s*\]"#))
        .expect("valid ideas array regex")
});

static ESCAPED_IDEAS_ARRAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r#"(?s)\\"ideas\\"\s*:\s*\[\s*\\"{ESCAPED_BODY}\\"\s*\]"#))
        .expect("valid escaped ideas array regex")
});

static PAYLOAD_SHAPES: [(&str, &Lazy<Regex>); 4] = [
    ("ideas_string", &IDEAS_STRING_RE),
    ("escaped_ideas_string", &ESCAPED_IDEAS_STRING_RE),
    ("ideas_array", &IDEAS_ARRAY_RE),
    ("escaped_ideas_array", &ESCAPED_IDEAS_ARRAY_RE),
];

/// Recover the natural-language body from a raw model response.
///
/// Handles a bare `"ideas"` string field, a single-element `"ideas"` array
/// (either possibly nested inside an escaped JSON string), and fully escaped
/// text. Never fails: if the text cannot be unescaped the raw input is
/// returned untouched.
pub fn unwrap_payload(raw: &str) -> String {
    let (shape, candidate) = PAYLOAD_SHAPES
        .iter()
        .find_map(|(shape, re)| {
            re.captures(raw)
                .and_then(|caps| caps.get(1))
                .map(|m| (*shape, m.as_str()))
        })
        .unwrap_or(("escaped_text", raw));

    match unescape(candidate) {
        Ok(text) => {
            debug!(shape, bytes = text.len(), "Unwrapped model payload");
            text
        }
        Err(e) => {
            warn!(shape, error = %e, "Payload unescape failed, using raw response");
            raw.to_string()
        }
    }
}

type Chars<'a> = Peekable<CharIndices<'a>>;

/// Decode backslash escapes.
///
/// Word characters after a backslash must form a known escape (`\n`, `\x41`,
/// `\101` octal, `\cA` control); any other character is taken literally, so
/// `\"`, `\\` and `\/` all decode.
pub fn unescape(text: &str) -> Result<String, UnescapeError> {
    // Fast path, nothing to decode
    if !text.contains('\\') {
        return Ok(text.to_string());
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let Some((_, escape)) = chars.next() else {
            return Err(UnescapeError::TrailingBackslash(offset));
        };

        let decoded = match escape {
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'f' => '\u{0C}',
            'v' => '\u{0B}',
            'a' => '\u{07}',
            'b' => '\u{08}',
            'e' => '\u{1B}',
            '0'..='7' => read_octal(escape, &mut chars),
            'u' => read_hex(&mut chars, 4, offset)?,
            'x' => read_hex(&mut chars, 2, offset)?,
            'c' => read_control(&mut chars, offset)?,
            c if c.is_alphanumeric() || c == '_' => {
                return Err(UnescapeError::UnknownEscape { escape: c, offset });
            }
            c => c,
        };
        out.push(decoded);
    }

    Ok(out)
}

// Up to three octal digits including `first`, truncated to a byte
fn read_octal(first: char, chars: &mut Chars<'_>) -> char {
    let mut value = first.to_digit(8).unwrap_or(0);
    for _ in 0..2 {
        match chars.peek().and_then(|(_, c)| c.to_digit(8)) {
            Some(digit) => {
                value = value * 8 + digit;
                chars.next();
            }
            None => break,
        }
    }
    char::from((value & 0xFF) as u8)
}

fn read_hex(chars: &mut Chars<'_>, digits: usize, offset: usize) -> Result<char, UnescapeError> {
    let mut value = 0u32;
    for _ in 0..digits {
        let digit = chars
            .next()
            .and_then(|(_, c)| c.to_digit(16))
            .ok_or(UnescapeError::MalformedHex(offset))?;
        value = value * 16 + digit;
    }
    char::from_u32(value).ok_or(UnescapeError::InvalidCodePoint { value, offset })
}

// `\cA` is U+0001; letters are case-insensitive, `@` through `_` are accepted
fn read_control(chars: &mut Chars<'_>, offset: usize) -> Result<char, UnescapeError> {
    let letter = chars
        .next()
        .map(|(_, c)| c.to_ascii_uppercase())
        .filter(|c| ('@'..='_').contains(c))
        .ok_or(UnescapeError::MalformedControl(offset))?;
    Ok(char::from(letter as u8 - b'@'))
}
