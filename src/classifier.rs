use std::borrow::Cow;

use num_bigint::BigInt;
use num_integer::Integer;
use serde::Serialize;
use serde_json::Value;

/// Bucketed view of a `data` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub odd_numbers: Vec<String>,
    pub even_numbers: Vec<String>,
    pub alphabets: Vec<String>,
    pub special_characters: Vec<String>,
    pub sum: String,
    pub concat_string: String,
}

impl Default for Classification {
    fn default() -> Self {
        Self {
            odd_numbers: Vec::new(),
            even_numbers: Vec::new(),
            alphabets: Vec::new(),
            special_characters: Vec::new(),
            sum: "0".to_string(),
            concat_string: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenKind {
    Integer(BigInt),
    Alphabetic,
    Special,
    Unclassified,
}

pub fn classify(items: &[Value]) -> Classification {
    let mut result = Classification::default();
    let mut letters: Vec<char> = Vec::new();
    let mut total = BigInt::default();

    for item in items {
        let token = render_token(item);

        letters.extend(token.chars().filter(char::is_ascii_alphabetic));

        match token_kind(&token) {
            TokenKind::Integer(value) => {
                if value.is_even() {
                    result.even_numbers.push(token.into_owned());
                } else {
                    result.odd_numbers.push(token.into_owned());
                }
                total += value;
            }
            TokenKind::Alphabetic => result.alphabets.push(token.to_ascii_uppercase()),
            TokenKind::Special => result.special_characters.push(token.into_owned()),
            TokenKind::Unclassified => {}
        }
    }

    result.sum = total.to_string();
    result.concat_string = alternating_caps_reversed(&letters);

    result
}

/// Textual form of a JSON value. Strings are used as-is, `null` and booleans
/// take the `None`/`True`/`False` spelling, numbers keep their source digits
/// and containers render as compact JSON.
pub fn render_token(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Null => Cow::Borrowed("None"),
        Value::Bool(true) => Cow::Borrowed("True"),
        Value::Bool(false) => Cow::Borrowed("False"),
        other => Cow::Owned(other.to_string()),
    }
}

fn token_kind(token: &str) -> TokenKind {
    if let Some(value) = integer_value(token) {
        TokenKind::Integer(value)
    } else if !token.is_empty() && token.chars().all(|ch| ch.is_ascii_alphabetic()) {
        TokenKind::Alphabetic
    } else if !token.is_empty() && token.chars().all(|ch| !ch.is_ascii_alphanumeric()) {
        TokenKind::Special
    } else {
        TokenKind::Unclassified
    }
}

fn integer_value(token: &str) -> Option<BigInt> {
    let (negative, digits) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let magnitude: BigInt = digits.parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

fn alternating_caps_reversed(letters: &[char]) -> String {
    letters
        .iter()
        .rev()
        .enumerate()
        .map(|(idx, ch)| {
            if idx % 2 == 0 {
                ch.to_ascii_uppercase()
            } else {
                ch.to_ascii_lowercase()
            }
        })
        .collect()
}
