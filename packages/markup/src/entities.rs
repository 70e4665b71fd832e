//! Character reference decoding and escaping

use std::borrow::Cow;

/// Decode character references (`&amp;`, `&#39;`, `&#x27;`, ...).
///
/// Unknown or malformed references are kept verbatim.
pub fn decode_entities(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }

    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        output.push_str(&rest[..amp]);
        let candidate = &rest[amp..];

        match decode_reference(candidate) {
            Some((decoded, consumed)) => {
                output.push(decoded);
                rest = &candidate[consumed..];
            }
            None => {
                output.push('&');
                rest = &candidate[1..];
            }
        }
    }

    output.push_str(rest);
    Cow::Owned(output)
}

/// Decode one reference at the start of `input`, returning the character and
/// the number of bytes consumed (including `&` and `;`).
fn decode_reference(input: &str) -> Option<(char, usize)> {
    let semi = input.get(1..)?.find(';')? + 1;
    if semi > 32 {
        return None;
    }
    let name = &input[1..semi];

    let decoded = if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        char::from_u32(code)?
    } else {
        match name {
            "amp" => '&',
            "lt" => '<',
            "gt" => '>',
            "quot" => '"',
            "apos" => '\'',
            "nbsp" => '\u{a0}',
            _ => return None,
        }
    };

    Some((decoded, semi + 1))
}

/// Escape text content
pub fn escape_text(input: &str) -> Cow<'_, str> {
    escape(input, false)
}

/// Escape a double-quoted attribute value
pub fn escape_attribute(input: &str) -> Cow<'_, str> {
    escape(input, true)
}

fn escape(input: &str, attribute: bool) -> Cow<'_, str> {
    let needs_escape = |c: char| matches!(c, '&' | '<' | '>') || (attribute && c == '"');
    if !input.contains(needs_escape) {
        return Cow::Borrowed(input);
    }

    let mut output = String::with_capacity(input.len() + 8);
    for c in input.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' if attribute => output.push_str("&quot;"),
            _ => output.push(c),
        }
    }
    Cow::Owned(output)
}
