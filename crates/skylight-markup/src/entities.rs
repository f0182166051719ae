// Character reference decoding and escaping.
//
// Covers the XML predefined entities plus the handful of named HTML
// references that show up in gallery copyright lines and descriptions.
// Names are given *without* the leading `&` and trailing `;` (e.g. pass
// `"amp"` not `"&amp;"`).

/// Look up a named character reference (without the leading `&` and
/// trailing `;`). Returns the replacement text if found, or `None` for
/// unknown references.
pub fn lookup(name: &str) -> Option<&'static str> {
    let s: &'static str = match name {
        // ---- XML predefined -----------------------------------------------
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",

        // ---- Common in page text ------------------------------------------
        "nbsp" => "\u{00A0}",
        "copy" => "\u{00A9}",
        "reg" => "\u{00AE}",
        "trade" => "\u{2122}",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "ldquo" => "\u{201C}",
        "rdquo" => "\u{201D}",
        "hellip" => "\u{2026}",
        "laquo" => "\u{00AB}",
        "raquo" => "\u{00BB}",
        "middot" => "\u{00B7}",
        "deg" => "\u{00B0}",
        "times" => "\u{00D7}",
        "euro" => "\u{20AC}",
        "pound" => "\u{00A3}",

        _ => return None,
    };
    Some(s)
}

/// Longest reference we will scan for before giving up on a `&`.
const MAX_REFERENCE_LEN: usize = 32;

/// Try to parse one character reference starting just *after* a `&`.
///
/// Returns the replacement text and the number of input chars consumed
/// (including the closing `;`), or `None` if `rest` does not start with a
/// recognizable reference.
fn parse_reference(rest: &[char]) -> Option<(String, usize)> {
    let end = rest
        .iter()
        .take(MAX_REFERENCE_LEN)
        .position(|&c| c == ';')?;
    if end == 0 {
        return None;
    }
    let name: String = rest[..end].iter().collect();
    let decoded = if let Some(digits) = name.strip_prefix('#') {
        let code = if let Some(hex) = digits.strip_prefix('x').or_else(|| digits.strip_prefix('X'))
        {
            u32::from_str_radix(hex, 16).ok()?
        } else {
            digits.parse::<u32>().ok()?
        };
        char::from_u32(code)?.to_string()
    } else {
        lookup(&name)?.to_string()
    };
    Some((decoded, end + 1))
}

/// Decode character references in `text`, leniently.
///
/// Unknown names, malformed numeric references, and bare `&` pass through
/// unchanged.
pub fn decode(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '&'
            && let Some((decoded, consumed)) = parse_reference(&chars[i + 1..])
        {
            out.push_str(&decoded);
            i += 1 + consumed;
            continue;
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

/// Decode character references in `text`, strictly.
///
/// Every `&` must begin a well-formed reference; the first offense is
/// returned as an error message.
pub fn decode_strict(text: &str) -> Result<String, String> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '&' {
            match parse_reference(&chars[i + 1..]) {
                Some((decoded, consumed)) => {
                    out.push_str(&decoded);
                    i += 1 + consumed;
                },
                None => {
                    let snippet: String = chars[i..].iter().take(12).collect();
                    return Err(format!("bad character reference near `{snippet}`"));
                },
            }
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    Ok(out)
}

/// Escape `& < > " '` for use as character data.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape for use inside a double-quoted attribute value. Same set as
/// [`escape_text`]; attribute values never need more.
pub fn escape_attr(s: &str) -> String {
    escape_text(s)
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_predefined() {
        assert_eq!(lookup("amp"), Some("&"));
        assert_eq!(lookup("lt"), Some("<"));
        assert_eq!(lookup("gt"), Some(">"));
        assert_eq!(lookup("quot"), Some("\""));
        assert_eq!(lookup("apos"), Some("'"));
    }

    #[test]
    fn lookup_unknown() {
        assert_eq!(lookup("bogus"), None);
        assert_eq!(lookup(""), None);
        // case-sensitive
        assert_eq!(lookup("AMP"), None);
    }

    #[test]
    fn decode_named() {
        assert_eq!(decode("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(decode("&lt;b&gt;"), "<b>");
        assert_eq!(decode("&copy; 2006"), "\u{00A9} 2006");
    }

    #[test]
    fn decode_numeric() {
        assert_eq!(decode("&#38;"), "&");
        assert_eq!(decode("&#x26;"), "&");
        assert_eq!(decode("&#X26;"), "&");
        assert_eq!(decode("&#233;"), "é");
    }

    #[test]
    fn decode_lenient_passthrough() {
        assert_eq!(decode("fish & chips"), "fish & chips");
        assert_eq!(decode("&bogus;"), "&bogus;");
        assert_eq!(decode("&amp"), "&amp"); // unterminated
        assert_eq!(decode("&;"), "&;");
        assert_eq!(decode("&#xZZ;"), "&#xZZ;");
    }

    #[test]
    fn decode_invalid_codepoint_passthrough() {
        // surrogate range is not a valid char
        assert_eq!(decode("&#xD800;"), "&#xD800;");
    }

    #[test]
    fn decode_strict_accepts_valid() {
        assert_eq!(decode_strict("a &amp; b").as_deref(), Ok("a & b"));
        assert_eq!(decode_strict("no refs at all").as_deref(), Ok("no refs at all"));
    }

    #[test]
    fn decode_strict_rejects_bad_references() {
        assert!(decode_strict("fish & chips").is_err());
        assert!(decode_strict("&bogus;").is_err());
        assert!(decode_strict("&amp").is_err());
        assert!(decode_strict("&#xD800;").is_err());
    }

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape_text("Tom & Jerry's <b>\"show\"</b>"),
            "Tom &amp; Jerry&apos;s &lt;b&gt;&quot;show&quot;&lt;/b&gt;"
        );
        assert_eq!(escape_attr("a \"b\""), "a &quot;b&quot;");
    }

    #[test]
    fn escape_then_decode_roundtrip() {
        let original = "5 < 6 & 7 > 2, \"quoted\", it's";
        assert_eq!(decode(&escape_text(original)), original);
    }
}
