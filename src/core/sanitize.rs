// src/core/sanitize.rs

/// Decode the entities Wikipedia actually emits in table cells:
/// a handful of named ones plus decimal/hex numeric references
/// (footnote brackets arrive as `&#91;1&#93;`).
pub fn normalize_entities(s: &str) -> String {
    if !s.contains('&') { return s.to_string(); }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let decoded = after
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&after[..semi]).map(|c| (c, semi)));
        match decoded {
            Some((ch, semi)) => {
                out.push(ch);
                rest = &after[semi + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    Some(match name {
        "nbsp"   => ' ',
        "amp"    => '&',
        "lt"     => '<',
        "gt"     => '>',
        "quot"   => '"',
        "apos"   => '\'',
        "ndash"  => '–',
        "mdash"  => '—',
        "minus"  => '−',
        "thinsp" => ' ',
        _ => return None,
    })
}

/// Collapse sequences of whitespace (NBSP included) into a single space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Remove any `[ ... ]` bracket tags (footnotes like `[1]`, `[a]`, `[note 2]`).
/// Greedy within each bracket pair, no nesting.
pub fn strip_brackets(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_bracket = false;
    for ch in s.chars() {
        match ch {
            '[' => in_bracket = true,
            ']' => in_bracket = false,
            _ if !in_bracket => out.push(ch),
            _ => {}
        }
    }
    out.trim().to_string()
}

/// Cell HTML → clean display text: entities decoded, tags stripped,
/// footnotes removed, whitespace collapsed.
pub fn cell_text(inner_html: &str) -> String {
    let text = super::html::visible_text(inner_html);
    normalize_ws(&strip_brackets(&normalize_entities(&text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_entities_and_footnotes() {
        assert_eq!(cell_text("Walmart&#91;3&#93;"), "Walmart");
        assert_eq!(cell_text(r#"Apple<sup class="reference"><a href="\#cite">[a]</a></sup>"#), "Apple");
        assert_eq!(normalize_entities("AT&amp;T &#x2014; x"), "AT&T — x");
    }

    #[test]
    fn unknown_entities_pass_through() {
        assert_eq!(normalize_entities("R&D; Q&A"), "R&D; Q&A");
        assert_eq!(normalize_entities("fish & chips"), "fish & chips");
    }

    #[test]
    fn whitespace_collapses_including_nbsp() {
        assert_eq!(normalize_ws("  New\u{a0}\u{a0}York,\n  NY "), "New York, NY");
    }
}
