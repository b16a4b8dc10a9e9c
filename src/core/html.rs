// src/core/html.rs
//
// Low-level HTML slicing. Case-insensitive on ASCII tag/attribute names,
// no DOM: we only ever need "blocks of tag X" and "visible text of a cell".

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// `lc[at..]` starts with `pat` and the tag name ends right after it
/// (so `<th` does not match `<thead`).
fn is_tag_at(lc: &str, at: usize, pat: &str) -> bool {
    if !lc[at..].starts_with(pat) { return false; }
    match lc.as_bytes().get(at + pat.len()) {
        None => true,
        Some(b) => b.is_ascii_whitespace() || *b == b'>' || *b == b'/',
    }
}

fn find_tag_from(lc: &str, pat: &str, mut from: usize) -> Option<usize> {
    loop {
        let at = lc.get(from..)?.find(pat)? + from;
        if is_tag_at(lc, at, pat) { return Some(at); }
        from = at + pat.len();
    }
}

fn next_block_in(s: &str, lc: &str, open_lc: &str, close_lc: &str, from: usize) -> Option<(usize, usize)> {
    let start = find_tag_from(lc, open_lc, from)?;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(close_lc)?;
    Some((start, open_end + end_rel + close_lc.len()))
}

/// All `<tag …>…</tag>` blocks in `s`, in document order. Lowercases once,
/// which matters on a full article page.
pub fn tag_blocks_ci(s: &str, tag: &str) -> Vec<(usize, usize)> {
    let lc = to_lower(s);
    let open = join!("<", &to_lower(tag));
    let close = join!("</", &to_lower(tag), ">");

    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((b, e)) = next_block_in(s, &lc, &open, &close, pos) {
        out.push((b, e));
        pos = e;
    }
    out
}

/// Kind of table cell found by [`cell_blocks`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind { Header, Data }

/// `<th>` and `<td>` blocks of one row, in column order.
pub fn cell_blocks(tr: &str) -> Vec<(CellKind, usize, usize)> {
    let lc = to_lower(tr);
    let mut out = Vec::new();
    let mut pos = 0usize;

    loop {
        let td = find_tag_from(&lc, "<td", pos);
        let th = find_tag_from(&lc, "<th", pos);
        let (kind, start, close) = match (td, th) {
            (Some(d), Some(h)) if h < d => (CellKind::Header, h, "</th>"),
            (Some(d), _)                => (CellKind::Data, d, "</td>"),
            (None, Some(h))             => (CellKind::Header, h, "</th>"),
            (None, None)                => break,
        };
        let Some(open_end) = tr[start..].find('>').map(|i| start + i + 1) else { break };

        // A missing close tag ends the cell at the next cell (or row end).
        let next_cell = [find_tag_from(&lc, "<td", open_end), find_tag_from(&lc, "<th", open_end)]
            .into_iter()
            .flatten()
            .min()
            .unwrap_or(tr.len());
        let end = match lc[open_end..].find(close).map(|i| open_end + i) {
            Some(c) if c <= next_cell => c + close.len(),
            _ => next_cell,
        };

        out.push((kind, start, end));
        pos = end.max(open_end);
    }
    out
}

/// Given a complete tag block like `<td ...>INNER</td>`,
/// return INNER (may still contain nested tags).
pub fn inner_after_open_tag(block: &str) -> &str {
    let Some(open_end) = block.find('>') else { return "" };
    let inner = &block[open_end + 1..];
    match inner.rfind("</") {
        Some(cs) => &inner[..cs],
        None => inner,
    }
}

/// Value of attribute `name` inside an opening tag's text (`td class="x"`).
pub fn attr_value(tag: &str, name: &str) -> Option<String> {
    let lc = to_lower(tag);
    let name = to_lower(name);
    let mut from = 0usize;

    while let Some(rel) = lc[from..].find(&name) {
        let at = from + rel;
        from = at + name.len();

        // Must be a whole attribute name
        let before_ok = at == 0 || lc.as_bytes()[at - 1].is_ascii_whitespace();
        let rest = lc[from..].trim_start();
        if !before_ok || !rest.starts_with('=') { continue; }

        let val_start = tag.len() - rest.len() + 1;
        let val = tag[val_start..].trim_start();
        return Some(match val.chars().next() {
            Some(q @ ('"' | '\'')) => val[1..].split(q).next().unwrap_or("").to_string(),
            _ => val
                .split(|c: char| c.is_whitespace() || c == '>' || c == '/')
                .next()
                .unwrap_or("")
                .to_string(),
        });
    }
    None
}

/// Text a reader would see in a fragment: tags dropped (quote-aware),
/// `<img alt>` kept, line-break tags become spaces, `<style>`/`<script>`
/// bodies skipped. Entities are left for `sanitize::normalize_entities`.
pub fn visible_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let b = s.as_bytes();
    let n = b.len();
    let mut i = 0usize;

    while i < n {
        if b[i] != b'<' {
            let ch = s[i..].chars().next().unwrap_or(' ');
            out.push(ch);
            i += ch.len_utf8();
            continue;
        }

        // Scan to the matching '>' outside quotes
        let tag_start = i + 1;
        let (mut in_s, mut in_d) = (false, false);
        i += 1;
        while i < n {
            match b[i] {
                b'\'' if !in_d => in_s = !in_s,
                b'"' if !in_s => in_d = !in_d,
                b'>' if !in_s && !in_d => break,
                _ => {}
            }
            i += 1;
        }
        let tag = &s[tag_start..i.min(n)];
        i += 1;

        let name = to_lower(
            tag.trim_start_matches('/')
                .split(|c: char| c.is_whitespace() || c == '/' || c == '>')
                .next()
                .unwrap_or(""),
        );
        match name.as_str() {
            "img" => {
                if let Some(alt) = attr_value(tag, "alt") {
                    out.push(' ');
                    out.push_str(&alt);
                    out.push(' ');
                }
            }
            "br" | "p" | "div" | "li" => out.push(' '),
            "style" | "script" if !tag.starts_with('/') => {
                let close = join!("</", &name);
                match to_lower(&s[i.min(n)..]).find(&close) {
                    Some(rel) => {
                        let after = i + rel;
                        i = s[after..].find('>').map(|g| after + g + 1).unwrap_or(n);
                    }
                    None => i = n,
                }
            }
            _ => {}
        }
    }
    out
}

/// Remove all HTML tags, then collapse whitespace.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    super::sanitize::normalize_ws(&visible_text(s.as_ref()))
}
