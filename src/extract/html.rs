//! Low-level HTML scanning for table extraction.
//! Tag and attribute names are matched ASCII case-insensitively; nothing here builds a DOM.

/// One lexical piece of an HTML document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// Character data between tags (entities still encoded).
    Text(&'a str),
    /// An opening (or self-closing) tag; the name is ASCII-lowercased by the caller's comparisons.
    Open(&'a str),
    /// A closing tag.
    Close(&'a str),
}

/// Iterator over the tokens of an HTML fragment.
///
/// Comments, doctype and processing instructions are skipped. The contents of
/// `<script>` and `<style>` are skipped so markup-looking strings inside them are
/// never mistaken for tags.
pub(crate) struct Tokens<'a> {
    s: &'a str,
    pos: usize,
    skip_until: Option<&'static str>,
}

pub(crate) fn tokens(s: &str) -> Tokens<'_> {
    Tokens {
        s,
        pos: 0,
        skip_until: None,
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let rest = self.s.get(self.pos..)?;
            if rest.is_empty() {
                return None;
            }

            if let Some(close) = self.skip_until.take() {
                let end = find_ci(rest, close).unwrap_or(rest.len());
                self.pos += end;
                continue;
            }

            if !rest.starts_with('<') {
                let end = rest.find('<').unwrap_or(rest.len());
                self.pos += end;
                return Some(Token::Text(&rest[..end]));
            }

            if rest.starts_with("<!--") {
                let end = rest.find("-->").map_or(rest.len(), |i| i + 3);
                self.pos += end;
                continue;
            }

            let Some(gt) = rest.find('>') else {
                // Unterminated tag: treat the remainder as text.
                self.pos = self.s.len();
                return Some(Token::Text(rest));
            };
            self.pos += gt + 1;
            let inner = &rest[1..gt];

            if inner.starts_with('!') || inner.starts_with('?') {
                continue;
            }

            let (closing, body) = match inner.strip_prefix('/') {
                Some(b) => (true, b),
                None => (false, inner),
            };
            let name_len = body
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == ':'))
                .unwrap_or(body.len());
            if name_len == 0 {
                // Something like "a < b" in text.
                return Some(Token::Text(&rest[..=gt]));
            }
            let name = &body[..name_len];

            if closing {
                return Some(Token::Close(name));
            }
            if name.eq_ignore_ascii_case("script") {
                self.skip_until = Some("</script");
            } else if name.eq_ignore_ascii_case("style") {
                self.skip_until = Some("</style");
            }
            return Some(Token::Open(name));
        }
    }
}

/// ASCII case-insensitive `find`.
pub(crate) fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() {
        return Some(0);
    }
    h.windows(n.len()).position(|w| w.eq_ignore_ascii_case(n))
}

/// Decode the entities that show up in listing cells: the common named ones plus numeric references.
pub(crate) fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_one(&tail[1..semi]).map(|c| (c, semi)));
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_one(entity: &str) -> Option<char> {
    if let Some(num) = entity.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    Some(match entity {
        "nbsp" => ' ',
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        _ => return None,
    })
}

/// Collapse sequences of whitespace into a single space and trim.
pub(crate) fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}
