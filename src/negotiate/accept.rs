//! `Accept` header parsing.

/// One entry of an `Accept` header, e.g. `text/html;level=1;q=0.5`.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaRange {
    pub kind: String,
    pub subtype: String,
    /// Parameters before `q`, keys lowercased, values unquoted.
    pub params: Vec<(String, String)>,
    pub quality: f32,
    /// Position in the header.
    pub index: usize,
}

/// Parse an `Accept` header value.
///
/// Entries without a `type/subtype` pair are dropped. A `q` that does not
/// parse counts as zero. Parameters after `q` are accept-extensions and
/// are ignored.
pub fn parse_accept(header: &str) -> Vec<MediaRange> {
    split_unquoted(header, ',')
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| parse_media_range(entry, index))
        .collect()
}

fn parse_media_range(entry: &str, index: usize) -> Option<MediaRange> {
    let mut parts = split_unquoted(entry, ';').into_iter();
    let (kind, subtype) = parse_type(parts.next()?)?;

    let mut params = Vec::new();
    let mut quality = 1.0;
    for param in parts {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let value = unquote(value.trim());
        if key == "q" {
            quality = value.parse::<f32>().ok().filter(|q| q.is_finite()).unwrap_or(0.0);
            break;
        }
        params.push((key, value));
    }

    Some(MediaRange {
        kind,
        subtype,
        params,
        quality,
        index,
    })
}

/// Split `type/subtype` into lowercased halves.
pub(crate) fn parse_type(text: &str) -> Option<(String, String)> {
    let (kind, subtype) = text.trim().split_once('/')?;
    let valid = |part: &str| {
        !part.is_empty() && !part.contains(|c: char| c.is_whitespace() || c == '/')
    };
    if !valid(kind) || !valid(subtype) {
        return None;
    }
    Some((kind.to_ascii_lowercase(), subtype.to_ascii_lowercase()))
}

fn unquote(value: &str) -> String {
    match value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        Some(inner) => inner.replace("\\\"", "\"").replace("\\\\", "\\"),
        None => value.to_string(),
    }
}

/// Split on `separator`, ignoring separators inside quoted strings.
fn split_unquoted(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if quoted => escaped = true,
            '"' => quoted = !quoted,
            c if c == separator && !quoted => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}
