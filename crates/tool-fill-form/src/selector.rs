//! Compound CSS selector subset understood by [`crate::MemoryPage`]:
//! an optional tag followed by any mix of `#id` and `[attr="value"]`
//! (quotes optional). Combinators, classes and pseudo-classes are rejected.

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct CompoundSelector {
    pub tag: Option<String>,
    pub attrs: Vec<(String, String)>,
}

pub(crate) fn parse(input: &str) -> Result<CompoundSelector, String> {
    let text = input.trim();
    if text.is_empty() {
        return Err("empty selector".into());
    }

    let mut selector = CompoundSelector::default();
    let mut rest = text;

    let tag_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(rest.len());
    if tag_len > 0 {
        selector.tag = Some(rest[..tag_len].to_ascii_lowercase());
        rest = &rest[tag_len..];
    }

    while let Some(first) = rest.chars().next() {
        match first {
            '#' => {
                let body = &rest[1..];
                let len = body
                    .find(|c: char| c == '#' || c == '[')
                    .unwrap_or(body.len());
                let id = &body[..len];
                if id.is_empty() || !id.chars().all(is_ident_char) {
                    return Err(format!("bad id in '{text}'"));
                }
                selector.attrs.push(("id".into(), id.to_string()));
                rest = &body[len..];
            }
            '[' => {
                let close = rest
                    .find(']')
                    .ok_or_else(|| format!("unclosed attribute in '{text}'"))?;
                let inner = &rest[1..close];
                let (name, value) = inner
                    .split_once('=')
                    .ok_or_else(|| format!("attribute without value in '{text}'"))?;
                let name = name.trim().to_ascii_lowercase();
                if name.is_empty() || !name.chars().all(is_ident_char) {
                    return Err(format!("bad attribute name in '{text}'"));
                }
                selector
                    .attrs
                    .push((name, unquote(value.trim()).to_string()));
                rest = &rest[close + 1..];
            }
            other => return Err(format!("unsupported '{other}' in '{text}'")),
        }
    }

    if selector.tag.is_none() && selector.attrs.is_empty() {
        return Err(format!("nothing to match in '{text}'"));
    }
    Ok(selector)
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
