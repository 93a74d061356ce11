/// A token in template text and the value it is replaced with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'a> {
    pub token: String,
    pub value: Option<&'a str>,
}

impl<'a> Placeholder<'a> {
    /// Placeholder spelled literally in the template, e.g. `Mr Bee`.
    pub fn literal(token: &str, value: Option<&'a str>) -> Self {
        Self {
            token: token.to_string(),
            value,
        }
    }

    /// Placeholder spelled `$$__KEY__$$`.
    pub fn keyed(key: &str, value: Option<&'a str>) -> Self {
        Self {
            token: format!("$$__{}__$$", key),
            value,
        }
    }
}

/// Replaces every occurrence of every token in a single left-to-right pass.
///
/// Absent values become the empty string. Replaced text is never rescanned, so
/// the result does not depend on the order of `placeholders`. When two tokens
/// start at the same offset the longer one wins.
pub fn substitute(template: &str, placeholders: &[Placeholder]) -> String {
    let active: Vec<&Placeholder> = placeholders
        .iter()
        .filter(|p| !p.token.is_empty())
        .collect();

    let find_from =
        |token: &str, from: usize| template[from..].find(token).map(|at| from + at);
    // Next occurrence of each token at or after `cursor`.
    let mut next: Vec<Option<usize>> = active.iter().map(|p| find_from(&p.token, 0)).collect();

    let mut out = String::with_capacity(template.len());
    let mut cursor = 0;
    loop {
        let best = next
            .iter()
            .enumerate()
            .filter_map(|(i, pos)| pos.map(|pos| (pos, i)))
            .min_by(|(pos_a, a), (pos_b, b)| {
                pos_a
                    .cmp(pos_b)
                    .then(active[*b].token.len().cmp(&active[*a].token.len()))
            });

        let Some((pos, i)) = best else {
            out.push_str(&template[cursor..]);
            return out;
        };
        out.push_str(&template[cursor..pos]);
        out.push_str(active[i].value.unwrap_or(""));
        cursor = pos + active[i].token.len();

        for (slot, placeholder) in next.iter_mut().zip(&active) {
            if matches!(slot, Some(at) if *at < cursor) {
                *slot = find_from(&placeholder.token, cursor);
            }
        }
    }
}

pub fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
