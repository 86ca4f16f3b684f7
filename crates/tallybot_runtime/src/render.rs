//! Reply rendering for terminals.
//!
//! Commands produce formatted (HTML) reply text for rich chat clients. The
//! console session renders it down to plain terminal text with a small
//! replacement table, then strips whatever markup remains (keeping element
//! bodies, so mentions show their labels).

const REPLACEMENTS: &[(&str, &str)] = &[
    ("<br/>", "\n"),
    ("<br>", "\n"),
    ("<pre>", "```"),
    ("</pre>", "```"),
    ("<code>", "`"),
    ("</code>", "`"),
    ("<i>", "_"),
    ("</i>", "_"),
    ("<em>", "_"),
    ("</em>", "_"),
    ("<b>", "*"),
    ("</b>", "*"),
    ("<strong>", "*"),
    ("</strong>", "*"),
    ("<ul>", "\n"),
    ("</ul>", ""),
    ("<li>", "  - "),
    ("</li>", "\n"),
];

/// Renders formatted reply text for a plain terminal.
#[must_use]
pub fn html_to_text(html: &str) -> String {
    let mut text = html.to_string();
    for (from, to) in REPLACEMENTS {
        text = text.replace(from, to);
    }
    strip_tags(&text)
}

/// Removes any remaining tags, keeping their inner text.
fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        match rest[lt..].find('>') {
            Some(gt) => rest = &rest[lt + gt + 1..],
            None => {
                out.push_str(&rest[lt..]);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}
