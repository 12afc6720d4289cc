//! Removes the comment wrappers Pro Football Reference puts around most stat tables

const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";

/// Trailing link that closes a commented block on the same line
const ADVANCED_STATS_SENTINEL: &str = "See more advanced stats here.</a></div>-->";

/// Strip comment markers so commented-out tables become part of the document.
///
/// Works line by line: a bare `<!--` (leading whitespace allowed) or a bare
/// `-->` line is blanked, and the closing marker is cut from a line that ends
/// with the advanced-stats link. Everything else is left untouched.
pub fn despoof(html: &str) -> String {
    html.lines().map(despoof_line).collect::<Vec<_>>().join("\n")
}

fn despoof_line(line: &str) -> String {
    if line.trim_start() == COMMENT_OPEN || line == COMMENT_CLOSE {
        String::new()
    } else if line.ends_with(ADVANCED_STATS_SENTINEL) {
        line.replacen(COMMENT_CLOSE, "", 1)
    } else {
        line.to_string()
    }
}
