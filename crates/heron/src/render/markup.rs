//! Light-markup formatting for message text.
//!
//! A fixed, ordered sequence of substitutions maps the agent's markup
//! conventions to ANSI emphasis. The order is load-bearing: the single-star
//! pass must run after the double-star pass has consumed bold delimiters,
//! and the single-hash pass after the double-hash pass, or spans would be
//! split and headings double-matched.

use lazy_static::lazy_static;
use regex::Regex;

const BOLD: &str = "\x1b[1m";
const ITALIC: &str = "\x1b[3m";
const UNDERLINE: &str = "\x1b[4m";
const CYAN: &str = "\x1b[36m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

lazy_static! {
    static ref BOLD_RE: Regex = Regex::new(r"\*\*(.*?)\*\*").unwrap();
    static ref ITALIC_RE: Regex = Regex::new(r"\*(.*?)\*").unwrap();
    static ref SUBHEADING_RE: Regex = Regex::new(r"##\s(.*?)(\n|$)").unwrap();
    static ref HEADING_RE: Regex = Regex::new(r"#\s(.*?)(\n|$)").unwrap();
    static ref STAR_ITEM_RE: Regex = Regex::new(r"\n\*\s(.*?)(\n|$)").unwrap();
    static ref DASH_ITEM_RE: Regex = Regex::new(r"\n-\s(.*?)(\n|$)").unwrap();
    static ref CODE_RE: Regex = Regex::new(r"`(.*?)`").unwrap();
    static ref LINK_RE: Regex = Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap();
}

/// Apply the substitution pipeline to raw message text.
pub fn format_text(text: &str) -> String {
    let out = BOLD_RE.replace_all(text, format!("{BOLD}$1{RESET}"));
    let out = ITALIC_RE.replace_all(&out, format!("{ITALIC}$1{RESET}"));
    let out = SUBHEADING_RE.replace_all(&out, format!("{BOLD}$1{RESET}$2"));
    let out = HEADING_RE.replace_all(&out, format!("{BOLD}{UNDERLINE}$1{RESET}$2"));
    let out = STAR_ITEM_RE.replace_all(&out, "\n  • $1$2");
    let out = DASH_ITEM_RE.replace_all(&out, "\n  • $1$2");
    let out = CODE_RE.replace_all(&out, format!("{CYAN}$1{RESET}"));
    let out = LINK_RE.replace_all(&out, format!("{UNDERLINE}$1{RESET} {DIM}($2){RESET}"));
    // Newlines already are line breaks on a terminal; no final substitution.
    out.into_owned()
}
