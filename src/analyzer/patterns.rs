// Tag-level patterns shared by the check battery and the page stats.
//
// Matching is textual on purpose: no DOM is built, and every check only
// looks at the opening-tag text the patterns below capture.

use regex::Regex;
use std::sync::OnceLock;

pub(crate) struct Patterns {
    /// `<meta name="description" content="...">`, capture 1 is the content
    pub meta_description: Regex,
    /// `<title>...</title>`, capture 1 is the text
    pub title: Regex,
    /// One whole `<h1 ...>...</h1>` element, non-greedy, single line
    pub h1: Regex,
    /// Opening `<img ...>` tag
    pub img: Regex,
    /// `lang=` anywhere inside the `<html ...>` opening tag
    pub html_lang: Regex,
    pub canonical: Regex,
    pub viewport: Regex,
    /// `<a ...href="...">` with a non-empty href
    pub anchor_href: Regex,
    /// Any tag, used to strip markup before counting words
    pub tag: Regex,
}

pub(crate) fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        meta_description: compile(
            r#"(?i)<meta\s+name=["']description["']\s+content=["']([^"']+)["']"#,
        ),
        title: compile(r"(?i)<title>([^<]+)</title>"),
        h1: compile(r"(?i)<h1[^>]*>.*?</h1>"),
        img: compile(r"(?i)<img[^>]+>"),
        html_lang: compile(r"(?i)<html[^>]+lang="),
        canonical: compile(r#"(?i)<link[^>]+rel=["']canonical["']"#),
        viewport: compile(r#"(?i)<meta[^>]+name=["']viewport["']"#),
        anchor_href: compile(r#"(?i)<a[^>]+href=["'][^"']+["']"#),
        tag: compile(r"<[^>]+>"),
    })
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static HTML pattern must compile")
}
