// ============================================
// Check Battery
// ============================================
//
// Every check is a total function over the captured HTML and yields exactly
// one issue. The only exception is the image alt check, which stays silent
// when the page has no images.

use super::patterns::patterns;
use crate::models::AuditIssue;

/// Meta description longer than this is truncated by search engines
pub const META_DESCRIPTION_MAX_CHARS: usize = 160;

/// Title longer than this is truncated by search engines
pub const TITLE_MAX_CHARS: usize = 60;

/// Page size (KB) above which the page is flagged as an error
pub const PAGE_SIZE_ERROR_KB: f64 = 1000.0;

/// Page size (KB) above which the page is flagged as a warning
pub const PAGE_SIZE_WARNING_KB: f64 = 500.0;

// ============================================
// SEO
// ============================================

pub fn seo_issues(html: &str) -> Vec<AuditIssue> {
    vec![
        check_meta_description(html),
        check_title(html),
        check_h1(html),
    ]
}

fn check_meta_description(html: &str) -> AuditIssue {
    let Some(caps) = patterns().meta_description.captures(html) else {
        return AuditIssue::error(
            "seo-1",
            "Missing meta description",
            "Your page is missing a meta description tag.",
            "Add a compelling meta description under 160 characters that includes your target keyword.",
        );
    };

    let length = caps[1].chars().count();
    if length > META_DESCRIPTION_MAX_CHARS {
        AuditIssue::warning(
            "seo-2",
            "Meta description too long",
            format!(
                "Meta description is {} characters. Google typically displays 150-160.",
                length
            ),
            "Shorten your meta description to under 160 characters.",
        )
    } else {
        AuditIssue::pass(
            "seo-pass-1",
            "Meta description present",
            format!("Meta description found ({} characters).", length),
        )
    }
}

fn check_title(html: &str) -> AuditIssue {
    let Some(caps) = patterns().title.captures(html) else {
        return AuditIssue::error(
            "seo-3",
            "Missing title tag",
            "Your page is missing a title tag.",
            "Add a descriptive title tag under 60 characters.",
        );
    };

    let length = caps[1].chars().count();
    if length > TITLE_MAX_CHARS {
        AuditIssue::warning(
            "seo-4",
            "Title tag is too long",
            format!(
                "Title is {} characters. Google typically displays 50-60 characters.",
                length
            ),
            "Shorten your title to under 60 characters while keeping the main keyword near the beginning.",
        )
    } else {
        AuditIssue::pass(
            "seo-pass-2",
            "Title tag optimal",
            format!("Title tag found ({} characters).", length),
        )
    }
}

fn check_h1(html: &str) -> AuditIssue {
    match patterns().h1.find_iter(html).count() {
        0 => AuditIssue::error(
            "seo-5",
            "No H1 tag found",
            "Your page is missing an H1 tag.",
            "Add exactly one H1 tag that clearly describes the page content.",
        ),
        1 => AuditIssue::pass("seo-pass-3", "H1 tag present", "One H1 tag found on the page."),
        count => AuditIssue::error(
            "seo-6",
            "Multiple H1 tags detected",
            format!(
                "Found {} H1 tags on this page. You should have exactly one.",
                count
            ),
            "Keep only one H1 tag that clearly describes the page content. Convert others to H2 or H3.",
        ),
    }
}

// ============================================
// Accessibility
// ============================================

pub fn accessibility_issues(html: &str) -> Vec<AuditIssue> {
    let mut issues = Vec::with_capacity(2);
    issues.extend(check_image_alt(html));
    issues.push(check_lang(html));
    issues
}

/// An image "has alt" when its tag text contains the literal `alt=`.
/// Purely textual: `data-alt=` counts too, and an empty value still passes.
fn check_image_alt(html: &str) -> Option<AuditIssue> {
    let images: Vec<&str> = patterns().img.find_iter(html).map(|m| m.as_str()).collect();
    let missing = images.iter().filter(|tag| !tag.contains("alt=")).count();

    if missing > 0 {
        Some(AuditIssue::error(
            "a11y-1",
            "Images missing alt attributes",
            format!(
                "{} out of {} images are missing alt attributes.",
                missing,
                images.len()
            ),
            "Add descriptive alt text to all images for better accessibility and SEO.",
        ))
    } else if !images.is_empty() {
        Some(AuditIssue::pass(
            "a11y-pass-1",
            "Image alt attributes present",
            format!(
                "All {} images have alt attributes. Great for accessibility and SEO!",
                images.len()
            ),
        ))
    } else {
        None
    }
}

fn check_lang(html: &str) -> AuditIssue {
    if patterns().html_lang.is_match(html) {
        AuditIssue::pass("a11y-pass-2", "Language declared", "HTML lang attribute is present.")
    } else {
        AuditIssue::warning(
            "a11y-2",
            "Missing lang attribute",
            "HTML tag is missing a lang attribute.",
            "Add lang=\"en\" (or appropriate language code) to your HTML tag.",
        )
    }
}

// ============================================
// Technical
// ============================================

pub fn technical_issues(url: &str, html: &str) -> Vec<AuditIssue> {
    vec![check_https(url), check_canonical(html), check_viewport(html)]
}

fn check_https(url: &str) -> AuditIssue {
    if url.starts_with("https://") {
        AuditIssue::pass(
            "tech-pass-1",
            "HTTPS enabled",
            "Your site uses HTTPS. Secure connections are essential for SEO and user trust.",
        )
    } else {
        AuditIssue::error(
            "tech-1",
            "Not using HTTPS",
            "Your site is not using HTTPS.",
            "Enable HTTPS to improve security and SEO rankings.",
        )
    }
}

fn check_canonical(html: &str) -> AuditIssue {
    if patterns().canonical.is_match(html) {
        AuditIssue::pass("tech-pass-2", "Canonical URL present", "Canonical link tag found.")
    } else {
        AuditIssue::warning(
            "tech-2",
            "Missing canonical URL",
            "No canonical link element found on the page.",
            "Add a canonical URL to prevent duplicate content issues.",
        )
    }
}

fn check_viewport(html: &str) -> AuditIssue {
    if patterns().viewport.is_match(html) {
        AuditIssue::pass(
            "tech-pass-3",
            "Viewport meta tag present",
            "Mobile viewport is configured.",
        )
    } else {
        AuditIssue::error(
            "tech-3",
            "Missing viewport meta tag",
            "Page is missing a viewport meta tag.",
            "Add <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\"> for mobile responsiveness.",
        )
    }
}

// ============================================
// Performance
// ============================================

pub fn performance_issues(html: &str) -> Vec<AuditIssue> {
    vec![check_page_size(html)]
}

fn check_page_size(html: &str) -> AuditIssue {
    let size_kb = html.len() as f64 / 1024.0;
    let rounded = size_kb.round() as u64;

    if size_kb > PAGE_SIZE_ERROR_KB {
        AuditIssue::error(
            "perf-1",
            "Large page size",
            format!("Page size is {}KB. Should be under 1000KB.", rounded),
            "Optimize images, minify CSS/JS, and enable compression.",
        )
    } else if size_kb > PAGE_SIZE_WARNING_KB {
        AuditIssue::warning(
            "perf-2",
            "Page size could be optimized",
            format!("Page size is {}KB.", rounded),
            "Consider optimizing images and minifying resources.",
        )
    } else {
        AuditIssue::pass(
            "perf-pass-1",
            "Page size is good",
            format!("Page size is {}KB.", rounded),
        )
    }
}
