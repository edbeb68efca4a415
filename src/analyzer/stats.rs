use std::time::Instant;

use super::patterns::patterns;
use crate::models::{PageStats, SecurityGrade};

/// Quick page statistics shown next to the scores.
///
/// `internal_links_count` counts every anchor with a non-empty href, same
/// origin or not. `word_count` strips tags and splits on whitespace, so
/// inline `<script>`/`<style>` bodies are counted as words.
pub fn page_stats(url: &str, html: &str, started: Instant) -> PageStats {
    let p = patterns();

    let internal_links = p.anchor_href.find_iter(html).count();
    let images = p.img.find_iter(html).count();
    let words = p.tag.replace_all(html, " ").split_whitespace().count();

    PageStats {
        internal_links_count: saturating_i32(internal_links),
        images_count: saturating_i32(images),
        word_count: saturating_i32(words),
        security_grade: security_grade(url),
        scan_duration_ms: saturating_i32(started.elapsed().as_millis() as usize),
    }
}

pub fn security_grade(url: &str) -> SecurityGrade {
    if url.starts_with("https://") {
        SecurityGrade::APlus
    } else {
        SecurityGrade::F
    }
}

fn saturating_i32(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}
