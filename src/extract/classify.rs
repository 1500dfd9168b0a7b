// src/extract/classify.rs

use once_cell::sync::Lazy;
use regex::Regex;

use super::Layout;
use crate::text::fold_text;

static DAILY_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"casos confirmados, fallecidos y recuperados por departamento por dia, del [0-9/]*",
    )
    .expect("daily title pattern should compile")
});

static CUMULATIVE_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"casos acumulados de confirmados, activos, fallecidos y recuperados por departamento, del [0-9/]*",
    )
    .expect("cumulative title pattern should compile")
});

/// Every layout whose title appears in the page text.
///
/// Both predicates are evaluated independently; a page matching both is
/// routed to both layouts.
pub fn classify_page(text: &str) -> Vec<Layout> {
    let folded = fold_text(text);
    Layout::ALL
        .into_iter()
        .filter(|layout| matches_layout(&folded, *layout))
        .collect()
}

/// Title test against already-folded text.
pub fn matches_layout(folded: &str, layout: Layout) -> bool {
    match layout {
        Layout::Daily => DAILY_TITLE.is_match(folded),
        Layout::Cumulative => CUMULATIVE_TITLE.is_match(folded),
    }
}
