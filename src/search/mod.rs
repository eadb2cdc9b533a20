use serde::{Deserialize, Serialize};

use crate::posts::PostResponse;

pub mod handler;

/// Fixed page size for search results.
pub const POSTS_PER_PAGE: i64 = 3;

/// Query parameters for the search page. `page` stays raw text so that an
/// unparseable value falls back to page 1 instead of a 400.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
    pub page: Option<String>,
}

/// Hidden form fields carried by the next/previous navigation buttons.
#[derive(Debug, Deserialize)]
pub struct PageForm {
    #[serde(default)]
    pub query: String,
    pub page: Option<String>,
}

/// Search form submission from the home or search page.
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search: String,
}

#[derive(Debug, Serialize)]
pub struct SearchPageResponse {
    pub query: String,
    pub page: i64,
    pub total_pages: i64,
    pub posts: Vec<PostResponse>,
}

/// What to do with a requested page: serve a slice or correct via redirect.
#[derive(Debug, PartialEq, Eq)]
pub enum PagePlan {
    Redirect { page: i64 },
    Window {
        start: usize,
        end: usize,
        total_pages: i64,
    },
}

pub fn requested_page(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.parse().ok()).unwrap_or(1)
}

/// An empty result set still reports one page.
pub fn total_pages(matches: usize) -> i64 {
    ((matches as i64 + POSTS_PER_PAGE - 1) / POSTS_PER_PAGE).max(1)
}

/// Decides between serving a page window and issuing a corrective redirect.
///
/// Pages at or below zero always redirect to page 1. Pages past the end
/// redirect to the last page, but only when there are results; with zero
/// matches the empty window renders as-is.
pub fn plan_page(matches: usize, page: i64) -> PagePlan {
    if page <= 0 {
        return PagePlan::Redirect { page: 1 };
    }

    let total = total_pages(matches);
    if matches > 0 && page > total {
        return PagePlan::Redirect { page: total };
    }

    let start = ((page - 1) * POSTS_PER_PAGE) as usize;
    let end = (start + POSTS_PER_PAGE as usize).min(matches);
    PagePlan::Window {
        start: start.min(matches),
        end,
        total_pages: total,
    }
}

pub fn clamp_page(page: i64, total_pages: i64) -> i64 {
    page.max(1).min(total_pages)
}

/// Canonical redirect target for every search/pagination transition.
pub fn search_url(query: &str, page: i64) -> String {
    format!("/search?query={}&page={}", urlencoding::encode(query), page)
}

/// Escapes LIKE wildcards so the match is a literal substring match.
pub fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up_with_floor_of_one() {
        assert_eq!(total_pages(0), 1);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(3), 1);
        assert_eq!(total_pages(4), 2);
        assert_eq!(total_pages(7), 3);
    }

    #[test]
    fn zero_or_negative_page_redirects_to_first() {
        assert_eq!(plan_page(7, 0), PagePlan::Redirect { page: 1 });
        assert_eq!(plan_page(7, -3), PagePlan::Redirect { page: 1 });
        assert_eq!(plan_page(0, 0), PagePlan::Redirect { page: 1 });
    }

    #[test]
    fn page_past_end_redirects_to_last_page() {
        // 7 matches at 3 per page -> 3 pages
        assert_eq!(plan_page(7, 5), PagePlan::Redirect { page: 3 });
        assert_eq!(plan_page(7, 4), PagePlan::Redirect { page: 3 });
    }

    #[test]
    fn no_redirect_when_result_set_is_empty() {
        assert_eq!(
            plan_page(0, 5),
            PagePlan::Window {
                start: 0,
                end: 0,
                total_pages: 1
            }
        );
    }

    #[test]
    fn last_page_window_may_be_partial() {
        assert_eq!(
            plan_page(7, 3),
            PagePlan::Window {
                start: 6,
                end: 7,
                total_pages: 3
            }
        );
    }

    #[test]
    fn full_window_within_range() {
        assert_eq!(
            plan_page(7, 2),
            PagePlan::Window {
                start: 3,
                end: 6,
                total_pages: 3
            }
        );
    }

    #[test]
    fn page_parses_with_fallback_to_one() {
        assert_eq!(requested_page(None), 1);
        assert_eq!(requested_page(Some("4")), 4);
        assert_eq!(requested_page(Some("abc")), 1);
        assert_eq!(requested_page(Some("-2")), -2);
    }

    #[test]
    fn navigation_clamps_to_valid_range() {
        assert_eq!(clamp_page(4, 3), 3);
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(2, 1), 1);
    }

    #[test]
    fn redirect_target_encodes_query() {
        assert_eq!(search_url("react", 2), "/search?query=react&page=2");
        assert_eq!(
            search_url("rust & axum", 1),
            "/search?query=rust%20%26%20axum&page=1"
        );
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("react"), "%react%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("snake_case"), "%snake\\_case%");
    }
}
