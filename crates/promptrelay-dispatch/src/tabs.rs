//! Tab matching helpers.

use promptrelay_cdp::PageInfo;
use url::Url;

/// Find the first open page whose URL origin matches the destination's.
/// Non-page targets (workers, extensions) never match.
pub fn find_page_for_origin<'a>(pages: &'a [PageInfo], dest: &Url) -> Option<&'a PageInfo> {
    pages.iter().find(|page| {
        page.is_page()
            && Url::parse(&page.url)
                .map(|u| u.origin() == dest.origin())
                .unwrap_or(false)
    })
}

/// Whether a navigated tab has reached the dispatch destination: same
/// origin, and the destination path is a prefix of the current path. The
/// prefix check guards against injecting into an intermediate redirect
/// page on the same origin.
pub fn nav_target_reached(current: &Url, dest: &Url) -> bool {
    current.origin() == dest.origin() && current.path().starts_with(dest.path())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(id: &str, page_type: &str, url: &str) -> PageInfo {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "type": page_type,
            "title": "",
            "url": url,
        }))
        .unwrap()
    }

    #[test]
    fn test_finds_first_matching_origin() {
        let pages = vec![
            page("T1", "page", "https://other.example/"),
            page("T2", "page", "https://claude.ai/chat/abc"),
            page("T3", "page", "https://claude.ai/"),
        ];
        let dest = Url::parse("https://claude.ai/").unwrap();
        let found = find_page_for_origin(&pages, &dest).unwrap();
        assert_eq!(found.id, "T2");
    }

    #[test]
    fn test_no_match_returns_none() {
        let pages = vec![page("T1", "page", "https://other.example/")];
        let dest = Url::parse("https://claude.ai/").unwrap();
        assert!(find_page_for_origin(&pages, &dest).is_none());
    }

    #[test]
    fn test_non_page_targets_skipped() {
        let pages = vec![page("T1", "service_worker", "https://claude.ai/sw.js")];
        let dest = Url::parse("https://claude.ai/").unwrap();
        assert!(find_page_for_origin(&pages, &dest).is_none());
    }

    #[test]
    fn test_unparseable_page_url_skipped() {
        let pages = vec![page("T1", "page", "chrome://newtab")];
        let dest = Url::parse("https://claude.ai/").unwrap();
        assert!(find_page_for_origin(&pages, &dest).is_none());
    }

    #[test]
    fn test_origin_includes_port() {
        let pages = vec![page("T1", "page", "https://claude.ai:8443/")];
        let dest = Url::parse("https://claude.ai/").unwrap();
        assert!(find_page_for_origin(&pages, &dest).is_none());
    }

    #[test]
    fn test_nav_target_reached_prefix() {
        let dest = Url::parse("https://www.perplexity.ai/search").unwrap();
        let current = Url::parse("https://www.perplexity.ai/search?q=x").unwrap();
        assert!(nav_target_reached(&current, &dest));

        let deeper = Url::parse("https://www.perplexity.ai/search/results").unwrap();
        assert!(nav_target_reached(&deeper, &dest));
    }

    #[test]
    fn test_nav_target_not_reached_on_redirect_page() {
        let dest = Url::parse("https://chat.openai.com/chat").unwrap();
        let login = Url::parse("https://chat.openai.com/auth/login").unwrap();
        assert!(!nav_target_reached(&login, &dest));
    }

    #[test]
    fn test_nav_target_requires_same_origin() {
        let dest = Url::parse("https://claude.ai/").unwrap();
        let elsewhere = Url::parse("https://login.claude.ai/").unwrap();
        assert!(!nav_target_reached(&elsewhere, &dest));
    }

    #[test]
    fn test_root_dest_matches_any_path() {
        let dest = Url::parse("https://claude.ai/").unwrap();
        let current = Url::parse("https://claude.ai/new").unwrap();
        assert!(nav_target_reached(&current, &dest));
    }
}
