//! Browsing locations and the routes they map to.
//!
//! Locations are path-plus-query strings like `/?view=list&page=2`.
//! Hrefs found in pages may be relative; [`resolve`] turns them into a
//! full location against the current one, the way a browser address
//! bar would.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::Result;

// Placeholder origin for URL arithmetic, never dereferenced
const BASE_URL: &str = "http://leafthrough.invalid/";

/// Article list presentation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    #[default]
    Grid,
    List,
}

impl ViewKind {
    /// Read a `view` query value. Anything but `list` means grid.
    pub fn from_param(value: &str) -> Self {
        match value {
            "list" => ViewKind::List,
            _ => ViewKind::Grid,
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            ViewKind::Grid => "grid",
            ViewKind::List => "list",
        }
    }
}

/// A location the application can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Paginated article index
    Index { view: ViewKind, page: u32 },
    /// Single article by id
    Article { id: i64 },
}

impl Route {
    /// The canonical location for this route
    pub fn href(&self) -> String {
        match self {
            Route::Index { view, page } => {
                format!("/?view={}&page={}", view.as_param(), page)
            }
            Route::Article { id } => format!("/article/{id}"),
        }
    }

    /// Match a location against the route table. `None` means no route
    /// matches and the location is a dead end.
    pub fn from_location(location: &str) -> Result<Option<Route>> {
        let url = absolute(location)?;
        let path = url.path();

        if path == "/" {
            let view = match query_param(&url, "view") {
                Some(value) => ViewKind::from_param(&value),
                None => ViewKind::Grid,
            };
            let page = query_param(&url, "page")
                .and_then(|value| value.parse::<i64>().ok())
                .map(|page| page.clamp(1, u32::MAX as i64) as u32)
                .unwrap_or(1);
            return Ok(Some(Route::Index { view, page }));
        }

        if let Some(id_part) = path.strip_prefix("/article/") {
            // Only plain digit ids route, same as a strict int matcher
            if !id_part.is_empty() && id_part.bytes().all(|b| b.is_ascii_digit()) {
                if let Ok(id) = id_part.parse::<i64>() {
                    return Ok(Some(Route::Article { id }));
                }
            }
        }

        Ok(None)
    }
}

/// Resolve an href against the current location
pub fn resolve(href: &str, current: &str) -> Result<String> {
    let current = absolute(current)?;
    let next = current.join(href)?;
    Ok(location_string(&next))
}

fn absolute(location: &str) -> Result<Url> {
    let base = Url::parse(BASE_URL)?;
    Ok(base.join(location)?)
}

fn location_string(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

/// First occurrence of a query parameter
fn query_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(location: &str) -> Option<Route> {
        Route::from_location(location).unwrap()
    }

    #[test]
    fn test_index_defaults() {
        assert_eq!(
            route("/"),
            Some(Route::Index {
                view: ViewKind::Grid,
                page: 1
            })
        );
    }

    #[test]
    fn test_index_with_params() {
        assert_eq!(
            route("/?view=list&page=3"),
            Some(Route::Index {
                view: ViewKind::List,
                page: 3
            })
        );
    }

    #[test]
    fn test_unknown_view_falls_back_to_grid() {
        assert_eq!(
            route("/?view=compact"),
            Some(Route::Index {
                view: ViewKind::Grid,
                page: 1
            })
        );
    }

    #[test]
    fn test_page_param_is_clamped() {
        for location in ["/?page=0", "/?page=-5", "/?page=abc", "/?page="] {
            assert_eq!(
                route(location),
                Some(Route::Index {
                    view: ViewKind::Grid,
                    page: 1
                }),
                "location {location}"
            );
        }
    }

    #[test]
    fn test_article_route() {
        assert_eq!(route("/article/42"), Some(Route::Article { id: 42 }));
    }

    #[test]
    fn test_article_route_requires_digit_id() {
        assert_eq!(route("/article/abc"), None);
        assert_eq!(route("/article/-1"), None);
        assert_eq!(route("/article/3/extra"), None);
        assert_eq!(route("/article/"), None);
    }

    #[test]
    fn test_unmatched_path() {
        assert_eq!(route("/nothing/here"), None);
    }

    #[test]
    fn test_href_round_trips() {
        let original = Route::Index {
            view: ViewKind::List,
            page: 2,
        };
        assert_eq!(original.href(), "/?view=list&page=2");
        assert_eq!(route(&original.href()), Some(original));

        let article = Route::Article { id: 7 };
        assert_eq!(article.href(), "/article/7");
        assert_eq!(route(&article.href()), Some(article));
    }

    #[test]
    fn test_resolve_absolute_path() {
        assert_eq!(
            resolve("/article/3", "/?view=list&page=2").unwrap(),
            "/article/3"
        );
    }

    #[test]
    fn test_resolve_query_only_href_replaces_query() {
        assert_eq!(resolve("?page=2", "/?view=list&page=1").unwrap(), "/?page=2");
    }

    #[test]
    fn test_resolve_plain_root() {
        assert_eq!(resolve("/", "/article/9").unwrap(), "/");
    }
}
