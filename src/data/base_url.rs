use std::{fmt::Display, str::FromStr};

use reqwest::Url;
use serde::Deserialize;
use snafu::{ensure, ResultExt, Snafu};
use url::ParseError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

#[derive(Debug, PartialEq, Snafu)]
pub enum BaseUrlError {
    #[snafu(display("Invalid url: {}", source))]
    UrlParse { source: ParseError },

    #[snafu(display("The url '{}' can not have path segments", url))]
    CannotBeABase { url: String },
}

/// The root url of a knowledge-base service. Endpoints are appended
/// as path segments, so a base with a path prefix (for example behind
/// a reverse proxy) is kept intact. Urls without a path (like
/// `mailto:x`) are rejected when parsing.
#[derive(Debug, PartialEq, Clone)]
pub struct BaseUrl(Url);

impl BaseUrl {
    pub fn parse(s: &str) -> Result<BaseUrl, BaseUrlError> {
        s.parse::<BaseUrl>()
    }

    pub fn as_str(&self) -> &str {
        let BaseUrl(u) = self;
        u.as_str()
    }

    /// Appends the given segments to the path of this url. Each
    /// segment is percent-encoded, so values like team names can not
    /// escape their position in the path.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let BaseUrl(u) = self;
        let mut url = u.clone();
        // never fails, `from_str` only accepts urls that can be a base
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Like [`BaseUrl::endpoint`] with a query string appended.
    pub fn endpoint_with_query(&self, segments: &[&str], query: &[(&str, String)]) -> Url {
        let mut url = self.endpoint(segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BaseUrl::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Display for BaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BaseUrl {
    type Err = BaseUrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let url = Url::parse(s).context(UrlParseSnafu)?;
        ensure!(!url.cannot_be_a_base(), CannotBeABaseSnafu { url: s });
        Ok(BaseUrl(url))
    }
}

#[test]
fn endpoint_appends_segments() {
    let base = BaseUrl::parse(DEFAULT_BASE_URL).unwrap();
    assert_eq!(
        base.endpoint(&["questions", "42"]).as_str(),
        "http://localhost:3001/questions/42"
    );
}

#[test]
fn endpoint_keeps_path_prefix() {
    let base = BaseUrl::parse("http://example.com/kb/").unwrap();
    assert_eq!(
        base.endpoint(&["login"]).as_str(),
        "http://example.com/kb/login"
    );
}

#[test]
fn endpoint_encodes_segments() {
    let base = BaseUrl::parse(DEFAULT_BASE_URL).unwrap();
    assert_eq!(
        base.endpoint(&["organizations", "a/b", "teams", "x y"]).as_str(),
        "http://localhost:3001/organizations/a%2Fb/teams/x%20y"
    );
}

#[test]
fn endpoint_with_query() {
    let base = BaseUrl::parse(DEFAULT_BASE_URL).unwrap();
    assert_eq!(
        base.endpoint_with_query(&["questions"], &[("user", "3".to_string())])
            .as_str(),
        "http://localhost:3001/questions?user=3"
    );
    assert_eq!(
        base.endpoint_with_query(&["questions"], &[]).as_str(),
        "http://localhost:3001/questions"
    );
}

#[test]
fn rejects_urls_without_path() {
    assert_eq!(
        BaseUrl::parse("mailto:x@example.com"),
        Err(BaseUrlError::CannotBeABase {
            url: "mailto:x@example.com".into()
        })
    );
    assert!(matches!(
        BaseUrl::parse("not a url"),
        Err(BaseUrlError::UrlParse { .. })
    ));
}
