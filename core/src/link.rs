// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turning pasted links into article titles

use crate::Article;
use percent_encoding::percent_decode_str;
use url::Url;

/// The only host whose links count as moves
pub const WIKIPEDIA_HOST: &str = "en.wikipedia.org";

const WIKI_PATH_PREFIX: &str = "/wiki/";

/// Extract the article title from an English Wikipedia link
///
/// Accepts `https://en.wikipedia.org/wiki/<Title>`, ignoring any query or
/// fragment, and returns the percent-decoded title. Anything else (other
/// hosts, other paths, unparseable text, malformed escapes, an empty title)
/// yields `None`.
pub fn article_from_url(input: &str) -> Option<Article> {
    let parsed = Url::parse(input).ok()?;

    if parsed.host_str()? != WIKIPEDIA_HOST {
        return None;
    }

    let rest = parsed.path().strip_prefix(WIKI_PATH_PREFIX)?;
    let raw_title = rest.split(WIKI_PATH_PREFIX).next()?;

    let title = decode_component(raw_title)?;
    if title.is_empty() {
        return None;
    }

    Some(Article::new(title))
}

/// Percent-decode one path component, refusing malformed escapes
fn decode_component(raw: &str) -> Option<String> {
    let well_formed = raw.match_indices('%').all(|(i, _)| {
        raw.get(i + 1..i + 3)
            .map_or(false, |hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
    });
    if !well_formed {
        return None;
    }

    percent_decode_str(raw)
        .decode_utf8()
        .ok()
        .map(|title| title.into_owned())
}
