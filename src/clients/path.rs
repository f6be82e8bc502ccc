//! URL joining helpers.
//!
//! Every URL produced by the resource client goes through
//! [`collapse_slashes`]: runs of `/` are folded into a single `/` unless the
//! run directly follows a `:`, which keeps `scheme://` intact.
//!
//! ```rust
//! use resource_client::clients::{collapse_slashes, resolve_destination};
//!
//! assert_eq!(collapse_slashes("http://host//a//b"), "http://host/a/b");
//! assert_eq!(
//!     resolve_destination(&["users", "42"], "https://api.example.com/v1/"),
//!     "https://api.example.com/v1/users/42"
//! );
//! ```

use std::fmt::{Display, Write};

/// Folds repeated slashes into one, except right after a `:`.
///
/// A run is collapsed when the character before it is anything other than a
/// colon, so `http://` survives while `host//a` becomes `host/a`.
#[must_use]
pub fn collapse_slashes(url: &str) -> String {
    let chars: Vec<char> = url.chars().collect();
    let mut result = String::with_capacity(url.len());
    let mut i = 0;

    while i < chars.len() {
        let current = chars[i];
        let run_follows = current != ':'
            && chars.get(i + 1) == Some(&'/')
            && chars.get(i + 2) == Some(&'/');

        result.push(current);
        if run_follows {
            result.push('/');
            i += 2;
            while chars.get(i) == Some(&'/') {
                i += 1;
            }
        } else {
            i += 1;
        }
    }

    result
}

/// Joins `path_parts` onto `base_path` with `/` and collapses duplicate
/// slashes.
#[must_use]
pub fn resolve_destination<P: Display>(path_parts: &[P], base_path: &str) -> String {
    let mut url = base_path.to_string();
    for part in path_parts {
        // Writing into a String cannot fail.
        let _ = write!(url, "/{part}");
    }
    collapse_slashes(&url)
}

/// Builds the request URL for `path` under `base_url`.
pub(crate) fn join_request_url(base_url: &str, path: &str, trailing_slash: bool) -> String {
    let suffix = if trailing_slash { "/" } else { "" };
    collapse_slashes(&format!("{base_url}/{path}{suffix}"))
}

/// Appends an encoded query string to `url`.
pub(crate) fn append_query(url: String, query: &str) -> String {
    if query.is_empty() {
        return url;
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{query}")
}
