//! Launch-URL token handoff.
//!
//! A launch URL may carry a one-shot `token` query parameter (for example
//! from an email link). The token is consumed exactly once and stripped
//! from the URL so it cannot leak into logs or history.

/// Removes the `token` query parameter from `url` and returns its value.
///
/// All other query parameters are preserved in order. Returns `None` and
/// leaves the URL untouched when no `token` parameter is present. When the
/// parameter appears more than once, the first value wins and every
/// occurrence is removed.
pub fn take_token_param(url: &mut reqwest::Url) -> Option<String> {
    let mut token = None;
    let remaining: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, value)| {
            if key == "token" {
                if token.is_none() {
                    token = Some(value.to_string());
                }
                false
            } else {
                true
            }
        })
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    token.as_ref()?;

    if remaining.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(remaining);
    }

    token
}
