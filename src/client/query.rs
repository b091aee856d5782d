//! Query string helpers for the redirect URLs.

use url::Url;

use crate::AuthError;

/// Sets `field` to `value` in the query of `url`.
///
/// Any existing occurrence of `field` is replaced, so the field appears
/// exactly once in the result, appended last. Other parameters are kept
/// byte for byte, in order, and the fragment is preserved.
///
/// # Example
///
/// ```
/// # use dxcasdoor::client::query::set_url_query_field;
/// let url = set_url_query_field(
///     "redirect_uri",
///     "https://app.example.com/boot.html",
///     "https://idp.example.com/login?x=1",
/// )
/// .unwrap();
/// assert_eq!(
///     url,
///     "https://idp.example.com/login?x=1&redirect_uri=https%3A%2F%2Fapp.example.com%2Fboot.html"
/// );
/// ```
pub fn set_url_query_field(field: &str, value: &str, url: &str) -> Result<String, AuthError> {
    let mut parsed = Url::parse(url)?;

    let mut segments: Vec<String> = parsed
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|segment| !segment.is_empty() && segment_key(segment) != field)
        .map(str::to_string)
        .collect();
    segments.push(format!(
        "{}={}",
        urlencoding::encode(field),
        urlencoding::encode(value)
    ));

    parsed.set_query(Some(&segments.join("&")));
    Ok(parsed.into())
}

/// Decoded key of one raw `key=value` query segment.
fn segment_key(segment: &str) -> String {
    url::form_urlencoded::parse(segment.as_bytes())
        .next()
        .map(|(key, _)| key.into_owned())
        .unwrap_or_default()
}

/// Returns the first value of `name` in a query string, ignoring empty values.
///
/// Accepts the string with or without its leading `?`.
pub fn query_param(search: &str, name: &str) -> Option<String> {
    url::form_urlencoded::parse(search.trim_start_matches('?').as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(url: &str) -> Vec<(String, String)> {
        Url::parse(url)
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_adds_field_to_url_without_query() {
        let url = set_url_query_field("redirect_uri", "https://a/boot.html", "https://p/login")
            .unwrap();

        assert_eq!(url.matches("redirect_uri=").count(), 1);
        assert_eq!(
            pairs(&url),
            vec![("redirect_uri".to_string(), "https://a/boot.html".to_string())]
        );
    }

    #[test]
    fn test_keeps_existing_parameters() {
        let url = set_url_query_field("redirect_uri", "https://a/boot.html", "https://p/login?x=1")
            .unwrap();

        assert_eq!(url.matches("x=1").count(), 1);
        assert_eq!(url.matches("redirect_uri=").count(), 1);
        assert_eq!(
            pairs(&url),
            vec![
                ("x".to_string(), "1".to_string()),
                ("redirect_uri".to_string(), "https://a/boot.html".to_string()),
            ]
        );
    }

    #[test]
    fn test_overwrites_existing_field() {
        let url = set_url_query_field(
            "post_logout_redirect_uri",
            "https://a/boot.html",
            "https://p/logout?post_logout_redirect_uri=https%3A%2F%2Fold&id_token_hint=t&post_logout_redirect_uri=again",
        )
        .unwrap();

        assert_eq!(url.matches("post_logout_redirect_uri=").count(), 1);
        assert_eq!(
            pairs(&url),
            vec![
                ("id_token_hint".to_string(), "t".to_string()),
                (
                    "post_logout_redirect_uri".to_string(),
                    "https://a/boot.html".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_preserves_fragment() {
        let url = set_url_query_field("redirect_uri", "r", "https://p/login?x=1#top").unwrap();
        assert_eq!(url, "https://p/login?x=1&redirect_uri=r#top");
    }

    #[test]
    fn test_leaves_other_parameters_untouched() {
        let url = set_url_query_field(
            "redirect_uri",
            "r",
            "https://p/login?scope=openid%20profile&prompt&redirect%5Furi=old",
        )
        .unwrap();
        assert_eq!(url, "https://p/login?scope=openid%20profile&prompt&redirect_uri=r");
    }

    #[test]
    fn test_rejects_relative_url() {
        let result = set_url_query_field("redirect_uri", "r", "/login");
        assert!(matches!(result, Err(AuthError::InvalidUrl(_))));
    }

    #[test]
    fn test_query_param() {
        assert_eq!(query_param("?code=abc&state=xyz", "code").as_deref(), Some("abc"));
        assert_eq!(query_param("code=abc&state=xyz", "state").as_deref(), Some("xyz"));
        assert_eq!(query_param("?state=a%20b", "state").as_deref(), Some("a b"));
        assert_eq!(query_param("?code=1&code=2", "code").as_deref(), Some("1"));
    }

    #[test]
    fn test_query_param_absent_or_empty() {
        assert_eq!(query_param("", "code"), None);
        assert_eq!(query_param("?state=xyz", "code"), None);
        assert_eq!(query_param("?code=&state=xyz", "code"), None);
    }
}
