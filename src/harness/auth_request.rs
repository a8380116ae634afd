use url::Url;

/// Authentication request URL returned by the client for an `auth` command.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthRequest {
    /// Decoded query parameters in order of appearance.
    params: Vec<(String, String)>,
}

impl AuthRequest {
    /// Parses the URL returned by the client.
    pub fn parse(value: &str) -> Result<AuthRequest, url::ParseError> {
        let params = Url::parse(value)?.query_pairs().into_owned().collect();

        Ok(AuthRequest { params })
    }

    /// First value of the query parameter `name`, or an empty string if absent.
    pub fn param(&self, name: &str) -> &str {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .unwrap_or_default()
    }
}

/// `scheme://host[:port]` of the absolute URL `url`, with the authority kept as written.
///
/// Default ports and host case survive, so `http://c.test:80/cb` yields `http://c.test:80`.
/// Userinfo is dropped.
pub fn origin_of(url: &str) -> String {
    let (scheme, rest) = url.split_once("://").unwrap_or((url, ""));
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = authority.rsplit_once('@').map_or(authority, |(_, host)| host);

    format!("{}://{host}", scheme.to_ascii_lowercase())
}
