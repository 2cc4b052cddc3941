//! Minimal `Cookie` / `Set-Cookie` handling for the session cookie.

/// Find `name` in a `Cookie` header value (`a=1; b=2`).
#[must_use]
pub fn find<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
}

/// `Set-Cookie` value for a session token: path-wide, hidden from scripts.
#[must_use]
pub fn session(name: &str, token: &str) -> String {
    format!("{name}={token}; Path=/; HttpOnly; SameSite=Lax")
}
