//! Session cookie policy.
//!
//! The session token travels in a single cookie. It is `HttpOnly`, scoped to
//! `/`, `SameSite=Lax`, and `Secure` only in production. No `Max-Age` is set,
//! so browsers keep it for the session while the token's own expiry bounds it.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

/// Reads, sets and clears the session cookie.
#[derive(Debug, Clone)]
pub struct SessionCookies {
    name: String,
    secure: bool,
}

impl SessionCookies {
    /// Create a cookie policy.
    pub fn new(name: impl Into<String>, secure: bool) -> Self {
        Self {
            name: name.into(),
            secure,
        }
    }

    /// Cookie name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the `Secure` attribute is set.
    pub fn secure(&self) -> bool {
        self.secure
    }

    /// The session token carried by the request, if any.
    pub fn read<'a>(&self, jar: &'a CookieJar) -> Option<&'a str> {
        jar.get(&self.name)
            .map(|cookie| cookie.value())
            .filter(|value| !value.is_empty())
    }

    /// Attach a session token to the response.
    pub fn issue(&self, jar: CookieJar, token: String) -> CookieJar {
        jar.add(self.build(token))
    }

    /// Instruct the client to drop the session cookie.
    ///
    /// Always emits a removal cookie, whether or not the request carried one.
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        let mut cookie = self.build(String::new());
        cookie.make_removal();
        jar.add(cookie)
    }

    fn build(&self, value: String) -> Cookie<'static> {
        Cookie::build((self.name.clone(), value))
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .path("/")
            .build()
    }
}
