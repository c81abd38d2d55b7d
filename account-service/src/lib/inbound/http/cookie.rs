use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::cookie::SameSite;

use crate::config::CookieConfig;

/// httpOnly cookie carrying the refresh token.
#[derive(Debug, Clone)]
pub struct RefreshCookie {
    name: String,
    path: String,
    max_age: time::Duration,
    secure: bool,
}

impl RefreshCookie {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        max_age_seconds: i64,
        secure: bool,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            max_age: time::Duration::seconds(max_age_seconds),
            secure,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Store `token` in the jar, replacing any previous refresh token.
    pub fn set(&self, jar: CookieJar, token: String) -> CookieJar {
        let cookie = Cookie::build((self.name.clone(), token))
            .path(self.path.clone())
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .max_age(self.max_age);

        jar.add(cookie)
    }

    /// Expire the refresh cookie. The cookie is path-scoped, so requests
    /// outside that path never carry it and the removal must be explicit.
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        let mut cookie = Cookie::build((self.name.clone(), ""))
            .path(self.path.clone())
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .build();
        cookie.make_removal();
        jar.add(cookie)
    }

    pub fn get(&self, jar: &CookieJar) -> Option<String> {
        jar.get(&self.name)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    }
}

impl From<&CookieConfig> for RefreshCookie {
    fn from(config: &CookieConfig) -> Self {
        Self::new(
            config.name.clone(),
            config.path.clone(),
            config.max_age_seconds,
            config.secure,
        )
    }
}
