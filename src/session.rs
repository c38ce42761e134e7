//! Session-expiry detection and the single re-login cycle.
//!
//! The portal gives no explicit expiry signal; an expired session simply
//! answers the next fetch with the login page. The collaborator detects the
//! login-form marker, logs in exactly once with a CSRF token it extracts
//! from that page, and retries the original fetch exactly once. A second
//! login page in a row is an error, never another loop iteration.
//!
//! 会话过期检测与单次重新登录周期。
//!
//! 门户不会显式发出过期信号；过期的会话只会用登录页回应下一次抓取。
//! 协作方检测到登录表单标记后，用从该页提取的 CSRF 令牌恰好登录一次，
//! 并恰好重试一次原始抓取。连续第二次出现登录页是错误，而不是再次循环。

use crate::authenticator::SessionAuthenticator;
use crate::error::{AuthError, Result};
use crate::transport::Transport;

/// The element id the portal's login form carries.
const LOGIN_FORM_MARKER: &str = "loginfrm";

/// Whether a fetched body is the portal's login page.
pub fn is_login_page(body: &str) -> bool {
    body.contains(LOGIN_FORM_MARKER)
}

impl<T: Transport> SessionAuthenticator<T> {
    /// Runs `fetch` against the transport, transparently re-authenticating
    /// once if the session has expired.
    ///
    /// `extract_csrf` pulls the per-page CSRF token out of the login page
    /// body; how it does so (selectors, regexes) is the caller's concern.
    ///
    /// 在传输层上执行 `fetch`，若会话已过期则透明地重新认证一次。
    ///
    /// `extract_csrf` 从登录页正文中取出该页的 CSRF 令牌；
    /// 具体如何提取（选择器、正则）由调用方决定。
    pub fn fetch_with_login<F, C>(&self, fetch: F, extract_csrf: C) -> Result<String>
    where
        F: Fn(&T) -> std::result::Result<String, crate::error::TransportError>,
        C: FnOnce(&str) -> Option<String>,
    {
        let body = fetch(self.transport()).map_err(AuthError::Transport)?;
        if !is_login_page(&body) {
            return Ok(body);
        }

        tracing::debug!("session expired, performing a fresh login");
        let token = extract_csrf(&body).ok_or(AuthError::MissingCsrfToken)?;
        self.login(&token)?;

        let body = fetch(self.transport()).map_err(AuthError::Transport)?;
        if is_login_page(&body) {
            return Err(AuthError::SessionExpired);
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_login_form_marker() {
        assert!(is_login_page(r#"<form id="loginfrm" action="#));
        assert!(!is_login_page("<html><body>42 kbps</body></html>"));
    }
}
