//! The transport collaborator the handshake drives its round trips through.
//!
//! The handshake core never owns a socket; it hands form fields to a
//! [`Transport`] and gets response bodies back. The durable artifact of a
//! successful login, the session cookie, lives in the transport's cookie
//! store, not in the handshake.
//!
//! 握手过程驱动往返所依赖的传输协作方。
//!
//! 握手核心从不持有套接字；它把表单字段交给 [`Transport`] 并取回响应体。
//! 登录成功的持久产物（会话 Cookie）保存在传输层的 Cookie 存储中，
//! 而不在握手状态机里。

use crate::error::TransportError;

/// A blocking request/response transport against the portal.
///
/// Implementations must route every call through one shared cookie store so
/// that the cookie authenticated by a login is the one later fetches carry.
pub trait Transport {
    /// POSTs a form-encoded body and returns the response body text.
    fn post_form(
        &self,
        path: &str,
        fields: &[(&str, &str)],
    ) -> std::result::Result<String, TransportError>;

    /// GETs a page and returns the response body text.
    fn get(&self, path: &str) -> std::result::Result<String, TransportError>;
}

/// [`Transport`] backed by a blocking `reqwest` client with a cookie store,
/// the moral equivalent of the stock `http.Client` + cookie jar the portal
/// is normally scripted against.
#[derive(Debug)]
pub struct HttpTransport {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Creates a transport rooted at `base_url` (e.g. `http://192.168.1.1`).
    pub fn new(base_url: impl Into<String>) -> std::result::Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .cookie_store(true)
            .build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn read_body(
        response: reqwest::blocking::Response,
    ) -> std::result::Result<String, TransportError> {
        if !response.status().is_success() {
            return Err(TransportError::Status(response.status().as_u16()));
        }
        Ok(response.text()?)
    }
}

impl Transport for HttpTransport {
    fn post_form(
        &self,
        path: &str,
        fields: &[(&str, &str)],
    ) -> std::result::Result<String, TransportError> {
        let response = self.client.post(self.url(path)).form(fields).send()?;
        Self::read_body(response)
    }

    fn get(&self, path: &str) -> std::result::Result<String, TransportError> {
        let response = self.client.get(self.url(path)).send()?;
        Self::read_body(response)
    }
}
