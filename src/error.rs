use thiserror::Error;

/// An error produced while decoding a server response.
///
/// The portal speaks loosely-typed JSON; every field the protocol needs is
/// validated here so that a missing or malformed field surfaces as a typed
/// error instead of a silently zero-valued one.
///
/// 解码服务器响应时产生的错误。
///
/// 门户使用松散类型的 JSON；协议所需的每个字段都在此处进行验证，
/// 以便缺失或格式错误的字段以类型化错误的形式浮现，而不是被静默置零。
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The response body was not the JSON object the round expects.
    #[error("malformed server response: {0}")]
    Json(#[from] serde_json::Error),

    /// A field that must carry hexadecimal text did not decode.
    #[error("field `{field}` is not valid hexadecimal")]
    InvalidHex { field: &'static str },
}

/// An error produced by the transport collaborator.
///
/// 传输协作方产生的错误。
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered, but not with a 2xx status.
    #[error("unexpected http status {0}")]
    Status(u16),

    /// Transport failures raised by non-HTTP transports (e.g. test doubles).
    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("protocol violation: {0}")]
    Protocol(#[from] ProtocolError),

    /// The server's proof did not match the expected value. Only raised
    /// under the strict proof policy; the lenient policy logs a warning
    /// instead.
    ///
    /// 服务器的证明值与预期值不匹配。仅在严格策略下作为错误抛出；
    /// 宽松策略只记录一条警告。
    #[error("server proof mismatch (expected {expected}, received {received})")]
    ProofMismatch { expected: String, received: String },

    /// The secure random source failed. This is unrecoverable: the
    /// handshake never substitutes a weak or fixed exponent.
    ///
    /// 安全随机源失败。此错误不可恢复：握手绝不会替换为弱的或固定的指数。
    #[error("secure random source unavailable: {0}")]
    RandomSource(#[from] rand::rand_core::OsError),

    #[error("required builder field `{0}` was not set")]
    BuilderMissingField(&'static str),

    /// A login page was fetched but carried no CSRF token to log in with.
    #[error("login page carries no CSRF token")]
    MissingCsrfToken,

    /// A fetch still landed on the login page after a fresh login.
    #[error("session still unauthenticated after a fresh login")]
    SessionExpired,
}

pub type Result<T> = std::result::Result<T, AuthError>;
