//! The façade the collector collaborator logs in through.
//!
//! One call to [`SessionAuthenticator::login`] performs exactly one full
//! round-trip pair, no internal retries; retry scheduling belongs to the
//! caller's loop. Callers sharing one transport must serialize logins and
//! the fetch cycles that may trigger them behind a single exclusive guard,
//! otherwise two handshakes race to overwrite the same cookie jar.
//!
//! 采集协作方用于登录的门面。
//!
//! 一次 [`SessionAuthenticator::login`] 调用恰好执行一对完整的往返，
//! 内部不做重试；重试调度属于调用方的循环。共享同一传输的调用方必须用
//! 单个独占守卫串行化登录以及可能触发登录的抓取周期，
//! 否则两次握手会竞争覆盖同一个 Cookie 存储。

use crate::client::{Handshake, ProofPolicy};
use crate::error::{AuthError, Result};
use crate::group::GroupParameters;
use crate::message::{self, AUTHENTICATE_PATH, ServerChallenge, ServerProofResponse};
use crate::state::Authenticated;
use crate::transport::Transport;

/// Owns the handshake state machine and the configured credentials, and
/// reports login success or failure to the collaborator.
#[derive(Debug)]
pub struct SessionAuthenticator<T: Transport> {
    transport: T,
    group: &'static GroupParameters,
    password: String,
    policy: ProofPolicy,
}

impl<T: Transport> SessionAuthenticator<T> {
    /// Starts building a new `SessionAuthenticator`.
    pub fn builder() -> SessionAuthenticatorBuilder<T> {
        SessionAuthenticatorBuilder::new()
    }

    /// Borrows the underlying transport, e.g. for authenticated fetches
    /// after a successful login.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Authenticates the transport's session with one full handshake.
    ///
    /// On success the transport's cookie store holds a cookie the server
    /// accepts on subsequent requests until it invalidates the session.
    ///
    /// 用一次完整握手认证传输层会话。
    ///
    /// 成功后传输层的 Cookie 存储中保存着服务器在使其失效之前
    /// 都会接受的 Cookie。
    pub fn login(&self, csrf_token: &str) -> Result<Authenticated> {
        tracing::info!("logging in to the station portal");

        let handshake = Handshake::new(self.group, self.password.as_str());
        let (request, handshake) = handshake.start(csrf_token)?;
        let body = self
            .transport
            .post_form(AUTHENTICATE_PATH, &request.fields())?;
        let challenge: ServerChallenge = message::parse_response(&body)?;

        let handshake = handshake.process_challenge(challenge)?;
        let (request, handshake) = handshake.proof_request(csrf_token);
        let body = self
            .transport
            .post_form(AUTHENTICATE_PATH, &request.fields())?;
        let response: ServerProofResponse = message::parse_response(&body)?;

        handshake.verify_server_proof(&response, self.policy)?;
        tracing::info!("login successful");
        Ok(Authenticated)
    }
}

/// A builder for creating a [`SessionAuthenticator`].
///
/// This builder ensures that all required fields are provided before
/// constructing the authenticator.
///
/// 用于创建 [`SessionAuthenticator`] 的构建器。
///
/// 此构建器确保在构造之前提供了所有必需的字段。
pub struct SessionAuthenticatorBuilder<T: Transport> {
    transport: Option<T>,
    password: Option<String>,
    group: &'static GroupParameters,
    policy: ProofPolicy,
}

impl<T: Transport> SessionAuthenticatorBuilder<T> {
    /// Creates a new `SessionAuthenticatorBuilder` with the Vodafone group
    /// and the lenient legacy proof policy.
    pub fn new() -> Self {
        Self {
            transport: None,
            password: None,
            group: GroupParameters::vodafone(),
            policy: ProofPolicy::default(),
        }
    }

    /// Sets the transport the handshake rounds go through.
    ///
    /// 设置握手轮次所经过的传输层。
    pub fn transport(mut self, transport: T) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets the operator-supplied portal password.
    ///
    /// 设置操作者提供的门户密码。
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Overrides the proof-mismatch policy (default: lenient).
    pub fn proof_policy(mut self, policy: ProofPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds the `SessionAuthenticator`.
    ///
    /// Returns an error if any required fields are missing.
    ///
    /// 构建 `SessionAuthenticator`。
    ///
    /// 如果任何必需字段缺失，则返回错误。
    pub fn build(self) -> Result<SessionAuthenticator<T>> {
        let transport = self
            .transport
            .ok_or(AuthError::BuilderMissingField("transport"))?;
        let password = self
            .password
            .ok_or(AuthError::BuilderMissingField("password"))?;

        Ok(SessionAuthenticator {
            transport,
            group: self.group,
            password,
            policy: self.policy,
        })
    }
}

impl<T: Transport> Default for SessionAuthenticatorBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
