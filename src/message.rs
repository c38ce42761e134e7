//! The messages exchanged with the portal's `/authenticate` endpoint.
//!
//! Requests go out form-encoded; responses come back as loosely-typed JSON.
//! The response schemas here are strict: a missing field fails
//! deserialization instead of defaulting, which the caller reports as a
//! protocol error.

use crate::error::ProtocolError;
use serde::Deserialize;

/// Path of the authentication endpoint, relative to the portal base URL.
pub const AUTHENTICATE_PATH: &str = "/authenticate";

/// Round 1 request: announces the client's public ephemeral value.
#[derive(Debug, Clone)]
pub struct ChallengeRequest {
    pub csrf_token: String,
    pub username: &'static str,
    /// Hex of `A`.
    pub client_public: String,
}

impl ChallengeRequest {
    /// The form fields as they appear on the wire.
    pub fn fields(&self) -> [(&'static str, &str); 3] {
        [
            ("CSRFtoken", self.csrf_token.as_str()),
            ("I", self.username),
            ("A", self.client_public.as_str()),
        ]
    }
}

/// Round 1 response: the server's salt and public ephemeral value.
///
/// 第一轮响应：服务器的盐值和公开临时值。
#[derive(Debug, Clone, Deserialize)]
pub struct ServerChallenge {
    /// Hex salt.
    #[serde(rename = "s")]
    pub salt: String,
    /// Hex of `B`.
    #[serde(rename = "B")]
    pub server_public: String,
}

/// Round 2 request: the client proof.
#[derive(Debug, Clone)]
pub struct ProofRequest {
    pub csrf_token: String,
    /// Hex of `M1`.
    pub client_proof: String,
}

impl ProofRequest {
    pub fn fields(&self) -> [(&'static str, &str); 2] {
        [
            ("CSRFtoken", self.csrf_token.as_str()),
            ("M", self.client_proof.as_str()),
        ]
    }
}

/// Round 2 response: the server proof.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerProofResponse {
    /// Hex of the server's `M2`.
    #[serde(rename = "M")]
    pub server_proof: String,
}

/// Parses a round's JSON response body into its schema.
pub fn parse_response<'a, T: Deserialize<'a>>(body: &'a str) -> Result<T, ProtocolError> {
    serde_json::from_str(body).map_err(ProtocolError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn challenge_response_requires_both_fields() {
        let ok: ServerChallenge = parse_response(r#"{"s":"abcd","B":"1234"}"#).unwrap();
        assert_eq!(ok.salt, "abcd");
        assert_eq!(ok.server_public, "1234");

        assert!(parse_response::<ServerChallenge>(r#"{"s":"abcd"}"#).is_err());
        assert!(parse_response::<ServerChallenge>("not json").is_err());
    }

    #[test]
    fn request_fields_use_wire_names() {
        let request = ChallengeRequest {
            csrf_token: "tok".into(),
            username: "vodafone",
            client_public: "0a".into(),
        };
        assert_eq!(
            request.fields(),
            [("CSRFtoken", "tok"), ("I", "vodafone"), ("A", "0a")]
        );
    }
}
