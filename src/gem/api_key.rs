//! Credentials as sent by the `gem` command line client.

use crate::auth::{BasicAuth, CredentialExtractor, Credentials, decode_pair};
use crate::parser::HttpRequest;

/// Reads the `Authorization` header the way gem clients send it.
///
/// The value is either a regular `Basic` credential or a bare API key. API
/// keys handed out by the repository are `base64(user:password)`, so both
/// forms resolve to the same username and password.
#[derive(Debug, Clone, Copy, Default)]
pub struct GemApiKey;

impl CredentialExtractor for GemApiKey {
    fn extract(&self, request: &HttpRequest) -> Option<Credentials> {
        let value = request.get_header("Authorization")?.trim();
        let is_basic = value
            .get(..6)
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case("Basic "));
        if is_basic {
            BasicAuth::parse(value)
        } else {
            decode_pair(value)
        }
    }
}
