//! OAuth2 service account flow: signed JWT assertion exchanged for a bearer token.

use std::time::Duration;

use jiff::Timestamp;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

use super::error::FcmError;
use super::types::{JwtClaims, ServiceAccountKey, TokenResponse};
use crate::config::FcmSettings;
use crate::external::HTTP_CLIENT;

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

pub struct FcmAuthenticator {
    key: ServiceAccountKey,
    scope: String,
    timeout: Duration,
}

impl FcmAuthenticator {
    pub fn new(key: ServiceAccountKey, settings: &FcmSettings) -> Self {
        Self {
            key,
            scope: settings.scope.clone(),
            timeout: Duration::from_secs(settings.request_timeout),
        }
    }

    /// RS256 assertion issued at `now`, keyed by `private_key_id`
    pub fn assertion(&self, now: Timestamp) -> Result<String, FcmError> {
        let iat = now.as_second();
        let claims = JwtClaims {
            iss: self.key.client_email.clone(),
            sub: self.key.client_email.clone(),
            scope: self.scope.clone(),
            aud: self.key.token_uri.clone(),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(self.key.private_key_id.clone());

        let encoding_key =
            EncodingKey::from_rsa_pem(self.key.private_key.as_bytes()).map_err(FcmError::PrivateKey)?;

        encode(&header, &claims, &encoding_key).map_err(FcmError::Signing)
    }

    /// Exchange a fresh assertion for an access token. Tokens are not cached.
    pub async fn access_token(&self) -> Result<String, FcmError> {
        let assertion = self.assertion(Timestamp::now())?;
        let params = [("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())];

        let response = HTTP_CLIENT
            .post(&self.key.token_uri)
            .timeout(self.timeout)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FcmError::TokenExchange {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = response.json().await?;
        tracing::debug!(
            client_email = %self.key.client_email,
            expires_in = ?token.expires_in,
            "Obtained FCM access token"
        );
        Ok(token.access_token)
    }
}
