//! JWT issuance and verification

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use pa_shared::config::JwtConfig;

use crate::domain::entities::account::Role;
use crate::domain::entities::token::{Claims, IssuedToken};
use crate::errors::{DomainError, TokenError};

/// Mints and decodes HS256 access tokens
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime_seconds: i64,
    issuer: String,
}

impl TokenIssuer {
    /// Creates a new token issuer
    ///
    /// # Arguments
    ///
    /// * `config` - JWT configuration holding the signing secret
    ///
    /// # Returns
    ///
    /// A new `TokenIssuer`, or `DomainError::Configuration` when no usable
    /// secret or lifetime is configured
    pub fn new(config: &JwtConfig) -> Result<Self, DomainError> {
        let secret = config
            .signing_secret()
            .ok_or_else(|| DomainError::Configuration {
                message: "JWT signing secret is not configured".to_string(),
            })?;

        if config.expiry_seconds <= 0 {
            return Err(DomainError::Configuration {
                message: "JWT expiry must be positive".to_string(),
            });
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "sub"]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            lifetime_seconds: config.expiry_seconds,
            issuer: config.issuer.clone(),
        })
    }

    /// Issues a signed access token for an account
    ///
    /// # Arguments
    ///
    /// * `account_id` - Subject of the token
    /// * `role` - Role snapshot to embed
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedToken)` - Token string and its expiry
    /// * `Err(DomainError)` - Encoding failed
    pub fn issue(&self, account_id: Uuid, role: Role) -> Result<IssuedToken, DomainError> {
        let claims = Claims::new(account_id, role, self.lifetime_seconds, &self.issuer);
        let expires_at = claims.expires_at()?;

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| TokenError::GenerationFailed)?;

        Ok(IssuedToken {
            token,
            expires_at,
            expires_in: self.lifetime_seconds,
        })
    }

    /// Decodes a token, checking signature, issuer, `exp` and `nbf`
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid
    /// * `Err(DomainError::Token)` - Token is invalid, expired, or malformed
    pub fn decode(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::ImmatureSignature => TokenError::NotYetValid,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::MissingRequiredClaim(claim) => TokenError::MissingClaim {
                    claim: claim.clone(),
                },
                _ => TokenError::InvalidFormat,
            })?;

        Ok(token_data.claims)
    }

    /// Configured token lifetime in seconds
    pub fn lifetime_seconds(&self) -> i64 {
        self.lifetime_seconds
    }
}
