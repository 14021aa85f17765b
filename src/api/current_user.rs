//! Current user service
//!
//! Resolve the current user identity from the `Authorization` header. The
//! raw bearer token is checked against the blacklist before its signature is
//! verified, a revoked token stays rejected for as long as it lives.

use std::marker::PhantomData;

use axum::Extension;
use axum::RequestPartsExt;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::api::Error;
use crate::storage::Storage;
use crate::users::User;

/// How long a token is valid, in seconds
const TOKEN_VALIDITY: i64 = 24 * 60 * 60; // a day

/// The keys used for encoding/decoding JWT tokens
#[derive(Clone)]
pub struct JwtKeys {
    /// The encoding key
    encoding: EncodingKey,

    /// The decoding key
    decoding: DecodingKey,
}

impl JwtKeys {
    /// Create new encoding/decoding keys, derived from a secret
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

/// The JWT claims that identify a user
#[derive(Debug, Deserialize, Serialize)]
struct Claims {
    /// The user ID
    sub: Uuid,

    /// First name of the user
    fname: String,

    /// Last name of the user
    lname: String,

    /// Email address of the user
    email: String,

    /// When the token was issued, seconds since the epoch
    iat: i64,

    /// When the token expires, seconds since the epoch
    exp: i64,
}

/// Current user identity, bound to the request by the auth gate
pub struct CurrentUser<S: Storage> {
    /// Claims of the verified token
    claims: Claims,

    /// The raw token value, needed to blacklist it on logout
    token: String,

    /// Storage type the blacklist was checked against
    _storage: PhantomData<S>,
}

impl<S: Storage> CurrentUser<S> {
    /// The ID of the current user
    pub fn id(&self) -> Uuid {
        self.claims.sub
    }

    /// The raw token the current user authenticated with
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Generate a token for the outside world for a given user
pub fn generate_token(jwt_keys: &JwtKeys, user: &User) -> Result<String, Error> {
    use jsonwebtoken::Header;
    use jsonwebtoken::encode;

    let issued_at = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user.id,
        fname: user.first_name.clone(),
        lname: user.last_name.clone(),
        email: user.email.clone(),
        iat: issued_at,
        exp: issued_at + TOKEN_VALIDITY,
    };

    encode(&Header::default(), &claims, &jwt_keys.encoding).map_err(Error::internal)
}

impl<B, S> FromRequestParts<B> for CurrentUser<S>
where
    B: Send + Sync,
    S: Storage,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &B) -> Result<Self, Self::Rejection> {
        use jsonwebtoken::Validation;
        use jsonwebtoken::decode;

        // Extract the token from the authorization header
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| Error::unauthorized("Missing authorization token"))?;

        let Extension(jwt_keys) = parts
            .extract::<Extension<JwtKeys>>()
            .await
            .map_err(|_| Error::internal_server_error("Could not get JWT keys"))?;

        let Extension(storage) = parts
            .extract::<Extension<S>>()
            .await
            .map_err(|_| Error::internal_server_error("Could not get a storage pool"))?;

        // The blacklist comes first, a revoked token must never be accepted,
        // no matter what its signature says
        let is_revoked = storage
            .is_token_revoked(bearer.token())
            .await
            .map_err(Error::internal)?;

        if is_revoked {
            return Err(Error::unauthorized("Token blacklisted"));
        }

        // A bad signature and an expired token map to the same rejection
        let token_data = decode::<Claims>(bearer.token(), &jwt_keys.decoding, &Validation::default())
            .map_err(|_| Error::unauthorized("Invalid token"))?;

        Ok(CurrentUser {
            claims: token_data.claims,
            token: bearer.token().to_string(),
            _storage: PhantomData,
        })
    }
}
