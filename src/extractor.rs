//! API key admission extractors.
//!
//! Write handlers state their requirement by taking one of these as an
//! argument; GET handlers take neither and stay public. The token travels
//! in the `Studentmanager-Api-Key` header and only its SHA-256 digest is
//! ever compared against storage.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sha2::{Digest, Sha256};
use subtle::{Choice, ConstantTimeEq};

use crate::constants::API_KEY_HEADER;
use crate::error::ApiError;
use crate::repositories::ApiKeyRepository;
use crate::state::AppState;

struct KeyAccess {
    any: bool,
    admin: bool,
}

/// Digests the presented token and compares it against every stored
/// digest. All rows are visited and the comparison outcomes are OR-folded
/// in constant time, so response timing does not reveal whether or where a
/// match occurred. A missing header degenerates to the digest of the
/// empty string and falls through to no match.
async fn check_key(state: &AppState, parts: &Parts) -> Result<KeyAccess, ApiError> {
    let token = parts
        .headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .trim();
    let digest = Sha256::digest(token.as_bytes());

    let keys = ApiKeyRepository::find_all(&state.db).await?;
    let mut any = Choice::from(0u8);
    let mut admin = Choice::from(0u8);
    for key in &keys {
        let Ok(stored) = hex::decode(&key.key) else {
            continue;
        };
        let matched = digest.as_slice().ct_eq(stored.as_slice());
        any |= matched;
        if key.admin {
            admin |= matched;
        }
    }
    Ok(KeyAccess {
        any: any.into(),
        admin: admin.into(),
    })
}

/// Admission for student and course writes: admin class keys only.
pub struct RequireAdminKey;

impl FromRequestParts<AppState> for RequireAdminKey {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let access = check_key(state, parts).await?;
        if access.admin {
            Ok(Self)
        } else {
            Err(ApiError::Forbidden)
        }
    }
}

/// Admission for assessment writes: any stored key class is enough.
pub struct RequireAssessmentKey;

impl FromRequestParts<AppState> for RequireAssessmentKey {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let access = check_key(state, parts).await?;
        if access.any {
            Ok(Self)
        } else {
            Err(ApiError::Forbidden)
        }
    }
}
