// Signup, login and the token gate in front of protected routes.

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{
    Json,
    extract::{Request, State, rejection::JsonRejection},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::database::NewUser;
use crate::error::{ApiFailure, AuthError, auth_error_to_api_error, json_body};
use crate::models::{AuthResponse, LoginRequest, SignupRequest};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

/// Identity attached to a request once its token has been verified.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub email: String,
}

/// Issues and verifies HS256 session tokens.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            ttl,
        }
    }

    pub fn issue(&self, email: &str) -> Result<String, AuthError> {
        let claims = Claims {
            email: email.to_string(),
            exp: (Utc::now() + self.ttl).timestamp(),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(AuthError::Sign)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("rejected token: {e}");
                AuthError::InvalidToken
            })
    }
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

/// False for a wrong password and for a stored hash that does not parse.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!("unparseable password hash in user store: {e}");
            false
        }
    }
}

/// Argon2 is CPU-bound; run it on the blocking pool instead of a runtime worker.
pub async fn hash_password_blocking(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || hash_password(&password)).await?
}

pub async fn verify_password_blocking(password: String, stored_hash: String) -> Result<bool, AuthError> {
    let valid = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash)).await?;
    Ok(valid)
}

/// Bearer prefix is optional; a bare token is accepted as-is.
fn token_from_header(value: &str) -> &str {
    value.strip_prefix("Bearer ").unwrap_or(value)
}

/// Middleware for protected routes. Rejects the request with 401 unless the
/// `Authorization` header carries a valid token.
pub async fn require_token(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiFailure> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| AuthError::InvalidToken))
        .transpose()
        .map_err(auth_error_to_api_error)?
        .filter(|value| !value.is_empty())
        .ok_or_else(|| auth_error_to_api_error(AuthError::MissingToken))?;

    let claims = state
        .tokens
        .verify(token_from_header(header))
        .map_err(auth_error_to_api_error)?;

    req.extensions_mut().insert(AuthenticatedUser {
        email: claims.email,
    });
    Ok(next.run(req).await)
}

fn required(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

/// POST /api/signup - Register and receive a session token
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiFailure> {
    register(&state, json_body(payload)?)
        .await
        .map(|body| (StatusCode::CREATED, Json(body)))
        .map_err(auth_error_to_api_error)
}

/// POST /api/login - Exchange credentials for a session token
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiFailure> {
    authenticate(&state, json_body(payload)?)
        .await
        .map(Json)
        .map_err(auth_error_to_api_error)
}

async fn register(state: &AppState, req: SignupRequest) -> Result<AuthResponse, AuthError> {
    let (Some(name), Some(email), Some(password)) = (
        required(req.name),
        required(req.email),
        required(req.password),
    ) else {
        return Err(AuthError::MissingSignupFields);
    };

    if state.db.find_user_by_email(&email).await?.is_some() {
        return Err(AuthError::EmailTaken);
    }

    let password_hash = hash_password_blocking(password).await?;
    let user = state
        .db
        .create_user(NewUser {
            name,
            email,
            password_hash,
        })
        .await?;

    Ok(AuthResponse {
        message: "Signup successful".to_string(),
        token: state.tokens.issue(&user.email)?,
        user: user.profile(),
    })
}

async fn authenticate(state: &AppState, req: LoginRequest) -> Result<AuthResponse, AuthError> {
    let (Some(email), Some(password)) = (required(req.email), required(req.password)) else {
        return Err(AuthError::MissingLoginFields);
    };

    let user = state
        .db
        .find_user_by_email(&email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;
    if !verify_password_blocking(password, user.password_hash.clone()).await? {
        return Err(AuthError::InvalidCredentials);
    }

    tracing::debug!("login: {}", user.email);
    Ok(AuthResponse {
        message: "Login successful".to_string(),
        token: state.tokens.issue(&user.email)?,
        user: user.profile(),
    })
}
