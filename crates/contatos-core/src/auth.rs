//! Email/password authentication against the Identity Toolkit REST API.
//!
//! Sign-in exchanges credentials for a [`Session`]; refresh exchanges the
//! session's refresh token for a new id token. Backend failures are mapped to
//! a small, user-facing [`AuthError`] taxonomy. Tokens are never logged.

use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::BackendSettings;
use crate::session::{Session, compute_expires_at};

/// Fallback lifetime when the backend omits or garbles `expiresIn`.
const DEFAULT_EXPIRES_IN_SECS: u64 = 3600;

/// Sign-in failure, already classified for display.
///
/// `Display` yields the user-facing message; [`AuthError::detail`] keeps the
/// raw backend phrase for logs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Formato de email inválido.")]
    InvalidEmail,

    #[error("Usuário não encontrado.")]
    UserNotFound,

    #[error("Senha incorreta.")]
    WrongPassword,

    /// Anything unrecognized, transport failures included.
    #[error("Erro ao realizar login: Email ou senha inválido")]
    Other(String),
}

impl AuthError {
    /// Classifies a backend error phrase or REST error code.
    ///
    /// Both the localized SDK phrases and the REST codes are recognized.
    /// Unknown input always maps to [`AuthError::Other`].
    pub fn from_backend_message(message: &str) -> Self {
        // REST codes may carry a suffix: "TOO_MANY_ATTEMPTS_TRY_LATER : Access ..."
        let code = message.split(" : ").next().unwrap_or_default().trim();
        match code {
            "O formato do email está incorreto." | "INVALID_EMAIL" => Self::InvalidEmail,
            "Usuário não encontrado. O usuário pode ter sido excluído."
            | "EMAIL_NOT_FOUND"
            | "USER_DISABLED" => Self::UserNotFound,
            "Senha incorreta." | "INVALID_PASSWORD" => Self::WrongPassword,
            _ => Self::Other(message.trim().to_string()),
        }
    }

    /// Message shown to the user. Never blank, never the raw backend text.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Raw detail for logging.
    pub fn detail(&self) -> &str {
        match self {
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::UserNotFound => "EMAIL_NOT_FOUND",
            Self::WrongPassword => "INVALID_PASSWORD",
            Self::Other(detail) => detail,
        }
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Other(format!("Request timed out: {err}"))
        } else {
            Self::Other(format!("Request failed: {err}"))
        }
    }
}

/// Client for the sign-in and token refresh endpoints.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    api_key: String,
    auth_url: String,
    token_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    id_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<String>,
    local_id: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<String>,
    user_id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl AuthClient {
    pub fn new(
        http: reqwest::Client,
        api_key: impl Into<String>,
        auth_url: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            auth_url: auth_url.into(),
            token_url: token_url.into(),
        }
    }

    pub fn from_settings(http: reqwest::Client, settings: &BackendSettings) -> Self {
        Self::new(
            http,
            settings.api_key.clone(),
            settings.auth_url.clone(),
            settings.token_url.clone(),
        )
    }

    /// Signs in with email and password.
    ///
    /// Fields are sent exactly as typed; no client-side validation.
    ///
    /// # Errors
    /// Returns a classified [`AuthError`] on any failure.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let url = format!("{}/v1/accounts:signInWithPassword", self.auth_url);
        debug!("Sending sign-in request");

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&json!({
                "email": email,
                "password": password,
                "returnSecureToken": true,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let err = classify_error_body(&body);
            warn!(%status, detail = err.detail(), "Sign-in failed");
            return Err(err);
        }

        let data: SignInResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Other(format!("Failed to parse sign-in response: {e}")))?;

        info!(user_id = %data.local_id, "Signed in");
        Ok(Session {
            id_token: data.id_token,
            refresh_token: data.refresh_token,
            user_id: data.local_id,
            email: data.email.unwrap_or_else(|| email.to_string()),
            expires_at: compute_expires_at(parse_expires_in(data.expires_in.as_deref())),
        })
    }

    /// Exchanges the session's refresh token for a fresh id token.
    ///
    /// # Errors
    /// Returns [`AuthError::Other`] (or a classified error) on failure.
    pub async fn refresh(&self, session: &Session) -> Result<Session, AuthError> {
        let url = format!("{}/v1/token", self.token_url);
        debug!(user_id = %session.user_id, "Refreshing id token");

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", session.refresh_token.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let err = classify_error_body(&body);
            warn!(%status, detail = err.detail(), "Token refresh failed");
            return Err(err);
        }

        let data: RefreshResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Other(format!("Failed to parse token response: {e}")))?;

        Ok(Session {
            id_token: data.id_token,
            refresh_token: data.refresh_token,
            user_id: data.user_id,
            email: session.email.clone(),
            expires_at: compute_expires_at(parse_expires_in(data.expires_in.as_deref())),
        })
    }
}

fn classify_error_body(body: &str) -> AuthError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope {
            error: ErrorBody {
                message: Some(message),
            },
        }) => AuthError::from_backend_message(&message),
        _ => AuthError::Other(body.trim().to_string()),
    }
}

fn parse_expires_in(raw: Option<&str>) -> u64 {
    raw.and_then(|value| value.trim().parse().ok())
        .unwrap_or(DEFAULT_EXPIRES_IN_SECS)
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_partial_json, body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer) -> AuthClient {
        AuthClient::new(
            reqwest::Client::new(),
            "test-key",
            server.uri(),
            server.uri(),
        )
    }

    fn error_response(message: &str) -> ResponseTemplate {
        ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 400, "message": message, "errors": [] }
        }))
    }

    #[test]
    fn test_known_phrases_are_mapped() {
        assert_eq!(
            AuthError::from_backend_message("O formato do email está incorreto."),
            AuthError::InvalidEmail
        );
        assert_eq!(
            AuthError::from_backend_message(
                "Usuário não encontrado. O usuário pode ter sido excluído."
            ),
            AuthError::UserNotFound
        );
        assert_eq!(
            AuthError::from_backend_message("Senha incorreta."),
            AuthError::WrongPassword
        );
        assert_eq!(
            AuthError::InvalidEmail.user_message(),
            "Formato de email inválido."
        );
        assert_eq!(AuthError::UserNotFound.user_message(), "Usuário não encontrado.");
        assert_eq!(AuthError::WrongPassword.user_message(), "Senha incorreta.");
    }

    #[test]
    fn test_rest_codes_are_mapped() {
        assert_eq!(
            AuthError::from_backend_message("INVALID_EMAIL"),
            AuthError::InvalidEmail
        );
        assert_eq!(
            AuthError::from_backend_message("EMAIL_NOT_FOUND"),
            AuthError::UserNotFound
        );
        assert_eq!(
            AuthError::from_backend_message("INVALID_PASSWORD"),
            AuthError::WrongPassword
        );
    }

    #[test]
    fn test_unknown_phrase_yields_generic_fallback() {
        for raw in ["INVALID_LOGIN_CREDENTIALS", "", "   ", "rede indisponível"] {
            let err = AuthError::from_backend_message(raw);
            assert!(matches!(err, AuthError::Other(_)));
            let message = err.user_message();
            assert_eq!(message, "Erro ao realizar login: Email ou senha inválido");
            if !raw.trim().is_empty() {
                assert!(!message.contains(raw));
            }
        }
    }

    #[test]
    fn test_code_suffix_is_ignored() {
        let err = AuthError::from_backend_message(
            "TOO_MANY_ATTEMPTS_TRY_LATER : Access to this account has been temporarily disabled",
        );
        assert!(matches!(err, AuthError::Other(_)));
        assert_eq!(
            AuthError::from_backend_message("USER_DISABLED : The user account has been disabled"),
            AuthError::UserNotFound
        );
    }

    #[tokio::test]
    async fn test_sign_in_success_builds_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .and(query_param("key", "test-key"))
            .and(body_partial_json(json!({
                "email": "ana@example.com",
                "password": "segredo",
                "returnSecureToken": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "kind": "identitytoolkit#VerifyPasswordResponse",
                "localId": "uid-1",
                "email": "ana@example.com",
                "idToken": "id-1",
                "refreshToken": "refresh-1",
                "expiresIn": "3600",
                "registered": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let session = client(&server)
            .sign_in("ana@example.com", "segredo")
            .await
            .unwrap();

        assert_eq!(session.id_token, "id-1");
        assert_eq!(session.refresh_token, "refresh-1");
        assert_eq!(session.user_id, "uid-1");
        assert_eq!(session.email, "ana@example.com");
        assert!(!session.is_expired());
    }

    #[tokio::test]
    async fn test_sign_in_maps_backend_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .respond_with(error_response("INVALID_PASSWORD"))
            .mount(&server)
            .await;

        let err = client(&server)
            .sign_in("ana@example.com", "errada")
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::WrongPassword);
    }

    #[tokio::test]
    async fn test_sign_in_unparseable_error_is_generic() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let err = client(&server).sign_in("a", "b").await.unwrap_err();
        assert_eq!(err, AuthError::Other("Bad Gateway".to_string()));
        assert_eq!(
            err.user_message(),
            "Erro ao realizar login: Email ou senha inválido"
        );
    }

    #[tokio::test]
    async fn test_sign_in_transport_error_is_generic() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let client = AuthClient::new(reqwest::Client::new(), "k", uri.clone(), uri);
        let err = client.sign_in("a", "b").await.unwrap_err();
        assert!(matches!(err, AuthError::Other(_)));
    }

    #[tokio::test]
    async fn test_refresh_exchanges_refresh_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/token"))
            .and(query_param("key", "test-key"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=refresh-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "id-2",
                "expires_in": "3600",
                "token_type": "Bearer",
                "refresh_token": "refresh-2",
                "id_token": "id-2",
                "user_id": "uid-1",
                "project_id": "123"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let old = Session {
            id_token: "id-1".to_string(),
            refresh_token: "refresh-1".to_string(),
            user_id: "uid-1".to_string(),
            email: "ana@example.com".to_string(),
            expires_at: 0,
        };
        let fresh = client(&server).refresh(&old).await.unwrap();

        assert_eq!(fresh.id_token, "id-2");
        assert_eq!(fresh.refresh_token, "refresh-2");
        assert_eq!(fresh.email, "ana@example.com");
        assert!(!fresh.is_expired());
    }

    #[test]
    fn test_parse_expires_in_falls_back() {
        assert_eq!(parse_expires_in(Some("120")), 120);
        assert_eq!(parse_expires_in(Some("soon")), DEFAULT_EXPIRES_IN_SECS);
        assert_eq!(parse_expires_in(None), DEFAULT_EXPIRES_IN_SECS);
    }
}
