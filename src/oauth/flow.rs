//! Authorization-code flow: build the authorization URL, capture the
//! redirect, exchange the code, persist the token.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use super::listener::CallbackListener;
use crate::credentials::CARBON_VOICE_API_KEY;
use crate::envfile::{self, EnvFileError};

/// Scopes requested during authorization.
pub const DEFAULT_SCOPE: &str = "read,write";

/// Bound on how long the token exchange may block.
const EXCHANGE_TIMEOUT: Duration = Duration::from_secs(30);

const SUCCESS_PAGE: &str = "<html><body><h1>Success!</h1><p>Your Carbon Voice API key has been saved.</p><p>You can close this window.</p></body></html>";
const NO_CODE_PAGE: &str =
    "<html><body><h1>Error</h1><p>No authorization code received.</p></body></html>";
const EXCHANGE_FAILED_PAGE: &str = "<html><body><h1>Error</h1><p>Failed to exchange authorization code for access token.</p></body></html>";
const PERSIST_FAILED_PAGE: &str =
    "<html><body><h1>Error</h1><p>Failed to save the access token.</p></body></html>";

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Redirect URI {uri} is not a valid URL: {source}")]
    InvalidRedirectUri {
        uri: String,
        source: url::ParseError,
    },

    #[error("Failed to bind callback listener on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("Callback listener error: {0}")]
    Callback(std::io::Error),

    #[error("Callback did not contain an authorization code")]
    MissingCode,

    #[error("Token exchange request failed: {0}")]
    Exchange(reqwest::Error),

    #[error("Token endpoint returned HTTP {status}: {body}")]
    ExchangeStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Token response did not contain an access_token")]
    MissingAccessToken,

    #[error("Failed to persist access token: {0}")]
    Persistence(#[from] EnvFileError),
}

/// Flow progress. Terminal states are `Succeeded` and `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    AwaitingRedirect,
    ExchangingCode,
    Succeeded,
    Failed,
}

/// Inputs to one flow invocation.
///
/// Client credentials must be validated as present before constructing the
/// settings; see [`crate::credentials::CredentialSource::require`].
#[derive(Debug, Clone)]
pub struct OauthSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    pub scope: String,
}

/// Shape of the token endpoint's JSON response. Extra fields are ignored.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// A single OAuth2 authorization-code flow invocation.
pub struct OauthFlow {
    settings: OauthSettings,
    http: reqwest::Client,
    state: FlowState,
}

impl OauthFlow {
    pub fn new(settings: OauthSettings) -> Self {
        let http = reqwest::Client::builder()
            .timeout(EXCHANGE_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            settings,
            http,
            state: FlowState::AwaitingRedirect,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// The URL the user must open to authorize the client.
    pub fn authorization_url(&self) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}",
            self.settings.authorization_endpoint,
            self.settings.client_id,
            urlencoding::encode(&self.settings.redirect_uri),
            self.settings.scope,
        )
    }

    /// Bind the callback listener on the redirect URI's port.
    pub async fn bind(&self) -> Result<CallbackListener, FlowError> {
        let addr = self.callback_addr()?;
        CallbackListener::bind(addr)
            .await
            .map_err(|source| FlowError::Bind { addr, source })
    }

    fn callback_addr(&self) -> Result<SocketAddr, FlowError> {
        let url = url::Url::parse(&self.settings.redirect_uri).map_err(|source| {
            FlowError::InvalidRedirectUri {
                uri: self.settings.redirect_uri.clone(),
                source,
            }
        })?;
        let port = url.port_or_known_default().unwrap_or(3000);
        Ok(SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), port))
    }

    /// Wait for the one callback, exchange the code, persist the token.
    ///
    /// Returns the access token on success. Every failure is terminal for
    /// this invocation: the browser gets an error page, the state moves to
    /// `Failed`, and the credential store is left unmodified (except for
    /// the persistence-failure case, where the exchange already happened
    /// and the token is logged so it is not lost).
    pub async fn run(
        &mut self,
        listener: CallbackListener,
        store: &Path,
    ) -> Result<String, FlowError> {
        self.state = FlowState::AwaitingRedirect;
        let callback = listener.accept_one().await.map_err(FlowError::Callback)?;

        let code = match callback.query_param("code") {
            Some(code) if !code.is_empty() => code.to_string(),
            _ => {
                self.state = FlowState::Failed;
                error!("OAuth callback did not contain an authorization code");
                let _ = callback.respond(NO_CODE_PAGE).await;
                return Err(FlowError::MissingCode);
            }
        };

        info!("Authorization code received, exchanging for access token");
        self.state = FlowState::ExchangingCode;

        let token = match self.exchange(&code).await {
            Ok(token) => token,
            Err(e) => {
                self.state = FlowState::Failed;
                error!("Token exchange failed: {}", e);
                let _ = callback.respond(EXCHANGE_FAILED_PAGE).await;
                return Err(e);
            }
        };

        if let Err(e) = envfile::upsert(store, CARBON_VOICE_API_KEY, &token) {
            self.state = FlowState::Failed;
            // The exchange already consumed the code; print the token so a
            // failed write does not lose it.
            error!(
                "Failed to persist access token to {}: {}. Token: {}",
                store.display(),
                e,
                token
            );
            let _ = callback.respond(PERSIST_FAILED_PAGE).await;
            return Err(FlowError::Persistence(e));
        }

        self.state = FlowState::Succeeded;
        info!(
            "Access token saved to {} as {}",
            store.display(),
            CARBON_VOICE_API_KEY
        );
        let _ = callback.respond(SUCCESS_PAGE).await;
        Ok(token)
    }

    /// Issue the one code-for-token POST to the token endpoint.
    async fn exchange(&self, code: &str) -> Result<String, FlowError> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.settings.redirect_uri.as_str()),
            ("client_id", self.settings.client_id.as_str()),
            ("client_secret", self.settings.client_secret.as_str()),
        ];

        let response = self
            .http
            .post(&self.settings.token_endpoint)
            .form(&params)
            .send()
            .await
            .map_err(FlowError::Exchange)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FlowError::ExchangeStatus { status, body });
        }

        let token: TokenResponse = response.json().await.map_err(FlowError::Exchange)?;
        match token.access_token {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(FlowError::MissingAccessToken),
        }
    }
}
