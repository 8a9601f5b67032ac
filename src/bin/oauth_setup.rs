//! Carbon Voice OAuth2 helper.
//!
//! Obtains an API key through the OAuth2 authorization-code flow: prints
//! the authorization URL for the user, captures the redirect on a local
//! one-shot listener, exchanges the code for an access token, and saves it
//! to the dotenv credential store.
//!
//! Foreground utility: the process exits once the flow has succeeded or
//! failed. A failed flow is not retried; run the binary again.

use anyhow::Context;
use carbon_agent::credentials::{
    CredentialSource, CARBON_VOICE_API_KEY, CARBON_VOICE_CLIENT_ID, CARBON_VOICE_CLIENT_SECRET,
};
use carbon_agent::oauth::{OauthFlow, OauthSettings, DEFAULT_SCOPE};
use carbon_agent::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "carbon_agent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Fail before binding anything if the client credentials are absent.
    let resolved = CredentialSource::Env
        .require(&[CARBON_VOICE_CLIENT_ID, CARBON_VOICE_CLIENT_SECRET])
        .context("OAuth2 client credentials are required to start the flow")?;

    let settings = OauthSettings {
        client_id: resolved[CARBON_VOICE_CLIENT_ID].clone(),
        client_secret: resolved[CARBON_VOICE_CLIENT_SECRET].clone(),
        redirect_uri: config.oauth.redirect_uri.clone(),
        authorization_endpoint: config.oauth.authorization_endpoint.clone(),
        token_endpoint: config.oauth.token_endpoint.clone(),
        scope: DEFAULT_SCOPE.to_string(),
    };

    let mut flow = OauthFlow::new(settings);

    println!("Carbon Voice OAuth2 helper");
    println!("Open this URL in your browser to authorize:");
    println!("  {}", flow.authorization_url());

    let listener = flow.bind().await?;
    println!(
        "Waiting for the authorization callback on {} ...",
        listener.local_addr()?
    );

    let _token = flow.run(listener, &config.env_file).await?;
    println!(
        "Access token saved to {} as {}",
        config.env_file.display(),
        CARBON_VOICE_API_KEY
    );

    Ok(())
}
