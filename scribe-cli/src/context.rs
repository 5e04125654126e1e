//! Shared state for one command invocation.

use anyhow::{Result, bail};
use scribe::guards::{Guard, GuardOutcome, Route};
use scribe::{AuthState, AuthStore, ScribeHttpClient};

use crate::config::ConfigToml;

pub struct Context {
    pub client: ScribeHttpClient,
}

impl Context {
    /// Rehydrate the persisted session and build the client.
    pub async fn from_config(config: &ConfigToml) -> Result<Self> {
        let store = match &config.session.path {
            Some(path) => AuthStore::from_file(path),
            None => AuthStore::default_file()?,
        };
        let state = store.rehydrate().await;
        tracing::debug!(signed_in = state.is_authenticated, "Rehydrated session");

        let mut builder = ScribeHttpClient::builder()
            .base_url(config.api.base_url.as_str())
            .user_agent_extra(concat!("scribe-cli@", env!("CARGO_PKG_VERSION")))
            .store(store);
        if let Some(timeout) = config.api.timeout() {
            builder = builder.request_timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Refuse the command unless `guard` lets the current session through.
    pub async fn require(&self, guard: Guard) -> Result<AuthState> {
        let state = self.client.store().state().await;
        check(guard, &state)?;
        Ok(state)
    }
}

fn check(guard: Guard, state: &AuthState) -> Result<()> {
    match guard.check(state) {
        GuardOutcome::Allow => Ok(()),
        GuardOutcome::Pending => bail!("Session is still loading"),
        GuardOutcome::Redirect(Route::Login) => {
            bail!("You need to be signed in. Run `scribe login <email>` first.")
        }
        GuardOutcome::Redirect(Route::Home) => bail!("Admin access required"),
    }
}
