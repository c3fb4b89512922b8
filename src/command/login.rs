// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use log::{error, info, warn};
use secrecy::SecretString;

use crate::{
    auth::Credentials,
    error::{self, Error, Result},
    prompt::RequestBuilder,
};

use super::App;

/// Sign in as a citizen with your name and phone number.
#[derive(Debug, Parser)]
pub(crate) struct Citizen {
    /// Your name.
    #[arg(long)]
    name: String,

    /// Your phone number. Only digits are kept, and at least ten are needed.
    #[arg(long)]
    phone: String,

    /// The verification code. When omitted you are prompted for it until it
    /// is accepted.
    #[arg(long)]
    code: Option<String>,
}

/// Sign in to the Pink Police portal with your name and badge number.
#[derive(Debug, Parser)]
pub(crate) struct Officer {
    /// The officer's name.
    #[arg(long)]
    name: String,

    /// The officer's badge number.
    #[arg(long)]
    badge: String,

    /// The verification code. When omitted you are prompted for it until it
    /// is accepted.
    #[arg(long)]
    code: Option<String>,
}

#[async_trait]
impl super::Command for Citizen {
    async fn execute(self, app: &mut App) -> Result<()> {
        let credentials = Credentials::Citizen {
            name: self.name,
            phone: self.phone,
        };
        sign_in(app, credentials, self.code).await
    }
}

#[async_trait]
impl super::Command for Officer {
    async fn execute(self, app: &mut App) -> Result<()> {
        let credentials = Credentials::Officer {
            name: self.name,
            badge: self.badge,
        };
        sign_in(app, credentials, self.code).await
    }
}

async fn sign_in(app: &mut App, credentials: Credentials, code: Option<String>) -> Result<()> {
    let next = {
        let view = app.mount();
        app.gateway.submit(&view, &credentials).await?
    };
    info!("Continuing to {}", next);

    let view = app.mount();
    let pending = app.gateway.open_code_screen().await?;
    info!(
        "Verifying {} sign-in for {}",
        pending.role(),
        pending.identifier()
    );

    let destination = match code {
        Some(code) => {
            let code = SecretString::new(code);
            app.gateway.verify(&view, &code).await?
        }
        None => {
            let mut last_error: Option<String> = None;
            loop {
                if view.is_torn_down() {
                    return Err(Error::Cancelled);
                }

                let mut req = RequestBuilder::new(pending.identifier());
                if let Some(e) = last_error.take() {
                    req = req.with_error(&e);
                }

                let Some(code) = app.prompt.prompt(req.into_request()).await? else {
                    error!("No way to ask for the verification code; pass it with --code");
                    return Err(error::Password::NoPrompt.into());
                };

                // An interrupt during the prompt discards whatever was typed.
                if view.is_torn_down() {
                    return Err(Error::Cancelled);
                }

                match app.gateway.verify(&view, &code).await {
                    Ok(route) => break route,
                    Err(e @ (Error::Verification | Error::Validation(_))) => {
                        warn!("{}", e);
                        last_error = Some(e.to_string());
                    }
                    Err(e) => return Err(e),
                }
            }
        }
    };

    println!(
        "Welcome, {}! Continue at {}",
        pending.display_name(),
        destination
    );
    Ok(())
}
