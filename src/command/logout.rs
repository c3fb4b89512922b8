// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;

use crate::{auth::Stage, error::Result};

use super::App;

/// Sign out and forget the stored session.
#[derive(Debug, Parser)]
pub(crate) struct Command {}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, app: &mut App) -> Result<()> {
        let signed_in = app.gateway.stage() == &Stage::Authenticated;
        let next = app.gateway.logout().await?;
        if signed_in {
            println!("Signed out. Continue at {next}");
        } else {
            println!("Not signed in. Continue at {next}");
        }
        Ok(())
    }
}
