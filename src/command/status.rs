// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use tabled::{settings::Style, Table, Tabled};

use crate::{error::Result, session::Session};

use super::App;

/// Show who is signed in.
#[derive(Debug, Parser)]
pub(crate) struct Command {}

#[derive(Clone, Debug, Tabled)]
struct Row {
    #[tabled(rename = "Signed In")]
    signed_in: &'static str,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Phone / Badge")]
    identifier: String,
    #[tabled(rename = "Name")]
    display_name: String,
    #[tabled(rename = "Storage")]
    storage: &'static str,
}

impl Row {
    fn new(session: &Session, persistent: bool) -> Self {
        Self {
            signed_in: if session.is_authenticated() {
                "yes"
            } else {
                "no"
            },
            role: session.role().map(|r| r.to_string()).unwrap_or_default(),
            identifier: session.identifier().unwrap_or_default().to_owned(),
            display_name: session.display_name().unwrap_or_default().to_owned(),
            storage: if persistent { "durable" } else { "in-memory" },
        }
    }
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, app: &mut App) -> Result<()> {
        let row = Row::new(app.gateway.session(), app.gateway.is_persistent());
        println!("{}", Table::new([row]).with(Style::rounded()));
        Ok(())
    }
}
