// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use log::error;
use tabled::{
    settings::{object::Segment, Alignment, Modify, Style},
    Table,
};

use crate::{
    error::{self, Result},
    router::{self, Resolution, Route},
    tips::{self, SafetyTip},
};

use super::App;

/// Browse the safety tips. Only available to signed-in citizens.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// Only list tips in this category.
    #[arg(long, short)]
    category: Option<String>,

    /// Print the full text of the tip with this ID.
    #[arg(long, short, conflicts_with = "category")]
    id: Option<String>,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, app: &mut App) -> Result<()> {
        let resolution = router::resolve(Route::UserSafetyTips.path(), app.gateway.session());
        if resolution != Resolution::Render(Route::UserSafetyTips) {
            error!(
                "Safety tips are only available to signed-in citizens; sign in at {}",
                Route::Login
            );
            return Err(error::Error::Command);
        }

        if let Some(id) = self.id {
            let Some(tip) = tips::find(&id) else {
                error!("No safety tip with ID {}", id);
                return Err(error::Error::Command);
            };
            println!("{} {} ({})\n\n{}", tip.icon, tip.title, tip.category, tip.content);
            return Ok(());
        }

        let selected: Vec<&SafetyTip> = match &self.category {
            Some(category) => tips::in_category(category).collect(),
            None => tips::all().iter().collect(),
        };
        if selected.is_empty() {
            error!(
                "No safety tips in that category; try one of: {}",
                tips::categories().join(", ")
            );
            return Err(error::Error::Command);
        }

        println!(
            "{}",
            Table::new(selected)
                .with(Style::rounded())
                .with(Modify::new(Segment::new(1.., 2..=3)).with(Alignment::left()))
        );
        Ok(())
    }
}
