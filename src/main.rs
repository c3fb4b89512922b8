// SPDX-FileCopyrightText: 2022-2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
#![deny(elided_lifetimes_in_paths)]
#![warn(
    rust_2018_idioms,
    future_incompatible,
    unused,
    unused_lifetimes,
    unused_qualifications,
    unused_results,
    anonymous_parameters,
    deprecated_in_future,
    elided_lifetimes_in_paths,
    explicit_outlives_requirements,
    keyword_idents,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::unseparated_literal_suffix,
    clippy::decimal_literal_representation,
    clippy::single_char_lifetime_names,
    clippy::fallible_impl_from,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::wildcard_enum_match_arm,
    clippy::deref_by_slicing,
    clippy::default_numeric_fallback,
    clippy::shadow_reuse,
    clippy::clone_on_ref_ptr,
    clippy::todo,
    clippy::string_add,
    clippy::use_debug,
    clippy::future_not_send
)]
#![cfg_attr(not(test), warn(clippy::panic_in_result_fn))]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod auth;
mod command;
mod error;
mod latency;
mod metadata;
mod nav;
mod prompt;
mod router;
mod session;
mod storage;
mod tips;

use std::{path::PathBuf, process};

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use command::Command as _;
use error::Result;
use log::{debug, error, warn};
use tokio::signal;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Subcommand)]
enum Command {
    Login(command::login::Citizen),
    PoliceLogin(command::login::Officer),
    Logout(command::logout::Command),
    Status(command::status::Command),
    Open(command::open::Command),
    Tips(command::tips::Command),
}

#[async_trait]
impl command::Command for Command {
    async fn execute(self, app: &mut command::App) -> Result<()> {
        match self {
            Self::Login(cmd) => cmd.execute(app).await,
            Self::PoliceLogin(cmd) => cmd.execute(app).await,
            Self::Logout(cmd) => cmd.execute(app).await,
            Self::Status(cmd) => cmd.execute(app).await,
            Self::Open(cmd) => cmd.execute(app).await,
            Self::Tips(cmd) => cmd.execute(app).await,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// The directory holding the stored session. Defaults to the per-user
    /// data directory.
    #[arg(long, env = "SAFIRA_DATA_DIR", value_hint = clap::ValueHint::DirPath)]
    data_dir: Option<PathBuf>,

    /// Keep the session in memory only. Nothing survives this invocation.
    #[arg(long)]
    no_persist: bool,

    /// Skip the simulated network round trips.
    #[arg(long)]
    instant: bool,

    /// The path to the Pinentry program to use when asking for the
    /// verification code.
    #[arg(long, value_hint = clap::ValueHint::ExecutablePath)]
    pinentry_program: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

fn get_session_storage(args: &Args) -> command::DurableStorage {
    if !args.no_persist {
        let file_storage = match &args.data_dir {
            Some(dir) => Some(storage::File::in_dir(dir, metadata::SESSION_KEY)),
            None => storage::File::new(metadata::SESSION_KEY),
        };

        if let Some(file_storage) = file_storage {
            debug!("Keeping the session in {}", file_storage.path().display());
            return Box::new(file_storage);
        }

        warn!("We need to fall back to in-memory session storage because there is no data directory for this user");
    }

    Box::new(storage::Memory::<session::Identity>::new())
}

async fn run(args: Args) -> Result<()> {
    let prompts: Vec<Box<dyn prompt::Prompt>> = vec![
        Box::new(args.pinentry_program.clone().map_or_else(
            prompt::PinentryPrompt::new,
            prompt::PinentryPrompt::new_with_executable,
        )),
        Box::new(prompt::RpasswordPrompt),
    ];

    let mut store = session::Store::new(get_session_storage(&args));
    let _ = store.restore().await?;

    let latency = if args.instant {
        latency::Latency::INSTANT
    } else {
        latency::Latency::default()
    };

    let shutdown = CancellationToken::new();
    let interrupt = {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if signal::ctrl_c().await.is_ok() {
                shutdown.cancel();
            }
        })
    };

    let mut app = command::App {
        gateway: auth::Gateway::new(store, storage::Memory::new(), latency),
        prompt: Box::new(prompts),
        shutdown,
    };

    let result = command::Command::execute(args.command, &mut app).await;
    interrupt.abort();

    result
}

#[tokio::main]
async fn main() {
    let logger_env = env_logger::Env::new()
        .filter_or("SAFIRA_LOG", "warn")
        .write_style("SAFIRA_LOG_STYLE");
    env_logger::Builder::from_env(logger_env).init();

    if let Err(e) = run(Args::parse()).await {
        error!("We encountered an error: {}", e);
        process::exit(1);
    };
}
