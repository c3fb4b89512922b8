// SPDX-FileCopyrightText: 2022-2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::{
    auth::{Gateway, PendingIdentity},
    error::Result,
    latency::ViewScope,
    prompt::Prompt,
    session::Identity,
    storage::{Memory, Storage},
};

pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod open;
pub(crate) mod status;
pub(crate) mod tips;

pub(crate) type DurableStorage = Box<dyn Storage<Identity>>;
/// One process is one tab, so the pending identity only lives in memory.
pub(crate) type TransientStorage = Memory<PendingIdentity>;

/// Everything a command can reach, assembled once in `main`.
pub(crate) struct App {
    pub(crate) gateway: Gateway<DurableStorage, TransientStorage>,
    pub(crate) prompt: Box<dyn Prompt>,
    pub(crate) shutdown: CancellationToken,
}

impl App {
    /// Mounts a view. Its pending calls end when it is dropped or the process
    /// is interrupted.
    pub(crate) fn mount(&self) -> ViewScope {
        ViewScope::new(&self.shutdown)
    }
}

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, app: &mut App) -> Result<()>;
}
