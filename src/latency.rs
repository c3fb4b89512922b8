// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! Simulated network round trips.
//!
//! There is no backend behind the login screens, so each submission waits a
//! fixed time before taking effect. The wait belongs to the view that started
//! it: once that view is torn down the wait ends with
//! [`Error::Cancelled`](crate::error::Error::Cancelled) and the caller must not
//! apply its effect.

use std::time::Duration;

use log::debug;
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::{
    error::{Error, Result},
    metadata,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Latency {
    pub(crate) login: Duration,
    pub(crate) verify: Duration,
}

impl Latency {
    pub(crate) const INSTANT: Self = Self {
        login: Duration::ZERO,
        verify: Duration::ZERO,
    };
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            login: metadata::LOGIN_LATENCY,
            verify: metadata::VERIFY_LATENCY,
        }
    }
}

/// The lifetime of one mounted view. Dropping the scope tears the view down.
pub(crate) struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    /// Opens a scope that also ends when `parent` is cancelled.
    pub(crate) fn new(parent: &CancellationToken) -> Self {
        Self {
            token: parent.child_token(),
        }
    }

    pub(crate) fn teardown(&self) {
        self.token.cancel();
    }

    pub(crate) fn is_torn_down(&self) -> bool {
        self.token.is_cancelled()
    }

    pub(crate) async fn delay(&self, duration: Duration) -> Result<()> {
        tokio::select! {
            biased;
            () = self.token.cancelled() => {
                debug!("View torn down before its pending call completed");
                Err(Error::Cancelled)
            }
            () = time::sleep(duration) => Ok(()),
        }
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.teardown();
    }
}
