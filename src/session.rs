// SPDX-FileCopyrightText: 2022-2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    router::Route,
    storage::Storage,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub(crate) enum Role {
    #[serde(rename = "user")]
    Citizen,
    #[serde(rename = "police")]
    Officer,
}

impl Role {
    pub(crate) const fn login_route(self) -> Route {
        match self {
            Self::Citizen => Route::Login,
            Self::Officer => Route::PoliceLogin,
        }
    }

    pub(crate) const fn dashboard_route(self) -> Route {
        match self {
            Self::Citizen => Route::UserDashboard,
            Self::Officer => Route::PoliceDashboard,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Citizen => f.write_str("Citizen"),
            Self::Officer => f.write_str("Officer"),
        }
    }
}

/// Who is signed in. This is also the durable record's wire format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Identity {
    #[serde(rename = "userType")]
    role: Role,
    /// A phone number for citizens, a badge number for officers.
    #[serde(rename = "userPhone")]
    identifier: String,
    #[serde(rename = "userName")]
    display_name: String,
}

impl Identity {
    pub(crate) fn new(identifier: String, display_name: String, role: Role) -> Self {
        Self {
            role,
            identifier,
            display_name,
        }
    }

    pub(crate) const fn role(&self) -> Role {
        self.role
    }

    pub(crate) fn identifier(&self) -> &str {
        &self.identifier
    }

    pub(crate) fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// The current authentication state. An authenticated session always carries
/// a complete [`Identity`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Session {
    identity: Option<Identity>,
}

impl Session {
    pub(crate) const fn empty() -> Self {
        Self { identity: None }
    }

    pub(crate) const fn authenticated(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    pub(crate) const fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub(crate) fn role(&self) -> Option<Role> {
        self.identity.as_ref().map(Identity::role)
    }

    pub(crate) fn identifier(&self) -> Option<&str> {
        self.identity.as_ref().map(Identity::identifier)
    }

    pub(crate) fn display_name(&self) -> Option<&str> {
        self.identity.as_ref().map(Identity::display_name)
    }
}

/// Owns the session and keeps its durable copy in step with it.
pub(crate) struct Store<S> {
    storage: S,
    current: Session,
}

impl<S: Storage<Identity>> Store<S> {
    pub(crate) const fn new(storage: S) -> Self {
        Self {
            storage,
            current: Session::empty(),
        }
    }

    /// Loads the durable record. A record that cannot be parsed is removed and
    /// the session is left empty.
    pub(crate) async fn restore(&mut self) -> Result<&Session> {
        self.current = match self.storage.get().await {
            Ok(Some(identity)) => {
                debug!("Restored session for {}", identity.display_name);
                Session::authenticated(identity)
            }
            Ok(None) => Session::empty(),
            Err(Error::Json(e)) => {
                warn!("Discarding unreadable session record: {}", e);
                self.storage.clear().await?;
                Session::empty()
            }
            Err(e) => return Err(e),
        };
        Ok(&self.current)
    }

    pub(crate) async fn commit(
        &mut self,
        identifier: String,
        display_name: String,
        role: Role,
    ) -> Result<&Session> {
        let identity = Identity::new(identifier, display_name, role);
        self.storage.update(&identity).await?;
        info!("Signed in {} as {}", identity.display_name, role);
        self.current = Session::authenticated(identity);
        Ok(&self.current)
    }

    pub(crate) async fn clear(&mut self) -> Result<()> {
        self.current = Session::empty();
        self.storage.clear().await
    }

    pub(crate) const fn session(&self) -> &Session {
        &self.current
    }

    pub(crate) fn is_persistent(&self) -> bool {
        self.storage.is_persistent()
    }
}
