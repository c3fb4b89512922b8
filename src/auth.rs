// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! The two-step sign-in: credentials first, then a one-time code.

use log::{debug, info, warn};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::{
    error::{self, Error, Result},
    latency::{Latency, ViewScope},
    metadata,
    router::Route,
    session::{self, Identity, Role, Session},
    storage::Storage,
};

/// Credentials that passed validation and are waiting for a code. Serialized
/// with the field names of the transient record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct PendingIdentity {
    #[serde(rename = "phone")]
    identifier: String,
    #[serde(rename = "name")]
    display_name: String,
    #[serde(rename = "type")]
    role: Role,
}

impl PendingIdentity {
    pub(crate) fn identifier(&self) -> &str {
        &self.identifier
    }

    pub(crate) fn display_name(&self) -> &str {
        &self.display_name
    }

    pub(crate) const fn role(&self) -> Role {
        self.role
    }
}

#[derive(Clone, Debug)]
pub(crate) enum Credentials {
    Citizen { name: String, phone: String },
    Officer { name: String, badge: String },
}

impl Credentials {
    /// Checks the form the way the login screens do. The name is checked
    /// first. Phone input keeps only its digits, at most
    /// [`metadata::MIN_PHONE_DIGITS`] of them, and must fill that length.
    pub(crate) fn validate(&self) -> Result<PendingIdentity, error::Validation> {
        let (name, identifier, role) = match self {
            Self::Citizen { name, phone } => {
                let digits: String = phone
                    .chars()
                    .filter(char::is_ascii_digit)
                    .take(metadata::MIN_PHONE_DIGITS)
                    .collect();
                (name, digits, Role::Citizen)
            }
            Self::Officer { name, badge } => (name, badge.trim().to_owned(), Role::Officer),
        };

        let display_name = name.trim();
        if display_name.is_empty() {
            return Err(error::Validation::MissingName);
        }

        match role {
            Role::Citizen if identifier.len() < metadata::MIN_PHONE_DIGITS => Err(
                error::Validation::InvalidPhone(metadata::MIN_PHONE_DIGITS),
            ),
            Role::Officer if identifier.is_empty() => Err(error::Validation::MissingBadge),
            Role::Citizen | Role::Officer => Ok(PendingIdentity {
                identifier,
                display_name: display_name.to_owned(),
                role,
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Stage {
    AwaitingCredentials,
    AwaitingCode(PendingIdentity),
    Authenticated,
}

fn check_code_format(code: &str) -> Result<()> {
    if code.len() == metadata::CODE_LENGTH && code.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(error::Validation::MalformedCode(metadata::CODE_LENGTH).into())
    }
}

fn is_accepted_code(code: &str) -> bool {
    code.as_bytes()
        .ct_eq(metadata::ACCEPTED_CODE.as_bytes())
        .into()
}

/// Drives sign-in and sign-out. `D` holds the durable session record and `T`
/// the pending identity for the lifetime of the current tab.
pub(crate) struct Gateway<D, T> {
    store: session::Store<D>,
    pending: T,
    stage: Stage,
    latency: Latency,
}

impl<D: Storage<Identity>, T: Storage<PendingIdentity>> Gateway<D, T> {
    /// Wraps an already restored store.
    pub(crate) fn new(store: session::Store<D>, pending: T, latency: Latency) -> Self {
        let stage = if store.session().is_authenticated() {
            Stage::Authenticated
        } else {
            Stage::AwaitingCredentials
        };
        Self {
            store,
            pending,
            stage,
            latency,
        }
    }

    pub(crate) const fn stage(&self) -> &Stage {
        &self.stage
    }

    pub(crate) const fn session(&self) -> &Session {
        self.store.session()
    }

    pub(crate) fn is_persistent(&self) -> bool {
        self.store.is_persistent()
    }

    /// Validates the credential form and, after the simulated round trip,
    /// stores the pending identity. Returns where to go next.
    pub(crate) async fn submit(
        &mut self,
        scope: &ViewScope,
        credentials: &Credentials,
    ) -> Result<Route> {
        let pending = credentials.validate().map_err(|e| {
            warn!("Rejected credentials: {}", e);
            Error::from(e)
        })?;

        scope.delay(self.latency.login).await?;

        self.pending.update(&pending).await?;
        debug!(
            "Stored {} for {}",
            metadata::PENDING_KEY,
            pending.identifier
        );
        self.stage = Stage::AwaitingCode(pending);
        Ok(Route::OtpVerification)
    }

    /// Loads the pending identity when the code screen mounts. Without one the
    /// flow starts over.
    pub(crate) async fn open_code_screen(&mut self) -> Result<PendingIdentity> {
        match self.pending.get().await {
            Ok(Some(pending)) => {
                self.stage = Stage::AwaitingCode(pending.clone());
                Ok(pending)
            }
            Ok(None) => {
                warn!("No pending sign-in to verify");
                self.restart().await
            }
            Err(Error::Json(e)) => {
                warn!("Discarding unreadable pending sign-in: {}", e);
                self.restart().await
            }
            Err(e) => Err(e),
        }
    }

    async fn restart(&mut self) -> Result<PendingIdentity> {
        self.pending.clear().await?;
        if self.stage != Stage::Authenticated {
            self.stage = Stage::AwaitingCredentials;
        }
        Err(Error::SessionExpired)
    }

    /// Checks `code` and, on a match, commits the pending identity as the
    /// session. Returns the dashboard for the new session's role.
    pub(crate) async fn verify(&mut self, scope: &ViewScope, code: &SecretString) -> Result<Route> {
        let Stage::AwaitingCode(pending) = &self.stage else {
            return Err(Error::SessionExpired);
        };
        let pending = pending.clone();

        check_code_format(code.expose_secret())?;
        scope.delay(self.latency.verify).await?;

        if !is_accepted_code(code.expose_secret()) {
            warn!("Invalid code entered for {}", pending.identifier);
            return Err(Error::Verification);
        }

        let role = pending.role;
        let _ = self
            .store
            .commit(pending.identifier, pending.display_name, role)
            .await?;
        self.pending.clear().await?;
        self.stage = Stage::Authenticated;
        Ok(role.dashboard_route())
    }

    /// Where the code screen's back button leads.
    pub(crate) fn back(&self) -> Route {
        match &self.stage {
            Stage::AwaitingCode(pending) => pending.role.login_route(),
            Stage::AwaitingCredentials | Stage::Authenticated => Route::Login,
        }
    }

    /// Ends the session. Returns the login screen for the role that signed
    /// out.
    pub(crate) async fn logout(&mut self) -> Result<Route> {
        let route = self
            .store
            .session()
            .role()
            .map_or(Route::Login, Role::login_route);
        if let Some(name) = self.store.session().display_name() {
            info!("Signing out {}", name);
        }
        self.store.clear().await?;
        self.stage = Stage::AwaitingCredentials;
        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Memory;
    use serde_test::{assert_tokens, Token};
    use tokio_util::sync::CancellationToken;

    struct Harness {
        durable: Memory<Identity>,
        transient: Memory<PendingIdentity>,
        gateway: Gateway<Memory<Identity>, Memory<PendingIdentity>>,
        root: CancellationToken,
    }

    impl Harness {
        fn new() -> Self {
            let durable = Memory::new();
            let transient = Memory::new();
            let gateway = Gateway::new(
                session::Store::new(durable.clone()),
                transient.clone(),
                Latency::INSTANT,
            );
            Self {
                durable,
                transient,
                gateway,
                root: CancellationToken::new(),
            }
        }

        fn scope(&self) -> ViewScope {
            ViewScope::new(&self.root)
        }
    }

    fn citizen(name: &str, phone: &str) -> Credentials {
        Credentials::Citizen {
            name: name.to_owned(),
            phone: phone.to_owned(),
        }
    }

    fn officer(name: &str, badge: &str) -> Credentials {
        Credentials::Officer {
            name: name.to_owned(),
            badge: badge.to_owned(),
        }
    }

    fn code(value: &str) -> SecretString {
        SecretString::new(value.to_owned())
    }

    #[test]
    fn pending_identity_wire_format() {
        let pending = officer("Priya", "B123").validate().unwrap();
        assert_tokens(
            &pending,
            &[
                Token::Struct {
                    name: "PendingIdentity",
                    len: 3,
                },
                Token::Str("phone"),
                Token::Str("B123"),
                Token::Str("name"),
                Token::Str("Priya"),
                Token::Str("type"),
                Token::UnitVariant {
                    name: "Role",
                    variant: "police",
                },
                Token::StructEnd,
            ],
        );
    }

    #[test]
    fn phone_input_keeps_ten_digits() {
        let pending = citizen(" Sarah ", "(987) 654-3210 ext 9").validate().unwrap();
        assert_eq!(pending.identifier(), "9876543210");
        assert_eq!(pending.display_name(), "Sarah");
        assert_eq!(pending.role(), Role::Citizen);
    }

    #[test]
    fn name_is_checked_before_identifier() {
        assert_eq!(
            citizen("  ", "123").validate().unwrap_err(),
            error::Validation::MissingName
        );
        assert_eq!(
            officer("", "").validate().unwrap_err(),
            error::Validation::MissingName
        );
    }

    #[tokio::test]
    async fn short_phone_stays_on_credentials() {
        let mut h = Harness::new();
        for phone in ["", "98765", "987654321", "98765abcd4321"] {
            let scope = h.scope();
            let result = h.gateway.submit(&scope, &citizen("Sarah", phone)).await;
            assert!(
                matches!(
                    result,
                    Err(Error::Validation(error::Validation::InvalidPhone(10)))
                ),
                "{phone}"
            );
            assert_eq!(h.gateway.stage(), &Stage::AwaitingCredentials);
            assert_eq!(h.transient.get().await.unwrap(), None);
        }
    }

    #[tokio::test]
    async fn officer_without_name_is_rejected() {
        let mut h = Harness::new();
        let scope = h.scope();
        let result = h.gateway.submit(&scope, &officer("", "B123")).await;
        assert!(matches!(
            result,
            Err(Error::Validation(error::Validation::MissingName))
        ));
        assert_eq!(h.gateway.stage(), &Stage::AwaitingCredentials);
        assert_eq!(h.transient.get().await.unwrap(), None);
    }

    #[tokio::test]
    async fn officer_without_badge_is_rejected() {
        let mut h = Harness::new();
        let scope = h.scope();
        let result = h.gateway.submit(&scope, &officer("Priya", "   ")).await;
        assert!(matches!(
            result,
            Err(Error::Validation(error::Validation::MissingBadge))
        ));
        assert_eq!(h.transient.get().await.unwrap(), None);
    }

    #[tokio::test]
    async fn citizen_signs_in_with_accepted_code() {
        let mut h = Harness::new();

        let scope = h.scope();
        let next = h
            .gateway
            .submit(&scope, &citizen("Sarah", "9876543210"))
            .await
            .unwrap();
        assert_eq!(next, Route::OtpVerification);
        drop(scope);

        let scope = h.scope();
        let pending = h.gateway.open_code_screen().await.unwrap();
        assert_eq!(pending.identifier(), "9876543210");

        let next = h.gateway.verify(&scope, &code("0000")).await.unwrap();
        assert_eq!(next, Route::UserDashboard);
        assert_eq!(h.gateway.stage(), &Stage::Authenticated);
        assert_eq!(h.transient.get().await.unwrap(), None);

        let record = h.durable.get().await.unwrap().unwrap();
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            serde_json::json!({
                "userType": "user",
                "userPhone": "9876543210",
                "userName": "Sarah",
            })
        );
        assert_eq!(h.gateway.session().display_name(), Some("Sarah"));
    }

    #[tokio::test]
    async fn officer_lands_on_police_dashboard() {
        let mut h = Harness::new();
        let scope = h.scope();
        let _ = h
            .gateway
            .submit(&scope, &officer("Priya", "B123"))
            .await
            .unwrap();
        assert_eq!(h.gateway.back(), Route::PoliceLogin);

        let next = h.gateway.verify(&scope, &code("0000")).await.unwrap();
        assert_eq!(next, Route::PoliceDashboard);
        assert_eq!(h.gateway.session().role(), Some(Role::Officer));
        assert_eq!(h.gateway.session().identifier(), Some("B123"));
    }

    #[tokio::test]
    async fn wrong_code_keeps_session_empty_and_allows_retry() {
        let mut h = Harness::new();
        let scope = h.scope();
        let _ = h
            .gateway
            .submit(&scope, &citizen("Sarah", "9876543210"))
            .await
            .unwrap();

        for attempt in ["1234", "0001", "9999"] {
            let result = h.gateway.verify(&scope, &code(attempt)).await;
            assert!(matches!(result, Err(Error::Verification)), "{attempt}");
            assert!(!h.gateway.session().is_authenticated());
            assert!(matches!(h.gateway.stage(), Stage::AwaitingCode(_)));
            assert_eq!(h.durable.get().await.unwrap(), None);
        }

        assert_eq!(
            h.gateway.verify(&scope, &code("0000")).await.unwrap(),
            Route::UserDashboard
        );
    }

    #[tokio::test]
    async fn malformed_code_is_a_validation_error() {
        let mut h = Harness::new();
        let scope = h.scope();
        let _ = h
            .gateway
            .submit(&scope, &citizen("Sarah", "9876543210"))
            .await
            .unwrap();

        for attempt in ["", "000", "00000", "00a0", "０００"] {
            let result = h.gateway.verify(&scope, &code(attempt)).await;
            assert!(
                matches!(
                    result,
                    Err(Error::Validation(error::Validation::MalformedCode(4)))
                ),
                "{attempt}"
            );
        }
        assert!(matches!(h.gateway.stage(), Stage::AwaitingCode(_)));
    }

    #[tokio::test]
    async fn code_screen_without_pending_identity_expires() {
        let mut h = Harness::new();
        assert!(matches!(
            h.gateway.open_code_screen().await,
            Err(Error::SessionExpired)
        ));
        assert_eq!(h.gateway.stage(), &Stage::AwaitingCredentials);
        assert_eq!(h.gateway.back(), Route::Login);

        let scope = h.scope();
        assert!(matches!(
            h.gateway.verify(&scope, &code("0000")).await,
            Err(Error::SessionExpired)
        ));
        assert!(!h.gateway.session().is_authenticated());
    }

    #[tokio::test]
    async fn torn_down_view_applies_nothing() {
        let mut h = Harness::new();
        let scope = h.scope();
        scope.teardown();
        let result = h
            .gateway
            .submit(&scope, &citizen("Sarah", "9876543210"))
            .await;
        assert!(matches!(result, Err(Error::Cancelled)));
        assert_eq!(h.gateway.stage(), &Stage::AwaitingCredentials);
        assert_eq!(h.transient.get().await.unwrap(), None);
    }

    #[tokio::test]
    async fn logout_clears_session_and_returns_role_login() {
        let mut h = Harness::new();
        let scope = h.scope();
        let _ = h
            .gateway
            .submit(&scope, &officer("Priya", "B123"))
            .await
            .unwrap();
        let _ = h.gateway.verify(&scope, &code("0000")).await.unwrap();

        assert_eq!(h.gateway.logout().await.unwrap(), Route::PoliceLogin);
        assert_eq!(h.gateway.stage(), &Stage::AwaitingCredentials);
        assert_eq!(h.gateway.session(), &Session::empty());
        assert_eq!(h.durable.get().await.unwrap(), None);

        assert_eq!(h.gateway.logout().await.unwrap(), Route::Login);
    }

    #[tokio::test]
    async fn restored_session_starts_authenticated() {
        let mut durable = Memory::new();
        durable
            .update(&Identity::new(
                "9876543210".to_owned(),
                "Sarah".to_owned(),
                Role::Citizen,
            ))
            .await
            .unwrap();

        let mut store = session::Store::new(durable);
        let _ = store.restore().await.unwrap();
        let gateway = Gateway::new(store, Memory::<PendingIdentity>::new(), Latency::INSTANT);
        assert_eq!(gateway.stage(), &Stage::Authenticated);
        assert!(!gateway.is_persistent());
    }
}
