// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use log::debug;
use url::Url;

use crate::session::{Role, Session};

// Only used to normalize paths; never contacted.
const BASE_URL: &str = "http://safira.invalid/";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Route {
    Root,
    Login,
    PoliceLogin,
    OtpVerification,
    UserDashboard,
    UserCamera,
    UserSafetyTips,
    PoliceDashboard,
    PoliceGallery,
}

impl Route {
    pub(crate) const ALL: [Self; 9] = [
        Self::Root,
        Self::Login,
        Self::PoliceLogin,
        Self::OtpVerification,
        Self::UserDashboard,
        Self::UserCamera,
        Self::UserSafetyTips,
        Self::PoliceDashboard,
        Self::PoliceGallery,
    ];

    pub(crate) const fn path(self) -> &'static str {
        match self {
            Self::Root => "/",
            Self::Login => "/login",
            Self::PoliceLogin => "/police-login",
            Self::OtpVerification => "/otp-verification",
            Self::UserDashboard => "/user/dashboard",
            Self::UserCamera => "/user/camera",
            Self::UserSafetyTips => "/user/safety-tips",
            Self::PoliceDashboard => "/police/dashboard",
            Self::PoliceGallery => "/police/gallery",
        }
    }

    pub(crate) const fn title(self) -> &'static str {
        match self {
            Self::Root => "Home",
            Self::Login => "Login",
            Self::PoliceLogin => "Pink Police Portal",
            Self::OtpVerification => "Verification",
            Self::UserDashboard => "Dashboard",
            Self::UserCamera => "Camera",
            Self::UserSafetyTips => "Safety Tips",
            Self::PoliceDashboard => "SOS Requests",
            Self::PoliceGallery => "Gallery",
        }
    }

    /// The role a session needs to see this route, if any.
    pub(crate) const fn required_role(self) -> Option<Role> {
        match self {
            Self::Root | Self::Login | Self::PoliceLogin | Self::OtpVerification => None,
            Self::UserDashboard | Self::UserCamera | Self::UserSafetyTips => Some(Role::Citizen),
            Self::PoliceDashboard | Self::PoliceGallery => Some(Role::Officer),
        }
    }

    pub(crate) fn from_path(path: &str) -> Option<Self> {
        let path = normalize(path)?;
        Self::ALL.into_iter().find(|route| route.path() == path)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Resolution {
    Render(Route),
    Redirect(Route),
    NotFound,
}

/// Reduces a requested location to a bare absolute path. Query strings and
/// fragments are dropped, dot segments resolved and a trailing slash removed.
/// Repeated leading slashes collapse into one, so `//user` is a path and not
/// a host.
fn normalize(path: &str) -> Option<String> {
    let rooted = format!("/{}", path.trim_start_matches(|c: char| c == '/' || c == '\\'));
    let url = Url::parse(BASE_URL).and_then(|base| base.join(&rooted)).ok()?;
    let trimmed = url.path().trim_end_matches('/');
    Some(if trimmed.is_empty() {
        "/".to_owned()
    } else {
        trimmed.to_owned()
    })
}

/// Decides what a navigation to `path` shows for `session`.
pub(crate) fn resolve(path: &str, session: &Session) -> Resolution {
    let Some(route) = Route::from_path(path) else {
        debug!("No route matches {:?}", path);
        return Resolution::NotFound;
    };

    if route == Route::Root {
        return Resolution::Redirect(
            session
                .role()
                .map_or(Route::Login, Role::dashboard_route),
        );
    }

    match route.required_role() {
        None => Resolution::Render(route),
        Some(required) if session.role() == Some(required) => Resolution::Render(route),
        Some(required) => {
            debug!(
                "{} requires a {} session, redirecting to {}",
                route,
                required,
                required.login_route()
            );
            Resolution::Redirect(required.login_route())
        }
    }
}
