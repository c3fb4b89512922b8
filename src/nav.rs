// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Write as _;

use crate::{router::Route, session::Role};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Tab {
    pub(crate) id: &'static str,
    pub(crate) label: &'static str,
    pub(crate) route: Route,
}

static CITIZEN_TABS: [Tab; 3] = [
    Tab {
        id: "dashboard",
        label: "Home",
        route: Route::UserDashboard,
    },
    Tab {
        id: "camera",
        label: "Camera",
        route: Route::UserCamera,
    },
    Tab {
        id: "safety-tips",
        label: "Safety Tips",
        route: Route::UserSafetyTips,
    },
];

static OFFICER_TABS: [Tab; 2] = [
    Tab {
        id: "dashboard",
        label: "Requests",
        route: Route::PoliceDashboard,
    },
    Tab {
        id: "gallery",
        label: "Gallery",
        route: Route::PoliceGallery,
    },
];

pub(crate) fn tabs(role: Role) -> &'static [Tab] {
    match role {
        Role::Citizen => &CITIZEN_TABS,
        Role::Officer => &OFFICER_TABS,
    }
}

/// The tab to highlight for `path`: the first whose id appears as a path
/// segment prefix.
pub(crate) fn active(role: Role, path: &str) -> Option<&'static Tab> {
    tabs(role)
        .iter()
        .find(|tab| path.contains(&format!("/{}", tab.id)))
}

/// Renders the bar on one line, each tab with the path it opens and the
/// active one bracketed.
pub(crate) fn render(role: Role, path: &str) -> String {
    let current = active(role, path);
    let mut line = String::new();
    for (n, tab) in tabs(role).iter().enumerate() {
        if n > 0 {
            line.push_str(" | ");
        }
        if current == Some(tab) {
            let _ = write!(line, "[{} {}]", tab.label, tab.route);
        } else {
            let _ = write!(line, "{} {}", tab.label, tab.route);
        }
    }
    line
}
