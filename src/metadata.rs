// SPDX-FileCopyrightText: 2022-2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use directories::ProjectDirs;
use inflector::Inflector;
use once_cell::sync::Lazy;

pub(crate) static APP_ID: Lazy<String> =
    Lazy::new(|| option_env!("CARGO_PKG_NAME").unwrap_or("safira").to_owned());
pub(crate) static APP_DISPLAY_NAME: Lazy<String> = Lazy::new(|| APP_ID.to_title_case());

pub(crate) static PROJECT_DIRS: Lazy<Option<ProjectDirs>> =
    Lazy::new(|| ProjectDirs::from("app", "Safira", &APP_DISPLAY_NAME));

/// Key of the durable session record.
pub(crate) const SESSION_KEY: &str = "safira_auth";
/// Key of the pending identity held between the credential and code steps.
pub(crate) const PENDING_KEY: &str = "safira_temp_auth";

// There is no delivery channel for codes; every login accepts this one.
pub(crate) const ACCEPTED_CODE: &str = "0000";
pub(crate) const CODE_LENGTH: usize = 4;
pub(crate) const MIN_PHONE_DIGITS: usize = 10;

pub(crate) const LOGIN_LATENCY: Duration = Duration::from_millis(1000);
pub(crate) const VERIFY_LATENCY: Duration = Duration::from_millis(1500);
