// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Write as _;

use async_trait::async_trait;
use clap::Parser;
use log::{error, warn};

use crate::{
    error::{Error, Result},
    nav,
    router::{self, Resolution, Route},
    session::Session,
};

use super::App;

// Every redirect target renders for the session that produced it, so a chain
// longer than this means the route table is broken.
const MAX_REDIRECTS: usize = 4;

/// Navigate to a path and show the view it resolves to.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// The path to open, such as /user/dashboard.
    #[clap()]
    path: String,
}

fn render(route: Route, session: &Session) -> String {
    let mut out = route.title().to_owned();
    if let Some(role) = route.required_role() {
        if let Some(name) = session.display_name() {
            let _ = write!(out, "\nHello, {name}");
        }
        let _ = write!(out, "\n{}", nav::render(role, route.path()));
    }
    out
}

/// Follows redirects from `requested` and prints the view it lands on.
/// Returns the route shown, or `None` for a 404.
async fn navigate(app: &mut App, requested: &str) -> Result<Option<Route>> {
    let mut path = requested.to_owned();
    for _ in 0..=MAX_REDIRECTS {
        match router::resolve(&path, app.gateway.session()) {
            Resolution::Render(Route::OtpVerification) => {
                match app.gateway.open_code_screen().await {
                    Ok(pending) => {
                        println!(
                            "{}\nEnter the code sent to {}",
                            Route::OtpVerification.title(),
                            pending.identifier()
                        );
                        return Ok(Some(Route::OtpVerification));
                    }
                    Err(Error::SessionExpired) => {
                        warn!("Session expired. Please try again.");
                        let back = app.gateway.back();
                        println!("Redirecting to {back}");
                        path = back.path().to_owned();
                    }
                    Err(e) => return Err(e),
                }
            }
            Resolution::Render(route) => {
                println!("{}", render(route, app.gateway.session()));
                return Ok(Some(route));
            }
            Resolution::Redirect(route) => {
                println!("Redirecting to {route}");
                path = route.path().to_owned();
            }
            Resolution::NotFound => {
                println!("404: nothing lives at {path}");
                return Ok(None);
            }
        }
    }

    error!("Too many redirects while opening {}", requested);
    Err(Error::Command)
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, app: &mut App) -> Result<()> {
        let _ = navigate(app, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        auth::{Credentials, Stage},
        command::{tests as fixture, Command as _},
        session::{Identity, Role},
    };

    #[test]
    fn public_view_has_no_navigation() {
        assert_eq!(render(Route::Login, &Session::empty()), "Login");
    }

    #[test]
    fn protected_view_greets_and_shows_tabs() {
        let session = Session::authenticated(Identity::new(
            "9876543210".to_owned(),
            "Sarah".to_owned(),
            Role::Citizen,
        ));
        assert_eq!(
            render(Route::UserSafetyTips, &session),
            "Safety Tips\nHello, Sarah\n\
             Home /user/dashboard | Camera /user/camera | [Safety Tips /user/safety-tips]"
        );
    }

    #[tokio::test]
    async fn code_screen_without_pending_sign_in_falls_back_to_login() {
        let mut app = fixture::app(fixture::Scripted::default());
        assert_eq!(
            navigate(&mut app, "/otp-verification").await.unwrap(),
            Some(Route::Login)
        );
        assert_eq!(app.gateway.stage(), &Stage::AwaitingCredentials);
        assert!(!app.gateway.session().is_authenticated());
    }

    #[tokio::test]
    async fn code_screen_shows_pending_sign_in() {
        let mut app = fixture::app(fixture::Scripted::default());
        let credentials = Credentials::Officer {
            name: "Priya".to_owned(),
            badge: "B123".to_owned(),
        };
        let view = app.mount();
        let _ = app.gateway.submit(&view, &credentials).await.unwrap();

        assert_eq!(
            navigate(&mut app, "/otp-verification").await.unwrap(),
            Some(Route::OtpVerification)
        );
        assert!(matches!(app.gateway.stage(), Stage::AwaitingCode(_)));
    }

    #[tokio::test]
    async fn root_follows_redirect_to_officer_dashboard() {
        let mut app = fixture::signed_in_app(Role::Officer).await;
        assert_eq!(
            navigate(&mut app, "/").await.unwrap(),
            Some(Route::PoliceDashboard)
        );
    }

    #[tokio::test]
    async fn wrong_role_lands_on_required_login() {
        let mut app = fixture::signed_in_app(Role::Citizen).await;
        assert_eq!(
            navigate(&mut app, "/police/gallery").await.unwrap(),
            Some(Route::PoliceLogin)
        );
        assert!(app.gateway.session().is_authenticated());
    }

    #[tokio::test]
    async fn unknown_path_is_not_found_but_succeeds() {
        let mut app = fixture::app(fixture::Scripted::default());
        assert_eq!(navigate(&mut app, "/admin").await.unwrap(), None);

        let cmd = Command {
            path: "/admin".to_owned(),
        };
        cmd.execute(&mut app).await.unwrap();
    }
}
