//! HTML pages and the not-yet-built page stubs.
//!
//! The leaderboard and volunteer pages are minijinja templates compiled
//! into the binary. They are static apart from the event name and the
//! `WebSocket` path the leaderboard script connects to.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use minijinja::{Environment, context};

use crate::error::ApiError;
use crate::state::AppState;
use crate::ws::WS_PATH;

/// A renderable page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Live standings for the big screen.
    Leaderboard,
    /// Registration and lap counting for volunteers.
    Volunteer,
}

impl Page {
    const fn template(self) -> &'static str {
        match self {
            Self::Leaderboard => "leaderboard.html",
            Self::Volunteer => "volunteer.html",
        }
    }
}

/// Compiled page templates.
pub struct Pages {
    env: Environment<'static>,
    event_name: String,
}

impl Pages {
    /// Compile the embedded templates.
    ///
    /// # Errors
    ///
    /// Returns a [`minijinja::Error`] if a template has a syntax error.
    pub fn new(event_name: &str) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(
            Page::Leaderboard.template(),
            include_str!("../templates/leaderboard.html"),
        )?;
        env.add_template(
            Page::Volunteer.template(),
            include_str!("../templates/volunteer.html"),
        )?;
        Ok(Self {
            env,
            event_name: event_name.to_owned(),
        })
    }

    /// Render `page` to HTML.
    ///
    /// # Errors
    ///
    /// Returns a [`minijinja::Error`] if rendering fails.
    pub fn render(&self, page: Page) -> Result<String, minijinja::Error> {
        self.env.get_template(page.template())?.render(context! {
            event_name => self.event_name,
            ws_path => WS_PATH,
        })
    }

    fn respond(&self, page: Page) -> Result<Html<String>, ApiError> {
        self.render(page)
            .map(Html)
            .map_err(|e| ApiError::Internal(format!("render {}: {e}", page.template())))
    }
}

/// `GET /leaderboard`
pub async fn leaderboard_page(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ApiError> {
    state.pages.respond(Page::Leaderboard)
}

/// `GET /volunteer`
pub async fn volunteer_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    state.pages.respond(Page::Volunteer)
}

/// `GET /achievement/{id}` -- not built yet.
pub async fn achievement_page(Path(id): Path<String>) -> impl IntoResponse {
    (StatusCode::NOT_FOUND, format!("{id} achievement not implemented"))
}

/// `GET /certificate/{id}` -- not built yet.
pub async fn certificate_page(Path(id): Path<String>) -> impl IntoResponse {
    (StatusCode::NOT_FOUND, format!("{id} certificate not implemented"))
}
