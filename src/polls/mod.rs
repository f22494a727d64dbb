//! The `polls` sub-application's own route table.
//!
//! Included by the site under a prefix; every pattern here is relative to it.

pub mod views;

use crate::http::endpoint::{Endpoint, SiteRoutes};
use crate::routing::{Binding, PatternError, RouteTable};

/// Namespace used to reverse these routes (`polls:detail`).
pub const APP_NAME: &str = "polls";

pub fn urls() -> Result<SiteRoutes, PatternError> {
    Ok(RouteTable::with_namespace(
        APP_NAME,
        vec![
            Binding::exact("", Endpoint::new("polls.index", views::index))?.named("index"),
            Binding::exact("<int:question_id>/", Endpoint::new("polls.detail", views::detail))?
                .named("detail"),
            Binding::exact(
                "<int:question_id>/results/",
                Endpoint::new("polls.results", views::results),
            )?
            .named("results"),
            Binding::exact("<int:question_id>/vote/", Endpoint::new("polls.vote", views::vote))?
                .named("vote"),
        ],
    ))
}
