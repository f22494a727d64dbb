//! Placeholder views. They echo what routing captured and hold no data.

use axum::response::{IntoResponse, Response};

use crate::http::endpoint::RequestContext;

fn question_id(ctx: &RequestContext) -> String {
    ctx.param("question_id").unwrap_or_default()
}

pub async fn index(_ctx: RequestContext) -> Response {
    "Hello, world. You're at the polls index.".into_response()
}

pub async fn detail(ctx: RequestContext) -> Response {
    format!("You're looking at question {}.", question_id(&ctx)).into_response()
}

pub async fn results(ctx: RequestContext) -> Response {
    format!("You're looking at the results of question {}.", question_id(&ctx)).into_response()
}

pub async fn vote(ctx: RequestContext) -> Response {
    format!("You're voting on question {}.", question_id(&ctx)).into_response()
}
