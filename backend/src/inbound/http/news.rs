//! News API handlers.
//!
//! ```text
//! GET /api/v1/news
//! GET /api/v1/news/{id}
//! ```
//!
//! The feed is public: no session is required to read it.

use actix_web::{get, web};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Comment, News, NewsId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// One record on the home feed.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsSummary {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub date: NaiveDate,
}

impl From<&News> for NewsSummary {
    fn from(news: &News) -> Self {
        Self {
            id: news.id().get(),
            title: news.title().to_owned(),
            body: news.body().to_owned(),
            date: news.date(),
        }
    }
}

/// One comment in a detail view thread.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: i64,
    pub news_id: i64,
    /// Identifier of the comment author.
    pub author: String,
    pub text: String,
    pub created: DateTime<Utc>,
}

impl From<&Comment> for CommentView {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id().get(),
            news_id: comment.news_id().get(),
            author: comment.author().to_string(),
            text: comment.text().to_owned(),
            created: comment.created(),
        }
    }
}

/// A record with its full comment thread, oldest comment first.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsDetail {
    #[serde(flatten)]
    pub news: NewsSummary,
    pub comments: Vec<CommentView>,
}

/// The public home feed: newest first, capped at the configured page size.
#[utoipa::path(
    get,
    path = "/api/v1/news",
    responses(
        (status = 200, description = "Home feed", body = [NewsSummary]),
        (status = 503, description = "Storage unavailable", body = crate::domain::Error)
    ),
    tags = ["news"],
    operation_id = "homeFeed",
    security([])
)]
#[get("/news")]
pub async fn home_feed(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<NewsSummary>>> {
    let feed = state.news.home_feed().await?;
    Ok(web::Json(feed.iter().map(NewsSummary::from).collect()))
}

/// One record with its comment thread.
#[utoipa::path(
    get,
    path = "/api/v1/news/{id}",
    params(("id" = i64, Path, description = "News record identifier")),
    responses(
        (status = 200, description = "News detail", body = NewsDetail),
        (status = 404, description = "No such record", body = crate::domain::Error)
    ),
    tags = ["news"],
    operation_id = "newsDetail",
    security([])
)]
#[get("/news/{id}")]
pub async fn news_detail(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<NewsDetail>> {
    let (news, comments) = state.news.detail(NewsId::new(path.into_inner())).await?;
    Ok(web::Json(NewsDetail {
        news: NewsSummary::from(&news),
        comments: comments.iter().map(CommentView::from).collect(),
    }))
}
