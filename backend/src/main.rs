//! Backend entry-point: wires the HTTP API, sessions, and OpenAPI docs.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use backend::config::AppConfig;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::{
    AccountService, CommentService, NewsService, NoteService,
    ports::{AccountCommands, CommentCommands, NewsQueries, NoteCommands, NoteQueries},
};
use backend::inbound::http::session_config::{session_key, session_middleware};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::configure_api;
use backend::outbound::persistence::{
    DbPool, DieselCommentRepository, DieselNewsRepository, DieselNoteRepository,
    DieselUserRepository, MemoryCommentRepository, MemoryNewsRepository, MemoryNoteRepository,
    MemoryUserRepository, PoolConfig,
};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    let key = session_key(config.session_key_file.as_deref()).map_err(std::io::Error::other)?;
    let cookie_secure = config.session_cookie_secure;

    let state = match &config.database_url {
        Some(database_url) => {
            let pool = DbPool::new(PoolConfig::new(database_url.clone()))
                .map_err(std::io::Error::other)?;
            pool.run_migrations().map_err(std::io::Error::other)?;
            info!(database_url = %database_url, "using SQLite store");
            build_state_sqlite(&config, pool)
        }
        None => {
            warn!("DATABASE_URL not set; using in-memory store (data is not persisted)");
            build_state_memory(&config)
        }
    };

    info!(bind_addr = %config.bind_addr, "starting server");
    HttpServer::new(move || {
        let app = App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(session_middleware(key.clone(), cookie_secure))
            .configure(configure_api);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(config.bind_addr.as_str())?
    .run()
    .await
}

fn build_state_sqlite(config: &AppConfig, pool: DbPool) -> HttpState {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let news = Arc::new(DieselNewsRepository::new(pool.clone()));
    let comments = Arc::new(DieselCommentRepository::new(pool.clone()));
    let notes = Arc::new(DieselNoteRepository::new(pool));

    let news_service = Arc::new(NewsService::new(
        news.clone(),
        comments.clone(),
        config.news_page_size,
    ));
    let comment_service = Arc::new(CommentService::new(
        news,
        comments,
        config.banned_words.clone(),
    ));
    let note_service = Arc::new(NoteService::new(notes));
    let account_service = Arc::new(AccountService::new(users));

    HttpState::new(
        news_service as Arc<dyn NewsQueries>,
        comment_service as Arc<dyn CommentCommands>,
        note_service.clone() as Arc<dyn NoteQueries>,
        note_service as Arc<dyn NoteCommands>,
        account_service as Arc<dyn AccountCommands>,
    )
}

fn build_state_memory(config: &AppConfig) -> HttpState {
    let users = Arc::new(MemoryUserRepository::default());
    let news = Arc::new(MemoryNewsRepository::default());
    let comments = Arc::new(MemoryCommentRepository::default());
    let notes = Arc::new(MemoryNoteRepository::default());

    let news_service = Arc::new(NewsService::new(
        news.clone(),
        comments.clone(),
        config.news_page_size,
    ));
    let comment_service = Arc::new(CommentService::new(
        news,
        comments,
        config.banned_words.clone(),
    ));
    let note_service = Arc::new(NoteService::new(notes));
    let account_service = Arc::new(AccountService::new(users));

    HttpState::new(
        news_service as Arc<dyn NewsQueries>,
        comment_service as Arc<dyn CommentCommands>,
        note_service.clone() as Arc<dyn NoteQueries>,
        note_service as Arc<dyn NoteCommands>,
        account_service as Arc<dyn AccountCommands>,
    )
}
