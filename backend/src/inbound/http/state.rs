//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountCommands, CommentCommands, NewsQueries, NoteCommands, NoteQueries,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub news: Arc<dyn NewsQueries>,
    pub comments: Arc<dyn CommentCommands>,
    pub notes: Arc<dyn NoteQueries>,
    pub note_commands: Arc<dyn NoteCommands>,
    pub accounts: Arc<dyn AccountCommands>,
}

impl HttpState {
    /// Construct state from the full set of driving ports.
    pub fn new(
        news: Arc<dyn NewsQueries>,
        comments: Arc<dyn CommentCommands>,
        notes: Arc<dyn NoteQueries>,
        note_commands: Arc<dyn NoteCommands>,
        accounts: Arc<dyn AccountCommands>,
    ) -> Self {
        Self {
            news,
            comments,
            notes,
            note_commands,
            accounts,
        }
    }
}
