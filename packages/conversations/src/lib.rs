#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! In-memory session store for assistant conversations.
//!
//! Maps a session identifier to its message history with an explicit
//! create/replace/clear lifecycle. The store is injected into whatever
//! needs it (the server's shared state) rather than living as a process
//! singleton. Sessions do not survive a restart; the system keeps no
//! persistence layer beyond the external sheet.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::RwLock;

use screwworm_map_ai::providers::Message;
use uuid::Uuid;

/// Session-keyed conversation histories.
///
/// Interior mutability via `RwLock`: reads (history lookups) dominate
/// writes (one replace per assistant turn).
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Vec<Message>>>,
}

impl SessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty session and returns its identifier.
    ///
    /// # Panics
    ///
    /// Panics if the store lock is poisoned.
    #[must_use]
    pub fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions
            .write()
            .expect("session store lock poisoned")
            .insert(id, Vec::new());
        log::debug!("Created assistant session {id}");
        id
    }

    /// Returns a copy of the session's history, or `None` if the session
    /// does not exist.
    ///
    /// # Panics
    ///
    /// Panics if the store lock is poisoned.
    #[must_use]
    pub fn history(&self, id: Uuid) -> Option<Vec<Message>> {
        self.sessions
            .read()
            .expect("session store lock poisoned")
            .get(&id)
            .cloned()
    }

    /// Replaces the session's history, creating the session if needed.
    ///
    /// The assistant returns the complete message list each turn, so a
    /// full replace is the natural write.
    ///
    /// # Panics
    ///
    /// Panics if the store lock is poisoned.
    pub fn replace(&self, id: Uuid, messages: Vec<Message>) {
        self.sessions
            .write()
            .expect("session store lock poisoned")
            .insert(id, messages);
    }

    /// Removes a session. Returns `true` if it existed.
    ///
    /// # Panics
    ///
    /// Panics if the store lock is poisoned.
    pub fn clear(&self, id: Uuid) -> bool {
        let existed = self
            .sessions
            .write()
            .expect("session store lock poisoned")
            .remove(&id)
            .is_some();
        if existed {
            log::debug!("Cleared assistant session {id}");
        }
        existed
    }

    /// Number of live sessions.
    ///
    /// # Panics
    ///
    /// Panics if the store lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .expect("session store lock poisoned")
            .len()
    }

    /// Returns `true` if no sessions exist.
    ///
    /// # Panics
    ///
    /// Panics if the store lock is poisoned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Formats a session history as a markdown transcript for export.
#[must_use]
pub fn format_transcript(messages: &[Message]) -> String {
    let mut output = String::new();
    writeln!(output, "# Conversación del asistente").unwrap();
    writeln!(output).unwrap();

    for msg in messages {
        match msg.role.as_str() {
            "user" => writeln!(output, "## Pregunta").unwrap(),
            "assistant" => writeln!(output, "## Respuesta").unwrap(),
            other => writeln!(output, "## {other}").unwrap(),
        }
        writeln!(output, "{}", msg.content).unwrap();
        writeln!(output).unwrap();
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_history_replace_clear_lifecycle() {
        let store = SessionStore::new();
        assert!(store.is_empty());

        let id = store.create();
        assert_eq!(store.history(id), Some(Vec::new()));
        assert_eq!(store.len(), 1);

        let messages = vec![Message::user("hola"), Message::assistant("buenas")];
        store.replace(id, messages.clone());
        assert_eq!(store.history(id), Some(messages));

        assert!(store.clear(id));
        assert!(store.history(id).is_none());
        assert!(!store.clear(id));
    }

    #[test]
    fn unknown_session_has_no_history() {
        let store = SessionStore::new();
        assert!(store.history(Uuid::new_v4()).is_none());
    }

    #[test]
    fn replace_creates_missing_sessions() {
        let store = SessionStore::new();
        let id = Uuid::new_v4();
        store.replace(id, vec![Message::user("hola")]);
        assert_eq!(store.history(id).unwrap().len(), 1);
    }

    #[test]
    fn transcript_labels_roles() {
        let messages = vec![
            Message::user("¿Cuántos casos hay?"),
            Message::assistant("Hay 15 casos acumulados."),
        ];
        let transcript = format_transcript(&messages);
        assert!(transcript.starts_with("# Conversación del asistente"));
        assert!(transcript.contains("## Pregunta\n¿Cuántos casos hay?"));
        assert!(transcript.contains("## Respuesta\nHay 15 casos acumulados."));
    }
}
