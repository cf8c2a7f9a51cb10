//! Session engine: the pure session operations plus persistence.

use crate::builder::EngineConfig;
use crate::checkpoint::{self, storage_key, KeyValueStore};
use crate::core::{
    Outcome, PuzzleDefinition, PuzzleId, SessionState, SessionView, State,
};
use crate::error::SessionError;
use crate::rules::SessionRules;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

/// Runs session operations and writes every resulting state to the store.
///
/// The engine holds no session state of its own: each operation takes the
/// current snapshot and returns the next one. Store writes are full
/// overwrites of the session's record. A failed write is logged and the
/// operation still succeeds.
pub struct SessionEngine<St: KeyValueStore> {
    store: St,
    config: EngineConfig,
    rng: StdRng,
}

impl<St: KeyValueStore> SessionEngine<St> {
    pub(crate) fn from_parts(store: St, config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { store, config, rng }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn rules(&self) -> &SessionRules {
        &self.config.rules
    }

    pub fn store(&self) -> &St {
        &self.store
    }

    /// Store key of a puzzle's session record
    pub fn key_for(&self, id: &PuzzleId) -> String {
        storage_key(&self.config.namespace, id)
    }

    /// Resume the persisted session for `definition`, or start a fresh one.
    ///
    /// An invalid definition is fatal. A missing, unreadable or corrupt
    /// record is not: it is replaced by a fresh session, which is persisted
    /// before returning. A resumed session is held to this engine's
    /// mistake limit.
    pub fn load(&mut self, definition: &PuzzleDefinition) -> Result<SessionState, SessionError> {
        definition.ensure_valid()?;
        let key = self.key_for(&definition.id);

        if let Some(restored) = self.restore(&key, definition) {
            let state = restored.enforce_limit(&self.config.rules);
            if state != restored {
                info!(
                    puzzle_id = %definition.id,
                    mistakes = state.mistakes(),
                    revealed = state.revealed(),
                    "Mistake limit already reached, revealed remaining categories"
                );
                self.persist(&state);
            }
            info!(
                puzzle_id = %definition.id,
                key = %key,
                solved = state.solved().len(),
                mistakes = state.mistakes(),
                phase = state.phase().name(),
                "Resumed session"
            );
            return Ok(state);
        }

        let state = SessionState::fresh(definition, &mut self.rng)?;
        info!(puzzle_id = %definition.id, key = %key, "Started fresh session");
        self.persist(&state);
        Ok(state)
    }

    pub fn toggle_select(&self, state: &SessionState, item: &str) -> SessionState {
        let next = state.toggle_select(item);
        debug!(
            puzzle_id = %next.puzzle_id(),
            item = item,
            selected = next.selected().len(),
            "Toggled selection"
        );
        self.persist(&next);
        next
    }

    pub fn deselect_all(&self, state: &SessionState) -> SessionState {
        let next = state.deselect_all();
        debug!(puzzle_id = %next.puzzle_id(), "Cleared selection");
        self.persist(&next);
        next
    }

    pub fn shuffle(&mut self, state: &SessionState) -> SessionState {
        let next = state.shuffled(&mut self.rng);
        debug!(puzzle_id = %next.puzzle_id(), items = next.pool().len(), "Shuffled pool");
        self.persist(&next);
        next
    }

    /// Submit the current selection; persisted whatever the outcome.
    pub fn submit(&self, state: &SessionState) -> (SessionState, Outcome) {
        let (next, outcome) = state.submit(&self.config.rules, Utc::now());
        debug!(
            puzzle_id = %next.puzzle_id(),
            outcome = ?outcome,
            solved = next.solved().len(),
            mistakes = next.mistakes(),
            phase = next.phase().name(),
            "Submitted guess"
        );
        self.persist(&next);
        (next, outcome)
    }

    /// Rendering snapshot of `state` under this engine's rules.
    pub fn view(&self, state: &SessionState) -> SessionView {
        SessionView::new(state, &self.config.rules)
    }

    fn restore(&self, key: &str, definition: &PuzzleDefinition) -> Option<SessionState> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(error) => {
                warn!(key = %key, error = %error, "Failed to read persisted session, starting fresh");
                return None;
            }
        };

        match checkpoint::decode(&raw, definition) {
            Ok(state) => Some(state),
            Err(error) => {
                warn!(key = %key, error = %error, "Discarding corrupt persisted session");
                None
            }
        }
    }

    fn persist(&self, state: &SessionState) {
        let key = self.key_for(state.puzzle_id());
        let result = checkpoint::encode(state)
            .map_err(|error| error.to_string())
            .and_then(|raw| self.store.set(&key, &raw).map_err(|error| error.to_string()));

        if let Err(error) = result {
            warn!(key = %key, error = %error, "Failed to persist session");
        }
    }
}
