//! Opening a session as an effect over the puzzle source and store.

use crate::builder::{EngineBuilder, EngineConfig};
use crate::checkpoint::KeyValueStore;
use crate::core::{PuzzleDefinition, PuzzleId, SessionState};
use crate::effects::engine::SessionEngine;
use crate::error::SessionError;
use crate::source::PuzzleSource;
use std::sync::Arc;
use stillwater::effect::Effect;
use stillwater::prelude::*;

/// Engine backed by the shared store of a [`SessionEnv`]
pub type SharedEngine = SessionEngine<Arc<dyn KeyValueStore>>;

/// Environment the session effects run against.
#[derive(Clone)]
pub struct SessionEnv {
    pub source: Arc<dyn PuzzleSource>,
    pub store: Arc<dyn KeyValueStore>,
    pub config: EngineConfig,
}

impl SessionEnv {
    pub fn new(
        source: impl PuzzleSource + 'static,
        store: impl KeyValueStore + 'static,
        config: EngineConfig,
    ) -> Self {
        Self {
            source: Arc::new(source),
            store: Arc::new(store),
            config,
        }
    }
}

/// A loaded session, ready to play.
pub struct OpenedSession {
    pub engine: SharedEngine,
    pub definition: PuzzleDefinition,
    pub state: SessionState,
}

/// Fetch the definition for `id` once and load its session.
///
/// No retries are attempted; a failed fetch surfaces as
/// [`SessionError::Source`].
pub fn open_session(
    id: impl Into<PuzzleId>,
) -> impl Effect<Output = OpenedSession, Error = SessionError, Env = SessionEnv> {
    let id = id.into();
    from_fn(move |env: &SessionEnv| -> Result<OpenedSession, SessionError> {
        let definition = env.source.fetch(&id)?;
        let mut engine = EngineBuilder::new()
            .store(Arc::clone(&env.store))
            .config(env.config.clone())
            .build()?;
        let state = engine.load(&definition)?;

        Ok(OpenedSession {
            engine,
            definition,
            state,
        })
    })
}
