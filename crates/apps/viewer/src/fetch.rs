use std::sync::Arc;

use runtime::InboxSender;
use streaming::{ElevationQuery, ElevationSource, LoadError, TerrainPayload, load_terrain_payload};
use tokio::task::JoinHandle;
use tracing::debug;

/// Result of the background fetch, handed to the render loop.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(TerrainPayload),
    Failed(LoadError),
}

/// Fetch one sample off the render loop and post the outcome to its inbox.
pub fn spawn_fetch(
    source: Arc<dyn ElevationSource>,
    query: ElevationQuery,
    outbox: InboxSender<LoadOutcome>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let outcome = match load_terrain_payload(source.as_ref(), query).await {
            Ok(payload) => LoadOutcome::Loaded(payload),
            Err(err) => LoadOutcome::Failed(err),
        };
        if outbox.post(outcome).is_err() {
            debug!("render loop gone, dropping fetch result");
        }
    })
}
