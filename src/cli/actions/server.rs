use crate::cli::actions::Action;
use crate::gardisto::new;
use crate::store::MemoryStore;
use anyhow::Result;
use std::sync::Arc;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server { port } => {
            // In-memory backend for now; the engine only sees the trait,
            // so a persistent store slots in here.
            let store = Arc::new(MemoryStore::new());

            new(port, store).await?;
        }
    }

    Ok(())
}
