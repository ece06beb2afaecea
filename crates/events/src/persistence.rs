//! Background persistence of activity events into `activity_log`.

use memorial_db::models::activity::{ActivityEntry, CreateActivity};
use memorial_db::repositories::ActivityRepo;
use memorial_db::DbPool;
use tokio::sync::broadcast;

use crate::bus::ActivityEvent;

pub struct ActivityPersistence;

impl ActivityPersistence {
    /// Persist every event received on `receiver`.
    ///
    /// Exits when the channel closes, i.e. when the [`EventBus`](crate::EventBus)
    /// is dropped. Write failures are logged and skipped.
    pub async fn run(pool: DbPool, mut receiver: broadcast::Receiver<ActivityEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = Self::persist(&pool, &event).await {
                        tracing::error!(
                            error = %e,
                            action = %event.action,
                            candle_id = ?event.candle_id,
                            "Failed to persist activity entry"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Activity persistence lagged, entries were lost");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Activity bus closed, persistence shutting down");
                    break;
                }
            }
        }
    }

    async fn persist(pool: &DbPool, event: &ActivityEvent) -> Result<ActivityEntry, sqlx::Error> {
        ActivityRepo::insert(
            pool,
            &CreateActivity {
                action: event.action.clone(),
                candle_id: event.candle_id,
                actor: event.actor.clone(),
                details: event.details.clone(),
            },
        )
        .await
    }
}
