mod telemetry;

use plant_scheduler_core::{execute, watering_event::GetOverdueWateringEventsUseCase};
use plant_scheduler_infra::{run_migration, setup_context, StorageMode};
use telemetry::{get_subscriber, init_subscriber};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("plant_scheduler".into(), "info".into());
    init_subscriber(subscriber)?;

    let ctx = setup_context().await?;

    match (ctx.mode, &ctx.local_storage) {
        (StorageMode::Server, _) => {
            if let Some(connection_string) = &ctx.config.database_url {
                info!("Running migrations");
                run_migration(connection_string).await?;
                info!("Running migrations ... [done]");
            }
        }
        (StorageMode::Local, Some(storage)) => {
            let guest_id = storage.guest_owner_id().await?;
            let usecase = GetOverdueWateringEventsUseCase {
                user_id: guest_id,
                as_of: None,
            };
            match execute(usecase, &ctx).await {
                Ok(events) => info!("{} plants are waiting to be watered", events.len()),
                Err(e) => warn!("Unable to check overdue waterings: {:?}", e),
            }
        }
        (StorageMode::Local, None) => warn!("Local mode without device storage"),
    }

    Ok(())
}
