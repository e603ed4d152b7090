use super::{gateway::IServerGateway, migrate_guest_data::SyncResult};
use crate::shared::usecase::UseCase;
use plant_scheduler_domain::ID;
use plant_scheduler_infra::SchedulerContext;
use std::{collections::HashSet, convert::Infallible, fmt, sync::Arc};
use tracing::{error, warn};

/// Checks after a migration that every migrated plant can be found on the server
pub struct ValidateSyncUseCase {
    pub user_id: ID,
    pub sync_result: SyncResult,
    pub gateway: Arc<dyn IServerGateway>,
}

impl fmt::Debug for ValidateSyncUseCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidateSyncUseCase")
            .field("user_id", &self.user_id)
            .field("sync_result", &self.sync_result)
            .finish()
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ValidateSyncUseCase {
    type Response = bool;

    type Error = Infallible;

    const NAME: &'static str = "ValidateSync";

    async fn execute(&mut self, _ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        if !self.sync_result.success {
            return Ok(false);
        }

        let server_ids = match self.gateway.list_plant_ids(&self.user_id).await {
            Ok(ids) => ids.into_iter().collect::<HashSet<_>>(),
            Err(e) => {
                error!("Unable to list server plants for validation. Error: {:?}", e);
                return Ok(false);
            }
        };

        let missing = self
            .sync_result
            .id_mapping
            .plants
            .values()
            .filter(|id| !server_ids.contains(*id))
            .count();
        if missing > 0 {
            warn!("{} migrated plants were not found on the server", missing);
        }

        Ok(missing == 0)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reconciliation::ContextServerGateway;
    use plant_scheduler_domain::Plant;

    #[tokio::test]
    async fn validates_migrated_plants_are_on_server() {
        let server = SchedulerContext::create_inmemory();
        let user_id = ID::default();
        let plant = Plant::new(user_id.clone(), "Aloe".into(), 0);
        server.repos.plants.insert(&plant).await.unwrap();
        let gateway: Arc<dyn IServerGateway> = Arc::new(ContextServerGateway::new(server.clone()));

        let mut sync_result = SyncResult {
            success: true,
            plants_synced: 1,
            ..Default::default()
        };
        sync_result
            .id_mapping
            .plants
            .insert(ID::default(), plant.id.clone());

        let mut usecase = ValidateSyncUseCase {
            user_id: user_id.clone(),
            sync_result: sync_result.clone(),
            gateway: gateway.clone(),
        };
        assert_eq!(usecase.execute(&server).await, Ok(true));

        // A mapped plant that never arrived
        sync_result
            .id_mapping
            .plants
            .insert(ID::default(), ID::default());
        let mut usecase = ValidateSyncUseCase {
            user_id: user_id.clone(),
            sync_result: sync_result.clone(),
            gateway: gateway.clone(),
        };
        assert_eq!(usecase.execute(&server).await, Ok(false));

        let mut usecase = ValidateSyncUseCase {
            user_id,
            sync_result: SyncResult::default(),
            gateway,
        };
        assert_eq!(usecase.execute(&server).await, Ok(false));
    }
}
