mod gateway;
mod migrate_guest_data;
mod validate_sync;

pub use gateway::{ContextServerGateway, IServerGateway, MigratedPlant, MigratedWateringEvent};
pub use migrate_guest_data::{
    IdMapping, MigrateGuestDataUseCase, SyncProgress, SyncResult, SyncStep,
};
pub use validate_sync::ValidateSyncUseCase;
