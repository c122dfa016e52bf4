use crate::event::types::{Alert, ClientError, UnitRef, Upgrade};

/// Dispatch names of the game notifications
pub mod names {
    pub const GAME_FULL_START: &str = "game.full_start";
    pub const GAME_START: &str = "game.start";
    pub const GAME_END: &str = "game.end";
    pub const STEP: &str = "game.step";
    pub const UNIT_ENTER_VISION: &str = "unit.enter_vision";
    pub const UNIT_CREATED: &str = "unit.created";
    pub const UNIT_DESTROYED: &str = "unit.destroyed";
    pub const UNIT_IDLE: &str = "unit.idle";
    pub const BUILDING_CONSTRUCTION_COMPLETE: &str = "building.construction_complete";
    pub const UPGRADE_COMPLETED: &str = "upgrade.completed";
    pub const NYDUS_DETECTED: &str = "alert.nydus_detected";
    pub const NUCLEAR_LAUNCH_DETECTED: &str = "alert.nuclear_launch_detected";
    pub const CLIENT_ERROR: &str = "client.error";
    pub const ALERT: &str = "alert";
}

/// One notification from the game driver.
///
/// Drivers that deliver a stream of notifications hand them to
/// [`ComponentRegistry::dispatch_event`](crate::ComponentRegistry::dispatch_event),
/// which routes each variant to the matching entry point.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    GameFullStart,
    GameStart,
    GameEnd,
    Step,
    UnitEnterVision(UnitRef),
    UnitCreated(UnitRef),
    UnitDestroyed(UnitRef),
    UnitIdle(UnitRef),
    BuildingConstructionComplete(UnitRef),
    UpgradeCompleted(Upgrade),
    NydusDetected,
    NuclearLaunchDetected,
    Error {
        client_errors: Vec<ClientError>,
        protocol_errors: Vec<String>,
    },
    Alert(Alert),
}

impl GameEvent {
    /// Stable dotted name used in logs and dispatch reports
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::GameFullStart => names::GAME_FULL_START,
            GameEvent::GameStart => names::GAME_START,
            GameEvent::GameEnd => names::GAME_END,
            GameEvent::Step => names::STEP,
            GameEvent::UnitEnterVision(_) => names::UNIT_ENTER_VISION,
            GameEvent::UnitCreated(_) => names::UNIT_CREATED,
            GameEvent::UnitDestroyed(_) => names::UNIT_DESTROYED,
            GameEvent::UnitIdle(_) => names::UNIT_IDLE,
            GameEvent::BuildingConstructionComplete(_) => names::BUILDING_CONSTRUCTION_COMPLETE,
            GameEvent::UpgradeCompleted(_) => names::UPGRADE_COMPLETED,
            GameEvent::NydusDetected => names::NYDUS_DETECTED,
            GameEvent::NuclearLaunchDetected => names::NUCLEAR_LAUNCH_DETECTED,
            GameEvent::Error { .. } => names::CLIENT_ERROR,
            GameEvent::Alert(_) => names::ALERT,
        }
    }
}
