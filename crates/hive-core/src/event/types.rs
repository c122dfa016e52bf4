//! Payload vocabulary carried by game notifications.
//!
//! The registry never looks inside these values; it only hands them to every
//! component unchanged.
use std::fmt;

/// Game-assigned unit tag, unique for the lifetime of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitTag(pub u64);

impl fmt::Display for UnitTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whose side a unit is on, relative to the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alliance {
    Own,
    Ally,
    Neutral,
    Enemy,
}

/// Reference to a unit tracked by the game client
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnitRef {
    pub tag: UnitTag,
    /// Numeric unit type as reported by the game
    pub unit_type: u32,
    pub alliance: Alliance,
}

impl UnitRef {
    pub fn new(tag: u64, unit_type: u32, alliance: Alliance) -> Self {
        Self { tag: UnitTag(tag), unit_type, alliance }
    }
}

/// Completed research, identified by the game's numeric upgrade id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Upgrade(pub u32);

/// Announcer alerts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alert {
    AlertError,
    AddOnComplete,
    BuildingComplete,
    BuildingUnderAttack,
    LarvaHatched,
    MergeComplete,
    MineralsExhausted,
    MorphComplete,
    MothershipComplete,
    MuleExpired,
    NuclearLaunchDetected,
    NukeComplete,
    NydusWormDetected,
    ResearchComplete,
    TrainError,
    TrainUnitComplete,
    TrainWorkerComplete,
    TransformationComplete,
    UnitUnderAttack,
    UpgradeComplete,
    VespeneExhausted,
    WarpInComplete,
}

/// Client-level failures reported alongside protocol error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientError {
    /// The game itself reported an error
    ErrorSc2,
    InvalidAbilityRuntimeCast,
    InvalidResponse,
    NoAbilitiesForTag,
    ResponseMismatch,
    ResponseNotConsumed,
    Sc2AppFailure,
    Sc2ProtocolError,
    Sc2ProtocolTimeout,
    WrongGameMode,
}
