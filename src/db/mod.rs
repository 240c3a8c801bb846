//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    /// Goal profiles (keyed by user ID)
    pub const GOAL_PROFILES: &str = "goal_profiles";
    pub const GOALS: &str = "goals";
    pub const WORKOUTS: &str = "workouts";
    pub const DIET_ENTRIES: &str = "diet_entries";
    /// Pre-built workouts used by the suggestion engine
    pub const WORKOUT_CATALOG: &str = "workout_catalog";
    pub const CHALLENGES: &str = "challenges";
}
