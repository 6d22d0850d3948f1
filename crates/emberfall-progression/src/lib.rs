//! Equipment and progression rules.
//!
//! Every operation here is total: invalid requests come back as an explicit
//! no-op or rejection outcome and leave the player untouched.

pub mod fusion;
pub mod inventory;
pub mod leveling;
pub mod loadout;
pub mod rewards;
pub mod stats;
pub mod upgrade;

pub use fusion::{FusionOutcome, FusionRejection, fuse, fuse_owned};
pub use inventory::{EquipOutcome, EquipRejection};
pub use loadout::{new_player, restore_player};
pub use stats::{AllocateOutcome, allocate_stat, total_bonuses};
pub use upgrade::{EvolveOutcome, UpgradeOutcome, evolve_weapon, upgrade_weapon};
