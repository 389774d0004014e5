use std::fmt;

use cosmwasm_schema::cw_serde;

/// Rarity tier of a hero. Declaration order is presentation order only;
/// no logic depends on it.
#[cw_serde]
#[derive(Copy, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Genesis,
    Epic,
    Rare,
    Common,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Genesis, Tier::Epic, Tier::Rare, Tier::Common];

    /// Stable storage key for this tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Genesis => "genesis",
            Tier::Epic => "epic",
            Tier::Rare => "rare",
            Tier::Common => "common",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of an oracle-backed mix request. `Fulfilled` is terminal.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum MixRequestStatus {
    Pending,
    Fulfilled,
}

/// Capabilities checked by the contracts before privileged operations.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum Capability {
    /// May mint items on the collection.
    Minter,
    /// May deliver randomness to the mixer.
    Coordinator,
    /// May change configuration.
    Administrator,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Minter => "minter",
            Capability::Coordinator => "coordinator",
            Capability::Administrator => "administrator",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
