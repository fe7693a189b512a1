//! Definitions of the Ethereum protocol versions (`SpecId`) known to the interpreter.

use core::{
    fmt::{self, Display},
    str::FromStr,
};
use serde::{Deserialize, Serialize};

/// Spec id, defining the hardfork whose opcode set and gas schedule are active.
///
/// Forks are ordered; a later fork enables everything an earlier fork enables. Opcode
/// handlers gate themselves with [`SpecId::is_enabled`] and fail with `InvalidOpcode`
/// when run under a fork that predates them.
#[repr(u8)]
#[derive(
    Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[allow(non_camel_case_types, clippy::upper_case_acronyms, missing_docs)]
pub enum SpecId {
    FRONTIER,
    HOMESTEAD,
    TANGERINE,
    SPURIOUS_DRAGON,
    BYZANTIUM,
    CONSTANTINOPLE,
    PETERSBURG,
    ISTANBUL,
    BERLIN,
    LONDON,
    MERGE,
    SHANGHAI,
    #[default]
    CANCUN,
}

/// String identifiers for the protocol versions.
#[allow(missing_docs)]
pub mod name {
    pub const FRONTIER: &str = "Frontier";
    pub const HOMESTEAD: &str = "Homestead";
    pub const TANGERINE: &str = "Tangerine";
    pub const SPURIOUS_DRAGON: &str = "SpuriousDragon";
    pub const BYZANTIUM: &str = "Byzantium";
    pub const CONSTANTINOPLE: &str = "Constantinople";
    pub const PETERSBURG: &str = "Petersburg";
    pub const ISTANBUL: &str = "Istanbul";
    pub const BERLIN: &str = "Berlin";
    pub const LONDON: &str = "London";
    pub const MERGE: &str = "Merge";
    pub const SHANGHAI: &str = "Shanghai";
    pub const CANCUN: &str = "Cancun";
}

impl SpecId {
    /// Checks if the given [`SpecId`] is enabled in the current [`SpecId`].
    ///
    /// Forks are backward compatible, so everything an earlier fork enables is also
    /// enabled in a later one.
    pub const fn is_enabled(self, other: Self) -> bool {
        other as u8 <= self as u8
    }

    /// Checks if the current [`SpecId`] predates the given one.
    pub const fn is_before(self, other: Self) -> bool {
        (self as u8) < other as u8
    }
}

/// Error returned when parsing an unknown hardfork name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown hardfork")]
pub struct UnknownHardfork;

impl From<SpecId> for &'static str {
    fn from(spec_id: SpecId) -> Self {
        match spec_id {
            SpecId::FRONTIER => name::FRONTIER,
            SpecId::HOMESTEAD => name::HOMESTEAD,
            SpecId::TANGERINE => name::TANGERINE,
            SpecId::SPURIOUS_DRAGON => name::SPURIOUS_DRAGON,
            SpecId::BYZANTIUM => name::BYZANTIUM,
            SpecId::CONSTANTINOPLE => name::CONSTANTINOPLE,
            SpecId::PETERSBURG => name::PETERSBURG,
            SpecId::ISTANBUL => name::ISTANBUL,
            SpecId::BERLIN => name::BERLIN,
            SpecId::LONDON => name::LONDON,
            SpecId::MERGE => name::MERGE,
            SpecId::SHANGHAI => name::SHANGHAI,
            SpecId::CANCUN => name::CANCUN,
        }
    }
}

impl FromStr for SpecId {
    type Err = UnknownHardfork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            name::FRONTIER => Ok(Self::FRONTIER),
            name::HOMESTEAD => Ok(Self::HOMESTEAD),
            name::TANGERINE => Ok(Self::TANGERINE),
            name::SPURIOUS_DRAGON => Ok(Self::SPURIOUS_DRAGON),
            name::BYZANTIUM => Ok(Self::BYZANTIUM),
            name::CONSTANTINOPLE => Ok(Self::CONSTANTINOPLE),
            name::PETERSBURG => Ok(Self::PETERSBURG),
            name::ISTANBUL => Ok(Self::ISTANBUL),
            name::BERLIN => Ok(Self::BERLIN),
            name::LONDON => Ok(Self::LONDON),
            name::MERGE => Ok(Self::MERGE),
            name::SHANGHAI => Ok(Self::SHANGHAI),
            name::CANCUN => Ok(Self::CANCUN),
            _ => Err(UnknownHardfork),
        }
    }
}

impl Display for SpecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fork_ordering() {
        assert!(SpecId::CANCUN.is_enabled(SpecId::FRONTIER));
        assert!(SpecId::CANCUN.is_enabled(SpecId::CANCUN));
        assert!(SpecId::BERLIN.is_enabled(SpecId::ISTANBUL));
        assert!(!SpecId::ISTANBUL.is_enabled(SpecId::BERLIN));
        assert!(SpecId::PETERSBURG.is_before(SpecId::ISTANBUL));
        assert!(!SpecId::LONDON.is_before(SpecId::LONDON));
    }

    #[test]
    fn fork_name_round_trip() {
        for spec in [SpecId::FRONTIER, SpecId::PETERSBURG, SpecId::MERGE, SpecId::CANCUN] {
            assert_eq!(spec.to_string().parse::<SpecId>(), Ok(spec));
        }
        assert_eq!("Osaka".parse::<SpecId>(), Err(UnknownHardfork));
    }
}
