#![doc = include_str!("../README.md")]

pub mod ctrl;
pub mod group;
mod probe;
mod seed;

pub use ctrl::CtrlArray;
pub use group::{DefaultGroup, GroupQuery, MatchMask};
pub use probe::{find_first_non_full, Exploration, FindInfo, ProbeSeq, Prober, TableFull};
pub use seed::{h2, AddressSeed, HashSplitter, IdentitySeed};
