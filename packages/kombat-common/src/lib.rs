pub mod draw;
pub mod randomness;
pub mod types;

pub use draw::{resolve_edition, ConfigError, ProbabilityTable, DENOMINATOR, MIX_INPUT_COUNT};
pub use randomness::{compute_request_id, derive_randomness, split_randomness, Roll};
pub use types::{Capability, MixRequestStatus, Tier};
