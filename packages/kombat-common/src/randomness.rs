use cosmwasm_std::Uint256;
use sha2::{Digest, Sha256};

use crate::draw::DENOMINATOR;

/// Domain prefix for locally derived mix randomness.
const LOCAL_RANDOMNESS_PREFIX: u8 = 0x10;
/// Domain prefix for oracle request ids.
const REQUEST_ID_PREFIX: u8 = 0x20;

/// A random value split into the two quantities the mixer consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roll {
    /// Position in `[0, DENOMINATOR)` fed to the weighted draw.
    pub draw: u64,
    /// Index into the output tier's item pool (taken modulo its length).
    pub index: u64,
}

/// `draw = randomness mod DENOMINATOR`, `index = low 64 bits of
/// randomness div DENOMINATOR`.
pub fn split_randomness(randomness: Uint256) -> Roll {
    let denominator = Uint256::from(DENOMINATOR);
    Roll {
        draw: low_u64(randomness % denominator),
        index: low_u64(randomness / denominator),
    }
}

/// Derive a 256-bit value from call-local context.
///
/// `randomness = sha256( 0x10 || len(part_0) || part_0 || ... )` with each
/// length as a big-endian u32, so distinct part lists never collide.
/// Not suitable where validators or callers can grind the inputs.
pub fn derive_randomness(parts: &[&[u8]]) -> Uint256 {
    let mut hasher = Sha256::new();
    hasher.update([LOCAL_RANDOMNESS_PREFIX]);
    for part in parts {
        hasher.update((part.len() as u32).to_be_bytes());
        hasher.update(part);
    }
    let digest: [u8; 32] = hasher.finalize().into();
    Uint256::from_be_bytes(digest)
}

/// Request id for an oracle randomness request, hex-encoded.
///
/// `request_id = sha256( 0x20 || key_hash || seed_be32 || requester || nonce_be8 )`
pub fn compute_request_id(key_hash: &str, seed: Uint256, requester: &str, nonce: u64) -> String {
    let mut hasher = Sha256::new();
    hasher.update([REQUEST_ID_PREFIX]);
    hasher.update((key_hash.len() as u32).to_be_bytes());
    hasher.update(key_hash.as_bytes());
    hasher.update(seed.to_be_bytes());
    hasher.update((requester.len() as u32).to_be_bytes());
    hasher.update(requester.as_bytes());
    hasher.update(nonce.to_be_bytes());
    hex::encode(hasher.finalize())
}

fn low_u64(value: Uint256) -> u64 {
    let bytes = value.to_be_bytes();
    let mut low = [0u8; 8];
    low.copy_from_slice(&bytes[24..32]);
    u64::from_be_bytes(low)
}
