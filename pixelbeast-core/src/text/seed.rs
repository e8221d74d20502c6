use sha2::{Digest, Sha256};

/// Reproducible 32-bit seed derived from description text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Seed(pub u32);

/// Derive the seed for `description`.
///
/// The seed is the SHA-256 digest of the UTF-8 bytes read as a big-endian integer, modulo
/// 2^32 (the last four digest bytes). Any string is valid, including the empty one.
pub fn derive_seed(description: &str) -> Seed {
    seed_from_parts(&[description.as_bytes()])
}

/// Derive the seed for `description` immediately followed by `suffix`.
pub fn derive_seed_with_suffix(description: &str, suffix: &str) -> Seed {
    seed_from_parts(&[description.as_bytes(), suffix.as_bytes()])
}

fn seed_from_parts(parts: &[&[u8]]) -> Seed {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    let digest = hasher.finalize();
    let tail: [u8; 4] = [digest[28], digest[29], digest[30], digest[31]];
    Seed(u32::from_be_bytes(tail))
}

#[cfg(test)]
#[path = "../../tests/unit/text/seed.rs"]
mod tests;
