use sha2::{
    Digest,
    Sha256,
};

// Model and deck IDs live in a 10^10 space so repeated generation with
// the same title reproduces the same package identity.
const ID_SPACE: u64 = 10_000_000_000;

/// Stable integer ID for a string: SHA-256 reduced modulo 10^10.
/// Identical input always maps to the identical ID.
pub fn deterministic_id(input: &str) -> i64 {
    let digest = Sha256::digest(input.as_bytes());
    let mut acc: u64 = 0;
    for byte in digest {
        acc = (acc * 256 + byte as u64) % ID_SPACE;
    }
    acc as i64
}

/// Stable note GUID derived from the joined field values.
pub fn note_guid(fields: &[String]) -> String {
    let mut hasher = Sha256::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            hasher.update([0x1f]);
        }
        hasher.update(field.as_bytes());
    }
    hex::encode(&hasher.finalize()[..8])
}

/// Duplicate-detection checksum over the sort field: the leading 8 hex
/// digits of the digest as an integer.
pub fn field_checksum(text: &str) -> i64 {
    let digest = hex::encode(Sha256::digest(text.as_bytes()));
    i64::from_str_radix(&digest[..8], 16).unwrap_or(0)
}
