use blake3::Hasher;

pub fn blake3_hex(data: &[u8]) -> String {
    let mut hasher = Hasher::new();
    hasher.update(data);
    let hash = hasher.finalize();
    hash.to_hex().to_string()
}

/// Short stable digest of a JSON payload, used to correlate log lines.
pub fn json_fingerprint<T: serde::Serialize>(value: &T) -> String {
    let body = serde_json::to_vec(value).unwrap_or_default();
    let mut hex = blake3_hex(&body);
    hex.truncate(16);
    hex
}
