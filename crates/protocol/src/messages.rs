use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

/// Body of a single block upload (`POST /upload`).
///
/// `data` serializes as a JSON array of integers (one per byte), which
/// is the shape the store's web client sends. Field names are
/// case-sensitive and must not be renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkData {
    /// Full target path of the file in the namespace.
    pub path: String,
    /// Zero-based block index.
    pub chunk_id: u64,
    /// Block payload.
    pub data: Vec<u8>,
    /// Lowercase hex SHA-256 of `data`.
    pub checksum: String,
    /// Number of blocks in the file; constant across one upload.
    pub total: u64,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Parses a `/list` response body.
///
/// The store answers with a JSON array of entry names, or `null` when the
/// path has no entries. Both `null` and `[]` yield an empty vector.
pub fn parse_list_response(body: &[u8]) -> Result<Vec<String>, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let entries: Option<Vec<String>> = serde_json::from_slice(body)?;
    Ok(entries.unwrap_or_default())
}
