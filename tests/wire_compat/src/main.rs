fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use goflux_protocol::{ChunkData, parse_list_response};
    use goflux_transfer::{Chunker, SourceFile, checksum_bytes, reassemble, verify_chunk};

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    fn read_fixture(name: &str) -> Vec<u8> {
        let path = fixtures_dir().join(name);
        fs::read(&path).unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        serde_json::from_slice(&read_fixture(name))
            .unwrap_or_else(|e| panic!("failed to parse fixture {name}: {e}"))
    }

    /// Deserializes a fixture into a Rust type, re-serializes it, and compares
    /// the JSON values (order-independent comparison).
    fn roundtrip_test<T>(name: &str) -> T
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));

        assert_eq!(
            fixture, reserialized,
            "roundtrip mismatch for {name}:\n  fixture: {fixture}\n  Rust:    {reserialized}"
        );
        parsed
    }

    // --- Upload request ---

    #[test]
    fn fixture_chunk_data() {
        let chunk: ChunkData = roundtrip_test("chunk_data.json");
        assert_eq!(chunk.path, "/docs/hello.txt");
        assert_eq!(chunk.data, b"hello");
        verify_chunk(&chunk).unwrap();
    }

    #[test]
    fn fixture_chunk_data_field_names() {
        let fixture = load_fixture("chunk_data.json");
        let obj = fixture.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["checksum", "chunk_id", "data", "path", "total"]);
        // Payload travels as an array of integers, not base64.
        assert!(obj["data"].is_array());
    }

    #[test]
    fn fixture_chunk_data_empty() {
        let chunk: ChunkData = roundtrip_test("chunk_data_empty.json");
        assert!(chunk.data.is_empty());
        assert_eq!(chunk.total, 1);
        assert_eq!(chunk.checksum, checksum_bytes(b""));
    }

    #[test]
    fn fixture_upload_sequence() {
        let chunks: Vec<ChunkData> = roundtrip_test("upload_sequence.json");
        assert_eq!(chunks.len(), 3);
        for chunk in &chunks {
            verify_chunk(chunk).unwrap();
            assert_eq!(chunk.total, 3);
        }
        assert_eq!(reassemble(&chunks).unwrap(), b"hello world");
    }

    #[test]
    fn chunker_reproduces_upload_sequence() {
        let expected: Vec<ChunkData> =
            serde_json::from_value(load_fixture("upload_sequence.json")).unwrap();

        let chunker = Chunker::new(4);
        let file = SourceFile::from_bytes("greeting.txt", b"hello world".to_vec());
        let target = goflux_protocol::RemotePath::parse("/docs/greeting.txt").unwrap();
        let total = chunker.total_blocks(file.size());
        let produced: Vec<ChunkData> = chunker
            .blocks(&file)
            .unwrap()
            .map(|b| b.unwrap().into_chunk_data(&target, total))
            .collect();

        assert_eq!(produced, expected);
    }

    // --- Listing response ---

    #[test]
    fn fixture_list_response() {
        let entries = parse_list_response(&read_fixture("list_response.json")).unwrap();
        assert_eq!(entries, vec!["report.csv", "photo.raw", "notes.txt"]);
    }

    #[test]
    fn fixture_list_response_null_and_empty() {
        assert!(
            parse_list_response(&read_fixture("list_response_null.json"))
                .unwrap()
                .is_empty()
        );
        assert!(
            parse_list_response(&read_fixture("list_response_empty.json"))
                .unwrap()
                .is_empty()
        );
    }
}
