//! Incremental decoder for newline-delimited JSON response bodies.

use super::progress::BulkUploadEvent;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Invalid progress line `{line}`: {source}")]
pub struct NdjsonError {
    pub line: String,
    #[source]
    pub source: serde_json::Error,
}

/// Splits a byte stream into lines and decodes each one.
///
/// Chunks may end anywhere, including inside a multi-byte character; bytes
/// are kept until their line is complete. `\n` never occurs inside a UTF-8
/// sequence, so splitting on it before decoding is safe.
#[derive(Debug)]
pub struct NdjsonDecoder<T = BulkUploadEvent> {
    buffer: Vec<u8>,
    _item: PhantomData<T>,
}

impl<T> Default for NdjsonDecoder<T> {
    fn default() -> Self {
        Self {
            buffer: Vec::new(),
            _item: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> NdjsonDecoder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk, returning every line it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Result<T, NdjsonError>> {
        self.buffer.extend_from_slice(chunk);

        let mut out = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if let Some(item) = decode_line(&line[..line.len() - 1]) {
                out.push(item);
            }
        }
        out
    }

    /// Decode whatever is left once the stream has ended.
    pub fn finish(&mut self) -> Option<Result<T, NdjsonError>> {
        let rest = std::mem::take(&mut self.buffer);
        decode_line(&rest)
    }

    pub fn has_pending(&self) -> bool {
        self.buffer.iter().any(|b| !b.is_ascii_whitespace())
    }
}

fn decode_line<T: DeserializeOwned>(raw: &[u8]) -> Option<Result<T, NdjsonError>> {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    if raw.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    Some(serde_json::from_slice(raw).map_err(|source| NdjsonError {
        line: String::from_utf8_lossy(raw).trim().to_string(),
        source,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_split_across_chunks() {
        let mut decoder: NdjsonDecoder = NdjsonDecoder::new();
        assert!(decoder.push(br#"{"type":"init","#).is_empty());
        assert!(decoder.has_pending());

        let events = decoder.push(b"\"total\":2}\n\n{\"type\":\"progress\",\"processed\":1}\r\n{\"type\"");
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], Ok(BulkUploadEvent::Init { total: 2, .. })));
        assert!(matches!(events[1], Ok(BulkUploadEvent::Progress { .. })));

        let events = decoder.push(br#":"complete"}"#);
        assert!(events.is_empty());
        assert!(matches!(decoder.finish(), Some(Ok(BulkUploadEvent::Complete { .. }))));
        assert!(decoder.finish().is_none());
    }

    #[test]
    fn test_multibyte_character_split() {
        let line = "{\"type\":\"error\",\"message\":\"Größe ✓\"}\n".as_bytes();
        // split inside the two-byte "ö"
        let cut = line.iter().position(|b| *b >= 0x80).unwrap() + 1;

        let mut decoder: NdjsonDecoder = NdjsonDecoder::new();
        assert!(decoder.push(&line[..cut]).is_empty());
        let events = decoder.push(&line[cut..]);
        match &events[0] {
            Ok(BulkUploadEvent::Error { message }) => assert_eq!(message, "Größe ✓"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_bad_line_is_reported_and_decoding_continues() {
        let mut decoder: NdjsonDecoder = NdjsonDecoder::new();
        let events = decoder.push(b"not json\n{\"type\":\"complete\"}\n");
        assert_eq!(events.len(), 2);
        let err = events[0].as_ref().unwrap_err();
        assert_eq!(err.line, "not json");
        assert!(events[1].is_ok());
    }
}
