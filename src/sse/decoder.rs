//! Incremental UTF-8 decoding for chunked byte streams.
//!
//! Network chunks may end in the middle of a multi-byte character. The
//! decoder holds those trailing bytes back until the rest of the sequence
//! arrives, so a character is never split into replacement characters just
//! because of where a chunk boundary fell.

const REPLACEMENT: char = char::REPLACEMENT_CHARACTER;

/// Streaming UTF-8 decoder that carries partial sequences between chunks.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    /// Bytes of an incomplete trailing sequence (at most 3)
    pending: Vec<u8>,
}

impl Utf8Decoder {
    /// Create a new decoder with no carried state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if bytes are being held for the next chunk.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Decode a chunk, appending the text to `out`.
    ///
    /// Invalid sequences become U+FFFD. An incomplete sequence at the end of
    /// the chunk is kept for the next call.
    pub fn decode_into(&mut self, chunk: &[u8], out: &mut String) {
        let owned;
        let mut input: &[u8] = if self.pending.is_empty() {
            chunk
        } else {
            self.pending.extend_from_slice(chunk);
            owned = std::mem::take(&mut self.pending);
            &owned
        };

        loop {
            match std::str::from_utf8(input) {
                Ok(text) => {
                    out.push_str(text);
                    return;
                }
                Err(err) => {
                    let (valid, rest) = input.split_at(err.valid_up_to());
                    // `valid_up_to` guarantees this prefix is well formed
                    if let Ok(text) = std::str::from_utf8(valid) {
                        out.push_str(text);
                    }
                    match err.error_len() {
                        Some(len) => {
                            out.push(REPLACEMENT);
                            input = &rest[len..];
                        }
                        None => {
                            // Truncated sequence at the end of input
                            self.pending.extend_from_slice(rest);
                            return;
                        }
                    }
                }
            }
        }
    }

    /// Finish decoding at end of input.
    ///
    /// Any held-back bytes can no longer be completed and are emitted as a
    /// single U+FFFD.
    pub fn finish(&mut self, out: &mut String) {
        if !self.pending.is_empty() {
            self.pending.clear();
            out.push(REPLACEMENT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(decoder: &mut Utf8Decoder, chunk: &[u8]) -> String {
        let mut out = String::new();
        decoder.decode_into(chunk, &mut out);
        out
    }

    #[test]
    fn test_ascii_passthrough() {
        let mut decoder = Utf8Decoder::new();
        assert_eq!(decode(&mut decoder, b"event: a\n"), "event: a\n");
        assert!(!decoder.has_pending());
    }

    #[test]
    fn test_split_multibyte_character() {
        let bytes = "héllo".as_bytes();
        // 'é' is two bytes starting at index 1
        let mut decoder = Utf8Decoder::new();
        let first = decode(&mut decoder, &bytes[..2]);
        assert_eq!(first, "h");
        assert!(decoder.has_pending());
        let second = decode(&mut decoder, &bytes[2..]);
        assert_eq!(second, "éllo");
        assert!(!decoder.has_pending());
    }

    #[test]
    fn test_four_byte_character_split_byte_by_byte() {
        let bytes = "🦀".as_bytes();
        let mut decoder = Utf8Decoder::new();
        let mut out = String::new();
        for byte in bytes {
            decoder.decode_into(std::slice::from_ref(byte), &mut out);
        }
        assert_eq!(out, "🦀");
    }

    #[test]
    fn test_invalid_byte_replaced() {
        let mut decoder = Utf8Decoder::new();
        assert_eq!(decode(&mut decoder, b"a\xFFb"), "a\u{FFFD}b");
        assert!(!decoder.has_pending());
    }

    #[test]
    fn test_finish_flushes_truncated_sequence() {
        let mut decoder = Utf8Decoder::new();
        let mut out = decode(&mut decoder, &"é".as_bytes()[..1]);
        assert_eq!(out, "");
        decoder.finish(&mut out);
        assert_eq!(out, "\u{FFFD}");
        assert!(!decoder.has_pending());
    }

    #[test]
    fn test_finish_without_pending_is_noop() {
        let mut decoder = Utf8Decoder::new();
        let mut out = decode(&mut decoder, b"done");
        decoder.finish(&mut out);
        assert_eq!(out, "done");
    }
}
