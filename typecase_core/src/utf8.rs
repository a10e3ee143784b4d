//! UTF-8 decoding for the typesetter's pen walk.
//!
//! The lead byte selects one of the four standard length classes. Continuation
//! bytes are masked with `0x3F` and not otherwise validated. A NUL lead, an
//! unrecognized lead, or a sequence cut short by the end of input decodes to
//! codepoint 0, which every caller treats as end of string.

/// Decode the codepoint at the start of `bytes`.
///
/// Returns the scalar value and the number of bytes it occupies. End of
/// input, NUL, and an unrecognized lead byte all return `(0, 0)`.
pub fn decode(bytes: &[u8]) -> (u32, usize) {
    let Some(&lead) = bytes.first() else {
        return (0, 0);
    };

    let (len, payload) = match lead {
        0x00 => return (0, 0),
        b if b & 0x80 == 0x00 => (1, u32::from(b)),
        b if b & 0xE0 == 0xC0 => (2, u32::from(b & 0x1F)),
        b if b & 0xF0 == 0xE0 => (3, u32::from(b & 0x0F)),
        b if b & 0xF8 == 0xF0 => (4, u32::from(b & 0x07)),
        _ => return (0, 0),
    };

    let Some(tail) = bytes.get(1..len) else {
        return (0, 0);
    };

    let c = tail
        .iter()
        .fold(payload, |acc, &b| (acc << 6) | u32::from(b & 0x3F));
    (c, len)
}

/// Iterator over the codepoints of a byte string, stopping at the first 0.
#[derive(Debug, Clone)]
pub struct Codepoints<'a> {
    rest: &'a [u8],
}

impl Iterator for Codepoints<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let (c, len) = decode(self.rest);
        if c == 0 {
            self.rest = &[];
            return None;
        }
        self.rest = &self.rest[len..];
        Some(c)
    }
}

/// Walk the codepoints of `text`.
pub fn codepoints<T: AsRef<[u8]> + ?Sized>(text: &T) -> Codepoints<'_> {
    Codepoints {
        rest: text.as_ref(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_is_one_byte() {
        assert_eq!(decode(b"A"), (0x41, 1));
        assert_eq!(decode(b"~rest"), (0x7E, 1));
    }

    #[test]
    fn two_byte_e_acute() {
        // C3 A9
        assert_eq!(decode("é".as_bytes()), (0xE9, 2));
    }

    #[test]
    fn three_byte_euro() {
        assert_eq!(decode("€".as_bytes()), (0x20AC, 3));
    }

    #[test]
    fn four_byte_sequence_shifts_each_continuation_by_six() {
        // F0 9F 98 80
        assert_eq!(decode("😀".as_bytes()), (0x1F600, 4));
        assert_eq!(decode("\u{10FFFF}".as_bytes()), (0x10FFFF, 4));
    }

    #[test]
    fn every_scalar_round_trips() {
        let mut buf = [0u8; 4];
        for c in (1..=0x10FFFF).filter_map(char::from_u32) {
            let encoded = c.encode_utf8(&mut buf);
            let (decoded, len) = decode(encoded.as_bytes());
            assert_eq!(decoded, c as u32, "U+{:04X}", c as u32);
            assert_eq!(len, encoded.len());
        }
    }

    #[test]
    fn nul_terminates() {
        assert_eq!(decode(b"\0abc"), (0, 0));
        let all: Vec<u32> = codepoints(b"ab\0cd").collect();
        assert_eq!(all, vec![0x61, 0x62]);
    }

    #[test]
    fn empty_input_terminates() {
        assert_eq!(decode(b""), (0, 0));
        assert_eq!(codepoints("").count(), 0);
    }

    #[test]
    fn unrecognized_lead_decodes_to_zero() {
        // Bare continuation byte and the 5-byte-class leads.
        assert_eq!(decode(&[0x80, 0x41]), (0, 0));
        assert_eq!(decode(&[0xF8, 0x80, 0x80, 0x80]), (0, 0));
        assert_eq!(decode(&[0xFF]), (0, 0));
    }

    #[test]
    fn truncated_sequence_decodes_to_zero() {
        assert_eq!(decode(&[0xE2, 0x82]), (0, 0));
        assert_eq!(decode(&[0xC3]), (0, 0));
    }

    #[test]
    fn continuation_bytes_are_masked_not_validated() {
        // 0xC3 followed by a non-continuation byte 0x69 ('i'): 0x69 & 0x3F = 0x29.
        assert_eq!(decode(&[0xC3, 0x69]), ((0x03 << 6) | 0x29, 2));
    }

    #[test]
    fn iterator_walks_mixed_text() {
        let all: Vec<u32> = codepoints("a é€😀").collect();
        assert_eq!(all, vec![0x61, 0x20, 0xE9, 0x20AC, 0x1F600]);
    }
}
