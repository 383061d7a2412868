use tracing::debug;

use crate::convert::translate;
use crate::fix::error::ParseError;
use crate::fix::tags::{SOH, Tag, Version, tag_width};

/// One `tag=value` field. Both parts are borrowed views into the parser's
/// input and do not outlive it. Unknown tag numbers are not an error;
/// callers interpret the raw pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawTag<'a> {
    pub tag: u32,
    pub value: &'a [u8],
}

/// A FIX message parser over a borrowed byte slice.
///
/// Construction validates the framing in order: the input is non-empty,
/// the first tag is BeginString, the second is BodyLength and its value
/// is consistent with the input length, and the declared CheckSum matches
/// an independent byte-sum over everything before the `10=` tag. After
/// construction the cursor sits on the first body tag (MsgType for a
/// well-formed message).
#[derive(Debug)]
pub struct Parser<'a> {
    buf: &'a [u8],
    next: usize,
    checksum: u32,
    version: Version,
    body_length: u32,
    declared_checksum: u32,
}

impl<'a> Parser<'a> {
    pub fn new(buf: &'a [u8]) -> Result<Self, ParseError> {
        if buf.is_empty() {
            return Err(ParseError::Syntax("Empty FIX message"));
        }
        let mut parser = Self {
            buf,
            next: 0,
            checksum: 0,
            version: Version::Unknown,
            body_length: 0,
            declared_checksum: 0,
        };
        parser.read_begin_string()?;
        parser.read_body_length()?;
        parser.verify_checksum()?;
        Ok(parser)
    }

    /// The version named by BeginString; `Unknown` for unrecognized ones.
    pub fn version(&self) -> Version {
        self.version
    }

    /// The declared body length.
    pub fn body_length(&self) -> u32 {
        self.body_length
    }

    /// The declared checksum.
    pub fn checksum(&self) -> u32 {
        self.declared_checksum
    }

    /// Advance past one `tag=value SOH` field; `None` at end of input.
    ///
    /// The rolling checksum accumulator is kept in sync with every byte
    /// consumed here. Callers never consult it directly; keeping the
    /// updates inside the tokenizer is what keeps it in sync.
    pub fn next_tag(&mut self) -> Result<Option<RawTag<'a>>, ParseError> {
        if self.next == self.buf.len() {
            return Ok(None);
        }

        let mut tag: u32 = 0;
        while self.next != self.buf.len() && self.buf[self.next] != b'=' {
            let byte = self.buf[self.next];
            if !byte.is_ascii_digit() {
                return Err(ParseError::Syntax("Non-digit in tag specification"));
            }
            self.checksum = self.checksum.wrapping_add(byte as u32);
            tag = tag.wrapping_mul(10).wrapping_add((byte - b'0') as u32);
            self.next += 1;
        }

        if self.next == self.buf.len() {
            return Err(ParseError::Incomplete("Missing '='"));
        }
        self.checksum = self.checksum.wrapping_add(b'=' as u32);
        self.next += 1;

        let begin = self.next;
        while self.next != self.buf.len() && self.buf[self.next] != SOH {
            self.checksum = self.checksum.wrapping_add(self.buf[self.next] as u32);
            self.next += 1;
        }
        if self.next == self.buf.len() {
            return Err(ParseError::Incomplete("Missing SOH"));
        }
        self.checksum = self.checksum.wrapping_add(SOH as u32);

        let value = &self.buf[begin..self.next];
        self.next += 1;

        Ok(Some(RawTag { tag, value }))
    }

    fn read_begin_string(&mut self) -> Result<(), ParseError> {
        let Some(field) = self.next_tag()? else {
            return Err(ParseError::Syntax("Expected BeginString"));
        };
        if field.tag != Tag::BeginString.num() {
            return Err(ParseError::Syntax("Tag not BeginString"));
        }
        self.version = Version::from_name(field.value);
        Ok(())
    }

    fn read_body_length(&mut self) -> Result<(), ParseError> {
        let Some(field) = self.next_tag()? else {
            return Err(ParseError::Syntax("Expected BodyLength"));
        };
        if field.tag != Tag::BodyLength.num() {
            return Err(ParseError::Syntax("Expected BodyLength"));
        }
        self.body_length = translate::<u32>(field.value);

        // Everything after this field must be the declared body plus the
        // trailing `10=` tag, its three digits, and its SOH.
        let computed_end = self.next + self.body_length as usize + 4 + tag_width::CHECKSUM;
        if computed_end != self.buf.len() {
            debug!(
                declared = self.body_length,
                input = self.buf.len(),
                "body length mismatch"
            );
            return Err(ParseError::Syntax("Incorrect BodyLength"));
        }
        Ok(())
    }

    fn verify_checksum(&mut self) -> Result<(), ParseError> {
        let checksum_start = self.next + self.body_length as usize;
        let digits = &self.buf[checksum_start + 3..checksum_start + 3 + tag_width::CHECKSUM];
        let declared = translate::<u32>(digits);

        // The accumulator already covers the framing fields consumed so
        // far; summing the body completes the message-wide checksum.
        let computed = self.buf[self.next..checksum_start]
            .iter()
            .fold(self.checksum, |sum, &byte| sum.wrapping_add(byte as u32))
            % 256;
        if computed != declared {
            debug!(declared, computed, "checksum mismatch");
            return Err(ParseError::Syntax("Invalid checksum"));
        }
        self.declared_checksum = declared;
        Ok(())
    }
}
