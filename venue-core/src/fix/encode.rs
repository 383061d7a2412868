use chrono::{DateTime, Datelike, NaiveDateTime, Timelike, Utc};

use crate::fix::tags::{MsgType, SOH, Tag, Version, tag_width};

/// Fraction digits used when appending a real value.
pub const DEFAULT_REAL_DIGITS: usize = 6;

/// Encodes a fix message top-to-bottom into a caller-provided buffer.
///
/// Construction writes the fixed prefix: BeginString, a placeholder
/// BodyLength, MsgType, and placeholders for MsgSeqNum, SendingTime, and
/// LastMsgSeqNumProcessed. Placeholders are fixed-width so [`finalize`]
/// can overwrite them in place. Every written byte except the trailing
/// CheckSum field feeds the rolling checksum.
///
/// The buffer must be large enough for the full message; writes past its
/// end panic. `size()` is not valid for transmission until `finalize`
/// has run.
///
/// [`finalize`]: Encode::finalize
pub struct Encode<'a> {
    buf: &'a mut [u8],
    next: usize,
    checksum: u32,
    body_length_field: usize,
    body_length_field_end: usize,
    msg_seq_num_field: usize,
    sending_time_field: usize,
    last_msg_seq_num_processed_field: usize,
}

impl<'a> Encode<'a> {
    /// Initialize a new fix message of `msg_type` for `version`.
    pub fn new(msg_type: MsgType, version: Version, buf: &'a mut [u8]) -> Self {
        let mut message = Self {
            buf,
            next: 0,
            checksum: 0,
            body_length_field: 0,
            body_length_field_end: 0,
            msg_seq_num_field: 0,
            sending_time_field: 0,
            last_msg_seq_num_processed_field: 0,
        };
        message.append(Tag::BeginString, version.name());
        message.body_length_field = message.placeholder(Tag::BodyLength, tag_width::BODY_LENGTH);
        message.body_length_field_end = message.next;

        message.append(Tag::MsgType, msg_type);
        message.msg_seq_num_field = message.placeholder(Tag::MsgSeqNum, tag_width::MSG_SEQ_NUM);
        message.sending_time_field =
            message.placeholder(Tag::SendingTime, tag_width::SENDING_TIME);
        message.last_msg_seq_num_processed_field = message.placeholder(
            Tag::LastMsgSeqNumProcessed,
            tag_width::LAST_MSG_SEQ_NUM_PROCESSED,
        );
        message
    }

    /// The current length of the encoded message.
    pub fn size(&self) -> usize {
        self.next
    }

    /// The capacity of the message buffer.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Append `tag=value` to the end of the message under construction.
    pub fn append<V: FixValue>(&mut self, tag: Tag, value: V) {
        self.begin_tag(tag);
        value.put(self);
        self.end_tag();
    }

    /// Append `tag=value` with the numeric value left-zero-padded to
    /// `width` characters.
    pub fn append_padded<V: FixWidthValue>(&mut self, tag: Tag, value: V, width: usize) {
        self.begin_tag(tag);
        value.put_width(self, width);
        self.end_tag();
    }

    /// Finalize the fix message by back-filling the header placeholders
    /// and appending the checksum:
    /// 1. BodyLength: bytes from the end of its own field through the
    ///    last written byte, excluding the CheckSum still to come.
    /// 2. MsgSeqNum and LastMsgSeqNumProcessed.
    /// 3. SendingTime from the wall clock.
    /// 4. `10=<cksum>SOH`, not itself included in the checksum.
    ///
    /// Afterwards `size()` bytes from the start of the buffer form a
    /// self-consistent message.
    pub fn finalize(&mut self, seq_number: u32, last_seq_number: u32) {
        let length = self.next - self.body_length_field_end;
        self.insert_unsigned(self.body_length_field, tag_width::BODY_LENGTH, length as u64);
        self.insert_unsigned(
            self.msg_seq_num_field,
            tag_width::MSG_SEQ_NUM,
            seq_number as u64,
        );
        self.insert_unsigned(
            self.last_msg_seq_num_processed_field,
            tag_width::LAST_MSG_SEQ_NUM_PROCESSED,
            last_seq_number as u64,
        );

        // timestamp the message completion
        let now = Utc::now();
        let save = self.next;
        self.next = self.sending_time_field;
        self.put_timestamp(&now);
        self.next = save;

        // append checksum
        let checksum = self.checksum % 256;
        self.buf[self.next] = b'1';
        self.buf[self.next + 1] = b'0';
        self.buf[self.next + 2] = b'=';
        self.buf[self.next + 3] = b'0' + (checksum / 100) as u8;
        self.buf[self.next + 4] = b'0' + ((checksum % 100) / 10) as u8;
        self.buf[self.next + 5] = b'0' + (checksum % 10) as u8;
        self.buf[self.next + 6] = SOH;
        self.next += 7;
    }

    /// Append `tag=` followed by a zero-filled region of `width` bytes,
    /// returning the region's offset. The region's checksum contribution
    /// is accounted when the value is inserted over it.
    fn placeholder(&mut self, tag: Tag, width: usize) -> usize {
        self.begin_tag(tag);
        let field = self.next;
        self.buf[field..field + width].fill(b'0');
        self.next += width;
        self.end_tag();
        field
    }

    fn begin_tag(&mut self, tag: Tag) {
        self.put_unsigned(tag.num() as u64);
        self.put_byte(b'=');
    }

    fn end_tag(&mut self) {
        self.put_byte(SOH);
    }

    fn put_byte(&mut self, byte: u8) {
        self.buf[self.next] = byte;
        self.next += 1;
        self.checksum = self.checksum.wrapping_add(byte as u32);
    }

    fn put_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.put_byte(byte);
        }
    }

    fn put_unsigned(&mut self, mut value: u64) {
        let mut digits = [0u8; 20];
        let mut count = 0;
        loop {
            digits[count] = b'0' + (value % 10) as u8;
            count += 1;
            value /= 10;
            if value == 0 {
                break;
            }
        }
        while count > 0 {
            count -= 1;
            self.put_byte(digits[count]);
        }
    }

    /// Write `value` right-aligned into exactly `width` bytes, front
    /// padded with '0'. Digits beyond `width` are dropped, consistent
    /// with the converter's silent-wrap contract.
    fn put_unsigned_width(&mut self, mut value: u64, width: usize) {
        let start = self.next;
        let mut index = width;
        while index > 0 {
            index -= 1;
            self.buf[start + index] = b'0' + (value % 10) as u8;
            value /= 10;
        }
        self.next += width;
        for offset in 0..width {
            self.checksum = self.checksum.wrapping_add(self.buf[start + offset] as u32);
        }
    }

    fn put_signed(&mut self, value: i64) {
        if value < 0 {
            self.put_byte(b'-');
        }
        self.put_unsigned(value.unsigned_abs());
    }

    fn put_signed_width(&mut self, value: i64, width: usize) {
        if value < 0 {
            self.put_byte(b'-');
        }
        self.put_unsigned_width(value.unsigned_abs(), width);
    }

    fn put_real(&mut self, value: f64, digits: usize) {
        let mut value = value;
        if value < 0.0 {
            self.put_byte(b'-');
            value = -value;
        }

        // split into whole and fraction; the small bias rounds the scaled
        // fraction up before truncation
        let whole = value.trunc();
        let fraction = (value.fract() * 10f64.powi(digits as i32)) + 0.9;

        self.put_unsigned(whole as u64);
        self.put_byte(b'.');
        self.put_unsigned_width(fraction as u64, digits);
    }

    fn put_two(&mut self, value: u32) {
        self.put_byte(b'0' + (value / 10) as u8);
        self.put_byte(b'0' + (value % 10) as u8);
    }

    /// `YYYYMMDD-HH:MM:SS`
    fn put_datetime(&mut self, value: &NaiveDateTime) {
        self.put_unsigned_width(value.year() as u64, 4);
        self.put_two(value.month());
        self.put_two(value.day());
        self.put_byte(b'-');
        self.put_two(value.hour());
        self.put_byte(b':');
        self.put_two(value.minute());
        self.put_byte(b':');
        self.put_two(value.second());
    }

    /// `YYYYMMDD-HH:MM:SS.mmm`
    fn put_timestamp(&mut self, value: &DateTime<Utc>) {
        self.put_datetime(&value.naive_utc());
        self.put_byte(b'.');
        self.put_unsigned_width(value.timestamp_subsec_millis() as u64, 3);
    }

    fn insert_unsigned(&mut self, field: usize, width: usize, value: u64) {
        let save = self.next;
        self.next = field;
        self.put_unsigned_width(value, width);
        self.next = save;
    }
}

/// A value that can be appended as the `value` part of a fix field.
pub trait FixValue {
    fn put(&self, message: &mut Encode<'_>);
}

/// A numeric value that can be appended left-zero-padded to a width.
pub trait FixWidthValue {
    fn put_width(&self, message: &mut Encode<'_>, width: usize);
}

macro_rules! impl_fix_value_unsigned {
    ($($t:ty),*) => {$(
        impl FixValue for $t {
            fn put(&self, message: &mut Encode<'_>) {
                message.put_unsigned(*self as u64);
            }
        }
        impl FixWidthValue for $t {
            fn put_width(&self, message: &mut Encode<'_>, width: usize) {
                message.put_unsigned_width(*self as u64, width);
            }
        }
    )*};
}

macro_rules! impl_fix_value_signed {
    ($($t:ty),*) => {$(
        impl FixValue for $t {
            fn put(&self, message: &mut Encode<'_>) {
                message.put_signed(*self as i64);
            }
        }
        impl FixWidthValue for $t {
            fn put_width(&self, message: &mut Encode<'_>, width: usize) {
                message.put_signed_width(*self as i64, width);
            }
        }
    )*};
}

impl_fix_value_unsigned!(u16, u32, u64, usize);
impl_fix_value_signed!(i16, i32, i64);

impl FixValue for MsgType {
    fn put(&self, message: &mut Encode<'_>) {
        message.put_byte(self.code());
    }
}

impl FixValue for char {
    fn put(&self, message: &mut Encode<'_>) {
        message.put_byte(*self as u8);
    }
}

impl FixValue for &str {
    fn put(&self, message: &mut Encode<'_>) {
        message.put_bytes(self.as_bytes());
    }
}

impl FixValue for String {
    fn put(&self, message: &mut Encode<'_>) {
        message.put_bytes(self.as_bytes());
    }
}

impl FixValue for &[u8] {
    fn put(&self, message: &mut Encode<'_>) {
        message.put_bytes(self);
    }
}

impl FixValue for f64 {
    fn put(&self, message: &mut Encode<'_>) {
        message.put_real(*self, DEFAULT_REAL_DIGITS);
    }
}

impl FixValue for NaiveDateTime {
    fn put(&self, message: &mut Encode<'_>) {
        message.put_datetime(self);
    }
}

impl FixValue for DateTime<Utc> {
    fn put(&self, message: &mut Encode<'_>) {
        message.put_timestamp(self);
    }
}
