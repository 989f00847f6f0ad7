//! Packed boolean storage over a byte buffer.
//!
//! Bit `i` lives in byte `i >> 3` at position `i & 7` (little-endian bit
//! order). Bits past `len` in the last byte are padding: they are never read,
//! counted or compared, whatever their physical value.

use crate::config;
use crate::error::{GridError, Result};

/// Mask of `take` bits starting at bit `off` within a byte (`off + take <= 8`).
#[inline]
fn byte_mask(off: usize, take: usize) -> u8 {
    debug_assert!(take >= 1 && off + take <= 8);
    ((0xFFu16 >> (8 - take)) as u8) << off
}

/// Fixed-length packed bit buffer
#[derive(Debug, Clone, Default)]
pub struct BitBuffer {
    data: Vec<u8>,
    len: usize,
}

impl BitBuffer {
    /// Create a buffer of `len` bits, all clear
    pub fn new(len: usize) -> Self {
        Self {
            data: vec![0; len.div_ceil(8)],
            len,
        }
    }

    /// Wrap existing bytes. `bytes.len()` must be exactly `ceil(len / 8)`.
    pub fn from_bytes(bytes: &[u8], len: usize) -> Result<Self> {
        if bytes.len() != len.div_ceil(8) {
            return Err(GridError::InvalidArgument(format!(
                "{} bytes cannot back exactly {} bits",
                bytes.len(),
                len
            )));
        }
        Ok(Self {
            data: bytes.to_vec(),
            len,
        })
    }

    /// Length in bits
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the buffer holds zero bits
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Raw backing bytes, padding included
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[track_caller]
    fn check_index(&self, index: usize) {
        if index >= self.len {
            panic!("{}", GridError::OutOfRange { index, len: self.len });
        }
    }

    #[track_caller]
    fn check_range(&self, start: usize, count: usize) {
        if start.checked_add(count).is_none_or(|end| end > self.len) {
            panic!(
                "{}",
                GridError::OutOfRange {
                    index: start.saturating_add(count),
                    len: self.len,
                }
            );
        }
    }

    /// Get bit at `index`.
    ///
    /// # Panics
    /// If `index >= len`.
    #[inline]
    #[track_caller]
    pub fn get(&self, index: usize) -> bool {
        self.check_index(index);
        (self.data[index >> 3] >> (index & 7)) & 1 == 1
    }

    /// Set bit at `index`.
    ///
    /// # Panics
    /// If `index >= len`.
    #[inline]
    #[track_caller]
    pub fn set(&mut self, index: usize, value: bool) {
        self.check_index(index);
        let bit = 1u8 << (index & 7);
        if value {
            self.data[index >> 3] |= bit;
        } else {
            self.data[index >> 3] &= !bit;
        }
    }

    /// Checked variant of [`BitBuffer::get`]
    pub fn try_get(&self, index: usize) -> Result<bool> {
        if index >= self.len {
            return Err(GridError::OutOfRange { index, len: self.len });
        }
        Ok(self.get(index))
    }

    /// Checked variant of [`BitBuffer::set`]
    pub fn try_set(&mut self, index: usize, value: bool) -> Result<()> {
        if index >= self.len {
            return Err(GridError::OutOfRange { index, len: self.len });
        }
        self.set(index, value);
        Ok(())
    }

    /// Read `count` (<= 64) bits starting at `start`; bit `start` lands in bit 0
    /// of the result.
    #[track_caller]
    pub fn get_bits(&self, start: usize, count: usize) -> u64 {
        assert!(count <= 64, "cannot read {count} bits into a u64");
        self.check_range(start, count);

        let mut value = 0u64;
        let mut read = 0;
        while read < count {
            let bit = start + read;
            let off = bit & 7;
            let take = (8 - off).min(count - read);
            let chunk = (self.data[bit >> 3] >> off) & byte_mask(0, take);
            value |= (chunk as u64) << read;
            read += take;
        }
        value
    }

    /// Write the low `count` (<= 64) bits of `value` starting at `start`.
    /// Higher bits of `value` are ignored.
    #[track_caller]
    pub fn set_bits(&mut self, start: usize, value: u64, count: usize) {
        assert!(count <= 64, "cannot write {count} bits from a u64");
        self.check_range(start, count);

        let mut written = 0;
        while written < count {
            let bit = start + written;
            let off = bit & 7;
            let take = (8 - off).min(count - written);
            let mask = byte_mask(off, take);
            let chunk = ((value >> written) as u8) << off;
            let byte = &mut self.data[bit >> 3];
            *byte = (*byte & !mask) | (chunk & mask);
            written += take;
        }
    }

    /// Set every bit to `value`
    pub fn fill(&mut self, value: bool) {
        self.data.fill(if value { 0xFF } else { 0 });
    }

    /// Clear every bit
    pub fn clear(&mut self) {
        self.fill(false);
    }

    /// Set `count` bits starting at `start` to `value`
    #[track_caller]
    pub fn set_range(&mut self, start: usize, count: usize, value: bool) {
        self.check_range(start, count);
        let end = start + count;
        let mut bit = start;
        while bit < end {
            let off = bit & 7;
            let take = (8 - off).min(end - bit);
            let byte = &mut self.data[bit >> 3];
            if take == 8 {
                *byte = if value { 0xFF } else { 0 };
            } else if value {
                *byte |= byte_mask(off, take);
            } else {
                *byte &= !byte_mask(off, take);
            }
            bit += take;
        }
    }

    /// Visit each byte overlapping `[start, start + count)` as
    /// `(byte_index, byte & mask, mask)`. Stops early when `f` returns false.
    fn scan_bytes(
        &self,
        start: usize,
        count: usize,
        mut f: impl FnMut(usize, u8, u8) -> bool,
    ) -> bool {
        let end = start + count;
        let mut bit = start;
        while bit < end {
            let off = bit & 7;
            let take = (8 - off).min(end - bit);
            let mask = byte_mask(off, take);
            let index = bit >> 3;
            if !f(index, self.data[index] & mask, mask) {
                return false;
            }
            bit += take;
        }
        true
    }

    /// True if any bit in the range is set. Empty ranges are false.
    #[track_caller]
    pub fn test_any(&self, start: usize, count: usize) -> bool {
        self.check_range(start, count);
        !self.scan_bytes(start, count, |_, masked, _| masked == 0)
    }

    /// True if every bit in the range is set. Empty ranges are vacuously true.
    #[track_caller]
    pub fn test_all(&self, start: usize, count: usize) -> bool {
        self.check_range(start, count);
        self.scan_bytes(start, count, |_, masked, mask| masked == mask)
    }

    /// Population count over `[start, start + count)`
    #[track_caller]
    pub fn count_bits(&self, start: usize, count: usize) -> u32 {
        self.check_range(start, count);
        let end = start + count;
        let mut bit = start;
        let mut total = 0u32;

        // Leading partial byte
        if bit & 7 != 0 && bit < end {
            let take = (8 - (bit & 7)).min(end - bit);
            total += (self.data[bit >> 3] & byte_mask(bit & 7, take)).count_ones();
            bit += take;
        }

        // Whole bytes, eight at a time
        let full = (end - bit) / 8;
        if full > 0 {
            let bytes = &self.data[bit >> 3..(bit >> 3) + full];
            let mut words = bytes.chunks_exact(8);
            for chunk in &mut words {
                let mut word = [0u8; 8];
                word.copy_from_slice(chunk);
                total += u64::from_le_bytes(word).count_ones();
            }
            total += words
                .remainder()
                .iter()
                .map(|b| b.count_ones())
                .sum::<u32>();
            bit += full * 8;
        }

        // Trailing partial byte
        if bit < end {
            total += (self.data[bit >> 3] & byte_mask(0, end - bit)).count_ones();
        }
        total
    }

    /// Population count of the whole buffer
    pub fn count_ones(&self) -> usize {
        self.count_bits(0, self.len) as usize
    }

    /// Index of the first set bit in the range
    #[track_caller]
    pub fn first_set(&self, start: usize, count: usize) -> Option<usize> {
        self.check_range(start, count);
        let mut found = None;
        self.scan_bytes(start, count, |index, masked, _| {
            if masked != 0 {
                found = Some(index * 8 + masked.trailing_zeros() as usize);
                return false;
            }
            true
        });
        found
    }

    /// Index of the last set bit in the range
    #[track_caller]
    pub fn last_set(&self, start: usize, count: usize) -> Option<usize> {
        self.check_range(start, count);
        let mut found = None;
        self.scan_bytes(start, count, |index, masked, _| {
            if masked != 0 {
                found = Some(index * 8 + 7 - masked.leading_zeros() as usize);
            }
            true
        });
        found
    }

    /// Indices of all set bits in ascending order
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        let tail = self.len & 7;
        let last = self.data.len().saturating_sub(1);
        self.data.iter().enumerate().flat_map(move |(index, &b)| {
            let mut byte = if index == last && tail != 0 {
                b & byte_mask(0, tail)
            } else {
                b
            };
            std::iter::from_fn(move || {
                if byte == 0 {
                    return None;
                }
                let bit = byte.trailing_zeros() as usize;
                byte &= byte - 1;
                Some(index * 8 + bit)
            })
        })
    }

    /// Bitwise equality of two buffers of equal length. Padding bits in the
    /// last byte are ignored.
    pub fn sequence_equal(&self, other: &BitBuffer) -> bool {
        if self.len != other.len {
            return false;
        }
        let full = self.len / 8;
        if self.data[..full] != other.data[..full] {
            return false;
        }
        let tail = self.len & 7;
        if tail == 0 {
            return true;
        }
        let mask = byte_mask(0, tail);
        (self.data[full] & mask) == (other.data[full] & mask)
    }

    /// Copy `count` bits from `self[src_index..]` into `dest[dest_index..]`.
    ///
    /// Byte-aligned spans move as raw bytes; anything else is composed from
    /// shifted 64-bit runs. Both paths produce the same bits.
    #[track_caller]
    pub fn copy_to(&self, dest: &mut BitBuffer, dest_index: usize, src_index: usize, count: usize) {
        self.check_range(src_index, count);
        dest.check_range(dest_index, count);
        if count == 0 {
            return;
        }

        let mut done = 0;
        if config::bitcopy_fast() && src_index & 7 == 0 && dest_index & 7 == 0 {
            let bytes = count / 8;
            let s = src_index >> 3;
            let d = dest_index >> 3;
            dest.data[d..d + bytes].copy_from_slice(&self.data[s..s + bytes]);
            done = bytes * 8;
        }

        while done < count {
            let n = (count - done).min(64);
            let value = self.get_bits(src_index + done, n);
            dest.set_bits(dest_index + done, value, n);
            done += n;
        }
    }
}

impl PartialEq for BitBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.sequence_equal(other)
    }
}

impl Eq for BitBuffer {}
