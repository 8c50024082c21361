use std::io;
use std::io::Write;

/// State for writing individual bits to a Writer
pub struct BitWriter<'a, T: Write> {
    /// the underlying output stream
    writer: &'a mut T,
    /// buffer of individual bits not yet written
    buffer: u8,
    /// how many bits are waiting to be written
    buffer_space_used: u8,
    /// total number of bits accepted so far, padding excluded
    bits_written: usize,
}

impl<'a, T: Write> BitWriter<'a, T> {
    pub fn new(writer: &'a mut T) -> BitWriter<'a, T> {
        BitWriter {
            writer,
            buffer: 0,
            buffer_space_used: 0,
            bits_written: 0,
        }
    }

    /// write a single bit, most significant bit of each byte first
    pub fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        if bit {
            self.buffer |= 0b10000000_u8.rotate_right(self.buffer_space_used as u32);
        }
        self.buffer_space_used += 1;
        self.bits_written += 1;
        if self.buffer_space_used == 8 {
            self.writer.write_all(&[self.buffer])?;
            self.buffer_space_used = 0;
            self.buffer = 0; // depended upon in flush()
        }
        Ok(())
    }

    /// write a non-byte-aligned sequence of bits
    ///
    /// does not guarantee that all bits reach the underlying
    /// stream, use flush to write any remaining bits.
    pub fn write_bits(&mut self, bits: &[bool]) -> io::Result<()> {
        for &bit in bits {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    pub fn bits_written(&self) -> usize {
        self.bits_written
    }

    /// Flush all bits and the underlying writer;
    ///
    /// If there are non-byte-aligned bits still
    /// in the buffer, they will be written to the output
    /// with 0 padding to the next byte;
    pub fn flush(&mut self) -> io::Result<()> {
        if self.buffer_space_used != 0 {
            self.writer.write_all(&[self.buffer])?;
            self.buffer = 0;
            self.buffer_space_used = 0;
        }
        self.writer.flush()
    }
}

/// Iterates the bits of a byte buffer, most significant bit first
pub struct BitReader<'a> {
    bytes: &'a [u8],
    position: usize,
    bit_count: usize,
}

impl<'a> BitReader<'a> {
    /// `bit_count` is clamped to the number of bits the buffer holds
    pub fn new(bytes: &'a [u8], bit_count: usize) -> Self {
        Self {
            bytes,
            position: 0,
            bit_count: bit_count.min(bytes.len() * 8),
        }
    }

    pub fn remaining(&self) -> usize {
        self.bit_count - self.position
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.bit_count {
            return None;
        }
        let byte = self.bytes[self.position / 8];
        let bit_index = self.position % 8;
        self.position += 1;
        Some(byte & 0b10000000_u8.rotate_right(bit_index as u32) > 0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitReader<'_> {}

/// Packs bits into bytes; a partially filled final byte is padded with zeros
pub fn pack(bits: &[bool]) -> Vec<u8> {
    let mut output = Vec::with_capacity(bits.len().div_ceil(8));
    let mut writer = BitWriter::new(&mut output);
    // writes into a Vec never fail
    let _ = writer.write_bits(bits).and_then(|_| writer.flush());
    output
}

pub fn unpack(buffer: &[u8], bit_count: usize) -> Vec<bool> {
    BitReader::new(buffer, bit_count).collect()
}

/// Renders bits as a string of '0' and '1'
pub fn bits_to_string(bits: &[bool]) -> String {
    bits.iter().map(|&bit| if bit { '1' } else { '0' }).collect()
}
