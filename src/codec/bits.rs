//! Fixed-width bitstring buffer
//!
//! Field codecs build their payload as a sequence of fixed-width binary
//! fields (most significant bit first) and read it back the same way.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BitString {
    bits: Vec<bool>,
}

impl BitString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { bits: Vec::with_capacity(capacity) }
    }

    /// The single-bit representation of zero
    pub fn zero() -> Self {
        Self { bits: vec![false] }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Append `value` as a `width`-bit big-endian field; higher bits are dropped
    pub fn push_field(&mut self, value: u32, width: usize) {
        for shift in (0..width).rev() {
            self.bits.push(shift < 32 && (value >> shift) & 1 == 1);
        }
    }

    pub fn push_zeros(&mut self, width: usize) {
        self.bits.resize(self.bits.len() + width, false);
    }

    /// Bit at `index`; positions past the end read as zero
    pub fn get(&self, index: usize) -> bool {
        self.bits.get(index).copied().unwrap_or(false)
    }

    /// Read a `width`-bit big-endian field starting at `offset`
    pub fn field(&self, offset: usize, width: usize) -> u32 {
        (offset..offset + width).fold(0, |acc, index| (acc << 1) | self.get(index) as u32)
    }

    /// Left-pad with zeros to at least `width` bits; longer input is kept whole
    pub fn pad_left(mut self, width: usize) -> Self {
        if self.bits.len() < width {
            let mut padded = vec![false; width - self.bits.len()];
            padded.append(&mut self.bits);
            self.bits = padded;
        }
        self
    }

    /// Exactly `width` bits: left-padded when short, rightmost bits kept when long
    pub fn right_align(self, width: usize) -> Self {
        if self.bits.len() > width {
            let start = self.bits.len() - width;
            return Self { bits: self.bits[start..].to_vec() };
        }
        self.pad_left(width)
    }

    /// Bits after the first set bit (empty when all bits are zero)
    pub fn without_leading_zeros(&self) -> &[bool] {
        let first_set = self.bits.iter().position(|&bit| bit).unwrap_or(self.bits.len());
        &self.bits[first_set..]
    }
}

impl FromIterator<bool> for BitString {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self { bits: iter.into_iter().collect() }
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for BitString {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|ch| match ch {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(format!("Invalid bit character: '{}'", other)),
            })
            .collect()
    }
}
