// Copyright (C) 2022-present The NetGauze Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or
// implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Binary input type for `nom` parsers that remembers how far into the
//! original buffer it starts, so parsing errors can point at the offending
//! octet.

use nom::{AsBytes, InputIter, InputLength, InputTake, Needed, Slice};
use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

#[derive(Debug, Clone, Copy)]
pub struct Span<'a> {
    offset: usize,
    fragment: &'a [u8],
}

impl<'a> Span<'a> {
    pub const fn new(buffer: &'a [u8]) -> Self {
        Self {
            offset: 0,
            fragment: buffer,
        }
    }

    /// Build a span that claims to start at `offset` in some larger buffer.
    /// Mostly useful in tests to describe where an error is expected.
    pub const fn new_from_raw_offset(offset: usize, fragment: &'a [u8]) -> Self {
        Self { offset, fragment }
    }

    #[inline]
    pub const fn location_offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub const fn fragment(&self) -> &'a [u8] {
        self.fragment
    }

    #[inline]
    fn advance_to(&self, next: &'a [u8]) -> Self {
        let consumed = next.as_ptr() as usize - self.fragment.as_ptr() as usize;
        Self {
            offset: self.offset + consumed,
            fragment: next,
        }
    }
}

macro_rules! impl_slice {
    ($range:ty) => {
        impl<'a> Slice<$range> for Span<'a> {
            #[inline]
            fn slice(&self, range: $range) -> Self {
                let fragment: &'a [u8] = self.fragment;
                self.advance_to(&fragment[range])
            }
        }
    };
}

impl_slice!(Range<usize>);
impl_slice!(RangeTo<usize>);
impl_slice!(RangeFrom<usize>);
impl_slice!(RangeFull);

impl<'a> InputIter for Span<'a> {
    type Item = u8;
    type Iter = <&'a [u8] as InputIter>::Iter;
    type IterElem = <&'a [u8] as InputIter>::IterElem;

    #[inline]
    fn iter_indices(&self) -> Self::Iter {
        self.fragment.iter_indices()
    }

    #[inline]
    fn iter_elements(&self) -> Self::IterElem {
        self.fragment.iter_elements()
    }

    #[inline]
    fn position<P>(&self, predicate: P) -> Option<usize>
    where
        P: Fn(Self::Item) -> bool,
    {
        self.fragment.iter().position(|b| predicate(*b))
    }

    #[inline]
    fn slice_index(&self, count: usize) -> Result<usize, Needed> {
        self.fragment.slice_index(count)
    }
}

impl InputLength for Span<'_> {
    #[inline]
    fn input_len(&self) -> usize {
        self.fragment.len()
    }
}

impl InputTake for Span<'_> {
    #[inline]
    fn take(&self, count: usize) -> Self {
        self.slice(..count)
    }

    #[inline]
    fn take_split(&self, count: usize) -> (Self, Self) {
        (self.slice(count..), self.slice(..count))
    }
}

impl AsBytes for Span<'_> {
    #[inline]
    fn as_bytes(&self) -> &[u8] {
        self.fragment
    }
}

impl core::ops::Deref for Span<'_> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.fragment
    }
}

impl PartialEq for Span<'_> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset && self.fragment == other.fragment
    }
}

impl Eq for Span<'_> {}

impl<'a> From<&'a [u8]> for Span<'a> {
    #[inline]
    fn from(buffer: &'a [u8]) -> Self {
        Self::new(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nom::number::complete::{be_u16, be_u24};

    #[test]
    fn test_offset_follows_parsing() {
        let buf = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
        let span = Span::new(&buf);
        let (rest, value) = be_u16::<_, nom::error::Error<Span<'_>>>(span).unwrap();
        assert_eq!(value, 0x0102);
        assert_eq!(rest.location_offset(), 2);
        let (rest, value) = be_u24::<_, nom::error::Error<Span<'_>>>(rest).unwrap();
        assert_eq!(value, 0x030405);
        assert_eq!(rest, Span::new_from_raw_offset(5, &buf[5..]));
    }

    #[test]
    fn test_take_split_keeps_offsets() {
        let buf = [0xaa, 0xbb, 0xcc];
        let span = Span::new_from_raw_offset(10, &buf);
        let (rest, taken) = span.take_split(1);
        assert_eq!(taken, Span::new_from_raw_offset(10, &buf[..1]));
        assert_eq!(rest, Span::new_from_raw_offset(11, &buf[1..]));
        assert_eq!(rest.len(), 2);
    }
}
