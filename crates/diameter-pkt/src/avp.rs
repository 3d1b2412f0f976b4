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

//! Attribute-Value Pairs, see
//! [RFC6733 Section 4](https://datatracker.ietf.org/doc/html/rfc6733#section-4)
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                           AVP Code                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |V M P r r r r r|                  AVP Length                   |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                        Vendor-ID (opt)                        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |    Data ...
//! +-+-+-+-+-+-+-+-+
//! ```

use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::{
    dictionary::{AvpDataType, AvpKey},
    error::DiameterError,
};

/// The M and P flags, the V flag is derived from the vendor id of the AVP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AvpFlags {
    mandatory: bool,
    protected: bool,
}

impl AvpFlags {
    pub const fn new(mandatory: bool, protected: bool) -> Self {
        Self {
            mandatory,
            protected,
        }
    }

    pub const fn mandatory(&self) -> bool {
        self.mandatory
    }

    pub const fn protected(&self) -> bool {
        self.protected
    }
}

/// Value of the `Address` derived data type: a two octets address family
/// followed by the address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Address {
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
    /// Any other family, such as E.164, kept as opaque octets. The IPv4 and
    /// IPv6 families are not allowed here.
    Other { family: u16, value: Vec<u8> },
}

/// Typed value of an AVP, one variant per basic and derived data type of
/// [RFC6733 Section 4.2 and 4.3](https://datatracker.ietf.org/doc/html/rfc6733#section-4.2)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvpValue {
    OctetString(Vec<u8>),
    Integer32(i32),
    Integer64(i64),
    Unsigned32(u32),
    Unsigned64(u64),
    Float32(OrderedFloat<f32>),
    Float64(OrderedFloat<f64>),
    Grouped(Vec<Avp>),
    Address(Address),
    /// Second precision, limited to the range representable by NTP seconds
    Time(DateTime<Utc>),
    Utf8String(String),
    DiameterIdentity(String),
    DiameterUri(String),
    Enumerated(i32),
}

impl AvpValue {
    pub const fn data_type(&self) -> AvpDataType {
        match self {
            Self::OctetString(_) => AvpDataType::OctetString,
            Self::Integer32(_) => AvpDataType::Integer32,
            Self::Integer64(_) => AvpDataType::Integer64,
            Self::Unsigned32(_) => AvpDataType::Unsigned32,
            Self::Unsigned64(_) => AvpDataType::Unsigned64,
            Self::Float32(_) => AvpDataType::Float32,
            Self::Float64(_) => AvpDataType::Float64,
            Self::Grouped(_) => AvpDataType::Grouped,
            Self::Address(_) => AvpDataType::Address,
            Self::Time(_) => AvpDataType::Time,
            Self::Utf8String(_) => AvpDataType::Utf8String,
            Self::DiameterIdentity(_) => AvpDataType::DiameterIdentity,
            Self::DiameterUri(_) => AvpDataType::DiameterUri,
            Self::Enumerated(_) => AvpDataType::Enumerated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Avp {
    code: u32,
    vendor_id: u32,
    flags: AvpFlags,
    value: AvpValue,
}

impl Avp {
    /// Build an AVP without consulting any dictionary, see
    /// [`crate::factory::AvpFactory`] for the dictionary aware construction.
    /// A `vendor_id` of zero means the AVP is not vendor specific.
    pub const fn new(code: u32, vendor_id: u32, flags: AvpFlags, value: AvpValue) -> Self {
        Self {
            code,
            vendor_id,
            flags,
            value,
        }
    }

    pub const fn code(&self) -> u32 {
        self.code
    }

    pub const fn vendor_id(&self) -> u32 {
        self.vendor_id
    }

    pub const fn key(&self) -> AvpKey {
        AvpKey::new(self.code, self.vendor_id)
    }

    pub const fn flags(&self) -> AvpFlags {
        self.flags
    }

    pub const fn is_vendor_specific(&self) -> bool {
        self.vendor_id != 0
    }

    pub const fn is_mandatory(&self) -> bool {
        self.flags.mandatory
    }

    pub const fn is_protected(&self) -> bool {
        self.flags.protected
    }

    pub const fn value(&self) -> &AvpValue {
        &self.value
    }

    pub fn into_value(self) -> AvpValue {
        self.value
    }

    /// Members of a grouped AVP, `None` for any other data type
    pub fn children(&self) -> Option<&[Avp]> {
        match &self.value {
            AvpValue::Grouped(children) => Some(children),
            _ => None,
        }
    }

    pub fn find_child(&self, code: u32, vendor_id: u32) -> Option<&Avp> {
        self.children()?
            .iter()
            .find(|child| child.code == code && child.vendor_id == vendor_id)
    }

    /// Equality that ignores the order of the members of grouped AVPs, used
    /// for AVPs whose members form a set, e.g. Vendor-Specific-Application-Id.
    pub fn same_members(&self, other: &Avp) -> bool {
        if self.code != other.code || self.vendor_id != other.vendor_id || self.flags != other.flags
        {
            return false;
        }
        match (&self.value, &other.value) {
            (AvpValue::Grouped(ours), AvpValue::Grouped(theirs)) => {
                if ours.len() != theirs.len() {
                    return false;
                }
                let mut used = vec![false; theirs.len()];
                ours.iter().all(|child| {
                    let found = theirs
                        .iter()
                        .enumerate()
                        .position(|(index, candidate)| {
                            !used[index] && child.same_members(candidate)
                        });
                    match found {
                        Some(index) => {
                            used[index] = true;
                            true
                        }
                        None => false,
                    }
                })
            }
            (ours, theirs) => ours == theirs,
        }
    }

    fn type_mismatch(&self, expected: AvpDataType) -> DiameterError {
        DiameterError::Encoding(format!(
            "AVP {} (vendor {}) carries {} while {expected} was expected",
            self.code,
            self.vendor_id,
            self.value.data_type(),
        ))
    }

    pub fn octet_string(&self) -> Result<&[u8], DiameterError> {
        match &self.value {
            AvpValue::OctetString(value) => Ok(value),
            _ => Err(self.type_mismatch(AvpDataType::OctetString)),
        }
    }

    pub fn integer32(&self) -> Result<i32, DiameterError> {
        match self.value {
            AvpValue::Integer32(value) => Ok(value),
            _ => Err(self.type_mismatch(AvpDataType::Integer32)),
        }
    }

    pub fn integer64(&self) -> Result<i64, DiameterError> {
        match self.value {
            AvpValue::Integer64(value) => Ok(value),
            _ => Err(self.type_mismatch(AvpDataType::Integer64)),
        }
    }

    pub fn unsigned32(&self) -> Result<u32, DiameterError> {
        match self.value {
            AvpValue::Unsigned32(value) => Ok(value),
            _ => Err(self.type_mismatch(AvpDataType::Unsigned32)),
        }
    }

    pub fn unsigned64(&self) -> Result<u64, DiameterError> {
        match self.value {
            AvpValue::Unsigned64(value) => Ok(value),
            _ => Err(self.type_mismatch(AvpDataType::Unsigned64)),
        }
    }

    pub fn float32(&self) -> Result<f32, DiameterError> {
        match self.value {
            AvpValue::Float32(value) => Ok(value.into_inner()),
            _ => Err(self.type_mismatch(AvpDataType::Float32)),
        }
    }

    pub fn float64(&self) -> Result<f64, DiameterError> {
        match self.value {
            AvpValue::Float64(value) => Ok(value.into_inner()),
            _ => Err(self.type_mismatch(AvpDataType::Float64)),
        }
    }

    /// Text of any UTF8String derived type: UTF8String, DiameterIdentity and
    /// DiameterURI.
    pub fn utf8_string(&self) -> Result<&str, DiameterError> {
        match &self.value {
            AvpValue::Utf8String(value)
            | AvpValue::DiameterIdentity(value)
            | AvpValue::DiameterUri(value) => Ok(value),
            _ => Err(self.type_mismatch(AvpDataType::Utf8String)),
        }
    }

    pub fn address(&self) -> Result<&Address, DiameterError> {
        match &self.value {
            AvpValue::Address(value) => Ok(value),
            _ => Err(self.type_mismatch(AvpDataType::Address)),
        }
    }

    pub fn time(&self) -> Result<DateTime<Utc>, DiameterError> {
        match self.value {
            AvpValue::Time(value) => Ok(value),
            _ => Err(self.type_mismatch(AvpDataType::Time)),
        }
    }

    pub fn enumerated(&self) -> Result<i32, DiameterError> {
        match self.value {
            AvpValue::Enumerated(value) => Ok(value),
            _ => Err(self.type_mismatch(AvpDataType::Enumerated)),
        }
    }

    pub fn grouped(&self) -> Result<&[Avp], DiameterError> {
        self.children()
            .ok_or_else(|| self.type_mismatch(AvpDataType::Grouped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unsigned(code: u32, value: u32) -> Avp {
        Avp::new(code, 0, AvpFlags::new(true, false), AvpValue::Unsigned32(value))
    }

    #[test]
    fn test_same_members_ignores_order() {
        let ordered = Avp::new(
            260,
            0,
            AvpFlags::new(true, false),
            AvpValue::Grouped(vec![unsigned(266, 10415), unsigned(259, 23121)]),
        );
        let reversed = Avp::new(
            260,
            0,
            AvpFlags::new(true, false),
            AvpValue::Grouped(vec![unsigned(259, 23121), unsigned(266, 10415)]),
        );
        assert_ne!(ordered, reversed);
        assert!(ordered.same_members(&reversed));
    }

    #[test]
    fn test_same_members_counts_duplicates() {
        let twice = Avp::new(
            260,
            0,
            AvpFlags::default(),
            AvpValue::Grouped(vec![unsigned(266, 1), unsigned(266, 1)]),
        );
        let once_each = Avp::new(
            260,
            0,
            AvpFlags::default(),
            AvpValue::Grouped(vec![unsigned(266, 1), unsigned(266, 2)]),
        );
        assert!(!twice.same_members(&once_each));
        assert!(twice.same_members(&twice.clone()));
    }

    #[test]
    fn test_typed_getters() {
        let avp = Avp::new(
            264,
            0,
            AvpFlags::new(true, false),
            AvpValue::DiameterIdentity("mme.example.org".to_string()),
        );
        assert_eq!(avp.utf8_string(), Ok("mme.example.org"));
        assert!(matches!(avp.unsigned32(), Err(DiameterError::Encoding(_))));
        assert!(avp.children().is_none());
        assert!(!avp.is_vendor_specific());
    }
}
