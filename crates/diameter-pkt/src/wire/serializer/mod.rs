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

//! Serializer library for Diameter's wire protocol

use byteorder::{NetworkEndian, WriteBytesExt};
use std::io::Write;

use diameter_parse_utils::WritablePdu;
use diameter_serde_macros::WritingError;

use crate::{
    avp::{Address, Avp, AvpValue},
    error::DiameterError,
    iana::AddressFamily,
    wire::{
        padding, time_to_ntp, AVP_HEADER_LENGTH, AVP_MANDATORY_FLAG, AVP_PROTECTED_FLAG,
        AVP_VENDOR_FLAG, AVP_VENDOR_HEADER_LENGTH, DIAMETER_HEADER_LENGTH, ERROR_FLAG, MAX_U24,
        PROXIABLE_FLAG, REQUEST_FLAG, RETRANSMITTED_FLAG,
    },
    CommandFlags, DiameterMessage, DIAMETER_VERSION,
};

const ADDRESS_FAMILY_LENGTH: usize = 2;
const IPV4_LEN: usize = 4;
const IPV6_LEN: usize = 16;

impl From<CommandFlags> for u8 {
    fn from(flags: CommandFlags) -> Self {
        let mut value = 0;
        if flags.request() {
            value |= REQUEST_FLAG;
        }
        if flags.proxiable() {
            value |= PROXIABLE_FLAG;
        }
        if flags.error() {
            value |= ERROR_FLAG;
        }
        if flags.retransmitted() {
            value |= RETRANSMITTED_FLAG;
        }
        value
    }
}

#[derive(WritingError, Eq, PartialEq, Clone, Debug)]
pub enum AvpWritingError {
    StdIOError(#[from_std_io_error] String),

    /// AVP length doesn't fit in 24 bits
    AvpLengthOverflow(usize),

    /// Time value outside of the range representable in NTP seconds, carries
    /// the UNIX timestamp
    TimeOutOfRange(i64),

    /// [`Address::Other`] carrying the IPv4 or IPv6 family, which would be
    /// read back as [`Address::Ipv4`] or [`Address::Ipv6`]
    ReservedAddressFamily(u16),
}

impl WritablePdu<AvpWritingError> for AvpValue {
    const BASE_LENGTH: usize = 0;

    fn len(&self) -> usize {
        Self::BASE_LENGTH
            + match self {
                Self::OctetString(value) => value.len(),
                Self::Integer32(_)
                | Self::Unsigned32(_)
                | Self::Float32(_)
                | Self::Time(_)
                | Self::Enumerated(_) => 4,
                Self::Integer64(_) | Self::Unsigned64(_) | Self::Float64(_) => 8,
                Self::Grouped(children) => children.iter().map(|child| child.len()).sum(),
                Self::Address(address) => {
                    ADDRESS_FAMILY_LENGTH
                        + match address {
                            Address::Ipv4(_) => IPV4_LEN,
                            Address::Ipv6(_) => IPV6_LEN,
                            Address::Other { value, .. } => value.len(),
                        }
                }
                Self::Utf8String(value) | Self::DiameterIdentity(value) | Self::DiameterUri(value) => {
                    value.len()
                }
            }
    }

    fn write<T: Write>(&self, writer: &mut T) -> Result<(), AvpWritingError> {
        match self {
            Self::OctetString(value) => writer.write_all(value)?,
            Self::Integer32(value) => writer.write_i32::<NetworkEndian>(*value)?,
            Self::Integer64(value) => writer.write_i64::<NetworkEndian>(*value)?,
            Self::Unsigned32(value) => writer.write_u32::<NetworkEndian>(*value)?,
            Self::Unsigned64(value) => writer.write_u64::<NetworkEndian>(*value)?,
            Self::Float32(value) => writer.write_f32::<NetworkEndian>(value.into_inner())?,
            Self::Float64(value) => writer.write_f64::<NetworkEndian>(value.into_inner())?,
            Self::Grouped(children) => {
                for child in children {
                    child.write(writer)?;
                }
            }
            Self::Address(Address::Ipv4(addr)) => {
                writer.write_u16::<NetworkEndian>(AddressFamily::Ipv4.into())?;
                writer.write_all(&addr.octets())?;
            }
            Self::Address(Address::Ipv6(addr)) => {
                writer.write_u16::<NetworkEndian>(AddressFamily::Ipv6.into())?;
                writer.write_all(&addr.octets())?;
            }
            Self::Address(Address::Other { family, value }) => {
                if matches!(
                    AddressFamily::from_repr(*family),
                    Some(AddressFamily::Ipv4 | AddressFamily::Ipv6)
                ) {
                    return Err(AvpWritingError::ReservedAddressFamily(*family));
                }
                writer.write_u16::<NetworkEndian>(*family)?;
                writer.write_all(value)?;
            }
            Self::Time(time) => {
                let ntp =
                    time_to_ntp(time).ok_or(AvpWritingError::TimeOutOfRange(time.timestamp()))?;
                writer.write_u32::<NetworkEndian>(ntp)?;
            }
            Self::Utf8String(value) | Self::DiameterIdentity(value) | Self::DiameterUri(value) => {
                writer.write_all(value.as_bytes())?
            }
            Self::Enumerated(value) => writer.write_i32::<NetworkEndian>(*value)?,
        }
        Ok(())
    }
}

impl Avp {
    const fn header_len(&self) -> usize {
        if self.is_vendor_specific() {
            AVP_VENDOR_HEADER_LENGTH
        } else {
            AVP_HEADER_LENGTH
        }
    }

    /// Value carried in the AVP length field: header and data without the
    /// padding
    pub fn declared_len(&self) -> usize {
        self.header_len() + self.value().len()
    }

    pub fn encode(&self) -> Result<Vec<u8>, DiameterError> {
        let mut buf = Vec::with_capacity(self.len());
        self.write(&mut buf)?;
        Ok(buf)
    }
}

/// The written length of an AVP includes the padding to 4 octets, while the
/// AVP length field doesn't.
impl WritablePdu<AvpWritingError> for Avp {
    const BASE_LENGTH: usize = AVP_HEADER_LENGTH;

    fn len(&self) -> usize {
        let declared = self.declared_len();
        declared + padding(declared)
    }

    fn write<T: Write>(&self, writer: &mut T) -> Result<(), AvpWritingError> {
        let declared = self.declared_len();
        if declared > MAX_U24 as usize {
            return Err(AvpWritingError::AvpLengthOverflow(declared));
        }
        let mut flags = 0;
        if self.is_vendor_specific() {
            flags |= AVP_VENDOR_FLAG;
        }
        if self.is_mandatory() {
            flags |= AVP_MANDATORY_FLAG;
        }
        if self.is_protected() {
            flags |= AVP_PROTECTED_FLAG;
        }
        writer.write_u32::<NetworkEndian>(self.code())?;
        writer.write_u8(flags)?;
        writer.write_u24::<NetworkEndian>(declared as u32)?;
        if self.is_vendor_specific() {
            writer.write_u32::<NetworkEndian>(self.vendor_id())?;
        }
        self.value().write(writer)?;
        writer.write_all(&[0u8; 3][..padding(declared)])?;
        Ok(())
    }
}

#[derive(WritingError, Eq, PartialEq, Clone, Debug)]
pub enum DiameterMessageWritingError {
    StdIOError(#[from_std_io_error] String),

    /// Message length doesn't fit in 24 bits
    MessageLengthOverflow(usize),

    /// Command code doesn't fit in 24 bits
    CommandCodeOverflow(u32),

    AvpError(#[from] AvpWritingError),
}

impl WritablePdu<DiameterMessageWritingError> for DiameterMessage {
    const BASE_LENGTH: usize = DIAMETER_HEADER_LENGTH;

    fn len(&self) -> usize {
        Self::BASE_LENGTH + self.avps().iter().map(|avp| avp.len()).sum::<usize>()
    }

    fn write<T: Write>(&self, writer: &mut T) -> Result<(), DiameterMessageWritingError> {
        let len = self.len();
        if len > MAX_U24 as usize {
            return Err(DiameterMessageWritingError::MessageLengthOverflow(len));
        }
        let header = self.header();
        if header.command_code() > MAX_U24 {
            return Err(DiameterMessageWritingError::CommandCodeOverflow(
                header.command_code(),
            ));
        }
        writer.write_u8(DIAMETER_VERSION)?;
        writer.write_u24::<NetworkEndian>(len as u32)?;
        writer.write_u8(header.flags().into())?;
        writer.write_u24::<NetworkEndian>(header.command_code())?;
        writer.write_u32::<NetworkEndian>(header.application_id())?;
        writer.write_u32::<NetworkEndian>(header.hop_by_hop_id())?;
        writer.write_u32::<NetworkEndian>(header.end_to_end_id())?;
        for avp in self.avps() {
            avp.write(writer)?;
        }
        Ok(())
    }
}

impl DiameterMessage {
    pub fn encode(&self) -> Result<Vec<u8>, DiameterError> {
        let mut buf = Vec::with_capacity(self.len());
        self.write(&mut buf)?;
        Ok(buf)
    }
}
