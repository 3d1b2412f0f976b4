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

//! Deserializer for the AVP payload, driven by the data type the dictionary
//! declares for the AVP

use nom::{
    combinator::rest,
    error::ErrorKind,
    number::complete::{be_f32, be_f64, be_i32, be_i64, be_u16, be_u32, be_u64},
    IResult,
};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, Ipv6Addr};

use diameter_parse_utils::{
    parse_till_empty_into_with_one_input_located, ErrorKindSerdeDeref, ReadablePduWithTwoInputs,
    Span,
};
use diameter_serde_macros::LocatedError;

use crate::{
    avp::{Address, Avp, AvpValue},
    dictionary::AvpDataType,
    iana::AddressFamily,
    wire::{
        deserializer::{
            avp::{AvpParsingError, LocatedAvpParsingError},
            DiameterParsingContext,
        },
        ntp_to_time,
    },
};

#[derive(LocatedError, PartialEq, Eq, Clone, Debug, Serialize, Deserialize)]
pub enum AvpValueParsingError {
    /// Errors triggered by the nom parser, see [ErrorKind] for
    /// additional information.
    #[serde(with = "ErrorKindSerdeDeref")]
    NomError(#[from_nom] ErrorKind),

    /// Payload of a fixed size data type with the wrong number of octets
    InvalidPayloadLength {
        data_type: AvpDataType,
        length: usize,
    },

    InvalidUtf8String {
        valid_up_to: usize,
    },

    /// IPv4 and IPv6 addresses must carry exactly 4 and 16 octets
    InvalidAddressLength {
        family: u16,
        length: usize,
    },

    InvalidTime(u32),

    /// A member of a grouped AVP failed to parse
    GroupedMemberError(Box<AvpParsingError>),
}

impl<'a> From<LocatedAvpParsingError<'a>> for LocatedAvpValueParsingError<'a> {
    fn from(input: LocatedAvpParsingError<'a>) -> Self {
        let (span, error) = input.into();
        LocatedAvpValueParsingError::new(
            span,
            AvpValueParsingError::GroupedMemberError(Box::new(error)),
        )
    }
}

fn parse_utf8(buf: Span<'_>) -> IResult<Span<'_>, String, LocatedAvpValueParsingError<'_>> {
    let input = buf;
    let (buf, data) = rest(buf)?;
    match std::str::from_utf8(data.fragment()) {
        Ok(value) => Ok((buf, value.to_string())),
        Err(err) => Err(nom::Err::Error(LocatedAvpValueParsingError::new(
            input,
            AvpValueParsingError::InvalidUtf8String {
                valid_up_to: err.valid_up_to(),
            },
        ))),
    }
}

fn parse_address(buf: Span<'_>) -> IResult<Span<'_>, Address, LocatedAvpValueParsingError<'_>> {
    let input = buf;
    let (buf, family) = be_u16(buf)?;
    let (buf, data) = rest(buf)?;
    let octets = data.fragment();
    let invalid_length = || {
        nom::Err::Error(LocatedAvpValueParsingError::new(
            input,
            AvpValueParsingError::InvalidAddressLength {
                family,
                length: octets.len(),
            },
        ))
    };
    let address = match AddressFamily::try_from(family) {
        Ok(AddressFamily::Ipv4) => {
            let octets: [u8; 4] = octets.try_into().map_err(|_| invalid_length())?;
            Address::Ipv4(Ipv4Addr::from(octets))
        }
        Ok(AddressFamily::Ipv6) => {
            let octets: [u8; 16] = octets.try_into().map_err(|_| invalid_length())?;
            Address::Ipv6(Ipv6Addr::from(octets))
        }
        Ok(AddressFamily::E164) | Err(_) => Address::Other {
            family,
            value: octets.to_vec(),
        },
    };
    Ok((buf, address))
}

impl<'a, 'c, 'd>
    ReadablePduWithTwoInputs<
        'a,
        AvpDataType,
        &'c DiameterParsingContext<'d>,
        LocatedAvpValueParsingError<'a>,
    > for AvpValue
{
    /// Parse the whole `buf` as a value of `data_type`
    fn from_wire(
        buf: Span<'a>,
        data_type: AvpDataType,
        ctx: &'c DiameterParsingContext<'d>,
    ) -> IResult<Span<'a>, Self, LocatedAvpValueParsingError<'a>> {
        let input = buf;
        if let Some(expected) = data_type.fixed_length() {
            let length = buf.fragment().len();
            if length != expected {
                return Err(nom::Err::Error(LocatedAvpValueParsingError::new(
                    input,
                    AvpValueParsingError::InvalidPayloadLength { data_type, length },
                )));
            }
        }
        match data_type {
            AvpDataType::OctetString => {
                let (buf, data) = rest(buf)?;
                Ok((buf, AvpValue::OctetString(data.fragment().to_vec())))
            }
            AvpDataType::Integer32 => {
                let (buf, value) = be_i32(buf)?;
                Ok((buf, AvpValue::Integer32(value)))
            }
            AvpDataType::Integer64 => {
                let (buf, value) = be_i64(buf)?;
                Ok((buf, AvpValue::Integer64(value)))
            }
            AvpDataType::Unsigned32 => {
                let (buf, value) = be_u32(buf)?;
                Ok((buf, AvpValue::Unsigned32(value)))
            }
            AvpDataType::Unsigned64 => {
                let (buf, value) = be_u64(buf)?;
                Ok((buf, AvpValue::Unsigned64(value)))
            }
            AvpDataType::Float32 => {
                let (buf, value) = be_f32(buf)?;
                Ok((buf, AvpValue::Float32(OrderedFloat(value))))
            }
            AvpDataType::Float64 => {
                let (buf, value) = be_f64(buf)?;
                Ok((buf, AvpValue::Float64(OrderedFloat(value))))
            }
            AvpDataType::Enumerated => {
                let (buf, value) = be_i32(buf)?;
                Ok((buf, AvpValue::Enumerated(value)))
            }
            AvpDataType::Time => {
                let (buf, ntp) = be_u32(buf)?;
                match ntp_to_time(ntp) {
                    Some(time) => Ok((buf, AvpValue::Time(time))),
                    None => Err(nom::Err::Error(LocatedAvpValueParsingError::new(
                        input,
                        AvpValueParsingError::InvalidTime(ntp),
                    ))),
                }
            }
            AvpDataType::Address => {
                let (buf, address) = parse_address(buf)?;
                Ok((buf, AvpValue::Address(address)))
            }
            AvpDataType::Utf8String => {
                let (buf, value) = parse_utf8(buf)?;
                Ok((buf, AvpValue::Utf8String(value)))
            }
            AvpDataType::DiameterIdentity => {
                let (buf, value) = parse_utf8(buf)?;
                Ok((buf, AvpValue::DiameterIdentity(value)))
            }
            AvpDataType::DiameterUri => {
                let (buf, value) = parse_utf8(buf)?;
                Ok((buf, AvpValue::DiameterUri(value)))
            }
            AvpDataType::Grouped => {
                let (buf, children) = parse_till_empty_into_with_one_input_located::<
                    _,
                    LocatedAvpParsingError<'_>,
                    LocatedAvpValueParsingError<'_>,
                    Avp,
                >(buf, &ctx.nested())?;
                Ok((buf, AvpValue::Grouped(children)))
            }
        }
    }
}
