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

use nom::{
    bytes::complete::take,
    error::ErrorKind,
    number::complete::{be_u24, be_u32, be_u8},
    IResult,
};
use serde::{Deserialize, Serialize};

use diameter_parse_utils::{
    parse_into_located_two_inputs, ErrorKindSerdeDeref, ReadablePduWithOneInput, Span,
};
use diameter_serde_macros::LocatedError;

use crate::{
    avp::{Avp, AvpFlags, AvpValue},
    dictionary::AvpDataType,
    error::DiameterError,
    wire::{
        deserializer::{
            value::{AvpValueParsingError, LocatedAvpValueParsingError},
            DiameterParsingContext, MAX_GROUPED_DEPTH,
        },
        padding, AVP_HEADER_LENGTH, AVP_MANDATORY_FLAG, AVP_PROTECTED_FLAG, AVP_VENDOR_FLAG,
        AVP_VENDOR_HEADER_LENGTH,
    },
};

#[derive(LocatedError, PartialEq, Eq, Clone, Debug, Serialize, Deserialize)]
pub enum AvpParsingError {
    /// Errors triggered by the nom parser, see [ErrorKind] for
    /// additional information.
    #[serde(with = "ErrorKindSerdeDeref")]
    NomError(#[from_nom] ErrorKind),

    /// AVP length is smaller than the AVP header
    InvalidAvpLength(u32),

    /// AVP length, plus its padding, runs past the enclosing buffer
    AvpLengthExceedsBuffer {
        length: u32,
        available: usize,
    },

    /// AVP with the M bit set that the dictionary doesn't know
    UnknownMandatoryAvp {
        code: u32,
        vendor_id: u32,
    },

    InvalidEnumValue {
        code: u32,
        vendor_id: u32,
        value: i32,
    },

    /// Grouped AVP enclosed in [`MAX_GROUPED_DEPTH`] other Grouped AVPs
    NestingTooDeep(usize),

    ValueError(#[from_located] AvpValueParsingError),
}

impl<'a, 'c, 'd>
    ReadablePduWithOneInput<'a, &'c DiameterParsingContext<'d>, LocatedAvpParsingError<'a>>
    for Avp
{
    fn from_wire(
        buf: Span<'a>,
        ctx: &'c DiameterParsingContext<'d>,
    ) -> IResult<Span<'a>, Self, LocatedAvpParsingError<'a>> {
        let input = buf;
        let (buf, code) = be_u32(buf)?;
        let (buf, flags) = be_u8(buf)?;
        let (buf, length) = be_u24(buf)?;
        let vendor_specific = flags & AVP_VENDOR_FLAG == AVP_VENDOR_FLAG;
        let header_length = if vendor_specific {
            AVP_VENDOR_HEADER_LENGTH
        } else {
            AVP_HEADER_LENGTH
        };
        if (length as usize) < header_length {
            return Err(nom::Err::Error(LocatedAvpParsingError::new(
                input,
                AvpParsingError::InvalidAvpLength(length),
            )));
        }
        let (buf, vendor_id) = if vendor_specific {
            be_u32(buf)?
        } else {
            (buf, 0)
        };
        let data_length = length as usize - header_length;
        let padding_length = padding(length as usize);
        let available = buf.fragment().len();
        if data_length + padding_length > available {
            return Err(nom::Err::Error(LocatedAvpParsingError::new(
                input,
                AvpParsingError::AvpLengthExceedsBuffer { length, available },
            )));
        }
        let (buf, data) = take(data_length)(buf)?;
        let (buf, _) = take(padding_length)(buf)?;
        let avp_flags = AvpFlags::new(
            flags & AVP_MANDATORY_FLAG == AVP_MANDATORY_FLAG,
            flags & AVP_PROTECTED_FLAG == AVP_PROTECTED_FLAG,
        );

        let value = match ctx.dictionary().lookup(code, vendor_id) {
            Some(definition) => {
                if definition.data_type() == AvpDataType::Grouped
                    && ctx.depth() >= MAX_GROUPED_DEPTH
                {
                    return Err(nom::Err::Error(LocatedAvpParsingError::new(
                        input,
                        AvpParsingError::NestingTooDeep(ctx.depth()),
                    )));
                }
                let (_, value) = parse_into_located_two_inputs::<
                    _,
                    _,
                    LocatedAvpValueParsingError<'_>,
                    LocatedAvpParsingError<'_>,
                    AvpValue,
                >(data, definition.data_type(), ctx)?;
                if let AvpValue::Enumerated(value) = value {
                    if ctx.check_enumerated_values() && !definition.allows_enumerated_value(value)
                    {
                        return Err(nom::Err::Error(LocatedAvpParsingError::new(
                            data,
                            AvpParsingError::InvalidEnumValue {
                                code,
                                vendor_id,
                                value,
                            },
                        )));
                    }
                }
                value
            }
            None => {
                if avp_flags.mandatory() && ctx.fail_on_unknown_mandatory() {
                    return Err(nom::Err::Error(LocatedAvpParsingError::new(
                        input,
                        AvpParsingError::UnknownMandatoryAvp { code, vendor_id },
                    )));
                }
                AvpValue::OctetString(data.fragment().to_vec())
            }
        };
        Ok((buf, Avp::new(code, vendor_id, avp_flags, value)))
    }
}

impl Avp {
    /// Decode exactly one AVP, including its padding, from `buf`
    pub fn decode(buf: &[u8], ctx: &DiameterParsingContext<'_>) -> Result<Self, DiameterError> {
        let parsed = <Self as ReadablePduWithOneInput<'_, _, LocatedAvpParsingError<'_>>>::from_wire(
            Span::new(buf),
            ctx,
        );
        match parsed {
            Ok((rest, avp)) if rest.fragment().is_empty() => Ok(avp),
            Ok((rest, _)) => Err(DiameterError::MalformedAvp(format!(
                "{} trailing octets after the AVP",
                rest.fragment().len()
            ))),
            Err(nom::Err::Error(err)) | Err(nom::Err::Failure(err)) => {
                let (_, error): (Span<'_>, AvpParsingError) = err.into();
                Err(error.into())
            }
            Err(nom::Err::Incomplete(needed)) => Err(DiameterError::MalformedAvp(format!(
                "incomplete AVP, needed: {needed:?}"
            ))),
        }
    }
}
