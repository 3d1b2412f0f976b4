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

//! Deserializer library for Diameter's wire protocol

pub mod avp;
pub mod value;

use nom::{
    bytes::complete::take,
    error::ErrorKind,
    number::complete::{be_u24, be_u32, be_u8},
    IResult,
};
use serde::{Deserialize, Serialize};

use diameter_parse_utils::{
    parse_till_empty_into_with_one_input_located, ErrorKindSerdeDeref, ReadablePduWithOneInput,
    Span,
};
use diameter_serde_macros::LocatedError;

use crate::{
    application_id::ApplicationIdComposition,
    avp::Avp,
    dictionary::{CommandApplication, Dictionary},
    error::DiameterError,
    is_destination_avp,
    wire::{
        deserializer::avp::{AvpParsingError, LocatedAvpParsingError},
        DIAMETER_HEADER_LENGTH, ERROR_FLAG, PROXIABLE_FLAG, REQUEST_FLAG, RETRANSMITTED_FLAG,
    },
    CommandFlags, DiameterHeader, DiameterMessage, DIAMETER_VERSION,
};

/// Grouped AVPs nested deeper than this are rejected with
/// [`AvpParsingError::NestingTooDeep`]
pub const MAX_GROUPED_DEPTH: usize = 32;

/// Dictionary and validation switches used while parsing.
///
/// With every switch off the parser only enforces the wire format and the
/// answer invariants: unknown AVPs are kept as opaque octet strings and any
/// Enumerated value is accepted.
#[derive(Debug, Clone, Copy)]
pub struct DiameterParsingContext<'d> {
    dictionary: &'d Dictionary,
    fail_on_unknown_mandatory: bool,
    check_enumerated_values: bool,
    check_mandatory_avps: bool,
    /// Number of Grouped AVPs enclosing the AVP being parsed
    depth: usize,
}

impl<'d> DiameterParsingContext<'d> {
    pub const fn new(
        dictionary: &'d Dictionary,
        fail_on_unknown_mandatory: bool,
        check_enumerated_values: bool,
        check_mandatory_avps: bool,
    ) -> Self {
        Self {
            dictionary,
            fail_on_unknown_mandatory,
            check_enumerated_values,
            check_mandatory_avps,
            depth: 0,
        }
    }

    pub const fn lenient(dictionary: &'d Dictionary) -> Self {
        Self::new(dictionary, false, false, false)
    }

    /// Rejects unknown mandatory AVPs, undeclared Enumerated values, missing
    /// mandatory AVPs and invalid Application-Id compositions
    pub const fn strict(dictionary: &'d Dictionary) -> Self {
        Self::new(dictionary, true, true, true)
    }

    pub const fn dictionary(&self) -> &'d Dictionary {
        self.dictionary
    }

    pub const fn fail_on_unknown_mandatory(&self) -> bool {
        self.fail_on_unknown_mandatory
    }

    pub fn set_fail_on_unknown_mandatory(&mut self, value: bool) {
        self.fail_on_unknown_mandatory = value;
    }

    pub const fn check_enumerated_values(&self) -> bool {
        self.check_enumerated_values
    }

    pub fn set_check_enumerated_values(&mut self, value: bool) {
        self.check_enumerated_values = value;
    }

    pub const fn check_mandatory_avps(&self) -> bool {
        self.check_mandatory_avps
    }

    pub fn set_check_mandatory_avps(&mut self, value: bool) {
        self.check_mandatory_avps = value;
    }

    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Context for the members of a Grouped AVP
    pub(crate) const fn nested(&self) -> Self {
        Self {
            depth: self.depth + 1,
            ..*self
        }
    }
}

impl From<u8> for CommandFlags {
    fn from(flags: u8) -> Self {
        Self::new(
            flags & REQUEST_FLAG == REQUEST_FLAG,
            flags & PROXIABLE_FLAG == PROXIABLE_FLAG,
            flags & ERROR_FLAG == ERROR_FLAG,
            flags & RETRANSMITTED_FLAG == RETRANSMITTED_FLAG,
        )
    }
}

/// Diameter Message Parsing errors
#[derive(LocatedError, PartialEq, Eq, Clone, Debug, Serialize, Deserialize)]
pub enum DiameterMessageParsingError {
    /// Errors triggered by the nom parser, see [ErrorKind] for
    /// additional information.
    #[serde(with = "ErrorKindSerdeDeref")]
    NomError(#[from_nom] ErrorKind),

    UnsupportedVersion(u8),

    /// Message length is shorter than the header, not a multiple of four or
    /// longer than the input
    InvalidMessageLength(u32),

    /// Answer carrying Destination-Host or Destination-Realm
    DestinationAvpInAnswer(u32),

    MissingMandatoryAvp {
        command_code: u32,
        avp_code: u32,
        vendor_id: u32,
    },

    InvalidApplicationIdComposition(ApplicationIdComposition),

    /// Octets left after the message
    TrailingOctets(usize),

    AvpError(#[from_located] AvpParsingError),
}

impl<'a, 'c, 'd>
    ReadablePduWithOneInput<
        'a,
        &'c DiameterParsingContext<'d>,
        LocatedDiameterMessageParsingError<'a>,
    > for DiameterMessage
{
    fn from_wire(
        buf: Span<'a>,
        ctx: &'c DiameterParsingContext<'d>,
    ) -> IResult<Span<'a>, Self, LocatedDiameterMessageParsingError<'a>> {
        let input = buf;
        let (buf, version) = be_u8(buf)?;
        if version != DIAMETER_VERSION {
            return Err(nom::Err::Error(LocatedDiameterMessageParsingError::new(
                input,
                DiameterMessageParsingError::UnsupportedVersion(version),
            )));
        }
        let (buf, length) = be_u24(buf)?;
        // The version and length octets are already consumed
        if (length as usize) < DIAMETER_HEADER_LENGTH
            || length % 4 != 0
            || length as usize - 4 > buf.fragment().len()
        {
            return Err(nom::Err::Error(LocatedDiameterMessageParsingError::new(
                input,
                DiameterMessageParsingError::InvalidMessageLength(length),
            )));
        }
        let (buf, flags) = be_u8(buf)?;
        let (buf, command_code) = be_u24(buf)?;
        let (buf, application_id) = be_u32(buf)?;
        let (buf, hop_by_hop_id) = be_u32(buf)?;
        let (buf, end_to_end_id) = be_u32(buf)?;
        let (buf, body) = take(length as usize - DIAMETER_HEADER_LENGTH)(buf)?;
        let (_, avps) = parse_till_empty_into_with_one_input_located::<
            _,
            LocatedAvpParsingError<'_>,
            LocatedDiameterMessageParsingError<'_>,
            Avp,
        >(body, ctx)?;

        let flags = CommandFlags::from(flags);
        if !flags.request() {
            if let Some(avp) = avps.iter().find(|avp| is_destination_avp(avp)) {
                return Err(nom::Err::Error(LocatedDiameterMessageParsingError::new(
                    input,
                    DiameterMessageParsingError::DestinationAvpInAnswer(avp.code()),
                )));
            }
        }
        if ctx.check_mandatory_avps() {
            if let Some(spec) = ctx.dictionary().command(command_code) {
                if let Some(missing) = spec.first_missing_avp(flags.request(), &avps) {
                    return Err(nom::Err::Error(LocatedDiameterMessageParsingError::new(
                        input,
                        DiameterMessageParsingError::MissingMandatoryAvp {
                            command_code,
                            avp_code: missing.code(),
                            vendor_id: missing.vendor_id(),
                        },
                    )));
                }
                if spec.application() == CommandApplication::Configured {
                    let composition = ApplicationIdComposition::of(&avps);
                    if composition.signature().is_err() {
                        return Err(nom::Err::Error(LocatedDiameterMessageParsingError::new(
                            input,
                            DiameterMessageParsingError::InvalidApplicationIdComposition(
                                composition,
                            ),
                        )));
                    }
                }
            }
        }

        let header = DiameterHeader::new(
            flags,
            command_code,
            application_id,
            hop_by_hop_id,
            end_to_end_id,
        );
        Ok((buf, DiameterMessage::new_unchecked(header, avps)))
    }
}

impl DiameterMessage {
    /// Decode exactly one message from `buf`, any octet left after the
    /// message is an error.
    pub fn decode(buf: &[u8], ctx: &DiameterParsingContext<'_>) -> Result<Self, DiameterError> {
        let parsed = <Self as ReadablePduWithOneInput<
            '_,
            _,
            LocatedDiameterMessageParsingError<'_>,
        >>::from_wire(Span::new(buf), ctx);
        match parsed {
            Ok((rest, message)) => {
                let trailing = rest.fragment().len();
                if trailing == 0 {
                    Ok(message)
                } else {
                    Err(DiameterMessageParsingError::TrailingOctets(trailing).into())
                }
            }
            Err(nom::Err::Error(err)) | Err(nom::Err::Failure(err)) => {
                let (_, error): (Span<'_>, DiameterMessageParsingError) = err.into();
                Err(error.into())
            }
            Err(nom::Err::Incomplete(needed)) => Err(DiameterError::MalformedMessage(format!(
                "incomplete message, needed: {needed:?}"
            ))),
        }
    }
}
