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

use serde::{Deserialize, Serialize};

use crate::{
    application_id::ApplicationIdComposition,
    iana::ResultCode,
    wire::{
        deserializer::{
            avp::AvpParsingError, value::AvpValueParsingError, DiameterMessageParsingError,
        },
        serializer::{AvpWritingError, DiameterMessageWritingError},
    },
};

/// Errors reported by the AVP and message factories, the typed views and the
/// `encode`/`decode` entry points. The wire parsers report located errors
/// that convert into this type.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiameterError {
    #[error("malformed AVP: {0}")]
    MalformedAvp(String),

    #[error("malformed message: {0}")]
    MalformedMessage(String),

    /// Invalid UTF-8, payload length not matching the data type or a value
    /// whose type differs from the dictionary definition.
    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("value {value} is not declared for the enumerated AVP {code} (vendor {vendor_id})")]
    InvalidEnum { code: u32, vendor_id: u32, value: i32 },

    #[error("invalid application id composition: {0}")]
    InvalidApplicationIdComposition(ApplicationIdComposition),

    #[error("mandatory AVP {avp_code} (vendor {vendor_id}) is missing from command {command_code}")]
    MissingMandatoryAvp {
        command_code: u32,
        avp_code: u32,
        vendor_id: u32,
    },

    #[error("grouped AVP {parent} is missing its member {code} (vendor {vendor_id})")]
    MissingGroupedMember { parent: u32, code: u32, vendor_id: u32 },

    #[error("dictionary is used before being loaded")]
    DictionaryNotInitialized,

    #[error("dictionary is already loaded")]
    DictionaryAlreadyInitialized,

    #[error("AVP {code} (vendor {vendor_id}) is not defined in the dictionary")]
    UnknownAvp { code: u32, vendor_id: u32 },

    #[error("no AVP named {name} (vendor {vendor_id}) is defined in the dictionary")]
    UnknownAvpName { name: String, vendor_id: u32 },

    #[error("command {0} is not defined in the dictionary")]
    UnknownCommand(u32),

    #[error("AVP {0} is not allowed in an answer")]
    AvpNotAllowedInAnswer(u32),

    #[error("command {0} is an answer, expected a request")]
    NotARequest(u32),

    #[error("writing error: {0}")]
    Writing(String),
}

impl DiameterError {
    /// Result-Code an answer reporting this error should carry, if any
    pub const fn result_code(&self) -> Option<ResultCode> {
        match self {
            Self::MalformedAvp(_) => Some(ResultCode::InvalidAvpLength),
            Self::MalformedMessage(_) => Some(ResultCode::InvalidMessageLength),
            Self::Encoding(_) | Self::InvalidEnum { .. } => Some(ResultCode::InvalidAvpValue),
            Self::InvalidApplicationIdComposition(_) => Some(ResultCode::ContradictingAvps),
            Self::MissingMandatoryAvp { .. } | Self::MissingGroupedMember { .. } => {
                Some(ResultCode::MissingAvp)
            }
            Self::UnknownAvp { .. } | Self::UnknownAvpName { .. } => {
                Some(ResultCode::AvpUnsupported)
            }
            Self::UnknownCommand(_) => Some(ResultCode::CommandUnsupported),
            Self::AvpNotAllowedInAnswer(_) => Some(ResultCode::AvpNotAllowed),
            Self::DictionaryNotInitialized
            | Self::DictionaryAlreadyInitialized
            | Self::NotARequest(_)
            | Self::Writing(_) => None,
        }
    }
}

impl From<AvpValueParsingError> for DiameterError {
    fn from(error: AvpValueParsingError) -> Self {
        match error {
            AvpValueParsingError::GroupedMemberError(member) => (*member).into(),
            AvpValueParsingError::NomError(_) => Self::MalformedAvp(format!("{error:?}")),
            AvpValueParsingError::InvalidPayloadLength { .. }
            | AvpValueParsingError::InvalidUtf8String { .. }
            | AvpValueParsingError::InvalidAddressLength { .. }
            | AvpValueParsingError::InvalidTime(_) => Self::Encoding(format!("{error:?}")),
        }
    }
}

impl From<AvpParsingError> for DiameterError {
    fn from(error: AvpParsingError) -> Self {
        match error {
            AvpParsingError::ValueError(value) => value.into(),
            AvpParsingError::InvalidEnumValue {
                code,
                vendor_id,
                value,
            } => Self::InvalidEnum {
                code,
                vendor_id,
                value,
            },
            AvpParsingError::UnknownMandatoryAvp { code, vendor_id } => {
                Self::UnknownAvp { code, vendor_id }
            }
            AvpParsingError::NomError(_)
            | AvpParsingError::InvalidAvpLength(_)
            | AvpParsingError::AvpLengthExceedsBuffer { .. }
            | AvpParsingError::NestingTooDeep(_) => {
                Self::MalformedAvp(format!("{error:?}"))
            }
        }
    }
}

impl From<DiameterMessageParsingError> for DiameterError {
    fn from(error: DiameterMessageParsingError) -> Self {
        match error {
            DiameterMessageParsingError::AvpError(avp) => avp.into(),
            DiameterMessageParsingError::DestinationAvpInAnswer(code) => {
                Self::AvpNotAllowedInAnswer(code)
            }
            DiameterMessageParsingError::MissingMandatoryAvp {
                command_code,
                avp_code,
                vendor_id,
            } => Self::MissingMandatoryAvp {
                command_code,
                avp_code,
                vendor_id,
            },
            DiameterMessageParsingError::InvalidApplicationIdComposition(composition) => {
                Self::InvalidApplicationIdComposition(composition)
            }
            DiameterMessageParsingError::NomError(_)
            | DiameterMessageParsingError::UnsupportedVersion(_)
            | DiameterMessageParsingError::InvalidMessageLength(_)
            | DiameterMessageParsingError::TrailingOctets(_) => {
                Self::MalformedMessage(format!("{error:?}"))
            }
        }
    }
}

impl From<AvpWritingError> for DiameterError {
    fn from(error: AvpWritingError) -> Self {
        Self::Writing(format!("{error:?}"))
    }
}

impl From<DiameterMessageWritingError> for DiameterError {
    fn from(error: DiameterMessageWritingError) -> Self {
        Self::Writing(format!("{error:?}"))
    }
}
