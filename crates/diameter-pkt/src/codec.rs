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

//! Framing of Diameter messages over a byte stream

use byteorder::{ByteOrder, NetworkEndian};
use bytes::{Buf, BufMut, BytesMut};
use nom::Needed;
use serde::{Deserialize, Serialize};
use tokio_util::codec::{Decoder, Encoder};

use diameter_parse_utils::{LocatedParsingError, ReadablePduWithOneInput, Span, WritablePdu};

use crate::{
    dictionary::DictionaryHandle,
    wire::{
        deserializer::{DiameterMessageParsingError, DiameterParsingContext},
        serializer::DiameterMessageWritingError,
        DIAMETER_HEADER_LENGTH,
    },
    DiameterMessage,
};

#[derive(Debug, Clone)]
pub struct DiameterCodec {
    dictionary: DictionaryHandle,
    strict: bool,
}

impl DiameterCodec {
    /// Codec that only enforces the wire format
    pub const fn new(dictionary: DictionaryHandle) -> Self {
        Self {
            dictionary,
            strict: false,
        }
    }

    /// Codec that validates every message, see
    /// [`DiameterParsingContext::strict`]
    pub const fn strict(dictionary: DictionaryHandle) -> Self {
        Self {
            dictionary,
            strict: true,
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub enum DiameterCodecDecoderError {
    IoError(String),
    Incomplete(Option<usize>),
    DictionaryNotInitialized,
    DiameterMessageParsingError(DiameterMessageParsingError),
}

impl From<std::io::Error> for DiameterCodecDecoderError {
    fn from(error: std::io::Error) -> Self {
        Self::IoError(error.to_string())
    }
}

impl Decoder for DiameterCodec {
    type Item = DiameterMessage;
    type Error = DiameterCodecDecoderError;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if buf.len() < DIAMETER_HEADER_LENGTH {
            return Ok(None);
        }
        let length = NetworkEndian::read_u24(&buf[1..4]) as usize;
        if buf.len() < length {
            return Ok(None);
        }
        let dictionary = self
            .dictionary
            .get()
            .map_err(|_| DiameterCodecDecoderError::DictionaryNotInitialized)?;
        let ctx = if self.strict {
            DiameterParsingContext::strict(dictionary)
        } else {
            DiameterParsingContext::lenient(dictionary)
        };
        if log::log_enabled!(log::Level::Debug) {
            log::debug!("Decoding buffer message: {buf:?}")
        }
        let decoding_result = match DiameterMessage::from_wire(Span::new(&buf[..]), &ctx) {
            Ok((_span, msg)) => Ok(Some(msg)),
            Err(error) => {
                log::error!("Error: {:?} buf: {:?}", error, buf.to_vec());
                Err(match error {
                    nom::Err::Incomplete(needed) => {
                        let needed = match needed {
                            Needed::Unknown => None,
                            Needed::Size(size) => Some(size.get()),
                        };
                        DiameterCodecDecoderError::Incomplete(needed)
                    }
                    nom::Err::Error(error) | nom::Err::Failure(error) => {
                        DiameterCodecDecoderError::DiameterMessageParsingError(
                            error.error().clone(),
                        )
                    }
                })
            }
        };
        if decoding_result.is_ok() {
            buf.advance(length);
        }
        if log::log_enabled!(log::Level::Debug) {
            log::debug!("Decoding buffer result is: {decoding_result:?}");
        }
        decoding_result
    }
}

impl Encoder<DiameterMessage> for DiameterCodec {
    type Error = DiameterMessageWritingError;

    fn encode(&mut self, msg: DiameterMessage, dst: &mut BytesMut) -> Result<(), Self::Error> {
        if log::log_enabled!(log::Level::Debug) {
            log::debug!("Encoding message: {msg:?}")
        }
        dst.reserve(msg.len());
        msg.write(&mut dst.writer())
    }
}
