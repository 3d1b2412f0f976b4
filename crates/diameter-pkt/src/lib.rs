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

//! Representations for the Diameter base protocol messages and AVPs as
//! defined in [RFC6733](https://datatracker.ietf.org/doc/html/rfc6733), along
//! with dictionary-driven factories and a few derived 3GPP applications.

pub mod application_id;
pub mod applications;
pub mod avp;
#[cfg(feature = "codec")]
pub mod codec;
pub mod dictionary;
pub mod enumerated;
pub mod error;
pub mod factory;
pub mod grouped;
pub mod iana;
pub mod wire;

use serde::{Deserialize, Serialize};

use crate::{
    application_id::ApplicationId,
    avp::Avp,
    error::DiameterError,
    grouped::{ExperimentalResult, GroupedAvp, ProxyInfo},
    iana::BaseAvpCode,
};

/// The only version defined for the Diameter header
pub const DIAMETER_VERSION: u8 = 1;

/// IANA private enterprise number assigned to 3GPP
pub const THREE_GPP_VENDOR_ID: u32 = 10415;

/// Flags carried in the Diameter message header
///
/// ```text
///  0 1 2 3 4 5 6 7
/// +-+-+-+-+-+-+-+-+
/// |R P E T r r r r|
/// +-+-+-+-+-+-+-+-+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CommandFlags {
    request: bool,
    proxiable: bool,
    error: bool,
    retransmitted: bool,
}

impl CommandFlags {
    pub const fn new(request: bool, proxiable: bool, error: bool, retransmitted: bool) -> Self {
        Self {
            request,
            proxiable,
            error,
            retransmitted,
        }
    }

    pub const fn request(&self) -> bool {
        self.request
    }

    pub const fn proxiable(&self) -> bool {
        self.proxiable
    }

    pub const fn error(&self) -> bool {
        self.error
    }

    pub const fn retransmitted(&self) -> bool {
        self.retransmitted
    }
}

/// Diameter header, the version and message length are not kept since the
/// first is constant and the second is computed when writing the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiameterHeader {
    flags: CommandFlags,
    command_code: u32,
    application_id: u32,
    hop_by_hop_id: u32,
    end_to_end_id: u32,
}

impl DiameterHeader {
    pub const fn new(
        flags: CommandFlags,
        command_code: u32,
        application_id: u32,
        hop_by_hop_id: u32,
        end_to_end_id: u32,
    ) -> Self {
        Self {
            flags,
            command_code,
            application_id,
            hop_by_hop_id,
            end_to_end_id,
        }
    }

    pub const fn flags(&self) -> CommandFlags {
        self.flags
    }

    /// 24-bit command code
    pub const fn command_code(&self) -> u32 {
        self.command_code
    }

    pub const fn application_id(&self) -> u32 {
        self.application_id
    }

    pub const fn hop_by_hop_id(&self) -> u32 {
        self.hop_by_hop_id
    }

    pub const fn end_to_end_id(&self) -> u32 {
        self.end_to_end_id
    }
}

/// Returns true for the AVPs that are only meaningful in requests.
pub(crate) fn is_destination_avp(avp: &Avp) -> bool {
    avp.vendor_id() == 0
        && (avp.code() == BaseAvpCode::DestinationHost as u32
            || avp.code() == BaseAvpCode::DestinationRealm as u32)
}

/// A Diameter message: the header followed by an ordered list of AVPs.
///
/// Answers never carry `Destination-Host` or `Destination-Realm`, every
/// constructor and mutator rejects them with
/// [`DiameterError::AvpNotAllowedInAnswer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DiameterMessageFields")]
pub struct DiameterMessage {
    header: DiameterHeader,
    avps: Vec<Avp>,
}

#[derive(Deserialize)]
struct DiameterMessageFields {
    header: DiameterHeader,
    avps: Vec<Avp>,
}

impl TryFrom<DiameterMessageFields> for DiameterMessage {
    type Error = DiameterError;

    fn try_from(fields: DiameterMessageFields) -> Result<Self, Self::Error> {
        DiameterMessage::new(fields.header, fields.avps)
    }
}

impl DiameterMessage {
    pub fn new(header: DiameterHeader, avps: Vec<Avp>) -> Result<Self, DiameterError> {
        if !header.flags().request() {
            if let Some(avp) = avps.iter().find(|avp| is_destination_avp(avp)) {
                return Err(DiameterError::AvpNotAllowedInAnswer(avp.code()));
            }
        }
        Ok(Self { header, avps })
    }

    /// Used by the parser after it checked the answer invariant itself
    pub(crate) const fn new_unchecked(header: DiameterHeader, avps: Vec<Avp>) -> Self {
        Self { header, avps }
    }

    pub const fn header(&self) -> &DiameterHeader {
        &self.header
    }

    pub const fn avps(&self) -> &Vec<Avp> {
        &self.avps
    }

    pub const fn command_code(&self) -> u32 {
        self.header.command_code
    }

    pub const fn is_request(&self) -> bool {
        self.header.flags.request
    }

    pub const fn is_proxiable(&self) -> bool {
        self.header.flags.proxiable
    }

    pub const fn is_error(&self) -> bool {
        self.header.flags.error
    }

    pub const fn is_retransmitted(&self) -> bool {
        self.header.flags.retransmitted
    }

    pub const fn hop_by_hop_id(&self) -> u32 {
        self.header.hop_by_hop_id
    }

    pub const fn end_to_end_id(&self) -> u32 {
        self.header.end_to_end_id
    }

    pub fn set_proxiable(&mut self, proxiable: bool) {
        self.header.flags.proxiable = proxiable;
    }

    /// Mark a request as retransmitted, see
    /// [RFC6733 Section 3](https://datatracker.ietf.org/doc/html/rfc6733#section-3)
    pub fn set_retransmitted(&mut self, retransmitted: bool) {
        self.header.flags.retransmitted = retransmitted;
    }

    pub fn set_error(&mut self, error: bool) {
        self.header.flags.error = error;
    }

    pub fn add_avp(&mut self, avp: Avp) -> Result<(), DiameterError> {
        if !self.is_request() && is_destination_avp(&avp) {
            return Err(DiameterError::AvpNotAllowedInAnswer(avp.code()));
        }
        self.avps.push(avp);
        Ok(())
    }

    /// First top-level AVP with the given code and vendor
    pub fn find_avp(&self, code: u32, vendor_id: u32) -> Option<&Avp> {
        self.avps
            .iter()
            .find(|avp| avp.code() == code && avp.vendor_id() == vendor_id)
    }

    /// All top-level AVPs with the given code and vendor, in message order
    pub fn find_avps(&self, code: u32, vendor_id: u32) -> impl Iterator<Item = &Avp> {
        self.avps
            .iter()
            .filter(move |avp| avp.code() == code && avp.vendor_id() == vendor_id)
    }

    fn base_str(&self, code: BaseAvpCode) -> Option<&str> {
        self.find_avp(code as u32, 0)
            .and_then(|avp| avp.utf8_string().ok())
    }

    fn base_u32(&self, code: BaseAvpCode) -> Option<u32> {
        self.find_avp(code as u32, 0)
            .and_then(|avp| avp.unsigned32().ok())
    }

    pub fn session_id(&self) -> Option<&str> {
        self.base_str(BaseAvpCode::SessionId)
    }

    pub fn origin_host(&self) -> Option<&str> {
        self.base_str(BaseAvpCode::OriginHost)
    }

    pub fn origin_realm(&self) -> Option<&str> {
        self.base_str(BaseAvpCode::OriginRealm)
    }

    pub fn destination_host(&self) -> Option<&str> {
        self.base_str(BaseAvpCode::DestinationHost)
    }

    pub fn destination_realm(&self) -> Option<&str> {
        self.base_str(BaseAvpCode::DestinationRealm)
    }

    pub fn auth_application_id(&self) -> Option<u32> {
        self.base_u32(BaseAvpCode::AuthApplicationId)
    }

    pub fn acct_application_id(&self) -> Option<u32> {
        self.base_u32(BaseAvpCode::AcctApplicationId)
    }

    pub fn result_code(&self) -> Option<u32> {
        self.base_u32(BaseAvpCode::ResultCode)
    }

    pub fn experimental_result(&self) -> Option<Result<ExperimentalResult, DiameterError>> {
        self.find_avp(ExperimentalResult::CODE, ExperimentalResult::VENDOR_ID)
            .map(ExperimentalResult::from_avp)
    }

    pub fn proxy_infos(&self) -> Result<Vec<ProxyInfo>, DiameterError> {
        self.find_avps(ProxyInfo::CODE, ProxyInfo::VENDOR_ID)
            .map(ProxyInfo::from_avp)
            .collect()
    }

    /// The application identified by the Auth-Application-Id,
    /// Acct-Application-Id and Vendor-Specific-Application-Id AVPs, fails if
    /// their composition is not one of the valid signatures.
    pub fn application_id(&self) -> Result<ApplicationId, DiameterError> {
        ApplicationId::from_avps(&self.avps)
    }
}
