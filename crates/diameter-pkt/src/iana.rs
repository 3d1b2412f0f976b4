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

//! Diameter codes registered at IANA
//! [AAA Parameters](https://www.iana.org/assignments/aaa-parameters/aaa-parameters.xhtml)

use serde::{Deserialize, Serialize};
use strum_macros::{Display, FromRepr};

/// AVP codes of the base protocol as registered in
/// [RFC6733 Section 4.5](https://datatracker.ietf.org/doc/html/rfc6733#section-4.5)
#[repr(u32)]
#[derive(Display, FromRepr, Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum BaseAvpCode {
    UserName = 1,
    Class = 25,
    SessionTimeout = 27,
    ProxyState = 33,
    AcctSessionId = 44,
    AcctMultiSessionId = 50,
    EventTimestamp = 55,
    AcctInterimInterval = 85,
    HostIpAddress = 257,
    AuthApplicationId = 258,
    AcctApplicationId = 259,
    VendorSpecificApplicationId = 260,
    RedirectHostUsage = 261,
    RedirectMaxCacheTime = 262,
    SessionId = 263,
    OriginHost = 264,
    SupportedVendorId = 265,
    VendorId = 266,
    FirmwareRevision = 267,
    ResultCode = 268,
    ProductName = 269,
    SessionBinding = 270,
    SessionServerFailover = 271,
    MultiRoundTimeOut = 272,
    DisconnectCause = 273,
    AuthRequestType = 274,
    AuthGracePeriod = 276,
    AuthSessionState = 277,
    OriginStateId = 278,
    FailedAvp = 279,
    ProxyHost = 280,
    ErrorMessage = 281,
    RouteRecord = 282,
    DestinationRealm = 283,
    ProxyInfo = 284,
    ReAuthRequestType = 285,
    AccountingSubSessionId = 287,
    AuthorizationLifetime = 291,
    RedirectHost = 292,
    DestinationHost = 293,
    ErrorReportingHost = 294,
    TerminationCause = 295,
    OriginRealm = 296,
    ExperimentalResult = 297,
    ExperimentalResultCode = 298,
    InbandSecurityId = 299,
    AccountingRecordType = 480,
    AccountingRealtimeRequired = 483,
    AccountingRecordNumber = 485,
}

/// AVP code is not one of [`BaseAvpCode`], the carried value is the undefined
/// code.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct UndefinedBaseAvpCode(pub u32);

impl From<BaseAvpCode> for u32 {
    fn from(value: BaseAvpCode) -> Self {
        value as u32
    }
}

impl TryFrom<u32> for BaseAvpCode {
    type Error = UndefinedBaseAvpCode;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match Self::from_repr(value) {
            Some(val) => Ok(val),
            None => Err(UndefinedBaseAvpCode(value)),
        }
    }
}

/// Command codes of the base protocol
/// [RFC6733 Section 3.1](https://datatracker.ietf.org/doc/html/rfc6733#section-3.1)
#[repr(u32)]
#[derive(Display, FromRepr, Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum BaseCommandCode {
    CapabilitiesExchange = 257,
    ReAuth = 258,
    Accounting = 271,
    AbortSession = 274,
    SessionTermination = 275,
    DeviceWatchdog = 280,
    DisconnectPeer = 282,
}

/// Command code is not one of [`BaseCommandCode`], the carried value is the
/// undefined code.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct UndefinedBaseCommandCode(pub u32);

impl From<BaseCommandCode> for u32 {
    fn from(value: BaseCommandCode) -> Self {
        value as u32
    }
}

impl TryFrom<u32> for BaseCommandCode {
    type Error = UndefinedBaseCommandCode;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match Self::from_repr(value) {
            Some(val) => Ok(val),
            None => Err(UndefinedBaseCommandCode(value)),
        }
    }
}

/// Values of the Result-Code AVP defined by
/// [RFC6733 Section 7.1](https://datatracker.ietf.org/doc/html/rfc6733#section-7.1)
#[repr(u32)]
#[derive(Display, FromRepr, Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ResultCode {
    MultiRoundAuth = 1001,

    Success = 2001,
    LimitedSuccess = 2002,

    CommandUnsupported = 3001,
    UnableToDeliver = 3002,
    RealmNotServed = 3003,
    TooBusy = 3004,
    LoopDetected = 3005,
    RedirectIndication = 3006,
    ApplicationUnsupported = 3007,
    InvalidHdrBits = 3008,
    InvalidAvpBits = 3009,
    UnknownPeer = 3010,

    AuthenticationRejected = 4001,
    OutOfSpace = 4002,
    ElectionLost = 4003,

    AvpUnsupported = 5001,
    UnknownSessionId = 5002,
    AuthorizationRejected = 5003,
    InvalidAvpValue = 5004,
    MissingAvp = 5005,
    ResourcesExceeded = 5006,
    ContradictingAvps = 5007,
    AvpNotAllowed = 5008,
    AvpOccursTooManyTimes = 5009,
    NoCommonApplication = 5010,
    UnsupportedVersion = 5011,
    UnableToComply = 5012,
    InvalidBitInHeader = 5013,
    InvalidAvpLength = 5014,
    InvalidMessageLength = 5015,
    InvalidAvpBitCombo = 5016,
    NoCommonSecurity = 5017,
}

/// Result-Code value is not one of [`ResultCode`]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct UndefinedResultCode(pub u32);

impl From<ResultCode> for u32 {
    fn from(value: ResultCode) -> Self {
        value as u32
    }
}

impl TryFrom<u32> for ResultCode {
    type Error = UndefinedResultCode;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match Self::from_repr(value) {
            Some(val) => Ok(val),
            None => Err(UndefinedResultCode(value)),
        }
    }
}

/// Result code classes, the thousands digit of the code
#[derive(Display, Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ResultCodeClass {
    Informational,
    Success,
    ProtocolError,
    TransientFailure,
    PermanentFailure,
}

impl ResultCode {
    pub const fn class(&self) -> ResultCodeClass {
        match *self as u32 / 1000 {
            1 => ResultCodeClass::Informational,
            2 => ResultCodeClass::Success,
            3 => ResultCodeClass::ProtocolError,
            4 => ResultCodeClass::TransientFailure,
            _ => ResultCodeClass::PermanentFailure,
        }
    }

    /// Protocol errors are sent with the E bit set in the answer header
    pub const fn is_protocol_error(&self) -> bool {
        matches!(self.class(), ResultCodeClass::ProtocolError)
    }
}

/// Address families used by the Diameter `Address` type, from the
/// [IANA Address Family Numbers](https://www.iana.org/assignments/address-family-numbers/address-family-numbers.xhtml)
#[repr(u16)]
#[derive(Display, FromRepr, Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum AddressFamily {
    Ipv4 = 1,
    Ipv6 = 2,
    E164 = 8,
}

/// Address family is not one of [`AddressFamily`]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct UndefinedAddressFamily(pub u16);

impl From<AddressFamily> for u16 {
    fn from(value: AddressFamily) -> Self {
        value as u16
    }
}

impl TryFrom<u16> for AddressFamily {
    type Error = UndefinedAddressFamily;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match Self::from_repr(value) {
            Some(val) => Ok(val),
            None => Err(UndefinedAddressFamily(value)),
        }
    }
}
