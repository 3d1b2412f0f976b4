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

//! Diameter base protocol [RFC6733](https://datatracker.ietf.org/doc/html/rfc6733)

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, FromRepr};

use crate::{
    applications::{avp, base_keys},
    dictionary::{
        AvpDataType, AvpDefinition, CommandApplication, CommandSpec, DiameterApplication,
    },
    enumerated::enumerated_avp,
    iana::{BaseAvpCode, BaseCommandCode},
};

/// Commands and AVPs of the base protocol. Capabilities-Exchange,
/// Device-Watchdog and Disconnect-Peer are exchanged between peers with
/// Application-Id zero and are never proxied, the session commands take the
/// Application-Id of the message factory.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseProtocol;

impl DiameterApplication for BaseProtocol {
    fn name(&self) -> &'static str {
        "Diameter Common Messages"
    }

    fn avp_definitions(&self) -> Vec<AvpDefinition> {
        use AvpDataType::*;
        use BaseAvpCode as C;
        vec![
            avp(C::UserName as u32, 0, "User-Name", Utf8String, true),
            avp(C::Class as u32, 0, "Class", OctetString, true),
            avp(C::SessionTimeout as u32, 0, "Session-Timeout", Unsigned32, true),
            avp(C::ProxyState as u32, 0, "Proxy-State", OctetString, true),
            avp(C::AcctSessionId as u32, 0, "Acct-Session-Id", OctetString, true),
            avp(C::AcctMultiSessionId as u32, 0, "Acct-Multi-Session-Id", Utf8String, true),
            avp(C::EventTimestamp as u32, 0, "Event-Timestamp", Time, true),
            avp(C::AcctInterimInterval as u32, 0, "Acct-Interim-Interval", Unsigned32, true),
            avp(C::HostIpAddress as u32, 0, "Host-IP-Address", Address, true),
            avp(C::AuthApplicationId as u32, 0, "Auth-Application-Id", Unsigned32, true),
            avp(C::AcctApplicationId as u32, 0, "Acct-Application-Id", Unsigned32, true),
            avp(
                C::VendorSpecificApplicationId as u32,
                0,
                "Vendor-Specific-Application-Id",
                Grouped,
                true,
            ),
            avp(C::RedirectHostUsage as u32, 0, "Redirect-Host-Usage", Enumerated, true)
                .with_enumerated::<RedirectHostUsage>(),
            avp(C::RedirectMaxCacheTime as u32, 0, "Redirect-Max-Cache-Time", Unsigned32, true),
            avp(C::SessionId as u32, 0, "Session-Id", Utf8String, true),
            avp(C::OriginHost as u32, 0, "Origin-Host", DiameterIdentity, true),
            avp(C::SupportedVendorId as u32, 0, "Supported-Vendor-Id", Unsigned32, true),
            avp(C::VendorId as u32, 0, "Vendor-Id", Unsigned32, true),
            avp(C::FirmwareRevision as u32, 0, "Firmware-Revision", Unsigned32, false),
            avp(C::ResultCode as u32, 0, "Result-Code", Unsigned32, true),
            avp(C::ProductName as u32, 0, "Product-Name", Utf8String, false),
            avp(C::SessionBinding as u32, 0, "Session-Binding", Unsigned32, true),
            avp(C::SessionServerFailover as u32, 0, "Session-Server-Failover", Enumerated, true)
                .with_enumerated::<SessionServerFailover>(),
            avp(C::MultiRoundTimeOut as u32, 0, "Multi-Round-Time-Out", Unsigned32, true),
            avp(C::DisconnectCause as u32, 0, "Disconnect-Cause", Enumerated, true)
                .with_enumerated::<DisconnectCause>(),
            avp(C::AuthRequestType as u32, 0, "Auth-Request-Type", Enumerated, true)
                .with_enumerated::<AuthRequestType>(),
            avp(C::AuthGracePeriod as u32, 0, "Auth-Grace-Period", Unsigned32, true),
            avp(C::AuthSessionState as u32, 0, "Auth-Session-State", Enumerated, true)
                .with_enumerated::<AuthSessionState>(),
            avp(C::OriginStateId as u32, 0, "Origin-State-Id", Unsigned32, true),
            avp(C::FailedAvp as u32, 0, "Failed-AVP", Grouped, true),
            avp(C::ProxyHost as u32, 0, "Proxy-Host", DiameterIdentity, true),
            avp(C::ErrorMessage as u32, 0, "Error-Message", Utf8String, false),
            avp(C::RouteRecord as u32, 0, "Route-Record", DiameterIdentity, true),
            avp(C::DestinationRealm as u32, 0, "Destination-Realm", DiameterIdentity, true),
            avp(C::ProxyInfo as u32, 0, "Proxy-Info", Grouped, true),
            avp(C::ReAuthRequestType as u32, 0, "Re-Auth-Request-Type", Enumerated, true)
                .with_enumerated::<ReAuthRequestType>(),
            avp(C::AccountingSubSessionId as u32, 0, "Accounting-Sub-Session-Id", Unsigned64, true),
            avp(C::AuthorizationLifetime as u32, 0, "Authorization-Lifetime", Unsigned32, true),
            avp(C::RedirectHost as u32, 0, "Redirect-Host", DiameterUri, true),
            avp(C::DestinationHost as u32, 0, "Destination-Host", DiameterIdentity, true),
            avp(C::ErrorReportingHost as u32, 0, "Error-Reporting-Host", DiameterIdentity, false),
            avp(C::TerminationCause as u32, 0, "Termination-Cause", Enumerated, true)
                .with_enumerated::<TerminationCause>(),
            avp(C::OriginRealm as u32, 0, "Origin-Realm", DiameterIdentity, true),
            avp(C::ExperimentalResult as u32, 0, "Experimental-Result", Grouped, true),
            avp(C::ExperimentalResultCode as u32, 0, "Experimental-Result-Code", Unsigned32, true),
            avp(C::InbandSecurityId as u32, 0, "Inband-Security-Id", Unsigned32, true),
            avp(C::AccountingRecordType as u32, 0, "Accounting-Record-Type", Enumerated, true)
                .with_enumerated::<AccountingRecordType>(),
            avp(
                C::AccountingRealtimeRequired as u32,
                0,
                "Accounting-Realtime-Required",
                Enumerated,
                true,
            )
            .with_enumerated::<AccountingRealtimeRequired>(),
            avp(C::AccountingRecordNumber as u32, 0, "Accounting-Record-Number", Unsigned32, true),
        ]
    }

    /// The Application-Id AVPs of session commands are checked by their
    /// composition, so they are left out of the mandatory lists.
    fn command_specs(&self) -> Vec<CommandSpec> {
        use BaseAvpCode as C;
        let origin = [C::OriginHost as u32, C::OriginRealm as u32];
        let answer = [C::ResultCode as u32, C::OriginHost as u32, C::OriginRealm as u32];
        let session_answer = [
            C::SessionId as u32,
            C::ResultCode as u32,
            C::OriginHost as u32,
            C::OriginRealm as u32,
        ];
        let capabilities = [
            C::HostIpAddress as u32,
            C::VendorId as u32,
            C::ProductName as u32,
        ];
        vec![
            CommandSpec::new(
                BaseCommandCode::CapabilitiesExchange.into(),
                "Capabilities-Exchange",
                "CER",
                "CEA",
                false,
                CommandApplication::Common,
            )
            .with_request_mandatory(base_keys(origin).into_iter().chain(base_keys(capabilities)))
            .with_answer_mandatory(base_keys(answer).into_iter().chain(base_keys(capabilities))),
            CommandSpec::new(
                BaseCommandCode::DeviceWatchdog.into(),
                "Device-Watchdog",
                "DWR",
                "DWA",
                false,
                CommandApplication::Common,
            )
            .with_request_mandatory(base_keys(origin))
            .with_answer_mandatory(base_keys(answer)),
            CommandSpec::new(
                BaseCommandCode::DisconnectPeer.into(),
                "Disconnect-Peer",
                "DPR",
                "DPA",
                false,
                CommandApplication::Common,
            )
            .with_request_mandatory(base_keys([
                C::OriginHost as u32,
                C::OriginRealm as u32,
                C::DisconnectCause as u32,
            ]))
            .with_answer_mandatory(base_keys(answer)),
            CommandSpec::new(
                BaseCommandCode::AbortSession.into(),
                "Abort-Session",
                "ASR",
                "ASA",
                true,
                CommandApplication::Configured,
            )
            .with_request_mandatory(base_keys([
                C::SessionId as u32,
                C::OriginHost as u32,
                C::OriginRealm as u32,
                C::DestinationRealm as u32,
                C::DestinationHost as u32,
            ]))
            .with_answer_mandatory(base_keys(session_answer)),
            CommandSpec::new(
                BaseCommandCode::Accounting.into(),
                "Accounting",
                "ACR",
                "ACA",
                true,
                CommandApplication::Configured,
            )
            .with_request_mandatory(base_keys([
                C::SessionId as u32,
                C::OriginHost as u32,
                C::OriginRealm as u32,
                C::DestinationRealm as u32,
                C::AccountingRecordType as u32,
                C::AccountingRecordNumber as u32,
            ]))
            .with_answer_mandatory(base_keys([
                C::SessionId as u32,
                C::ResultCode as u32,
                C::OriginHost as u32,
                C::OriginRealm as u32,
                C::AccountingRecordType as u32,
                C::AccountingRecordNumber as u32,
            ])),
            CommandSpec::new(
                BaseCommandCode::ReAuth.into(),
                "Re-Auth",
                "RAR",
                "RAA",
                true,
                CommandApplication::Configured,
            )
            .with_request_mandatory(base_keys([
                C::SessionId as u32,
                C::OriginHost as u32,
                C::OriginRealm as u32,
                C::DestinationRealm as u32,
                C::DestinationHost as u32,
                C::ReAuthRequestType as u32,
            ]))
            .with_answer_mandatory(base_keys(session_answer)),
            CommandSpec::new(
                BaseCommandCode::SessionTermination.into(),
                "Session-Termination",
                "STR",
                "STA",
                true,
                CommandApplication::Configured,
            )
            .with_request_mandatory(base_keys([
                C::SessionId as u32,
                C::OriginHost as u32,
                C::OriginRealm as u32,
                C::DestinationRealm as u32,
                C::TerminationCause as u32,
            ]))
            .with_answer_mandatory(base_keys(session_answer)),
        ]
    }
}

/// Disconnect-Cause AVP values, RFC6733 Section 5.4.3
#[repr(i32)]
#[derive(
    Display, FromRepr, EnumIter, Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DisconnectCause {
    Rebooting = 0,
    Busy = 1,
    DoNotWantToTalkToYou = 2,
}
enumerated_avp!(DisconnectCause, BaseAvpCode::DisconnectCause as u32, 0);

/// Auth-Request-Type AVP values, RFC6733 Section 8.7
#[repr(i32)]
#[derive(
    Display, FromRepr, EnumIter, Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthRequestType {
    AuthenticateOnly = 1,
    AuthorizeOnly = 2,
    AuthorizeAuthenticate = 3,
}
enumerated_avp!(AuthRequestType, BaseAvpCode::AuthRequestType as u32, 0);

/// Auth-Session-State AVP values, RFC6733 Section 8.11
#[repr(i32)]
#[derive(
    Display, FromRepr, EnumIter, Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthSessionState {
    StateMaintained = 0,
    NoStateMaintained = 1,
}
enumerated_avp!(AuthSessionState, BaseAvpCode::AuthSessionState as u32, 0);

/// Redirect-Host-Usage AVP values, RFC6733 Section 6.13
#[repr(i32)]
#[derive(
    Display, FromRepr, EnumIter, Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RedirectHostUsage {
    DontCache = 0,
    AllSession = 1,
    AllRealm = 2,
    RealmAndApplication = 3,
    AllApplication = 4,
    AllHost = 5,
    AllUser = 6,
}
enumerated_avp!(RedirectHostUsage, BaseAvpCode::RedirectHostUsage as u32, 0);

#[repr(i32)]
#[derive(
    Display, FromRepr, EnumIter, Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ReAuthRequestType {
    AuthorizeOnly = 0,
    AuthorizeAuthenticate = 1,
}
enumerated_avp!(ReAuthRequestType, BaseAvpCode::ReAuthRequestType as u32, 0);

#[repr(i32)]
#[derive(
    Display, FromRepr, EnumIter, Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionServerFailover {
    RefuseService = 0,
    TryAgain = 1,
    AllowService = 2,
    TryAgainAllowService = 3,
}
enumerated_avp!(
    SessionServerFailover,
    BaseAvpCode::SessionServerFailover as u32,
    0
);

/// Termination-Cause AVP values, RFC6733 Section 8.15
#[repr(i32)]
#[derive(
    Display, FromRepr, EnumIter, Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TerminationCause {
    DiameterLogout = 1,
    DiameterServiceNotProvided = 2,
    DiameterBadAnswer = 3,
    DiameterAdministrative = 4,
    DiameterLinkBroken = 5,
    DiameterAuthExpired = 6,
    DiameterUserMoved = 7,
    DiameterSessionTimeout = 8,
}
enumerated_avp!(TerminationCause, BaseAvpCode::TerminationCause as u32, 0);

/// Accounting-Record-Type AVP values, RFC6733 Section 9.8.1
#[repr(i32)]
#[derive(
    Display, FromRepr, EnumIter, Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountingRecordType {
    EventRecord = 1,
    StartRecord = 2,
    InterimRecord = 3,
    StopRecord = 4,
}
enumerated_avp!(
    AccountingRecordType,
    BaseAvpCode::AccountingRecordType as u32,
    0
);

#[repr(i32)]
#[derive(
    Display, FromRepr, EnumIter, Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountingRealtimeRequired {
    DeliverAndGrant = 1,
    GrantAndStore = 2,
    GrantAndLose = 3,
}
enumerated_avp!(
    AccountingRealtimeRequired,
    BaseAvpCode::AccountingRealtimeRequired as u32,
    0
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dictionary::Dictionary, enumerated::EnumeratedAvp, error::DiameterError};

    #[test]
    fn test_base_dictionary() {
        let dictionary = Dictionary::builder().with_base_protocol().build();
        let cer = dictionary
            .command(BaseCommandCode::CapabilitiesExchange.into())
            .unwrap();
        assert!(!cer.proxiable());
        assert_eq!(cer.application(), CommandApplication::Common);
        let termination = dictionary
            .command(BaseCommandCode::SessionTermination.into())
            .unwrap();
        assert!(termination.proxiable());
        assert_eq!(termination.request_abbreviation(), "STR");
        assert_eq!(termination.answer_abbreviation(), "STA");
        assert_eq!(termination.application(), CommandApplication::Configured);
        let product = dictionary.lookup_by_name("Product-Name", 0).unwrap();
        assert!(!product.default_flags().mandatory());
        assert_eq!(dictionary.command_count(), 7);
    }

    #[test]
    fn test_termination_cause() {
        assert_eq!(
            TerminationCause::try_from(4),
            Ok(TerminationCause::DiameterAdministrative)
        );
        assert_eq!(
            TerminationCause::try_from(0),
            Err(DiameterError::InvalidEnum {
                code: 295,
                vendor_id: 0,
                value: 0
            })
        );
        assert_eq!(i32::from(TerminationCause::DiameterLogout), 1);
        assert_eq!(
            TerminationCause::DiameterLinkBroken.to_string(),
            "DIAMETER_LINK_BROKEN"
        );
    }

    #[test]
    fn test_declared_values() {
        let values = DisconnectCause::declared_values();
        assert_eq!(values.len(), 3);
        assert_eq!(values.get(&2).map(String::as_str), Some("DO_NOT_WANT_TO_TALK_TO_YOU"));
    }
}
