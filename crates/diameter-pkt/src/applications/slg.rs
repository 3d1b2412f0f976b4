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

//! SLg interface between the GMLC and the MME/SGSN, see 3GPP TS 29.172.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, FromRepr};

use crate::{
    applications::{avp, base_keys},
    avp::{Avp, AvpValue},
    dictionary::{
        AvpDataType, AvpDefinition, AvpKey, CommandApplication, CommandSpec, DiameterApplication,
    },
    enumerated::enumerated_avp,
    error::DiameterError,
    factory::AvpFactory,
    grouped::{member, GroupedAvp},
    iana::BaseAvpCode,
    THREE_GPP_VENDOR_ID,
};

pub const SLG_APPLICATION_ID: u32 = 16_777_255;

#[repr(u32)]
#[derive(Display, FromRepr, Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum SLgAvpCode {
    ServingNode = 2401,
    MmeName = 2402,
    MscNumber = 2403,
    MmeRealm = 2408,
    SgsnName = 2409,
    SgsnRealm = 2410,
    SgsnNumber = 1489,
    SLgLocationType = 2500,
    LocationEvent = 2518,
    LcsReferenceNumber = 2531,
    TerminationCause = 2548,
    DelayedLocationReportingData = 2555,
}

impl From<SLgAvpCode> for u32 {
    fn from(value: SLgAvpCode) -> Self {
        value as u32
    }
}

#[repr(u32)]
#[derive(Display, FromRepr, Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum SLgCommandCode {
    ProvideLocation = 8_388_620,
    LocationReport = 8_388_621,
}

impl From<SLgCommandCode> for u32 {
    fn from(value: SLgCommandCode) -> Self {
        value as u32
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SLg;

impl DiameterApplication for SLg {
    fn name(&self) -> &'static str {
        "SLg"
    }

    fn avp_definitions(&self) -> Vec<AvpDefinition> {
        use AvpDataType::*;
        use SLgAvpCode as C;
        let v = THREE_GPP_VENDOR_ID;
        vec![
            avp(C::ServingNode as u32, v, "Serving-Node", Grouped, true),
            avp(C::MmeName as u32, v, "MME-Name", DiameterIdentity, true),
            avp(C::MscNumber as u32, v, "MSC-Number", OctetString, true),
            avp(C::MmeRealm as u32, v, "MME-Realm", DiameterIdentity, false),
            avp(C::SgsnName as u32, v, "SGSN-Name", DiameterIdentity, false),
            avp(C::SgsnRealm as u32, v, "SGSN-Realm", DiameterIdentity, false),
            avp(C::SgsnNumber as u32, v, "SGSN-Number", OctetString, false),
            avp(C::SLgLocationType as u32, v, "SLg-Location-Type", Enumerated, true)
                .with_enumerated::<SLgLocationType>(),
            avp(C::LocationEvent as u32, v, "Location-Event", Enumerated, true)
                .with_enumerated::<LocationEvent>(),
            avp(C::LcsReferenceNumber as u32, v, "LCS-Reference-Number", OctetString, true),
            avp(C::TerminationCause as u32, v, "Termination-Cause", Unsigned32, true),
            avp(
                C::DelayedLocationReportingData as u32,
                v,
                "Delayed-Location-Reporting-Data",
                Grouped,
                true,
            ),
        ]
    }

    fn command_specs(&self) -> Vec<CommandSpec> {
        use BaseAvpCode as B;
        let answer = base_keys([
            B::SessionId as u32,
            B::AuthSessionState as u32,
            B::OriginHost as u32,
            B::OriginRealm as u32,
        ]);
        vec![
            CommandSpec::new(
                SLgCommandCode::ProvideLocation.into(),
                "Provide-Location",
                "PLR",
                "PLA",
                true,
                CommandApplication::Configured,
            )
            .with_request_mandatory(
                base_keys([
                    B::SessionId as u32,
                    B::AuthSessionState as u32,
                    B::OriginHost as u32,
                    B::OriginRealm as u32,
                    B::DestinationHost as u32,
                    B::DestinationRealm as u32,
                ])
                .into_iter()
                .chain([AvpKey::new(
                    SLgAvpCode::SLgLocationType as u32,
                    THREE_GPP_VENDOR_ID,
                )]),
            )
            .with_answer_mandatory(answer.clone()),
            CommandSpec::new(
                SLgCommandCode::LocationReport.into(),
                "Location-Report",
                "LRR",
                "LRA",
                true,
                CommandApplication::Configured,
            )
            .with_request_mandatory(
                base_keys([
                    B::SessionId as u32,
                    B::AuthSessionState as u32,
                    B::OriginHost as u32,
                    B::OriginRealm as u32,
                    B::DestinationRealm as u32,
                ])
                .into_iter()
                .chain([AvpKey::new(
                    SLgAvpCode::LocationEvent as u32,
                    THREE_GPP_VENDOR_ID,
                )]),
            )
            .with_answer_mandatory(answer),
        ]
    }
}

#[repr(i32)]
#[derive(
    Display, FromRepr, EnumIter, Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SLgLocationType {
    CurrentLocation = 0,
    CurrentOrLastKnownLocation = 1,
    InitialLocation = 2,
    ActivateDeferredLocation = 3,
    CancelDeferredLocation = 4,
    NotificationVerificationOnly = 5,
}
enumerated_avp!(
    SLgLocationType,
    SLgAvpCode::SLgLocationType as u32,
    THREE_GPP_VENDOR_ID
);

#[repr(i32)]
#[derive(
    Display, FromRepr, EnumIter, Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationEvent {
    EmergencyCallOrigination = 0,
    EmergencyCallRelease = 1,
    MoLr = 2,
    EmergencyCallHandover = 3,
    DeferredMtLrResponse = 4,
    DeferredMoLrTtpInitiation = 5,
    DelayedLocationReporting = 6,
}
enumerated_avp!(
    LocationEvent,
    SLgAvpCode::LocationEvent as u32,
    THREE_GPP_VENDOR_ID
);

/// Node serving the target UE, every member is optional
///
/// ```text
/// Serving-Node ::= <AVP header: 2401 10415>
///                  [ SGSN-Number ]
///                  [ SGSN-Name ]
///                  [ SGSN-Realm ]
///                  [ MME-Name ]
///                  [ MME-Realm ]
///                  [ MSC-Number ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServingNode {
    sgsn_number: Option<Vec<u8>>,
    sgsn_name: Option<String>,
    sgsn_realm: Option<String>,
    mme_name: Option<String>,
    mme_realm: Option<String>,
    msc_number: Option<Vec<u8>>,
}

impl ServingNode {
    pub fn mme(mme_name: impl Into<String>, mme_realm: impl Into<String>) -> Self {
        Self {
            mme_name: Some(mme_name.into()),
            mme_realm: Some(mme_realm.into()),
            ..Default::default()
        }
    }

    pub fn sgsn(
        sgsn_number: impl Into<Vec<u8>>,
        sgsn_name: impl Into<String>,
        sgsn_realm: impl Into<String>,
    ) -> Self {
        Self {
            sgsn_number: Some(sgsn_number.into()),
            sgsn_name: Some(sgsn_name.into()),
            sgsn_realm: Some(sgsn_realm.into()),
            ..Default::default()
        }
    }

    pub fn with_msc_number(mut self, msc_number: impl Into<Vec<u8>>) -> Self {
        self.msc_number = Some(msc_number.into());
        self
    }

    pub fn sgsn_number(&self) -> Option<&[u8]> {
        self.sgsn_number.as_deref()
    }

    pub fn sgsn_name(&self) -> Option<&str> {
        self.sgsn_name.as_deref()
    }

    pub fn sgsn_realm(&self) -> Option<&str> {
        self.sgsn_realm.as_deref()
    }

    pub fn mme_name(&self) -> Option<&str> {
        self.mme_name.as_deref()
    }

    pub fn mme_realm(&self) -> Option<&str> {
        self.mme_realm.as_deref()
    }

    pub fn msc_number(&self) -> Option<&[u8]> {
        self.msc_number.as_deref()
    }
}

fn optional_octets(children: &[Avp], code: SLgAvpCode) -> Result<Option<Vec<u8>>, DiameterError> {
    member(children, code as u32, THREE_GPP_VENDOR_ID)
        .map(|avp| avp.octet_string().map(<[u8]>::to_vec))
        .transpose()
}

fn optional_identity(
    children: &[Avp],
    code: SLgAvpCode,
) -> Result<Option<String>, DiameterError> {
    member(children, code as u32, THREE_GPP_VENDOR_ID)
        .map(|avp| avp.utf8_string().map(str::to_string))
        .transpose()
}

impl GroupedAvp for ServingNode {
    const CODE: u32 = SLgAvpCode::ServingNode as u32;
    const VENDOR_ID: u32 = THREE_GPP_VENDOR_ID;

    fn from_children(children: &[Avp]) -> Result<Self, DiameterError> {
        Ok(Self {
            sgsn_number: optional_octets(children, SLgAvpCode::SgsnNumber)?,
            sgsn_name: optional_identity(children, SLgAvpCode::SgsnName)?,
            sgsn_realm: optional_identity(children, SLgAvpCode::SgsnRealm)?,
            mme_name: optional_identity(children, SLgAvpCode::MmeName)?,
            mme_realm: optional_identity(children, SLgAvpCode::MmeRealm)?,
            msc_number: optional_octets(children, SLgAvpCode::MscNumber)?,
        })
    }

    fn to_children(&self, factory: &AvpFactory) -> Result<Vec<Avp>, DiameterError> {
        let octets = |value: &Option<Vec<u8>>| value.clone().map(AvpValue::OctetString);
        let identity = |value: &Option<String>| value.clone().map(AvpValue::DiameterIdentity);
        [
            (SLgAvpCode::SgsnNumber, octets(&self.sgsn_number)),
            (SLgAvpCode::SgsnName, identity(&self.sgsn_name)),
            (SLgAvpCode::SgsnRealm, identity(&self.sgsn_realm)),
            (SLgAvpCode::MmeName, identity(&self.mme_name)),
            (SLgAvpCode::MmeRealm, identity(&self.mme_realm)),
            (SLgAvpCode::MscNumber, octets(&self.msc_number)),
        ]
        .into_iter()
        .filter_map(|(code, value)| value.map(|value| (code, value)))
        .map(|(code, value)| factory.create_avp(code as u32, THREE_GPP_VENDOR_ID, value))
        .collect()
    }
}

/// ```text
/// Delayed-Location-Reporting-Data ::= <AVP header: 2555 10415>
///                                     [ Termination-Cause ]
///                                     [ Serving-Node ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DelayedLocationReportingData {
    termination_cause: Option<u32>,
    serving_node: Option<ServingNode>,
}

impl DelayedLocationReportingData {
    pub const fn new(termination_cause: Option<u32>, serving_node: Option<ServingNode>) -> Self {
        Self {
            termination_cause,
            serving_node,
        }
    }

    pub const fn termination_cause(&self) -> Option<u32> {
        self.termination_cause
    }

    pub const fn serving_node(&self) -> Option<&ServingNode> {
        self.serving_node.as_ref()
    }
}

impl GroupedAvp for DelayedLocationReportingData {
    const CODE: u32 = SLgAvpCode::DelayedLocationReportingData as u32;
    const VENDOR_ID: u32 = THREE_GPP_VENDOR_ID;

    fn from_children(children: &[Avp]) -> Result<Self, DiameterError> {
        let termination_cause = member(
            children,
            SLgAvpCode::TerminationCause as u32,
            THREE_GPP_VENDOR_ID,
        )
        .map(Avp::unsigned32)
        .transpose()?;
        let serving_node = member(children, ServingNode::CODE, ServingNode::VENDOR_ID)
            .map(ServingNode::from_avp)
            .transpose()?;
        Ok(Self::new(termination_cause, serving_node))
    }

    fn to_children(&self, factory: &AvpFactory) -> Result<Vec<Avp>, DiameterError> {
        let mut children = vec![];
        if let Some(cause) = self.termination_cause {
            children.push(factory.create_avp(
                SLgAvpCode::TerminationCause as u32,
                THREE_GPP_VENDOR_ID,
                AvpValue::Unsigned32(cause),
            )?);
        }
        if let Some(node) = &self.serving_node {
            children.push(node.to_avp(factory)?);
        }
        Ok(children)
    }
}
