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

//! S6a/S6d interface between the MME/SGSN and the HSS, see 3GPP TS 29.272.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, FromRepr};

use crate::{
    application_id::ApplicationId,
    applications::{avp, base_keys},
    avp::{Avp, AvpValue},
    dictionary::{
        AvpDataType, AvpDefinition, AvpKey, CommandApplication, CommandSpec, DiameterApplication,
    },
    enumerated::{enumerated_avp, EnumeratedAvp},
    error::DiameterError,
    factory::AvpFactory,
    grouped::{member, members, required_member, GroupedAvp},
    iana::BaseAvpCode,
    THREE_GPP_VENDOR_ID,
};

pub const S6A_APPLICATION_ID: u32 = 16_777_251;

/// AVP codes defined by 3GPP TS 29.272 and used by the typed views, all of
/// them carry the 3GPP vendor id
#[repr(u32)]
#[derive(Display, FromRepr, Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum S6aAvpCode {
    MaxRequestedBandwidthDl = 515,
    MaxRequestedBandwidthUl = 516,
    SupportedFeatures = 628,
    FeatureListId = 629,
    FeatureList = 630,
    Msisdn = 701,
    RatType = 1032,
    SubscriptionData = 1400,
    UlrFlags = 1405,
    UlaFlags = 1406,
    VisitedPlmnId = 1407,
    CancellationType = 1420,
    DsrFlags = 1421,
    ContextIdentifier = 1423,
    SubscriberStatus = 1424,
    AllApnConfigurationsIncludedIndicator = 1428,
    ApnConfigurationProfile = 1429,
    ApnConfiguration = 1430,
    Ambr = 1435,
    PdnType = 1456,
    SgsnNumber = 1489,
    ImsVoiceOverPsSessionsSupported = 1492,
}

impl From<S6aAvpCode> for u32 {
    fn from(value: S6aAvpCode) -> Self {
        value as u32
    }
}

/// Service-Selection is defined by RFC5778 and carries no vendor id
pub const SERVICE_SELECTION: u32 = 493;

#[repr(u32)]
#[derive(Display, FromRepr, Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum S6aCommandCode {
    UpdateLocation = 316,
    CancelLocation = 317,
    AuthenticationInformation = 318,
    InsertSubscriberData = 319,
    DeleteSubscriberData = 320,
    PurgeUe = 321,
    Reset = 322,
    Notify = 323,
}

impl From<S6aCommandCode> for u32 {
    fn from(value: S6aCommandCode) -> Self {
        value as u32
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct S6a;

impl S6a {
    /// Application-Id the S6a messages are sent with by default
    pub const fn application_id() -> ApplicationId {
        ApplicationId::vendor_auth(THREE_GPP_VENDOR_ID, S6A_APPLICATION_ID)
    }
}

const fn key(code: S6aAvpCode) -> AvpKey {
    AvpKey::new(code as u32, THREE_GPP_VENDOR_ID)
}

impl DiameterApplication for S6a {
    fn name(&self) -> &'static str {
        "S6a"
    }

    fn avp_definitions(&self) -> Vec<AvpDefinition> {
        use AvpDataType::*;
        use S6aAvpCode as C;
        let v = THREE_GPP_VENDOR_ID;
        vec![
            avp(C::MaxRequestedBandwidthDl as u32, v, "Max-Requested-Bandwidth-DL", Unsigned32, true),
            avp(C::MaxRequestedBandwidthUl as u32, v, "Max-Requested-Bandwidth-UL", Unsigned32, true),
            avp(C::SupportedFeatures as u32, v, "Supported-Features", Grouped, false),
            avp(C::FeatureListId as u32, v, "Feature-List-ID", Unsigned32, false),
            avp(C::FeatureList as u32, v, "Feature-List", Unsigned32, false),
            avp(C::Msisdn as u32, v, "MSISDN", OctetString, true),
            avp(C::RatType as u32, v, "RAT-Type", Enumerated, true).with_enumerated::<RatType>(),
            avp(C::SubscriptionData as u32, v, "Subscription-Data", Grouped, true),
            avp(C::UlrFlags as u32, v, "ULR-Flags", Unsigned32, true),
            avp(C::UlaFlags as u32, v, "ULA-Flags", Unsigned32, true),
            avp(C::VisitedPlmnId as u32, v, "Visited-PLMN-Id", OctetString, true),
            avp(C::CancellationType as u32, v, "Cancellation-Type", Enumerated, true)
                .with_enumerated::<CancellationType>(),
            avp(C::DsrFlags as u32, v, "DSR-Flags", Unsigned32, true),
            avp(C::ContextIdentifier as u32, v, "Context-Identifier", Unsigned32, true),
            avp(C::SubscriberStatus as u32, v, "Subscriber-Status", Enumerated, true)
                .with_enumerated::<SubscriberStatus>(),
            avp(
                C::AllApnConfigurationsIncludedIndicator as u32,
                v,
                "All-APN-Configurations-Included-Indicator",
                Enumerated,
                true,
            )
            .with_enumerated::<AllApnConfigurationsIncludedIndicator>(),
            avp(C::ApnConfigurationProfile as u32, v, "APN-Configuration-Profile", Grouped, true),
            avp(C::ApnConfiguration as u32, v, "APN-Configuration", Grouped, true),
            avp(C::Ambr as u32, v, "AMBR", Grouped, true),
            avp(C::PdnType as u32, v, "PDN-Type", Enumerated, true).with_enumerated::<PdnType>(),
            avp(C::SgsnNumber as u32, v, "SGSN-Number", OctetString, false),
            avp(
                C::ImsVoiceOverPsSessionsSupported as u32,
                v,
                "IMS-Voice-Over-PS-Sessions-Supported",
                Enumerated,
                false,
            )
            .with_enumerated::<ImsVoiceOverPsSessionsSupported>(),
            avp(SERVICE_SELECTION, 0, "Service-Selection", Utf8String, true),
        ]
    }

    fn command_specs(&self) -> Vec<CommandSpec> {
        use BaseAvpCode as B;
        use S6aCommandCode as Cmd;
        let request_base = [
            B::SessionId as u32,
            B::AuthSessionState as u32,
            B::OriginHost as u32,
            B::OriginRealm as u32,
            B::DestinationRealm as u32,
        ];
        let answer = base_keys([
            B::SessionId as u32,
            B::AuthSessionState as u32,
            B::OriginHost as u32,
            B::OriginRealm as u32,
        ]);
        let user_name = AvpKey::base(B::UserName as u32);
        let destination_host = AvpKey::base(B::DestinationHost as u32);
        let spec = |code: Cmd, name: &str, request: &str, answer: &str| {
            CommandSpec::new(
                code.into(),
                name,
                request,
                answer,
                true,
                CommandApplication::Configured,
            )
        };
        let request = |extra: Vec<AvpKey>| base_keys(request_base).into_iter().chain(extra);
        vec![
            spec(Cmd::UpdateLocation, "Update-Location", "ULR", "ULA")
                .with_request_mandatory(request(vec![
                    user_name,
                    key(S6aAvpCode::RatType),
                    key(S6aAvpCode::UlrFlags),
                    key(S6aAvpCode::VisitedPlmnId),
                ]))
                .with_answer_mandatory(answer.clone()),
            spec(Cmd::CancelLocation, "Cancel-Location", "CLR", "CLA")
                .with_request_mandatory(request(vec![
                    destination_host,
                    user_name,
                    key(S6aAvpCode::CancellationType),
                ]))
                .with_answer_mandatory(answer.clone()),
            spec(Cmd::AuthenticationInformation, "Authentication-Information", "AIR", "AIA")
                .with_request_mandatory(request(vec![user_name, key(S6aAvpCode::VisitedPlmnId)]))
                .with_answer_mandatory(answer.clone()),
            spec(Cmd::InsertSubscriberData, "Insert-Subscriber-Data", "IDR", "IDA")
                .with_request_mandatory(request(vec![
                    destination_host,
                    user_name,
                    key(S6aAvpCode::SubscriptionData),
                ]))
                .with_answer_mandatory(answer.clone()),
            spec(Cmd::DeleteSubscriberData, "Delete-Subscriber-Data", "DSR", "DSA")
                .with_request_mandatory(request(vec![
                    destination_host,
                    user_name,
                    key(S6aAvpCode::DsrFlags),
                ]))
                .with_answer_mandatory(answer.clone()),
            spec(Cmd::PurgeUe, "Purge-UE", "PUR", "PUA")
                .with_request_mandatory(request(vec![user_name]))
                .with_answer_mandatory(answer.clone()),
            spec(Cmd::Reset, "Reset", "RSR", "RSA")
                .with_request_mandatory(request(vec![destination_host]))
                .with_answer_mandatory(answer.clone()),
            spec(Cmd::Notify, "Notify", "NOR", "NOA")
                .with_request_mandatory(request(vec![user_name]))
                .with_answer_mandatory(answer),
        ]
    }
}

#[repr(i32)]
#[derive(
    Display, FromRepr, EnumIter, Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ImsVoiceOverPsSessionsSupported {
    NotSupported = 0,
    Supported = 1,
}
enumerated_avp!(
    ImsVoiceOverPsSessionsSupported,
    S6aAvpCode::ImsVoiceOverPsSessionsSupported as u32,
    THREE_GPP_VENDOR_ID
);

#[repr(i32)]
#[derive(
    Display, FromRepr, EnumIter, Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PdnType {
    Ipv4 = 0,
    Ipv6 = 1,
    Ipv4v6 = 2,
    Ipv4OrIpv6 = 3,
}
enumerated_avp!(PdnType, S6aAvpCode::PdnType as u32, THREE_GPP_VENDOR_ID);

#[repr(i32)]
#[derive(
    Display, FromRepr, EnumIter, Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AllApnConfigurationsIncludedIndicator {
    AllApnConfigurationsIncluded = 0,
    ModifiedAddedApnConfigurationsIncluded = 1,
}
enumerated_avp!(
    AllApnConfigurationsIncludedIndicator,
    S6aAvpCode::AllApnConfigurationsIncludedIndicator as u32,
    THREE_GPP_VENDOR_ID
);

#[repr(i32)]
#[derive(
    Display, FromRepr, EnumIter, Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CancellationType {
    MmeUpdateProcedure = 0,
    SgsnUpdateProcedure = 1,
    SubscriptionWithdrawal = 2,
    UpdateProcedureIwf = 3,
    InitialAttachProcedure = 4,
}
enumerated_avp!(
    CancellationType,
    S6aAvpCode::CancellationType as u32,
    THREE_GPP_VENDOR_ID
);

#[repr(i32)]
#[derive(
    Display, FromRepr, EnumIter, Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriberStatus {
    ServiceGranted = 0,
    OperatorDeterminedBarring = 1,
}
enumerated_avp!(
    SubscriberStatus,
    S6aAvpCode::SubscriberStatus as u32,
    THREE_GPP_VENDOR_ID
);

/// RAT-Type values of 3GPP TS 29.212 used on S6a
#[repr(i32)]
#[derive(
    Display, FromRepr, EnumIter, Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RatType {
    Wlan = 0,
    Virtual = 1,
    Utran = 1000,
    Geran = 1001,
    Gan = 1002,
    HspaEvolution = 1003,
    Eutran = 1004,
    Cdma2000 = 2000,
    Hrpd = 2001,
    Umb = 2002,
    Ehrpd = 2003,
}
enumerated_avp!(RatType, S6aAvpCode::RatType as u32, THREE_GPP_VENDOR_ID);

fn required_u32<G: GroupedAvp>(children: &[Avp], code: S6aAvpCode) -> Result<u32, DiameterError> {
    required_member::<G>(children, code as u32, THREE_GPP_VENDOR_ID)?.unsigned32()
}

fn create(factory: &AvpFactory, code: S6aAvpCode, value: AvpValue) -> Result<Avp, DiameterError> {
    factory.create_avp(code as u32, THREE_GPP_VENDOR_ID, value)
}

/// Aggregate maximum bitrates, in bits per second
///
/// ```text
/// AMBR ::= <AVP header: 1435 10415>
///          { Max-Requested-Bandwidth-UL }
///          { Max-Requested-Bandwidth-DL }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ambr {
    max_requested_bandwidth_ul: u32,
    max_requested_bandwidth_dl: u32,
}

impl Ambr {
    pub const fn new(max_requested_bandwidth_ul: u32, max_requested_bandwidth_dl: u32) -> Self {
        Self {
            max_requested_bandwidth_ul,
            max_requested_bandwidth_dl,
        }
    }

    pub const fn max_requested_bandwidth_ul(&self) -> u32 {
        self.max_requested_bandwidth_ul
    }

    pub const fn max_requested_bandwidth_dl(&self) -> u32 {
        self.max_requested_bandwidth_dl
    }
}

impl GroupedAvp for Ambr {
    const CODE: u32 = S6aAvpCode::Ambr as u32;
    const VENDOR_ID: u32 = THREE_GPP_VENDOR_ID;

    fn from_children(children: &[Avp]) -> Result<Self, DiameterError> {
        Ok(Self::new(
            required_u32::<Self>(children, S6aAvpCode::MaxRequestedBandwidthUl)?,
            required_u32::<Self>(children, S6aAvpCode::MaxRequestedBandwidthDl)?,
        ))
    }

    fn to_children(&self, factory: &AvpFactory) -> Result<Vec<Avp>, DiameterError> {
        Ok(vec![
            create(
                factory,
                S6aAvpCode::MaxRequestedBandwidthUl,
                AvpValue::Unsigned32(self.max_requested_bandwidth_ul),
            )?,
            create(
                factory,
                S6aAvpCode::MaxRequestedBandwidthDl,
                AvpValue::Unsigned32(self.max_requested_bandwidth_dl),
            )?,
        ])
    }
}

/// ```text
/// APN-Configuration ::= <AVP header: 1430 10415>
///                       { Context-Identifier }
///                       { PDN-Type }
///                       { Service-Selection }
///                       [ AMBR ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApnConfiguration {
    context_identifier: u32,
    pdn_type: PdnType,
    service_selection: String,
    ambr: Option<Ambr>,
}

impl ApnConfiguration {
    pub fn new(
        context_identifier: u32,
        pdn_type: PdnType,
        service_selection: impl Into<String>,
        ambr: Option<Ambr>,
    ) -> Self {
        Self {
            context_identifier,
            pdn_type,
            service_selection: service_selection.into(),
            ambr,
        }
    }

    pub const fn context_identifier(&self) -> u32 {
        self.context_identifier
    }

    pub const fn pdn_type(&self) -> PdnType {
        self.pdn_type
    }

    pub fn service_selection(&self) -> &str {
        &self.service_selection
    }

    pub const fn ambr(&self) -> Option<Ambr> {
        self.ambr
    }
}

impl GroupedAvp for ApnConfiguration {
    const CODE: u32 = S6aAvpCode::ApnConfiguration as u32;
    const VENDOR_ID: u32 = THREE_GPP_VENDOR_ID;

    fn from_children(children: &[Avp]) -> Result<Self, DiameterError> {
        let pdn_type = required_member::<Self>(
            children,
            S6aAvpCode::PdnType as u32,
            THREE_GPP_VENDOR_ID,
        )?;
        let service_selection =
            required_member::<Self>(children, SERVICE_SELECTION, 0)?.utf8_string()?;
        let ambr = member(children, Ambr::CODE, Ambr::VENDOR_ID)
            .map(Ambr::from_avp)
            .transpose()?;
        Ok(Self::new(
            required_u32::<Self>(children, S6aAvpCode::ContextIdentifier)?,
            PdnType::from_avp(pdn_type)?,
            service_selection,
            ambr,
        ))
    }

    fn to_children(&self, factory: &AvpFactory) -> Result<Vec<Avp>, DiameterError> {
        let mut children = vec![
            create(
                factory,
                S6aAvpCode::ContextIdentifier,
                AvpValue::Unsigned32(self.context_identifier),
            )?,
            self.pdn_type.to_avp(factory)?,
            factory.create_avp(
                SERVICE_SELECTION,
                0,
                AvpValue::Utf8String(self.service_selection.clone()),
            )?,
        ];
        if let Some(ambr) = &self.ambr {
            children.push(ambr.to_avp(factory)?);
        }
        Ok(children)
    }
}

/// ```text
/// APN-Configuration-Profile ::= <AVP header: 1429 10415>
///                               { Context-Identifier }
///                               { All-APN-Configurations-Included-Indicator }
///                             1*{ APN-Configuration }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApnConfigurationProfile {
    context_identifier: u32,
    all_apn_configurations_included_indicator: AllApnConfigurationsIncludedIndicator,
    apn_configurations: Vec<ApnConfiguration>,
}

impl ApnConfigurationProfile {
    pub fn new(
        context_identifier: u32,
        all_apn_configurations_included_indicator: AllApnConfigurationsIncludedIndicator,
        apn_configurations: Vec<ApnConfiguration>,
    ) -> Self {
        Self {
            context_identifier,
            all_apn_configurations_included_indicator,
            apn_configurations,
        }
    }

    pub const fn context_identifier(&self) -> u32 {
        self.context_identifier
    }

    pub const fn all_apn_configurations_included_indicator(
        &self,
    ) -> AllApnConfigurationsIncludedIndicator {
        self.all_apn_configurations_included_indicator
    }

    pub fn apn_configurations(&self) -> &[ApnConfiguration] {
        &self.apn_configurations
    }
}

impl GroupedAvp for ApnConfigurationProfile {
    const CODE: u32 = S6aAvpCode::ApnConfigurationProfile as u32;
    const VENDOR_ID: u32 = THREE_GPP_VENDOR_ID;

    fn from_children(children: &[Avp]) -> Result<Self, DiameterError> {
        let indicator = required_member::<Self>(
            children,
            S6aAvpCode::AllApnConfigurationsIncludedIndicator as u32,
            THREE_GPP_VENDOR_ID,
        )?;
        let apn_configurations = members(children, ApnConfiguration::CODE, THREE_GPP_VENDOR_ID)
            .map(ApnConfiguration::from_avp)
            .collect::<Result<Vec<_>, _>>()?;
        if apn_configurations.is_empty() {
            return Err(DiameterError::MissingGroupedMember {
                parent: Self::CODE,
                code: ApnConfiguration::CODE,
                vendor_id: THREE_GPP_VENDOR_ID,
            });
        }
        Ok(Self::new(
            required_u32::<Self>(children, S6aAvpCode::ContextIdentifier)?,
            AllApnConfigurationsIncludedIndicator::from_avp(indicator)?,
            apn_configurations,
        ))
    }

    fn to_children(&self, factory: &AvpFactory) -> Result<Vec<Avp>, DiameterError> {
        let mut children = vec![
            create(
                factory,
                S6aAvpCode::ContextIdentifier,
                AvpValue::Unsigned32(self.context_identifier),
            )?,
            self.all_apn_configurations_included_indicator
                .to_avp(factory)?,
        ];
        for configuration in &self.apn_configurations {
            children.push(configuration.to_avp(factory)?);
        }
        Ok(children)
    }
}

/// Subset of Subscription-Data carried in ULA and IDR
///
/// ```text
/// Subscription-Data ::= <AVP header: 1400 10415>
///                       [ Subscriber-Status ]
///                       [ MSISDN ]
///                       [ AMBR ]
///                       [ APN-Configuration-Profile ]
///                     * [ AVP ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubscriptionData {
    subscriber_status: Option<SubscriberStatus>,
    msisdn: Option<Vec<u8>>,
    ambr: Option<Ambr>,
    apn_configuration_profile: Option<ApnConfigurationProfile>,
}

impl SubscriptionData {
    pub const fn new(
        subscriber_status: Option<SubscriberStatus>,
        msisdn: Option<Vec<u8>>,
        ambr: Option<Ambr>,
        apn_configuration_profile: Option<ApnConfigurationProfile>,
    ) -> Self {
        Self {
            subscriber_status,
            msisdn,
            ambr,
            apn_configuration_profile,
        }
    }

    pub const fn subscriber_status(&self) -> Option<SubscriberStatus> {
        self.subscriber_status
    }

    pub fn msisdn(&self) -> Option<&[u8]> {
        self.msisdn.as_deref()
    }

    pub const fn ambr(&self) -> Option<Ambr> {
        self.ambr
    }

    pub const fn apn_configuration_profile(&self) -> Option<&ApnConfigurationProfile> {
        self.apn_configuration_profile.as_ref()
    }
}

impl GroupedAvp for SubscriptionData {
    const CODE: u32 = S6aAvpCode::SubscriptionData as u32;
    const VENDOR_ID: u32 = THREE_GPP_VENDOR_ID;

    fn from_children(children: &[Avp]) -> Result<Self, DiameterError> {
        let v = THREE_GPP_VENDOR_ID;
        Ok(Self::new(
            member(children, S6aAvpCode::SubscriberStatus as u32, v)
                .map(SubscriberStatus::from_avp)
                .transpose()?,
            member(children, S6aAvpCode::Msisdn as u32, v)
                .map(|avp| avp.octet_string().map(<[u8]>::to_vec))
                .transpose()?,
            member(children, Ambr::CODE, v)
                .map(Ambr::from_avp)
                .transpose()?,
            member(children, ApnConfigurationProfile::CODE, v)
                .map(ApnConfigurationProfile::from_avp)
                .transpose()?,
        ))
    }

    fn to_children(&self, factory: &AvpFactory) -> Result<Vec<Avp>, DiameterError> {
        let mut children = vec![];
        if let Some(status) = self.subscriber_status {
            children.push(status.to_avp(factory)?);
        }
        if let Some(msisdn) = &self.msisdn {
            children.push(create(
                factory,
                S6aAvpCode::Msisdn,
                AvpValue::OctetString(msisdn.clone()),
            )?);
        }
        if let Some(ambr) = &self.ambr {
            children.push(ambr.to_avp(factory)?);
        }
        if let Some(profile) = &self.apn_configuration_profile {
            children.push(profile.to_avp(factory)?);
        }
        Ok(children)
    }
}

/// ```text
/// Supported-Features ::= <AVP header: 628 10415>
///                        { Vendor-Id }
///                        { Feature-List-ID }
///                        { Feature-List }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedFeatures {
    vendor_id: u32,
    feature_list_id: u32,
    feature_list: u32,
}

impl SupportedFeatures {
    pub const fn new(vendor_id: u32, feature_list_id: u32, feature_list: u32) -> Self {
        Self {
            vendor_id,
            feature_list_id,
            feature_list,
        }
    }

    pub const fn vendor_id(&self) -> u32 {
        self.vendor_id
    }

    pub const fn feature_list_id(&self) -> u32 {
        self.feature_list_id
    }

    pub const fn feature_list(&self) -> u32 {
        self.feature_list
    }
}

impl GroupedAvp for SupportedFeatures {
    const CODE: u32 = S6aAvpCode::SupportedFeatures as u32;
    const VENDOR_ID: u32 = THREE_GPP_VENDOR_ID;

    fn from_children(children: &[Avp]) -> Result<Self, DiameterError> {
        Ok(Self::new(
            required_member::<Self>(children, BaseAvpCode::VendorId as u32, 0)?.unsigned32()?,
            required_u32::<Self>(children, S6aAvpCode::FeatureListId)?,
            required_u32::<Self>(children, S6aAvpCode::FeatureList)?,
        ))
    }

    fn to_children(&self, factory: &AvpFactory) -> Result<Vec<Avp>, DiameterError> {
        Ok(vec![
            factory.create_base(BaseAvpCode::VendorId, AvpValue::Unsigned32(self.vendor_id))?,
            create(
                factory,
                S6aAvpCode::FeatureListId,
                AvpValue::Unsigned32(self.feature_list_id),
            )?,
            create(
                factory,
                S6aAvpCode::FeatureList,
                AvpValue::Unsigned32(self.feature_list),
            )?,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dictionary::{Dictionary, DictionaryHandle},
        grouped::assert_construction_paths_agree,
        wire::deserializer::DiameterParsingContext,
    };

    fn factory() -> AvpFactory {
        AvpFactory::new(DictionaryHandle::loaded(
            Dictionary::builder()
                .with_base_protocol()
                .with_application(&S6a)
                .build(),
        ))
    }

    fn ambr() -> Ambr {
        Ambr::new(6, 12)
    }

    fn apn_configuration() -> ApnConfiguration {
        ApnConfiguration::new(123, PdnType::Ipv4OrIpv6, "internet", Some(ambr()))
    }

    fn apn_configuration_profile() -> ApnConfigurationProfile {
        ApnConfigurationProfile::new(
            1,
            AllApnConfigurationsIncludedIndicator::AllApnConfigurationsIncluded,
            vec![
                apn_configuration(),
                ApnConfiguration::new(124, PdnType::Ipv6, "ims", None),
            ],
        )
    }

    #[test]
    fn test_ims_voice_over_ps_sessions_supported() {
        let factory = factory();
        let avp = ImsVoiceOverPsSessionsSupported::Supported
            .to_avp(&factory)
            .unwrap();
        assert!(!avp.is_mandatory());
        let good_wire = [
            0x00, 0x00, 0x05, 0xd4, // code 1492
            0x80, // V bit only
            0x00, 0x00, 0x10, // length 16
            0x00, 0x00, 0x28, 0xaf, // 3GPP
            0x00, 0x00, 0x00, 0x01, // SUPPORTED
        ];
        assert_eq!(avp.encode(), Ok(good_wire.to_vec()));

        let dictionary = factory.dictionary().unwrap();
        let not_supported_wire = [
            0x00, 0x00, 0x05, 0xd4, 0x80, 0x00, 0x00, 0x10, 0x00, 0x00, 0x28, 0xaf, 0x00, 0x00,
            0x00, 0x00,
        ];
        let decoded =
            Avp::decode(&not_supported_wire, &DiameterParsingContext::lenient(dictionary)).unwrap();
        assert_eq!(
            ImsVoiceOverPsSessionsSupported::from_avp(&decoded),
            Ok(ImsVoiceOverPsSessionsSupported::NotSupported)
        );

        let bad_wire = [
            0x00, 0x00, 0x05, 0xd4, 0x80, 0x00, 0x00, 0x10, 0x00, 0x00, 0x28, 0xaf, 0x00, 0x00,
            0x00, 0x02,
        ];
        let invalid = DiameterError::InvalidEnum {
            code: 1492,
            vendor_id: THREE_GPP_VENDOR_ID,
            value: 2,
        };
        let decoded = Avp::decode(&bad_wire, &DiameterParsingContext::lenient(dictionary)).unwrap();
        assert_eq!(decoded.enumerated(), Ok(2));
        assert_eq!(
            ImsVoiceOverPsSessionsSupported::from_avp(&decoded),
            Err(invalid.clone())
        );
        assert_eq!(
            Avp::decode(&bad_wire, &DiameterParsingContext::strict(dictionary)),
            Err(invalid.clone())
        );
        assert_eq!(
            factory.create_avp(1492, THREE_GPP_VENDOR_ID, AvpValue::Enumerated(2)),
            Err(invalid)
        );
    }

    #[test]
    fn test_ambr() {
        let factory = factory();
        let avp = assert_construction_paths_agree(&ambr(), &factory);
        assert_eq!(avp.children().map(<[Avp]>::len), Some(2));
        assert_eq!(
            Ambr::from_children(&avp.children().unwrap()[..1]),
            Err(DiameterError::MissingGroupedMember {
                parent: 1435,
                code: 515,
                vendor_id: THREE_GPP_VENDOR_ID,
            })
        );
    }

    #[test]
    fn test_apn_configuration() {
        let factory = factory();
        assert_construction_paths_agree(&apn_configuration(), &factory);
        assert_construction_paths_agree(
            &ApnConfiguration::new(7, PdnType::Ipv4, "", None),
            &factory,
        );
    }

    #[test]
    fn test_apn_configuration_profile() {
        let factory = factory();
        let avp = assert_construction_paths_agree(&apn_configuration_profile(), &factory);
        let children = avp.children().unwrap();
        let without_configurations = children
            .iter()
            .filter(|child| child.code() != ApnConfiguration::CODE)
            .cloned()
            .collect::<Vec<_>>();
        assert_eq!(
            ApnConfigurationProfile::from_children(&without_configurations),
            Err(DiameterError::MissingGroupedMember {
                parent: 1429,
                code: 1430,
                vendor_id: THREE_GPP_VENDOR_ID,
            })
        );
    }

    #[test]
    fn test_subscription_data() {
        let factory = factory();
        let data = SubscriptionData::new(
            Some(SubscriberStatus::ServiceGranted),
            Some(vec![0x91, 0x44, 0x77]),
            Some(ambr()),
            Some(apn_configuration_profile()),
        );
        let avp = assert_construction_paths_agree(&data, &factory);
        assert_eq!(avp.children().map(<[Avp]>::len), Some(4));
        assert_construction_paths_agree(&SubscriptionData::default(), &factory);
    }

    #[test]
    fn test_supported_features() {
        let factory = factory();
        let avp = assert_construction_paths_agree(
            &SupportedFeatures::new(THREE_GPP_VENDOR_ID, 1, 0x0000_0003),
            &factory,
        );
        assert!(!avp.is_mandatory());
        assert!(avp.is_vendor_specific());
    }

    #[test]
    fn test_nested_round_trip() {
        let factory = factory();
        let data = SubscriptionData::new(None, None, None, Some(apn_configuration_profile()));
        let avp = data.to_avp(&factory).unwrap();
        let wire = avp.encode().unwrap();
        assert_eq!(wire.len() % 4, 0);
        let dictionary = factory.dictionary().unwrap();
        let decoded = Avp::decode(&wire, &DiameterParsingContext::strict(dictionary)).unwrap();
        assert_eq!(decoded, avp);
        assert_eq!(SubscriptionData::from_avp(&decoded), Ok(data));
    }

    #[test]
    fn test_commands() {
        let dictionary = Dictionary::builder().with_application(&S6a).build();
        for code in 316..=323 {
            let spec = dictionary.command(code).unwrap();
            assert!(spec.proxiable(), "{} should be proxiable", spec.name());
            assert_eq!(spec.application(), CommandApplication::Configured);
        }
        assert_eq!(
            S6a::application_id().vendor_id(),
            THREE_GPP_VENDOR_ID
        );
    }
}
