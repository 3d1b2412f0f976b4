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

//! Dictionary driven construction of AVPs and messages.
//!
//! [`AvpFactory`] checks every value against the dictionary before building
//! the AVP: the data type must match the definition, Enumerated values must
//! be declared and the flags default to the ones of the definition.

pub mod message;

use crate::{
    avp::{Address, Avp, AvpFlags, AvpValue},
    dictionary::{AvpDefinition, Dictionary, DictionaryHandle},
    error::DiameterError,
    grouped::{ExperimentalResult, GroupedAvp, ProxyInfo, VendorSpecificApplicationId},
    iana::{AddressFamily, BaseAvpCode},
    wire::time_to_ntp,
};

#[derive(Debug, Clone)]
pub struct AvpFactory {
    dictionary: DictionaryHandle,
}

impl AvpFactory {
    pub const fn new(dictionary: DictionaryHandle) -> Self {
        Self { dictionary }
    }

    pub fn dictionary(&self) -> Result<&Dictionary, DiameterError> {
        self.dictionary.get()
    }

    pub const fn dictionary_handle(&self) -> &DictionaryHandle {
        &self.dictionary
    }

    fn definition(&self, code: u32, vendor_id: u32) -> Result<&AvpDefinition, DiameterError> {
        self.dictionary()?
            .lookup(code, vendor_id)
            .ok_or(DiameterError::UnknownAvp { code, vendor_id })
    }

    /// Build an AVP with the default flags of its dictionary definition
    pub fn create_avp(
        &self,
        code: u32,
        vendor_id: u32,
        value: AvpValue,
    ) -> Result<Avp, DiameterError> {
        let flags = self.definition(code, vendor_id)?.default_flags();
        self.create_avp_with_flags(code, vendor_id, flags, value)
    }

    /// Build an AVP overriding the default flags of its definition
    pub fn create_avp_with_flags(
        &self,
        code: u32,
        vendor_id: u32,
        flags: AvpFlags,
        value: AvpValue,
    ) -> Result<Avp, DiameterError> {
        let definition = self.definition(code, vendor_id)?;
        check_value(definition, &value)?;
        if code == VendorSpecificApplicationId::CODE
            && vendor_id == VendorSpecificApplicationId::VENDOR_ID
        {
            if let AvpValue::Grouped(children) = &value {
                VendorSpecificApplicationId::from_children(children)?;
            }
        }
        Ok(Avp::new(code, vendor_id, flags, value))
    }

    /// Build a grouped AVP from already constructed members
    pub fn create_grouped(
        &self,
        code: u32,
        vendor_id: u32,
        children: Vec<Avp>,
    ) -> Result<Avp, DiameterError> {
        self.create_avp(code, vendor_id, AvpValue::Grouped(children))
    }

    /// Build one of the AVPs defined by the base protocol
    pub fn create_base(&self, code: BaseAvpCode, value: AvpValue) -> Result<Avp, DiameterError> {
        self.create_avp(code.into(), 0, value)
    }

    /// Build an AVP by its dictionary name, e.g. `Origin-Host`
    pub fn create_by_name(
        &self,
        name: &str,
        vendor_id: u32,
        value: AvpValue,
    ) -> Result<Avp, DiameterError> {
        let code = self
            .dictionary()?
            .lookup_by_name(name, vendor_id)
            .map(AvpDefinition::code)
            .ok_or_else(|| DiameterError::UnknownAvpName {
                name: name.to_string(),
                vendor_id,
            })?;
        self.create_avp(code, vendor_id, value)
    }

    pub fn create_experimental_result(
        &self,
        vendor_id: u32,
        experimental_result_code: u32,
    ) -> Result<Avp, DiameterError> {
        ExperimentalResult::new(vendor_id, experimental_result_code).to_avp(self)
    }

    pub fn create_proxy_info(
        &self,
        proxy_host: impl Into<String>,
        proxy_state: impl Into<Vec<u8>>,
    ) -> Result<Avp, DiameterError> {
        ProxyInfo::new(proxy_host, proxy_state).to_avp(self)
    }

    /// Fails with [`DiameterError::InvalidApplicationIdComposition`] unless
    /// exactly one of the auth and acct application ids is given
    pub fn create_vendor_specific_application_id(
        &self,
        vendor_id: u32,
        auth_application_id: Option<u32>,
        acct_application_id: Option<u32>,
    ) -> Result<Avp, DiameterError> {
        VendorSpecificApplicationId::new(vendor_id, auth_application_id, acct_application_id)?
            .to_avp(self)
    }
}

fn check_value(definition: &AvpDefinition, value: &AvpValue) -> Result<(), DiameterError> {
    if value.data_type() != definition.data_type() {
        return Err(DiameterError::Encoding(format!(
            "AVP {} ({}, vendor {}) is of type {} but the value is {}",
            definition.name(),
            definition.code(),
            definition.vendor_id(),
            definition.data_type(),
            value.data_type()
        )));
    }
    match value {
        AvpValue::Enumerated(value) if !definition.allows_enumerated_value(*value) => {
            Err(DiameterError::InvalidEnum {
                code: definition.code(),
                vendor_id: definition.vendor_id(),
                value: *value,
            })
        }
        AvpValue::Time(time) if time_to_ntp(time).is_none() => Err(DiameterError::Encoding(
            format!("time {time} can't be represented in NTP seconds"),
        )),
        AvpValue::Address(Address::Other { family, .. })
            if matches!(
                AddressFamily::from_repr(*family),
                Some(AddressFamily::Ipv4 | AddressFamily::Ipv6)
            ) =>
        {
            Err(DiameterError::Encoding(format!(
                "address family {family} must be given as an IP address"
            )))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application_id::{ApplicationIdComposition, ApplicationIdSignature},
        applications::base::{AuthSessionState, DisconnectCause},
        dictionary::{AvpDataType, AvpKey},
        enumerated::EnumeratedAvp,
        grouped::assert_construction_paths_agree,
        THREE_GPP_VENDOR_ID,
    };
    use chrono::{DateTime, Utc};

    fn factory() -> AvpFactory {
        AvpFactory::new(DictionaryHandle::loaded(
            Dictionary::builder().with_base_protocol().build(),
        ))
    }

    #[test]
    fn test_default_flags() {
        let factory = factory();
        let origin_host = factory
            .create_base(
                BaseAvpCode::OriginHost,
                AvpValue::DiameterIdentity("host.example.net".to_string()),
            )
            .unwrap();
        assert!(origin_host.is_mandatory());
        assert!(!origin_host.is_protected());
        assert!(!origin_host.is_vendor_specific());

        let product_name = factory
            .create_base(
                BaseAvpCode::ProductName,
                AvpValue::Utf8String("diameter".to_string()),
            )
            .unwrap();
        assert!(!product_name.is_mandatory());
    }

    #[test]
    fn test_flags_override() {
        let factory = factory();
        let avp = factory
            .create_avp_with_flags(
                BaseAvpCode::SessionId.into(),
                0,
                AvpFlags::new(false, true),
                AvpValue::Utf8String("session;1".to_string()),
            )
            .unwrap();
        assert!(!avp.is_mandatory());
        assert!(avp.is_protected());
    }

    #[test]
    fn test_type_mismatch() {
        let factory = factory();
        let result = factory.create_base(BaseAvpCode::ResultCode, AvpValue::Integer32(2001));
        assert!(matches!(result, Err(DiameterError::Encoding(_))));
    }

    #[test]
    fn test_unknown_avp() {
        let factory = factory();
        assert_eq!(
            factory.create_avp(1492, THREE_GPP_VENDOR_ID, AvpValue::Enumerated(1)),
            Err(DiameterError::UnknownAvp {
                code: 1492,
                vendor_id: THREE_GPP_VENDOR_ID,
            })
        );
        assert_eq!(
            factory.create_by_name("No-Such-AVP", 0, AvpValue::Unsigned32(1)),
            Err(DiameterError::UnknownAvpName {
                name: "No-Such-AVP".to_string(),
                vendor_id: 0,
            })
        );
    }

    #[test]
    fn test_create_by_name() {
        let factory = factory();
        let by_name = factory
            .create_by_name("Result-Code", 0, AvpValue::Unsigned32(2001))
            .unwrap();
        let by_code = factory
            .create_base(BaseAvpCode::ResultCode, AvpValue::Unsigned32(2001))
            .unwrap();
        assert_eq!(by_name, by_code);
        assert_eq!(by_name.key(), AvpKey::base(268));
    }

    #[test]
    fn test_enumerated_values() {
        let factory = factory();
        let avp = factory
            .create_base(BaseAvpCode::DisconnectCause, AvpValue::Enumerated(2))
            .unwrap();
        assert_eq!(
            DisconnectCause::from_avp(&avp),
            Ok(DisconnectCause::DoNotWantToTalkToYou)
        );
        assert_eq!(
            factory.create_base(BaseAvpCode::AuthSessionState, AvpValue::Enumerated(7)),
            Err(DiameterError::InvalidEnum {
                code: 277,
                vendor_id: 0,
                value: 7,
            })
        );
        assert_eq!(
            AuthSessionState::NoStateMaintained.to_avp(&factory),
            factory.create_base(BaseAvpCode::AuthSessionState, AvpValue::Enumerated(1))
        );
    }

    #[test]
    fn test_time_out_of_range() {
        let factory = factory();
        let too_late = DateTime::<Utc>::from_timestamp(5_000_000_000, 0).unwrap();
        assert!(matches!(
            factory.create_base(BaseAvpCode::EventTimestamp, AvpValue::Time(too_late)),
            Err(DiameterError::Encoding(_))
        ));
        let in_range = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        assert!(factory
            .create_base(BaseAvpCode::EventTimestamp, AvpValue::Time(in_range))
            .is_ok());
    }

    #[test]
    fn test_address_family_of_other() {
        let factory = factory();
        let disguised_ipv4 = Address::Other {
            family: 1,
            value: vec![192, 0, 2, 1],
        };
        assert!(matches!(
            factory.create_base(BaseAvpCode::HostIpAddress, AvpValue::Address(disguised_ipv4)),
            Err(DiameterError::Encoding(_))
        ));
        let e164 = Address::Other {
            family: 8,
            value: b"41791234567".to_vec(),
        };
        assert!(factory
            .create_base(BaseAvpCode::HostIpAddress, AvpValue::Address(e164))
            .is_ok());
    }

    #[test]
    fn test_dictionary_not_loaded() {
        let handle = DictionaryHandle::new();
        let factory = AvpFactory::new(handle.clone());
        assert_eq!(
            factory.create_base(BaseAvpCode::ResultCode, AvpValue::Unsigned32(2001)),
            Err(DiameterError::DictionaryNotInitialized)
        );
        handle
            .load(Dictionary::builder().with_base_protocol().build())
            .unwrap();
        assert!(factory
            .create_base(BaseAvpCode::ResultCode, AvpValue::Unsigned32(2001))
            .is_ok());
    }

    #[test]
    fn test_vendor_specific_application_id() {
        let factory = factory();
        let avp = factory
            .create_vendor_specific_application_id(THREE_GPP_VENDOR_ID, None, Some(23121))
            .unwrap();
        assert_eq!(
            ApplicationIdComposition::of(&[avp.clone()]).signature(),
            Ok(ApplicationIdSignature::VendorAcct)
        );

        let mut children = avp.children().unwrap().to_vec();
        children.push(
            factory
                .create_base(BaseAvpCode::AuthApplicationId, AvpValue::Unsigned32(16777251))
                .unwrap(),
        );
        let both = ApplicationIdComposition {
            vendor_specific: 1,
            vendor_id: 1,
            vendor_auth: 1,
            vendor_acct: 1,
            ..Default::default()
        };
        assert_eq!(
            factory.create_grouped(
                BaseAvpCode::VendorSpecificApplicationId.into(),
                0,
                children
            ),
            Err(DiameterError::InvalidApplicationIdComposition(both))
        );
        assert_eq!(
            factory.create_vendor_specific_application_id(
                THREE_GPP_VENDOR_ID,
                Some(16777251),
                Some(23121)
            ),
            Err(DiameterError::InvalidApplicationIdComposition(both))
        );
        assert!(matches!(
            factory.create_vendor_specific_application_id(THREE_GPP_VENDOR_ID, None, None),
            Err(DiameterError::InvalidApplicationIdComposition(_))
        ));
    }

    #[test]
    fn test_base_grouped_views() {
        let factory = factory();
        assert_construction_paths_agree(
            &ExperimentalResult::new(THREE_GPP_VENDOR_ID, 5001),
            &factory,
        );
        assert_construction_paths_agree(
            &ProxyInfo::new("proxy.example.net", vec![1, 2, 3]),
            &factory,
        );
        assert_construction_paths_agree(
            &VendorSpecificApplicationId::new(THREE_GPP_VENDOR_ID, Some(16777251), None).unwrap(),
            &factory,
        );
        let experimental = factory
            .create_experimental_result(THREE_GPP_VENDOR_ID, 5001)
            .unwrap();
        assert_eq!(
            experimental.find_child(298, 0).map(Avp::unsigned32),
            Some(Ok(5001))
        );
        let proxy_info = factory
            .create_proxy_info("proxy.example.net", vec![1, 2, 3])
            .unwrap();
        assert_eq!(
            proxy_info
                .find_child(280, 0)
                .map(|avp| avp.value().data_type()),
            Some(AvpDataType::DiameterIdentity)
        );
    }
}
