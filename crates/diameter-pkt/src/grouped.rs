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

//! Typed views over Grouped AVPs.
//!
//! A grouped AVP is kept as a generic [`AvpValue::Grouped`] member list, the
//! views here give named access to the members and build the AVP back from
//! the named values. For every view the three construction paths agree:
//!
//! ```text
//! view.to_avp(f) == f.create_grouped(code, vendor, view.to_avp(f).children())
//!                == View::from_avp(&view.to_avp(f)).to_avp(f)
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    application_id::ApplicationIdComposition,
    avp::{Avp, AvpValue},
    error::DiameterError,
    factory::AvpFactory,
    iana::BaseAvpCode,
};

pub trait GroupedAvp: Sized {
    const CODE: u32;
    const VENDOR_ID: u32;

    /// Build the view from the members of the grouped AVP
    fn from_children(children: &[Avp]) -> Result<Self, DiameterError>;

    /// Build the members of the grouped AVP, in the order of its ABNF
    fn to_children(&self, factory: &AvpFactory) -> Result<Vec<Avp>, DiameterError>;

    fn from_avp(avp: &Avp) -> Result<Self, DiameterError> {
        if avp.code() != Self::CODE || avp.vendor_id() != Self::VENDOR_ID {
            return Err(DiameterError::Encoding(format!(
                "expected grouped AVP {} (vendor {}) but found {} (vendor {})",
                Self::CODE,
                Self::VENDOR_ID,
                avp.code(),
                avp.vendor_id()
            )));
        }
        Self::from_children(avp.grouped()?)
    }

    fn to_avp(&self, factory: &AvpFactory) -> Result<Avp, DiameterError> {
        factory.create_grouped(Self::CODE, Self::VENDOR_ID, self.to_children(factory)?)
    }
}

/// First member with the given key
pub(crate) fn member(children: &[Avp], code: u32, vendor_id: u32) -> Option<&Avp> {
    children
        .iter()
        .find(|child| child.code() == code && child.vendor_id() == vendor_id)
}

/// Every member with the given key, in order
pub(crate) fn members(children: &[Avp], code: u32, vendor_id: u32) -> impl Iterator<Item = &Avp> {
    children
        .iter()
        .filter(move |child| child.code() == code && child.vendor_id() == vendor_id)
}

/// First member with the given key, or [`DiameterError::MissingGroupedMember`]
pub(crate) fn required_member<G: GroupedAvp>(
    children: &[Avp],
    code: u32,
    vendor_id: u32,
) -> Result<&Avp, DiameterError> {
    member(children, code, vendor_id).ok_or(DiameterError::MissingGroupedMember {
        parent: G::CODE,
        code,
        vendor_id,
    })
}

/// Experimental-Result, [RFC6733 Section 7.6](https://datatracker.ietf.org/doc/html/rfc6733#section-7.6)
///
/// ```text
/// Experimental-Result ::= < AVP Header: 297 >
///                         { Vendor-Id }
///                         { Experimental-Result-Code }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentalResult {
    vendor_id: u32,
    experimental_result_code: u32,
}

impl ExperimentalResult {
    pub const fn new(vendor_id: u32, experimental_result_code: u32) -> Self {
        Self {
            vendor_id,
            experimental_result_code,
        }
    }

    pub const fn vendor_id(&self) -> u32 {
        self.vendor_id
    }

    pub const fn experimental_result_code(&self) -> u32 {
        self.experimental_result_code
    }
}

impl GroupedAvp for ExperimentalResult {
    const CODE: u32 = BaseAvpCode::ExperimentalResult as u32;
    const VENDOR_ID: u32 = 0;

    fn from_children(children: &[Avp]) -> Result<Self, DiameterError> {
        let vendor_id =
            required_member::<Self>(children, BaseAvpCode::VendorId as u32, 0)?.unsigned32()?;
        let code =
            required_member::<Self>(children, BaseAvpCode::ExperimentalResultCode as u32, 0)?
                .unsigned32()?;
        Ok(Self::new(vendor_id, code))
    }

    fn to_children(&self, factory: &AvpFactory) -> Result<Vec<Avp>, DiameterError> {
        Ok(vec![
            factory.create_base(BaseAvpCode::VendorId, AvpValue::Unsigned32(self.vendor_id))?,
            factory.create_base(
                BaseAvpCode::ExperimentalResultCode,
                AvpValue::Unsigned32(self.experimental_result_code),
            )?,
        ])
    }
}

/// Proxy-Info, [RFC6733 Section 6.7.2](https://datatracker.ietf.org/doc/html/rfc6733#section-6.7.2)
///
/// ```text
/// Proxy-Info ::= < AVP Header: 284 >
///                { Proxy-Host }
///                { Proxy-State }
///              * [ AVP ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyInfo {
    proxy_host: String,
    proxy_state: Vec<u8>,
}

impl ProxyInfo {
    pub fn new(proxy_host: impl Into<String>, proxy_state: impl Into<Vec<u8>>) -> Self {
        Self {
            proxy_host: proxy_host.into(),
            proxy_state: proxy_state.into(),
        }
    }

    pub fn proxy_host(&self) -> &str {
        &self.proxy_host
    }

    pub fn proxy_state(&self) -> &[u8] {
        &self.proxy_state
    }
}

impl GroupedAvp for ProxyInfo {
    const CODE: u32 = BaseAvpCode::ProxyInfo as u32;
    const VENDOR_ID: u32 = 0;

    fn from_children(children: &[Avp]) -> Result<Self, DiameterError> {
        let host =
            required_member::<Self>(children, BaseAvpCode::ProxyHost as u32, 0)?.utf8_string()?;
        let state =
            required_member::<Self>(children, BaseAvpCode::ProxyState as u32, 0)?.octet_string()?;
        Ok(Self::new(host, state))
    }

    fn to_children(&self, factory: &AvpFactory) -> Result<Vec<Avp>, DiameterError> {
        Ok(vec![
            factory.create_base(
                BaseAvpCode::ProxyHost,
                AvpValue::DiameterIdentity(self.proxy_host.clone()),
            )?,
            factory.create_base(
                BaseAvpCode::ProxyState,
                AvpValue::OctetString(self.proxy_state.clone()),
            )?,
        ])
    }
}

/// Vendor-Specific-Application-Id,
/// [RFC6733 Section 6.11](https://datatracker.ietf.org/doc/html/rfc6733#section-6.11)
///
/// ```text
/// Vendor-Specific-Application-Id ::= < AVP Header: 260 >
///                                    { Vendor-Id }
///                                    [ Auth-Application-Id ]
///                                    [ Acct-Application-Id ]
/// ```
///
/// Exactly one of Auth-Application-Id and Acct-Application-Id is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "VendorSpecificApplicationIdFields")]
pub struct VendorSpecificApplicationId {
    vendor_id: u32,
    auth_application_id: Option<u32>,
    acct_application_id: Option<u32>,
}

#[derive(Deserialize)]
struct VendorSpecificApplicationIdFields {
    vendor_id: u32,
    auth_application_id: Option<u32>,
    acct_application_id: Option<u32>,
}

impl TryFrom<VendorSpecificApplicationIdFields> for VendorSpecificApplicationId {
    type Error = DiameterError;

    fn try_from(fields: VendorSpecificApplicationIdFields) -> Result<Self, Self::Error> {
        VendorSpecificApplicationId::new(
            fields.vendor_id,
            fields.auth_application_id,
            fields.acct_application_id,
        )
    }
}

impl VendorSpecificApplicationId {
    pub fn new(
        vendor_id: u32,
        auth_application_id: Option<u32>,
        acct_application_id: Option<u32>,
    ) -> Result<Self, DiameterError> {
        let composition = ApplicationIdComposition {
            vendor_specific: 1,
            vendor_id: 1,
            vendor_auth: usize::from(auth_application_id.is_some()),
            vendor_acct: usize::from(acct_application_id.is_some()),
            ..Default::default()
        };
        composition.signature()?;
        Ok(Self {
            vendor_id,
            auth_application_id,
            acct_application_id,
        })
    }

    pub const fn vendor_id(&self) -> u32 {
        self.vendor_id
    }

    pub const fn auth_application_id(&self) -> Option<u32> {
        self.auth_application_id
    }

    pub const fn acct_application_id(&self) -> Option<u32> {
        self.acct_application_id
    }
}

impl GroupedAvp for VendorSpecificApplicationId {
    const CODE: u32 = BaseAvpCode::VendorSpecificApplicationId as u32;
    const VENDOR_ID: u32 = 0;

    fn from_children(children: &[Avp]) -> Result<Self, DiameterError> {
        ApplicationIdComposition::of_vendor_specific(children).signature()?;
        let vendor_id =
            required_member::<Self>(children, BaseAvpCode::VendorId as u32, 0)?.unsigned32()?;
        let auth = member(children, BaseAvpCode::AuthApplicationId as u32, 0)
            .map(Avp::unsigned32)
            .transpose()?;
        let acct = member(children, BaseAvpCode::AcctApplicationId as u32, 0)
            .map(Avp::unsigned32)
            .transpose()?;
        Self::new(vendor_id, auth, acct)
    }

    fn to_children(&self, factory: &AvpFactory) -> Result<Vec<Avp>, DiameterError> {
        let mut children = vec![factory.create_base(
            BaseAvpCode::VendorId,
            AvpValue::Unsigned32(self.vendor_id),
        )?];
        if let Some(auth) = self.auth_application_id {
            children.push(
                factory.create_base(BaseAvpCode::AuthApplicationId, AvpValue::Unsigned32(auth))?,
            );
        }
        if let Some(acct) = self.acct_application_id {
            children.push(
                factory.create_base(BaseAvpCode::AcctApplicationId, AvpValue::Unsigned32(acct))?,
            );
        }
        Ok(children)
    }
}

/// Checks that building a grouped AVP from the view, from the members of that
/// AVP and from the view read back out of it give the same AVP.
#[cfg(test)]
pub(crate) fn assert_construction_paths_agree<G>(view: &G, factory: &AvpFactory) -> Avp
where
    G: GroupedAvp + PartialEq + std::fmt::Debug,
{
    let from_view = view.to_avp(factory).unwrap();
    let from_children = factory
        .create_grouped(G::CODE, G::VENDOR_ID, from_view.children().unwrap().to_vec())
        .unwrap();
    let read_back = G::from_avp(&from_view).unwrap();
    assert_eq!(&read_back, view);
    let from_getters = read_back.to_avp(factory).unwrap();
    assert_eq!(from_view, from_children);
    assert_eq!(from_view, from_getters);
    from_view
}
