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

//! Application identification of a message.
//!
//! A message names its application with exactly one of these top-level AVP
//! compositions:
//!
//! * `Auth-Application-Id`
//! * `Acct-Application-Id`
//! * `Vendor-Specific-Application-Id { Vendor-Id, Auth-Application-Id }`
//! * `Vendor-Specific-Application-Id { Vendor-Id, Acct-Application-Id }`

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    avp::{Avp, AvpValue},
    error::DiameterError,
    factory::AvpFactory,
    grouped::{GroupedAvp, VendorSpecificApplicationId},
    iana::BaseAvpCode,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationIdSignature {
    Auth,
    Acct,
    VendorAuth,
    VendorAcct,
}

/// Identifies a Diameter application: a vendor id (zero when the application
/// is not vendor specific) and exactly one of an authentication or an
/// accounting application id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ApplicationIdFields")]
pub struct ApplicationId {
    vendor_id: u32,
    auth_application_id: Option<u32>,
    acct_application_id: Option<u32>,
}

#[derive(Deserialize)]
struct ApplicationIdFields {
    #[serde(default)]
    vendor_id: u32,
    auth_application_id: Option<u32>,
    acct_application_id: Option<u32>,
}

impl TryFrom<ApplicationIdFields> for ApplicationId {
    type Error = DiameterError;

    fn try_from(fields: ApplicationIdFields) -> Result<Self, Self::Error> {
        ApplicationId::new(
            fields.vendor_id,
            fields.auth_application_id,
            fields.acct_application_id,
        )
    }
}

impl ApplicationId {
    /// Application id used by the base protocol common messages
    pub const COMMON: ApplicationId = ApplicationId::auth(0);

    pub fn new(
        vendor_id: u32,
        auth_application_id: Option<u32>,
        acct_application_id: Option<u32>,
    ) -> Result<Self, DiameterError> {
        match (auth_application_id, acct_application_id) {
            (Some(_), None) | (None, Some(_)) => Ok(Self {
                vendor_id,
                auth_application_id,
                acct_application_id,
            }),
            (auth, acct) => Err(DiameterError::InvalidApplicationIdComposition(
                ApplicationIdComposition {
                    auth: 0,
                    acct: 0,
                    vendor_specific: usize::from(vendor_id != 0),
                    vendor_id: usize::from(vendor_id != 0),
                    vendor_auth: usize::from(auth.is_some()),
                    vendor_acct: usize::from(acct.is_some()),
                }
                .flattened_if(vendor_id == 0),
            )),
        }
    }

    pub const fn auth(auth_application_id: u32) -> Self {
        Self {
            vendor_id: 0,
            auth_application_id: Some(auth_application_id),
            acct_application_id: None,
        }
    }

    pub const fn acct(acct_application_id: u32) -> Self {
        Self {
            vendor_id: 0,
            auth_application_id: None,
            acct_application_id: Some(acct_application_id),
        }
    }

    pub const fn vendor_auth(vendor_id: u32, auth_application_id: u32) -> Self {
        Self {
            vendor_id,
            auth_application_id: Some(auth_application_id),
            acct_application_id: None,
        }
    }

    pub const fn vendor_acct(vendor_id: u32, acct_application_id: u32) -> Self {
        Self {
            vendor_id,
            auth_application_id: None,
            acct_application_id: Some(acct_application_id),
        }
    }

    /// Same application announced under a different vendor, a vendor id of
    /// zero turns it into a plain Auth/Acct application id.
    pub const fn with_vendor_id(self, vendor_id: u32) -> Self {
        Self { vendor_id, ..self }
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

    pub const fn is_vendor_specific(&self) -> bool {
        self.vendor_id != 0
    }

    /// The value carried in the message header
    pub const fn id(&self) -> u32 {
        match (self.auth_application_id, self.acct_application_id) {
            (Some(id), _) | (None, Some(id)) => id,
            (None, None) => 0,
        }
    }

    pub const fn signature(&self) -> ApplicationIdSignature {
        match (self.is_vendor_specific(), self.auth_application_id.is_some()) {
            (false, true) => ApplicationIdSignature::Auth,
            (false, false) => ApplicationIdSignature::Acct,
            (true, true) => ApplicationIdSignature::VendorAuth,
            (true, false) => ApplicationIdSignature::VendorAcct,
        }
    }

    /// The top-level AVPs announcing this application
    pub fn to_avps(&self, factory: &AvpFactory) -> Result<Vec<Avp>, DiameterError> {
        if self.is_vendor_specific() {
            let vsai = VendorSpecificApplicationId::new(
                self.vendor_id,
                self.auth_application_id,
                self.acct_application_id,
            )?;
            return Ok(vec![vsai.to_avp(factory)?]);
        }
        let avp = match (self.auth_application_id, self.acct_application_id) {
            (Some(auth), _) => {
                factory.create_base(BaseAvpCode::AuthApplicationId, AvpValue::Unsigned32(auth))?
            }
            (None, Some(acct)) => {
                factory.create_base(BaseAvpCode::AcctApplicationId, AvpValue::Unsigned32(acct))?
            }
            (None, None) => return Ok(vec![]),
        };
        Ok(vec![avp])
    }

    /// Extract the application from the top-level AVPs of a message
    pub fn from_avps(avps: &[Avp]) -> Result<Self, DiameterError> {
        let composition = ApplicationIdComposition::of(avps);
        match composition.signature()? {
            ApplicationIdSignature::Auth | ApplicationIdSignature::Acct => {
                let auth = find_base(avps, BaseAvpCode::AuthApplicationId)
                    .map(Avp::unsigned32)
                    .transpose()?;
                let acct = find_base(avps, BaseAvpCode::AcctApplicationId)
                    .map(Avp::unsigned32)
                    .transpose()?;
                Self::new(0, auth, acct)
            }
            ApplicationIdSignature::VendorAuth | ApplicationIdSignature::VendorAcct => {
                let vsai = find_base(avps, BaseAvpCode::VendorSpecificApplicationId)
                    .ok_or(DiameterError::InvalidApplicationIdComposition(composition))?;
                Ok(VendorSpecificApplicationId::from_avp(vsai)?.into())
            }
        }
    }
}

impl From<VendorSpecificApplicationId> for ApplicationId {
    fn from(value: VendorSpecificApplicationId) -> Self {
        Self {
            vendor_id: value.vendor_id(),
            auth_application_id: value.auth_application_id(),
            acct_application_id: value.acct_application_id(),
        }
    }
}

fn find_base(avps: &[Avp], code: BaseAvpCode) -> Option<&Avp> {
    avps.iter()
        .find(|avp| avp.code() == code as u32 && avp.vendor_id() == 0)
}

fn count_base(avps: &[Avp], code: BaseAvpCode) -> usize {
    avps.iter()
        .filter(|avp| avp.code() == code as u32 && avp.vendor_id() == 0)
        .count()
}

/// How many application id AVPs appear at each level of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApplicationIdComposition {
    /// Top-level Auth-Application-Id
    pub auth: usize,
    /// Top-level Acct-Application-Id
    pub acct: usize,
    pub vendor_specific: usize,
    /// Vendor-Id inside Vendor-Specific-Application-Id
    pub vendor_id: usize,
    /// Auth-Application-Id inside Vendor-Specific-Application-Id
    pub vendor_auth: usize,
    /// Acct-Application-Id inside Vendor-Specific-Application-Id
    pub vendor_acct: usize,
}

impl ApplicationIdComposition {
    pub fn of(avps: &[Avp]) -> Self {
        let mut composition = Self {
            auth: count_base(avps, BaseAvpCode::AuthApplicationId),
            acct: count_base(avps, BaseAvpCode::AcctApplicationId),
            vendor_specific: count_base(avps, BaseAvpCode::VendorSpecificApplicationId),
            ..Default::default()
        };
        for vsai in avps.iter().filter(|avp| {
            avp.code() == BaseAvpCode::VendorSpecificApplicationId as u32 && avp.vendor_id() == 0
        }) {
            let members = vsai.children().unwrap_or_default();
            composition.vendor_id += count_base(members, BaseAvpCode::VendorId);
            composition.vendor_auth += count_base(members, BaseAvpCode::AuthApplicationId);
            composition.vendor_acct += count_base(members, BaseAvpCode::AcctApplicationId);
        }
        composition
    }

    /// Composition of the members of a single Vendor-Specific-Application-Id
    pub fn of_vendor_specific(members: &[Avp]) -> Self {
        Self {
            vendor_specific: 1,
            vendor_id: count_base(members, BaseAvpCode::VendorId),
            vendor_auth: count_base(members, BaseAvpCode::AuthApplicationId),
            vendor_acct: count_base(members, BaseAvpCode::AcctApplicationId),
            ..Default::default()
        }
    }

    /// Moves the nested counters to the top-level, used to describe a plain
    /// Auth/Acct composition.
    const fn flattened_if(self, condition: bool) -> Self {
        if condition {
            Self {
                auth: self.vendor_auth,
                acct: self.vendor_acct,
                vendor_specific: 0,
                vendor_id: 0,
                vendor_auth: 0,
                vendor_acct: 0,
            }
        } else {
            self
        }
    }

    pub fn signature(&self) -> Result<ApplicationIdSignature, DiameterError> {
        match (
            self.auth,
            self.acct,
            self.vendor_specific,
            self.vendor_id,
            self.vendor_auth,
            self.vendor_acct,
        ) {
            (1, 0, 0, 0, 0, 0) => Ok(ApplicationIdSignature::Auth),
            (0, 1, 0, 0, 0, 0) => Ok(ApplicationIdSignature::Acct),
            (0, 0, 1, 1, 1, 0) => Ok(ApplicationIdSignature::VendorAuth),
            (0, 0, 1, 1, 0, 1) => Ok(ApplicationIdSignature::VendorAcct),
            _ => Err(DiameterError::InvalidApplicationIdComposition(*self)),
        }
    }
}

impl fmt::Display for ApplicationIdComposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Auth-Application-Id, {} Acct-Application-Id, {} Vendor-Specific-Application-Id \
             (with {} Vendor-Id, {} Auth-Application-Id, {} Acct-Application-Id)",
            self.auth,
            self.acct,
            self.vendor_specific,
            self.vendor_id,
            self.vendor_auth,
            self.vendor_acct
        )
    }
}
