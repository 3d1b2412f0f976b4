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

//! Diameter applications: their AVP definitions, commands and typed views.
//!
//! Each application implements [`crate::dictionary::DiameterApplication`] and
//! is registered with [`crate::dictionary::DictionaryBuilder::with_application`].

pub mod base;
pub mod s6a;
pub mod slg;

use crate::dictionary::{AvpDataType, AvpDefinition, AvpKey};

/// Shorthand for the long lists of definitions in the application modules
pub(crate) fn avp(
    code: u32,
    vendor_id: u32,
    name: &str,
    data_type: AvpDataType,
    mandatory: bool,
) -> AvpDefinition {
    AvpDefinition::new(code, vendor_id, name, data_type, mandatory, false)
}

pub(crate) fn base_keys<const N: usize>(codes: [u32; N]) -> Vec<AvpKey> {
    codes.into_iter().map(AvpKey::base).collect()
}
