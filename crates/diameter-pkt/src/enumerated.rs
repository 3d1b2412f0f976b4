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

//! Typed views over Enumerated AVPs

use std::{collections::BTreeMap, fmt::Display};
use strum::IntoEnumIterator;

use crate::{
    avp::{Avp, AvpValue},
    error::DiameterError,
    factory::AvpFactory,
};

/// A closed set of values carried by an Enumerated AVP.
///
/// Conversions from an integer or an AVP fail with
/// [`DiameterError::InvalidEnum`] when the value is not declared.
pub trait EnumeratedAvp: Copy + Display + IntoEnumIterator {
    const CODE: u32;
    const VENDOR_ID: u32;

    fn value(self) -> i32;

    fn from_value(value: i32) -> Option<Self>;

    fn try_from_value(value: i32) -> Result<Self, DiameterError> {
        Self::from_value(value).ok_or(DiameterError::InvalidEnum {
            code: Self::CODE,
            vendor_id: Self::VENDOR_ID,
            value,
        })
    }

    fn from_avp(avp: &Avp) -> Result<Self, DiameterError> {
        if avp.code() != Self::CODE || avp.vendor_id() != Self::VENDOR_ID {
            return Err(DiameterError::Encoding(format!(
                "expected AVP {} (vendor {}) but found {} (vendor {})",
                Self::CODE,
                Self::VENDOR_ID,
                avp.code(),
                avp.vendor_id()
            )));
        }
        Self::try_from_value(avp.enumerated()?)
    }

    fn to_avp(self, factory: &AvpFactory) -> Result<Avp, DiameterError> {
        factory.create_avp(Self::CODE, Self::VENDOR_ID, AvpValue::Enumerated(self.value()))
    }

    /// Value to name mapping used to declare the AVP in the dictionary
    fn declared_values() -> BTreeMap<i32, String> {
        Self::iter()
            .map(|item| (item.value(), item.to_string()))
            .collect()
    }
}

/// Implements [`EnumeratedAvp`] for a `#[repr(i32)]` enum deriving
/// `strum_macros::FromRepr`.
macro_rules! enumerated_avp {
    ($name:ty, $code:expr, $vendor_id:expr) => {
        impl $crate::enumerated::EnumeratedAvp for $name {
            const CODE: u32 = $code;
            const VENDOR_ID: u32 = $vendor_id;

            fn value(self) -> i32 {
                self as i32
            }

            fn from_value(value: i32) -> Option<Self> {
                Self::from_repr(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value as i32
            }
        }

        impl TryFrom<i32> for $name {
            type Error = $crate::error::DiameterError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                <Self as $crate::enumerated::EnumeratedAvp>::try_from_value(value)
            }
        }
    };
}

pub(crate) use enumerated_avp;
