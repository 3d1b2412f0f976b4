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

//! Serialize/Deserialize Diameter wire protocol

use chrono::{DateTime, Utc};

pub mod deserializer;
pub mod serializer;

/// Version, length, flags, command code, application id, hop-by-hop and
/// end-to-end identifiers as per RFC6733 Section 3
pub const DIAMETER_HEADER_LENGTH: usize = 20;

/// Code, flags and length of an AVP
pub const AVP_HEADER_LENGTH: usize = 8;

/// AVP header followed by the Vendor-ID
pub const AVP_VENDOR_HEADER_LENGTH: usize = 12;

/// Largest value of the 24-bit length and command code fields
pub(crate) const MAX_U24: u32 = 0x00ff_ffff;

pub(crate) const REQUEST_FLAG: u8 = 0x80;
pub(crate) const PROXIABLE_FLAG: u8 = 0x40;
pub(crate) const ERROR_FLAG: u8 = 0x20;
pub(crate) const RETRANSMITTED_FLAG: u8 = 0x10;

pub(crate) const AVP_VENDOR_FLAG: u8 = 0x80;
pub(crate) const AVP_MANDATORY_FLAG: u8 = 0x40;
pub(crate) const AVP_PROTECTED_FLAG: u8 = 0x20;

/// Seconds between the NTP epoch (1900-01-01) and the UNIX epoch
const NTP_UNIX_OFFSET: i64 = 2_208_988_800;

/// NTP era 1 starts at 2036-02-07T06:28:16Z
const NTP_ERA: i64 = 1 << 32;

/// 1968-01-20T03:14:08Z, the smallest NTP value with the MSB set
pub const MIN_TIME_SECONDS: i64 = (1 << 31) - NTP_UNIX_OFFSET;

/// 2104-02-26T09:42:23Z, the largest NTP value with the MSB clear in era 1
pub const MAX_TIME_SECONDS: i64 = (1 << 31) - 1 + NTP_ERA - NTP_UNIX_OFFSET;

/// Number of octets needed to pad `len` to a 4 octets boundary
#[inline]
pub(crate) const fn padding(len: usize) -> usize {
    (4 - len % 4) % 4
}

/// NTP seconds of a time value, `None` outside
/// [`MIN_TIME_SECONDS`]..=[`MAX_TIME_SECONDS`]. Sub-second precision is
/// truncated.
#[inline]
pub(crate) fn time_to_ntp(time: &DateTime<Utc>) -> Option<u32> {
    let seconds = time.timestamp();
    if !(MIN_TIME_SECONDS..=MAX_TIME_SECONDS).contains(&seconds) {
        return None;
    }
    u32::try_from((seconds + NTP_UNIX_OFFSET).rem_euclid(NTP_ERA)).ok()
}

/// Values with the MSB clear belong to NTP era 1, see
/// [RFC2030 Section 3](https://datatracker.ietf.org/doc/html/rfc2030#section-3)
#[inline]
pub(crate) fn ntp_to_time(ntp: u32) -> Option<DateTime<Utc>> {
    let ntp = i64::from(ntp);
    let seconds = if ntp & (1 << 31) != 0 {
        ntp - NTP_UNIX_OFFSET
    } else {
        ntp + NTP_ERA - NTP_UNIX_OFFSET
    };
    DateTime::from_timestamp(seconds, 0)
}

#[cfg(test)]
mod tests;
