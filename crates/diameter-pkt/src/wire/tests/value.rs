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

use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use rstest::rstest;
use std::net::{Ipv4Addr, Ipv6Addr};

use diameter_parse_utils::{
    test_helpers::{
        combine, test_parse_error_with_two_inputs, test_parsed_completely_with_two_inputs,
        test_write,
    },
    Span,
};

use crate::{
    avp::{Address, Avp, AvpFlags, AvpValue},
    dictionary::AvpDataType,
    wire::{
        deserializer::{
            value::{AvpValueParsingError, LocatedAvpValueParsingError},
            DiameterParsingContext,
        },
        serializer::AvpWritingError,
        tests::{base_dictionary, PEER_LOCAL},
        MAX_TIME_SECONDS, MIN_TIME_SECONDS,
    },
};

fn time(seconds: i64) -> AvpValue {
    AvpValue::Time(DateTime::<Utc>::from_timestamp(seconds, 0).unwrap())
}

#[rstest]
#[case(AvpDataType::Integer32, vec![0x80, 0x00, 0x00, 0x00], AvpValue::Integer32(i32::MIN))]
#[case(AvpDataType::Integer32, vec![0xff, 0xff, 0xff, 0xff], AvpValue::Integer32(-1))]
#[case(AvpDataType::Integer32, vec![0x7f, 0xff, 0xff, 0xff], AvpValue::Integer32(i32::MAX))]
#[case(AvpDataType::Unsigned32, vec![0x00, 0x00, 0x00, 0x00], AvpValue::Unsigned32(0))]
#[case(AvpDataType::Unsigned32, vec![0xff, 0xff, 0xff, 0xff], AvpValue::Unsigned32(u32::MAX))]
#[case(
    AvpDataType::Integer64,
    vec![0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
    AvpValue::Integer64(i64::MIN)
)]
#[case(
    AvpDataType::Unsigned64,
    vec![0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff],
    AvpValue::Unsigned64(u64::MAX)
)]
#[case(AvpDataType::Float32, vec![0x3f, 0xc0, 0x00, 0x00], AvpValue::Float32(OrderedFloat(1.5)))]
#[case(
    AvpDataType::Float64,
    vec![0xbf, 0xd0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
    AvpValue::Float64(OrderedFloat(-0.25))
)]
#[case(AvpDataType::Enumerated, vec![0x00, 0x00, 0x00, 0x02], AvpValue::Enumerated(2))]
#[case(AvpDataType::OctetString, vec![], AvpValue::OctetString(vec![]))]
#[case(
    AvpDataType::OctetString,
    vec![0x00, 0xff, 0x10],
    AvpValue::OctetString(vec![0x00, 0xff, 0x10])
)]
#[case(AvpDataType::Utf8String, vec![0x68, 0xc3, 0xa9], AvpValue::Utf8String("hé".to_string()))]
#[case(
    AvpDataType::DiameterIdentity,
    PEER_LOCAL.to_vec(),
    AvpValue::DiameterIdentity("peer.local".to_string())
)]
#[case(
    AvpDataType::DiameterUri,
    vec![0x61, 0x61, 0x61, 0x3a, 0x2f, 0x2f, 0x68],
    AvpValue::DiameterUri("aaa://h".to_string())
)]
#[case(
    AvpDataType::Address,
    vec![0x00, 0x01, 0xc0, 0x00, 0x02, 0x01],
    AvpValue::Address(Address::Ipv4(Ipv4Addr::new(192, 0, 2, 1)))
)]
#[case(
    AvpDataType::Address,
    combine(vec![&[0x00, 0x02], &Ipv6Addr::LOCALHOST.octets()]),
    AvpValue::Address(Address::Ipv6(Ipv6Addr::LOCALHOST))
)]
#[case(
    AvpDataType::Address,
    vec![0x00, 0x08, 0x31, 0x32, 0x33],
    AvpValue::Address(Address::Other { family: 8, value: vec![0x31, 0x32, 0x33] })
)]
#[case(AvpDataType::Time, vec![0x83, 0xaa, 0x7e, 0x80], time(0))]
#[case(AvpDataType::Time, vec![0x00, 0x00, 0x00, 0x00], time(2_085_978_496))]
#[case(AvpDataType::Time, vec![0x80, 0x00, 0x00, 0x00], time(MIN_TIME_SECONDS))]
#[case(AvpDataType::Time, vec![0x7f, 0xff, 0xff, 0xff], time(MAX_TIME_SECONDS))]
fn test_value(
    #[case] data_type: AvpDataType,
    #[case] good_wire: Vec<u8>,
    #[case] good: AvpValue,
) -> Result<(), AvpWritingError> {
    let dictionary = base_dictionary();
    let ctx = DiameterParsingContext::lenient(&dictionary);
    assert_eq!(good.data_type(), data_type);
    test_parsed_completely_with_two_inputs(&good_wire[..], data_type, &ctx, &good);
    test_write(&good, &good_wire[..])?;
    Ok(())
}

#[test]
fn test_grouped_value() -> Result<(), AvpWritingError> {
    let dictionary = base_dictionary();
    let ctx = DiameterParsingContext::lenient(&dictionary);
    let good_wire = combine(vec![
        // Vendor-Id
        &[0x00, 0x00, 0x01, 0x0a, 0x40, 0x00, 0x00, 0x0c, 0x00, 0x00, 0x28, 0xaf],
        // Acct-Application-Id
        &[0x00, 0x00, 0x01, 0x03, 0x40, 0x00, 0x00, 0x0c, 0x00, 0x00, 0x5a, 0x51],
    ]);
    let good = AvpValue::Grouped(vec![
        Avp::new(266, 0, AvpFlags::new(true, false), AvpValue::Unsigned32(10415)),
        Avp::new(259, 0, AvpFlags::new(true, false), AvpValue::Unsigned32(23121)),
    ]);
    test_parsed_completely_with_two_inputs(&good_wire[..], AvpDataType::Grouped, &ctx, &good);
    test_write(&good, &good_wire[..])?;
    Ok(())
}

#[test]
fn test_time_truncates_sub_seconds() -> Result<(), AvpWritingError> {
    let good = AvpValue::Time(DateTime::<Utc>::from_timestamp(0, 999_000_000).unwrap());
    test_write(&good, &[0x83, 0xaa, 0x7e, 0x80])?;
    Ok(())
}

#[test]
fn test_time_out_of_range() {
    assert_eq!(
        test_write(&time(MAX_TIME_SECONDS + 1), &[]),
        Err(AvpWritingError::TimeOutOfRange(MAX_TIME_SECONDS + 1))
    );
    assert_eq!(
        test_write(&time(MIN_TIME_SECONDS - 1), &[]),
        Err(AvpWritingError::TimeOutOfRange(MIN_TIME_SECONDS - 1))
    );
}

#[test]
fn test_write_other_address_with_ip_family() {
    for family in [1, 2] {
        let bad = AvpValue::Address(Address::Other {
            family,
            value: vec![0xc0, 0x00, 0x02, 0x01],
        });
        assert_eq!(
            test_write(&bad, &[]),
            Err(AvpWritingError::ReservedAddressFamily(family))
        );
    }
}

#[rstest]
#[case(AvpDataType::Unsigned32, vec![0x00, 0x07, 0xd1])]
#[case(AvpDataType::Integer32, vec![0x00, 0x00, 0x00, 0x07, 0xd1])]
#[case(AvpDataType::Enumerated, vec![])]
#[case(AvpDataType::Unsigned64, vec![0x00, 0x00, 0x00, 0x01])]
#[case(AvpDataType::Float64, vec![0x3f, 0xc0, 0x00, 0x00])]
#[case(AvpDataType::Time, vec![0x83, 0xaa, 0x7e])]
fn test_invalid_payload_length(#[case] data_type: AvpDataType, #[case] bad_wire: Vec<u8>) {
    let dictionary = base_dictionary();
    let ctx = DiameterParsingContext::lenient(&dictionary);
    let bad = LocatedAvpValueParsingError::new(
        Span::new_from_raw_offset(0, &bad_wire),
        AvpValueParsingError::InvalidPayloadLength {
            data_type,
            length: bad_wire.len(),
        },
    );
    test_parse_error_with_two_inputs::<
        AvpValue,
        AvpDataType,
        &DiameterParsingContext<'_>,
        LocatedAvpValueParsingError<'_>,
    >(&bad_wire, data_type, &ctx, &bad);
}

#[test]
fn test_invalid_utf8() {
    let dictionary = base_dictionary();
    let ctx = DiameterParsingContext::lenient(&dictionary);
    let bad_wire = [0x66, 0x6f, 0xff, 0x6f];
    for data_type in [
        AvpDataType::Utf8String,
        AvpDataType::DiameterIdentity,
        AvpDataType::DiameterUri,
    ] {
        let bad = LocatedAvpValueParsingError::new(
            Span::new_from_raw_offset(0, &bad_wire),
            AvpValueParsingError::InvalidUtf8String { valid_up_to: 2 },
        );
        test_parse_error_with_two_inputs::<
            AvpValue,
            AvpDataType,
            &DiameterParsingContext<'_>,
            LocatedAvpValueParsingError<'_>,
        >(&bad_wire, data_type, &ctx, &bad);
    }
}

#[test]
fn test_invalid_address_length() {
    let dictionary = base_dictionary();
    let ctx = DiameterParsingContext::lenient(&dictionary);
    let bad_ipv4 = [0x00, 0x01, 0xc0, 0x00, 0x02];
    let bad = LocatedAvpValueParsingError::new(
        Span::new_from_raw_offset(0, &bad_ipv4),
        AvpValueParsingError::InvalidAddressLength {
            family: 1,
            length: 3,
        },
    );
    test_parse_error_with_two_inputs::<
        AvpValue,
        AvpDataType,
        &DiameterParsingContext<'_>,
        LocatedAvpValueParsingError<'_>,
    >(
        &bad_ipv4,
        AvpDataType::Address,
        &ctx,
        &bad,
    );

    let bad_ipv6 = combine(vec![&[0x00, 0x02], &Ipv4Addr::LOCALHOST.octets()]);
    let bad = LocatedAvpValueParsingError::new(
        Span::new_from_raw_offset(0, &bad_ipv6),
        AvpValueParsingError::InvalidAddressLength {
            family: 2,
            length: 4,
        },
    );
    test_parse_error_with_two_inputs::<
        AvpValue,
        AvpDataType,
        &DiameterParsingContext<'_>,
        LocatedAvpValueParsingError<'_>,
    >(
        &bad_ipv6,
        AvpDataType::Address,
        &ctx,
        &bad,
    );
}
