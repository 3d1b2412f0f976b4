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

//! Assertions shared by the wire tests of the Diameter crates

use crate::{ReadablePduWithOneInput, ReadablePduWithTwoInputs, Span, WritablePdu};
use nom::IResult;
use std::{fmt::Debug, io::Cursor};

/// Helper method to combine multiple vectors into one
pub fn combine(v: Vec<&[u8]>) -> Vec<u8> {
    v.iter()
        .flat_map(|x| x.iter())
        .cloned()
        .collect::<Vec<u8>>()
}

fn assert_consumed<T: PartialEq + Debug, E: Debug>(
    parsed: IResult<Span<'_>, T, E>,
    expected: &T,
) -> T {
    assert!(
        parsed.is_ok(),
        "Message failed parsing, while expecting it to pass.\n\tExpected : {expected:?}\n\tParsed msg: {parsed:?}"
    );
    let (span, value) = parsed.unwrap();
    assert_eq!(&value, expected);
    assert_eq!(
        span.fragment().len(),
        0,
        "Not all the input is consumed by the parser, didn't consume: {span:?}",
    );
    value
}

fn assert_error<T: Debug, E: Debug + PartialEq>(
    parsed: IResult<Span<'_>, T, E>,
    expected_err: &E,
) {
    assert!(
        parsed.is_err(),
        "Message was parsed, while expecting it to fail.\n\tExpected : {expected_err:?}\n\tParsed msg: {parsed:?}"
    );
    if let Err(nom::Err::Error(parsed_error)) = parsed {
        assert_eq!(&parsed_error, expected_err);
    } else {
        panic!(
            "Expected the test to fail with Err(nom::Err:Err(x)) but it didn't. Got {parsed:?} instead"
        );
    }
}

/// Fancier assert to for more meaningful error messages
pub fn test_parsed_completely_with_one_input<'a, T, I, E>(
    input: &'a [u8],
    parser_input: I,
    expected: &T,
) -> T
where
    T: ReadablePduWithOneInput<'a, I, E> + PartialEq + Debug,
    E: Debug,
{
    assert_consumed(
        <T as ReadablePduWithOneInput<I, E>>::from_wire(Span::new(input), parser_input),
        expected,
    )
}

/// Fancier assert to for more meaningful error messages
pub fn test_parsed_completely_with_two_inputs<'a, T, I, K, E>(
    input: &'a [u8],
    parser_input1: I,
    parser_input2: K,
    expected: &T,
) -> T
where
    T: ReadablePduWithTwoInputs<'a, I, K, E> + PartialEq + Debug,
    E: Debug,
{
    assert_consumed(
        <T as ReadablePduWithTwoInputs<I, K, E>>::from_wire(
            Span::new(input),
            parser_input1,
            parser_input2,
        ),
        expected,
    )
}

/// Fancier assert to for more meaningful error messages
pub fn test_parse_error_with_one_input<'a, T, I, E>(
    input: &'a [u8],
    parser_input: I,
    expected_err: &E,
) where
    T: ReadablePduWithOneInput<'a, I, E> + Debug,
    E: Debug + PartialEq,
{
    assert_error(
        <T as ReadablePduWithOneInput<I, E>>::from_wire(Span::new(input), parser_input),
        expected_err,
    )
}

/// Fancier assert to for more meaningful error messages
pub fn test_parse_error_with_two_inputs<'a, T, I, K, E>(
    input: &'a [u8],
    parser_input1: I,
    parser_input2: K,
    expected_err: &E,
) where
    T: ReadablePduWithTwoInputs<'a, I, K, E> + Debug,
    E: Debug + PartialEq,
{
    assert_error(
        <T as ReadablePduWithTwoInputs<I, K, E>>::from_wire(
            Span::new(input),
            parser_input1,
            parser_input2,
        ),
        expected_err,
    )
}

/// Serialize `input` and compare it with the `expected` octets, also checking
/// that [`WritablePdu::len`] agrees with what was written.
pub fn test_write<T: WritablePdu<E>, E>(input: &T, expected: &[u8]) -> Result<(), E> {
    let mut buf: Vec<u8> = vec![];
    let mut cursor = Cursor::new(&mut buf);
    input.write(&mut cursor)?;
    assert_eq!(
        buf, expected,
        "Serialized buffer is different the the expected one"
    );
    assert_eq!(
        input.len(),
        expected.len(),
        "Packet::len() is different the serialized buffer length"
    );
    Ok(())
}
