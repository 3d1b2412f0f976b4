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

#[test]
fn macro_tests() {
    let test_cases = trybuild::TestCases::new();
    test_cases.pass("tests/trybuild/01-located-plain.rs");
    test_cases.pass("tests/trybuild/02-located-from-nom.rs");
    test_cases.pass("tests/trybuild/03-located-from-external.rs");
    test_cases.pass("tests/trybuild/04-located-from-located.rs");
    test_cases.pass("tests/trybuild/05-writing-from.rs");
}
