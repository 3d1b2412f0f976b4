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

use crate::dictionary::Dictionary;

mod value;

/// "peer.local"
pub(crate) const PEER_LOCAL: &[u8] = &[0x70, 0x65, 0x65, 0x72, 0x2e, 0x6c, 0x6f, 0x63, 0x61, 0x6c];

/// "local"
pub(crate) const LOCAL: &[u8] = &[0x6c, 0x6f, 0x63, 0x61, 0x6c];

pub(crate) fn base_dictionary() -> Dictionary {
    Dictionary::builder().with_base_protocol().build()
}
