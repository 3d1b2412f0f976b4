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

//! AVP and command dictionary.
//!
//! The dictionary maps an `(AVP code, vendor id)` pair to the data type and
//! default flags of the AVP, and a command code to its [`CommandSpec`]. It is
//! built once with a [`DictionaryBuilder`], published through a
//! [`DictionaryHandle`] and read concurrently afterwards.

use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, OnceLock},
};
use strum_macros::Display;

use crate::{
    applications::base::BaseProtocol, avp::Avp, avp::AvpFlags, enumerated::EnumeratedAvp,
    error::DiameterError,
};

/// Data types of [RFC6733 Section 4.2 and 4.3](https://datatracker.ietf.org/doc/html/rfc6733#section-4.2)
#[derive(Display, Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum AvpDataType {
    OctetString,
    Integer32,
    Integer64,
    Unsigned32,
    Unsigned64,
    Float32,
    Float64,
    Grouped,
    Address,
    Time,
    #[strum(serialize = "UTF8String")]
    #[serde(rename = "UTF8String")]
    Utf8String,
    DiameterIdentity,
    #[strum(serialize = "DiameterURI")]
    #[serde(rename = "DiameterURI")]
    DiameterUri,
    Enumerated,
}

impl AvpDataType {
    /// Payload length for the fixed size types
    pub const fn fixed_length(&self) -> Option<usize> {
        match self {
            Self::Integer32 | Self::Unsigned32 | Self::Float32 | Self::Time | Self::Enumerated => {
                Some(4)
            }
            Self::Integer64 | Self::Unsigned64 | Self::Float64 => Some(8),
            Self::OctetString
            | Self::Grouped
            | Self::Address
            | Self::Utf8String
            | Self::DiameterIdentity
            | Self::DiameterUri => None,
        }
    }
}

/// Identifies an AVP definition, a vendor id of zero is used for the AVPs
/// defined by the IETF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AvpKey {
    code: u32,
    vendor_id: u32,
}

impl AvpKey {
    pub const fn new(code: u32, vendor_id: u32) -> Self {
        Self { code, vendor_id }
    }

    /// AVP that is not vendor specific
    pub const fn base(code: u32) -> Self {
        Self { code, vendor_id: 0 }
    }

    pub const fn code(&self) -> u32 {
        self.code
    }

    pub const fn vendor_id(&self) -> u32 {
        self.vendor_id
    }
}

/// Entry of the dictionary. Usually declared in code by the application
/// modules, but it can be deserialized from any serde source, e.g.:
///
/// ```yaml
/// - code: 1492
///   vendor_id: 10415
///   name: IMS-Voice-Over-PS-Sessions-Supported
///   data_type: Enumerated
///   enumerated:
///     0: NOT_SUPPORTED
///     1: SUPPORTED
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvpDefinition {
    code: u32,
    #[serde(default)]
    vendor_id: u32,
    name: String,
    data_type: AvpDataType,
    #[serde(default)]
    mandatory: bool,
    #[serde(default)]
    protected: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    enumerated: BTreeMap<i32, String>,
}

impl AvpDefinition {
    pub fn new(
        code: u32,
        vendor_id: u32,
        name: impl Into<String>,
        data_type: AvpDataType,
        mandatory: bool,
        protected: bool,
    ) -> Self {
        Self {
            code,
            vendor_id,
            name: name.into(),
            data_type,
            mandatory,
            protected,
            enumerated: BTreeMap::new(),
        }
    }

    /// Declare the allowed values of an Enumerated AVP from its typed view
    pub fn with_enumerated<E: EnumeratedAvp>(mut self) -> Self {
        self.enumerated = E::declared_values();
        self
    }

    pub fn with_enumerated_values(
        mut self,
        values: impl IntoIterator<Item = (i32, String)>,
    ) -> Self {
        self.enumerated = values.into_iter().collect();
        self
    }

    pub const fn code(&self) -> u32 {
        self.code
    }

    pub const fn vendor_id(&self) -> u32 {
        self.vendor_id
    }

    pub const fn key(&self) -> AvpKey {
        AvpKey::new(self.code, self.vendor_id)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn data_type(&self) -> AvpDataType {
        self.data_type
    }

    pub const fn default_flags(&self) -> AvpFlags {
        AvpFlags::new(self.mandatory, self.protected)
    }

    pub const fn enumerated(&self) -> &BTreeMap<i32, String> {
        &self.enumerated
    }

    /// An Enumerated AVP without declared values accepts any value
    pub fn allows_enumerated_value(&self, value: i32) -> bool {
        self.enumerated.is_empty() || self.enumerated.contains_key(&value)
    }
}

/// Which Application-Id a command is sent with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandApplication {
    /// Base protocol messages sent with Application-Id zero and without any
    /// Application-Id AVP, e.g. CER, DWR and DPR.
    Common,
    /// The Application-Id configured in the message factory at the time the
    /// message is created.
    Configured,
}

/// Command definition: code, default P bit and the AVPs a request or answer
/// must carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    code: u32,
    name: String,
    request_abbreviation: String,
    answer_abbreviation: String,
    proxiable: bool,
    application: CommandApplication,
    request_mandatory: Vec<AvpKey>,
    answer_mandatory: Vec<AvpKey>,
}

impl CommandSpec {
    pub fn new(
        code: u32,
        name: impl Into<String>,
        request_abbreviation: impl Into<String>,
        answer_abbreviation: impl Into<String>,
        proxiable: bool,
        application: CommandApplication,
    ) -> Self {
        Self {
            code,
            name: name.into(),
            request_abbreviation: request_abbreviation.into(),
            answer_abbreviation: answer_abbreviation.into(),
            proxiable,
            application,
            request_mandatory: vec![],
            answer_mandatory: vec![],
        }
    }

    pub fn with_request_mandatory(mut self, avps: impl IntoIterator<Item = AvpKey>) -> Self {
        self.request_mandatory = avps.into_iter().collect();
        self
    }

    pub fn with_answer_mandatory(mut self, avps: impl IntoIterator<Item = AvpKey>) -> Self {
        self.answer_mandatory = avps.into_iter().collect();
        self
    }

    pub const fn code(&self) -> u32 {
        self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn request_abbreviation(&self) -> &str {
        &self.request_abbreviation
    }

    pub fn answer_abbreviation(&self) -> &str {
        &self.answer_abbreviation
    }

    /// Default P bit of requests of this command
    pub const fn proxiable(&self) -> bool {
        self.proxiable
    }

    pub const fn application(&self) -> CommandApplication {
        self.application
    }

    pub fn mandatory_avps(&self, request: bool) -> &[AvpKey] {
        if request {
            &self.request_mandatory
        } else {
            &self.answer_mandatory
        }
    }

    /// First mandatory AVP missing from the top-level `avps`
    pub fn first_missing_avp(&self, request: bool, avps: &[Avp]) -> Option<AvpKey> {
        self.mandatory_avps(request)
            .iter()
            .find(|key| !avps.iter().any(|avp| avp.key() == **key))
            .copied()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    avps: HashMap<AvpKey, AvpDefinition>,
    names: HashMap<(String, u32), AvpKey>,
    commands: HashMap<u32, CommandSpec>,
}

impl Dictionary {
    pub fn builder() -> DictionaryBuilder {
        DictionaryBuilder::new()
    }

    pub fn lookup(&self, code: u32, vendor_id: u32) -> Option<&AvpDefinition> {
        self.avps.get(&AvpKey::new(code, vendor_id))
    }

    /// Names are only unique per vendor, e.g. 3GPP defines its own
    /// Termination-Cause.
    pub fn lookup_by_name(&self, name: &str, vendor_id: u32) -> Option<&AvpDefinition> {
        self.names
            .get(&(name.to_string(), vendor_id))
            .and_then(|key| self.avps.get(key))
    }

    pub fn command(&self, code: u32) -> Option<&CommandSpec> {
        self.commands.get(&code)
    }

    pub fn avp_count(&self) -> usize {
        self.avps.len()
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }
}

/// A Diameter application contributes AVP definitions and commands to the
/// dictionary.
pub trait DiameterApplication {
    fn name(&self) -> &'static str;

    fn avp_definitions(&self) -> Vec<AvpDefinition>;

    fn command_specs(&self) -> Vec<CommandSpec>;
}

#[derive(Debug, Default)]
pub struct DictionaryBuilder {
    dictionary: Dictionary,
}

impl DictionaryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition, replacing any previous one with the same key
    pub fn with_avp(mut self, definition: AvpDefinition) -> Self {
        let key = definition.key();
        let name = (definition.name().to_string(), key.vendor_id());
        if let Some(previous) = self.dictionary.avps.insert(key, definition) {
            log::debug!(
                "Replaced dictionary definition of AVP {} ({}, vendor {})",
                previous.name(),
                key.code(),
                key.vendor_id()
            );
            let previous_name = (previous.name().to_string(), key.vendor_id());
            if previous_name != name && self.dictionary.names.get(&previous_name) == Some(&key) {
                self.dictionary.names.remove(&previous_name);
            }
        }
        self.dictionary.names.insert(name, key);
        self
    }

    pub fn with_avps(self, definitions: impl IntoIterator<Item = AvpDefinition>) -> Self {
        definitions
            .into_iter()
            .fold(self, |builder, definition| builder.with_avp(definition))
    }

    pub fn with_command(mut self, spec: CommandSpec) -> Self {
        if let Some(previous) = self.dictionary.commands.insert(spec.code(), spec) {
            log::debug!(
                "Replaced dictionary definition of command {} ({})",
                previous.name(),
                previous.code()
            );
        }
        self
    }

    pub fn with_application<A: DiameterApplication + ?Sized>(self, application: &A) -> Self {
        log::debug!("Registering Diameter application {}", application.name());
        let builder = self.with_avps(application.avp_definitions());
        application
            .command_specs()
            .into_iter()
            .fold(builder, |builder, spec| builder.with_command(spec))
    }

    /// Shorthand for registering the base protocol of RFC6733
    pub fn with_base_protocol(self) -> Self {
        self.with_application(&BaseProtocol)
    }

    pub fn build(self) -> Dictionary {
        self.dictionary
    }
}

/// Shared, load once handle to a [`Dictionary`].
///
/// The handle is created empty, loaded exactly once and then cloned into the
/// factories and parsing contexts that need it. Any use before loading fails
/// with [`DiameterError::DictionaryNotInitialized`].
#[derive(Debug, Clone, Default)]
pub struct DictionaryHandle {
    inner: Arc<OnceLock<Dictionary>>,
}

impl DictionaryHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handle and load it right away
    pub fn loaded(dictionary: Dictionary) -> Self {
        Self {
            inner: Arc::new(OnceLock::from(dictionary)),
        }
    }

    /// Publish the dictionary to every clone of this handle. Blocks while
    /// another thread is loading it.
    pub fn load(&self, dictionary: Dictionary) -> Result<(), DiameterError> {
        let avp_count = dictionary.avp_count();
        let command_count = dictionary.command_count();
        match self.inner.set(dictionary) {
            Ok(()) => {
                log::info!(
                    "Loaded Diameter dictionary with {avp_count} AVPs and {command_count} commands"
                );
                Ok(())
            }
            Err(_) => Err(DiameterError::DictionaryAlreadyInitialized),
        }
    }

    pub fn get(&self) -> Result<&Dictionary, DiameterError> {
        self.inner
            .get()
            .ok_or(DiameterError::DictionaryNotInitialized)
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{iana::BaseAvpCode, THREE_GPP_VENDOR_ID};

    #[test]
    fn test_handle_before_load() {
        let handle = DictionaryHandle::new();
        assert!(!handle.is_loaded());
        assert_eq!(
            handle.get().map(|_| ()),
            Err(DiameterError::DictionaryNotInitialized)
        );
    }

    #[test]
    fn test_handle_loads_once() {
        let handle = DictionaryHandle::new();
        let shared = handle.clone();
        assert_eq!(handle.load(Dictionary::builder().with_base_protocol().build()), Ok(()));
        assert!(shared.is_loaded());
        assert_eq!(
            shared.load(Dictionary::default()),
            Err(DiameterError::DictionaryAlreadyInitialized)
        );
        let session_id = shared
            .get()
            .unwrap()
            .lookup(BaseAvpCode::SessionId.into(), 0)
            .unwrap();
        assert_eq!(session_id.name(), "Session-Id");
        assert_eq!(session_id.data_type(), AvpDataType::Utf8String);
        assert!(session_id.default_flags().mandatory());
    }

    #[test]
    fn test_concurrent_lookups() {
        let handle = DictionaryHandle::loaded(Dictionary::builder().with_base_protocol().build());
        let threads = (0..4)
            .map(|_| {
                let handle = handle.clone();
                std::thread::spawn(move || {
                    handle
                        .get()
                        .map(|dictionary| dictionary.lookup(264, 0).is_some())
                })
            })
            .collect::<Vec<_>>();
        for thread in threads {
            assert_eq!(thread.join().unwrap(), Ok(true));
        }
    }

    #[test]
    fn test_lookup_by_name_per_vendor() {
        let dictionary = Dictionary::builder()
            .with_avp(AvpDefinition::new(
                295,
                0,
                "Termination-Cause",
                AvpDataType::Enumerated,
                true,
                false,
            ))
            .with_avp(AvpDefinition::new(
                2548,
                THREE_GPP_VENDOR_ID,
                "Termination-Cause",
                AvpDataType::Enumerated,
                true,
                false,
            ))
            .build();
        assert_eq!(
            dictionary
                .lookup_by_name("Termination-Cause", 0)
                .map(AvpDefinition::code),
            Some(295)
        );
        assert_eq!(
            dictionary
                .lookup_by_name("Termination-Cause", THREE_GPP_VENDOR_ID)
                .map(AvpDefinition::code),
            Some(2548)
        );
    }

    #[test]
    fn test_replaced_definition_drops_old_name() {
        let dictionary = Dictionary::builder()
            .with_avp(AvpDefinition::new(
                9999,
                THREE_GPP_VENDOR_ID,
                "Old-Name",
                AvpDataType::Unsigned32,
                true,
                false,
            ))
            .with_avp(AvpDefinition::new(
                9999,
                THREE_GPP_VENDOR_ID,
                "New-Name",
                AvpDataType::OctetString,
                false,
                false,
            ))
            .build();
        assert_eq!(dictionary.avp_count(), 1);
        assert!(dictionary
            .lookup_by_name("Old-Name", THREE_GPP_VENDOR_ID)
            .is_none());
        assert_eq!(
            dictionary
                .lookup_by_name("New-Name", THREE_GPP_VENDOR_ID)
                .map(AvpDefinition::data_type),
            Some(AvpDataType::OctetString)
        );
    }

    #[test]
    fn test_definitions_from_yaml() {
        let yaml = r#"
- code: 1492
  vendor_id: 10415
  name: IMS-Voice-Over-PS-Sessions-Supported
  data_type: Enumerated
  enumerated:
    0: NOT_SUPPORTED
    1: SUPPORTED
- code: 263
  name: Session-Id
  data_type: UTF8String
  mandatory: true
"#;
        let definitions: Vec<AvpDefinition> = serde_yaml::from_str(yaml).unwrap();
        let dictionary = Dictionary::builder().with_avps(definitions).build();
        let ims = dictionary.lookup(1492, THREE_GPP_VENDOR_ID).unwrap();
        assert_eq!(ims.data_type(), AvpDataType::Enumerated);
        assert!(!ims.default_flags().mandatory());
        assert!(ims.allows_enumerated_value(1));
        assert!(!ims.allows_enumerated_value(2));
        let session_id = dictionary.lookup(263, 0).unwrap();
        assert_eq!(session_id.data_type(), AvpDataType::Utf8String);
        assert!(session_id.default_flags().mandatory());
    }

    #[test]
    fn test_data_type_names() {
        assert_eq!(AvpDataType::Utf8String.to_string(), "UTF8String");
        assert_eq!(AvpDataType::DiameterUri.to_string(), "DiameterURI");
        assert_eq!(
            serde_json::to_string(&AvpDataType::DiameterIdentity).unwrap(),
            "\"DiameterIdentity\""
        );
    }
}
