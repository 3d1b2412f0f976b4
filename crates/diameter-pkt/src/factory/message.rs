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

//! Requests and answers built from the command specifications.
//!
//! Requests take their P bit from the command specification, answers take it
//! from the request they answer. The T bit is never carried over to an
//! answer and answers never carry Destination-Host or Destination-Realm.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use crate::{
    application_id::{ApplicationId, ApplicationIdComposition},
    avp::{Avp, AvpValue},
    dictionary::{CommandApplication, CommandSpec, Dictionary},
    error::DiameterError,
    factory::AvpFactory,
    grouped::{GroupedAvp, ProxyInfo},
    iana::{BaseAvpCode, ResultCode},
    CommandFlags, DiameterHeader, DiameterMessage,
};

/// Identity of the local node and the application its messages belong to
///
/// ```yaml
/// origin_host: mme.example.net
/// origin_realm: example.net
/// application_id:
///   vendor_id: 10415
///   auth_application_id: 16777251
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageFactoryConfig {
    pub origin_host: String,
    pub origin_realm: String,
    pub application_id: ApplicationId,
}

/// State of a request captured when its answer is derived.
///
/// Changes made to the request after the snapshot is taken are not seen by
/// the answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSnapshot {
    command_code: u32,
    proxiable: bool,
    hop_by_hop_id: u32,
    end_to_end_id: u32,
    session_id: Option<Avp>,
    proxy_infos: Vec<Avp>,
}

impl RequestSnapshot {
    pub fn of(request: &DiameterMessage) -> Result<Self, DiameterError> {
        if !request.is_request() {
            return Err(DiameterError::NotARequest(request.command_code()));
        }
        Ok(Self {
            command_code: request.command_code(),
            proxiable: request.is_proxiable(),
            hop_by_hop_id: request.hop_by_hop_id(),
            end_to_end_id: request.end_to_end_id(),
            session_id: request
                .find_avp(BaseAvpCode::SessionId.into(), 0)
                .cloned(),
            proxy_infos: request
                .find_avps(ProxyInfo::CODE, ProxyInfo::VENDOR_ID)
                .cloned()
                .collect(),
        })
    }

    pub const fn command_code(&self) -> u32 {
        self.command_code
    }

    pub const fn proxiable(&self) -> bool {
        self.proxiable
    }

    pub const fn hop_by_hop_id(&self) -> u32 {
        self.hop_by_hop_id
    }

    pub const fn end_to_end_id(&self) -> u32 {
        self.end_to_end_id
    }
}

const fn is_application_id_avp(avp: &Avp) -> bool {
    avp.vendor_id() == 0
        && (avp.code() == BaseAvpCode::AuthApplicationId as u32
            || avp.code() == BaseAvpCode::AcctApplicationId as u32
            || avp.code() == BaseAvpCode::VendorSpecificApplicationId as u32)
}

const fn is_base(avp: &Avp, code: BaseAvpCode) -> bool {
    avp.vendor_id() == 0 && avp.code() == code as u32
}

/// End-to-end identifiers start with the low order 12 bits of the current
/// time in the high order bits and 20 random bits,
/// [RFC6733 Section 3](https://datatracker.ietf.org/doc/html/rfc6733#section-3)
fn initial_end_to_end_id() -> u32 {
    let now = chrono::Utc::now().timestamp() as u32;
    ((now & 0xfff) << 20) | (rand::random::<u32>() & 0x000f_ffff)
}

#[derive(Debug)]
pub struct MessageFactory {
    avp_factory: AvpFactory,
    config: MessageFactoryConfig,
    hop_by_hop_id: AtomicU32,
    end_to_end_id: AtomicU32,
    session_counter: AtomicU64,
}

impl MessageFactory {
    pub fn new(avp_factory: AvpFactory, config: MessageFactoryConfig) -> Self {
        Self {
            avp_factory,
            config,
            hop_by_hop_id: AtomicU32::new(rand::random()),
            end_to_end_id: AtomicU32::new(initial_end_to_end_id()),
            session_counter: AtomicU64::new(0),
        }
    }

    pub const fn avp_factory(&self) -> &AvpFactory {
        &self.avp_factory
    }

    pub const fn config(&self) -> &MessageFactoryConfig {
        &self.config
    }

    pub const fn application_id(&self) -> ApplicationId {
        self.config.application_id
    }

    /// Messages created afterwards, requests and answers alike, carry the new
    /// application id.
    pub fn set_application_id(&mut self, application_id: ApplicationId) {
        log::info!(
            "Switching Diameter application id from {:?} to {:?}",
            self.config.application_id,
            application_id
        );
        self.config.application_id = application_id;
    }

    pub fn next_hop_by_hop_id(&self) -> u32 {
        self.hop_by_hop_id.fetch_add(1, Ordering::Relaxed)
    }

    pub fn next_end_to_end_id(&self) -> u32 {
        self.end_to_end_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Session-Id value of the form `<origin host>;<high 32 bits>;<low 32
    /// bits>`, see [RFC6733 Section 8.8](https://datatracker.ietf.org/doc/html/rfc6733#section-8.8)
    pub fn next_session_id(&self) -> String {
        let counter = self.session_counter.fetch_add(1, Ordering::Relaxed);
        let high = chrono::Utc::now().timestamp() as u32;
        format!("{};{high};{counter}", self.config.origin_host)
    }

    pub fn create_session_id(&self) -> Result<Avp, DiameterError> {
        self.avp_factory.create_base(
            BaseAvpCode::SessionId,
            AvpValue::Utf8String(self.next_session_id()),
        )
    }

    fn dictionary(&self) -> Result<&Dictionary, DiameterError> {
        self.avp_factory.dictionary()
    }

    fn command(&self, command_code: u32) -> Result<&CommandSpec, DiameterError> {
        self.dictionary()?
            .command(command_code)
            .ok_or(DiameterError::UnknownCommand(command_code))
    }

    fn origin_avps(&self) -> Result<[Avp; 2], DiameterError> {
        Ok([
            self.avp_factory.create_base(
                BaseAvpCode::OriginHost,
                AvpValue::DiameterIdentity(self.config.origin_host.clone()),
            )?,
            self.avp_factory.create_base(
                BaseAvpCode::OriginRealm,
                AvpValue::DiameterIdentity(self.config.origin_realm.clone()),
            )?,
        ])
    }

    /// Build a request of a command known to the dictionary.
    ///
    /// The Session-Id given in `avps` is moved first. Origin-Host and
    /// Origin-Realm come from the configuration unless given in `avps`, and
    /// so do the application id AVPs of commands sent with the configured
    /// application.
    pub fn create_request(
        &self,
        command_code: u32,
        avps: Vec<Avp>,
    ) -> Result<DiameterMessage, DiameterError> {
        let spec = self.command(command_code)?;
        let (mut all, rest): (Vec<_>, Vec<_>) = avps
            .into_iter()
            .partition(|avp| is_base(avp, BaseAvpCode::SessionId));
        let [origin_host, origin_realm] = self.origin_avps()?;
        if !rest.iter().any(|avp| is_base(avp, BaseAvpCode::OriginHost)) {
            all.push(origin_host);
        }
        if !rest.iter().any(|avp| is_base(avp, BaseAvpCode::OriginRealm)) {
            all.push(origin_realm);
        }
        let configured = spec.application() == CommandApplication::Configured;
        if configured && !rest.iter().any(is_application_id_avp) {
            all.extend(self.config.application_id.to_avps(&self.avp_factory)?);
        }
        all.extend(rest);
        let application_id = if configured {
            ApplicationId::from_avps(&all)?.id()
        } else {
            0
        };
        let header = DiameterHeader::new(
            CommandFlags::new(true, spec.proxiable(), false, false),
            command_code,
            application_id,
            self.next_hop_by_hop_id(),
            self.next_end_to_end_id(),
        );
        let request = DiameterMessage::new(header, all)?;
        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "Created {} request with hop-by-hop id {} and end-to-end id {}",
                spec.request_abbreviation(),
                request.hop_by_hop_id(),
                request.end_to_end_id()
            );
        }
        Ok(request)
    }

    fn build_answer(
        &self,
        snapshot: &RequestSnapshot,
        result_code: Option<ResultCode>,
    ) -> Result<DiameterMessage, DiameterError> {
        let spec = self.command(snapshot.command_code)?;
        let mut avps = vec![];
        avps.extend(snapshot.session_id.clone());
        if let Some(result_code) = result_code {
            avps.push(self.avp_factory.create_base(
                BaseAvpCode::ResultCode,
                AvpValue::Unsigned32(result_code.into()),
            )?);
        }
        avps.extend(self.origin_avps()?);
        let application_id = match spec.application() {
            CommandApplication::Common => 0,
            CommandApplication::Configured => {
                avps.extend(self.config.application_id.to_avps(&self.avp_factory)?);
                self.config.application_id.id()
            }
        };
        avps.extend(snapshot.proxy_infos.iter().cloned());
        let error = result_code.is_some_and(|code| code.is_protocol_error());
        let header = DiameterHeader::new(
            CommandFlags::new(false, snapshot.proxiable, error, false),
            snapshot.command_code,
            application_id,
            snapshot.hop_by_hop_id,
            snapshot.end_to_end_id,
        );
        let answer = DiameterMessage::new(header, avps)?;
        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "Derived {} answer for hop-by-hop id {} with P bit {}",
                spec.answer_abbreviation(),
                answer.hop_by_hop_id(),
                answer.is_proxiable()
            );
        }
        Ok(answer)
    }

    /// Build the answer of the request captured by `snapshot`: R is cleared,
    /// P is the one of the request, T is always cleared and the
    /// application id is the one configured now.
    pub fn derive_answer(&self, snapshot: &RequestSnapshot) -> Result<DiameterMessage, DiameterError> {
        self.build_answer(snapshot, None)
    }

    pub fn create_answer(&self, request: &DiameterMessage) -> Result<DiameterMessage, DiameterError> {
        self.derive_answer(&RequestSnapshot::of(request)?)
    }

    /// Answer carrying a Result-Code, the E bit is set for protocol errors
    pub fn create_answer_with_result_code(
        &self,
        request: &DiameterMessage,
        result_code: ResultCode,
    ) -> Result<DiameterMessage, DiameterError> {
        self.build_answer(&RequestSnapshot::of(request)?, Some(result_code))
    }

    /// Check a message against its command specification: the mandatory AVPs
    /// are present and, for commands sent with an application id, the
    /// application id AVPs form a valid composition.
    pub fn validate(&self, message: &DiameterMessage) -> Result<(), DiameterError> {
        let spec = self.command(message.command_code())?;
        if let Some(missing) = spec.first_missing_avp(message.is_request(), message.avps()) {
            return Err(DiameterError::MissingMandatoryAvp {
                command_code: message.command_code(),
                avp_code: missing.code(),
                vendor_id: missing.vendor_id(),
            });
        }
        if spec.application() == CommandApplication::Configured {
            ApplicationIdComposition::of(message.avps()).signature()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application_id::ApplicationIdSignature,
        applications::{
            base::AuthSessionState,
            s6a::{RatType, S6a, S6aAvpCode, S6aCommandCode},
        },
        dictionary::DictionaryHandle,
        enumerated::EnumeratedAvp,
        grouped::VendorSpecificApplicationId,
        iana::BaseCommandCode,
        wire::deserializer::DiameterParsingContext,
        THREE_GPP_VENDOR_ID,
    };
    use rstest::rstest;

    const ULR: u32 = S6aCommandCode::UpdateLocation as u32;

    fn config() -> MessageFactoryConfig {
        MessageFactoryConfig {
            origin_host: "mme.example.net".to_string(),
            origin_realm: "example.net".to_string(),
            application_id: S6a::application_id(),
        }
    }

    fn factory() -> MessageFactory {
        let dictionary = Dictionary::builder()
            .with_base_protocol()
            .with_application(&S6a)
            .build();
        MessageFactory::new(
            AvpFactory::new(DictionaryHandle::loaded(dictionary)),
            config(),
        )
    }

    fn base(factory: &MessageFactory, code: BaseAvpCode, value: AvpValue) -> Avp {
        factory.avp_factory().create_base(code, value).unwrap()
    }

    fn destinations(factory: &MessageFactory) -> Vec<Avp> {
        vec![
            base(
                factory,
                BaseAvpCode::DestinationHost,
                AvpValue::DiameterIdentity("hss.example.net".to_string()),
            ),
            base(
                factory,
                BaseAvpCode::DestinationRealm,
                AvpValue::DiameterIdentity("example.net".to_string()),
            ),
        ]
    }

    fn update_location_request(factory: &MessageFactory) -> DiameterMessage {
        let avp_factory = factory.avp_factory();
        let mut avps = vec![
            factory.create_session_id().unwrap(),
            AuthSessionState::NoStateMaintained
                .to_avp(avp_factory)
                .unwrap(),
            base(
                factory,
                BaseAvpCode::UserName,
                AvpValue::Utf8String("001010123456789".to_string()),
            ),
            RatType::Eutran.to_avp(avp_factory).unwrap(),
            avp_factory
                .create_avp(
                    S6aAvpCode::UlrFlags as u32,
                    THREE_GPP_VENDOR_ID,
                    AvpValue::Unsigned32(0x22),
                )
                .unwrap(),
            avp_factory
                .create_avp(
                    S6aAvpCode::VisitedPlmnId as u32,
                    THREE_GPP_VENDOR_ID,
                    AvpValue::OctetString(vec![0x00, 0xf1, 0x10]),
                )
                .unwrap(),
        ];
        avps.extend(destinations(factory));
        factory.create_request(ULR, avps).unwrap()
    }

    #[test]
    fn test_request_proxiable_defaults() {
        let factory = factory();
        let cer = factory
            .create_request(BaseCommandCode::CapabilitiesExchange.into(), vec![])
            .unwrap();
        assert!(cer.is_request());
        assert!(!cer.is_proxiable());
        assert!(!cer.is_retransmitted());
        assert_eq!(cer.header().application_id(), 0);
        assert!(cer.avps().iter().all(|avp| !is_application_id_avp(avp)));

        let ulr = update_location_request(&factory);
        assert!(ulr.is_request());
        assert!(ulr.is_proxiable());
        assert!(!ulr.is_error());
        assert_eq!(ulr.header().application_id(), 16_777_251);
        assert_eq!(ulr.application_id(), Ok(S6a::application_id()));
        assert_eq!(ulr.avps()[0].code(), BaseAvpCode::SessionId as u32);
        assert_eq!(ulr.origin_host(), Some("mme.example.net"));
        assert_eq!(ulr.origin_realm(), Some("example.net"));
    }

    #[test]
    fn test_answer_follows_current_proxiable() {
        let factory = factory();
        let mut ulr = update_location_request(&factory);
        assert!(factory.create_answer(&ulr).unwrap().is_proxiable());

        ulr.set_proxiable(false);
        let answer = factory.create_answer(&ulr).unwrap();
        assert!(!answer.is_proxiable());

        ulr.set_proxiable(true);
        assert!(factory.create_answer(&ulr).unwrap().is_proxiable());

        let cer = factory
            .create_request(BaseCommandCode::CapabilitiesExchange.into(), vec![])
            .unwrap();
        assert!(!factory.create_answer(&cer).unwrap().is_proxiable());
    }

    #[test]
    fn test_snapshot_taken_at_derivation() {
        let factory = factory();
        let mut ulr = update_location_request(&factory);
        let snapshot = RequestSnapshot::of(&ulr).unwrap();
        ulr.set_proxiable(false);
        assert!(factory.derive_answer(&snapshot).unwrap().is_proxiable());
        assert!(!factory
            .derive_answer(&RequestSnapshot::of(&ulr).unwrap())
            .unwrap()
            .is_proxiable());
    }

    #[test]
    fn test_retransmitted_not_copied() {
        let factory = factory();
        let mut ulr = update_location_request(&factory);
        ulr.set_retransmitted(true);
        assert!(ulr.is_retransmitted());
        let answer = factory.create_answer(&ulr).unwrap();
        assert!(!answer.is_retransmitted());
        assert!(!answer.is_request());
    }

    #[test]
    fn test_answer_copies_identifiers() {
        let factory = factory();
        let ulr = update_location_request(&factory);
        let next = update_location_request(&factory);
        assert_eq!(next.hop_by_hop_id(), ulr.hop_by_hop_id().wrapping_add(1));
        assert_eq!(next.end_to_end_id(), ulr.end_to_end_id().wrapping_add(1));

        let answer = factory.create_answer(&ulr).unwrap();
        assert_eq!(answer.command_code(), ULR);
        assert_eq!(answer.hop_by_hop_id(), ulr.hop_by_hop_id());
        assert_eq!(answer.end_to_end_id(), ulr.end_to_end_id());
        assert_eq!(answer.session_id(), ulr.session_id());
        assert!(answer.session_id().is_some());
    }

    #[test]
    fn test_answer_copies_proxy_info() {
        let factory = factory();
        let mut ulr = update_location_request(&factory);
        let proxy_info = ProxyInfo::new("relay.example.net", vec![0xca, 0xfe]);
        ulr.add_avp(proxy_info.to_avp(factory.avp_factory()).unwrap())
            .unwrap();
        let answer = factory.create_answer(&ulr).unwrap();
        assert_eq!(answer.proxy_infos(), Ok(vec![proxy_info]));
    }

    #[rstest]
    #[case(BaseCommandCode::CapabilitiesExchange as u32)]
    #[case(BaseCommandCode::DeviceWatchdog as u32)]
    #[case(BaseCommandCode::DisconnectPeer as u32)]
    #[case(BaseCommandCode::AbortSession as u32)]
    #[case(BaseCommandCode::Accounting as u32)]
    #[case(BaseCommandCode::ReAuth as u32)]
    #[case(BaseCommandCode::SessionTermination as u32)]
    #[case(S6aCommandCode::UpdateLocation as u32)]
    #[case(S6aCommandCode::CancelLocation as u32)]
    #[case(S6aCommandCode::AuthenticationInformation as u32)]
    #[case(S6aCommandCode::InsertSubscriberData as u32)]
    #[case(S6aCommandCode::DeleteSubscriberData as u32)]
    #[case(S6aCommandCode::PurgeUe as u32)]
    #[case(S6aCommandCode::Reset as u32)]
    #[case(S6aCommandCode::Notify as u32)]
    fn test_no_destination_in_answer(#[case] command_code: u32) {
        let factory = factory();
        let request = factory
            .create_request(command_code, destinations(&factory))
            .unwrap();
        assert_eq!(request.destination_host(), Some("hss.example.net"));
        assert_eq!(request.destination_realm(), Some("example.net"));

        let mut answer = factory
            .create_answer_with_result_code(&request, ResultCode::Success)
            .unwrap();
        assert_eq!(answer.destination_host(), None);
        assert_eq!(answer.destination_realm(), None);
        for destination in destinations(&factory) {
            let code = destination.code();
            assert_eq!(
                answer.add_avp(destination),
                Err(DiameterError::AvpNotAllowedInAnswer(code))
            );
        }
        assert_eq!(answer.destination_host(), None);
    }

    #[test]
    fn test_application_id_switch() {
        let mut factory = factory();
        let vendor_ulr = update_location_request(&factory);
        let vsai = vendor_ulr
            .find_avp(BaseAvpCode::VendorSpecificApplicationId.into(), 0)
            .unwrap();
        assert_eq!(
            VendorSpecificApplicationId::from_avp(vsai),
            VendorSpecificApplicationId::new(THREE_GPP_VENDOR_ID, Some(16_777_251), None)
        );
        assert_eq!(vendor_ulr.auth_application_id(), None);

        factory.set_application_id(ApplicationId::auth(16_777_251));
        let plain_ulr = update_location_request(&factory);
        assert_eq!(plain_ulr.auth_application_id(), Some(16_777_251));
        assert!(plain_ulr
            .find_avp(BaseAvpCode::VendorSpecificApplicationId.into(), 0)
            .is_none());
        assert_eq!(
            ApplicationIdComposition::of(plain_ulr.avps()).signature(),
            Ok(ApplicationIdSignature::Auth)
        );

        // Answers use the application id configured when they are derived
        let answer = factory.create_answer(&vendor_ulr).unwrap();
        assert_eq!(answer.application_id(), Ok(ApplicationId::auth(16_777_251)));

        factory.set_application_id(ApplicationId::vendor_acct(THREE_GPP_VENDOR_ID, 23121));
        let acct_ulr = update_location_request(&factory);
        assert_eq!(acct_ulr.header().application_id(), 23121);
        assert_eq!(
            ApplicationIdComposition::of(acct_ulr.avps()).signature(),
            Ok(ApplicationIdSignature::VendorAcct)
        );
    }

    #[test]
    fn test_supplied_application_id_avps() {
        let factory = factory();
        let auth = base(&factory, BaseAvpCode::AuthApplicationId, AvpValue::Unsigned32(4));
        let request = factory.create_request(ULR, vec![auth.clone()]).unwrap();
        assert_eq!(request.header().application_id(), 4);
        assert_eq!(request.application_id(), Ok(ApplicationId::auth(4)));

        let acct = base(&factory, BaseAvpCode::AcctApplicationId, AvpValue::Unsigned32(3));
        assert_eq!(
            factory.create_request(ULR, vec![auth, acct]),
            Err(DiameterError::InvalidApplicationIdComposition(
                ApplicationIdComposition {
                    auth: 1,
                    acct: 1,
                    ..Default::default()
                }
            ))
        );
    }

    #[test]
    fn test_answer_with_result_code() {
        let factory = factory();
        let ulr = update_location_request(&factory);
        let success = factory
            .create_answer_with_result_code(&ulr, ResultCode::Success)
            .unwrap();
        assert_eq!(success.result_code(), Some(2001));
        assert!(!success.is_error());
        assert_eq!(
            factory.validate(&success),
            Err(DiameterError::MissingMandatoryAvp {
                command_code: ULR,
                avp_code: BaseAvpCode::AuthSessionState as u32,
                vendor_id: 0,
            })
        );

        let unable = factory
            .create_answer_with_result_code(&ulr, ResultCode::UnableToDeliver)
            .unwrap();
        assert_eq!(unable.result_code(), Some(3002));
        assert!(unable.is_error());
    }

    #[test]
    fn test_validate() {
        let factory = factory();
        let partial = factory
            .create_request(ULR, vec![factory.create_session_id().unwrap()])
            .unwrap();
        assert_eq!(
            factory.validate(&partial),
            Err(DiameterError::MissingMandatoryAvp {
                command_code: ULR,
                avp_code: BaseAvpCode::AuthSessionState as u32,
                vendor_id: 0,
            })
        );

        let ulr = update_location_request(&factory);
        assert_eq!(factory.validate(&ulr), Ok(()));
        let dictionary = factory.avp_factory().dictionary().unwrap();
        let wire = ulr.encode().unwrap();
        assert_eq!(
            DiameterMessage::decode(&wire, &DiameterParsingContext::strict(dictionary)),
            Ok(ulr)
        );
        let partial_wire = partial.encode().unwrap();
        assert_eq!(
            DiameterMessage::decode(&partial_wire, &DiameterParsingContext::strict(dictionary)),
            Err(DiameterError::MissingMandatoryAvp {
                command_code: ULR,
                avp_code: BaseAvpCode::AuthSessionState as u32,
                vendor_id: 0,
            })
        );
    }

    #[test]
    fn test_errors() {
        let factory = factory();
        assert_eq!(
            factory.create_request(999, vec![]),
            Err(DiameterError::UnknownCommand(999))
        );
        let ulr = update_location_request(&factory);
        let answer = factory.create_answer(&ulr).unwrap();
        assert_eq!(
            factory.create_answer(&answer),
            Err(DiameterError::NotARequest(ULR))
        );
    }

    #[test]
    fn test_session_ids_are_unique() {
        let factory = factory();
        let first = factory.next_session_id();
        let second = factory.next_session_id();
        assert!(first.starts_with("mme.example.net;"));
        assert_ne!(first, second);
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = r#"
origin_host: mme.example.net
origin_realm: example.net
application_id:
  vendor_id: 10415
  auth_application_id: 16777251
"#;
        let parsed: MessageFactoryConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed, config());

        let invalid = r#"
origin_host: mme.example.net
origin_realm: example.net
application_id:
  auth_application_id: 4
  acct_application_id: 3
"#;
        assert!(serde_yaml::from_str::<MessageFactoryConfig>(invalid).is_err());
    }
}
