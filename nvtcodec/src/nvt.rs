//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

use crate::parser::{self, Scan};
use crate::state::{NegotiationTable, OptionState};
use crate::{
    NvtCommand, NvtConfig, NvtError, NvtOption, NvtResult, NvtSequence, Transport, consts, encoder,
};
use bytes::{Bytes, BytesMut};
use tracing::{debug, info, trace, warn};

/// Negotiation engine for one terminal session.
///
/// `Nvt` owns the session's [`NegotiationTable`]. Inbound sequences update it
/// through [`Nvt::parse_sequence`]; outbound `send_*` calls update it and write
/// the matching bytes to a [`Transport`]. The state change is applied before the
/// write is attempted, so a failed write still leaves the table reflecting what
/// was meant to be sent.
///
/// An `Nvt` is not shared between sessions and does no locking of its own.
///
/// # Example
///
/// ```
/// use nvtix_nvtcodec::{Nvt, NvtOption};
///
/// let mut nvt = Nvt::new();
/// let mut wire: Vec<u8> = Vec::new();
///
/// // Peer said WILL ECHO, we agree with DO ECHO.
/// let seq = nvt.parse_sequence(b"\xFB\x01").unwrap();
/// nvt.send_ack(seq.command, seq.option, &mut wire).unwrap();
///
/// assert_eq!(wire, b"\xFF\xFD\x01");
/// assert!(nvt.enabled(NvtOption::Echo));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Nvt {
    table: NegotiationTable,
    config: NvtConfig,
}

impl Nvt {
    /// Creates an engine with an empty table and the default configuration.
    pub fn new() -> Nvt {
        Nvt::default()
    }

    /// Creates an engine with an empty table and the given configuration.
    pub fn with_config(config: NvtConfig) -> Nvt {
        Nvt {
            table: NegotiationTable::new(),
            config,
        }
    }

    /// Session configuration.
    pub fn config(&self) -> &NvtConfig {
        &self.config
    }

    /// Every option record negotiated so far.
    pub fn table(&self) -> &NegotiationTable {
        &self.table
    }

    /// Negotiation record for one option, if it has been negotiated.
    pub fn state(&self, option: NvtOption) -> Option<&OptionState> {
        self.table.get(option)
    }

    /// Forgets all negotiated state, as at session start.
    pub fn reset(&mut self) {
        debug!("Resetting negotiation table ({} options)", self.table.len());
        self.table.clear();
    }

    // #### Inbound ############################################################

    /// Decodes one sequence from `input`, which starts just after an IAC.
    ///
    /// On success the sequence is applied to the negotiation table: plain
    /// negotiations through [`Nvt::process_command`], subnegotiations through
    /// [`Nvt::process_option_value`]. Truncated or malformed input yields `None`
    /// and leaves the table untouched; the caller decides whether to resync or drop
    /// the connection.
    pub fn parse_sequence(&mut self, input: &[u8]) -> Option<NvtSequence> {
        let scan = parser::scan(input);
        self.accept(scan, input.len())
    }

    /// Decodes `<option> 0 <value> IAC SE`, where `input` starts just after `IAC SB`.
    ///
    /// A decoded value is stored through [`Nvt::process_option_value`]. The
    /// returned `length` counts the SB byte as well, matching
    /// [`Nvt::parse_sequence`].
    pub fn parse_sb(&mut self, input: &[u8]) -> Option<NvtSequence> {
        let scan = parser::scan_subnegotiation(input);
        self.accept(scan, input.len())
    }

    fn accept(&mut self, scan: Scan, available: usize) -> Option<NvtSequence> {
        match scan {
            Scan::Complete(sequence) => {
                trace!("Received {}", sequence);
                self.apply(&sequence);
                Some(sequence)
            }
            Scan::Incomplete => {
                debug!("Truncated IAC sequence ({} bytes)", available);
                None
            }
            Scan::Malformed { reason, .. } => {
                debug!("Malformed IAC sequence: {}", reason);
                None
            }
        }
    }

    /// Applies a decoded sequence to the negotiation table.
    pub(crate) fn apply(&mut self, sequence: &NvtSequence) {
        if sequence.is_subnegotiation() {
            self.process_option_value(sequence.option, &sequence.argument);
        } else {
            self.process_command(sequence.command, sequence.option, &sequence.argument);
        }
    }

    /// Updates the half-states of `option` for `command`.
    ///
    /// `WILL` and `DO` set their half; `WONT` and `DONT` both clear the WILL
    /// half. A non-empty `value` replaces the stored value.
    pub fn process_command(&mut self, command: NvtCommand, option: NvtOption, value: &[u8]) {
        self.table.process_command(command, option, value);
        trace!(
            "{} {} -> {:?}",
            command,
            option,
            self.table.get(option).map(|s| (s.will, s.do_))
        );
    }

    /// Stores a subnegotiated value for an option that has already been negotiated.
    ///
    /// Values for options with no record are dropped.
    pub fn process_option_value(&mut self, option: NvtOption, value: &[u8]) {
        if !self.table.process_option_value(option, value) {
            debug!("Dropping value for unnegotiated option {}", option);
        }
    }

    /// True if both sides agree to `option`.
    pub fn enabled(&self, option: NvtOption) -> bool {
        self.table.enabled(option)
    }

    /// Subnegotiated value of `option`, whether or not it is enabled.
    pub fn value(&self, option: NvtOption) -> Option<&Bytes> {
        self.table.value(option)
    }

    // #### Outbound ###########################################################

    /// Encodes `IAC <cmd> <option>` into `dst` and applies it to the table.
    pub(crate) fn prepare_command(
        &mut self,
        dst: &mut BytesMut,
        command: NvtCommand,
        option: NvtOption,
    ) {
        encoder::put_command(dst, command, option);
        self.process_command(command, option, b"");
        info!("Sending IAC Command: {}; for option: {}", command, option);
    }

    /// Encodes a subnegotiation query into `dst` and clears the stored value.
    pub(crate) fn prepare_negotiate(&mut self, dst: &mut BytesMut, option: NvtOption) {
        encoder::put_sub(dst, option);
        self.table.clear_value(option);
        debug!("Sending subnegotiation query for option: {}", option);
    }

    /// Encodes a valued subnegotiation into `dst` and records the value.
    pub(crate) fn prepare_negotiate_value(
        &mut self,
        dst: &mut BytesMut,
        option: NvtOption,
        argument: &[u8],
    ) {
        if argument.contains(&consts::IAC) {
            warn!(
                "Subnegotiation value for {} contains an unescaped IAC; peer will misparse it",
                option
            );
        }
        encoder::put_sub_value(dst, option, argument);
        self.process_option_value(option, argument);
        debug!("Sending subnegotiation value for option: {}", option);
    }

    /// Encodes the agreement to `received` into `dst`.
    pub(crate) fn prepare_ack(
        &mut self,
        dst: &mut BytesMut,
        received: NvtCommand,
        option: NvtOption,
    ) -> NvtResult<()> {
        let Some(reply) = received.acknowledge() else {
            warn!("Do not know how to ACK: {}", received);
            return Err(NvtError::NoAcknowledgement(received));
        };
        self.prepare_command(dst, reply, option);
        Ok(())
    }

    /// Encodes the refusal of `received` into `dst`.
    pub(crate) fn prepare_nak(
        &mut self,
        dst: &mut BytesMut,
        received: NvtCommand,
        option: NvtOption,
    ) -> NvtResult<()> {
        let Some(reply) = received.refuse() else {
            warn!("Do not know how to NAK: {}", received);
            return Err(NvtError::NoRefusal(received));
        };
        self.prepare_command(dst, reply, option);
        Ok(())
    }

    /// Sends `IAC <cmd> <option>`, updating the table to match.
    pub fn send_command<T: Transport + ?Sized>(
        &mut self,
        command: NvtCommand,
        option: NvtOption,
        transport: &mut T,
    ) -> NvtResult<()> {
        let mut dst = BytesMut::with_capacity(3);
        self.prepare_command(&mut dst, command, option);
        self.write(transport, &dst)
    }

    /// Sends a subnegotiation query for `option`, clearing any value stored for it.
    pub fn send_negotiate<T: Transport + ?Sized>(
        &mut self,
        option: NvtOption,
        transport: &mut T,
    ) -> NvtResult<()> {
        let mut dst = BytesMut::with_capacity(6);
        self.prepare_negotiate(&mut dst, option);
        self.write(transport, &dst)
    }

    /// Sends `argument` as the value of `option`, recording it if the option has been negotiated.
    ///
    /// The argument is written verbatim; a raw IAC inside it is not doubled.
    pub fn send_negotiate_value<T: Transport + ?Sized>(
        &mut self,
        option: NvtOption,
        argument: &[u8],
        transport: &mut T,
    ) -> NvtResult<()> {
        let mut dst = BytesMut::with_capacity(argument.len() + 6);
        self.prepare_negotiate_value(&mut dst, option, argument);
        self.write(transport, &dst)
    }

    /// Agrees to a received negotiation: `WILL` for `DO`/`DONT`, `DO` for `WILL`/`WONT`.
    ///
    /// Any other command fails with [`NvtError::NoAcknowledgement`] without writing.
    pub fn send_ack<T: Transport + ?Sized>(
        &mut self,
        received: NvtCommand,
        option: NvtOption,
        transport: &mut T,
    ) -> NvtResult<()> {
        let mut dst = BytesMut::with_capacity(3);
        self.prepare_ack(&mut dst, received, option)?;
        self.write(transport, &dst)
    }

    /// Refuses a received negotiation: `WONT` for `DO`/`DONT`, `DONT` for `WILL`/`WONT`.
    ///
    /// Any other command fails with [`NvtError::NoRefusal`] without writing.
    pub fn send_nak<T: Transport + ?Sized>(
        &mut self,
        received: NvtCommand,
        option: NvtOption,
        transport: &mut T,
    ) -> NvtResult<()> {
        let mut dst = BytesMut::with_capacity(3);
        self.prepare_nak(&mut dst, received, option)?;
        self.write(transport, &dst)
    }

    /// Sends the configured opening negotiations, stopping at the first failure.
    pub fn send_greeting<T: Transport + ?Sized>(&mut self, transport: &mut T) -> NvtResult<()> {
        let greeting = self.config.greeting.clone();
        for (command, option) in greeting {
            self.send_command(command, option, transport)?;
        }
        Ok(())
    }

    fn write<T: Transport + ?Sized>(&self, transport: &mut T, data: &[u8]) -> NvtResult<()> {
        let written = transport.write(data, self.config.flush)?;
        if written == data.len() {
            Ok(())
        } else {
            Err(NvtError::ShortWrite {
                expected: data.len(),
                written,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use tracing_test::traced_test;

    /// Accepts at most `limit` bytes per write.
    struct Stingy {
        data: Vec<u8>,
        limit: usize,
    }

    impl Transport for Stingy {
        fn write(&mut self, data: &[u8], _flush: bool) -> io::Result<usize> {
            let n = data.len().min(self.limit);
            self.data.extend_from_slice(&data[..n]);
            Ok(n)
        }
    }

    struct Broken;

    impl Transport for Broken {
        fn write(&mut self, _data: &[u8], _flush: bool) -> io::Result<usize> {
            Err(io::ErrorKind::ConnectionReset.into())
        }
    }

    #[test]
    fn test_parse_will_echo() {
        let mut nvt = Nvt::new();
        let seq = nvt.parse_sequence(b"\xFB\x01").unwrap();
        assert_eq!(seq.command, NvtCommand::Will);
        assert_eq!(seq.option, NvtOption::Echo);
        assert_eq!(seq.length, 2);
        assert!(nvt.state(NvtOption::Echo).unwrap().will);
    }

    #[test]
    fn test_enable_smoke() {
        let mut nvt = Nvt::new();
        nvt.process_command(NvtCommand::Will, NvtOption::Echo, b"");
        assert!(!nvt.enabled(NvtOption::Echo));
        nvt.process_command(NvtCommand::Do, NvtOption::Echo, b"");
        assert!(nvt.enabled(NvtOption::Echo));
        nvt.process_command(NvtCommand::Dont, NvtOption::Echo, b"");
        assert!(!nvt.enabled(NvtOption::Echo));
    }

    #[test]
    fn test_parse_failure_leaves_table_untouched() {
        let mut nvt = Nvt::new();
        assert_eq!(nvt.parse_sequence(b"\xFB\x18"), None);
        assert_eq!(nvt.parse_sequence(b"\xFB"), None);
        assert_eq!(nvt.parse_sequence(b""), None);
        assert_eq!(nvt.parse_sequence(b"\xFA\x17\x01\xFF\xF0"), None);
        assert!(nvt.table().is_empty());
    }

    #[test]
    fn test_parse_subnegotiation_updates_known_option() {
        let mut nvt = Nvt::new();
        nvt.process_command(NvtCommand::Do, NvtOption::SendLocation, b"");

        let seq = nvt.parse_sequence(b"\xFA\x17\x00Lab 3\xFF\xF0").unwrap();
        assert_eq!(seq.command, NvtCommand::Subnegotiation);
        assert_eq!(&seq.argument[..], b"Lab 3");
        assert_eq!(seq.length, 10);
        assert_eq!(nvt.value(NvtOption::SendLocation).unwrap(), &b"Lab 3"[..]);
    }

    #[test]
    fn test_parse_subnegotiation_drops_unnegotiated_value() {
        let mut nvt = Nvt::new();
        let seq = nvt.parse_sequence(b"\xFA\x17\x00Lab 3\xFF\xF0").unwrap();
        assert_eq!(&seq.argument[..], b"Lab 3");
        assert_eq!(nvt.value(NvtOption::SendLocation), None);
    }

    #[test]
    fn test_send_command() {
        let mut nvt = Nvt::new();
        let mut wire: Vec<u8> = Vec::new();
        nvt.send_command(NvtCommand::Will, NvtOption::SuppressGoAhead, &mut wire)
            .unwrap();
        assert_eq!(wire, [consts::IAC, consts::WILL, consts::option::SGA]);
        assert!(nvt.state(NvtOption::SuppressGoAhead).unwrap().will);
    }

    #[test]
    fn test_send_ack_and_nak() {
        let mut nvt = Nvt::new();
        let mut wire: Vec<u8> = Vec::new();
        nvt.send_ack(NvtCommand::Do, NvtOption::Echo, &mut wire).unwrap();
        nvt.send_ack(NvtCommand::Will, NvtOption::Echo, &mut wire).unwrap();
        nvt.send_nak(NvtCommand::Do, NvtOption::Linemode, &mut wire).unwrap();
        nvt.send_nak(NvtCommand::Will, NvtOption::Linemode, &mut wire).unwrap();
        assert_eq!(
            wire,
            [
                0xFF, 0xFB, 0x01, // WILL ECHO
                0xFF, 0xFD, 0x01, // DO ECHO
                0xFF, 0xFC, 0x22, // WONT LINEMODE
                0xFF, 0xFE, 0x22, // DONT LINEMODE
            ]
        );
        assert!(nvt.enabled(NvtOption::Echo));
        assert!(!nvt.enabled(NvtOption::Linemode));
    }

    #[test]
    fn test_send_ack_unmappable_writes_nothing() {
        let mut nvt = Nvt::new();
        let mut wire: Vec<u8> = Vec::new();
        let err = nvt
            .send_ack(NvtCommand::Subnegotiation, NvtOption::Echo, &mut wire)
            .unwrap_err();
        assert!(matches!(
            err,
            NvtError::NoAcknowledgement(NvtCommand::Subnegotiation)
        ));
        let err = nvt
            .send_nak(NvtCommand::GoAhead, NvtOption::Echo, &mut wire)
            .unwrap_err();
        assert!(matches!(err, NvtError::NoRefusal(NvtCommand::GoAhead)));
        assert!(wire.is_empty());
        assert!(nvt.table().is_empty());
    }

    #[test]
    fn test_send_negotiate_clears_value() {
        let mut nvt = Nvt::new();
        let mut wire: Vec<u8> = Vec::new();
        nvt.process_command(NvtCommand::Do, NvtOption::SendLocation, b"old");
        nvt.send_negotiate(NvtOption::SendLocation, &mut wire).unwrap();
        assert_eq!(wire, [0xFF, 0xFA, 23, 0x01, 0xFF, 0xF0]);
        assert_eq!(nvt.value(NvtOption::SendLocation).unwrap(), &b""[..]);
    }

    #[test]
    fn test_send_negotiate_without_record_creates_none() {
        let mut nvt = Nvt::new();
        let mut wire: Vec<u8> = Vec::new();
        nvt.send_negotiate(NvtOption::Echo, &mut wire).unwrap();
        assert_eq!(nvt.state(NvtOption::Echo), None);
    }

    #[test]
    fn test_send_negotiate_value() {
        let mut nvt = Nvt::new();
        let mut wire: Vec<u8> = Vec::new();
        nvt.process_command(NvtCommand::Will, NvtOption::SendLocation, b"");
        nvt.send_negotiate_value(NvtOption::SendLocation, b"Porch", &mut wire)
            .unwrap();
        assert_eq!(wire, b"\xFF\xFA\x17\x00Porch\xFF\xF0");
        assert_eq!(nvt.value(NvtOption::SendLocation).unwrap(), &b"Porch"[..]);
    }

    #[test]
    fn test_short_write_fails_after_state_update() {
        let mut nvt = Nvt::new();
        let mut transport = Stingy {
            data: Vec::new(),
            limit: 2,
        };
        let err = nvt
            .send_command(NvtCommand::Do, NvtOption::Binary, &mut transport)
            .unwrap_err();
        assert!(matches!(
            err,
            NvtError::ShortWrite {
                expected: 3,
                written: 2
            }
        ));
        assert!(nvt.state(NvtOption::Binary).unwrap().do_);
    }

    #[test]
    fn test_io_error_propagates() {
        let mut nvt = Nvt::new();
        let err = nvt
            .send_negotiate(NvtOption::Echo, &mut Broken)
            .unwrap_err();
        assert!(matches!(err, NvtError::Io(_)));
        assert!(err.is_transport_error());
    }

    #[test]
    fn test_send_greeting() {
        let mut nvt = Nvt::new();
        let mut wire: Vec<u8> = Vec::new();
        nvt.send_greeting(&mut wire).unwrap();
        assert_eq!(
            wire,
            [
                0xFF, 0xFB, 0x01, // WILL ECHO
                0xFF, 0xFB, 0x03, // WILL SUPPRESS_GA
                0xFF, 0xFD, 0x00, // DO BINARY
                0xFF, 0xFB, 0x00, // WILL BINARY
            ]
        );
        assert!(nvt.enabled(NvtOption::Binary));
        assert!(!nvt.enabled(NvtOption::Echo));
    }

    #[test]
    fn test_send_greeting_stops_at_first_failure() {
        let mut nvt = Nvt::new();
        let mut transport = Stingy {
            data: Vec::new(),
            limit: 1,
        };
        assert!(nvt.send_greeting(&mut transport).is_err());
        assert_eq!(transport.data, [0xFF]);
        assert_eq!(nvt.table().len(), 1);
    }

    #[test]
    fn test_parse_sb() {
        let mut nvt = Nvt::new();
        nvt.process_command(NvtCommand::Will, NvtOption::SendLocation, b"");
        let seq = nvt.parse_sb(b"\x17\x00Attic\xFF\xF0").unwrap();
        assert_eq!(seq.length, 10);
        assert_eq!(nvt.value(NvtOption::SendLocation).unwrap(), &b"Attic"[..]);

        assert_eq!(nvt.parse_sb(b"\x17\x01\xFF\xF0"), None);
        assert_eq!(nvt.parse_sb(b"\x17\x00Att"), None);
        assert_eq!(nvt.value(NvtOption::SendLocation).unwrap(), &b"Attic"[..]);
    }

    #[test]
    fn test_reset() {
        let mut nvt = Nvt::new();
        nvt.process_command(NvtCommand::Will, NvtOption::Echo, b"");
        nvt.reset();
        assert!(nvt.table().is_empty());
    }

    #[test]
    fn test_dyn_transport() {
        let mut nvt = Nvt::new();
        let mut wire: Vec<u8> = Vec::new();
        let transport: &mut dyn Transport = &mut wire;
        nvt.send_command(NvtCommand::Wont, NvtOption::Echo, transport)
            .unwrap();
        assert_eq!(wire, [0xFF, 0xFC, 0x01]);
    }

    #[test]
    #[traced_test]
    fn test_unmappable_ack_is_logged() {
        let mut nvt = Nvt::new();
        let mut wire: Vec<u8> = Vec::new();
        assert!(nvt
            .send_ack(NvtCommand::NoOperation, NvtOption::Echo, &mut wire)
            .is_err());
        assert!(logs_contain("Do not know how to ACK: NOP"));
    }

    #[test]
    #[traced_test]
    fn test_sent_command_is_logged() {
        let mut nvt = Nvt::new();
        let mut wire: Vec<u8> = Vec::new();
        nvt.send_command(NvtCommand::Will, NvtOption::SuppressGoAhead, &mut wire)
            .unwrap();
        assert!(logs_contain(
            "Sending IAC Command: WILL; for option: SUPPRESS_GA"
        ));
    }

    #[test]
    #[traced_test]
    fn test_unescaped_iac_value_is_logged() {
        let mut nvt = Nvt::new();
        let mut wire: Vec<u8> = Vec::new();
        nvt.send_negotiate_value(NvtOption::SendLocation, &[b'a', 0xFF], &mut wire)
            .unwrap();
        assert!(logs_contain("unescaped IAC"));
    }
}
