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
use crate::{Nvt, NvtCommand, NvtConfig, NvtError, NvtOption, NvtSequence, consts};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::{trace, warn};

/// Inbound unit produced by [`NvtCodec`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NvtEvent {
    /// Ordinary data byte, including an unescaped `IAC IAC`
    Data(u8),
    /// Two byte command such as `NOP` or `AYT`
    Command(NvtCommand),
    /// Negotiation or subnegotiation, already applied to the session state
    Sequence(NvtSequence),
}

/// Outbound unit accepted by [`NvtCodec`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NvtFrame {
    /// Data byte, doubled if it is IAC
    Data(u8),
    /// `IAC <cmd> <option>`
    Command(NvtCommand, NvtOption),
    /// Subnegotiation query
    Negotiate(NvtOption),
    /// Subnegotiation carrying a value
    NegotiateValue(NvtOption, Bytes),
    /// Agreement to a received command
    Ack(NvtCommand, NvtOption),
    /// Refusal of a received command
    Nak(NvtCommand, NvtOption),
}

/// Stream codec separating data from IAC sequences on a Telnet channel.
///
/// Decoded negotiations are applied to the wrapped [`Nvt`] before they are
/// returned, and encoded frames update it exactly as the `send_*` methods do.
/// Incomplete sequences stay buffered until more bytes arrive; malformed ones
/// are discarded and decoding resumes after them.
///
/// ```
/// use bytes::BytesMut;
/// use nvtix_nvtcodec::{NvtCodec, NvtEvent, NvtOption};
/// use tokio_util::codec::Decoder;
///
/// let mut codec = NvtCodec::new();
/// let mut input = BytesMut::from(&b"a\xFF\xFD\x03"[..]);
/// assert_eq!(codec.decode(&mut input).unwrap(), Some(NvtEvent::Data(b'a')));
/// assert!(matches!(codec.decode(&mut input).unwrap(), Some(NvtEvent::Sequence(_))));
/// assert!(codec.nvt().state(NvtOption::SuppressGoAhead).unwrap().do_);
/// ```
#[derive(Clone, Debug, Default)]
pub struct NvtCodec {
    nvt: Nvt,
}

impl NvtCodec {
    /// Creates a codec with a fresh session.
    pub fn new() -> NvtCodec {
        NvtCodec::default()
    }

    /// Creates a codec with a fresh session using `config`.
    pub fn with_config(config: NvtConfig) -> NvtCodec {
        NvtCodec {
            nvt: Nvt::with_config(config),
        }
    }

    /// Wraps an existing session.
    pub fn from_nvt(nvt: Nvt) -> NvtCodec {
        NvtCodec { nvt }
    }

    /// Session state.
    pub fn nvt(&self) -> &Nvt {
        &self.nvt
    }

    /// Mutable session state.
    pub fn nvt_mut(&mut self) -> &mut Nvt {
        &mut self.nvt
    }

    /// True if both sides agree to `option`.
    pub fn enabled(&self, option: NvtOption) -> bool {
        self.nvt.enabled(option)
    }
}

impl Decoder for NvtCodec {
    type Item = NvtEvent;
    type Error = NvtError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<NvtEvent>, Self::Error> {
        loop {
            let Some(&first) = src.first() else {
                return Ok(None);
            };
            if first != consts::IAC {
                src.advance(1);
                return Ok(Some(NvtEvent::Data(first)));
            }
            let Some(&second) = src.get(1) else {
                return Ok(None);
            };
            if second == consts::IAC {
                src.advance(2);
                return Ok(Some(NvtEvent::Data(consts::IAC)));
            }
            if second == consts::SE {
                warn!("Discarding IAC SE outside a subnegotiation");
                src.advance(2);
                continue;
            }
            if let Ok(command) = NvtCommand::try_from(second) {
                if command.is_standalone() {
                    src.advance(2);
                    return Ok(Some(NvtEvent::Command(command)));
                }
            }
            match parser::scan(&src[1..]) {
                Scan::Complete(sequence) => {
                    src.advance(1 + sequence.length);
                    self.nvt.apply(&sequence);
                    trace!("Received {}", sequence);
                    return Ok(Some(NvtEvent::Sequence(sequence)));
                }
                Scan::Incomplete => {
                    let max = self.nvt.config().max_sequence_len;
                    if src.len() - 1 <= max {
                        return Ok(None);
                    }
                    // Drop everything up to the next IAC and try again from there.
                    let skip = src[1..]
                        .iter()
                        .position(|byte| *byte == consts::IAC)
                        .map_or(src.len(), |offset| offset + 1);
                    warn!(
                        "Discarding {} bytes of an IAC sequence longer than {} bytes",
                        skip, max
                    );
                    src.advance(skip);
                }
                Scan::Malformed { skip, reason } => {
                    warn!("Discarding malformed IAC sequence: {}", reason);
                    src.advance(1 + skip);
                }
            }
        }
    }
}

impl Encoder<NvtFrame> for NvtCodec {
    type Error = NvtError;

    fn encode(&mut self, item: NvtFrame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match item {
            NvtFrame::Data(byte) => {
                dst.reserve(2);
                if byte == consts::IAC {
                    dst.put_u8(consts::IAC);
                }
                dst.put_u8(byte);
            }
            NvtFrame::Command(command, option) => self.nvt.prepare_command(dst, command, option),
            NvtFrame::Negotiate(option) => self.nvt.prepare_negotiate(dst, option),
            NvtFrame::NegotiateValue(option, argument) => {
                self.nvt.prepare_negotiate_value(dst, option, &argument);
            }
            NvtFrame::Ack(received, option) => self.nvt.prepare_ack(dst, received, option)?,
            NvtFrame::Nak(received, option) => self.nvt.prepare_nak(dst, received, option)?,
        }
        Ok(())
    }
}

impl Encoder<&[u8]> for NvtCodec {
    type Error = NvtError;

    fn encode(&mut self, item: &[u8], dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.reserve(item.len());
        for byte in item {
            if *byte == consts::IAC {
                dst.put_u8(consts::IAC);
            }
            dst.put_u8(*byte);
        }
        Ok(())
    }
}
