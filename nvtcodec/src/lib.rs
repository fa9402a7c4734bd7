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

//! # Nvtix NVT Codec
//!
//! Option negotiation for Telnet Network Virtual Terminals (RFC 854/855).
//!
//! A server talking to a Telnet client exchanges `IAC` command sequences that
//! switch options such as echo, binary transmission and go-ahead suppression
//! on and off. This crate tracks what each side has agreed to, builds the
//! sequences to send, and parses the sequences received.
//!
//! ## Core Components
//!
//! ### [`Nvt`]
//!
//! The per-session negotiation engine. It owns a [`NegotiationTable`] of
//! [`OptionState`] records, parses inbound sequences into [`NvtSequence`]
//! values, and writes outbound commands to any [`Transport`].
//!
//! ### [`NvtCodec`]
//!
//! A `tokio_util::codec` [`Decoder`](tokio_util::codec::Decoder) and
//! [`Encoder`](tokio_util::codec::Encoder) wrapping an [`Nvt`]. It splits a
//! byte stream into [`NvtEvent`]s and encodes [`NvtFrame`]s, keeping the
//! session state current in both directions.
//!
//! ### Byte builders
//!
//! [`create_command`], [`create_sub`] and [`create_sub_value`] produce the raw
//! wire bytes without touching any state.
//!
//! ## Usage Example
//!
//! ```rust
//! use nvtix_nvtcodec::{Nvt, NvtCommand, NvtOption};
//!
//! let mut nvt = Nvt::new();
//! let mut wire: Vec<u8> = Vec::new();
//!
//! nvt.send_greeting(&mut wire).unwrap();
//! assert_eq!(
//!     wire,
//!     b"\xFF\xFB\x01\xFF\xFB\x03\xFF\xFD\x00\xFF\xFB\x00"
//! );
//!
//! // The client agrees to binary mode.
//! let seq = nvt.parse_sequence(b"\xFB\x00").unwrap();
//! assert_eq!(seq.command, NvtCommand::Will);
//! assert!(nvt.enabled(NvtOption::Binary));
//! ```
//!
//! ## Protocol Details
//!
//! - 3-byte negotiation: `IAC <DO|DONT|WILL|WONT> <option>`
//! - Valued subnegotiation: `IAC SB <option> 0 <value> IAC SE`
//! - Subnegotiation query: `IAC SB <option> 1 IAC SE`
//!
//! Queries are only ever sent. Values are written exactly as given, so a value
//! containing `0xFF` is not escaped on the way out.
//!
//! ## Thread Safety
//!
//! Neither `Nvt` nor `NvtCodec` synchronizes internally. Each connection gets
//! its own instance.

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(
    clippy::option_if_let_else,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc
)]

mod codec;
mod command;
mod config;
pub mod consts;
mod encoder;
mod nvt;
mod option;
mod parser;
mod result;
mod sequence;
mod state;
mod transport;

pub use self::codec::{NvtCodec, NvtEvent, NvtFrame};
pub use self::command::NvtCommand;
pub use self::config::NvtConfig;
pub use self::encoder::{
    create_command, create_sub, create_sub_value, put_command, put_sub, put_sub_value,
};
pub use self::nvt::Nvt;
pub use self::option::NvtOption;
pub use self::result::{NvtError, NvtResult};
pub use self::sequence::NvtSequence;
pub use self::state::{NegotiationTable, OptionState};
pub use self::transport::Transport;
