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

//! Outbound byte construction.
//!
//! Nothing here validates semantics: any command/option pair can be encoded,
//! and subnegotiation values are copied through verbatim. A value containing a
//! raw IAC produces a sequence the peer will terminate early; callers that
//! need such bytes must double them first.

use crate::{NvtCommand, NvtOption, consts};
use bytes::{BufMut, Bytes, BytesMut};

/// Appends `IAC <cmd> <option>` to `dst`.
pub fn put_command(dst: &mut BytesMut, command: NvtCommand, option: NvtOption) {
    dst.reserve(3);
    dst.put_u8(consts::IAC);
    dst.put_u8(command.into());
    dst.put_u8(option.into());
}

/// Appends the query form `IAC SB <option> 1 IAC SE` to `dst`.
pub fn put_sub(dst: &mut BytesMut, option: NvtOption) {
    dst.reserve(6);
    dst.put_u8(consts::IAC);
    dst.put_u8(consts::SB);
    dst.put_u8(option.into());
    dst.put_u8(consts::SB_QUERY);
    dst.put_u8(consts::IAC);
    dst.put_u8(consts::SE);
}

/// Appends the valued form `IAC SB <option> 0 <argument> IAC SE` to `dst`.
pub fn put_sub_value(dst: &mut BytesMut, option: NvtOption, argument: &[u8]) {
    dst.reserve(argument.len() + 6);
    dst.put_u8(consts::IAC);
    dst.put_u8(consts::SB);
    dst.put_u8(option.into());
    dst.put_u8(consts::SB_VALUE);
    dst.put_slice(argument);
    dst.put_u8(consts::IAC);
    dst.put_u8(consts::SE);
}

/// Creates the 3 byte sequence for a command.
pub fn create_command(command: NvtCommand, option: NvtOption) -> Bytes {
    let mut dst = BytesMut::with_capacity(3);
    put_command(&mut dst, command, option);
    dst.freeze()
}

/// Creates the 6 byte subnegotiation query for an option.
pub fn create_sub(option: NvtOption) -> Bytes {
    let mut dst = BytesMut::with_capacity(6);
    put_sub(&mut dst, option);
    dst.freeze()
}

/// Creates the subnegotiation that sets an option's value.
pub fn create_sub_value(option: NvtOption, argument: &[u8]) -> Bytes {
    let mut dst = BytesMut::with_capacity(argument.len() + 6);
    put_sub_value(&mut dst, option, argument);
    dst.freeze()
}
