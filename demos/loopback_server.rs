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

//! # Loopback NVT Server Example
//!
//! A blocking TCP server that greets each client with the default option
//! offers, agrees to what the client proposes, and echoes typed data back.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --example loopback_server -- 127.0.0.1:2323
//! telnet 127.0.0.1 2323
//! ```

use bytes::BytesMut;
use nvtix_nvtcodec::{NvtCodec, NvtCommand, NvtEvent, NvtFrame, NvtOption, NvtSequence};
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, error, info};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "127.0.0.1:2323".to_string());
    let listener = TcpListener::bind(&addr)?;
    info!("Listening on {}", addr);

    for stream in listener.incoming() {
        let stream = stream?;
        thread::spawn(move || {
            let peer = stream.peer_addr().ok();
            if let Err(err) = handle_client(stream) {
                error!("Connection {:?} failed: {}", peer, err);
            }
        });
    }
    Ok(())
}

fn handle_client(mut stream: TcpStream) -> Result<(), Box<dyn std::error::Error>> {
    let mut codec = NvtCodec::new();
    codec.nvt_mut().send_greeting(&mut stream)?;

    let mut input = BytesMut::with_capacity(1024);
    let mut output = BytesMut::with_capacity(1024);
    let mut chunk = [0u8; 512];

    loop {
        let n = stream.read(&mut chunk)?;
        if n == 0 {
            info!("Client closed connection");
            log_state(&codec);
            return Ok(());
        }
        input.extend_from_slice(&chunk[..n]);

        while let Some(event) = codec.decode(&mut input)? {
            match event {
                NvtEvent::Data(byte) => codec.encode(&[byte][..], &mut output)?,
                NvtEvent::Command(NvtCommand::AreYouThere) => {
                    codec.encode(&b"[yes]\r\n"[..], &mut output)?;
                }
                NvtEvent::Command(command) => debug!("Ignoring {}", command),
                NvtEvent::Sequence(seq) => answer(&mut codec, &seq, &mut output)?,
            }
        }

        if !output.is_empty() {
            stream.write_all(&output)?;
            output.clear();
        }
    }
}

// Agree to proposals for halves we have not already affirmed, so repeated
// offers do not bounce back and forth. Replies queue behind echoed data.
fn answer(
    codec: &mut NvtCodec,
    seq: &NvtSequence,
    output: &mut BytesMut,
) -> Result<(), Box<dyn std::error::Error>> {
    if seq.is_subnegotiation() {
        info!("{}", seq);
        return Ok(());
    }
    let Some(state) = codec.nvt().state(seq.option) else {
        return Ok(());
    };
    let settled = match seq.command {
        NvtCommand::Will => state.do_,
        NvtCommand::Do => state.will,
        _ => true,
    };
    if settled {
        debug!("No reply needed for {}", seq);
        return Ok(());
    }
    codec.encode(NvtFrame::Ack(seq.command, seq.option), output)?;
    if seq.option == NvtOption::SendLocation && codec.enabled(NvtOption::SendLocation) {
        codec.encode(NvtFrame::Negotiate(NvtOption::SendLocation), output)?;
    }
    Ok(())
}

fn log_state(codec: &NvtCodec) {
    for option in NvtOption::ALL {
        if let Some(state) = codec.nvt().state(option) {
            info!(
                "{}: will={} do={} enabled={}",
                option,
                state.will,
                state.do_,
                state.enabled()
            );
        }
    }
}
