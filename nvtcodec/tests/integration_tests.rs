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

//! Integration tests for nvtcodec
//!
//! These tests drive two codecs against each other over an in-memory duplex
//! stream, the way a server and a client would share a socket.

use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use nvtix_nvtcodec::{
    NvtCodec, NvtCommand, NvtConfig, NvtEvent, NvtFrame, NvtOption, NvtSequence,
};
use tokio::io::{AsyncWriteExt, DuplexStream, duplex};
use tokio_util::codec::Framed;

// ============================================================================
// Helper Functions
// ============================================================================

fn create_client_server_pair() -> (Framed<DuplexStream, NvtCodec>, Framed<DuplexStream, NvtCodec>) {
    let (client, server) = duplex(1024);
    (
        Framed::new(client, NvtCodec::new()),
        Framed::new(server, NvtCodec::new()),
    )
}

async fn next_event(framed: &mut Framed<DuplexStream, NvtCodec>) -> NvtEvent {
    framed
        .next()
        .await
        .expect("stream ended")
        .expect("decode failed")
}

// ============================================================================
// Client-Server Negotiation Tests
// ============================================================================

#[tokio::test]
async fn greeting_is_acknowledged_by_client() {
    let (mut client, mut server) = create_client_server_pair();
    let greeting = NvtConfig::default().greeting;

    for (command, option) in &greeting {
        server
            .send(NvtFrame::Command(*command, *option))
            .await
            .unwrap();
    }

    // The client agrees to everything the server proposes.
    for (command, option) in &greeting {
        let event = next_event(&mut client).await;
        assert_eq!(
            event,
            NvtEvent::Sequence(NvtSequence::negotiation(*command, *option))
        );
        client.send(NvtFrame::Ack(*command, *option)).await.unwrap();
    }

    for _ in &greeting {
        assert!(matches!(
            next_event(&mut server).await,
            NvtEvent::Sequence(_)
        ));
    }

    let server_nvt = server.codec().nvt();
    assert!(server_nvt.enabled(NvtOption::Binary));
    assert!(server_nvt.state(NvtOption::Echo).unwrap().will);
    assert!(server_nvt.state(NvtOption::Echo).unwrap().do_);
    assert!(server_nvt.enabled(NvtOption::SuppressGoAhead));

    let client_nvt = client.codec().nvt();
    assert!(client_nvt.enabled(NvtOption::Echo));
    assert!(client_nvt.enabled(NvtOption::Binary));
}

#[tokio::test]
async fn client_refuses_linemode() {
    let (mut client, mut server) = create_client_server_pair();

    server
        .send(NvtFrame::Command(NvtCommand::Do, NvtOption::Linemode))
        .await
        .unwrap();
    let event = next_event(&mut client).await;
    let NvtEvent::Sequence(seq) = event else {
        panic!("expected a sequence, got {event:?}");
    };
    client
        .send(NvtFrame::Nak(seq.command, seq.option))
        .await
        .unwrap();

    let reply = next_event(&mut server).await;
    assert_eq!(
        reply,
        NvtEvent::Sequence(NvtSequence::negotiation(
            NvtCommand::Wont,
            NvtOption::Linemode
        ))
    );
    assert!(!server.codec().enabled(NvtOption::Linemode));
    assert!(server.codec().nvt().state(NvtOption::Linemode).unwrap().do_);
}

#[tokio::test]
async fn location_subnegotiation_round_trip() {
    let (mut client, mut server) = create_client_server_pair();

    server
        .send(NvtFrame::Command(NvtCommand::Do, NvtOption::SendLocation))
        .await
        .unwrap();
    next_event(&mut client).await;
    client
        .send(NvtFrame::Ack(NvtCommand::Do, NvtOption::SendLocation))
        .await
        .unwrap();
    client
        .send(NvtFrame::NegotiateValue(
            NvtOption::SendLocation,
            Bytes::from_static(b"Building 7"),
        ))
        .await
        .unwrap();

    next_event(&mut server).await;
    let event = next_event(&mut server).await;
    assert_eq!(
        event,
        NvtEvent::Sequence(NvtSequence::subnegotiation(
            NvtOption::SendLocation,
            &b"Building 7"[..]
        ))
    );
    assert_eq!(
        server.codec().nvt().value(NvtOption::SendLocation).unwrap(),
        &b"Building 7"[..]
    );
}

// ============================================================================
// Data Stream Tests
// ============================================================================

#[tokio::test]
async fn data_with_iac_survives_the_wire() {
    let (mut client, mut server) = create_client_server_pair();

    server.send(&b"A\xFFB"[..]).await.unwrap();
    assert_eq!(next_event(&mut client).await, NvtEvent::Data(b'A'));
    assert_eq!(next_event(&mut client).await, NvtEvent::Data(0xFF));
    assert_eq!(next_event(&mut client).await, NvtEvent::Data(b'B'));
}

#[tokio::test]
async fn interleaved_data_and_commands() {
    let (mut client, mut server) = create_client_server_pair();

    server.send(NvtFrame::Data(b'x')).await.unwrap();
    server
        .send(NvtFrame::Command(NvtCommand::Will, NvtOption::Echo))
        .await
        .unwrap();
    server.send(NvtFrame::Data(b'y')).await.unwrap();

    assert_eq!(next_event(&mut client).await, NvtEvent::Data(b'x'));
    assert_eq!(
        next_event(&mut client).await,
        NvtEvent::Sequence(NvtSequence::negotiation(NvtCommand::Will, NvtOption::Echo))
    );
    assert_eq!(next_event(&mut client).await, NvtEvent::Data(b'y'));
}

#[tokio::test]
async fn split_writes_reassemble() {
    let (client, mut raw_server) = duplex(64);
    let mut client = Framed::new(client, NvtCodec::new());

    raw_server.write_all(&[0xFF, 0xFA, 0x17]).await.unwrap();
    raw_server.flush().await.unwrap();
    raw_server.write_all(b"\x00Hall").await.unwrap();
    raw_server.write_all(&[0xFF, 0xF0, 0xFF, 0xF6]).await.unwrap();

    let event = next_event(&mut client).await;
    assert_eq!(
        event,
        NvtEvent::Sequence(NvtSequence::subnegotiation(
            NvtOption::SendLocation,
            &b"Hall"[..]
        ))
    );
    assert_eq!(
        next_event(&mut client).await,
        NvtEvent::Command(NvtCommand::AreYouThere)
    );
    // SB for an option never negotiated carries no state.
    let nvt = client.codec().nvt();
    assert!(nvt.value(NvtOption::SendLocation).is_none());
}

#[tokio::test]
async fn malformed_input_is_skipped() {
    let (client, mut raw_server) = duplex(64);
    let mut client = Framed::new(client, NvtCodec::new());

    // DO TTYPE is unknown, and a stray IAC swallows the byte after it.
    raw_server
        .write_all(&[0xFF, 0xFD, 0x18, 0xFF, b'k', 0xFF, 0xFB, 0x03])
        .await
        .unwrap();

    assert_eq!(
        next_event(&mut client).await,
        NvtEvent::Sequence(NvtSequence::negotiation(
            NvtCommand::Will,
            NvtOption::SuppressGoAhead
        ))
    );
}

#[tokio::test]
async fn unmappable_ack_is_an_error() {
    let (_client, mut server) = create_client_server_pair();
    let result = server
        .send(NvtFrame::Ack(NvtCommand::AreYouThere, NvtOption::Echo))
        .await;
    assert!(result.is_err());
}
