//! OSC sender and codec integration tests
//!
//! Verify that what the sender puts on the wire is a well-formed OSC
//! message a real OSC library can parse, and that the value conversions
//! round-trip.

use rosc::{decoder, OscPacket};
use thinkwire_core::{Prompt, Value};
use thinkwire_transport::osc::{osc_to_value, value_to_osc};
use thinkwire_transport::{OscSender, OscSenderConfig, TransportError};
use tokio::net::UdpSocket;

const PROMPT: &str = "Generate a voicing for MIDI note 60 in C major";

/// Bind a receiver socket on an ephemeral port
async fn bind_receiver() -> UdpSocket {
    UdpSocket::bind("127.0.0.1:0").await.unwrap()
}

async fn sender_to(receiver: &UdpSocket) -> OscSender {
    let target = receiver.local_addr().unwrap().to_string();
    OscSender::connect(OscSenderConfig { target }).await.unwrap()
}

#[tokio::test]
async fn test_send_prompt_wire_format() {
    let receiver = bind_receiver().await;
    let sender = sender_to(&receiver).await;

    let prompt = Prompt::new(PROMPT).unwrap();
    sender.send_prompt(&prompt).await.unwrap();

    let mut buf = [0u8; 65536];
    let (len, _) = receiver.recv_from(&mut buf).await.unwrap();
    let (_, packet) = decoder::decode_udp(&buf[..len]).unwrap();

    match packet {
        OscPacket::Message(msg) => {
            assert_eq!(msg.addr, "/think");
            assert_eq!(msg.args.len(), 1);
            assert_eq!(osc_to_value(&msg.args[0]), Value::String(PROMPT.to_string()));
        }
        OscPacket::Bundle(_) => panic!("expected a message, got a bundle"),
    }
}

#[tokio::test]
async fn test_send_multiple_args() {
    let receiver = bind_receiver().await;
    let sender = sender_to(&receiver).await;

    let args = vec![Value::Int(60), Value::Float(0.5), Value::String("maj".into())];
    sender.send("/agent/voice", args.clone()).await.unwrap();

    let mut buf = [0u8; 65536];
    let (len, _) = receiver.recv_from(&mut buf).await.unwrap();
    let (_, packet) = decoder::decode_udp(&buf[..len]).unwrap();

    match packet {
        OscPacket::Message(msg) => {
            assert_eq!(msg.addr, "/agent/voice");
            let decoded: Vec<Value> = msg.args.iter().map(osc_to_value).collect();
            assert_eq!(decoded, args);
        }
        OscPacket::Bundle(_) => panic!("expected a message"),
    }
}

#[tokio::test]
async fn test_invalid_address_is_encoding_error() {
    let receiver = bind_receiver().await;
    let sender = sender_to(&receiver).await;

    let err = sender.send("no-slash", vec![]).await.unwrap_err();
    assert!(matches!(err, TransportError::Encoding(_)));
}

#[tokio::test]
async fn test_invalid_target_rejected() {
    let result = OscSender::connect(OscSenderConfig {
        target: "not an address".to_string(),
    })
    .await;
    assert!(matches!(result, Err(TransportError::InvalidTarget(_))));
}

#[test]
fn test_value_roundtrip_through_osc() {
    let values = vec![
        Value::Null,
        Value::Bool(true),
        Value::Int(60),
        Value::Int(i64::MAX),
        Value::Float(0.25),
        Value::String("C major".to_string()),
        Value::Bytes(vec![0x01, 0x02, 0xff]),
        Value::Array(vec![Value::Int(60), Value::Int(64), Value::Int(67)]),
    ];

    for value in values {
        let osc = value_to_osc(&value);
        assert_eq!(osc_to_value(&osc), value, "round trip failed for {:?}", value);
    }
}
