//! Output backend integration tests (requires "midi-io" feature)
//!
//! Covers device discovery, port lifecycle and the wire format handed to
//! the driver.
//!
//! Run with:
//! ```bash
//! cargo test -p kdmapi --test output_integration
//! ```

#![cfg(feature = "midi-io")]

mod helpers;

use helpers::{kdmapi_with, mock_kdmapi};
use kdmapi::midi_io::{device_name, Channel, ChannelVoiceMsg, MidiMsg};
use kdmapi::prelude::*;
use kdmapi::{pack_short_message, unpack_short_message, DriverVersion, Operation, OutputDevice};
use kdmapi_core::mock::{Call, MockDriver};

#[test]
fn test_device_name_follows_driver_version() {
    let cases = [
        ([1, 30, 0, 51], "OmniMIDI 1.30.0 Rev. 51"),
        ([2, 0, 1, 0], "OmniMIDI 2.0.1 Rev. 0"),
        ([0, 0, 0, 0], "OmniMIDI 0.0.0 Rev. 0"),
    ];

    for (raw, expected) in cases {
        assert_eq!(device_name(&DriverVersion::from(raw)), expected);

        let kdmapi = kdmapi_with(MockDriver::new().with_version(raw));
        let devices = list_devices(&kdmapi).unwrap();
        assert_eq!(
            devices,
            vec![OutputDevice {
                name: expected.to_string(),
                is_input: false,
                is_output: true,
            }]
        );
    }
}

#[test]
fn test_unavailable_driver_lists_nothing() {
    let kdmapi = kdmapi_with(MockDriver::new().unavailable());
    assert!(list_devices(&kdmapi).unwrap().is_empty());
    assert_eq!(
        kdmapi
            .driver()
            .count(|c| matches!(c, Call::ReturnKdmapiVer)),
        0
    );
}

#[test]
fn test_device_serializes_to_json() {
    let kdmapi = mock_kdmapi();
    let devices = list_devices(&kdmapi).unwrap();
    let json = serde_json::to_value(&devices).unwrap();
    assert_eq!(json[0]["name"], "OmniMIDI 1.30.0 Rev. 51");
    assert_eq!(json[0]["is_output"], true);
    assert_eq!(json[0]["is_input"], false);
}

#[test]
fn test_open_failure_leaves_port_closed() {
    let kdmapi = kdmapi_with(MockDriver::new().failing_initialize());
    let mut port = KdmapiOutput::new(&kdmapi);

    let err = port.open().unwrap_err();
    assert!(!port.is_open());

    let err: kdmapi::Error = err.into();
    match err {
        kdmapi::Error::MidiIo(inner) => assert_eq!(
            inner.to_string(),
            format!("{} failed", Operation::InitializeKdmapiStream)
        ),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_port_lifecycle_calls_stream_once() {
    let kdmapi = mock_kdmapi();
    {
        let mut port = KdmapiOutput::connect(&kdmapi).unwrap();
        port.open().unwrap();
        assert!(port.is_open());
        port.close().unwrap();
        port.close().unwrap();
        assert!(!port.is_open());
    }

    let calls = kdmapi.driver().calls();
    assert_eq!(
        calls,
        vec![Call::InitializeKdmapiStream, Call::TerminateKdmapiStream]
    );
}

#[test]
fn test_short_messages_pack_little_endian() {
    let kdmapi = mock_kdmapi();
    let mut port = KdmapiOutput::connect(&kdmapi).unwrap();

    let messages = [
        MidiOutputMessage::note_on(0, 60, 100),
        MidiOutputMessage::note_off(9, 36, 0),
        MidiOutputMessage::control_change(3, 7, 127),
        MidiOutputMessage::program_change(15, 42),
        MidiOutputMessage::pitch_bend(1, 0),
        MidiOutputMessage::from_bytes(vec![0xF8]),
    ];
    for message in &messages {
        port.send(message).unwrap();
    }

    let sent: Vec<u32> = kdmapi
        .driver()
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::SendDirectData(word) => Some(word),
            _ => None,
        })
        .collect();
    assert_eq!(sent.len(), messages.len());

    for (message, word) in messages.iter().zip(&sent) {
        let expected = message
            .bytes
            .iter()
            .enumerate()
            .fold(0u32, |acc, (i, b)| acc | (u32::from(*b) << (8 * i)));
        assert_eq!(*word, expected);
        assert_eq!(
            unpack_short_message(*word, message.bytes.len()),
            message.bytes
        );
    }
    assert_eq!(sent[0], 0x0064_3C90);
}

#[test]
fn test_sysex_goes_out_unbuffered() {
    let kdmapi = mock_kdmapi();
    let mut port = KdmapiOutput::connect(&kdmapi).unwrap();

    let gm_on = MidiOutputMessage::sysex(&[0x7E, 0x7F, 0x09, 0x01]).unwrap();
    port.send(&gm_on).unwrap();

    assert!(kdmapi.driver().calls().contains(&Call::SendDirectLongDataNoBuf(vec![
        0xF0, 0x7E, 0x7F, 0x09, 0x01, 0xF7
    ])));
    assert_eq!(
        kdmapi
            .driver()
            .count(|c| matches!(c, Call::SendDirectData(_))),
        0
    );
}

#[test]
fn test_midi_msg_conversion_reaches_driver() {
    let kdmapi = mock_kdmapi();
    let mut port = KdmapiOutput::connect(&kdmapi).unwrap();

    let msg = MidiMsg::ChannelVoice {
        channel: Channel::Ch2,
        msg: ChannelVoiceMsg::NoteOn {
            note: 64,
            velocity: 90,
        },
    };
    port.send(&MidiOutputMessage::from(&msg)).unwrap();

    let word = pack_short_message(&[0x91, 64, 90]).unwrap();
    assert!(kdmapi.driver().calls().contains(&Call::SendDirectData(word)));
}

#[test]
fn test_oversized_short_message_is_rejected() {
    let kdmapi = mock_kdmapi();
    let mut port = KdmapiOutput::connect(&kdmapi).unwrap();

    let err = port
        .send(&MidiOutputMessage::from_bytes(vec![0x90, 60, 100, 0]))
        .unwrap_err();
    assert!(matches!(err, kdmapi::midi_io::Error::InvalidMessage(_)));
    assert_eq!(
        kdmapi
            .driver()
            .count(|c| matches!(c, Call::SendDirectData(_))),
        0
    );
}

#[test]
fn test_drop_closes_open_port() {
    let kdmapi = mock_kdmapi();
    {
        let mut port = KdmapiOutput::connect(&kdmapi).unwrap();
        port.send_note_on(0, 60, 100).unwrap();
    }
    assert_eq!(
        kdmapi.driver().calls().last(),
        Some(&Call::TerminateKdmapiStream)
    );
}
