//! Outgoing MIDI messages.

use crate::error::{Error, Result};
use crate::MidiMsg;

const SYSEX_START: u8 = 0xF0;
const SYSEX_END: u8 = 0xF7;
const DATA_MASK: u8 = 0x7F;

/// Raw MIDI bytes bound for the driver, in full wire encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiOutputMessage {
    pub bytes: Vec<u8>,
}

impl MidiOutputMessage {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Channel voice message. `channel` saturates at 15, data bytes keep their low 7 bits.
    fn channel_voice(kind: u8, channel: u8, data: &[u8]) -> Self {
        let mut bytes = Vec::with_capacity(1 + data.len());
        bytes.push(kind | channel.min(0x0F));
        bytes.extend(data.iter().map(|b| b & DATA_MASK));
        Self { bytes }
    }

    pub fn control_change(channel: u8, cc_number: u8, value: u8) -> Self {
        Self::channel_voice(0xB0, channel, &[cc_number, value])
    }

    pub fn note_on(channel: u8, note: u8, velocity: u8) -> Self {
        Self::channel_voice(0x90, channel, &[note, velocity])
    }

    pub fn note_off(channel: u8, note: u8, velocity: u8) -> Self {
        Self::channel_voice(0x80, channel, &[note, velocity])
    }

    pub fn program_change(channel: u8, program: u8) -> Self {
        Self::channel_voice(0xC0, channel, &[program])
    }

    /// `value` is centred on 0 and saturates at the 14-bit range (-8192..=8191).
    pub fn pitch_bend(channel: u8, value: i16) -> Self {
        let raw = (i32::from(value) + 0x2000).clamp(0, 0x3FFF) as u16;
        Self::channel_voice(0xE0, channel, &[raw as u8, (raw >> 7) as u8])
    }

    /// Frames an unframed payload with `F0 .. F7`.
    ///
    /// Every payload byte must be a 7-bit data byte; anything from `0x80` up
    /// (including `F0`/`F7` framing passed in by mistake) is rejected.
    pub fn sysex(payload: &[u8]) -> Result<Self> {
        if let Some(pos) = payload.iter().position(|b| b & !DATA_MASK != 0) {
            return Err(Error::InvalidMessage(format!(
                "sysex payload byte {:#04X} at offset {} is not a data byte",
                payload[pos], pos
            )));
        }
        let mut bytes = Vec::with_capacity(payload.len() + 2);
        bytes.push(SYSEX_START);
        bytes.extend_from_slice(payload);
        bytes.push(SYSEX_END);
        Ok(Self { bytes })
    }

    pub fn is_sysex(&self) -> bool {
        self.bytes.first() == Some(&SYSEX_START)
    }

    /// Payload between the framing bytes, for sysex messages.
    pub fn sysex_data(&self) -> Option<&[u8]> {
        if !self.is_sysex() {
            return None;
        }
        let body = &self.bytes[1..];
        Some(body.strip_suffix(&[SYSEX_END]).unwrap_or(body))
    }
}

impl From<&MidiMsg> for MidiOutputMessage {
    fn from(msg: &MidiMsg) -> Self {
        Self {
            bytes: msg.to_midi(),
        }
    }
}

impl From<MidiMsg> for MidiOutputMessage {
    fn from(msg: MidiMsg) -> Self {
        Self::from(&msg)
    }
}

impl From<Vec<u8>> for MidiOutputMessage {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Channel, ChannelVoiceMsg};

    #[test]
    fn test_channel_messages() {
        assert_eq!(MidiOutputMessage::note_on(0, 60, 100).bytes, vec![0x90, 60, 100]);
        assert_eq!(MidiOutputMessage::note_off(3, 64, 0).bytes, vec![0x83, 64, 0]);
        assert_eq!(MidiOutputMessage::control_change(15, 64, 0).bytes, vec![0xBF, 64, 0]);
        assert_eq!(MidiOutputMessage::program_change(9, 0).bytes, vec![0xC9, 0]);
    }

    #[test]
    fn test_channel_clamping_and_masking() {
        assert_eq!(MidiOutputMessage::note_on(255, 0xFF, 0xFF).bytes, vec![0x9F, 0x7F, 0x7F]);
        assert_eq!(MidiOutputMessage::program_change(200, 0xFF).bytes, vec![0xCF, 0x7F]);
    }

    #[test]
    fn test_pitch_bend() {
        let msg = MidiOutputMessage::pitch_bend(0, 0);
        assert_eq!((msg.bytes[1] as u16) | ((msg.bytes[2] as u16) << 7), 8192);

        let msg = MidiOutputMessage::pitch_bend(0, i16::MAX);
        assert_eq!((msg.bytes[1] as u16) | ((msg.bytes[2] as u16) << 7), 16383);

        let msg = MidiOutputMessage::pitch_bend(0, i16::MIN);
        assert_eq!((msg.bytes[1] as u16) | ((msg.bytes[2] as u16) << 7), 0);
    }

    #[test]
    fn test_sysex_framing() {
        // GM System On
        let msg = MidiOutputMessage::sysex(&[0x7E, 0x7F, 0x09, 0x01]).unwrap();
        assert_eq!(msg.bytes, vec![0xF0, 0x7E, 0x7F, 0x09, 0x01, 0xF7]);
        assert!(msg.is_sysex());
        assert_eq!(msg.sysex_data(), Some(&[0x7E, 0x7F, 0x09, 0x01][..]));

        assert!(!MidiOutputMessage::note_on(0, 60, 1).is_sysex());
        assert_eq!(MidiOutputMessage::note_on(0, 60, 1).sysex_data(), None);
    }

    #[test]
    fn test_sysex_rejects_status_bytes() {
        let err = MidiOutputMessage::sysex(&[0xF0, 0x7E, 0x7F, 0x09, 0x01, 0xF7]).unwrap_err();
        assert!(matches!(err, Error::InvalidMessage(_)));
        assert_eq!(
            err.to_string(),
            "Invalid MIDI message: sysex payload byte 0xF0 at offset 0 is not a data byte"
        );

        assert!(MidiOutputMessage::sysex(&[0x41, 0x10, 0x80]).is_err());
        assert_eq!(MidiOutputMessage::sysex(&[]).unwrap().bytes, vec![0xF0, 0xF7]);
    }

    #[test]
    fn test_from_midi_msg() {
        let msg = MidiMsg::ChannelVoice {
            channel: Channel::Ch6,
            msg: ChannelVoiceMsg::NoteOn {
                note: 60,
                velocity: 100,
            },
        };
        let out = MidiOutputMessage::from(&msg);
        assert_eq!(out.bytes, vec![0x95, 60, 100]);
        assert!(!out.is_sysex());
    }
}
