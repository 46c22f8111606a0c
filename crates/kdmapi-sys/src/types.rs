//! Fixed-layout structures shared with the driver.
//!
//! Both structures are declared with 1-byte packing. Fields must be read by
//! value (never by reference) because they may be unaligned.

use std::ffi::c_char;
use std::mem::size_of;

/// Long MIDI message header (`MIDIHDR`).
///
/// The driver chains queued headers through `lp_next` and may update
/// `dw_flags`; both belong to the driver between prepare and unprepare.
#[repr(C, packed)]
#[derive(Clone, Copy, Debug)]
pub struct MidiHdr {
    pub lp_data: *mut c_char,
    pub dw_buffer_length: u32,
    pub dw_bytes_recorded: u32,
    pub dw_user: usize,
    pub dw_flags: u32,
    pub lp_next: *mut MidiHdr,
    pub reserved: usize,
    pub dw_offset: u32,
    pub dw_reserved: usize,
}

impl MidiHdr {
    /// Header describing `length` bytes at `data`, every bookkeeping field zeroed.
    pub const fn new(data: *mut c_char, length: u32) -> Self {
        Self {
            lp_data: data,
            dw_buffer_length: length,
            dw_bytes_recorded: 0,
            dw_user: 0,
            dw_flags: 0,
            lp_next: std::ptr::null_mut(),
            reserved: 0,
            dw_offset: 0,
            dw_reserved: 0,
        }
    }
}

/// Driver telemetry returned by `GetDriverDebugInfo`.
#[repr(C, packed)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DebugInfo {
    pub rendering_time: f32,
    pub active_voices: [u32; 16],
    pub asio_input_latency: f64,
    pub asio_output_latency: f64,
    pub health_thread_time: f64,
    pub at_thread_time: f64,
    pub ep_thread_time: f64,
    pub cooked_thread_time: f64,
    pub current_sf_list: u32,
    pub audio_latency: f64,
    pub audio_buffer_size: u32,
}

/// Mode argument of `DriverSettings`.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingMode {
    Set = 0,
    Get = 1,
}

// Header flags, as in the WinMM convention the driver follows.
pub const MHDR_DONE: u32 = 0x0000_0001;
pub const MHDR_PREPARED: u32 = 0x0000_0002;
pub const MHDR_INQUEUE: u32 = 0x0000_0004;

/// Size argument passed alongside every `MIDIHDR` pointer.
pub const MIDIHDR_SIZE: u32 = size_of::<MidiHdr>() as u32;

pub const DEBUG_INFO_SIZE: usize = size_of::<DebugInfo>();

const _: () = assert!(size_of::<MidiHdr>() == 5 * size_of::<usize>() + 4 * size_of::<u32>());
const _: () = assert!(std::mem::align_of::<MidiHdr>() == 1);
const _: () = assert!(DEBUG_INFO_SIZE == 4 + 16 * 4 + 6 * 8 + 4 + 8 + 4);
const _: () = assert!(std::mem::align_of::<DebugInfo>() == 1);

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::offset_of;

    #[test]
    fn test_midihdr_field_offsets() {
        let ptr = size_of::<usize>();
        assert_eq!(offset_of!(MidiHdr, lp_data), 0);
        assert_eq!(offset_of!(MidiHdr, dw_buffer_length), ptr);
        assert_eq!(offset_of!(MidiHdr, dw_bytes_recorded), ptr + 4);
        assert_eq!(offset_of!(MidiHdr, dw_user), ptr + 8);
        assert_eq!(offset_of!(MidiHdr, dw_flags), 2 * ptr + 8);
        assert_eq!(offset_of!(MidiHdr, lp_next), 2 * ptr + 12);
        assert_eq!(offset_of!(MidiHdr, dw_offset), 4 * ptr + 12);
        assert_eq!(offset_of!(MidiHdr, dw_reserved), 4 * ptr + 16);
    }

    #[test]
    fn test_debug_info_field_offsets() {
        assert_eq!(offset_of!(DebugInfo, active_voices), 4);
        assert_eq!(offset_of!(DebugInfo, asio_input_latency), 68);
        assert_eq!(offset_of!(DebugInfo, cooked_thread_time), 108);
        assert_eq!(offset_of!(DebugInfo, current_sf_list), 116);
        assert_eq!(offset_of!(DebugInfo, audio_latency), 120);
        assert_eq!(offset_of!(DebugInfo, audio_buffer_size), 128);
        assert_eq!(DEBUG_INFO_SIZE, 132);
    }

    #[test]
    fn test_new_header_is_zeroed() {
        let mut data = [0xF0u8, 0x7E, 0xF7];
        let hdr = MidiHdr::new(data.as_mut_ptr() as *mut c_char, 3);
        let length = hdr.dw_buffer_length;
        let flags = hdr.dw_flags;
        let next = hdr.lp_next;
        assert_eq!(length, 3);
        assert_eq!(flags, 0);
        assert!(next.is_null());
    }

    #[test]
    fn test_setting_mode_values() {
        assert_eq!(SettingMode::Set as u32, 0);
        assert_eq!(SettingMode::Get as u32, 1);
    }
}
