//! The KDMAPI entry-point table.

use crate::types::{DebugInfo, MidiHdr};
use std::ffi::{c_char, c_void};

/// One method per exported entry point, with the native argument widths.
///
/// [`NativeLibrary`](crate::NativeLibrary) forwards each call to the loaded
/// driver. Other implementations stand in for the driver in tests. `BOOL`
/// results are surfaced as `bool`; status-code results stay raw `u32`
/// (see [`MmResult`](crate::MmResult)).
///
/// Methods taking raw pointers are `unsafe`: the caller guarantees the
/// pointers are valid for the access the driver performs.
pub trait Driver {
    fn return_kdmapi_ver(
        &self,
        major: &mut u32,
        minor: &mut u32,
        build: &mut u32,
        revision: &mut u32,
    ) -> bool;

    fn is_kdmapi_available(&self) -> bool;

    fn initialize_kdmapi_stream(&self) -> bool;

    fn terminate_kdmapi_stream(&self) -> bool;

    fn reset_kdmapi_stream(&self);

    fn send_custom_event(&self, event_type: u32, channel: u32, param: u32) -> bool;

    fn send_direct_data(&self, message: u32);

    fn send_direct_data_no_buf(&self, message: u32);

    /// # Safety
    /// `header` must point to a prepared header whose buffer outlives the call.
    unsafe fn send_direct_long_data(&self, header: *mut MidiHdr, header_size: u32) -> u32;

    /// # Safety
    /// `data` must be valid for reads of `length` bytes.
    unsafe fn send_direct_long_data_no_buf(&self, data: *const c_char, length: u32) -> u32;

    /// # Safety
    /// `header` and its buffer must stay valid and untouched until unprepared.
    unsafe fn prepare_long_data(&self, header: *mut MidiHdr, header_size: u32) -> u32;

    /// # Safety
    /// `header` must be the pointer previously passed to `prepare_long_data`.
    unsafe fn unprepare_long_data(&self, header: *mut MidiHdr, header_size: u32) -> u32;

    /// # Safety
    /// `value` must be valid for reads and writes of `value_size` bytes.
    unsafe fn driver_settings(
        &self,
        setting: u32,
        mode: u32,
        value: *mut c_void,
        value_size: u32,
    ) -> bool;

    /// Pointer into driver-owned memory, possibly null.
    fn get_driver_debug_info(&self) -> *const DebugInfo;

    /// # Safety
    /// `directory` must be a NUL-terminated UTF-16 string.
    unsafe fn load_custom_soundfonts_list(&self, directory: *const u16);

    fn time_get_time64(&self) -> u64;

    /// # Safety
    /// `user`, `param1` and `param2` are interpreted by the driver according
    /// to `message`, possibly as pointers.
    unsafe fn mod_message(
        &self,
        device_id: u32,
        message: u32,
        user: usize,
        param1: usize,
        param2: usize,
    ) -> u32;
}
