//! Recording stand-in for the native driver.
//!
//! [`MockDriver`] implements [`Driver`] without any native library. Every
//! call is appended to a log, and each entry point's result can be scripted.

use kdmapi_sys::{
    DebugInfo, Driver, MidiHdr, MmResult, SettingMode, MHDR_DONE, MHDR_PREPARED,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::ffi::{c_char, c_void};

/// One recorded entry-point invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ReturnKdmapiVer,
    IsKdmapiAvailable,
    InitializeKdmapiStream,
    TerminateKdmapiStream,
    ResetKdmapiStream,
    SendCustomEvent {
        event_type: u32,
        channel: u32,
        param: u32,
    },
    SendDirectData(u32),
    SendDirectDataNoBuf(u32),
    PrepareLongData {
        size: u32,
    },
    /// Bytes the header pointed at when the driver received it.
    SendDirectLongData {
        size: u32,
        data: Vec<u8>,
    },
    UnprepareLongData {
        size: u32,
    },
    SendDirectLongDataNoBuf(Vec<u8>),
    DriverSettings {
        setting: u32,
        mode: u32,
        size: u32,
    },
    GetDriverDebugInfo,
    LoadCustomSoundFontsList(String),
    TimeGetTime64,
    ModMessage {
        device_id: u32,
        message: u32,
        user: usize,
        param1: usize,
        param2: usize,
    },
}

pub struct MockDriver {
    calls: Mutex<Vec<Call>>,
    settings: Mutex<HashMap<u32, u32>>,
    version: Option<[u32; 4]>,
    available: bool,
    initialize_ok: bool,
    terminate_ok: bool,
    custom_event_ok: bool,
    settings_ok: bool,
    prepare_status: u32,
    send_long_status: u32,
    unprepare_status: u32,
    no_buf_status: u32,
    mod_message_status: u32,
    debug_info: Option<Box<DebugInfo>>,
    time: u64,
}

impl Default for MockDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDriver {
    /// A driver where every call succeeds, reporting version 1.30.0 Rev. 51.
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            settings: Mutex::new(HashMap::new()),
            version: Some([1, 30, 0, 51]),
            available: true,
            initialize_ok: true,
            terminate_ok: true,
            custom_event_ok: true,
            settings_ok: true,
            prepare_status: 0,
            send_long_status: 0,
            unprepare_status: 0,
            no_buf_status: 0,
            mod_message_status: 0,
            debug_info: Some(Box::default()),
            time: 0,
        }
    }

    pub fn with_version(mut self, version: [u32; 4]) -> Self {
        self.version = Some(version);
        self
    }

    pub fn failing_version(mut self) -> Self {
        self.version = None;
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    pub fn failing_initialize(mut self) -> Self {
        self.initialize_ok = false;
        self
    }

    pub fn failing_terminate(mut self) -> Self {
        self.terminate_ok = false;
        self
    }

    pub fn failing_custom_event(mut self) -> Self {
        self.custom_event_ok = false;
        self
    }

    pub fn failing_settings(mut self) -> Self {
        self.settings_ok = false;
        self
    }

    pub fn with_prepare_status(mut self, code: u32) -> Self {
        self.prepare_status = code;
        self
    }

    pub fn with_send_long_status(mut self, code: u32) -> Self {
        self.send_long_status = code;
        self
    }

    pub fn with_unprepare_status(mut self, code: u32) -> Self {
        self.unprepare_status = code;
        self
    }

    pub fn with_no_buf_status(mut self, code: u32) -> Self {
        self.no_buf_status = code;
        self
    }

    pub fn with_mod_message_status(mut self, code: u32) -> Self {
        self.mod_message_status = code;
        self
    }

    pub fn with_debug_info(mut self, info: DebugInfo) -> Self {
        self.debug_info = Some(Box::new(info));
        self
    }

    /// `GetDriverDebugInfo` returns null.
    pub fn without_debug_info(mut self) -> Self {
        self.debug_info = None;
        self
    }

    pub fn with_time(mut self, time: u64) -> Self {
        self.time = time;
        self
    }

    pub fn with_setting(self, setting: u32, value: u32) -> Self {
        self.settings.lock().insert(setting, value);
        self
    }

    pub fn setting(&self, setting: u32) -> Option<u32> {
        self.settings.lock().get(&setting).copied()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().iter().filter(|c| predicate(c)).count()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }
}

impl Driver for MockDriver {
    fn return_kdmapi_ver(
        &self,
        major: &mut u32,
        minor: &mut u32,
        build: &mut u32,
        revision: &mut u32,
    ) -> bool {
        self.record(Call::ReturnKdmapiVer);
        match self.version {
            Some([a, b, c, d]) => {
                *major = a;
                *minor = b;
                *build = c;
                *revision = d;
                true
            }
            None => false,
        }
    }

    fn is_kdmapi_available(&self) -> bool {
        self.record(Call::IsKdmapiAvailable);
        self.available
    }

    fn initialize_kdmapi_stream(&self) -> bool {
        self.record(Call::InitializeKdmapiStream);
        self.initialize_ok
    }

    fn terminate_kdmapi_stream(&self) -> bool {
        self.record(Call::TerminateKdmapiStream);
        self.terminate_ok
    }

    fn reset_kdmapi_stream(&self) {
        self.record(Call::ResetKdmapiStream);
    }

    fn send_custom_event(&self, event_type: u32, channel: u32, param: u32) -> bool {
        self.record(Call::SendCustomEvent {
            event_type,
            channel,
            param,
        });
        self.custom_event_ok
    }

    fn send_direct_data(&self, message: u32) {
        self.record(Call::SendDirectData(message));
    }

    fn send_direct_data_no_buf(&self, message: u32) {
        self.record(Call::SendDirectDataNoBuf(message));
    }

    unsafe fn send_direct_long_data(&self, header: *mut MidiHdr, header_size: u32) -> u32 {
        let hdr = std::ptr::read_unaligned(header);
        let data = std::slice::from_raw_parts(
            hdr.lp_data as *const u8,
            hdr.dw_buffer_length as usize,
        )
        .to_vec();
        self.record(Call::SendDirectLongData {
            size: header_size,
            data,
        });
        if hdr.dw_flags & MHDR_PREPARED == 0 {
            return MmResult::WaveUnprepared as u32;
        }
        if self.send_long_status == 0 {
            (*header).dw_flags = hdr.dw_flags | MHDR_DONE;
        }
        self.send_long_status
    }

    unsafe fn send_direct_long_data_no_buf(&self, data: *const c_char, length: u32) -> u32 {
        let bytes = std::slice::from_raw_parts(data as *const u8, length as usize).to_vec();
        self.record(Call::SendDirectLongDataNoBuf(bytes));
        self.no_buf_status
    }

    unsafe fn prepare_long_data(&self, header: *mut MidiHdr, header_size: u32) -> u32 {
        self.record(Call::PrepareLongData { size: header_size });
        if self.prepare_status == 0 {
            let flags = (*header).dw_flags;
            (*header).dw_flags = flags | MHDR_PREPARED;
        }
        self.prepare_status
    }

    unsafe fn unprepare_long_data(&self, header: *mut MidiHdr, header_size: u32) -> u32 {
        self.record(Call::UnprepareLongData { size: header_size });
        if self.unprepare_status == 0 {
            let flags = (*header).dw_flags;
            (*header).dw_flags = flags & !MHDR_PREPARED;
        }
        self.unprepare_status
    }

    unsafe fn driver_settings(
        &self,
        setting: u32,
        mode: u32,
        value: *mut c_void,
        value_size: u32,
    ) -> bool {
        self.record(Call::DriverSettings {
            setting,
            mode,
            size: value_size,
        });
        if !self.settings_ok || value_size as usize != std::mem::size_of::<u32>() {
            return false;
        }

        let mut settings = self.settings.lock();
        if mode == SettingMode::Get as u32 {
            let current = settings.get(&setting).copied().unwrap_or(0);
            std::ptr::write_unaligned(value as *mut u32, current);
        } else {
            settings.insert(setting, std::ptr::read_unaligned(value as *const u32));
        }
        true
    }

    fn get_driver_debug_info(&self) -> *const DebugInfo {
        self.record(Call::GetDriverDebugInfo);
        match &self.debug_info {
            Some(info) => &**info as *const DebugInfo,
            None => std::ptr::null(),
        }
    }

    unsafe fn load_custom_soundfonts_list(&self, directory: *const u16) {
        let mut len = 0;
        while *directory.add(len) != 0 {
            len += 1;
        }
        let wide = std::slice::from_raw_parts(directory, len);
        self.record(Call::LoadCustomSoundFontsList(String::from_utf16_lossy(wide)));
    }

    fn time_get_time64(&self) -> u64 {
        self.record(Call::TimeGetTime64);
        self.time
    }

    unsafe fn mod_message(
        &self,
        device_id: u32,
        message: u32,
        user: usize,
        param1: usize,
        param2: usize,
    ) -> u32 {
        self.record(Call::ModMessage {
            device_id,
            message,
            user,
            param1,
            param2,
        });
        self.mod_message_status
    }
}
