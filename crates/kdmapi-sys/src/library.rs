//! Dynamic loading of the OmniMIDI shared library.

use crate::driver::Driver;
use crate::error::{LoadError, Result};
use crate::types::{DebugInfo, MidiHdr};
use libloading::Library;
use std::ffi::{c_char, c_void};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Library name handed to the platform loader when no path is configured.
pub const DEFAULT_LIBRARY_NAME: &str = "OmniMIDI.dll";

/// Win32 `BOOL`.
type Bool = i32;

type ReturnKdmapiVerFn =
    unsafe extern "system" fn(*mut u32, *mut u32, *mut u32, *mut u32) -> Bool;
type IsKdmapiAvailableFn = unsafe extern "system" fn() -> Bool;
type InitializeKdmapiStreamFn = unsafe extern "system" fn() -> Bool;
type TerminateKdmapiStreamFn = unsafe extern "system" fn() -> Bool;
type ResetKdmapiStreamFn = unsafe extern "system" fn();
type SendCustomEventFn = unsafe extern "system" fn(u32, u32, u32) -> Bool;
type SendDirectDataFn = unsafe extern "system" fn(u32);
type SendDirectDataNoBufFn = unsafe extern "system" fn(u32);
type SendDirectLongDataFn = unsafe extern "system" fn(*mut MidiHdr, u32) -> u32;
type SendDirectLongDataNoBufFn = unsafe extern "system" fn(*const c_char, u32) -> u32;
type PrepareLongDataFn = unsafe extern "system" fn(*mut MidiHdr, u32) -> u32;
type UnprepareLongDataFn = unsafe extern "system" fn(*mut MidiHdr, u32) -> u32;
type DriverSettingsFn = unsafe extern "system" fn(u32, u32, *mut c_void, u32) -> Bool;
type GetDriverDebugInfoFn = unsafe extern "system" fn() -> *const DebugInfo;
type LoadCustomSoundFontsListFn = unsafe extern "system" fn(*const u16);
type TimeGetTime64Fn = unsafe extern "system" fn() -> u64;
type ModMessageFn = unsafe extern "system" fn(u32, u32, usize, usize, usize) -> u32;

struct EntryPoints {
    return_kdmapi_ver: ReturnKdmapiVerFn,
    is_kdmapi_available: IsKdmapiAvailableFn,
    initialize_kdmapi_stream: InitializeKdmapiStreamFn,
    terminate_kdmapi_stream: TerminateKdmapiStreamFn,
    reset_kdmapi_stream: ResetKdmapiStreamFn,
    send_custom_event: SendCustomEventFn,
    send_direct_data: SendDirectDataFn,
    send_direct_data_no_buf: SendDirectDataNoBufFn,
    send_direct_long_data: SendDirectLongDataFn,
    send_direct_long_data_no_buf: SendDirectLongDataNoBufFn,
    prepare_long_data: PrepareLongDataFn,
    unprepare_long_data: UnprepareLongDataFn,
    driver_settings: DriverSettingsFn,
    get_driver_debug_info: GetDriverDebugInfoFn,
    load_custom_soundfonts_list: LoadCustomSoundFontsListFn,
    time_get_time64: TimeGetTime64Fn,
    mod_message: ModMessageFn,
}

impl EntryPoints {
    /// # Safety
    /// The library must export each symbol with the declared signature.
    unsafe fn resolve(library: &Library, path: &Path) -> Result<Self> {
        Ok(Self {
            return_kdmapi_ver: symbol(library, path, "ReturnKDMAPIVer")?,
            is_kdmapi_available: symbol(library, path, "IsKDMAPIAvailable")?,
            initialize_kdmapi_stream: symbol(library, path, "InitializeKDMAPIStream")?,
            terminate_kdmapi_stream: symbol(library, path, "TerminateKDMAPIStream")?,
            reset_kdmapi_stream: symbol(library, path, "ResetKDMAPIStream")?,
            send_custom_event: symbol(library, path, "SendCustomEvent")?,
            send_direct_data: symbol(library, path, "SendDirectData")?,
            send_direct_data_no_buf: symbol(library, path, "SendDirectDataNoBuf")?,
            send_direct_long_data: symbol(library, path, "SendDirectLongData")?,
            send_direct_long_data_no_buf: symbol(library, path, "SendDirectLongDataNoBuf")?,
            prepare_long_data: symbol(library, path, "PrepareLongData")?,
            unprepare_long_data: symbol(library, path, "UnprepareLongData")?,
            driver_settings: symbol(library, path, "DriverSettings")?,
            get_driver_debug_info: symbol(library, path, "GetDriverDebugInfo")?,
            load_custom_soundfonts_list: symbol(library, path, "LoadCustomSoundFontsList")?,
            time_get_time64: symbol(library, path, "timeGetTime64")?,
            mod_message: symbol(library, path, "modMessage")?,
        })
    }
}

unsafe fn symbol<T: Copy>(library: &Library, path: &Path, name: &'static str) -> Result<T> {
    library
        .get::<T>(name.as_bytes())
        .map(|sym| *sym)
        .map_err(|e| LoadError::MissingSymbol {
            path: path.to_path_buf(),
            symbol: name,
            reason: e.to_string(),
        })
}

/// A loaded OmniMIDI library with every entry point resolved.
///
/// The function pointers stay valid for as long as this value lives, since it
/// owns the library handle.
pub struct NativeLibrary {
    entries: EntryPoints,
    path: PathBuf,
    _library: Library,
}

impl NativeLibrary {
    /// Load the library at `path` and resolve the full entry-point table.
    ///
    /// A bare file name goes through the platform search order.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Loading runs the driver's initialisers; nothing else can be checked here.
        let library = unsafe {
            Library::new(path).map_err(|e| LoadError::Open {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
        };

        let entries = unsafe { EntryPoints::resolve(&library, path)? };
        debug!("Loaded KDMAPI library from {}", path.display());

        Ok(Self {
            entries,
            path: path.to_path_buf(),
            _library: library,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for NativeLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeLibrary")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl Driver for NativeLibrary {
    fn return_kdmapi_ver(
        &self,
        major: &mut u32,
        minor: &mut u32,
        build: &mut u32,
        revision: &mut u32,
    ) -> bool {
        unsafe { (self.entries.return_kdmapi_ver)(major, minor, build, revision) != 0 }
    }

    fn is_kdmapi_available(&self) -> bool {
        unsafe { (self.entries.is_kdmapi_available)() != 0 }
    }

    fn initialize_kdmapi_stream(&self) -> bool {
        unsafe { (self.entries.initialize_kdmapi_stream)() != 0 }
    }

    fn terminate_kdmapi_stream(&self) -> bool {
        unsafe { (self.entries.terminate_kdmapi_stream)() != 0 }
    }

    fn reset_kdmapi_stream(&self) {
        unsafe { (self.entries.reset_kdmapi_stream)() }
    }

    fn send_custom_event(&self, event_type: u32, channel: u32, param: u32) -> bool {
        unsafe { (self.entries.send_custom_event)(event_type, channel, param) != 0 }
    }

    fn send_direct_data(&self, message: u32) {
        unsafe { (self.entries.send_direct_data)(message) }
    }

    fn send_direct_data_no_buf(&self, message: u32) {
        unsafe { (self.entries.send_direct_data_no_buf)(message) }
    }

    unsafe fn send_direct_long_data(&self, header: *mut MidiHdr, header_size: u32) -> u32 {
        (self.entries.send_direct_long_data)(header, header_size)
    }

    unsafe fn send_direct_long_data_no_buf(&self, data: *const c_char, length: u32) -> u32 {
        (self.entries.send_direct_long_data_no_buf)(data, length)
    }

    unsafe fn prepare_long_data(&self, header: *mut MidiHdr, header_size: u32) -> u32 {
        (self.entries.prepare_long_data)(header, header_size)
    }

    unsafe fn unprepare_long_data(&self, header: *mut MidiHdr, header_size: u32) -> u32 {
        (self.entries.unprepare_long_data)(header, header_size)
    }

    unsafe fn driver_settings(
        &self,
        setting: u32,
        mode: u32,
        value: *mut c_void,
        value_size: u32,
    ) -> bool {
        (self.entries.driver_settings)(setting, mode, value, value_size) != 0
    }

    fn get_driver_debug_info(&self) -> *const DebugInfo {
        unsafe { (self.entries.get_driver_debug_info)() }
    }

    unsafe fn load_custom_soundfonts_list(&self, directory: *const u16) {
        (self.entries.load_custom_soundfonts_list)(directory)
    }

    fn time_get_time64(&self) -> u64 {
        unsafe { (self.entries.time_get_time64)() }
    }

    unsafe fn mod_message(
        &self,
        device_id: u32,
        message: u32,
        user: usize,
        param1: usize,
        param2: usize,
    ) -> u32 {
        (self.entries.mod_message)(device_id, message, user, param1, param2)
    }
}
