//! Owned copy of the driver's debug telemetry.

use kdmapi_sys::DebugInfo;
use serde::{Deserialize, Serialize};

/// Point-in-time copy of [`DebugInfo`].
///
/// The driver owns the record it points to and may rewrite it at any moment,
/// so the facade never hands out that pointer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DebugSnapshot {
    pub rendering_time: f32,
    /// Active voices per MIDI channel.
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

impl DebugSnapshot {
    pub fn total_active_voices(&self) -> u64 {
        self.active_voices.iter().map(|&v| u64::from(v)).sum()
    }
}

impl From<DebugInfo> for DebugSnapshot {
    fn from(info: DebugInfo) -> Self {
        // Packed fields: copy each out by value.
        Self {
            rendering_time: info.rendering_time,
            active_voices: info.active_voices,
            asio_input_latency: info.asio_input_latency,
            asio_output_latency: info.asio_output_latency,
            health_thread_time: info.health_thread_time,
            at_thread_time: info.at_thread_time,
            ep_thread_time: info.ep_thread_time,
            cooked_thread_time: info.cooked_thread_time,
            current_sf_list: info.current_sf_list,
            audio_latency: info.audio_latency,
            audio_buffer_size: info.audio_buffer_size,
        }
    }
}
