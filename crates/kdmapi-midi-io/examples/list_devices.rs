use kdmapi_core::Kdmapi;
use kdmapi_midi_io::{list_devices, KdmapiOutput, MidiOutputMessage, MidiOutputPort};
use std::thread;
use std::time::Duration;

fn main() {
    tracing_subscriber::fmt::init();

    let kdmapi = match Kdmapi::global() {
        Ok(kdmapi) => kdmapi,
        Err(e) => {
            eprintln!("KDMAPI not loaded: {}", e);
            return;
        }
    };

    println!("=== MIDI Output Devices ===");
    let devices = list_devices(kdmapi).unwrap_or_default();
    if devices.is_empty() {
        println!("  (none found)");
        return;
    }
    for (i, dev) in devices.iter().enumerate() {
        println!("  [{}] {}", i, dev.name);
    }

    let mut port = KdmapiOutput::connect(kdmapi).unwrap();
    let gm_on = MidiOutputMessage::sysex(&[0x7E, 0x7F, 0x09, 0x01]).unwrap();
    port.send(&gm_on).unwrap();
    port.send_note_on(0, 60, 100).unwrap();
    thread::sleep(Duration::from_millis(500));
    port.send_note_off(0, 60, 0).unwrap();
    port.close().unwrap();
}
