#![no_main]

use libfuzzer_sys::fuzz_target;
use msidata::{xml::XmlReader, WindowsInstallerData};

fuzz_target!(|data: &[u8]| {
    let _ = WindowsInstallerData::load(&mut XmlReader::new(data));
});
