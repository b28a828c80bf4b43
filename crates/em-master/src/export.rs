//! Download payload for the export button.

use crate::session::SessionInfo;

/// A file offered to the user for download.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportPayload {
    pub file_name: &'static str,
    pub media_type: &'static str,
    pub body: Vec<u8>,
}

/// Placeholder export. MIDI encoding is not implemented; every session
/// yields the same text file.
pub fn export_melody(_info: &SessionInfo) -> ExportPayload {
    ExportPayload {
        file_name: "emotive-melody.txt",
        media_type: "text/plain",
        body: b"MIDI export coming soon".to_vec(),
    }
}
