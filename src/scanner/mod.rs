//! Scanner demo - frame sampling, Code128-style validation and scan history
//!
//! - `code128`: string validator, checksum and encoder
//! - `frame`: RGBA frames and the brightness-threshold bar detector
//! - `capture`: capture collaborator trait and the synthetic camera
//! - `candidates`: strategies supplying the string to validate after a detection
//! - `history`: bounded persisted scan log
//! - `session`: the scan state machine tying the above together

pub mod candidates;
pub mod capture;
pub mod code128;
pub mod frame;
pub mod history;
pub mod session;

pub use candidates::MockCandidates;
pub use capture::SyntheticCamera;
pub use code128::{ValidationResult, encode};
pub use history::ScanHistory;
pub use session::{ScanEvent, ScanSession, ScanSnapshot, SessionState};
