//! Point-to-point services built on the realtime core.
//!
//! - `MessageRouter`: direct messages, dropped when the recipient is offline.
//! - `ReadReceiptRelay`: coarse per-conversation read acknowledgements.

pub mod direct_message;
pub mod read_receipt;

pub use direct_message::MessageRouter;
pub use read_receipt::ReadReceiptRelay;
