pub mod format;
pub mod transport;

pub use transport::{HttpTransport, Transport};
