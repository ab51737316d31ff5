pub mod clock;
pub mod time;
pub mod validate;

pub use clock::{Clock, ManualClock, SystemClock};
pub use time::parse_timestamp;
pub use validate::{validate_file_name, validate_remote_uri};
