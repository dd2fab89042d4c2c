pub mod address;
pub mod authorization;
pub mod clock;
pub mod data;

pub use address::{AddressError, normalize_address};
pub use authorization::{Authorization, AuthorizationStatus, format_hms};
pub use clock::{Clock, ManualClock, SystemClock, UptimeClock};
pub use data::{DeviceRecord, FIELD_CAPACITY, FieldPolicy};
