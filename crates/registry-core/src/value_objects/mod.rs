//! Value objects - immutable types that represent domain concepts

mod address;
mod phone;

pub use address::{Address, AddressParseError};
pub use phone::{PhoneRegion, DEFAULT_PHONE_REGION};
