//! Static lookup tables from the panel documentation

pub mod device;
pub mod display;
pub mod log_event;
pub mod speech;
pub mod zone_group;

pub use display::DisplayState;
pub use log_event::{SpecialEvent, SubjectKind};
pub use zone_group::{ZoneGroup, ZoneGroupMatch};
