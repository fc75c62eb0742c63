//! Setup wizard for adding a canteen.
//!
//! Two steps, no state kept between them beyond the returned values: pick a
//! zone and radius, then pick one of the canteens found around that zone.

pub mod error;
pub mod flow;
pub mod zone;

pub use error::{FlowAbort, FlowError};
pub use flow::{CanteenChoice, ConfigEntry, SetupFlow};
pub use zone::{ZoneLocation, ZoneRegistry};
