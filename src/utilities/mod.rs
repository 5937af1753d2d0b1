// src/utilities/mod.rs
//! Angle and time conversion utilities

pub mod culture;
pub mod sexagesimal;

pub use culture::{with_culture, Culture};
#[allow(deprecated)]
pub use sexagesimal::dms_to_degrees;
pub use sexagesimal::{
    degrees_to_dms, degrees_to_hms, dms_to_degrees_in, hms_to_degrees, hms_to_hours,
    hours_to_hms,
};
