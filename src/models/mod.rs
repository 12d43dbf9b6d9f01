//! The three camp records and their persistence operations.
//!
//! Every operation takes a `Store` and goes through the `DbBroker`.
//! Validated fields (camper name and age, signup time) are private and can
//! only change through setters that reject bad values before storage sees them.

pub mod activity;
pub mod camper;
pub mod serialize;
pub mod signup;

pub use activity::{Activity, NewActivity};
pub use camper::{Camper, NewCamper};
pub use signup::{NewSignup, Signup};
