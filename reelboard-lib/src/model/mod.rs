//! Typed models

mod film;
mod metrics;
mod people;
mod record;
mod resource;
mod value;

pub use film::*;
pub use metrics::*;
pub use people::*;
pub use record::*;
pub use resource::*;
pub use value::*;
