pub use self::{creature::*, drone::*, geometry::*, radar::*};

pub(crate) mod creature;
pub(crate) mod drone;
pub(crate) mod geometry;
pub(crate) mod radar;
