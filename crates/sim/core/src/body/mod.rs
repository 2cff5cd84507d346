//! Body model - per-part injury tracking.
//!
//! Six body regions each carry condition, fractures, bleeding, burns,
//! infection, and pain. The model feeds two outputs back into the rest of
//! the simulation: blood and infection drains on the stat ledger during
//! [`BodyModel::tick`], and the capability [`EffectMultipliers`] derived
//! from part conditions.

pub mod model;
pub mod part;

pub use model::{BodyModel, EffectMultipliers};
pub use part::{BodyPart, BodyPartState, BurnLevel};
