//! Structural (JSON) encoding of the tree model.
//!
//! Fields appear in schema order, absent optionals are dropped rather than
//! written as `null`, and every identifiable, submodel element and data
//! specification carries a `modelType` tag the decoder dispatches on.

mod reader;
mod writer;

pub use reader::{
    asset_information_from_structural, concept_description_from_structural,
    environment_from_structural, reference_from_structural, shell_from_structural,
    submodel_element_from_structural, submodel_from_structural,
};
pub use writer::to_structural;
