//! Rendering for the cube scene.
//!
//! Static cube geometry and instance transforms live in [`cube`]; the GPU
//! pass that draws them lives in [`cube_pass`].

pub mod cube;
pub mod cube_pass;
pub(crate) mod pipeline_util;
