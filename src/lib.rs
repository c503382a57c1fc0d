// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! A free-fly first-person camera and a small wgpu viewer that flies it
//! through a field of textured, spinning cubes.
//!
//! The camera math in [`camera::core::Camera`] is GPU-free: keyboard moves
//! the eye along the look and right vectors scaled by elapsed time, cursor
//! deltas turn yaw and pitch (pitch optionally clamped to ±89°), and the
//! scroll wheel narrows or widens the field of view. Input is polled: window
//! events accumulate in an [`input::InputState`] and [`input::update`]
//! applies one snapshot per frame.
//!
//! # Key entry points
//!
//! - [`Camera`] - yaw/pitch fly camera with view and projection matrices
//! - [`InputState`] / [`input::update`] - polled input applied per frame
//! - [`FlyEngine`] - GPU context, camera uniform and cube pass
//! - [`Options`] - TOML configuration (window, camera, scene, key bindings)
//! - `Viewer` - standalone winit window (feature `viewer`)

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use camera::core::{Camera, CameraMovement};
pub use engine::FlyEngine;
pub use error::FlycamError;
pub use input::{InputEvent, InputState, KeyAction};
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
