//! Fly-through camera for 3D scene viewing.
//!
//! [`core::Camera`] holds the Euler-angle camera math and is usable without a
//! GPU. [`controller::CameraController`] pairs it with projection parameters
//! and the uniform buffer the shaders read.

/// Camera state, projection and GPU resources.
pub mod controller;
/// Core camera struct and GPU uniform types.
pub mod core;
