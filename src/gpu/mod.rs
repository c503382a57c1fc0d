//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, shared bind group and
//! sampler helpers, texture upload, and shader composition.

/// Shared wgpu boilerplate helpers for bind groups and samplers.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Sampled textures, depth buffer, and CPU images.
pub mod texture;
