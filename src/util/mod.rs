//! Shared utilities for the viewer.

/// Frame pacing and FPS tracking.
pub mod frame_timing;
