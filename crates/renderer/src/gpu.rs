//! GPU orchestration for the viewer.
//!
//! - `context` owns wgpu instance/device/surface wiring and knows how to
//!   rebuild swapchain state when the window resizes.
//! - `geometry` uploads the static full-screen quad once and draws it.
//! - `program` compiles the two shader stages leniently and routes
//!   name-keyed uniform writes into a std140 block.
//! - `capture` copies the depth attachment back to the host after each draw
//!   so the color-range estimator can see the full sample distribution.
//! - `state` glues everything together and exposes the `GpuState` API used
//!   by `window`.

mod capture;
mod context;
mod geometry;
mod program;
mod state;

pub(crate) use state::GpuState;
