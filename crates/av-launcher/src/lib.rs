//! # av-launcher
//!
//! Renders a launch configuration into a single optimizer process
//! invocation (argument list plus scoped `CUDA_VISIBLE_DEVICES`), spawns
//! it with inherited stdio, and relays its exit status.

pub mod command;
pub mod launcher;

pub use command::{
    render_visible_devices, Invocation, DEFAULT_INTERPRETER, DEVICE_VISIBILITY_VAR,
    OPTIMIZER_ENTRY_POINT,
};
pub use launcher::{relay_code, LaunchRecord, LaunchState, Launcher};
