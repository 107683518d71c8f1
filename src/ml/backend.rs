// ============================================================
// Layer 5 — Backend Selection
// ============================================================
// CPU (NdArray) unless the crate is built with `--features wgpu`.
//
//   ComputeBackend  — evaluation, similarity inspection
//   TrainBackend    — Autodiff<ComputeBackend>, for training
//
// model.valid() turns a TrainBackend model into a
// ComputeBackend one, so evaluation pays no autodiff cost.

use burn::backend::Autodiff;
use burn::prelude::*;

#[cfg(feature = "wgpu")]
pub type ComputeBackend = burn::backend::Wgpu;

#[cfg(not(feature = "wgpu"))]
pub type ComputeBackend = burn::backend::NdArray<f32>;

pub type TrainBackend = Autodiff<ComputeBackend>;

pub type ComputeDevice = <ComputeBackend as Backend>::Device;

pub fn default_device() -> ComputeDevice {
    ComputeDevice::default()
}
