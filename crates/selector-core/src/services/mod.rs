//! Service presets
//!
//! A service filter (`emr`, `eks-1.21`, ...) names a [`ServicePreset`] whose filters
//! are merged into the caller's filters without overriding anything the caller
//! set explicitly.

pub mod eks;
pub mod emr;
pub mod preset;
pub mod registry;
pub mod version;

pub use eks::{EksInstanceTypeSource, EksPreset, EniMaxPodsSource};
pub use emr::EmrPreset;
pub use preset::{PresetFn, ServicePreset, StaticPreset};
pub use registry::{parse_service, ServiceRegistry};
pub use version::PresetVersion;
