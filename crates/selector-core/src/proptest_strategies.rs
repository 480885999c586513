//! Property-based testing strategies for generating test data
//!
//! These strategies generate random but valid filters and catalog records for
//! the transform and merge property tests.

#![cfg(test)]

use crate::catalog::{FpgaInfo, GpuDeviceInfo, GpuInfo, InstanceTypeInfo};
use crate::filters::{
    ByteQuantity, ByteQuantityRangeFilter, CpuArchitecture, Filters, IntRangeFilter, Pattern,
};
use proptest::option;
use proptest::prelude::*;

/// Strategy for generating CPU architectures
pub fn cpu_architecture_strategy() -> impl Strategy<Value = CpuArchitecture> {
    prop_oneof![
        Just(CpuArchitecture::X86_64),
        Just(CpuArchitecture::Arm64),
        Just(CpuArchitecture::I386),
        Just(CpuArchitecture::X86_64Mac),
        Just(CpuArchitecture::Arm64Mac),
    ]
}

/// Strategy for ordered integer ranges
pub fn int_range_strategy() -> impl Strategy<Value = IntRangeFilter> {
    (0i32..512, 0i32..512).prop_map(|(a, b)| IntRangeFilter::new(a.min(b), a.max(b)))
}

/// Strategy for ordered memory ranges
pub fn memory_range_strategy() -> impl Strategy<Value = ByteQuantityRangeFilter> {
    (0u64..4_000_000, 0u64..4_000_000).prop_map(|(a, b)| {
        ByteQuantityRangeFilter::new(ByteQuantity::from_mib(a.min(b)), ByteQuantity::from_mib(a.max(b)))
    })
}

/// Strategy for a handful of valid allow/deny patterns
pub fn pattern_strategy() -> impl Strategy<Value = Pattern> {
    prop_oneof![
        Just(r"^m5\..*$"),
        Just(r"^c[5-7]g?\."),
        Just(r"xlarge$"),
        Just(r"^t[2-4]\.(micro|small)$"),
    ]
    .prop_map(|p| Pattern::new(p).expect("fixed test pattern compiles"))
}

/// Strategy for filters that carry no one-shot directives (mergeable preset output)
pub fn preset_filters_strategy() -> impl Strategy<Value = Filters> {
    (
        (
            option::of(any::<bool>()),
            option::of(any::<bool>()),
            option::of(any::<bool>()),
            option::of(any::<bool>()),
            option::of(cpu_architecture_strategy()),
        ),
        (
            option::of(int_range_strategy()),
            option::of(int_range_strategy()),
            option::of(memory_range_strategy()),
        ),
        (
            option::of(pattern_strategy()),
            option::of(pattern_strategy()),
            option::of(proptest::collection::vec("[a-z][0-9][a-z]?\\.[0-9]?x?large", 0..4)),
            option::of(Just("ebs".to_string())),
            option::of(Just("hvm".to_string())),
        ),
    )
        .prop_map(
            |(
                (flexible, emr, bare_metal, fpga, cpu_architecture),
                (gpus_range, vcpus_range, memory_range),
                (allow_list, deny_list, instance_types, root_device_type, virtualization_type),
            )| Filters {
                instance_type_base: None,
                flexible,
                emr,
                service: None,
                bare_metal,
                fpga,
                cpu_architecture,
                gpus_range,
                vcpus_range,
                memory_range,
                allow_list,
                deny_list,
                instance_types,
                root_device_type,
                virtualization_type,
            },
        )
}

/// Strategy for catalog records
pub fn instance_type_info_strategy() -> impl Strategy<Value = InstanceTypeInfo> {
    (
        "[a-z][1-7][a-z]?\\.(large|[1-9]?xlarge)",
        any::<bool>(),
        proptest::collection::vec(cpu_architecture_strategy(), 1..3),
        any::<bool>(),
        option::of(proptest::collection::vec(0u32..9, 1..3)),
        1u64..2_000_000,
        1u32..448,
    )
        .prop_map(
            |(instance_type, bare_metal, supported_architectures, has_fpga, gpu_counts, memory_size_in_mib, default_vcpus)| {
                InstanceTypeInfo {
                    instance_type,
                    bare_metal,
                    supported_architectures,
                    fpga_info: has_fpga.then(FpgaInfo::default),
                    gpu_info: gpu_counts.map(|counts| GpuInfo {
                        gpus: counts
                            .into_iter()
                            .map(|count| GpuDeviceInfo {
                                count,
                                name: None,
                                manufacturer: None,
                            })
                            .collect(),
                    }),
                    memory_size_in_mib,
                    default_vcpus,
                }
            },
        )
}
