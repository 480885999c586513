//! Fill-if-empty merge primitive
//!
//! A candidate value only lands in a field that is currently unset. When both
//! sides hold a value the existing one wins, list-typed fields included: a
//! candidate `instance_types` list is discarded rather than concatenated.

use super::Filters;
use crate::{Error, Result};

/// Field-level merge where the receiver's values take precedence
pub trait FillIfEmpty: Sized {
    /// Take values from `candidate` for every field that is unset in `self`
    fn fill_if_empty(&mut self, candidate: Self) -> Result<()>;
}

impl<T> FillIfEmpty for Option<T> {
    fn fill_if_empty(&mut self, candidate: Self) -> Result<()> {
        if self.is_none() {
            *self = candidate;
        }
        Ok(())
    }
}

impl FillIfEmpty for Filters {
    fn fill_if_empty(&mut self, candidate: Self) -> Result<()> {
        // Destructured exhaustively so a new field cannot be silently skipped.
        let Filters {
            instance_type_base,
            flexible,
            emr,
            service,
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
        } = candidate;

        // One-shot directives would re-trigger lookups or recurse into the registry.
        if let Some(base) = instance_type_base {
            return Err(Error::Merge {
                message: format!(
                    "preset filters cannot set instance_type_base (got '{}')",
                    base
                ),
            });
        }
        if let Some(nested) = service {
            return Err(Error::Merge {
                message: format!("preset filters cannot set service (got '{}')", nested),
            });
        }

        self.flexible.fill_if_empty(flexible)?;
        self.emr.fill_if_empty(emr)?;
        self.bare_metal.fill_if_empty(bare_metal)?;
        self.fpga.fill_if_empty(fpga)?;
        self.cpu_architecture.fill_if_empty(cpu_architecture)?;
        self.gpus_range.fill_if_empty(gpus_range)?;
        self.vcpus_range.fill_if_empty(vcpus_range)?;
        self.memory_range.fill_if_empty(memory_range)?;
        self.allow_list.fill_if_empty(allow_list)?;
        self.deny_list.fill_if_empty(deny_list)?;
        self.instance_types.fill_if_empty(instance_types)?;
        self.root_device_type.fill_if_empty(root_device_type)?;
        self.virtualization_type.fill_if_empty(virtualization_type)?;
        Ok(())
    }
}
