//! EMR instance family support
//!
//! EMR only launches on specific instance families. Each family group below is a
//! sub-pattern; the allow-list is their alternation. Graviton2 groups are only
//! offered from the release that added them.

use super::preset::ServicePreset;
use super::version::PresetVersion;
use crate::filters::{Filters, Pattern};
use crate::Result;

/// Release used when the service filter carries no version
pub const EMR_DEFAULT_VERSION: &str = "5.20.0";

/// First release with Graviton2 (m6g, c6g, r6g) support, as (major, minor, patch)
pub const EMR_GRAVITON_RELEASE: (u32, u32, u32) = (5, 30, 0);

struct FamilyPattern {
    pattern: &'static str,
    minimum_release: Option<(u32, u32, u32)>,
}

const fn family(pattern: &'static str) -> FamilyPattern {
    FamilyPattern {
        pattern,
        minimum_release: None,
    }
}

const fn graviton(pattern: &'static str) -> FamilyPattern {
    FamilyPattern {
        pattern,
        minimum_release: Some(EMR_GRAVITON_RELEASE),
    }
}

const EMR_FAMILIES: &[FamilyPattern] = &[
    family(r"m[1-2,4]|m3\.2?xlarge|m5[adgn]*\.([0-9]*xlarge|metal)"),
    graviton(r"m6g\.[0-9]*xlarge"),
    family(r"c1\.|c3\.[0-9]*xlarge|c4\.|c5[adn]?\.[0-9]*xlarge"),
    graviton(r"c6g\.[0-9]*xlarge"),
    family(r"cg1\.|cc2\.|cr1\."),
    family(r"r[3-4]\.[0-9]*xlarge|r5[adn]?\.([0-9]*xlarge|metal)"),
    graviton(r"r6g\.[1-9]*xlarge"),
    family(r"i2\.|i3[en]*\.[0-9]*xlarge"),
    family(r"x1\.32xlarge|z1d\.[0-9]*xlarge"),
    family(r"d2\.|g2\.2xlarge|g[3-4][sdn]*\.[0-9]*xlarge|p2\.|p3\.|p3dn\.|hi1\.|hs1\.|h1\."),
];

/// Compile the EMR allow-list
///
/// With no release every family is admitted; otherwise families introduced after
/// `release` are left out.
pub fn emr_allow_list(release: Option<&PresetVersion>) -> Result<Pattern> {
    Pattern::any_of(
        EMR_FAMILIES
            .iter()
            .filter(|group| match (&group.minimum_release, release) {
                (Some((major, minor, patch)), Some(release)) => {
                    *release >= PresetVersion::new(*major, *minor, *patch)
                }
                _ => true,
            })
            .map(|group| group.pattern),
    )
}

/// Preset for `--service emr[-<release>]`
#[derive(Debug, Clone, Default)]
pub struct EmrPreset;

impl ServicePreset for EmrPreset {
    fn filters(&self, version: &str) -> Result<Filters> {
        let version = if version.is_empty() {
            EMR_DEFAULT_VERSION
        } else {
            version
        };
        let release = PresetVersion::parse(version)?;

        Ok(Filters {
            allow_list: Some(emr_allow_list(Some(&release))?),
            root_device_type: Some("ebs".to_string()),
            virtualization_type: Some("hvm".to_string()),
            ..Default::default()
        })
    }
}
