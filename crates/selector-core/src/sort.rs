//! Sort specification parsing
//!
//! Output formatters accept a compact sort string such as `vcpus:asc,memory:desc`.
//! The first column is the primary key. Column names are passed through as-is;
//! checking them is the formatter's job.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sort direction for a column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(Error::InvalidSortSpec {
                token: s.to_string(),
                message: format!("unknown direction '{}', expected asc or desc", other),
            }),
        }
    }
}

/// One sort key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortColumn {
    pub column: String,
    pub direction: SortDirection,
}

/// Ordered sort keys, primary key first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOptions {
    pub columns: Vec<SortColumn>,
}

impl SortOptions {
    /// Parse an optional sort string
    ///
    /// `None` means no sort was requested and yields `None`; an empty string is an
    /// explicit empty sort and yields `Some` with no columns.
    pub fn parse(sort: Option<&str>) -> Result<Option<Self>> {
        sort.map(str::parse::<Self>).transpose()
    }
}

impl FromStr for SortOptions {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut columns = Vec::new();
        for token in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let (column, direction) = match token.split_once(':') {
                Some((column, direction)) => (column.trim(), direction.parse()?),
                None => (token, SortDirection::Asc),
            };
            if column.is_empty() {
                return Err(Error::InvalidSortSpec {
                    token: token.to_string(),
                    message: "missing column name".to_string(),
                });
            }
            columns.push(SortColumn {
                column: column.to_string(),
                direction,
            });
        }
        Ok(Self { columns })
    }
}

impl fmt::Display for SortOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .columns
            .iter()
            .map(|c| format!("{}:{}", c.column, c.direction))
            .collect();
        f.write_str(&rendered.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(options: &SortOptions) -> Vec<(&str, SortDirection)> {
        options
            .columns
            .iter()
            .map(|c| (c.column.as_str(), c.direction))
            .collect()
    }

    #[test]
    fn test_parse_multiple_columns_in_order() {
        let options = SortOptions::parse(Some("vcpus:asc,memory:desc")).unwrap().unwrap();
        assert_eq!(
            pairs(&options),
            vec![("vcpus", SortDirection::Asc), ("memory", SortDirection::Desc)]
        );
    }

    #[test]
    fn test_direction_defaults_to_asc() {
        let options = SortOptions::parse(Some("memory")).unwrap().unwrap();
        assert_eq!(pairs(&options), vec![("memory", SortDirection::Asc)]);
    }

    #[test]
    fn test_absent_vs_empty() {
        assert_eq!(SortOptions::parse(None).unwrap(), None);
        assert_eq!(
            SortOptions::parse(Some("")).unwrap(),
            Some(SortOptions { columns: vec![] })
        );
    }

    #[test]
    fn test_direction_is_case_insensitive() {
        let options: SortOptions = "gpus:DESC, price:Asc".parse().unwrap();
        assert_eq!(
            pairs(&options),
            vec![("gpus", SortDirection::Desc), ("price", SortDirection::Asc)]
        );
    }

    #[test]
    fn test_unknown_direction_is_rejected() {
        assert!(matches!(
            SortOptions::parse(Some("vcpus:sideways")),
            Err(Error::InvalidSortSpec { .. })
        ));
        assert!(matches!(
            SortOptions::parse(Some(":desc")),
            Err(Error::InvalidSortSpec { .. })
        ));
    }

    #[test]
    fn test_display_canonical_form() {
        let options: SortOptions = "vcpus,memory:DESC".parse().unwrap();
        assert_eq!(options.to_string(), "vcpus:asc,memory:desc");
        assert_eq!(options.to_string().parse::<SortOptions>().unwrap(), options);
    }
}
