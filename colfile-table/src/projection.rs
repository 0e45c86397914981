use colfile_result::{Error, Result};
use colfile_types::AttributeOrdinal;

/// Which attributes a scan reads.
///
/// Hosts hand projections over either as a per-attribute flag array or as a
/// list of ordinals; both forms resolve to the same ascending ordinal list.
/// An empty selection in either form means every attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Projection {
    #[default]
    All,
    /// `mask[i]` selects attribute `i`. Must cover every attribute.
    Mask(Vec<bool>),
    /// Zero-based ordinals, in any order, duplicates allowed.
    Ordinals(Vec<AttributeOrdinal>),
}

impl Projection {
    pub fn ordinals(ordinals: impl IntoIterator<Item = AttributeOrdinal>) -> Self {
        Projection::Ordinals(ordinals.into_iter().collect())
    }

    pub fn mask(mask: impl Into<Vec<bool>>) -> Self {
        Projection::Mask(mask.into())
    }

    /// Resolve to a sorted, deduplicated list of ordinals for a table with
    /// `attribute_count` attributes.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgumentError`] if an ordinal is out of range or a
    /// mask's length differs from `attribute_count`.
    pub fn resolve(&self, attribute_count: usize) -> Result<Vec<AttributeOrdinal>> {
        let all = || (0..attribute_count).collect::<Vec<_>>();
        match self {
            Projection::All => Ok(all()),
            Projection::Mask(mask) => {
                if mask.len() != attribute_count {
                    return Err(Error::invalid_argument(format!(
                        "projection mask has {} entries but the table has {attribute_count} attributes",
                        mask.len()
                    )));
                }
                let selected: Vec<_> = mask
                    .iter()
                    .enumerate()
                    .filter_map(|(i, &on)| on.then_some(i))
                    .collect();
                Ok(if selected.is_empty() { all() } else { selected })
            }
            Projection::Ordinals(ordinals) => {
                if ordinals.is_empty() {
                    return Ok(all());
                }
                if let Some(&bad) = ordinals.iter().find(|&&o| o >= attribute_count) {
                    return Err(Error::invalid_argument(format!(
                        "projection ordinal {bad} out of range [0, {attribute_count})"
                    )));
                }
                let mut out = ordinals.clone();
                out.sort_unstable();
                out.dedup();
                Ok(out)
            }
        }
    }
}

impl From<Vec<AttributeOrdinal>> for Projection {
    fn from(ordinals: Vec<AttributeOrdinal>) -> Self {
        Projection::Ordinals(ordinals)
    }
}

impl From<&[AttributeOrdinal]> for Projection {
    fn from(ordinals: &[AttributeOrdinal]) -> Self {
        Projection::Ordinals(ordinals.to_vec())
    }
}

impl From<Vec<bool>> for Projection {
    fn from(mask: Vec<bool>) -> Self {
        Projection::Mask(mask)
    }
}

impl From<&[bool]> for Projection {
    fn from(mask: &[bool]) -> Self {
        Projection::Mask(mask.to_vec())
    }
}
