//! Planner size estimation.
//!
//! Column files have no pages of their own, so the estimate prices the
//! table as if its rows were laid out in the host's heap pages. The result
//! is advisory: it is computed on demand and never persisted.

use colfile_result::{Error, Result};
use colfile_types::{BlockNumber, TableHandle};

use crate::constants::{
    BLOCK_SIZE, DEFAULT_VARIABLE_WIDTH, ITEM_POINTER_SIZE, MIN_UNANALYZED_PAGES,
    PAGE_HEADER_SIZE, TUPLE_HEADER_SIZE,
};

/// Page geometry and fallbacks used by [`estimate_size`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimatorConfig {
    pub page_size: usize,
    pub page_header_size: usize,
    pub tuple_header_size: usize,
    pub item_pointer_size: usize,
    /// Floor applied to tables the host has never analyzed.
    pub min_unanalyzed_pages: BlockNumber,
    /// Width used for an attribute whose width is unknown.
    pub default_variable_width: i32,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            page_size: BLOCK_SIZE,
            page_header_size: PAGE_HEADER_SIZE,
            tuple_header_size: TUPLE_HEADER_SIZE,
            item_pointer_size: ITEM_POINTER_SIZE,
            min_unanalyzed_pages: MIN_UNANALYZED_PAGES,
            default_variable_width: DEFAULT_VARIABLE_WIDTH,
        }
    }
}

impl EstimatorConfig {
    /// Bytes per page available for tuples.
    #[inline]
    pub fn page_capacity(&self) -> usize {
        self.page_size.saturating_sub(self.page_header_size)
    }

    /// Per-row cost on top of the attribute data.
    #[inline]
    pub fn fixed_row_overhead(&self) -> usize {
        self.tuple_header_size + self.item_pointer_size
    }
}

/// Planner-facing size of a table.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeEstimate {
    pub pages: BlockNumber,
    pub tuples: f64,
    /// Fraction of pages known all-visible, in `[0, 1]`.
    pub all_visible_fraction: f64,
}

/// Fill in unknown entries of `widths` and return the resulting row width.
///
/// An entry `<= 0` is replaced by the attribute's declared width when that
/// is positive, and by `default_variable_width` otherwise. Resolved widths
/// are written back so the caller can reuse them.
pub fn resolve_widths(
    config: &EstimatorConfig,
    table: &TableHandle,
    widths: &mut [i32],
) -> Result<i64> {
    check_width_hints(table, widths)?;

    let mut total: i64 = 0;
    for (width, attr) in widths.iter_mut().zip(table.attributes()) {
        if *width <= 0 {
            *width = if attr.width > 0 {
                i32::from(attr.width)
            } else {
                config.default_variable_width
            };
        }
        total += i64::from(*width);
    }
    Ok(total)
}

fn check_width_hints(table: &TableHandle, widths: &[i32]) -> Result<()> {
    if widths.len() != table.attribute_count() {
        return Err(Error::invalid_argument(format!(
            "width hints cover {} attributes but table {} has {}",
            widths.len(),
            table.id(),
            table.attribute_count()
        )));
    }
    Ok(())
}

/// Estimate the size of `table` given `current_pages` of allocated storage.
///
/// Catalog statistics come from [`TableHandle::stats`]. `widths` holds one
/// per-attribute width hint; it is always length-checked but only consulted
/// (and completed, see [`resolve_widths`]) when the table has no recorded
/// page count to derive a tuple density from.
///
/// # Errors
///
/// [`Error::InvalidArgumentError`] if `widths` does not have one entry per
/// attribute.
pub fn estimate_size(
    config: &EstimatorConfig,
    table: &TableHandle,
    current_pages: BlockNumber,
    widths: &mut [i32],
) -> Result<SizeEstimate> {
    check_width_hints(table, widths)?;
    let stats = table.stats();
    let mut pages = current_pages;

    // A never-analyzed table is assumed to grow; don't let the planner bet
    // on it staying tiny. Parents of inheritance trees are often empty on
    // purpose and are taken at face value.
    if pages < config.min_unanalyzed_pages && stats.rel_pages == 0 && !stats.has_subclass {
        pages = config.min_unanalyzed_pages;
    }

    if pages == 0 {
        return Ok(SizeEstimate::default());
    }

    let density = if stats.rel_pages > 0 {
        stats.rel_tuples / f64::from(stats.rel_pages)
    } else {
        let row_width = resolve_widths(config, table, widths)?
            + config.fixed_row_overhead() as i64;
        // Integer division: whole rows per page.
        (config.page_capacity() as i64 / row_width.max(1)) as f64
    };
    let tuples = (density * f64::from(pages)).round_ties_even();

    let all_visible_fraction = if stats.rel_all_visible == 0 {
        0.0
    } else if stats.rel_all_visible >= pages {
        1.0
    } else {
        f64::from(stats.rel_all_visible) / f64::from(pages)
    };

    let estimate = SizeEstimate {
        pages,
        tuples,
        all_visible_fraction,
    };
    tracing::debug!(
        table_id = table.id(),
        current_pages,
        pages = estimate.pages,
        tuples = estimate.tuples,
        all_visible_fraction = estimate.all_visible_fraction,
        "estimated table size"
    );
    Ok(estimate)
}
