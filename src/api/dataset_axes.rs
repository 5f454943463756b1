use indexmap::IndexMap;

use crate::core::SeriesSource;
use crate::error::{ChartError, ChartResult};

use super::GridGraph;
use super::config::GridGraphConfig;

/// Maps each enabled dataset to its Y axis number.
///
/// A dataset keeps the default axis when the chart type plots on one axis,
/// when axes are hidden, when it has no items or when no axis is configured
/// for it. The used axis numbers must run without gaps from the default axis.
pub(super) fn assign_dataset_axes(
    config: &GridGraphConfig,
    values: &dyn SeriesSource,
) -> ChartResult<IndexMap<usize, usize>> {
    let default_axis = usize::from(config.axis_right);
    let mapping = if config.show_axes && !config.single_axis {
        config.dataset_axis.as_deref()
    } else {
        None
    };

    let mut assigned = IndexMap::new();
    for dataset in enabled_datasets(config, values) {
        let axis = mapping
            .and_then(|axes| axes.get(dataset).copied())
            .filter(|_| values.items_count(dataset) > 0)
            .unwrap_or(default_axis);
        assigned.insert(dataset, axis);
    }

    let max_axis = assigned.values().copied().max().unwrap_or(default_axis);
    let unused: Vec<usize> = (default_axis..=max_axis)
        .filter(|axis| !assigned.values().any(|used| used == axis))
        .collect();
    if !unused.is_empty() {
        return Err(ChartError::UnusedAxis(unused));
    }
    Ok(assigned)
}

fn enabled_datasets(config: &GridGraphConfig, values: &dyn SeriesSource) -> Vec<usize> {
    match &config.enabled_datasets {
        Some(datasets) if !datasets.is_empty() => datasets.clone(),
        _ => (0..values.dataset_count().max(1)).collect(),
    }
}

impl GridGraph<'_> {
    /// Dataset number to Y axis number, in dataset order.
    #[must_use]
    pub fn dataset_axes(&self) -> &IndexMap<usize, usize> {
        &self.dataset_axes
    }

    /// Y axis used by `dataset`; the default axis for unknown datasets.
    #[must_use]
    pub fn dataset_y_axis(&self, dataset: usize) -> usize {
        self.dataset_axes
            .get(&dataset)
            .copied()
            .unwrap_or_else(|| usize::from(self.config.axis_right))
    }

    #[must_use]
    pub fn y_axis_count(&self) -> usize {
        if self.dataset_axes.len() <= 1 {
            return 1;
        }
        let mut axes: Vec<usize> = self.dataset_axes.values().copied().collect();
        axes.sort_unstable();
        axes.dedup();
        axes.len()
    }

    #[must_use]
    pub fn x_axis_count(&self) -> usize {
        1
    }

    /// Axis numbers of the Y axes, starting from the default axis.
    pub(super) fn y_axis_numbers(&self) -> std::ops::Range<usize> {
        let first = usize::from(self.config.axis_right);
        first..first + self.y_axis_count()
    }

    /// Index into per-axis Y options for axis number `axis_no`. A lone
    /// right-hand axis reads the first entry.
    pub(super) fn y_option_index(&self, axis_no: usize) -> usize {
        axis_no.saturating_sub(usize::from(self.config.axis_right && self.y_axis_count() <= 1))
    }

    /// Enabled datasets plotted against Y axis `axis`.
    pub(super) fn datasets_on_axis(&self, axis: usize) -> impl Iterator<Item = usize> + '_ {
        self.dataset_axes
            .iter()
            .filter(move |(_, used)| **used == axis)
            .map(|(dataset, _)| *dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DataItem, ValueSeries, Viewport};

    fn series(counts: &[usize]) -> ValueSeries {
        let datasets = counts
            .iter()
            .map(|count| {
                (0..*count)
                    .map(|i| DataItem::new(i as f64, Some(i as f64)))
                    .collect()
            })
            .collect();
        ValueSeries::new(datasets).expect("numeric keys")
    }

    #[test]
    fn empty_datasets_stay_on_default_axis() {
        let values = series(&[3, 0]);
        let config = GridGraphConfig::new(Viewport::new(300, 200)).with_dataset_axis(Some(vec![0, 1]));
        let axes = assign_dataset_axes(&config, &values).expect("contiguous");
        assert_eq!(axes.get(&1), Some(&0));
    }

    #[test]
    fn single_axis_charts_ignore_mapping() {
        let values = series(&[3, 3]);
        let config = GridGraphConfig::new(Viewport::new(300, 200))
            .with_dataset_axis(Some(vec![0, 2]))
            .with_single_axis(true);
        let axes = assign_dataset_axes(&config, &values).expect("single axis");
        assert!(axes.values().all(|axis| *axis == 0));
    }
}
