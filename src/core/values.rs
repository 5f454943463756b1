use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Item key: a numeric position or a category label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Number(f64),
    Label(String),
}

impl Key {
    /// Key for a date-time item, stored as Unix seconds.
    #[must_use]
    pub fn datetime(time: DateTime<Utc>) -> Self {
        Self::Number(time.timestamp() as f64)
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) if value.is_finite() => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_label(&self) -> Option<&str> {
        match self {
            Self::Label(label) => Some(label),
            Self::Number(_) => None,
        }
    }
}

impl From<f64> for Key {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self::Label(value.to_owned())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Self::Label(value)
    }
}

/// One item of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataItem {
    pub key: Key,
    pub value: Option<f64>,
    /// Structured override for the axis label at this item's position.
    #[serde(default)]
    pub axis_text: Option<String>,
}

impl DataItem {
    #[must_use]
    pub fn new(key: impl Into<Key>, value: Option<f64>) -> Self {
        Self {
            key: key.into(),
            value,
            axis_text: None,
        }
    }

    #[must_use]
    pub fn with_axis_text(mut self, text: impl Into<String>) -> Self {
        self.axis_text = Some(text.into());
        self
    }
}

/// Read-only view of the plotted values, consumed by axes and the grid graph.
///
/// Only dataset 0 is consulted for key lookups: multi-dataset series share
/// their key sequence.
pub trait SeriesSource {
    fn dataset_count(&self) -> usize;

    /// Items of `dataset`; empty for unknown datasets.
    fn items(&self, dataset: usize) -> &[DataItem];

    /// Whether keys are category labels addressed by sequence index.
    fn associative_keys(&self) -> bool;

    fn items_count(&self, dataset: usize) -> usize {
        self.items(dataset).len()
    }

    fn min_value(&self, dataset: usize) -> Option<f64> {
        self.items(dataset)
            .iter()
            .filter_map(|item| item.value.filter(|value| value.is_finite()))
            .reduce(f64::min)
    }

    fn max_value(&self, dataset: usize) -> Option<f64> {
        self.items(dataset)
            .iter()
            .filter_map(|item| item.value.filter(|value| value.is_finite()))
            .reduce(f64::max)
    }

    fn min_key(&self) -> Option<f64> {
        if self.associative_keys() {
            return longest_dataset(self).map(|_| 0.0);
        }
        numeric_keys(self).reduce(f64::min)
    }

    fn max_key(&self) -> Option<f64> {
        if self.associative_keys() {
            return longest_dataset(self).map(|count| (count - 1) as f64);
        }
        numeric_keys(self).reduce(f64::max)
    }

    /// The label key at an axis value, when it differs from the value itself.
    fn key_for(&self, value: f64) -> Option<String> {
        if !self.associative_keys() {
            return None;
        }
        let item = item_at_index(self.items(0), value)?;
        item.key.as_label().map(str::to_owned)
    }

    /// Structured axis text for the item at an axis value.
    fn axis_text_for(&self, value: f64) -> Option<String> {
        let items = self.items(0);
        let item = if self.associative_keys() {
            item_at_index(items, value)?
        } else {
            items.iter().find(|item| {
                item.key
                    .as_number()
                    .is_some_and(|key| (key - value).abs() <= 1e-9 * key.abs().max(1.0))
            })?
        };
        item.axis_text.clone()
    }

    /// Sequence index of an associative key.
    fn position_of_key(&self, key: &str) -> Option<usize> {
        if !self.associative_keys() {
            return None;
        }
        self.items(0)
            .iter()
            .position(|item| item.key.as_label() == Some(key))
    }
}

fn longest_dataset<S: SeriesSource + ?Sized>(series: &S) -> Option<usize> {
    (0..series.dataset_count())
        .map(|dataset| series.items_count(dataset))
        .filter(|count| *count > 0)
        .max()
}

fn numeric_keys<S: SeriesSource + ?Sized>(series: &S) -> impl Iterator<Item = f64> + '_ {
    (0..series.dataset_count())
        .flat_map(move |dataset| series.items(dataset).iter())
        .filter_map(|item| item.key.as_number())
}

fn item_at_index(items: &[DataItem], value: f64) -> Option<&DataItem> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
        return None;
    }
    items.get(value as usize)
}

/// In-memory value series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueSeries {
    datasets: Vec<Vec<DataItem>>,
    associative: bool,
}

impl ValueSeries {
    /// Builds a series; keys are associative when any item carries a label.
    ///
    /// Mixing label and numeric keys is rejected.
    pub fn new(datasets: Vec<Vec<DataItem>>) -> ChartResult<Self> {
        let mut labels = 0_usize;
        let mut numbers = 0_usize;
        for item in datasets.iter().flatten() {
            match item.key {
                Key::Label(_) => labels += 1,
                Key::Number(_) => numbers += 1,
            }
        }
        if labels > 0 && numbers > 0 {
            return Err(ChartError::InvalidData(
                "series keys must be all numeric or all labels".to_owned(),
            ));
        }

        Ok(Self {
            datasets,
            associative: labels > 0,
        })
    }

    /// Single dataset keyed by sequence index.
    #[must_use]
    pub fn from_values(values: &[f64]) -> Self {
        let items = values
            .iter()
            .enumerate()
            .map(|(index, value)| DataItem::new(index as f64, Some(*value)))
            .collect();
        Self {
            datasets: vec![items],
            associative: false,
        }
    }

    /// Single dataset keyed by category labels.
    #[must_use]
    pub fn from_labelled(pairs: &[(&str, f64)]) -> Self {
        let items = pairs
            .iter()
            .map(|(label, value)| DataItem::new(*label, Some(*value)))
            .collect();
        Self {
            datasets: vec![items],
            associative: true,
        }
    }

    #[must_use]
    pub fn datasets(&self) -> &[Vec<DataItem>] {
        &self.datasets
    }
}

impl SeriesSource for ValueSeries {
    fn dataset_count(&self) -> usize {
        self.datasets.len()
    }

    fn items(&self, dataset: usize) -> &[DataItem] {
        self.datasets.get(dataset).map_or(&[], Vec::as_slice)
    }

    fn associative_keys(&self) -> bool {
        self.associative
    }
}
