use serde::Deserialize;

/// The three per-frame measurements the backend extracts from a log.
///
/// Each vector is expected to hold one entry per frame; `None` marks a frame
/// whose header did not carry the value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MetricsSeries {
    #[serde(default)]
    pub burning_cells: Vec<Option<f64>>,
    #[serde(default)]
    pub natural_burnouts: Vec<Option<f64>>,
    #[serde(default, rename = "extinguished_cum", alias = "extinguished_cumulative")]
    pub extinguished_cumulative: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    BurningCells,
    NaturalBurnouts,
    ExtinguishedCumulative,
}

impl SeriesKind {
    pub const ALL: [Self; 3] = [
        Self::BurningCells,
        Self::NaturalBurnouts,
        Self::ExtinguishedCumulative,
    ];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::BurningCells => "Burning cells",
            Self::NaturalBurnouts => "Natural burnouts",
            Self::ExtinguishedCumulative => "Extinguished (cumulative)",
        }
    }

    /// File stem used when the chart is written to disk.
    #[must_use]
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::BurningCells => "burning_cells",
            Self::NaturalBurnouts => "natural_burnouts",
            Self::ExtinguishedCumulative => "extinguished_cumulative",
        }
    }
}

impl MetricsSeries {
    #[must_use]
    pub fn series(&self, kind: SeriesKind) -> &[Option<f64>] {
        match kind {
            SeriesKind::BurningCells => &self.burning_cells,
            SeriesKind::NaturalBurnouts => &self.natural_burnouts,
            SeriesKind::ExtinguishedCumulative => &self.extinguished_cumulative,
        }
    }

    /// Value of `kind` at 1-based `frame`, if recorded.
    #[must_use]
    pub fn value_at(&self, kind: SeriesKind, frame: u32) -> Option<f64> {
        let index = usize::try_from(frame.checked_sub(1)?).ok()?;
        self.series(kind).get(index).copied().flatten()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.burning_cells.is_empty()
            && self.natural_burnouts.is_empty()
            && self.extinguished_cumulative.is_empty()
    }
}
