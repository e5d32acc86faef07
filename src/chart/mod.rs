//! Declarative chart descriptions
//!
//! The server never renders pixels. It emits a small JSON description
//! that the page hands to a client-side plotting library.

use serde::Serialize;

/// Chart kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Single line over a continuous x axis
    Line,
    /// One bar per x value
    Bar,
    /// Several bars per x value, side by side
    GroupedBar,
}

/// A named y series; `None` values are gaps
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl Series {
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Series with no gaps
    pub fn dense(name: impl Into<String>, values: &[f64]) -> Self {
        Self::new(name, values.iter().copied().map(Some).collect())
    }
}

/// A chart ready to serialize
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub x_label: String,
    pub y_label: String,
    pub x: Vec<f64>,
    pub series: Vec<Series>,
}

impl ChartSpec {
    /// Line chart of one series
    pub fn line(
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        x: Vec<f64>,
        y: &[f64],
    ) -> Self {
        let y_label = y_label.into();
        Self {
            kind: ChartKind::Line,
            title: Some(title.into()),
            x_label: x_label.into(),
            series: vec![Series::dense(y_label.clone(), y)],
            y_label,
            x,
        }
    }

    /// Untitled bar chart of one series indexed by `x`
    pub fn bar(x_label: impl Into<String>, x: Vec<f64>, series: Series) -> Self {
        Self {
            kind: ChartKind::Bar,
            title: None,
            x_label: x_label.into(),
            y_label: series.name.clone(),
            x,
            series: vec![series],
        }
    }

    /// Grouped bars comparing several series at each `x`
    pub fn grouped_bar(
        title: impl Into<String>,
        x_label: impl Into<String>,
        x: Vec<f64>,
        series: Vec<Series>,
    ) -> Self {
        Self {
            kind: ChartKind::GroupedBar,
            title: Some(title.into()),
            x_label: x_label.into(),
            y_label: "value".to_string(),
            x,
            series,
        }
    }

    #[cfg(test)]
    pub(crate) fn is_aligned(&self) -> bool {
        self.series.iter().all(|s| s.values.len() == self.x.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_chart_serializes() {
        let chart = ChartSpec::line("t", "x", "y", vec![0.0, 1.0], &[2.0, 3.0]);
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["kind"], "line");
        assert_eq!(json["series"][0]["name"], "y");
        assert_eq!(json["series"][0]["values"][1], 3.0);
        assert!(chart.is_aligned());
    }

    #[test]
    fn test_bar_chart_has_no_title() {
        let chart = ChartSpec::bar("YearsExperience", vec![1.0], Series::dense("p", &[5.0]));
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["kind"], "bar");
        assert!(json.get("title").is_none());
    }

    #[test]
    fn test_grouped_bar_gaps_serialize_as_null() {
        let chart = ChartSpec::grouped_bar(
            "t",
            "x",
            vec![1.0, 2.0],
            vec![
                Series::new("a", vec![Some(1.0), None]),
                Series::dense("b", &[1.0, 2.0]),
            ],
        );
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["kind"], "grouped_bar");
        assert!(json["series"][0]["values"][1].is_null());
    }
}
