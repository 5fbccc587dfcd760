use std::ops::Range;

use crate::domain::Sweet;

/// One bar: the category slot it sits on and its height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartBar {
    pub category: usize,
    pub cost: i64,
}

/// What the cost chart shows, independent of how it is drawn.
///
/// Categories are distinct sweet names in first-seen order. Sweets sharing a
/// name share a slot, and later bars are drawn over earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData {
    categories: Vec<String>,
    bars: Vec<ChartBar>,
}

/// Builds the name-vs-cost chart data for the given inventory rows.
pub fn chart_data(sweets: &[Sweet]) -> ChartData {
    let mut data = ChartData::default();
    for sweet in sweets {
        let category = match data.categories.iter().position(|name| *name == sweet.name) {
            Some(index) => index,
            None => {
                data.categories.push(sweet.name.clone());
                data.categories.len() - 1
            }
        };
        data.bars.push(ChartBar {
            category,
            cost: sweet.cost,
        });
    }
    data
}

impl ChartData {
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn bars(&self) -> &[ChartBar] {
        &self.bars
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Category slots are centred on integers, so the axis spans half a slot
    /// either side. An empty chart still gets one slot of width.
    pub fn x_range(&self) -> Range<f64> {
        let slots = self.categories.len().max(1) as f64;
        -0.5..slots - 0.5
    }

    /// Always includes zero, with 5% headroom past the tallest (or deepest) bar.
    pub fn y_range(&self) -> Range<f64> {
        let low = self.bars.iter().map(|b| b.cost).min().unwrap_or(0).min(0) as f64;
        let high = self.bars.iter().map(|b| b.cost).max().unwrap_or(0).max(0) as f64;
        if low == high {
            return 0.0..1.0;
        }
        low * 1.05..high * 1.05
    }

    /// Axis label for a tick position: the category name when the tick sits
    /// on a slot centre, nothing otherwise.
    pub fn label_at(&self, x: f64) -> Option<&str> {
        let slot = x.round();
        if (x - slot).abs() > 1e-6 || slot < 0.0 {
            return None;
        }
        self.categories.get(slot as usize).map(String::as_str)
    }
}
