//! Plot geometry for the urgency x importance scatter view.
//!
//! The interior of the canvas (inside `padding` on every side) holds the
//! markers. Urgency runs right to left so the most urgent work sits on the
//! left edge; importance runs bottom to top in screen coordinates.
//!
//! ```text
//! x = P + graph_width  - (urgency    / 10) * graph_width
//! y = P + graph_height - (importance / 10) * graph_height
//! ```
//!
//! Marker emphasis uses the product of the normalized scores, so a task high
//! on both axes stands out more than one high on a single axis.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::quadrant::{classify, Priority};
use crate::scoring::MAX_SCORE;
use crate::task::Task;

/// Default canvas used by the scatter view.
pub const DEFAULT_WIDTH: f64 = 800.0;
pub const DEFAULT_HEIGHT: f64 = 600.0;
pub const DEFAULT_PADDING: f64 = 60.0;

/// Score values that get an axis tick.
pub const TICK_VALUES: [u8; 6] = [0, 2, 4, 6, 8, 10];

/// A canvas with a validated, non-empty interior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotCanvas {
    width: f64,
    height: f64,
    padding: f64,
}

impl PlotCanvas {
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidCanvas`] when a dimension is not a
    /// positive finite number or the padding leaves no interior.
    pub fn new(width: f64, height: f64, padding: f64) -> Result<Self, ValidationError> {
        let invalid = |message: &str| ValidationError::InvalidCanvas {
            width,
            height,
            padding,
            message: message.to_string(),
        };

        if !(width.is_finite() && height.is_finite() && padding.is_finite()) {
            return Err(invalid("dimensions must be finite"));
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(invalid("width and height must be positive"));
        }
        if padding < 0.0 {
            return Err(invalid("padding must not be negative"));
        }
        if width - 2.0 * padding <= 0.0 || height - 2.0 * padding <= 0.0 {
            return Err(invalid("padding leaves no plot interior"));
        }

        Ok(Self {
            width,
            height,
            padding,
        })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }

    pub fn graph_width(&self) -> f64 {
        self.width - 2.0 * self.padding
    }

    pub fn graph_height(&self) -> f64 {
        self.height - 2.0 * self.padding
    }

    /// Horizontal position for an urgency score (inverted axis).
    pub fn x_for_urgency(&self, urgency: f64) -> f64 {
        let gw = self.graph_width();
        self.padding + gw - (clamp_score(urgency) / f64::from(MAX_SCORE)) * gw
    }

    /// Vertical position for an importance score (screen-inverted axis).
    pub fn y_for_importance(&self, importance: f64) -> f64 {
        let gh = self.graph_height();
        self.padding + gh - (clamp_score(importance) / f64::from(MAX_SCORE)) * gh
    }

    /// `(x, y)` for a score pair. Scores outside 0..=10 are clamped.
    pub fn map_to_coordinates(&self, urgency: f64, importance: f64) -> (f64, f64) {
        (self.x_for_urgency(urgency), self.y_for_importance(importance))
    }

    /// The four equal sub-rectangles of the interior, split at the midlines.
    pub fn quadrant_regions(&self) -> [QuadrantRegion; 4] {
        let half_w = self.graph_width() / 2.0;
        let half_h = self.graph_height() / 2.0;
        let left = self.padding;
        let right = self.padding + half_w;
        let top = self.padding;
        let bottom = self.padding + half_h;

        [
            QuadrantRegion::new(Priority::UrgentImportant, left, top, half_w, half_h),
            QuadrantRegion::new(Priority::NotUrgentImportant, right, top, half_w, half_h),
            QuadrantRegion::new(Priority::UrgentNotImportant, left, bottom, half_w, half_h),
            QuadrantRegion::new(Priority::NotUrgentNotImportant, right, bottom, half_w, half_h),
        ]
    }

    /// Tick marks for both axes; the midline tick is flagged.
    pub fn ticks(&self) -> Vec<AxisTick> {
        TICK_VALUES
            .iter()
            .map(|&value| AxisTick {
                value,
                x: self.x_for_urgency(f64::from(value)),
                y: self.y_for_importance(f64::from(value)),
                midline: false,
            })
            .chain(std::iter::once(AxisTick {
                value: MAX_SCORE / 2,
                x: self.x_for_urgency(f64::from(MAX_SCORE / 2)),
                y: self.y_for_importance(f64::from(MAX_SCORE / 2)),
                midline: true,
            }))
            .collect()
    }

    /// Place one score pair. Out-of-range scores are clamped, never rejected.
    pub fn place(&self, urgency: f64, importance: f64) -> PlacedPoint {
        if !in_range(urgency) || !in_range(importance) {
            tracing::warn!(urgency, importance, "score outside 0..=10, clamping");
        }
        let u = clamp_score(urgency);
        let i = clamp_score(importance);
        let (x, y) = self.map_to_coordinates(u, i);
        PlacedPoint {
            x,
            y,
            relative_size: relative_size(u, i),
            priority: classify(u.floor() as i32, i.floor() as i32),
        }
    }

    /// Lay out a collection of scored tasks.
    pub fn layout(&self, tasks: &[Task]) -> PlotLayout {
        let points = tasks
            .iter()
            .map(|task| {
                let placed = self.place(
                    f64::from(task.scores.urgency()),
                    f64::from(task.scores.importance()),
                );
                PlotPoint {
                    task_id: task.id.clone(),
                    title: task.title.clone(),
                    assigned_to: task.assigned_to.clone(),
                    x: placed.x,
                    y: placed.y,
                    relative_size: placed.relative_size,
                    priority: placed.priority,
                    color: placed.priority.color(),
                }
            })
            .collect();

        PlotLayout {
            canvas: *self,
            regions: self.quadrant_regions().to_vec(),
            ticks: self.ticks(),
            points,
        }
    }
}

impl Default for PlotCanvas {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            padding: DEFAULT_PADDING,
        }
    }
}

fn in_range(score: f64) -> bool {
    (0.0..=f64::from(MAX_SCORE)).contains(&score)
}

/// Clamp to 0..=10. NaN maps to 0.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, f64::from(MAX_SCORE))
    }
}

/// Product of the normalized scores, in 0..=1.
pub fn relative_size(urgency: f64, importance: f64) -> f64 {
    let max = f64::from(MAX_SCORE);
    (clamp_score(urgency) / max) * (clamp_score(importance) / max)
}

/// Converts a relative size into marker units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerScale {
    pub base_size: f64,
    pub max_size: f64,
}

impl MarkerScale {
    pub fn size(&self, relative: f64) -> f64 {
        self.base_size + relative.clamp(0.0, 1.0) * (self.max_size - self.base_size)
    }
}

impl Default for MarkerScale {
    fn default() -> Self {
        Self {
            base_size: 60.0,
            max_size: 150.0,
        }
    }
}

/// A background rectangle for one quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuadrantRegion {
    pub priority: Priority,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: &'static str,
}

impl QuadrantRegion {
    fn new(priority: Priority, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            priority,
            x,
            y,
            width,
            height,
            fill: priority.background_color(),
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Tick position on both axes for one score value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisTick {
    pub value: u8,
    pub x: f64,
    pub y: f64,
    pub midline: bool,
}

/// Geometry for a single score pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedPoint {
    pub x: f64,
    pub y: f64,
    pub relative_size: f64,
    pub priority: Priority,
}

/// Geometry for one task marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotPoint {
    pub task_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    pub x: f64,
    pub y: f64,
    pub relative_size: f64,
    pub priority: Priority,
    pub color: &'static str,
}

/// Everything a renderer needs to draw the scatter view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotLayout {
    pub canvas: PlotCanvas,
    pub regions: Vec<QuadrantRegion>,
    pub ticks: Vec<AxisTick>,
    pub points: Vec<PlotPoint>,
}
