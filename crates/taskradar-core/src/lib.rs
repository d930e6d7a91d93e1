//! # TaskRadar Core Library
//!
//! This library provides the task prioritization engine behind TaskRadar.
//! Tasks are captured as short free-text descriptions, scored for urgency and
//! importance, sorted into one of four priority quadrants, and laid out on a
//! two-dimensional plot. The CLI binary is a thin layer over the same core.
//!
//! ## Architecture
//!
//! - **Keyword tables**: static trigger phrases with weights per axis
//! - **Scoring**: deterministic keyword scorer behind the `Scorer` trait
//! - **Quadrants**: fixed-threshold classification of a score pair
//! - **Plot**: coordinate mapping, marker sizing and quadrant regions
//! - **Classifier**: async boundary that may suspend or time out
//! - **Storage**: TOML configuration and a flat JSON task store
//!
//! ## Key Components
//!
//! - [`KeywordScorer`]: Reference scoring engine
//! - [`classify`]: Quadrant rule
//! - [`PlotCanvas`]: Geometry mapper
//! - [`Classifier`]: Trait for classification services
//! - [`TaskStore`]: Task persistence

pub mod classifier;
pub mod error;
pub mod keywords;
pub mod plot;
pub mod quadrant;
pub mod scoring;
pub mod storage;
pub mod task;

pub use classifier::{classify_with_timeout, Classification, Classifier, KeywordClassifier};
pub use error::{ClassifyError, ConfigError, CoreError, StorageError, ValidationError};
pub use keywords::{KeywordTable, KeywordWeight};
pub use plot::{MarkerScale, PlotCanvas, PlotLayout, PlotPoint, QuadrantRegion};
pub use quadrant::{classify, Priority};
pub use scoring::{KeywordScorer, ScoreExplanation, Scorer, TaskScores};
pub use storage::{Config, TaskStore};
pub use task::{NewTask, Task, TaskQuery, TaskSource};
