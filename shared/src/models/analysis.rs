//! Demand analysis result types
//!
//! Outputs of the demand analyzer. These are derived values computed fresh
//! per request; nothing here is persisted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Daily consumption statistics derived from a movement window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionPattern {
    pub avg_daily_consumption: f64,
    pub variance: f64,
    pub standard_deviation: f64,
    pub peak_consumption: f64,
    pub low_consumption: f64,
}

/// Linear trend over the movement sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub slope: f64,
    pub direction: TrendDirection,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
            TrendDirection::Stable => "stable",
        }
    }
}

/// Action recommended for a material, from most to least urgent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendedAction {
    ReorderUrgent,
    ReorderSoon,
    MonitorClosely,
    ReduceStock,
    MaintainCurrent,
}

impl RecommendedAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendedAction::ReorderUrgent => "REORDER_URGENT",
            RecommendedAction::ReorderSoon => "REORDER_SOON",
            RecommendedAction::MonitorClosely => "MONITOR_CLOSELY",
            RecommendedAction::ReduceStock => "REDUCE_STOCK",
            RecommendedAction::MaintainCurrent => "MAINTAIN_CURRENT",
        }
    }
}

/// Full demand analysis for one material
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandAnalysis {
    pub material_id: Uuid,
    pub material_name: String,
    pub current_stock: i64,
    pub predicted_demand: f64,
    /// Confidence in the prediction, 0 to 100
    pub confidence: f64,
    pub recommended_action: RecommendedAction,
    /// Estimated days until stock runs out; -1 when consumption is zero
    pub days_until_depletion: i64,
    pub optimal_reorder_point: i64,
    pub seasonal_factor: f64,
    pub trend_direction: TrendDirection,
}

/// Severity of a portfolio recommendation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Numeric rank used to sort recommendations, highest first
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Critical => 4,
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

/// Kind of action a portfolio recommendation suggests
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Reorder,
    Optimize,
    Relocate,
}

/// A ranked recommendation covering one or more materials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmartRecommendation {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub action_type: ActionType,
    pub materials: Vec<String>,
}
