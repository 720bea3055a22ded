use serde::{Deserialize, Serialize};

/// Minimal typed payload describing a visualization attached to an agent
/// message. The remote agent is free to invent new `type` values before this
/// client learns about them, so anything unrecognized parses into
/// [`ChartDescriptor::Unrecognized`] and simply renders nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChartDescriptor {
    Bar { data: Vec<ChartPoint> },
    Pie { data: Vec<ChartPoint> },
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: f64,
}
