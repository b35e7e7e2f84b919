//! Classification enums shared by the domain and display layers

use serde::{Deserialize, Serialize};

/// Risk bucket derived from predicted days until next service.
///
/// Variants are declared from most to least severe, so the derived
/// ordering sorts `Critical` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskBucket {
    Critical,
    High,
    Medium,
    Low,
}

impl RiskBucket {
    /// All buckets, most severe first
    pub const ALL: [RiskBucket; 4] = [
        RiskBucket::Critical,
        RiskBucket::High,
        RiskBucket::Medium,
        RiskBucket::Low,
    ];

    /// Severity rank; higher is more severe
    pub fn severity(&self) -> u8 {
        match self {
            RiskBucket::Critical => 3,
            RiskBucket::High => 2,
            RiskBucket::Medium => 1,
            RiskBucket::Low => 0,
        }
    }

    /// Return the more severe of the two buckets
    pub fn at_least(self, floor: RiskBucket) -> RiskBucket {
        if floor.severity() > self.severity() {
            floor
        } else {
            self
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskBucket::Critical => "Critical",
            RiskBucket::High => "High",
            RiskBucket::Medium => "Medium",
            RiskBucket::Low => "Low",
        }
    }
}

impl std::fmt::Display for RiskBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-sensor health badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthBadge {
    Healthy,
    Warning,
    Critical,
    /// Reading was missing or NaN
    Unknown,
}

impl HealthBadge {
    pub fn label(&self) -> &'static str {
        match self {
            HealthBadge::Healthy => "Healthy",
            HealthBadge::Warning => "Warning",
            HealthBadge::Critical => "Critical",
            HealthBadge::Unknown => "Unknown",
        }
    }

    /// Short status marker for table output
    pub fn marker(&self) -> &'static str {
        match self {
            HealthBadge::Healthy => "[ OK ]",
            HealthBadge::Warning => "[WARN]",
            HealthBadge::Critical => "[CRIT]",
            HealthBadge::Unknown => "[ ?? ]",
        }
    }
}

impl std::fmt::Display for HealthBadge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
