/// Display emphasis bucket for a quality label or score.
///
/// Used for presentation only, never for filtering or ordering results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Strongest = 1,
    Strong = 2,
    Moderate = 3,
    Weakest = 4,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Strongest, Tier::Strong, Tier::Moderate, Tier::Weakest];

    /// 1 (strongest) to 4 (weakest).
    pub fn rank(self) -> u8 {
        self as u8
    }
}

pub const STRONGEST_SCORE: f64 = 80.0;
pub const STRONG_SCORE: f64 = 60.0;
pub const MODERATE_SCORE: f64 = 40.0;
pub const SCORE_BAR_MAX: f64 = 100.0;

/// Tier of a free-text quality label, compared case-insensitively.
pub fn quality_tier(label: Option<&str>) -> Tier {
    match label.map(str::to_lowercase).as_deref() {
        Some("high") | Some("excellent") => Tier::Strongest,
        Some("medium") | Some("good") => Tier::Strong,
        Some("low") | Some("poor") => Tier::Moderate,
        _ => Tier::Weakest,
    }
}

/// Tier of a numeric score. Bounds are inclusive lower bounds; NaN is weakest.
pub fn score_tier(score: f64) -> Tier {
    if score >= STRONGEST_SCORE {
        Tier::Strongest
    } else if score >= STRONG_SCORE {
        Tier::Strong
    } else if score >= MODERATE_SCORE {
        Tier::Moderate
    } else {
        Tier::Weakest
    }
}

/// Score-bar width in percent: `min(score, 100)`, floored at 0.
pub fn score_bar_proportion(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, SCORE_BAR_MAX)
}
