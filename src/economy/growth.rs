use serde::{Deserialize, Serialize};

/// Share of the saturation income beyond which the curve stops climbing.
const MAX_SPEED_RATIO: f64 = 0.99;

/// Shape of the growth multiplier as a function of total daily income.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "curve", rename_all = "snake_case")]
pub enum GrowthCurve {
    /// Prices never move.
    Flat,
    /// Lorentz factor `1 / sqrt(1 - (income / saturation_income)^2)`, capped
    /// just below the saturation income.
    Lorentz { saturation_income: f64 },
}

impl Default for GrowthCurve {
    fn default() -> Self {
        GrowthCurve::Lorentz {
            saturation_income: 250_000.0,
        }
    }
}

/// Pure mapping from total income to the growth multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GrowthModel {
    curve: GrowthCurve,
}

impl GrowthModel {
    pub fn new(curve: GrowthCurve) -> Self {
        Self { curve }
    }

    pub fn curve(&self) -> GrowthCurve {
        self.curve
    }

    /// Multiplier for the given total income. Non-decreasing in `income` and
    /// exactly `1.0` for an economy with no income.
    pub fn multiplier(&self, income: f64) -> f64 {
        match self.curve {
            GrowthCurve::Flat => 1.0,
            GrowthCurve::Lorentz { saturation_income } => {
                if saturation_income <= 0.0 || !income.is_finite() || income <= 0.0 {
                    return 1.0;
                }
                let ratio = (income / saturation_income).min(MAX_SPEED_RATIO);
                1.0 / (1.0 - ratio * ratio).sqrt()
            }
        }
    }
}
