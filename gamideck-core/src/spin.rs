//! Daily reward spin. One pick per session from a fixed wheel of point
//! multipliers.

use crate::CoreError;
use rand::Rng;
use serde::Serialize;
use tracing::info;

pub const REWARDS: [f32; 8] = [1.5, 2.0, 3.0, 1.2, 2.5, 1.8, 2.2, 1.5];

const FULL_TURNS: f32 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SpinResult {
    pub segment: usize,
    pub reward: f32,
    /// Angle the wheel comes to rest at, in degrees.
    pub rotation_degrees: f32,
}

impl SpinResult {
    fn for_segment(segment: usize) -> Self {
        let per_segment = 360.0 / REWARDS.len() as f32;
        Self {
            segment,
            reward: REWARDS[segment],
            rotation_degrees: FULL_TURNS * 360.0 + segment as f32 * per_segment,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct DailySpin {
    result: Option<SpinResult>,
}

impl DailySpin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spin<R: Rng>(&mut self, rng: &mut R) -> Result<SpinResult, CoreError> {
        if let Some(prev) = self.result {
            return Err(CoreError::AlreadySpun { reward: prev.reward });
        }
        let res = SpinResult::for_segment(rng.random_range(0..REWARDS.len()));
        info!(segment = res.segment, reward = res.reward, "daily spin");
        self.result = Some(res);
        Ok(res)
    }

    pub fn has_spun(&self) -> bool {
        self.result.is_some()
    }

    pub fn result(&self) -> Option<SpinResult> {
        self.result
    }

    pub fn reward(&self) -> Option<f32> {
        self.result.map(|r| r.reward)
    }

    /// Reward multiplier in effect, 1.0 until the wheel has been spun.
    pub fn multiplier(&self) -> f32 {
        self.reward().unwrap_or(1.0)
    }

    pub fn reset(&mut self) {
        self.result = None;
    }
}
