use crate::{points, AudioSettings, DailySpin, Leaderboard, Rating};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Credit {
    pub points: u32,
    pub rank: Option<usize>,
    pub rank_up: bool,
}

/// Per-session gamification state shared by the front ends.
#[derive(Clone, Debug, Default)]
pub struct StudyContext {
    pub audio: AudioSettings,
    pub spin: DailySpin,
    pub leaderboard: Leaderboard,
    earned: u32,
}

impl StudyContext {
    pub fn new(audio: AudioSettings) -> Self {
        Self {
            audio,
            ..Self::default()
        }
    }

    /// Awards points for one rating and credits the leaderboard.
    pub fn credit(&mut self, rating: Rating) -> Credit {
        let points = points::award(rating, self.spin.multiplier());
        let was_first = self.leaderboard.rank_of_you() == Some(1);
        if points == 0 {
            return Credit {
                points,
                rank: self.leaderboard.rank_of_you(),
                rank_up: false,
            };
        }
        self.earned += points;
        let rank = self.leaderboard.add_points(points);
        Credit {
            points,
            rank,
            rank_up: !was_first && rank == Some(1),
        }
    }

    /// Points credited since the context was created or last reset.
    pub fn earned(&self) -> u32 {
        self.earned
    }

    pub fn reset(&mut self) {
        self.spin.reset();
        self.leaderboard.reset();
        self.earned = 0;
    }
}
