//! Friends leaderboard. The list is a fixed mock seeded at startup; only the
//! learner's own entry ever changes.

use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Same,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Friend {
    pub id: String,
    pub name: String,
    pub points: u32,
    pub streak: u32,
    pub cards_completed: u32,
    pub trend: Trend,
    #[serde(default)]
    pub is_you: bool,
}

impl Friend {
    fn seed(id: &str, name: &str, points: u32, streak: u32, cards_completed: u32, trend: Trend) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            points,
            streak,
            cards_completed,
            trend,
            is_you: false,
        }
    }
}

fn mock_friends() -> Vec<Friend> {
    let mut you = Friend::seed("2", "Georgia", 856, 21, 319, Trend::Up);
    you.is_you = true;
    vec![
        Friend::seed("1", "Alice", 922, 21, 356, Trend::Same),
        you,
        Friend::seed("3", "Charlie", 834, 20, 309, Trend::Down),
        Friend::seed("4", "David", 788, 18, 287, Trend::Up),
        Friend::seed("5", "Emma", 756, 19, 275, Trend::Same),
        Friend::seed("6", "Frank", 723, 15, 264, Trend::Down),
        Friend::seed("7", "Grace", 698, 17, 251, Trend::Up),
        Friend::seed("8", "Henry", 672, 14, 243, Trend::Down),
        Friend::seed("9", "Ivy", 645, 16, 232, Trend::Same),
        Friend::seed("10", "Jack", 623, 13, 221, Trend::Up),
    ]
}

#[derive(Clone, Debug, Serialize)]
pub struct Leaderboard {
    friends: Vec<Friend>,
    show_rank_up_badge: bool,
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::mock()
    }
}

impl Leaderboard {
    pub fn mock() -> Self {
        Self::from_friends(mock_friends())
    }

    /// Builds a board from an arbitrary list, sorted by points.
    pub fn from_friends(mut friends: Vec<Friend>) -> Self {
        friends.sort_by(|a, b| b.points.cmp(&a.points));
        Self {
            friends,
            show_rank_up_badge: false,
        }
    }

    pub fn friends(&self) -> &[Friend] {
        &self.friends
    }

    pub fn you(&self) -> Option<&Friend> {
        self.friends.iter().find(|f| f.is_you)
    }

    /// 1-based position of the learner's entry.
    pub fn rank_of_you(&self) -> Option<usize> {
        self.friends.iter().position(|f| f.is_you).map(|i| i + 1)
    }

    pub fn show_rank_up_badge(&self) -> bool {
        self.show_rank_up_badge
    }

    pub fn set_show_rank_up_badge(&mut self, show: bool) {
        self.show_rank_up_badge = show;
    }

    /// Credits the learner and re-ranks. Returns the learner's new rank.
    pub fn add_points(&mut self, points: u32) -> Option<usize> {
        let you = self.friends.iter_mut().find(|f| f.is_you)?;
        you.points = you.points.saturating_add(points);
        you.trend = Trend::Up;

        // stable: ties keep their previous order
        self.friends.sort_by(|a, b| b.points.cmp(&a.points));
        self.show_rank_up_badge = self.friends.first().map(|f| f.is_you).unwrap_or(false);

        let rank = self.rank_of_you();
        info!(points, rank = ?rank, "leaderboard credited");
        rank
    }

    pub fn reset(&mut self) {
        *self = Self::mock();
    }
}
