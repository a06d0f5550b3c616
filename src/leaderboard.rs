use crate::game::LEADERBOARD_SIZE;

pub const PLAYER_NAME: &str = "Вы";
pub const PLAYER_AVATAR: &str = "👤";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rival {
    pub name: &'static str,
    pub score: u64,
    pub avatar: &'static str,
}

// Stand-in roster until there is a real ranking service
pub const MOCK_LEADERBOARD: [Rival; 8] = [
    Rival {
        name: "PuzzleMaster99",
        score: 15_400,
        avatar: "🦁",
    },
    Rival {
        name: "LogicQueen",
        score: 12_500,
        avatar: "🦊",
    },
    Rival {
        name: "BrainFlex",
        score: 9_800,
        avatar: "🧠",
    },
    Rival {
        name: "SpeedSolver",
        score: 8_200,
        avatar: "⚡️",
    },
    Rival {
        name: "CasualCat",
        score: 5_000,
        avatar: "🐱",
    },
    Rival {
        name: "GlobalChamp",
        score: 42_000,
        avatar: "🌍",
    },
    Rival {
        name: "MysteryUser",
        score: 3_000,
        avatar: "👻",
    },
    Rival {
        name: "LuckyStar",
        score: 21_000,
        avatar: "⭐️",
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    /// 1-based.
    pub rank: usize,
    pub name: String,
    pub score: u64,
    pub avatar: String,
    pub is_player: bool,
}

/// Mock rivals plus the player, best first. Ties keep the rival ahead.
#[must_use]
pub fn standings(player_score: u64) -> Vec<Standing> {
    let mut entries: Vec<(&str, u64, &str, bool)> = MOCK_LEADERBOARD
        .iter()
        .map(|rival| (rival.name, rival.score, rival.avatar, false))
        .collect();
    entries.push((PLAYER_NAME, player_score, PLAYER_AVATAR, true));

    // sort_by is stable, which settles ties by roster order
    entries.sort_by(|a, b| b.1.cmp(&a.1));

    entries
        .into_iter()
        .take(LEADERBOARD_SIZE)
        .enumerate()
        .map(|(index, (name, score, avatar, is_player))| Standing {
            rank: index + 1,
            name: name.to_string(),
            score,
            avatar: avatar.to_string(),
            is_player,
        })
        .collect()
}

#[must_use]
pub fn medal(rank: usize) -> Option<&'static str> {
    match rank {
        1 => Some("🥇"),
        2 => Some("🥈"),
        3 => Some("🥉"),
        _ => None,
    }
}
