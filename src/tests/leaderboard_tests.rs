#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::leaderboard::{MOCK_LEADERBOARD, PLAYER_NAME, medal, standings};

    #[test]
    fn test_standings_are_sorted_and_ranked() {
        let table = standings(10_000);
        assert_eq!(table.len(), MOCK_LEADERBOARD.len() + 1);
        assert!(table.windows(2).all(|pair| pair[0].score >= pair[1].score));
        for (index, standing) in table.iter().enumerate() {
            assert_eq!(standing.rank, index + 1);
        }
        assert_eq!(table[0].name, "GlobalChamp");
    }

    #[test]
    fn test_player_position() {
        let table = standings(10_000);
        let player = table
            .iter()
            .find(|standing| standing.is_player)
            .expect("Player must be listed");
        assert_eq!(player.name, PLAYER_NAME);
        // Behind 42000, 21000, 15400 and 12500
        assert_eq!(player.rank, 5);

        let newcomer = standings(0);
        assert_eq!(newcomer.last().map(|s| s.is_player), Some(true));
    }

    #[test]
    fn test_ties_keep_rival_ahead() {
        let table = standings(5_000);
        let cat = table.iter().position(|s| s.name == "CasualCat").expect("Rival listed");
        let player = table.iter().position(|s| s.is_player).expect("Player listed");
        assert_eq!(player, cat + 1);
    }

    #[test]
    fn test_medals() {
        assert_eq!(medal(1), Some("🥇"));
        assert_eq!(medal(2), Some("🥈"));
        assert_eq!(medal(3), Some("🥉"));
        assert_eq!(medal(4), None);
        assert_eq!(medal(0), None);
    }
}
