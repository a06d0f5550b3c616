#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::game::{
        COST_HINT, COST_PREMIUM_DISCOUNT, COST_SKIP, HINT_TILE_LIMIT, grid_size_for_level,
        level_points, level_pzzls,
    };

    #[test]
    fn test_grid_size_for_level() {
        assert_eq!(grid_size_for_level(1), 3);
        assert_eq!(grid_size_for_level(2), 3);
        assert_eq!(grid_size_for_level(3), 4);
        assert_eq!(grid_size_for_level(100), 4);
    }

    #[test]
    fn test_level_rewards() {
        assert_eq!(level_points(1), 100);
        assert_eq!(level_points(7), 700);
        assert_eq!(level_pzzls(1), 160);
        assert_eq!(level_pzzls(10), 250);
    }

    #[test]
    fn test_prices() {
        assert_eq!(COST_HINT, 2_500);
        assert_eq!(COST_SKIP, 5_000);
        assert_eq!(COST_PREMIUM_DISCOUNT, 100_000);
        assert_eq!(HINT_TILE_LIMIT, 3);
    }
}
