use emberfall_core::player::{Player, experience_for_level};

/// Stat points granted per level-up.
pub const STAT_POINTS_PER_LEVEL: u32 = 3;
/// Every wave divisible by this grants bonus rewards.
pub const MILESTONE_INTERVAL: u32 = 10;
pub const MILESTONE_BONUS_REWARDS: u32 = 3;

/// Experience for defeating the boss of `wave` at player `level`:
/// `floor((50 + 25 * wave) * (1 + 0.05 * level))`.
pub fn boss_experience(wave: u32, level: u32) -> u32 {
    let base = 50 + 25 * u64::from(wave);
    (base * (20 + u64::from(level)) / 20) as u32
}

/// Score for clearing `wave`.
pub fn wave_score(wave: u32) -> u64 {
    u64::from(wave) * 100
}

pub fn is_milestone(wave: u32) -> bool {
    wave > 0 && wave % MILESTONE_INTERVAL == 0
}

/// Add experience and resolve every level-up it pays for. Returns the
/// number of levels gained.
pub fn gain_experience(player: &mut Player, amount: u32) -> u32 {
    player.experience = player.experience.saturating_add(amount);
    let mut gained = 0;
    while player.experience >= player.experience_to_next_level {
        player.experience -= player.experience_to_next_level;
        player.level += 1;
        player.stat_points += STAT_POINTS_PER_LEVEL;
        player.experience_to_next_level = experience_for_level(player.level);
        gained += 1;
    }
    if gained > 0 {
        tracing::debug!(level = player.level, gained, "level up");
    }
    gained
}

#[cfg(test)]
mod tests {
    use super::*;
    use emberfall_core::player::PlayerClass;
    use emberfall_core::test_helpers::make_player;

    #[test]
    fn boss_experience_formula() {
        // (50 + 25) * 1.05 = 78.75
        assert_eq!(boss_experience(1, 1), 78);
        // (50 + 250) * 1.5 = 450
        assert_eq!(boss_experience(10, 10), 450);
    }

    #[test]
    fn single_level_up() {
        let mut p = make_player(PlayerClass::Archer);
        assert_eq!(gain_experience(&mut p, 120), 1);
        assert_eq!(p.level, 2);
        assert_eq!(p.experience, 20);
        assert_eq!(p.experience_to_next_level, 150);
        assert_eq!(p.stat_points, 3);
    }

    #[test]
    fn multiple_level_ups_loop() {
        let mut p = make_player(PlayerClass::Archer);
        // 100 + 150 + 200 = 450
        assert_eq!(gain_experience(&mut p, 455), 3);
        assert_eq!(p.level, 4);
        assert_eq!(p.experience, 5);
        assert_eq!(p.stat_points, 9);
    }

    #[test]
    fn milestones() {
        assert!(!is_milestone(0));
        assert!(!is_milestone(9));
        assert!(is_milestone(10));
        assert!(is_milestone(40));
    }
}
