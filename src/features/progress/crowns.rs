/// Experience needed for each crown level, lowest first.
pub const CROWN_THRESHOLDS: [i32; 5] = [50, 150, 300, 500, 800];
pub const MAX_CROWN_LEVEL: i32 = CROWN_THRESHOLDS.len() as i32;

const XP_PER_CORRECT_ANSWER: i32 = 10;
const XP_HINT_PENALTY: i32 = 2;
const MIN_XP_FOR_CORRECT_ANSWER: i32 = 2;

/// Experience awarded for one attempt.
pub fn xp_for_attempt(correct: bool, hints_used: i32) -> i32 {
    if !correct {
        return 0;
    }
    let penalty = hints_used.max(0).saturating_mul(XP_HINT_PENALTY);
    XP_PER_CORRECT_ANSWER
        .saturating_sub(penalty)
        .max(MIN_XP_FOR_CORRECT_ANSWER)
}

/// Crown level reached with `xp` accumulated experience.
pub fn crown_level_for(xp: i32) -> i32 {
    CROWN_THRESHOLDS
        .iter()
        .take_while(|threshold| xp >= **threshold)
        .count() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_reduce_but_never_erase_xp() {
        assert_eq!(xp_for_attempt(true, 0), 10);
        assert_eq!(xp_for_attempt(true, 2), 6);
        assert_eq!(xp_for_attempt(true, 50), 2);
        assert_eq!(xp_for_attempt(false, 0), 0);
    }

    #[test]
    fn crown_levels_follow_thresholds() {
        assert_eq!(crown_level_for(0), 0);
        assert_eq!(crown_level_for(49), 0);
        assert_eq!(crown_level_for(50), 1);
        assert_eq!(crown_level_for(299), 2);
        assert_eq!(crown_level_for(10_000), MAX_CROWN_LEVEL);
    }
}
