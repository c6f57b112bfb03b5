//! Skill point requirements - the geometric SP curve

/// Highest trainable skill level
pub const MAX_LEVEL: u8 = 5;

/// SP required for level 1 of a rank 1 skill
pub const BASE_POINTS_PER_RANK: f64 = 250.0;

/// `2^(2.5 × (level − 1))` for levels 1..=5
///
/// Tabulated so the integral entries (levels 1, 3, 5) stay exact.
const LEVEL_MULTIPLIERS: [f64; MAX_LEVEL as usize] = [
    1.0,
    5.656_854_249_492_381,
    32.0,
    181.019_335_983_756_18,
    1024.0,
];

/// Cumulative skill points required to reach `level` of a skill with `rank`
///
/// `SP(level) = 250 × rank × 2^(2.5 × (level − 1))`, rounded up to a whole
/// skill point. Level 0 always requires 0 SP.
///
/// # Panics
/// If `level` is above [`MAX_LEVEL`]. Callers clamp before calling.
pub fn required_points(rank: u32, level: u8) -> u32 {
    assert!(level <= MAX_LEVEL, "skill level {} out of range", level);
    if level == 0 {
        return 0;
    }

    let multiplier = LEVEL_MULTIPLIERS[(level - 1) as usize];
    (BASE_POINTS_PER_RANK * rank as f64 * multiplier).ceil() as u32
}

/// Points still missing to reach `level` from `current_sp`
pub fn left_points_to_level(current_sp: u32, rank: u32, level: u8) -> u32 {
    required_points(rank, level).saturating_sub(current_sp)
}

/// Points missing for `level` alone
///
/// Counts from the start of that level, or from `current_sp` if the level
/// is already partially trained.
pub fn left_points_for_level_only(current_sp: u32, rank: u32, level: u8) -> u32 {
    if level == 0 {
        return 0;
    }
    let start = current_sp.max(required_points(rank, level - 1));
    required_points(rank, level).saturating_sub(start)
}

/// Largest level whose cumulative requirement is covered by `skill_points`
pub fn level_for_points(rank: u32, skill_points: u32) -> u8 {
    let mut level = 0;
    while level < MAX_LEVEL && skill_points >= required_points(rank, level + 1) {
        level += 1;
    }
    level
}
