//! Precomputed knight attack table.

pub const KNIGHT_ATTACKS: [u64; 64] = generate_knight_attacks();

#[inline]
pub const fn knight_attacks(square: u8) -> u64 {
    KNIGHT_ATTACKS[square as usize]
}

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const fn generate_knight_attacks() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;

        let mut i = 0usize;
        while i < KNIGHT_OFFSETS.len() {
            let (df, dr) = KNIGHT_OFFSETS[i];
            attacks |= set_if_valid(file + df, rank + dr);
            i += 1;
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

const fn set_if_valid(file: i32, rank: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }

    let square = (rank as usize) * 8 + (file as usize);
    1u64 << square
}

#[cfg(test)]
mod tests {
    use super::{knight_attacks, KNIGHT_ATTACKS};

    #[test]
    fn knight_attacks_from_d4_has_eight_targets() {
        let d4 = 27u8;
        assert_eq!(KNIGHT_ATTACKS[d4 as usize].count_ones(), 8);
        assert_eq!(knight_attacks(d4).count_ones(), 8);
    }

    #[test]
    fn knight_attacks_from_a1_has_two_targets() {
        let a1 = 0u8;
        let expected = (1u64 << 10) | (1u64 << 17);
        assert_eq!(knight_attacks(a1), expected);
    }

    #[test]
    fn knight_attacks_from_g1_cover_startpos_development() {
        let g1 = 6u8;
        let f3 = 21u8;
        let h3 = 23u8;
        let e2 = 12u8;
        let attacks = knight_attacks(g1);
        assert_ne!(attacks & (1u64 << f3), 0);
        assert_ne!(attacks & (1u64 << h3), 0);
        assert_ne!(attacks & (1u64 << e2), 0);
        assert_eq!(attacks.count_ones(), 3);
    }
}
