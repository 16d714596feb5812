//! Precomputed king attack table.
//!
//! One-square neighborhood per origin, used by legal move generation and by
//! the square-attack test that backs check detection. Castling is not encoded
//! here; it is generated separately from rights and transit conditions.

pub const KING_ATTACKS: [u64; 64] = generate_king_attacks();

#[inline]
pub const fn king_attacks(square: u8) -> u64 {
    KING_ATTACKS[square as usize]
}

const fn generate_king_attacks() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;

        let mut dr = -1i32;
        while dr <= 1 {
            let mut df = -1i32;
            while df <= 1 {
                if dr != 0 || df != 0 {
                    attacks |= set_if_valid(file + df, rank + dr);
                }
                df += 1;
            }
            dr += 1;
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
