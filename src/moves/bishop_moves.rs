//! Bishop attack bitboard generation.
//!
//! `BISHOP_RAYS` holds the full diagonal rays from each square on an empty
//! board; `bishop_attacks` walks the same rays against an occupancy mask,
//! including the first blocker square in the attack set.

pub const BISHOP_RAYS: [u64; 64] = generate_bishop_rays();

const DIAGONAL_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

#[inline]
pub fn bishop_attacks(square: u8, occupancy: u64) -> u64 {
    let sq = square as i32;
    let mut attacks = 0u64;

    for (file_step, rank_step) in DIAGONAL_DIRECTIONS {
        attacks |= trace_ray(sq, file_step, rank_step, occupancy);
    }

    attacks
}

const fn generate_bishop_rays() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let sq_i = sq as i32;
        let mut rays = 0u64;

        let mut dir = 0usize;
        while dir < DIAGONAL_DIRECTIONS.len() {
            let (file_step, rank_step) = DIAGONAL_DIRECTIONS[dir];
            rays |= trace_ray_const(sq_i, file_step, rank_step);
            dir += 1;
        }

        table[sq] = rays;
        sq += 1;
    }

    table
}

fn trace_ray(square: i32, file_step: i32, rank_step: i32, occupancy: u64) -> u64 {
    let mut file = (square % 8) + file_step;
    let mut rank = (square / 8) + rank_step;
    let mut attacks = 0u64;

    while (0..8).contains(&file) && (0..8).contains(&rank) {
        let target = (rank * 8 + file) as usize;
        let bit = 1u64 << target;
        attacks |= bit;

        if (occupancy & bit) != 0 {
            break;
        }

        file += file_step;
        rank += rank_step;
    }

    attacks
}

const fn trace_ray_const(square: i32, file_step: i32, rank_step: i32) -> u64 {
    let mut file = (square % 8) + file_step;
    let mut rank = (square / 8) + rank_step;
    let mut attacks = 0u64;

    while file >= 0 && file < 8 && rank >= 0 && rank < 8 {
        let target = (rank * 8 + file) as usize;
        attacks |= 1u64 << target;
        file += file_step;
        rank += rank_step;
    }

    attacks
}
