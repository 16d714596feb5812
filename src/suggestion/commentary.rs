//! Banter lines announced alongside suggested moves.
//!
//! Pure function over an injected RNG so callers can seed it. The first two
//! plies always get a line; after that the bot speaks with probability 0.4.
//! Pool choice is phase-first: opening lines win even over a capture.

use rand::seq::IteratorRandom;
use rand::Rng;

use crate::game_state::chess_types::PieceKind;

#[derive(Debug, Clone, Copy)]
pub struct CommentaryContext {
    /// Plies played in the session including the move being commented.
    pub ply: usize,
    pub captured: Option<PieceKind>,
    pub gives_check: bool,
}

const OPENING_LINES: [&str; 6] = [
    "Opening up nicely!",
    "Controlling the center.",
    "Let's play classical chess!",
    "Knights before bishops!",
    "Time to castle soon!",
    "Solid foundation first.",
];

const CHECK_LINES: [&str; 3] = ["Check! Defend wisely.", "Watch your king!", "King under fire!"];

const MIDGAME_LINES: [&str; 5] = [
    "Position getting spicy!",
    "Tactics incoming!",
    "Planning my strategy.",
    "Midgame muscle now!",
    "Focus mode on.",
];

const ENDGAME_LINES: [&str; 3] = [
    "Endgame is tricky!",
    "It's now or never!",
    "Precision matters now!",
];

pub fn pick_commentary<R: Rng + ?Sized>(rng: &mut R, ctx: &CommentaryContext) -> Option<String> {
    if ctx.ply > 2 && !rng.random_bool(0.4) {
        return None;
    }

    if ctx.ply < 8 {
        return choose(rng, &OPENING_LINES);
    }

    if let Some(piece) = ctx.captured {
        let pool = [
            format!("Captured your {}!", piece.name()),
            "Material matters!".to_owned(),
            "Piece down!".to_owned(),
        ];
        return pool.iter().choose(rng).cloned();
    }

    if ctx.gives_check {
        return choose(rng, &CHECK_LINES);
    }

    if ctx.ply < 25 {
        return choose(rng, &MIDGAME_LINES);
    }

    choose(rng, &ENDGAME_LINES)
}

fn choose<R: Rng + ?Sized>(rng: &mut R, pool: &[&str]) -> Option<String> {
    pool.iter().choose(rng).map(|line| (*line).to_owned())
}

#[cfg(test)]
mod tests {
    use super::{pick_commentary, CommentaryContext};
    use crate::game_state::chess_types::PieceKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn quiet(ply: usize) -> CommentaryContext {
        CommentaryContext {
            ply,
            captured: None,
            gives_check: false,
        }
    }

    #[test]
    fn always_speaks_in_the_first_two_plies() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let line = pick_commentary(&mut rng, &quiet(2)).expect("early plies always speak");
            assert!(super::OPENING_LINES.contains(&line.as_str()));
        }
    }

    #[test]
    fn later_plies_sometimes_stay_silent() {
        let mut spoke = 0;
        let mut silent = 0;
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            match pick_commentary(&mut rng, &quiet(12)) {
                Some(line) => {
                    assert!(super::MIDGAME_LINES.contains(&line.as_str()));
                    spoke += 1;
                }
                None => silent += 1,
            }
        }
        assert!(spoke > 0);
        assert!(silent > 0);
    }

    #[test]
    fn captures_name_the_piece_after_the_opening() {
        let ctx = CommentaryContext {
            ply: 10,
            captured: Some(PieceKind::Queen),
            gives_check: false,
        };
        let mut named = false;
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            if let Some(line) = pick_commentary(&mut rng, &ctx) {
                if line.contains("queen") {
                    named = true;
                }
                assert!(
                    line == "Captured your queen!"
                        || line == "Material matters!"
                        || line == "Piece down!"
                );
            }
        }
        assert!(named);
    }

    #[test]
    fn opening_lines_win_even_over_captures() {
        let ctx = CommentaryContext {
            ply: 2,
            captured: Some(PieceKind::Pawn),
            gives_check: true,
        };
        let mut rng = StdRng::seed_from_u64(7);
        let line = pick_commentary(&mut rng, &ctx).expect("early plies always speak");
        assert!(super::OPENING_LINES.contains(&line.as_str()));
    }

    #[test]
    fn check_and_endgame_pools_follow_the_context() {
        let check_ctx = CommentaryContext {
            ply: 10,
            captured: None,
            gives_check: true,
        };
        let mut seen_check_line = false;
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            if let Some(line) = pick_commentary(&mut rng, &check_ctx) {
                assert!(super::CHECK_LINES.contains(&line.as_str()));
                seen_check_line = true;
            }
        }
        assert!(seen_check_line);

        let mut seen_endgame_line = false;
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            if let Some(line) = pick_commentary(&mut rng, &quiet(30)) {
                assert!(super::ENDGAME_LINES.contains(&line.as_str()));
                seen_endgame_line = true;
            }
        }
        assert!(seen_endgame_line);
    }

    #[test]
    fn seeded_rng_makes_the_choice_deterministic() {
        let ctx = quiet(1);
        let mut first = StdRng::seed_from_u64(99);
        let mut second = StdRng::seed_from_u64(99);
        assert_eq!(
            pick_commentary(&mut first, &ctx),
            pick_commentary(&mut second, &ctx)
        );
    }
}
