//! Perft move-path enumeration.
//!
//! Walks the legal move tree to a fixed depth and tallies per-move-kind
//! counters at the leaves. The counts are compared against published
//! reference values to validate the generator.

use std::sync::Arc;
use std::thread;

use crate::game_state::game_state::GameState;
use crate::move_generation::move_generator::{
    GeneratedMove, MoveGenResult, MoveGenerationError, MoveGenerator,
};
use crate::moves::move_descriptions::{
    move_promotion_piece_code, FLAG_CAPTURE, FLAG_CASTLING, FLAG_EN_PASSANT, NO_PIECE_CODE,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

pub fn perft<G: MoveGenerator>(
    generator: &G,
    game_state: &GameState,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    perft_single_thread(generator, game_state, depth)
}

pub fn perft_single_thread<G: MoveGenerator>(
    generator: &G,
    game_state: &GameState,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let root_moves = generator.generate_legal_moves(game_state)?;
    let mut total = PerftCounts::default();

    for mv in root_moves {
        perft_recurse(generator, &mv, depth, 1, &mut total)?;
    }

    Ok(total)
}

pub fn perft_multi_threaded(
    generator: Arc<dyn MoveGenerator>,
    game_state: &GameState,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let root_moves = generator.generate_legal_moves(game_state)?;
    let mut handles = Vec::with_capacity(root_moves.len());

    for mv in root_moves {
        let generator_ref = Arc::clone(&generator);
        handles.push(thread::spawn(move || {
            let mut local = PerftCounts::default();
            let result = perft_recurse(generator_ref.as_ref(), &mv, depth, 1, &mut local);
            (result, local)
        }));
    }

    let mut total = PerftCounts::default();
    for handle in handles {
        let (result, local) = handle.join().map_err(|_| {
            MoveGenerationError::InvalidState("perft worker thread panicked".to_owned())
        })?;
        result?;
        total.merge(local);
    }

    Ok(total)
}

fn perft_recurse(
    generator: &dyn MoveGenerator,
    mv: &GeneratedMove,
    search_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) -> MoveGenResult<()> {
    if current_depth == search_depth {
        counts.nodes += 1;

        if (mv.move_description & FLAG_CAPTURE) != 0 {
            counts.captures += 1;
        }
        if (mv.move_description & FLAG_EN_PASSANT) != 0 {
            counts.en_passant += 1;
        }
        if (mv.move_description & FLAG_CASTLING) != 0 {
            counts.castles += 1;
        }
        if move_promotion_piece_code(mv.move_description) != NO_PIECE_CODE {
            counts.promotions += 1;
        }

        if mv.annotations.gives_check {
            counts.checks += 1;
        }
        if mv.annotations.is_checkmate {
            counts.checkmates += 1;
        }

        return Ok(());
    }

    let moves = generator.generate_legal_moves(&mv.game_after_move)?;
    for child in moves {
        perft_recurse(generator, &child, search_depth, current_depth + 1, counts)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::game_state::chess_types::{Color, PieceKind};
    use crate::move_generation::legal_move_generator::{
        FastLegalMoveGenerator, LegalMoveGenerator,
    };
    use crate::move_generation::move_generator::MoveAnnotations;
    use crate::moves::move_descriptions::{
        pack_move_description, FLAG_CAPTURE, FLAG_CASTLING, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT,
    };

    use super::*;

    struct MockMoveGenerator;

    impl MoveGenerator for MockMoveGenerator {
        fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<GeneratedMove>> {
            match game_state.ply {
                0 => Ok(vec![
                    next_move(
                        game_state,
                        12,
                        28,
                        PieceKind::Pawn,
                        None,
                        None,
                        FLAG_DOUBLE_PAWN_PUSH,
                        MoveAnnotations::default(),
                        1,
                    ),
                    next_move(
                        game_state,
                        4,
                        6,
                        PieceKind::King,
                        None,
                        None,
                        FLAG_CASTLING,
                        MoveAnnotations::default(),
                        2,
                    ),
                ]),
                1 if game_state.halfmove_clock == 1 => Ok(vec![next_move(
                    game_state,
                    28,
                    35,
                    PieceKind::Pawn,
                    Some(PieceKind::Pawn),
                    None,
                    FLAG_CAPTURE | FLAG_EN_PASSANT,
                    MoveAnnotations {
                        gives_check: true,
                        is_checkmate: false,
                    },
                    3,
                )]),
                1 if game_state.halfmove_clock == 2 => Ok(vec![
                    next_move(
                        game_state,
                        6,
                        21,
                        PieceKind::King,
                        None,
                        None,
                        0,
                        MoveAnnotations::default(),
                        4,
                    ),
                    next_move(
                        game_state,
                        48,
                        56,
                        PieceKind::Pawn,
                        None,
                        Some(PieceKind::Queen),
                        0,
                        MoveAnnotations {
                            gives_check: true,
                            is_checkmate: true,
                        },
                        5,
                    ),
                ]),
                _ => Ok(Vec::new()),
            }
        }
    }

    fn next_move(
        game_state: &GameState,
        from: u8,
        to: u8,
        moved_piece: PieceKind,
        captured_piece: Option<PieceKind>,
        promotion_piece: Option<PieceKind>,
        flags: u64,
        annotations: MoveAnnotations,
        next_halfmove: u16,
    ) -> GeneratedMove {
        let mut game_after_move = game_state.clone();
        game_after_move.ply += 1;
        game_after_move.side_to_move = match game_after_move.side_to_move {
            Color::White => Color::Black,
            Color::Black => Color::White,
        };
        game_after_move.halfmove_clock = next_halfmove;

        let move_description =
            pack_move_description(from, to, moved_piece, captured_piece, promotion_piece, flags);

        GeneratedMove {
            move_description,
            game_after_move,
            annotations,
        }
    }

    #[test]
    fn perft_depth_zero_counts_single_node() {
        let generator = MockMoveGenerator;
        let game = GameState::new_empty();

        let counts = perft(&generator, &game, 0).expect("perft should run");
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 1,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn perft_depth_two_aggregates_leaf_metrics() {
        let generator = MockMoveGenerator;
        let game = GameState::new_empty();

        let counts = perft(&generator, &game, 2).expect("perft should run");

        assert_eq!(
            counts,
            PerftCounts {
                nodes: 3,
                captures: 1,
                en_passant: 1,
                castles: 0,
                promotions: 1,
                checks: 2,
                checkmates: 1,
            }
        );
    }

    #[test]
    fn startpos_matches_reference_node_counts() {
        let generator = FastLegalMoveGenerator;
        let game = GameState::new_game();

        let depth1 = perft(&generator, &game, 1).expect("perft should run");
        let depth2 = perft(&generator, &game, 2).expect("perft should run");
        let depth3 = perft(&generator, &game, 3).expect("perft should run");

        assert_eq!(depth1.nodes, 20);
        assert_eq!(depth2.nodes, 400);
        assert_eq!(depth3.nodes, 8902);
        assert_eq!(depth3.captures, 34);
    }

    #[test]
    fn rook_endgame_matches_reference_node_counts() {
        let generator = FastLegalMoveGenerator;
        let game = GameState::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1")
            .expect("FEN should parse");

        let depth1 = perft(&generator, &game, 1).expect("perft should run");
        let depth2 = perft(&generator, &game, 2).expect("perft should run");
        let depth3 = perft(&generator, &game, 3).expect("perft should run");

        assert_eq!(depth1.nodes, 14);
        assert_eq!(depth2.nodes, 191);
        assert_eq!(depth3.nodes, 2812);
    }

    #[test]
    fn complex_middlegame_counts_move_kinds() {
        let generator = LegalMoveGenerator;
        let game = GameState::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .expect("FEN should parse");

        let counts = perft(&generator, &game, 1).expect("perft should run");
        assert_eq!(counts.nodes, 48);
        assert_eq!(counts.captures, 8);
        assert_eq!(counts.castles, 2);
        assert_eq!(counts.en_passant, 0);
        assert_eq!(counts.checks, 0);
    }

    #[test]
    fn multi_threaded_perft_agrees_with_single_thread() {
        let game = GameState::new_game();
        let single = perft_single_thread(&FastLegalMoveGenerator, &game, 2)
            .expect("perft should run");
        let multi = perft_multi_threaded(Arc::new(FastLegalMoveGenerator), &game, 2)
            .expect("perft should run");
        assert_eq!(single, multi);
    }
}
