//! Beam propagation engine
//!
//! Traces the laser through the grid breadth-first. The segment list is the
//! work queue: each segment is visited once in insertion order and may
//! append the segments it produces in the neighbouring cell. Identical
//! (cell, entry, exit) segments are never queued twice, which keeps loops
//! through splitters finite.

use std::collections::HashSet;

use super::direction::Edge;
use super::state::{BeamSegment, Puzzle};
use super::token::TokenKind;
use crate::cell_index;
use crate::consts::BEAM_MAX;

/// Bounded, de-duplicating segment queue
#[derive(Debug, Clone)]
pub struct BeamQueue {
    segments: Vec<BeamSegment>,
    seen: HashSet<BeamSegment>,
    cap: usize,
}

impl BeamQueue {
    pub fn new() -> Self {
        Self::with_cap(BEAM_MAX)
    }

    pub fn with_cap(cap: usize) -> Self {
        Self {
            segments: Vec::with_capacity(cap),
            seen: HashSet::with_capacity(cap),
            cap,
        }
    }

    /// Queue a segment. Returns false if it was a duplicate or the queue is full.
    pub fn push(&mut self, segment: BeamSegment) -> bool {
        if self.segments.len() >= self.cap || !self.seen.insert(segment) {
            return false;
        }
        self.segments.push(segment);
        true
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn get(&self, i: usize) -> Option<BeamSegment> {
        self.segments.get(i).copied()
    }

    pub fn into_segments(self) -> Vec<BeamSegment> {
        self.segments
    }
}

impl Default for BeamQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one evaluation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeamTrace {
    /// Every distinct segment, in the order it was discovered
    pub segments: Vec<BeamSegment>,
    /// Required hits plus capped optional hits
    pub targets_hit: u8,
    /// Distinct non-laser, non-block tokens struck
    pub tokens_hit: usize,
    /// Tokens that have to be struck
    pub tokens_req: usize,
}

impl BeamTrace {
    /// Every token that counts has been touched
    pub fn all_tokens_hit(&self) -> bool {
        self.tokens_hit >= self.tokens_req
    }

    /// Win condition for a puzzle needing `targets_req` hits
    pub fn satisfies(&self, targets_req: u8) -> bool {
        self.targets_hit >= targets_req && self.all_tokens_hit()
    }
}

/// Evaluate the beam for `puzzle`, updating `hit` marks and `targets_hit`.
///
/// A grid without a laser produces an empty trace.
pub fn evaluate(puzzle: &mut Puzzle) -> BeamTrace {
    evaluate_with_cap(puzzle, BEAM_MAX)
}

/// As [`evaluate`] with a custom segment cap
pub fn evaluate_with_cap(puzzle: &mut Puzzle, cap: usize) -> BeamTrace {
    for token in puzzle.grid.iter_mut() {
        token.hit = false;
    }
    let tokens_req = puzzle.tokens_required();

    let Some(laser) = puzzle.laser_cell() else {
        puzzle.targets_hit = 0;
        return BeamTrace {
            tokens_req,
            ..Default::default()
        };
    };

    let mut queue = BeamQueue::with_cap(cap);
    let mut tokens_hit = 0;
    let mut req_hit: u8 = 0;
    let mut extra_hit: u8 = 0;

    queue.push(BeamSegment::new(
        laser,
        Edge::Stop,
        puzzle.grid[laser].dir.edge(),
    ));

    let mut next = 0;
    while let Some(segment) = queue.get(next) {
        next += 1;

        let Some((row, col)) = segment.exit.step(segment.row, segment.col) else {
            continue;
        };
        let cell = cell_index(row, col);
        let entry = segment.exit.across();

        let token = &mut puzzle.grid[cell];
        if token.kind.must_be_hit() && !token.hit {
            token.hit = true;
            tokens_hit += 1;
        }
        let token = *token;

        let exit = match token.kind {
            TokenKind::None | TokenKind::Block => entry.across(),
            TokenKind::Checkpoint => {
                if entry.is_vertical() == token.dir.is_vertical() {
                    entry.across()
                } else {
                    Edge::Stop
                }
            }
            TokenKind::Laser => Edge::Stop,
            TokenKind::Mirror => entry.reflect(token.dir),
            TokenKind::Splitter => {
                queue.push(BeamSegment::new(cell, entry, entry.across()));
                entry.reflect(token.dir)
            }
            TokenKind::Target => {
                if entry == token.dir.edge() {
                    if token.req_target {
                        req_hit = req_hit.saturating_add(1);
                    } else if extra_hit < puzzle.targets_extra {
                        extra_hit += 1;
                    }
                    Edge::Stop
                } else if entry == token.dir.cw().edge() {
                    Edge::Stop
                } else {
                    entry.reflect(token.dir)
                }
            }
        };
        queue.push(BeamSegment::new(cell, entry, exit));
    }

    let targets_hit = req_hit.saturating_add(extra_hit);
    puzzle.targets_hit = targets_hit;

    let trace = BeamTrace {
        segments: queue.into_segments(),
        targets_hit,
        tokens_hit,
        tokens_req,
    };
    log::trace!(
        "beam: {} segments, targets {}/{}, tokens {}/{}",
        trace.segments.len(),
        trace.targets_hit,
        puzzle.targets_req,
        trace.tokens_hit,
        trace.tokens_req
    );
    trace
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::GRID_SIZE;
    use crate::sim::direction::Direction;
    use crate::sim::token::Token;
    use proptest::prelude::*;

    fn laser(dir: Direction) -> Token {
        Token::new(TokenKind::Laser, dir)
    }

    fn seg(row: usize, col: usize, entry: Edge, exit: Edge) -> BeamSegment {
        BeamSegment {
            row,
            col,
            entry,
            exit,
        }
    }

    fn prepared(mut puzzle: Puzzle) -> Puzzle {
        puzzle.update_targets_extra().unwrap();
        puzzle
    }

    #[test]
    fn test_mirror_sends_beam_off_grid() {
        let mut puzzle = prepared(
            Puzzle::new(1, 1)
                .with_token(0, 0, laser(Direction::East))
                .with_token(0, 2, Token::new(TokenKind::Mirror, Direction::East))
                .with_token(2, 2, Token::new(TokenKind::Target, Direction::North).required()),
        );

        let trace = evaluate(&mut puzzle);
        assert_eq!(
            trace.segments,
            vec![
                seg(0, 0, Edge::Stop, Edge::East),
                seg(0, 1, Edge::West, Edge::East),
                seg(0, 2, Edge::West, Edge::North),
            ]
        );
        assert_eq!(trace.targets_hit, 0);
        assert_eq!(puzzle.targets_hit, 0);
        assert!(puzzle.token(0, 2).hit);
        assert!(!puzzle.token(2, 2).hit);
        assert!(!trace.satisfies(puzzle.targets_req));
    }

    #[test]
    fn test_mirror_into_target_solves() {
        // North/South mirror turns an eastbound beam south onto a north-facing target
        let mut puzzle = prepared(
            Puzzle::new(1, 1)
                .with_token(0, 0, laser(Direction::East))
                .with_token(0, 2, Token::new(TokenKind::Mirror, Direction::North))
                .with_token(2, 2, Token::new(TokenKind::Target, Direction::North).required()),
        );

        let trace = evaluate(&mut puzzle);
        assert_eq!(trace.segments.last(), Some(&seg(2, 2, Edge::North, Edge::Stop)));
        assert_eq!(trace.targets_hit, 1);
        assert_eq!(trace.tokens_hit, 2);
        assert!(trace.satisfies(1));
    }

    #[test]
    fn test_block_and_empty_pass_straight() {
        let mut puzzle = prepared(
            Puzzle::new(1, 0)
                .with_token(2, 0, laser(Direction::East))
                .with_token(2, 2, Token::new(TokenKind::Block, Direction::North)),
        );
        let trace = evaluate(&mut puzzle);
        assert_eq!(trace.segments.len(), 5);
        assert!(trace.segments[1..].iter().all(|s| s.entry == Edge::West && s.exit == Edge::East));
        // Blocks don't count toward the token quota
        assert!(!puzzle.token(2, 2).hit);
        assert_eq!(trace.tokens_req, 0);
    }

    #[test]
    fn test_checkpoint_axis() {
        let build = |dir| {
            prepared(
                Puzzle::new(1, 0)
                    .with_token(2, 0, laser(Direction::East))
                    .with_token(2, 2, Token::new(TokenKind::Checkpoint, dir)),
            )
        };

        let mut along = build(Direction::West);
        let trace = evaluate(&mut along);
        assert!(trace.segments.contains(&seg(2, 2, Edge::West, Edge::East)));
        assert!(trace.segments.contains(&seg(2, 4, Edge::West, Edge::East)));

        let mut across = build(Direction::North);
        let trace = evaluate(&mut across);
        assert_eq!(trace.segments.last(), Some(&seg(2, 2, Edge::West, Edge::Stop)));
        // Touching a checkpoint counts even when it blocks
        assert!(across.token(2, 2).hit);
        assert!(trace.all_tokens_hit());
    }

    #[test]
    fn test_splitter_fans_out() {
        let mut puzzle = prepared(
            Puzzle::new(1, 0)
                .with_token(0, 2, laser(Direction::South))
                .with_token(2, 2, Token::new(TokenKind::Splitter, Direction::North)),
        );
        let trace = evaluate(&mut puzzle);

        let at_splitter: Vec<_> = trace
            .segments
            .iter()
            .filter(|s| (s.row, s.col) == (2, 2))
            .copied()
            .collect();
        assert_eq!(
            at_splitter,
            vec![
                seg(2, 2, Edge::North, Edge::South),
                seg(2, 2, Edge::North, Edge::East),
            ]
        );
        assert!(trace.segments.contains(&seg(4, 2, Edge::North, Edge::South)));
        assert!(trace.segments.contains(&seg(2, 4, Edge::West, Edge::East)));
    }

    #[test]
    fn test_target_sides() {
        // Target faces North, beam comes down from the laser above
        let build = |dir| {
            prepared(
                Puzzle::new(1, 1)
                    .with_token(0, 2, laser(Direction::South))
                    .with_token(2, 2, Token::new(TokenKind::Target, dir).required()),
            )
        };

        let mut face_on = build(Direction::North);
        let trace = evaluate(&mut face_on);
        assert_eq!(trace.targets_hit, 1);
        assert_eq!(trace.segments.last(), Some(&seg(2, 2, Edge::North, Edge::Stop)));

        // Entry == successor of the facing: absorbed, no credit
        let mut closed = build(Direction::West);
        let trace = evaluate(&mut closed);
        assert_eq!(trace.targets_hit, 0);
        assert_eq!(trace.segments.last(), Some(&seg(2, 2, Edge::North, Edge::Stop)));
        assert!(closed.token(2, 2).hit);

        // Remaining sides reflect like a mirror
        let mut east = build(Direction::East);
        let trace = evaluate(&mut east);
        assert_eq!(trace.targets_hit, 0);
        assert!(trace.segments.contains(&seg(2, 2, Edge::North, Edge::West)));

        let mut south = build(Direction::South);
        let trace = evaluate(&mut south);
        assert_eq!(trace.targets_hit, 0);
        assert!(trace.segments.contains(&seg(2, 2, Edge::North, Edge::East)));
    }

    #[test]
    fn test_optional_hits_are_capped() {
        // Splitter feeds two optional targets but only one extra counts
        let mut puzzle = prepared(
            Puzzle::new(1, 2)
                .with_token(0, 2, laser(Direction::South))
                .with_token(2, 2, Token::new(TokenKind::Splitter, Direction::North))
                .with_token(4, 2, Token::new(TokenKind::Target, Direction::North))
                .with_token(2, 4, Token::new(TokenKind::Target, Direction::West))
                .with_token(0, 0, Token::new(TokenKind::Target, Direction::East).required()),
        );
        assert_eq!(puzzle.targets_extra, 1);

        let trace = evaluate(&mut puzzle);
        assert_eq!(trace.targets_hit, 1);
        assert!(!trace.satisfies(2));
    }

    #[test]
    fn test_splitter_loop_terminates() {
        // Splitter plus three mirrors close a square; both loop directions return
        let mut puzzle = prepared(
            Puzzle::new(1, 0)
                .with_token(2, 0, laser(Direction::East))
                .with_token(2, 2, Token::new(TokenKind::Splitter, Direction::North))
                .with_token(2, 4, Token::new(TokenKind::Mirror, Direction::North))
                .with_token(4, 4, Token::new(TokenKind::Mirror, Direction::East))
                .with_token(4, 2, Token::new(TokenKind::Mirror, Direction::North)),
        );

        let trace = evaluate(&mut puzzle);
        assert!(trace.segments.len() <= BEAM_MAX);
        let unique: HashSet<_> = trace.segments.iter().collect();
        assert_eq!(unique.len(), trace.segments.len());
        // The beam comes back around into the laser cell
        assert!(trace.segments.contains(&seg(2, 0, Edge::East, Edge::Stop)));
        assert_eq!(trace.tokens_hit, 4);
    }

    #[test]
    fn test_no_laser_is_noop() {
        let mut puzzle = prepared(
            Puzzle::new(1, 0).with_token(1, 1, Token::new(TokenKind::Mirror, Direction::North)),
        );
        puzzle.grid[6].hit = true;
        let trace = evaluate(&mut puzzle);
        assert!(trace.segments.is_empty());
        assert_eq!(trace.targets_hit, 0);
        assert_eq!(trace.tokens_req, 1);
        assert!(!puzzle.grid[6].hit);
    }

    #[test]
    fn test_queue_cap_drops_segments() {
        let mut puzzle = prepared(Puzzle::new(1, 0).with_token(2, 0, laser(Direction::East)));
        let trace = evaluate_with_cap(&mut puzzle, 3);
        assert_eq!(trace.segments.len(), 3);
    }

    #[test]
    fn test_queue_dedup() {
        let mut queue = BeamQueue::new();
        let s = seg(1, 1, Edge::North, Edge::South);
        assert!(queue.push(s));
        assert!(!queue.push(s));
        assert_eq!(queue.len(), 1);
    }

    fn arb_token() -> impl Strategy<Value = Token> {
        // Mostly empty cells, at most one laser per grid is not enforced here
        prop_oneof![
            3 => Just(Token::EMPTY),
            2 => (0u8..=255).prop_filter_map("valid type", |b| {
                Token::decode(b).filter(|t| t.kind != TokenKind::Laser)
            }),
        ]
    }

    fn arb_puzzle() -> impl Strategy<Value = Puzzle> {
        (
            prop::collection::vec(arb_token(), GRID_SIZE),
            0usize..GRID_SIZE,
            0u8..4,
            0u8..6,
        )
            .prop_map(|(tokens, laser_cell, dir, targets_req)| {
                let mut puzzle = Puzzle::new(1, targets_req);
                for (i, token) in tokens.into_iter().enumerate() {
                    puzzle.grid[i] = token;
                }
                puzzle.grid[laser_cell] = laser(Direction::from_bits(dir));
                puzzle.targets_extra = targets_req;
                puzzle
            })
    }

    proptest! {
        #[test]
        fn prop_evaluate_is_idempotent(mut puzzle in arb_puzzle()) {
            let first = evaluate(&mut puzzle);
            let grid_after_first = puzzle.grid;
            let second = evaluate(&mut puzzle);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(grid_after_first, puzzle.grid);
        }

        #[test]
        fn prop_segments_are_unique_and_bounded(mut puzzle in arb_puzzle()) {
            let trace = evaluate(&mut puzzle);
            prop_assert!(trace.segments.len() <= BEAM_MAX);
            let unique: HashSet<_> = trace.segments.iter().collect();
            prop_assert_eq!(unique.len(), trace.segments.len());
            prop_assert!(trace.tokens_hit <= trace.tokens_req);
            let hits = puzzle.grid.iter().filter(|t| t.hit).count();
            prop_assert_eq!(hits, trace.tokens_hit);
        }
    }
}
