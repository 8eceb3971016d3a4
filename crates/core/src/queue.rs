//! Preview queue of upcoming pieces, refilled from the randomizer

use std::collections::VecDeque;

use crate::pieces::Tetromino;
use crate::rng::{RandomSource, Randomizer, SimpleRng};
use crate::types::{GameConfig, PieceKind};

#[derive(Debug, Clone)]
pub struct PieceQueue<R = SimpleRng> {
    pieces: VecDeque<Tetromino>,
    randomizer: Randomizer<R>,
    len: usize,
}

impl PieceQueue<SimpleRng> {
    pub fn new(seed: u32, config: &GameConfig) -> Self {
        Self::with_randomizer(Randomizer::new(seed), config)
    }
}

impl<R: RandomSource> PieceQueue<R> {
    /// Queue holding `config.preview_count` pieces, filled immediately
    pub fn with_randomizer(randomizer: Randomizer<R>, config: &GameConfig) -> Self {
        let len = config.preview_count;
        let mut queue = Self {
            pieces: VecDeque::with_capacity(len + 1),
            randomizer,
            len,
        };
        queue.fill(config);
        queue
    }

    /// Top the queue back up to its configured length
    pub fn fill(&mut self, config: &GameConfig) {
        while self.pieces.len() < self.len {
            let kind = self.randomizer.next();
            self.pieces.push_back(Tetromino::spawn(kind, config));
        }
    }

    /// Take the front piece and refill the tail
    pub fn pop(&mut self, config: &GameConfig) -> Option<Tetromino> {
        let piece = self.pieces.pop_front();
        self.fill(config);
        piece
    }

    /// Clear the queue and the current bag, then refill from a fresh shuffle
    pub fn reset(&mut self, config: &GameConfig) {
        self.pieces.clear();
        self.randomizer.reset();
        self.len = config.preview_count;
        self.fill(config);
    }

    pub fn preview(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.pieces.iter().map(|p| p.kind)
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn randomizer(&self) -> &Randomizer<R> {
        &self.randomizer
    }
}
