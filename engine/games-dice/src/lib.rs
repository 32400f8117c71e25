//! Re-roll dice game for the dicemdp engine
//!
//! A player rolls `dice` dice with `sides` faces each. Every turn they either
//! stop, banking the final score of the current dice, or pick any non-empty
//! subset of dice to re-roll at a cost of `penalty` points.
//!
//! # Scoring
//!
//! Faces that appear more than once are flipped (`v` becomes `sides + 1 - v`)
//! before summing, so three sixes on 3d6 score 3 and a pair of ones scores 12:
//!
//! ```text
//! (1, 2, 3) -> 1 + 2 + 3       = 6
//! (1, 1, 6) -> 6 + 6 + 6       = 18
//! (6, 6, 6) -> 1 + 1 + 1       = 3
//! ```
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{Game, Mdp};
//! use games_dice::{DiceConfig, DiceGame};
//!
//! let mut game = DiceGame::with_seed(DiceConfig::default(), 42).unwrap();
//! assert_eq!(game.states().len(), 56);
//! assert_eq!(game.actions().len(), 8);
//!
//! let state = game.reset();
//! let outcome = game.roll(&game.stop_action()).unwrap();
//! assert!(outcome.game_over);
//! assert_eq!(outcome.state, state);
//! ```

use std::fmt;

use engine_core::{Game, GameError, GameMetadata, Mdp, RollOutcome, Transition};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Largest supported number of dice
pub const MAX_DICE: u8 = 8;
/// Largest supported number of faces per die
pub const MAX_SIDES: u8 = 20;

/// Rules of a dice game
#[derive(Debug, Clone, PartialEq)]
pub struct DiceConfig {
    /// Number of dice rolled
    pub dice: u8,
    /// Faces per die, valued 1..=sides
    pub sides: u8,
    /// Points lost per re-roll
    pub penalty: f64,
}

impl Default for DiceConfig {
    fn default() -> Self {
        Self {
            dice: 3,
            sides: 6,
            penalty: 1.0,
        }
    }
}

impl DiceConfig {
    /// Extended rules: two three-sided dice.
    pub fn extended() -> Self {
        Self {
            dice: 2,
            sides: 3,
            penalty: 1.0,
        }
    }

    pub fn with_dice(mut self, dice: u8) -> Self {
        self.dice = dice;
        self
    }

    pub fn with_sides(mut self, sides: u8) -> Self {
        self.sides = sides;
        self
    }

    pub fn with_penalty(mut self, penalty: f64) -> Self {
        self.penalty = penalty;
        self
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.dice == 0 || self.dice > MAX_DICE {
            return Err(GameError::InvalidConfig(format!(
                "dice must be in 1..={}, got {}",
                MAX_DICE, self.dice
            )));
        }
        if self.sides < 2 || self.sides > MAX_SIDES {
            return Err(GameError::InvalidConfig(format!(
                "sides must be in 2..={}, got {}",
                MAX_SIDES, self.sides
            )));
        }
        if !self.penalty.is_finite() || self.penalty < 0.0 {
            return Err(GameError::InvalidConfig(format!(
                "penalty must be a non-negative number, got {}",
                self.penalty
            )));
        }
        Ok(())
    }
}

/// Dice faces, always sorted ascending
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Dice(Vec<u8>);

impl Dice {
    /// Canonicalize a set of faces by sorting them.
    pub fn new(mut faces: Vec<u8>) -> Self {
        faces.sort_unstable();
        Self(faces)
    }

    pub fn faces(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, face) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", face)?;
        }
        write!(f, ")")
    }
}

/// Positions (into the sorted dice) to re-roll; empty means stop
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Reroll(Vec<u8>);

impl Reroll {
    /// Re-roll the given positions.
    pub fn new(mut positions: Vec<u8>) -> Self {
        positions.sort_unstable();
        positions.dedup();
        Self(positions)
    }

    /// The stop action.
    pub fn stop() -> Self {
        Self(Vec::new())
    }

    /// Re-roll every one of `dice` dice.
    pub fn all(dice: u8) -> Self {
        Self((0..dice).collect())
    }

    pub fn is_stop(&self) -> bool {
        self.0.is_empty()
    }

    pub fn positions(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Reroll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_stop() {
            write!(f, "stop")
        } else {
            write!(f, "reroll {:?}", self.0)
        }
    }
}

/// Score of stopping with `dice` showing.
pub fn final_score(dice: &Dice, sides: u8) -> f64 {
    let mut counts = [0u32; MAX_SIDES as usize + 1];
    for &face in dice.faces() {
        counts[face as usize] += 1;
    }
    counts
        .iter()
        .enumerate()
        .filter(|&(_, &n)| n > 0)
        .map(|(face, &n)| {
            let value = if n > 1 {
                sides as u32 + 1 - face as u32
            } else {
                face as u32
            };
            (value * n) as f64
        })
        .sum()
}

/// Sorted multisets of `len` faces from 1..=sides, in lexicographic order.
fn multisets(len: usize, sides: u8) -> Vec<Vec<u8>> {
    fn extend(start: u8, len: usize, sides: u8, current: &mut Vec<u8>, out: &mut Vec<Vec<u8>>) {
        if current.len() == len {
            out.push(current.clone());
            return;
        }
        for face in start..=sides {
            current.push(face);
            extend(face, len, sides, current, out);
            current.pop();
        }
    }

    let mut out = Vec::new();
    extend(1, len, sides, &mut Vec::with_capacity(len), &mut out);
    out
}

/// k-element subsets of 0..n, in lexicographic order.
fn combinations(n: u8, k: usize) -> Vec<Vec<u8>> {
    fn extend(start: u8, n: u8, k: usize, current: &mut Vec<u8>, out: &mut Vec<Vec<u8>>) {
        if current.len() == k {
            out.push(current.clone());
            return;
        }
        for pos in start..n {
            current.push(pos);
            extend(pos + 1, n, k, current, out);
            current.pop();
        }
    }

    let mut out = Vec::new();
    extend(0, n, k, &mut Vec::with_capacity(k), &mut out);
    out
}

fn factorial(n: usize) -> u64 {
    (1..=n as u64).product()
}

/// Probability of rolling exactly the multiset `faces` with fair dice.
fn multiset_probability(faces: &[u8], sides: u8) -> f64 {
    let mut arrangements = factorial(faces.len());
    let mut i = 0;
    while i < faces.len() {
        let run = faces[i..].iter().take_while(|&&f| f == faces[i]).count();
        arrangements /= factorial(run);
        i += run;
    }
    arrangements as f64 / (sides as f64).powi(faces.len() as i32)
}

/// The re-roll dice game
#[derive(Debug)]
pub struct DiceGame {
    config: DiceConfig,
    states: Vec<Dice>,
    actions: Vec<Reroll>,
    /// Roll distributions indexed by number of dice re-rolled
    roll_outcomes: Vec<Vec<(Vec<u8>, f64)>>,
    rng: ChaCha20Rng,
    current: Dice,
    score: f64,
    game_over: bool,
}

impl DiceGame {
    /// Build a game whose dice come from `rng`.
    pub fn with_rng(config: DiceConfig, rng: ChaCha20Rng) -> Result<Self, GameError> {
        config.validate()?;

        let dice = config.dice as usize;
        let states = multisets(dice, config.sides)
            .into_iter()
            .map(Dice)
            .collect();
        let actions = (0..=dice)
            .flat_map(|k| combinations(config.dice, k))
            .map(Reroll)
            .collect();
        let roll_outcomes = (0..=dice)
            .map(|k| {
                multisets(k, config.sides)
                    .into_iter()
                    .map(|faces| {
                        let p = multiset_probability(&faces, config.sides);
                        (faces, p)
                    })
                    .collect()
            })
            .collect();

        let mut game = Self {
            config,
            states,
            actions,
            roll_outcomes,
            rng,
            current: Dice(Vec::new()),
            score: 0.0,
            game_over: true,
        };
        game.reset();
        Ok(game)
    }

    /// Build a game with a reproducible dice stream.
    pub fn with_seed(config: DiceConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, ChaCha20Rng::seed_from_u64(seed))
    }

    /// Build a game seeded from OS entropy.
    pub fn from_entropy(config: DiceConfig) -> Result<Self, GameError> {
        Self::with_rng(config, ChaCha20Rng::from_entropy())
    }

    pub fn config(&self) -> &DiceConfig {
        &self.config
    }

    /// Dice currently showing.
    pub fn current(&self) -> &Dice {
        &self.current
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// Score of stopping with `dice` showing under this game's rules.
    pub fn final_score(&self, dice: &Dice) -> f64 {
        final_score(dice, self.config.sides)
    }

    /// Highest final score any state can bank.
    pub fn best_final_score(&self) -> f64 {
        self.states
            .iter()
            .map(|s| self.final_score(s))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    fn roll_die(&mut self) -> u8 {
        self.rng.gen_range(1..=self.config.sides)
    }
}

impl Mdp for DiceGame {
    type State = Dice;
    type Action = Reroll;

    fn states(&self) -> &[Dice] {
        &self.states
    }

    fn actions(&self) -> &[Reroll] {
        &self.actions
    }

    fn transition(&self, action: &Reroll, state: &Dice) -> Transition<Dice> {
        if action.is_stop() {
            return Transition::terminal(self.final_score(state));
        }

        debug_assert!(action
            .positions()
            .iter()
            .all(|&p| (p as usize) < state.len()));

        let kept: Vec<u8> = state
            .faces()
            .iter()
            .enumerate()
            .filter(|(i, _)| !action.positions().contains(&(*i as u8)))
            .map(|(_, &face)| face)
            .collect();

        let outcomes = &self.roll_outcomes[action.positions().len()];
        let mut next_states = Vec::with_capacity(outcomes.len());
        let mut probabilities = Vec::with_capacity(outcomes.len());
        for (rolled, p) in outcomes {
            let mut faces = kept.clone();
            faces.extend_from_slice(rolled);
            next_states.push(Dice::new(faces));
            probabilities.push(*p);
        }

        Transition::stochastic(next_states, probabilities, -self.config.penalty)
    }
}

impl Game for DiceGame {
    fn metadata(&self) -> GameMetadata {
        GameMetadata::new(
            "dice",
            format!("{}d{} re-roll", self.config.dice, self.config.sides),
        )
        .with_counts(self.states.len(), self.actions.len())
        .with_description(format!(
            "Stop to bank the dice (repeated faces flipped) or re-roll any subset for {} point(s)",
            self.config.penalty
        ))
    }

    fn reset(&mut self) -> Dice {
        self.game_over = false;
        self.score = 0.0;
        let faces = (0..self.config.dice).map(|_| self.roll_die()).collect();
        self.current = Dice::new(faces);
        self.current.clone()
    }

    fn roll(&mut self, action: &Reroll) -> Result<RollOutcome<Dice>, GameError> {
        if self.game_over {
            return Err(GameError::GameOver);
        }
        if !self.actions.contains(action) {
            return Err(GameError::InvalidAction {
                action: action.to_string(),
            });
        }

        if action.is_stop() {
            let banked = self.final_score(&self.current);
            self.game_over = true;
            self.score += banked;
            return Ok(RollOutcome {
                rolled: Vec::new(),
                state: self.current.clone(),
                game_over: true,
            });
        }

        self.score -= self.config.penalty;
        let mut faces = self.current.faces().to_vec();
        let mut rolled = Vec::with_capacity(action.positions().len());
        for &pos in action.positions() {
            let face = self.roll_die();
            faces[pos as usize] = face;
            rolled.push(face);
        }
        self.current = Dice::new(faces);

        Ok(RollOutcome {
            rolled,
            state: self.current.clone(),
            game_over: false,
        })
    }

    fn score(&self) -> f64 {
        self.score
    }

    fn stop_action(&self) -> Reroll {
        Reroll::stop()
    }
}
