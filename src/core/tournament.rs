use std::cmp::Ordering;

use tracing::debug;

use crate::core::error::GameError;
use crate::core::io::WordSupply;
use crate::core::round::{RoundOutcome, RoundStatus};

/// Lives a player holds at tournament start and regains by winning a round.
pub const MAX_LIVES: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    lives: u8,
    wins: u32,
}

impl Player {
    fn new(name: String) -> Self {
        Self { name, lives: MAX_LIVES, wins: 0 }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TournamentStatus {
    Ongoing,
    /// Settled with a winner.
    Decided,
    /// Both players eliminated with equal wins.
    Drawn,
}

/// Answer from [`Tournament::start_new_round`]: either a secret to play, or
/// the settled status when no further round may start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextRound {
    Word(String),
    Over(TournamentStatus),
}

/// A series of rounds between two players, alternating who guesses.
///
/// Whether the match is over is evaluated lazily, at the next round-start
/// checkpoint, by asking whether the opponent of the player about to guess
/// has run out of lives. That means the status can stay `Ongoing` for one
/// round boundary after the second player's lives hit zero; the draw/decide
/// classification happens only when someone asks for another round.
#[derive(Debug)]
pub struct Tournament {
    players: [Player; 2],
    current: usize,
    status: TournamentStatus,
}

impl Tournament {
    /// Starts a match; the first guesser is picked by coin flip.
    pub fn new(player1: impl Into<String>, player2: impl Into<String>) -> Self {
        Self::with_first_guesser(player1, player2, rand::random_range(0..2))
    }

    /// Starts a match with a fixed first guesser (0 or 1). Useful when the
    /// caller wants deterministic turn order.
    pub fn with_first_guesser(
        player1: impl Into<String>,
        player2: impl Into<String>,
        first: usize,
    ) -> Self {
        Self {
            players: [Player::new(player1.into()), Player::new(player2.into())],
            current: first % 2,
            status: TournamentStatus::Ongoing,
        }
    }

    /// Checks whether another round may start and, if so, fetches its secret.
    ///
    /// A settled match answers `Over` — that is a normal signal, not an
    /// error. A word-supply failure is recoverable: it propagates without
    /// touching tournament state, so the caller may retry.
    pub async fn start_new_round(&mut self, words: &dyn WordSupply) -> Result<NextRound, GameError> {
        if self.status != TournamentStatus::Ongoing {
            return Ok(NextRound::Over(self.status));
        }

        let opponent = &self.players[1 - self.current];
        if opponent.lives == 0 {
            self.status = if self.players[0].wins == self.players[1].wins {
                TournamentStatus::Drawn
            } else {
                TournamentStatus::Decided
            };
            debug!(status = ?self.status, "tournament settled at round-start checkpoint");
            return Ok(NextRound::Over(self.status));
        }

        let word = words
            .fetch_word()
            .await
            .map_err(|source| GameError::WordSupply {
                source_name: words.source_name().to_string(),
                source,
            })?;
        Ok(NextRound::Word(word))
    }

    /// Books one finished round against the current guesser and flips the
    /// turn. A win refills the guesser's lives; a loss costs one, clamped at
    /// zero so a timeout on an empty pool cannot underflow.
    pub fn handle_round_end(&mut self, outcome: &RoundOutcome) {
        debug_assert!(outcome.status.is_terminal(), "round outcome must be terminal");

        let guesser = &mut self.players[self.current];
        if outcome.status == RoundStatus::Won {
            guesser.wins += 1;
            guesser.lives = MAX_LIVES;
        } else {
            guesser.lives = guesser.lives.saturating_sub(1);
        }
        debug!(
            player = %guesser.name,
            lives = guesser.lives,
            wins = guesser.wins,
            "round booked"
        );

        // Turn alternates after every round, win or lose.
        self.current = 1 - self.current;
    }

    /// The match winner, if there is one: the sole player still holding
    /// lives, or on double elimination whoever won strictly more rounds.
    pub fn winner(&self) -> Option<&Player> {
        let [a, b] = &self.players;
        match (a.lives > 0, b.lives > 0) {
            (true, false) => Some(a),
            (false, true) => Some(b),
            (false, false) => match a.wins.cmp(&b.wins) {
                Ordering::Greater => Some(a),
                Ordering::Less => Some(b),
                Ordering::Equal => None,
            },
            (true, true) => None,
        }
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn status(&self) -> TournamentStatus {
        self.status
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }
}
