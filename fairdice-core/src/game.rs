//! Turn-based game orchestration.
//!
//! The session is a strictly sequential state machine:
//! `Init → DetermineFirstMove → SelectDice → RollUser → RollOpponent →
//! Compare → Done`. Every random decision that both sides have a stake in
//! runs through one fair commitment exchange; the opponent's own die pick
//! is plain randomness since only the opponent controls it.

use crate::commitment::{combine, digest_for, verify};
use crate::opponent::Opponent;
use crate::probability::win_matrix;
use crate::{Die, GameError, Result};
use serde::Serialize;
use uuid::Uuid;

/// Terminal I/O seam. One blocking line read per decision point; the CLI
/// backs this with dialoguer, tests with a scripted fake.
pub trait GameIo {
    fn prompt(&mut self, text: &str) -> Result<String>;
    fn show(&mut self, text: &str);
    fn show_matrix(&mut self, dice: &[Die], matrix: &[Vec<Option<f64>>]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Player {
    User,
    Opponent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GameState {
    Init,
    DetermineFirstMove,
    SelectDice,
    RollUser,
    RollOpponent,
    Compare,
    Done,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameOutcome {
    UserWins { user_face: i64, opponent_face: i64 },
    OpponentWins { user_face: i64, opponent_face: i64 },
    Tie { face: i64 },
    Aborted,
}

/// What a user prompt came back as.
enum Answer {
    Value(u64),
    Help,
    Exit,
    Invalid,
}

fn classify(line: &str, modulus: u64) -> Answer {
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case("x") || trimmed.eq_ignore_ascii_case("exit") {
        return Answer::Exit;
    }
    if trimmed == "?" || trimmed.eq_ignore_ascii_case("help") {
        return Answer::Help;
    }
    match trimmed.parse::<u64>() {
        Ok(value) if value < modulus => Answer::Value(value),
        _ => Answer::Invalid,
    }
}

pub struct GameSession {
    id: Uuid,
    dice: Vec<Die>,
    state: GameState,
    first_mover: Option<Player>,
    user_die: Option<usize>,
    opponent_die: Option<usize>,
    user_face: Option<i64>,
    opponent_face: Option<i64>,
    opponent: Opponent,
}

impl GameSession {
    pub fn new(dice: Vec<Die>) -> Result<Self> {
        if dice.len() < 2 {
            return Err(GameError::InvalidState(
                "a game needs at least two dice".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            dice,
            state: GameState::Init,
            first_mover: None,
            user_die: None,
            opponent_die: None,
            user_face: None,
            opponent_face: None,
            opponent: Opponent::new(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    pub fn user_die(&self) -> Option<usize> {
        self.user_die
    }

    pub fn opponent_die(&self) -> Option<usize> {
        self.opponent_die
    }

    /// Run the session to a terminal outcome. An exit request at any prompt
    /// comes back as `GameOutcome::Aborted`; it never kills the process.
    pub fn play(&mut self, io: &mut dyn GameIo) -> Result<GameOutcome> {
        self.state = GameState::DetermineFirstMove;
        tracing::info!("game {} started with {} dice", self.id, self.dice.len());

        loop {
            match self.state {
                GameState::DetermineFirstMove => {
                    io.show("Let's determine who makes the first move.");
                    let Some(bit) = self.fair_number(io, 2, "Try to guess my selection")? else {
                        return Ok(self.abort());
                    };
                    let first = if bit == 0 { Player::User } else { Player::Opponent };
                    self.first_mover = Some(first);
                    tracing::info!("game {}: first move goes to {:?}", self.id, first);
                    self.state = GameState::SelectDice;
                }
                GameState::SelectDice => {
                    if !self.select_dice(io)? {
                        return Ok(self.abort());
                    }
                    self.state = GameState::RollUser;
                }
                GameState::RollUser => {
                    let Some(index) = self.user_die else {
                        return Err(GameError::InvalidState("user die not assigned".to_string()));
                    };
                    io.show("It's time for your roll.");
                    let die_len = self.dice[index].len() as u64;
                    let Some(roll) = self.fair_number(io, die_len, "Add your number modulo the face count")?
                    else {
                        return Ok(self.abort());
                    };
                    let face = self.dice[index].face(roll as usize);
                    self.user_face = Some(face);
                    io.show(&format!("Your roll result is {face}."));
                    self.state = GameState::RollOpponent;
                }
                GameState::RollOpponent => {
                    let Some(index) = self.opponent_die else {
                        return Err(GameError::InvalidState(
                            "opponent die not assigned".to_string(),
                        ));
                    };
                    io.show("It's time for my roll.");
                    let die_len = self.dice[index].len() as u64;
                    let Some(roll) = self.fair_number(io, die_len, "Add your number modulo the face count")?
                    else {
                        return Ok(self.abort());
                    };
                    let face = self.dice[index].face(roll as usize);
                    self.opponent_face = Some(face);
                    io.show(&format!("My roll result is {face}."));
                    self.state = GameState::Compare;
                }
                GameState::Compare => {
                    let (Some(user_face), Some(opponent_face)) =
                        (self.user_face, self.opponent_face)
                    else {
                        return Err(GameError::InvalidState("rolls not complete".to_string()));
                    };
                    let outcome = compare_faces(user_face, opponent_face);
                    match &outcome {
                        GameOutcome::UserWins { .. } => {
                            io.show(&format!("You win ({user_face} > {opponent_face})!"))
                        }
                        GameOutcome::OpponentWins { .. } => {
                            io.show(&format!("I win ({opponent_face} > {user_face})!"))
                        }
                        GameOutcome::Tie { face } => {
                            io.show(&format!("It's a tie ({face} = {face})."))
                        }
                        GameOutcome::Aborted => unreachable!("compare never aborts"),
                    }
                    self.state = GameState::Done;
                    tracing::info!("game {} finished: {:?}", self.id, outcome);
                    return Ok(outcome);
                }
                GameState::Init | GameState::Done => {
                    return Err(GameError::InvalidState(format!(
                        "cannot resume from {:?}",
                        self.state
                    )));
                }
            }
        }
    }

    /// One full fairness exchange over `modulus`: commit, collect the
    /// user's number, reveal, verify, combine. Returns `None` on exit.
    ///
    /// The commitment is created once per decision and kept across
    /// help/invalid-input retries, so the digest the user saw is the digest
    /// that gets revealed.
    fn fair_number(
        &mut self,
        io: &mut dyn GameIo,
        modulus: u64,
        ask: &str,
    ) -> Result<Option<u64>> {
        let digest = self.opponent.begin_exchange(modulus)?;
        io.show(&format!(
            "I selected a random value in the range 0..{} (HMAC={}).",
            modulus,
            hex::encode(digest)
        ));

        let contribution = loop {
            let menu = (0..modulus)
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            match classify(&io.prompt(&format!("{ask} [{menu}, X - exit, ? - help]"))?, modulus) {
                Answer::Value(value) => break value,
                Answer::Help => self.show_help(io),
                Answer::Exit => return Ok(None),
                Answer::Invalid => io.show("Invalid selection, try again."),
            }
        };

        let (key, secret) = self.opponent.reveal()?;
        if !verify(&key, secret, &digest) {
            return Err(GameError::TamperedReveal {
                expected: hex::encode(digest),
                actual: hex::encode(digest_for(&key, secret)),
            });
        }
        let result = combine(secret, contribution, modulus);
        io.show(&format!("My number is {} (KEY={}).", secret, hex::encode(key)));
        io.show(&format!(
            "The fair result is {secret} + {contribution} = {result} (mod {modulus})."
        ));
        Ok(Some(result))
    }

    /// Dice assignment: the first mover picks from the full pool, the other
    /// side from whatever is left. Returns false on user exit.
    fn select_dice(&mut self, io: &mut dyn GameIo) -> Result<bool> {
        let mut pool: Vec<usize> = (0..self.dice.len()).collect();

        match self.first_mover {
            Some(Player::Opponent) => {
                let pick = self.opponent.pick_die(&pool);
                self.opponent_die = Some(pick);
                pool.retain(|&i| i != pick);
                io.show(&format!(
                    "I make the first move and choose the [{}] die.",
                    self.dice[pick]
                ));
                let Some(user_pick) = self.choose_die(io, &pool)? else {
                    return Ok(false);
                };
                self.user_die = Some(user_pick);
            }
            Some(Player::User) => {
                io.show("You make the first move.");
                let Some(user_pick) = self.choose_die(io, &pool)? else {
                    return Ok(false);
                };
                self.user_die = Some(user_pick);
                pool.retain(|&i| i != user_pick);
                let pick = self.opponent.pick_die(&pool);
                self.opponent_die = Some(pick);
                io.show(&format!("I choose the [{}] die.", self.dice[pick]));
            }
            None => {
                return Err(GameError::InvalidState(
                    "first mover not determined".to_string(),
                ));
            }
        }

        tracing::info!(
            "game {}: user die {:?}, opponent die {:?}",
            self.id,
            self.user_die,
            self.opponent_die
        );
        Ok(true)
    }

    /// Menu over the remaining pool; options are renumbered from 0 so the
    /// user never sees gaps after a die was taken.
    fn choose_die(&mut self, io: &mut dyn GameIo, pool: &[usize]) -> Result<Option<usize>> {
        loop {
            io.show("Choose your die:");
            for (option, &die_index) in pool.iter().enumerate() {
                io.show(&format!("{option} - {}", self.dice[die_index]));
            }
            match classify(
                &io.prompt("Your selection [X - exit, ? - help]")?,
                pool.len() as u64,
            ) {
                Answer::Value(option) => {
                    let picked = pool[option as usize];
                    io.show(&format!("You choose the [{}] die.", self.dice[picked]));
                    return Ok(Some(picked));
                }
                Answer::Help => self.show_help(io),
                Answer::Exit => return Ok(None),
                Answer::Invalid => io.show("Invalid selection, try again."),
            }
        }
    }

    fn show_help(&self, io: &mut dyn GameIo) {
        let matrix = win_matrix(&self.dice);
        io.show_matrix(&self.dice, &matrix);
    }

    fn abort(&mut self) -> GameOutcome {
        self.state = GameState::Done;
        tracing::info!("game {} aborted by user", self.id);
        GameOutcome::Aborted
    }
}

/// Strict comparison: higher face wins, equal faces tie.
pub fn compare_faces(user_face: i64, opponent_face: i64) -> GameOutcome {
    match user_face.cmp(&opponent_face) {
        std::cmp::Ordering::Greater => GameOutcome::UserWins {
            user_face,
            opponent_face,
        },
        std::cmp::Ordering::Less => GameOutcome::OpponentWins {
            user_face,
            opponent_face,
        },
        std::cmp::Ordering::Equal => GameOutcome::Tie { face: user_face },
    }
}
