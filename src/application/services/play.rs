//! Turn-based play loop over a [`Console`].

use colored::Colorize;
use tracing::{debug, info, instrument};

use crate::application::render;
use crate::application::services::game::{GameSession, Move, MoveOutcome};
use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::RandomSource;
use crate::infrastructure::traits::Console;

/// One line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCommand {
    Go(Move),
    Quit,
    Unknown(String),
}

impl PlayerCommand {
    pub fn parse(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "l" | "left" => PlayerCommand::Go(Move::Left),
            "r" | "right" => PlayerCommand::Go(Move::Right),
            "u" | "up" => PlayerCommand::Go(Move::Up),
            "q" | "quit" | "exit" => PlayerCommand::Quit,
            other => PlayerCommand::Unknown(other.to_string()),
        }
    }
}

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub won: bool,
    pub unexplored: usize,
    pub moves: usize,
}

pub struct GameService<C: Console> {
    console: C,
}

impl<C: Console> GameService<C> {
    pub fn new(console: C) -> Self {
        Self { console }
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn into_console(self) -> C {
        self.console
    }

    /// Play `session` until the exit is reached or the player quits.
    ///
    /// In debug mode the whole tree is drawn every turn and the screen is
    /// never cleared. End of input counts as quitting.
    #[instrument(level = "debug", skip_all, fields(debug = debug_mode))]
    pub fn run<R: RandomSource>(
        &mut self,
        mut session: GameSession,
        debug_mode: bool,
        rng: &mut R,
    ) -> ApplicationResult<GameSummary> {
        let mut notice: Option<String> = None;

        loop {
            if !debug_mode {
                self.console.clear().with_context("clear screen")?;
            }
            if let Some(text) = notice.take() {
                self.say(&format!("{}\n", text.yellow()))?;
            }
            for effect in session.enter_room()? {
                self.say(&format!("{}\n", effect))?;
            }
            if session.is_over() {
                break;
            }

            self.say(&format!("Unexplored rooms: {}\n", session.unexplored()))?;
            let view = Self::view(&session, debug_mode);
            self.say(&view)?;

            let outcome = if session.random_move_armed() {
                self.say("Press Enter: you cannot choose where you go ...\n")?;
                if self.console.read_line().with_context("read input")?.is_none() {
                    break;
                }
                session.random_step(rng)?
            } else {
                self.say("Your choice: ")?;
                let Some(line) = self.console.read_line().with_context("read command")? else {
                    break;
                };
                match PlayerCommand::parse(&line) {
                    PlayerCommand::Go(mv) => session.step(mv)?,
                    PlayerCommand::Quit => break,
                    PlayerCommand::Unknown(input) => {
                        debug!("unknown command: {:?}", input);
                        notice = Some("Invalid choice.".to_string());
                        continue;
                    }
                }
            };

            match outcome {
                MoveOutcome::Won => break,
                MoveOutcome::Blocked(reason) => notice = Some(reason.to_string()),
                MoveOutcome::Moved => {}
            }
        }

        let summary = GameSummary {
            won: session.is_over(),
            unexplored: session.unexplored(),
            moves: session.moves(),
        };
        if summary.won {
            self.say(&format!(
                "{}\n",
                "Congratulations, you found the exit!".green().bold()
            ))?;
            let view = Self::view(&session, debug_mode);
            self.say(&view)?;
        } else {
            self.say("Game abandoned.\n")?;
        }
        self.say(&format!("Unexplored rooms: {}\n", summary.unexplored))?;
        info!(
            "game over: won={} moves={} unexplored={}",
            summary.won, summary.moves, summary.unexplored
        );
        Ok(summary)
    }

    /// Whole tree in debug mode, local view otherwise. No choices at the exit.
    fn view(session: &GameSession, debug_mode: bool) -> String {
        let tree = session.tree();
        if debug_mode {
            let mut view = render::debug_view(tree, Some(session.current()), false);
            if !session.at_exit() {
                view.push_str(&render::choices(tree, session.current()));
            }
            view
        } else {
            render::player_view(tree, session.current())
        }
    }

    fn say(&mut self, text: &str) -> ApplicationResult<()> {
        self.console.write(text).with_context("write output")
    }
}
