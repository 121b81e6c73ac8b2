use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Session phase.
///
/// Valid transitions:
/// - Init -> Menu
/// - Menu -> Playing
/// - Playing -> Menu
/// - Playing -> GameOver
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Initial state
    Init,
    Menu,
    Playing,
    /// Terminal, no transition leaves it
    GameOver,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Self::Init, Self::Menu, Self::Playing, Self::GameOver];

    pub const fn allowed_transitions(self) -> &'static [Phase] {
        use Phase::*;
        match self {
            Init => &[Menu],
            Menu => &[Playing],
            Playing => &[Menu, GameOver],
            GameOver => &[],
        }
    }

    pub fn can_transition_to(self, target: Phase) -> bool {
        self.allowed_transitions().contains(&target)
    }

    pub const fn is_terminal(self) -> bool {
        self.allowed_transitions().is_empty()
    }

    pub const fn name(self) -> &'static str {
        use Phase::*;
        match self {
            Init => "init",
            Menu => "menu",
            Playing => "playing",
            GameOver => "gameOver",
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::Init
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Phase {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|phase| phase.name().eq_ignore_ascii_case(s))
            .ok_or(GameError::UnknownPhase)
    }
}

/// User intent that may move the session to another phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Start,
    Play,
    Stop,
    End,
}

impl Action {
    pub const ALL: [Action; 4] = [Self::Start, Self::Play, Self::Stop, Self::End];

    pub const fn name(self) -> &'static str {
        use Action::*;
        match self {
            Start => "start",
            Play => "play",
            Stop => "stop",
            End => "end",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Action {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.name().eq_ignore_ascii_case(s))
            .ok_or(GameError::UnknownAction)
    }
}

/// Phase state machine, every change goes through [`Phase::allowed_transitions`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    phase: Phase,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn handle_user_action(&mut self, action: &str) -> Result<Phase> {
        let parsed = action.trim().parse::<Action>().inspect_err(|_| {
            log::warn!("Unknown action '{}' in phase '{}'", action, self.phase);
        })?;
        self.apply_action(parsed)
    }

    pub fn apply_action(&mut self, action: Action) -> Result<Phase> {
        use Action::*;
        use Phase::*;

        let target = match (self.phase, action) {
            (Init, Start) => Menu,
            (Menu, Play) => Playing,
            (Playing, Stop) => Menu,
            (Playing, End) => GameOver,
            (phase, action) => {
                log::warn!("Action '{}' is not valid in phase '{}'", action, phase);
                return Err(GameError::InvalidAction { phase, action });
            }
        };
        self.transition(target)
    }

    pub fn transition_to(&mut self, target: &str) -> Result<Phase> {
        let parsed = target.trim().parse::<Phase>().inspect_err(|_| {
            log::warn!("Unknown phase '{}'", target);
        })?;
        self.transition(parsed)
    }

    pub fn transition(&mut self, target: Phase) -> Result<Phase> {
        let from = self.phase;
        if from.can_transition_to(target) {
            log::info!("Transition '{}' -> '{}'", from, target);
            self.phase = target;
            Ok(target)
        } else {
            log::warn!("Transition from '{}' to '{}' is forbidden", from, target);
            Err(GameError::IllegalStateTransition { from, to: target })
        }
    }
}
