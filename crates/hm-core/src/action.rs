//! Agent actions
//!
//! Four unit moves, indexed by the discrete action code the environment
//! accepts. With `y` pointing down, code 1 moves the agent down the screen
//! and code 3 moves it up.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::EnvError;

/// Number of discrete actions.
pub const ACTION_COUNT: usize = 4;

/// Movement action
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Action {
    Right = 0,
    Down = 1,
    Left = 2,
    Up = 3,
}

impl Action {
    /// Unit displacement `(dx, dy)` for this action.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Action::Right => (1, 0),
            Action::Down => (0, 1),
            Action::Left => (-1, 0),
            Action::Up => (0, -1),
        }
    }

    /// Discrete code of this action.
    pub const fn code(self) -> i64 {
        self as i64
    }

    /// Look up an action by its discrete code.
    pub fn from_code(code: i64) -> Result<Self, EnvError> {
        Ok(match code {
            0 => Action::Right,
            1 => Action::Down,
            2 => Action::Left,
            3 => Action::Up,
            _ => return Err(EnvError::InvalidAction { code }),
        })
    }

    /// Action whose displacement is the given delta, if any.
    pub const fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (1, 0) => Some(Action::Right),
            (0, 1) => Some(Action::Down),
            (-1, 0) => Some(Action::Left),
            (0, -1) => Some(Action::Up),
            _ => None,
        }
    }
}

impl TryFrom<i64> for Action {
    type Error = EnvError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Action::from_code(code)
    }
}

/// Anything a caller may hand to `step` as an action.
///
/// Scalars are looked up directly. Single-element containers are unwrapped
/// to their scalar first; any other length is rejected.
pub trait IntoAction {
    fn into_action(self) -> Result<Action, EnvError>;
}

impl IntoAction for Action {
    fn into_action(self) -> Result<Action, EnvError> {
        Ok(self)
    }
}

macro_rules! impl_into_action_for_int {
    ($($ty:ty),*) => {
        $(
            impl IntoAction for $ty {
                fn into_action(self) -> Result<Action, EnvError> {
                    match i64::try_from(self) {
                        Ok(code) => Action::from_code(code),
                        Err(_) => Err(EnvError::InvalidAction { code: i64::MAX }),
                    }
                }
            }
        )*
    };
}

impl_into_action_for_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl<T: IntoAction> IntoAction for [T; 1] {
    fn into_action(self) -> Result<Action, EnvError> {
        let [inner] = self;
        inner.into_action()
    }
}

impl<T: IntoAction + Copy> IntoAction for &[T] {
    fn into_action(self) -> Result<Action, EnvError> {
        match self {
            [inner] => (*inner).into_action(),
            _ => Err(EnvError::InvalidActionShape { len: self.len() }),
        }
    }
}

impl<T: IntoAction> IntoAction for Vec<T> {
    fn into_action(mut self) -> Result<Action, EnvError> {
        if self.len() != 1 {
            return Err(EnvError::InvalidActionShape { len: self.len() });
        }
        match self.pop() {
            Some(inner) => inner.into_action(),
            None => Err(EnvError::InvalidActionShape { len: 0 }),
        }
    }
}
