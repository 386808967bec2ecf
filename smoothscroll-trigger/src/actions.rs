use core::str::FromStr;

use alloc::string::ToString;

use crate::Error;

/// What a viewport trigger does to its timeline on an edge event (when not scrubbing).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ToggleAction {
    Play,
    Pause,
    Resume,
    Reverse,
    Restart,
    Reset,
    Complete,
    #[default]
    None,
}

impl FromStr for ToggleAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "play" => Self::Play,
            "pause" => Self::Pause,
            "resume" => Self::Resume,
            "reverse" => Self::Reverse,
            "restart" => Self::Restart,
            "reset" => Self::Reset,
            "complete" => Self::Complete,
            "none" => Self::None,
            _ => {
                return Err(Error::InvalidToggleActions {
                    input: s.to_string(),
                });
            }
        })
    }
}

/// Actions for the four edge events, in the order enter, leave, enter back, leave back.
///
/// Parsed from four space-separated names, e.g. `"play none none reverse"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ToggleActions {
    pub on_enter: ToggleAction,
    pub on_leave: ToggleAction,
    pub on_enter_back: ToggleAction,
    pub on_leave_back: ToggleAction,
}

impl Default for ToggleActions {
    fn default() -> Self {
        Self {
            on_enter: ToggleAction::Play,
            on_leave: ToggleAction::None,
            on_enter_back: ToggleAction::None,
            on_leave_back: ToggleAction::None,
        }
    }
}

impl FromStr for ToggleActions {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidToggleActions {
            input: s.to_string(),
        };
        let mut actions = [ToggleAction::None; 4];
        let mut tokens = s.split_whitespace();
        for slot in &mut actions {
            let token = tokens.next().ok_or_else(invalid)?;
            *slot = token.parse().map_err(|_| invalid())?;
        }
        if tokens.next().is_some() {
            return Err(invalid());
        }
        let [on_enter, on_leave, on_enter_back, on_leave_back] = actions;
        Ok(Self {
            on_enter,
            on_leave,
            on_enter_back,
            on_leave_back,
        })
    }
}
