use crate::game::constants::player;
use crate::game::entity::Direction;

/// Parsed player intent command
///
/// The command channel is untrusted input relayed by the session layer;
/// anything that does not parse is dropped by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Begin moving in a direction (also redirects an active move)
    Move(Direction),
    /// Stop moving
    Stop,
    /// Become invisible to other players
    Camo,
    /// Drop camo and clear any active message
    Clear,
    /// Show a transient message above the player
    Print(String),
}

impl Command {
    /// Parse a raw command token; unknown tokens yield `None`
    ///
    /// `print` takes the rest of the line as the message, truncated to
    /// the display cap.
    pub fn parse(raw: &str) -> Option<Command> {
        match raw {
            "up" => return Some(Command::Move(Direction::Up)),
            "right" => return Some(Command::Move(Direction::Right)),
            "down" => return Some(Command::Move(Direction::Down)),
            "left" => return Some(Command::Move(Direction::Left)),
            "stop" => return Some(Command::Stop),
            "camo" => return Some(Command::Camo),
            "clear" => return Some(Command::Clear),
            _ => {}
        }

        if let Some(text) = raw.strip_prefix("print ") {
            let message = text.chars().take(player::MESSAGE_MAX_CHARS).collect();
            return Some(Command::Print(message));
        }
        if raw == "print" {
            return Some(Command::Print(String::new()));
        }

        None
    }
}
