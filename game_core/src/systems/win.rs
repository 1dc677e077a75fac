use crate::{GameMode, Paddle};
use hecs::World;

/// Active players whose score has reached `win_score`, in player order.
///
/// More than one entry means several paddles crossed the threshold on the
/// same scoring event; callers honour all of them.
pub fn check_winners(world: &World, win_score: u32) -> Vec<u8> {
    let mut leaders: Vec<u8> = world
        .query::<&Paddle>()
        .iter()
        .filter(|(_e, p)| p.active && p.score >= win_score)
        .map(|(_e, p)| p.player)
        .collect();
    leaders.sort_unstable();
    leaders
}

/// Announcement for a finished non-tournament match.
///
/// The computer is player 2 in single player. Two winners share the line.
pub fn win_message(mode: GameMode, winners: &[u8]) -> String {
    match winners {
        [] => String::new(),
        [2] if mode == GameMode::SinglePlayer => "Computer Wins!".to_string(),
        [player] => format!("Player {player} Wins!"),
        [first, rest @ ..] => {
            let others: Vec<String> = rest.iter().map(u8::to_string).collect();
            format!("Players {first} & {} Win!", others.join(" & "))
        }
    }
}
