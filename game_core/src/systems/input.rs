use hecs::World;

use crate::components::*;
use crate::resources::*;

/// Apply queued intents to the matching human paddles.
///
/// Intents persist until replaced, like a held key. Intents for unknown
/// players, benched tournament paddles or the AI paddle are dropped.
pub fn ingest_inputs(world: &mut World, queue: &mut InputQueue) {
    for &(player, intent) in &queue.inputs {
        let target = world
            .query_mut::<(&Paddle, &mut PaddleIntent, Option<&AiControlled>)>()
            .into_iter()
            .find(|(_entity, (paddle, _, _))| paddle.player == player);

        match target {
            Some((_entity, (paddle, paddle_intent, None))) if paddle.active => {
                *paddle_intent = PaddleIntent::resolve(intent, paddle.side);
            }
            _ => log::trace!("dropping intent {intent:?} for player {player}"),
        }
    }

    // Clear processed inputs
    queue.clear();
}

/// Drop every held intent (round end, new round)
pub fn release_intents(world: &mut World) {
    for (_entity, intent) in world.query_mut::<&mut PaddleIntent>() {
        *intent = PaddleIntent::Idle;
    }
}
