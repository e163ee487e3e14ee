//! Win condition evaluation
//!
//! Two-combatant modes end as soon as either side reaches zero health. Trio
//! ends when at most one combatant is still standing. Losing every remaining
//! combatant on the same tick is reported as a draw.

use super::state::{GameEvent, GamePhase, GameState, MatchOutcome};

/// Terminal outcome for the current state, or None while the match goes on
pub fn evaluate(state: &GameState) -> Option<MatchOutcome> {
    let alive: Vec<_> = state.combatants.iter().filter(|c| c.is_alive()).map(|c| c.id).collect();

    if state.combatants.len() <= 2 {
        // Any elimination ends a duel
        if alive.len() == state.combatants.len() {
            return None;
        }
    } else if alive.len() > 1 {
        return None;
    }

    Some(match alive.as_slice() {
        [winner] => MatchOutcome::Winner(*winner),
        _ => MatchOutcome::Draw,
    })
}

/// Move the match into its terminal phase
pub fn conclude(state: &mut GameState, outcome: MatchOutcome) {
    state.phase = GamePhase::Concluded;
    state.outcome = Some(outcome);
    match outcome {
        MatchOutcome::Winner(id) => {
            log::info!("{} wins after {} ticks", state.combatants[id].name, state.time_ticks)
        }
        MatchOutcome::Draw => log::info!("Match drawn after {} ticks", state.time_ticks),
    }
    state.emit(GameEvent::MatchConcluded { outcome });
}
