use crate::{Action, AutoplayError, Choices};
use fireside_core::{EventBus, Game, GameError};

/// Applies `action` to `game` in place, resolving `target` positionally into
/// the action's own target or mode list. Returns `true` once the match is
/// over or the acting player's turn has ended.
pub fn apply(
    game: &mut Game,
    action: &Action,
    target: Option<usize>,
    events: &mut EventBus,
) -> Result<bool, AutoplayError> {
    let player = game.current_player();
    match action {
        Action::PlayCard {
            hand_index,
            choices,
            ..
        } => {
            let (choice, aim) = match choices {
                Choices::None => (None, None),
                Choices::Targets(targets) => {
                    let aim = *pick(targets, target, GameError::TargetRequired)?;
                    (None, Some(aim))
                }
                Choices::Modes(modes) => {
                    pick(modes, target, GameError::ChoiceRequired)?;
                    (target, None)
                }
            };
            game.play_card(*hand_index, choice, aim, events)?;
        }
        Action::UseHeroPower { targets } => {
            let aim = match targets {
                Some(targets) => Some(*pick(targets, target, GameError::TargetRequired)?),
                None => None,
            };
            game.use_hero_power(aim, events)?;
        }
        Action::Attack { attacker, targets } => {
            let aim = *pick(targets, target, GameError::TargetRequired)?;
            game.attack(*attacker, aim, events)?;
        }
        Action::EndTurn => {
            game.end_turn(events)?;
            return Ok(true);
        }
    }
    Ok(game.is_over() || game.current_player() != player)
}

/// Copying form of [`apply`]: the input game is left untouched.
pub fn simulate(
    game: &Game,
    action: &Action,
    target: Option<usize>,
) -> Result<(Game, bool), AutoplayError> {
    let mut copy = game.clone();
    let mut events = EventBus::default();
    let ended = apply(&mut copy, action, target, &mut events)?;
    Ok((copy, ended))
}

fn pick<T>(items: &[T], index: Option<usize>, missing: GameError) -> Result<&T, AutoplayError> {
    let index = index.ok_or(missing)?;
    items.get(index).ok_or(AutoplayError::InvalidTarget {
        index,
        len: items.len(),
    })
}
