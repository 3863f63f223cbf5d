//! Player action sources for the command line host

use std::io::{self, BufRead, Write};

use sk_core::{CombatError, Combatant, PlayerAction, PlayerActionSource, SkillId};

/// Health ratio below which the autopilot eats or heals
const LOW_HEALTH: f64 = 0.35;

/// Plays a fixed, simple policy so unattended runs stay reproducible
#[derive(Debug, Default)]
pub struct AutoPilot {
    turns: u32,
}

impl PlayerActionSource for AutoPilot {
    fn next_action(&mut self, player: &Combatant, _opponent: &Combatant) -> PlayerAction {
        self.turns += 1;
        let castable = player.castable_skills();

        if player.health_ratio() < LOW_HEALTH {
            if castable.contains(&SkillId::Heal) {
                return PlayerAction::CastSkill(SkillId::Heal);
            }
            if player.rations > 0 {
                return PlayerAction::EatRation;
            }
        }

        if let Some(skill) = castable.iter().copied().find(|s| s.is_offensive()) {
            return PlayerAction::CastSkill(skill);
        }

        if player.companion.is_some() && self.turns % 3 == 0 {
            return PlayerAction::CompanionStrike;
        }
        PlayerAction::Attack
    }
}

/// Asks on stdin, re-prompting until a valid menu entry is picked
///
/// End of input counts as a flee.
pub struct StdinPrompt<R> {
    input: R,
}

impl StdinPrompt<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self {
            input: io::stdin().lock(),
        }
    }
}

impl<R: BufRead> StdinPrompt<R> {
    fn read_choice(&mut self, options: &[PlayerAction]) -> Option<PlayerAction> {
        let mut line = String::new();
        loop {
            eprint!("choose 1-{}: ", options.len());
            io::stderr().flush().ok();

            line.clear();
            match self.input.read_line(&mut line) {
                Ok(0) | Err(_) => return None,
                Ok(_) => {}
            }

            let parsed = line
                .trim()
                .parse::<usize>()
                .map_err(|_| CombatError::InvalidActionIndex {
                    index: 0,
                    options: options.len(),
                })
                .and_then(|index| PlayerAction::from_menu(options, index));
            match parsed {
                Ok(action) => return Some(action),
                Err(err) => eprintln!("{err}"),
            }
        }
    }
}

impl<R: BufRead> PlayerActionSource for StdinPrompt<R> {
    fn next_action(&mut self, player: &Combatant, opponent: &Combatant) -> PlayerAction {
        eprintln!(
            "\n{} {}/{} hp {}/{} mp  vs  {} {}/{} hp",
            player.name,
            player.health.current(),
            player.health.max(),
            player.mana.current,
            player.mana.max,
            opponent.name,
            opponent.health.current(),
            opponent.health.max(),
        );

        let options = PlayerAction::menu_for(player);
        for (i, action) in options.iter().enumerate() {
            match action {
                PlayerAction::CastSkill(skill) => {
                    eprintln!("  {}. {} ({} mp)", i + 1, skill, skill.spec().cost)
                }
                other => eprintln!("  {}. {}", i + 1, other),
            }
        }

        self.read_choice(&options).unwrap_or(PlayerAction::Flee)
    }

    fn action_rejected(&mut self, _action: PlayerAction, error: &CombatError) {
        eprintln!("{error}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autopilot_opens_with_fireball() {
        let player = Combatant::player("Hero");
        let enemy = Combatant::enemy("Orc", 50, 10);
        let mut pilot = AutoPilot::default();
        assert_eq!(
            pilot.next_action(&player, &enemy),
            PlayerAction::CastSkill(SkillId::Fireball)
        );
    }

    #[test]
    fn test_autopilot_heals_when_low() {
        let player = Combatant::player("Hero").with_health(20, 100);
        let enemy = Combatant::enemy("Orc", 50, 10);
        let mut pilot = AutoPilot::default();
        assert_eq!(
            pilot.next_action(&player, &enemy),
            PlayerAction::CastSkill(SkillId::Heal)
        );
    }

    #[test]
    fn test_prompt_reprompts_on_bad_input() {
        let player = Combatant::player("Hero");
        let enemy = Combatant::enemy("Orc", 50, 10);
        let mut prompt = StdinPrompt {
            input: "x\n0\n99\n2\n".as_bytes(),
        };
        assert_eq!(prompt.next_action(&player, &enemy), PlayerAction::Defend);
    }

    #[test]
    fn test_prompt_flees_at_end_of_input() {
        let player = Combatant::player("Hero");
        let enemy = Combatant::enemy("Orc", 50, 10);
        let mut prompt = StdinPrompt { input: "".as_bytes() };
        assert_eq!(prompt.next_action(&player, &enemy), PlayerAction::Flee);
    }
}
