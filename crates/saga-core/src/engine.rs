//! The narrative engine: walks the story graph and applies choice effects.

use crate::error::{EngineError, EngineResult};
use crate::rules::{Rules, Stats};
use crate::story::{Branch, Rgba, Story};

/// Where the engine is within the current branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Dialogue lines remain to be shown.
    Narrating,
    /// All lines shown and the branch offers choices.
    AwaitingChoice,
    /// All lines shown and the branch has no choices: an ending.
    Terminal,
}

/// A dialogue line ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLine {
    /// Speaker name, a space, then the line text.
    pub text: String,
    /// The speaker's colour.
    pub color: Rgba,
}

/// Outcome of [`NarrativeEngine::advance_line`].
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// The next dialogue line.
    Line(RenderedLine),
    /// Lines are exhausted; these choices are now on offer.
    Choices(Vec<String>),
    /// Choices were already revealed and are still pending.
    Waiting,
    /// The branch is an ending; nothing further happens.
    Ended,
}

/// What a resolved choice did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Branch named by the chosen option.
    pub chosen: String,
    /// Branch actually entered.
    pub landed: String,
    /// Stats after the choice.
    pub stats: Stats,
    /// The week limit was reached and the ending was forced.
    pub forced_ending: bool,
    /// The choice was unaffordable and redirected.
    pub budget_redirect: bool,
}

/// Mutable state of a playthrough.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    /// Running statistics.
    pub stats: Stats,
    /// Name of the current branch.
    pub current: String,
    /// Index of the next line to show.
    pub line_cursor: usize,
    /// Whether the current branch's choices have been revealed.
    pub awaiting_choice: bool,
}

/// Drives a playthrough of a [`Story`].
#[derive(Debug)]
pub struct NarrativeEngine<'s> {
    story: &'s Story,
    rules: Rules,
    branch: &'s Branch,
    state: RunState,
}

impl<'s> NarrativeEngine<'s> {
    /// Start a playthrough with the default rules and starting stats.
    pub fn new(story: &'s Story) -> EngineResult<Self> {
        Self::with_rules(story, Rules::default(), Stats::default())
    }

    /// Start a playthrough with custom rules and starting stats.
    pub fn with_rules(story: &'s Story, rules: Rules, stats: Stats) -> EngineResult<Self> {
        let branch = story.branch(&rules.start_branch)?;
        let state = RunState {
            stats,
            current: rules.start_branch.clone(),
            line_cursor: 0,
            awaiting_choice: false,
        };
        tracing::info!(branch = %state.current, "story started");
        Ok(Self {
            story,
            rules,
            branch,
            state,
        })
    }

    /// The story being played.
    pub fn story(&self) -> &'s Story {
        self.story
    }

    /// The rules in force.
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Current statistics.
    pub fn stats(&self) -> Stats {
        self.state.stats
    }

    /// Full run state.
    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Name of the current branch.
    pub fn current_name(&self) -> &str {
        &self.state.current
    }

    /// The current branch.
    pub fn current_branch(&self) -> &'s Branch {
        self.branch
    }

    /// Where the engine is within the current branch.
    pub fn phase(&self) -> Phase {
        if self.state.line_cursor < self.branch.lines.len() {
            Phase::Narrating
        } else if self.branch.is_ending() {
            Phase::Terminal
        } else {
            Phase::AwaitingChoice
        }
    }

    /// Whether the story has reached an ending.
    pub fn is_finished(&self) -> bool {
        self.phase() == Phase::Terminal
    }

    /// Show the next line, or reveal the choices once lines run out.
    pub fn advance_line(&mut self) -> EngineResult<Advance> {
        let Some(line) = self.branch.lines.get(self.state.line_cursor) else {
            return Ok(self.reveal_choices());
        };
        let color = self.story.character(line.character)?.color;
        let text = self.story.render_line(line)?;
        self.state.line_cursor += 1;
        Ok(Advance::Line(RenderedLine { text, color }))
    }

    /// Skip the remaining lines of the branch, as when the whole prompt has
    /// been displayed at once.
    pub fn finish_narration(&mut self) -> Advance {
        self.state.line_cursor = self.branch.lines.len();
        self.reveal_choices()
    }

    fn reveal_choices(&mut self) -> Advance {
        if self.branch.is_ending() {
            Advance::Ended
        } else if self.state.awaiting_choice {
            Advance::Waiting
        } else {
            self.state.awaiting_choice = true;
            Advance::Choices(self.branch.option_texts.clone())
        }
    }

    /// Every line of the current branch, rendered, with its speaker colour.
    pub fn prompt_lines(&self) -> EngineResult<Vec<(Rgba, String)>> {
        self.branch
            .lines
            .iter()
            .map(|line| {
                let color = self.story.character(line.character)?.color;
                Ok((color, self.story.render_line(line)?))
            })
            .collect()
    }

    /// Apply the choice at `option_index` and move to the next branch.
    ///
    /// Effects apply in a fixed order: weeks pass (reaching the week limit
    /// forces the closing ending, but the remaining deltas of the chosen
    /// branch still apply), budget, fan support (clamped), coach happiness
    /// (counted twice while the week is at most
    /// [`Rules::coaching_bonus_until_week`], then clamped), the budget check
    /// (an overdrawn budget is refunded and the story redirected to
    /// [`Rules::broke_branch`], unless the target is exempt), and finally the
    /// budget floor at zero.
    pub fn resolve(&mut self, option_index: usize) -> EngineResult<Resolution> {
        if self.phase() != Phase::AwaitingChoice {
            return Err(EngineError::NotAwaitingChoice);
        }
        let chosen = self
            .branch
            .next_branch_names
            .get(option_index)
            .ok_or(EngineError::InvalidChoice {
                index: option_index,
                available: self.branch.next_branch_names.len(),
            })?
            .clone();
        let deltas = self.story.branch(&chosen)?.deltas;
        let rules = &self.rules;
        let mut stats = self.state.stats;

        stats.week = stats.week.saturating_add(deltas.time);
        let forced_ending = stats.week >= rules.week_limit;

        stats.budget = stats.budget.saturating_add(deltas.budget);

        stats.fan = stats.fan.saturating_add(deltas.fan).clamp(0, rules.stat_max);

        stats.coach = stats.coach.saturating_add(deltas.coach);
        if stats.week <= rules.coaching_bonus_until_week {
            stats.coach = stats.coach.saturating_add(deltas.coach);
        }
        stats.coach = stats.coach.clamp(0, rules.stat_max);

        let budget_redirect = chosen != rules.budget_exempt_branch && stats.budget < 0;
        let mut target = chosen.as_str();
        if budget_redirect {
            stats.budget = stats.budget.saturating_sub(deltas.budget);
            target = rules.broke_branch.as_str();
        }
        stats.budget = stats.budget.max(0);

        if forced_ending {
            target = rules.week_limit_branch.as_str();
        }
        let landed = target.to_string();
        let branch = self.story.branch(&landed)?;

        self.state.stats = stats;
        self.enter(landed.clone(), branch);
        tracing::info!(
            chosen = %chosen,
            landed = %landed,
            week = stats.week,
            budget = stats.budget,
            fan = stats.fan,
            coach = stats.coach,
            "choice resolved"
        );

        Ok(Resolution {
            chosen,
            landed,
            stats,
            forced_ending,
            budget_redirect,
        })
    }

    fn enter(&mut self, name: String, branch: &'s Branch) {
        tracing::debug!(branch = %name, lines = branch.lines.len(), "entering branch");
        self.branch = branch;
        self.state.current = name;
        self.state.line_cursor = 0;
        self.state.awaiting_choice = false;
    }

    /// The status readout shown above the dialogue.
    pub fn status_line(&self) -> String {
        let stats = self.state.stats;
        let max = self.rules.stat_max;
        format!(
            "Week {}/{}    Remaining Budget: ${}m    Fan Support: {}/{}    Coach Happiness: {}/{}",
            stats.week, self.rules.week_limit, stats.budget, stats.fan, max, stats.coach, max
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::{Character, StatDeltas};
    use proptest::prelude::*;

    fn story_with(target: &str, deltas: StatDeltas) -> Story {
        let mut story = Story {
            characters: vec![
                Character::narrator(),
                Character::new("Coach", Rgba::new(0.0, 0.5, 1.0, 1.0)),
            ],
            ..Story::default()
        };
        story.branches.insert(
            "Menu".into(),
            Branch::default()
                .with_line(0, "The window opens.")
                .with_line(1, "Find me a winger.")
                .with_option("Go", target),
        );
        story
            .branches
            .insert(target.into(), Branch::with_deltas(deltas).with_line(0, "Done."));
        story.branches.insert("End4".into(), Branch::default());
        story
            .branches
            .insert("JadonNoMoney".into(), Branch::default().with_line(1, "We're broke."));
        story
    }

    fn ready(engine: &mut NarrativeEngine<'_>) {
        engine.finish_narration();
        assert_eq!(engine.phase(), Phase::AwaitingChoice);
    }

    #[test]
    fn starts_at_menu() {
        let story = story_with("A", StatDeltas::default());
        let engine = NarrativeEngine::new(&story).unwrap();
        assert_eq!(engine.current_name(), "Menu");
        assert_eq!(engine.phase(), Phase::Narrating);
        assert_eq!(engine.stats(), Stats::default());
    }

    #[test]
    fn missing_start_branch() {
        let story = Story::default();
        assert_eq!(
            NarrativeEngine::new(&story).unwrap_err(),
            EngineError::DanglingBranch("Menu".into())
        );
    }

    #[test]
    fn advance_walks_lines_then_choices() {
        let story = story_with("A", StatDeltas::default());
        let mut engine = NarrativeEngine::new(&story).unwrap();

        assert_eq!(
            engine.advance_line().unwrap(),
            Advance::Line(RenderedLine {
                text: " The window opens.".into(),
                color: Rgba::WHITE,
            })
        );
        match engine.advance_line().unwrap() {
            Advance::Line(line) => assert_eq!(line.text, "Coach Find me a winger."),
            other => panic!("expected a line, got {other:?}"),
        }
        assert_eq!(engine.phase(), Phase::AwaitingChoice);
        assert_eq!(engine.advance_line().unwrap(), Advance::Choices(vec!["Go".into()]));
        assert!(engine.state().awaiting_choice);
        assert_eq!(engine.advance_line().unwrap(), Advance::Waiting);
    }

    #[test]
    fn terminal_branch_idles() {
        let story = story_with("A", StatDeltas::default());
        let mut engine =
            NarrativeEngine::with_rules(&story, Rules::default().with_start("End4"), Stats::default())
                .unwrap();
        assert_eq!(engine.phase(), Phase::Terminal);
        assert!(engine.is_finished());
        assert_eq!(engine.advance_line().unwrap(), Advance::Ended);
        assert_eq!(engine.resolve(0).unwrap_err(), EngineError::NotAwaitingChoice);
    }

    #[test]
    fn resolve_requires_choices_revealed() {
        let story = story_with("A", StatDeltas::default());
        let mut engine = NarrativeEngine::new(&story).unwrap();
        assert_eq!(engine.resolve(0).unwrap_err(), EngineError::NotAwaitingChoice);
    }

    #[test]
    fn invalid_choice_index() {
        let story = story_with("A", StatDeltas::default());
        let mut engine = NarrativeEngine::new(&story).unwrap();
        ready(&mut engine);
        assert_eq!(
            engine.resolve(3).unwrap_err(),
            EngineError::InvalidChoice {
                index: 3,
                available: 1
            }
        );
    }

    #[test]
    fn dangling_target_leaves_state_untouched() {
        let mut story = story_with("A", StatDeltas::new(1, 1, 1, 1));
        story
            .branches
            .get_mut("Menu")
            .unwrap()
            .next_branch_names[0] = "Ghost".into();
        let mut engine = NarrativeEngine::new(&story).unwrap();
        ready(&mut engine);
        assert_eq!(
            engine.resolve(0).unwrap_err(),
            EngineError::DanglingBranch("Ghost".into())
        );
        assert_eq!(engine.stats(), Stats::default());
        assert_eq!(engine.current_name(), "Menu");
    }

    #[test]
    fn bad_character_index_is_reported() {
        let mut story = story_with("A", StatDeltas::default());
        story.branches.insert(
            "Menu".into(),
            Branch::default().with_line(9, "Who?").with_option("Go", "A"),
        );
        let mut engine = NarrativeEngine::new(&story).unwrap();
        assert_eq!(
            engine.advance_line().unwrap_err(),
            EngineError::CharacterIndexOutOfRange { index: 9, len: 2 }
        );
        assert!(engine.prompt_lines().is_err());
    }

    #[test]
    fn menu_to_a_applies_deltas() {
        let story = story_with("A", StatDeltas::new(1, -2, 0, 0));
        let mut engine = NarrativeEngine::with_rules(
            &story,
            Rules::default(),
            Stats::default().with_budget(5),
        )
        .unwrap();
        ready(&mut engine);

        let res = engine.resolve(0).unwrap();
        assert_eq!(res.stats.week, 2);
        assert_eq!(res.stats.budget, 3);
        assert_eq!(res.landed, "A");
        assert_eq!(engine.current_name(), "A");
        assert_eq!(engine.state().line_cursor, 0);
        assert!(!engine.state().awaiting_choice);
        assert_eq!(engine.phase(), Phase::Narrating);
    }

    #[test]
    fn overdrawn_budget_redirects() {
        let story = story_with("Bid", StatDeltas::new(0, -10, 0, 0));
        let mut engine = NarrativeEngine::with_rules(
            &story,
            Rules::default(),
            Stats::default().with_budget(5),
        )
        .unwrap();
        ready(&mut engine);

        let res = engine.resolve(0).unwrap();
        assert!(res.budget_redirect);
        assert_eq!(res.chosen, "Bid");
        assert_eq!(res.landed, "JadonNoMoney");
        assert_eq!(res.stats.budget, 5);
        assert_eq!(engine.current_name(), "JadonNoMoney");
    }

    #[test]
    fn overdrawn_budget_from_zero_clamps() {
        let story = story_with("Bid", StatDeltas::new(0, -10, 0, 0));
        let mut engine = NarrativeEngine::new(&story).unwrap();
        ready(&mut engine);

        let res = engine.resolve(0).unwrap();
        assert_eq!(res.stats.budget, 0);
        assert_eq!(res.landed, "JadonNoMoney");
    }

    #[test]
    fn exempt_branch_may_overdraw_then_clamps() {
        let story = story_with("JadonYes", StatDeltas::new(0, -10, 0, 0));
        let mut engine = NarrativeEngine::with_rules(
            &story,
            Rules::default(),
            Stats::default().with_budget(5),
        )
        .unwrap();
        ready(&mut engine);

        let res = engine.resolve(0).unwrap();
        assert!(!res.budget_redirect);
        assert_eq!(res.landed, "JadonYes");
        assert_eq!(res.stats.budget, 0);
    }

    #[test]
    fn week_limit_forces_ending() {
        let story = story_with("A", StatDeltas::new(1, 3, 2, 1));
        let mut engine = NarrativeEngine::with_rules(
            &story,
            Rules::default(),
            Stats::default().with_week(7),
        )
        .unwrap();
        ready(&mut engine);

        let res = engine.resolve(0).unwrap();
        assert!(res.forced_ending);
        assert_eq!(res.landed, "End4");
        assert_eq!(engine.current_name(), "End4");
        // The chosen branch's remaining deltas still apply.
        assert_eq!(res.stats.week, 8);
        assert_eq!(res.stats.budget, 3);
        assert_eq!(res.stats.fan, 7);
        assert_eq!(res.stats.coach, 6);
        assert!(engine.is_finished());
    }

    #[test]
    fn coaching_counts_twice_early() {
        let story = story_with("A", StatDeltas::new(1, 0, 0, 2));
        let mut engine = NarrativeEngine::new(&story).unwrap();
        ready(&mut engine);
        assert_eq!(engine.resolve(0).unwrap().stats.coach, 9);

        let mut late = NarrativeEngine::with_rules(
            &story,
            Rules::default(),
            Stats::default().with_week(4),
        )
        .unwrap();
        ready(&mut late);
        assert_eq!(late.resolve(0).unwrap().stats.coach, 7);
    }

    #[test]
    fn fan_and_coach_clamp() {
        let story = story_with("A", StatDeltas::new(0, 0, 20, -20));
        let mut engine = NarrativeEngine::new(&story).unwrap();
        ready(&mut engine);
        let stats = engine.resolve(0).unwrap().stats;
        assert_eq!(stats.fan, 10);
        assert_eq!(stats.coach, 0);
    }

    #[test]
    fn prompt_lines_carry_colours() {
        let story = story_with("A", StatDeltas::default());
        let engine = NarrativeEngine::new(&story).unwrap();
        let lines = engine.prompt_lines().unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], (Rgba::WHITE, " The window opens.".to_string()));
        assert_eq!(lines[1].0, Rgba::new(0.0, 0.5, 1.0, 1.0));
    }

    #[test]
    fn shown_lines_match_story_rendering() {
        let story = story_with("A", StatDeltas::default());
        let mut engine = NarrativeEngine::new(&story).unwrap();
        let expected: Vec<String> = story
            .branch("Menu")
            .unwrap()
            .lines
            .iter()
            .map(|l| story.render_line(l).unwrap())
            .collect();
        let prompt: Vec<String> = engine
            .prompt_lines()
            .unwrap()
            .into_iter()
            .map(|(_, text)| text)
            .collect();
        assert_eq!(prompt, expected);
        for text in &expected {
            match engine.advance_line().unwrap() {
                Advance::Line(line) => assert_eq!(&line.text, text),
                other => panic!("expected a line, got {other:?}"),
            }
        }
    }

    #[test]
    fn status_line_format() {
        let story = story_with("A", StatDeltas::default());
        let engine = NarrativeEngine::new(&story).unwrap();
        insta::assert_snapshot!(
            engine.status_line(),
            @"Week 1/8    Remaining Budget: $0m    Fan Support: 5/10    Coach Happiness: 5/10"
        );
    }

    fn hub_story(deltas: &[StatDeltas]) -> Story {
        let mut story = Story {
            characters: vec![Character::narrator()],
            ..Story::default()
        };
        let mut hub = Branch::default().with_line(0, "Choose.");
        for (i, d) in deltas.iter().enumerate() {
            let name = format!("Deal{i}");
            hub = hub.with_option(format!("Deal {i}"), name.clone());
            story
                .branches
                .insert(name, Branch::with_deltas(*d).with_option("Back", "Menu"));
        }
        story.branches.insert("Menu".into(), hub);
        story.branches.insert("End4".into(), Branch::default());
        story
            .branches
            .insert("JadonNoMoney".into(), Branch::default().with_option("Back", "Menu"));
        story
    }

    fn delta_strategy() -> impl Strategy<Value = StatDeltas> {
        (0..3i32, -15..15i32, -12..12i32, -12..12i32)
            .prop_map(|(t, b, f, c)| StatDeltas::new(t, b, f, c))
    }

    proptest! {
        #[test]
        fn stats_stay_in_bounds(
            deltas in prop::collection::vec(delta_strategy(), 1..5),
            picks in prop::collection::vec(0..5usize, 1..30),
            budget in 0..30i32,
        ) {
            let story = hub_story(&deltas);
            let mut engine = NarrativeEngine::with_rules(
                &story,
                Rules::default(),
                Stats::default().with_budget(budget),
            ).unwrap();

            for pick in picks {
                engine.finish_narration();
                if engine.is_finished() {
                    break;
                }
                let available = engine.current_branch().option_texts.len();
                let stats = engine.resolve(pick % available).unwrap().stats;
                prop_assert!((0..=10).contains(&stats.fan));
                prop_assert!((0..=10).contains(&stats.coach));
                prop_assert!(stats.budget >= 0);
                if stats.week >= 8 {
                    prop_assert_eq!(engine.current_name(), "End4");
                }
            }
        }
    }
}
