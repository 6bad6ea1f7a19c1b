//! Core of Transfer Saga: the story graph, its script format, and the
//! narrative engine that walks it.
//!
//! A script is parsed once into a read-only [`Story`]. A [`NarrativeEngine`]
//! borrows the story, tracks the current branch and the running [`Stats`],
//! and resolves the player's choices into the next branch.

/// Narrative engine and choice resolution.
pub mod engine;
/// Error types for parsing and traversal.
pub mod error;
/// Tunable game rules and statistics.
pub mod rules;
/// Script parser.
pub mod script;
/// Story graph data model.
pub mod story;
/// Static reference checks.
pub mod validate;

pub use engine::{Advance, NarrativeEngine, Phase, RenderedLine, Resolution, RunState};
pub use error::{EngineError, EngineResult, ScriptError, ScriptResult};
pub use rules::{Rules, Stats};
pub use script::ScriptParser;
pub use story::{Branch, Character, Line, Rgba, StatDeltas, Story};
pub use validate::StoryIssue;

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = "\
1
Jadon 1 0.5 0 1

Menu 0 0 0 0
1.Sign me.
-1
Sure
JadonYes

JadonYes 1 -3 2 1
1.Thanks boss.
";

    #[test]
    fn parsed_story_snapshot() {
        let story = Story::from_source(SCRIPT).unwrap();
        insta::assert_snapshot!(
            serde_json::to_string(&story).unwrap(),
            @r#"{"branches":{"":{"lines":[],"option_texts":[],"next_branch_names":[],"deltas":{"time":0,"budget":0,"fan":0,"coach":0}},"JadonYes":{"lines":[{"character":1,"text":"Thanks boss."}],"option_texts":[],"next_branch_names":[],"deltas":{"time":1,"budget":-3,"fan":2,"coach":1}},"Menu":{"lines":[{"character":1,"text":"Sign me."}],"option_texts":["Sure"],"next_branch_names":["JadonYes"],"deltas":{"time":0,"budget":0,"fan":0,"coach":0}}},"characters":[{"name":"","color":{"r":1.0,"g":1.0,"b":1.0,"a":1.0}},{"name":"Jadon","color":{"r":1.0,"g":0.5,"b":0.0,"a":1.0}}]}"#
        );
    }

    #[test]
    fn parse_then_play() {
        let story = Story::from_source(SCRIPT).unwrap();
        let mut engine = NarrativeEngine::new(&story).unwrap();
        assert_eq!(
            engine.advance_line().unwrap(),
            Advance::Line(RenderedLine {
                text: "Jadon Sign me.".into(),
                color: Rgba::new(1.0, 0.5, 0.0, 1.0),
            })
        );
        assert_eq!(engine.advance_line().unwrap(), Advance::Choices(vec!["Sure".into()]));

        let res = engine.resolve(0).unwrap();
        assert_eq!(res.landed, "JadonYes");
        assert_eq!(res.stats.budget, 0);
        assert_eq!(res.stats.fan, 7);
        assert_eq!(res.stats.coach, 7);
        assert!(story.validate().is_empty());
    }
}
