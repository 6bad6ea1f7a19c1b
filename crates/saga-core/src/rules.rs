//! Tunable rules of the transfer-window game.

/// The running statistics of a playthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Current week, starting at 1.
    pub week: i32,
    /// Remaining budget in millions, never negative after a choice.
    pub budget: i32,
    /// Fan support, kept in `[0, stat_max]`.
    pub fan: i32,
    /// Coach happiness, kept in `[0, stat_max]`.
    pub coach: i32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            week: 1,
            budget: 0,
            fan: 5,
            coach: 5,
        }
    }
}

impl Stats {
    /// Set the starting budget.
    pub fn with_budget(mut self, budget: i32) -> Self {
        self.budget = budget;
        self
    }

    /// Set the starting week.
    pub fn with_week(mut self, week: i32) -> Self {
        self.week = week;
        self
    }
}

/// Branch names and limits that drive choice resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rules {
    /// Branch entered when the engine starts.
    pub start_branch: String,
    /// Week at which the window closes.
    pub week_limit: i32,
    /// Ending forced once `week_limit` is reached.
    pub week_limit_branch: String,
    /// Coaching deltas count twice up to and including this week.
    pub coaching_bonus_until_week: i32,
    /// Upper bound for fan support and coach happiness.
    pub stat_max: i32,
    /// Target that may overdraw the budget.
    pub budget_exempt_branch: String,
    /// Where an unaffordable choice is redirected.
    pub broke_branch: String,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            start_branch: "Menu".to_string(),
            week_limit: 8,
            week_limit_branch: "End4".to_string(),
            coaching_bonus_until_week: 4,
            stat_max: 10,
            budget_exempt_branch: "JadonYes".to_string(),
            broke_branch: "JadonNoMoney".to_string(),
        }
    }
}

impl Rules {
    /// Set the start branch.
    pub fn with_start(mut self, branch: impl Into<String>) -> Self {
        self.start_branch = branch.into();
        self
    }

    /// Set the closing week and the ending it forces.
    pub fn with_week_limit(mut self, week: i32, ending: impl Into<String>) -> Self {
        self.week_limit = week;
        self.week_limit_branch = ending.into();
        self
    }

    /// Set the branch that unaffordable choices fall back to.
    pub fn with_broke_branch(mut self, branch: impl Into<String>) -> Self {
        self.broke_branch = branch.into();
        self
    }
}
