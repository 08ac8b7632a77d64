//! Outcome classification
//!
//! An application's `(state, finalStatus)` pair is mapped onto exactly one
//! [`CounterBucket`] by walking [`RULES`] in order; the first matching rule
//! wins. The two-field `FINISHED` rules come before the state-only rules so a
//! finished application is never counted as a bare `failed` or `killed`.

use yarnstats_api::CounterBucket;

/// What a rule requires of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleMatch {
    /// Both state and final status must match
    StateAndFinalStatus(&'static str, &'static str),
    /// Only the state must match
    State(&'static str),
    /// Always matches
    Any,
}

impl RuleMatch {
    /// How many of {state, finalStatus} the rule constrains
    pub fn arity(&self) -> usize {
        match self {
            RuleMatch::StateAndFinalStatus(..) => 2,
            RuleMatch::State(_) => 1,
            RuleMatch::Any => 0,
        }
    }

    pub fn matches(&self, state: &str, final_status: &str) -> bool {
        match *self {
            RuleMatch::StateAndFinalStatus(s, f) => state == s && final_status == f,
            RuleMatch::State(s) => state == s,
            RuleMatch::Any => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub bucket: CounterBucket,
    pub when: RuleMatch,
}

/// The rule table, in priority order. The last rule always matches.
pub const RULES: [Rule; 7] = [
    Rule {
        bucket: CounterBucket::FinishedSucceeded,
        when: RuleMatch::StateAndFinalStatus("FINISHED", "SUCCEEDED"),
    },
    Rule {
        bucket: CounterBucket::FinishedFailed,
        when: RuleMatch::StateAndFinalStatus("FINISHED", "FAILED"),
    },
    Rule {
        bucket: CounterBucket::FinishedKilled,
        when: RuleMatch::StateAndFinalStatus("FINISHED", "KILLED"),
    },
    Rule {
        bucket: CounterBucket::FinishedUndefined,
        when: RuleMatch::StateAndFinalStatus("FINISHED", "UNDEFINED"),
    },
    Rule {
        bucket: CounterBucket::Failed,
        when: RuleMatch::State("FAILED"),
    },
    Rule {
        bucket: CounterBucket::Killed,
        when: RuleMatch::State("KILLED"),
    },
    Rule {
        bucket: CounterBucket::Other,
        when: RuleMatch::Any,
    },
];

/// Pick the counter bucket for an application outcome
pub fn classify(state: &str, final_status: &str) -> CounterBucket {
    RULES
        .iter()
        .find(|rule| rule.when.matches(state, final_status))
        .map(|rule| rule.bucket)
        .unwrap_or(CounterBucket::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATES: [&str; 9] = [
        "NEW", "NEW_SAVING", "SUBMITTED", "ACCEPTED", "RUNNING", "FINISHED", "FAILED",
        "KILLED", "",
    ];
    const FINAL_STATUSES: [&str; 5] = ["UNDEFINED", "SUCCEEDED", "FAILED", "KILLED", ""];

    #[test]
    fn test_finished_rules() {
        assert_eq!(classify("FINISHED", "SUCCEEDED"), CounterBucket::FinishedSucceeded);
        assert_eq!(classify("FINISHED", "FAILED"), CounterBucket::FinishedFailed);
        assert_eq!(classify("FINISHED", "KILLED"), CounterBucket::FinishedKilled);
        assert_eq!(classify("FINISHED", "UNDEFINED"), CounterBucket::FinishedUndefined);
    }

    #[test]
    fn test_state_only_rules() {
        for status in FINAL_STATUSES {
            assert_eq!(classify("FAILED", status), CounterBucket::Failed);
            assert_eq!(classify("KILLED", status), CounterBucket::Killed);
        }
    }

    #[test]
    fn test_fallthrough_to_other() {
        assert_eq!(classify("RUNNING", ""), CounterBucket::Other);
        assert_eq!(classify("FINISHED", ""), CounterBucket::Other);
        assert_eq!(classify("finished", "SUCCEEDED"), CounterBucket::Other);
    }

    #[test]
    fn test_total_and_deterministic() {
        for state in STATES {
            for status in FINAL_STATUSES {
                let first = classify(state, status);
                assert!(CounterBucket::ALL.contains(&first));
                assert_eq!(classify(state, status), first);
            }
        }
    }

    #[test]
    fn test_table_order() {
        let arities: Vec<usize> = RULES.iter().map(|r| r.when.arity()).collect();
        assert_eq!(arities, vec![2, 2, 2, 2, 1, 1, 0]);

        let buckets: Vec<CounterBucket> = RULES.iter().map(|r| r.bucket).collect();
        assert_eq!(buckets, CounterBucket::ALL.to_vec());
    }
}
