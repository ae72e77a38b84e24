//! Attention-check injection and validation.
//!
//! After every text change a check may be injected, placed by a generator
//! seeded from the text and sequence number so replay reproduces it. Gated
//! actions are validated against the pending check before they apply: the
//! first failure per kind is forced (the action is rejected until retried),
//! later failures are recorded and let through.

use rand::Rng;
use tracing::debug;

use sugg_core::random::seeded_rng;

use super::types::{AttentionCheck, CheckKind, CheckTarget, Outcome};
use super::ExperimentState;

impl ExperimentState {
    /// Whether predictions are on screen for the current text.
    pub(super) fn predictions_shown(&self) -> bool {
        self.condition.show_predictions
            && !(self.condition.hide_fullword_predictions && self.cur_word_is_empty())
    }

    pub(super) fn inject_attention_check(&mut self) {
        let mut rng = seeded_rng(&self.text, self.context_sequence_num);
        if rng.gen::<f64>() >= self.condition.attention_check_rate {
            self.attention_check = None;
            return;
        }

        let mut eligible = vec![CheckKind::Text];
        if self.predictions_shown() {
            eligible.push(CheckKind::Predictions);
        }
        if self.condition.show_synonyms {
            eligible.push(CheckKind::Synonyms);
        }
        let kind = eligible[rng.gen_range(0..eligible.len())];
        let slot = match kind {
            CheckKind::Text => 0,
            CheckKind::Predictions | CheckKind::Synonyms => {
                rng.gen_range(0..self.condition.suggestion_slots.max(1))
            }
        };

        debug!(
            kind = kind.name(),
            slot,
            seq = self.context_sequence_num,
            "injected attention check"
        );
        self.attention_check = Some(AttentionCheck { kind, slot });
    }

    /// A check only counts once the participant can see it.
    fn attention_check_visible(&self, check: AttentionCheck) -> bool {
        match check.kind.category() {
            None => true,
            Some(category) => self.visible_suggestions().has_marker(category, check.slot),
        }
    }

    /// Validate a gated action against the pending check.
    ///
    /// `Ok(outcomes)`: apply the action and report `outcomes` first.
    /// `Err(outcomes)`: the action was consumed (passed) or rejected (forced).
    pub(super) fn gate(&mut self, target: CheckTarget) -> Result<Vec<Outcome>, Vec<Outcome>> {
        let Some(check) = self.attention_check else {
            return Ok(Vec::new());
        };
        if target == CheckTarget::Keyboard && check.kind != CheckKind::Text {
            return Ok(Vec::new());
        }
        if !self.attention_check_visible(check) {
            return Ok(Vec::new());
        }

        let matched = match (check.kind, target) {
            (CheckKind::Text, CheckTarget::Text) => true,
            (kind, CheckTarget::Suggestion { category, slot }) => {
                kind.category() == Some(category) && slot == check.slot
            }
            _ => false,
        };

        let stats = &mut self.attention_check_stats[check.kind.index()];
        if matched {
            if stats.force {
                stats.force = false;
            } else {
                stats.total += 1;
                stats.passed += 1;
            }
            self.attention_check = None;
            debug!(kind = check.kind.name(), "passed attention check");
            return Err(vec![Outcome::PassedAttentionCheck]);
        }

        if stats.total == 0 && !stats.force {
            stats.force = true;
            debug!(kind = check.kind.name(), ?target, "forced attention check retry");
            return Err(vec![Outcome::FailedAttentionCheckForce]);
        }

        stats.total += 1;
        stats.force = false;
        self.attention_check = None;
        debug!(kind = check.kind.name(), ?target, "failed attention check");
        Ok(vec![Outcome::FailedAttentionCheck])
    }
}
