use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::CompletionRules;
use crate::config::EngineConfig;
use crate::error::CompletionError;
use crate::error::Result;
use crate::filter::is_unguarded_numeric_filter;
use crate::filter::retain_candidates;
use crate::item::CandidateItem;
use crate::matcher::Matcher;
use crate::matcher::TextMatcher;
use crate::model::FilterSnapshot;
use crate::model::ListUpdate;
use crate::policy::DefaultPolicy;
use crate::policy::SelectionPolicy;
use crate::recency::RecencyCache;
use crate::select::SelectionContext;
use crate::select::handle_all_filtered_out;
use crate::select::handle_deletion_trigger;
use crate::select::handle_normal_filtering;
use crate::trigger::RawTrigger;
use crate::trigger::TriggerKind;
use crate::trigger::classify;

/// Engine-wide state shared by every session: configuration, the
/// matching and selection collaborators, and the recency cache that
/// commits from any session feed.
pub struct CompletionEngine {
    config: EngineConfig,
    matcher: Arc<dyn Matcher>,
    policy: Arc<dyn SelectionPolicy>,
    recency: Arc<RecencyCache>,
}

impl CompletionEngine {
    /// Engine with the default matcher and selection policy.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_collaborators(
            config,
            Arc::new(TextMatcher::new()),
            Arc::new(DefaultPolicy::new()),
        )
    }

    /// Engine with host-supplied matching and ranking rules.
    pub fn with_collaborators(
        config: EngineConfig,
        matcher: Arc<dyn Matcher>,
        policy: Arc<dyn SelectionPolicy>,
    ) -> Self {
        Self {
            config,
            matcher,
            policy,
            recency: Arc::new(RecencyCache::new()),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Consistent view of recently committed identifiers, least recent
    /// first.
    pub fn recent_commits(&self) -> Arc<Vec<String>> {
        self.recency.snapshot()
    }

    /// Start a completion session over `candidates`.
    ///
    /// The candidate list is sorted by sort text once, here; every
    /// keystroke then works over that stable order. The trigger that
    /// opened the session is remembered separately from per-keystroke
    /// triggers because deletion sessions filter and select differently
    /// from typing sessions for their whole lifetime.
    pub fn begin_session(
        &self,
        mut candidates: Vec<CandidateItem>,
        initial_trigger: RawTrigger,
        rules: CompletionRules,
        has_suggestion_mode: bool,
    ) -> Result<CompletionSession> {
        rules.validate()?;
        let initial = classify(initial_trigger)
            .ok_or(CompletionError::UnsupportedTrigger(initial_trigger))?;
        candidates.sort_by(|a, b| a.sort_text.cmp(&b.sort_text));
        debug!(
            candidates = candidates.len(),
            kind = ?initial.kind,
            "completion session started"
        );
        Ok(CompletionSession {
            candidates,
            initial_kind: initial.kind,
            rules,
            has_suggestion_mode,
            config: self.config.clone(),
            matcher: Arc::clone(&self.matcher),
            policy: Arc::clone(&self.policy),
            recency: Arc::clone(&self.recency),
            last_sequence: None,
            dismissed: false,
        })
    }
}

impl Default for CompletionEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// One open completion list. Updates are synchronous per edit: each
/// snapshot runs the pipeline to completion before the next is accepted,
/// and a snapshot is never mutated once built. Commits may arrive from
/// other threads; the recency cache is the only shared state they touch.
pub struct CompletionSession {
    candidates: Vec<CandidateItem>,
    initial_kind: TriggerKind,
    rules: CompletionRules,
    has_suggestion_mode: bool,
    config: EngineConfig,
    matcher: Arc<dyn Matcher>,
    policy: Arc<dyn SelectionPolicy>,
    recency: Arc<RecencyCache>,
    last_sequence: Option<u64>,
    dismissed: bool,
}

impl CompletionSession {
    /// The session's sorted candidate list.
    pub fn candidates(&self) -> &[CandidateItem] {
        &self.candidates
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    /// Run the per-keystroke pipeline for one snapshot.
    ///
    /// `NoUpdate` outcomes (unsupported trigger, stale or cancelled pass)
    /// leave the previously published model in effect; they are not
    /// errors and the session keeps accepting edits.
    pub fn update(&mut self, snapshot: &FilterSnapshot, cancel: &CancellationToken) -> ListUpdate {
        if self.dismissed {
            return ListUpdate::NoUpdate;
        }
        if let Some(last) = self.last_sequence
            && snapshot.sequence < last
        {
            debug!(
                sequence = snapshot.sequence,
                last, "stale snapshot; keeping prior model"
            );
            return ListUpdate::NoUpdate;
        }

        let Some(current) = classify(snapshot.trigger) else {
            return ListUpdate::NoUpdate;
        };
        self.last_sequence = Some(snapshot.sequence);

        // A bare numeric token is a literal, not a lookup.
        if is_unguarded_numeric_filter(snapshot, &self.rules) {
            debug!("numeric filter text outside member access; dismissing");
            return ListUpdate::Dismiss;
        }

        let recent = self.recency.snapshot();
        let Some(retained) = retain_candidates(
            &self.candidates,
            snapshot,
            current.kind,
            self.initial_kind,
            current.reason,
            self.matcher.as_ref(),
            &recent,
            cancel,
        ) else {
            return ListUpdate::NoUpdate;
        };

        // Backspacing away the last typed character closes the list when
        // the domain asks for that.
        if matches!(snapshot.trigger, RawTrigger::Backspace(_))
            && self.rules.dismiss_if_last_character_deleted
            && snapshot.filter_text.is_empty()
        {
            debug!("last character deleted; dismissing");
            return ListUpdate::Dismiss;
        }

        if retained.is_empty() {
            return handle_all_filtered_out(snapshot, &self.rules);
        }

        let cx = SelectionContext {
            snapshot,
            initial_kind: self.initial_kind,
            reason: current.reason,
            matcher: self.matcher.as_ref(),
            policy: self.policy.as_ref(),
            recent: &recent,
            has_suggestion_mode: self.has_suggestion_mode,
            config: &self.config,
        };

        if self.initial_kind == TriggerKind::Deletion {
            handle_deletion_trigger(&retained, &cx)
        } else {
            handle_normal_filtering(&retained, &cx)
        }
    }

    /// Record that `id` was committed. Safe to call from any thread via a
    /// shared handle; after `on_dismiss` the call is a no-op so a dead
    /// session cannot keep touching the shared cache.
    pub fn on_commit(&self, id: &str) {
        if self.dismissed {
            return;
        }
        self.recency.record_commit(id);
    }

    /// Release the session. Later updates and commits do nothing.
    pub fn on_dismiss(&mut self) {
        self.dismissed = true;
        debug!("completion session dismissed");
    }
}
