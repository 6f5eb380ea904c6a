//! Quiz flow controller - workflow layer
//!
//! Core responsibility: move one session through the four screens
//!
//! ```text
//! Age ──submit_age / confirm_continue──▶ Products ──submit_selection──▶ Results ──continue_to_cta──▶ Cta
//!  ▲                                       │  ▲                            │
//!  └──────────────── back ─────────────────┘  └─────────── back ───────────┘
//! ```
//!
//! Every operation checks the current screen first. A refused operation
//! changes nothing. Screen-view analytics are emitted only from `enter`,
//! which runs once per transition.

use std::sync::Arc;

use serde_json::{json, Value as JsonValue};
use tracing::{debug, error, info, warn};

use crate::error::{QuizError, QuizResult};
use crate::models::{Catalog, Category, Product};
use crate::services::age_gate::TARGET_MIN;
use crate::services::{
    classify, filter, validate_age, AgeBand, AnalyticsEvent, AnalyticsSink, EventName,
    SelectionSet, SessionSummary, ValidatedAge, VerdictCounts, VerdictGroups,
};
use crate::workflow::session::{Screen, SessionState};

/// Result of `submit_age`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeOutcome {
    /// Age committed, now on Products
    Advanced { age: u8 },
    /// Age outside the target range; still on Age until `confirm_continue`
    NeedsConfirmation { age: u8, band: AgeBand },
}

/// Quiz flow controller
///
/// - Owns the session state of exactly one quiz run
/// - Shares the catalog read-only
/// - Reports to analytics, never waits on it
pub struct QuizFlow {
    catalog: Arc<Catalog>,
    analytics: Arc<dyn AnalyticsSink>,
    session: SessionState,
    pending_age: Option<ValidatedAge>,
    draft: SelectionSet,
    active_category: Category,
}

impl QuizFlow {
    /// Start a new session on the Age screen
    pub fn new(catalog: Arc<Catalog>, analytics: Arc<dyn AnalyticsSink>) -> Self {
        let mut flow = Self {
            catalog,
            analytics,
            session: SessionState::new(),
            pending_age: None,
            draft: SelectionSet::new(),
            active_category: Category::All,
        };
        info!("🚀 quiz started ({} products in catalog)", flow.catalog.len());
        flow.emit(
            EventName::QuizStarted,
            json!({ "catalogSize": flow.catalog.len() }),
        );
        flow.enter(Screen::Age);
        flow
    }

    /// Throw the session away and start over
    pub fn restart(&mut self) {
        info!("🔄 restarting {}", self.session);
        *self = QuizFlow::new(Arc::clone(&self.catalog), Arc::clone(&self.analytics));
    }

    // ========== Age screen ==========

    /// Submit raw age input
    ///
    /// # Errors
    /// - `InvalidAge` if the gate refuses the input
    /// - `AgeLocked` if a different age was already committed
    /// - `InvalidTransition` when not on the Age screen
    pub fn submit_age(&mut self, raw: &str) -> QuizResult<AgeOutcome> {
        self.expect_screen(Screen::Age, "submit_age")?;
        // any new input supersedes an earlier warned age
        self.pending_age = None;

        let validated = validate_age(raw).map_err(|rejection| {
            warn!("⚠️ age input refused: {}", rejection);
            QuizError::from(rejection)
        })?;

        if let Some(committed) = self.session.age() {
            // returning from Products: the committed age stays
            if committed != validated.age {
                warn!("⚠️ age {} refused, {} already committed", validated.age, committed);
                return Err(QuizError::AgeLocked {
                    committed,
                    attempted: validated.age,
                });
            }
            self.emit(
                EventName::AgeSubmitted,
                json!({ "age": committed, "warningType": "none", "resubmitted": true }),
            );
            self.transition(Screen::Products);
            return Ok(AgeOutcome::Advanced { age: committed });
        }

        if validated.band.needs_confirmation() {
            info!(
                "age {} is outside the target range ({:?}), waiting for confirmation",
                validated.age, validated.band
            );
            self.pending_age = Some(validated);
            self.emit(
                EventName::AgeWarningShown,
                json!({ "age": validated.age, "warningType": validated.band.warning_type() }),
            );
            return Ok(AgeOutcome::NeedsConfirmation {
                age: validated.age,
                band: validated.band,
            });
        }

        self.session.commit_age(validated.age);
        self.emit(
            EventName::AgeSubmitted,
            json!({ "age": validated.age, "warningType": "none" }),
        );
        self.transition(Screen::Products);
        Ok(AgeOutcome::Advanced { age: validated.age })
    }

    /// Continue past an age warning with the age as entered
    pub fn confirm_continue(&mut self) -> QuizResult<u8> {
        self.expect_screen(Screen::Age, "confirm_continue")?;
        let pending = self.pending_age.take().ok_or(QuizError::NothingToConfirm)?;

        self.session.commit_age(pending.age);
        self.emit(
            EventName::AgeContinuedDespiteWarning,
            json!({ "age": pending.age, "warningType": pending.band.warning_type() }),
        );
        self.transition(Screen::Products);
        Ok(pending.age)
    }

    /// Age waiting for `confirm_continue`, if any
    pub fn pending_age(&self) -> Option<ValidatedAge> {
        self.pending_age
    }

    // ========== Products screen ==========

    /// Flip one product in the working selection
    ///
    /// # Returns
    /// `true` if the product is selected afterwards
    pub fn toggle_product(&mut self, id: &str) -> QuizResult<bool> {
        self.expect_screen(Screen::Products, "toggle_product")?;
        let selected = self.draft.toggle(id);
        if !self.catalog.contains(id) {
            debug!("toggled id '{}' which is not in the catalog", id);
        }
        self.emit(
            EventName::ProductToggled,
            json!({ "productId": id, "selected": selected, "selectedCount": self.draft.len() }),
        );
        Ok(selected)
    }

    /// Change the category filter
    pub fn set_category(&mut self, category: Category) -> QuizResult<()> {
        self.expect_screen(Screen::Products, "set_category")?;
        self.active_category = category;
        let visible = self.visible_products().len();
        self.emit(
            EventName::CategoryFiltered,
            json!({ "category": self.active_category.label(), "visibleCount": visible }),
        );
        Ok(())
    }

    pub fn active_category(&self) -> &Category {
        &self.active_category
    }

    /// Catalog products under the active filter
    pub fn visible_products(&self) -> Vec<&Product> {
        filter(&self.catalog, &self.active_category)
    }

    /// Working selection on the Products screen
    pub fn draft_selection(&self) -> &SelectionSet {
        &self.draft
    }

    /// Commit a selection and move to Results
    ///
    /// Any set is accepted, including an empty one. The selection is
    /// classified before anything is committed, so bad catalog data
    /// refuses the transition instead of reaching the Results screen.
    pub fn submit_selection<I, S>(&mut self, ids: I) -> QuizResult<VerdictCounts>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expect_screen(Screen::Products, "submit_selection")?;

        let selection: SelectionSet = ids.into_iter().collect();
        if selection.is_empty() {
            warn!("⚠️ empty selection submitted, results will be empty");
        }

        let counts = {
            let resolved = self.catalog.resolve(selection.iter());
            match classify(resolved) {
                Ok(groups) => groups.counts(),
                Err(e) => {
                    error!("❌ selection refused: {}", e);
                    return Err(e);
                }
            }
        };

        self.emit(
            EventName::ProductsSubmitted,
            json!({
                "productIds": selection.sorted_ids().join(","),
                "productsCount": selection.len(),
            }),
        );
        self.session.replace_selection(selection);
        self.transition(Screen::Results);
        Ok(counts)
    }

    /// Submit the working selection
    pub fn submit_draft(&mut self) -> QuizResult<VerdictCounts> {
        let draft = self.draft.clone();
        self.submit_selection(draft.iter())
    }

    // ========== Results / CTA screens ==========

    pub fn continue_to_cta(&mut self) -> QuizResult<()> {
        self.expect_screen(Screen::Results, "continue_to_cta")?;
        self.emit(
            EventName::ResultsContinueClicked,
            json!({ "age": self.session.age(), "productsCount": self.resolved().len() }),
        );
        self.transition(Screen::Cta);
        Ok(())
    }

    /// Products → Age, Results → Products. Committed values are kept.
    pub fn back(&mut self) -> QuizResult<Screen> {
        let target = match self.session.current_screen() {
            Screen::Products => Screen::Age,
            Screen::Results => {
                self.emit(
                    EventName::ResultsBackClicked,
                    json!({ "age": self.session.age(), "productsCount": self.resolved().len() }),
                );
                Screen::Products
            }
            screen => return Err(QuizError::invalid_transition(screen, "back")),
        };
        self.transition(target);
        Ok(target)
    }

    /// Record a click on the share button
    pub fn share_clicked(&self, share_url: &str) -> QuizResult<()> {
        self.expect_screen(Screen::Cta, "share_clicked")?;
        self.emit(
            EventName::WhatsappShareClicked,
            json!({
                "age": self.session.age(),
                "productsCount": self.resolved().len(),
                "shareUrl": share_url,
            }),
        );
        Ok(())
    }

    /// Record a click on the community button
    pub fn community_clicked(&self, community_link: &str) -> QuizResult<()> {
        self.expect_screen(Screen::Cta, "community_clicked")?;
        self.emit(
            EventName::WhatsappCommunityClicked,
            json!({
                "age": self.session.age(),
                "productsCount": self.resolved().len(),
                "communityLink": community_link,
            }),
        );
        Ok(())
    }

    // ========== Reads ==========

    pub fn screen(&self) -> Screen {
        self.session.current_screen()
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Committed selection grouped by verdict
    pub fn results(&self) -> QuizResult<VerdictGroups<'_>> {
        classify(self.resolved())
    }

    /// Age, product names and counts; `None` before an age is committed
    pub fn summary(&self) -> QuizResult<Option<SessionSummary>> {
        let Some(age) = self.session.age() else {
            return Ok(None);
        };
        let resolved = self.resolved();
        let counts = classify(resolved.iter().copied())?.counts();
        Ok(Some(SessionSummary {
            age,
            product_names: resolved.iter().map(|p| p.name.clone()).collect(),
            counts,
        }))
    }

    /// Results screen reminder for users under the target range
    pub fn show_young_reminder(&self) -> bool {
        self.session.age().is_some_and(|age| age < TARGET_MIN)
    }

    // ========== Internals ==========

    fn resolved(&self) -> Vec<&Product> {
        self.catalog.resolve(self.session.selected_product_ids().iter())
    }

    fn expect_screen(&self, expected: Screen, action: &'static str) -> QuizResult<()> {
        let current = self.session.current_screen();
        if current == expected {
            Ok(())
        } else {
            warn!("⚠️ '{}' refused on the {} screen", action, current);
            Err(QuizError::invalid_transition(current, action))
        }
    }

    fn transition(&mut self, next: Screen) {
        let from = self.session.current_screen();
        self.session.set_screen(next);
        info!("✓ {} → {} {}", from, next, self.session);
        self.enter(next);
    }

    /// Enter-state hook, runs once per transition
    fn enter(&mut self, screen: Screen) {
        self.emit(
            EventName::ScreenEntered,
            json!({ "screen": screen.name(), "step": screen.step() }),
        );

        match screen {
            Screen::Age => {}
            Screen::Products => {
                self.draft = self.session.selected_product_ids().clone();
                self.active_category = Category::All;
            }
            Screen::Results => match self.results() {
                Ok(groups) => {
                    let payload = self.results_payload(&groups);
                    self.emit(EventName::ResultsScreenViewed, payload);
                }
                Err(e) => error!("❌ results unavailable: {}", e),
            },
            Screen::Cta => match self.summary() {
                Ok(Some(summary)) => {
                    let payload = self.completed_payload(&summary);
                    self.emit(EventName::QuizCompleted, payload);
                }
                Ok(None) => error!("❌ reached cta without an age"),
                Err(e) => error!("❌ summary unavailable: {}", e),
            },
        }
    }

    fn results_payload(&self, groups: &VerdictGroups<'_>) -> JsonValue {
        let resolved = self.resolved();
        let counts = groups.counts();
        json!({
            "age": self.session.age(),
            "totalProducts": resolved.len(),
            "approvedCount": counts.approved,
            "notApprovedCount": counts.not_approved,
            "limitedCount": counts.limited,
            "productIds": VerdictGroups::joined_ids(&resolved),
            "productNames": resolved.iter().map(|p| p.name.as_str()).collect::<Vec<_>>().join("|"),
            "approvedIds": VerdictGroups::joined_ids(&groups.approved),
            "notApprovedIds": VerdictGroups::joined_ids(&groups.not_approved),
            "limitedIds": VerdictGroups::joined_ids(&groups.limited),
        })
    }

    fn completed_payload(&self, summary: &SessionSummary) -> JsonValue {
        let resolved = self.resolved();
        json!({
            "age": summary.age,
            "productsCount": resolved.len(),
            "productIds": VerdictGroups::joined_ids(&resolved),
            "productNames": summary.product_names.join("|"),
            "productTypes": resolved.iter().map(|p| p.product_type.slug()).collect::<Vec<_>>().join(","),
            "approvedCount": summary.counts.approved,
            "notApprovedCount": summary.counts.not_approved,
            "limitedCount": summary.counts.limited,
        })
    }

    fn emit(&self, name: EventName, payload: JsonValue) {
        let event = AnalyticsEvent::new(name, self.session.started_at(), payload);
        self.analytics.emit(&event);
    }
}
