//! Quiz session state
//!
//! Everything one quiz run accumulates. Only `QuizFlow` mutates it.

use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::services::SelectionSet;

/// Number of screens, for the progress indicator
pub const TOTAL_STEPS: u8 = 4;

/// Quiz screens, in forward order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Age,
    Products,
    Results,
    Cta,
}

impl Screen {
    pub fn name(self) -> &'static str {
        match self {
            Screen::Age => "age",
            Screen::Products => "products",
            Screen::Results => "results",
            Screen::Cta => "cta",
        }
    }

    /// 1-based position shown as "step n of 4"
    pub fn step(self) -> u8 {
        match self {
            Screen::Age => 1,
            Screen::Products => 2,
            Screen::Results => 3,
            Screen::Cta => 4,
        }
    }

    /// Progress label
    pub fn progress_label(self) -> String {
        format!("שלב {} מתוך {}", self.step(), TOTAL_STEPS)
    }
}

impl Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// State of one quiz session
#[derive(Debug, Clone)]
pub struct SessionState {
    age: Option<u8>,
    selected_product_ids: SelectionSet,
    current_screen: Screen,
    started_at: DateTime<Utc>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            age: None,
            selected_product_ids: SelectionSet::new(),
            current_screen: Screen::Age,
            started_at: Utc::now(),
        }
    }

    pub fn age(&self) -> Option<u8> {
        self.age
    }

    pub fn selected_product_ids(&self) -> &SelectionSet {
        &self.selected_product_ids
    }

    pub fn current_screen(&self) -> Screen {
        self.current_screen
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub(super) fn commit_age(&mut self, age: u8) {
        self.age = Some(age);
    }

    pub(super) fn replace_selection(&mut self, ids: SelectionSet) {
        self.selected_product_ids = ids;
    }

    pub(super) fn set_screen(&mut self, screen: Screen) {
        self.current_screen = screen;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let age = self
            .age
            .map(|a| a.to_string())
            .unwrap_or_else(|| "-".to_string());
        write!(
            f,
            "[session age#{} products#{} screen#{}]",
            age,
            self.selected_product_ids.len(),
            self.current_screen
        )
    }
}
