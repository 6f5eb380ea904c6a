//! # Skin Quiz
//!
//! Core of a four-screen quiz that tells a young user whether their skincare
//! products suit young skin.
//!
//! ## Layers
//!
//! ### ① Models
//! - `models/` - products, categories and the immutable `Catalog`
//! - `models::loaders` - reads the catalog from TOML or JSON
//!
//! ### ② Services
//! - `services/` - single-purpose capabilities, no session state
//! - `SelectionSet` - toggle-based set of product ids
//! - `filter` - catalog view by category
//! - `classify` - verdict grouping and counts
//! - `validate_age` - the age gate
//! - `AnalyticsSink` - fire-and-forget event seam
//! - `ShareLinks` - WhatsApp share/lead/community links
//!
//! ### ③ Workflow
//! - `workflow/` - the Age → Products → Results → CTA state machine
//! - `SessionState` - what one session has collected
//! - `QuizFlow` - transitions, guards and enter-state hooks
//!
//! ### ④ App
//! - `app` - terminal presenter driving one `QuizFlow`
//!
//! ## Modules

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// Re-exports
pub use app::App;
pub use config::Config;
pub use error::{AgeRejection, CatalogError, QuizError, QuizResult};
pub use models::{Catalog, Category, Product, ProductStatus, ProductType};
pub use services::{
    classify, filter, validate_age, AgeBand, AnalyticsSink, SelectionSet, SessionSummary,
    VerdictCounts, VerdictGroups,
};
pub use workflow::{AgeOutcome, QuizFlow, Screen, SessionState};
