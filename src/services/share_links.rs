//! Outbound link builder - service layer
//!
//! Builds WhatsApp links for sharing the quiz, for sending a lead with the
//! session summary, and for joining the community group. Pure string work.

use regex::Regex;
use url::Url;

use crate::config::Config;
use crate::services::classifier::SessionSummary;

const WHATSAPP_BASE: &str = "https://wa.me/";

/// Link builder bound to the configured phone and community link
#[derive(Debug, Clone)]
pub struct ShareLinks {
    quiz_url: String,
    lead_phone: String,
    community_link: String,
}

impl ShareLinks {
    pub fn new(config: &Config) -> Self {
        Self {
            quiz_url: config.quiz_url.clone(),
            lead_phone: config.lead_phone.clone(),
            community_link: config.community_link.clone(),
        }
    }

    /// Default quiz URL, used when the presenter does not know the current page
    pub fn quiz_url(&self) -> &str {
        &self.quiz_url
    }

    pub fn community_link(&self) -> &str {
        &self.community_link
    }

    /// Invite a friend to take the quiz at `quiz_url`
    pub fn share_link(&self, quiz_url: &str) -> Result<Url, url::ParseError> {
        let text = format!(
            "היי! גיליתי מבחן מגניב לבדוק אם מוצרי הסקינקייר שלך מתאימים לעור צעיר. נסי גם!\n{}",
            quiz_url
        );
        Url::parse_with_params(WHATSAPP_BASE, &[("text", text)])
    }

    /// Message to the skincare adviser with the session summary
    pub fn lead_link(&self, summary: &SessionSummary) -> Result<Url, url::ParseError> {
        let message = format!(
            "היי! עשיתי את מבחן הסקינקייר ורוצה לקבל את השגרה שלי.\n\n\
             גיל: {}\n\
             מוצרים שבדקתי: {}\n\n\
             תוצאות:\n\
             - מתאימים: {}\n\
             - לא מתאימים: {}\n\
             - מוגבלים: {}",
            summary.age,
            summary.product_names.join(", "),
            summary.counts.approved,
            summary.counts.not_approved,
            summary.counts.limited,
        );
        let base = format!("{}{}", WHATSAPP_BASE, self.lead_phone);
        Url::parse_with_params(&base, &[("text", message)])
    }
}

/// Israeli mobile number check: digits only after stripping, `05` + 8 digits
pub fn validate_israeli_phone(raw: &str) -> Result<bool, regex::Error> {
    let non_digit = Regex::new(r"\D")?;
    let mobile = Regex::new(r"^05\d{8}$")?;
    let cleaned = non_digit.replace_all(raw, "");
    Ok(mobile.is_match(&cleaned))
}
