//! Response handling — turns the model's raw reply into a `ReviewResult`.
//!
//! Primary path: the prompt requests a structured JSON object, parsed here
//! and rendered into readable feedback text. Models occasionally ignore the
//! schema, so two fallbacks remain: a brace-substring salvage of embedded
//! JSON, and the plain-text `FEEDBACK: ... --- IMPROVED: ...` convention.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::llm_client::strip_json_fences;
use crate::review::ReviewResult;

/// Marker line separating feedback from the improved resume in plain-text replies.
const SECTION_DELIMITER: &str = "\n---\n";
const FEEDBACK_PREFIX: &str = "FEEDBACK:";
const IMPROVED_PREFIX: &str = "IMPROVED:";

/// The structured reply schema requested by the review prompt.
#[derive(Debug, Deserialize)]
struct ReviewPayload {
    summary: String,
    #[serde(default)]
    scores: Option<ReviewScores>,
    #[serde(default)]
    missing_skills: Vec<String>,
    #[serde(default)]
    clarity_issues: Vec<String>,
    /// Section name → concrete suggestions. BTreeMap keeps rendering order stable.
    #[serde(default)]
    suggestions: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    bullet_rewrites: Vec<String>,
    #[serde(default)]
    improved_resume: Option<String>,
}

/// 0-100 ratings per review dimension. Each field is optional so a reply
/// with a partial scores object still parses.
#[derive(Debug, Deserialize)]
struct ReviewScores {
    overall: Option<f64>,
    formatting: Option<f64>,
    clarity: Option<f64>,
    impact: Option<f64>,
    relevance: Option<f64>,
}

impl ReviewScores {
    fn render(&self, feedback: &mut String) {
        let labeled = [
            ("Overall", self.overall),
            ("Formatting", self.formatting),
            ("Clarity", self.clarity),
            ("Impact", self.impact),
            ("Relevance", self.relevance),
        ];
        if labeled.iter().all(|(_, v)| v.is_none()) {
            return;
        }
        feedback.push_str("\n\nScores:\n");
        for (label, value) in labeled {
            if let Some(value) = value {
                feedback.push_str(&format!("- {label}: {:.0}/100\n", value.clamp(0.0, 100.0)));
            }
        }
    }
}

impl ReviewPayload {
    fn into_result(self) -> ReviewResult {
        let mut feedback = String::new();
        feedback.push_str(self.summary.trim());

        if let Some(scores) = &self.scores {
            scores.render(&mut feedback);
        }

        push_section(&mut feedback, "Missing skills", &self.missing_skills);
        push_section(&mut feedback, "Clarity issues", &self.clarity_issues);
        for (section, tips) in &self.suggestions {
            push_section(&mut feedback, &format!("Suggestions — {section}"), tips);
        }
        push_section(&mut feedback, "Suggested bullet rewrites", &self.bullet_rewrites);

        let improved_resume_text = self
            .improved_resume
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());

        ReviewResult {
            feedback_text: feedback,
            improved_resume_text,
        }
    }
}

fn push_section(feedback: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    feedback.push_str(&format!("\n\n{title}:\n"));
    for item in items {
        feedback.push_str(&format!("- {item}\n"));
    }
}

/// Parses a raw model reply into a `ReviewResult`. Never fails: a reply that
/// matches neither the JSON schema nor the delimiter convention is returned
/// wholesale as feedback. Callers reject empty replies before this point.
pub fn parse_review_response(raw: &str) -> ReviewResult {
    let text = strip_json_fences(raw);

    if let Ok(payload) = serde_json::from_str::<ReviewPayload>(text) {
        return payload.into_result();
    }

    // The model sometimes wraps the JSON in prose; salvage the outermost object.
    if let Some(candidate) = brace_substring(text) {
        if let Ok(payload) = serde_json::from_str::<ReviewPayload>(candidate) {
            return payload.into_result();
        }
    }

    let (feedback, improved) = split_feedback_sections(text);
    ReviewResult {
        feedback_text: feedback,
        improved_resume_text: improved,
    }
}

/// Returns the substring from the first `{` to the last `}`, if both exist.
fn brace_substring(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Splits a plain-text reply on the `---` marker line into a feedback section
/// and an optional improved-resume section, stripping the conventional
/// `FEEDBACK:` / `IMPROVED:` prefixes.
pub fn split_feedback_sections(text: &str) -> (String, Option<String>) {
    let (head, tail) = match text.split_once(SECTION_DELIMITER) {
        Some((head, tail)) => (head, Some(tail)),
        None => (text, None),
    };

    let feedback = head
        .trim()
        .strip_prefix(FEEDBACK_PREFIX)
        .unwrap_or(head.trim())
        .trim()
        .to_string();

    let improved = tail.and_then(|t| {
        let t = t.trim();
        let t = t.strip_prefix(IMPROVED_PREFIX).unwrap_or(t).trim();
        (!t.is_empty()).then(|| t.to_string())
    });

    (feedback, improved)
}
