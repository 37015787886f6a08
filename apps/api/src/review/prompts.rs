//! All LLM prompt constants and the prompt builder for the review pipeline.

/// Longest resume accepted into a prompt. Anything beyond this is truncated
/// so the request stays inside the model's context window.
pub const MAX_RESUME_CHARS: usize = 35_000;

/// Substituted for the job target when the user leaves the role blank.
pub const GENERIC_ROLE: &str = "a general professional role";

/// System prompt establishing the reviewer persona — enforces JSON-only output.
pub const REVIEW_SYSTEM: &str = "You are an expert career coach and resume writer \
    reviewing a resume against a target role. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Review prompt template.
/// Replace: {target_role}, {job_description_section}, {resume_text}
const REVIEW_PROMPT_TEMPLATE: &str = r#"Analyze the resume below against the target role and produce structured review feedback.

TARGET ROLE: {target_role}
{job_description_section}
RESUME (delimited by triple backticks, quote it verbatim when citing lines):
```
{resume_text}
```

Return a JSON object with this EXACT schema (no extra fields):
{
  "summary": "1-3 sentence assessment of fit for the role",
  "scores": {"overall": 0, "formatting": 0, "clarity": 0, "impact": 0, "relevance": 0},
  "missing_skills": ["skills or keywords expected for the role but absent from the resume"],
  "clarity_issues": ["vague, redundant, or unclear items and how to fix them"],
  "suggestions": {"Experience": ["concrete suggestions for this section"], "Skills": [], "Education": [], "Summary": []},
  "bullet_rewrites": ["up to 6 suggested bullet points rewritten to better match the role"],
  "improved_resume": "a plain-text version of the resume with the edits applied, or null"
}

Rules:
- Every rubric field (summary, scores, missing_skills, clarity_issues, suggestions, bullet_rewrites) must be present, even when empty.
- Each score is an integer 0-100; omit "suggestions" keys for sections the resume does not have.
- Base every observation on the resume text — do not invent experience the candidate does not claim.
- Keep lists short and concrete; use realistic quantification placeholders like <X%> where data is missing.
- "improved_resume" keeps the resume's structure but improves wording for ATS readability."#;

/// Builds the single instruction string sent to the model.
///
/// Pure function of its inputs, deterministic, no side effects. Assembles, in
/// fixed order: role-setting instruction, job target (with optional job
/// description), the resume text verbatim, and the review rubric.
///
/// Callers reject empty resumes before reaching this function; an empty
/// `target_role` falls back to [`GENERIC_ROLE`].
pub fn build_prompt(resume_text: &str, target_role: &str, job_description: &str) -> String {
    let role = if target_role.trim().is_empty() {
        GENERIC_ROLE
    } else {
        target_role.trim()
    };

    let jd_section = if job_description.trim().is_empty() {
        String::new()
    } else {
        format!("\nJOB DESCRIPTION:\n{}\n", job_description.trim())
    };

    let resume = if resume_text.len() > MAX_RESUME_CHARS {
        // Truncate on a char boundary; mid-word is acceptable at this size.
        let mut end = MAX_RESUME_CHARS;
        while !resume_text.is_char_boundary(end) {
            end -= 1;
        }
        &resume_text[..end]
    } else {
        resume_text
    };

    REVIEW_PROMPT_TEMPLATE
        .replace("{target_role}", role)
        .replace("{job_description_section}", &jd_section)
        .replace("{resume_text}", resume)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "5 years Python backend experience";

    #[test]
    fn test_prompt_contains_resume_verbatim() {
        let prompt = build_prompt(RESUME, "Senior Backend Engineer", "");
        assert!(prompt.contains(RESUME));
    }

    #[test]
    fn test_prompt_contains_target_role() {
        let prompt = build_prompt(RESUME, "Senior Backend Engineer", "");
        assert!(prompt.contains("Senior Backend Engineer"));
    }

    #[test]
    fn test_prompt_contains_rubric_categories() {
        let prompt = build_prompt(RESUME, "Data Scientist", "");
        assert!(prompt.contains("missing_skills"));
        assert!(prompt.contains("clarity_issues"));
        assert!(prompt.contains("bullet_rewrites"));
    }

    #[test]
    fn test_prompt_requests_scores_and_section_suggestions() {
        let prompt = build_prompt(RESUME, "Data Scientist", "");
        for field in ["overall", "formatting", "clarity", "impact", "relevance"] {
            assert!(prompt.contains(field), "score field '{field}' missing");
        }
        assert!(prompt.contains("\"suggestions\""));
    }

    #[test]
    fn test_empty_role_substitutes_generic_phrase() {
        let prompt = build_prompt(RESUME, "", "");
        assert!(prompt.contains(GENERIC_ROLE));
    }

    #[test]
    fn test_whitespace_role_substitutes_generic_phrase() {
        let prompt = build_prompt(RESUME, "   ", "");
        assert!(prompt.contains(GENERIC_ROLE));
    }

    #[test]
    fn test_job_description_included_when_present() {
        let prompt = build_prompt(RESUME, "SRE", "On-call rotation, Kubernetes fleet");
        assert!(prompt.contains("JOB DESCRIPTION:"));
        assert!(prompt.contains("On-call rotation, Kubernetes fleet"));
    }

    #[test]
    fn test_job_description_section_absent_when_empty() {
        let prompt = build_prompt(RESUME, "SRE", "");
        assert!(!prompt.contains("JOB DESCRIPTION:"));
    }

    #[test]
    fn test_deterministic() {
        let a = build_prompt(RESUME, "SRE", "k8s");
        let b = build_prompt(RESUME, "SRE", "k8s");
        assert_eq!(a, b);
    }

    #[test]
    fn test_oversized_resume_is_truncated() {
        let big = "x".repeat(MAX_RESUME_CHARS + 1000);
        let prompt = build_prompt(&big, "SRE", "");
        assert!(prompt.len() < big.len() + 2000);
        assert!(prompt.contains(&"x".repeat(100)));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // Multi-byte chars straddling the cut must not panic.
        let big = "é".repeat(MAX_RESUME_CHARS);
        let prompt = build_prompt(&big, "SRE", "");
        assert!(!prompt.is_empty());
    }
}
