//! Deterministic, template-driven answer composition.
//!
//! Every branch yields exactly one citation:
//! - a present fact is cited with its own stored source URL
//! - a missing fact degrades to the scheme's own page
//! - refusals, clarifications and unclassifiable questions cite a fixed
//!   educational/help URL
//! The single exception is malformed input, which is flagged with
//! `success=false` and carries no citation.

use crate::types::{AnswerResult, QuestionType};
use faq_core::{AppError, AppResult};
use faq_store::SchemeRecord;
use handlebars::Handlebars;
use serde_json::json;

/// Generic educational landing page; also the citation for refusals.
pub const GENERAL_HELP_URL: &str = "https://groww.in/mutual-funds";

const EXPENSE_RATIO_HELP_URL: &str = "https://groww.in/blog/expense-ratio-in-mutual-funds";
const EXIT_LOAD_HELP_URL: &str = "https://groww.in/blog/exit-load-in-mutual-funds";
const SIP_HELP_URL: &str = "https://groww.in/blog/what-is-sip";
const ELSS_HELP_URL: &str = "https://groww.in/mutual-funds/category/best-elss-mutual-funds";
const RISKOMETER_HELP_URL: &str = "https://groww.in/blog/riskometer-in-mutual-funds";
const STATEMENTS_HELP_URL: &str = "https://groww.in/help/how-to-download-mutual-fund-statements";

/// Fixed refusal for advice requests. The scheme (if any) is ignored
/// entirely so advice is never given a scheme-specific citation.
const REFUSAL_TEXT: &str = "I can only provide factual information about mutual fund schemes, \
     not investment advice. For personalized investment recommendations, please consult a \
     certified financial advisor. I can help you with factual queries like expense ratios, \
     exit loads, minimum SIP amounts, lock-in periods, riskometer ratings, benchmarks, and \
     how to download statements.";

const UNKNOWN_TEXT: &str = "I'm not sure how to answer that. I can help with factual mutual \
     fund queries like expense ratios, exit loads, minimum SIP amounts, lock-in periods, \
     riskometer ratings, benchmarks, NAV, fund managers, fund sizes, and how to download \
     statements.";

const MALFORMED_TEXT: &str =
    "Please enter a question about a mutual fund scheme, for example: \
     \"Expense ratio of Axis Floater Fund\".";

/// Deterministic answer composer.
///
/// Templates are registered once at construction; composition itself never
/// touches the network and is safe to run before any rephrasing attempt.
pub struct AnswerComposer {
    templates: Handlebars<'static>,
}

impl AnswerComposer {
    pub fn new() -> AppResult<Self> {
        let mut templates = Handlebars::new();

        // Plain text output; scheme names may contain '&'
        templates.register_escape_fn(handlebars::no_escape);

        let definitions: &[(&str, &str)] = &[
            ("fact.expense_ratio", "The expense ratio of {{scheme}} is {{value}}."),
            ("fact.exit_load", "The exit load for {{scheme}} is: {{value}}."),
            ("fact.lock_in", "The lock-in period for {{scheme}} is: {{value}}."),
            ("fact.riskometer", "The riskometer rating for {{scheme}} is: {{value}}."),
            ("fact.benchmark", "The benchmark for {{scheme}} is: {{value}}."),
            ("fact.nav", "The NAV (Net Asset Value) of {{scheme}} is ₹{{value}}."),
            ("fact.fund_manager", "The fund manager of {{scheme}} is {{value}}."),
            ("fact.fund_size", "The fund size (AUM) of {{scheme}} is {{value}}."),
            ("fact.minimum_sip", "For {{scheme}}, {{parts}}."),
            (
                "lumpsum",
                "Minimum lumpsum investment for {{scheme}} is ₹{{value}}. \
                 SIP information is not available.",
            ),
            (
                "missing",
                "{{label}} information for {{scheme}} is not available in our records.",
            ),
            (
                "clarify",
                "I can help you with {{label}} information, but I need to know which mutual \
                 fund scheme you're asking about. Please specify the scheme name in your \
                 question.",
            ),
            (
                "statements",
                "To download capital gains statements and tax documents for {{target}}, open \
                 your account portfolio, select the fund, and look for the 'Statements' or \
                 'Tax Documents' section.",
            ),
            (
                "elss_lock_in",
                "{{scheme}} is an ELSS fund with a 3-year lock-in period as per Section 80C \
                 of the Income Tax Act.",
            ),
        ];

        for (name, template) in definitions {
            templates.register_template_string(name, template).map_err(|e| {
                AppError::Engine(format!("Failed to register template '{}': {}", name, e))
            })?;
        }

        Ok(Self { templates })
    }

    /// Compose the deterministic answer for a classified, resolved query.
    pub fn compose(
        &self,
        question_type: QuestionType,
        scheme: Option<&SchemeRecord>,
    ) -> AppResult<AnswerResult> {
        match question_type {
            QuestionType::Opinionated => Ok(AnswerResult {
                answer: REFUSAL_TEXT.to_string(),
                source_url: GENERAL_HELP_URL.to_string(),
                question_type,
                scheme_name: None,
                success: true,
            }),
            QuestionType::Unknown => Ok(AnswerResult {
                answer: UNKNOWN_TEXT.to_string(),
                source_url: GENERAL_HELP_URL.to_string(),
                question_type,
                scheme_name: None,
                success: true,
            }),
            QuestionType::Statements => self.statements_answer(scheme),
            _ => match scheme {
                Some(scheme) => self.fact_answer(question_type, scheme),
                None => self.clarification(question_type),
            },
        }
    }

    /// Fixed usage-error result for empty/non-text input. The one case with
    /// no meaningful citation, signaled distinctly via `success=false`.
    pub fn malformed() -> AnswerResult {
        AnswerResult {
            answer: MALFORMED_TEXT.to_string(),
            source_url: String::new(),
            question_type: QuestionType::Unknown,
            scheme_name: None,
            success: false,
        }
    }

    /// Answer a fact-backed question for a resolved scheme.
    fn fact_answer(
        &self,
        question_type: QuestionType,
        scheme: &SchemeRecord,
    ) -> AppResult<AnswerResult> {
        if question_type == QuestionType::MinimumSip {
            return self.minimum_sip_answer(scheme);
        }

        let Some(fact_key) = question_type.fact_key() else {
            // Non-fact types are routed before reaching here
            return self.clarification(question_type);
        };

        match scheme.fact(fact_key) {
            Some(fact) => {
                let template = format!("fact.{}", fact_key);
                let mut answer = self.render(
                    &template,
                    &json!({ "scheme": scheme.scheme_name, "value": fact.value }),
                )?;

                if question_type == QuestionType::LockIn
                    && fact.value.to_uppercase().contains("ELSS")
                {
                    answer.push_str(
                        " ELSS (Equity Linked Savings Scheme) funds have a mandatory 3-year \
                         lock-in period as per tax regulations.",
                    );
                }

                Ok(AnswerResult {
                    answer,
                    // The fact's own citation, never a substitute
                    source_url: fact.source_url.clone(),
                    question_type,
                    scheme_name: Some(scheme.scheme_name.clone()),
                    success: true,
                })
            }
            None => self.missing_fact_answer(question_type, scheme),
        }
    }

    /// Degraded answer when a scheme is resolved but the fact was never
    /// collected: still cites the scheme's own page.
    fn missing_fact_answer(
        &self,
        question_type: QuestionType,
        scheme: &SchemeRecord,
    ) -> AppResult<AnswerResult> {
        // ELSS can be inferred from the scheme name even without a stored
        // lock-in fact
        if question_type == QuestionType::LockIn && is_elss_name(&scheme.scheme_name) {
            let answer = self.render(
                "elss_lock_in",
                &json!({ "scheme": scheme.scheme_name }),
            )?;
            return Ok(AnswerResult {
                answer,
                source_url: scheme_page_url(scheme),
                question_type,
                scheme_name: Some(scheme.scheme_name.clone()),
                success: true,
            });
        }

        let answer = self.render(
            "missing",
            &json!({
                "label": capitalize(question_type.label()),
                "scheme": scheme.scheme_name,
            }),
        )?;

        Ok(AnswerResult {
            answer,
            source_url: scheme_page_url(scheme),
            question_type,
            scheme_name: Some(scheme.scheme_name.clone()),
            success: true,
        })
    }

    /// Minimum-SIP answers compose several stored keys; the citation is the
    /// first contributing fact's own source.
    fn minimum_sip_answer(&self, scheme: &SchemeRecord) -> AppResult<AnswerResult> {
        const PARTS: &[(&str, &str)] = &[
            ("minimum_sip", "Minimum SIP: ₹"),
            ("first_investment", "First investment: ₹"),
            ("subsequent_investment", "Subsequent investments: ₹"),
        ];

        let mut parts = Vec::new();
        let mut citation: Option<&str> = None;

        for (key, prefix) in PARTS {
            if let Some(fact) = scheme.fact(key) {
                parts.push(format!("{}{}", prefix, fact.value));
                if citation.is_none() {
                    citation = Some(&fact.source_url);
                }
            }
        }

        if !parts.is_empty() {
            let answer = self.render(
                "fact.minimum_sip",
                &json!({ "scheme": scheme.scheme_name, "parts": parts.join(", ") }),
            )?;
            return Ok(AnswerResult {
                answer,
                source_url: citation
                    .map(String::from)
                    .unwrap_or_else(|| scheme_page_url(scheme)),
                question_type: QuestionType::MinimumSip,
                scheme_name: Some(scheme.scheme_name.clone()),
                success: true,
            });
        }

        if let Some(lumpsum) = scheme.fact("minimum_lumpsum") {
            let answer = self.render(
                "lumpsum",
                &json!({ "scheme": scheme.scheme_name, "value": lumpsum.value }),
            )?;
            return Ok(AnswerResult {
                answer,
                source_url: lumpsum.source_url.clone(),
                question_type: QuestionType::MinimumSip,
                scheme_name: Some(scheme.scheme_name.clone()),
                success: true,
            });
        }

        self.missing_fact_answer(QuestionType::MinimumSip, scheme)
    }

    /// Statement downloads are procedural; the citation is the help page,
    /// with or without a resolved scheme.
    fn statements_answer(&self, scheme: Option<&SchemeRecord>) -> AppResult<AnswerResult> {
        let target = scheme
            .map(|s| s.scheme_name.as_str())
            .unwrap_or("your mutual fund investments");

        let answer = self.render("statements", &json!({ "target": target }))?;

        Ok(AnswerResult {
            answer,
            source_url: STATEMENTS_HELP_URL.to_string(),
            question_type: QuestionType::Statements,
            scheme_name: scheme.map(|s| s.scheme_name.clone()),
            success: true,
        })
    }

    /// Clarification request when no scheme could be resolved or inferred.
    fn clarification(&self, question_type: QuestionType) -> AppResult<AnswerResult> {
        let answer = self.render(
            "clarify",
            &json!({ "label": question_type.label() }),
        )?;

        Ok(AnswerResult {
            answer,
            source_url: category_help_url(question_type).to_string(),
            question_type,
            scheme_name: None,
            success: true,
        })
    }

    fn render(&self, name: &str, data: &serde_json::Value) -> AppResult<String> {
        self.templates
            .render(name, data)
            .map_err(|e| AppError::Engine(format!("Failed to render template '{}': {}", name, e)))
    }
}

/// Per-category educational/help URL used for clarification answers.
fn category_help_url(question_type: QuestionType) -> &'static str {
    match question_type {
        QuestionType::ExpenseRatio => EXPENSE_RATIO_HELP_URL,
        QuestionType::ExitLoad => EXIT_LOAD_HELP_URL,
        QuestionType::MinimumSip => SIP_HELP_URL,
        QuestionType::LockIn => ELSS_HELP_URL,
        QuestionType::Riskometer => RISKOMETER_HELP_URL,
        QuestionType::Statements => STATEMENTS_HELP_URL,
        _ => GENERAL_HELP_URL,
    }
}

/// The scheme's own page, falling back to the general help page if the
/// pipeline did not record one.
fn scheme_page_url(scheme: &SchemeRecord) -> String {
    if scheme.source_url.is_empty() {
        GENERAL_HELP_URL.to_string()
    } else {
        scheme.source_url.clone()
    }
}

fn is_elss_name(scheme_name: &str) -> bool {
    let lower = scheme_name.to_lowercase();
    lower.contains("elss") || lower.contains("tax saver")
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
