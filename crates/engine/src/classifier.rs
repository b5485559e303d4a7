//! Keyword-based question classification.
//!
//! A small rule engine: an ordered list of (question type, phrase set)
//! pairs evaluated on normalized text. Opinion phrases are checked first
//! and exclusively, so a factual-sounding advice question ("is the expense
//! ratio good, should I buy?") can never leak into an unguarded factual
//! answer.

use crate::types::QuestionType;
use faq_store::normalize;

/// Phrases that indicate an advice/recommendation request.
///
/// Checked before any factual category; a single match classifies the whole
/// query as opinionated regardless of factual keywords also present.
const OPINION_PHRASES: &[&str] = &[
    "should i",
    "can i buy",
    "is it good",
    "is it bad",
    "recommend",
    "advice",
    "suggestion",
    "worth investing",
    "good investment",
    "bad investment",
    "good fund",
    "bad fund",
    "buy or sell",
];

/// One classification rule: a question type and the phrases that trigger it.
#[derive(Debug, Clone)]
pub struct ClassifierRule {
    pub question_type: QuestionType,
    pub phrases: &'static [&'static str],
}

/// Ordered-priority keyword classifier.
///
/// Rules are evaluated in fixed order; the first matching category wins.
/// No match yields `QuestionType::Unknown`, which the composer turns into a
/// clarification answer, never a guess.
pub struct QuestionClassifier {
    rules: Vec<ClassifierRule>,
}

impl QuestionClassifier {
    /// Build the classifier with the default category rules.
    pub fn new() -> Self {
        let rules = vec![
            ClassifierRule {
                question_type: QuestionType::ExpenseRatio,
                phrases: &["expense ratio", "expense", "fees", "charges"],
            },
            ClassifierRule {
                question_type: QuestionType::ExitLoad,
                phrases: &["exit load", "exit charge", "redemption charge"],
            },
            ClassifierRule {
                question_type: QuestionType::MinimumSip,
                phrases: &["minimum sip", "min sip", "sip amount", "minimum investment", "sip"],
            },
            ClassifierRule {
                question_type: QuestionType::LockIn,
                phrases: &["lock in", "lockin", "elss", "tax saver", "holding period"],
            },
            ClassifierRule {
                question_type: QuestionType::Riskometer,
                phrases: &["riskometer", "risk rating", "risk level", "risk meter", "risk"],
            },
            ClassifierRule {
                question_type: QuestionType::Benchmark,
                phrases: &["benchmark", "index"],
            },
            ClassifierRule {
                question_type: QuestionType::Statements,
                phrases: &[
                    "statement",
                    "statements",
                    "capital gain",
                    "capital gains",
                    "tax document",
                    "tax documents",
                    "download",
                ],
            },
            ClassifierRule {
                question_type: QuestionType::Nav,
                phrases: &["nav", "net asset value"],
            },
            ClassifierRule {
                question_type: QuestionType::FundManager,
                phrases: &["fund manager", "who manages", "manager"],
            },
            ClassifierRule {
                question_type: QuestionType::FundSize,
                phrases: &["fund size", "aum", "assets under management"],
            },
        ];

        Self { rules }
    }

    /// The ordered factual rules (after the opinion check).
    pub fn rules(&self) -> &[ClassifierRule] {
        &self.rules
    }

    /// Classify a raw query into a question type.
    pub fn classify(&self, text: &str) -> QuestionType {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return QuestionType::Unknown;
        }

        // Opinion check is exclusive: factual keywords in the same query do
        // not override it.
        if OPINION_PHRASES
            .iter()
            .any(|phrase| contains_phrase(&normalized, phrase))
        {
            return QuestionType::Opinionated;
        }

        for rule in &self.rules {
            if rule
                .phrases
                .iter()
                .any(|phrase| contains_phrase(&normalized, phrase))
            {
                return rule.question_type;
            }
        }

        QuestionType::Unknown
    }
}

impl Default for QuestionClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Whole-word phrase containment on normalized text ("nav" must not match
/// "navigate").
fn contains_phrase(normalized: &str, phrase: &str) -> bool {
    format!(" {} ", normalized).contains(&format!(" {} ", phrase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factual_categories() {
        let classifier = QuestionClassifier::new();

        assert_eq!(
            classifier.classify("Expense ratio of Axis Floater Fund"),
            QuestionType::ExpenseRatio
        );
        assert_eq!(
            classifier.classify("What is the exit load?"),
            QuestionType::ExitLoad
        );
        assert_eq!(
            classifier.classify("Minimum SIP for HDFC Large Cap Fund"),
            QuestionType::MinimumSip
        );
        assert_eq!(
            classifier.classify("ELSS lock-in period?"),
            QuestionType::LockIn
        );
        assert_eq!(
            classifier.classify("Riskometer of SBI Small Cap Fund"),
            QuestionType::Riskometer
        );
        assert_eq!(
            classifier.classify("Benchmark of Nippon India Growth Fund"),
            QuestionType::Benchmark
        );
        assert_eq!(
            classifier.classify("How to download capital gains statement?"),
            QuestionType::Statements
        );
        assert_eq!(classifier.classify("Current NAV?"), QuestionType::Nav);
        assert_eq!(
            classifier.classify("Who manages this fund?"),
            QuestionType::FundManager
        );
        assert_eq!(
            classifier.classify("What is the AUM?"),
            QuestionType::FundSize
        );
    }

    #[test]
    fn test_opinion_wins_over_factual_keywords() {
        let classifier = QuestionClassifier::new();

        // Factual keyword present, but the opinion cue must win
        assert_eq!(
            classifier.classify("Is the expense ratio good, should I buy?"),
            QuestionType::Opinionated
        );
        assert_eq!(
            classifier.classify("Should I invest in Axis Floater Fund?"),
            QuestionType::Opinionated
        );
        assert_eq!(
            classifier.classify("Can you recommend a fund with low fees?"),
            QuestionType::Opinionated
        );
    }

    #[test]
    fn test_good_fund_without_negative_cue() {
        let classifier = QuestionClassifier::new();
        assert_eq!(
            classifier.classify("Is this a good fund?"),
            QuestionType::Opinionated
        );
    }

    #[test]
    fn test_unknown() {
        let classifier = QuestionClassifier::new();
        assert_eq!(
            classifier.classify("Tell me about the weather"),
            QuestionType::Unknown
        );
        assert_eq!(classifier.classify("???"), QuestionType::Unknown);
    }

    #[test]
    fn test_whole_word_matching() {
        let classifier = QuestionClassifier::new();
        // "nav" must not fire inside another word
        assert_eq!(
            classifier.classify("How do I navigate the portfolio page"),
            QuestionType::Unknown
        );
    }

    #[test]
    fn test_case_and_punctuation_insensitive() {
        let classifier = QuestionClassifier::new();
        assert_eq!(
            classifier.classify("EXIT-LOAD of axis floater fund???"),
            QuestionType::ExitLoad
        );
    }

    #[test]
    fn test_rules_are_ordered() {
        let classifier = QuestionClassifier::new();
        let rules = classifier.rules();
        assert_eq!(rules[0].question_type, QuestionType::ExpenseRatio);
        // Every factual category is covered by exactly one rule
        assert_eq!(rules.len(), 10);
    }
}
