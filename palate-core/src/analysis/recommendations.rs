//! Rule-based kitchen recommendations
//!
//! Rules are data: each has a predicate over a [`RuleContext`] and produces
//! either a warning or a recommendation. All rules are evaluated in order and
//! none can remove output. Warnings always come before recommendations.

use crate::analysis::types::{SentimentLabel, TextSignal};
use crate::config::constants::{contexts, thresholds};

/// Inputs a rule may look at
pub struct RuleContext<'a> {
    pub lower_text: String,
    pub signal: &'a TextSignal,
    pub context: &'a str,
}

impl<'a> RuleContext<'a> {
    pub fn new(text: &str, signal: &'a TextSignal, context: &'a str) -> Self {
        Self {
            lower_text: text.to_lowercase(),
            signal,
            context,
        }
    }

    fn is_user_preferences(&self) -> bool {
        self.context == contexts::USER_PREFERENCES
    }

    fn sentiment(&self) -> SentimentLabel {
        self.signal.sentiment_label
    }

    fn emotion(&self) -> &str {
        &self.signal.dominant_emotion
    }

    fn has_keyword(&self, keyword: &str) -> bool {
        self.signal.keywords.iter().any(|k| k == keyword)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advice {
    Warning(String),
    Recommendation(String),
}

#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub applies: fn(&RuleContext<'_>) -> bool,
    pub advice: fn(&RuleContext<'_>) -> Advice,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

fn warning(text: &str) -> Advice {
    Advice::Warning(text.to_string())
}

fn recommendation(text: &str) -> Advice {
    Advice::Recommendation(text.to_string())
}

const DEFAULT_RULES: &[Rule] = &[
    Rule {
        name: "user_preferences",
        applies: |ctx| ctx.is_user_preferences(),
        advice: |_| recommendation("Consider customer preferences when preparing their order"),
    },
    Rule {
        name: "generally_positive",
        applies: |ctx| ctx.is_user_preferences() && ctx.sentiment() == SentimentLabel::Positive,
        advice: |_| recommendation("Customer has generally positive feedback - maintain quality"),
    },
    Rule {
        name: "generally_negative",
        applies: |ctx| ctx.is_user_preferences() && ctx.sentiment() == SentimentLabel::Negative,
        advice: |_| warning("Customer has had negative experiences - handle with extra care"),
    },
    Rule {
        name: "very_negative",
        applies: |ctx| ctx.sentiment() == SentimentLabel::VeryNegative,
        advice: |_| warning("Customer has had very negative experiences previously"),
    },
    Rule {
        name: "very_positive",
        applies: |ctx| ctx.sentiment() == SentimentLabel::VeryPositive,
        advice: |_| {
            recommendation("Customer has been very satisfied previously - maintain high standards")
        },
    },
    Rule {
        name: "anger",
        applies: |ctx| ctx.emotion() == "anger",
        advice: |_| warning("Customer has expressed frustration in past feedback"),
    },
    Rule {
        name: "joy",
        applies: |ctx| ctx.emotion() == "joy",
        advice: |_| {
            recommendation("Customer has expressed happiness with similar items previously")
        },
    },
    Rule {
        name: "spice",
        applies: |ctx| ctx.lower_text.contains("spicy") || ctx.has_keyword("spicy"),
        advice: |_| recommendation("Customer frequently mentions spice levels - adjust as needed"),
    },
    Rule {
        name: "salt",
        applies: |ctx| ctx.lower_text.contains("salty") || ctx.has_keyword("salty"),
        advice: |_| {
            warning("Customer has complained about saltiness before - monitor salt content")
        },
    },
    Rule {
        name: "texture",
        applies: |ctx| ctx.lower_text.contains("crunch") || ctx.has_keyword("crisp"),
        advice: |_| recommendation("Customer values texture - pay attention to crispness"),
    },
    Rule {
        name: "ingredients",
        applies: |ctx| !ctx.signal.entities.ingredients.is_empty(),
        advice: |ctx| {
            Advice::Recommendation(format!(
                "Notable ingredients mentioned: {}",
                ctx.signal.entities.ingredients.join(", ")
            ))
        },
    },
    Rule {
        name: "qualities",
        applies: |ctx| !ctx.signal.entities.qualities.is_empty(),
        advice: |ctx| {
            Advice::Recommendation(format!(
                "Customer values: {}",
                ctx.signal.entities.qualities.join(", ")
            ))
        },
    },
];

const CONTINUE_CURRENT: &str = "Continue current preparation methods";
const VERIFY_QUALITY: &str = "Verify quality meets standards";

#[derive(Debug, Clone)]
pub struct RecommendationSynthesizer {
    rules: Vec<Rule>,
}

impl Default for RecommendationSynthesizer {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES.to_vec(),
        }
    }
}

impl RecommendationSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule after the built-in ones
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.name)
    }

    pub fn synthesize(&self, text: &str, signal: &TextSignal, context: &str) -> Vec<String> {
        let ctx = RuleContext::new(text, signal, context);
        let mut warnings = Vec::new();
        let mut recommendations = Vec::new();

        for rule in self.rules.iter().filter(|rule| (rule.applies)(&ctx)) {
            match (rule.advice)(&ctx) {
                Advice::Warning(text) => warnings.push(text),
                Advice::Recommendation(text) => recommendations.push(text),
            }
        }

        if recommendations.len() <= thresholds::MIN_RECOMMENDATIONS {
            let fallback = if signal.sentiment_label.is_positive() {
                CONTINUE_CURRENT
            } else {
                VERIFY_QUALITY
            };
            recommendations.push(fallback.to_string());
        }

        warnings.extend(recommendations);
        warnings
    }
}
