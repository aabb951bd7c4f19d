//! Keyword-rule response classifier for the chat panel.
//!
//! Rules are evaluated in order against the lowercased input; the first rule
//! with any trigger substring present wins. Nothing matched means the
//! fallback reply. The classifier holds no state and performs no I/O.

use std::fmt;

/// Topic a rule answers for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Users,
    Revenue,
    Engagement,
    AiAccuracy,
    Trends,
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Topic::Users => "users",
            Topic::Revenue => "revenue",
            Topic::Engagement => "engagement",
            Topic::AiAccuracy => "ai_accuracy",
            Topic::Trends => "trends",
        };
        f.write_str(s)
    }
}

/// One ordered category rule.
#[derive(Debug, Clone)]
pub struct Rule {
    pub topic: Topic,
    /// Lowercase fragments; any one present activates the rule.
    pub triggers: Vec<String>,
    pub response: String,
}

impl Rule {
    pub fn new(topic: Topic, triggers: &[&str], response: impl Into<String>) -> Self {
        Self {
            topic,
            triggers: triggers.iter().map(|t| t.to_lowercase()).collect(),
            response: response.into(),
        }
    }

    /// `normalized` must already be lowercase.
    pub fn matches(&self, normalized: &str) -> bool {
        self.triggers.iter().any(|t| normalized.contains(t.as_str()))
    }
}

pub const USERS_RESPONSE: &str = "Based on the latest data, we have 2,100 total users with a 16.7% growth rate this month. The user acquisition trend shows consistent growth, particularly in the AI models category.";
pub const REVENUE_RESPONSE: &str = "Current revenue stands at $75,000 with a 10.2% increase from last month. The revenue growth is primarily driven by increased engagement in our AI processing services.";
pub const ENGAGEMENT_RESPONSE: &str = "User engagement is at an impressive 95% with a 3.2% improvement. This high engagement rate indicates strong user satisfaction with our EOS platform features.";
pub const AI_ACCURACY_RESPONSE: &str = "Our AI models are performing exceptionally well with 98.5% accuracy, up 1.8% from last period. The Evolution of Smooth Intelligence continues to improve through continuous learning.";
pub const TRENDS_RESPONSE: &str = "Current trends show positive momentum across all metrics. Based on the data patterns, we can expect continued growth in user adoption and revenue generation over the next quarter.";
pub const FALLBACK_RESPONSE: &str = "I can help you analyze various aspects of your EOS platform including user metrics, revenue trends, engagement rates, and AI model performance. What specific area would you like to explore?";

/// Ordered first-match classifier.
#[derive(Debug, Clone)]
pub struct ResponseClassifier {
    rules: Vec<Rule>,
    fallback: String,
}

impl ResponseClassifier {
    pub fn new(rules: Vec<Rule>, fallback: impl Into<String>) -> Self {
        Self {
            rules,
            fallback: fallback.into(),
        }
    }

    /// The analytics assistant's rule set.
    ///
    /// Order matters only for inputs hitting several topics: users beats
    /// revenue beats engagement beats AI beats trends.
    pub fn insights() -> Self {
        Self::new(
            vec![
                Rule::new(Topic::Users, &["user", "growth"], USERS_RESPONSE),
                Rule::new(Topic::Revenue, &["revenue", "money", "sales"], REVENUE_RESPONSE),
                Rule::new(Topic::Engagement, &["engagement", "activity"], ENGAGEMENT_RESPONSE),
                Rule::new(Topic::AiAccuracy, &["ai", "accuracy", "model"], AI_ACCURACY_RESPONSE),
                Rule::new(Topic::Trends, &["trend", "forecast", "prediction"], TRENDS_RESPONSE),
            ],
            FALLBACK_RESPONSE,
        )
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    fn first_match(&self, input: &str) -> Option<&Rule> {
        let normalized = input.to_lowercase();
        self.rules.iter().find(|r| r.matches(&normalized))
    }

    /// Topic of the winning rule, `None` when the fallback applies.
    pub fn classify_topic(&self, input: &str) -> Option<Topic> {
        self.first_match(input).map(|r| r.topic)
    }

    /// Canned reply for `input`.
    pub fn classify(&self, input: &str) -> &str {
        match self.first_match(input) {
            Some(rule) => &rule.response,
            None => &self.fallback,
        }
    }
}

impl Default for ResponseClassifier {
    fn default() -> Self {
        Self::insights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_topic_inputs() {
        let c = ResponseClassifier::insights();
        assert_eq!(c.classify("how many users?"), USERS_RESPONSE);
        assert_eq!(c.classify("show growth"), USERS_RESPONSE);
        assert_eq!(c.classify("sales this month"), REVENUE_RESPONSE);
        assert_eq!(c.classify("money"), REVENUE_RESPONSE);
        assert_eq!(c.classify("What about engagement?"), ENGAGEMENT_RESPONSE);
        assert_eq!(c.classify("recent activity"), ENGAGEMENT_RESPONSE);
        assert_eq!(c.classify("model quality"), AI_ACCURACY_RESPONSE);
        assert_eq!(c.classify("forecast please"), TRENDS_RESPONSE);
        assert_eq!(c.classify("any prediction"), TRENDS_RESPONSE);
    }

    #[test]
    fn earlier_rule_wins_on_overlap() {
        let c = ResponseClassifier::insights();
        assert_eq!(c.classify("user revenue growth"), USERS_RESPONSE);
        assert_eq!(c.classify("revenue forecast"), REVENUE_RESPONSE);
        assert_eq!(c.classify("engagement model"), ENGAGEMENT_RESPONSE);
        assert_eq!(c.classify("accuracy trend"), AI_ACCURACY_RESPONSE);
    }

    #[test]
    fn substring_match_not_word_match() {
        let c = ResponseClassifier::insights();
        // "ai" inside "explain"
        assert_eq!(c.classify_topic("explain"), Some(Topic::AiAccuracy));
        // "user" inside "superusers"
        assert_eq!(c.classify_topic("superusers"), Some(Topic::Users));
    }

    #[test]
    fn no_trigger_falls_back() {
        let c = ResponseClassifier::insights();
        assert_eq!(c.classify("hello there"), FALLBACK_RESPONSE);
        assert_eq!(c.classify_topic("hello there"), None);
        assert_eq!(c.classify(""), FALLBACK_RESPONSE);
    }

    #[test]
    fn case_insensitive() {
        let c = ResponseClassifier::insights();
        assert_eq!(c.classify("REVENUE"), c.classify("revenue"));
        assert_eq!(c.classify("Tell me about AI accuracy"), AI_ACCURACY_RESPONSE);
    }

    #[test]
    fn repeated_calls_agree() {
        let c = ResponseClassifier::insights();
        let input = "Any Trend worth noting?";
        assert_eq!(c.classify(input), c.classify(input));
        assert_eq!(c.classify(input), TRENDS_RESPONSE);
    }

    #[test]
    fn six_distinct_outputs() {
        let c = ResponseClassifier::insights();
        let mut outputs: Vec<&str> = c.rules().iter().map(|r| r.response.as_str()).collect();
        outputs.push(c.fallback());
        outputs.sort();
        outputs.dedup();
        assert_eq!(outputs.len(), 6);
    }

    #[test]
    fn custom_rules_are_lowercased() {
        let c = ResponseClassifier::new(
            vec![Rule::new(Topic::Trends, &["Outlook"], "looking ahead")],
            "nothing",
        );
        assert_eq!(c.classify("the OUTLOOK"), "looking ahead");
        assert_eq!(c.classify("weather"), "nothing");
    }
}
