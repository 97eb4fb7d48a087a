//! Fixed narrative templates for strengths and improvements
//!
//! Stage D of the scoring engine assembles its narrative from these tables:
//! per-category observation text, per-category improvement suggestions, and
//! the generic backfill entries used when fewer dimensions qualify than the
//! output shape requires.

use medvoice_core::{Improvement, ScoreDimension, Strength};
use serde::{Deserialize, Serialize};

/// Per-category improvement template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImprovementTemplate {
    pub category: String,
    pub observation: String,
    pub suggestion: String,
    pub example: String,
}

/// Pairs a missed-opportunity description with a worked example. Matched by
/// substring so analysis wording can evolve without breaking the pairing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpportunityExample {
    pub contains: String,
    pub example: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackTemplates {
    /// Strength observation per dimension label.
    pub strength_observations: Vec<(String, String)>,
    /// Generic strengths used to backfill to three entries.
    pub generic_strengths: Vec<Strength>,
    /// Improvement template per dimension label.
    pub improvement_templates: Vec<ImprovementTemplate>,
    /// Examples paired with missed opportunities.
    pub opportunity_examples: Vec<OpportunityExample>,
    /// Example used when no opportunity pairing matches.
    pub default_opportunity_example: String,
    /// Generic improvements used as the last backfill resort.
    pub generic_improvements: Vec<ImprovementTemplate>,
}

impl FeedbackTemplates {
    pub fn strength_observation(&self, dimension: ScoreDimension) -> &str {
        let label = dimension.label();
        self.strength_observations
            .iter()
            .find(|(category, _)| category == label)
            .map(|(_, text)| text.as_str())
            .unwrap_or("Consistently strong performance in this area.")
    }

    pub fn improvement_for(&self, dimension: ScoreDimension) -> Option<&ImprovementTemplate> {
        let label = dimension.label();
        self.improvement_templates
            .iter()
            .find(|t| t.category == label)
    }

    pub fn example_for_opportunity(&self, opportunity: &str) -> &str {
        self.opportunity_examples
            .iter()
            .find(|pair| opportunity.contains(pair.contains.as_str()))
            .map(|pair| pair.example.as_str())
            .unwrap_or(self.default_opportunity_example.as_str())
    }

    pub fn improvement_from_opportunity(&self, opportunity: &str) -> Improvement {
        Improvement {
            category: "Missed Opportunity".to_string(),
            observation: opportunity.to_string(),
            suggestion: "Look for this opening in your next practice session.".to_string(),
            example: self.example_for_opportunity(opportunity).to_string(),
        }
    }
}

impl Default for FeedbackTemplates {
    fn default() -> Self {
        let observation = |category: &str, text: &str| (category.to_string(), text.to_string());
        let template = |category: &str, observation: &str, suggestion: &str, example: &str| {
            ImprovementTemplate {
                category: category.to_string(),
                observation: observation.to_string(),
                suggestion: suggestion.to_string(),
                example: example.to_string(),
            }
        };

        Self {
            strength_observations: vec![
                observation(
                    "Clinical Communication",
                    "You structured the consultation clearly and covered the key stages.",
                ),
                observation(
                    "Empathy",
                    "You acknowledged the patient's feelings and responded warmly.",
                ),
                observation(
                    "Grammar",
                    "Your sentences were accurate and well formed throughout.",
                ),
                observation(
                    "Patient Education",
                    "You gave clear instructions and checked the patient's understanding.",
                ),
                observation(
                    "Pronunciation",
                    "Your delivery was fluent, with well-paced, connected sentences.",
                ),
                observation(
                    "Vocabulary",
                    "You chose precise medical terms and explained them appropriately.",
                ),
            ],
            generic_strengths: vec![
                Strength {
                    category: "Engagement".to_string(),
                    observation: "You stayed engaged with the patient throughout the conversation."
                        .to_string(),
                    examples: Vec::new(),
                },
                Strength {
                    category: "Professionalism".to_string(),
                    observation: "You maintained a professional and respectful manner."
                        .to_string(),
                    examples: Vec::new(),
                },
                Strength {
                    category: "Persistence".to_string(),
                    observation: "You kept the conversation moving toward the patient's needs."
                        .to_string(),
                    examples: Vec::new(),
                },
            ],
            improvement_templates: vec![
                template(
                    "Clinical Communication",
                    "Parts of the consultation structure were missing or out of order.",
                    "Follow a consistent structure: greeting, presenting complaint, history, explanation, plan, closing.",
                    "\"Before we finish, let me summarise the plan we agreed on.\"",
                ),
                template(
                    "Empathy",
                    "The patient's emotions were not always acknowledged.",
                    "Name the emotion you observe before moving to clinical content.",
                    "\"I can see this has been worrying you. That's completely understandable.\"",
                ),
                template(
                    "Grammar",
                    "Several grammatical slips made sentences harder to follow.",
                    "Practise subject-verb agreement and past-tense forms in clinical phrases.",
                    "\"She doesn't have any allergies\" rather than \"she don't have allergies\".",
                ),
                template(
                    "Patient Education",
                    "Instructions were given without confirming the patient understood.",
                    "After each instruction, ask the patient to repeat the key point back.",
                    "\"Just so I know I explained it well, could you tell me how you'll take this?\"",
                ),
                template(
                    "Pronunciation",
                    "Frequent hesitations interrupted the flow of your speech.",
                    "Slow down slightly and use connectors to link your ideas.",
                    "\"Firstly, we'll check your blood pressure. Then we'll review your medication.\"",
                ),
                template(
                    "Vocabulary",
                    "Some terminology was either too technical or imprecise for the patient.",
                    "Pair each medical term with a plain-language explanation.",
                    "\"You have hypertension, which means your blood pressure is higher than it should be.\"",
                ),
            ],
            opportunity_examples: vec![
                OpportunityExample {
                    contains: "acknowledge".to_string(),
                    example: "\"I can hear how concerned you are. Let's take this one step at a time.\""
                        .to_string(),
                },
                OpportunityExample {
                    contains: "understanding".to_string(),
                    example: "\"Does that make sense so far? What questions do you have?\""
                        .to_string(),
                },
                OpportunityExample {
                    contains: "open-ended".to_string(),
                    example: "\"Tell me more about how the symptoms affect your day.\"".to_string(),
                },
                OpportunityExample {
                    contains: "medication".to_string(),
                    example: "\"Can we go through the medicines you're taking at the moment?\""
                        .to_string(),
                },
            ],
            default_opportunity_example:
                "\"Is there anything else on your mind that we haven't covered?\"".to_string(),
            generic_improvements: vec![
                template(
                    "Active Listening",
                    "Responses did not always build on what the patient had just said.",
                    "Reflect the patient's own words back before asking the next question.",
                    "\"You mentioned the pain is worse at night — tell me more about that.\"",
                ),
                template(
                    "Questioning Technique",
                    "The conversation relied on a narrow range of question types.",
                    "Mix open questions with focused follow-ups to explore symptoms fully.",
                    "\"What does the pain feel like?\" followed by \"Does it spread anywhere?\"",
                ),
                template(
                    "Consultation Pacing",
                    "Some topics were rushed while others received little time.",
                    "Allocate time to each consultation stage and signpost transitions.",
                    "\"Now that we've talked about your symptoms, let's discuss what we can do.\"",
                ),
            ],
        }
    }
}
