use crate::error::Result;
use crate::models::problem::Problem;
use crate::services::extraction::{BraceSpanExtractor, ProblemExtractor};
use crate::services::generation_client::GenerationClient;
use std::sync::Arc;

pub const PROBLEM_PROMPT: &str = r#"Generate a math word problem suitable for Primary 5 students (age 10-11). The problem should use basic arithmetic operations (addition, subtraction, multiplication, division) in an engaging real-world scenario.

Requirements:
- The problem must be solvable with whole numbers only.
- The answer must be a single whole number (no fractions or decimals).
- Use a context children can relate to (toys, food, animals, school, etc.).
- Make it challenging but not too difficult for their age.

Return the response in this exact JSON format:
{
  "problem_text": "Your math problem here...",
  "final_answer": <numeric answer>
}"#;

#[derive(Clone)]
pub struct ProblemGenerator {
    client: Arc<dyn GenerationClient>,
    extractor: Arc<dyn ProblemExtractor>,
}

impl ProblemGenerator {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self::with_extractor(client, Arc::new(BraceSpanExtractor))
    }

    pub fn with_extractor(
        client: Arc<dyn GenerationClient>,
        extractor: Arc<dyn ProblemExtractor>,
    ) -> Self {
        Self { client, extractor }
    }

    pub async fn generate(&self) -> Result<Problem> {
        let raw = self.client.generate(PROBLEM_PROMPT).await?;
        tracing::debug!(raw = %raw, "Problem generation response received");

        let problem = self.extractor.extract(&raw)?;
        tracing::info!(
            text_len = problem.problem_text.len(),
            "Problem extracted from provider response"
        );
        Ok(problem)
    }
}
