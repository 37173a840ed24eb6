use crate::error::Result;
use crate::services::generation_client::GenerationClient;
use std::sync::Arc;

#[derive(Clone)]
pub struct FeedbackGenerator {
    client: Arc<dyn GenerationClient>,
}

impl FeedbackGenerator {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self { client }
    }

    /// Returns the provider's prose verbatim apart from surrounding whitespace.
    pub async fn generate(
        &self,
        problem_text: &str,
        correct_answer: i64,
        user_answer: i64,
        is_correct: bool,
    ) -> Result<String> {
        let prompt = feedback_prompt(problem_text, correct_answer, user_answer, is_correct);
        let feedback = self.client.generate(&prompt).await?;
        Ok(feedback.trim().to_string())
    }
}

pub fn feedback_prompt(
    problem_text: &str,
    correct_answer: i64,
    user_answer: i64,
    is_correct: bool,
) -> String {
    let (tone, next_step) = if is_correct {
        (
            "Congratulates them and explains why their answer is correct",
            "Maybe suggests a similar problem they could try",
        )
    } else {
        (
            "Gently corrects them and helps them understand the right approach",
            "Gives a hint about how to solve it correctly without giving the answer away",
        )
    };

    format!(
        "Write personalized feedback for a Primary 5 student (age 10-11) who just answered a math problem.\n\
         Problem: {problem_text}\n\
         Correct Answer: {correct_answer}\n\
         Student's Answer: {user_answer}\n\
         Was Correct: {is_correct}\n\
         \n\
         The feedback should:\n\
         - {tone}\n\
         - Be age-appropriate, supportive and encouraging\n\
         - {next_step}\n\
         - Be concise (3 sentences at most)\n\
         \n\
         Return only the feedback as plain text, with no JSON or other formatting."
    )
}
