#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::{QuizPayload, QuizQuestion, Resource};

    /// One deterministic question; `index` keeps texts unique across a set.
    pub fn sample_question(index: usize) -> QuizQuestion {
        QuizQuestion {
            question: format!("Question {}?", index),
            options: vec![
                format!("Option A{}", index),
                format!("Option B{}", index),
                format!("Option C{}", index),
                format!("Option D{}", index),
            ],
            correct_answer: format!("Option B{}", index),
            explanation: format!("Explanation for question {}.", index),
        }
    }

    pub fn sample_payload(question_count: usize) -> QuizPayload {
        QuizPayload {
            questions: (0..question_count).map(sample_question).collect(),
            resources: vec![Resource {
                title: "Further reading".to_string(),
                link: "https://example.com/reading".to_string(),
                description: "A deeper dive into the topic.".to_string(),
            }],
        }
    }

    /// The payload as the JSON text a well-behaved model would emit.
    pub fn sample_payload_json(question_count: usize) -> String {
        serde_json::to_string(&sample_payload(question_count)).expect("fixture should serialize")
    }

    /// Raw model output around a questions array: optional `resources_json`
    /// replaces the resources key, `None` omits it entirely.
    pub fn raw_model_output(question_count: usize, resources_json: Option<&str>) -> String {
        let questions = serde_json::to_string(
            &(0..question_count).map(sample_question).collect::<Vec<_>>(),
        )
        .expect("fixture should serialize");

        match resources_json {
            Some(resources) => format!(
                "{{ \"questions\": {}, \"resources\": {} }}",
                questions, resources
            ),
            None => format!("{{ \"questions\": {} }}", questions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_sample_question_is_internally_consistent() {
        let question = sample_question(3);

        assert_eq!(question.options.len(), 4);
        assert!(question.options.contains(&question.correct_answer));
    }

    #[test]
    fn test_fixtures_sample_payload() {
        let payload = sample_payload(10);

        assert_eq!(payload.questions.len(), 10);
        assert_eq!(payload.resources.len(), 1);
    }

    #[test]
    fn test_fixtures_raw_model_output_omits_resources_when_none() {
        let raw = raw_model_output(2, None);

        assert!(!raw.contains("resources"));
        assert!(raw.contains("Question 1?"));
    }
}
