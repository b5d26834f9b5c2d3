//! Mapping of positional diary answers onto named fields.

use serde_json::Value;
use sleep_model::{
    FINAL_AWAKENING_TIME, FlatRecord, Question, RawAnswer, TIME_IN_BED_AFTER_FINAL_AWAKENING_MINS,
    tagged_value,
};
use tracing::debug;

use crate::flatten::encode_sequence;

/// Map a positional answer sequence to named fields.
///
/// Answers past the end of the question schema are ignored. The final
/// awakening pair yields `final_awakening_time` and
/// `time_in_bed_after_final_awakening_mins` in addition to the encoded pair
/// under `final_awakening_details`.
#[must_use]
pub fn map_answers(answers: &[Value]) -> FlatRecord {
    let mut mapped = FlatRecord::new();

    for (position, answer) in answers.iter().enumerate() {
        let Some(question) = Question::at(position) else {
            debug!(
                ignored = answers.len() - position,
                "answers beyond the question schema ignored"
            );
            break;
        };
        let field = question.field_name().to_string();

        match RawAnswer::classify(answer) {
            RawAnswer::Tagged(inner) => {
                mapped.insert(field, inner.clone());
            }
            RawAnswer::Sequence(items) => {
                if question == Question::FinalAwakeningDetails && items.len() >= 2 {
                    if let Some(time) = tagged_value(&items[0]) {
                        mapped.insert(FINAL_AWAKENING_TIME.to_string(), time.clone());
                    }
                    if let Some(minutes) = tagged_value(&items[1]) {
                        mapped.insert(
                            TIME_IN_BED_AFTER_FINAL_AWAKENING_MINS.to_string(),
                            minutes.clone(),
                        );
                    }
                }
                mapped.insert(field, Value::String(encode_sequence(answer)));
            }
            RawAnswer::Untagged(_) => {
                debug!(%question, "answer object has no tagged value, keeping it as-is");
                mapped.insert(field, answer.clone());
            }
            RawAnswer::Scalar(value) => {
                mapped.insert(field, value.clone());
            }
        }
    }

    mapped
}
