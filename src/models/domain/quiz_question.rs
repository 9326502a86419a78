use std::fmt;

use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};
use uuid::Uuid;

/// Every question is worth one mark; totals are derived from question counts.
pub const MARKS_PER_QUESTION: i32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizQuestion {
    pub id: String,
    pub quiz_id: String,
    pub question_text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_option: AnswerOption,
    pub marks: i32,
    #[serde(default)]
    pub position: i32, // order within the quiz as authored
}

impl QuizQuestion {
    pub fn new(
        quiz_id: &str,
        position: i32,
        question_text: &str,
        options: [&str; 4],
        correct_option: AnswerOption,
    ) -> Self {
        let [a, b, c, d] = options;
        QuizQuestion {
            id: Uuid::new_v4().to_string(),
            quiz_id: quiz_id.to_string(),
            question_text: question_text.to_string(),
            option_a: a.to_string(),
            option_b: b.to_string(),
            option_c: c.to_string(),
            option_d: d.to_string(),
            correct_option,
            marks: MARKS_PER_QUESTION,
            position,
        }
    }

    pub fn is_correct(&self, selected: AnswerOption) -> bool {
        self.correct_option == selected
    }
}

/// One of the four choices of a question.
///
/// Serialized as the integers `1..=4`, which is what clients send and compare
/// against. Deserialization also accepts the letters `a`-`d` (any case) and
/// numeric strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnswerOption {
    A,
    B,
    C,
    D,
}

impl AnswerOption {
    pub fn number(self) -> u8 {
        match self {
            AnswerOption::A => 1,
            AnswerOption::B => 2,
            AnswerOption::C => 3,
            AnswerOption::D => 4,
        }
    }

    pub fn from_number(n: i64) -> Option<Self> {
        match n {
            1 => Some(AnswerOption::A),
            2 => Some(AnswerOption::B),
            3 => Some(AnswerOption::C),
            4 => Some(AnswerOption::D),
            _ => None,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "a" | "1" => Some(AnswerOption::A),
            "b" | "2" => Some(AnswerOption::B),
            "c" | "3" => Some(AnswerOption::C),
            "d" | "4" => Some(AnswerOption::D),
            _ => None,
        }
    }
}

impl Serialize for AnswerOption {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(i32::from(self.number()))
    }
}

struct AnswerOptionVisitor;

impl<'de> Visitor<'de> for AnswerOptionVisitor {
    type Value = AnswerOption;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an option number 1-4 or letter a-d")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        AnswerOption::from_number(v)
            .ok_or_else(|| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v)
            .ok()
            .and_then(AnswerOption::from_number)
            .ok_or_else(|| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        AnswerOption::parse(v).ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

impl<'de> Deserialize<'de> for AnswerOption {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AnswerOptionVisitor)
    }
}
