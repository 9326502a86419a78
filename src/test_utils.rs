#[cfg(test)]
pub mod fixtures {
    use chrono::{DateTime, Duration, Utc};

    use crate::models::domain::{Quiz, Section, Student};

    pub fn section(id: &str, name: &str) -> Section {
        Section {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    pub fn student(id: &str, username: &str, section_id: Option<&str>) -> Student {
        Student {
            id: id.to_string(),
            username: username.to_string(),
            section_id: section_id.map(str::to_string),
        }
    }

    /// A quiz in `section-a` that opened ten minutes before `now` and
    /// closes twenty minutes after it.
    pub fn open_quiz(id: &str, now: DateTime<Utc>) -> Quiz {
        let mut quiz = Quiz::new(
            "Algebra",
            "section-a",
            30,
            now - Duration::minutes(10),
            now + Duration::minutes(20),
            "admin-1",
        );
        quiz.id = id.to_string();
        quiz
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use chrono::Utc;

    #[test]
    fn test_open_quiz_is_open_now() {
        let now = Utc::now();
        let quiz = open_quiz("quiz-1", now);

        assert_eq!(quiz.id, "quiz-1");
        assert!(quiz.ensure_open_at(now).is_ok());
        assert_eq!(quiz.remaining_seconds(now), 20 * 60);
    }

    #[test]
    fn test_student_fixture() {
        let s = student("s1", "amy", Some("section-a"));
        assert_eq!(s.section_id.as_deref(), Some("section-a"));
    }
}
