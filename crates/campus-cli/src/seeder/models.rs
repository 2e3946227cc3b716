//! Seed records and the knobs that size a seeding run.

/// Courses created by the seeder carry this description so they can be
/// cleared again without touching real data.
pub const SEED_COURSE_DESCRIPTION: &str = "Generated by campus-cli seed";
pub const SEED_TEACHER_ROLE: &str = "Seeded Faculty";
pub const SEED_EMAIL_DOMAIN: &str = "example.com";
pub const SEED_PASSWORD: &str = "password123";

pub struct CourseSeed {
    pub name: String,
    pub abbr: String,
    pub duration: i64,
}

pub struct SubjectSeed {
    pub semester_id: i64,
    pub subject_type_id: i64,
    pub name: String,
    pub abbr: String,
    pub code: String,
    pub credits: i64,
}

pub struct PersonSeed {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: &'static str,
}

/// A seeded division together with the cohort it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DivisionSlot {
    pub course_id: i64,
    pub batch_id: i64,
    pub division_id: i64,
}

#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub courses: usize,
    pub semesters_per_course: usize,
    pub subjects_per_semester: usize,
    pub batches_per_course: usize,
    pub divisions_per_batch: usize,
    pub teachers: usize,
    pub students_per_division: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            courses: 3,
            semesters_per_course: 6,
            subjects_per_semester: 4,
            batches_per_course: 2,
            divisions_per_batch: 2,
            teachers: 10,
            students_per_division: 30,
        }
    }
}

impl SeedConfig {
    pub fn new(courses: usize) -> Self {
        Self {
            courses,
            ..Default::default()
        }
    }

    pub fn with_batches_per_course(mut self, batches: usize) -> Self {
        self.batches_per_course = batches;
        self
    }

    pub fn with_teachers(mut self, teachers: usize) -> Self {
        self.teachers = teachers;
        self
    }

    pub fn with_students_per_division(mut self, students: usize) -> Self {
        self.students_per_division = students;
        self
    }

    pub fn total_divisions(&self) -> usize {
        self.courses * self.batches_per_course * self.divisions_per_batch
    }

    pub fn total_students(&self) -> usize {
        self.total_divisions() * self.students_per_division
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals() {
        let config = SeedConfig::new(2)
            .with_batches_per_course(3)
            .with_students_per_division(10);
        assert_eq!(config.total_divisions(), 2 * 3 * 2);
        assert_eq!(config.total_students(), 120);
    }
}
