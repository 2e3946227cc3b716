//! Courses, semesters, subjects, batches and divisions.

use std::collections::HashMap;
use std::time::Instant;

use chrono::{Datelike, Utc};
use fake::Fake;
use fake::faker::job::en::Field;
use fake::faker::lorem::en::Word;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};

use super::models::{CourseSeed, DivisionSlot, SEED_COURSE_DESCRIPTION, SeedConfig, SubjectSeed};
use crate::admin::CliResult;

const DIVISION_NAMES: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

pub fn generate_courses(count: usize) -> Vec<CourseSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let field: String = Field().fake();
            let initials: String = field
                .split_whitespace()
                .filter_map(|word| word.chars().next())
                .collect();

            CourseSeed {
                name: format!("Bachelor of {field}"),
                abbr: format!("B{}{}", initials.to_uppercase(), idx + 1),
                duration: 3,
            }
        })
        .collect()
}

fn generate_subjects(
    semester_ids: &[i64],
    per_semester: usize,
    subject_type_ids: &[i64],
) -> Vec<SubjectSeed> {
    semester_ids
        .par_iter()
        .flat_map(|&semester_id| {
            (0..per_semester)
                .map(|idx| {
                    let word: String = Word().fake();
                    let name = format!("{} {}", capitalize(&word), idx + 1);
                    SubjectSeed {
                        semester_id,
                        subject_type_id: subject_type_ids[idx % subject_type_ids.len()],
                        abbr: name.chars().take(4).collect::<String>().to_uppercase(),
                        code: format!("S{semester_id}-{:02}", idx + 1),
                        credits: if idx % 2 == 0 { 4 } else { 2 },
                        name,
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Seeds the whole curriculum and cohort tree in one transaction and returns
/// every division created.
pub async fn seed_curriculum(db: &PgPool, config: &SeedConfig) -> CliResult<Vec<DivisionSlot>> {
    let start_time = Instant::now();
    println!(
        "📚 Seeding {} courses ({} semesters, {} subjects each)...",
        config.courses, config.semesters_per_course, config.subjects_per_semester
    );

    let mut tx = db.begin().await?;

    let courses = generate_courses(config.courses);
    let course_ids = insert_courses(&mut tx, &courses).await?;

    let semester_ids = insert_semesters(&mut tx, &course_ids, config.semesters_per_course).await?;

    let subject_type_ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM subject_types ORDER BY id")
        .fetch_all(&mut *tx)
        .await?;
    if subject_type_ids.is_empty() {
        return Err("No subject types found. Run the migrations first.".into());
    }
    let subjects = generate_subjects(&semester_ids, config.subjects_per_semester, &subject_type_ids);
    insert_subjects(&mut tx, &subjects).await?;

    let batches = insert_batches(&mut tx, &course_ids, config.batches_per_course).await?;
    let slots = insert_divisions(&mut tx, &batches, config.divisions_per_batch).await?;

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} courses, {} semesters, {} subjects, {} batches and {} divisions in {:?}",
        course_ids.len(),
        semester_ids.len(),
        subjects.len(),
        batches.len(),
        slots.len(),
        start_time.elapsed()
    );

    Ok(slots)
}

async fn insert_courses(
    tx: &mut Transaction<'_, Postgres>,
    courses: &[CourseSeed],
) -> CliResult<Vec<i64>> {
    if courses.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = QueryBuilder::<Postgres>::new(
        "INSERT INTO courses (name, abbr, duration, description) ",
    );
    query.push_values(courses, |mut row, course| {
        row.push_bind(&course.name)
            .push_bind(&course.abbr)
            .push_bind(course.duration)
            .push_bind(SEED_COURSE_DESCRIPTION);
    });
    query.push(" RETURNING id");

    let ids: Vec<i64> = query.build_query_scalar().fetch_all(&mut **tx).await?;
    Ok(ids)
}

async fn insert_semesters(
    tx: &mut Transaction<'_, Postgres>,
    course_ids: &[i64],
    per_course: usize,
) -> CliResult<Vec<i64>> {
    let rows: Vec<(i64, i64)> = course_ids
        .iter()
        .flat_map(|&course_id| (1..=per_course as i64).map(move |number| (course_id, number)))
        .collect();
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let mut query =
        QueryBuilder::<Postgres>::new("INSERT INTO semesters (course_id, sem_number, duration) ");
    query.push_values(&rows, |mut row, (course_id, number)| {
        row.push_bind(*course_id).push_bind(*number).push_bind(6_i64);
    });
    query.push(" RETURNING id");

    let ids: Vec<i64> = query.build_query_scalar().fetch_all(&mut **tx).await?;
    Ok(ids)
}

async fn insert_subjects(
    tx: &mut Transaction<'_, Postgres>,
    subjects: &[SubjectSeed],
) -> CliResult<()> {
    // 6 params per subject
    const BATCH_SIZE: usize = 1000;

    for chunk in subjects.chunks(BATCH_SIZE) {
        let mut query = QueryBuilder::<Postgres>::new(
            "INSERT INTO subjects (semester_id, subject_type_id, name, abbr, code, credits) ",
        );
        query.push_values(chunk, |mut row, subject| {
            row.push_bind(subject.semester_id)
                .push_bind(subject.subject_type_id)
                .push_bind(&subject.name)
                .push_bind(&subject.abbr)
                .push_bind(&subject.code)
                .push_bind(subject.credits);
        });
        query.build().execute(&mut **tx).await?;
    }

    Ok(())
}

/// Returns `(batch_id, course_id)` pairs. Every batch gets access to all
/// semesters of its course.
async fn insert_batches(
    tx: &mut Transaction<'_, Postgres>,
    course_ids: &[i64],
    per_course: usize,
) -> CliResult<Vec<(i64, i64)>> {
    let current_year = i64::from(Utc::now().year());
    let rows: Vec<(i64, i64)> = course_ids
        .iter()
        .flat_map(|&course_id| {
            (0..per_course as i64).map(move |offset| (course_id, current_year - offset))
        })
        .collect();
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = QueryBuilder::<Postgres>::new("INSERT INTO batches (course_id, year) ");
    query.push_values(&rows, |mut row, (course_id, year)| {
        row.push_bind(*course_id).push_bind(*year);
    });
    query.push(" RETURNING id, course_id");
    let batches: Vec<(i64, i64)> = query.build_query_as().fetch_all(&mut **tx).await?;

    let batch_ids: Vec<i64> = batches.iter().map(|(id, _)| *id).collect();
    sqlx::query(
        "INSERT INTO batch_semester_maps (batch_id, semester_id)
         SELECT b.id, s.id FROM batches b
         JOIN semesters s ON s.course_id = b.course_id
         WHERE b.id = ANY($1)",
    )
    .bind(&batch_ids)
    .execute(&mut **tx)
    .await?;

    Ok(batches)
}

async fn insert_divisions(
    tx: &mut Transaction<'_, Postgres>,
    batches: &[(i64, i64)],
    per_batch: usize,
) -> CliResult<Vec<DivisionSlot>> {
    let rows: Vec<(i64, &str)> = batches
        .iter()
        .flat_map(|&(batch_id, _)| {
            DIVISION_NAMES
                .iter()
                .take(per_batch)
                .map(move |name| (batch_id, *name))
        })
        .collect();
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let course_of: HashMap<i64, i64> = batches.iter().copied().collect();

    let mut query = QueryBuilder::<Postgres>::new("INSERT INTO divisions (batch_id, name) ");
    query.push_values(&rows, |mut row, (batch_id, name)| {
        row.push_bind(*batch_id).push_bind(*name);
    });
    query.push(" RETURNING id, batch_id");
    let divisions: Vec<(i64, i64)> = query.build_query_as().fetch_all(&mut **tx).await?;

    Ok(divisions
        .into_iter()
        .filter_map(|(division_id, batch_id)| {
            course_of.get(&batch_id).map(|&course_id| DivisionSlot {
                course_id,
                batch_id,
                division_id,
            })
        })
        .collect())
}

/// Deletes seeded courses; semesters, subjects, batches and divisions
/// cascade.
pub async fn clear_curriculum(db: &PgPool) -> CliResult<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded courses...");

    let result = sqlx::query("DELETE FROM courses WHERE description = $1")
        .bind(SEED_COURSE_DESCRIPTION)
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} courses in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}
