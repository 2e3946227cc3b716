//! Teacher and student seeding.

use std::time::Instant;

use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};

use super::models::{DivisionSlot, PersonSeed, SEED_EMAIL_DOMAIN, SEED_TEACHER_ROLE};
use crate::admin::CliResult;

const GENDERS: [&str; 2] = ["male", "female"];

fn generate_person(role_prefix: &str, group_idx: usize, person_idx: usize) -> PersonSeed {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();

    let email = format!(
        "{}.{}+{}{}@{}",
        first_name.to_lowercase(),
        last_name.to_lowercase(),
        role_prefix,
        group_idx * 1000 + person_idx,
        SEED_EMAIL_DOMAIN
    );

    PersonSeed {
        first_name,
        last_name,
        email,
        gender: GENDERS[person_idx % GENDERS.len()],
    }
}

pub fn generate_teachers(count: usize) -> Vec<PersonSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| generate_person("teacher", 0, idx))
        .collect()
}

/// Students per division, each paired with their roll number.
pub fn generate_students(
    slots: &[DivisionSlot],
    per_division: usize,
) -> Vec<(DivisionSlot, String, PersonSeed)> {
    slots
        .par_iter()
        .enumerate()
        .flat_map(|(division_idx, &slot)| {
            (0..per_division)
                .map(|student_idx| {
                    let roll_number = format!("{}{:03}", slot.division_id, student_idx + 1);
                    (
                        slot,
                        roll_number,
                        generate_person("student", division_idx, student_idx),
                    )
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Seeds teachers under a dedicated teacher role and returns their ids.
pub async fn seed_teachers(db: &PgPool, count: usize, password_hash: &str) -> CliResult<Vec<i64>> {
    let start_time = Instant::now();
    println!("👩‍🏫 Seeding {} teachers...", count);

    if count == 0 {
        return Ok(Vec::new());
    }

    let mut tx = db.begin().await?;

    let role_id: i64 =
        sqlx::query_scalar("INSERT INTO teacher_roles (name) VALUES ($1) RETURNING id")
            .bind(SEED_TEACHER_ROLE)
            .fetch_one(&mut *tx)
            .await?;

    let teachers = generate_teachers(count);
    let mut ids = Vec::with_capacity(teachers.len());

    // 6 params per teacher
    const BATCH_SIZE: usize = 1000;

    for chunk in teachers.chunks(BATCH_SIZE) {
        let mut query = QueryBuilder::<Postgres>::new(
            "INSERT INTO teachers (role_id, first_name, last_name, email, password, gender) ",
        );
        query.push_values(chunk, |mut row, teacher| {
            row.push_bind(role_id)
                .push_bind(&teacher.first_name)
                .push_bind(&teacher.last_name)
                .push_bind(&teacher.email)
                .push_bind(password_hash)
                .push_bind(teacher.gender);
        });
        query.push(" RETURNING id");

        let chunk_ids: Vec<i64> = query.build_query_scalar().fetch_all(&mut *tx).await?;
        ids.extend(chunk_ids);
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} teachers in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

pub async fn seed_students(
    db: &PgPool,
    slots: &[DivisionSlot],
    per_division: usize,
    password_hash: &str,
) -> CliResult<u64> {
    let start_time = Instant::now();
    println!(
        "🎓 Seeding {} students ({} per division)...",
        slots.len() * per_division,
        per_division
    );

    let students = generate_students(slots, per_division);
    let mut tx = db.begin().await?;

    // 9 params per student
    const BATCH_SIZE: usize = 700;
    let mut inserted = 0;

    for chunk in students.chunks(BATCH_SIZE) {
        inserted += insert_students_chunk(&mut tx, chunk, password_hash).await?;
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} students in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}

async fn insert_students_chunk(
    tx: &mut Transaction<'_, Postgres>,
    students: &[(DivisionSlot, String, PersonSeed)],
    password_hash: &str,
) -> CliResult<u64> {
    if students.is_empty() {
        return Ok(0);
    }

    let mut query = QueryBuilder::<Postgres>::new(
        "INSERT INTO students (course_id, batch_id, division_id, roll_number, first_name, last_name, email, password, gender) ",
    );
    query.push_values(students, |mut row, (slot, roll_number, person)| {
        row.push_bind(slot.course_id)
            .push_bind(slot.batch_id)
            .push_bind(slot.division_id)
            .push_bind(roll_number)
            .push_bind(&person.first_name)
            .push_bind(&person.last_name)
            .push_bind(&person.email)
            .push_bind(password_hash)
            .push_bind(person.gender);
    });

    Ok(query.build().execute(&mut **tx).await?.rows_affected())
}

/// Spreads the seeded teachers round-robin over every (division, subject)
/// pair the division's batch can access.
pub async fn assign_subject_teachers(
    db: &PgPool,
    slots: &[DivisionSlot],
    teacher_ids: &[i64],
) -> CliResult<u64> {
    if slots.is_empty() || teacher_ids.is_empty() {
        return Ok(0);
    }

    let start_time = Instant::now();
    println!("🔗 Assigning subject teachers to {} divisions...", slots.len());

    let division_ids: Vec<i64> = slots.iter().map(|slot| slot.division_id).collect();
    let result = sqlx::query(
        r#"INSERT INTO division_subject_teachers (division_id, subject_id, teacher_id)
        SELECT pairs.division_id, pairs.subject_id,
               ($1::BIGINT[])[(1 + (pairs.n % array_length($1::BIGINT[], 1)))::INT]
        FROM (
            SELECT d.id AS division_id, s.id AS subject_id,
                   ROW_NUMBER() OVER (ORDER BY d.id, s.id) AS n
            FROM divisions d
            JOIN batch_semester_maps m ON m.batch_id = d.batch_id
            JOIN subjects s ON s.semester_id = m.semester_id
            WHERE d.id = ANY($2)
        ) pairs"#,
    )
    .bind(teacher_ids)
    .bind(&division_ids)
    .execute(db)
    .await?
    .rows_affected();

    println!(
        "   ✓ Created {} subject links in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}

/// Deletes seeded students and teachers (identified by their email domain)
/// and the seeded teacher role once it has no teachers left.
pub async fn clear_people(db: &PgPool) -> CliResult<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded teachers and students...");

    let pattern = format!("%@{SEED_EMAIL_DOMAIN}");
    let mut tx = db.begin().await?;

    let students = sqlx::query("DELETE FROM students WHERE email LIKE $1")
        .bind(&pattern)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let teachers = sqlx::query("DELETE FROM teachers WHERE email LIKE $1")
        .bind(&pattern)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    sqlx::query(
        "DELETE FROM teacher_roles r WHERE r.name = $1
         AND NOT EXISTS (SELECT 1 FROM teachers t WHERE t.role_id = r.id)",
    )
    .bind(SEED_TEACHER_ROLE)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    println!(
        "   ✓ Deleted {} students and {} teachers in {:?}",
        students,
        teachers,
        start_time.elapsed()
    );

    Ok(students + teachers)
}
