//! Development data seeding.
//!
//! Everything the seeder creates is recognisable afterwards (see the
//! constants in [`models`]), so [`clear_all`] removes it without touching
//! admins or hand-entered records.

pub mod curriculum;
pub mod models;
pub mod people;

use std::time::Instant;

use sqlx::PgPool;

use crate::admin::CliResult;

pub use models::{DivisionSlot, SEED_PASSWORD, SeedConfig};

/// Low bcrypt cost: seeded accounts are throwaway.
const SEED_BCRYPT_COST: u32 = 4;

pub async fn seed_all(db: &PgPool, config: SeedConfig) -> CliResult<()> {
    let start_time = Instant::now();
    println!(
        "🌱 Seeding {} courses, {} teachers and {} students...",
        config.courses,
        config.teachers,
        config.total_students()
    );

    let password_hash = bcrypt::hash(SEED_PASSWORD, SEED_BCRYPT_COST)?;

    let slots = curriculum::seed_curriculum(db, &config).await?;
    let teacher_ids = people::seed_teachers(db, config.teachers, &password_hash).await?;
    people::assign_subject_teachers(db, &slots, &teacher_ids).await?;
    people::seed_students(db, &slots, config.students_per_division, &password_hash).await?;

    println!("\n✅ Seeding complete in {:?}", start_time.elapsed());
    println!("   Seeded accounts use the password \"{SEED_PASSWORD}\"");
    Ok(())
}

/// Clears seeded people first; students block course deletion otherwise.
pub async fn clear_all(db: &PgPool) -> CliResult<()> {
    let start_time = Instant::now();

    people::clear_people(db).await?;
    curriculum::clear_curriculum(db).await?;

    println!("\n✅ Cleared seeded data in {:?}", start_time.elapsed());
    Ok(())
}
