//! # Campus CLI
//!
//! Administrative tooling for the Campus database:
//!
//! - [`admin`]: creating admin accounts (admins cannot be created over HTTP)
//! - [`seeder`]: fake curriculum, cohorts, teachers and students for
//!   development
//!
//! ```ignore
//! use campus_cli::seeder::{SeedConfig, seed_all};
//!
//! let config = SeedConfig::new(3).with_students_per_division(20);
//! seed_all(&pool, config).await?;
//! ```

pub mod admin;
pub mod seeder;
