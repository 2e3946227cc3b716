mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use campus_auth::PortalRole;
use common::{
    create_admin, create_cohort, create_course, create_semester, create_student, create_subject,
    create_teacher, generate_unique_email, send, setup_test_app, token_for,
};

async fn admin_token(pool: &PgPool) -> String {
    let id = create_admin(pool, &generate_unique_email()).await;
    token_for(id, PortalRole::Admin)
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_and_fetch_course(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/course",
        Some(&token),
        Some(json!({
            "name": "  Computer Engineering  ",
            "abbr": "CE",
            "duration": 4,
            "vision": "Build things"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], true);
    assert_eq!(body["message"], "Course Saved.");
    let id = body["data"]["id"].as_i64().unwrap();

    let (_, body) = send(&app, "GET", &format!("/api/admin/course/{id}"), Some(&token), None).await;
    assert_eq!(body["status"], true);
    assert_eq!(body["data"]["name"], "Computer Engineering");
    assert_eq!(body["data"]["vision"], "Build things");
    assert_eq!(body["data"]["status"], true);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_course_keeps_id(pool: PgPool) {
    let token = admin_token(&pool).await;
    let course_id = create_course(&pool, "Mechanical").await;
    let app = setup_test_app(pool);

    let (_, body) = send(
        &app,
        "POST",
        "/api/admin/course",
        Some(&token),
        Some(json!({ "id": course_id, "name": "Mechanical Engineering", "abbr": "ME", "duration": 4 })),
    )
    .await;
    assert_eq!(body["data"]["id"], course_id);

    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/admin/course/{course_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["data"]["name"], "Mechanical Engineering");
    assert_eq!(body["data"]["abbr"], "ME");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_unknown_course(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = setup_test_app(pool);

    let (_, body) = send(
        &app,
        "POST",
        "/api/admin/course",
        Some(&token),
        Some(json!({ "id": 9999, "name": "Ghost Course", "abbr": "GC", "duration": 2 })),
    )
    .await;

    assert_eq!(body["status"], false);
    assert_eq!(body["message"], "Course Does Not Exist.");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_course_validation_is_a_rejection(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = setup_test_app(pool.clone());

    for name in ["CE", "  ab ", "   "] {
        let (status, body) = send(
            &app,
            "POST",
            "/api/admin/course",
            Some(&token),
            Some(json!({ "name": name, "abbr": "CE", "duration": 4 })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], false);
        assert_eq!(body["message"], "Course Name must be 3 to 100 characters");
        assert!(body["data"].is_null());
    }

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_courses_with_search_and_pagination(pool: PgPool) {
    let token = admin_token(&pool).await;
    for name in ["Civil Engineering", "Electrical Engineering", "Fine Arts"] {
        create_course(&pool, name).await;
    }
    let app = setup_test_app(pool);

    let (_, body) = send(&app, "GET", "/api/admin/courses", Some(&token), None).await;
    assert_eq!(body["data"]["courseCount"], 3);
    assert_eq!(body["data"]["courses"].as_array().unwrap().len(), 3);

    let (_, body) = send(
        &app,
        "GET",
        "/api/admin/courses?searchText=engineering",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["data"]["courseCount"], 2);

    let (_, body) = send(
        &app,
        "GET",
        "/api/admin/courses?currentPage=2&itemsPerPage=2",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["data"]["courseCount"], 3);
    assert_eq!(body["data"]["courses"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_garbage_pagination_falls_back_to_defaults(pool: PgPool) {
    let token = admin_token(&pool).await;
    create_course(&pool, "Physics").await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "GET",
        "/api/admin/courses?currentPage=abc&itemsPerPage=-3",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["courses"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_course(pool: PgPool) {
    let token = admin_token(&pool).await;
    let course_id = create_course(&pool, "Chemistry").await;
    let app = setup_test_app(pool);

    let (_, body) = send(
        &app,
        "DELETE",
        &format!("/api/admin/course/{course_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["status"], true);
    assert_eq!(body["data"]["name"], "Chemistry");

    let (_, body) = send(
        &app,
        "DELETE",
        &format!("/api/admin/course/{course_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["status"], true);
    assert_eq!(body["message"], "Course Does Not Exist.");
    assert!(body["data"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_invalid_path_id(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = setup_test_app(pool);

    let (status, body) = send(&app, "GET", "/api/admin/course/abc", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Send A Valid ID");
    assert!(body["data"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_course_in_use(pool: PgPool) {
    let token = admin_token(&pool).await;
    let cohort = create_cohort(&pool).await;
    create_student(&pool, cohort.division_id, "CS001", &generate_unique_email()).await;
    let course_id = cohort.course_id;
    let app = setup_test_app(pool);

    let (_, body) = send(
        &app,
        "DELETE",
        &format!("/api/admin/course/{course_id}"),
        Some(&token),
        None,
    )
    .await;

    assert_eq!(body["status"], false);
    assert_eq!(body["message"], "Course Is In Use.");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_semesters_require_course(pool: PgPool) {
    let token = admin_token(&pool).await;
    let course_id = create_course(&pool, "Mathematics").await;
    create_semester(&pool, course_id, 2).await;
    create_semester(&pool, course_id, 1).await;
    let app = setup_test_app(pool);

    let (status, body) = send(&app, "GET", "/api/admin/semesters", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], false);
    assert_eq!(body["message"], "Send Course ID");

    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/admin/semesters?courseId={course_id}"),
        Some(&token),
        None,
    )
    .await;
    let semesters = body["data"]["semesters"].as_array().unwrap();
    assert_eq!(body["data"]["semesterCount"], 2);
    assert_eq!(semesters[0]["semNumber"], 1);
    assert_eq!(semesters[1]["semNumber"], 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_save_semester_for_unknown_course(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = setup_test_app(pool);

    let (_, body) = send(
        &app,
        "POST",
        "/api/admin/semester",
        Some(&token),
        Some(json!({ "courseId": 4242, "semNumber": 1, "duration": 6 })),
    )
    .await;

    assert_eq!(body["status"], false);
    assert_eq!(body["message"], "Please Provide All Details.");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_subject_types_are_listed_without_paging(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = setup_test_app(pool);

    let (_, body) = send(&app, "GET", "/api/admin/subject-types", Some(&token), None).await;

    assert_eq!(body["status"], true);
    let types = body["data"]["subjectTypes"].as_array().unwrap();
    assert!(!types.is_empty());
    assert_eq!(body["data"]["subjectTypeCount"], types.len() as i64);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_subjects_listed_per_semester(pool: PgPool) {
    let token = admin_token(&pool).await;
    let course_id = create_course(&pool, "Statistics").await;
    let first = create_semester(&pool, course_id, 1).await;
    let second = create_semester(&pool, course_id, 2).await;
    create_subject(&pool, first, "Probability").await;
    create_subject(&pool, second, "Regression").await;
    let app = setup_test_app(pool);

    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/admin/subjects?semesterId={first}"),
        Some(&token),
        None,
    )
    .await;

    let subjects = body["data"]["subjects"].as_array().unwrap();
    assert_eq!(subjects.len(), 1);
    assert_eq!(subjects[0]["name"], "Probability");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_teacher_portal_reads_courses_but_cannot_write(pool: PgPool) {
    let teacher_id = create_teacher(&pool, "Tess", &generate_unique_email()).await;
    create_course(&pool, "History").await;
    let app = setup_test_app(pool);
    let token = token_for(teacher_id, PortalRole::Teacher);

    let (_, body) = send(&app, "GET", "/api/teacher/courses", Some(&token), None).await;
    assert_eq!(body["data"]["courseCount"], 1);

    let (status, _) = send(
        &app,
        "POST",
        "/api/teacher/course",
        Some(&token),
        Some(json!({ "name": "Geography", "abbr": "GEO", "duration": 3 })),
    )
    .await;
    assert!(matches!(
        status,
        StatusCode::NOT_FOUND | StatusCode::METHOD_NOT_ALLOWED
    ));
}
