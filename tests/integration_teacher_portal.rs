mod common;

use serde_json::{Value, json};
use sqlx::PgPool;

use campus_auth::PortalRole;
use common::{
    Cohort, create_admin, create_cohort, create_student, create_teacher, generate_unique_email,
    send, setup_test_app, token_for,
};

async fn teacher_token(pool: &PgPool, first_name: &str) -> (i64, String) {
    let id = create_teacher(pool, first_name, &generate_unique_email()).await;
    (id, token_for(id, PortalRole::Teacher))
}

fn assignment_body(cohort: &Cohort) -> Value {
    json!({
        "subjectId": cohort.subject_id,
        "divisionId": cohort.division_id,
        "name": "Sorting Homework",
        "questions": [{ "name": "Explain quicksort" }, { "name": "Explain mergesort" }],
        "materials": ["https://example.com/sorting.pdf", "  "]
    })
}

async fn create_event(app: &axum::Router, token: &str, name: &str) -> i64 {
    let (_, body) = send(
        app,
        "POST",
        "/api/teacher/event",
        Some(token),
        Some(json!({ "name": name, "venue": "Main Hall" })),
    )
    .await;
    assert_eq!(body["message"], "Event Saved.");
    body["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_teacher_details(pool: PgPool) {
    let (_, token) = teacher_token(&pool, "Tess").await;
    let app = setup_test_app(pool);

    let (_, body) = send(&app, "GET", "/api/teacher/details", Some(&token), None).await;

    assert_eq!(body["status"], true);
    assert_eq!(body["data"]["firstName"], "Tess");
    assert_eq!(body["data"]["roleName"], "Lecturer");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_assignment_belongs_to_its_teacher(pool: PgPool) {
    let cohort = create_cohort(&pool).await;
    let (owner_id, owner) = teacher_token(&pool, "Owner").await;
    let (_, other) = teacher_token(&pool, "Other").await;
    let app = setup_test_app(pool);

    let (_, body) = send(
        &app,
        "POST",
        "/api/teacher/assignment",
        Some(&owner),
        Some(assignment_body(&cohort)),
    )
    .await;
    assert_eq!(body["message"], "Assignment Saved.");
    let id = body["data"]["id"].as_i64().unwrap();

    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/teacher/assignment/{id}"),
        Some(&owner),
        None,
    )
    .await;
    assert_eq!(body["data"]["teacherId"], owner_id);
    assert_eq!(body["data"]["subjectName"], "Algorithms");
    let questions = body["data"]["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0]["question"], "Explain quicksort");
    assert_eq!(body["data"]["materials"].as_array().unwrap().len(), 1);

    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/teacher/assignment/{id}"),
        Some(&other),
        None,
    )
    .await;
    assert_eq!(body["message"], "Assignment Does Not Exist.");
    assert!(body["data"].is_null());

    let (_, body) = send(&app, "GET", "/api/teacher/assignments", Some(&other), None).await;
    assert_eq!(body["data"]["assignmentCount"], 0);

    let (_, body) = send(
        &app,
        "DELETE",
        &format!("/api/teacher/assignment/{id}"),
        Some(&other),
        None,
    )
    .await;
    assert_eq!(body["message"], "Assignment Does Not Exist.");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_assignment_update_keeps_existing_questions(pool: PgPool) {
    let cohort = create_cohort(&pool).await;
    let (_, token) = teacher_token(&pool, "Owner").await;
    let app = setup_test_app(pool);

    let (_, body) = send(
        &app,
        "POST",
        "/api/teacher/assignment",
        Some(&token),
        Some(assignment_body(&cohort)),
    )
    .await;
    let id = body["data"]["id"].as_i64().unwrap();

    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/teacher/assignment/{id}"),
        Some(&token),
        None,
    )
    .await;
    let kept_id = body["data"]["questions"][1]["id"].as_i64().unwrap();

    let mut update = assignment_body(&cohort);
    update["id"] = json!(id);
    update["questions"] = json!([
        { "dbId": kept_id, "name": "Explain mergesort in detail" },
        { "name": "Explain heapsort" }
    ]);
    let (_, body) = send(&app, "POST", "/api/teacher/assignment", Some(&token), Some(update)).await;
    assert_eq!(body["data"]["id"], id);

    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/teacher/assignment/{id}"),
        Some(&token),
        None,
    )
    .await;
    let questions = body["data"]["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0]["id"], kept_id);
    assert_eq!(questions[0]["question"], "Explain mergesort in detail");
    assert_eq!(questions[1]["question"], "Explain heapsort");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_students_by_assignment_and_submission(pool: PgPool) {
    let cohort = create_cohort(&pool).await;
    let student_id =
        create_student(&pool, cohort.division_id, "CS001", &generate_unique_email()).await;
    create_student(&pool, cohort.division_id, "CS002", &generate_unique_email()).await;
    let (_, owner) = teacher_token(&pool, "Owner").await;
    let (_, other) = teacher_token(&pool, "Other").await;
    let app = setup_test_app(pool.clone());

    let (_, body) = send(
        &app,
        "POST",
        "/api/teacher/assignment",
        Some(&owner),
        Some(assignment_body(&cohort)),
    )
    .await;
    let assignment_id = body["data"]["id"].as_i64().unwrap();

    let submission_id: i64 = sqlx::query_scalar(
        "INSERT INTO submitted_assignments (assignment_id, student_id, answer)
         VALUES ($1, $2, 'Pivot and partition') RETURNING id",
    )
    .bind(assignment_id)
    .bind(student_id)
    .fetch_one(&pool)
    .await
    .unwrap();

    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/teacher/students-by-assignment/{assignment_id}"),
        Some(&owner),
        None,
    )
    .await;
    let students = body["data"].as_array().unwrap();
    assert_eq!(students.len(), 2);
    assert_eq!(students[0]["submittedAssignmentId"], submission_id);
    assert!(students[1]["submittedAssignmentId"].is_null());

    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/teacher/students-by-assignment/{assignment_id}"),
        Some(&other),
        None,
    )
    .await;
    assert_eq!(body["message"], "Assignment Does Not Exist.");

    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/teacher/submitted-assignment/{submission_id}"),
        Some(&owner),
        None,
    )
    .await;
    assert_eq!(body["data"]["answer"], "Pivot and partition");
    assert_eq!(body["data"]["rollNumber"], "CS001");

    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/teacher/submitted-assignment/{submission_id}"),
        Some(&other),
        None,
    )
    .await;
    assert_eq!(body["message"], "Submitted Assignment Does Not Exist.");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_event_created_pending_with_head(pool: PgPool) {
    let (head_id, head) = teacher_token(&pool, "Head").await;
    let app = setup_test_app(pool);

    let event_id = create_event(&app, &head, "Tech Fest").await;

    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/teacher/event/{event_id}"),
        Some(&head),
        None,
    )
    .await;
    assert_eq!(body["data"]["eventHeadId"], head_id);
    assert_eq!(body["data"]["eventHeadName"], "Head Teacher");
    assert_eq!(body["data"]["approvalStatus"], "pending");
    assert!(body["data"]["organisers"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_event_dates_must_be_ordered(pool: PgPool) {
    let (_, head) = teacher_token(&pool, "Head").await;
    let app = setup_test_app(pool);

    let (_, body) = send(
        &app,
        "POST",
        "/api/teacher/event",
        Some(&head),
        Some(json!({
            "name": "Backwards",
            "startDate": "2025-03-10T09:00:00Z",
            "endDate": "2025-03-09T09:00:00Z"
        })),
    )
    .await;

    assert_eq!(body["status"], false);
    assert_eq!(body["message"], "End Date Cannot Be Before Start Date.");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_only_head_edits_event(pool: PgPool) {
    let (_, head) = teacher_token(&pool, "Head").await;
    let (_, other) = teacher_token(&pool, "Other").await;
    let app = setup_test_app(pool);
    let event_id = create_event(&app, &head, "Tech Fest").await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/teacher/event",
        Some(&other),
        Some(json!({ "id": event_id, "name": "Hijacked" })),
    )
    .await;
    assert_eq!(body["status"], false);
    assert_eq!(body["message"], "Event Does Not Exist.");

    let (_, body) = send(
        &app,
        "DELETE",
        &format!("/api/teacher/event/{event_id}"),
        Some(&other),
        None,
    )
    .await;
    assert_eq!(body["message"], "Event Does Not Exist.");

    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/teacher/event/{event_id}"),
        Some(&other),
        None,
    )
    .await;
    assert_eq!(body["data"]["name"], "Tech Fest");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_organiser_request_and_approval(pool: PgPool) {
    let (_, head) = teacher_token(&pool, "Head").await;
    let (organiser_id, organiser) = teacher_token(&pool, "Helper").await;
    let app = setup_test_app(pool);
    let event_id = create_event(&app, &head, "Tech Fest").await;

    for _ in 0..2 {
        let (_, body) = send(
            &app,
            "POST",
            "/api/teacher/join-event-organisers",
            Some(&organiser),
            Some(json!({ "eventId": event_id })),
        )
        .await;
        assert_eq!(body["message"], "Organiser Request Sent.");
    }

    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/teacher/event/{event_id}"),
        Some(&head),
        None,
    )
    .await;
    let organisers = body["data"]["organisers"].as_array().unwrap();
    assert_eq!(organisers.len(), 1);
    assert_eq!(organisers[0]["teacherId"], organiser_id);
    assert_eq!(organisers[0]["approvalStatus"], "pending");
    let event_organiser_id = organisers[0]["id"].as_i64().unwrap();

    let approval = json!({ "eventOrganiserId": event_organiser_id, "approvalStatus": "approved" });

    let (_, body) = send(
        &app,
        "POST",
        "/api/teacher/event-organisers-approval-status",
        Some(&organiser),
        Some(approval.clone()),
    )
    .await;
    assert_eq!(body["status"], false);
    assert_eq!(body["message"], "Only The Event Head Can Approve Organisers.");

    let (_, body) = send(
        &app,
        "POST",
        "/api/teacher/event-organisers-approval-status",
        Some(&head),
        Some(approval),
    )
    .await;
    assert_eq!(body["message"], "Event Organiser Saved.");

    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/teacher/event/{event_id}"),
        Some(&head),
        None,
    )
    .await;
    assert_eq!(body["data"]["organisers"][0]["approvalStatus"], "approved");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_join_unknown_event(pool: PgPool) {
    let (_, token) = teacher_token(&pool, "Tess").await;
    let app = setup_test_app(pool);

    let (_, body) = send(
        &app,
        "POST",
        "/api/teacher/join-event-participants",
        Some(&token),
        Some(json!({ "eventId": 9999 })),
    )
    .await;

    assert_eq!(body["status"], true);
    assert_eq!(body["message"], "Event Does Not Exist.");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_participant_removal(pool: PgPool) {
    let (_, head) = teacher_token(&pool, "Head").await;
    let (_, guest) = teacher_token(&pool, "Guest").await;
    let (_, stranger) = teacher_token(&pool, "Stranger").await;
    let app = setup_test_app(pool);
    let event_id = create_event(&app, &head, "Tech Fest").await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/teacher/join-event-participants",
        Some(&guest),
        Some(json!({ "eventId": event_id })),
    )
    .await;
    assert_eq!(body["message"], "Event Joined.");

    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/teacher/event/{event_id}"),
        Some(&head),
        None,
    )
    .await;
    let participant_id = body["data"]["participants"][0]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["participants"][0]["name"], "Guest Teacher");

    let uri = format!("/api/teacher/remove-event-participant/{participant_id}");

    let (_, body) = send(&app, "DELETE", &uri, Some(&stranger), None).await;
    assert_eq!(body["message"], "Event Participant Does Not Exist.");

    let (_, body) = send(&app, "DELETE", &uri, Some(&head), None).await;
    assert_eq!(body["message"], "Event Participant Removed.");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_approves_event(pool: PgPool) {
    let (_, head) = teacher_token(&pool, "Head").await;
    let admin_id = create_admin(&pool, &generate_unique_email()).await;
    let admin = token_for(admin_id, PortalRole::Admin);
    let app = setup_test_app(pool);
    let event_id = create_event(&app, &head, "Tech Fest").await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/admin/event",
        Some(&admin),
        Some(json!({ "eventId": event_id, "approvalStatus": "approved" })),
    )
    .await;
    assert_eq!(body["status"], true);
    assert_eq!(body["message"], "Event Saved.");

    let (_, body) = send(
        &app,
        "GET",
        "/api/admin/events?approvalStatus=approved",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(body["data"]["eventCount"], 1);

    let (_, body) = send(
        &app,
        "GET",
        "/api/admin/events?approvalStatus=pending",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(body["data"]["eventCount"], 0);
}
