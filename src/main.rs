use anyhow::Context;
use clap::Parser;
use course_enroll::core::{CourseCode, StudentId};
use course_enroll::utils::error::{EnrollmentError, ErrorCategory};
use course_enroll::utils::{logger, validation::Validate};
use course_enroll::{CliConfig, Command, EnrollmentService, OutboxNotificationGateway, RosterConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    let roster = match load_roster(&config.roster) {
        Ok(roster) => roster,
        Err(e) => {
            tracing::error!("Roster '{}' rejected: {}", config.roster, e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e));
        }
    };
    tracing::info!(
        "Loaded roster '{}' for term {} ({} students, {} courses)",
        roster.roster.name,
        roster.term(),
        roster.students.len(),
        roster.courses.len()
    );

    let adapters = roster
        .into_adapters()
        .await
        .context("failed to seed adapters from roster")?;
    let courses = Arc::new(adapters.courses);
    let notifier = Arc::new(OutboxNotificationGateway::new());
    let service = EnrollmentService::new(
        Arc::new(adapters.students),
        Arc::clone(&courses),
        Arc::clone(&notifier),
        Arc::new(adapters.credit_policy),
    );

    let outcome = match config.command {
        Command::Enroll {
            student_id,
            course_code,
        } => service
            .enroll_course(&StudentId::new(student_id), &CourseCode::new(course_code))
            .await
            .and_then(|enrollment| serde_json::to_string_pretty(&enrollment).map_err(EnrollmentError::from))
            .map(|json| println!("{}", json)),
        Command::Drop {
            student_id,
            course_code,
        } => service
            .drop_course(&StudentId::new(student_id.clone()), &CourseCode::new(course_code.clone()))
            .await
            .map(|()| println!("✅ {} dropped {}", student_id, course_code)),
        Command::CheckCredits {
            student_id,
            credits,
        } => service
            .validate_credit_limit(&StudentId::new(student_id.clone()), credits)
            .await
            .map(|within_limit| {
                if within_limit {
                    println!("✅ {} credits are within the limit for {}", credits, student_id);
                } else {
                    println!("⛔ {} credits exceed the limit for {}", credits, student_id);
                }
            }),
        Command::Courses => {
            for course in courses.courses().await {
                println!(
                    "{:<10} {:<40} {:>4}/{:<4} {} credits",
                    course.code, course.name, course.enrolled, course.capacity, course.credits
                );
            }
            Ok(())
        }
    };

    for email in notifier.drain().await {
        println!("📧 To: {}\n   Subject: {}\n   {}", email.to, email.subject, email.body);
    }

    if let Err(e) = outcome {
        tracing::error!(
            "Request failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(exit_code(&e));
    }

    Ok(())
}

fn load_roster(path: &str) -> course_enroll::Result<RosterConfig> {
    let roster = RosterConfig::from_file(path)?;
    roster.validate()?;
    Ok(roster)
}

fn exit_code(error: &EnrollmentError) -> i32 {
    match error.category() {
        ErrorCategory::Rule | ErrorCategory::NotFound => 1,
        ErrorCategory::Configuration => 2,
        ErrorCategory::Collaborator => 3,
    }
}
