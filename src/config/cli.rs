use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "course-enroll")]
#[command(about = "Run enrollment rules against a course roster")]
pub struct CliConfig {
    /// Path to the TOML roster file
    #[arg(short, long, default_value = "roster.toml")]
    pub roster: String,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Enroll a student in a course
    Enroll {
        student_id: String,
        course_code: String,
    },
    /// Drop a student from a course
    Drop {
        student_id: String,
        course_code: String,
    },
    /// Check a requested credit load against the student's cap
    CheckCredits { student_id: String, credits: u32 },
    /// List courses with seat occupancy
    Courses,
}
