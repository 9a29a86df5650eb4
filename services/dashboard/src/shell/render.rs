//! services/dashboard/src/shell/render.rs
//!
//! Plain-text views of the dashboard and course pages.

use learning_dashboard_core::{Course, CourseStatus, DashboardSummary, User};

pub const HELP: &str = "\
Commands:
  register <email> <password> <name>   create an account and sign in
  login <email> <password>             sign in
  logout                               sign out
  whoami                               show the signed-in user
  courses                              show the dashboard
  course <course-id>                   show a course and its chapters
  enroll <course-id>                   enroll in a course
  toggle <course-id> <chapter-id>      mark a chapter done / not done
  help                                 show this list
  quit                                 leave";

const BAR_WIDTH: usize = 20;

/// Values above 100 render as a full bar.
fn progress_bar(progress: u8) -> String {
    let filled = usize::from(progress.min(100)) * BAR_WIDTH / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn status_label(status: CourseStatus) -> String {
    match status {
        CourseStatus::NotEnrolled => "Not enrolled".to_string(),
        CourseStatus::InProgress(p) => format!("In Progress ({}%)", p),
        CourseStatus::Completed => "Completed!".to_string(),
    }
}

fn progress_line(course: &Course) -> String {
    format!(
        "{} {}% - {} of {} chapters completed",
        progress_bar(course.progress),
        course.progress,
        course.completed_chapters(),
        course.chapters.len()
    )
}

pub fn render_user(user: &User) -> String {
    format!("{} <{}> (id {})", user.name, user.email, user.id)
}

pub fn render_dashboard(user: &User, courses: &[Course], summary: &DashboardSummary) -> String {
    let mut lines = vec![
        format!("Welcome back, {}!", user.name),
        format!(
            "Courses: {} | Enrolled: {} | Completed: {} | Average progress: {}%",
            summary.total_courses,
            summary.registered_courses,
            summary.completed_courses,
            summary.average_progress
        ),
    ];
    for course in courses {
        lines.push(String::new());
        lines.push(format!("{} ({})", course.title, course.id));
        lines.push(format!(
            "  {} chapters | {}",
            course.chapters.len(),
            status_label(course.status())
        ));
        if course.is_registered {
            lines.push(format!("  {}", progress_line(course)));
        }
    }
    lines.join("\n")
}

pub fn render_course(course: &Course) -> String {
    let mut lines = vec![
        format!("{} ({})", course.title, course.id),
        course.description.clone(),
        format!("Status: {}", status_label(course.status())),
    ];

    if course.is_registered {
        lines.push(progress_line(course));
    } else {
        lines.push(format!(
            "Enroll in this course to access all chapters and track your progress: enroll {}",
            course.id
        ));
    }

    lines.push(format!("{} chapters:", course.chapters.len()));
    for (index, chapter) in course.chapters.iter().enumerate() {
        let mark = match (course.is_registered, chapter.is_completed) {
            (false, _) => " ",
            (true, true) => "x",
            (true, false) => "_",
        };
        lines.push(format!(
            "  [{}] {}. {} ({}) - {}",
            mark,
            index + 1,
            chapter.title,
            chapter.id,
            chapter.description
        ));
    }

    if course.status() == CourseStatus::Completed {
        lines.push("Congratulations! You have completed this course.".to_string());
    }
    lines.join("\n")
}
