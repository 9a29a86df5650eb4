//! crates/learning_dashboard_core/src/seed.rs
//!
//! The fixed four-course catalog used on first run, before any snapshot exists.

use crate::domain::{Chapter, Course};

fn chapter(id: &str, title: &str, description: &str) -> Chapter {
    Chapter {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        is_completed: false,
    }
}

fn course(id: &str, title: &str, description: &str, chapters: Vec<Chapter>) -> Course {
    Course {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        chapters,
        is_registered: false,
        progress: 0,
    }
}

/// Builds the seed catalog. Every course starts unregistered at 0%.
pub fn seed_catalog() -> Vec<Course> {
    vec![
        course(
            "digital-literacy",
            "Digital Literacy Basics",
            "Learn fundamental digital skills including internet navigation, email, and basic computer operations essential for modern life.",
            vec![
                chapter("intro-computers", "Introduction to Computers", "Basic computer components and operations"),
                chapter("internet-basics", "Internet Basics", "Web browsing and online safety"),
                chapter("email-communication", "Email Communication", "Creating and managing email accounts"),
                chapter("digital-citizenship", "Digital Citizenship", "Responsible online behavior and privacy"),
            ],
        ),
        course(
            "coding-programming",
            "Coding & Programming Fundamentals",
            "Start your programming journey with HTML, CSS, JavaScript, and basic software development principles.",
            vec![
                chapter("html-basics", "HTML Fundamentals", "Structure web pages with HTML"),
                chapter("css-styling", "CSS Styling", "Design and layout with CSS"),
                chapter("javascript-intro", "JavaScript Introduction", "Interactive programming with JavaScript"),
                chapter("web-development", "Web Development Projects", "Build your first websites"),
                chapter("programming-logic", "Programming Logic", "Problem-solving and algorithms"),
            ],
        ),
        course(
            "digital-marketing",
            "Digital Marketing & Freelancing",
            "Develop skills in social media marketing, content creation, and freelancing to build your online career.",
            vec![
                chapter("social-media-marketing", "Social Media Marketing", "Build brand presence on social platforms"),
                chapter("content-creation", "Content Creation", "Create engaging digital content"),
                chapter("freelancing-basics", "Freelancing Fundamentals", "Start your freelancing career"),
                chapter("client-management", "Client Management", "Professional client relationships"),
            ],
        ),
        course(
            "sustainable-tech",
            "Sustainable Tech & Solar Hubs",
            "Explore renewable energy technology, solar power systems, and sustainable technology solutions for communities.",
            vec![
                chapter("renewable-energy", "Renewable Energy Basics", "Understanding sustainable energy sources"),
                chapter("solar-technology", "Solar Technology", "Solar panel systems and installation"),
                chapter("energy-storage", "Energy Storage Solutions", "Battery systems and grid management"),
                chapter("community-hubs", "Community Energy Hubs", "Building sustainable community centers"),
                chapter("maintenance-repair", "Maintenance & Repair", "System upkeep and troubleshooting"),
            ],
        ),
    ]
}
