//! Landing page content

/// Feature card on the landing page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
    /// In-app path the card links to, if any
    pub link: Option<&'static str>,
}

pub const HERO_TITLE: &str = "SVIT: Engineering the Future, Today.";

pub const HERO_SUBTITLE: &str = "Revolutionizing the college experience with an all-in-one platform \
     for a modern, tech-savvy campus.";

pub const FEATURES: &[Feature] = &[
    Feature {
        title: "Academic Resources",
        description: "Access study materials, assignments, and course content",
        link: None,
    },
    Feature {
        title: "Student Community",
        description: "Connect with peers and collaborate on projects",
        link: None,
    },
    Feature {
        title: "Event Management",
        description: "Stay updated with campus events and important dates",
        link: None,
    },
    Feature {
        title: "Campus Map",
        description: "Explore our campus with interactive maps and 360° views",
        link: Some("/campus-map"),
    },
];

pub const CALL_TO_ACTION: &str = "Join thousands of students already using the SVIT platform to \
     enhance their academic experience.";
