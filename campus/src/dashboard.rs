//! Dashboard mock data
//!
//! The dashboard has no backing service yet, the figures below are what every signed in user
//! sees.

/// Dashboard shortcut tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    pub title: &'static str,
}

/// Headline figure in the academic overview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statistic {
    pub label: &'static str,
    pub value: &'static str,
    pub detail: &'static str,
}

/// How an activity entry is highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Success,
    Info,
    Warning,
}

impl ActivityKind {
    /// Name used as a style hook in the markup
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activity {
    pub title: &'static str,
    pub time: &'static str,
    pub kind: ActivityKind,
}

/// Sidebar notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub body: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub title: &'static str,
    pub date: &'static str,
    pub kind: &'static str,
}

pub const QUICK_ACTIONS: &[QuickAction] = &[
    QuickAction {
        title: "Course Materials",
    },
    QuickAction { title: "Schedule" },
    QuickAction { title: "Grades" },
    QuickAction {
        title: "Study Groups",
    },
];

pub const STATISTICS: &[Statistic] = &[
    Statistic {
        label: "Current GPA",
        value: "8.7",
        detail: "+0.2 from last semester",
    },
    Statistic {
        label: "Completed",
        value: "12/15",
        detail: "Assignments this month",
    },
    Statistic {
        label: "Attendance",
        value: "94%",
        detail: "This semester",
    },
];

pub const RECENT_ACTIVITIES: &[Activity] = &[
    Activity {
        title: "Assignment submitted: Data Structures",
        time: "2 hours ago",
        kind: ActivityKind::Success,
    },
    Activity {
        title: "New announcement in Computer Networks",
        time: "4 hours ago",
        kind: ActivityKind::Info,
    },
    Activity {
        title: "Upcoming exam: Database Management",
        time: "1 day ago",
        kind: ActivityKind::Warning,
    },
    Activity {
        title: "Grade updated: Software Engineering",
        time: "2 days ago",
        kind: ActivityKind::Success,
    },
];

pub const NOTICES: &[Notice] = &[
    Notice {
        title: "New Assignment",
        body: "Database Management System",
    },
    Notice {
        title: "Grade Updated",
        body: "Software Engineering: A+",
    },
];

pub const UPCOMING_EVENTS: &[Event] = &[
    Event {
        title: "Tech Symposium 2025",
        date: "Dec 20, 2024",
        kind: "event",
    },
    Event {
        title: "Final Exams Begin",
        date: "Dec 15, 2024",
        kind: "deadline",
    },
    Event {
        title: "Project Submission",
        date: "Dec 10, 2024",
        kind: "assignment",
    },
];

pub const DOWNLOADS: &[&str] = &["Academic Calendar", "Course Handbook", "Exam Schedule"];
