//! Rendered pages
//!
//! Every page embeds [`Chrome`] - the navigation shell and notifications - which `base.html`
//! renders around the page content.

pub mod notification;
pub mod shell;

use askama::Template;
use campus::dashboard::{
    Activity, DOWNLOADS, Event, NOTICES, Notice, QUICK_ACTIONS, QuickAction, RECENT_ACTIVITIES,
    STATISTICS, Statistic, UPCOMING_EVENTS,
};
use campus::home::{self, Feature};
use campus::map::{self, CampusImage, MapSection};

use crate::model::auth::Identity;
pub use notification::Notification;
pub use shell::Shell;

/// Parts shared by every page
#[derive(Debug, Clone)]
pub struct Chrome {
    pub shell: Shell,
    pub notifications: Vec<Notification>,
}

impl Chrome {
    pub fn portal_name(&self) -> &'static str {
        campus::PORTAL_NAME
    }

    pub fn portal_tagline(&self) -> &'static str {
        campus::PORTAL_TAGLINE
    }
}

#[derive(Debug, Template)]
#[template(path = "home.html")]
pub struct HomePage {
    pub chrome: Chrome,
    pub hero_title: &'static str,
    pub hero_subtitle: &'static str,
    pub features: &'static [Feature],
    pub call_to_action: &'static str,
}

impl HomePage {
    pub fn new(chrome: Chrome) -> Self {
        Self {
            chrome,
            hero_title: home::HERO_TITLE,
            hero_subtitle: home::HERO_SUBTITLE,
            features: home::FEATURES,
            call_to_action: home::CALL_TO_ACTION,
        }
    }
}

#[derive(Debug, Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub chrome: Chrome,
    /// Email to prefill the form with
    pub email: String,
}

#[derive(Debug, Template)]
#[template(path = "register.html")]
pub struct RegisterPage {
    pub chrome: Chrome,
    /// Email to prefill the form with
    pub email: String,
}

#[derive(Debug, Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub chrome: Chrome,
    pub display_name: String,
    pub identity: String,
    pub quick_actions: &'static [QuickAction],
    pub statistics: &'static [Statistic],
    pub activities: &'static [Activity],
    pub notices: &'static [Notice],
    pub events: &'static [Event],
    pub downloads: &'static [&'static str],
}

impl DashboardPage {
    /// Dashboard greeting the signed in identity
    pub fn new(chrome: Chrome, identity: &Identity) -> Self {
        Self {
            chrome,
            display_name: identity.display_name().to_owned(),
            identity: identity.to_string(),
            quick_actions: QUICK_ACTIONS,
            statistics: STATISTICS,
            activities: RECENT_ACTIVITIES,
            notices: NOTICES,
            events: UPCOMING_EVENTS,
            downloads: DOWNLOADS,
        }
    }
}

#[derive(Debug, Template)]
#[template(path = "campus_map.html")]
pub struct CampusMapPage {
    pub chrome: Chrome,
    pub sections: &'static [MapSection],
    pub images: &'static [CampusImage],
}

impl CampusMapPage {
    pub fn new(chrome: Chrome) -> Self {
        Self {
            chrome,
            sections: map::MAP_SECTIONS,
            images: map::CAMPUS_IMAGES,
        }
    }
}

#[derive(Debug, Template)]
#[template(path = "not_found.html")]
pub struct NotFoundPage {
    pub chrome: Chrome,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chrome(path: &str) -> Chrome {
        Chrome {
            shell: Shell::new(path, false),
            notifications: vec![],
        }
    }

    #[test]
    fn dashboard_greets_by_display_name() {
        let page = DashboardPage::new(chrome("/dashboard"), &Identity::new("jane@svit.ac.in"));
        let html = page.render().unwrap();

        assert!(html.contains("Welcome back, jane!"));
        assert!(html.contains("Academic Overview"));
        assert!(html.contains("8.7"));
    }

    #[test]
    fn notifications_rendered() {
        let mut chrome = chrome("/login");
        chrome.notifications = vec![Notification::error(
            "Login Failed",
            "Please fill in all fields",
        )];
        let html = LoginPage {
            chrome,
            email: "a@b.com".to_owned(),
        }
        .render()
        .unwrap();

        assert!(html.contains("Login Failed"));
        assert!(html.contains("Please fill in all fields"));
        assert!(html.contains(r#"value="a@b.com""#));
    }

    #[test]
    fn user_input_escaped() {
        let html = LoginPage {
            chrome: chrome("/login"),
            email: r#""><script>alert(1)</script>"#.to_owned(),
        }
        .render()
        .unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
    }

    #[test]
    fn campus_map_embeds_every_section() {
        let html = CampusMapPage::new(chrome("/campus-map")).render().unwrap();

        for section in map::MAP_SECTIONS {
            assert!(html.contains(section.id));
        }
        for image in map::CAMPUS_IMAGES {
            assert!(html.contains(image.image_url));
        }
    }

    #[test]
    fn active_link_marked() {
        let html = HomePage::new(chrome("/")).render().unwrap();
        assert_eq!(html.matches(r#"aria-current="page""#).count(), 1);

        let html = NotFoundPage {
            chrome: chrome("/missing"),
        }
        .render()
        .unwrap();
        assert_eq!(html.matches(r#"aria-current="page""#).count(), 0);
    }
}
