//! Navigation shell wrapping every page

/// Routes listed in the navigation, in display order
pub const NAV_LINKS: &[(&str, &str)] = &[
    ("Home", "/"),
    ("Campus Map", "/campus-map"),
    ("Dashboard", "/dashboard"),
    ("Login", "/login"),
    ("Register", "/register"),
];

/// Query parameter value opening the mobile menu
pub const MENU_OPEN: &str = "open";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub name: &'static str,
    pub path: &'static str,
    /// Link points to the current page
    pub active: bool,
}

/// Navigation state for a single page render
///
/// Stateless apart from the menu toggle, which is carried in the `menu` query parameter so the
/// shell works without scripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    pub links: Vec<NavLink>,
    pub current_path: String,
    pub menu_open: bool,
}

impl Shell {
    pub fn new(current_path: &str, menu_open: bool) -> Self {
        let links = NAV_LINKS
            .iter()
            .map(|&(name, path)| NavLink {
                name,
                path,
                active: path == current_path,
            })
            .collect();

        Self {
            links,
            current_path: current_path.to_owned(),
            menu_open,
        }
    }

    /// Where the menu button leads - the same page with the menu flipped
    pub fn toggle_href(&self) -> String {
        if self.menu_open {
            self.current_path.clone()
        } else {
            format!("{}?menu={MENU_OPEN}", self.current_path)
        }
    }

    /// Currently highlighted link
    pub fn active(&self) -> Option<&NavLink> {
        self.links.iter().find(|link| link.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_active_link_per_route() {
        for &(name, path) in NAV_LINKS {
            let shell = Shell::new(path, false);
            let active: Vec<_> = shell.links.iter().filter(|link| link.active).collect();

            assert_eq!(active.len(), 1, "{path}");
            assert_eq!(active[0].name, name);
            assert_eq!(shell.active().map(|link| link.path), Some(path));
        }
    }

    #[test]
    fn unknown_path_has_no_active_link() {
        let shell = Shell::new("/nowhere", false);
        assert_eq!(shell.active(), None);
        assert_eq!(shell.links.len(), NAV_LINKS.len());
    }

    #[test]
    fn menu_toggle() {
        let closed = Shell::new("/dashboard", false);
        assert_eq!(closed.toggle_href(), "/dashboard?menu=open");

        let open = Shell::new("/dashboard", true);
        assert_eq!(open.toggle_href(), "/dashboard");

        // Links are the same whether the menu is open or not
        assert_eq!(closed.links, open.links);
    }
}
