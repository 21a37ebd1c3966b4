//! Campus map content
//!
//! Embed and image URLs point at third-party services and are rendered verbatim.

/// Kind of an embedded map view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedKind {
    Map,
    StreetView,
}

impl EmbedKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Map => "map",
            Self::StreetView => "street-view",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapSection {
    pub id: &'static str,
    pub title: &'static str,
    pub kind: EmbedKind,
    pub embed_url: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CampusImage {
    pub id: &'static str,
    pub title: &'static str,
    pub image_url: &'static str,
    pub description: &'static str,
}

pub const MAP_SECTIONS: &[MapSection] = &[
    MapSection {
        id: "aerial-view",
        title: "SVIT Campus - Aerial View",
        kind: EmbedKind::Map,
        embed_url: "https://www.google.com/maps/embed?pb=!1m18!1m12!1m3!1d478.2648445345!2d78.496234!3d17.4397267!2m3!1f0!2f0!3f0!3m2!1i1024!2i768!4f13.1!3m3!1m2!1s0x3bcb9a1822d3dd8f%3A0xdd25815d2e63bdc6!2sSvit%20Auditorium!5e1!3m2!1sen!2sin!4v1734192000000!5m2!1sen!2sin",
        description: "Explore the complete campus layout from above",
    },
    MapSection {
        id: "parking-street-view",
        title: "Main Parking Area – Explore in 360°",
        kind: EmbedKind::StreetView,
        embed_url: "https://www.google.com/maps/embed?pb=!4v1734192100000!6m8!1m7!1sCIHM0ogKEICAgICaybSxgwE!2m2!1d17.4401362!2d78.4963785!3f343.92!4f-11.11!5f0.7820865974627469",
        description: "Navigate through the main parking area in 360° view",
    },
    MapSection {
        id: "campus-entrance",
        title: "SVIT Main Entrance – Street Perspective",
        kind: EmbedKind::StreetView,
        embed_url: "https://www.google.com/maps/embed?pb=!4v1734192200000!6m8!1m7!1s8JnnXbGlUun1gy49dN9g6w!2m2!1d17.440383!2d78.4961828!3f129.4!4f-5.17!5f0.7820865974627469",
        description: "View the impressive main entrance of SVIT campus",
    },
];

pub const CAMPUS_IMAGES: &[CampusImage] = &[
    CampusImage {
        id: "main-building",
        title: "SVIT Main Building",
        image_url: "https://svit.ac.in/images/svit.jpg",
        description: "The iconic main academic building of SVIT",
    },
    CampusImage {
        id: "canteen",
        title: "Campus Canteen – Student Favorite Spot",
        image_url: "https://svit.ac.in/images/svit/3.jpg",
        description: "Where students gather for meals and conversations",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let mut ids: Vec<&str> = MAP_SECTIONS
            .iter()
            .map(|section| section.id)
            .chain(CAMPUS_IMAGES.iter().map(|image| image.id))
            .collect();
        let count = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), count);
    }

    #[test]
    fn external_content_is_https() {
        assert!(
            MAP_SECTIONS
                .iter()
                .all(|section| section.embed_url.starts_with("https://"))
        );
        assert!(
            CAMPUS_IMAGES
                .iter()
                .all(|image| image.image_url.starts_with("https://"))
        );
    }
}
