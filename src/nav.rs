/// How far the page has to scroll before the header shrinks into its compact form.
pub const COMPACT_HEADER_SCROLL: f64 = 50.0;

/// The sections of the page, in the order they appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Hero,
    About,
    Projects,
    Skills,
    Contact,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Hero,
        Section::About,
        Section::Projects,
        Section::Skills,
        Section::Contact,
    ];

    /// The element id of the section.
    pub fn id(self) -> &'static str {
        match self {
            Section::Hero => "hero",
            Section::About => "about",
            Section::Projects => "projects",
            Section::Skills => "skills",
            Section::Contact => "contact",
        }
    }

    pub fn anchor(self) -> String {
        format!("#{}", self.id())
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::Hero => "Home",
            Section::About => "About Me",
            Section::Projects => "Case Studies",
            Section::Skills => "Skills & Expertise",
            Section::Contact => "Contact",
        }
    }

    /// Accepts either `#about` or `about`.
    pub fn from_anchor(anchor: &str) -> Option<Section> {
        let id = anchor.strip_prefix('#').unwrap_or(anchor);
        Section::ALL.iter().copied().find(|section| section.id() == id)
    }
}

pub fn header_compact(scroll_y: f64) -> bool {
    scroll_y > COMPACT_HEADER_SCROLL
}
