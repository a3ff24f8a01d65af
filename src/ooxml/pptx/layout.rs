//! Slide layouts and the placeholders they provide.

/// The slide layouts a deck allocates slides from, identified by their
/// position in the slide master's layout list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlideLayout {
    /// "Title Slide": centered title plus subtitle (layout index 0)
    Title,
    /// "Title and Content": title plus body (layout index 1)
    TitleAndContent,
}

impl SlideLayout {
    /// Index of this layout in the template's layout list.
    pub const fn index(self) -> usize {
        match self {
            SlideLayout::Title => 0,
            SlideLayout::TitleAndContent => 1,
        }
    }

    /// Layout at `index`, if it is one this crate writes slides for.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(SlideLayout::Title),
            1 => Some(SlideLayout::TitleAndContent),
            _ => None,
        }
    }

    /// Display name as it appears in PowerPoint's layout gallery.
    pub const fn name(self) -> &'static str {
        match self {
            SlideLayout::Title => "Title Slide",
            SlideLayout::TitleAndContent => "Title and Content",
        }
    }

    /// Placeholder that receives the slide title.
    pub const fn title_placeholder(self) -> PlaceholderType {
        match self {
            SlideLayout::Title => PlaceholderType::CenteredTitle,
            SlideLayout::TitleAndContent => PlaceholderType::Title,
        }
    }

    /// Placeholder that receives the slide body (placeholder idx 1).
    pub const fn body_placeholder(self) -> PlaceholderType {
        match self {
            SlideLayout::Title => PlaceholderType::Subtitle,
            SlideLayout::TitleAndContent => PlaceholderType::Object,
        }
    }
}

/// Placeholder kinds used by the title and title+content layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderType {
    /// `type="title"`
    Title,
    /// `type="ctrTitle"`
    CenteredTitle,
    /// `type="subTitle"`
    Subtitle,
    /// `type="body"`
    Body,
    /// No `type` attribute (defaults to `obj`), as used by content placeholders
    Object,
}

impl PlaceholderType {
    /// Parse the `type` attribute of a `<p:ph>` element; a missing
    /// attribute means `obj`.
    pub fn from_attr(value: Option<&str>) -> Option<Self> {
        match value {
            None | Some("obj") => Some(PlaceholderType::Object),
            Some("title") => Some(PlaceholderType::Title),
            Some("ctrTitle") => Some(PlaceholderType::CenteredTitle),
            Some("subTitle") => Some(PlaceholderType::Subtitle),
            Some("body") => Some(PlaceholderType::Body),
            Some(_) => None,
        }
    }

    /// Whether this placeholder holds a slide title.
    pub const fn is_title(self) -> bool {
        matches!(self, PlaceholderType::Title | PlaceholderType::CenteredTitle)
    }

    /// The `<p:ph>` element for this placeholder with the given `idx`.
    pub(crate) fn ph_element(self, idx: Option<u32>) -> String {
        let type_attr = match self {
            PlaceholderType::Title => r#" type="title""#,
            PlaceholderType::CenteredTitle => r#" type="ctrTitle""#,
            PlaceholderType::Subtitle => r#" type="subTitle""#,
            PlaceholderType::Body => r#" type="body""#,
            PlaceholderType::Object => "",
        };
        match idx {
            Some(idx) => format!(r#"<p:ph{} idx="{}"/>"#, type_attr, idx),
            None => format!("<p:ph{}/>", type_attr),
        }
    }
}
