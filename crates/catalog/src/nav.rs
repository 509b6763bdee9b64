use std::fmt;

use videos_api::CategoryFilter;

/// Sidebar and category-bar destinations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NavTarget {
    #[default]
    Home,
    Trending,
    Category(String),
}

impl NavTarget {
    /// Filter the catalog is loaded with for this destination.
    ///
    /// Trending has no ordering of its own yet and shows the same unfiltered,
    /// newest-first listing as Home.
    pub fn filter(&self) -> CategoryFilter {
        match self {
            Self::Home | Self::Trending => CategoryFilter::All,
            Self::Category(tag) => CategoryFilter::from(tag.as_str()),
        }
    }

    /// Identifier used to mark the active navigation entry.
    pub fn key(&self) -> &str {
        match self {
            Self::Home => "home",
            Self::Trending => "trending",
            Self::Category(tag) => tag,
        }
    }
}

impl fmt::Display for NavTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_and_trending_are_unfiltered() {
        assert_eq!(NavTarget::Home.filter(), CategoryFilter::All);
        assert_eq!(NavTarget::Trending.filter(), CategoryFilter::All);
        assert_ne!(NavTarget::Home.key(), NavTarget::Trending.key());
    }

    #[test]
    fn category_targets_filter_by_tag() {
        let target = NavTarget::Category("gaming".to_string());
        assert_eq!(target.filter(), CategoryFilter::Tag("gaming".to_string()));
        assert_eq!(target.to_string(), "gaming");
        assert_eq!(
            NavTarget::Category("all".to_string()).filter(),
            CategoryFilter::All
        );
    }
}
