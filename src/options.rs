//! Element tag and class names used when rendering a calendar

/// A name for each level of the rendered calendar
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Names {
    pub month: String,
    pub week: String,
    pub day: String,
}

impl Names {
    pub fn new(month: &str, week: &str, day: &str) -> Names {
        Names {
            month: month.to_owned(),
            week: week.to_owned(),
            day: day.to_owned(),
        }
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Options {
    /// Tag names of the created elements
    pub tags: Names,

    /// Base class names of the created elements
    pub classes: Names,
}

impl Options {
    /// Copy every field that is set in each of `sources` onto `self`, later
    /// sources overwriting earlier ones.
    ///
    /// The merge is shallow: an override's `tags` replaces all three tag
    /// names at once rather than being merged name by name.
    pub fn extend<I>(mut self, sources: I) -> Options
    where
        I: IntoIterator<Item = OptionsOverride>,
    {
        for source in sources {
            if let Some(tags) = source.tags {
                self.tags = tags;
            }
            if let Some(classes) = source.classes {
                self.classes = classes;
            }
        }
        self
    }
}

impl Default for Options {
    fn default() -> Options {
        Options {
            tags: Names::new("table", "tr", "td"),
            classes: Names::new("month", "week", "day"),
        }
    }
}

/// User-supplied replacements for some or all of the default [`Options`]
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct OptionsOverride {
    pub tags: Option<Names>,
    pub classes: Option<Names>,
}

impl OptionsOverride {
    pub fn new() -> OptionsOverride {
        OptionsOverride::default()
    }

    pub fn tags(mut self, tags: Names) -> OptionsOverride {
        self.tags = Some(tags);
        self
    }

    pub fn classes(mut self, classes: Names) -> OptionsOverride {
        self.classes = Some(classes);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_override_keeps_defaults() {
        let opts = Options::default().extend([OptionsOverride::new()]);
        assert_eq!(opts, Options::default());
        assert_eq!(opts.tags, Names::new("table", "tr", "td"));
        assert_eq!(opts.classes, Names::new("month", "week", "day"));
    }

    #[test]
    fn test_override_is_shallow() {
        let opts = Options::default()
            .extend([OptionsOverride::new().tags(Names::new("div", "div", "span"))]);
        assert_eq!(opts.tags, Names::new("div", "div", "span"));
        assert_eq!(opts.classes, Names::new("month", "week", "day"));
    }

    #[test]
    fn test_later_sources_win() {
        let opts = Options::default().extend([
            OptionsOverride::new()
                .tags(Names::new("ol", "ul", "li"))
                .classes(Names::new("m", "w", "d")),
            OptionsOverride::new().classes(Names::new("cal", "row", "cell")),
        ]);
        assert_eq!(opts.tags, Names::new("ol", "ul", "li"));
        assert_eq!(opts.classes, Names::new("cal", "row", "cell"));
    }
}
