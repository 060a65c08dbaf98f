use super::matrix::{Day, DayType, MonthMatrix};
use crate::dom::Element;
use crate::options::Options;
use std::collections::HashMap;
use std::fmt;
use time::Date;

/// Class added to the cell for the calendar's reference date
pub const ACTIVE_CLASS: &str = "active";

type DayCallback = Box<dyn Fn(&mut Element, &Day)>;

/// Callbacks that populate day elements in place of the default day-of-month
/// content
#[derive(Default)]
pub(crate) struct DayRenderers {
    by_kind: HashMap<DayType, DayCallback>,
    all: Option<DayCallback>,
}

impl DayRenderers {
    pub(crate) fn set<F>(&mut self, kind: DayType, callback: F)
    where
        F: Fn(&mut Element, &Day) + 'static,
    {
        self.by_kind.insert(kind, Box::new(callback));
    }

    pub(crate) fn set_all<F>(&mut self, callback: F)
    where
        F: Fn(&mut Element, &Day) + 'static,
    {
        self.all = Some(Box::new(callback));
    }

    // Returns `false` if no callback applies to `day`
    fn apply(&self, el: &mut Element, day: &Day) -> bool {
        let mut applied = false;
        if let Some(callback) = self.by_kind.get(&day.kind) {
            callback(el, day);
            applied = true;
        }
        if let Some(callback) = &self.all {
            callback(el, day);
            applied = true;
        }
        applied
    }
}

impl fmt::Debug for DayRenderers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds = self.by_kind.keys().copied().collect::<Vec<_>>();
        kinds.sort_unstable();
        f.debug_struct("DayRenderers")
            .field("by_kind", &kinds)
            .field("all", &self.all.is_some())
            .finish()
    }
}

#[derive(Debug)]
pub(crate) struct Renderer<'a> {
    options: &'a Options,
    renderers: &'a DayRenderers,
    today: Date,
    active: Date,
}

impl<'a> Renderer<'a> {
    pub(crate) fn new(
        options: &'a Options,
        renderers: &'a DayRenderers,
        today: Date,
        active: Date,
    ) -> Self {
        Renderer {
            options,
            renderers,
            today,
            active,
        }
    }

    /// Build the month element for `month`.  Cells falling on today are
    /// retyped as [`DayType::Today`] in the process.
    pub(crate) fn render(&self, month: &mut MonthMatrix) -> Element {
        let mut month_el =
            Element::new(&self.options.tags.month).with_class(&self.options.classes.month);
        for week in month.weeks_mut() {
            let mut week_el =
                Element::new(&self.options.tags.week).with_class(&self.options.classes.week);
            for day in week.iter_mut() {
                week_el.append_child(self.render_day(day));
            }
            month_el.append_child(week_el);
        }
        month_el
    }

    fn render_day(&self, day: &mut Day) -> Element {
        let mut el = Element::new(&self.options.tags.day).with_class(&self.options.classes.day);
        if day.value == self.today {
            day.kind = DayType::Today;
        }
        if !el.has_class(day.kind.as_str()) {
            el.add_class(day.kind.as_str());
        }
        if day.value == self.active {
            el.add_class(ACTIVE_CLASS);
        }
        if !self.renderers.apply(&mut el, day) {
            el.set_inner_html(&day.day_of_month().to_string());
        }
        el
    }
}
